//! Typed pattern model
//!
//! Field names match the JSON emitted by the generator. Every type here is
//! plain data: produced once, read by the checker, never mutated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The only brand a pattern may carry
pub const BRAND: &str = "Patrón al instante";

fn default_brand() -> String {
    BRAND.to_string()
}

/// Declares the wire names of a closed string enum once, so the serde
/// representation and the schema descriptor cannot drift apart.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $wire:tt),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            /// Every accepted wire value, in declaration order
            pub const ALL: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn from_wire(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// What kind of object the pattern makes
    pub enum Category {
        Amigurumi => "amigurumi",
        Bag => "bag",
        Motif => "motif",
        Blanket => "blanket",
        GarmentSimple => "garment_simple",
        Other => "other",
    }
}

wire_enum! {
    /// Generation mode the pattern was requested in
    pub enum Mode {
        Instant => "instant",
        Exact => "exact",
    }
}

wire_enum! {
    /// How a section is constructed
    pub enum Worked {
        InRounds => "in_rounds",
        Rows => "rows",
        Motifs => "motifs",
    }
}

wire_enum! {
    /// What a step does to the stitch count
    ///
    /// Generators may tag steps explicitly. Untagged steps are classified by
    /// the checker from their instruction text.
    pub enum StepAction {
        Increase => "increase",
        Decrease => "decrease",
        Plain => "plain",
        Unclassified => "unclassified",
    }
}

wire_enum! {
    pub enum FiberKind {
        Cotton => "cotton",
        Acrylic => "acrylic",
        Wool => "wool",
        Blend => "blend",
        Other => "other",
    }
}

wire_enum! {
    pub enum WeightKind {
        Lace => "lace",
        Fingering => "fingering",
        Sport => "sport",
        Dk => "DK",
        Worsted => "worsted",
        Bulky => "bulky",
        SuperBulky => "super_bulky",
    }
}

/// Declares an open string enum: a known kind, or any other text.
///
/// Equality compares wire text, so `Custom("cotton")` equals
/// `Known(Cotton)`; both encode to the same string and decode as the known
/// kind.
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident($kind:ident)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(untagged)]
        pub enum $name {
            Known($kind),
            Custom(String),
        }

        impl $name {
            /// The wire text of this value
            pub fn as_str(&self) -> &str {
                match self {
                    $name::Known(kind) => kind.as_str(),
                    $name::Custom(s) => s.as_str(),
                }
            }

            /// The same value with known text folded into `Known`
            pub fn normalized(&self) -> Self {
                Self::from(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $kind::from_wire(s)
                    .map($name::Known)
                    .unwrap_or_else(|| $name::Custom(s.to_string()))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl Eq for $name {}

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_enum! {
    /// A known fiber, or whatever the generator wrote
    pub enum Fiber(FiberKind)
}

open_enum! {
    /// A known yarn weight, or whatever the generator wrote
    pub enum Weight(WeightKind)
}

/// Integers as JSON producers write them: `6` or `6.0`
mod whole {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(u64),
        Float(f64),
    }

    fn to_u64<E: Error>(n: Number) -> Result<u64, E> {
        match n {
            Number::Int(i) => Ok(i),
            Number::Float(f) if f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 => {
                Ok(f as u64)
            }
            Number::Float(f) => Err(E::custom(format!("expected a whole number, got {}", f))),
        }
    }

    fn narrow<T: TryFrom<u64>, E: Error>(n: u64) -> Result<T, E> {
        T::try_from(n).map_err(|_| E::custom(format!("{} is out of range", n)))
    }

    pub fn required<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        narrow(to_u64(Number::deserialize(deserializer)?)?)
    }

    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        match Option::<Number>::deserialize(deserializer)? {
            Some(n) => narrow(to_u64(n)?).map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yarn {
    pub fiber: Fiber,
    pub weight: Weight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meters_est: Option<f64>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Materials {
    pub yarn: Vec<Yarn>,
    pub hook_mm_range: [f64; 2],
    pub hook_mm_recommended: f64,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    /// Human-readable target, e.g. "20 pb x 24 hileras = 10 cm"
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stitches_per_10cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_per_10cm: Option<f64>,
    pub how_to_measure: String,
    pub adjustment_rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abbreviation {
    pub abbr: String,
    pub meaning: String,
}

/// One instruction within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based sequence number
    #[serde(deserialize_with = "whole::required")]
    pub step: u32,
    /// Display label, e.g. "Round 3"
    pub label: String,
    pub text: String,
    /// Total stitches after this step; `None` when not tracked
    #[serde(deserialize_with = "whole::optional")]
    pub stitch_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<StepAction>,
}

/// A named structural unit of the pattern ("parts" on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub worked: Worked,
    pub instructions: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub required_for_exact: bool,
    /// Measurements asked of the user, e.g. "height_cm"
    pub inputs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_values: Option<BTreeMap<String, serde_json::Value>>,
}

/// The root document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(default = "default_brand")]
    pub brand: String,
    pub title: String,
    pub category: Category,
    pub mode: Mode,
    #[serde(deserialize_with = "whole::required")]
    pub confidence: u8,
    pub assumptions: Vec<String>,
    pub materials: Materials,
    pub gauge: Gauge,
    pub abbreviations: Vec<Abbreviation>,
    pub parts: Vec<Section>,
    pub assembly: Vec<String>,
    pub finishing: Vec<String>,
    pub calibration: Calibration,
}

impl Pattern {
    /// Total number of steps across all sections
    pub fn step_count(&self) -> usize {
        self.parts.iter().map(|p| p.instructions.len()).sum()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.parts.iter().find(|p| p.name == name)
    }
}
