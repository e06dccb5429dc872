//! Step action classification
//!
//! Steps tagged by the generator keep their tag. Untagged steps are
//! classified from their instruction text against a marker vocabulary.

use serde::{Deserialize, Serialize};
use stitch_schema::{Step, StepAction};

/// Built-in marker sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyKind {
    #[default]
    English,
    Spanish,
    Custom,
}

/// Case-insensitive substrings that mark a step as increasing or decreasing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionVocabulary {
    increase: Vec<String>,
    decrease: Vec<String>,
}

/// Outcome of classifying one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'v> {
    pub action: StepAction,
    /// The increase marker found in the text; `None` for tagged steps
    pub marker: Option<&'v str>,
}

impl Default for ActionVocabulary {
    fn default() -> Self {
        Self::english()
    }
}

fn normalize<I, S>(markers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    markers
        .into_iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ActionVocabulary {
    pub fn new<I, D, S, T>(increase: I, decrease: D) -> Self
    where
        I: IntoIterator<Item = S>,
        D: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            increase: normalize(increase),
            decrease: normalize(decrease),
        }
    }

    /// `inc` / `dec`
    pub fn english() -> Self {
        Self::new(["inc"], ["dec"])
    }

    /// `aum` (aumento) / `dism` (disminución)
    pub fn spanish() -> Self {
        Self::new(["aum"], ["dism"])
    }

    /// Markers for a built-in kind; `Custom` starts with no markers at all
    pub fn preset(kind: VocabularyKind) -> Self {
        match kind {
            VocabularyKind::English => Self::english(),
            VocabularyKind::Spanish => Self::spanish(),
            VocabularyKind::Custom => Self::new(Vec::<String>::new(), Vec::<String>::new()),
        }
    }

    pub fn increase_markers(&self) -> &[String] {
        &self.increase
    }

    pub fn decrease_markers(&self) -> &[String] {
        &self.decrease
    }

    pub(crate) fn with_increase(mut self, markers: &[String]) -> Self {
        self.increase = normalize(markers);
        self
    }

    pub(crate) fn with_decrease(mut self, markers: &[String]) -> Self {
        self.decrease = normalize(markers);
        self
    }

    /// Classify instruction text
    ///
    /// Increase iff an increase marker is present and no decrease marker is;
    /// text with both is left unclassified.
    pub fn classify_text(&self, text: &str) -> Classification<'_> {
        let text = text.to_lowercase();
        let inc = self.increase.iter().find(|m| text.contains(m.as_str()));
        let dec = self.decrease.iter().any(|m| text.contains(m.as_str()));

        let action = match (inc.is_some(), dec) {
            (true, false) => StepAction::Increase,
            (false, true) => StepAction::Decrease,
            (true, true) => StepAction::Unclassified,
            (false, false) => StepAction::Plain,
        };
        Classification {
            action,
            marker: if action == StepAction::Increase {
                inc.map(String::as_str)
            } else {
                None
            },
        }
    }

    /// Classify a step, preferring an explicit tag over its text
    pub fn classify(&self, step: &Step) -> Classification<'_> {
        match step.action {
            Some(action) => Classification {
                action,
                marker: None,
            },
            None => self.classify_text(&step.text),
        }
    }
}
