//! The pattern contract, expressed as a schema descriptor
//!
//! Field order here is the order in which structural issues are reported.

use crate::descriptor::{FieldSchema, FieldType, ObjectSchema};
use crate::types::{Category, FiberKind, Mode, StepAction, WeightKind, Worked, BRAND};
use std::sync::OnceLock;

static PATTERN_SCHEMA: OnceLock<ObjectSchema> = OnceLock::new();

const MAX_COUNT: f64 = u32::MAX as f64;

/// The schema every candidate pattern is checked against
pub fn pattern_schema() -> &'static ObjectSchema {
    PATTERN_SCHEMA.get_or_init(build_pattern_schema)
}

fn strings() -> FieldType {
    FieldType::array_of(FieldType::String)
}

fn yarn_schema() -> ObjectSchema {
    ObjectSchema::new(
        "yarn",
        vec![
            FieldSchema::required("fiber", FieldType::open_enumeration(FiberKind::ALL)),
            FieldSchema::required("weight", FieldType::open_enumeration(WeightKind::ALL)),
            FieldSchema::optional("meters_est", FieldType::Number)
                .describe("Estimated yarn length in meters"),
            FieldSchema::required("colors", strings()),
        ],
    )
}

fn materials_schema() -> ObjectSchema {
    ObjectSchema::new(
        "materials",
        vec![
            FieldSchema::required("yarn", FieldType::array_of(FieldType::Object(yarn_schema()))),
            FieldSchema::required(
                "hook_mm_range",
                FieldType::Tuple {
                    elements: vec![FieldType::Number, FieldType::Number],
                },
            )
            .describe("Smallest and largest suitable hook, in mm"),
            FieldSchema::required("hook_mm_recommended", FieldType::Number),
            FieldSchema::required("tools", strings()),
        ],
    )
}

fn gauge_schema() -> ObjectSchema {
    ObjectSchema::new(
        "gauge",
        vec![
            FieldSchema::required("target", FieldType::String)
                .describe("e.g. \"X stitches x Y rows = 10 cm\""),
            FieldSchema::optional("stitches_per_10cm", FieldType::Number),
            FieldSchema::optional("rows_per_10cm", FieldType::Number),
            FieldSchema::required("how_to_measure", FieldType::String),
            FieldSchema::required("adjustment_rules", strings()),
        ],
    )
}

fn abbreviation_schema() -> ObjectSchema {
    ObjectSchema::new(
        "abbreviation",
        vec![
            FieldSchema::required("abbr", FieldType::String),
            FieldSchema::required("meaning", FieldType::String),
        ],
    )
}

fn step_schema() -> ObjectSchema {
    ObjectSchema::new(
        "step",
        vec![
            FieldSchema::required("step", FieldType::Integer).range(1.0, MAX_COUNT),
            FieldSchema::required("label", FieldType::String).describe("\"Row 1\" or \"Round 1\""),
            FieldSchema::required("text", FieldType::String),
            FieldSchema::required("stitch_count", FieldType::Integer)
                .nullable()
                .range(0.0, MAX_COUNT)
                .describe("Total stitches after this step; null when not tracked"),
            FieldSchema::optional("action", FieldType::enumeration(StepAction::ALL)),
        ],
    )
}

fn section_schema() -> ObjectSchema {
    ObjectSchema::new(
        "part",
        vec![
            FieldSchema::required("name", FieldType::String),
            FieldSchema::required("worked", FieldType::enumeration(Worked::ALL)),
            FieldSchema::required(
                "instructions",
                FieldType::array_of(FieldType::Object(step_schema())),
            ),
            FieldSchema::optional("notes", strings()),
        ],
    )
}

fn calibration_schema() -> ObjectSchema {
    ObjectSchema::new(
        "calibration",
        vec![
            FieldSchema::required("required_for_exact", FieldType::Bool),
            FieldSchema::required("inputs", strings())
                .describe("\"height_cm\", \"width_cm\", \"scale_photo\""),
            FieldSchema::optional("used_values", FieldType::map_of(FieldType::Any)),
        ],
    )
}

fn build_pattern_schema() -> ObjectSchema {
    ObjectSchema::new(
        "pattern",
        vec![
            FieldSchema::optional(
                "brand",
                FieldType::Literal {
                    value: BRAND.to_string(),
                },
            ),
            FieldSchema::required("title", FieldType::String),
            FieldSchema::required("category", FieldType::enumeration(Category::ALL)),
            FieldSchema::required("mode", FieldType::enumeration(Mode::ALL)),
            FieldSchema::required("confidence", FieldType::Integer).range(0.0, 100.0),
            FieldSchema::required("assumptions", strings()),
            FieldSchema::required("materials", FieldType::Object(materials_schema())),
            FieldSchema::required("gauge", FieldType::Object(gauge_schema())),
            FieldSchema::required(
                "abbreviations",
                FieldType::array_of(FieldType::Object(abbreviation_schema())),
            ),
            FieldSchema::required(
                "parts",
                FieldType::array_of(FieldType::Object(section_schema())),
            ),
            FieldSchema::required("assembly", strings()),
            FieldSchema::required("finishing", strings()),
            FieldSchema::required("calibration", FieldType::Object(calibration_schema())),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_fields_in_order() {
        let schema = pattern_schema();
        assert_eq!(schema.name, "pattern");
        assert_eq!(schema.field_names().first(), Some(&"brand"));
        assert_eq!(schema.field_names().last(), Some(&"calibration"));
        assert!(!schema.is_field_required("brand"));
        assert!(schema.is_field_required("parts"));
    }

    #[test]
    fn test_stitch_count_is_required_but_nullable() {
        let parts = pattern_schema().get_field("parts").unwrap();
        let FieldType::Array { element } = &parts.field_type else {
            panic!("parts should be an array");
        };
        let FieldType::Object(section) = element.as_ref() else {
            panic!("parts elements should be objects");
        };
        let instructions = section.get_field("instructions").unwrap();
        let FieldType::Array { element } = &instructions.field_type else {
            panic!("instructions should be an array");
        };
        let FieldType::Object(step) = element.as_ref() else {
            panic!("steps should be objects");
        };

        let count = step.get_field("stitch_count").unwrap();
        assert!(count.required);
        assert!(count.nullable);
        assert_eq!(count.min, Some(0.0));
    }

    #[test]
    fn test_enums_follow_model() {
        let mode = pattern_schema().get_field("mode").unwrap();
        assert_eq!(
            mode.field_type,
            FieldType::Enum {
                values: vec!["instant".to_string(), "exact".to_string()]
            }
        );
    }
}
