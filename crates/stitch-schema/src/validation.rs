//! Validation of candidate values against a schema descriptor
//!
//! Unlike a fail-fast deserializer, this walks the whole candidate and
//! collects one `FieldIssue` per offending field. Issues come out in schema
//! field order, then array index order.

use crate::descriptor::{FieldSchema, FieldType, ObjectSchema};
use serde_json::Value;
use stitch_core::{FieldIssue, IssueKind};

/// Validate a candidate value against an object schema, returning every issue
pub fn validate_value(schema: &ObjectSchema, value: &Value) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    validate_object("", schema, value, &mut issues);
    issues
}

fn join(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

fn root(path: &str) -> &str {
    if path.is_empty() {
        "$"
    } else {
        path
    }
}

fn validate_object(
    path: &str,
    schema: &ObjectSchema,
    value: &Value,
    issues: &mut Vec<FieldIssue>,
) {
    let Some(map) = value.as_object() else {
        issues.push(type_mismatch(root(path), "object", value));
        return;
    };

    for field in &schema.fields {
        let field_path = join(path, &field.name);
        match map.get(&field.name) {
            None if field.required => {
                issues.push(FieldIssue::new(field_path, IssueKind::MissingRequiredField));
            }
            None => {}
            Some(Value::Null) if field.nullable => {}
            Some(v) => validate_field(&field_path, field, v, issues),
        }
        // Unknown keys are tolerated; generators add extras
    }
}

fn validate_field(path: &str, field: &FieldSchema, value: &Value, issues: &mut Vec<FieldIssue>) {
    validate_field_value(path, &field.field_type, value, field.min, field.max, issues);
}

fn validate_field_value(
    path: &str,
    field_type: &FieldType,
    value: &Value,
    min: Option<f64>,
    max: Option<f64>,
    issues: &mut Vec<FieldIssue>,
) {
    match (field_type, value) {
        (FieldType::Any, _) => {}
        (FieldType::Bool, Value::Bool(_)) => {}
        (FieldType::Number, Value::Number(n)) => {
            if let Some(n) = n.as_f64() {
                validate_range(path, n, min, max, issues);
            }
        }
        (FieldType::Integer, Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                validate_range(path, i as f64, min, max, issues);
            } else if let Some(u) = n.as_u64() {
                validate_range(path, u as f64, min, max, issues);
            } else {
                // JSON producers often write whole numbers as `6.0`
                let value = n.as_f64().unwrap_or(f64::NAN);
                if value.fract() == 0.0 {
                    validate_range(path, value, min, max, issues);
                } else {
                    issues.push(FieldIssue::new(path, IssueKind::NotAnInteger { value }));
                }
            }
        }
        (FieldType::String | FieldType::OpenEnum { .. }, Value::String(_)) => {}
        (FieldType::Literal { value: expected }, Value::String(s)) => {
            if s != expected {
                issues.push(FieldIssue::new(
                    path,
                    IssueKind::LiteralMismatch {
                        expected: expected.clone(),
                        got: s.clone(),
                    },
                ));
            }
        }
        (FieldType::Enum { values }, Value::String(s)) => {
            if !values.contains(s) {
                issues.push(FieldIssue::new(
                    path,
                    IssueKind::InvalidEnumValue {
                        value: s.clone(),
                        allowed: values.clone(),
                    },
                ));
            }
        }
        (FieldType::Tuple { elements }, Value::Array(arr)) => {
            if arr.len() != elements.len() {
                issues.push(FieldIssue::new(
                    path,
                    IssueKind::InvalidLength {
                        expected: elements.len(),
                        got: arr.len(),
                    },
                ));
                return;
            }
            for (i, (element, item)) in elements.iter().zip(arr).enumerate() {
                let item_path = format!("{}[{}]", path, i);
                validate_field_value(&item_path, element, item, None, None, issues);
            }
        }
        (FieldType::Array { element }, Value::Array(arr)) => {
            for (i, item) in arr.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                validate_field_value(&item_path, element, item, None, None, issues);
            }
        }
        (FieldType::Map { value: element }, Value::Object(map)) => {
            // serde_json keeps keys sorted, so this order is stable
            for (key, item) in map {
                validate_field_value(&join(path, key), element, item, None, None, issues);
            }
        }
        (FieldType::Object(schema), Value::Object(_)) => {
            validate_object(path, schema, value, issues);
        }
        _ => issues.push(type_mismatch(path, field_type.type_name(), value)),
    }
}

fn validate_range(
    path: &str,
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
    issues: &mut Vec<FieldIssue>,
) {
    let below = min.map(|m| value < m).unwrap_or(false);
    let above = max.map(|m| value > m).unwrap_or(false);
    if below || above {
        issues.push(FieldIssue::new(
            path,
            IssueKind::ValueOutOfRange {
                min: min.unwrap_or(f64::MIN),
                max: max.unwrap_or(f64::MAX),
                value,
            },
        ));
    }
}

fn type_mismatch(path: &str, expected: &str, value: &Value) -> FieldIssue {
    FieldIssue::new(
        path,
        IssueKind::InvalidFieldType {
            expected: expected.to_string(),
            got: value_type_name(value).to_string(),
        },
    )
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_test_schema() -> ObjectSchema {
        ObjectSchema::new(
            "step",
            vec![
                FieldSchema::required("step", FieldType::Integer).range(1.0, 1000.0),
                FieldSchema::required("worked", FieldType::enumeration(&["rows", "in_rounds"])),
                FieldSchema::required("stitch_count", FieldType::Integer).nullable(),
                FieldSchema::optional("notes", FieldType::array_of(FieldType::String)),
                FieldSchema::optional(
                    "range",
                    FieldType::Tuple {
                        elements: vec![FieldType::Number, FieldType::Number],
                    },
                ),
            ],
        )
    }

    #[test]
    fn test_valid_data() {
        let schema = make_test_schema();
        let data = json!({
            "step": 3,
            "worked": "rows",
            "stitch_count": null,
            "notes": ["a", "b"],
            "range": [2.5, 3.5],
            "extra": "ignored"
        });

        assert!(validate_value(&schema, &data).is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let schema = make_test_schema();
        let issues = validate_value(&schema, &json!({ "step": 1, "worked": "rows" }));

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "stitch_count");
        assert_eq!(issues[0].kind, IssueKind::MissingRequiredField);
    }

    #[test]
    fn test_collects_every_issue_in_field_order() {
        let schema = make_test_schema();
        let data = json!({
            "step": 0,
            "worked": "spiral",
            "stitch_count": 6.5,
            "notes": ["fine", 7],
            "range": [1.0]
        });

        let issues = validate_value(&schema, &data);
        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["step", "worked", "stitch_count", "notes[1]", "range"]
        );
        assert!(matches!(issues[0].kind, IssueKind::ValueOutOfRange { value, .. } if value == 0.0));
        assert!(matches!(&issues[1].kind,
            IssueKind::InvalidEnumValue { value, .. } if value == "spiral"));
        assert!(matches!(issues[2].kind, IssueKind::NotAnInteger { .. }));
        assert!(matches!(&issues[3].kind, IssueKind::InvalidFieldType { expected, got }
            if expected == "string" && got == "integer"));
        assert_eq!(issues[4].kind, IssueKind::InvalidLength { expected: 2, got: 1 });
    }

    #[test]
    fn test_null_rejected_when_not_nullable() {
        let schema = make_test_schema();
        let issues = validate_value(
            &schema,
            &json!({ "step": 1, "worked": "rows", "stitch_count": 4, "notes": null }),
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "notes");
    }

    #[test]
    fn test_non_object_root() {
        let issues = validate_value(&make_test_schema(), &json!([1, 2, 3]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "$");
    }

    #[test]
    fn test_whole_float_accepted_as_integer() {
        let schema = make_test_schema();
        let data = json!({ "step": 2.0, "worked": "rows", "stitch_count": 12.0 });
        assert!(validate_value(&schema, &data).is_empty());

        let data = json!({ "step": 1e6, "worked": "rows", "stitch_count": 0 });
        let issues = validate_value(&schema, &data);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0].kind, IssueKind::ValueOutOfRange { value, .. } if value == 1e6));
    }

    #[test]
    fn test_negative_integer_out_of_range() {
        let schema = ObjectSchema::new(
            "count",
            vec![FieldSchema::required("n", FieldType::Integer).range(0.0, 10.0)],
        );
        let issues = validate_value(&schema, &json!({ "n": -3 }));
        assert_eq!(
            issues[0].kind,
            IssueKind::ValueOutOfRange {
                min: 0.0,
                max: 10.0,
                value: -3.0
            }
        );
    }
}
