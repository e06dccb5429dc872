//! Schema introspection command

use anyhow::Result;
use stitch_schema::{pattern_schema, FieldSchema, FieldType, ObjectSchema};

pub fn run(format: &str) -> Result<()> {
    let schema = pattern_schema();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(schema)?);
        return Ok(());
    }

    println!("Object: {}", schema.name);
    println!();
    println!("Fields:");
    print_fields(schema, 1);
    Ok(())
}

fn print_fields(schema: &ObjectSchema, depth: usize) {
    let indent = "  ".repeat(depth);
    for field in &schema.fields {
        print_field(field, &indent);

        if let Some(nested) = nested_object(&field.field_type) {
            print_fields(nested, depth + 1);
        }
    }
}

fn print_field(field: &FieldSchema, indent: &str) {
    let required = if field.required { " (required)" } else { "" };
    let nullable = if field.nullable { " | null" } else { "" };
    println!(
        "{}{} : {}{}{}",
        indent,
        field.name,
        format_field_type(&field.field_type),
        nullable,
        required
    );

    if let Some(desc) = &field.description {
        println!("{}  # {}", indent, desc);
    }

    if field.min.is_some() || field.max.is_some() {
        let min = field.min.map(|v| v.to_string()).unwrap_or_default();
        let max = field.max.map(|v| v.to_string()).unwrap_or_default();
        println!("{}  # Range: {} .. {}", indent, min, max);
    }
}

/// The object schema to descend into, looking through arrays
fn nested_object(ft: &FieldType) -> Option<&ObjectSchema> {
    match ft {
        FieldType::Object(schema) => Some(schema),
        FieldType::Array { element } => nested_object(element),
        _ => None,
    }
}

fn format_field_type(ft: &FieldType) -> String {
    match ft {
        FieldType::Literal { value } => format!("\"{}\"", value),
        FieldType::Enum { values } => format!("enum[{}]", values.join(", ")),
        FieldType::OpenEnum { known } => format!("string[{}, ...]", known.join(", ")),
        FieldType::Tuple { elements } => {
            let items: Vec<String> = elements.iter().map(format_field_type).collect();
            format!("[{}]", items.join(", "))
        }
        FieldType::Array { element } => format!("array<{}>", format_field_type(element)),
        FieldType::Map { value } => format!("map<string, {}>", format_field_type(value)),
        FieldType::Object(schema) => schema.name.clone(),
        other => other.type_name().to_string(),
    }
}
