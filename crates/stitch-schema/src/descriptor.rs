//! Schema descriptor types
//!
//! A small declarative description of JSON shapes. The pattern contract is
//! written in these terms (see `contract.rs`) and walked by `validation.rs`.

use serde::Serialize;

/// The type of a field in a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    Bool,
    /// A JSON number without a fractional part
    Integer,
    Number,
    String,
    /// A string that must equal `value` exactly
    Literal { value: String },
    /// A string drawn from a closed set
    Enum { values: Vec<String> },
    /// Any string; `known` lists the values with a dedicated meaning
    OpenEnum { known: Vec<String> },
    /// A fixed-length array with per-position element types
    Tuple { elements: Vec<FieldType> },
    Array { element: Box<FieldType> },
    /// A string-keyed object with uniform values
    Map { value: Box<FieldType> },
    Object(ObjectSchema),
    Any,
}

impl FieldType {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Literal { .. } => "literal",
            FieldType::Enum { .. } => "enum",
            FieldType::OpenEnum { .. } => "string",
            FieldType::Tuple { .. } => "tuple",
            FieldType::Array { .. } => "array",
            FieldType::Map { .. } => "map",
            FieldType::Object(_) => "object",
            FieldType::Any => "any",
        }
    }

    pub fn enumeration(values: &[&str]) -> Self {
        FieldType::Enum {
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn open_enumeration(known: &[&str]) -> Self {
        FieldType::OpenEnum {
            known: known.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn array_of(element: FieldType) -> Self {
        FieldType::Array {
            element: Box::new(element),
        }
    }

    pub fn map_of(value: FieldType) -> Self {
        FieldType::Map {
            value: Box::new(value),
        }
    }
}

/// Schema for a single field within an object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    /// The key must be present
    pub required: bool,
    /// `null` is accepted in place of a value
    pub nullable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSchema {
    pub fn required(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: true,
            nullable: false,
            min: None,
            max: None,
            description: None,
        }
    }

    pub fn optional(name: &str, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Schema for a JSON object: an ordered list of fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl ObjectSchema {
    pub fn new(name: &str, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }

    /// Get a field schema by name
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// List all field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Check if a field is required
    pub fn is_field_required(&self, name: &str) -> bool {
        self.get_field(name).map(|f| f.required).unwrap_or(false)
    }
}
