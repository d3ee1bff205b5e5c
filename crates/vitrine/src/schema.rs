//! Declarative input schemas: typed fields, mandatory defaults, and a
//! closed-world validation boundary.
//!
//! Every widget declares its accepted fields here. Validation either
//! produces a fully-defaulted value record (handlers never see partial
//! input) or a failure enumerating every offending field, so an automated
//! caller can fix all its mistakes in one round trip.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// A validated, fully-defaulted argument record.
pub type ValueRecord = Map<String, Value>;

/// Semantic type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldType {
    /// JSON Schema name for this type.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Number => value.is_number(),
            FieldType::Boolean => value.is_boolean(),
        }
    }
}

/// One declared field: semantic type, mandatory default, optional
/// constraints. Defaults are required by construction so every tool stays
/// callable with an empty argument object.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: &'static str,
    description: &'static str,
    field_type: FieldType,
    default: Value,
    allowed: Option<&'static [&'static str]>,
    bounds: Option<(i64, i64)>,
    max_len: Option<usize>,
}

impl FieldSpec {
    pub fn string(name: &'static str, default: &str) -> Self {
        Self {
            name,
            description: "",
            field_type: FieldType::String,
            default: Value::String(default.to_string()),
            allowed: None,
            bounds: None,
            max_len: None,
        }
    }

    pub fn integer(name: &'static str, default: i64) -> Self {
        Self {
            name,
            description: "",
            field_type: FieldType::Integer,
            default: json!(default),
            allowed: None,
            bounds: None,
            max_len: None,
        }
    }

    pub fn number(name: &'static str, default: f64) -> Self {
        Self {
            name,
            description: "",
            field_type: FieldType::Number,
            default: json!(default),
            allowed: None,
            bounds: None,
            max_len: None,
        }
    }

    pub fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            name,
            description: "",
            field_type: FieldType::Boolean,
            default: Value::Bool(default),
            allowed: None,
            bounds: None,
            max_len: None,
        }
    }

    /// Restrict a string field to a fixed value set.
    pub fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    /// Restrict an integer field to an inclusive range.
    pub fn bounds(mut self, min: i64, max: i64) -> Self {
        self.bounds = Some((min, max));
        self
    }

    /// Restrict a string field to a maximum character count.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check a type-correct value against this field's constraints.
    fn check_constraints(&self, value: &Value) -> Option<FieldIssue> {
        if let Some(allowed) = self.allowed {
            if let Some(s) = value.as_str() {
                if !allowed.contains(&s) {
                    return Some(FieldIssue::ConstraintViolation {
                        field: self.name,
                        constraint: format!(
                            "must be one of: {}; got \"{}\"",
                            allowed.join(", "),
                            s
                        ),
                    });
                }
            }
        }
        if let Some(max_len) = self.max_len {
            if let Some(s) = value.as_str() {
                let len = s.chars().count();
                if len > max_len {
                    return Some(FieldIssue::ConstraintViolation {
                        field: self.name,
                        constraint: format!(
                            "must be at most {} characters, got {}",
                            max_len, len
                        ),
                    });
                }
            }
        }
        if let Some((min, max)) = self.bounds {
            if let Some(n) = value.as_i64() {
                if n < min || n > max {
                    return Some(FieldIssue::ConstraintViolation {
                        field: self.name,
                        constraint: format!("must be between {} and {}, got {}", min, max, n),
                    });
                }
            }
        }
        None
    }
}

/// A single validation problem, phrased so the caller knows the fix.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldIssue {
    #[error("unknown field '{name}'; allowed fields are: {allowed}")]
    UnknownField { name: String, allowed: String },
    #[error("field '{field}' expects {expected}, got {got}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        got: String,
    },
    #[error("field '{field}' {constraint}")]
    ConstraintViolation {
        field: &'static str,
        constraint: String,
    },
}

/// Validation failure carrying every offending field, not just the first.
#[derive(Debug, Clone, Error, PartialEq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let detail: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        write!(f, "Invalid arguments: {}", detail.join("; "))
    }
}

/// Ordered, closed set of fields accepted by one tool.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    fields: Vec<FieldSpec>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field. The default must itself satisfy the field's type and
    /// constraints; a schema that rejects its own defaults is a bug in the
    /// widget table, not a runtime condition.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        debug_assert!(
            spec.field_type.matches(&spec.default) && spec.check_constraints(&spec.default).is_none(),
            "default for field '{}' violates its own schema",
            spec.name
        );
        self.fields.push(spec);
        self
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// The fully-defaulted record, equivalent to validating `{}`.
    pub fn defaults(&self) -> ValueRecord {
        let mut record = ValueRecord::new();
        for field in &self.fields {
            record.insert(field.name.to_string(), field.default.clone());
        }
        record
    }

    /// Validate a raw argument object against this schema.
    ///
    /// Unknown keys fail (closed world), missing keys are filled from
    /// defaults, and every problem is reported in one pass. On success the
    /// returned record has every declared field populated.
    pub fn validate(&self, args: &Map<String, Value>) -> Result<ValueRecord, ValidationError> {
        let mut issues = Vec::new();

        for key in args.keys() {
            if !self.fields.iter().any(|f| f.name == key) {
                issues.push(FieldIssue::UnknownField {
                    name: key.clone(),
                    allowed: self.field_names().join(", "),
                });
            }
        }

        let mut record = ValueRecord::new();
        for field in &self.fields {
            match args.get(field.name) {
                None => {
                    record.insert(field.name.to_string(), field.default.clone());
                }
                Some(value) => {
                    if !field.field_type.matches(value) {
                        issues.push(FieldIssue::TypeMismatch {
                            field: field.name,
                            expected: field.field_type.name(),
                            got: describe(value),
                        });
                        continue;
                    }
                    if let Some(issue) = field.check_constraints(value) {
                        issues.push(issue);
                        continue;
                    }
                    record.insert(field.name.to_string(), value.clone());
                }
            }
        }

        if issues.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Emit the host-introspectable JSON Schema for `tools/list`.
    ///
    /// Nothing is `required` (every field has a default) and
    /// `additionalProperties` is false (closed world).
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for field in &self.fields {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(field.field_type.name()));
            if !field.description.is_empty() {
                prop.insert("description".to_string(), json!(field.description));
            }
            prop.insert("default".to_string(), field.default.clone());
            if let Some(allowed) = field.allowed {
                prop.insert("enum".to_string(), json!(allowed));
            }
            if let Some((min, max)) = field.bounds {
                prop.insert("minimum".to_string(), json!(min));
                prop.insert("maximum".to_string(), json!(max));
            }
            if let Some(max_len) = field.max_len {
                prop.insert("maxLength".to_string(), json!(max_len));
            }
            properties.insert(field.name.to_string(), Value::Object(prop));
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!([]));
        schema.insert("additionalProperties".to_string(), json!(false));
        schema
    }
}

/// Render a received value for error messages (`string "five"`).
fn describe(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    format!("{} {}", kind, value)
}

/// Read a string field from a validated record. Post-validation every
/// declared field is present, so missing keys yield the empty string
/// rather than a panic.
pub fn field_str<'a>(record: &'a ValueRecord, name: &str) -> &'a str {
    record.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// Read an integer field from a validated record.
pub fn field_i64(record: &ValueRecord, name: &str) -> i64 {
    record.get(name).and_then(Value::as_i64).unwrap_or_default()
}

/// Read a boolean field from a validated record.
pub fn field_bool(record: &ValueRecord, name: &str) -> bool {
    record.get(name).and_then(Value::as_bool).unwrap_or_default()
}
