//! # Schema Validation
//!
//! Declarative, field-by-field record schemas.
//!
//! Validation never stops at the first problem: every declared field is
//! checked, every undeclared key is reported, and the caller receives the
//! full list in one pass. On success the normalized record is returned
//! (strings trimmed, numeric strings converted to integers).

use serde_json::{json, Map, Value};

/// Headline attached to every validation failure.
pub const VALIDATION_HEADLINE: &str =
    "The following fields are missing or have been entered with invalid data:";

// =============================================================================
// RULES
// =============================================================================

/// Type and bounds of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer within `[min, max]`. Numeric strings are converted.
    Integer {
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
    /// Non-empty string, trimmed, at most `max_len` UTF-16 code units.
    Text {
        /// Maximum length in UTF-16 code units.
        max_len: usize,
    },
}

/// Rule for one named field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name (also its path).
    pub name: &'static str,
    /// Type and bounds.
    pub kind: FieldKind,
    /// Whether the field must be present.
    pub required: bool,
}

impl FieldRule {
    /// Optional integer field.
    #[must_use]
    pub const fn integer(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            kind: FieldKind::Integer { min, max },
            required: false,
        }
    }

    /// Optional string field.
    #[must_use]
    pub const fn text(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            kind: FieldKind::Text { max_len },
            required: false,
        }
    }

    /// Mark the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn check(&self, value: &Value) -> Result<Value, String> {
        let name = self.name;
        match self.kind {
            FieldKind::Integer { min, max } => {
                let number = match value {
                    Value::Number(n) => n.as_f64(),
                    Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
                    _ => None,
                }
                .ok_or_else(|| format!("{name} must be a number"))?;

                if number.fract() != 0.0 {
                    return Err(format!("{name} must be an integer"));
                }
                if number < min as f64 {
                    return Err(format!("{name} must be larger than or equal to {min}"));
                }
                if number > max as f64 {
                    return Err(format!("{name} must be less than or equal to {max}"));
                }
                Ok(Value::from(number as i64))
            }
            FieldKind::Text { max_len } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| format!("{name} must be a string"))?
                    .trim();

                if text.is_empty() {
                    return Err(format!("{name} is not allowed to be empty"));
                }
                if text.encode_utf16().count() > max_len {
                    return Err(format!(
                        "{name} length must be less than or equal to {max_len} characters long"
                    ));
                }
                Ok(Value::String(text.to_string()))
            }
        }
    }
}

// =============================================================================
// SCHEMA
// =============================================================================

/// Strict object schema: only declared fields are accepted.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [FieldRule],
}

impl Schema {
    /// Create a schema from its field rules.
    #[must_use]
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    /// Declared field rules, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldRule] {
        self.fields
    }

    /// Validate `candidate`, returning the normalized record or every
    /// violation found.
    pub fn validate(&self, candidate: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let Some(object) = candidate.as_object() else {
            return Err(ValidationErrors {
                errors: vec![render("value must be an object", "value")],
            });
        };

        let mut normalized = Map::new();
        let mut errors = Vec::new();

        for rule in self.fields {
            match object.get(rule.name) {
                Some(value) => match rule.check(value) {
                    Ok(clean) => {
                        normalized.insert(rule.name.to_string(), clean);
                    }
                    Err(message) => errors.push(render(&message, rule.name)),
                },
                None if rule.required => {
                    errors.push(render(&format!("{} is required", rule.name), rule.name));
                }
                None => {}
            }
        }

        for key in object.keys() {
            if !self.fields.iter().any(|rule| rule.name == key) {
                errors.push(render(&format!("{key} is not allowed"), key));
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

fn render(message: &str, path: &str) -> String {
    format!(" {message} at {path}")
}

// =============================================================================
// VIOLATIONS
// =============================================================================

/// Every violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    /// One rendered message per violated field.
    pub errors: Vec<String>,
}

impl ValidationErrors {
    /// Context object attached to the `VALIDATION_ERRORS_ENCOUNTERED` error.
    #[must_use]
    pub fn to_context(&self) -> Value {
        json!({
            "message": VALIDATION_HEADLINE,
            "errors": self.errors,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
