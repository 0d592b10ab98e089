//! Declarative validation schemas for content collections.
//!
//! A [`Schema`] is a static list of [`FieldRule`]s checked against the raw
//! YAML value of a source document. Validation is pure: it reads the already
//! loaded document, resolves cross-references through a pre-built
//! [`RefResolver`], and performs no I/O.
//!
//! Unknown fields pass through untouched. Optional fields that are absent
//! (or explicitly `null`) are simply skipped; they never default to a zero
//! value.
//!
//! Every failure reports the offending field path and the violated
//! constraint, so a broken document can be fixed without guessing.

use crate::content::Category;
use crate::utils::date::parse_date_value;
use serde_yaml::Value;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// A single schema violation, carrying the dotted field path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`{path}`: missing required field")]
    MissingField { path: String },

    #[error("`{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{path}`: must be a strictly positive integer")]
    NotPositive { path: String },

    #[error("`{path}`: `{value}` is not a valid URL (must start with http:// or https://)")]
    InvalidUrl { path: String, value: String },

    #[error("`{path}`: `{value}` is not a valid date")]
    InvalidDate { path: String, value: String },

    #[error("`{path}`: no {category} entry with id `{id}`")]
    UnknownReference {
        path: String,
        category: &'static str,
        id: String,
    },
}

/// Declared type of a frontmatter field.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    /// Any string
    Str,
    /// Any integer
    Int,
    /// Strictly positive integer
    PositiveInt,
    /// Date-coercible string (`YYYY-MM-DD` or RFC 3339)
    Date,
    /// String that must look like an absolute http(s) URL
    Url,
    /// Integer year or the literal `"Now"` sentinel (job end dates)
    YearOrNow,
    /// Nested object validated against its own rules
    Object(&'static [FieldRule]),
    /// Id of an entry in another collection
    Reference(Category),
}

/// One field declaration inside a [`Schema`].
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

impl FieldRule {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
        }
    }
}

/// Validation schema of one content collection.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

impl Schema {
    pub const fn new(fields: &'static [FieldRule]) -> Self {
        Self { fields }
    }

    /// Validate a raw document against this schema.
    ///
    /// Returns the first violation found, or `Ok(())` when the document
    /// satisfies every declared rule. Fields not named by any rule are
    /// ignored (passthrough policy).
    pub fn validate(&self, doc: &Value, refs: &RefResolver) -> Result<(), ValidationError> {
        validate_fields(self.fields, doc, "", refs)
    }
}

/// In-memory lookup of entry ids per collection, built once per load pass.
///
/// Cross-references (`Reference` fields) resolve against this table instead
/// of a live object graph.
#[derive(Debug, Default)]
pub struct RefResolver {
    ids: HashMap<Category, HashSet<String>>,
}

impl RefResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the known ids of one collection.
    pub fn insert(&mut self, category: Category, ids: impl IntoIterator<Item = String>) {
        self.ids.entry(category).or_default().extend(ids);
    }

    /// True if `id` names an existing entry of `category`.
    pub fn contains(&self, category: Category, id: &str) -> bool {
        self.ids
            .get(&category)
            .is_some_and(|ids| ids.contains(id))
    }
}

// ============================================================================
// Validation Walk
// ============================================================================

fn validate_fields(
    rules: &[FieldRule],
    value: &Value,
    prefix: &str,
    refs: &RefResolver,
) -> Result<(), ValidationError> {
    let Some(mapping) = value.as_mapping() else {
        return Err(ValidationError::TypeMismatch {
            path: if prefix.is_empty() {
                "<document>".to_owned()
            } else {
                prefix.to_owned()
            },
            expected: "object",
            found: value_kind(value),
        });
    };

    for rule in rules {
        let path = field_path(prefix, rule.name);
        match mapping.get(rule.name) {
            None | Some(Value::Null) if rule.required => {
                return Err(ValidationError::MissingField { path });
            }
            None | Some(Value::Null) => {}
            Some(field) => check_field(rule.ty, field, &path, refs)?,
        }
    }

    Ok(())
}

fn check_field(
    ty: FieldType,
    value: &Value,
    path: &str,
    refs: &RefResolver,
) -> Result<(), ValidationError> {
    match ty {
        FieldType::Str => {
            expect_str(value, path)?;
        }
        FieldType::Int => {
            expect_int(value, path)?;
        }
        FieldType::PositiveInt => {
            let n = expect_int(value, path)?;
            if n <= 0 {
                return Err(ValidationError::NotPositive {
                    path: path.to_owned(),
                });
            }
        }
        FieldType::Date => {
            let raw = expect_str(value, path)?;
            if parse_date_value(raw).is_none() {
                return Err(ValidationError::InvalidDate {
                    path: path.to_owned(),
                    value: raw.to_owned(),
                });
            }
        }
        FieldType::Url => {
            let raw = expect_str(value, path)?;
            if !raw.starts_with("http://") && !raw.starts_with("https://") {
                return Err(ValidationError::InvalidUrl {
                    path: path.to_owned(),
                    value: raw.to_owned(),
                });
            }
        }
        FieldType::YearOrNow => {
            let year_ok = value.as_i64().is_some();
            let now_ok = value.as_str() == Some("Now");
            if !year_ok && !now_ok {
                return Err(ValidationError::TypeMismatch {
                    path: path.to_owned(),
                    expected: "year or \"Now\"",
                    found: value_kind(value),
                });
            }
        }
        FieldType::Object(rules) => {
            validate_fields(rules, value, path, refs)?;
        }
        FieldType::Reference(category) => {
            let id = expect_str(value, path)?;
            if !refs.contains(category, id) {
                return Err(ValidationError::UnknownReference {
                    path: path.to_owned(),
                    category: category.name(),
                    id: id.to_owned(),
                });
            }
        }
    }

    Ok(())
}

fn expect_str<'v>(value: &'v Value, path: &str) -> Result<&'v str, ValidationError> {
    value.as_str().ok_or_else(|| ValidationError::TypeMismatch {
        path: path.to_owned(),
        expected: "string",
        found: value_kind(value),
    })
}

fn expect_int(value: &Value, path: &str) -> Result<i64, ValidationError> {
    value.as_i64().ok_or_else(|| ValidationError::TypeMismatch {
        path: path.to_owned(),
        expected: "integer",
        found: value_kind(value),
    })
}

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Human-readable kind of a YAML value, used in error messages.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "object",
        Value::Tagged(_) => "tagged value",
    }
}
