//! # Field Schemas
//!
//! A [`FieldSchema`] is the static, per-resource declaration of which fields a list
//! endpoint may filter on, which fields free-text search covers, and the value kind
//! each filterable field holds. Schemas are plain `'static` data so that a resource
//! can declare one as a `static` and share it read-only across every request:
//!
//! ```rust,ignore
//! use listcrate::{FieldSchema, ValueKind};
//!
//! pub static PRODUCT_SCHEMA: FieldSchema = FieldSchema::new(
//!     &[
//!         ("name", ValueKind::String),
//!         ("price", ValueKind::Number),
//!         ("created_at", ValueKind::Date),
//!     ],
//!     &["name", "description"],
//!     "created_at",
//! );
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

/// Query keys that control search and pagination and can never name a field.
pub const RESERVED_KEYS: [&str; 3] = ["search", "page", "limit"];

/// The value kind a filterable field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    String,
    Date,
    Boolean,
}

impl ValueKind {
    /// Whether `gt`/`gte`/`lt`/`lte` are meaningful for this kind
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Self::Number | Self::Date)
    }

    /// Coerce a raw query-string value into this kind.
    ///
    /// Returns `None` when the text is not a valid representation. Numbers must be
    /// finite, booleans accept `true`/`false`/`1`/`0` (case-insensitive) and dates
    /// accept RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
    #[must_use]
    pub fn coerce(self, raw: &str) -> Option<FieldValue> {
        let trimmed = raw.trim();
        match self {
            Self::Number => trimmed
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(FieldValue::Number),
            Self::String => Some(FieldValue::String(trimmed.to_string())),
            Self::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "1" => Some(FieldValue::Boolean(true)),
                "false" | "0" => Some(FieldValue::Boolean(false)),
                _ => None,
            },
            Self::Date => parse_date(trimmed).map(FieldValue::Date),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Parse an RFC 3339 timestamp, falling back to a bare calendar date
pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// A filter value after coercion to its field's declared kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Boolean(bool),
}

impl FieldValue {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Date(_) => ValueKind::Date,
            Self::Boolean(_) => ValueKind::Boolean,
        }
    }
}

/// Static declaration of a resource's filterable and searchable fields.
///
/// Construct with [`FieldSchema::new`] in a `static` and check it once at startup
/// with [`FieldSchema::validate`].
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    filterable: &'static [(&'static str, ValueKind)],
    searchable: &'static [&'static str],
    default_order: &'static str,
}

impl FieldSchema {
    #[must_use]
    pub const fn new(
        filterable: &'static [(&'static str, ValueKind)],
        searchable: &'static [&'static str],
        default_order: &'static str,
    ) -> Self {
        Self {
            filterable,
            searchable,
            default_order,
        }
    }

    /// Look up a filterable field, returning its `'static` name and kind
    #[must_use]
    pub fn field(&self, name: &str) -> Option<(&'static str, ValueKind)> {
        self.filterable
            .iter()
            .find(|(field, _)| *field == name)
            .copied()
    }

    #[must_use]
    pub const fn filterable_fields(&self) -> &'static [(&'static str, ValueKind)] {
        self.filterable
    }

    /// Fields covered by free-text search, in declaration order
    #[must_use]
    pub const fn searchable_fields(&self) -> &'static [&'static str] {
        self.searchable
    }

    /// Field that gives list results their stable default order
    #[must_use]
    pub const fn default_order(&self) -> &'static str {
        self.default_order
    }

    /// Check the declaration for mistakes a request could never recover from.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found: an empty or reserved field name, a
    /// field declared twice, a searchable field declared with a non-string kind, or
    /// an empty default ordering field.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (index, (name, _)) in self.filterable.iter().enumerate() {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if RESERVED_KEYS.contains(name) {
                return Err(SchemaError::ReservedFieldName((*name).to_string()));
            }
            if self.filterable[..index].iter().any(|(seen, _)| seen == name) {
                return Err(SchemaError::DuplicateField((*name).to_string()));
            }
        }

        for name in self.searchable {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if let Some((_, kind)) = self.field(name)
                && kind != ValueKind::String
            {
                return Err(SchemaError::NonStringSearchField {
                    field: (*name).to_string(),
                    kind,
                });
            }
        }

        if self.default_order.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }

        Ok(())
    }
}

/// A mistake in a [`FieldSchema`] declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    EmptyFieldName,
    ReservedFieldName(String),
    DuplicateField(String),
    NonStringSearchField { field: String, kind: ValueKind },
    /// A schema field the resource maps to no storage column
    UnmappedField(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFieldName => write!(f, "field names must not be empty"),
            Self::ReservedFieldName(name) => {
                write!(f, "'{name}' is a reserved query key and cannot be a field")
            }
            Self::DuplicateField(name) => write!(f, "field '{name}' is declared more than once"),
            Self::NonStringSearchField { field, kind } => write!(
                f,
                "searchable field '{field}' is declared as {kind}, expected string"
            ),
            Self::UnmappedField(name) => write!(f, "field '{name}' has no column"),
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    static SCHEMA: FieldSchema = FieldSchema::new(
        &[
            ("name", ValueKind::String),
            ("price", ValueKind::Number),
            ("featured", ValueKind::Boolean),
            ("created_at", ValueKind::Date),
        ],
        &["name", "description"],
        "created_at",
    );

    #[test]
    fn test_valid_schema() {
        assert_eq!(SCHEMA.validate(), Ok(()));
        assert_eq!(SCHEMA.field("price"), Some(("price", ValueKind::Number)));
        assert_eq!(SCHEMA.field("secret"), None);
    }

    #[test]
    fn test_searchable_field_must_be_string() {
        static BAD: FieldSchema =
            FieldSchema::new(&[("price", ValueKind::Number)], &["price"], "price");
        assert_eq!(
            BAD.validate(),
            Err(SchemaError::NonStringSearchField {
                field: "price".to_string(),
                kind: ValueKind::Number,
            })
        );
    }

    #[test]
    fn test_reserved_and_duplicate_names_rejected() {
        static RESERVED: FieldSchema =
            FieldSchema::new(&[("page", ValueKind::Number)], &[], "page");
        assert_eq!(
            RESERVED.validate(),
            Err(SchemaError::ReservedFieldName("page".to_string()))
        );

        static DUPLICATE: FieldSchema = FieldSchema::new(
            &[("name", ValueKind::String), ("name", ValueKind::Number)],
            &[],
            "name",
        );
        assert_eq!(
            DUPLICATE.validate(),
            Err(SchemaError::DuplicateField("name".to_string()))
        );
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(ValueKind::Number.coerce(" 42 "), Some(FieldValue::Number(42.0)));
        assert_eq!(ValueKind::Number.coerce("9.5"), Some(FieldValue::Number(9.5)));
        assert_eq!(ValueKind::Number.coerce("ten"), None);
        assert_eq!(ValueKind::Number.coerce("NaN"), None);
        assert_eq!(ValueKind::Number.coerce("inf"), None);
    }

    #[test]
    fn test_boolean_coercion() {
        assert_eq!(ValueKind::Boolean.coerce("TRUE"), Some(FieldValue::Boolean(true)));
        assert_eq!(ValueKind::Boolean.coerce("0"), Some(FieldValue::Boolean(false)));
        assert_eq!(ValueKind::Boolean.coerce("yes"), None);
    }

    #[test]
    fn test_date_coercion() {
        let bare = ValueKind::Date.coerce("2024-03-01").unwrap();
        let full = ValueKind::Date.coerce("2024-03-01T00:00:00Z").unwrap();
        assert_eq!(bare, full);

        let offset = ValueKind::Date.coerce("2024-03-01T02:00:00+02:00").unwrap();
        assert_eq!(offset, full, "offsets are normalised to UTC");

        assert_eq!(ValueKind::Date.coerce("yesterday"), None);
        assert_eq!(ValueKind::Date.coerce("2024-13-01"), None);
    }

    #[test]
    fn test_ordered_kinds() {
        assert!(ValueKind::Number.is_ordered());
        assert!(ValueKind::Date.is_ordered());
        assert!(!ValueKind::String.is_ordered());
        assert!(!ValueKind::Boolean.is_ordered());
    }
}
