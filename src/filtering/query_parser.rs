use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ListConfig;
use crate::errors::QueryError;
use crate::schema::{FieldSchema, FieldValue, RESERVED_KEYS, ValueKind};

/// Query-string parameters exactly as received. Ordered so that normalization is
/// deterministic regardless of the order keys arrived in.
///
/// A key repeated in the query string keeps only its last value:
/// `price_gte=100&price_gte=50` is `price_gte=50`.
pub type RawQuery = BTreeMap<String, String>;

/// Key carrying the free-text search term
pub const SEARCH_KEY: &str = "search";

/// Comparison operator of a [`Condition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
    In,
}

impl Operator {
    /// Operators written as a key suffix
    pub const SUFFIXED: [Self; 6] = [Self::Gt, Self::Gte, Self::Lt, Self::Lte, Self::Ne, Self::In];

    /// Operator written as a `field_<suffix>` key suffix. `eq` has no suffix.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::SUFFIXED
            .into_iter()
            .find(|operator| operator.as_str() == suffix)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Ne => "ne",
            Self::In => "in",
        }
    }

    #[must_use]
    pub const fn supports(self, kind: ValueKind) -> bool {
        match self {
            Self::Gt | Self::Gte | Self::Lt | Self::Lte => kind.is_ordered(),
            Self::Eq | Self::Ne | Self::In => true,
        }
    }
}

/// Operand of a [`Condition`]: a single value, or the element list of `in`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Single(FieldValue),
    List(Vec<FieldValue>),
}

/// One validated `field operator value` filter.
///
/// Only [`normalize`] builds conditions, so `field` is always declared in the
/// schema, `operator` is valid for its kind and `value` has been coerced to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    field: &'static str,
    operator: Operator,
    value: ConditionValue,
}

impl Condition {
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub const fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub const fn value(&self) -> &ConditionValue {
        &self.value
    }

    pub(crate) fn into_parts(self) -> (&'static str, Operator, ConditionValue) {
        (self.field, self.operator, self.value)
    }
}

/// Field conditions and the raw search term extracted from a [`RawQuery`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedQuery {
    pub conditions: Vec<Condition>,
    pub search: Option<String>,
}

/// Normalize with the default [`ListConfig`].
///
/// # Errors
///
/// See [`normalize_with`].
pub fn normalize(raw: &RawQuery, schema: &FieldSchema) -> Result<NormalizedQuery, QueryError> {
    normalize_with(raw, schema, &ListConfig::default())
}

/// Parse raw query parameters into typed conditions against `schema`.
///
/// `search`, `page` and `limit` are skipped here; every other key must be a declared
/// field, optionally followed by `_gt`, `_gte`, `_lt`, `_lte`, `_ne` or `_in`. Keys
/// with a blank value are still validated but produce no condition.
///
/// # Errors
///
/// - [`QueryError::SchemaViolation`] if a key names an undeclared field
/// - [`QueryError::OperatorMismatch`] if the suffix is unknown or invalid for the field's kind
/// - [`QueryError::TypeCoercion`] if a value does not parse as the field's kind or is
///   longer than `config.max_value_length`
pub fn normalize_with(
    raw: &RawQuery,
    schema: &FieldSchema,
    config: &ListConfig,
) -> Result<NormalizedQuery, QueryError> {
    let mut normalized = NormalizedQuery {
        search: raw.get(SEARCH_KEY).cloned(),
        ..NormalizedQuery::default()
    };

    for (key, value) in raw {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }

        let (field, kind, operator) = resolve_key(key, schema)?;

        if value.len() > config.max_value_length {
            return Err(QueryError::type_coercion(field, value, kind));
        }
        if value.trim().is_empty() {
            continue;
        }

        let value = if operator == Operator::In {
            ConditionValue::List(coerce_list(field, kind, value, config.list_delimiter)?)
        } else {
            ConditionValue::Single(coerce(field, kind, value)?)
        };

        normalized.conditions.push(Condition {
            field,
            operator,
            value,
        });
    }

    Ok(normalized)
}

/// Split a key into its declared field and operator.
///
/// An exact field match wins, so field names that themselves contain underscores
/// (`created_at`) resolve before any suffix is considered.
fn resolve_key(
    key: &str,
    schema: &FieldSchema,
) -> Result<(&'static str, ValueKind, Operator), QueryError> {
    if let Some((field, kind)) = schema.field(key) {
        return Ok((field, kind, Operator::Eq));
    }

    let Some((base, suffix)) = key.rsplit_once('_') else {
        return Err(QueryError::schema_violation(key));
    };

    match (schema.field(base), Operator::from_suffix(suffix)) {
        (Some((field, kind)), Some(operator)) if operator.supports(kind) => {
            Ok((field, kind, operator))
        }
        (Some((field, kind)), _) => Err(QueryError::operator_mismatch(field, suffix, kind)),
        (None, Some(_)) => Err(QueryError::schema_violation(base)),
        (None, None) => Err(QueryError::schema_violation(key)),
    }
}

fn coerce(field: &str, kind: ValueKind, value: &str) -> Result<FieldValue, QueryError> {
    kind.coerce(value)
        .ok_or_else(|| QueryError::type_coercion(field, value, kind))
}

fn coerce_list(
    field: &str,
    kind: ValueKind,
    value: &str,
    delimiter: char,
) -> Result<Vec<FieldValue>, QueryError> {
    value
        .split(delimiter)
        .map(|element| {
            if element.trim().is_empty() {
                Err(QueryError::type_coercion(field, value, kind))
            } else {
                coerce(field, kind, element)
            }
        })
        .collect()
}
