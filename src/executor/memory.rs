use async_trait::async_trait;
use sea_orm::DbErr;
use serde_json::Value;
use std::cmp::Ordering;

use super::QueryExecutor;
use crate::filtering::{Comparison, FilterExpression, FilterNode};
use crate::schema::{FieldValue, parse_date};

/// In-memory adapter over JSON object records.
///
/// Records keep their insertion order as the tie-breaker after `order_by`.
#[derive(Debug, Clone, Default)]
pub struct MemoryExecutor {
    records: Vec<Value>,
}

impl MemoryExecutor {
    #[must_use]
    pub const fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    fn matching<'a>(&'a self, filter: &'a FilterExpression) -> impl Iterator<Item = &'a Value> {
        self.records
            .iter()
            .filter(move |record| filter.clauses().iter().all(|node| matches(node, record)))
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    type Item = Value;

    async fn count(&self, filter: &FilterExpression) -> Result<u64, DbErr> {
        Ok(self.matching(filter).count() as u64)
    }

    async fn fetch(
        &self,
        filter: &FilterExpression,
        skip: u64,
        limit: u64,
        order_by: &str,
    ) -> Result<Vec<Self::Item>, DbErr> {
        let mut matched: Vec<&Value> = self.matching(filter).collect();
        // Stable sort keeps insertion order for equal keys
        matched.sort_by(|a, b| compare_json(a.get(order_by), b.get(order_by)));

        Ok(matched
            .into_iter()
            .skip(to_usize(skip))
            .take(to_usize(limit))
            .cloned()
            .collect())
    }
}

/// Saturate rather than wrap on 32-bit targets
fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

fn matches(node: &FilterNode, record: &Value) -> bool {
    match node {
        FilterNode::And { clauses } => clauses.iter().all(|clause| matches(clause, record)),
        FilterNode::Or { clauses } => clauses.iter().any(|clause| matches(clause, record)),
        FilterNode::Compare {
            field,
            comparison,
            value,
        } => {
            // Missing or mistyped values never match, like SQL NULL
            let Some(ordering) = record.get(field).and_then(|actual| compare_field(actual, value))
            else {
                return false;
            };
            match comparison {
                Comparison::Eq => ordering == Ordering::Equal,
                Comparison::Ne => ordering != Ordering::Equal,
                Comparison::Gt => ordering == Ordering::Greater,
                Comparison::Gte => ordering != Ordering::Less,
                Comparison::Lt => ordering == Ordering::Less,
                Comparison::Lte => ordering != Ordering::Greater,
            }
        }
        FilterNode::In { field, values } => record.get(field).is_some_and(|actual| {
            values
                .iter()
                .any(|value| compare_field(actual, value) == Some(Ordering::Equal))
        }),
        FilterNode::Contains { field, term } => record
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|text| text.to_uppercase().contains(&term.to_uppercase())),
    }
}

/// Order a stored JSON value against a filter operand of the field's kind
fn compare_field(actual: &Value, expected: &FieldValue) -> Option<Ordering> {
    match expected {
        FieldValue::Number(number) => actual.as_f64()?.partial_cmp(number),
        FieldValue::String(text) => Some(actual.as_str()?.cmp(text.as_str())),
        FieldValue::Boolean(flag) => Some(actual.as_bool()?.cmp(flag)),
        FieldValue::Date(timestamp) => Some(parse_date(actual.as_str()?)?.cmp(timestamp)),
    }
}

/// Sort order for the default ordering key; missing values sort first, like SQL NULLs in SQLite
fn compare_json(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => {
            match (parse_date(a), parse_date(b)) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => a.cmp(b),
            }
        }
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (None | Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
