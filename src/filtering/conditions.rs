use serde::Serialize;

use super::query_parser::{Condition, ConditionValue, Operator};
use super::search::SearchClause;
use crate::schema::FieldValue;

/// Comparison applied by a [`FilterNode::Compare`] node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl From<Operator> for Comparison {
    /// `in` only ever carries a list; a single operand degenerates to equality.
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::Eq | Operator::In => Self::Eq,
            Operator::Ne => Self::Ne,
            Operator::Gt => Self::Gt,
            Operator::Gte => Self::Gte,
            Operator::Lt => Self::Lt,
            Operator::Lte => Self::Lte,
        }
    }
}

/// Storage-agnostic predicate tree.
///
/// Store adapters walk this tree and translate each node into their own query
/// language. Field names are always ones declared in the resource's schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum FilterNode {
    /// Every clause must match. An empty `And` matches everything.
    And { clauses: Vec<FilterNode> },
    /// At least one clause must match. An empty `Or` matches nothing.
    Or { clauses: Vec<FilterNode> },
    Compare {
        field: &'static str,
        comparison: Comparison,
        value: FieldValue,
    },
    In {
        field: &'static str,
        values: Vec<FieldValue>,
    },
    /// Case-insensitive literal substring match
    Contains { field: &'static str, term: String },
}

/// Conjunction of compiled clauses shared by the count and the page fetch.
///
/// Immutable once [`compile_filter`] returns it; the count and the page fetch borrow
/// the same instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FilterExpression {
    clauses: Vec<FilterNode>,
}

impl FilterExpression {
    #[must_use]
    pub fn clauses(&self) -> &[FilterNode] {
        &self.clauses
    }

    /// True when the expression matches every record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The whole expression as a single `And` node
    #[must_use]
    pub fn to_node(&self) -> FilterNode {
        FilterNode::And {
            clauses: self.clauses.clone(),
        }
    }
}

/// Merge normalized conditions and an optional search clause into one conjunctive
/// filter. Pure: no store access.
#[must_use]
pub fn compile_filter(conditions: Vec<Condition>, search: Option<SearchClause>) -> FilterExpression {
    let mut clauses: Vec<FilterNode> = conditions.into_iter().map(condition_node).collect();

    if let Some(search) = search {
        clauses.push(search_node(&search));
    }

    FilterExpression { clauses }
}

fn condition_node(condition: Condition) -> FilterNode {
    let (field, operator, value) = condition.into_parts();
    match value {
        ConditionValue::List(values) => FilterNode::In { field, values },
        ConditionValue::Single(value) => FilterNode::Compare {
            field,
            comparison: operator.into(),
            value,
        },
    }
}

fn search_node(search: &SearchClause) -> FilterNode {
    FilterNode::Or {
        clauses: search
            .fields()
            .iter()
            .map(|&field| FilterNode::Contains {
                field,
                term: search.term().to_string(),
            })
            .collect(),
    }
}
