use async_trait::async_trait;
use sea_orm::{
    Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Value,
    sea_query::{BinOper, Expr, Func, SimpleExpr},
};
use std::marker::PhantomData;

use super::QueryExecutor;
use crate::core::ListResource;
use crate::filtering::{Comparison, FilterExpression, FilterNode, like_pattern};
use crate::schema::FieldValue;

const LIKE_ESCAPE: char = '\\';

// Largest magnitude at which every integer is exactly representable in an f64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Sea-ORM adapter for a [`ListResource`]
pub struct DatabaseExecutor<'a, T> {
    db: &'a DatabaseConnection,
    resource: PhantomData<fn() -> T>,
}

impl<'a, T: ListResource> DatabaseExecutor<'a, T> {
    #[must_use]
    pub const fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            resource: PhantomData,
        }
    }
}

#[async_trait]
impl<T: ListResource> QueryExecutor for DatabaseExecutor<'_, T> {
    type Item = <T::EntityType as EntityTrait>::Model;

    async fn count(&self, filter: &FilterExpression) -> Result<u64, DbErr> {
        let condition = to_condition::<T>(filter)?;
        T::EntityType::find().filter(condition).count(self.db).await
    }

    async fn fetch(
        &self,
        filter: &FilterExpression,
        skip: u64,
        limit: u64,
        order_by: &str,
    ) -> Result<Vec<Self::Item>, DbErr> {
        let condition = to_condition::<T>(filter)?;
        let order_column = column::<T>(order_by)?;

        T::EntityType::find()
            .filter(condition)
            .order_by(order_column, Order::Asc)
            .order_by(T::PRIMARY_KEY_COLUMN, Order::Asc)
            .offset(skip)
            .limit(limit)
            .all(self.db)
            .await
    }
}

/// Translate a compiled filter into a Sea-ORM condition over `T`'s columns.
///
/// # Errors
///
/// Returns `DbErr::Custom` if a field in the filter has no column in
/// [`ListResource::columns`].
pub fn to_condition<T: ListResource>(filter: &FilterExpression) -> Result<Condition, DbErr> {
    filter
        .clauses()
        .iter()
        .try_fold(Condition::all(), |condition, node| {
            Ok(condition.add(node_condition::<T>(node)?))
        })
}

fn node_condition<T: ListResource>(node: &FilterNode) -> Result<Condition, DbErr> {
    match node {
        FilterNode::And { clauses } => clauses.iter().try_fold(Condition::all(), |all, clause| {
            Ok(all.add(node_condition::<T>(clause)?))
        }),
        FilterNode::Or { clauses } => clauses.iter().try_fold(Condition::any(), |any, clause| {
            Ok(any.add(node_condition::<T>(clause)?))
        }),
        FilterNode::Compare {
            field,
            comparison,
            value,
        } => {
            let column = Expr::col(column::<T>(field)?);
            let value = db_value(value);
            let expr = match comparison {
                Comparison::Eq => column.eq(value),
                Comparison::Ne => column.ne(value),
                Comparison::Gt => column.gt(value),
                Comparison::Gte => column.gte(value),
                Comparison::Lt => column.lt(value),
                Comparison::Lte => column.lte(value),
            };
            Ok(Condition::all().add(expr))
        }
        FilterNode::In { field, values } => {
            let column = Expr::col(column::<T>(field)?);
            Ok(Condition::all().add(column.is_in(values.iter().map(db_value))))
        }
        FilterNode::Contains { field, term } => {
            // UPPER(column) LIKE UPPER('%term%') ESCAPE '\'
            let upper: SimpleExpr = Func::upper(Expr::col(column::<T>(field)?)).into();
            let pattern = SimpleExpr::Binary(
                Box::new(Func::upper(Expr::val(like_pattern(term))).into()),
                BinOper::Escape,
                Box::new(SimpleExpr::Constant(LIKE_ESCAPE.into())),
            );
            Ok(Condition::all().add(Expr::expr(upper).binary(BinOper::Like, pattern)))
        }
    }
}

fn column<T: ListResource>(field: &str) -> Result<T::ColumnType, DbErr> {
    T::column(field).ok_or_else(|| {
        DbErr::Custom(format!(
            "field '{field}' has no column on {}",
            T::RESOURCE_NAME_PLURAL
        ))
    })
}

/// Whole numbers bind as integers so integer columns compare exactly on every backend
#[allow(clippy::cast_possible_truncation)]
fn db_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Number(number) if number.fract() == 0.0 && number.abs() < MAX_EXACT_INTEGER => {
            Value::from(*number as i64)
        }
        FieldValue::Number(number) => Value::from(*number),
        FieldValue::String(text) => Value::from(text.clone()),
        FieldValue::Date(timestamp) => Value::from(*timestamp),
        FieldValue::Boolean(flag) => Value::from(*flag),
    }
}
