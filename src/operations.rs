//! # List Query Pipeline
//!
//! [`prepare_list_query`] runs every validation stage (normalize, search, compile,
//! page planning) without touching a store. Only once it succeeds does
//! [`run_list_query`] hand the compiled filter to a [`QueryExecutor`], so a bad query
//! string can never cost a database round trip.

use crate::config::ListConfig;
use crate::errors::{ApiError, QueryError};
use crate::executor::{QueryExecutor, execute_page};
use crate::filtering::{
    FilterExpression, PagePlan, RawQuery, build_search_clause, compile_filter,
    normalize_with, page_request_from_query, plan,
};
use crate::models::PageResult;
use crate::schema::FieldSchema;

/// A validated list request, ready to run against any store
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub filter: FilterExpression,
    pub plan: PagePlan,
    pub order_by: &'static str,
}

/// Validate and compile a raw query string for a resource.
///
/// # Errors
///
/// Returns the first [`QueryError`] found; field filters are checked before
/// pagination parameters.
pub fn prepare_list_query(
    raw: &RawQuery,
    schema: &FieldSchema,
    config: &ListConfig,
) -> Result<PreparedQuery, QueryError> {
    let normalized = normalize_with(raw, schema, config)?;
    let search = normalized
        .search
        .as_deref()
        .and_then(|term| build_search_clause(term, schema, config.max_search_length));
    let filter = compile_filter(normalized.conditions, search);

    let request = page_request_from_query(raw, config)?;
    let plan = plan(&request)?;

    tracing::debug!(
        clauses = filter.clauses().len(),
        page = request.page,
        page_size = request.page_size,
        "Compiled list query"
    );

    Ok(PreparedQuery {
        filter,
        plan,
        order_by: schema.default_order(),
    })
}

/// Validate `raw`, then count and fetch one page from `executor`.
///
/// # Errors
///
/// [`ApiError::BadRequest`] for an invalid query (the executor is never called),
/// [`ApiError::Database`] if the store fails.
pub async fn run_list_query<E: QueryExecutor + ?Sized>(
    executor: &E,
    raw: &RawQuery,
    schema: &FieldSchema,
    config: &ListConfig,
) -> Result<(PreparedQuery, PageResult<E::Item>), ApiError> {
    let prepared = prepare_list_query(raw, schema, config)?;
    let page = execute_page(executor, &prepared.filter, prepared.plan, prepared.order_by).await?;
    Ok((prepared, page))
}
