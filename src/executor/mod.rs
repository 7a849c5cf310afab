//! # Store Boundary
//!
//! [`QueryExecutor`] is the only thing a list endpoint needs from storage: a count
//! and a page fetch over a compiled [`FilterExpression`]. [`execute_page`] drives the
//! two-phase protocol that keeps `totalMatched` independent of the page requested.
//!
//! Two adapters ship with the crate:
//!
//! - [`DatabaseExecutor`]: Sea-ORM, translating the filter into a `sea_orm::Condition`
//! - [`MemoryExecutor`]: `serde_json::Value` records held in memory

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::filtering::{FilterExpression, PagePlan};
use crate::models::PageResult;

pub mod database;
pub mod memory;

pub use database::{DatabaseExecutor, to_condition};
pub use memory::MemoryExecutor;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    type Item: Send;

    /// Number of records matching `filter`, with no paging applied
    async fn count(&self, filter: &FilterExpression) -> Result<u64, DbErr>;

    /// Records matching `filter`, ordered ascending by `order_by`, after skipping
    /// `skip` and returning at most `limit`
    async fn fetch(
        &self,
        filter: &FilterExpression,
        skip: u64,
        limit: u64,
        order_by: &str,
    ) -> Result<Vec<Self::Item>, DbErr>;
}

/// Count the full match set, then fetch one page of it, using the same filter for both.
///
/// # Errors
///
/// Propagates the store's `DbErr` from either phase.
pub async fn execute_page<E: QueryExecutor + ?Sized>(
    executor: &E,
    filter: &FilterExpression,
    plan: PagePlan,
    order_by: &str,
) -> Result<PageResult<E::Item>, DbErr> {
    let total_matched = executor.count(filter).await?;
    let items = executor
        .fetch(filter, plan.skip, plan.limit, order_by)
        .await?;

    tracing::debug!(
        total_matched,
        returned = items.len(),
        skip = plan.skip,
        limit = plan.limit,
        "Executed list page"
    );

    Ok(PageResult {
        total_matched,
        items,
    })
}
