//! # Query Filtering, Search & Pagination
//!
//! Turns a list endpoint's free-form query string into a storage-agnostic
//! [`FilterExpression`] plus a [`PagePlan`]. Every stage is a pure function over
//! immutable values:
//!
//! ```text
//! RawQuery ──normalize──▶ Conditions ─┐
//!          └─build_search_clause──────┴─compile_filter──▶ FilterExpression
//! RawQuery ──page_request_from_query──▶ PageRequest ──plan──▶ PagePlan
//! ```
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Equality
//! GET /products?category=hoodies
//!
//! // Comparisons (number and date fields only for gt/gte/lt/lte)
//! GET /products?price_gte=10&price_lte=50
//! GET /products?created_at_gte=2024-01-01
//! GET /products?brand_ne=acme
//!
//! // Lists
//! GET /products?category_in=hoodies,sweatshirt
//!
//! // Free-text search over the searchable fields (case-insensitive, literal)
//! GET /products?search=blue shirt
//!
//! // Pagination (page size fixed per resource)
//! GET /products?page=2
//! ```
//!
//! Anything else is rejected with a [`QueryError`](crate::QueryError) before a
//! store is touched.

pub mod conditions;
pub mod pagination;
pub mod query_parser;
pub mod search;

pub use conditions::{Comparison, FilterExpression, FilterNode, compile_filter};
pub use pagination::{PagePlan, PageRequest, calculate_content_range, page_request_from_query, plan};
pub use query_parser::{
    Condition, ConditionValue, NormalizedQuery, Operator, RawQuery, normalize, normalize_with,
};
pub use search::{SearchClause, build_search_clause, escape_like_wildcards, like_pattern};
