//! # listcrate
//!
//! Filterable, searchable, paginated list endpoints for Axum and Sea-ORM.
//!
//! A resource declares a static [`FieldSchema`]; the crate turns each request's query
//! string into a storage-agnostic [`FilterExpression`], counts the full match set and
//! fetches one page of it with the very same filter.
//!
//! ```rust,ignore
//! let app = listcrate::list_router::<Product>("/products")?.with_state(db);
//! // GET /products?category=hoodies&price_gte=10&price_lte=50&search=zip&page=2
//! ```

pub mod config;
pub mod core;
pub mod errors;
pub mod executor;
pub mod filtering;
pub mod models;
pub mod openapi;
pub mod operations;
pub mod routes;
pub mod schema;

pub use config::ListConfig;
pub use crate::core::ListResource;
pub use errors::{ApiError, QueryError};
pub use executor::{DatabaseExecutor, MemoryExecutor, QueryExecutor, execute_page};
pub use filtering::{FilterExpression, FilterNode, PagePlan, PageRequest, RawQuery};
pub use models::{ListParams, PageResult};
pub use operations::{PreparedQuery, prepare_list_query, run_list_query};
pub use routes::{list_handler, list_router};
pub use schema::{FieldSchema, FieldValue, SchemaError, ValueKind};
