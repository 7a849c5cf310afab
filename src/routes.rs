use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use hyper::HeaderMap;
use sea_orm::DatabaseConnection;

use crate::core::ListResource;
use crate::errors::ApiError;
use crate::executor::DatabaseExecutor;
use crate::filtering::{RawQuery, calculate_content_range};
use crate::models::PageResult;
use crate::schema::SchemaError;
use crate::operations::run_list_query;

/// List one page of `T`, filtered and searched by the query string.
///
/// # Returns
/// - `200` with `{ "totalMatched": n, "items": [...] }` and a `Content-Range` header
///
/// # Errors
/// - `400` if the query names an undeclared field, uses an invalid operator, has a
///   value of the wrong type, or an out-of-range `page`/`limit`. No query is run.
/// - `500` if the count or the page fetch fails
pub async fn list_handler<T: ListResource>(
    State(db): State<DatabaseConnection>,
    Query(raw): Query<RawQuery>,
) -> Result<(HeaderMap, Json<PageResult<T::ListModel>>), ApiError> {
    let executor = DatabaseExecutor::<T>::new(&db);
    let (prepared, page) =
        run_list_query(&executor, &raw, T::field_schema(), &T::list_config()).await?;

    let headers = calculate_content_range(
        prepared.plan.skip,
        page.items.len() as u64,
        page.total_matched,
        T::RESOURCE_NAME_PLURAL,
    );

    Ok((headers, Json(page.map_items(T::ListModel::from))))
}

/// Router serving [`list_handler`] for `T` at `path`
///
/// # Errors
///
/// Returns a [`SchemaError`] if `T`'s schema is invalid or names a field
/// [`ListResource::columns`] leaves out, so the mistake surfaces at startup.
pub fn list_router<T: ListResource>(
    path: &str,
) -> Result<Router<DatabaseConnection>, SchemaError> {
    T::check_columns()?;
    Ok(Router::new().route(path, get(list_handler::<T>)))
}
