use hyper::header::{CONTENT_RANGE, HeaderMap, HeaderValue};

use super::query_parser::RawQuery;
use crate::config::ListConfig;
use crate::errors::QueryError;

pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";

/// Which page of the match set to return, and how large pages are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    #[must_use]
    pub const fn first(page_size: u64) -> Self {
        Self { page: 1, page_size }
    }
}

/// Bounds of one page within the full, ordered match set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub skip: u64,
    pub limit: u64,
}

/// Compute the bounds of `request`.
///
/// # Errors
///
/// Returns [`QueryError::PaginationRange`] if `page` is 0, `page_size` is 0, or the
/// offset does not fit in a `u64`.
pub fn plan(request: &PageRequest) -> Result<PagePlan, QueryError> {
    if request.page < 1 {
        return Err(QueryError::pagination_range(PAGE_KEY, request.page));
    }
    if request.page_size == 0 {
        return Err(QueryError::pagination_range("pageSize", request.page_size));
    }

    let skip = (request.page - 1)
        .checked_mul(request.page_size)
        .ok_or_else(|| QueryError::pagination_range(PAGE_KEY, request.page))?;

    Ok(PagePlan {
        skip,
        limit: request.page_size,
    })
}

/// Read `page` and `limit` from the query.
///
/// A missing or blank `page` means page 1. `limit` is only honoured when it is one
/// of `config.page_size_whitelist`; otherwise the page size is `config.page_size`.
///
/// # Errors
///
/// Returns [`QueryError::PaginationRange`] if `page` or `limit` is not an unsigned
/// integer, or if `limit` is not whitelisted.
pub fn page_request_from_query(
    raw: &RawQuery,
    config: &ListConfig,
) -> Result<PageRequest, QueryError> {
    let page = match non_blank(raw, PAGE_KEY) {
        Some(value) => parse_count(PAGE_KEY, value)?,
        None => 1,
    };

    let page_size = match non_blank(raw, LIMIT_KEY) {
        Some(value) => {
            let limit = parse_count(LIMIT_KEY, value)?;
            if !config.page_size_whitelist.contains(&limit) {
                return Err(QueryError::pagination_range(LIMIT_KEY, value));
            }
            limit
        }
        None => config.page_size,
    };

    Ok(PageRequest { page, page_size })
}

fn non_blank<'a>(raw: &'a RawQuery, key: &str) -> Option<&'a str> {
    raw.get(key).map(|value| value.trim()).filter(|value| !value.is_empty())
}

fn parse_count(key: &str, value: &str) -> Result<u64, QueryError> {
    value
        .parse::<u64>()
        .map_err(|_| QueryError::pagination_range(key, value))
}

/// Sanitize resource name by removing control characters for HTTP headers
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build the `Content-Range` header describing a returned page.
///
/// # Arguments
///
/// * `skip` - Offset of the first returned item.
/// * `returned` - Number of items on the page.
/// * `total_matched` - Size of the full match set.
/// * `resource_name` - The name of the resource being paginated.
///
/// An empty page is reported as `<resource> */<total>`.
#[must_use]
pub fn calculate_content_range(
    skip: u64,
    returned: u64,
    total_matched: u64,
    resource_name: &str,
) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);

    let content_range = if returned == 0 {
        format!("{safe_name} */{total_matched}")
    } else {
        let last = skip.saturating_add(returned - 1);
        format!("{safe_name} {skip}-{last}/{total_matched}")
    };

    let mut headers = HeaderMap::new();
    // Only visible ASCII remains after sanitizing, so this cannot fail
    if let Ok(value) = HeaderValue::from_str(&content_range) {
        headers.insert(CONTENT_RANGE, value);
    }
    headers
}
