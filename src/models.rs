use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Reserved query parameters of every list endpoint.
///
/// Field filters are resource-specific and are not listed here: any declared field
/// may be passed as `<field>=<value>` or `<field>_<op>=<value>` with `op` one of
/// `gt`, `gte`, `lt`, `lte`, `ne`, `in`.
#[derive(Debug, Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive literal substring matched against the searchable fields.
    ///
    /// Example: `shirt`
    #[param(example = "shirt")]
    pub search: Option<String>,
    /// Page number (1-based).
    ///
    /// Example: `1`
    #[param(example = 1, minimum = 1)]
    pub page: Option<u64>,
    /// Page size. Only accepted for values the resource whitelists.
    ///
    /// Example: `6`
    #[param(example = 6, minimum = 1)]
    pub limit: Option<u64>,
}

/// One page of a list endpoint's match set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Size of the full match set before pagination
    pub total_matched: u64,
    pub items: Vec<T>,
}

impl<T> PageResult<T> {
    #[must_use]
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            total_matched: self.total_matched,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
