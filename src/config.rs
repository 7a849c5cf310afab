use serde::Deserialize;

/// Default number of items per page for list endpoints
pub const DEFAULT_PAGE_SIZE: u64 = 6;

// Basic safety limits
const MAX_FIELD_VALUE_LENGTH: usize = 10_000;
const MAX_SEARCH_QUERY_LENGTH: usize = 10_000;

/// Per-resource list endpoint settings.
///
/// Resources override [`ListResource::list_config`](crate::ListResource::list_config)
/// to change these. The struct also deserializes from any serde format, with every
/// missing key falling back to its default:
///
/// ```rust,ignore
/// let config: ListConfig = serde_json::from_str(r#"{"page_size": 20}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Items per page when the client does not pick one
    pub page_size: u64,
    /// Page sizes a client may request with `limit`. Empty means the page size is fixed.
    pub page_size_whitelist: Vec<u64>,
    /// Longest accepted raw filter value, in bytes
    pub max_value_length: usize,
    /// Search terms are truncated to this many characters
    pub max_search_length: usize,
    /// Separator for `_in` value lists
    pub list_delimiter: char,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_whitelist: Vec::new(),
            max_value_length: MAX_FIELD_VALUE_LENGTH,
            max_search_length: MAX_SEARCH_QUERY_LENGTH,
            list_delimiter: ',',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ListConfig::default();
        assert_eq!(config.page_size, 6);
        assert!(config.page_size_whitelist.is_empty());
        assert_eq!(config.list_delimiter, ',');
    }

    #[test]
    fn test_partial_deserialization_keeps_defaults() {
        let config: ListConfig =
            serde_json::from_str(r#"{"page_size": 20, "page_size_whitelist": [20, 50]}"#).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.page_size_whitelist, vec![20, 50]);
        assert_eq!(config.max_value_length, 10_000);
        assert_eq!(config.list_delimiter, ',');
    }
}
