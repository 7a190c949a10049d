//! Common traits and response envelopes for TFE resources

use serde::{Deserialize, Serialize};

use crate::hcp::{Pagination, PaginationMeta};

/// Common trait for TFE resources that have an ID and a human-readable name
pub trait TfeResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or ID
    ///
    /// Default implementation checks for exact match on either field.
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }
}

/// Trait for API responses that contain paginated data
///
/// Implement this trait for any response struct to enable use with
/// `TfeClient::fetch_all_pages()`.
pub trait PaginatedResponse<T> {
    /// Consume self and return the data items
    fn into_data(self) -> Vec<T>;
    /// Get reference to pagination metadata
    fn meta(&self) -> Option<&PaginationMeta>;
}

/// Generic API list response wrapper for paginated endpoints
#[derive(Deserialize, Debug)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PaginationMeta>,
}

impl<T> PaginatedResponse<T> for ApiListResponse<T> {
    fn into_data(self) -> Vec<T> {
        self.data
    }

    fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }
}

impl<T> From<ApiListResponse<T>> for ListPage<T> {
    fn from(response: ApiListResponse<T>) -> Self {
        let pagination = response.meta.and_then(|m| m.pagination);
        ListPage {
            items: response.data,
            pagination,
        }
    }
}

/// Generic API response wrapper for single-resource endpoints
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// One page of a list operation
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
        }
    }
}

impl<T> ListPage<T> {
    /// Build a page from items, without pagination metadata
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items,
            pagination: None,
        }
    }

    /// Number of the next page, if the server reported one
    pub fn next_page(&self) -> Option<u32> {
        self.pagination.as_ref().and_then(|p| p.next_page)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        id: String,
        name: String,
    }

    impl TfeResource for TestResource {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_matches_by_id_or_name() {
        let resource = TestResource {
            id: "res-123".to_string(),
            name: "my-resource".to_string(),
        };
        assert!(resource.matches("res-123"));
        assert!(resource.matches("my-resource"));
        assert!(!resource.matches("other"));
    }

    #[test]
    fn test_api_list_response_meta() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}],
                "meta": {
                    "pagination": {
                        "current-page": 1,
                        "prev-page": null,
                        "next-page": 2,
                        "total-pages": 3,
                        "total-count": 5
                    }
                }
            }))
            .unwrap();
        let pagination = response.meta().unwrap().pagination.as_ref().unwrap();
        assert_eq!(pagination.total_pages, Some(3));
        assert_eq!(pagination.total_count, Some(5));
        assert_eq!(pagination.next_page, Some(2));
    }

    #[test]
    fn test_api_list_response_into_list_page() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}, {"id": "item-2"}],
                "meta": {
                    "pagination": {
                        "current-page": 2,
                        "prev-page": 1,
                        "next-page": null
                    }
                }
            }))
            .unwrap();
        let page: ListPage<serde_json::Value> = response.into();
        assert_eq!(page.len(), 2);
        assert_eq!(page.next_page(), None);
        let pagination = page.pagination.unwrap();
        assert_eq!(pagination.current_page, 2);
        assert_eq!(pagination.prev_page, Some(1));
        assert_eq!(pagination.total_count, None);
    }

    #[test]
    fn test_api_list_response_without_meta() {
        let response: ApiListResponse<serde_json::Value> =
            serde_json::from_value(serde_json::json!({
                "data": [{"id": "item-1"}]
            }))
            .unwrap();
        assert!(response.meta().is_none());
        let page: ListPage<serde_json::Value> = response.into();
        assert!(page.pagination.is_none());
        assert!(!page.is_empty());
    }
}
