//! Paged result sets

use serde::Serialize;

/// A slice of a result set plus the metadata needed to walk the rest
///
/// Serialized in camelCase:
///
/// ```json
/// {"content": [...], "number": 0, "size": 5, "totalElements": 12,
///  "totalPages": 3, "numberOfElements": 5, "first": true, "last": false,
///  "empty": false}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index
    pub number: u64,
    /// Requested page size
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        let number_of_elements = content.len() as u64;
        Self {
            empty: content.is_empty(),
            content,
            number,
            size,
            total_elements,
            total_pages,
            number_of_elements,
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_for_a_middle_page() {
        let page = Page::new(vec![6, 7, 8, 9, 10], 1, 5, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number_of_elements, 5);
        assert!(!page.first);
        assert!(!page.last);
        assert!(!page.empty);
    }

    #[test]
    fn page_past_the_end_is_empty_and_last() {
        let page: Page<i32> = Page::new(vec![], 4, 5, 12);
        assert!(page.empty);
        assert!(page.last);
        assert_eq!(page.total_elements, 12);
    }

    #[test]
    fn serializes_in_camel_case() {
        let json = serde_json::to_value(Page::new(vec!["a"], 0, 5, 1)).unwrap();
        pretty_assertions::assert_eq!(
            json,
            serde_json::json!({
                "content": ["a"],
                "number": 0,
                "size": 5,
                "totalElements": 1,
                "totalPages": 1,
                "numberOfElements": 1,
                "first": true,
                "last": true,
                "empty": false
            })
        );
    }

    #[test]
    fn last_page_flag_survives_the_largest_index() {
        let page: Page<i32> = Page::new(vec![], u64::MAX, 5, 3);
        assert!(page.last);
        assert!(!page.first);
    }
}
