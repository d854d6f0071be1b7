// crates/core/src/post.rs
//! The scraped blog post record.

use serde::{Deserialize, Serialize};

/// One scraped blog post: listing metadata plus extracted body text.
///
/// This is the item shape the scraper emits and the result payload a
/// completed job carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Platform-assigned post number, unique within one blog.
    pub log_no: String,
    pub title: String,
    pub url: String,
    /// Listing date as displayed by the platform; `None` when the listing
    /// row carried no date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Extracted body text.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_platform_field_names() {
        let post = Post {
            log_no: "223456789".to_string(),
            title: "spring garden".to_string(),
            url: "https://blog.example.com/daisy/223456789".to_string(),
            date: Some("2025. 4. 2.".to_string()),
            content: "body text".to_string(),
        };
        let json = serde_json::to_string(&post).unwrap();
        assert!(json.contains("\"logNo\":\"223456789\""));
        assert!(json.contains("\"date\":\"2025. 4. 2.\""));
    }

    #[test]
    fn missing_date_deserializes_to_none() {
        let json = r#"{"logNo":"1","title":"t","url":"https://blog.example.com/daisy/1","content":"c"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.date.is_none());

        // ...and is dropped again on the way out.
        let out = serde_json::to_string(&post).unwrap();
        assert!(!out.contains("date"));
    }
}
