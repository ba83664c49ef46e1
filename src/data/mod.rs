//! Data models and the remote posts client
//!
//! Posts are pass-through records from the remote JSON source. Only `title`
//! and `body` are rendered; every other field is carried along untouched so the
//! cached copy matches what the endpoint served.

pub mod posts;

pub use posts::{FetchError, PostsClient, POSTS_CACHE_KEY, POSTS_ENDPOINT};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single post from the remote collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier assigned by the remote source; 0 when absent or not a number
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    /// Post title; empty when the source omits it or sends null
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Post body; empty when the source omits it or sends null
    #[serde(default, deserialize_with = "lenient_text")]
    pub body: String,
    /// Any other fields the source sends (e.g. `userId`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    pub fn new(id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            extra: Map::new(),
        }
    }
}

/// Accepts any JSON value as text: strings as-is, numbers and booleans
/// printed, null and containers as empty
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Accepts integer ids and numeric strings; anything else is 0
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_decodes_jsonplaceholder_shape() {
        let json = r#"{
            "userId": 1,
            "id": 1,
            "title": "sunt aut facere repellat",
            "body": "quia et suscipit\nsuscipit recusandae"
        }"#;

        let post: Post = serde_json::from_str(json).expect("Failed to decode post");

        assert_eq!(post.id, 1);
        assert_eq!(post.title, "sunt aut facere repellat");
        assert_eq!(post.body, "quia et suscipit\nsuscipit recusandae");
        assert_eq!(post.extra.get("userId"), Some(&Value::from(1)));
    }

    #[test]
    fn test_post_missing_fields_default_to_empty() {
        let post: Post = serde_json::from_str(r#"{"id": 4}"#).expect("Failed to decode post");

        assert_eq!(post.id, 4);
        assert!(post.title.is_empty());
        assert!(post.body.is_empty());
        assert!(post.extra.is_empty());
    }

    #[test]
    fn test_post_reencodes_extra_fields_at_top_level() {
        let mut post = Post::new(2, "title", "body");
        post.extra.insert("userId".to_string(), Value::from(5));

        let json = serde_json::to_value(&post).expect("Failed to encode post");

        assert_eq!(json["userId"], Value::from(5));
        assert_eq!(json["title"], Value::from("title"));
    }

    #[test]
    fn test_post_tolerates_null_and_non_string_fields() {
        let json = r#"[
            {"id": 1, "title": null, "body": 42},
            {"id": "2", "title": true, "body": ["nested"]},
            {"id": null, "title": "kept", "body": "kept body"}
        ]"#;

        let posts: Vec<Post> = serde_json::from_str(json).expect("Collection should decode");

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "");
        assert_eq!(posts[0].body, "42");
        assert_eq!(posts[1].id, 2);
        assert_eq!(posts[1].title, "true");
        assert_eq!(posts[1].body, "");
        assert_eq!(posts[2].id, 0);
        assert_eq!(posts[2].title, "kept");
    }
}
