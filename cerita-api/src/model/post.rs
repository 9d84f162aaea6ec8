use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::warn;

/// Identifier of a post as found in `posts.json`.
///
/// Kept as the raw JSON value; lookups always go through the string form,
/// so `7`, `7.0` and `"7"` all read as `7`. A missing or null `ID` has an
/// empty string form and never matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Value);

impl PostId {
    /// Compares against a raw query-string value.
    pub fn matches(&self, raw: &str) -> bool {
        !self.0.is_null() && self.to_string() == raw
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => Ok(()),
            Value::String(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&number_to_string(n)),
            other => write!(f, "{other}"),
        }
    }
}

impl From<i64> for PostId {
    fn from(n: i64) -> Self {
        PostId(n.into())
    }
}

impl From<u64> for PostId {
    fn from(n: u64) -> Self {
        PostId(n.into())
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        PostId(s.into())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "ID", default)]
    pub id: PostId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    /// Trusted markup, rendered verbatim.
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
}

/// Null reads as empty, numbers and booleans as their JSON text.
fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Turns the raw array into posts, dropping records that are not objects.
pub fn collect_posts(records: Vec<Value>) -> Vec<Post> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(post) => Some(post),
            Err(e) => {
                warn!("skipped record {i}: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_string_ids() {
        let posts: Vec<Post> = serde_json::from_str(
            r#"[
                {"ID": 7, "title": "Tujuh", "content": "<p>7</p>", "date": "2024-01-01"},
                {"ID": "abc", "title": "Huruf", "content": ""}
            ]"#,
        )
        .expect("valid json");

        assert_eq!(posts[0].id, PostId::from(7i64));
        assert_eq!(posts[0].content, "<p>7</p>");
        assert_eq!(posts[1].id, PostId::from("abc"));
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let post: Post = serde_json::from_str(r#"{"ID": 1}"#).expect("valid json");
        assert_eq!(post.title, "");
        assert_eq!(post.content, "");
    }

    #[test]
    fn odd_records_still_parse() {
        let posts: Vec<Post> = serde_json::from_str(
            r#"[
                {"ID": 7.0, "title": null},
                {"title": "Tanpa ID"},
                {"ID": 18446744073709551615, "title": 12, "content": null},
                {"ID": 2.5, "title": "Pecahan"}
            ]"#,
        )
        .expect("lenient model");

        assert_eq!(posts[0].id.to_string(), "7");
        assert!(posts[0].id.matches("7"));
        assert_eq!(posts[0].title, "");

        assert!(posts[1].id.is_null());
        assert_eq!(posts[1].id.to_string(), "");
        assert!(!posts[1].id.matches(""));

        assert!(posts[2].id.matches("18446744073709551615"));
        assert_eq!(posts[2].title, "12");
        assert_eq!(posts[2].content, "");

        assert!(posts[3].id.matches("2.5"));
    }

    #[test]
    fn non_object_records_are_dropped_not_fatal() {
        let records: Vec<Value> = serde_json::from_str(
            r#"[{"ID": 1, "title": "Satu"}, null, 3, {"ID": 2, "title": "Dua"}]"#,
        )
        .expect("valid json");
        let posts = collect_posts(records);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Satu", "Dua"]);
    }

    #[test]
    fn matches_by_string_form() {
        assert!(PostId::from(7i64).matches("7"));
        assert!(!PostId::from(7i64).matches("07"));
        assert!(!PostId::from(7i64).matches("seven"));
        assert!(PostId::from("07").matches("07"));
        assert_eq!(PostId::from(-3i64).to_string(), "-3");
    }
}
