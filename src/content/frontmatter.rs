//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub excerpt: Option<String>,
}

impl FrontMatter {
    /// Split a raw document into front-matter and body.
    ///
    /// Malformed or absent metadata is never an error; the result degrades
    /// to the default record.
    pub fn parse(text: &str) -> (Self, &str) {
        match split_raw(text) {
            (Some(matter), body) if !matter.is_empty() => {
                match serde_yaml::from_str(matter) {
                    Ok(fm) => (fm, body),
                    Err(e) => {
                        tracing::warn!("ignoring malformed front-matter: {}", e);
                        (Self::default(), body)
                    }
                }
            }
            (_, body) => (Self::default(), body),
        }
    }

    /// Parse the date string into a timestamp
    pub fn parse_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Locate an optional leading `---` metadata block.
///
/// The marker must open the document; the block ends at the next newline
/// followed by the same marker. Returns the trimmed metadata source and the
/// trimmed body, or no metadata and the untouched text when either marker is
/// missing.
pub fn split_raw(text: &str) -> (Option<&str>, &str) {
    if let Some(rest) = text.strip_prefix("---") {
        if let Some(end) = rest.find("\n---") {
            return (Some(rest[..end].trim()), rest[end + 4..].trim());
        }
    }
    (None, text)
}

/// Parse a date string in the formats posts commonly use
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
        // Try parsing date only
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0)?));
        }
    }

    // Try RFC 3339 / ISO 8601
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter() {
        let (fm, body) = FrontMatter::parse("---\ntitle: Hi\n---\nBody text");
        assert_eq!(fm.title, Some("Hi".to_string()));
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_parse_full_front_matter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
tags:
  - rust
  - blogging
excerpt: A first post
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.tags, vec!["rust", "blogging"]);
        assert_eq!(fm.excerpt, Some("A first post".to_string()));
        assert_eq!(body, "This is the content.");

        let date = fm.parse_date().unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    fn test_no_front_matter() {
        let text = "Just a document.\n\nNo metadata at all.";
        let (fm, body) = FrontMatter::parse(text);
        assert!(fm.title.is_none());
        assert!(fm.tags.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_marker_not_at_start() {
        let text = "intro\n---\ntitle: Hi\n---\nrest";
        let (matter, body) = split_raw(text);
        assert!(matter.is_none());
        assert_eq!(body, text);
    }

    #[test]
    fn test_no_closing_marker() {
        let text = "---\ntitle: Hi\nno closing delimiter";
        let (matter, body) = split_raw(text);
        assert!(matter.is_none());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_regions() {
        let (matter, body) = split_raw("---\ntitle: Hi\ndate: 2024-01-01\n---\n\nBody here.\n");
        assert_eq!(matter, Some("title: Hi\ndate: 2024-01-01"));
        assert_eq!(body, "Body here.");
    }

    #[test]
    fn test_malformed_yaml_degrades() {
        let (fm, body) = FrontMatter::parse("---\n[not: valid: yaml\n---\nBody");
        assert!(fm.title.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_empty_metadata_block() {
        let (fm, body) = FrontMatter::parse("---\n\n---\nBody");
        assert!(fm.title.is_none());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_single_string_tag() {
        let (fm, _) = FrontMatter::parse("---\ntags: notes\n---\nx");
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date_string("2024-01-15").is_some());
        assert!(parse_date_string("2024/01/15").is_some());
        assert!(parse_date_string("2024-01-15 10:30:00").is_some());
        assert!(parse_date_string("2024-01-15T10:30:00+09:00").is_some());
        assert!(parse_date_string("not a date").is_none());
    }
}
