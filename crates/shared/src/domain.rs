use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    };
}

id_newtype!(ContactId);

/// Labels offered by the tag selector, in display order.
pub const TAG_VOCABULARY: [&str; 3] = ["work", "friend", "family"];

/// Separator between tags in the wire representation.
pub const TAG_SEPARATOR: &str = ",";

/// A short lowercase alphabetic category label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Accepts a purely ASCII-alphabetic label in any case and lowercases it.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(Self(raw.to_ascii_lowercase()))
    }

    pub fn vocabulary() -> Vec<Tag> {
        TAG_VOCABULARY
            .iter()
            .map(|label| Tag((*label).to_string()))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expands a comma-joined wire string, dropping entries that are not valid tags.
pub fn split_tags(raw: &str) -> Vec<Tag> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(TAG_SEPARATOR).filter_map(Tag::parse).collect()
}

pub fn join_tags(tags: &[Tag]) -> String {
    tags.iter()
        .map(Tag::as_str)
        .collect::<Vec<_>>()
        .join(TAG_SEPARATOR)
}

/// One address-book entry as the remote store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: String,
}

impl Contact {
    pub fn tag_list(&self) -> Vec<Tag> {
        split_tags(&self.tags)
    }

    /// Case-insensitive prefix match on `full_name`. `lowered_prefix` must already be lowercase.
    pub fn name_starts_with(&self, lowered_prefix: &str) -> bool {
        self.full_name.to_lowercase().starts_with(lowered_prefix)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unsaved form data for a contact being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tags: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_parse_lowercases_and_rejects_non_alphabetic() {
        assert_eq!(Tag::parse("Work").map(|t| t.to_string()), Some("work".into()));
        assert!(Tag::parse("").is_none());
        assert!(Tag::parse("work1").is_none());
        assert!(Tag::parse("best friend").is_none());
    }

    #[test]
    fn split_tags_skips_invalid_entries() {
        let tags = split_tags("work,,Friend,x-y,family");
        let labels: Vec<&str> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(labels, vec!["work", "friend", "family"]);
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn join_tags_preserves_order() {
        let tags = vec![Tag::parse("family").unwrap(), Tag::parse("work").unwrap()];
        assert_eq!(join_tags(&tags), "family,work");
        assert_eq!(join_tags(&[]), "");
    }

    #[test]
    fn contact_decodes_null_tags_as_empty() {
        let contact: Contact = serde_json::from_str(
            r#"{"id":4,"full_name":"Ada","email":"a@b","phone_number":"1","tags":null}"#,
        )
        .expect("decode");
        assert_eq!(contact.id, ContactId(4));
        assert_eq!(contact.tags, "");
        assert!(contact.tag_list().is_empty());
    }

    #[test]
    fn name_prefix_match_ignores_case() {
        let contact = Contact {
            id: ContactId(1),
            full_name: "Alice".into(),
            email: "a@b".into(),
            phone_number: "1".into(),
            tags: String::new(),
        };
        assert!(contact.name_starts_with("al"));
        assert!(!contact.name_starts_with("b"));
    }

    #[test]
    fn contact_id_parses_from_attribute_text() {
        assert_eq!(" 12 ".parse::<ContactId>().expect("id"), ContactId(12));
        assert!("abc".parse::<ContactId>().is_err());
    }
}
