//! Request/response bodies of the REST API.

use serde::{Deserialize, Serialize};
use verse_core::types::{FavoriteStatus, VerseLookup};

/// Text the lookup service reports when a reference resolves to nothing.
pub const PASSAGE_NOT_FOUND: &str = "Error: Passage not found";

#[derive(Debug, Deserialize)]
pub(crate) struct FavoriteResponse {
    pub message: String,
}

impl FavoriteResponse {
    pub fn status(&self) -> FavoriteStatus {
        FavoriteStatus::from_message(&self.message)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LookupQuery<'a> {
    pub reference: &'a str,
    pub get_verse_num: bool,
}

/// Passage text, either a single string or one string per passage.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PassageText {
    One(String),
    Many(Vec<String>),
}

impl PassageText {
    fn into_text(self) -> String {
        match self {
            Self::One(text) => text,
            Self::Many(passages) => passages.join("\n"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupInfo {
    #[serde(alias = "passages")]
    pub verse: PassageText,
    pub reference: String,
}

/// `GET /api/verse` answers in one of two shapes depending on server version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LookupResponse {
    Nested { info: LookupInfo },
    Flat { verse: PassageText },
}

impl LookupResponse {
    /// Convert to a lookup result. The flat shape carries no canonical
    /// reference, so the queried one is used.
    pub fn into_lookup(self, queried: &str) -> VerseLookup {
        match self {
            Self::Nested { info } => VerseLookup {
                reference: info.reference,
                verse: info.verse.into_text(),
            },
            Self::Flat { verse } => VerseLookup {
                reference: queried.to_string(),
                verse: verse.into_text(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> VerseLookup {
        serde_json::from_str::<LookupResponse>(json)
            .unwrap()
            .into_lookup("jn 3:16")
    }

    #[test]
    fn test_nested_with_passages() {
        let lookup = parse(r#"{"info":{"passages":"[16] For God so loved","reference":"John 3:16"}}"#);
        assert_eq!(lookup.reference, "John 3:16");
        assert_eq!(lookup.verse, "[16] For God so loved");
    }

    #[test]
    fn test_nested_with_passage_list() {
        let lookup = parse(r#"{"info":{"passages":["first","second"],"reference":"John 3:16-17"}}"#);
        assert_eq!(lookup.verse, "first\nsecond");
    }

    #[test]
    fn test_nested_with_verse_field() {
        let lookup = parse(r#"{"info":{"verse":"For God so loved","reference":"John 3:16"}}"#);
        assert_eq!(lookup.verse, "For God so loved");
    }

    #[test]
    fn test_flat_uses_queried_reference() {
        let lookup = parse(r#"{"verse":"For God so loved"}"#);
        assert_eq!(lookup.reference, "jn 3:16");
        assert_eq!(lookup.verse, "For God so loved");
    }

    #[test]
    fn test_favorite_message() {
        let added: FavoriteResponse = serde_json::from_str(r#"{"message":"Added"}"#).unwrap();
        assert_eq!(added.status(), FavoriteStatus::Added);
        let removed: FavoriteResponse = serde_json::from_str(r#"{"message":"Removed"}"#).unwrap();
        assert_eq!(removed.status(), FavoriteStatus::Removed);
    }
}
