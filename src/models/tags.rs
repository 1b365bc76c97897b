//! Multi-value tag lists
//!
//! Tags are kept as an ordered, de-duplicated list. JSON carries them as an
//! array; flat formats (CSV cells) use a `, `-joined encoding where a literal
//! comma or backslash inside a tag is escaped with a backslash.

use serde::{Deserialize, Deserializer, Serialize};

const SEPARATOR: &str = ", ";

/// Ordered list of trimmed, non-empty, unique tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    /// Build a list, trimming whitespace and dropping empty or repeated tags
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag: String = tag.into();
            let trimmed = tag.trim();
            if !trimmed.is_empty() && !out.iter().any(|t| t == trimmed) {
                out.push(trimmed.to_string());
            }
        }
        Self(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Replace every occurrence of `from` with `to`
    pub fn rename(&mut self, from: &str, to: &str) {
        let renamed = self
            .0
            .iter()
            .map(|t| if t == from { to.to_string() } else { t.clone() });
        *self = TagList::new(renamed.collect::<Vec<_>>());
    }

    /// Encode as a single delimited cell
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|t| t.replace('\\', "\\\\").replace(',', "\\,"))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }

    /// Decode a delimited cell produced by [`TagList::encode`].
    ///
    /// Cells written without escapes decode the same way a plain comma split
    /// would, so older unescaped exports still load.
    pub fn decode(cell: &str) -> Self {
        let mut tags = Vec::new();
        let mut current = String::new();
        let mut chars = cell.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                },
                ',' => tags.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        tags.push(current);

        TagList::new(tags)
    }
}

impl<'de> Deserialize<'de> for TagList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<String>),
            Joined(String),
        }

        Ok(match Option::<Repr>::deserialize(deserializer)? {
            None => TagList::default(),
            Some(Repr::List(tags)) => TagList::new(tags),
            Some(Repr::Joined(cell)) => TagList::decode(&cell),
        })
    }
}

impl<S: Into<String>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TagList::new(iter)
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_dedupes() {
        let tags = TagList::new(["  Development ", "", "Development", "Deployment"]);
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["Development", "Deployment"]);
    }

    #[test]
    fn test_plain_tags_round_trip() {
        let tags = TagList::new(["Idea Generation", "Selection/Prioritisation", "Development"]);
        assert_eq!(tags.encode(), "Idea Generation, Selection/Prioritisation, Development");
        assert_eq!(TagList::decode(&tags.encode()), tags);
    }

    #[test]
    fn test_embedded_comma_round_trips() {
        let tags = TagList::new(["Housing, Affordability and Quality", "Community Safety"]);
        let encoded = tags.encode();
        assert_eq!(encoded, "Housing\\, Affordability and Quality, Community Safety");
        assert_eq!(TagList::decode(&encoded), tags);
    }

    #[test]
    fn test_backslash_round_trips() {
        let tags = TagList::new(["C:\\shared\\governance", "Ops"]);
        assert_eq!(TagList::decode(&tags.encode()), tags);
    }

    #[test]
    fn test_decode_legacy_unescaped_cell() {
        let tags = TagList::decode("Net Zero and Climate Resilience, Community Safety,");
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("Community Safety"));
    }

    #[test]
    fn test_deserialize_array_string_and_null() {
        let from_array: TagList = serde_json::from_str(r#"["A", "B"]"#).unwrap();
        let from_string: TagList = serde_json::from_str(r#""A, B""#).unwrap();
        let from_null: TagList = serde_json::from_str("null").unwrap();
        assert_eq!(from_array, from_string);
        assert!(from_null.is_empty());
    }

    #[test]
    fn test_rename() {
        let mut tags = TagList::new(["Cabinet", "Procuring Board"]);
        tags.rename("Cabinet", "Executive Cabinet");
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["Executive Cabinet", "Procuring Board"]);
    }
}
