use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Kind of portfolio entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Projects,
    Articles,
    Newsletters,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Projects, Kind::Articles, Kind::Newsletters];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Projects => "Projects",
            Kind::Articles => "Articles",
            Kind::Newsletters => "Newsletters",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown catalog kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    /// Case-insensitive: `projects`, `Projects` and `PROJECTS` all parse
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownKind(value.to_string()))
    }
}

/// A labelled outbound link of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Entry as written in `catalog.json`.
#[derive(Debug, Clone, Deserialize)]
struct RawEntry {
    content_type: Kind,
    title: String,
    date: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    links: String,
    image: String,
    #[serde(default)]
    labels: Vec<String>,
}

/// One project, article or newsletter. Serialized with parsed links, so
/// the API shape is not the `catalog.json` shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub content_type: Kind,
    pub title: String,
    /// Free-form date such as `Jan 2021`
    pub date: String,
    pub description: String,
    pub links: Vec<Link>,
    pub image: String,
    pub labels: Vec<String>,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        Self {
            content_type: raw.content_type,
            title: raw.title,
            date: raw.date,
            description: raw.description,
            links: parse_links(&raw.links),
            image: raw.image,
            labels: raw.labels,
        }
    }
}

const DEFAULT_LINK_LABEL: &str = "Link";

/// Parse `View Website  https://a.example   Source  https://b.example` into
/// labelled links. Words accumulate into a label until a URL closes it;
/// trailing words with no URL are dropped.
pub fn parse_links(text: &str) -> Vec<Link> {
    let mut links = Vec::new();
    let mut label: Vec<&str> = Vec::new();

    for token in text.split_whitespace() {
        if token.starts_with("https://") || token.starts_with("http://") {
            let text = if label.is_empty() {
                DEFAULT_LINK_LABEL.to_string()
            } else {
                label.join(" ")
            };
            links.push(Link {
                label: text,
                url: token.to_string(),
            });
            label.clear();
        } else {
            label.push(token);
        }
    }

    links
}

/// All catalog entries in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<RawEntry>::deserialize(deserializer)?;
        Ok(Self {
            entries: raw.into_iter().map(Entry::from).collect(),
        })
    }
}

impl Catalog {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of the given kinds, keeping catalog order
    pub fn of_kinds(&self, kinds: &[Kind]) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| kinds.contains(&entry.content_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_link() {
        assert_eq!(
            parse_links("View Website  https://inbox.example.com"),
            vec![Link {
                label: "View Website".to_string(),
                url: "https://inbox.example.com".to_string(),
            }]
        );
    }

    #[test]
    fn parses_multiple_links() {
        let links = parse_links(
            "View Engine  https://colab.example.com/engine?usp=sharing   View Neural Network  http://colab.example.com/net",
        );
        let labels: Vec<_> = links.iter().map(|link| link.label.as_str()).collect();
        assert_eq!(labels, vec!["View Engine", "View Neural Network"]);
        assert_eq!(links[0].url, "https://colab.example.com/engine?usp=sharing");
        assert_eq!(links[1].url, "http://colab.example.com/net");
    }

    #[test]
    fn bare_urls_get_default_label_and_dangling_words_are_dropped() {
        let links = parse_links("https://a.example.com  orphan words");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "Link");
        assert!(parse_links("").is_empty());
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("projects".parse::<Kind>().unwrap(), Kind::Projects);
        assert_eq!("Newsletters".parse::<Kind>().unwrap(), Kind::Newsletters);
        assert_eq!(
            "podcasts".parse::<Kind>().unwrap_err(),
            UnknownKind("podcasts".to_string())
        );
    }

    #[test]
    fn catalog_deserializes_and_filters_in_order() {
        let catalog: Catalog = serde_json::from_str(
            r#"[
                {"content_type": "Articles", "title": "One", "date": "Jan 2021", "links": "Read  https://one.example.com", "image": "one.png", "labels": ["Rust"]},
                {"content_type": "Projects", "title": "Two", "date": "Feb 2021", "description": "A tool", "image": "two.png"},
                {"content_type": "Newsletters", "title": "Three", "date": "Mar 2021", "image": "three.png"}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries()[0].links[0].label, "Read");
        assert!(catalog.entries()[1].links.is_empty());
        assert_eq!(catalog.entries()[2].description, "");

        let writing: Vec<_> = catalog
            .of_kinds(&[Kind::Articles, Kind::Newsletters])
            .iter()
            .map(|entry| entry.title.as_str())
            .collect();
        assert_eq!(writing, vec!["One", "Three"]);
    }

    #[test]
    fn entries_serialize_with_parsed_links() {
        let catalog: Catalog = serde_json::from_str(
            r#"[{"content_type": "Articles", "title": "One", "date": "Jan 2021", "links": "Read  https://one.example.com", "image": "one.png"}]"#,
        )
        .unwrap();

        let json = serde_json::to_value(catalog.entries()).unwrap();
        assert_eq!(json[0]["links"][0]["label"], "Read");
        assert_eq!(json[0]["links"][0]["url"], "https://one.example.com");
        assert_eq!(json[0]["content_type"], "Articles");
    }

    #[test]
    fn unknown_kind_message_names_the_kind() {
        let err = "podcasts".parse::<Kind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown catalog kind 'podcasts'");
    }

    #[test]
    fn unknown_content_type_is_rejected() {
        let result: Result<Catalog, _> = serde_json::from_str(
            r#"[{"content_type": "Podcasts", "title": "x", "date": "", "image": ""}]"#,
        );
        assert!(result.is_err());
    }
}
