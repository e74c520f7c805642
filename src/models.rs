use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Value held by every field that could not be resolved
pub const NOT_AVAILABLE: &str = "Not available";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    YouTube,
    Instagram,
    TikTok,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::YouTube,
        Platform::Instagram,
        Platform::TikTok,
        Platform::Facebook,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Facebook => "Facebook",
        }
    }

    /// Lowercase name, used in export file names
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// Channel or profile page
    Profile,
    /// Single post or video
    Post,
}

/// A classified link, ready to scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeTarget {
    pub platform: Platform,
    pub url: String,
    pub kind: LinkKind,
    /// The platform's own word for the kind ("channel", "video", "post", ...)
    pub label: &'static str,
}

/// Scraped record for one target.
///
/// The field set is fixed at construction; lookups only replace values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeResult {
    platform: Platform,
    label: &'static str,
    fields: Vec<(&'static str, String)>,
}

impl ScrapeResult {
    pub fn new<I>(platform: Platform, label: &'static str, names: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        let mut fields: Vec<(&'static str, String)> = Vec::new();
        for name in names {
            if !fields.iter().any(|(n, _)| *n == name) {
                fields.push((name, NOT_AVAILABLE.to_string()));
            }
        }

        Self {
            platform,
            label,
            fields,
        }
    }

    /// Replace the value of a declared field. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_available(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| v != NOT_AVAILABLE)
    }

    /// Declared fields still holding the sentinel
    pub fn missing(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|(_, v)| v == NOT_AVAILABLE)
            .map(|(n, _)| *n)
            .collect()
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(n, _)| *n).collect()
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Column names for tabular output: platform, type, then the fields
    pub fn headers(&self) -> Vec<&str> {
        let mut headers = vec!["platform", "type"];
        headers.extend(self.fields.iter().map(|(n, _)| *n));
        headers
    }

    /// Values matching [`ScrapeResult::headers`]
    pub fn row(&self) -> Vec<&str> {
        let mut row = vec![self.platform.name(), self.label];
        row.extend(self.fields.iter().map(|(_, v)| v.as_str()));
        row
    }
}

impl Serialize for ScrapeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        for (key, value) in self.headers().into_iter().zip(self.row()) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
