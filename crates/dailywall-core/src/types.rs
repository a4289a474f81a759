//! Core data types for the dailywall ingestion pipeline.
//!
//! `Wallpaper` is both the in-flight candidate built from the feed and the
//! record persisted in the document store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One image as listed by the image-of-the-day feed for a single market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawImage {
    /// Caption: title plus attribution, format varies by locale
    #[serde(default)]
    pub copyright: String,

    /// Publish date as `yyyymmdd`
    #[serde(rename = "startdate", default)]
    pub start_date: String,

    /// Relative URL-base path, e.g. `/th?id=OHR.MauiWhale_EN-US1928366389`
    #[serde(rename = "urlbase", default)]
    pub url_base: String,

    /// Whether the feed allows the image as a wallpaper
    #[serde(rename = "wp", default)]
    pub wallpaper: bool,
}

/// A wallpaper record: a normalized candidate or a stored document.
///
/// Empty fields are skipped on serialization so a merge write never erases
/// stored values the written record does not carry. Missing fields
/// deserialize to their defaults (older documents lack `urlBase`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Wallpaper {
    /// Stable identifier derived from the URL-base
    pub id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    /// Attribution text, always starting with "©" when present
    #[serde(skip_serializing_if = "String::is_empty")]
    pub copyright: String,

    /// Publish date as the integer `yyyymmdd`
    #[serde(skip_serializing_if = "is_zero")]
    pub date: i64,

    /// Legacy file name; equals `id`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filename: String,

    /// Market the record was discovered under
    #[serde(skip_serializing_if = "String::is_empty")]
    pub market: String,

    /// Fully-qualified URL-base (host + relative path, no size suffix)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url_base: String,

    /// Original caption, verbatim
    #[serde(skip_serializing_if = "String::is_empty")]
    pub full_desc: String,

    /// Label → confidence score, in discovery order
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub tags: IndexMap<String, f64>,

    /// Tag names by descending score, spaces replaced with hyphens
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags_ordered: Vec<String>,

    /// Up to four dominant colors as `#RRGGBB`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl Wallpaper {
    /// Image used for annotation.
    pub fn image_url(&self) -> String {
        format!("{}_1920x1080.jpg", self.url_base)
    }

    /// Full-size wallpaper image.
    pub fn wallpaper_url(&self) -> String {
        format!("{}_1920x1200.jpg", self.url_base)
    }
}

/// A label detected by the annotation service.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub description: String,
    pub score: f64,
}

impl Label {
    pub fn new(description: impl Into<String>, score: f64) -> Self {
        Self {
            description: description.into(),
            score,
        }
    }
}

/// An RGB triple, each channel 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Annotation result for one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    /// Detected labels, in service order
    pub labels: Vec<Label>,

    /// Dominant colors, in service order (most prominent first)
    pub colors: Vec<Rgb>,
}

/// Outcome of one pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct UpdateReport {
    /// Distinct identifiers discovered across all markets
    pub discovered: usize,

    /// New wallpapers enriched and stored
    pub created: Vec<String>,

    /// Existing records that only received a URL-base
    pub patched: Vec<String>,

    /// Non-English records superseded by an English version
    pub upgraded: Vec<String>,

    /// Identifiers that needed no write
    pub skipped: usize,

    /// Every written identifier, in processing order
    updated: Vec<String>,
}

impl UpdateReport {
    pub(crate) fn record_created(&mut self, id: &str) {
        self.created.push(id.to_string());
        self.updated.push(id.to_string());
    }

    pub(crate) fn record_patched(&mut self, id: &str) {
        self.patched.push(id.to_string());
        self.updated.push(id.to_string());
    }

    pub(crate) fn record_upgraded(&mut self, id: &str) {
        self.upgraded.push(id.to_string());
        self.updated.push(id.to_string());
    }

    /// Every identifier written during the invocation.
    pub fn updated(&self) -> &[String] {
        &self.updated
    }
}
