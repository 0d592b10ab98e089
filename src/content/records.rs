//! Typed content records, deserialized from validated documents.
//!
//! Each struct mirrors one collection's schema. Deserialization happens
//! only after schema validation succeeded, so `serde` failures here would
//! indicate a schema/record mismatch, not bad content. Unknown frontmatter
//! fields are ignored (passthrough policy).

use crate::utils::date::parse_date_value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, de};
use std::fmt;

/// A validated entry of one collection: the derived id plus typed data.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    /// Id derived from the source path, relative to the collection base and
    /// without extension (e.g. `course-a/lesson/intro/index`)
    pub id: String,
    pub data: T,
}

// ============================================================================
// Shared SEO Block
// ============================================================================

/// SEO block shared by pages, series and posts.
///
/// Structurally identical across collections; `image` is the only
/// category-defined optional part.
#[derive(Debug, Clone, Deserialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub keywords: Option<String>,
    #[serde(rename = "canonicalUrl")]
    pub canonical_url: Option<String>,
    pub twitter: Option<SeoTwitter>,
    pub robots: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeoTwitter {
    pub creator: Option<String>,
}

// ============================================================================
// Collection Records
// ============================================================================

/// Static page (about, uses, ...)
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub title: String,
    pub description: Option<String>,
    pub seo: Seo,
}

/// Job history entry
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    #[serde(rename = "companyIntro")]
    pub company_intro: Option<String>,
    pub location: String,
    pub from: i32,
    pub to: JobEnd,
    pub url: Option<String>,
}

/// End of a job: a calendar year, or the ongoing sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobEnd {
    Year(i32),
    /// The literal `"Now"` in the source document
    Now,
}

impl JobEnd {
    /// The year used for sorting: `to`, or the current calendar year for
    /// ongoing jobs.
    pub const fn effective_year(self, current_year: i32) -> i32 {
        match self {
            Self::Year(year) => year,
            Self::Now => current_year,
        }
    }
}

impl<'de> Deserialize<'de> for JobEnd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct JobEndVisitor;

        impl de::Visitor<'_> for JobEndVisitor {
            type Value = JobEnd;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a year or the string \"Now\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<JobEnd, E> {
                i32::try_from(v)
                    .map(JobEnd::Year)
                    .map_err(|_| E::custom(format!("year out of range: {v}")))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<JobEnd, E> {
                i32::try_from(v)
                    .map(JobEnd::Year)
                    .map_err(|_| E::custom(format!("year out of range: {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<JobEnd, E> {
                if v == "Now" {
                    Ok(JobEnd::Now)
                } else {
                    Err(E::custom(format!("expected \"Now\", found \"{v}\"")))
                }
            }
        }

        deserializer.deserialize_any(JobEndVisitor)
    }
}

/// External link (social profiles etc.), loaded from `.yml` files
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub label: String,
    pub name: String,
    pub url: String,
}

/// Post series, referenced by posts
#[derive(Debug, Clone, Deserialize)]
pub struct Series {
    pub title: String,
    pub description: Option<String>,
    pub seo: Seo,
}

/// Blog post
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub title: String,
    pub date: PostDate,
    pub image: Option<String>,
    pub seo: Seo,
    pub series: Option<SeriesRef>,
}

/// Foreign key into the series collection
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesRef {
    #[serde(rename = "ref")]
    pub id: String,
    /// Position of the post within the series, strictly positive
    pub number: u32,
    pub note: Option<String>,
}

/// Post date, tolerant of values that only deserialize as plain strings.
///
/// Frontmatter dates usually arrive as `YYYY-MM-DD` strings rather than
/// full RFC 3339 timestamps; those land in the `Raw` variant and are
/// re-parsed on demand.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostDate {
    Parsed(DateTime<Utc>),
    Raw(String),
}

impl PostDate {
    /// UTC instant of this date, if it parses at all.
    pub fn as_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Parsed(date) => Some(*date),
            Self::Raw(raw) => parse_date_value(raw),
        }
    }

    /// Sort key in seconds since the epoch. Unparseable raw values sort
    /// last (oldest).
    pub fn timestamp(&self) -> i64 {
        self.as_utc().map_or(i64::MIN, |date| date.timestamp())
    }
}

/// Course note (top-level entry under `notes/`)
#[derive(Debug, Clone, Deserialize)]
pub struct CourseNote {
    pub title: String,
    pub author: String,
    pub url: String,
    pub description: String,
    #[serde(rename = "certificateUrl")]
    pub certificate_url: Option<String>,
    #[serde(rename = "certificateImage")]
    pub certificate_image: Option<String>,
}

/// Course module, referenced by lesson notes
#[derive(Debug, Clone, Deserialize)]
pub struct CourseModule {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub order: Option<u32>,
    pub course: Option<String>,
}

/// Lesson note (nested under `notes/<course>/lesson/`)
#[derive(Debug, Clone, Deserialize)]
pub struct LessonNote {
    pub title: String,
    pub course: Option<String>,
    /// Foreign key into the courseModules collection
    pub module: Option<String>,
    #[serde(rename = "moduleOrder")]
    pub module_order: Option<u32>,
    pub order: Option<u32>,
    pub description: Option<String>,
    pub url: Option<String>,
}
