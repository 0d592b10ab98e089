//! Content layer for the cupofcraft personal site.
//!
//! The site itself is rendered by an external pipeline; this crate owns the
//! parts that have to be correct before any page exists:
//!
//! - content collections: discovery rules, frontmatter parsing, declarative
//!   schemas with cross-reference checks ([`content`])
//! - pure helpers consumed by rendering code: date formatting, sorting,
//!   slug/route derivation, active-nav matching ([`utils`])
//! - the development server exposing `GET /robots.txt` ([`serve`])

pub mod cli;
pub mod config;
pub mod content;
pub mod logger;
pub mod serve;
pub mod utils;
