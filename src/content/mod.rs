//! Content collections: discovery, schemas, validation, typed records.
//!
//! Eight collections exist, each with a discovery rule and a declarative
//! schema:
//!
//! | Collection      | Base       | Pattern                        | Record |
//! |-----------------|------------|--------------------------------|--------|
//! | `pages`         | `pages/`   | `**/[!_]*.{md,mdx}`            | [`Page`] |
//! | `jobs`          | `jobs/`    | `**/[!_]*.{md,mdx}`            | [`Job`] |
//! | `links`         | `links/`   | `**/[!_]*.yml`                 | [`Link`] |
//! | `posts`         | `posts/`   | `**/[!_]*.{md,mdx}`            | [`Post`] |
//! | `series`        | `series/`  | `**/[!_]*.{md,mdx}`            | [`Series`] |
//! | `notes`         | `notes/`   | `**/index.{md,mdx}`            | [`CourseNote`] |
//! | `courseModules` | `modules/` | `**/[!_]*.{md,mdx}`            | [`CourseModule`] |
//! | `lessonNotes`   | `notes/`   | `**/lesson/**/index.{md,mdx}`  | [`LessonNote`] |
//!
//! [`ContentStore::load`] runs the whole pass: discover, parse, build the
//! cross-reference lookup, validate every document, deserialize into typed
//! records. The first invalid document aborts the load; there is no partial
//! result.

pub mod document;
pub mod loader;
pub mod records;
pub mod schema;

use anyhow::{Context, Result};
use loader::{LoaderRule, SourceFile};
use records::{
    CourseModule, CourseNote, Entry, Job, LessonNote, Link, Page, Post, Series,
};
use schema::{FieldRule, FieldType, RefResolver, Schema};
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::path::Path;

// ============================================================================
// Categories
// ============================================================================

/// A content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Pages,
    Jobs,
    Links,
    Posts,
    Series,
    Notes,
    CourseModules,
    LessonNotes,
}

impl Category {
    pub const ALL: [Self; 8] = [
        Self::Pages,
        Self::Jobs,
        Self::Links,
        Self::Posts,
        Self::Series,
        Self::Notes,
        Self::CourseModules,
        Self::LessonNotes,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Jobs => "jobs",
            Self::Links => "links",
            Self::Posts => "posts",
            Self::Series => "series",
            Self::Notes => "notes",
            Self::CourseModules => "courseModules",
            Self::LessonNotes => "lessonNotes",
        }
    }

    /// Discovery rule for this collection.
    ///
    /// `notes` and `lessonNotes` share a base directory: course indexes sit
    /// at the course root, lessons under a literal `lesson/` segment.
    pub const fn loader(self) -> LoaderRule {
        const MARKDOWN: &str = "**/[!_]*.{md,mdx}";
        match self {
            Self::Pages => LoaderRule::new("pages", MARKDOWN),
            Self::Jobs => LoaderRule::new("jobs", MARKDOWN),
            Self::Links => LoaderRule::new("links", "**/[!_]*.yml"),
            Self::Posts => LoaderRule::new("posts", MARKDOWN),
            Self::Series => LoaderRule::new("series", MARKDOWN),
            Self::Notes => LoaderRule::new("notes", "**/index.{md,mdx}"),
            Self::CourseModules => LoaderRule::new("modules", MARKDOWN),
            Self::LessonNotes => LoaderRule::new("notes", "**/lesson/**/index.{md,mdx}"),
        }
    }

    /// Validation schema for this collection.
    pub const fn schema(self) -> Schema {
        match self {
            Self::Pages => Schema::new(PAGE_FIELDS),
            Self::Jobs => Schema::new(JOB_FIELDS),
            Self::Links => Schema::new(LINK_FIELDS),
            Self::Posts => Schema::new(POST_FIELDS),
            Self::Series => Schema::new(SERIES_FIELDS),
            Self::Notes => Schema::new(NOTE_FIELDS),
            Self::CourseModules => Schema::new(MODULE_FIELDS),
            Self::LessonNotes => Schema::new(LESSON_FIELDS),
        }
    }
}

// ============================================================================
// Field Rules
// ============================================================================

const TWITTER_FIELDS: &[FieldRule] = &[FieldRule::optional("creator", FieldType::Str)];

/// Shared SEO block; `image` stays optional in every collection carrying it.
const SEO_FIELDS: &[FieldRule] = &[
    FieldRule::required("title", FieldType::Str),
    FieldRule::required("description", FieldType::Str),
    FieldRule::optional("type", FieldType::Str),
    FieldRule::optional("keywords", FieldType::Str),
    FieldRule::optional("canonicalUrl", FieldType::Str),
    FieldRule::optional("twitter", FieldType::Object(TWITTER_FIELDS)),
    FieldRule::optional("robots", FieldType::Str),
    FieldRule::optional("image", FieldType::Str),
];

const PAGE_FIELDS: &[FieldRule] = &[
    FieldRule::required("title", FieldType::Str),
    FieldRule::optional("description", FieldType::Str),
    FieldRule::required("seo", FieldType::Object(SEO_FIELDS)),
];

const JOB_FIELDS: &[FieldRule] = &[
    FieldRule::required("title", FieldType::Str),
    FieldRule::required("company", FieldType::Str),
    FieldRule::optional("companyIntro", FieldType::Str),
    FieldRule::required("location", FieldType::Str),
    FieldRule::required("from", FieldType::Int),
    FieldRule::required("to", FieldType::YearOrNow),
    FieldRule::optional("url", FieldType::Str),
];

const LINK_FIELDS: &[FieldRule] = &[
    FieldRule::required("label", FieldType::Str),
    FieldRule::required("name", FieldType::Str),
    FieldRule::required("url", FieldType::Str),
];

const SERIES_REF_FIELDS: &[FieldRule] = &[
    FieldRule::required("ref", FieldType::Reference(Category::Series)),
    FieldRule::required("number", FieldType::PositiveInt),
    FieldRule::optional("note", FieldType::Str),
];

const POST_FIELDS: &[FieldRule] = &[
    FieldRule::required("title", FieldType::Str),
    FieldRule::required("date", FieldType::Date),
    FieldRule::optional("image", FieldType::Str),
    FieldRule::required("seo", FieldType::Object(SEO_FIELDS)),
    FieldRule::optional("series", FieldType::Object(SERIES_REF_FIELDS)),
];

const SERIES_FIELDS: &[FieldRule] = &[
    FieldRule::required("title", FieldType::Str),
    FieldRule::optional("description", FieldType::Str),
    FieldRule::required("seo", FieldType::Object(SEO_FIELDS)),
];

const NOTE_FIELDS: &[FieldRule] = &[
    FieldRule::required("title", FieldType::Str),
    FieldRule::required("author", FieldType::Str),
    FieldRule::required("url", FieldType::Url),
    FieldRule::required("description", FieldType::Str),
    FieldRule::optional("certificateUrl", FieldType::Url),
    FieldRule::optional("certificateImage", FieldType::Str),
];

const MODULE_FIELDS: &[FieldRule] = &[
    FieldRule::required("title", FieldType::Str),
    FieldRule::optional("description", FieldType::Str),
    FieldRule::optional("url", FieldType::Url),
    FieldRule::optional("order", FieldType::PositiveInt),
    FieldRule::optional("course", FieldType::Str),
];

const LESSON_FIELDS: &[FieldRule] = &[
    FieldRule::required("title", FieldType::Str),
    FieldRule::optional("course", FieldType::Str),
    FieldRule::optional("module", FieldType::Reference(Category::CourseModules)),
    FieldRule::optional("moduleOrder", FieldType::PositiveInt),
    FieldRule::optional("order", FieldType::PositiveInt),
    FieldRule::optional("description", FieldType::Str),
    FieldRule::optional("url", FieldType::Url),
];

// ============================================================================
// Content Store
// ============================================================================

/// All validated content of one build pass. Immutable once loaded.
#[derive(Debug, Default)]
pub struct ContentStore {
    pub pages: Vec<Entry<Page>>,
    pub jobs: Vec<Entry<Job>>,
    pub links: Vec<Entry<Link>>,
    pub posts: Vec<Entry<Post>>,
    pub series: Vec<Entry<Series>>,
    pub notes: Vec<Entry<CourseNote>>,
    pub modules: Vec<Entry<CourseModule>>,
    pub lessons: Vec<Entry<LessonNote>>,
}

impl ContentStore {
    /// Discover, validate and deserialize every collection under
    /// `content_root`.
    ///
    /// The cross-reference lookup (series ids, module ids) is built before
    /// any document is validated, so reference order between files does not
    /// matter. Any schema violation aborts the whole load.
    pub fn load(content_root: &Path) -> Result<Self> {
        let mut raw: Vec<Vec<(SourceFile, Value)>> = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            raw.push(read_collection(category, content_root)?);
        }

        let mut refs = RefResolver::new();
        for (category, docs) in Category::ALL.iter().zip(&raw) {
            if matches!(category, Category::Series | Category::CourseModules) {
                refs.insert(*category, docs.iter().map(|(file, _)| file.id.clone()));
            }
        }

        let mut store = Self::default();
        for (category, docs) in Category::ALL.into_iter().zip(raw) {
            match category {
                Category::Pages => store.pages = validate_collection(category, docs, &refs)?,
                Category::Jobs => store.jobs = validate_collection(category, docs, &refs)?,
                Category::Links => store.links = validate_collection(category, docs, &refs)?,
                Category::Posts => store.posts = validate_collection(category, docs, &refs)?,
                Category::Series => store.series = validate_collection(category, docs, &refs)?,
                Category::Notes => store.notes = validate_collection(category, docs, &refs)?,
                Category::CourseModules => {
                    store.modules = validate_collection(category, docs, &refs)?;
                }
                Category::LessonNotes => {
                    store.lessons = validate_collection(category, docs, &refs)?;
                }
            }
        }

        Ok(store)
    }

    /// Entry counts per collection, in [`Category::ALL`] order.
    pub fn counts(&self) -> [(&'static str, usize); 8] {
        [
            ("pages", self.pages.len()),
            ("jobs", self.jobs.len()),
            ("links", self.links.len()),
            ("posts", self.posts.len()),
            ("series", self.series.len()),
            ("notes", self.notes.len()),
            ("courseModules", self.modules.len()),
            ("lessonNotes", self.lessons.len()),
        ]
    }

    /// Total number of validated entries.
    pub fn len(&self) -> usize {
        self.counts().iter().map(|(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Discover and parse one collection's raw documents.
fn read_collection(
    category: Category,
    content_root: &Path,
) -> Result<Vec<(SourceFile, Value)>> {
    let files = category.loader().discover(content_root)?;
    let mut docs = Vec::with_capacity(files.len());
    for file in files {
        let value = document::read_document(&file.path)?;
        docs.push((file, value));
    }
    Ok(docs)
}

/// Validate raw documents against the category schema and deserialize them.
fn validate_collection<T: DeserializeOwned>(
    category: Category,
    docs: Vec<(SourceFile, Value)>,
    refs: &RefResolver,
) -> Result<Vec<Entry<T>>> {
    let mut entries = Vec::with_capacity(docs.len());
    let schema = category.schema();

    for (file, value) in docs {
        schema.validate(&value, refs).with_context(|| {
            format!("invalid {} document `{}`", category.name(), file.id)
        })?;

        let data: T = serde_yaml::from_value(value).with_context(|| {
            format!(
                "failed to deserialize {} document `{}`",
                category.name(),
                file.id
            )
        })?;

        entries.push(Entry { id: file.id, data });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::records::JobEnd;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, body: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    /// A small but complete content tree covering every collection.
    ///
    /// Lesson index files satisfy both the `notes` and `lessonNotes`
    /// schemas, because the two collections deliberately share a base
    /// directory and the `**/index` pattern matches lesson files too.
    fn fixture() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write(
            root,
            "pages/about.md",
            "---\ntitle: About\nseo:\n  title: About\n  description: About me\n---\n",
        );
        write(
            root,
            "jobs/acme.md",
            "---\ntitle: Engineer\ncompany: Acme\nlocation: Remote\nfrom: 2019\nto: Now\n---\n",
        );
        write(
            root,
            "links/social.yml",
            "label: GitHub\nname: cupofcraft\nurl: https://github.com/cupofcraft\n",
        );
        write(
            root,
            "series/rust-basics.md",
            "---\ntitle: Rust Basics\nseo:\n  title: Rust Basics\n  description: A series\n---\n",
        );
        write(
            root,
            "posts/hello.md",
            "---\ntitle: Hello\ndate: 2024-01-15\nseo:\n  title: Hello\n  description: First post\nseries:\n  ref: rust-basics\n  number: 1\n---\n",
        );
        write(
            root,
            "modules/ownership.md",
            "---\ntitle: Ownership\norder: 1\n---\n",
        );
        write(
            root,
            "notes/course-a/index.md",
            "---\ntitle: Course A\nauthor: Jane\nurl: https://courses.dev/a\ndescription: Notes\n---\n",
        );
        write(
            root,
            "notes/course-a/lesson/intro/index.md",
            "---\ntitle: Intro\nauthor: Jane\nurl: https://courses.dev/a/intro\ndescription: Lesson notes\nmodule: ownership\nmoduleOrder: 1\norder: 1\n---\n",
        );

        dir
    }

    #[test]
    fn test_load_full_tree() {
        let dir = fixture();
        let store = ContentStore::load(dir.path()).unwrap();

        assert_eq!(store.pages.len(), 1);
        assert_eq!(store.jobs.len(), 1);
        assert_eq!(store.links.len(), 1);
        assert_eq!(store.posts.len(), 1);
        assert_eq!(store.series.len(), 1);
        // lesson index files match the notes pattern too
        assert_eq!(store.notes.len(), 2);
        assert_eq!(store.modules.len(), 1);
        assert_eq!(store.lessons.len(), 1);

        assert_eq!(store.jobs[0].data.to, JobEnd::Now);
        assert_eq!(
            store.posts[0].data.series.as_ref().unwrap().id,
            "rust-basics"
        );
        assert_eq!(store.lessons[0].id, "course-a/lesson/intro/index");
        assert_eq!(
            store.lessons[0].data.module.as_deref(),
            Some("ownership")
        );
        assert_eq!(store.len(), 9);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_load_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContentStore::load(dir.path()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_dangling_series_reference_fails() {
        let dir = fixture();
        write(
            dir.path(),
            "posts/broken.md",
            "---\ntitle: Broken\ndate: 2024-02-01\nseo:\n  title: Broken\n  description: x\nseries:\n  ref: no-such-series\n  number: 1\n---\n",
        );

        let err = ContentStore::load(dir.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("posts document `broken`"), "{message}");
        assert!(message.contains("no-such-series"), "{message}");
    }

    #[test]
    fn test_post_without_series_is_valid() {
        let dir = fixture();
        write(
            dir.path(),
            "posts/standalone.md",
            "---\ntitle: Standalone\ndate: 2024-03-01\nseo:\n  title: Standalone\n  description: x\n---\n",
        );

        let store = ContentStore::load(dir.path()).unwrap();
        assert_eq!(store.posts.len(), 2);
    }

    #[test]
    fn test_dangling_module_reference_fails() {
        let dir = fixture();
        write(
            dir.path(),
            "notes/course-a/lesson/orphan/index.md",
            "---\ntitle: Orphan\nauthor: Jane\nurl: https://courses.dev/a/orphan\ndescription: x\nmodule: no-such-module\n---\n",
        );

        let err = ContentStore::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("no-such-module"));
    }

    #[test]
    fn test_missing_required_field_aborts_load() {
        let dir = fixture();
        // job without `location`
        write(
            dir.path(),
            "jobs/bad.md",
            "---\ntitle: Engineer\ncompany: Acme\nfrom: 2015\nto: 2019\n---\n",
        );

        let err = ContentStore::load(dir.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("jobs document `bad`"), "{message}");
        assert!(message.contains("location"), "{message}");
    }

    #[test]
    fn test_non_positive_order_aborts_load() {
        let dir = fixture();
        write(
            dir.path(),
            "modules/bad.md",
            "---\ntitle: Bad Module\norder: 0\n---\n",
        );

        let err = ContentStore::load(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("order"));
    }

    #[test]
    fn test_category_names() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            [
                "pages",
                "jobs",
                "links",
                "posts",
                "series",
                "notes",
                "courseModules",
                "lessonNotes"
            ]
        );
    }
}
