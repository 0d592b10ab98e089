//! Slug and route derivation from entry ids.
//!
//! Entry ids mirror the source tree, e.g. `course-a/lesson/intro/index`.
//! These helpers turn them into the slugs and route paths the page
//! templates link to.

/// Slug of a post: the last path segment, after stripping a trailing
/// `/index`.
///
/// `foo/bar/index` → `bar`; `standalone` → `standalone`.
pub fn post_slug_from_id(post_id: &str) -> &str {
    let without_index = strip_index(post_id);
    without_index
        .rsplit('/')
        .next()
        .unwrap_or(without_index)
}

/// Route components derived from a lesson entry id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRouteInfo {
    /// First path segment
    pub course_slug: String,
    /// Segments after the literal `lesson` segment when one exists,
    /// otherwise everything after the course slug
    pub lesson_segments: Vec<String>,
    /// Last path segment
    pub lesson_slug: String,
    /// Always `["lesson", <lesson_slug>]`
    pub lesson_path_segments: Vec<String>,
    /// `lesson/<lesson_slug>`
    pub lesson_path: String,
}

/// Derive lesson route info from an entry id.
///
/// When the id ends in a bare `lesson` segment, `lesson_segments` comes out
/// empty and the slug is the literal `lesson`. That asymmetry matches the
/// route layout the templates were built against; see the tests before
/// changing it.
pub fn lesson_route_info_from_id(lesson_id: &str) -> LessonRouteInfo {
    let sanitized = strip_index(lesson_id);
    let parts: Vec<&str> = sanitized.split('/').collect();

    // split always yields at least one element
    let course_slug = parts.first().copied().unwrap_or_default().to_owned();
    let lesson_index = parts.iter().position(|part| *part == "lesson");

    let lesson_segments: Vec<String> = match lesson_index {
        Some(index) => parts[index + 1..].iter().map(|s| (*s).to_owned()).collect(),
        None => parts[1..].iter().map(|s| (*s).to_owned()).collect(),
    };

    let lesson_slug = parts.last().copied().unwrap_or_default().to_owned();
    let lesson_path_segments = vec!["lesson".to_owned(), lesson_slug.clone()];
    let lesson_path = lesson_path_segments.join("/");

    LessonRouteInfo {
        course_slug,
        lesson_segments,
        lesson_slug,
        lesson_path_segments,
        lesson_path,
    }
}

fn strip_index(id: &str) -> &str {
    id.strip_suffix("/index").unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_slug_strips_index() {
        assert_eq!(post_slug_from_id("foo/bar/index"), "bar");
    }

    #[test]
    fn test_post_slug_standalone() {
        assert_eq!(post_slug_from_id("standalone"), "standalone");
    }

    #[test]
    fn test_post_slug_plain_nested() {
        assert_eq!(post_slug_from_id("2024/deep/hello"), "hello");
    }

    #[test]
    fn test_post_slug_bare_index() {
        // no `/index` suffix to strip, single segment
        assert_eq!(post_slug_from_id("index"), "index");
    }

    #[test]
    fn test_lesson_route_info_typical() {
        let info = lesson_route_info_from_id("course-a/lesson/intro/index");
        assert_eq!(info.course_slug, "course-a");
        assert_eq!(info.lesson_segments, ["intro"]);
        assert_eq!(info.lesson_slug, "intro");
        assert_eq!(info.lesson_path_segments, ["lesson", "intro"]);
        assert_eq!(info.lesson_path, "lesson/intro");
    }

    #[test]
    fn test_lesson_route_info_nested_lesson() {
        let info = lesson_route_info_from_id("course-a/lesson/unit-2/setup/index");
        assert_eq!(info.course_slug, "course-a");
        assert_eq!(info.lesson_segments, ["unit-2", "setup"]);
        assert_eq!(info.lesson_slug, "setup");
        assert_eq!(info.lesson_path, "lesson/setup");
    }

    #[test]
    fn test_lesson_route_info_without_lesson_segment() {
        // fallback branch: everything after the course slug
        let info = lesson_route_info_from_id("course-a/intro/index");
        assert_eq!(info.course_slug, "course-a");
        assert_eq!(info.lesson_segments, ["intro"]);
        assert_eq!(info.lesson_slug, "intro");
    }

    #[test]
    fn test_lesson_route_info_lesson_at_end_edge_case() {
        // Known asymmetry, preserved on purpose: a trailing bare `lesson`
        // segment leaves lesson_segments empty and makes the slug the
        // literal "lesson", composing the odd path `lesson/lesson`.
        let info = lesson_route_info_from_id("course-a/lesson");
        assert_eq!(info.course_slug, "course-a");
        assert!(info.lesson_segments.is_empty());
        assert_eq!(info.lesson_slug, "lesson");
        assert_eq!(info.lesson_path, "lesson/lesson");
    }

    #[test]
    fn test_lesson_route_info_single_segment() {
        let info = lesson_route_info_from_id("orphan");
        assert_eq!(info.course_slug, "orphan");
        assert!(info.lesson_segments.is_empty());
        assert_eq!(info.lesson_slug, "orphan");
        assert_eq!(info.lesson_path, "lesson/orphan");
    }
}
