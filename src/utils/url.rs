//! URL construction and navigation path matching.

/// Concatenate the site base URL with a path.
///
/// Plain concatenation, exactly like the rendered templates expect: no
/// deduplication of slashes, the caller owns the separators.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let mut url = String::with_capacity(base_url.len() + path.len());
    url.push_str(base_url);
    url.push_str(path);
    url
}

/// True when `current_path` lives on or under `target_path`.
///
/// Both paths are normalized first: a leading slash is ensured and a
/// trailing slash is stripped unless the path is the root. A match is
/// either exact or a prefix followed by `/`, so `/blog` highlights for
/// `/blog/post-1` but not for `/blogging`. The root path matches only the
/// exact root.
pub fn is_current(current_path: &str, target_path: &str) -> bool {
    let target = normalize(target_path);
    let current = normalize(current_path);

    if target == "/" {
        return current == "/";
    }

    current == target
        || current
            .strip_prefix(target.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Ensure a leading slash; strip a trailing slash unless the path is `/`.
fn normalize(path: &str) -> String {
    let mut normalized = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_concatenates() {
        assert_eq!(
            absolute_url("https://cupofcraft.dev", "/posts/hello"),
            "https://cupofcraft.dev/posts/hello"
        );
    }

    #[test]
    fn test_absolute_url_no_slash_normalization() {
        // duplicate slashes pass through untouched
        assert_eq!(
            absolute_url("https://cupofcraft.dev/", "/posts"),
            "https://cupofcraft.dev//posts"
        );
    }

    #[test]
    fn test_is_current_nested_route() {
        assert!(is_current("/blog/post-1", "/blog"));
    }

    #[test]
    fn test_is_current_rejects_sibling_prefix() {
        assert!(!is_current("/blogging", "/blog"));
    }

    #[test]
    fn test_is_current_exact_root() {
        assert!(is_current("/", "/"));
        assert!(!is_current("/about", "/"));
    }

    #[test]
    fn test_is_current_normalizes_both_sides() {
        assert!(is_current("/about/", "about"));
        assert!(is_current("about", "/about/"));
    }

    #[test]
    fn test_is_current_exact_match() {
        assert!(is_current("/blog", "/blog"));
    }

    #[test]
    fn test_is_current_deeply_nested() {
        assert!(is_current("/notes/course-a/lesson/intro", "/notes"));
        assert!(!is_current("/notes", "/notes/course-a"));
    }
}
