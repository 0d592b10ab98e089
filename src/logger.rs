//! Logging utilities with colored module prefixes.
//!
//! The `log!` macro prints a message prefixed with a bracketed, colored
//! module name:
//!
//! ```ignore
//! log!("check"; "validated {} documents", count);
//! // [check] validated 42 documents
//! ```

use colored::{ColoredString, Colorize};
use std::io::{Write, stdout};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_bracketed() {
        // Colors may be stripped in non-tty test runs, but the bracketed
        // module name must always be present.
        let prefix = colorize_prefix("check").to_string();
        assert!(prefix.contains("[check]"));
    }

    #[test]
    fn test_prefix_case_insensitive_lookup() {
        let upper = colorize_prefix("SERVE").to_string();
        assert!(upper.contains("[SERVE]"));
    }
}
