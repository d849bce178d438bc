//! The target project layout, compiled in.
//!
//! Every path here is relative to the project root. Nothing is read from a
//! config file; changing the layout means changing these tables.

/// Top-level directories whose names are lowercased in place.
pub const TOP_LEVEL_DIRS: &[&str] = &["Algorithms", "Datasets", "Instance", "Website_Results"];

/// Container that holds the two asset directories before relocation.
pub const CONTAINER_DIR: &str = "Frontend";

/// (source under the container, top-level destination)
pub const RELOCATIONS: &[(&str, &str)] = &[
    ("Frontend/Templates", TEMPLATES_DIR),
    ("Frontend/Static", STATIC_DIR),
];

pub const TEMPLATES_DIR: &str = "templates";
pub const STATIC_DIR: &str = "static";

/// Renames applied inside the relocated static directory.
///
/// `JS Files` is not a case-only change; it still goes through the case-safe
/// renamer so a half-finished earlier run is recovered the same way.
pub const STATIC_RENAMES: &[(&str, &str)] = &[
    ("static/Css", "static/css"),
    ("static/Images", "static/images"),
    ("static/JS Files", "static/js"),
];

/// Source files whose path references are rewritten.
pub const SOURCE_FILES: &[&str] = &["app.py", "original_lightgcn.py"];

/// Literal rewrites for source files, applied in order.
pub const SOURCE_REWRITES: &[(&str, &str)] = &[
    ("Datasets/", "datasets/"),
    ("Frontend/Templates", "templates"),
    ("Frontend/Static", "static"),
    ("'/Static'", "'/static'"),
];

/// Opening of a `Flask(__name__, ...)` constructor call. The argument list
/// runs to the matching `)`, across lines and nested calls.
pub const APP_INIT_OPENER: &str = r"Flask\(__name__";
pub const APP_INIT_CANONICAL: &str = "Flask(__name__)";

/// Markup files under the templates directory are picked by this suffix.
pub const MARKUP_SUFFIX: &str = ".html";

/// Literal rewrites for markup files. Most specific first: the last rule's
/// pattern is a prefix of every other pattern.
pub const MARKUP_REWRITES: &[(&str, &str)] = &[
    ("/Static/JS Files/", "/static/js/"),
    ("/Static/Css/", "/static/css/"),
    ("/Static/Images/", "/static/images/"),
    ("/Static/", "/static/"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_dirs_have_distinct_lowercase_forms() {
        let mut lowered: Vec<String> = TOP_LEVEL_DIRS.iter().map(|d| d.to_lowercase()).collect();
        lowered.sort();
        lowered.dedup();
        assert_eq!(lowered.len(), TOP_LEVEL_DIRS.len());
    }

    #[test]
    fn generic_markup_rule_runs_last() {
        let (generic, _) = MARKUP_REWRITES[MARKUP_REWRITES.len() - 1];
        for (pattern, _) in &MARKUP_REWRITES[..MARKUP_REWRITES.len() - 1] {
            assert!(pattern.starts_with(generic));
        }
    }

    #[test]
    fn relocations_come_from_the_container() {
        for (from, _) in RELOCATIONS {
            assert!(from.starts_with(&format!("{}/", CONTAINER_DIR)));
        }
    }
}
