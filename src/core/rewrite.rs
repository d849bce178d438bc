//! Lexical path-reference rewriting for source and markup files.
//!
//! Rules compose in order: each one sees the output of the previous one.
//! Nothing here understands the languages involved, so a coincidental
//! substring match is rewritten like any other.

use crate::core::error::{RelayoutError, fs_err};
use crate::core::layout;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static APP_INIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(layout::APP_INIT_OPENER).expect("static regex"));

#[derive(Debug, Clone)]
pub enum Rule {
    Literal {
        pattern: &'static str,
        replacement: &'static str,
    },
    /// Replaces a whole call. `opener` matches the head of the call with its
    /// `(`; the span then runs to the balancing `)`.
    Call {
        opener: &'static Regex,
        replacement: &'static str,
    },
}

impl Rule {
    pub fn apply(&self, input: &str) -> String {
        match self {
            Rule::Literal {
                pattern,
                replacement,
            } => input.replace(*pattern, replacement),
            Rule::Call {
                opener,
                replacement,
            } => collapse_calls(input, opener, replacement),
        }
    }
}

/// Byte offset just past the `)` closing the paren opened before `from`.
fn balancing_paren(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, b) in text.as_bytes()[from..].iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

fn collapse_calls(input: &str, opener: &Regex, replacement: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;
    while let Some(m) = opener.find_at(input, cursor) {
        // An unterminated call is left as written, along with the rest.
        let Some(end) = balancing_paren(input, m.end()) else {
            break;
        };
        out.push_str(&input[cursor..m.start()]);
        out.push_str(replacement);
        cursor = end;
    }
    out.push_str(&input[cursor..]);
    out
}

fn literal_rules(table: &[(&'static str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .map(|&(pattern, replacement)| Rule::Literal {
            pattern,
            replacement,
        })
        .collect()
}

/// Rules for the named source files: literal prefixes, then the app
/// constructor normalization.
pub fn source_rules() -> Vec<Rule> {
    let mut rules = literal_rules(layout::SOURCE_REWRITES);
    rules.push(Rule::Call {
        opener: LazyLock::force(&APP_INIT),
        replacement: layout::APP_INIT_CANONICAL,
    });
    rules
}

/// Rules for markup files, most specific URL prefix first.
pub fn markup_rules() -> Vec<Rule> {
    literal_rules(layout::MARKUP_REWRITES)
}

pub fn apply_rules(rules: &[Rule], content: &str) -> String {
    rules
        .iter()
        .fold(content.to_string(), |acc, rule| rule.apply(&acc))
}

fn read_text(path: &Path) -> Result<String, RelayoutError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::InvalidData {
            RelayoutError::EncodingError(path.to_path_buf())
        } else {
            fs_err("read", path)(e)
        }
    })
}

/// Rewrite `path` in place. The file is always written back, even when no
/// rule matched. Returns whether the content changed.
pub fn rewrite_file(path: &Path, rules: &[Rule]) -> Result<bool, RelayoutError> {
    let original = read_text(path)?;
    let rewritten = apply_rules(rules, &original);
    fs::write(path, &rewritten).map_err(fs_err("write", path))?;
    Ok(rewritten != original)
}

/// All files under `dir` whose name ends with `suffix`, sorted.
pub fn collect_files_with_suffix(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, RelayoutError> {
    let mut out = Vec::new();
    if dir.is_dir() {
        walk(dir, suffix, &mut out)?;
    }
    out.sort();
    Ok(out)
}

fn walk(dir: &Path, suffix: &str, out: &mut Vec<PathBuf>) -> Result<(), RelayoutError> {
    for entry in fs::read_dir(dir).map_err(fs_err("list", dir))? {
        let entry = entry.map_err(fs_err("list", dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(fs_err("inspect", &path))?;
        if file_type.is_dir() {
            walk(&path, suffix, out)?;
        } else if path.is_file() && entry.file_name().to_string_lossy().ends_with(suffix) {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_markup_specific_prefixes_win() {
        let html = r#"<link href="/Static/Css/x.css"><img src="/Static/y.png">"#;
        let out = apply_rules(&markup_rules(), html);
        assert_eq!(
            out,
            r#"<link href="/static/css/x.css"><img src="/static/y.png">"#
        );
    }

    #[test]
    fn test_markup_script_folder_with_space() {
        let html = r#"<script src="/Static/JS Files/app.js"></script>"#;
        let out = apply_rules(&markup_rules(), html);
        assert!(out.contains("/static/js/app.js"));
        assert!(!out.contains("/Static/"));
    }

    #[test]
    fn test_markup_images() {
        let out = apply_rules(&markup_rules(), "url(/Static/Images/bg.jpg)");
        assert_eq!(out, "url(/static/images/bg.jpg)");
    }

    #[test]
    fn test_markup_rules_are_idempotent() {
        let once = apply_rules(&markup_rules(), "/Static/Css/a.css /Static/b.png");
        let twice = apply_rules(&markup_rules(), &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_source_literal_rewrites() {
        let src = "df = load('Datasets/ml-100k')\nT = 'Frontend/Templates'\nS = 'Frontend/Static'\nURL = '/Static'\n";
        let out = apply_rules(&source_rules(), src);
        assert_eq!(
            out,
            "df = load('datasets/ml-100k')\nT = 'templates'\nS = 'static'\nURL = '/static'\n"
        );
    }

    #[test]
    fn test_app_init_collapses_multiline_arguments() {
        let src = "app = Flask(__name__,\n            template_folder='Frontend/Templates',\n            static_folder='Frontend/Static',\n            static_url_path='/Static')\napp.run()\n";
        let out = apply_rules(&source_rules(), src);
        assert_eq!(out, "app = Flask(__name__)\napp.run()\n");
    }

    #[test]
    fn test_app_init_with_nested_call() {
        let src = "app = Flask(__name__, root_path=os.path.join(BASE, 'web'))\n";
        let out = apply_rules(&source_rules(), src);
        assert_eq!(out, "app = Flask(__name__)\n");
    }

    #[test]
    fn test_app_init_with_deeply_nested_multiline_call() {
        let src = "app = Flask(__name__, root_path=os.path.dirname(os.path.abspath(__file__)),\n    template_folder='Frontend/Templates')\napp.run(debug=True)\n";
        let out = apply_rules(&source_rules(), src);
        assert_eq!(out, "app = Flask(__name__)\napp.run(debug=True)\n");
    }

    #[test]
    fn test_app_init_unterminated_is_left_alone() {
        let src = "app = Flask(__name__, static_folder=join('a', 'b'\n";
        assert_eq!(apply_rules(&source_rules(), src), src);
    }

    #[test]
    fn test_app_init_collapses_every_call() {
        let src = "a = Flask(__name__, x=f(1))\nb = Flask(__name__, y=g(h(2)))\n";
        let out = apply_rules(&source_rules(), src);
        assert_eq!(out, "a = Flask(__name__)\nb = Flask(__name__)\n");
    }

    #[test]
    fn test_app_init_canonical_form_is_stable() {
        let src = "app = Flask(__name__)\n";
        assert_eq!(apply_rules(&source_rules(), src), src);
    }

    #[test]
    fn test_rewrite_file_reports_change() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("index.html");
        fs::write(&path, "<img src=\"/Static/logo.png\">").unwrap();
        assert!(rewrite_file(&path, &markup_rules()).unwrap());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<img src=\"/static/logo.png\">"
        );
        assert!(!rewrite_file(&path, &markup_rules()).unwrap());
    }

    #[test]
    fn test_rewrite_file_rejects_non_utf8() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("app.py");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();
        let err = rewrite_file(&path, &source_rules()).unwrap_err();
        assert!(matches!(err, RelayoutError::EncodingError(_)));
    }

    #[test]
    fn test_collect_files_recurses_and_filters() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("templates");
        fs::create_dir_all(root.join("admin/partials")).unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        fs::write(root.join("admin/partials/nav.html"), "").unwrap();
        fs::write(root.join("admin/readme.txt"), "").unwrap();
        fs::write(root.join("page.HTML"), "").unwrap();

        let files = collect_files_with_suffix(&root, ".html").unwrap();
        assert_eq!(
            files,
            vec![root.join("admin/partials/nav.html"), root.join("index.html")]
        );
    }

    #[test]
    fn test_collect_files_missing_dir_is_empty() {
        let tmp = tempdir().unwrap();
        let files = collect_files_with_suffix(&tmp.path().join("templates"), ".html").unwrap();
        assert!(files.is_empty());
    }
}
