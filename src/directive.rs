use std::env;
use std::path::{Component, Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::post::{BodyItem, Directive};

/// Classifies one paragraph of a commit message.
///
/// `!file <path>` and `!code <path>` embed a source file, `!md <path>` embeds
/// a markdown file. Anything else is kept as plain text, untouched.
pub fn parse_paragraph(repo_path: &Path, paragraph: &str) -> BodyItem {
    match extract_directive(paragraph) {
        Some((kind, path)) => BodyItem::Directive(Directive {
            path: path.to_string(),
            real_path: resolve_path(repo_path, path),
            is_markdown: kind == "md",
        }),
        None => BodyItem::PlainText(paragraph.to_string()),
    }
}

fn extract_directive(paragraph: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref DIRECTIVE_REGEX: Regex = Regex::new(
            r"(?s)\A!(?P<kind>file|code|md)\s+(?P<path>.*)\z"
        ).unwrap();
    }

    let cap = DIRECTIVE_REGEX.captures(paragraph)?;
    let kind = cap.name("kind")?.as_str();
    let path = cap.name("path")?.as_str().trim();
    if path.is_empty() {
        return None;
    }
    Some((kind, path))
}

/// Joins `path` onto the repository path and makes it absolute, removing `.`
/// and `..` lexically. The file is not required to exist.
pub fn resolve_path(repo_path: &Path, path: &str) -> PathBuf {
    absolute_path(&repo_path.join(path))
}

pub fn absolute_path(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_directive() {
        let item = parse_paragraph(Path::new("/srv/blog"), "!code src/main.rs");
        assert_eq!(item, BodyItem::Directive(Directive {
            path: "src/main.rs".to_string(),
            real_path: PathBuf::from("/srv/blog/src/main.rs"),
            is_markdown: false,
        }));
    }

    #[test]
    fn test_file_directive_trims_path() {
        let item = parse_paragraph(Path::new("/srv/blog"), "!file \t  notes/todo.txt  \n");
        let BodyItem::Directive(directive) = item else {
            panic!("expected a directive");
        };
        assert_eq!(directive.path, "notes/todo.txt");
        assert_eq!(directive.real_path, PathBuf::from("/srv/blog/notes/todo.txt"));
        assert!(!directive.is_markdown);
    }

    #[test]
    fn test_md_directive() {
        let item = parse_paragraph(Path::new("/srv/blog"), "!md README.md");
        let BodyItem::Directive(directive) = item else {
            panic!("expected a directive");
        };
        assert!(directive.is_markdown);
        assert_eq!(directive.path, "README.md");
    }

    #[test]
    fn test_plain_text() {
        let para = "Just some text\n!code inside is not a directive";
        assert_eq!(parse_paragraph(Path::new("/srv"), para), BodyItem::PlainText(para.to_string()));
        assert_eq!(parse_paragraph(Path::new("/srv"), "!code"), BodyItem::PlainText("!code".to_string()));
        assert_eq!(parse_paragraph(Path::new("/srv"), "!filename x"), BodyItem::PlainText("!filename x".to_string()));
        assert_eq!(parse_paragraph(Path::new("/srv"), " !md a.md"), BodyItem::PlainText(" !md a.md".to_string()));
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(resolve_path(Path::new("/srv/blog"), "../other/a.rs"), PathBuf::from("/srv/other/a.rs"));
        assert_eq!(resolve_path(Path::new("/srv/./blog"), "./a.rs"), PathBuf::from("/srv/blog/a.rs"));

        let relative = resolve_path(Path::new("blog"), "a.rs");
        assert!(relative.is_absolute());
        assert!(relative.ends_with("blog/a.rs"));
    }
}
