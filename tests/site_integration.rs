use std::fs;
use std::path::{Path, PathBuf};

use git2::{Commit, Oid, Repository, Signature, Time};
use tempfile::TempDir;

use slag::aggregator::Aggregate;
use slag::config::SiteOptions;
use slag::error::{ContentError, RenderError};
use slag::paginator::PageDocument;
use slag::post::Post;
use slag::site::{build_site, plan, SiteReport};
use slag::view::list_renderer::ListRenderer;
use slag::view::PageRenderer;

fn commit_at(repo: &Repository, message: &str, secs: i64) -> Oid {
    let sig = Signature::new("Test Author", "author@example.com", &Time::new(secs, 0)).unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parent = repo.head().ok()
        .and_then(|head| head.target())
        .map(|oid| repo.find_commit(oid).unwrap());
    let parents: Vec<&Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).unwrap()
}

fn create_repo(path: &Path, commits: &[(&str, i64)]) -> Vec<Oid> {
    fs::create_dir_all(path).unwrap();
    let repo = Repository::init(path).unwrap();
    commits.iter()
        .map(|(message, secs)| commit_at(&repo, message, *secs))
        .collect()
}

/// Two repositories, "a" with 3 commits and "b" with 2, interleaved in time.
fn two_repos(root: &Path) -> (PathBuf, PathBuf) {
    let a = root.join("a");
    let b = root.join("b");
    create_repo(&a, &[("a one\n\nfirst body", 100), ("a two", 300), ("a three", 500)]);
    create_repo(&b, &[("b one", 200), ("b two\n\n!md notes.md", 400)]);
    (a, b)
}

fn options(paths: Vec<PathBuf>, target: &Path) -> SiteOptions {
    SiteOptions {
        baseurl: "".to_string(),
        target: target.to_path_buf(),
        include: vec![],
        page_size: 2,
        max_paragraphs: 1,
        paths,
        rss_feed: None,
    }
}

struct Recorder;

impl PageRenderer for Recorder {
    fn render(&self, doc: &PageDocument<'_, Post>) -> Result<String, RenderError> {
        let titles: Vec<&str> = doc.items.iter().map(|p| p.title.as_str()).collect();
        Ok(format!("{}|{}|{}", doc.title, doc.current_page, titles.join(",")))
    }
}

#[test]
fn test_two_repositories() {
    let root = TempDir::new().unwrap();
    let (a, b) = two_repos(root.path());

    let aggregate = Aggregate::collect(&[&a, &b]);
    assert!(aggregate.failures.is_empty());

    let titles: Vec<&str> = aggregate.all_posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["a three", "b two", "a two", "b one", "a one"]);

    let documents = plan(&aggregate, 2).unwrap();
    let pages: Vec<(&str, usize)> = documents.iter()
        .take(6)
        .map(|d| (d.filename.as_str(), d.items.len()))
        .collect();
    assert_eq!(pages, [
        ("a.html", 2), ("a-2.html", 1),
        ("b.html", 2),
        ("index.html", 2), ("page-2.html", 2), ("page-3.html", 1),
    ]);

    let permalinks: Vec<String> = documents[6..].iter().map(|d| d.filename.clone()).collect();
    let expected: Vec<String> = aggregate.all_posts.iter().map(|p| format!("{}.html", p.hash)).collect();
    assert_eq!(permalinks, expected);
}

#[test]
fn test_extraction_is_repeatable() {
    let root = TempDir::new().unwrap();
    let (a, b) = two_repos(root.path());

    let first = Aggregate::collect(&[&a, &b]);
    let second = Aggregate::collect(&[&a, &b]);
    assert_eq!(first.all_posts, second.all_posts);
}

#[test]
fn test_build_site_skips_bad_repository() {
    let root = TempDir::new().unwrap();
    let (a, _) = two_repos(root.path());
    let not_a_repo = TempDir::new().unwrap();
    let target = root.path().join("out");

    let report = build_site(&options(vec![not_a_repo.path().to_path_buf(), a.clone()], &target), &Recorder).unwrap();
    // 2 pages of "a", 2 of the combined feed and 3 permalinks
    assert_eq!(report, SiteReport { documents: 7, skipped_repositories: 1 });

    assert_eq!(fs::read_to_string(target.join("index.html")).unwrap(), "/||a three,a two");
    assert_eq!(fs::read_to_string(target.join("page-2.html")).unwrap(), "/ #2|page-2.html|a one");
    assert_eq!(fs::read_to_string(target.join("a-2.html")).unwrap(), "/a #2|a-2.html|a one");
    assert!(target.join("css/slag.css").is_file());
}

#[test]
fn test_build_site_with_templates() {
    let root = TempDir::new().unwrap();
    let (a, b) = two_repos(root.path());
    fs::write(b.join("notes.md"), "Some **notes**").unwrap();
    let target = root.path().join("out");

    let opts = options(vec![a, b], &target);
    let renderer = ListRenderer::bundled("/blog", 1).unwrap();
    let report = build_site(&opts, &renderer).unwrap();
    assert_eq!(report.documents, 11);

    for name in ["a.html", "a-2.html", "b.html", "index.html", "page-2.html", "page-3.html"] {
        assert!(target.join(name).is_file(), "missing {}", name);
    }

    let index = fs::read_to_string(target.join("index.html")).unwrap();
    assert!(index.contains("a three"));
    assert!(index.contains("<strong>notes</strong>"));
    assert!(index.contains("/blog/page-2.html"));
}

#[test]
fn test_unreadable_directive_fails_rendering_only() {
    let root = TempDir::new().unwrap();
    let repo = root.path().join("code");
    create_repo(&repo, &[("Show code\n\n!code src/missing.rs", 100)]);

    // Extraction does not look at the file
    let aggregate = Aggregate::collect(&[&repo]);
    assert_eq!(aggregate.all_posts.len(), 1);

    let renderer = ListRenderer::bundled("", 1).unwrap();
    let documents = plan(&aggregate, 16).unwrap();
    let err = renderer.render(&documents[0]).err().unwrap();
    match err {
        RenderError::Content(ContentError::DirectiveContentUnreadable { path, .. }) => {
            assert!(path.ends_with("code/src/missing.rs"));
        }
        other => panic!("unexpected error {:?}", other),
    }

    let target = root.path().join("out");
    assert!(build_site(&options(vec![repo], &target), &renderer).is_err());
}
