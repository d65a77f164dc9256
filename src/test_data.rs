#![cfg(test)]

use std::fs;
use std::path::Path;

use git2::{Commit, Oid, Repository, Signature, Time};

use crate::post::{Author, BodyItem, Post};

pub const POST_MESSAGE: &str = "Parsing commit messages

Each paragraph of the message becomes a paragraph of the post.
The first one is the title.

!code src/post.rs

Rendering uses *markdown*.
";

pub fn sample_post(repo: &str, time: i64, hash: &str) -> Post {
    Post {
        repo: repo.to_string(),
        title: format!("Post {}", hash),
        body: vec![BodyItem::PlainText("Body".to_string())],
        time,
        author: Author {
            name: "Test Author".to_string(),
            email: "author@example.com".to_string(),
        },
        hash: hash.to_string(),
    }
}

pub fn init_repo(path: &Path) -> Repository {
    fs::create_dir_all(path).unwrap();
    Repository::init(path).unwrap()
}

/// Commits the current index on top of HEAD with author and committer time `secs`.
pub fn commit_at(repo: &Repository, message: &str, secs: i64) -> Oid {
    let sig = Signature::new("Test Author", "author@example.com", &Time::new(secs, 0)).unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parent = repo.head().ok()
        .and_then(|head| head.target())
        .map(|oid| repo.find_commit(oid).unwrap());
    let parents: Vec<&Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).unwrap()
}
