use std::path::{Path, PathBuf};

use git2::{Commit, Repository, Sort};
use spdlog::debug;

use crate::directive::{absolute_path, parse_paragraph};
use crate::error::ExtractError;
use crate::post::{compare_posts, split_paragraphs, Author, Post};

/// Posts of a single repository, newest first.
pub struct PostList {
    pub repo_path: PathBuf,
    pub name: String,
    pub posts: Vec<Post>,
}

impl PostList {
    /// Walks every commit reachable from the head of the repository found at
    /// or above `path`. Either the whole history is extracted or nothing is.
    pub fn from_repository(path: &Path) -> Result<PostList, ExtractError> {
        let repo_path = absolute_path(path);
        let name = repo_name(&repo_path);

        let repo = Repository::discover(&repo_path).map_err(|source| ExtractError::RepositoryNotFound {
            path: repo_path.clone(),
            source,
        })?;

        let head = repo.head().map_err(|source| ExtractError::HeadUnresolvable {
            path: repo_path.clone(),
            source: Some(source),
        })?;
        let head = head.target().ok_or_else(|| ExtractError::HeadUnresolvable {
            path: repo_path.clone(),
            source: None,
        })?;

        let walk_err = |source| ExtractError::Walk { path: repo_path.clone(), source };

        let mut revwalk = repo.revwalk().map_err(walk_err)?;
        revwalk.set_sorting(Sort::TIME).map_err(walk_err)?;
        revwalk.push(head).map_err(walk_err)?;

        let mut posts = vec![];
        for oid in revwalk {
            let oid = oid.map_err(walk_err)?;
            let commit = repo.find_commit(oid).map_err(walk_err)?;
            posts.push(Self::post_from_commit(&repo_path, &name, &commit));
        }

        // libgit2 leaves the order of equal timestamps unspecified
        posts.sort_by(compare_posts);

        debug!("Extracted {} posts from {}", posts.len(), repo_path.display());

        Ok(PostList {
            repo_path,
            name,
            posts,
        })
    }

    fn post_from_commit(repo_path: &Path, name: &str, commit: &Commit) -> Post {
        let message = String::from_utf8_lossy(commit.message_bytes());
        let mut paragraphs = split_paragraphs(&message).into_iter();

        let title = paragraphs.next().unwrap_or_default().to_string();
        let body = paragraphs
            .map(|para| parse_paragraph(repo_path, para))
            .collect();

        let signature = commit.author();
        let author = Author {
            name: String::from_utf8_lossy(signature.name_bytes()).to_string(),
            email: String::from_utf8_lossy(signature.email_bytes()).to_string(),
        };

        Post {
            repo: name.to_string(),
            title,
            body,
            time: commit.time().seconds(),
            author,
            hash: commit.id().to_string(),
        }
    }
}

/// Final segment of the absolute repository path.
pub fn repo_name(repo_path: &Path) -> String {
    match repo_path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => repo_path.to_string_lossy().to_string(),
    }
}
