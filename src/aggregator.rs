use std::path::{Path, PathBuf};

use spdlog::{error, info, warn};

use crate::error::ExtractError;
use crate::paginator::{Link, PageNamer, RepoNamer, ROOT_LINK_TITLE};
use crate::post::{compare_posts, Post};
use crate::post_list::PostList;

pub struct RepoFeed {
    pub name: String,
    pub path: PathBuf,
    pub posts: Vec<Post>,
}

/// Posts of every configured repository, per repository and combined.
pub struct Aggregate {
    /// One feed per display name, in the order the name was first seen.
    pub repos: Vec<RepoFeed>,
    /// Every post of every repository, newest first.
    pub all_posts: Vec<Post>,
    /// Site navigation: the combined feed, then one entry per repository.
    pub links: Vec<Link>,
    pub failures: Vec<ExtractError>,
}

impl Aggregate {
    pub fn collect<P: AsRef<Path>>(paths: &[P]) -> Aggregate {
        Self::collect_with(paths, PostList::from_repository)
    }

    /// A failing repository is logged and skipped, the others still go through.
    pub fn collect_with<P, F>(paths: &[P], mut extract: F) -> Aggregate
    where
        P: AsRef<Path>,
        F: FnMut(&Path) -> Result<PostList, ExtractError>,
    {
        let mut aggregate = Aggregate {
            repos: vec![],
            all_posts: vec![],
            links: vec![Link::new(ROOT_LINK_TITLE, "")],
            failures: vec![],
        };

        for path in paths {
            let path = path.as_ref();
            match extract(path) {
                Ok(list) => aggregate.add(list),
                Err(e) => {
                    error!("Skipping repository {}: {}", path.display(), e);
                    aggregate.failures.push(e);
                }
            }
        }

        aggregate.all_posts.sort_by(compare_posts);
        aggregate
    }

    fn add(&mut self, list: PostList) {
        info!("Found {} posts in {} ({})", list.posts.len(), list.name, list.repo_path.display());

        self.all_posts.extend(list.posts.iter().cloned());

        let feed = RepoFeed {
            name: list.name,
            path: list.repo_path,
            posts: list.posts,
        };

        // Same display name twice: the later repository replaces the earlier
        // feed, while both keep their posts in the combined list
        match self.repos.iter_mut().find(|r| r.name == feed.name) {
            Some(existing) => {
                warn!("Repository name {} is used by {} and {}, keeping the latter",
                    feed.name, existing.path.display(), feed.path.display());
                *existing = feed;
            }
            None => {
                let namer = RepoNamer::new(&feed.name);
                self.links.push(Link::new(namer.title(0), namer.href(0)));
                self.repos.push(feed);
            }
        }
    }

    pub fn repo(&self, name: &str) -> Option<&RepoFeed> {
        self.repos.iter().find(|r| r.name == name)
    }
}
