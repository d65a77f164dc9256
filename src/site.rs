use std::fs;

use anyhow::{Context, Result};
use spdlog::{debug, info};

use crate::aggregator::Aggregate;
use crate::assets::{copy_include, install_styles};
use crate::config::{RssFeed, SiteOptions};
use crate::error::PaginationError;
use crate::paginator::{FeedNamer, PageDocument, Paginator, PermalinkNamer, RepoNamer};
use crate::post::Post;
use crate::view::rss_renderer::RssChannel;
use crate::view::PageRenderer;

pub const RSS_FILE_NAME: &str = "feed.xml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub documents: usize,
    pub skipped_repositories: usize,
}

/// Every document of the site: the pages of each repository, the pages of
/// the combined feed, then one permalink per post.
pub fn plan(aggregate: &Aggregate, page_size: usize) -> Result<Vec<PageDocument<'_, Post>>, PaginationError> {
    let nav = aggregate.links.as_slice();

    // Checked up front so an empty site still reports a bad page size
    let combined = Paginator::from(&aggregate.all_posts, page_size)?;

    let mut documents = vec![];
    for repo in &aggregate.repos {
        let paginator = Paginator::from(&repo.posts, page_size)?;
        documents.extend(paginator.documents(&RepoNamer::new(&repo.name), nav));
    }

    documents.extend(combined.documents(&FeedNamer, nav));

    for post in &aggregate.all_posts {
        let paginator = Paginator::single(post);
        documents.extend(paginator.standalone_documents(&PermalinkNamer::new(post), nav));
    }

    Ok(documents)
}

/// Runs the whole pipeline once: extract, paginate, render, write.
pub fn build_site<R: PageRenderer>(options: &SiteOptions, renderer: &R) -> Result<SiteReport> {
    let aggregate = Aggregate::collect(&options.paths);
    let documents = plan(&aggregate, options.page_size)
        .context("Invalid pagination settings")?;

    fs::create_dir_all(&options.target)
        .with_context(|| format!("Error creating target directory {}", options.target.display()))?;

    for include in &options.include {
        copy_include(include, &options.target)
            .with_context(|| format!("Error copying {}", include.display()))?;
    }
    install_styles(&options.target).context("Error installing stylesheets")?;

    for doc in &documents {
        let rendered = renderer.render(doc)
            .with_context(|| format!("Error rendering {}", doc.filename))?;
        let path = options.target.join(&doc.filename);
        fs::write(&path, rendered)
            .with_context(|| format!("Error writing {}", path.display()))?;
        debug!("Wrote {}", path.display());
    }

    if let Some(ref rss_feed) = options.rss_feed {
        write_rss(options, rss_feed, &aggregate.all_posts)?;
    }

    info!("Wrote {} documents to {}", documents.len(), options.target.display());

    Ok(SiteReport {
        documents: documents.len(),
        skipped_repositories: aggregate.failures.len(),
    })
}

fn write_rss(options: &SiteOptions, rss_feed: &RssFeed, posts: &[Post]) -> Result<()> {
    let rss = RssChannel {
        ch_title: &rss_feed.title,
        ch_link: &rss_feed.site_url,
        ch_desc: &rss_feed.description,
    };

    let count = rss_feed.page_size.min(posts.len());
    let xml = rss.render(&posts[..count]).context("Error rendering RSS feed")?;

    let path = options.target.join(RSS_FILE_NAME);
    fs::write(&path, xml).with_context(|| format!("Error writing {}", path.display()))?;
    info!("Wrote RSS feed with {} posts to {}", count, path.display());
    Ok(())
}
