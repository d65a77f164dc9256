use std::slice;

use crate::error::PaginationError;
use crate::post::Post;

pub const ROOT_LINK_TITLE: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub title: String,
    pub href: String,
}

impl Link {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Link {
            title: title.into(),
            href: href.into(),
        }
    }
}

/// Addressing of the pages of one feed. Indexes start at 0.
pub trait PageNamer {
    fn filename(&self, index: usize) -> String;
    fn href(&self, index: usize) -> String;
    fn title(&self, index: usize) -> String;

    /// Text of the page-index entry pointing at page `index`.
    fn label(&self, index: usize) -> String {
        (index + 1).to_string()
    }
}

/// The combined feed. Its first page lives at the site root.
pub struct FeedNamer;

impl PageNamer for FeedNamer {
    fn filename(&self, index: usize) -> String {
        match index {
            0 => "index.html".to_string(),
            i => format!("page-{}.html", i + 1),
        }
    }

    fn href(&self, index: usize) -> String {
        match index {
            0 => "".to_string(),
            i => format!("page-{}.html", i + 1),
        }
    }

    fn title(&self, index: usize) -> String {
        match index {
            0 => ROOT_LINK_TITLE.to_string(),
            i => format!("{} #{}", ROOT_LINK_TITLE, i + 1),
        }
    }
}

pub struct RepoNamer<'a> {
    name: &'a str,
}

impl<'a> RepoNamer<'a> {
    pub fn new(name: &'a str) -> Self {
        RepoNamer { name }
    }
}

impl PageNamer for RepoNamer<'_> {
    fn filename(&self, index: usize) -> String {
        match index {
            0 => format!("{}.html", self.name),
            i => format!("{}-{}.html", self.name, i + 1),
        }
    }

    fn href(&self, index: usize) -> String {
        self.filename(index)
    }

    fn title(&self, index: usize) -> String {
        match index {
            0 => format!("/{}", self.name),
            i => format!("/{} #{}", self.name, i + 1),
        }
    }
}

/// Single-post document addressed by the commit hash.
pub struct PermalinkNamer<'a> {
    post: &'a Post,
}

impl<'a> PermalinkNamer<'a> {
    pub fn new(post: &'a Post) -> Self {
        PermalinkNamer { post }
    }
}

impl PageNamer for PermalinkNamer<'_> {
    fn filename(&self, _index: usize) -> String {
        self.post.permalink()
    }

    fn href(&self, _index: usize) -> String {
        self.post.permalink()
    }

    fn title(&self, _index: usize) -> String {
        self.post.title.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOptions {
    PreviewOnly,
    FullContent,
}

/// Everything needed to render one output file.
#[derive(Debug, Clone)]
pub struct PageDocument<'a, T> {
    pub filename: String,
    pub title: String,
    /// Site-wide navigation.
    pub nav: &'a [Link],
    /// Every page of the feed this document belongs to.
    pub page_links: Vec<Link>,
    pub items: &'a [T],
    pub current_page: String,
    pub render_options: RenderOptions,
}

pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
    page_count: usize,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::InvalidPageSize(page_size));
        }

        // An empty feed still gets its landing page
        let page_count = if items.is_empty() {
            1
        } else {
            items.len().div_ceil(page_size)
        };

        Ok(Paginator {
            items,
            page_size,
            page_count,
        })
    }

    pub fn single(item: &'a T) -> Self {
        Paginator {
            items: slice::from_ref(item),
            page_size: 1,
            page_count: 1,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn get_page(&self, index: usize) -> Option<&'a [T]> {
        if index >= self.page_count {
            return None;
        }

        let start = (index * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        Some(&self.items[start..end])
    }

    pub fn pages(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.page_count).filter_map(move |i| self.get_page(i))
    }

    pub fn page_links(&self, namer: &dyn PageNamer) -> Vec<Link> {
        (0..self.page_count)
            .map(|i| Link::new(namer.label(i), namer.href(i)))
            .collect()
    }

    /// One document per page, each carrying the full page index.
    pub fn documents(&self, namer: &dyn PageNamer, nav: &'a [Link]) -> Vec<PageDocument<'a, T>> {
        let page_links = self.page_links(namer);
        self.build_documents(namer, nav, page_links, RenderOptions::PreviewOnly)
    }

    /// Documents without a page index, showing their items in full.
    pub fn standalone_documents(&self, namer: &dyn PageNamer, nav: &'a [Link]) -> Vec<PageDocument<'a, T>> {
        self.build_documents(namer, nav, vec![], RenderOptions::FullContent)
    }

    fn build_documents(&self, namer: &dyn PageNamer, nav: &'a [Link], page_links: Vec<Link>,
                       render_options: RenderOptions) -> Vec<PageDocument<'a, T>> {
        self.pages()
            .enumerate()
            .map(|(i, items)| PageDocument {
                filename: namer.filename(i),
                title: namer.title(i),
                nav,
                page_links: page_links.clone(),
                items,
                current_page: namer.href(i),
                render_options,
            })
            .collect()
    }
}
