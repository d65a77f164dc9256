use ramhorns::Template;

use crate::error::RenderError;
use crate::paginator::{Link, PageDocument, RenderOptions};
use crate::post::Post;
use crate::post_render::render_body;
use crate::text_utils::{format_time, join_url, DEFAULT_TIME_FORMAT};
use crate::view::PageRenderer;

pub const LIST_TEMPLATE: &str = include_str!("../../res/html/list.tpl");

const STYLESHEET: &str = "css/slag.css";

#[derive(ramhorns::Content)]
struct ListPage<'a> {
    title: &'a str,
    home: String,
    stylesheet: String,
    links: Vec<ViewLink<'a>>,
    pages: Vec<ViewLink<'a>>,
    show_pagination: bool,
    posts: Vec<PostItem<'a>>,
}

#[derive(ramhorns::Content)]
struct ViewLink<'a> {
    title: &'a str,
    href: String,
    current: bool,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    repo: &'a str,
    repo_link: String,
    title: &'a str,
    author: &'a str,
    date: String,
    hash: &'a str,
    short_hash: &'a str,
    permalink: String,
    paragraphs: Vec<Paragraph>,
    truncated: bool,
}

#[derive(ramhorns::Content)]
struct Paragraph {
    html: String,
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
    pub base_url: String,
    /// Body paragraphs shown per post on listing pages.
    pub max_paragraphs: usize,
}

impl<'a> ListRenderer<'a> {
    pub fn new(list_tpl_src: &'a str, base_url: &str, max_paragraphs: usize) -> Result<Self, RenderError> {
        let template = Template::new(list_tpl_src)?;

        Ok(ListRenderer {
            template,
            base_url: base_url.to_string(),
            max_paragraphs,
        })
    }

    pub fn bundled(base_url: &str, max_paragraphs: usize) -> Result<Self, RenderError> {
        Self::new(LIST_TEMPLATE, base_url, max_paragraphs)
    }

    fn view_links<'l>(&self, links: &'l [Link], current_page: &str) -> Vec<ViewLink<'l>> {
        links.iter()
            .map(|link| ViewLink {
                title: link.title.as_str(),
                href: join_url(&self.base_url, &link.href),
                current: link.href == current_page,
            })
            .collect()
    }

    fn post_item<'p>(&self, post: &'p Post, render_options: RenderOptions) -> Result<PostItem<'p>, RenderError> {
        let limit = match render_options {
            RenderOptions::PreviewOnly => Some(self.max_paragraphs),
            RenderOptions::FullContent => None,
        };

        let paragraphs = render_body(&post.body, limit)?
            .into_iter()
            .map(|html| Paragraph { html })
            .collect::<Vec<_>>();
        let truncated = paragraphs.len() < post.body.len();

        Ok(PostItem {
            repo: post.repo.as_str(),
            repo_link: join_url(&self.base_url, &format!("{}.html", post.repo)),
            title: post.title.as_str(),
            author: post.author.name.as_str(),
            date: format_time(post.time, DEFAULT_TIME_FORMAT),
            hash: post.hash.as_str(),
            short_hash: post.hash.get(..8).unwrap_or(post.hash.as_str()),
            permalink: join_url(&self.base_url, &post.permalink()),
            paragraphs,
            truncated,
        })
    }
}

impl PageRenderer for ListRenderer<'_> {
    fn render(&self, doc: &PageDocument<'_, Post>) -> Result<String, RenderError> {
        let mut posts = Vec::with_capacity(doc.items.len());
        for post in doc.items {
            posts.push(self.post_item(post, doc.render_options)?);
        }

        let rendered = self.template.render(&ListPage {
            title: doc.title.as_str(),
            home: join_url(&self.base_url, ""),
            stylesheet: join_url(&self.base_url, STYLESHEET),
            links: self.view_links(doc.nav, &doc.current_page),
            pages: self.view_links(&doc.page_links, &doc.current_page),
            show_pagination: doc.page_links.len() > 1,
            posts,
        });

        Ok(rendered)
    }
}
