use std::cmp::Ordering;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

/// File embedded into a post by a `!file`, `!code` or `!md` paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Path as written in the commit message, relative to the repository.
    pub path: String,
    /// `path` resolved against the repository it was found in.
    pub real_path: PathBuf,
    pub is_markdown: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyItem {
    PlainText(String),
    Directive(Directive),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub repo: String,
    pub title: String,
    pub body: Vec<BodyItem>,
    /// Commit time, seconds since the Unix epoch.
    pub time: i64,
    pub author: Author,
    pub hash: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "repo={}, hash={}, time={}, author={}\ntitle={}\nparagraphs={}",
               self.repo,
               self.hash,
               self.time,
               self.author,
               self.title,
               self.body.len()
        )
    }
}

impl Post {
    pub fn permalink(&self) -> String {
        format!("{}.html", self.hash)
    }
}

/// Newest first; commits sharing a timestamp are ordered by hash.
pub fn compare_posts(a: &Post, b: &Post) -> Ordering {
    b.time.cmp(&a.time).then_with(|| a.hash.cmp(&b.hash))
}

/// Splits a commit message into paragraphs separated by one blank line.
/// Line breaks closing the message are not part of the last paragraph.
pub fn split_paragraphs(message: &str) -> Vec<&str> {
    let message = message.trim_end_matches(['\n', '\r']);
    message.split("\n\n").collect()
}
