use crate::error::RenderError;
use crate::paginator::PageDocument;
use crate::post::Post;

pub mod list_renderer;
pub mod rss_renderer;

/// Turns one planned document into the text written to its file.
pub trait PageRenderer {
    fn render(&self, doc: &PageDocument<'_, Post>) -> Result<String, RenderError>;
}
