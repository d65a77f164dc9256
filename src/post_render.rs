use std::fs;
use std::path::Path;

use markdown::Options;

use crate::error::ContentError;
use crate::post::{BodyItem, Directive};
use crate::text_utils::escape_html;

impl Directive {
    /// Reads the embedded file. Only called while rendering.
    pub fn read_content(&self) -> Result<Vec<u8>, ContentError> {
        fs::read(&self.real_path).map_err(|source| ContentError::DirectiveContentUnreadable {
            path: self.real_path.clone(),
            source,
        })
    }

    pub fn read_text(&self) -> Result<String, ContentError> {
        String::from_utf8(self.read_content()?).map_err(|source| ContentError::NotUtf8 {
            path: self.real_path.clone(),
            source,
        })
    }
}

pub fn render_markdown(md_text: &str) -> Result<String, ContentError> {
    match markdown::to_html_with_options(md_text, &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(ContentError::Markdown(e.reason)),
    }
}

pub fn render_code(path: &str, code: &str) -> String {
    let lang = Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_string());

    let block = match lang {
        Some(lang) => format!(r#"<pre><code class="language-{}">{}</code></pre>"#, escape_html(&lang), escape_html(code)),
        None => format!("<pre><code>{}</code></pre>", escape_html(code)),
    };
    format!("<strong>{}</strong>\n{}", escape_html(path), block)
}

pub fn render_item(item: &BodyItem) -> Result<String, ContentError> {
    match item {
        BodyItem::PlainText(text) => render_markdown(text),
        BodyItem::Directive(directive) => {
            let text = directive.read_text()?;
            if directive.is_markdown {
                render_markdown(&text)
            } else {
                Ok(render_code(&directive.path, &text))
            }
        }
    }
}

/// Renders at most `limit` body items, `None` meaning all of them.
pub fn render_body(body: &[BodyItem], limit: Option<usize>) -> Result<Vec<String>, ContentError> {
    let limit = limit.unwrap_or(body.len());
    body.iter()
        .take(limit)
        .map(render_item)
        .collect()
}
