use std::io::Cursor;

use chrono::DateTime;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::post::{BodyItem, Post};
use crate::post_render::render_markdown;
use crate::text_utils::{escape_html, join_url};

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">

<channel>
  <title>slag</title>
  <link>https://blog.example.com</link>
  <description>What happened in my repositories</description>
  <item>
    <title>Add the paginator</title>
    <link>https://blog.example.com/4f1c0d2e9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d.html</link>
    <guid isPermaLink="false">4f1c0d2e9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d</guid>
    <description><![CDATA[<p>Pages are fixed size.</p>]]></description>
    <pubDate>Tue, 2 Jan 2024 05:06:07 +0000</pubDate>
  </item>
</channel>

</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, posts: &[Post]) -> quick_xml::Result<Vec<u8>> {
        let mut feed = FeedWriter::new();
        feed.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        feed.write(Event::Start(rss))?;
        feed.open("channel")?;

        feed.element("title", self.ch_title)?;
        feed.element("link", self.ch_link)?;
        feed.element("description", self.ch_desc)?;

        for post in posts {
            self.write_item(&mut feed, post)?;
        }

        feed.close("channel")?;
        feed.close("rss")?;

        Ok(feed.finish())
    }

    fn write_item(&self, feed: &mut FeedWriter, post: &Post) -> quick_xml::Result<()> {
        feed.open("item")?;
        feed.element("title", &post.title)?;
        feed.element("link", &join_url(self.ch_link, &post.permalink()))?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "false"));
        feed.write(Event::Start(guid))?;
        feed.write(Event::Text(BytesText::new(&post.hash)))?;
        feed.close("guid")?;

        feed.cdata_element("description", &summary(post))?;

        let published = DateTime::from_timestamp(post.time, 0).unwrap_or_default();
        feed.element("pubDate", &published.to_rfc2822())?;
        feed.close("item")
    }
}

// Embedded files are left out of the feed
fn summary(post: &Post) -> String {
    post.body.iter()
        .filter_map(|item| match item {
            BodyItem::PlainText(text) => Some(text),
            BodyItem::Directive(_) => None,
        })
        .map(|text| render_markdown(text).unwrap_or_else(|_| escape_html(text)))
        .collect::<Vec<_>>()
        .join("\n")
}

struct FeedWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl FeedWriter {
    fn new() -> Self {
        FeedWriter { writer: Writer::new(Cursor::new(Vec::new())) }
    }

    fn write(&mut self, event: Event<'_>) -> quick_xml::Result<()> {
        self.writer.write_event(event)?;
        Ok(())
    }

    fn open(&mut self, tag: &str) -> quick_xml::Result<()> {
        self.write(Event::Start(BytesStart::new(tag)))
    }

    fn close(&mut self, tag: &str) -> quick_xml::Result<()> {
        self.write(Event::End(BytesEnd::new(tag)))
    }

    fn element(&mut self, tag: &str, text: &str) -> quick_xml::Result<()> {
        self.open(tag)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.close(tag)
    }

    /// A literal `]]>` would end the section early, so it gets split.
    fn cdata_element(&mut self, tag: &str, text: &str) -> quick_xml::Result<()> {
        self.open(tag)?;
        let text = text.replace("]]>", "]] >");
        self.write(Event::CData(BytesCData::new(text.as_str())))?;
        self.close(tag)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::str;

    use chrono::{NaiveDate, NaiveTime};

    use crate::post::Directive;
    use crate::test_data::sample_post;

    use super::*;

    fn create_post(id: &str) -> Post {
        let time = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
            .and_time(NaiveTime::from_hms_opt(5, 6, 7).unwrap())
            .and_utc()
            .timestamp();
        let mut post = sample_post("blog", time, id);
        post.body = vec![
            BodyItem::PlainText(format!("summary-of-post-{}", id)),
            BodyItem::Directive(Directive {
                path: "src/lib.rs".to_string(),
                real_path: PathBuf::from("/nonexistent/src/lib.rs"),
                is_markdown: false,
            }),
        ];
        post
    }

    #[test]
    fn render_xml() {
        let posts = vec![create_post("1"), create_post("2")];

        let rss = RssChannel {
            ch_title: "my feed",
            ch_link: "https://blog.example.com",
            ch_desc: "My blog feed",
        };
        let xml = rss.render(&posts).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn cdata_end_is_broken() {
        let mut feed = FeedWriter::new();
        feed.cdata_element("description", "a]]>b").unwrap();
        let xml = feed.finish();
        assert_eq!(str::from_utf8(&xml).unwrap(), "<description><![CDATA[a]] >b]]></description>");
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>my feed</title><link>https://blog.example.com</link><description>My blog feed</description><item><title>Post 1</title><link>https://blog.example.com/1.html</link><guid isPermaLink="false">1</guid><description><![CDATA[<p>summary-of-post-1</p>]]></description><pubDate>Tue, 2 Jan 2024 05:06:07 +0000</pubDate></item><item><title>Post 2</title><link>https://blog.example.com/2.html</link><guid isPermaLink="false">2</guid><description><![CDATA[<p>summary-of-post-2</p>]]></description><pubDate>Tue, 2 Jan 2024 05:06:07 +0000</pubDate></item></channel></rss>"##;
}
