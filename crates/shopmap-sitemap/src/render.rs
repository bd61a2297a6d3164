//! Serializes entries into `urlset` and `sitemapindex` documents.
//!
//! [`UrlEntry`] text is already escaped by the entry builder, so it is written
//! with [`BytesText::from_escaped`] to keep the numeric character references
//! intact. Entries are written in the order given.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use shopmap_core::{xml_escape, UrlEntry};

use crate::error::RenderError;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Renders a `urlset` document with the image extension namespace declared.
///
/// # Errors
///
/// Returns [`RenderError`] if the XML writer fails.
pub fn render_urlset(entries: &[UrlEntry]) -> Result<String, RenderError> {
    let mut out = XmlOut::new()?;
    out.start(
        BytesStart::new("urlset")
            .with_attributes([("xmlns", SITEMAP_NS), ("xmlns:image", IMAGE_NS)]),
    )?;

    for entry in entries {
        out.start(BytesStart::new("url"))?;
        out.text_element("loc", &entry.url)?;
        out.text_element("lastmod", &entry.last_mod)?;
        out.text_element("changefreq", entry.change_freq.as_str())?;
        if let Some(image) = &entry.image {
            out.start(BytesStart::new("image:image"))?;
            out.text_element("image:loc", &image.url)?;
            out.text_element("image:title", image.title.as_deref().unwrap_or_default())?;
            out.text_element(
                "image:caption",
                image.caption.as_deref().unwrap_or_default(),
            )?;
            out.end("image:image")?;
        }
        out.end("url")?;
    }

    out.end("urlset")?;
    out.finish()
}

/// Renders a `sitemapindex` document listing `sitemap_urls`.
///
/// # Errors
///
/// Returns [`RenderError`] if the XML writer fails.
pub fn render_index(sitemap_urls: &[String]) -> Result<String, RenderError> {
    let mut out = XmlOut::new()?;
    out.start(BytesStart::new("sitemapindex").with_attributes([("xmlns", SITEMAP_NS)]))?;

    for url in sitemap_urls {
        out.start(BytesStart::new("sitemap"))?;
        out.text_element("loc", &xml_escape(url))?;
        out.end("sitemap")?;
    }

    out.end("sitemapindex")?;
    out.finish()
}

struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Result<Self, RenderError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(write_err)?;
        Ok(Self { writer })
    }

    fn start(&mut self, element: BytesStart<'_>) -> Result<(), RenderError> {
        self.writer
            .write_event(Event::Start(element))
            .map_err(write_err)
    }

    fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(write_err)
    }

    /// Writes `<name>escaped</name>`; an empty value still emits both tags.
    fn text_element(&mut self, name: &str, escaped: &str) -> Result<(), RenderError> {
        self.writer
            .create_element(name)
            .write_text_content(BytesText::from_escaped(escaped))
            .map(|_| ())
            .map_err(write_err)
    }

    fn finish(self) -> Result<String, RenderError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

fn write_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Write(e.to_string())
}

#[cfg(test)]
mod tests {
    use shopmap_core::{ChangeFreq, ImageEntry};

    use super::*;

    fn entry(url: &str, image: Option<ImageEntry>) -> UrlEntry {
        UrlEntry {
            url: url.to_string(),
            last_mod: "2024-05-01T10:00:00Z".to_string(),
            change_freq: ChangeFreq::Daily,
            image,
        }
    }

    /// Collapses indentation so assertions don't depend on whitespace.
    fn compact(xml: &str) -> String {
        xml.lines().map(str::trim).collect()
    }

    #[test]
    fn urlset_declares_both_namespaces() {
        let xml = render_urlset(&[]).expect("render");
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"xmlns="http://www.sitemaps.org/schemas/sitemap/0.9""#));
        assert!(xml.contains(r#"xmlns:image="http://www.google.com/schemas/sitemap-image/1.1""#));
    }

    #[test]
    fn url_block_has_loc_lastmod_and_changefreq() {
        let xml = compact(
            &render_urlset(&[entry("https://shop.example.com/pages/faq", None)]).expect("render"),
        );
        assert!(xml.contains(
            "<url><loc>https://shop.example.com/pages/faq</loc>\
             <lastmod>2024-05-01T10:00:00Z</lastmod>\
             <changefreq>daily</changefreq></url>"
        ));
        assert!(!xml.contains("image:image"));
    }

    #[test]
    fn missing_image_title_and_caption_render_as_empty_elements() {
        let image = ImageEntry {
            url: "https://cdn.example.com/a.png".to_string(),
            title: None,
            caption: None,
        };
        let xml = compact(
            &render_urlset(&[entry("https://shop.example.com/products/a", Some(image))])
                .expect("render"),
        );
        assert!(xml.contains(
            "<image:image><image:loc>https://cdn.example.com/a.png</image:loc>\
             <image:title></image:title>\
             <image:caption></image:caption></image:image>"
        ));
    }

    #[test]
    fn pre_escaped_text_is_not_escaped_twice() {
        let image = ImageEntry {
            url: "https://cdn.example.com/a.png?v=1&#38;w=2".to_string(),
            title: Some("Tom &#38; Jerry".to_string()),
            caption: Some("&#34;classic&#34;".to_string()),
        };
        let xml = render_urlset(&[entry("https://shop.example.com/products/a", Some(image))])
            .expect("render");
        assert!(xml.contains("<image:title>Tom &#38; Jerry</image:title>"));
        assert!(xml.contains("<image:caption>&#34;classic&#34;</image:caption>"));
        assert!(!xml.contains("&amp;"));
    }

    #[test]
    fn entries_keep_their_order() {
        let entries = [
            entry("https://s/products/b", None),
            entry("https://s/products/a", None),
            entry("https://s/products/b", None),
        ];
        let xml = render_urlset(&entries).expect("render");
        let locs: Vec<_> = xml
            .lines()
            .map(str::trim)
            .filter(|l| l.starts_with("<loc>"))
            .collect();
        assert_eq!(
            locs,
            [
                "<loc>https://s/products/b</loc>",
                "<loc>https://s/products/a</loc>",
                "<loc>https://s/products/b</loc>",
            ]
        );
    }

    #[test]
    fn index_lists_each_sitemap_pointer() {
        let urls = vec![
            "https://shop.example.com/sitemap/1.xml".to_string(),
            "https://shop.example.com/sitemap/2.xml".to_string(),
        ];
        let xml = compact(&render_index(&urls).expect("render"));
        assert!(xml.contains(r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains(
            "<sitemap><loc>https://shop.example.com/sitemap/1.xml</loc></sitemap>\
             <sitemap><loc>https://shop.example.com/sitemap/2.xml</loc></sitemap>"
        ));
        assert!(!xml.contains("urlset"));
    }
}
