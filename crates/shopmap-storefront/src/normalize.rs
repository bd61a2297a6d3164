//! Conversion from storefront nodes to sitemap [`UrlEntry`] records.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use shopmap_core::{xml_escape, ImageEntry, ResourceType, UrlEntry};

use crate::types::SitemapNode;

/// Characters that cannot appear raw inside a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Builds the sitemap entry for a node, or `None` if the node is not visible
/// on the online store.
///
/// The handle is percent-encoded as a path segment, then the whole URL
/// (base included) is markup-escaped.
/// Only products carry an image block, and only when the featured image has
/// a non-empty URL; empty titles and alt texts are dropped.
#[must_use]
pub fn build_entry(node: &SitemapNode, resource: ResourceType, base_url: &str) -> Option<UrlEntry> {
    if !node.is_visible() {
        return None;
    }

    let url = format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        resource.as_str(),
        utf8_percent_encode(&node.handle, PATH_SEGMENT)
    );

    let image = match resource {
        ResourceType::Products => build_image(node),
        ResourceType::Collections | ResourceType::Pages => None,
    };

    Some(UrlEntry {
        url: xml_escape(&url).into_owned(),
        last_mod: xml_escape(&node.updated_at).into_owned(),
        change_freq: resource.change_freq(),
        image,
    })
}

fn build_image(node: &SitemapNode) -> Option<ImageEntry> {
    let image = node.featured_image.as_ref()?;
    let url = image.url.as_deref().filter(|u| !u.is_empty())?;

    Some(ImageEntry {
        url: xml_escape(url).into_owned(),
        title: non_empty_escaped(node.title.as_deref()),
        caption: non_empty_escaped(image.alt_text.as_deref()),
    })
}

fn non_empty_escaped(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| xml_escape(v).into_owned())
}

#[cfg(test)]
mod tests {
    use shopmap_core::ChangeFreq;

    use super::*;
    use crate::types::FeaturedImage;

    const BASE: &str = "https://shop.example.com";

    fn node(handle: &str, visible: bool) -> SitemapNode {
        SitemapNode {
            updated_at: "2024-05-01T10:00:00Z".to_string(),
            handle: handle.to_string(),
            online_store_url: visible.then(|| format!("{BASE}/x/{handle}")),
            title: None,
            featured_image: None,
        }
    }

    fn product(handle: &str, title: &str, image_url: &str, alt: Option<&str>) -> SitemapNode {
        SitemapNode {
            title: Some(title.to_string()),
            featured_image: Some(FeaturedImage {
                url: Some(image_url.to_string()),
                alt_text: alt.map(str::to_string),
            }),
            ..node(handle, true)
        }
    }

    #[test]
    fn invisible_node_yields_no_entry() {
        for resource in ResourceType::ALL {
            assert!(build_entry(&node("hidden", false), resource, BASE).is_none());
        }
    }

    #[test]
    fn builds_url_from_base_segment_and_handle() {
        let entry = build_entry(&node("summer", true), ResourceType::Collections, BASE)
            .expect("visible");
        assert_eq!(entry.url, "https://shop.example.com/collections/summer");
        assert_eq!(entry.last_mod, "2024-05-01T10:00:00Z");
        assert_eq!(entry.change_freq, ChangeFreq::Daily);
        assert!(entry.image.is_none());
    }

    #[test]
    fn pages_are_weekly() {
        let entry = build_entry(&node("about-us", true), ResourceType::Pages, BASE)
            .expect("visible");
        assert_eq!(entry.url, "https://shop.example.com/pages/about-us");
        assert_eq!(entry.change_freq, ChangeFreq::Weekly);
    }

    #[test]
    fn trailing_slash_on_base_url_is_ignored() {
        let entry = build_entry(&node("a", true), ResourceType::Pages, "https://shop.example.com/")
            .expect("visible");
        assert_eq!(entry.url, "https://shop.example.com/pages/a");
    }

    #[test]
    fn handle_reserved_characters_are_encoded() {
        let entry = build_entry(&node("tom&jerry's <tee>", true), ResourceType::Products, BASE)
            .expect("visible");
        assert_eq!(
            entry.url,
            "https://shop.example.com/products/tom%26jerry%27s%20%3Ctee%3E"
        );
        assert!(!entry.url.contains('&'));
    }

    #[test]
    fn base_url_markup_is_escaped_with_the_rest_of_the_url() {
        let entry = build_entry(
            &node("tee", true),
            ResourceType::Products,
            "https://shop.example.com/a&b<c>",
        )
        .expect("visible");
        assert_eq!(
            entry.url,
            "https://shop.example.com/a&#38;b&#60;c&#62;/products/tee"
        );
    }

    #[test]
    fn product_image_fields_are_escaped() {
        let entry = build_entry(
            &product(
                "tee",
                "Tom & Jerry Tee",
                "https://cdn.example.com/tee.png?v=1&w=2",
                Some("A \"classic\" tee"),
            ),
            ResourceType::Products,
            BASE,
        )
        .expect("visible");
        let image = entry.image.expect("image block");
        assert_eq!(image.url, "https://cdn.example.com/tee.png?v=1&#38;w=2");
        assert_eq!(image.title.as_deref(), Some("Tom &#38; Jerry Tee"));
        assert_eq!(image.caption.as_deref(), Some("A &#34;classic&#34; tee"));
    }

    #[test]
    fn empty_title_and_alt_text_are_absent() {
        let entry = build_entry(
            &product("tee", "", "https://cdn.example.com/tee.png", Some("")),
            ResourceType::Products,
            BASE,
        )
        .expect("visible");
        let image = entry.image.expect("image block");
        assert!(image.title.is_none());
        assert!(image.caption.is_none());
    }

    #[test]
    fn product_without_image_url_has_no_image_block() {
        let mut p = product("tee", "Tee", "", None);
        let entry = build_entry(&p, ResourceType::Products, BASE).expect("visible");
        assert!(entry.image.is_none());

        p.featured_image = None;
        let entry = build_entry(&p, ResourceType::Products, BASE).expect("visible");
        assert!(entry.image.is_none());
    }

    #[test]
    fn collections_never_carry_images() {
        let entry = build_entry(
            &product("c", "Title", "https://cdn.example.com/c.png", None),
            ResourceType::Collections,
            BASE,
        )
        .expect("visible");
        assert!(entry.image.is_none());
    }
}
