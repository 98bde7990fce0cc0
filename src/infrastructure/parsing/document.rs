//! Parsed document as a tree of tagged nodes.
//!
//! Extraction code only needs three capabilities from a node: find descendants by
//! tag (and optionally class), read its text, and read an attribute. They are
//! expressed by [`DocumentNode`] and implemented here on top of `scraper`.

use scraper::{ElementRef, Html};

pub trait DocumentNode: Sized {
    /// Descendant elements named `tag` (case-insensitive), in document order,
    /// optionally restricted to those carrying `class` among their classes
    fn find_all(&self, tag: &str, class: Option<&str>) -> Vec<Self>;

    fn find_first(&self, tag: &str) -> Option<Self> {
        self.find_all(tag, None).into_iter().next()
    }

    /// Concatenated descendant text, trimmed
    fn text(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;
}

/// Owned parse of an HTML document
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parsing is tolerant: malformed markup still yields a tree
    pub fn parse(content: &str) -> Self {
        Self {
            html: Html::parse_document(content),
        }
    }

    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode::new(self.html.root_element())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HtmlNode<'a> {
    element: ElementRef<'a>,
}

impl<'a> HtmlNode<'a> {
    pub const fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    pub fn tag_name(&self) -> &'a str {
        self.element.value().name()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.element.value().classes().any(|c| c == class)
    }
}

impl DocumentNode for HtmlNode<'_> {
    fn find_all(&self, tag: &str, class: Option<&str>) -> Vec<Self> {
        self.element
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(HtmlNode::new)
            .filter(|node| node.tag_name().eq_ignore_ascii_case(tag))
            .filter(|node| class.is_none_or(|c| node.has_class(c)))
            .collect()
    }

    fn text(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.value().attr(name).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <table>
            <tr class="banggiaxe-item odd"><td> Honda </td><td><a href="/xe/vision#gia">Vision</a></td></tr>
            <tr class="other"><td>Yamaha</td></tr>
            <tr class="banggiaxe-item"><td>Suzuki</td><td>Raider <b>150</b></td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_find_all_by_tag_and_class() {
        let doc = HtmlDocument::parse(PAGE);
        let root = doc.root();
        assert_eq!(root.find_all("tr", None).len(), 3);
        assert_eq!(root.find_all("tr", Some("banggiaxe-item")).len(), 2);
        assert_eq!(root.find_all("TR", Some("other")).len(), 1);
        assert!(root.find_all("tr", Some("banggiaxe")).is_empty());
    }

    #[test]
    fn test_text_and_attributes() {
        let doc = HtmlDocument::parse(PAGE);
        let rows = doc.root().find_all("tr", Some("banggiaxe-item"));
        let cells = rows[0].find_all("td", None);
        assert_eq!(cells[0].text(), "Honda");

        let link = cells[1].find_first("a").unwrap();
        assert_eq!(link.text(), "Vision");
        assert_eq!(link.attribute("href").as_deref(), Some("/xe/vision#gia"));
        assert_eq!(link.attribute("title"), None);

        let nested = rows[1].find_all("td", None);
        assert_eq!(nested[1].text(), "Raider 150");
        assert!(nested[1].find_first("a").is_none());
    }
}
