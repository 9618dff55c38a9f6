//! XML response documents.

use crate::Result;
use xmltree::Element;

/// Declaration prepended to responses that omit one.
pub const DEFAULT_XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Parsed XML response.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: Element,
}

impl XmlDocument {
    /// Parse decoded response text.
    ///
    /// Surrounding whitespace is trimmed and a default declaration is
    /// synthesized when the text does not start with one.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let root = if text.starts_with("<?xml") {
            Element::parse(text.as_bytes())?
        } else {
            let mut full = String::with_capacity(DEFAULT_XML_DECLARATION.len() + text.len());
            full.push_str(DEFAULT_XML_DECLARATION);
            full.push_str(text);
            Element::parse(full.as_bytes())?
        };
        Ok(Self { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    /// Concatenated text of the first child element named `name`, if any.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.root
            .get_child(name)
            .and_then(|c| c.get_text())
            .map(|t| t.into_owned())
    }
}

impl From<Element> for XmlDocument {
    fn from(root: Element) -> Self {
        Self { root }
    }
}
