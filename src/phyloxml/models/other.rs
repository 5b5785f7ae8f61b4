//! Generic container for elements outside the PhyloXML vocabulary.

/// One piece of an [`Other`] element's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherContent {
    Element(Other),
    /// Non-blank text, kept exactly as it appeared (unescaped)
    Text(String),
}

/// An element captured verbatim: name, attributes and mixed content in
/// document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Other {
    /// Qualified element name as it appeared in the document
    pub element_name: String,

    /// Attributes in document order
    pub attributes: Vec<(String, String)>,

    /// Child elements and text nodes in document order. Whitespace-only text
    /// between elements is not kept.
    pub content: Vec<OtherContent>,
}

impl Other {
    pub fn new(element_name: impl Into<String>) -> Self {
        Self {
            element_name: element_name.into(),
            ..Default::default()
        }
    }

    /// Value of the attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text.
    pub fn children(&self) -> impl Iterator<Item = &Other> + '_ {
        self.content.iter().filter_map(|item| match item {
            OtherContent::Element(element) => Some(element),
            OtherContent::Text(_) => None,
        })
    }

    /// Direct text content, concatenated; `None` if there is none
    pub fn text(&self) -> Option<String> {
        let mut text: Option<String> = None;
        for item in &self.content {
            if let OtherContent::Text(piece) = item {
                text.get_or_insert_with(String::new).push_str(piece);
            }
        }
        text
    }

    pub fn push_element(&mut self, element: Other) {
        self.content.push(OtherContent::Element(element));
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.content.push(OtherContent::Text(text.into()));
    }

    /// Number of elements in this subtree, including `self`.
    pub fn element_count(&self) -> usize {
        1 + self.children().map(Other::element_count).sum::<usize>()
    }
}
