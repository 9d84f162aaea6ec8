use std::collections::BTreeMap;

use maud::{html, PreEscaped};

/// The handful of page operations the controllers need.
pub trait Document {
    /// Replaces the element's content with plain text.
    fn set_text(&mut self, id: &str, text: &str);
    /// Replaces the element's content with trusted markup, no escaping.
    fn set_html(&mut self, id: &str, html: &str);
    fn set_disabled(&mut self, id: &str, disabled: bool);
    fn navigate(&mut self, url: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub content: Option<Content>,
    pub disabled: bool,
}

/// Keeps every element in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: BTreeMap<String, Element>,
    location: Option<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.element(id)?.content.as_ref()? {
            Content::Text(s) => Some(s),
            Content::Html(_) => None,
        }
    }

    pub fn html(&self, id: &str) -> Option<&str> {
        match self.element(id)?.content.as_ref()? {
            Content::Html(s) => Some(s),
            Content::Text(_) => None,
        }
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.element(id).is_some_and(|e| e.disabled)
    }

    /// Where the last `navigate` pointed, if anywhere.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn take_location(&mut self) -> Option<String> {
        self.location.take()
    }

    /// Serializes all elements as `<div id=..>` fragments, text escaped.
    pub fn to_html(&self) -> String {
        html! {
            @for (id, element) in &self.elements {
                div id=(id) disabled[element.disabled] {
                    @match &element.content {
                        Some(Content::Text(text)) => { (text) }
                        Some(Content::Html(markup)) => { (PreEscaped(markup)) }
                        None => {}
                    }
                }
            }
        }
        .into_string()
    }

    fn element_mut(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_owned()).or_default()
    }
}

impl Document for MemoryDocument {
    fn set_text(&mut self, id: &str, text: &str) {
        self.element_mut(id).content = Some(Content::Text(text.into()));
    }

    fn set_html(&mut self, id: &str, html: &str) {
        self.element_mut(id).content = Some(Content::Html(html.into()));
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        self.element_mut(id).disabled = disabled;
    }

    fn navigate(&mut self, url: &str) {
        self.location = Some(url.into());
    }
}
