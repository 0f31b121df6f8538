//! Plain text-level widgets.

use anyhow::Result;

use crate::render::Renderer;
use crate::widget::{Widget, WidgetBase, ParamSpec};

/// A paragraph of already-sanitized HTML text. Sanitization of user
/// content happens before it gets here.
#[derive(Debug)]
pub struct Paragraph {
    base: WidgetBase,
    text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Paragraph { base: WidgetBase::new("Paragraph"), text: text.into() }
    }
}

impl Widget for Paragraph {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Paragraph" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "text", type_name: "string",
                      description: "Text of the paragraph" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<p{}>{}</p>",
                            self.base.base_attributes(), self.text));
        Ok(())
    }
}

#[derive(Debug)]
pub struct Anchor {
    base: WidgetBase,
    text: String,
    url: String,
}

impl Anchor {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Anchor {
            base: WidgetBase::new("Anchor"),
            text: text.into(),
            url: url.into(),
        }
    }
}

impl Widget for Anchor {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Anchor" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "text", type_name: "string",
                      description: "Text of the link" },
          ParamSpec { name: "url", type_name: "string",
                      description: "Target of the link" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<a{} href=\"{}\">{}</a>",
                            self.base.base_attributes(), self.url, self.text));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_paragraph() {
        let p = Paragraph::new("hello").with_id("p1");
        let mut r = Renderer::new();
        r.render("", &p).unwrap();
        assert_eq!(r.html(), "<p id=\"p1\">hello</p>\n");
    }

    #[test]
    fn t_anchor() {
        let a = Anchor::new("home", "/").with_id("a1");
        let mut r = Renderer::new();
        r.render("", &a).unwrap();
        assert_eq!(r.html(), "<a id=\"a1\" href=\"/\">home</a>\n");
    }
}
