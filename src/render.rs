//! Serialization of a widget tree: a depth-first walk accumulating
//! HTML text plus the CSS/JS resources the widgets register along the
//! way.

use anyhow::Result;
use kstring::KString;

use crate::widget::Widget;

/// Accumulator for one render pass. HTML lines are collected with the
/// current indentation; resource file URLs are deduplicated, first
/// registration wins the position.
pub struct Renderer {
    html: String,
    indent: String,
    css_files: Vec<KString>,
    js_files: Vec<KString>,
    css: String,
    js: String,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            html: String::new(),
            indent: String::new(),
            css_files: Vec::new(),
            js_files: Vec::new(),
            css: String::new(),
            js: String::new(),
        }
    }

    /// Append one line of HTML at the current indentation.
    pub fn append(&mut self, line: &str) {
        self.html.push_str(&self.indent);
        self.html.push_str(line);
        self.html.push('\n');
    }

    /// Render a widget with `extra_indent` added for the duration of
    /// the walk below it. Also collects the widget's inline
    /// activation script.
    pub fn render(&mut self, extra_indent: &str, widget: &dyn Widget) -> Result<()> {
        let saved_len = self.indent.len();
        self.indent.push_str(extra_indent);
        let res = widget.render_html(self);
        self.indent.truncate(saved_len);
        res?;
        if let Some(js) = widget.render_js() {
            self.js.push_str(&js);
            self.js.push('\n');
        }
        Ok(())
    }

    pub fn add_css_file(&mut self, url: &str) {
        if ! self.css_files.iter().any(|u| u == url) {
            self.css_files.push(KString::from_ref(url));
        }
    }

    pub fn add_js_file(&mut self, url: &str) {
        if ! self.js_files.iter().any(|u| u == url) {
            self.js_files.push(KString::from_ref(url));
        }
    }

    pub fn add_css(&mut self, css: &str) {
        self.css.push_str(css);
        self.css.push('\n');
    }

    pub fn add_js(&mut self, js: &str) {
        self.js.push_str(js);
        self.js.push('\n');
    }

    pub fn html(&self) -> &str { &self.html }
    pub fn css_files(&self) -> &[KString] { &self.css_files }
    pub fn js_files(&self) -> &[KString] { &self.js_files }
    pub fn css(&self) -> &str { &self.css }
    pub fn js(&self) -> &str { &self.js }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Widget, WidgetBase};

    #[derive(Debug)]
    struct Leaf {
        base: WidgetBase,
        css_url: &'static str,
    }
    impl Leaf {
        fn new(id: &str, css_url: &'static str) -> Self {
            Leaf { base: WidgetBase::with_id("Leaf", id), css_url }
        }
    }
    impl Widget for Leaf {
        fn base(&self) -> &WidgetBase { &self.base }
        fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
        fn class_name(&self) -> &'static str { "Leaf" }
        fn render_html(&self, out: &mut Renderer) -> Result<()> {
            out.add_css_file(self.css_url);
            out.append(&format!("<span{}></span>", self.base.base_attributes()));
            Ok(())
        }
    }

    #[test]
    fn t_indentation() {
        let mut r = Renderer::new();
        let leaf = Leaf::new("x", "/static/css/a.css");
        r.append("<div>");
        r.render("    ", &leaf).unwrap();
        r.append("</div>");
        assert_eq!(r.html(),
                   "<div>\n    <span id=\"x\"></span>\n</div>\n");
    }

    #[test]
    fn t_resource_dedup_keeps_first_registration_order() {
        let mut r = Renderer::new();
        let a = Leaf::new("a", "/static/css/a.css");
        let b = Leaf::new("b", "/static/css/b.css");
        let a2 = Leaf::new("a2", "/static/css/a.css");
        r.render("", &a).unwrap();
        r.render("", &b).unwrap();
        r.render("", &a2).unwrap();
        assert_eq!(r.css_files(), &["/static/css/a.css", "/static/css/b.css"]);
    }
}
