//! Layout widgets: containers, rows, spacers, panels.

use anyhow::Result;

use crate::render::Renderer;
use crate::widget::{Widget, WidgetBase, Collection, ParamSpec};

#[derive(Debug)]
pub struct Container {
    base: WidgetBase,
    items: Collection,
}

impl Container {
    pub fn new() -> Self {
        let mut base = WidgetBase::new("Container");
        base.add_class("container");
        Container { base, items: Collection::new() }
    }

    pub fn append(&mut self, widget: impl Widget + 'static) {
        self.items.append(widget);
    }

    pub fn insert(&mut self, index: usize, widget: impl Widget + 'static) {
        self.items.insert(index, widget);
    }

    pub fn items(&self) -> &Collection {
        &self.items
    }
}

impl Default for Container {
    fn default() -> Self {
        Container::new()
    }
}

impl Widget for Container {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Container" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "items", type_name: "Collection",
                      description: "Items in the container" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<div{}>", self.base.base_attributes()));
        out.render("    ", &self.items)?;
        out.append("</div>");
        Ok(())
    }
}

#[derive(Debug)]
pub struct Div {
    base: WidgetBase,
    items: Collection,
}

impl Div {
    pub fn new() -> Self {
        Div { base: WidgetBase::new("Div"), items: Collection::new() }
    }

    pub fn with_classes(classes: &[&str]) -> Self {
        let mut div = Div::new();
        for class in classes {
            div.base.add_class(class);
        }
        div
    }

    pub fn append(&mut self, widget: impl Widget + 'static) {
        self.items.append(widget);
    }
}

impl Widget for Div {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Div" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "items", type_name: "Collection",
                      description: "Items in the div" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<div{}>", self.base.base_attributes()));
        out.render("    ", &self.items)?;
        out.append("</div>");
        Ok(())
    }
}

#[derive(Debug)]
pub struct Row {
    base: WidgetBase,
    items: Collection,
}

impl Row {
    pub fn new() -> Self {
        let mut base = WidgetBase::new("Row");
        base.add_class("row");
        Row { base, items: Collection::new() }
    }

    /// The common single-column row.
    pub fn of(widget: impl Widget + 'static) -> Self {
        let mut row = Row::new();
        let mut div = Div::with_classes(&["col-md-12"]);
        div.append(widget);
        row.append(div);
        row
    }

    pub fn append(&mut self, widget: impl Widget + 'static) {
        self.items.append(widget);
    }
}

impl Widget for Row {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Row" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "items", type_name: "Collection",
                      description: "Columns in the row" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<div{}>", self.base.base_attributes()));
        out.render("    ", &self.items)?;
        out.append("</div>");
        Ok(())
    }
}

#[derive(Debug)]
pub struct Spacer {
    base: WidgetBase,
    height: u32,
}

impl Spacer {
    pub fn new() -> Self {
        Spacer::with_height(20)
    }

    pub fn with_height(height: u32) -> Self {
        Spacer { base: WidgetBase::new("Spacer"), height }
    }
}

impl Widget for Spacer {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Spacer" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "height", type_name: "int",
                      description: "Height of the spacer in pixels" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<div{} style=\"height:{}px;\"></div>",
                            self.base.base_attributes(), self.height));
        Ok(())
    }
}

#[derive(Debug)]
pub struct Panel {
    base: WidgetBase,
    heading: String,
    items: Collection,
}

impl Panel {
    pub fn new(heading: impl Into<String>) -> Self {
        let mut base = WidgetBase::new("Panel");
        base.add_class("panel");
        base.add_class("panel-default");
        Panel { base, heading: heading.into(), items: Collection::new() }
    }

    pub fn append(&mut self, widget: impl Widget + 'static) {
        self.items.append(widget);
    }
}

impl Widget for Panel {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Panel" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "heading", type_name: "string",
                      description: "Heading of the panel" },
          ParamSpec { name: "items", type_name: "Collection",
                      description: "Items in the panel body" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<div{}>", self.base.base_attributes()));
        if ! self.heading.is_empty() {
            out.append(&format!("    <div class=\"panel-heading\">{}</div>",
                                self.heading));
        }
        out.append("    <div class=\"panel-body\">");
        out.render("        ", &self.items)?;
        out.append("    </div>");
        out.append("</div>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_container() {
        let mut c = Container::new().with_id("c1");
        c.append(Spacer::with_height(10).with_id("s1"));
        let mut r = Renderer::new();
        r.render("", &c).unwrap();
        assert_eq!(r.html(),
                   "<div id=\"c1\" class=\"container\">\n\
                    \x20   <div id=\"s1\" style=\"height:10px;\"></div>\n\
                    </div>\n");
    }

    #[test]
    fn t_row_of() {
        let row = Row::of(Spacer::with_height(1).with_id("s"));
        let mut r = Renderer::new();
        r.render("", &row).unwrap();
        let html = r.html();
        assert!(html.contains("class=\"row\""));
        assert!(html.contains("class=\"col-md-12\""));
        assert!(html.contains("id=\"s\""));
    }
}
