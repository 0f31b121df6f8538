//! Navigation bar and breadcrumb widgets.

use anyhow::Result;

use crate::render::Renderer;
use crate::widget::{Widget, WidgetBase, Collection, ParamSpec};

#[derive(Debug)]
pub struct NavLink {
    base: WidgetBase,
    name: String,
    url: String,
}

impl NavLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        NavLink {
            base: WidgetBase::new("NavLink"),
            name: name.into(),
            url: url.into(),
        }
    }
}

impl Widget for NavLink {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "NavLink" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "name", type_name: "string",
                      description: "Name of the link" },
          ParamSpec { name: "url", type_name: "string",
                      description: "Target of the link" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<li{}><a href=\"{}\">{}</a></li>",
                            self.base.base_attributes(), self.url, self.name));
        Ok(())
    }
}

#[derive(Debug)]
pub struct NavBar {
    base: WidgetBase,
    brand: String,
    brand_url: String,
    items: Collection,
    /// Links shown at the right end; pages append here (e.g. an edit
    /// link in edit mode).
    pub right_items: Collection,
}

impl NavBar {
    pub fn new(brand: impl Into<String>, brand_url: impl Into<String>) -> Self {
        let mut base = WidgetBase::new("NavBar");
        base.add_class("navbar");
        base.add_class("navbar-default");
        NavBar {
            base,
            brand: brand.into(),
            brand_url: brand_url.into(),
            items: Collection::new(),
            right_items: Collection::new(),
        }
    }

    pub fn append(&mut self, link: NavLink) {
        self.items.append(link);
    }
}

impl Widget for NavBar {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "NavBar" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "brand", type_name: "string",
                      description: "Brand shown at the left end" },
          ParamSpec { name: "items", type_name: "Collection",
                      description: "Links in the bar" },
          ParamSpec { name: "right_items", type_name: "Collection",
                      description: "Links at the right end" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<nav{}>", self.base.base_attributes()));
        out.append(&format!("    <a class=\"navbar-brand\" href=\"{}\">{}</a>",
                            self.brand_url, self.brand));
        out.append("    <ul class=\"nav navbar-nav\">");
        out.render("        ", &self.items)?;
        out.append("    </ul>");
        if ! self.right_items.is_empty() {
            out.append("    <ul class=\"nav navbar-nav navbar-right\">");
            out.render("        ", &self.right_items)?;
            out.append("    </ul>");
        }
        out.append("</nav>");
        Ok(())
    }
}

/// The breadcrumb trail; the last entry is the current page and is
/// not linked.
#[derive(Debug)]
pub struct BreadCrumbs {
    base: WidgetBase,
    crumbs: Vec<(String, String)>, // (name, url)
}

impl BreadCrumbs {
    pub fn new(crumbs: Vec<(String, String)>) -> Self {
        let mut base = WidgetBase::new("BreadCrumbs");
        base.add_class("breadcrumb");
        BreadCrumbs { base, crumbs }
    }
}

impl Widget for BreadCrumbs {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "BreadCrumbs" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "crumbs", type_name: "list",
                      description: "Name and url per level, outermost first" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<ol{}>", self.base.base_attributes()));
        let last = self.crumbs.len().saturating_sub(1);
        for (i, (name, url)) in self.crumbs.iter().enumerate() {
            if i == last {
                out.append(&format!("    <li class=\"active\">{}</li>", name));
            } else {
                out.append(&format!("    <li><a href=\"{}\">{}</a></li>",
                                    url, name));
            }
        }
        out.append("</ol>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_breadcrumbs_last_entry_not_linked() {
        let bc = BreadCrumbs::new(vec![
            ("Home".into(), "/".into()),
            ("About".into(), "/page/about".into()),
        ]).with_id("bc");
        let mut r = Renderer::new();
        r.render("", &bc).unwrap();
        assert_eq!(r.html(),
                   "<ol id=\"bc\" class=\"breadcrumb\">\n\
                    \x20   <li><a href=\"/\">Home</a></li>\n\
                    \x20   <li class=\"active\">About</li>\n\
                    </ol>\n");
    }

    #[test]
    fn t_navbar() {
        let mut nav = NavBar::new("demo", "/").with_id("nav");
        nav.append(NavLink::new("About", "/page/about").with_id("l1"));
        let mut r = Renderer::new();
        r.render("", &nav).unwrap();
        let html = r.html();
        assert!(html.contains("navbar-brand"));
        assert!(html.contains("<li id=\"l1\"><a href=\"/page/about\">About</a></li>"));
        // no right-hand list unless something was put there
        assert!(! html.contains("navbar-right"));
    }
}
