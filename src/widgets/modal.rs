//! Modal dialog shell; shown/hidden by the client-side script.

use anyhow::Result;

use crate::render::Renderer;
use crate::widget::{Widget, WidgetBase, Collection, ParamSpec};

#[derive(Debug)]
pub struct Modal {
    base: WidgetBase,
    title: String,
    items: Collection,
}

impl Modal {
    pub fn new(title: impl Into<String>) -> Self {
        let mut base = WidgetBase::new("Modal");
        base.add_class("modal");
        Modal { base, title: title.into(), items: Collection::new() }
    }

    pub fn append(&mut self, widget: impl Widget + 'static) {
        self.items.append(widget);
    }
}

impl Widget for Modal {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Modal" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "title", type_name: "string",
                      description: "Title of the dialog" },
          ParamSpec { name: "items", type_name: "Collection",
                      description: "Items in the dialog body" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.append(&format!("<div{} style=\"display:none;\">",
                            self.base.base_attributes()));
        out.append("    <div class=\"modal-dialog\">");
        out.append("        <div class=\"modal-content\">");
        if ! self.title.is_empty() {
            out.append(&format!("            <div class=\"modal-header\">{}</div>",
                                self.title));
        }
        out.append("            <div class=\"modal-body\">");
        out.render("                ", &self.items)?;
        out.append("            </div>");
        out.append("        </div>");
        out.append("    </div>");
        out.append("</div>");
        Ok(())
    }
}
