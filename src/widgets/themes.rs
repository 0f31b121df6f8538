//! Themed presentation widgets.

use anyhow::Result;

use crate::render::Renderer;
use crate::widget::{Widget, WidgetBase, ParamSpec};

const PROFILE_CSS: &str = "/static/css/profile.css";

#[derive(Debug)]
pub struct ProfilePanel {
    base: WidgetBase,
    name: String,
    profile_pic: String,
    background_pic: String,
    description: String,
}

impl ProfilePanel {
    pub fn new(name: impl Into<String>,
               profile_pic: impl Into<String>,
               background_pic: impl Into<String>,
               description: impl Into<String>) -> Self {
        let mut base = WidgetBase::new("ProfilePanel");
        base.add_class("panel");
        base.add_class("panel-default");
        base.add_class("panel-profile");
        ProfilePanel {
            base,
            name: name.into(),
            profile_pic: profile_pic.into(),
            background_pic: background_pic.into(),
            description: description.into(),
        }
    }
}

impl Widget for ProfilePanel {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "ProfilePanel" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "name", type_name: "string",
                      description: "Name of the person" },
          ParamSpec { name: "profile_pic", type_name: "string",
                      description: "URL to the picture of the person" },
          ParamSpec { name: "background_pic", type_name: "string",
                      description: "URL to a background picture" },
          ParamSpec { name: "description", type_name: "string",
                      description: "Description of the person" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.add_css_file(PROFILE_CSS);
        out.append(&format!("<div{}>", self.base.base_attributes()));
        out.append(&format!("    <div class=\"panel-heading\" \
                             style=\"background-image: url({});\">",
                            self.background_pic));
        out.append("    </div>");
        out.append("    <div class=\"panel-body text-center\">");
        out.append(&format!("        <img class=\"panel-profile-img\" src=\"{}\">",
                            self.profile_pic));
        out.append(&format!("        <h5 class=\"panel-title\">{}</h5>", self.name));
        out.append(&format!("        <p class=\"m-b\">{}</p>", self.description));
        out.append("    </div>");
        out.append("</div>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_registers_css_once() {
        let a = ProfilePanel::new("A", "/a.png", "/bg.png", "first");
        let b = ProfilePanel::new("B", "/b.png", "/bg.png", "second");
        let mut r = Renderer::new();
        r.render("", &a).unwrap();
        r.render("", &b).unwrap();
        assert_eq!(r.css_files(), &[PROFILE_CSS]);
        assert!(r.html().contains("panel-title\">A</h5>"));
        assert!(r.html().contains("panel-title\">B</h5>"));
    }
}
