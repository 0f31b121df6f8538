//! Star rating input, rendered as a select that the client-side
//! script turns into stars.

use anyhow::Result;

use crate::render::Renderer;
use crate::widget::{Widget, WidgetBase, ParamSpec};

const STAR_RATING_JS: &str = "/static/js/star-rating.js";
const STAR_RATING_CSS: &str = "/static/css/star-rating.css";

#[derive(Debug)]
pub struct StarRating {
    base: WidgetBase,
    rating: Option<u8>, // 1..=5
    readonly: bool,
}

impl StarRating {
    pub fn new(rating: Option<u8>, readonly: bool) -> Self {
        StarRating { base: WidgetBase::new("StarRating"), rating, readonly }
    }
}

impl Widget for StarRating {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "StarRating" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "rating", type_name: "int",
                      description: "Current rating." },
          ParamSpec { name: "readonly", type_name: "bool",
                      description: "Is the rating read only?" }]
    }
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.add_js_file(STAR_RATING_JS);
        out.add_css_file(STAR_RATING_CSS);
        out.append(&format!("<select{}>", self.base.base_attributes()));
        for i in 1..=5u8 {
            out.append(&format!("    <option value=\"{}\"{}>{}</option>",
                                i,
                                if Some(i) == self.rating { " selected" } else { "" },
                                i));
        }
        out.append("</select>");
        Ok(())
    }
    fn render_js(&self) -> Option<String> {
        Some(format!("PageKit.starRating(\"#{}\", {{readonly: {}}});",
                     self.id(), self.readonly))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_render() {
        let w = StarRating::new(Some(3), true).with_id("r1");
        let mut r = Renderer::new();
        r.render("", &w).unwrap();
        assert!(r.html().contains("<option value=\"3\" selected>3</option>"));
        assert!(r.html().contains("<option value=\"4\">4</option>"));
        assert_eq!(r.js(),
                   "PageKit.starRating(\"#r1\", {readonly: true});\n");
        assert_eq!(r.js_files(), &[STAR_RATING_JS]);
        assert_eq!(r.css_files(), &[STAR_RATING_CSS]);
    }
}
