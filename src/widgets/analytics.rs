//! Analytics tracking tag, injected at the top of every tracked
//! page.

use anyhow::Result;

use crate::render::Renderer;
use crate::widget::{Widget, WidgetBase, ParamSpec};

#[derive(Debug)]
pub struct AnalyticsTag {
    base: WidgetBase,
    code: String,
}

impl AnalyticsTag {
    pub fn new(code: impl Into<String>) -> Self {
        AnalyticsTag { base: WidgetBase::new("AnalyticsTag"), code: code.into() }
    }
}

impl Widget for AnalyticsTag {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "AnalyticsTag" }
    fn params(&self) -> &'static [ParamSpec] {
        &[ParamSpec { name: "code", type_name: "string",
                      description: "Tracking property code" }]
    }
    /// No markup, only script.
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        out.add_js_file(&format!(
            "https://www.googletagmanager.com/gtag/js?id={}", self.code));
        Ok(())
    }
    fn render_js(&self) -> Option<String> {
        Some(format!(
            "window.dataLayer = window.dataLayer || [];\
             function gtag(){{dataLayer.push(arguments);}}\
             gtag('js', new Date());gtag('config', '{}');",
            self.code))
    }
}
