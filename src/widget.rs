//! The widget object model: nodes with a stable identity and a class
//! tag that serialize themselves to HTML/CSS/JS fragments, ordered
//! trees of them, and the reference-only placeholder used to resume
//! partial state across the stateless request cycle.

use std::fmt::Debug;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use kstring::KString;
use serde::{Serialize, Deserialize};

use crate::render::Renderer;

static NEXT_WIDGET_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Introspective description of one declared widget parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub type_name: &'static str,
    pub description: &'static str,
}

/// The serialized identity of a widget: what the keep_variables
/// manifest stores per kept slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRef {
    pub id: KString,
    pub class_name: KString,
}

/// The state every widget carries: its identity and CSS classes.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: KString,
    classes: Vec<KString>,
}

impl WidgetBase {
    pub fn new(class_name: &str) -> Self {
        let n = NEXT_WIDGET_SERIAL.fetch_add(1, Ordering::Relaxed);
        WidgetBase {
            id: KString::from_string(format!("{}-{}",
                                             class_name.to_lowercase(), n)),
            classes: Vec::new(),
        }
    }

    pub fn with_id(_class_name: &str, id: &str) -> Self {
        WidgetBase {
            id: KString::from_ref(id),
            classes: Vec::new(),
        }
    }

    pub fn id(&self) -> &KString {
        &self.id
    }

    pub fn set_id(&mut self, id: &str) {
        self.id = KString::from_ref(id);
    }

    pub fn add_class(&mut self, class: &str) {
        if ! self.classes.iter().any(|c| c == class) {
            self.classes.push(KString::from_ref(class));
        }
    }

    /// ` id=".." class=".."` for inclusion in the widget's opening
    /// tag. The id is always emitted since script operations target
    /// widgets by it.
    pub fn base_attributes(&self) -> String {
        let mut s = String::new();
        write!(&mut s, " id=\"{}\"", self.id).expect("writing to String");
        if ! self.classes.is_empty() {
            write!(&mut s, " class=\"{}\"",
                   itertools::join(self.classes.iter(), " "))
                .expect("writing to String");
        }
        s
    }
}

/// A node in the page tree. Identity is unique within a rendered
/// page; the class tag names the concrete type for the
/// reconstruction logic on the other side of a request cycle.
pub trait Widget: Debug {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;
    fn class_name(&self) -> &'static str;

    /// The declared parameters, for introspection.
    fn params(&self) -> &'static [ParamSpec] { &[] }

    /// Append the HTML fragment for this widget to the output;
    /// resource file URLs must be registered at most once each.
    fn render_html(&self, out: &mut Renderer) -> Result<()>;

    /// Inline activation script, if any.
    fn render_js(&self) -> Option<String> { None }

    fn id(&self) -> &KString {
        self.base().id()
    }

    /// Override the generated identity (stable anchors, tests).
    fn with_id(mut self, id: &str) -> Self where Self: Sized {
        self.base_mut().set_id(id);
        self
    }

    fn widget_ref(&self) -> WidgetRef {
        WidgetRef {
            id: self.id().clone(),
            class_name: KString::from_static(self.class_name()),
        }
    }
}

/// An ordered sequence of widgets. Order is render order; insertion
/// at arbitrary index is supported (used to prepend breadcrumbs).
#[derive(Debug)]
pub struct Collection {
    base: WidgetBase,
    items: Vec<Box<dyn Widget>>,
}

impl Collection {
    pub fn new() -> Self {
        Collection {
            base: WidgetBase::new("Collection"),
            items: Vec::new(),
        }
    }

    pub fn append(&mut self, widget: impl Widget + 'static) {
        self.items.push(Box::new(widget));
    }

    pub fn append_boxed(&mut self, widget: Box<dyn Widget>) {
        self.items.push(widget);
    }

    pub fn insert(&mut self, index: usize, widget: impl Widget + 'static) {
        self.items.insert(index, Box::new(widget));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Widget> {
        self.items.iter().map(|b| &**b)
    }
}

impl Default for Collection {
    fn default() -> Self {
        Collection::new()
    }
}

impl Widget for Collection {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
    fn class_name(&self) -> &'static str { "Collection" }

    /// A collection adds no markup of its own, just its items in
    /// order.
    fn render_html(&self, out: &mut Renderer) -> Result<()> {
        for item in self.iter() {
            out.render("", item)?;
        }
        Ok(())
    }
}

/// A reconstructed reference-only stand-in for a widget: carries
/// identity and class tag but no content. Created once per POST for
/// every name in the submitted manifest, discarded with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    widget_ref: WidgetRef,
}

impl Placeholder {
    pub fn new(id: &str, class_name: &str) -> Self {
        Placeholder {
            widget_ref: WidgetRef {
                id: KString::from_ref(id),
                class_name: KString::from_ref(class_name),
            }
        }
    }

    pub fn from_ref(widget_ref: WidgetRef) -> Self {
        Placeholder { widget_ref }
    }

    pub fn id(&self) -> &str {
        &self.widget_ref.id
    }

    pub fn class_name(&self) -> &str {
        &self.widget_ref.class_name
    }

    pub fn widget_ref(&self) -> &WidgetRef {
        &self.widget_ref
    }

    /// CSS selector addressing the client-side DOM node this
    /// placeholder stands for.
    pub fn selector(&self) -> String {
        format!("#{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tag {
        base: WidgetBase,
        tag: &'static str,
    }
    impl Tag {
        fn new(id: &str, tag: &'static str) -> Self {
            Tag { base: WidgetBase::with_id("Tag", id), tag }
        }
    }
    impl Widget for Tag {
        fn base(&self) -> &WidgetBase { &self.base }
        fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
        fn class_name(&self) -> &'static str { "Tag" }
        fn render_html(&self, out: &mut Renderer) -> Result<()> {
            out.append(&format!("<{}{}/>", self.tag, self.base.base_attributes()));
            Ok(())
        }
    }

    #[test]
    fn t_fresh_ids_are_distinct() {
        let a = WidgetBase::new("Div");
        let b = WidgetBase::new("Div");
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("div-"));
    }

    #[test]
    fn t_base_attributes() {
        let mut base = WidgetBase::with_id("Div", "d1");
        assert_eq!(base.base_attributes(), " id=\"d1\"");
        base.add_class("row");
        base.add_class("active");
        base.add_class("row");
        assert_eq!(base.base_attributes(), " id=\"d1\" class=\"row active\"");
    }

    #[test]
    fn t_collection_insert_keeps_render_order() {
        let mut c = Collection::new();
        c.append(Tag::new("b", "b"));
        c.append(Tag::new("i", "i"));
        c.insert(0, Tag::new("hr", "hr"));
        let mut r = Renderer::new();
        r.render("", &c).unwrap();
        assert_eq!(r.html(),
                   "<hr id=\"hr\"/>\n<b id=\"b\"/>\n<i id=\"i\"/>\n");
    }

    #[test]
    fn t_placeholder_carries_identity_only() {
        let w = Tag::new("t1", "b");
        let p = Placeholder::from_ref(w.widget_ref());
        assert_eq!(p.id(), "t1");
        assert_eq!(p.class_name(), "Tag");
        assert_eq!(p.selector(), "#t1");
    }
}
