//! The page handler layer: building a full widget tree for GET,
//! rehydrating kept identities and dispatching an action for POST.
//!
//! Cross-request "state" is entirely client-held: the keep_variables
//! manifest produced at the end of every GET render is resubmitted
//! verbatim with every POST, and the rehydration step turns it back
//! into placeholders before any action runs.

use std::fmt::Write as _;
use std::fmt::Debug;
use std::any::type_name;
use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Result, Context};
use kstring::KString;
use rouille::Response;
use rouille::input::post::raw_urlencoded_post_input;
use serde::Serialize;

use crate::acontext::AContext;
use crate::action::{ActionArgs, ActionError, ActionTable};
use crate::handler::Handler;
use crate::http_request_method::HttpRequestMethodSimple;
use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::manifest::{Manifest, ManifestError,
                      ACTION_FIELD, KEEP_VARIABLES_FIELD, CSRF_TOKEN_FIELD,
                      IDENTIFIER_FIELD};
use crate::ppath::PPath;
use crate::render::Renderer;
use crate::settings::Site;
use crate::store::{EditableText, now_unixtime};
use crate::warn;
use crate::webutils::{html_response, text_response, json_response};
use crate::widget::{Widget, Collection, Placeholder};
use crate::widgets::analytics::AnalyticsTag;
use crate::widgets::layout::{Spacer, Row};
use crate::widgets::navigation::BreadCrumbs;

/// The client glue that posts actions and applies returned patches;
/// linked into every full page.
const BASE_JS: &str = "/static/js/base.js";

/// The built-in action persisting editable-text changes.
const SAVE_TERM_ACTION: &str = "save_term";

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Page-construction routines raise this to say "no such
    /// resource"; it turns into the styled not-found response.
    #[error("page not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// What a page contributes to sitemap.xml: its bare route, nothing,
/// or the route joined with each of the given argument strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sitemap {
    Include,
    Exclude,
    Entries(Vec<KString>),
}

/// A page type. One value is registered per route and shared across
/// requests; all mutable state lives in the per-request `PageState`.
pub trait Page: Send + Sync + 'static {
    /// Build the page's widget tree. `args` are the positional path
    /// arguments (the route surplus).
    fn render_page(&self, context: &AContext, page: &mut PageState,
                   args: &[KString]) -> Result<(), PageError>;

    /// The explicitly allow-listed actions this page dispatches;
    /// nothing outside the table is reachable by name.
    fn actions(&self) -> ActionTable<Self> where Self: Sized {
        ActionTable::new()
    }

    /// Which URLs of this page belong in the sitemap.
    fn sitemap(&self, _site: &Site) -> Sitemap {
        Sitemap::Include
    }
}

/// Per-request page state: head metadata, the widget tree under
/// construction, the declared kept slots, and the POST-side
/// accumulators. Instantiated once per request, gone at response
/// time.
pub struct PageState {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub robots_index: bool,
    pub robots_follow: bool,
    /// Whether the requesting viewer may edit editable texts.
    pub edit_mode: bool,
    /// Client-chosen identifier resubmitted with a POST, if any.
    pub identifier: Option<String>,

    // the tree
    items: Collection, // the primary container
    modals: Collection,
    nav: Option<Box<dyn Widget>>,
    main: Option<Box<dyn Widget>>,
    footer: Option<Box<dyn Widget>>,
    crumbs: Vec<(String, String)>, // (name, url)

    // kept identity
    slots: Manifest,
    placeholders: BTreeMap<KString, Placeholder>,

    // POST accumulators
    html: String,
    javascript: String,
    data: serde_json::Map<String, serde_json::Value>,

    site: Arc<Site>,
    handler_name: KString,
}

impl PageState {
    pub fn new(site: Arc<Site>, handler_name: KString) -> Self {
        PageState {
            title: String::new(),
            description: String::new(),
            keywords: String::new(),
            author: String::new(),
            robots_index: true,
            robots_follow: true,
            edit_mode: false,
            identifier: None,
            items: Collection::new(),
            modals: Collection::new(),
            nav: None,
            main: None,
            footer: None,
            crumbs: Vec::new(),
            slots: Manifest::new(),
            placeholders: BTreeMap::new(),
            html: String::new(),
            javascript: String::new(),
            data: serde_json::Map::new(),
            site,
            handler_name,
        }
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    // -- building the tree ------------------------------------------

    /// Append to the primary container.
    pub fn append(&mut self, widget: impl Widget + 'static) {
        self.items.append(widget);
    }

    /// Append wrapped in the common single-column row.
    pub fn append_row(&mut self, widget: impl Widget + 'static) {
        self.items.append(Row::of(widget));
    }

    pub fn items(&self) -> &Collection {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Collection {
        &mut self.items
    }

    pub fn modals_mut(&mut self) -> &mut Collection {
        &mut self.modals
    }

    pub fn set_nav(&mut self, nav: impl Widget + 'static) {
        self.nav = Some(Box::new(nav));
    }

    pub fn set_main(&mut self, main: impl Widget + 'static) {
        self.main = Some(Box::new(main));
    }

    pub fn set_footer(&mut self, footer: impl Widget + 'static) {
        self.footer = Some(Box::new(footer));
    }

    pub fn add_crumb(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.crumbs.push((name.into(), url.into()));
    }

    // -- kept identity ----------------------------------------------

    /// Declare a kept slot: record the widget's identity under `name`
    /// in the manifest that the client round-trips. Structural names
    /// are rejected.
    pub fn keep(&mut self, name: &str, widget: &dyn Widget)
                -> Result<(), ManifestError> {
        self.slots.insert(name, widget.widget_ref())
    }

    pub fn manifest(&self) -> &Manifest {
        &self.slots
    }

    /// POST side: restore every name in the submitted manifest as a
    /// placeholder. References, not content.
    pub fn rehydrate(&mut self, manifest: Manifest) {
        for (name, widget_ref) in manifest.iter() {
            self.placeholders.insert(
                name.clone(), Placeholder::from_ref(widget_ref.clone()));
        }
        self.slots = manifest;
    }

    /// The placeholder rehydrated for `name`, if the client kept one.
    pub fn slot(&self, name: &str) -> Option<&Placeholder> {
        self.placeholders.get(name)
    }

    // -- POST accumulators ------------------------------------------

    pub fn add_javascript(&mut self, script: &str) {
        self.javascript.push_str(script);
    }

    pub fn add_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub fn set_data(&mut self, key: &str,
                    value: impl Into<serde_json::Value>) {
        self.data.insert(key.to_string(), value.into());
    }

    // -- editable texts ---------------------------------------------

    /// Load the named text record, creating it with the default on
    /// first use.
    pub fn text(&mut self, name: &str, default_txt: Option<&str>)
                -> Result<String> {
        let store = self.site.xstore()?;
        if let Some(t) = store.load_text(name)? {
            return Ok(t.content);
        }
        let t = EditableText {
            name: KString::from_ref(name),
            content: default_txt.unwrap_or(name).to_string(),
            handler_name: self.handler_name.clone(),
            last_used: now_unixtime(),
        };
        store.save_text(&t)?;
        Ok(t.content)
    }

    // -- serialization ----------------------------------------------

    /// The full document for a GET response. Consumes the breadcrumb
    /// entries (they are moved into the primary container).
    fn output_html(&mut self) -> Result<String> {
        if ! self.crumbs.is_empty() {
            // prepend into the primary container, preceded by a spacer
            let crumbs = std::mem::take(&mut self.crumbs);
            self.items.insert(0, Spacer::new());
            self.items.insert(1, Row::of(BreadCrumbs::new(crumbs)));
        }

        let mut renderer = Renderer::new();
        renderer.add_js_file(BASE_JS);
        renderer.render("        ", &self.modals)?;
        if let Some(nav) = &self.nav {
            renderer.render("        ", &**nav)?;
        }
        if let Some(main) = &self.main {
            renderer.render("        ", &**main)?;
        }
        renderer.render("        ", &self.items)?;
        if let Some(footer) = &self.footer {
            renderer.render("        ", &**footer)?;
        }

        let mut doc = String::new();
        let w = &mut doc;
        writeln!(w, "<!DOCTYPE html>")?;
        writeln!(w, "<html>")?;
        writeln!(w, "    <head>")?;
        writeln!(w, "        <meta charset=\"utf-8\">")?;
        writeln!(w, "        <title>{}</title>", self.title)?;
        writeln!(w, "        <meta name=\"description\" content=\"{}\">",
                 self.description.replace('"', "'"))?;
        writeln!(w, "        <meta name=\"keywords\" content=\"{}\">",
                 self.keywords)?;
        writeln!(w, "        <meta name=\"author\" content=\"{}\">",
                 self.author)?;
        writeln!(w, "        <meta name=\"robots\" content=\"{}, {}\">",
                 if self.robots_index { "index" } else { "noindex" },
                 if self.robots_follow { "follow" } else { "nofollow" })?;
        for css_file in renderer.css_files() {
            writeln!(w, "        <link rel=\"stylesheet\" href=\"{}\"/>",
                     css_file)?;
        }
        if ! renderer.css().is_empty() {
            writeln!(w, "        <style>")?;
            write!(w, "{}", renderer.css())?;
            writeln!(w, "        </style>")?;
        }
        writeln!(w, "    </head>")?;
        writeln!(w, "    <body>")?;
        write!(w, "{}", renderer.html())?;
        writeln!(w, "        <script>var keep_variables = {};</script>",
                 serde_json::to_string(&self.slots.to_json())?)?;
        for js_file in renderer.js_files() {
            writeln!(w, "        <script src=\"{}\"></script>", js_file)?;
        }
        if ! renderer.js().is_empty() {
            writeln!(w, "        <script>")?;
            write!(w, "{}", renderer.js())?;
            writeln!(w, "        </script>")?;
        }
        writeln!(w, "    </body>")?;
        writeln!(w, "</html>")?;
        Ok(doc)
    }
}

/// The POST response body: incremental patches the client-side
/// script applies to the already-loaded page.
#[derive(Serialize)]
struct Patch<'a> {
    javascript: &'a str,
    html: &'a str,
    data: &'a serde_json::Map<String, serde_json::Value>,
}

fn save_term(page: &mut PageState, args: &ActionArgs) -> Result<()> {
    if ! page.edit_mode {
        return Err(ActionError::EditModeRequired(
            KString::from_static(SAVE_TERM_ACTION)).into());
    }
    let name = args.xget("name")?;
    let content = args.xget("content")?;
    let store = page.site().xstore()?;
    let mut text = store.load_text(name)?.with_context(
        || format!("no editable text {name:?}"))?;
    text.content = content.to_string();
    text.last_used = now_unixtime();
    store.save_text(&text)?;
    Ok(())
}

/// Adapter making a `Page` routable: owns the shared page value, its
/// action table and the unique name the registry assigned.
pub struct PageHandler<P: Page> {
    page: Arc<P>,
    site: Arc<Site>,
    actions: ActionTable<P>,
    unique_name: KString,
}

impl<P: Page> PageHandler<P> {
    pub fn new(page: Arc<P>, site: Arc<Site>, unique_name: KString) -> Self {
        let actions = page.actions();
        PageHandler { page, site, actions, unique_name }
    }

    pub fn unique_name(&self) -> &KString {
        &self.unique_name
    }

    fn fresh_page_state(&self, context: &AContext) -> PageState {
        let mut page = PageState::new(self.site.clone(),
                                      self.unique_name.clone());
        page.edit_mode = self.site.settings.is_admin_request(context);
        page
    }

    fn handle_get(&self, context: &AContext, args: &[KString])
                  -> Result<Option<Response>> {
        let mut page = self.fresh_page_state(context);
        if let Some(code) = &self.site.settings.analytics_code {
            page.append(AnalyticsTag::new(code));
        }
        match self.page.render_page(context, &mut page, args) {
            Ok(()) => (),
            Err(PageError::NotFound) => return Ok(None), // -> 404 by the caller
            Err(PageError::Other(e)) => return Err(e),
        }
        let doc = page.output_html()?;
        Ok(Some(html_response(HttpResponseStatusCode::OK200, doc)))
    }

    /// The action dispatch cycle: rehydration, argument collection,
    /// dispatch, partial render; in that order, always.
    fn handle_post(&self, context: &AContext, args: &[KString])
                   -> Result<Response> {
        let fields = raw_urlencoded_post_input(context.request())
            .context("reading POST body")?;

        let mut page = self.fresh_page_state(context);
        let mut action = String::new();
        let mut keep_json: Option<String> = None;
        let mut action_args = ActionArgs::new(args.to_vec());
        for (name, value) in fields {
            match name.as_str() {
                ACTION_FIELD => action = value,
                KEEP_VARIABLES_FIELD => keep_json = Some(value),
                CSRF_TOKEN_FIELD => (),
                IDENTIFIER_FIELD => page.identifier = Some(value),
                _ => action_args.push(&name, value),
            }
        }

        // Step 1: rehydration. A malformed manifest is a fault, not
        // silently dropped state.
        let manifest = Manifest::from_json(
            keep_json.as_deref().unwrap_or("{}"))
            .context("parsing keep_variables")?;
        page.rehydrate(manifest);

        // Step 3: dispatch, allow-listed names only.
        if ! action.is_empty() {
            let result = match self.actions.get(&action) {
                Some(f) => f(&self.page, &mut page, &action_args),
                None if action == SAVE_TERM_ACTION =>
                    save_term(&mut page, &action_args),
                None => {
                    let e = ActionError::UnknownAction(
                        KString::from_ref(&action));
                    warn!("{e}");
                    return Ok(text_response(
                        HttpResponseStatusCode::BadRequest400,
                        "text/plain; charset=utf-8",
                        format!("{e}\n")));
                }
            };
            if let Err(e) = result {
                return match e.downcast_ref::<ActionError>() {
                    Some(ActionError::MissingArgument(_)) =>
                        Ok(text_response(
                            HttpResponseStatusCode::BadRequest400,
                            "text/plain; charset=utf-8",
                            format!("{e}\n"))),
                    Some(ActionError::EditModeRequired(_)) =>
                        Ok(text_response(
                            HttpResponseStatusCode::Forbidden403,
                            "text/plain; charset=utf-8",
                            format!("{e}\n"))),
                    _ => Err(e),
                };
            }
        }

        // Step 4: partial render of the primary container, appended
        // to whatever the action accumulated.
        let mut renderer = Renderer::new();
        renderer.render("", &page.items)?;
        page.html.push_str(renderer.html());
        page.javascript.push_str(renderer.js());

        json_response(HttpResponseStatusCode::OK200, &Patch {
            javascript: &page.javascript,
            html: &page.html,
            data: &page.data,
        })
    }
}

impl<P: Page> Debug for PageHandler<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("PageHandler({}, {})",
                                 type_name::<P>(), self.unique_name))
    }
}

impl<P: Page> Handler for PageHandler<P> {
    fn call(
        &self,
        context: &AContext,
        method: HttpRequestMethodSimple,
        pathrest: &PPath<KString>)
        -> Result<Option<Response>> {
        let args: Vec<KString> = pathrest.segments().to_vec();
        match method {
            HttpRequestMethodSimple::GET |
            HttpRequestMethodSimple::HEAD => self.handle_get(context, &args),
            HttpRequestMethodSimple::POST =>
                self.handle_post(context, &args).map(Some),
        }
    }
}

// ------------------------------------------------------------------

/// Drive a page's request cycle without a network socket; for tests
/// and sanity checks.
pub mod testing {
    use super::*;
    use std::io::Read;
    use itertools::Itertools;
    use rouille::Request;

    use crate::settings::SiteSettings;
    use crate::store::MemStore;
    use crate::url_encoding::url_encode;

    pub fn test_site() -> Arc<Site> {
        Site::new(SiteSettings::default(), Some(Arc::new(MemStore::new())))
    }

    fn response_parts(response: Response) -> Result<(u16, String)> {
        let status = response.status_code;
        let (mut reader, _len) = response.data.into_reader_and_size();
        let mut body = String::new();
        reader.read_to_string(&mut body)?;
        Ok((status, body))
    }

    fn run<P: Page>(site: &Arc<Site>, page: P, request: &Request,
                    args: &[&str]) -> Result<Option<(u16, String)>> {
        let handler = PageHandler::new(Arc::new(page), site.clone(),
                                       KString::from_static("TestPage-1"));
        let context = AContext::new(request, "127.0.0.1:80")?;
        let method = context.method().to_simple().expect("tests use GET/POST");
        let pathrest = PPath::new(
            false, false, args.iter().map(|s| KString::from_ref(s)).collect());
        match handler.call(&context, method, &pathrest)? {
            Some(response) => Ok(Some(response_parts(response)?)),
            None => Ok(None),
        }
    }

    /// GET cycle; `args` are the positional path arguments the router
    /// would pass. None means the page reported not-found.
    pub fn get<P: Page>(site: &Arc<Site>, page: P, url: &str, args: &[&str])
                        -> Result<Option<(u16, String)>> {
        let request = Request::fake_http("GET", url, vec![], vec![]);
        run(site, page, &request, args)
    }

    /// POST cycle with the given form fields.
    pub fn post<P: Page>(site: &Arc<Site>, page: P, url: &str, args: &[&str],
                         fields: &[(&str, &str)])
                         -> Result<Option<(u16, String)>> {
        let body = fields.iter()
            .map(|(n, v)| format!("{}={}", url_encode(n), url_encode(v)))
            .join("&");
        let request = Request::fake_http(
            "POST", url,
            vec![("Content-Type".to_owned(),
                  "application/x-www-form-urlencoded".to_owned())],
            body.into_bytes());
        run(site, page, &request, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::testing::{test_site, get, post};

    use crate::widgets::layout::Container;
    use crate::widgets::star_rating::StarRating;
    use crate::widgets::text::Paragraph;

    /// The page from the protocol walkthrough: keeps its container's
    /// identity and appends a note per add_note action.
    struct NotesPage;

    fn add_note(_page: &NotesPage, state: &mut PageState,
                args: &ActionArgs) -> Result<()> {
        let text = args.xget("text")?;
        state.append(Paragraph::new(text).with_id("note-1"));
        Ok(())
    }

    fn set_rating(_page: &NotesPage, state: &mut PageState,
                  args: &ActionArgs) -> Result<()> {
        let rating = args.xget("rating")?;
        if let Some(slot) = state.slot("rating") {
            let selector = slot.selector();
            state.add_javascript(&format!(
                "PageKit.setRating(\"{selector}\", {rating});"));
        }
        state.set_data("rating", args.xget("rating")?);
        Ok(())
    }

    impl Page for NotesPage {
        fn render_page(&self, _context: &AContext, page: &mut PageState,
                       args: &[KString]) -> Result<(), PageError> {
            if args.first().map(|s| s.as_str()) == Some("missing") {
                return Err(PageError::NotFound);
            }
            page.title = "Notes".into();
            let container = Container::new().with_id("c1");
            page.keep("container", &container).map_err(anyhow::Error::from)?;
            page.append(container);
            let rating = StarRating::new(Some(4), false).with_id("r1");
            page.keep("rating", &rating).map_err(anyhow::Error::from)?;
            page.append_row(rating);
            Ok(())
        }

        fn actions(&self) -> ActionTable<Self> {
            ActionTable::new()
                .with("add_note", add_note)
                .with("set_rating", set_rating)
        }
    }

    const KEEP: &str = "{\"container\":{\"id\":\"c1\",\"class_name\":\"Container\"},\
                        \"rating\":{\"id\":\"r1\",\"class_name\":\"StarRating\"}}";

    #[test]
    fn t_get_embeds_exactly_the_kept_slots() {
        let site = test_site();
        let (status, body) = get(&site, NotesPage, "/notes", &[])
            .unwrap().unwrap();
        assert_eq!(status, 200);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("<title>Notes</title>"));
        // the manifest, embedded as a JS string the client resubmits
        // verbatim
        let expected = format!(
            "var keep_variables = {};",
            serde_json::to_string(KEEP).unwrap());
        assert!(body.contains(&expected), "missing {expected:?} in {body}");
        assert!(body.contains("src=\"/static/js/base.js\""));
    }

    #[test]
    fn t_get_not_found_refuses() {
        let site = test_site();
        assert!(get(&site, NotesPage, "/notes/missing", &["missing"])
                .unwrap().is_none());
    }

    #[test]
    fn t_post_manifest_roundtrip_rehydrates_placeholders() {
        let site = test_site();
        // action that reads a rehydrated slot: set_rating targets the
        // kept rating widget by identity
        let (status, body) = post(&site, NotesPage, "/notes", &[], &[
            ("action", "set_rating"),
            ("keep_variables", KEEP),
            ("rating", "5"),
        ]).unwrap().unwrap();
        assert_eq!(status, 200);
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["javascript"],
                   "PageKit.setRating(\"#r1\", 5);");
        assert_eq!(v["data"]["rating"], "5");
    }

    #[test]
    fn t_post_add_note_renders_exactly_the_new_item() {
        let site = test_site();
        let (status, body) = post(&site, NotesPage, "/notes", &[], &[
            ("action", "add_note"),
            ("keep_variables", KEEP),
            ("text", "hello"),
        ]).unwrap().unwrap();
        assert_eq!(status, 200);
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["html"], "<p id=\"note-1\">hello</p>\n");
        assert_eq!(v["javascript"], "");
        assert_eq!(v["data"], serde_json::json!({}));
    }

    #[test]
    fn t_post_empty_action_dispatches_nothing() {
        let site = test_site();
        let (status, body) = post(&site, NotesPage, "/notes", &[], &[
            ("action", ""),
            ("keep_variables", KEEP),
        ]).unwrap().unwrap();
        assert_eq!(status, 200);
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["html"], "");
        assert_eq!(v["javascript"], "");
        assert_eq!(v["data"], serde_json::json!({}));
    }

    #[test]
    fn t_post_unknown_action_rejected_with_typed_error() {
        let site = test_site();
        let (status, body) = post(&site, NotesPage, "/notes", &[], &[
            ("action", "drop_table"),
            ("keep_variables", KEEP),
        ]).unwrap().unwrap();
        assert_eq!(status, 400);
        assert!(body.contains("unknown action \"drop_table\""));
    }

    #[test]
    fn t_post_malformed_manifest_is_a_fault() {
        let site = test_site();
        let err = post(&site, NotesPage, "/notes", &[], &[
            ("action", ""),
            ("keep_variables", "{broken"),
        ]).unwrap_err();
        assert!(format!("{err:#}").contains("keep_variables"));
    }

    #[test]
    fn t_post_identifier_not_an_argument() {
        // identifier lands on the page state, not in the action args
        let site = test_site();
        let (status, _body) = post(&site, NotesPage, "/notes", &[], &[
            ("action", "add_note"),
            ("keep_variables", KEEP),
            ("identifier", "widget-77"),
            ("text", "hi"),
        ]).unwrap().unwrap();
        assert_eq!(status, 200);
    }

    #[test]
    fn t_save_term_requires_edit_mode() {
        let site = test_site();
        let (status, body) = post(&site, NotesPage, "/notes", &[], &[
            ("action", "save_term"),
            ("keep_variables", "{}"),
            ("name", "greeting"),
            ("content", "hi"),
        ]).unwrap().unwrap();
        assert_eq!(status, 403);
        assert!(body.contains("requires edit mode"));
    }

    struct TextPage;
    impl Page for TextPage {
        fn render_page(&self, _context: &AContext, page: &mut PageState,
                       _args: &[KString]) -> Result<(), PageError> {
            let greeting = page.text("greeting", Some("Welcome!"))?;
            page.append(Paragraph::new(greeting));
            Ok(())
        }
    }

    #[test]
    fn t_editable_text_created_on_first_use() {
        let site = test_site();
        let (_, body) = get(&site, TextPage, "/", &[]).unwrap().unwrap();
        assert!(body.contains("Welcome!"));
        let store = site.xstore().unwrap();
        let t = store.load_text("greeting").unwrap().unwrap();
        assert_eq!(t.content, "Welcome!");
        assert_eq!(t.handler_name, "TestPage-1");
    }
}
