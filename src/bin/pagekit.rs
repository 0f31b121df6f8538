use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use kstring::KString;

use pagekit::acontext::AContext;
use pagekit::action::{ActionArgs, ActionTable};
use pagekit::apachelog::Logs;
use pagekit::page::{Page, PageError, PageState};
use pagekit::registry::{App, Registry};
use pagekit::settings::{Site, SiteSettings};
use pagekit::store::JsonFileStore;
use pagekit::util::log_basedir;
use pagekit::webparts::run_server;
use pagekit::widgets::layout::{Container, Div};
use pagekit::widgets::navigation::{NavBar, NavLink};
use pagekit::widgets::star_rating::StarRating;
use pagekit::widgets::text::Paragraph;
use pagekit::widgets::themes::ProfilePanel;

// ------------------------------------------------------------------
// The demo site

fn demo_nav() -> NavBar {
    let mut nav = NavBar::new("pagekit demo", "/");
    nav.append(NavLink::new("Home", "/"));
    nav.append(NavLink::new("Team", "/team"));
    nav.append(NavLink::new("About", "/page/about"));
    nav
}

fn demo_footer() -> Div {
    let mut footer = Div::with_classes(&["footer"]);
    footer.append(Paragraph::new("Built with pagekit."));
    footer
}

struct HomePage;

fn rate(_page: &HomePage, state: &mut PageState, args: &ActionArgs)
        -> Result<()> {
    let rating = args.xget("rating")?;
    if let Some(slot) = state.slot("rating") {
        state.add_javascript(&format!(
            "PageKit.setRating(\"{}\", {});", slot.selector(), rating));
    }
    state.set_data("rating", rating);
    Ok(())
}

fn add_note(_page: &HomePage, state: &mut PageState, args: &ActionArgs)
            -> Result<()> {
    let text = args.xget("text")?;
    state.append(Paragraph::new(text));
    Ok(())
}

impl Page for HomePage {
    fn render_page(&self, _context: &AContext, page: &mut PageState,
                   _args: &[KString]) -> Result<(), PageError> {
        page.title = "Home".into();
        page.description = "pagekit demo site".into();
        page.set_nav(demo_nav());
        page.set_footer(demo_footer());

        let intro = page.text("home.intro",
                              Some("Welcome to the pagekit demo."))?;
        page.append_row(Paragraph::new(intro));

        let container = Container::new();
        page.keep("notes", &container).map_err(anyhow::Error::from)?;
        page.append(container);

        let rating = StarRating::new(Some(4), false);
        page.keep("rating", &rating).map_err(anyhow::Error::from)?;
        page.append_row(rating);
        Ok(())
    }

    fn actions(&self) -> ActionTable<Self> {
        ActionTable::new()
            .with("rate", rate)
            .with("add_note", add_note)
    }
}

struct TeamPage;

impl Page for TeamPage {
    fn render_page(&self, _context: &AContext, page: &mut PageState,
                   _args: &[KString]) -> Result<(), PageError> {
        page.title = "Team".into();
        page.set_nav(demo_nav());
        page.set_footer(demo_footer());
        page.add_crumb("Home", "/");
        page.add_crumb("Team", "/team");
        page.append_row(ProfilePanel::new(
            "Jane Doe",
            "/static/img/jane.jpg",
            "/static/img/bg.jpg",
            "Runs the demo."));
        Ok(())
    }
}

struct DemoApp;

impl App for DemoApp {
    fn mount(&self, registry: &mut Registry) -> Result<()> {
        registry
            .add_page("/", HomePage)
            .add_page_with_redirects("/team", &["/people"], TeamPage);
        Ok(())
    }
}

// ------------------------------------------------------------------
// Main

#[derive(Parser, Debug)]
#[clap(about = "Serve the pagekit demo site.")]
struct Opts {
    /// Address to listen on
    #[clap(long, default_value = "127.0.0.1:8000")]
    listen: String,

    /// Path to the JSON record store
    #[clap(long, default_value = "data/store.json")]
    store: String,

    /// Directory for access and error logs; defaults to
    /// ~/log/<program name>/
    #[clap(long)]
    logdir: Option<String>,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let mut settings = SiteSettings::from_env()?;
    if settings.asset_dir.is_none() {
        settings.asset_dir = Some("assets".into());
    }
    let store = Arc::new(JsonFileStore::open(&opts.store)?);
    let site = Site::new(settings, Some(store));

    let mut registry = Registry::new(site);
    registry.mount(&DemoApp)?;

    let logdir = match opts.logdir {
        Some(d) => d,
        None => log_basedir()?,
    };
    let logs = Logs::open_in_basedir(&logdir, false)?;

    let siterouter = Arc::new(registry.into_router(logs, None)?);
    eprintln!("listening on http://{}/", opts.listen);
    let join = run_server("pagekit-server", opts.listen, None, siterouter)?;
    join.join().expect("server thread never panics");
    Ok(())
}
