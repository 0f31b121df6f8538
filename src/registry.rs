//! Registration glue: sub-applications mount their pages here; the
//! registry assigns unique handler names from its own counter,
//! collects sitemap contributions, mounts the built-in endpoints and
//! produces the site's router.

use std::any::type_name;
use std::sync::{Arc, Mutex};

use anyhow::{Result, Context};
use kstring::KString;

use crate::acontext::AContext;
use crate::apachelog::Logs;
use crate::handler::{Handler, FileHandler, FnHandler, ExactFnHandler,
                     RedirectHandler};
use crate::http_request_method::HttpRequestMethodSimple;
use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::page::{Page, PageError, PageHandler, PageState, Sitemap};
use crate::ppath::PPath;
use crate::router::UniqueRouter;
use crate::settings::Site;
use crate::url_encoding::url_encode;
use crate::webutils::{errorpage_from_status, text_response, html_response};
use crate::widgets::text::Paragraph;
use rouille::Response;

/// A sub-application: mounts its page handlers into the registry.
pub trait App {
    fn mount(&self, registry: &mut Registry) -> Result<()>;
}

type SitemapFn = Box<dyn Fn(&Site) -> Sitemap + Send + Sync>;

struct RegEntry {
    route: KString,
    unique_name: KString,
    handler: Arc<dyn Handler>,
    /// None for plain handlers: they never appear in the sitemap.
    sitemap: Option<SitemapFn>,
    redirects: Vec<KString>,
}

fn short_type_name<T>() -> &'static str {
    let name = type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

pub struct Registry {
    site: Arc<Site>,
    // Owned here, not process-wide.
    unique_name_counter: u32,
    entries: Vec<RegEntry>,
}

impl Registry {
    pub fn new(site: Arc<Site>) -> Self {
        Registry {
            site,
            unique_name_counter: 0,
            entries: Vec::new(),
        }
    }

    pub fn site(&self) -> &Arc<Site> {
        &self.site
    }

    fn next_unique_name(&mut self, base: &str) -> KString {
        self.unique_name_counter += 1;
        KString::from_string(format!("{}-{}", base, self.unique_name_counter))
    }

    pub fn mount(&mut self, app: &dyn App) -> Result<()> {
        app.mount(self)
    }

    pub fn add_page<P: Page>(&mut self, route: &str, page: P) -> &mut Self {
        self.add_page_with_redirects(route, &[], page)
    }

    /// Register a page; `redirects` are additional routes answered
    /// with a permanent redirect to `route`.
    pub fn add_page_with_redirects<P: Page>(
        &mut self, route: &str, redirects: &[&str], page: P
    ) -> &mut Self {
        let unique_name = self.next_unique_name(short_type_name::<P>());
        let page = Arc::new(page);
        let sitemap_page = page.clone();
        let handler: Arc<dyn Handler> = Arc::new(PageHandler::new(
            page, self.site.clone(), unique_name.clone()));
        self.entries.push(RegEntry {
            route: KString::from_ref(route),
            unique_name,
            handler,
            sitemap: Some(Box::new(move |site| sitemap_page.sitemap(site))),
            redirects: redirects.iter().map(|r| KString::from_ref(r)).collect(),
        });
        self
    }

    /// Register a non-page handler; excluded from the sitemap.
    pub fn add_handler(&mut self, route: &str, handler: Arc<dyn Handler>)
                       -> &mut Self {
        let unique_name = self.next_unique_name("handler");
        self.entries.push(RegEntry {
            route: KString::from_ref(route),
            unique_name,
            handler,
            sitemap: None,
            redirects: Vec::new(),
        });
        self
    }

    /// The routes registered so far with their unique names; mostly
    /// for diagnostics.
    pub fn routes(&self) -> impl Iterator<Item = (&KString, &KString)> {
        self.entries.iter().map(|e| (&e.route, &e.unique_name))
    }

    /// Mount the built-in endpoints and build the router. Consumes
    /// the registry; nothing can be added to a running site.
    pub fn into_router(
        mut self,
        logs: Arc<Mutex<Logs>>,
        fallback: Option<Arc<dyn Handler>>,
    ) -> Result<SiteRouter> {
        self.mount_builtins();

        let mut router: UniqueRouter<Arc<dyn Handler>> = UniqueRouter::new();
        let mut sitemap_routes: Vec<(KString, SitemapFn)> = Vec::new();
        for entry in self.entries {
            let RegEntry { route, unique_name, handler, sitemap, redirects }
                = entry;
            router.add(route.as_str(), handler).with_context(
                || format!("registering {unique_name}"))?;
            for redirect in redirects {
                let target = route.to_string();
                router.add(redirect.as_str(),
                           Arc::new(RedirectHandler::new(
                               move |_context: &AContext| target.clone(),
                               HttpResponseStatusCode::MovedPermanently301)))
                    .with_context(
                        || format!("registering redirect for {unique_name}"))?;
            }
            if let Some(f) = sitemap {
                sitemap_routes.push((route, f));
            }
        }

        // sitemap.xml reads the page store per request, so it's
        // mounted on the finished route list
        let site = self.site.clone();
        router.add("/sitemap.xml", Arc::new(ExactFnHandler::new(
            move |context: &AContext, _method: HttpRequestMethodSimple| {
                Ok(text_response(HttpResponseStatusCode::OK200,
                                 "application/xml; charset=utf-8",
                                 sitemap_xml(context, &sitemap_routes, &site)))
            })))?;

        Ok(SiteRouter {
            router,
            fallback,
            logs,
            site: self.site,
        })
    }

    fn mount_builtins(&mut self) {
        let settings = self.site.settings.clone();

        self.add_handler("/robots.txt", Arc::new(ExactFnHandler::new(
            |_context: &AContext, _method: HttpRequestMethodSimple| {
                Ok(text_response(
                    HttpResponseStatusCode::OK200,
                    "text/plain",
                    "User-agent: *\r\n\
                     Disallow: /admin/*\r\n".to_string()))
            })));

        if let Some(asset_dir) = &settings.asset_dir {
            let files = Arc::new(FileHandler::new(asset_dir.clone()));
            self.add_handler("/static", files.clone());
            // favicon.ico at the root, served from the same directory
            self.add_handler("/favicon.ico", Arc::new(FnHandler::new(
                move |context: &AContext,
                      method: HttpRequestMethodSimple,
                      _pathrest: &PPath<KString>| {
                    files.call(context, method, &PPath::from_str("favicon.ico"))
                })));
        }

        if settings.use_static_pages && self.site.store.is_some() {
            self.add_page("/page", StaticPage);
        }

        if let Some(code) = settings.google_verification {
            self.add_handler(
                &format!("/{code}.html"),
                Arc::new(ExactFnHandler::new(
                    move |_context: &AContext, _method: HttpRequestMethodSimple| {
                        Ok(text_response(
                            HttpResponseStatusCode::OK200,
                            "text/html",
                            format!("google-site-verification: {code}.html")))
                    })));
        }

        if let Some(code) = settings.bing_verification {
            self.add_handler("/BingSiteAuth.xml", Arc::new(ExactFnHandler::new(
                move |_context: &AContext, _method: HttpRequestMethodSimple| {
                    Ok(text_response(
                        HttpResponseStatusCode::OK200,
                        "application/xml",
                        format!("<?xml version=\"1.0\"?>\
                                 <users><user>{code}</user></users>")))
                })));
        }

        if let Some(code) = settings.yandex_verification {
            self.add_handler(
                &format!("/yandex_{code}.html"),
                Arc::new(ExactFnHandler::new(
                    move |_context: &AContext, _method: HttpRequestMethodSimple| {
                        Ok(html_response(
                            HttpResponseStatusCode::OK200,
                            format!("<html><head><meta http-equiv=\"Content-Type\" \
                                     content=\"text/html; charset=UTF-8\"></head>\
                                     <body>Verification: {code}</body></html>")))
                    })));
        }
    }
}

fn sitemap_xml(context: &AContext,
               routes: &[(KString, SitemapFn)],
               site: &Site) -> String {
    let mut lines = Vec::new();
    lines.push("<?xml version=\"1.0\" encoding=\"UTF-8\"?>".to_string());
    lines.push("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"
               .to_string());
    for (route, sitemap) in routes {
        let mut push_loc = |path: &str| {
            lines.push(format!("    <url><loc>{}</loc></url>",
                               context.absolute_url(path)));
        };
        match sitemap(site) {
            Sitemap::Include => push_loc(route.as_str()),
            Sitemap::Exclude => (),
            Sitemap::Entries(entries) =>
                for entry in entries {
                    push_loc(&format!("{}/{}", route, url_encode(&entry)));
                }
        }
    }
    lines.push("</urlset>".to_string());
    lines.join("\r\n")
}

// ------------------------------------------------------------------

/// Pages loaded from the named static-page records in the store;
/// mounted under /page when configured.
pub struct StaticPage;

impl Page for StaticPage {
    fn render_page(&self, _context: &AContext, page: &mut PageState,
                   args: &[KString]) -> Result<(), PageError> {
        let url_name = args.first().ok_or(PageError::NotFound)?;
        let record = page.site().xstore()
            .map_err(PageError::Other)?
            .load_page(url_name.as_str())?
            .ok_or(PageError::NotFound)?;
        page.title = record.title;
        page.description = record.description;
        // body is stored sanitized, see the store contract
        page.append(Paragraph::new(record.body));
        Ok(())
    }

    fn sitemap(&self, site: &Site) -> Sitemap {
        match site.store.as_ref().map(|s| s.sitemap_pages()) {
            Some(Ok(pages)) => Sitemap::Entries(pages),
            _ => Sitemap::Exclude,
        }
    }
}

// ------------------------------------------------------------------

/// The finished routing table for one site plus where to log.
pub struct SiteRouter {
    router: UniqueRouter<Arc<dyn Handler>>,
    /// Tried when no routed handler accepted the path.
    fallback: Option<Arc<dyn Handler>>,
    pub logs: Arc<Mutex<Logs>>,
    pub site: Arc<Site>,
}

impl SiteRouter {
    pub fn handle_request(
        &self,
        context: &AContext,
        method: HttpRequestMethodSimple,
    ) -> (Arc<Mutex<Logs>>, anyhow::Result<Response>)
    {
        if let Some((handler, rest)) = self.router.get(context.path()) {
            match handler.call(context, method, &rest) {
                Ok(Some(response)) => return (self.logs.clone(), Ok(response)),
                Ok(None) => (),
                Err(e) => return (self.logs.clone(), Err(e)),
            }
        }
        if let Some(fallback) = self.fallback.as_ref() {
            match fallback.call(context, method, context.path()) {
                Ok(Some(response)) => return (self.logs.clone(), Ok(response)),
                Ok(None) => (),
                Err(e) => return (self.logs.clone(), Err(e)),
            }
        }
        (self.logs.clone(),
         Ok(errorpage_from_status(HttpResponseStatusCode::NotFound404)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    use rouille::Request;

    use crate::settings::{Site, SiteSettings};
    use crate::store::{MemStore, StaticPageRecord, Store};

    fn test_logs() -> Arc<Mutex<Logs>> {
        Arc::new(Mutex::new(Logs {
            access_log: Box::new(std::io::sink()),
            error_log: Box::new(std::io::sink()),
        }))
    }

    fn test_site_with_pages() -> Arc<Site> {
        let store = MemStore::new();
        store.save_page(&StaticPageRecord {
            url_name: KString::from_static("about"),
            title: "About us".into(),
            description: "who we are".into(),
            body: "Hello!".into(),
            sitemap: true,
        }).unwrap();
        store.save_page(&StaticPageRecord {
            url_name: KString::from_static("imprint"),
            title: "Imprint".into(),
            description: "".into(),
            body: "".into(),
            sitemap: false,
        }).unwrap();
        Site::new(SiteSettings {
            google_verification: Some("g00g".into()),
            ..SiteSettings::default()
        }, Some(Arc::new(store)))
    }

    fn fetch(router: &SiteRouter, method: &str, url: &str) -> (u16, String) {
        let request = Request::fake_http(method, url, vec![], vec![]);
        let context = AContext::new(&request, "127.0.0.1:80").unwrap();
        let simple = context.method().to_simple().unwrap();
        let (_logs, result) = router.handle_request(&context, simple);
        let response = result.unwrap();
        let status = response.status_code;
        let (mut reader, _) = response.data.into_reader_and_size();
        let mut body = String::new();
        reader.read_to_string(&mut body).unwrap();
        (status, body)
    }

    fn build_router(site: Arc<Site>) -> SiteRouter {
        let registry = Registry::new(site);
        registry.into_router(test_logs(), None).unwrap()
    }

    #[test]
    fn t_unique_names_are_per_registry() {
        let site = test_site_with_pages();
        let mut a = Registry::new(site.clone());
        let mut b = Registry::new(site);
        a.add_page("/x", StaticPage);
        b.add_page("/y", StaticPage);
        let name_a = a.routes().next().unwrap().1.clone();
        let name_b = b.routes().next().unwrap().1.clone();
        // two registries, same counter start; no process-wide state
        assert_eq!(name_a, "StaticPage-1");
        assert_eq!(name_b, "StaticPage-1");
    }

    #[test]
    fn t_static_page_route() {
        let router = build_router(test_site_with_pages());
        let (status, body) = fetch(&router, "GET", "/page/about");
        assert_eq!(status, 200);
        assert!(body.contains("<title>About us</title>"));
        assert!(body.contains("Hello!"));
        let (status, _) = fetch(&router, "GET", "/page/nosuchpage");
        assert_eq!(status, 404);
    }

    #[test]
    fn t_robots_txt() {
        let router = build_router(test_site_with_pages());
        let (status, body) = fetch(&router, "GET", "/robots.txt");
        assert_eq!(status, 200);
        assert_eq!(body, "User-agent: *\r\nDisallow: /admin/*\r\n");
    }

    #[test]
    fn t_google_verification() {
        let router = build_router(test_site_with_pages());
        let (status, body) = fetch(&router, "GET", "/g00g.html");
        assert_eq!(status, 200);
        assert_eq!(body, "google-site-verification: g00g.html");
    }

    #[test]
    fn t_sitemap_lists_flagged_static_pages_only() {
        let router = build_router(test_site_with_pages());
        let (status, body) = fetch(&router, "GET", "/sitemap.xml");
        assert_eq!(status, 200);
        assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(body.contains(
            "<url><loc>http://127.0.0.1:80/page/about</loc></url>"));
        assert!(! body.contains("imprint"));
        assert!(body.ends_with("</urlset>"));
    }

    #[test]
    fn t_redirect_routes() {
        let site = test_site_with_pages();
        let mut registry = Registry::new(site);
        registry.add_page_with_redirects("/page", &["/pages", "/info"],
                                         StaticPage);
        let router = registry.into_router(test_logs(), None).unwrap();
        let request = Request::fake_http("GET", "/pages", vec![], vec![]);
        let context = AContext::new(&request, "127.0.0.1:80").unwrap();
        let (_logs, result) = router.handle_request(
            &context, context.method().to_simple().unwrap());
        let response = result.unwrap();
        assert_eq!(response.status_code, 301);
        let location = response.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("location"))
            .map(|(_, v)| v.to_string());
        assert_eq!(location.as_deref(), Some("/page"));
    }

    #[test]
    fn t_unrouted_is_404() {
        let router = build_router(test_site_with_pages());
        let (status, _) = fetch(&router, "GET", "/no/such/route");
        assert_eq!(status, 404);
    }
}
