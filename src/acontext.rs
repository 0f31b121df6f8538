use std::{net::{SocketAddr, IpAddr}, time::SystemTime};

use anyhow::{Result, anyhow};
use kstring::KString;
use rouille::{Request, HeadersIter, input};

use crate::{ppath::PPath,
            http_request_method::HttpRequestMethod};

/// Per-request context: the parsed request path and method plus
/// whatever the handlers repeatedly want from the `Request`.
pub struct AContext<'r> {
    // Fallback for host(): what this server listens on; ip:port or
    // domain:port or whatever is deemed suitable
    listen_addr: &'r str, // ref might be valid for longer but we don't guarantee it
    path: PPath<KString>,
    path_string: String,
    now: SystemTime,
    method: HttpRequestMethod,
    request: &'r Request,
}

impl<'r> AContext<'r> {
    pub fn new(
        request: &'r Request, listen_addr: &'r str,
    ) -> Result<Self> {
        let path_original = request.url(); // path only
        let path_parsed: PPath<&str> = PPath::from_str(&path_original);
        let path: PPath<KString> = PPath::new(
            path_parsed.is_absolute(),
            path_parsed.ends_with_slash(),
            path_parsed.segments().iter().map(|s| KString::from_ref(s)).collect());
        let path_string = path.to_string();
        let method = HttpRequestMethod::maybe_from_str(request.method())?;

        Ok(AContext {
            listen_addr,
            path,
            path_string,
            now: SystemTime::now(),
            method,
            request,
        })
    }

    /// Like the request part in Apache style Combined Log Format
    pub fn request_line(&self) -> String {
        // `Request` does not appear to maintain the original request
        // line string, thus have to reconstruct it.
        format!("{} {}",
                self.request.method(),
                self.request.raw_url())
    }
    /// `foo` part in `?foo`
    pub fn query_string(&self) -> &str {
        self.request.raw_query_string()
    }
    pub fn user_agent(&self) -> Option<&str> {
        self.request.header("user-agent")
    }
    pub fn client_ip(&'r self) -> IpAddr {
        self.request.remote_addr().ip()
    }
    pub fn is_secure(&'r self) -> bool {
        self.request.is_secure()
    }
    pub fn method_str(&'r self) -> &'r str { self.request.method() }
    pub fn method(&self) -> HttpRequestMethod { self.method }
    pub fn is_post(&self) -> bool {
        self.method.is_post()
    }
    /// Only checks query parameters! For `POST` data, see
    /// [`rouille::input::post`].
    pub fn get_param(&self, name: &str) -> Option<String>  {
        self.request.get_param(name)
    }
    pub fn param(&self, name: &str) -> Result<String>  {
        self.get_param(name).ok_or_else(
            || anyhow!("missing param {name:?}"))
    }
    pub fn host(&self) -> Option<&str> { self.request.header("host") }
    pub fn host_or_listen_addr(&self) -> &str {
        self.request.header("host").unwrap_or(&self.listen_addr)
    }
    /// Absolute URL for a local path, using the request's scheme and
    /// host.
    pub fn absolute_url(&self, local_path: &str) -> String {
        format!("{}://{}{}",
                if self.is_secure() { "https" } else { "http" },
                self.host_or_listen_addr(),
                local_path)
    }
    pub fn client_addr(&'r self) -> &'r SocketAddr { self.request.remote_addr() }
    pub fn path(&self) -> &PPath<KString> { &self.path }
    pub fn path_str(&self) -> &str { &self.path_string }
    pub fn now(&self) -> &SystemTime { &self.now }
    pub fn referer(&self) -> Option<&str> {
        self.header("referer")
    }

    pub fn header(&self, key: &str) -> Option<&str> { self.request.header(key) }
    pub fn headers(&self) -> HeadersIter { self.request.headers() }

    /// Get a particular cookie. O(n) with n == number of cookies.
    pub fn cookie(&self, key: &str) -> Option<&str> {
        input::cookies(self.request).find(|&(n, _)| n == key).map(|(_, v)| v)
    }

    pub fn request(&self) -> &Request { self.request }
}
