use std::fs::File;
use std::io::ErrorKind;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use std::{fmt::Debug, any::type_name, path::PathBuf, borrow::Cow};

use anyhow::{Result, Context, anyhow, bail};
use httpdate::{fmt_http_date, parse_http_date};
use kstring::KString;
use rouille::{Response, extension_to_mime, ResponseBody};

use crate::acontext::AContext;
use crate::http_request_method::HttpRequestMethodSimple;
use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::ppath::PPath;
use crate::{or_return_none, warn};

// Can't just check `mtime > modsince` since that's ~always true
// because mtime has a nsec value, where modsince has 0 there. If just
// wanting to know if the file is *newer* than snapshot time:
fn file_is_newer_than_snapshot_time(mtime: SystemTime, modsince: SystemTime) -> bool {
    match mtime.duration_since(modsince) {
        Err(_e) => {
            // file is older than snapshot time; client is cheating,
            // or file has been restored to an older version; in any
            // case, it is not newer, so say no
            false
        }
        Ok(secsnewer) => {
            // Make sure it is at least a second newer, due to the
            // rounding issue. Otherwise it would report a fake newer.
            secsnewer >= Duration::from_secs(1)
        }
    }
}

macro_rules! cow {
    ($a:expr, $b:expr) => {
        (Cow::from($a), Cow::from($b))
    }
}

fn canonicalize_path<'s>(path: &'s [KString]) -> Option<Vec<&'s str>> {
    let mut out = Vec::new();
    for segment in path {
        let segment = segment.as_str();
        match segment {
            "." => (),
            ".." =>
                if out.pop().is_none() {
                    return None
                },
            // Oh, don't forget this one (multiple slashes to one):
            "" => (),
            _ => out.push(segment)
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ks(path: &[&str]) -> Vec<KString> {
        path.iter().map(|s| KString::from_ref(s)).collect()
    }

    #[test]
    fn t_canonicalize_path() {
        let t = |path: &[&str]| -> Option<Vec<String>> {
            let v = ks(path);
            canonicalize_path(&v).map(
                |segs| segs.iter().map(|s| s.to_string()).collect())
        };
        let some = |segs: &[&str]| -> Option<Vec<String>> {
            Some(segs.iter().map(|s| s.to_string()).collect())
        };
        assert_eq!(t(&[]), some(&[]));
        assert_eq!(t(&["a", "b"]), some(&["a", "b"]));
        assert_eq!(t(&[".", "a", ".", "b", ".", ".."]), some(&["a"]));
        assert_eq!(t(&["a", "..", "b"]), some(&["b"]));
        assert_eq!(t(&["a", "..", "b", ".."]), some(&[]));
        assert_eq!(t(&["a", "..", ".", ".."]), None);
        assert_eq!(t(&["foo", "", ".", "", "", "a", ".", ""]),
                   some(&["foo", "a"]));
    }
}

pub trait Handler: Debug + Send + Sync {
    /// Returning Ok(None) means, the handler is refusing to handle
    /// the request. It is to be handled as 404 not found by the
    /// caller, unless there's another alternative handler picking up
    /// the request. Err means, the handler has accepted to handle the
    /// request but failed to; this will be handled as internal server
    /// error. In either case, the caller has to format a 404 or other
    /// error page.
    fn call(
        &self,
        context: &AContext,
        method: HttpRequestMethodSimple,
        pathrest: &PPath<KString>)
        -> Result<Option<Response>>;
}

// ------------------------------------------------------------------
/// Serve files from the local file system
#[derive(Debug)]
pub struct FileHandler {
    /// Path to base directory in local file system from which to
    /// serve the files. No ".." or "." are allowed in the surplus of
    /// the request path.
    basepath: PathBuf,
    // no cache for now
}
impl FileHandler {
    pub fn new(basepath: impl Into<PathBuf>) -> FileHandler {
        FileHandler {
            basepath: basepath.into()
        }
    }
}

impl Handler for FileHandler {
    /// Returns None if the file does not exist
    fn call(
        &self,
        context: &AContext,
        method: HttpRequestMethodSimple,
        pathrest: &PPath<KString>)
        -> Result<Option<Response>> {
        if method.is_post() {
            bail!("can't POST to a file")
        }
        let canonpath = or_return_none!(canonicalize_path(pathrest.segments()));
        if canonpath.is_empty() {
            return Ok(None) // Since it's a directory, not a file.
        }
        let canonpathstr: String = canonpath.join("/");
        let full_path: PathBuf = self.basepath.join(&canonpathstr);
        // XX would we need better than extension based mime type
        // matching?
        let metadata =
            match full_path.metadata() {
                Ok(m) => m,
                Err(e) =>
                    match e.kind() {
                        ErrorKind::NotFound => return Ok(None),
                        _ => return Err(e).with_context(
                            || anyhow!("can't open file for reading: {:?}",
                                       full_path))
                    }
            };

        if metadata.is_dir() {
            warn!("is_dir, not handling dirs yet");
            Ok(None)
        } else if metadata.is_file() {
            let mimetype =
                if let Some(extension_os) = full_path.extension() {
                    let extension = extension_os.to_str().expect("came from String above");
                    extension_to_mime(extension)
                } else {
                    "text/plain" // XX ?
                };
            match File::open(&full_path) {
                Err(e) =>
                    match e.kind() {
                        ErrorKind::NotFound => Ok(None),
                        _ => Err(e).with_context(
                            || anyhow!("can't open file for reading: {:?}",
                                       full_path))?
                    },
                Ok(fh) => {
                    let mtime: SystemTime = metadata.modified()?;
                    let age: Duration = mtime.elapsed()?;
                    let age_seconds = age.as_secs() as u128;
                    let age_allowed = age_seconds + age_seconds / 10;
                    let age_allowed_duration: Duration = Duration::new(age_allowed as u64, 0);
                    let expires = mtime.checked_add(age_allowed_duration).ok_or_else(
                        || anyhow!("time overflow??"))?;
                    let mtime_seconds = mtime.duration_since(UNIX_EPOCH)?.as_secs();
                    let etag_quoted = format!("{:?}", mtime_seconds.to_string());

                    let headers = vec![
                        cow!("Content-type", mimetype),
                        cow!("Last-Modified", fmt_http_date(mtime)),
                        // https://developer.mozilla.org/en-US/docs/Web/HTTP/Caching
                        cow!("Cache-Control",
                             format!("max-age={}", age_allowed)),
                        cow!("Expires", fmt_http_date(expires)),
                        cow!("ETag", etag_quoted.clone()),
                    ];
                    let send_file = |headers| {
                        Ok(Some(Response {
                            status_code:
                            HttpResponseStatusCode::OK200.code(),
                            headers,
                            data: ResponseBody::from_reader_and_size(
                                fh,
                                metadata.len() as usize),
                            upgrade: None,
                        }))
                    };
                    let send_notmodified = |headers| {
                        Ok(Some(Response {
                            status_code:
                            HttpResponseStatusCode::NotModified304.code(),
                            // Still send these headers? -- Yes, let
                            // the client know that the file might
                            // even be *older* than what it saw?
                            headers,
                            data: ResponseBody::empty(),
                            upgrade: None,
                        }))
                    };
                    if let Some(modsince_str) = context.header("If-Modified-Since")
                    {
                        let modsince = parse_http_date(modsince_str).with_context(
                            || anyhow!("parsing If-Modified-Since {:?}",
                                       modsince_str))?;
                        if file_is_newer_than_snapshot_time(mtime, modsince) {
                            send_file(headers)
                        } else {
                            send_notmodified(headers)
                        }
                    } else if let Some(nonematch_str) = context.header("If-None-Match") {
                        if nonematch_str == etag_quoted {
                            send_notmodified(headers)
                        } else {
                            send_file(headers)
                        }
                    } else {
                        send_file(headers)
                    }
                }
            }
        } else {
            warn!("neither file nor dir: symlink or device file or fifo or socket?");
            Ok(None)
        }
    }
}

// ------------------------------------------------------------------
/// A Handler that allows a path surplus, passing it to the handler
/// Fn. The handler may still refuse to handle the request (404).
#[derive(Clone, Copy)]
pub struct FnHandler<F>
where F: Fn(&AContext, HttpRequestMethodSimple, &PPath<KString>)
            -> Result<Option<Response>> + Send + Sync
{
    handler: F
}

impl<F: Fn(&AContext, HttpRequestMethodSimple, &PPath<KString>)
           -> Result<Option<Response>> + Send + Sync>
    FnHandler<F>
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
        }
    }
}

impl<F: Fn(&AContext, HttpRequestMethodSimple, &PPath<KString>)
           -> Result<Option<Response>> + Send + Sync>
    Handler for FnHandler<F>
{
    fn call(
        &self,
        context: &AContext,
        method: HttpRequestMethodSimple,
        pathrest: &PPath<KString>) -> Result<Option<Response>>
    {
        (self.handler)(context, method, pathrest)
    }
}

impl<F: Fn(&AContext, HttpRequestMethodSimple, &PPath<KString>)
           -> Result<Option<Response>> + Send + Sync>
    Debug for FnHandler<F>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("FnHandler({})",
                                 type_name::<F>()))
    }
}

// ------------------------------------------------------------------
/// A Handler that does not allow a path surplus, passing it to the handler Fn.
#[derive(Clone, Copy)]
pub struct ExactFnHandler<F>
where F: Fn(&AContext, HttpRequestMethodSimple)
            -> Result<Response> + Send + Sync
{
    handler: F
}

impl<F: Fn(&AContext, HttpRequestMethodSimple)
           -> Result<Response> + Send + Sync>
    ExactFnHandler<F>
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
        }
    }
}

impl<F: Fn(&AContext, HttpRequestMethodSimple)
           -> Result<Response> + Send + Sync>
    Handler for ExactFnHandler<F>
{
    fn call(
        &self,
        context: &AContext,
        method: HttpRequestMethodSimple,
        pathrest: &PPath<KString>) -> Result<Option<Response>>
    {
        if pathrest.segments().is_empty() {
            Ok(Some((self.handler)(context, method)?))
        } else {
            // refuse to handle if there is a rest (-> 404)
            Ok(None)
        }
    }
}

impl<F: Fn(&AContext, HttpRequestMethodSimple)
           -> Result<Response> + Send + Sync>
    Debug for ExactFnHandler<F>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("ExactFnHandler({})",
                                 type_name::<F>()))
    }
}

// ------------------------------------------------------------------
// Redirect handler

pub fn map_redirect(code: HttpResponseStatusCode) -> Option<Box<dyn Fn(String) -> Response>>
{
    match code {
        HttpResponseStatusCode::MovedPermanently301 => Some(Box::new(Response::redirect_301)),
        HttpResponseStatusCode::Found302 => Some(Box::new(Response::redirect_302)),
        // ^ Instruct the client to do GET
        HttpResponseStatusCode::SeeOther303 => Some(Box::new(Response::redirect_303)),
        HttpResponseStatusCode::TemporaryRedirect307 => Some(Box::new(Response::redirect_307)),
        // ^ Instruct the client to do GET or POST as per original request
        HttpResponseStatusCode::PermanentRedirect308 => Some(Box::new(Response::redirect_308)),
        _ => None
    }
}

pub struct RedirectHandler<F>
where F: Fn(&AContext) -> String + Send + Sync,
{
    calculate_target: F,
    code: HttpResponseStatusCode,
}

impl<F> RedirectHandler<F>
where F: Fn(&AContext) -> String + Send + Sync,
{
    /// Panics immediately when given a `code` that's not a redirect.
    pub fn new(calculate_target: F, code: HttpResponseStatusCode) -> Self {
        let _ = map_redirect(code).expect(
            "given code must be a redirect");
        RedirectHandler {
            calculate_target,
            code,
        }
    }
}

impl<F> Debug for RedirectHandler<F>
where F: Fn(&AContext) -> String + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("RedirectHandler(?, {:?})", self.code))
    }
}

impl<F> Handler for RedirectHandler<F>
where F: Fn(&AContext) -> String + Send + Sync,
{
    fn call(
        &self,
        context: &AContext,
        _method: HttpRequestMethodSimple,
        _pathrest: &PPath<KString>
    ) -> Result<Option<Response>> {
        let target = (self.calculate_target)(context);
        let responder = map_redirect(self.code).expect("already checked earlier");
        Ok(Some(responder(target)))
    }
}
