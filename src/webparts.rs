//! The server loop: glue between rouille and the site's router, with
//! access/error logging around every routed request.

use std::sync::{Arc, Mutex};
use std::thread;
use std::thread::JoinHandle;

use rouille::{Server, Request, Response};

use crate::acontext::AContext;
use crate::apachelog::{log_combined, Logs};
use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::registry::SiteRouter;
use crate::warn;
use crate::webutils::errorpage_from_status;

/// Make a handler for Rouille's `start_server` procedure.
pub fn server_handler(
    listen_addr: String,
    siterouter: Arc<SiteRouter>,
) -> impl for<'r> Fn(&'r Request) -> Response
{
    move |request: &Request| -> Response {
        match AContext::new(request, &listen_addr) {
            Ok(context) => {
                log_combined(
                    &context,
                    || -> (Arc<Mutex<Logs>>, anyhow::Result<Response>) {
                        match context.method().to_simple() {
                            Some(simplemethod) =>
                                siterouter.handle_request(&context, simplemethod),
                            None => {
                                warn!("method {:?} not implemented (yet)",
                                      context.method().as_str());
                                (siterouter.logs.clone(),
                                 Ok(errorpage_from_status(
                                     HttpResponseStatusCode::NotImplemented501)))
                            }
                        }
                    })
            }
            Err(e) => {
                warn!("{e}");
                errorpage_from_status(
                    HttpResponseStatusCode::InternalServerError500)
            }
        }
    }
}

pub struct Tlskeys {
    pub crt: Vec<u8>,
    pub key: Vec<u8>,
}

/// Run a rouille server in a new thread.
pub fn run_server(
    thread_name: &str,
    addr: String,
    tlskeys: Option<Tlskeys>,
    siterouter: Arc<SiteRouter>,
) -> Result<JoinHandle<()>, std::io::Error>
{
    thread::Builder::new().name(thread_name.into()).spawn({
        move || {
            let handler = server_handler(addr.clone(), siterouter);
            if let Some(Tlskeys { crt, key }) = tlskeys {
                Server::new_ssl(addr, handler, crt, key)
            } else {
                Server::new(addr, handler)
            }
            // Panicking instead returning Result for size issues, and
            // it's run in a dedicated thread where panicking will
            // achieve the same outcome.
            .expect("error starting server")
                .run()
        }
    })
}
