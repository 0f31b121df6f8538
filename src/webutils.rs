use std::borrow::Cow;

use anyhow::{Result, Error};
use rouille::{Response, ResponseBody};
use serde::Serialize;

use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::random_util::randomidstring;

pub fn errorpage_from_status(status: HttpResponseStatusCode) -> Response {
    // XX configure response looks and contents.
    let title = status.title();
    let explanation = status.desc();
    let resp = format!("<html><head><title>{title}</title></head><body><h1>{title}</h1>\
                        <p>{explanation}</p></body></html>\n");
    Response {
        status_code: status.code(),
        headers: vec![(Cow::from("Content-type"), Cow::from("text/html"))],
        data: ResponseBody::from_string(resp),
        upgrade: None,
    }
}

pub fn errorpage_from_error(err: Error) -> Response {
    let status = HttpResponseStatusCode::InternalServerError500;
    let errid = randomidstring().unwrap_or_else(|_| "??".into());
    eprintln!("ERROR {errid} in page (return {status:?}): {err:#}");
    errorpage_from_status(status)
}

pub fn html_response(
    status: HttpResponseStatusCode,
    body: String
) -> Response {
    Response {
        status_code: status.code(),
        headers: vec![(Cow::from("Content-type"),
                       Cow::from("text/html; charset=utf-8"))],
        data: ResponseBody::from_string(body),
        upgrade: None,
    }
}

pub fn text_response(
    status: HttpResponseStatusCode,
    content_type: &'static str,
    body: String
) -> Response {
    Response {
        status_code: status.code(),
        headers: vec![(Cow::from("Content-type"), Cow::from(content_type))],
        data: ResponseBody::from_string(body),
        upgrade: None,
    }
}

pub fn json_response<T: Serialize>(
    status: HttpResponseStatusCode,
    value: &T
) -> Result<Response> {
    let body = serde_json::to_string(value)?;
    Ok(Response {
        status_code: status.code(),
        headers: vec![(Cow::from("Content-type"),
                       Cow::from("application/json; charset=utf-8"))],
        data: ResponseBody::from_string(body),
        upgrade: None,
    })
}
