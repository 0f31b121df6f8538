
//! The HTTP response status codes the handlers in this crate
//! actually produce.

// https://developer.mozilla.org/en-US/docs/Web/HTTP/Status

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpResponseStatusCode {
    OK200,
    MovedPermanently301,
    Found302,
    SeeOther303,
    NotModified304,
    TemporaryRedirect307,
    PermanentRedirect308,
    BadRequest400,
    Forbidden403,
    NotFound404,
    InternalServerError500,
    NotImplemented501,
}

impl HttpResponseStatusCode {
    pub fn code(self) -> u16 {
        match self {
            Self::OK200 => 200,
            Self::MovedPermanently301 => 301,
            Self::Found302 => 302,
            Self::SeeOther303 => 303,
            Self::NotModified304 => 304,
            Self::TemporaryRedirect307 => 307,
            Self::PermanentRedirect308 => 308,
            Self::BadRequest400 => 400,
            Self::Forbidden403 => 403,
            Self::NotFound404 => 404,
            Self::InternalServerError500 => 500,
            Self::NotImplemented501 => 501,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::OK200 => "OK",
            Self::MovedPermanently301 => "Moved Permanently",
            Self::Found302 => "Found",
            Self::SeeOther303 => "See Other",
            Self::NotModified304 => "Not Modified",
            Self::TemporaryRedirect307 => "Temporary Redirect",
            Self::PermanentRedirect308 => "Permanent Redirect",
            Self::BadRequest400 => "Bad Request",
            Self::Forbidden403 => "Forbidden",
            Self::NotFound404 => "Not Found",
            Self::InternalServerError500 => "Internal Server Error",
            Self::NotImplemented501 => "Not Implemented",
        }
    }

    pub fn desc(self) -> &'static str {
        match self {
            Self::OK200 =>
                "The request succeeded.",
            Self::MovedPermanently301 =>
                "The URL of the requested resource has been changed permanently.",
            Self::Found302 =>
                "The URI of the requested resource has been changed temporarily.",
            Self::SeeOther303 =>
                "The response to the request can be found under another URI.",
            Self::NotModified304 =>
                "The response has not been modified.",
            Self::TemporaryRedirect307 =>
                "The requested resource resides temporarily under a different URI.",
            Self::PermanentRedirect308 =>
                "The requested resource resides permanently under a different URI.",
            Self::BadRequest400 =>
                "The server cannot process the request due to something that is \
                 perceived to be a client error.",
            Self::Forbidden403 =>
                "The client does not have access rights to the content.",
            Self::NotFound404 =>
                "The server cannot find the requested resource.",
            Self::InternalServerError500 =>
                "The server has encountered a situation it does not know how \
                 to handle.",
            Self::NotImplemented501 =>
                "The request method is not supported by the server.",
        }
    }
}
