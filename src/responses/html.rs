use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}

/// Same as [`html_response`] but also sends a `Set-Cookie` header.
pub fn html_response_with_cookie(markup: Markup, cookie: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .header("Set-Cookie", cookie)
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}
