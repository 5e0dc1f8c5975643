mod adapter;
mod server;
mod upgrade;

pub use adapter::HyperRelayAdapter;
pub use server::{Server, WEBSOCKIFY_PATH};

use http_body_util::{combinators::UnsyncBoxBody, BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Response body type shared by the relay handler and the static routes.
pub type Body = UnsyncBoxBody<Bytes, std::io::Error>;

pub(crate) fn empty_body() -> Body {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

pub(crate) fn text_response(status: StatusCode, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "text/plain")
        .body(
            Full::new(Bytes::from(message.to_string()))
                .map_err(|never| match never {})
                .boxed_unsync(),
        )
        .unwrap()
}
