//! HTTP plumbing: request parsing, routing, and the TCP server loop.

mod error;
mod method;
mod request;
mod response;
mod router;
mod server;


// Re-export public items
pub use error::{Error, ParseError};
pub use method::{HttpVersion, Method};
pub use request::{parse_request, HttpRequest};
pub use response::{HttpResponse, StatusCode};
pub use router::Route;
pub use server::HttpServer;
