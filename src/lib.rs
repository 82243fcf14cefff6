//! A minimal in-memory users HTTP API.
//!
//! Three JSON endpoints over a process-local list of user records:
//!
//! - `GET /api/users` — list every stored record
//! - `GET /api/users/:user_id` — fetch one record by its position
//! - `POST /api/users` — append a record and return it with its `user_id`
//!
//! Records live only for the lifetime of the process. A record's `user_id`
//! is its position in the store, derived at response time rather than stored.
//!
//! # Example
//!
//! ```no_run
//! use users_api::api::register_routes;
//! use users_api::config::ServerConfig;
//! use users_api::http::HttpServer;
//! use users_api::store::UserStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = HttpServer::new(ServerConfig::default());
//!     register_routes(&server, UserStore::new()).await;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod http;
pub mod store;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use http::{HttpRequest, HttpResponse, HttpServer, Method, StatusCode};
pub use store::{User, UserStore};
