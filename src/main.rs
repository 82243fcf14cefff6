//! Binary entry point: wires the store and routes together and serves them.

use log::info;

use users_api::api::register_routes;
use users_api::config::ServerConfig;
use users_api::http::HttpServer;
use users_api::store::UserStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let config = ServerConfig::default();
    let server = HttpServer::new(config);

    // The store is owned here and handed to the handlers; it holds nothing
    // at startup and is discarded when the process exits.
    let store = UserStore::new();
    register_routes(&server, store).await;

    info!("Server ready and listening on port 3000");
    server.start().await?;

    Ok(())
}
