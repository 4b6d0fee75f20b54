//! # Message Relay
//!
//! This binary wires the two loops of the relay together: the HTTP front
//! serving pages and accepting form submissions on one port, and the UDP
//! listener persisting each received message to the JSON store on the
//! other. The loops share no memory; a submission travels as a single
//! datagram from the front to the listener.
use std::{path::Path, sync::Arc};

use tracing::{error, info};

use msgrelay::{
    config::load_config,
    front::{assets::PAGES, routes::FrontHandler},
    logging,
    relay::listener::Listener,
    runtime::server::serve,
    store::json_store::MessageStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    let settings = load_config()?;
    let serve_dir = Path::new(&settings.http.serve_dir);

    // The pages are fixed external assets; starting without them is a
    // dependency failure, not something to limp through.
    for page in PAGES {
        if !serve_dir.join(page).is_file() {
            return Err(format!("missing required page file: {page}").into());
        }
    }

    let store = MessageStore::new(serve_dir.join(&settings.storage.data_file));
    store.init()?;

    let relay_addr = format!("{}:{}", settings.relay.host, settings.relay.port);
    let listener = Listener::bind(&relay_addr, store).await?;
    info!("relay listener run with port: {}", settings.relay.port);
    let listener_task = tokio::spawn(async move {
        if let Err(e) = listener.run().await {
            error!("relay listener stopped: {e}");
        }
    });

    let handler = Arc::new(FrontHandler::new(serve_dir, relay_addr));
    let server = serve(&settings.http.host, settings.http.port, handler).await?;
    info!("HTTP front run with port: {}", settings.http.port);

    tokio::signal::ctrl_c().await?;
    info!("interrupt received, shutting down");
    server.close();
    listener_task.abort();
    Ok(())
}
