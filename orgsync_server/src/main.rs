use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use orgsync::DocumentStore;
use orgsync_server::{AppState, build_router};

#[derive(Parser, Debug)]
#[command(name = "orgsync-server", about = "REST API and page server for the OrgSync collections")]
struct Args {
    /// Address to bind.
    #[arg(long, env = "ORGSYNC_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// JSON snapshot file backing the document store. Without it the store
    /// is in-memory and empties on restart.
    #[arg(long, env = "ORGSYNC_DATA")]
    data: Option<PathBuf>,

    /// Main application page served for non-API paths.
    #[arg(long, env = "ORGSYNC_INDEX")]
    index: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Server will run on port: {}", args.port);

    if let Err(err) = run(args).await {
        log::error!("server failed: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let store = match &args.data {
        Some(path) => {
            let store = DocumentStore::open(path)?;
            log::info!("store snapshot: {}", path.display());
            store
        }
        None => DocumentStore::in_memory(),
    };

    let state = AppState {
        store: Arc::new(store),
        index_page: args.index,
    };

    let listener = tokio::net::TcpListener::bind((args.bind.as_str(), args.port)).await?;
    log::info!("Server is running on port {}", args.port);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
