//! Serve command - Wires collaborators and starts the HTTP server.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cli::args::ServeArgs;
use crate::clients::{FaceClassifierClient, ReplyGeneratorClient, TextClassifierClient};
use crate::commands::CommandResult;
use crate::config::Config;
use crate::infra::{CredentialRepository, CredentialStore, Database, InMemoryCredentialStore};
use crate::middleware::cors_layer;
use crate::routes::create_router;
use crate::services::{Authenticator, Dispatcher};
use crate::state::AppState;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> CommandResult {
    info!("Starting server...");

    if let Some(host) = args.host {
        config.service.host = host;
    }
    if let Some(port) = args.port {
        config.service.port = port;
    }

    let credentials: Arc<dyn CredentialStore> = if args.in_memory_store {
        warn!("Using the in-memory credential store; registrations are lost on restart");
        Arc::new(InMemoryCredentialStore::new())
    } else {
        let db = Database::connect(config.require_database()?).await?;
        Arc::new(CredentialRepository::new(db))
    };

    let dispatcher = Dispatcher::new(
        Arc::new(FaceClassifierClient::new(
            &config.face_classifier,
            config.face_enforce_detection,
        )?),
        Arc::new(TextClassifierClient::new(&config.text_classifier)?),
        Arc::new(ReplyGeneratorClient::new(
            &config.reply_generator,
            config.reply_model.clone(),
        )?),
    )
    .with_face_fallback(config.face_detection_fallback);

    let state = AppState::new(
        Arc::new(dispatcher),
        Arc::new(Authenticator::new(credentials.clone())),
        credentials,
    );

    let app = create_router(state).layer(cors_layer(&config.service.allowed_origins)?);

    let addr = config.service.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
