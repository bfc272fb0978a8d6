//! Server Implementation
//!
//! HTTP 服务器启动和管理

use socketioxide::SocketIo;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::{BackgroundTasks, Config, ServerState};
use crate::{api, notify};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        // Create application state if not provided
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        // Socket.IO: clients join rooms keyed by their identity on connect
        let (socket_layer, io) = SocketIo::new_layer();
        notify::socket::register(&io);

        // Start background tasks (escalation sweep, notification forwarder)
        let mut tasks = BackgroundTasks::new();
        state.start_background_tasks(&mut tasks, io);
        tasks.log_summary();

        let app = api::router()
            .layer(socket_layer)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Kusina order server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        tasks.shutdown().await;
        Ok(())
    }
}
