//! Portal API server lifecycle. Starts and stops the axum HTTP server
//! that serves the portal screens.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::portal_api_router;
use crate::core_state::CoreState;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Session metadata for a running portal API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalApiSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running portal API server.
pub struct PortalApiServer {
    pub session: PortalApiSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PortalApiServer {
    /// Signal the server to shut down gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Portal API server shutdown signal sent");
        }
    }

    /// Shut down and wait for in-flight requests to finish.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Portal API server task failed: {e}");
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Start the portal API server on `addr` (port 0 picks an ephemeral port).
///
/// Builds `portal_api_router` with its middleware stack and spawns the
/// axum server in a background tokio task.
pub async fn start_portal_api_server(
    core: Arc<CoreState>,
    addr: SocketAddr,
) -> Result<PortalApiServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind portal API server on {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = portal_api_router(core);

    let session = PortalApiSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Portal API server received shutdown signal");
        };

        tracing::info!(%addr, "Portal API server started");

        if let Err(e) = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal)
        .await
        {
            tracing::error!("Portal API server error: {e}");
        }

        tracing::info!("Portal API server stopped");
    });

    Ok(PortalApiServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::AdminCredentials;
    use crate::store::{MemoryBlobStorage, SeedPolicy};

    fn test_core() -> Arc<CoreState> {
        Arc::new(CoreState::with_storage(
            MemoryBlobStorage::new(),
            SeedPolicy::DemoRecords,
            AdminCredentials::new("admin", "vpn-admin"),
        ))
    }

    fn loopback() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let server = start_portal_api_server(test_core(), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.session_id.is_empty());
        assert!(server.session.port > 0);

        let url = format!("http://127.0.0.1:{}/api/health", server.session.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.stop().await;
    }

    #[tokio::test]
    async fn server_session_has_valid_metadata() {
        let mut server = start_portal_api_server(test_core(), loopback())
            .await
            .expect("server should start");

        assert!(!server.session.started_at.is_empty());
        assert!(server.session.server_addr.contains(':'));

        server.shutdown();
    }

    #[tokio::test]
    async fn server_serves_api_routes() {
        let server = start_portal_api_server(test_core(), loopback())
            .await
            .expect("server should start");
        let port = server.session.port;

        let resp = reqwest::get(format!("http://127.0.0.1:{port}/nonexistent"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/applications"))
            .json(&serde_json::json!({
                "fullName": "Carol Danvers",
                "email": "carol@example.com",
                "courseId": "CSE-001",
                "percentage": 88.0
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

        let resp = client
            .get(format!("http://127.0.0.1:{port}/api/admin/applications"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

        // Sign-in needs the peer address of the connection.
        let resp = client
            .post(format!("http://127.0.0.1:{port}/api/admin/login"))
            .json(&serde_json::json!({"username": "admin", "password": "vpn-admin"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.stop().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_portal_api_server(test_core(), loopback())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown();
        server.stop().await;
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let first = start_portal_api_server(test_core(), loopback())
            .await
            .expect("server should start");
        let taken: SocketAddr = first.session.server_addr.parse().unwrap();

        let err = start_portal_api_server(test_core(), taken).await.err().unwrap();
        assert!(err.contains("Failed to bind"));

        first.stop().await;
    }
}
