/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! REST server lifecycle.
//!
//! [`Server::bind`] claims the configured address; [`Server::listen`] serves
//! until the [`ShutdownSignal`] fires, then drains in-flight requests and
//! returns.  Routes:
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | `GET` | `/health` | `200 ok` |
//! | `GET` | `/people/:id` | `200` + JSON person, `404` on [`DataError::NotFound`] |

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::data::{DataError, Person, PersonStore};
use crate::logging::Logger;
use crate::shutdown::ShutdownSignal;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Data-layer error on its way out as an HTTP response.
struct ApiError(DataError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            DataError::NotFound { .. } => StatusCode::NOT_FOUND,
        };
        let body = Json(ErrorBody {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        Self(e)
    }
}

// ── Wire bodies ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PersonBody {
    id: u64,
    name: String,
}

impl From<Person> for PersonBody {
    fn from(p: Person) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

// ── Router ────────────────────────────────────────────────────────────────────

#[derive(Clone)]
struct AppState {
    store: Arc<dyn PersonStore>,
    logger: Arc<dyn Logger>,
}

/// Build the route table over `store`.
pub fn router(store: Arc<dyn PersonStore>, logger: Arc<dyn Logger>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/people/:id", get(get_person))
        .with_state(AppState { store, logger })
}

async fn health() -> &'static str {
    "ok"
}

async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<PersonBody>, ApiError> {
    match state.store.find_by_id(id) {
        Ok(person) => Ok(Json(person.into())),
        Err(e) => {
            state.logger.debug(&format!("lookup failed: {e}"));
            Err(e.into())
        }
    }
}

// ── Server ────────────────────────────────────────────────────────────────────

/// A bound, not yet serving, REST server.
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
    logger: Arc<dyn Logger>,
}

impl Server {
    /// Bind `addr` (e.g. `"127.0.0.1:8080"`, or port `0` for any free port).
    pub async fn bind(
        addr: &str,
        store: Arc<dyn PersonStore>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            local_addr,
            router: router(store, logger.clone()),
            logger,
        })
    }

    /// The address actually bound, useful when binding port `0`.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `signal` fires.
    pub async fn listen(self, mut signal: ShutdownSignal) -> Result<(), ServerError> {
        self.logger.info(&format!("listening on {}", self.local_addr));

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async move { signal.wait().await })
            .await?;

        self.logger.info("server stopped");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InMemoryPersonStore;
    use crate::logging::MemoryLogger;
    use crate::shutdown::Shutdown;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tower::ServiceExt;

    fn store() -> Arc<dyn PersonStore> {
        Arc::new(InMemoryPersonStore::with_people([Person::new(1, "ada")]))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = router(store(), Arc::new(MemoryLogger::new()));
        let (status, body) = get_body(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn person_found() {
        let app = router(store(), Arc::new(MemoryLogger::new()));
        let (status, body) = get_body(app, "/people/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"id":1,"name":"ada"}"#);
    }

    #[tokio::test]
    async fn missing_person_is_404() {
        let logger = Arc::new(MemoryLogger::new());
        let app = router(store(), logger.clone());
        let (status, body) = get_body(app, "/people/9").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("person 9 not found"));
        assert!(logger.contains("lookup failed"));
    }

    #[test]
    fn not_found_maps_to_404_json() {
        let resp = ApiError(DataError::NotFound { id: 5 }).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn bind_failure_names_the_address() {
        let err = Server::bind("not-an-address", store(), Arc::new(MemoryLogger::new()))
            .await
            .err()
            .expect("bind must fail");
        assert!(matches!(err, ServerError::Bind { .. }));
        assert!(err.to_string().contains("not-an-address"));
    }

    #[tokio::test]
    async fn serves_until_stopped() {
        let logger = Arc::new(MemoryLogger::new());
        let server = Server::bind("127.0.0.1:0", store(), logger.clone())
            .await
            .unwrap();
        let addr = server.local_addr();
        let shutdown = Shutdown::new();
        let handle = tokio::spawn(server.listen(shutdown.signal()));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.ends_with("ok"));

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server should stop")
            .unwrap()
            .unwrap();
        assert!(logger.contains("server stopped"));
    }
}
