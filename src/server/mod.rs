//! HTTP API for on-demand metrics refresh
//!
//! Routes:
//! - `GET /api/github/metrics`: refresh and store metrics for the session user
//! - `GET /api/github/user`: fetch and store the session user's profile
//! - `GET /healthz`: liveness
//!
//! The session is the bearer token in the `Authorization` header. Every
//! request builds its own data source from that token.

mod response;

pub use response::{ApiError, ApiResponse};

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::config::{DevMeterConfig, GithubConfig, ScoringConfig};
use crate::github::{ActivityDataSource, GithubClient};
use crate::pipeline::MetricsPipeline;
use crate::store::MetricsStore;

/// Builds a data source for one access token
pub type SourceFactory = Arc<dyn Fn(&str) -> Arc<dyn ActivityDataSource> + Send + Sync>;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    scoring: Arc<ScoringConfig>,
    store: Arc<dyn MetricsStore>,
    sources: SourceFactory,
}

impl AppState {
    pub fn new(scoring: ScoringConfig, store: Arc<dyn MetricsStore>, sources: SourceFactory) -> Self {
        Self {
            scoring: Arc::new(scoring),
            store,
            sources,
        }
    }

    /// State backed by the real GitHub API
    pub fn github(config: &DevMeterConfig, store: Arc<dyn MetricsStore>) -> Self {
        let github: GithubConfig = config.github.clone();
        let sources: SourceFactory = Arc::new(move |token: &str| {
            Arc::new(GithubClient::new(github.clone(), token)) as Arc<dyn ActivityDataSource>
        });
        Self::new(config.scoring.clone(), store, sources)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/github/metrics", get(refresh_metrics))
        .route("/api/github/user", get(session_user))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

/// Bearer token from the `Authorization` header, if present and non-blank
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then(|| token.to_string())
}

async fn refresh_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::AuthenticationRequired)?;

    let result = tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
        let source = (state.sources)(&token);
        let login = source
            .authenticated_login()
            .map_err(|e| ApiError::from_session(e, ApiError::metrics))?;
        MetricsPipeline::new(source.as_ref(), state.store.as_ref(), &state.scoring)
            .refresh(&login)
            .map_err(|e| {
                if e.is_unauthorized() {
                    ApiError::AuthenticationRequired
                } else {
                    error!("Metrics refresh failed for {}: {}", login, e);
                    ApiError::metrics(e)
                }
            })
    })
    .await
    .map_err(ApiError::metrics)??;

    info!(
        "Refreshed metrics for {}: {} ({})",
        result.username, result.dev_meter_score, result.dev_meter_tier
    );
    Ok(Json(ApiResponse::metrics(result)))
}

async fn session_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::AuthenticationRequired)?;

    let profile = tokio::task::spawn_blocking(move || -> Result<_, ApiError> {
        let source = (state.sources)(&token);
        let login = source
            .authenticated_login()
            .map_err(|e| ApiError::from_session(e, ApiError::user))?;
        let profile = source.fetch_profile(&login).map_err(ApiError::user)?;
        state.store.upsert_user(&profile).map_err(ApiError::user)
    })
    .await
    .map_err(ApiError::user)??;

    Ok(Json(ApiResponse::user(profile)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer ghp_abc")).as_deref(), Some("ghp_abc"));
        assert_eq!(bearer_token(&headers("bearer  ghp_abc ")).as_deref(), Some("ghp_abc"));
        assert!(bearer_token(&headers("Bearer   ")).is_none());
        assert!(bearer_token(&headers("Basic dXNlcjpwYXNz")).is_none());
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }
}
