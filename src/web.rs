use crate::embed::{contains_embed_block, resolve, BlockAttributes, EmbedRewriter, Provider};
use axum::{extract::State, response::IntoResponse, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::signal;

#[derive(Clone)]
struct SharedState {
    rewriter: Arc<EmbedRewriter>,
}

#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("url is not a supported video url: {0}")]
    NotRecognized(String),

    #[error("no thumbnail available for {0}")]
    NoThumbnail(String),
}

// Make our own error that wraps `WebError`.
#[derive(Debug)]
struct HttpError(WebError);

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        match self.0 {
            WebError::NotRecognized(_) => (
                axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"error": self.0.to_string()})),
            ),
            WebError::NoThumbnail(_) => (
                axum::http::StatusCode::NOT_FOUND,
                Json(json!({"error": self.0.to_string()})),
            ),
        }
        .into_response()
    }
}

impl From<WebError> for HttpError {
    fn from(err: WebError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub attrs: BlockAttributes,
    pub inner_html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResponse {
    pub html: String,
    /// False when `html` is the input returned unchanged
    pub rewritten: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailResponse {
    pub provider: Provider,
    pub video_id: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub blocks: Vec<BlockAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    /// Whether the page needs the activation script
    pub has_embed: bool,
}

async fn render(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<RenderRequest>,
) -> Json<RenderResponse> {
    log::debug!("render: attrs={:?}", payload.attrs);

    let rewriter = state.rewriter.clone();

    tokio::task::block_in_place(move || {
        let response = match rewriter.rewrite(&payload.attrs, &payload.inner_html) {
            Some(fragment) => RenderResponse {
                html: fragment.to_string(),
                rewritten: true,
            },
            None => RenderResponse {
                html: payload.inner_html,
                rewritten: false,
            },
        };

        Json(response)
    })
}

async fn thumbnail(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<ThumbnailRequest>,
) -> Result<Json<ThumbnailResponse>, HttpError> {
    log::debug!("thumbnail: url={}", payload.url);

    if let Err(e) = resolve(&payload.url) {
        log::debug!("thumbnail: {e}");
        return Err(WebError::NotRecognized(payload.url).into());
    }

    let rewriter = state.rewriter.clone();

    tokio::task::block_in_place(move || {
        let (resolved, thumbnail_url) = rewriter
            .thumbnail_for(&payload.url)
            .ok_or_else(|| WebError::NoThumbnail(payload.url.clone()))?;

        Ok(Json(ThumbnailResponse {
            provider: resolved.provider,
            video_id: resolved.video_id.to_string(),
            thumbnail_url,
        }))
    })
}

async fn detect(Json(payload): Json<DetectRequest>) -> Json<DetectResponse> {
    Json(DetectResponse {
        has_embed: contains_embed_block(&payload.blocks),
    })
}

pub fn router(rewriter: Arc<EmbedRewriter>) -> Router {
    let shared_state = Arc::new(SharedState { rewriter });

    Router::new()
        .route("/api/embeds/render", post(render))
        .route("/api/embeds/thumbnail", post(thumbnail))
        .route("/api/embeds/detect", post(detect))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(shared_state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::warn!("shutting down");
}

async fn start_app(rewriter: Arc<EmbedRewriter>, listen_addr: &str) -> anyhow::Result<()> {
    let app = router(rewriter);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    log::info!("listening on {listen_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Runs the http service until Ctrl+C / SIGTERM.
pub fn start_daemon(rewriter: Arc<EmbedRewriter>, listen_addr: &str) -> anyhow::Result<()> {
    // the blocking http client must be dropped outside the runtime
    let app_rewriter = rewriter.clone();

    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { start_app(app_rewriter, listen_addr).await });

    drop(rewriter);
    result
}
