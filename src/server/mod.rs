//! HTTP server
//!
//! ## Routes
//!
//! - `GET /` - Index of the newest published posts
//! - `GET /posts/:slug` - Post detail (404 page when nothing matches)
//! - `GET /health` - Health check (JSON)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::error::BlogError;
use crate::helpers::{full_url_for, post_path};
use crate::pages::{detail, index, metadata, PostView};
use crate::templates;
use crate::Blog;

/// Build the router for `blog`
pub fn router(blog: Arc<Blog>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/posts/:slug", get(post_handler))
        .route("/health", get(health_check))
        .with_state(blog)
}

/// Start the server and block until it stops
pub async fn start(blog: Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(Arc::new(blog)).layer(TraceLayer::new_for_http().make_span_with(
        |request: &Request<_>| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        },
    ));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(blog): State<Arc<Blog>>) -> Result<Response, BlogError> {
    let view = index::assemble(&blog).await?;
    let meta = metadata::index_metadata(&blog.config);
    let markup = templates::index_page(&blog.config, &meta, &view);
    Ok(with_cache_control(&blog, markup.into_response()))
}

async fn post_handler(
    State(blog): State<Arc<Blog>>,
    Path(slug): Path<String>,
) -> Result<Response, BlogError> {
    let post = detail::fetch_post(&blog, &slug).await?;
    let mut meta = metadata::post_metadata(
        post.as_ref(),
        blog.renderer().images(),
        blog.config.main_image_width,
    );

    let response = match detail::build(post, &blog.config, blog.renderer()) {
        PostView::Found(page) => {
            meta.url = Some(full_url_for(&blog.config, &post_path(&blog.config, &page.slug)));
            templates::post_page(&blog.config, &meta, &page).into_response()
        }
        PostView::NotFound => (
            StatusCode::NOT_FOUND,
            templates::not_found_page(&blog.config, &meta),
        )
            .into_response(),
    };
    Ok(with_cache_control(&blog, response))
}

/// Let shared caches keep pages for as long as queries are cached
fn with_cache_control(blog: &Blog, mut response: Response) -> Response {
    let value = format!("public, max-age={}", blog.revalidate().as_secs());
    if let Ok(value) = HeaderValue::from_str(&value) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    response
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
