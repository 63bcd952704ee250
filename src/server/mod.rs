//! Local HTTP server and page shell
//!
//! The shell keeps the fragment-based navigation surface intact: on every
//! `hashchange` it fetches `/render?route=<fragment>` and swaps the result
//! into the page root.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::helpers::escape_html;
use crate::views;
use crate::Blog;

/// Page shell served at `/`
const SHELL: &str = include_str!("shell.html");

/// Start the blog server
pub async fn start(blog: Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(blog);

    let app = Router::new()
        .route("/", get(shell_handler))
        .route("/render", get(render_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Blog running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve the page shell with the site title injected
async fn shell_handler(State(blog): State<Arc<Blog>>) -> Html<String> {
    let page = SHELL
        .replace("{{ title }}", &escape_html(&blog.config.title))
        .replace("{{ subtitle }}", &escape_html(&blog.config.subtitle));
    Html(page)
}

#[derive(Deserialize)]
struct RenderParams {
    #[serde(default)]
    route: String,
}

/// Render the view for one location fragment
async fn render_handler(
    State(blog): State<Arc<Blog>>,
    Query(params): Query<RenderParams>,
) -> Response {
    match blog.render_fragment(&params.route).await {
        Ok(markup) => Html(markup).into_response(),
        Err(e) => {
            tracing::error!("render failed for {:?}: {:#}", params.route, e);
            (StatusCode::BAD_GATEWAY, Html(views::load_error(&e))).into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_has_root_and_router_hooks() {
        assert!(SHELL.contains(r#"id="app""#));
        assert!(SHELL.contains("hashchange"));
        assert!(SHELL.contains("/render?route="));
        assert!(SHELL.contains("{{ title }}"));
    }
}
