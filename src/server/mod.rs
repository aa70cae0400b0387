//! Development server with live reload and a JSON view of the library

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use notify_debouncer_mini::{
    new_debouncer,
    notify::{RecursiveMode, Watcher},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate;
use crate::config::SiteConfig;
use crate::content::{Library, Post};
use crate::helpers::inject_before_body_end;
use crate::query::{filter_posts, tag_label, Route, TagCount};
use crate::templates::PostCard;
use crate::Blog;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
"#;

/// Server state
///
/// The library is replaced wholesale after each rebuild; handlers clone the
/// `Arc` and keep reading their snapshot even if a swap happens meanwhile.
pub struct ServerState {
    config: SiteConfig,
    public_dir: PathBuf,
    library: RwLock<Arc<Library>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    pub fn new(blog: &Blog, library: Library, live_reload: bool) -> Self {
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Self {
            config: blog.config.clone(),
            public_dir: blog.public_dir.clone(),
            library: RwLock::new(Arc::new(library)),
            reload_tx,
            live_reload,
        }
    }

    /// Current library snapshot
    pub fn library(&self) -> Arc<Library> {
        self.library
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a freshly loaded library
    pub fn replace_library(&self, library: Library) {
        let mut guard = self.library.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(library);
    }
}

/// Build the router for a prepared state
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/__livereload", get(livereload_handler))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/tags", get(list_tags))
        .route("/api/tags/:tag", get(tag_posts))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server
///
/// `library` is what the initial build produced; with `watch` set, every
/// change under the site rebuilds it and notifies connected browsers.
pub async fn start(
    blog: &Blog,
    library: Library,
    ip: &str,
    port: u16,
    watch: bool,
    open: bool,
) -> Result<()> {
    let state = Arc::new(ServerState::new(blog, library, watch));
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let blog = blog.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(&blog, &state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch for file changes, rebuild, swap the library and trigger reload
fn watch_and_reload(blog: &Blog, state: &ServerState) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for dir in [&blog.content_dir, &blog.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                // Filter out editor and VCS noise
                let relevant_events: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git")
                            && !path_str.contains(".DS_Store")
                            && !path_str.ends_with('~')
                    })
                    .collect();

                if relevant_events.is_empty() {
                    continue;
                }

                for event in &relevant_events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match generate::rebuild(&blog.base_dir) {
                    Ok(library) => {
                        state.replace_library(library);
                        tracing::info!("Regenerated successfully");
                        let _ = state.reload_tx.send(());
                    }
                    Err(e) => {
                        // Keep serving the last good build
                        tracing::error!("Generation failed: {:#}", e);
                    }
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

// ============ JSON API ============

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Newest-first posts matching `?q=`
async fn list_posts(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<PostCard>> {
    let library = state.library();
    let posts = library.search(&params.q);
    Json(cards(&posts, &state.config))
}

async fn get_post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let library = state.library();
    library
        .find(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format!("No post with slug `{}`", slug)))
}

async fn list_tags(State(state): State<Arc<ServerState>>) -> Json<Vec<TagCount>> {
    Json(state.library().sorted_tags())
}

/// A tag page's listing by route key, optionally narrowed by `?q=`; unknown
/// tags list nothing
async fn tag_posts(
    State(state): State<Arc<ServerState>>,
    Path(tag): Path<String>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<PostCard>> {
    let library = state.library();
    let tagged = library.tagged(&tag_label(&tag), state.config.tag_matching);
    let posts = filter_posts(tagged, &params.q);
    Json(cards(&posts, &state.config))
}

fn cards(posts: &[&Post], config: &SiteConfig) -> Vec<PostCard> {
    posts.iter().map(|p| PostCard::new(p, config)).collect()
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Error type that converts into a JSON response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

// ============ Live reload & static files ============

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve generated files, injecting the live reload script into pages
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();
    if path.split('/').any(|segment| segment == "..") {
        return (StatusCode::BAD_REQUEST, "Bad path").into_response();
    }

    let file_path = match Route::resolve(path, &state.config) {
        // Site pages; the route decodes percent-encoded tags and slugs
        Some(route) => state.public_dir.join(route.output_file(&state.config)),
        None => state.public_dir.join(path.trim_start_matches('/')),
    };

    let is_html = file_path
        .extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false);

    if !is_html {
        // Serve static file using tower-http
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        return match service.try_call(request).await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                not_found_page(&state).await
            }
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        };
    }

    match tokio::fs::read_to_string(&file_path).await {
        Ok(content) => Html(with_live_reload(&state, &content)).into_response(),
        Err(_) => not_found_page(&state).await,
    }
}

/// The generated 404 page, or plain text before the first build
async fn not_found_page(state: &ServerState) -> Response {
    match tokio::fs::read_to_string(state.public_dir.join("404.html")).await {
        Ok(content) => (
            StatusCode::NOT_FOUND,
            Html(with_live_reload(state, &content)),
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

fn with_live_reload(state: &ServerState, html: &str) -> String {
    if state.live_reload {
        inject_before_body_end(html, LIVE_RELOAD_SCRIPT)
    } else {
        html.to_string()
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
