//! Development server with live reload
//!
//! Pages are rendered on request from an in-memory content store. The file
//! watcher builds a fresh store on every change and swaps it in, so a request
//! always sees one complete snapshot.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::{header, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Mode;
use crate::content::{ContentStore, Lookup};
use crate::generator::atom_feed;
use crate::render::{PageRenderer, STYLESHEET_PATH};
use crate::theme::{generate_stylesheet, theme};
use crate::Portfolio;

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
</body>
"#;

/// Error returned by handlers for anything other than a missing page
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal server error: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

/// Everything a request reads, loaded together
pub struct Snapshot {
    pub site: Portfolio,
    pub renderer: PageRenderer,
    pub store: ContentStore,
}

impl Snapshot {
    pub fn load(site: Portfolio) -> Result<Self> {
        let renderer = PageRenderer::new(&site)?;
        let store = site.load_content()?;
        Ok(Self {
            site,
            renderer,
            store,
        })
    }
}

/// Server state
pub struct ServerState {
    base_dir: PathBuf,
    mode: Mode,
    snapshot: RwLock<Arc<Snapshot>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    pub fn new(site: Portfolio, live_reload: bool) -> Result<Self> {
        let (reload_tx, _) = broadcast::channel::<()>(16);
        let base_dir = site.base_dir.clone();
        let mode = site.mode;
        let snapshot = Snapshot::load(site)?;

        Ok(Self {
            base_dir,
            mode,
            snapshot: RwLock::new(Arc::new(snapshot)),
            reload_tx,
            live_reload,
        })
    }

    /// The snapshot current requests are served from
    pub fn snapshot(&self) -> Arc<Snapshot> {
        let guard = self.snapshot.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Re-read configuration and content, swap them in and notify clients
    ///
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self) -> Result<()> {
        let site = Portfolio::new(&self.base_dir, self.mode)?;
        let fresh = Arc::new(Snapshot::load(site)?);
        let count = fresh.store.len();

        {
            let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
            *guard = fresh;
        }

        tracing::info!("Reloaded {} posts", count);
        let _ = self.reload_tx.send(());
        Ok(())
    }

    fn html(&self, status: StatusCode, html: String) -> Response {
        let body = if self.live_reload {
            inject_live_reload(&html)
        } else {
            html
        };
        (status, Html(body)).into_response()
    }
}

/// Build the router serving every page of the site
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(blog_index_handler))
        .route("/blog/", get(blog_index_handler))
        .route("/blog/:slug", get(post_handler))
        .route("/blog/:slug/", get(post_handler))
        .route(&format!("/{}", STYLESHEET_PATH), get(stylesheet_handler))
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server
pub async fn start(site: &Portfolio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(site.clone(), watch)?);
    let app = router(Arc::clone(&state));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {} ({} mode)", url, site.mode);
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
        let watched = vec![
            site.posts_dir.clone(),
            site.static_dir.clone(),
            site.config_path(),
        ];
        let state = Arc::clone(&state);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(watched, state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch for file changes and trigger reload
fn watch_and_reload(paths: Vec<PathBuf>, state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in &paths {
        if !path.exists() {
            continue;
        }
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                // Skip editor swap files and VCS noise
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let path_str = e.path.to_string_lossy();
                        !path_str.contains(".git")
                            && !path_str.contains(".DS_Store")
                            && !path_str.ends_with('~')
                            && !path_str.ends_with(".swp")
                    })
                    .collect();

                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    tracing::info!("File changed: {}", event.path.display());
                }

                if let Err(e) = state.reload() {
                    tracing::error!("Reload failed, keeping previous content: {:#}", e);
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

async fn home_handler(State(state): State<Arc<ServerState>>) -> Result<Response, AppError> {
    let snapshot = state.snapshot();
    let html = snapshot.renderer.render_home(snapshot.store.all_posts())?;
    Ok(state.html(StatusCode::OK, html))
}

async fn blog_index_handler(State(state): State<Arc<ServerState>>) -> Result<Response, AppError> {
    let snapshot = state.snapshot();
    let html = snapshot
        .renderer
        .render_blog_index(snapshot.store.all_posts())?;
    Ok(state.html(StatusCode::OK, html))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let snapshot = state.snapshot();
    match snapshot
        .renderer
        .render_post(snapshot.store.all_posts(), &slug)?
    {
        Lookup::Found(html) => Ok(state.html(StatusCode::OK, html)),
        Lookup::NotFound => not_found(&state, &snapshot),
    }
}

async fn stylesheet_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        generate_stylesheet(theme()),
    )
}

/// Atom feed, answered at whatever path the current configuration names
fn feed_response(snapshot: &Snapshot) -> Response {
    (
        [(header::CONTENT_TYPE, "application/atom+xml; charset=utf-8")],
        atom_feed(&snapshot.site.config, &snapshot.store),
    )
        .into_response()
}

fn is_feed_path(snapshot: &Snapshot, path: &str) -> bool {
    let feed = &snapshot.site.config.feed;
    feed.enable && path.trim_start_matches('/') == feed.path.trim_start_matches('/')
}

fn not_found(state: &ServerState, snapshot: &Snapshot) -> Result<Response, AppError> {
    let html = snapshot.renderer.render_not_found()?;
    Ok(state.html(StatusCode::NOT_FOUND, html))
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
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

/// Serve the feed and static assets, falling back to the not-found page
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Result<Response, AppError> {
    let snapshot = state.snapshot();

    if is_feed_path(&snapshot, request.uri().path()) {
        return Ok(feed_response(&snapshot));
    }

    let mut service = ServeDir::new(&snapshot.site.static_dir);
    let response = match service.try_call(request).await {
        Ok(response) => response,
        Err(e) => return Err(AppError(e.into())),
    };

    if response.status() == StatusCode::NOT_FOUND {
        return not_found(&state, &snapshot);
    }

    Ok(response.into_response())
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
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
    use crate::config::SiteConfig;
    use axum::body::to_bytes;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn site(dir: &TempDir, mode: Mode) -> Portfolio {
        let site =
            Portfolio::with_config(dir.path().to_path_buf(), SiteConfig::default(), mode);
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(
            site.posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndescription: d\ndate: 2024-03-03\nisPublished: true\n---\n<p>hi</p>\n",
        )
        .unwrap();
        fs::write(
            site.posts_dir.join("draft.md"),
            "---\ntitle: Draft\ndate: 2024-03-04\n---\nNot yet.\n",
        )
        .unwrap();
        fs::create_dir_all(site.static_dir.join("images")).unwrap();
        fs::write(site.static_dir.join("images/og-template.png"), b"png").unwrap();
        site
    }

    async fn fetch(state: &Arc<ServerState>, uri: &str) -> (StatusCode, String) {
        let response = router(Arc::clone(state))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn test_post_page() {
        let dir = TempDir::new().unwrap();
        let state = Arc::new(ServerState::new(site(&dir, Mode::Production), false).unwrap());

        for uri in ["/blog/hello/", "/blog/hello"] {
            let (status, body) = fetch(&state, uri).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.contains("Posted on March 3rd, 2024"));
            assert!(body.contains("<p>hi</p>"));
        }
    }

    #[tokio::test]
    async fn test_unknown_slug_is_404() {
        let dir = TempDir::new().unwrap();
        let state = Arc::new(ServerState::new(site(&dir, Mode::Development), false).unwrap());

        let (status, body) = fetch(&state, "/blog/missing/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("404"));

        let (status, _) = fetch(&state, "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unpublished_post_banner_follows_mode() {
        let dir = TempDir::new().unwrap();

        let dev = Arc::new(ServerState::new(site(&dir, Mode::Development), false).unwrap());
        let (status, body) = fetch(&dev, "/blog/draft/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("alert-unpublished"));

        let prod = Arc::new(ServerState::new(site(&dir, Mode::Production), false).unwrap());
        let (status, body) = fetch(&prod, "/blog/draft/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("alert-unpublished"));
    }

    #[tokio::test]
    async fn test_stylesheet_feed_and_assets() {
        let dir = TempDir::new().unwrap();
        let state = Arc::new(ServerState::new(site(&dir, Mode::Production), false).unwrap());

        let (status, css) = fetch(&state, "/css/theme.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(css.contains("--color-brand-500"));

        let (status, feed) = fetch(&state, "/atom.xml").await;
        assert_eq!(status, StatusCode::OK);
        assert!(feed.contains("<title>Hello</title>"));
        assert!(!feed.contains("Draft"));

        let (status, image) = fetch(&state, "/images/og-template.png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(image, "png");
    }

    #[tokio::test]
    async fn test_live_reload_script_injected() {
        let dir = TempDir::new().unwrap();
        let state = Arc::new(ServerState::new(site(&dir, Mode::Development), true).unwrap());

        let (_, body) = fetch(&state, "/").await;
        assert!(body.contains("/__livereload"));
    }

    #[tokio::test]
    async fn test_reload_swaps_content() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, Mode::Production);
        let posts_dir = site.posts_dir.clone();
        let state = Arc::new(ServerState::new(site, false).unwrap());
        let mut reload_rx = state.reload_tx.subscribe();

        let (status, _) = fetch(&state, "/blog/second/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        fs::write(
            posts_dir.join("second.md"),
            "---\ntitle: Second\ndate: 2024-04-01\nisPublished: true\n---\nMore.\n",
        )
        .unwrap();
        state.reload().unwrap();
        assert!(reload_rx.try_recv().is_ok());

        let (status, body) = fetch(&state, "/blog/second/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Second"));
    }

    #[tokio::test]
    async fn test_feed_follows_reloaded_config() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, Mode::Production);
        let config_path = site.config_path();
        let state = Arc::new(ServerState::new(site, false).unwrap());

        let (status, _) = fetch(&state, "/atom.xml").await;
        assert_eq!(status, StatusCode::OK);

        fs::write(&config_path, "feed:\n  path: feed.xml\n").unwrap();
        state.reload().unwrap();

        let (status, _) = fetch(&state, "/atom.xml").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, feed) = fetch(&state, "/feed.xml").await;
        assert_eq!(status, StatusCode::OK);
        assert!(feed.contains("<title>Hello</title>"));

        fs::write(&config_path, "feed:\n  enable: false\n").unwrap();
        state.reload().unwrap();

        let (status, _) = fetch(&state, "/atom.xml").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_content() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, Mode::Production);
        let posts_dir = site.posts_dir.clone();
        let state = Arc::new(ServerState::new(site, false).unwrap());

        fs::write(
            posts_dir.join("clash.md"),
            "---\ntitle: Clash\nslug: hello\ndate: 2024-04-01\n---\n",
        )
        .unwrap();
        assert!(state.reload().is_err());

        let (status, body) = fetch(&state, "/blog/hello/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<p>hi</p>"));
    }
}
