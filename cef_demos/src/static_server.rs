//! Serves a directory over loopback HTTP for pages the browser loads.

use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    path::{Component, Path, PathBuf},
    sync::Arc,
    thread::{self, JoinHandle},
};

use axum::{
    Router,
    extract::{Path as UrlPath, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use log::{debug, error, info, warn};
use tokio::sync::oneshot;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to bind the static file server")]
    Bind(#[source] std::io::Error),

    #[error("failed to start the static file server runtime")]
    Runtime(#[source] std::io::Error),

    #[error("static file server failed")]
    Serve(#[source] std::io::Error),

    #[error("static file server thread panicked")]
    Panicked,
}

/// A file server on an ephemeral loopback port, running on its own thread
/// until shut down or dropped.
pub struct StaticServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<Result<(), ServerError>>>,
}

impl StaticServer {
    pub fn start(root: impl Into<PathBuf>) -> Result<Self, ServerError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ServerError::NotADirectory(root));
        }

        let listener =
            TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).map_err(ServerError::Bind)?;
        listener.set_nonblocking(true).map_err(ServerError::Bind)?;
        let addr = listener.local_addr().map_err(ServerError::Bind)?;
        let (shutdown, shutdown_receiver) = oneshot::channel();

        let thread = thread::Builder::new()
            .name("static file server".to_string())
            .spawn(move || serve(listener, root, shutdown_receiver))
            .map_err(ServerError::Runtime)?;

        info!("serving static files on http://{addr}");
        Ok(Self {
            addr,
            shutdown: Some(shutdown),
            thread: Some(thread),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The URL of `path`, relative to the served directory.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path.trim_start_matches('/'))
    }

    /// Stops accepting connections and waits for the server thread.
    pub fn shutdown(mut self) -> Result<(), ServerError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), ServerError> {
        if let Some(shutdown) = self.shutdown.take() {
            // the server may already be gone, which is what we want anyway.
            let _ = shutdown.send(());
        }
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| ServerError::Panicked)?,
            None => Ok(()),
        }
    }
}

impl Drop for StaticServer {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            error!("{err}");
        }
    }
}

fn serve(
    listener: TcpListener,
    root: PathBuf,
    shutdown: oneshot::Receiver<()>,
) -> Result<(), ServerError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ServerError::Runtime)?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::from_std(listener).map_err(ServerError::Bind)?;
        axum::serve(listener, routes(root))
            .with_graceful_shutdown(async {
                let _ = shutdown.await;
            })
            .await
            .map_err(ServerError::Serve)?;
        debug!("static file server stopped");
        Ok(())
    })
}

pub fn routes(root: PathBuf) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/*path", get(serve_file))
        .with_state(Arc::new(root))
}

async fn serve_index(State(root): State<Arc<PathBuf>>) -> Response {
    read_file(&root, "index.html").await
}

async fn serve_file(State(root): State<Arc<PathBuf>>, UrlPath(path): UrlPath<String>) -> Response {
    read_file(&root, &path).await
}

async fn read_file(root: &Path, path: &str) -> Response {
    let Some(relative) = sanitize(path) else {
        warn!("refusing to serve {path:?}");
        return StatusCode::NOT_FOUND.into_response();
    };
    let full_path = root.join(&relative);

    match tokio::fs::read(&full_path).await {
        Ok(body) => {
            debug!("GET /{path} -> {} bytes", body.len());
            ([(header::CONTENT_TYPE, content_type(&relative))], body).into_response()
        }
        Err(err) => {
            debug!("GET /{path}: {err}");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Keeps only plain path segments, so requests cannot leave the root.
fn sanitize(path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(segment) => relative.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!relative.as_os_str().is_empty()).then_some(relative)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn webpage_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("webpage")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn index_is_served_byte_for_byte() {
        let server = StaticServer::start(webpage_dir()).unwrap();
        let expected = std::fs::read(webpage_dir().join("index.html")).unwrap();

        let response = reqwest::get(server.url("index.html")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers()[reqwest::header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(response.bytes().await.unwrap().as_ref(), expected.as_slice());

        let root = reqwest::get(server.url("/")).await.unwrap();
        assert_eq!(root.bytes().await.unwrap().as_ref(), expected.as_slice());

        tokio::task::spawn_blocking(move || server.shutdown())
            .await
            .unwrap()
            .unwrap();
    }

    /// Sends `target` as written; HTTP clients would normalize the dots away.
    async fn raw_get(addr: SocketAddr, target: &str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request =
            format!("GET {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8_lossy(&response).into_owned()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_and_escaping_paths_are_not_found() {
        let server = StaticServer::start(webpage_dir()).unwrap();

        let missing = reqwest::get(server.url("missing.html")).await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

        // Cargo.toml sits right above the served directory.
        for target in ["/../Cargo.toml", "/script.js/../../Cargo.toml"] {
            let response = raw_get(server.addr(), target).await;
            assert!(
                response.starts_with("HTTP/1.1 404"),
                "{target} was served: {response}"
            );
        }

        let served = raw_get(server.addr(), "/script.js").await;
        assert!(served.starts_with("HTTP/1.1 200"), "{served}");

        tokio::task::spawn_blocking(move || drop(server)).await.unwrap();
    }

    #[test]
    fn sanitize_keeps_plain_segments_only() {
        assert_eq!(sanitize("script.js"), Some(PathBuf::from("script.js")));
        assert_eq!(sanitize("./a/b.css"), Some(PathBuf::from("a/b.css")));
        assert_eq!(sanitize("../secret"), None);
        assert_eq!(sanitize("a/../../secret"), None);
        assert_eq!(sanitize(""), None);
    }

    #[test]
    fn a_missing_root_is_rejected() {
        assert!(matches!(
            StaticServer::start("/definitely/not/here"),
            Err(ServerError::NotADirectory(_))
        ));
    }
}
