use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use axum::Router;
use owo_colors::OwoColorize;
use promogen_core::project::Project;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Static files from the site root, for previewing the generated site.
pub fn router(project: &Project) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(project.root()))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(project: &Project, bind: IpAddr, port: u16) -> Result<()> {
    let addr = SocketAddr::new(bind, port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not listen on {}", addr))?;

    println!(
        "{}",
        format!("  Serving {} on http://{}", project.root().display(), addr).green()
    );
    println!("  Press Ctrl+C to stop");

    axum::serve(listener, router(project)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_files_from_site_root() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("events")).unwrap();
        std::fs::write(dir.path().join("events/index.json"), "[\"2026-03-07-opening\"]").unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Events</h1>").unwrap();
        let project = Project::new(dir.path().to_path_buf(), Path::new("events"));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(&project);
        tokio::spawn(async move { axum::serve(listener, app).await });

        let index = get(addr, "/events/index.json").await;
        assert!(index.starts_with("HTTP/1.1 200"));
        assert!(index.ends_with("[\"2026-03-07-opening\"]"));

        let home = get(addr, "/").await;
        assert!(home.contains("<h1>Events</h1>"));

        let missing = get(addr, "/nope.txt").await;
        assert!(missing.starts_with("HTTP/1.1 404"));
    }
}
