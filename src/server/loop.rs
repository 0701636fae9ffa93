// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::spawn_connection;
use crate::config::AppState;
use crate::logger;

/// Accept and serve connections until `shutdown` resolves.
///
/// Accept errors are logged and the loop keeps going. On shutdown the
/// listener is dropped, releasing the port; connections already in flight
/// finish on their own tasks or die with the runtime.
pub async fn run<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: Future<Output = &'static str>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            reason = &mut shutdown => {
                logger::log_shutdown(reason);
                break;
            }
        }
    }

    drop(listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_listener;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    fn state(root: &TempDir) -> Arc<AppState> {
        std::fs::create_dir_all(root.path().join("demo")).unwrap();
        std::fs::write(root.path().join("demo/index.html"), "<h1>TimeTracker</h1>").unwrap();

        let mut cfg = Config::load_from("no-such-demo-server-config").unwrap();
        cfg.content.project_dir = root.path().to_path_buf();
        cfg.logging.access_log = false;
        Arc::new(AppState::new(cfg))
    }

    async fn get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request =
            format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let root = TempDir::new().unwrap();
        let server = tokio::spawn(run(listener, state(&root), async move {
            let _ = stop_rx.await;
            "test"
        }));

        let response = get(addr, "/").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert!(response.contains("<h1>TimeTracker</h1>"));

        let response = get(addr, "/demo/missing.html").await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found"), "{response}");

        stop_tx.send(()).unwrap();
        server.await.unwrap();

        // the port is released once the loop returns
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
