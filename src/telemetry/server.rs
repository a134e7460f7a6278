//! Pull-based metrics endpoint.

use crate::telemetry::gauges::{render_prometheus, Gauges};
use crate::telemetry::TelemetryError;
use std::net::{SocketAddr, TcpListener as StdTcpListener};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

const MAX_REQUEST_HEAD: usize = 8 * 1024;
const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Bind `0.0.0.0:port` now and serve `GET /metrics` on the runtime.
///
/// Binding happens on the calling thread so a port conflict is reported
/// before the game starts. Port 0 picks a free port; the bound address is
/// returned.
pub fn start_metrics_server(
    runtime: &Handle,
    port: u16,
    gauges: Gauges,
) -> Result<SocketAddr, TelemetryError> {
    let listener = StdTcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port)))
        .and_then(|listener| {
            listener.set_nonblocking(true)?;
            Ok(listener)
        })
        .map_err(|source| TelemetryError::Bind { port, source })?;
    let addr = listener
        .local_addr()
        .map_err(|source| TelemetryError::Bind { port, source })?;

    runtime.spawn(async move {
        let listener = match TcpListener::from_std(listener) {
            Ok(listener) => listener,
            Err(error) => {
                warn!(%error, "metrics_listener_failed");
                return;
            }
        };
        info!(port = addr.port(), "metrics_server_listening");
        serve(listener, gauges).await;
    });
    Ok(addr)
}

async fn serve(listener: TcpListener, gauges: Gauges) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let gauges = gauges.clone();
                tokio::spawn(async move {
                    if let Err(error) = handle_connection(stream, &gauges).await {
                        debug!(%peer, %error, "metrics_connection_error");
                    }
                });
            }
            Err(error) => warn!(%error, "metrics_accept_failed"),
        }
    }
}

async fn handle_connection(mut stream: TcpStream, gauges: &Gauges) -> std::io::Result<()> {
    let head = read_request_head(&mut stream).await?;
    let response = match request_target(&head) {
        Some(("GET", "/metrics")) => {
            let body = render_prometheus(&gauges.snapshot());
            format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                CONTENT_TYPE,
                body.len(),
                body
            )
        }
        _ => {
            let body = "Not Found\n";
            format!(
                "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
        }
    };
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Read until the blank line ending the request head, or the size cap.
async fn read_request_head(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut head = Vec::with_capacity(512);
    let mut buf = [0u8; 512];
    while head.len() < MAX_REQUEST_HEAD {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&head).into_owned())
}

/// Method and path (query string stripped) of the request line.
fn request_target(head: &str) -> Option<(&str, &str)> {
    let mut parts = head.lines().next()?.split_whitespace();
    let method = parts.next()?;
    let target = parts.next()?;
    let path = target.split('?').next().unwrap_or(target);
    Some((method, path))
}
