#![allow(dead_code)]
//! In-process servers for the integration tests.
//!
//! Every server runs on its own thread with its own runtime, so blocking
//! client calls on the test thread never starve it.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::mpsc as std_mpsc;
use std::thread;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Multipart, RawQuery};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{any, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::oneshot;

pub const TEXT: &str = "I am a string";
/// How long `/slow` takes. Far longer than any timeout the tests set.
pub const SLOW_DELAY: Duration = Duration::from_secs(5);
/// How long `/delayed` takes. Longer than the short timeouts, well inside the long ones.
pub const SHORT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub age: u32,
}

impl User {
    pub fn sample() -> Self {
        Self {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            age: 36,
        }
    }
}

/// What `/echo` saw.
#[derive(Debug, Deserialize)]
pub struct Echo {
    pub method: String,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
    pub body: String,
}

/// One part as parsed by `/parts`.
#[derive(Debug, Deserialize)]
pub struct ReceivedPart {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub text: String,
}

pub struct Server {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl Server {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// `https` URL naming the certificate's host.
    pub fn secure_url(&self, path: &str) -> String {
        format!("https://localhost:{}{}", self.addr.port(), path)
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn start<F, Fut>(serve: F) -> Server
where
    F: FnOnce(tokio::net::TcpListener, oneshot::Receiver<()>) -> Fut + Send + 'static,
    Fut: Future<Output = ()>,
{
    init_logging();
    let (addr_tx, addr_rx) = std_mpsc::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("new rt");
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
                .await
                .expect("bind");
            addr_tx.send(listener.local_addr().expect("local addr")).expect("send addr");
            serve(listener, shutdown_rx).await;
        });
    });

    Server {
        addr: addr_rx.recv().expect("server address"),
        shutdown_tx: Some(shutdown_tx),
    }
}

/// The application server used by most tests.
pub fn app() -> Server {
    start(|listener, shutdown| async move {
        let _ = axum::serve(listener, router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.await;
            })
            .await;
    })
}

/// A server that answers every request with bytes that are not HTTP and
/// then closes the connection.
pub fn garbage() -> Server {
    start(|listener, mut shutdown| async move {
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => {
                    let Ok((mut socket, _)) = accepted else { continue };
                    tokio::spawn(async move {
                        let mut buf = vec![0_u8; 8192];
                        let _ = socket.read(&mut buf).await;
                        let _ = socket.write_all(b"\x00\x7f\x13garbage\xff\xfe not http\r\n\r\n").await;
                        let _ = socket.shutdown().await;
                    });
                }
            }
        }
    })
}

/// An HTTPS server that answers every request with `TEXT`.
pub fn tls(config: Arc<rustls::ServerConfig>) -> Server {
    start(move |listener, mut shutdown| async move {
        let acceptor = tokio_rustls::TlsAcceptor::from(config);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => {
                    let Ok((socket, _)) = accepted else { continue };
                    let acceptor = acceptor.clone();
                    tokio::spawn(async move {
                        let Ok(mut stream) = acceptor.accept(socket).await else { return };
                        let mut buf = vec![0_u8; 8192];
                        let _ = stream.read(&mut buf).await;
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{TEXT}",
                            TEXT.len()
                        );
                        let _ = stream.write_all(response.as_bytes()).await;
                        let _ = stream.shutdown().await;
                    });
                }
            }
        }
    })
}

/// An address nothing listens on.
pub fn closed_port_url(path: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}{path}")
}

fn router() -> Router {
    Router::new()
        .route("/text", get(|| async { TEXT }))
        .route("/blank", get(|| async { "" }))
        .route("/bad", get(|| async { (StatusCode::BAD_REQUEST, "bad request") }))
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(SLOW_DELAY).await;
                TEXT
            }),
        )
        .route(
            "/delayed",
            get(|| async {
                tokio::time::sleep(SHORT_DELAY).await;
                TEXT
            }),
        )
        .route("/user", get(|| async { Json(User::sample()) }).post(echo_user))
        .route("/query", get(|RawQuery(query): RawQuery| async move { query.unwrap_or_default() }))
        .route("/echo", any(echo))
        .route("/parts", post(parts))
}

async fn echo_user(Json(user): Json<User>) -> Json<User> {
    Json(user)
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };
    Json(json!({
        "method": method.as_str(),
        "content_type": header("content-type"),
        "user_agent": header("user-agent"),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn parts(mut multipart: Multipart) -> Json<Value> {
    let mut received = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let text = field.text().await.unwrap_or_default();
        received.push(json!({
            "name": name,
            "file_name": file_name,
            "content_type": content_type,
            "text": text,
        }));
    }
    Json(Value::Array(received))
}
