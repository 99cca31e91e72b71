//! Request dispatch
//!
//! Every exchange runs on one process-wide tokio runtime. The blocking entry
//! point waits for the spawned exchange on a channel, the non-blocking one
//! hands back a [`ResponseFuture`] that can be awaited on any executor.
//!
//! Failures are classified in exactly two ways: collapsed into absence for
//! the untyped results, or turned into a `RequestExecution` error for the
//! typed ones.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, LazyLock};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::future::BoxFuture;
use tokio::runtime::Runtime;

use crate::error::{self, Result};
use crate::http::{RequestDescriptor, Response};
use crate::mapper::Mapper;
use crate::transport::{Transport, TransportError, TransportRequest};

const TARGET: &str = "curlew::dispatch";

static RUNTIME: LazyLock<std::result::Result<Runtime, std::io::Error>> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("curlew-dispatch")
        .build()
});

/// Why an exchange produced no response.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchError {
    #[error("no response within {0:?}")]
    TimedOut(Duration),

    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("dispatch runtime unavailable: {0}")]
    Runtime(String),
}

impl DispatchError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            DispatchError::TimedOut(_) => true,
            DispatchError::Transport(err) => err.is_timeout(),
            DispatchError::Runtime(_) => false,
        }
    }
}

/// Outcome of one exchange.
pub type Exchange = std::result::Result<Response<Bytes>, DispatchError>;

fn runtime() -> std::result::Result<&'static Runtime, DispatchError> {
    RUNTIME.as_ref().map_err(|e| {
        tracing::error!(target: TARGET, error = %e, "failed to start dispatch runtime");
        DispatchError::Runtime(e.to_string())
    })
}

/// Perform one exchange, bounded by `timeout` when set.
pub async fn exchange(
    transport: Arc<dyn Transport>,
    descriptor: RequestDescriptor,
    timeout: Option<Duration>,
    mapper: Arc<dyn Mapper>,
) -> Exchange {
    let started = Instant::now();
    let request = TransportRequest::from_descriptor(&descriptor)?;
    let pending = transport.execute(request);

    let response = match timeout {
        Some(limit) => tokio::time::timeout(limit, pending)
            .await
            .map_err(|_| DispatchError::TimedOut(limit))??,
        None => pending.await?,
    };

    tracing::debug!(
        target: TARGET,
        method = %descriptor.method(),
        url = %descriptor.url(),
        status = response.status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "exchange complete"
    );

    Ok(Response::new(
        response.status,
        response.headers,
        response.body,
        mapper,
    ))
}

/// Run an exchange on the shared runtime and wait for its outcome.
///
/// Safe to call from any thread, including runtime worker threads of other
/// executors, since the calling thread only waits on a channel.
pub fn send_blocking(
    transport: Arc<dyn Transport>,
    descriptor: RequestDescriptor,
    timeout: Option<Duration>,
    mapper: Arc<dyn Mapper>,
) -> Exchange {
    let runtime = runtime()?;
    let (tx, rx) = crossbeam_channel::bounded(1);
    runtime.spawn(async move {
        let outcome = exchange(transport, descriptor, timeout, mapper).await;
        // The receiver only disappears if the caller thread is gone.
        let _ = tx.send(outcome);
    });
    rx.recv()
        .map_err(|_| DispatchError::Runtime("exchange task dropped".to_string()))?
}

/// Start an exchange on the shared runtime without waiting for it.
///
/// The exchange makes progress whether or not the returned future is
/// polled.
pub fn send(
    transport: Arc<dyn Transport>,
    descriptor: RequestDescriptor,
    timeout: Option<Duration>,
    mapper: Arc<dyn Mapper>,
) -> ResponseFuture<Exchange> {
    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(e) => return ResponseFuture::ready(Err(e)),
    };
    let handle = runtime.spawn(exchange(transport, descriptor, timeout, mapper));
    ResponseFuture::new(async move {
        handle
            .await
            .unwrap_or_else(|e| Err(DispatchError::Runtime(e.to_string())))
    })
}

/// Collapse a failed exchange into absence, logging the reason.
pub fn into_absent<T>(outcome: std::result::Result<Response<T>, DispatchError>) -> Option<Response<T>> {
    match outcome {
        Ok(response) => Some(response),
        Err(e) => {
            tracing::warn!(target: TARGET, error = %e, timeout = e.is_timeout(), "request produced no response");
            None
        }
    }
}

/// Turn a failed exchange into a `RequestExecution` error.
///
/// # Errors
///
/// Returns `RequestExecution` carrying the dispatch failure as its source.
pub fn into_execution_error<T>(
    outcome: std::result::Result<Response<T>, DispatchError>,
    url: &str,
) -> Result<Response<T>> {
    outcome.map_err(|e| error::request_execution(e).with_url(url))
}

/// Future returned by the non-blocking request methods.
#[must_use = "futures do nothing unless awaited"]
pub struct ResponseFuture<T> {
    inner: BoxFuture<'static, T>,
}

impl<T: Send + 'static> ResponseFuture<T> {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            inner: Box::pin(future),
        }
    }

    pub fn ready(value: T) -> Self {
        Self::new(futures::future::ready(value))
    }

    /// Transform the eventual output.
    pub fn map<U, F>(self, f: F) -> ResponseFuture<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        ResponseFuture::new(futures::FutureExt::map(self.inner, f))
    }
}

impl<T> Future for ResponseFuture<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        self.inner.as_mut().poll(cx)
    }
}

impl<T> std::fmt::Debug for ResponseFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseFuture").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use http::{HeaderMap, Method};

    use super::*;
    use crate::http::Url;
    use crate::mapper::JsonMapper;
    use crate::transport::TransportResponse;

    #[derive(Debug)]
    enum Behaviour {
        Reply(u16, &'static str),
        Fail,
        Stall,
    }

    #[derive(Debug)]
    struct Scripted {
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Transport for Scripted {
        fn execute(
            &self,
            _request: TransportRequest,
        ) -> BoxFuture<'static, std::result::Result<TransportResponse, TransportError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Reply(status, body) => Box::pin(async move {
                    Ok(TransportResponse {
                        status,
                        headers: HeaderMap::new(),
                        body: Bytes::from_static(body.as_bytes()),
                    })
                }),
                Behaviour::Fail => Box::pin(async {
                    Err(TransportError::Protocol("connection closed before message completed".into()))
                }),
                Behaviour::Stall => Box::pin(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Err(TransportError::Protocol("unreachable".into()))
                }),
            }
        }
    }

    fn descriptor() -> RequestDescriptor {
        let url = Url::parse("http://localhost:1/test").unwrap().create().unwrap();
        RequestDescriptor::new(Method::GET, url, HeaderMap::new(), None, None)
    }

    fn mapper() -> Arc<dyn Mapper> {
        Arc::new(JsonMapper::new())
    }

    #[test]
    fn blocking_send_returns_the_response() {
        let transport = Scripted::new(Behaviour::Reply(200, "hello"));
        let response = send_blocking(transport.clone(), descriptor(), None, mapper()).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(&response.body()[..], b"hello");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn blocking_send_times_out() {
        let transport = Scripted::new(Behaviour::Stall);
        let started = Instant::now();
        let err = send_blocking(transport, descriptor(), Some(Duration::from_millis(50)), mapper())
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn failures_collapse_to_absence() {
        let transport = Scripted::new(Behaviour::Fail);
        let outcome = send_blocking(transport.clone(), descriptor(), None, mapper());
        assert!(into_absent(outcome).is_none());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failures_become_execution_errors() {
        let outcome = send_blocking(Scripted::new(Behaviour::Stall), descriptor(), Some(Duration::from_millis(20)), mapper());
        let err = into_execution_error(outcome, "http://localhost:1/test").unwrap_err();
        assert!(err.is_request_execution());
        assert!(err.is_timeout());
        assert_eq!(err.url(), Some("http://localhost:1/test"));
    }

    #[tokio::test]
    async fn async_send_resolves_on_another_executor() {
        let transport = Scripted::new(Behaviour::Reply(201, "made"));
        let response = send(transport, descriptor(), None, mapper())
            .map(into_absent)
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        assert_eq!(response.into_text().body(), "made");
    }

    #[tokio::test]
    async fn async_send_times_out() {
        let outcome = send(Scripted::new(Behaviour::Stall), descriptor(), Some(Duration::from_millis(20)), mapper()).await;
        assert!(matches!(outcome, Err(DispatchError::TimedOut(_))));
    }
}
