//! TLS-capable connector for the hyper transport
//!
//! `http` URIs get a plain TCP stream, `https` URIs get the same stream
//! wrapped in a rustls client session. Server certificates are checked
//! against the Mozilla root set from `webpki-roots` unless a custom client
//! configuration is supplied.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::future::BoxFuture;
use http::Uri;
use http::uri::Scheme;
use hyper::rt::{Read, ReadBufCursor, Write};
use hyper_util::client::legacy::connect::{Connected, Connection, HttpConnector};
use hyper_util::rt::TokioIo;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tower_service::Service;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Connector that speaks both `http` and `https`.
#[derive(Clone)]
pub struct HttpsConnector {
    http: HttpConnector,
    tls: Option<TlsConnector>,
}

impl HttpsConnector {
    /// Connector trusting the bundled web PKI roots.
    ///
    /// If the TLS configuration cannot be built, plain `http` still works
    /// and every `https` connect fails with a connect error.
    #[must_use]
    pub fn new(connect_timeout: Option<Duration>) -> Self {
        let tls = match default_tls_config() {
            Ok(config) => Some(TlsConnector::from(config)),
            Err(e) => {
                tracing::error!(
                    target: "curlew::transport",
                    error = %e,
                    "TLS configuration unavailable, https requests will fail"
                );
                None
            }
        };
        Self {
            http: http_connector(connect_timeout),
            tls,
        }
    }

    /// Connector using a caller-built rustls client configuration.
    #[must_use]
    pub fn with_tls_config(connect_timeout: Option<Duration>, config: Arc<ClientConfig>) -> Self {
        Self {
            http: http_connector(connect_timeout),
            tls: Some(TlsConnector::from(config)),
        }
    }
}

impl fmt::Debug for HttpsConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpsConnector")
            .field("tls", &self.tls.is_some())
            .finish_non_exhaustive()
    }
}

fn http_connector(connect_timeout: Option<Duration>) -> HttpConnector {
    let mut connector = HttpConnector::new();
    connector.enforce_http(false);
    connector.set_connect_timeout(connect_timeout);
    connector.set_nodelay(true);
    connector
}

/// Client configuration over the ring provider and the web PKI roots.
///
/// # Errors
///
/// Returns the rustls error if the provider rejects the default protocol
/// versions.
pub fn default_tls_config() -> Result<Arc<ClientConfig>, rustls::Error> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let mut config = ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    Ok(Arc::new(config))
}

impl Service<Uri> for HttpsConnector {
    type Response = MaybeTlsStream;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<MaybeTlsStream, BoxError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.http.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, uri: Uri) -> Self::Future {
        let secure = uri.scheme() == Some(&Scheme::HTTPS);
        let host = uri.host().unwrap_or_default().trim_matches(['[', ']']).to_owned();
        let connecting = self.http.call(uri);
        let tls = self.tls.clone();

        Box::pin(async move {
            let tcp = connecting.await?;
            if !secure {
                return Ok(MaybeTlsStream::Plain(tcp));
            }

            let tls = tls.ok_or_else(|| io::Error::other("TLS is not configured"))?;
            let server_name = ServerName::try_from(host)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            let stream = tls.connect(server_name, tcp.into_inner()).await?;
            tracing::trace!(target: "curlew::transport", "TLS session established");
            Ok(MaybeTlsStream::Tls(TokioIo::new(stream)))
        })
    }
}

/// Connection produced by [`HttpsConnector`].
pub enum MaybeTlsStream {
    Plain(TokioIo<TcpStream>),
    Tls(TokioIo<TlsStream<TcpStream>>),
}

impl MaybeTlsStream {
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self, MaybeTlsStream::Tls(_))
    }
}

impl fmt::Debug for MaybeTlsStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaybeTlsStream::Plain(_) => f.write_str("MaybeTlsStream::Plain"),
            MaybeTlsStream::Tls(_) => f.write_str("MaybeTlsStream::Tls"),
        }
    }
}

impl Connection for MaybeTlsStream {
    fn connected(&self) -> Connected {
        match self {
            MaybeTlsStream::Plain(stream) => stream.connected(),
            MaybeTlsStream::Tls(_) => Connected::new(),
        }
    }
}

impl Read for MaybeTlsStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: ReadBufCursor<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(stream) => Pin::new(stream).poll_read(cx, buf),
            MaybeTlsStream::Tls(stream) => Pin::new(stream).poll_read(cx, buf),
        }
    }
}

impl Write for MaybeTlsStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(stream) => Pin::new(stream).poll_write(cx, buf),
            MaybeTlsStream::Tls(stream) => Pin::new(stream).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(stream) => Pin::new(stream).poll_flush(cx),
            MaybeTlsStream::Tls(stream) => Pin::new(stream).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(stream) => Pin::new(stream).poll_shutdown(cx),
            MaybeTlsStream::Tls(stream) => Pin::new(stream).poll_shutdown(cx),
        }
    }

    fn is_write_vectored(&self) -> bool {
        match self {
            MaybeTlsStream::Plain(stream) => stream.is_write_vectored(),
            MaybeTlsStream::Tls(stream) => stream.is_write_vectored(),
        }
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            MaybeTlsStream::Plain(stream) => Pin::new(stream).poll_write_vectored(cx, bufs),
            MaybeTlsStream::Tls(stream) => Pin::new(stream).poll_write_vectored(cx, bufs),
        }
    }
}
