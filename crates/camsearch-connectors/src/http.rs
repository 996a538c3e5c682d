//! Shared reqwest plumbing for the HTTP-backed connectors.

use std::time::Duration;

use reqwest::{Client, Response};

use camsearch_core::{Error, Result};

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Http(format!("client build failed: {}", e)))
}

pub(crate) fn transport_error(provider: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(provider.to_string())
    } else {
        Error::Http(format!("{}: {}", provider, e))
    }
}

/// Fail on non-2xx, otherwise decode the body as JSON.
pub(crate) async fn json_body(provider: &str, response: Response) -> Result<serde_json::Value> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Upstream {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }
    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| Error::Decode(format!("{}: {}", provider, e)))
}

/// Read a JSON number that upstreams sometimes send as a string.
pub(crate) fn as_f64_lenient(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Local axum upstreams for exercising the HTTP connectors end to end.
#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use reqwest::Client;

    /// Serve `app` on an ephemeral loopback port and return its base URL.
    pub(crate) async fn serve(app: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Like `build_client`, but never routed through an environment proxy.
    pub(crate) fn loopback_client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .unwrap()
    }
}
