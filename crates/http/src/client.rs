//! Thin JSON client over `reqwest` for the books REST service

use std::time::Duration;

use reqwest::{header::HeaderValue, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

use bookshelf_kernel::settings::ApiSettings;

use crate::error::{ApiError, ApiResult};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from API settings.
    pub fn new(settings: &ApiSettings) -> ApiResult<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(settings.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = settings.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let http = builder.build()?;

        tracing::debug!(base_url = %base_url, timeout_ms = ?settings.request_timeout_ms, "api client created");

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an absolute URL from path segments, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        let response = self.send(self.http.get(url)).await?;
        decode(response).await
    }

    /// GET a JSON body, treating `204 No Content` as `None`.
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> ApiResult<Option<T>> {
        let url = self.endpoint(segments)?;
        let response = self.send(self.http.get(url)).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    /// POST a JSON payload and decode the JSON reply.
    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let response = self.send(self.http.post(url).json(body)).await?;
        decode(response).await
    }

    /// DELETE a resource; any success status counts.
    pub async fn delete(&self, segments: &[&str]) -> ApiResult<()> {
        let url = self.endpoint(segments)?;
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    /// Attach a request id, send, and map non-success statuses to [`ApiError`].
    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request_id = Uuid::new_v7(Timestamp::now(NoContext)).to_string();
        let mut request = request.build()?;
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            request.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(request_id = %request_id, %method, %url, "sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            tracing::debug!(request_id = %request_id, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        // The status alone still decides the error when the body cannot be read.
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(request_id = %request_id, %err, "failed to read error body");
                String::new()
            }
        };
        tracing::debug!(
            request_id = %request_id,
            %method,
            %url,
            status = status.as_u16(),
            "request rejected"
        );
        Err(ApiError::from_status(status, &body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode as AxumStatus},
        routing::{delete, get},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiSettings::with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = client("http://localhost:8080");
        let url = client.endpoint(&["api", "books", "B 001"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/books/B%20001");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = client("http://localhost:8080/catalog/");
        let url = client.endpoint(&["api", "books"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/catalog/api/books");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = ApiClient::new(&ApiSettings::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_no_content_is_none() {
        let base = serve(Router::new().route("/items", get(|| async { AxumStatus::NO_CONTENT }))).await;
        let items: Option<Vec<Value>> = client(&base).get_optional_json(&["items"]).await.unwrap();
        assert!(items.is_none());
    }

    #[tokio::test]
    async fn test_request_id_header_is_sent() {
        let router = Router::new().route(
            "/echo",
            get(|headers: HeaderMap| async move {
                let id = headers
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "request_id": id }))
            }),
        );
        let base = serve(router).await;

        let body: Value = client(&base).get_json(&["echo"]).await.unwrap();
        let id = body["request_id"].as_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_validation_body_maps_to_field_errors() {
        let router = Router::new().route(
            "/items",
            axum::routing::post(|| async {
                (
                    AxumStatus::BAD_REQUEST,
                    Json(json!({ "isbn": "ISBN must be a 13-digit number" })),
                )
            }),
        );
        let base = serve(router).await;

        let err = client(&base)
            .post_json::<_, Value>(&["items"], &json!({ "isbn": "12" }))
            .await
            .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["isbn"], "ISBN must be a 13-digit number");
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let router = Router::new().route("/items/{id}", delete(|| async { AxumStatus::NOT_FOUND }));
        let base = serve(router).await;

        let err = client(&base).delete(&["items", "7"]).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_status_mapping() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // Promises more body than it sends, then hangs up.
            socket
                .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 64\r\n\r\npartial")
                .await
                .unwrap();
        });

        let err = client(&format!("http://{addr}"))
            .get_json::<Value>(&["items", "7"])
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        let base = serve(Router::new().route("/items", get(|| async { "not json" }))).await;
        let err = client(&base).get_json::<Value>(&["items"]).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
