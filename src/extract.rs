use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

/// `axum::Json` whose rejection is an `AppError::MalformedInput`, so a bad
/// body gets the same error shape as every other failure.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                debug!(
                    status = %rejection.status(),
                    error = %rejection.body_text(),
                    "json body rejected"
                );
                AppError::MalformedInput("invalid json body")
            })?;
        Ok(AppJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, StatusCode},
        routing::post,
        Router,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Login {
        email: String,
        #[allow(dead_code)]
        password: String,
    }

    async fn handler(AppJson(body): AppJson<Login>) -> String {
        body.email
    }

    async fn send(
        content_type: Option<&str>,
        body: &'static str,
    ) -> (StatusCode, serde_json::Value) {
        let mut req = axum::http::Request::post("/");
        if let Some(ct) = content_type {
            req = req.header(header::CONTENT_TYPE, ct);
        }
        let res = Router::new()
            .route("/", post(handler))
            .oneshot(req.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let body = r#"{"email":"a@b.co","password":"x"}"#;
        let (status, _) = send(Some("application/json"), body).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn every_rejection_is_a_bad_request_with_error_body() {
        for (ct, body) in [
            (Some("application/json"), r#"{"email":"a@b.co"}"#),
            (Some("application/json"), "{not json"),
            (None, r#"{"email":"a@b.co","password":"x"}"#),
        ] {
            let (status, v) = send(ct, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(v["error"]["code"], "BAD_REQUEST");
            assert_eq!(v["error"]["message"], "malformed input");
        }
    }
}
