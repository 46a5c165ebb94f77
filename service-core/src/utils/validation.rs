use axum::{
    Json,
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// JSON body extractor that also runs `validator` rules.
///
/// Malformed bodies and missing fields are rejected with 400, rule
/// violations with 422, before the handler body runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            let err_resp = ErrorResponse {
                error: format!("Json parse error: {}", e.body_text()),
            };
            (StatusCode::BAD_REQUEST, Json(err_resp)).into_response()
        })?;

        value.validate().map_err(|e| {
            let err_resp = ErrorResponse {
                error: format!("Validation error: {}", e),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Json(err_resp)).into_response()
        })?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Greeting {
        #[validate(length(min = 1))]
        name: String,
    }

    async fn greet(ValidatedJson(body): ValidatedJson<Greeting>) -> String {
        format!("hello {}", body.name)
    }

    async fn post_json(body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/", post(greet));
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let (status, body) = post_json(r#"{"name":"chef"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hello chef");
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (status, body) = post_json(r#"{}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Json parse error"));
    }

    #[tokio::test]
    async fn rule_violation_is_unprocessable() {
        let (status, body) = post_json(r#"{"name":""}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("Validation error"));
    }
}
