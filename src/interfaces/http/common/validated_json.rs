//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value.
//! On validation failure it returns a 422 response listing the offending
//! fields.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateStaff {
///     #[validate(length(min = 1))]
///     name: String,
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateStaff>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(validator::ValidationErrors),
}

/// `field: message` pairs joined with `; `.
pub(super) fn describe_errors(errors: &validator::ValidationErrors) -> String {
    let mut field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    field_errors.sort();

    if field_errors.is_empty() {
        "Validation failed".to_string()
    } else {
        field_errors.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let body = ApiResponse::<()>::error(format!("Invalid JSON: {}", rejection.body_text()));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let body = ApiResponse::<()>::error(describe_errors(&errors));
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(email(message = "invalid email"))]
        email: String,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(body: impl Into<Body>) -> axum::http::Response<Body> {
        use tower::Service;
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap();
        let mut svc = app().into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"name": "Alice", "email": "alice@x.io"});
        let resp = send(serde_json::to_vec(&body).unwrap()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let resp = send("not json").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_failure_lists_fields() {
        let body = serde_json::json!({"name": "", "email": "nope"});
        let resp = send(serde_json::to_vec(&body).unwrap()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "email: invalid email; name: name is required");
    }
}
