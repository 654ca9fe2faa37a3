//! Validated query-string extractor for Axum
//!
//! `ValidatedQuery<T>` is the `Query` counterpart of [`super::ValidatedJson`].
//! Both a malformed query string and failed validation answer 400.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::validated_json::describe_errors;
use super::ApiResponse;

pub struct ValidatedQuery<T>(pub T);

pub enum ValidatedQueryRejection {
    QueryError(QueryRejection),
    ValidationError(validator::ValidationErrors),
}

impl IntoResponse for ValidatedQueryRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::QueryError(rejection) => format!("Invalid query: {}", rejection.body_text()),
            Self::ValidationError(errors) => describe_errors(&errors),
        };
        (StatusCode::BAD_REQUEST, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedQueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidatedQueryRejection::QueryError)?;

        value
            .validate()
            .map_err(ValidatedQueryRejection::ValidationError)?;

        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Params {
        #[validate(email)]
        email: Option<String>,
    }

    async fn handler(ValidatedQuery(_params): ValidatedQuery<Params>) -> &'static str {
        "ok"
    }

    async fn status_of(uri: &str) -> StatusCode {
        use tower::Service;
        let mut svc = Router::new().route("/q", get(handler)).into_service();
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        svc.call(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn absent_optional_field_passes() {
        assert_eq!(status_of("/q").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn valid_email_passes() {
        assert_eq!(status_of("/q?email=a%40b.io").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_email_returns_400() {
        assert_eq!(status_of("/q?email=nope").await, StatusCode::BAD_REQUEST);
    }
}
