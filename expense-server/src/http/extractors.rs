//! Custom Axum extractors

use axum::body::HttpBody;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body whose rejection renders as a 400 `{"message": ...}`.
///
/// Syntax errors, type mismatches and a missing JSON content type all
/// fail here, before the handler touches the database. A body known to be
/// empty binds `T::default()` without looking at the content type.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.body().size_hint().exact() == Some(0) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, StatusCode};

    use crate::models::ExpenseInput;

    fn json_request(body: &'static str) -> Request {
        http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn binds_valid_body() {
        let JsonBody(input) =
            JsonBody::<ExpenseInput>::from_request(json_request(r#"{"title":"tea"}"#), &())
                .await
                .unwrap();
        assert_eq!(input.title, "tea");
    }

    #[tokio::test]
    async fn syntax_error_is_bad_request() {
        let err = JsonBody::<ExpenseInput>::from_request(json_request("{not json"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn type_mismatch_is_bad_request() {
        let err =
            JsonBody::<ExpenseInput>::from_request(json_request(r#"{"amount":"ten"}"#), &())
                .await
                .err()
                .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("amount"));
    }

    #[tokio::test]
    async fn empty_body_binds_zero_values() {
        let req = http::Request::builder()
            .method("POST")
            .body(Body::empty())
            .unwrap();
        let JsonBody(input) = JsonBody::<ExpenseInput>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(input, ExpenseInput::default());

        let JsonBody(input) = JsonBody::<ExpenseInput>::from_request(json_request(""), &())
            .await
            .unwrap();
        assert_eq!(input, ExpenseInput::default());
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let req = http::Request::builder()
            .method("POST")
            .body(Body::from(r#"{"title":"tea"}"#))
            .unwrap();
        let err = JsonBody::<ExpenseInput>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
