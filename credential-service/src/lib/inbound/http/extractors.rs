use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::Json;

use super::handlers::ApiError;
use super::handlers::ApiErrorData;

/// JSON body extractor whose rejections use the API error envelope.
///
/// Mistyped fields are a 422, a body that is not JSON at all is a 400.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ApiError::from)?;

        Ok(JsonBody(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Request body rejected");

        let data = ApiErrorData::new(rejection.body_text());
        match rejection {
            JsonRejection::JsonDataError(_) => ApiError::UnprocessableEntity(data),
            _ => ApiError::BadRequest(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        card_id: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_mistyped_field_is_unprocessable() {
        let request = json_request(r#"{"card_id": 42}"#);
        let result = JsonBody::<Payload>::from_request(request, &()).await;

        match result {
            Err(ApiError::UnprocessableEntity(data)) => {
                assert!(data.message.contains("card_id"));
                assert!(data.errors.is_empty());
            }
            Err(other) => panic!("unexpected rejection: {:?}", other),
            Ok(_) => panic!("mistyped body was accepted"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let result = JsonBody::<Payload>::from_request(json_request("{not json"), &()).await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"card_id": "1"}"#))
            .unwrap();

        let result = JsonBody::<Payload>::from_request(request, &()).await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
