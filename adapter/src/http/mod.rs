use std::{collections::BTreeMap, sync::Arc};

use reqwest::{header, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::{
    config::ApiConfig,
    error::{AppError, AppResult},
};

use crate::session::SessionContext;

pub mod model;

use model::envelope::{Envelope, ListData};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> AppResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, String)]) -> RequestBuilder {
        let query: Vec<_> = query.iter().filter(|(_, v)| !v.trim().is_empty()).collect();
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if query.is_empty() {
            builder
        } else {
            builder.query(&query)
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> AppResult<String> {
        let builder = match self.session.token().await {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), "api response");

        if status.is_success() {
            return Ok(body);
        }
        if status == StatusCode::UNAUTHORIZED {
            tracing::info!("credentials rejected, clearing session");
            self.session.clear().await;
        }
        Err(error_from_status(status.as_u16(), &body))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let body = self.execute(self.request(Method::GET, path, query)).await?;
        decode(&body)
    }

    pub async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        self.get::<Envelope<T>>(path, query).await?.into_data()
    }

    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        self.get_data::<ListData<T>>(path, query)
            .await
            .map(ListData::into_items)
    }

    pub async fn post<B, T>(&self, path: &str, body: Option<&B>) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path, &[]);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        decode(&self.execute(builder).await?)
    }

    /// POST without a body whose answer is not needed.
    pub async fn post_empty(&self, path: &str) -> AppResult<()> {
        self.execute(self.request(Method::POST, path, &[]))
            .await
            .map(|_| ())
    }

    /// POST with a body whose answer is not needed.
    pub async fn post_discard<B>(&self, path: &str, body: &B) -> AppResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let builder = self.request(Method::POST, path, &[]).json(body);
        self.execute(builder).await.map(|_| ())
    }

    pub async fn post_data<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.post::<B, Envelope<T>>(path, Some(body))
            .await?
            .into_data()
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path, &[]).json(body);
        decode(&self.execute(builder).await?)
    }

    pub async fn put_data<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.put::<B, Envelope<T>>(path, body).await?.into_data()
    }

    /// DELETE whose response body, if any, is not needed.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.execute(self.request(Method::DELETE, path, &[]))
            .await
            .map(|_| ())
    }

    pub async fn delete_data<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let body = self
            .execute(self.request(Method::DELETE, path, &[]))
            .await?;
        decode::<Envelope<T>>(&body)?.into_data()
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    serde_json::from_str(body)
        .map_err(|e| AppError::ConversionEntityError(format!("unexpected response body: {e}")))
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, serde_json::Value>>,
}

impl ErrorBody {
    // `{ "field": ["msg", ...] }` flattened in field order
    fn field_messages(&self) -> Option<String> {
        let messages: Vec<String> = self
            .errors
            .iter()
            .flat_map(|errors| errors.values())
            .flat_map(|value| match value {
                serde_json::Value::Array(items) => items.iter().filter_map(text).collect(),
                other => text(other).into_iter().collect::<Vec<_>>(),
            })
            .collect();
        (!messages.is_empty()).then(|| messages.join(", "))
    }
}

fn text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Maps a non-success response onto the error taxonomy.
pub fn error_from_status(status: u16, body: &str) -> AppError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    match status {
        401 => AppError::UnauthorizedError,
        403 => AppError::ForbiddenOperation,
        404 => AppError::EntityNotFound(
            parsed
                .message
                .unwrap_or_else(|| "resource not found".into()),
        ),
        422 => AppError::UnprocessableEntity(
            parsed
                .field_messages()
                .or(parsed.message)
                .unwrap_or_else(|| "the request was rejected".into()),
        ),
        429 => AppError::TooManyRequests,
        500..=599 => AppError::ServerError(status),
        _ => AppError::UnexpectedStatus {
            status,
            message: parsed.message.unwrap_or_else(|| body.trim().to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(401, AppError::UnauthorizedError)]
    #[case(403, AppError::ForbiddenOperation)]
    #[case(429, AppError::TooManyRequests)]
    #[case(503, AppError::ServerError(503))]
    fn fixed_statuses(#[case] status: u16, #[case] expected: AppError) {
        assert_eq!(
            error_from_status(status, "").to_string(),
            expected.to_string()
        );
    }

    #[test]
    fn validation_errors_are_flattened() {
        let body = r#"{
            "message": "The given data was invalid.",
            "errors": {
                "end_time": ["The end time must be after start time."],
                "event_date": ["The event date is required.", "The event date must be a date."]
            }
        }"#;
        match error_from_status(422, body) {
            AppError::UnprocessableEntity(msg) => assert_eq!(
                msg,
                "The end time must be after start time., The event date is required., The event date must be a date."
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unprocessable_without_field_errors_uses_message() {
        match error_from_status(422, r#"{"message":"Space not available"}"#) {
            AppError::UnprocessableEntity(msg) => assert_eq!(msg, "Space not available"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn not_found_keeps_backend_message() {
        match error_from_status(404, r#"{"message":"Reservation not found"}"#) {
            AppError::EntityNotFound(msg) => assert_eq!(msg, "Reservation not found"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            error_from_status(404, "<html>"),
            AppError::EntityNotFound(_)
        ));
    }

    #[test]
    fn other_statuses_carry_the_raw_body() {
        match error_from_status(418, "teapot") {
            AppError::UnexpectedStatus { status, message } => {
                assert_eq!((status, message.as_str()), (418, "teapot"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
