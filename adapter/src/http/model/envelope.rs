use serde::Deserialize;
use shared::error::{AppError, AppResult};

/// `{ status, message, data, errors }` wrapper used by every endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// The payload, or an error when the backend answered with an error
    /// status or no data at all.
    pub fn into_data(self) -> AppResult<T> {
        if self.status.as_deref() == Some("error") {
            return Err(AppError::UnprocessableEntity(
                self.message.unwrap_or_else(|| "the request was rejected".into()),
            ));
        }
        self.data.ok_or_else(|| {
            AppError::ConversionEntityError(format!(
                "response carried no data{}",
                self.message.map(|m| format!(" ({m})")).unwrap_or_default()
            ))
        })
    }
}

/// Lists arrive either as a bare array or as a page object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListData<T> {
    Plain(Vec<T>),
    Paginated(Page<T>),
}

#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub last_page: Option<u32>,
}

impl<T> ListData<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListData::Plain(items) => items,
            ListData::Paginated(page) => page.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_and_paginated_lists_yield_the_same_items() {
        let plain: Envelope<ListData<u32>> =
            serde_json::from_value(json!({ "status": "success", "data": [1, 2] })).unwrap();
        let paged: Envelope<ListData<u32>> = serde_json::from_value(json!({
            "status": "success",
            "message": "ok",
            "data": { "current_page": 1, "data": [1, 2], "per_page": 15, "total": 2, "last_page": 1 }
        }))
        .unwrap();
        assert_eq!(plain.into_data().unwrap().into_items(), vec![1, 2]);
        assert_eq!(paged.into_data().unwrap().into_items(), vec![1, 2]);
    }

    #[test]
    fn missing_data_is_an_error_not_an_empty_list() {
        let env: Envelope<ListData<u32>> =
            serde_json::from_value(json!({ "status": "success", "message": "nothing" })).unwrap();
        assert!(matches!(
            env.into_data(),
            Err(AppError::ConversionEntityError(_))
        ));
    }

    #[test]
    fn error_status_is_surfaced() {
        let env: Envelope<u32> =
            serde_json::from_value(json!({ "status": "error", "message": "space closed" }))
                .unwrap();
        match env.into_data() {
            Err(AppError::UnprocessableEntity(msg)) => assert_eq!(msg, "space closed"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
