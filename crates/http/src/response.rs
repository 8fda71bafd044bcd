//! Uniform `{status, message, data}` response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Outcome marker carried by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Response envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T = ()> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    code: StatusCode,
}

impl ApiResponse<()> {
    /// Successful response carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.into()),
            data: None,
            code: StatusCode::OK,
        }
    }

    /// Failed response; used by the error layer
    pub fn fail(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            data: None,
            code,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying a data payload
    pub fn data(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
            code: StatusCode::OK,
        }
    }

    /// Attach a message to the envelope
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the HTTP status code (defaults to 200)
    pub fn with_code(mut self, code: StatusCode) -> Self {
        self.code = code;
        self
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let code = self.code;
        (code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_only_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::message("book deleted")).unwrap();
        assert_eq!(body, json!({"status": "success", "message": "book deleted"}));
    }

    #[test]
    fn data_envelope_with_code() {
        let response = ApiResponse::data(json!({"bookId": "abc"}))
            .with_message("book added")
            .with_code(StatusCode::CREATED);
        assert_eq!(response.code(), StatusCode::CREATED);

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(
            body,
            json!({"status": "success", "message": "book added", "data": {"bookId": "abc"}})
        );
    }

    #[test]
    fn fail_envelope_sets_status() {
        let response = ApiResponse::fail(StatusCode::NOT_FOUND, "book not found");
        assert_eq!(response.into_response().status(), StatusCode::NOT_FOUND);
    }
}
