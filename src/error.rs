use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// 请求处理过程中可能出现的错误
#[derive(Debug, Error)]
pub enum QuizError {
    /// 请求字段缺失或格式错误
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    /// 数据库、文件读写或解析失败
    #[error("{0}")]
    Unexpected(String),
}

impl From<sqlx::Error> for QuizError {
    fn from(e: sqlx::Error) -> Self {
        QuizError::Unexpected(e.to_string())
    }
}

impl From<std::io::Error> for QuizError {
    fn from(e: std::io::Error) -> Self {
        QuizError::Unexpected(e.to_string())
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(e: serde_json::Error) -> Self {
        QuizError::Unexpected(e.to_string())
    }
}

impl ResponseError for QuizError {
    fn status_code(&self) -> StatusCode {
        match self {
            QuizError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            QuizError::NotFound(_) => StatusCode::NOT_FOUND,
            QuizError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let QuizError::Unexpected(message) = self {
            log::error!("处理请求时出现错误: {}", message);
        }
        HttpResponse::build(self.status_code()).json(json!({"error": self.to_string()}))
    }
}
