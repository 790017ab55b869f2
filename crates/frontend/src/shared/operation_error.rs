//! Ошибки действий пользователя на клиенте.
//!
//! Страницы обрабатывают все варианты одинаково: уведомление и возврат
//! интерфейса в состояние до отправки. Код HTTP сохраняется только для текста.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Локальная проверка не прошла, запрос не отправлялся
    #[error("{0}")]
    Validation(String),

    #[error("Không kết nối được máy chủ: {0}")]
    Transport(String),

    #[error("Máy chủ từ chối yêu cầu ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Phản hồi không hợp lệ: {0}")]
    Decode(String),
}

impl OperationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Ответ не-2xx; текст берётся из тела `{"error": "..."}`, если оно есть
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_reason(status).to_string());
        Self::Rejected { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn default_reason(status: u16) -> &'static str {
    match status {
        400 => "dữ liệu không hợp lệ",
        401 => "phiên đăng nhập đã hết hạn",
        403 => "không có quyền",
        404 => "không tìm thấy",
        409 => "trạng thái đã thay đổi, hãy tải lại",
        500..=599 => "lỗi máy chủ",
        _ => "lỗi không xác định",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_uses_server_message() {
        let err = OperationError::rejected(409, r#"{"error":"cannot approve a transfer in status 'completed'"}"#);
        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().contains("(409)"));
        assert!(err.to_string().contains("completed"));
    }

    #[test]
    fn test_rejected_falls_back_to_reason() {
        let err = OperationError::rejected(500, "<html>boom</html>");
        assert_eq!(
            err,
            OperationError::Rejected {
                status: 500,
                message: "lỗi máy chủ".into()
            }
        );
        let err = OperationError::rejected(404, r#"{"error":"  "}"#);
        assert_eq!(err.to_string(), "Máy chủ từ chối yêu cầu (404): không tìm thấy");
    }

    #[test]
    fn test_validation_has_no_status() {
        let err = OperationError::validation("Chưa chọn kho");
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Chưa chọn kho");
    }
}
