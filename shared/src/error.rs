//! 接口错误归一化
//!
//! 把 (HTTP 状态码, 服务端消息) 映射为面向用户的错误类型，
//! `Display` 的输出即为界面上展示的文案。

use thiserror::Error;

pub const MSG_INVALID_DATA: &str = "Invalid data. Please check your input.";
pub const MSG_UNAUTHORIZED: &str = "Unauthorized. Please check your credentials.";
pub const MSG_FORBIDDEN: &str = "Forbidden. You are not allowed to perform this action.";
pub const MSG_CONFLICT: &str = "User already exists.";
pub const MSG_SERVER: &str = "Server error. Please try again later.";
pub const MSG_UNEXPECTED: &str = "An unexpected error occurred.";
pub const MSG_UNKNOWN: &str = "An unknown error occurred.";

/// 接口调用错误
///
/// 除 `Server` 外，各状态码变体都携带服务端给出的 `message`（可选），
/// 展示时优先使用服务端消息，缺失时回退到固定文案。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 400
    #[error("{}", .0.as_deref().unwrap_or(MSG_INVALID_DATA))]
    Validation(Option<String>),
    /// 401
    #[error("{}", .0.as_deref().unwrap_or(MSG_UNAUTHORIZED))]
    Unauthorized(Option<String>),
    /// 403
    #[error("{}", .0.as_deref().unwrap_or(MSG_FORBIDDEN))]
    Forbidden(Option<String>),
    /// 409
    #[error("{}", .0.as_deref().unwrap_or(MSG_CONFLICT))]
    Conflict(Option<String>),
    /// 500，服务端细节不对用户展示
    #[error("{}", MSG_SERVER)]
    Server,
    /// 其他状态码
    #[error("{}", .message.as_deref().unwrap_or(MSG_UNEXPECTED))]
    Unexpected {
        status: u16,
        message: Option<String>,
    },
    /// 请求未得到响应（网络错误、请求构建失败等）
    #[error("{}", MSG_UNKNOWN)]
    Network(String),
    /// 成功响应但响应体无法解析
    #[error("{}", MSG_UNEXPECTED)]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 根据状态码与服务端消息构造错误
    ///
    /// 空字符串的服务端消息视为缺失。
    pub fn from_status(status: u16, server_message: Option<String>) -> Self {
        let message = server_message.filter(|m| !m.is_empty());
        match status {
            400 => ApiError::Validation(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            409 => ApiError::Conflict(message),
            500 => ApiError::Server,
            status => ApiError::Unexpected { status, message },
        }
    }

    /// 对应的 HTTP 状态码（传输层错误没有状态码）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation(_) => Some(400),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Conflict(_) => Some(409),
            ApiError::Server => Some(500),
            ApiError::Unexpected { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::Forbidden(_))
    }
}

/// 纯函数形式的归一化：(状态码, 服务端消息) -> 展示文案
///
/// `status` 为 None 表示请求没有得到任何响应。
pub fn user_message(status: Option<u16>, server_message: Option<&str>) -> String {
    match status {
        Some(status) => {
            ApiError::from_status(status, server_message.map(str::to_string)).to_string()
        }
        None => MSG_UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_server_message_when_present() {
        assert_eq!(
            user_message(Some(400), Some("Reason is too long")),
            "Reason is too long"
        );
        assert_eq!(user_message(Some(401), Some("Token expired")), "Token expired");
        assert_eq!(user_message(Some(403), Some("Not your appointment")), "Not your appointment");
        assert_eq!(user_message(Some(409), Some("Email taken")), "Email taken");
        assert_eq!(user_message(Some(418), Some("I'm a teapot")), "I'm a teapot");
    }

    #[test]
    fn falls_back_to_category_messages() {
        assert_eq!(user_message(Some(400), None), MSG_INVALID_DATA);
        assert_eq!(user_message(Some(401), None), MSG_UNAUTHORIZED);
        assert_eq!(user_message(Some(403), Some("")), MSG_FORBIDDEN);
        assert_eq!(user_message(Some(409), None), MSG_CONFLICT);
        assert_eq!(user_message(Some(404), None), MSG_UNEXPECTED);
        assert_eq!(user_message(None, Some("ignored")), MSG_UNKNOWN);
    }

    #[test]
    fn only_empty_server_message_falls_back() {
        assert_eq!(user_message(Some(400), Some(" ")), " ");
        assert_eq!(
            ApiError::from_status(409, Some(String::new())).to_string(),
            MSG_CONFLICT
        );
    }

    #[test]
    fn server_errors_hide_detail() {
        assert_eq!(
            user_message(Some(500), Some("NullReferenceException at line 12")),
            MSG_SERVER
        );
        assert_eq!(ApiError::from_status(500, Some("boom".into())), ApiError::Server);
    }

    #[test]
    fn status_round_trip() {
        let err = ApiError::from_status(503, None);
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_auth_failure());
        assert!(ApiError::from_status(403, None).is_auth_failure());
        assert_eq!(ApiError::Network("offline".into()).status(), None);
    }
}
