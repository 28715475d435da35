//! Error taxonomy for the transport layer.
//!
//! Classification happens exactly once, at the transport boundary.
//! Callers branch on this closed enum instead of re-deriving failure
//! kinds from message text.

use thiserror::Error;

/// Errors surfaced by the API client.
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// The request exceeded its deadline (after the single extended-timeout
    /// retry for read operations).
    #[error("request timed out")]
    Timeout,

    /// The server answered 401; the stored session has been cleared.
    #[error("unauthorized, session cleared")]
    Unauthorized,

    /// The server answered but rejected the request (non-2xx other than
    /// 401, or a `success=false` envelope).
    #[error("server rejected request (status {status})")]
    ServerRejected {
        status: u16,
        message: Option<String>,
    },

    /// No response was received and the failure was not a timeout.
    #[error("network unavailable: {message}")]
    NetworkUnavailable { message: String },

    /// The configured base URL could not be parsed.
    #[error("invalid base url: {message}")]
    InvalidBaseUrl { message: String },
}

impl ApiError {
    /// Localized user-facing message for inline display.
    ///
    /// `ServerRejected` passes the payload message through verbatim when
    /// one is present; everything else maps to a fixed string.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Timeout => "انتهت مهلة الطلب، يرجى المحاولة مرة أخرى".to_string(),
            ApiError::Unauthorized => "انتهت الجلسة، يرجى تسجيل الدخول من جديد".to_string(),
            ApiError::ServerRejected {
                message: Some(msg), ..
            } => msg.clone(),
            ApiError::ServerRejected { .. } => "حدث خطأ غير متوقع".to_string(),
            ApiError::NetworkUnavailable { .. } => {
                "تعذر الاتصال بالخادم، تحقق من اتصالك بالإنترنت".to_string()
            }
            ApiError::InvalidBaseUrl { .. } => "حدث خطأ غير متوقع".to_string(),
        }
    }

    /// True when the single extended-timeout retry applies.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if let Some(status) = err.status() {
            if status == reqwest::StatusCode::UNAUTHORIZED {
                ApiError::Unauthorized
            } else {
                ApiError::ServerRejected {
                    status: status.as_u16(),
                    message: None,
                }
            }
        } else {
            ApiError::NetworkUnavailable {
                message: err.to_string(),
            }
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidBaseUrl {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_rejected_passes_payload_message_through() {
        let err = ApiError::ServerRejected {
            status: 404,
            message: Some("القاعة غير موجودة".to_string()),
        };
        assert_eq!(err.user_message(), "القاعة غير موجودة");
    }

    #[test]
    fn server_rejected_without_message_uses_generic_fallback() {
        let err = ApiError::ServerRejected {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), "حدث خطأ غير متوقع");
    }

    #[test]
    fn only_timeout_is_retryable() {
        assert!(ApiError::Timeout.is_timeout());
        assert!(!ApiError::Unauthorized.is_timeout());
        assert!(!ApiError::NetworkUnavailable {
            message: "dns".to_string()
        }
        .is_timeout());
    }
}
