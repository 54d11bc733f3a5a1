//! Error Types
//!
//! Failures the flows surface to the operator. Every variant maps to a
//! displayable message at the view boundary.

/// Errors from the transport/normalization pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-success HTTP status from the backend.
    Status(u16),
    /// The fetch itself failed, or the body was not JSON.
    Network(String),
    /// The body was JSON but matched none of the accepted envelope shapes.
    Malformed,
    /// The backend answered with an error envelope; message passed through.
    Backend(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Status(code) => write!(f, "HTTPエラー: {}", code),
            ApiError::Network(msg) => write!(f, "通信エラー: {}", msg),
            ApiError::Malformed => write!(f, "API応答が不正です"),
            ApiError::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Client-side stock input validation failures. Never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockInputError {
    NotANumber,
    Negative,
}

impl std::fmt::Display for StockInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockInputError::NotANumber => write!(f, "在庫数は数字で入力してください"),
            StockInputError::Negative => write!(f, "在庫数は 0 以上で入力してください"),
        }
    }
}

impl std::error::Error for StockInputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_carry_context() {
        assert_eq!(ApiError::Status(500).to_string(), "HTTPエラー: 500");
        assert_eq!(ApiError::Malformed.to_string(), "API応答が不正です");
        assert_eq!(
            ApiError::Backend("在庫シートがありません".to_string()).to_string(),
            "在庫シートがありません"
        );
    }
}
