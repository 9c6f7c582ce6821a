use serde::Serialize;

/// Body of every successful `/api` response. Failures are rendered by
/// [`AppError`](crate::error::AppError) with `success: false`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_is_omitted_when_absent() {
        assert_eq!(
            serde_json::to_value(ApiResponse::success(1)).unwrap(),
            json!({"success": true, "data": 1})
        );
        assert_eq!(
            serde_json::to_value(ApiResponse::success(1).with_message("Post created")).unwrap(),
            json!({"success": true, "data": 1, "message": "Post created"})
        );
    }
}
