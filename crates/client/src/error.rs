use serde::Deserialize;

/// Errors from the sketchbook HTTP API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A required form field is empty; nothing was sent.
    #[error("{0} is required")]
    Incomplete(&'static str),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ClientError {
    /// Text suitable for showing to the user.
    ///
    /// For API errors this is the server's `error` message when the body
    /// has one.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { body, .. } => serde_json::from_str::<ErrorBody>(body)
                .map(|b| b.error)
                .unwrap_or_else(|_| self.to_string()),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_error_text() {
        let err = ClientError::Api {
            status: 400,
            body: r#"{"error":"Color 'Red' already exists","code":"VALIDATION_ERROR"}"#.into(),
        };
        assert_eq!(err.user_message(), "Color 'Red' already exists");
    }

    #[test]
    fn user_message_falls_back_to_display() {
        let err = ClientError::Api {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert_eq!(err.user_message(), "API error (502): Bad Gateway");
        assert_eq!(
            ClientError::Incomplete("title").user_message(),
            "title is required"
        );
    }
}
