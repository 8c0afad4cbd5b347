use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl AuthError {
    /// Truncate a response body to avoid dragging large payloads into logs
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        // Back up to a char boundary; the cutoff may land inside a
        // multibyte character and slicing there would panic
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }

    /// Build an `InvalidResponse` from a body that failed to decode
    pub fn undecodable(body: &str, source: &serde_json::Error) -> Self {
        AuthError::InvalidResponse(format!("{}: {}", source, Self::truncate_body(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body() {
        let short = "not json";
        assert_eq!(AuthError::truncate_body(short), short);

        let long = "x".repeat(600);
        let truncated = AuthError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(500)));
        assert!(truncated.contains("600 total bytes"));
    }

    #[test]
    fn test_truncate_body_multibyte_boundary() {
        // 499 ASCII bytes followed by two-byte chars puts the cutoff in the
        // middle of a character; truncation must back up, not panic
        let body = format!("{}{}", "x".repeat(499), "é".repeat(20));
        let truncated = AuthError::truncate_body(&body);
        assert!(truncated.starts_with(&"x".repeat(499)));
        assert!(truncated.contains(&format!("{} total bytes", body.len())));

        // Same body through the decode-failure path a server can trigger
        let parse_err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        let error = AuthError::undecodable(&body, &parse_err);
        assert!(matches!(error, AuthError::InvalidResponse(_)));
    }
}
