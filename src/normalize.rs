use url::Url;

pub const MAX_URL_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("URL не должен быть пустым")]
    Empty,
    #[error("Некорректный URL")]
    TooLong,
    #[error("Некорректный URL")]
    Malformed,
}

/// Validates a submitted address and reduces it to its canonical `scheme://host` form.
pub fn parse_submission(raw: &str) -> Result<String, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }
    if raw.chars().count() > MAX_URL_LEN {
        return Err(ValidationError::TooLong);
    }

    let parsed = Url::parse(raw).map_err(|_| ValidationError::Malformed)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::Malformed);
    }

    normalize(raw)
}

/// Lower-cases the input and keeps only scheme and host.
///
/// Path, query, fragment, credentials and port are dropped. Input whose scheme or
/// host is empty after parsing is rejected.
pub fn normalize(raw: &str) -> Result<String, ValidationError> {
    let lowered = raw.trim().to_lowercase();
    let parsed = Url::parse(&lowered).map_err(|_| ValidationError::Malformed)?;

    let scheme = parsed.scheme();
    let host = parsed.host_str().unwrap_or_default();
    if scheme.is_empty() || host.is_empty() {
        return Err(ValidationError::Malformed);
    }

    Ok(format!("{scheme}://{host}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_path_query_and_fragment() {
        assert_eq!(
            normalize("HTTP://Example.com/foo?x=1").unwrap(),
            "http://example.com"
        );
        assert_eq!(
            normalize("https://example.com/a/b#frag").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn drops_port_and_credentials() {
        assert_eq!(
            normalize("https://user:pw@Example.com:8443/x").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn is_idempotent() {
        for raw in [
            "HTTP://Example.com/foo?x=1",
            "https://sub.Domain.org:81/",
            "http://127.0.0.1:3000/path",
        ] {
            let once = normalize(raw).unwrap();
            assert_eq!(normalize(&once).unwrap(), once);
        }
    }

    #[test]
    fn rejects_inputs_without_host() {
        assert_eq!(normalize("mailto:me@example.com"), Err(ValidationError::Malformed));
        assert_eq!(normalize("not a url"), Err(ValidationError::Malformed));
    }

    #[test]
    fn submission_rejects_empty_and_blank() {
        assert_eq!(parse_submission(""), Err(ValidationError::Empty));
        assert_eq!(parse_submission("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn submission_rejects_non_http_schemes_and_garbage() {
        assert_eq!(parse_submission("example"), Err(ValidationError::Malformed));
        assert_eq!(
            parse_submission("ftp://example.com"),
            Err(ValidationError::Malformed)
        );
    }

    fn url_of_len(len: usize) -> String {
        let prefix = "https://example.com/";
        format!("{prefix}{}", "a".repeat(len - prefix.len()))
    }

    #[test]
    fn submission_length_limit_is_inclusive() {
        let at_limit = url_of_len(MAX_URL_LEN);
        assert_eq!(at_limit.chars().count(), 255);
        assert_eq!(parse_submission(&at_limit).unwrap(), "https://example.com");

        let over = url_of_len(MAX_URL_LEN + 1);
        assert_eq!(parse_submission(&over), Err(ValidationError::TooLong));
        assert_eq!(
            parse_submission(&format!("http://example.com/{}", "a".repeat(MAX_URL_LEN))),
            Err(ValidationError::TooLong)
        );
    }

    #[test]
    fn length_is_counted_in_characters() {
        let host = "пример.рф/";
        let raw = format!("https://{host}{}", "я".repeat(MAX_URL_LEN - 8 - host.chars().count()));
        assert!(raw.len() > MAX_URL_LEN);
        assert_ne!(parse_submission(&raw), Err(ValidationError::TooLong));
    }

    #[test]
    fn submission_accepts_and_normalizes() {
        assert_eq!(
            parse_submission("  https://Hexlet.io/courses  ").unwrap(),
            "https://hexlet.io"
        );
    }

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::Empty.to_string(),
            "URL не должен быть пустым"
        );
        assert_eq!(ValidationError::Malformed.to_string(), "Некорректный URL");
    }
}
