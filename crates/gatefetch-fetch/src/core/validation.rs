/// Returns `true` for statuses a plain HEAD reports as "ok" (below 400).
pub fn is_ok_status(status: u16) -> bool { (100..400).contains(&status) }

/// Returns `true` for 2xx statuses; only these carry a body worth keeping.
pub fn is_success_status(status: u16) -> bool { (200..300).contains(&status) }

/// Strip parameters from a Content-Type value.
///
/// # Examples
///
/// ```
/// use gatefetch_fetch::core::media_type;
///
/// assert_eq!(media_type("text/html; charset=utf-8"), "text/html");
/// ```
pub fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

/// Compare two Content-Type values by media type, ignoring ASCII case.
pub fn content_type_matches(expected: &str, actual: &str) -> bool {
    media_type(expected).eq_ignore_ascii_case(media_type(actual))
}

/// Parse a Content-Length header value.
pub fn parse_content_length(value: &str) -> Option<u64> { value.trim().parse().ok() }
