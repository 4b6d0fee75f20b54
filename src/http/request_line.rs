use crate::http::request::HttpError;

/// A HTTP request line with method, target and protocol version.
#[derive(Debug)]
pub struct RequestLine {
    /// The request method, e.g. `GET`.
    pub method: String,
    /// The request target, e.g. `/message`.
    pub request_target: String,
    /// The protocol version without the `HTTP/` prefix, e.g. `1.1`.
    pub http_version: String,
}

/// Parses a request line from the start of the passed text.
///
/// Returns `None` with a consumed length of zero while the line is still
/// incomplete, otherwise the parsed line and the number of bytes it
/// occupied including the trailing CRLF.
///
/// # Errors
///
/// Throws a `HttpError` if the line does not follow the RFC format or names
/// an unknown method.
pub fn parse_request_line(text: &str) -> Result<(Option<RequestLine>, usize), HttpError> {
    const VALID_METHODS: &[&str] = &["GET", "POST", "HEAD", "PUT", "PATCH", "DELETE", "OPTIONS"];
    const CRLF_LEN: usize = 2;

    let Some((line, _rest)) = text.split_once("\r\n") else {
        return Ok((None, 0));
    };

    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() != 3 {
        return Err(HttpError::MalformedRequestLine);
    }
    // An empty part means consecutive spaces, which the RFC does not allow.
    if parts.iter().any(|part| part.is_empty()) {
        return Err(HttpError::MalformedRequestLine);
    }

    let method = parts[0].to_string();
    let request_target = parts[1].to_string();
    let http_version = parts[2]
        .strip_prefix("HTTP/")
        .ok_or(HttpError::MalformedRequestLine)?
        .to_string();

    if !VALID_METHODS.contains(&method.as_str()) {
        return Err(HttpError::InvalidMethod(method));
    }

    let request_line = RequestLine {
        method,
        request_target,
        http_version,
    };
    Ok((Some(request_line), line.len() + CRLF_LEN))
}
