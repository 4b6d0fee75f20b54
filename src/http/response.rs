use std::fmt;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::{headers::Headers, request::HttpError};

/// A HTTP response with status code, headers and body.
#[derive(Debug)]
pub struct Response {
    /// The status answered with.
    pub status: StatusCode,
    /// The header fields answered with.
    pub headers: Headers,
    /// The response body (can be empty).
    pub body: Vec<u8>,
}

/// Enum containing the valid status codes used in this application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusCode {
    /// 200
    Ok = 200,
    /// 302, answered after a relayed form submission.
    Found = 302,
    /// 400
    BadRequest = 400,
    /// 404
    NotFound = 404,
    /// 500
    InternalServerError = 500,
}

/// Implements Display for the Status Code to enable formatting the Codes as integer values.
impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u16)
    }
}

impl StatusCode {
    /// Creates the string representation of the passed status code.
    #[must_use]
    pub const fn reason_phrase(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Found => "Found",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::InternalServerError => "Internal Server Error",
        }
    }
}

/// Writes the status line to the passed writer.
///
/// Hardcodes HTTP/1.1 due to the limit of the server to that version.
///
/// # Errors
///
/// Throws a `HttpError` if writing fails.
pub async fn write_status_line<W: AsyncWrite + Unpin>(
    writer: &mut W,
    status: StatusCode,
) -> Result<(), HttpError> {
    let line = format!("HTTP/1.1 {} {}\r\n", status as u16, status.reason_phrase());
    writer.write_all(line.as_bytes()).await?;
    Ok(())
}

/// Writes the headers and the final linebreak separating them from the body.
///
/// # Errors
///
/// Throws a `HttpError` if writing fails.
pub async fn write_headers<W: AsyncWrite + Unpin>(
    writer: &mut W,
    headers: &Headers,
) -> Result<(), HttpError> {
    for (key, value) in headers.iter() {
        writer.write_all(format!("{key}: {value}\r\n").as_bytes()).await?;
    }
    writer.write_all(b"\r\n").await?;
    Ok(())
}

/// Helper function to remove boilerplate for creating html responses with associated headers.
#[must_use]
pub fn html_response(status: StatusCode, body: Vec<u8>) -> Response {
    file_response(status, "text/html", body)
}

/// Helper function creating a response serving raw file bytes under the passed content type.
#[must_use]
pub fn file_response(status: StatusCode, content_type: &str, body: Vec<u8>) -> Response {
    let mut headers = Headers::new();
    headers.insert("content-type", content_type);
    headers.insert("content-length", body.len().to_string());
    Response {
        status,
        headers,
        body,
    }
}

/// Helper function creating the redirect answered after a form submission.
#[must_use]
pub fn redirect_response(location: &str) -> Response {
    let mut headers = Headers::new();
    headers.insert("location", location);
    headers.insert("content-length", "0");
    Response {
        status: StatusCode::Found,
        headers,
        body: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::http::response::{
        StatusCode, html_response, redirect_response, write_headers, write_status_line,
    };

    #[test]
    fn status_codes_format_as_integers() {
        assert_eq!(StatusCode::Ok.to_string(), "200");
        assert_eq!(StatusCode::Found.to_string(), "302");
        assert_eq!(StatusCode::NotFound.to_string(), "404");
    }

    #[tokio::test]
    async fn status_line_is_written_in_http_format() {
        let mut buffer = Cursor::new(Vec::new());

        write_status_line(&mut buffer, StatusCode::NotFound)
            .await
            .unwrap();

        assert_eq!(buffer.get_ref().as_slice(), b"HTTP/1.1 404 Not Found\r\n");
    }

    #[tokio::test]
    async fn headers_end_with_a_blank_line() {
        let response = html_response(StatusCode::Ok, b"<html></html>".to_vec());
        let mut buffer = Cursor::new(Vec::new());

        write_headers(&mut buffer, &response.headers).await.unwrap();

        let written = String::from_utf8(buffer.get_ref().clone()).unwrap();
        assert!(written.contains("content-type: text/html\r\n"));
        assert!(written.contains("content-length: 13\r\n"));
        assert!(written.ends_with("\r\n\r\n"));
    }

    #[test]
    fn redirect_carries_location_and_no_body() {
        let response = redirect_response("/message");

        assert_eq!(response.status, StatusCode::Found);
        assert_eq!(response.headers.get("location"), Some("/message"));
        assert!(response.body.is_empty());
    }
}
