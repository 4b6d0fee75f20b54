use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::{
    headers::Headers,
    request_line::{RequestLine, parse_request_line},
};

/// A parsed HTTP request with request line, headers and body.
///
/// Includes a parse state to keep track of the progress of the parsing.
#[derive(Debug)]
pub struct Request {
    /// The state of the parser.
    parse_state: ParseState,
    /// The parsed request line.
    pub request_line: RequestLine,
    /// The parsed header fields.
    pub headers: Headers,
    /// The request body (can be empty).
    pub body: Vec<u8>,
}

/// Represents the different stages of the parser.
#[derive(Debug, PartialEq, Eq)]
enum ParseState {
    /// The parser is consuming the request line.
    RequestLine,
    /// The parser is consuming header fields.
    Headers,
    /// The parser is consuming the body.
    Body,
    /// The parser finished parsing.
    Done,
}

/// Represents the kind of error that can occur on the HTTP surface.
#[derive(Error, Debug)]
pub enum HttpError {
    /// The request contains an unsupported / invalid HTTP version.
    #[error("unsupported HTTP version: {0}")]
    UnsupportedVersion(String),

    /// The request contains an unsupported / invalid HTTP method.
    #[error("unsupported HTTP method: {0}")]
    InvalidMethod(String),

    /// The request line does not follow the RFC standard.
    #[error("request line is malformed")]
    MalformedRequestLine,

    /// The header does not follow the RFC standard.
    #[error("header is malformed")]
    MalformedHeader,

    /// The parser unexpectedly reached an end of file.
    #[error("unexpected end of file")]
    UnexpectedEOF,

    /// The passed body length does not match the header specification.
    #[error("body length does not match header")]
    InvalidBodyLength,

    /// The submitted body is not valid urlencoded form data.
    #[error("form body is malformed")]
    MalformedForm,

    /// There was a generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// There was an error parsing an integer to a string.
    #[error("Parsing error: {0}")]
    ParseError(#[from] std::num::ParseIntError),
}

/// Parses the contents of a reader to a Request.
///
/// The reader may be of any type that implements `AsyncRead`.
///
/// # Errors
///
/// Throws a `HttpError` if the stream ends early or carries data that does
/// not follow the RFC format.
pub async fn request_from_reader<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<Request, HttpError> {
    let request_line = RequestLine {
        method: String::new(),
        request_target: String::new(),
        http_version: String::new(),
    };
    let mut request = Request {
        parse_state: ParseState::RequestLine,
        request_line,
        headers: Headers::new(),
        body: Vec::new(),
    };
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 64];

    loop {
        if request.parse_state == ParseState::Done {
            return Ok(request);
        }

        let parsed = request.parse(&buffer)?;
        if parsed > 0 {
            buffer.drain(0..parsed);
            continue;
        }

        if request.parse_state == ParseState::Done {
            return Ok(request);
        }

        let read = reader.read(&mut chunk[0..]).await?;
        if read == 0 {
            if request.parse_state == ParseState::Done {
                return Ok(request);
            }
            return Err(HttpError::UnexpectedEOF);
        }
        buffer.extend_from_slice(&chunk[0..read]);
    }
}

impl Request {
    /// Parses passed byte data.
    ///
    /// Returns the size of the parsed data so the caller can retry the
    /// remainder once more bytes arrived.
    fn parse(&mut self, data: &[u8]) -> Result<usize, HttpError> {
        match self.parse_state {
            ParseState::RequestLine => {
                let text = String::from_utf8_lossy(data);
                let (request_line, consumed) = parse_request_line(text.as_ref())?;
                if let Some(request_line) = request_line {
                    if request_line.http_version != "1.1" {
                        return Err(HttpError::UnsupportedVersion(request_line.http_version));
                    }
                    self.parse_state = ParseState::Headers;
                    self.request_line = request_line;
                }
                Ok(consumed)
            }
            ParseState::Headers => {
                let (consumed, done) = self.headers.parse_header(data)?;
                if done {
                    self.parse_state = ParseState::Body;
                }
                Ok(consumed)
            }
            ParseState::Body => {
                let Some(declared) = self.headers.get("content-length") else {
                    self.parse_state = ParseState::Done;
                    return Ok(0);
                };
                let content_length: usize = declared.parse()?;

                let remaining = content_length.saturating_sub(self.body.len());
                let take = remaining.min(data.len());
                if take < data.len() {
                    // More bytes arrived than the declared length covers.
                    return Err(HttpError::InvalidBodyLength);
                }
                self.body.extend_from_slice(&data[..take]);

                if self.body.len() == content_length {
                    self.parse_state = ParseState::Done;
                }
                Ok(take)
            }
            ParseState::Done => {
                if data.is_empty() {
                    Ok(0)
                } else {
                    Err(HttpError::InvalidBodyLength)
                }
            }
        }
    }
}
