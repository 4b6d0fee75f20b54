/// Module containing logic to parse HTTP headers
pub mod headers;
/// Module containing logic to parse HTTP request lines
pub mod request_line;
/// Module containing logic to parse requests
pub mod request;
/// Module formatting the response.
pub mod response;
/// Module decoding urlencoded form bodies.
pub mod form;
