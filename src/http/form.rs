use std::collections::BTreeMap;

use crate::http::request::HttpError;

/// Decodes an `application/x-www-form-urlencoded` body into field/value pairs.
///
/// Pairs are `&`-separated and split once on `=`; `+` decodes as a space and
/// `%XX` escapes as the byte they name. The decoded bytes must form valid
/// UTF-8.
///
/// # Errors
///
/// Throws a `HttpError` if the body is not valid UTF-8, a pair lacks a `=`,
/// or an escape is incomplete.
pub fn parse_form(body: &[u8]) -> Result<BTreeMap<String, String>, HttpError> {
    let text = std::str::from_utf8(body).map_err(|_| HttpError::MalformedForm)?;
    let mut fields = BTreeMap::new();

    for pair in text.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').ok_or(HttpError::MalformedForm)?;
        fields.insert(unescape(key)?, unescape(value)?);
    }

    Ok(fields)
}

/// Decodes one urlencoded component: `+` as space, `%XX` as the named byte.
fn unescape(text: &str) -> Result<String, HttpError> {
    let mut decoded = Vec::with_capacity(text.len());
    let mut bytes = text.bytes();

    while let Some(byte) = bytes.next() {
        match byte {
            b'+' => decoded.push(b' '),
            b'%' => {
                let hi = bytes.next().ok_or(HttpError::MalformedForm)?;
                let lo = bytes.next().ok_or(HttpError::MalformedForm)?;
                decoded.push((hex_value(hi)? << 4) | hex_value(lo)?);
            }
            other => decoded.push(other),
        }
    }

    String::from_utf8(decoded).map_err(|_| HttpError::MalformedForm)
}

fn hex_value(byte: u8) -> Result<u8, HttpError> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(HttpError::MalformedForm),
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{form::parse_form, request::HttpError};

    #[test]
    fn plain_pairs_are_decoded() {
        let fields = parse_form(b"username=alice&message=hi").unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("username").map(String::as_str), Some("alice"));
        assert_eq!(fields.get("message").map(String::as_str), Some("hi"));
    }

    #[test]
    fn plus_decodes_as_space() {
        let fields = parse_form(b"message=hello+there+world").unwrap();

        assert_eq!(
            fields.get("message").map(String::as_str),
            Some("hello there world")
        );
    }

    #[test]
    fn percent_escapes_are_decoded() {
        let fields = parse_form(b"message=a%26b%3Dc%20d").unwrap();

        assert_eq!(fields.get("message").map(String::as_str), Some("a&b=c d"));
    }

    #[test]
    fn non_ascii_utf8_is_preserved() {
        let fields = parse_form("username=%D0%BE%D0%BB%D1%8F&message=привіт".as_bytes()).unwrap();

        assert_eq!(fields.get("username").map(String::as_str), Some("оля"));
        assert_eq!(fields.get("message").map(String::as_str), Some("привіт"));
    }

    #[test]
    fn empty_value_is_kept() {
        let fields = parse_form(b"username=alice&message=").unwrap();

        assert_eq!(fields.get("message").map(String::as_str), Some(""));
    }

    #[test]
    fn empty_body_yields_no_fields() {
        let fields = parse_form(b"").unwrap();

        assert!(fields.is_empty());
    }

    #[test]
    fn pair_without_separator_should_throw_malformedform() {
        let result = parse_form(b"username");

        assert!(matches!(result, Err(HttpError::MalformedForm)));
    }

    #[test]
    fn truncated_escape_should_throw_malformedform() {
        let result = parse_form(b"message=oops%2");

        assert!(matches!(result, Err(HttpError::MalformedForm)));
    }

    #[test]
    fn invalid_escape_digit_should_throw_malformedform() {
        let result = parse_form(b"message=oops%zz");

        assert!(matches!(result, Err(HttpError::MalformedForm)));
    }

    #[test]
    fn invalid_utf8_should_throw_malformedform() {
        let result = parse_form(b"message=%ff%fe");

        assert!(matches!(result, Err(HttpError::MalformedForm)));
    }
}
