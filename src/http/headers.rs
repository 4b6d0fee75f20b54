use std::collections::HashMap;

use crate::http::request::HttpError;

/// Case-insensitive HTTP header fields.
///
/// Keys are stored lower-cased; repeated fields are joined with a comma as
/// RFC 9110 allows. Hash Maps do not guarantee ordering in Rust, which is
/// fine as header fields do not need to be ordered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    /// Returns an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Inserts a field, replacing any previous value under the same key.
    ///
    /// # Examples
    /// ```
    /// let mut headers = msgrelay::http::headers::Headers::new();
    /// headers.insert("drink", "milk");
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Retrieves the value of the specified field.
    ///
    /// Returns None if the specified key was not found in the header.
    ///
    /// # Examples
    /// ```
    /// let mut headers = msgrelay::http::headers::Headers::new();
    /// headers.insert("drink", "milk");
    /// assert_eq!(headers.get("drink"), Some("milk"));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Appends a value to a field, comma-joining it with any existing value.
    ///
    /// # Examples
    /// ```
    /// let mut headers = msgrelay::http::headers::Headers::new();
    /// headers.insert("drink", "milk");
    /// headers.append("drink", "water");
    /// assert_eq!(headers.get("drink"), Some("milk, water"));
    /// ```
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if let Some(existing) = self.0.get_mut(&key) {
            if !existing.is_empty() {
                existing.push_str(", ");
            }
            existing.push_str(&value);
        } else {
            self.0.insert(key, value);
        }
    }

    /// Iterates over all fields as string pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the map holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses header lines from the passed bytes.
    ///
    /// Consumes only complete CRLF-terminated lines and reports the number
    /// of bytes taken, so callers can retry with more data. The returned
    /// flag is true once the empty line separating headers from the body
    /// was seen.
    ///
    /// # Errors
    ///
    /// Throws a `HttpError` if a complete line is not a valid header field.
    pub fn parse_header<B>(&mut self, data: B) -> Result<(usize, bool), HttpError>
    where
        B: AsRef<[u8]>,
    {
        // size of \r\n fixed as 2
        const CRLF_LEN: usize = 2;
        let text = String::from_utf8_lossy(data.as_ref());
        let mut consumed = 0;

        let mut remaining = text.as_ref();
        while let Some((line, rest)) = remaining.split_once("\r\n") {
            consumed += line.len() + CRLF_LEN;
            if line.is_empty() {
                return Ok((consumed, true));
            }
            self.parse_field_line(line)?;
            remaining = rest;
        }

        Ok((consumed, false))
    }

    fn parse_field_line(&mut self, line: &str) -> Result<(), HttpError> {
        let (key, value) = line
            .trim()
            .split_once(':')
            .ok_or(HttpError::MalformedHeader)?;
        let value = value.trim();

        if key.is_empty() || key.contains(' ') || !key.chars().all(is_token_char) {
            return Err(HttpError::MalformedHeader);
        }

        let key = key.to_lowercase();
        if self.0.contains_key(&key) {
            self.append(key, value);
        } else {
            self.insert(key, value);
        }

        Ok(())
    }
}

/// Whether the character may appear in a field name according to <https://www.rfc-editor.org/rfc/rfc9110#section-5.6.2>
const fn is_token_char(c: char) -> bool {
    if c.is_ascii_alphanumeric() {
        return true;
    }

    matches!(
        c,
        '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
    )
}
