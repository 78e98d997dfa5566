use crate::http::response::ResponseHead;
use std::collections::HashMap;

#[derive(Debug)]
pub enum ParseError {
    /// Status line does not start with "HTTP/1.1 " or is truncated
    MalformedStatusLine,
    /// The three characters after the version are not a number
    InvalidStatusCode,
    /// A header line with no colon separator
    InvalidHeader,
    /// Header bytes are not valid ASCII/UTF-8 text
    InvalidEncoding,
}

/// Parses a complete response head span (everything up to and including the
/// `\r\n\r\n` terminator) into a [`ResponseHead`].
///
/// Only `HTTP/1.1` responses are accepted. The status code is taken from the
/// three characters at offset 9 of the status line, the reason phrase is
/// whatever follows the code. Status enforcement (200-only) happens at the
/// connection layer, not here.
pub fn parse_response_head(buf: &[u8]) -> Result<ResponseHead, ParseError> {
    let text = std::str::from_utf8(buf).map_err(|_| ParseError::InvalidEncoding)?;

    let lines: Vec<&str> = text.split("\r\n").collect();

    // Status line
    let status_line = *lines.first().ok_or(ParseError::MalformedStatusLine)?;
    if !status_line.starts_with("HTTP/1.1 ") || status_line.len() < 12 {
        return Err(ParseError::MalformedStatusLine);
    }
    let status: u16 = status_line
        .get(9..12)
        .ok_or(ParseError::MalformedStatusLine)?
        .parse()
        .map_err(|_| ParseError::InvalidStatusCode)?;
    let reason = status_line.get(13..).unwrap_or("").to_string();

    // The span ends in CRLF CRLF, so the last split segment is empty.
    debug_assert_eq!(lines.last(), Some(&""));

    // Headers
    let mut headers = HashMap::new();

    for line in lines.get(1..lines.len() - 1).unwrap_or(&[]) {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;

        headers.insert(key.to_string(), value.trim().to_string());
    }

    Ok(ResponseHead {
        status,
        reason,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_ok() {
        let head = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n";

        let parsed = parse_response_head(head).unwrap();

        assert_eq!(parsed.status, 200);
        assert_eq!(parsed.reason, "OK");
        assert_eq!(parsed.header("Content-Type").unwrap(), "text/plain");
    }
}
