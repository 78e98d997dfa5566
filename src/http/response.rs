use std::collections::HashMap;

/// The parsed head of an HTTP response: status line plus headers.
///
/// Header names are stored exactly as received (no case normalization) and a
/// duplicated header name keeps the last occurrence.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    /// Numeric status code from the status line (e.g. 200)
    pub status: u16,
    /// Reason phrase from the status line (e.g. "OK")
    pub reason: String,
    /// Response headers as key-value pairs
    pub headers: HashMap<String, String>,
}

impl ResponseHead {
    /// Retrieves a header value by its exact name as sent by the server.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }
}
