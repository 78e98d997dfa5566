use bytes::Bytes;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("mandelfetch/", env!("CARGO_PKG_VERSION"));

const DEFAULT_HTTP_PORT: u16 = 80;

/// Builds the complete request bytes for a tile download.
///
/// The request shape is fixed: a GET with Host, User-Agent and
/// `Connection: close`, no body. Keep-alive is not supported; the client
/// relies on the peer closing the socket to delimit the response body. The
/// Host header carries the port only when it is not the default HTTP port.
pub fn build_request(host: &str, port: u16, path: &str) -> Bytes {
    let mut buf = String::with_capacity(128);

    buf.push_str("GET ");
    buf.push_str(path);
    buf.push_str(" HTTP/1.1\r\n");

    if port == DEFAULT_HTTP_PORT {
        buf.push_str("Host: ");
        buf.push_str(host);
        buf.push_str("\r\n");
    } else {
        buf.push_str("Host: ");
        buf.push_str(host);
        buf.push(':');
        buf.push_str(&port.to_string());
        buf.push_str("\r\n");
    }

    buf.push_str("User-Agent: ");
    buf.push_str(USER_AGENT);
    buf.push_str("\r\n");
    buf.push_str("Connection: close\r\n");
    buf.push_str("\r\n");

    Bytes::from(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_omitted_from_host() {
        let req = build_request("example.com", 80, "/tile");
        let text = std::str::from_utf8(&req).unwrap();
        assert!(text.contains("Host: example.com\r\n"));
        assert!(!text.contains("example.com:80"));
    }
}
