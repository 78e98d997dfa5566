use mandelfetch::http::request::{USER_AGENT, build_request};

#[test]
fn test_request_wire_format_non_default_port() {
    let req = build_request("example.com", 8080, "/mandelbrot/0/1/0/1/10/10/50");

    let expected = format!(
        "GET /mandelbrot/0/1/0/1/10/10/50 HTTP/1.1\r\n\
         Host: example.com:8080\r\n\
         User-Agent: {}\r\n\
         Connection: close\r\n\r\n",
        USER_AGENT
    );
    assert_eq!(&req[..], expected.as_bytes());
}

#[test]
fn test_request_default_port_omitted_from_host() {
    let req = build_request("example.com", 80, "/tile");

    let expected = format!(
        "GET /tile HTTP/1.1\r\n\
         Host: example.com\r\n\
         User-Agent: {}\r\n\
         Connection: close\r\n\r\n",
        USER_AGENT
    );
    assert_eq!(&req[..], expected.as_bytes());
}

#[test]
fn test_request_port_80_only_elision() {
    // The port segment appears iff the port is not 80.
    for port in [79u16, 81, 443, 8080] {
        let req = build_request("h", port, "/");
        let text = std::str::from_utf8(&req).unwrap();
        assert!(text.contains(&format!("Host: h:{}\r\n", port)));
    }

    let req = build_request("h", 80, "/");
    let text = std::str::from_utf8(&req).unwrap();
    assert!(text.contains("Host: h\r\n"));
}

#[test]
fn test_request_always_closes_connection() {
    let req = build_request("example.com", 80, "/");
    let text = std::str::from_utf8(&req).unwrap();
    assert!(text.contains("Connection: close\r\n"));
    assert!(text.ends_with("\r\n\r\n"));
}
