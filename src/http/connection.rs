use std::io::{ErrorKind, Read, Write};
use std::net::ToSocketAddrs;

use anyhow::{Context, Result, anyhow};
use bytes::Bytes;
use mio::event::Event;
use mio::net::TcpStream;
use mio::{Interest, Registry, Token};
use tracing::debug;

use crate::http::body::{BodyChunks, CHUNK_SIZE, assemble};
use crate::http::parser::parse_response_head;
use crate::http::request::build_request;
use crate::http::response::ResponseHead;

/// Delivered exactly once per successful download.
pub struct Completion<C> {
    /// Parsed status line and headers
    pub head: ResponseHead,
    /// Ordered body chunks; concatenated they form the full body
    pub chunks: Vec<Bytes>,
    /// The opaque value supplied when the connection was opened
    pub context: C,
}

impl<C> Completion<C> {
    /// Reassembles the chunk list into one contiguous body.
    pub fn body(&self) -> Vec<u8> {
        assemble(&self.chunks)
    }
}

/// Inbound buffer used while the response head is incomplete.
///
/// The fill cursor tracks how many bytes have been received; the scan cursor
/// tracks how far the terminator search has advanced. The scan resumes from
/// its saved position on every readiness event, so a terminator fragmented
/// across reads is found without revisiting scanned positions.
struct HeaderBuf {
    buf: Vec<u8>,
    filled: usize,
    scanned: usize,
}

const TERMINATOR: &[u8] = b"\r\n\r\n";

impl HeaderBuf {
    fn new() -> Self {
        Self {
            buf: vec![0; CHUNK_SIZE],
            filled: 0,
            scanned: 0,
        }
    }

    fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.filled..]
    }

    fn advance(&mut self, n: usize) {
        self.filled += n;
    }

    fn is_full(&self) -> bool {
        self.filled == self.buf.len()
    }

    fn filled(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    /// Scans forward for `\r\n\r\n` and returns the offset just past it.
    fn find_terminator(&mut self) -> Option<usize> {
        while self.scanned + TERMINATOR.len() <= self.filled {
            if &self.buf[self.scanned..self.scanned + TERMINATOR.len()] == TERMINATOR {
                return Some(self.scanned + TERMINATOR.len());
            }
            self.scanned += 1;
        }
        None
    }
}

/// Per-state data: each state owns exactly the buffers it needs, so e.g. no
/// outbound request bytes are reachable once the response is being read.
enum State {
    Connecting { request: Bytes },
    Sending { request: Bytes, written: usize },
    ReadingHeaders { buf: HeaderBuf },
    ReadingBody { head: ResponseHead, body: BodyChunks },
    Closed,
}

/// One in-flight HTTP download, owning its socket from connect to close.
///
/// The connection is advanced by [`ready`](Self::ready) whenever its socket
/// reports readiness. All transitions are linear; the only way out is the
/// single [`Completion`] on success or an `Err` that aborts the download.
pub struct Connection<C> {
    stream: TcpStream,
    token: Token,
    state: State,
    context: Option<C>,
}

impl<C> Connection<C> {
    /// Starts a non-blocking connect to `host:port` and registers the socket
    /// for writable readiness under `token`. The request bytes are built up
    /// front and held until the connect finalizes.
    pub fn open(
        host: &str,
        port: u16,
        path: &str,
        registry: &Registry,
        token: Token,
        context: C,
    ) -> Result<Self> {
        let addr = (host, port)
            .to_socket_addrs()
            .with_context(|| format!("resolving {}:{}", host, port))?
            .next()
            .ok_or_else(|| anyhow!("no address found for {}:{}", host, port))?;

        let mut stream = TcpStream::connect(addr)
            .with_context(|| format!("connecting to {}:{}", host, port))?;
        registry.register(&mut stream, token, Interest::WRITABLE)?;

        debug!(host, port, path, "connection opened");

        Ok(Self {
            stream,
            token,
            state: State::Connecting {
                request: build_request(host, port, path),
            },
            context: Some(context),
        })
    }

    /// Advances the state machine for one readiness notification.
    ///
    /// Every readiness bit still applicable to the current state is acted on
    /// within this one call, so a transition made early in the call can
    /// consume the rest of the same notification (e.g. connect finalization
    /// followed immediately by the first request write).
    ///
    /// Returns `Ok(Some(..))` exactly once, when the peer has closed the
    /// stream after a complete response. Any `Err` is fatal for this
    /// download; the caller must discard the connection.
    pub fn ready(&mut self, registry: &Registry, event: &Event) -> Result<Option<Completion<C>>> {
        if matches!(self.state, State::Connecting { .. })
            && (event.is_writable() || event.is_error())
        {
            self.on_connected(registry)?;
        }
        if matches!(self.state, State::Sending { .. }) && event.is_writable() {
            self.on_writable(registry)?;
        }
        if matches!(self.state, State::ReadingHeaders { .. }) && event.is_readable() {
            self.on_read_headers()?;
        }
        if matches!(self.state, State::ReadingBody { .. }) && event.is_readable() {
            return self.on_read_body(registry);
        }
        Ok(None)
    }

    /// Deregisters the socket and drops into the terminal state. Used on the
    /// error path so the event loop never keeps a stuck entry.
    pub fn close(&mut self, registry: &Registry) {
        if let Err(e) = registry.deregister(&mut self.stream) {
            debug!(error = %e, "deregister on close failed");
        }
        self.state = State::Closed;
    }

    fn on_connected(&mut self, registry: &Registry) -> Result<()> {
        if let Some(err) = self.stream.take_error()? {
            return Err(anyhow::Error::new(err).context("connect failed"));
        }
        // A connect still in progress reports NotConnected here; stay in
        // Connecting and wait for the next writable notification.
        match self.stream.peer_addr() {
            Ok(_) => {}
            Err(e)
                if e.kind() == ErrorKind::NotConnected || e.kind() == ErrorKind::WouldBlock =>
            {
                return Ok(());
            }
            Err(e) => return Err(anyhow::Error::new(e).context("connect failed")),
        }

        registry.reregister(&mut self.stream, self.token, Interest::WRITABLE)?;
        if let State::Connecting { request } = std::mem::replace(&mut self.state, State::Closed) {
            debug!("connected, sending request");
            self.state = State::Sending {
                request,
                written: 0,
            };
        }
        Ok(())
    }

    fn on_writable(&mut self, registry: &Registry) -> Result<()> {
        let State::Sending { request, written } = &mut self.state else {
            return Ok(());
        };

        while *written < request.len() {
            match self.stream.write(&request[*written..]) {
                Ok(0) => return Err(anyhow!("connection closed while sending request")),
                Ok(n) => *written += n,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(anyhow::Error::new(e).context("writing request")),
            }
        }

        registry.reregister(&mut self.stream, self.token, Interest::READABLE)?;
        self.state = State::ReadingHeaders {
            buf: HeaderBuf::new(),
        };
        Ok(())
    }

    fn on_read_headers(&mut self) -> Result<()> {
        let State::ReadingHeaders { buf } = &mut self.state else {
            return Ok(());
        };

        loop {
            if buf.spare_mut().is_empty() {
                break;
            }
            match self.stream.read(buf.spare_mut()) {
                Ok(0) => return Err(anyhow!("connection closed before end of headers")),
                Ok(n) => buf.advance(n),
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(anyhow::Error::new(e).context("reading response headers")),
            }
        }

        let Some(header_end) = buf.find_terminator() else {
            if buf.is_full() {
                return Err(anyhow!("response headers exceed {} bytes", CHUNK_SIZE));
            }
            return Ok(());
        };

        let head = parse_response_head(&buf.filled()[..header_end])
            .map_err(|e| anyhow!("malformed HTTP response: {:?}", e))?;
        if head.status != 200 {
            return Err(anyhow!(
                "unexpected HTTP status: {} {}",
                head.status,
                head.reason
            ));
        }

        // Body bytes that arrived in the same read as the terminator become
        // the first chunk; further reads go into a fresh buffer.
        let body = BodyChunks::with_leftover(&buf.filled()[header_end..]);

        debug!(status = head.status, "response head received");
        self.state = State::ReadingBody { head, body };
        Ok(())
    }

    fn on_read_body(&mut self, registry: &Registry) -> Result<Option<Completion<C>>> {
        loop {
            let State::ReadingBody { body, .. } = &mut self.state else {
                return Ok(None);
            };
            match self.stream.read(body.spare_mut()) {
                // Peer closed the socket: the whole body has arrived.
                Ok(0) => return self.finish(registry),
                Ok(n) => body.advance(n),
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(anyhow::Error::new(e).context("reading response body")),
            }
        }
    }

    fn finish(&mut self, registry: &Registry) -> Result<Option<Completion<C>>> {
        registry
            .deregister(&mut self.stream)
            .context("deregistering socket")?;

        let State::ReadingBody { head, body } = std::mem::replace(&mut self.state, State::Closed)
        else {
            return Ok(None);
        };
        let Some(context) = self.context.take() else {
            return Ok(None);
        };

        let chunks = body.finish();
        debug!(chunks = chunks.len(), "download complete");
        Ok(Some(Completion {
            head,
            chunks,
            context,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminator_found_across_fragmented_fills() {
        // The 4-byte terminator split 1/1/1/1, 2/2 and 3/1 across fills
        // must all be detected at the same offset.
        for splits in [vec![1, 1, 1, 1], vec![2, 2], vec![3, 1]] {
            let mut buf = HeaderBuf::new();
            let head = b"HTTP/1.1 200 OK";
            buf.spare_mut()[..head.len()].copy_from_slice(head);
            buf.advance(head.len());
            assert_eq!(buf.find_terminator(), None);

            let mut terminator = &b"\r\n\r\n"[..];
            for (i, n) in splits.iter().copied().enumerate() {
                buf.spare_mut()[..n].copy_from_slice(&terminator[..n]);
                buf.advance(n);
                terminator = &terminator[n..];
                if i < splits.len() - 1 {
                    assert_eq!(buf.find_terminator(), None);
                }
            }
            assert_eq!(buf.find_terminator(), Some(head.len() + 4));
        }
    }
}
