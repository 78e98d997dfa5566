//! HTTP/1.1 client implementation.
//!
//! This module implements a minimal non-blocking HTTP/1.1 GET client driven
//! by readiness events. Every download runs over its own socket with
//! `Connection: close`; the peer closing the stream is the end-of-body
//! signal, so no Content-Length or chunked-encoding handling exists.
//!
//! # Architecture
//!
//! - **`connection`**: the per-socket download state machine
//! - **`parser`**: parses the response status line and headers
//! - **`request`**: builds the fixed-shape GET request bytes
//! - **`response`**: parsed response head representation
//! - **`body`**: fixed-capacity chunked body accumulator
//!
//! # Connection State Machine
//!
//! Each connection moves linearly through the states below, never backwards:
//!
//! ```text
//!        ┌──────────────┐
//!        │  Connecting  │ ← non-blocking connect in progress
//!        └──────┬───────┘
//!               │ socket writable, connect finalized
//!               ▼
//!        ┌──────────────┐
//!        │   Sending    │ ← write the request until exhausted
//!        └──────┬───────┘
//!               │ request fully written
//!               ▼
//!        ┌────────────────┐
//!        │ ReadingHeaders │ ← scan incoming bytes for CRLF CRLF
//!        └──────┬─────────┘
//!               │ terminator found, head parsed, status 200
//!               ▼
//!        ┌──────────────┐
//!        │ ReadingBody  │ ← accumulate chunks until peer closes
//!        └──────┬───────┘
//!               │ end of stream
//!               ▼
//!        ┌──────────────┐
//!        │    Closed    │ ← deregistered, completion delivered
//!        └──────────────┘
//! ```

pub mod body;
pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
