//! Readiness event loop driving all in-flight tile downloads.

use std::collections::HashMap;

use anyhow::{Context, Result};
use mio::{Events, Poll, Token};
use tracing::debug;

use crate::http::connection::{Completion, Connection};

/// Single-threaded readiness multiplexer.
///
/// Owns the poll instance and the registration table mapping tokens to their
/// connections. All connections execute synchronously inside
/// [`run`](Self::run), one at a time; nothing here is shared across
/// connections except the table itself.
pub struct FetchLoop<C> {
    poll: Poll,
    events: Events,
    connections: HashMap<Token, Connection<C>>,
    next_token: usize,
}

impl<C> FetchLoop<C> {
    pub fn new() -> Result<Self> {
        Ok(Self {
            poll: Poll::new().context("creating poll instance")?,
            events: Events::with_capacity(128),
            connections: HashMap::new(),
            next_token: 0,
        })
    }

    /// Opens a connection for one download and registers it with the loop.
    /// `context` is carried through untouched and handed back with the
    /// completion.
    pub fn open(&mut self, host: &str, port: u16, path: &str, context: C) -> Result<()> {
        let token = Token(self.next_token);
        self.next_token += 1;

        let conn = Connection::open(host, port, path, self.poll.registry(), token, context)?;
        self.connections.insert(token, conn);
        Ok(())
    }

    /// Number of downloads not yet completed.
    pub fn in_flight(&self) -> usize {
        self.connections.len()
    }

    /// Blocks until every registered connection has completed, delivering
    /// each completion to `on_done` synchronously on this thread. The
    /// handler must not block: every other in-flight download stalls while
    /// it runs.
    ///
    /// Any connection error aborts the whole run: the failing socket is
    /// deregistered and the error propagated immediately, leaving the
    /// remaining downloads unfinished.
    pub fn run(&mut self, mut on_done: impl FnMut(Completion<C>) -> Result<()>) -> Result<()> {
        while !self.connections.is_empty() {
            self.poll
                .poll(&mut self.events, None)
                .context("waiting for socket readiness")?;

            for event in self.events.iter() {
                let token = event.token();
                // Stale notification for an already-removed connection.
                let Some(conn) = self.connections.get_mut(&token) else {
                    continue;
                };

                match conn.ready(self.poll.registry(), event) {
                    Ok(Some(completion)) => {
                        self.connections.remove(&token);
                        debug!(remaining = self.connections.len(), "download finished");
                        on_done(completion)?;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        if let Some(mut conn) = self.connections.remove(&token) {
                            conn.close(self.poll.registry());
                        }
                        return Err(e);
                    }
                }
            }
        }
        Ok(())
    }
}
