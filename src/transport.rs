// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use crate::non_stanzas::Body;

/// Which handler a completed request is routed to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// First reply to a Tuenti session request, and every poll sent while
    /// waiting for stream features.
    InitialResponse,
}

/// A body queued for the connection manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub rid: u64,
    pub body: Body,
    pub continuation: Continuation,
}

impl Request {
    pub fn new(body: Body, continuation: Continuation) -> Request {
        Request {
            rid: body.rid(),
            body,
            continuation,
        }
    }
}

/// The HTTP side of a BOSH session.
///
/// Implementations own request dispatch, retries and throttling. Once a
/// request completes they hand its response back through
/// [`Connection::deliver`](crate::Connection::deliver), exactly once and
/// never concurrently for the same connection.
pub trait Transport {
    /// Queues a request.
    fn push_request(&mut self, request: Request);

    /// Sends queued requests as the request window allows. Called after
    /// every `push_request`.
    fn throttled_request_handler(&mut self);

    /// Queues a serialized stanza for the next outgoing body.
    fn send(&mut self, data: String);
}
