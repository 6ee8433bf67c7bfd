// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use std::fmt;

/// Condition reported when the server terminates without giving one.
pub const COND_UNKNOWN: &str = "unknown";
pub const COND_CONFLICT: &str = "conflict";
pub const COND_REMOTE_STREAM_ERROR: &str = "remote-stream-error";

/// Connection status codes passed to the status callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Error = 0,
    Connecting = 1,
    ConnFail = 2,
    Authenticating = 3,
    AuthFail = 4,
    Connected = 5,
    Disconnected = 6,
    Disconnecting = 7,
    Attached = 8,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Status::Error => "ERROR",
            Status::Connecting => "CONNECTING",
            Status::ConnFail => "CONNFAIL",
            Status::Authenticating => "AUTHENTICATING",
            Status::AuthFail => "AUTHFAIL",
            Status::Connected => "CONNECTED",
            Status::Disconnected => "DISCONNECTED",
            Status::Disconnecting => "DISCONNECTING",
            Status::Attached => "ATTACHED",
        })
    }
}

/// Receives every status transition together with an optional error
/// condition.
pub type StatusCallback = Box<dyn FnMut(Status, Option<&str>)>;
