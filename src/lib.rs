// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! Tuenti authentication for XMPP over BOSH.
//!
//! The HTTP side of the session is left to a [`Transport`] implementation.
//! [`TuentiAuth::connect`] queues the session request; the transport hands
//! each reply back through [`Connection::deliver`] together with the
//! [`ConnectionAdapter`] driving the session. [`TuentiAuth`] polls until the
//! server advertises its SASL mechanisms and then authenticates with PLAIN.

pub use crate::config::BoshConfig;
pub use crate::connection::{Connection, ConnectionAdapter, HandlerRef, SetOnce, SysAction, SysHandler};
pub use crate::error::{Error, Result};
pub use crate::non_stanzas::Body;
pub use crate::status::{Status, StatusCallback};
pub use crate::transport::{Continuation, Request, Transport};
pub use crate::tuenti::TuentiAuth;

pub mod auth;
mod config;
mod connection;
mod error;
pub mod jid;
mod non_stanzas;
pub mod ns;
pub mod response;
pub mod status;
mod transport;
mod tuenti;
