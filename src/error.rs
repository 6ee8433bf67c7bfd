// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use thiserror::Error;

/// Errors returned by the BOSH connection adapter.
///
/// Failures reported by the server never show up here; those are passed
/// to the status callback instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The JID has no domain part to address the session request to.
    #[error("malformed JID: {0:?}")]
    MalformedJid(String),

    /// A response body was not well-formed XML.
    #[error("invalid response body: {0}")]
    Xml(String),
}

pub type Result<T> = std::result::Result<T, Error>;
