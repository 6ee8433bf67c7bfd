// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use crate::error::{Error, Result};

/// Returns the domain part of `local@domain/resource`.
///
/// Both the local part and the resource are optional. An empty domain is
/// rejected since there is nothing to address the session request to.
pub fn domain(jid: &str) -> Result<&str> {
    let bare = match jid.find('/') {
        Some(idx) => &jid[..idx],
        None => jid,
    };
    let domain = match bare.rfind('@') {
        Some(idx) => &bare[idx + 1..],
        None => bare,
    };

    if domain.is_empty() {
        return Err(Error::MalformedJid(jid.to_string()));
    }
    Ok(domain)
}
