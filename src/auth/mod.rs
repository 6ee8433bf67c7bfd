// rust-xmpp
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

pub use self::plain::PlainAuth;

pub mod plain;

pub trait Authenticator {
    /// Mechanism name as advertised in `<mechanism/>`.
    fn mechanism(&self) -> &'static str;
    fn initial(&mut self) -> Result<Vec<u8>, &'static str>;
    fn continuation(&mut self, _data: &[u8]) -> Result<Vec<u8>, &'static str> {
        Ok(Vec::new())
    }
}
