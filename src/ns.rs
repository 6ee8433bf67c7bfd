// rust-xmpp
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

pub const FEATURE_SASL: &str = "urn:ietf:params:xml:ns:xmpp-sasl";

// XEP-0124 / XEP-0206
pub const HTTPBIND: &str = "http://jabber.org/protocol/httpbind";
pub const XBOSH: &str = "urn:xmpp:xbosh";
