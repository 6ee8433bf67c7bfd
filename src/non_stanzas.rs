// rust-xmpp
// Copyright (c) 2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use std::fmt;
use crate::ns;

/// A XEP-0124 `<body/>` wrapper.
///
/// Every body carries its request id and, once the connection manager has
/// assigned one, the session id. Further attributes keep insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    rid: u64,
    sid: Option<String>,
    attrs: Vec<(String, String)>,
}

impl Body {
    pub fn new(rid: u64, sid: Option<String>) -> Body {
        Body { rid, sid, attrs: Vec::new() }
    }

    pub fn rid(&self) -> u64 {
        self.rid
    }

    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Sets an attribute, replacing an earlier value of the same name.
    pub fn attr<V: ToString>(mut self, name: &str, value: V) -> Body {
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        match name {
            "sid" => self.sid(),
            _ => self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| &v[..]),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<body rid='{}' xmlns='{}'", self.rid, ns::HTTPBIND)?;
        if let Some(ref sid) = self.sid {
            write!(f, " sid='{}'", xml::escape(sid))?;
        }
        for (name, value) in &self.attrs {
            write!(f, " {}='{}'", name, xml::escape(value))?;
        }
        write!(f, "/>")
    }
}

#[derive(Debug)]
pub struct AuthStart<'a> {
    pub mech: &'a str,
    pub data: &'a str
}

impl<'a> fmt::Display for AuthStart<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<auth xmlns='{}' mechanism='{}'>{}</auth>",
               ns::FEATURE_SASL, xml::escape(self.mech), self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_body() {
        let body = Body::new(1000, Some("abc".into()));
        assert_eq!(body.to_string(),
                   "<body rid='1000' xmlns='http://jabber.org/protocol/httpbind' sid='abc'/>");
    }

    #[test]
    fn attributes_keep_order_and_replace() {
        let body = Body::new(7, None)
            .attr("to", "example.com")
            .attr("wait", 60)
            .attr("to", "other.example.com")
            .attr("content", "text/xml; charset=utf-8");
        assert_eq!(body.get_attribute("to"), Some("other.example.com"));
        assert_eq!(body.get_attribute("wait"), Some("60"));
        assert_eq!(body.get_attribute("sid"), None);
        assert_eq!(body.to_string(),
                   "<body rid='7' xmlns='http://jabber.org/protocol/httpbind' \
                    to='other.example.com' wait='60' content='text/xml; charset=utf-8'/>");
    }

    #[test]
    fn escapes_values() {
        let body = Body::new(1, None).attr("to", "a'b&c");
        assert!(body.to_string().contains("to='a&apos;b&amp;c'"));
    }

    #[test]
    fn auth_start() {
        let auth = AuthStart { mech: "PLAIN", data: "AGFsaWNlAHNlY3JldA==" };
        assert_eq!(auth.to_string(),
                   "<auth xmlns='urn:ietf:params:xml:ns:xmpp-sasl' mechanism='PLAIN'>\
                    AGFsaWNlAHNlY3JldA==</auth>");
    }
}
