// rust-xmpp
// Copyright (c) 2014 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use super::Authenticator;

/// RFC 4616 PLAIN: `authzid NUL authcid NUL passwd`.
///
/// Tuenti logins put the JID into the authorization identity, the numeric
/// user id into the authentication identity and the web session id where
/// the password would go.
pub struct PlainAuth {
    authcid: String,
    authzid: Option<String>,
    passwd: String,
}

impl PlainAuth {
    pub const MECHANISM: &'static str = "PLAIN";

    pub fn new(authcid: String, passwd: String, authzid: Option<String>) -> PlainAuth {
        PlainAuth {
            authcid,
            passwd,
            authzid,
        }
    }
}

impl Authenticator for PlainAuth {
    fn mechanism(&self) -> &'static str {
        PlainAuth::MECHANISM
    }

    fn initial(&mut self) -> Result<Vec<u8>, &'static str> {
        let mut data: Vec<u8> = Vec::new();
        if let Some(ref authzid) = self.authzid {
            data.extend(authzid.bytes());
        }
        data.push(0);
        data.extend(self.authcid.bytes());
        data.push(0);
        data.extend(self.passwd.bytes());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuenti_credentials() {
        let mut auth = PlainAuth::new("42".into(), "sess-abc".into(),
                                      Some("42@xmpp1.tuenti.com".into()));
        assert_eq!(auth.mechanism(), "PLAIN");
        assert_eq!(auth.initial().unwrap(), b"42@xmpp1.tuenti.com\x0042\x00sess-abc".to_vec());
    }

    #[test]
    fn without_authzid() {
        let mut auth = PlainAuth::new("alice".into(), "secret".into(), None);
        assert_eq!(auth.initial().unwrap(), b"\x00alice\x00secret".to_vec());
        assert!(auth.continuation(b"").unwrap().is_empty());
    }
}
