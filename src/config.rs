// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use serde::Deserialize;

/// Session-request tuning for XEP-0124.
///
/// `wait` and `hold` may be overridden per connect call and are replaced by
/// whatever the server echoes back in its first response, as is `window`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoshConfig {
    /// Seconds the connection manager may hold a request open.
    pub wait: u32,
    /// Number of requests the connection manager may keep waiting.
    pub hold: u32,
    /// Number of simultaneous requests the client may make.
    pub window: u32,
    pub lang: String,
    pub content: String,
    pub version: String,
    pub xmpp_version: String,
}

impl Default for BoshConfig {
    fn default() -> BoshConfig {
        BoshConfig {
            wait: 60,
            hold: 1,
            window: 5,
            lang: "en".to_string(),
            content: "text/xml; charset=utf-8".to_string(),
            version: "1.6".to_string(),
            xmpp_version: "1.0".to_string(),
        }
    }
}
