// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

//! Tuenti chat login over BOSH.
//!
//! Tuenti users never see an XMPP password. The web session supplies a
//! numeric user id and a session id instead, which are sent as SASL PLAIN
//! credentials: the JID as authorization identity, the user id as
//! authentication identity and the session id in place of the password.

use tracing::{debug, error, info, warn};

use crate::auth::{Authenticator, PlainAuth};
use crate::connection::{Connection, ConnectionAdapter, SysAction, SysHandler};
use crate::error::Result;
use crate::jid;
use crate::non_stanzas::AuthStart;
use crate::ns;
use crate::response::{self, descendants};
use crate::status::{Status, COND_CONFLICT, COND_REMOTE_STREAM_ERROR, COND_UNKNOWN};
use crate::transport::{Continuation, Transport};

#[derive(Copy, Clone, Debug, Default)]
pub struct TuentiAuth;

impl TuentiAuth {
    /// Starts a session with a Tuenti chat server.
    ///
    /// `jid` must look like `tuentid@xmppX.tuenti.com`, where `tuentid` is
    /// the numeric profile id and `xmppX` the chat server of the user.
    /// `callback` is invoked on every status change. `wait` and `hold`
    /// override the configured XEP-0124 values when given.
    ///
    /// The only error is a JID without a domain, in which case the
    /// connection is left untouched.
    pub fn connect<T, F>(conn: &mut Connection<T>, jid: &str, user_id: &str, session_id: &str,
                         callback: F, wait: Option<u32>, hold: Option<u32>) -> Result<()>
    where
        T: Transport,
        F: FnMut(Status, Option<&str>) + 'static,
    {
        let domain = jid::domain(jid)?.to_string();

        conn.jid = jid.to_string();
        conn.user_id = user_id.to_string();
        conn.session_id = session_id.to_string();
        conn.connect_callback = Some(Box::new(callback));
        conn.disconnecting = false;
        conn.connected = false;
        conn.authenticated = false;
        conn.errors = 0;

        if let Some(wait) = wait.filter(|&w| w != 0) {
            conn.wait = wait;
        }
        if let Some(hold) = hold.filter(|&h| h != 0) {
            conn.hold = hold;
        }

        conn.domain = domain;
        conn.reset_session();

        let body = conn.build_body();
        let config = conn.config();
        let body = body
            .attr("to", &conn.domain)
            .attr("xml:lang", &config.lang)
            .attr("wait", conn.wait)
            .attr("hold", conn.hold)
            .attr("content", &config.content)
            .attr("ver", &config.version)
            .attr("xmpp:version", &config.xmpp_version)
            .attr("xmlns:xmpp", ns::XBOSH);

        info!(jid, domain = %conn.domain, "starting Tuenti session");
        conn.change_connect_status(Status::Connecting, None);
        conn.push_request(body, Continuation::InitialResponse);
        Ok(())
    }

    fn terminated<T: Transport>(conn: &mut Connection<T>, body: &xml::Element) {
        let mut cond = body.get_attribute("condition", None).unwrap_or(COND_UNKNOWN);
        if cond == COND_REMOTE_STREAM_ERROR && !descendants(body, "conflict").is_empty() {
            cond = COND_CONFLICT;
        }
        warn!(condition = cond, "connection manager terminated the session");
        conn.change_connect_status(Status::ConnFail, Some(cond));
    }

    fn authenticate<T: Transport>(conn: &mut Connection<T>) {
        let mut auth = PlainAuth::new(conn.user_id.clone(), conn.session_id.clone(),
                                      Some(conn.jid.clone()));
        let data = match auth.initial() {
            Ok(data) => base64::encode(data),
            Err(e) => {
                error!("{}", e);
                return;
            }
        };

        conn.change_connect_status(Status::Authenticating, None);
        let success = conn.add_sys_handler(
            SysHandler::new(SysAction::SaslSuccess, None, Some("success"), None, None));
        conn.sasl_success_handler = Some(success);
        let failure = conn.add_sys_handler(
            SysHandler::new(SysAction::SaslFailure, None, Some("failure"), None, None));
        conn.sasl_failure_handler = Some(failure);

        conn.send(AuthStart { mech: auth.mechanism(), data: &data }.to_string());
    }
}

/// Reads a numeric tuning attribute. Missing or empty attributes leave the
/// current value alone.
fn tuning(body: &xml::Element, name: &str) -> Option<u32> {
    let value = body.get_attribute(name, None).filter(|v| !v.is_empty())?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(attribute = name, value, "ignoring non-numeric tuning value");
            None
        }
    }
}

impl ConnectionAdapter for TuentiAuth {
    fn on_response<T: Transport>(&self, conn: &mut Connection<T>, response: Option<&str>) {
        debug!("Tuenti connect handler called");
        conn.connected = true;

        let raw = match response {
            Some(raw) => raw,
            None => return,
        };
        let body = match response::parse(raw) {
            Ok(body) => body,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };
        conn.xml_input(&body);
        conn.raw_input(raw);

        if body.get_attribute("type", None) == Some("terminate") {
            return TuentiAuth::terminated(conn, &body);
        }

        // This handler runs again for every poll while stream features are
        // missing, so only the first sid and authid count.
        if let Some(sid) = body.get_attribute("sid", None).filter(|v| !v.is_empty()) {
            conn.sid.set(sid.to_string());
        }
        if let Some(authid) = body.get_attribute("authid", None).filter(|v| !v.is_empty()) {
            conn.stream_id.set(authid.to_string());
        }
        if let Some(window) = tuning(&body, "requests") {
            conn.window = window;
        }
        if let Some(hold) = tuning(&body, "hold") {
            conn.hold = hold;
        }
        if let Some(wait) = tuning(&body, "wait") {
            conn.wait = wait;
        }

        let mechanisms = descendants(&body, "mechanism");
        if mechanisms.is_empty() {
            debug!("no stream features yet, polling");
            let poll = conn.build_body();
            conn.push_request(poll, Continuation::InitialResponse);
            return;
        }

        if !mechanisms.iter().any(|m| m.content_str() == PlainAuth::MECHANISM) {
            debug!("server does not offer PLAIN, not authenticating");
            return;
        }

        TuentiAuth::authenticate(conn);
    }
}
