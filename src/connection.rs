// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.

use tracing::{debug, info, trace};

use crate::config::BoshConfig;
use crate::non_stanzas::Body;
use crate::status::{Status, StatusCallback};
use crate::transport::{Continuation, Request, Transport};

/// Something that drives a [`Connection`] through session setup.
///
/// The transport passes the adapter back in with every completed request,
/// see [`Connection::deliver`].
pub trait ConnectionAdapter {
    /// Handles the reply to a request the adapter queued. `response` is
    /// `None` if the transport got nothing usable back.
    fn on_response<T: Transport>(&self, conn: &mut Connection<T>, response: Option<&str>);
}

/// A value that can be set once per session and then stays put.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetOnce<T>(Option<T>);

impl<T> SetOnce<T> {
    pub fn new() -> SetOnce<T> {
        SetOnce(None)
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Stores `value` unless a value is already present. Returns whether
    /// the value was stored.
    pub fn set(&mut self, value: T) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(value);
        true
    }

    fn clear(&mut self) {
        self.0 = None;
    }
}

impl<T> Default for SetOnce<T> {
    fn default() -> SetOnce<T> {
        SetOnce::new()
    }
}

/// What a system handler does once its stanza arrives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SysAction {
    SaslSuccess,
    SaslFailure,
}

/// A one-shot handler for stream-level stanzas. `None` fields match
/// anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SysHandler {
    pub ns: Option<String>,
    pub name: Option<String>,
    pub ty: Option<String>,
    pub id: Option<String>,
    pub action: SysAction,
}

impl SysHandler {
    pub fn new(action: SysAction, ns: Option<&str>, name: Option<&str>,
               ty: Option<&str>, id: Option<&str>) -> SysHandler {
        SysHandler {
            ns: ns.map(|x| x.to_string()),
            name: name.map(|x| x.to_string()),
            ty: ty.map(|x| x.to_string()),
            id: id.map(|x| x.to_string()),
            action,
        }
    }

    fn matches(&self, elem: &xml::Element) -> bool {
        if let Some(ref ns) = self.ns {
            let child_ns = elem.children.iter().any(|child| match *child {
                xml::Xml::ElementNode(ref e) => e.ns.as_deref() == Some(&ns[..]),
                _ => false,
            });
            if elem.ns.as_deref() != Some(&ns[..]) && !child_ns {
                return false;
            }
        }
        if let Some(ref name) = self.name {
            if elem.name != *name {
                return false;
            }
        }
        if let Some(ref ty) = self.ty {
            if elem.get_attribute("type", None) != Some(&ty[..]) {
                return false;
            }
        }
        if let Some(ref id) = self.id {
            if elem.get_attribute("id", None) != Some(&id[..]) {
                return false;
            }
        }
        true
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerRef(u64);

/// State of one BOSH connection, driven by a [`ConnectionAdapter`] and
/// fed responses by its [`Transport`].
pub struct Connection<T: Transport> {
    transport: T,
    config: BoshConfig,

    pub(crate) jid: String,
    pub(crate) user_id: String,
    pub(crate) session_id: String,
    pub(crate) domain: String,

    pub(crate) wait: u32,
    pub(crate) hold: u32,
    pub(crate) window: u32,

    pub(crate) sid: SetOnce<String>,
    pub(crate) stream_id: SetOnce<String>,

    pub(crate) connected: bool,
    pub(crate) authenticated: bool,
    pub(crate) disconnecting: bool,
    pub(crate) errors: u32,

    rid: u64,
    pub(crate) connect_callback: Option<StatusCallback>,

    handlers: Vec<(HandlerRef, SysHandler)>,
    next_handler: u64,
    pub(crate) sasl_success_handler: Option<HandlerRef>,
    pub(crate) sasl_failure_handler: Option<HandlerRef>,
}

impl<T: Transport> Connection<T> {
    pub fn new(transport: T, config: BoshConfig) -> Connection<T> {
        Connection {
            transport,
            wait: config.wait,
            hold: config.hold,
            window: config.window,
            config,
            jid: String::new(),
            user_id: String::new(),
            session_id: String::new(),
            domain: String::new(),
            sid: SetOnce::new(),
            stream_id: SetOnce::new(),
            connected: false,
            authenticated: false,
            disconnecting: false,
            errors: 0,
            rid: u64::from(rand::random::<u32>()),
            connect_callback: None,
            handlers: Vec::new(),
            next_handler: 0,
            sasl_success_handler: None,
            sasl_failure_handler: None,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn config(&self) -> &BoshConfig {
        &self.config
    }

    pub fn jid(&self) -> &str {
        &self.jid
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn sid(&self) -> Option<&str> {
        self.sid.get().map(|x| &x[..])
    }

    pub fn stream_id(&self) -> Option<&str> {
        self.stream_id.get().map(|x| &x[..])
    }

    pub fn wait(&self) -> u32 {
        self.wait
    }

    pub fn hold(&self) -> u32 {
        self.hold
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_disconnecting(&self) -> bool {
        self.disconnecting
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// The rid the next body will carry.
    pub fn next_rid(&self) -> u64 {
        self.rid
    }

    /// Builds an empty `<body/>` with the next rid and the session id, if
    /// one has been assigned.
    pub fn build_body(&mut self) -> Body {
        let body = Body::new(self.rid, self.sid.get().cloned());
        self.rid += 1;
        body
    }

    pub fn change_connect_status(&mut self, status: Status, condition: Option<&str>) {
        match condition {
            Some(cond) => info!(%status, condition = cond, "connection status changed"),
            None => info!(%status, "connection status changed"),
        }
        if let Some(ref mut callback) = self.connect_callback {
            callback(status, condition);
        }
    }

    /// Queues `body` and kicks the transport.
    pub fn push_request(&mut self, body: Body, continuation: Continuation) {
        trace!("Out: {}", body);
        self.transport.push_request(Request::new(body, continuation));
        self.transport.throttled_request_handler();
    }

    pub fn send(&mut self, data: String) {
        debug!("Out: {}", data);
        self.transport.send(data);
    }

    /// Entry point for the transport once a request has completed.
    /// `response` is `None` if no parseable reply was received.
    pub fn deliver<A: ConnectionAdapter>(&mut self, adapter: &A, continuation: Continuation,
                                         response: Option<&str>) {
        match continuation {
            Continuation::InitialResponse => adapter.on_response(self, response),
        }
    }

    pub fn add_sys_handler(&mut self, handler: SysHandler) -> HandlerRef {
        let handle = HandlerRef(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((handle, handler));
        handle
    }

    pub fn delete_sys_handler(&mut self, handle: HandlerRef) {
        self.handlers.retain(|&(h, _)| h != handle);
    }

    pub fn has_sys_handler(&self, handle: HandlerRef) -> bool {
        self.handlers.iter().any(|&(h, _)| h == handle)
    }

    /// Runs the first system handler matching `stanza` and removes it.
    /// Returns whether any handler matched.
    pub fn dispatch_stanza(&mut self, stanza: &xml::Element) -> bool {
        self.xml_input(stanza);
        let pos = match self.handlers.iter().position(|(_, h)| h.matches(stanza)) {
            Some(pos) => pos,
            None => return false,
        };
        let (_, handler) = self.handlers.remove(pos);
        match handler.action {
            SysAction::SaslSuccess => self.sasl_success(),
            SysAction::SaslFailure => self.sasl_failure(stanza),
        }
        true
    }

    fn sasl_success(&mut self) {
        info!("SASL authentication succeeded");
        self.sasl_success_handler = None;
        if let Some(handle) = self.sasl_failure_handler.take() {
            self.delete_sys_handler(handle);
        }
        self.authenticated = true;
    }

    fn sasl_failure(&mut self, failure: &xml::Element) {
        self.sasl_failure_handler = None;
        if let Some(handle) = self.sasl_success_handler.take() {
            self.delete_sys_handler(handle);
        }
        let condition = failure.children.iter().find_map(|child| match *child {
            xml::Xml::ElementNode(ref e) if e.name != "text" => Some(e.name.clone()),
            _ => None,
        });
        self.change_connect_status(Status::AuthFail, condition.as_deref());
    }

    /// Forgets everything tied to the previous physical session.
    pub(crate) fn reset_session(&mut self) {
        self.sid.clear();
        self.stream_id.clear();
        self.handlers.clear();
        self.sasl_success_handler = None;
        self.sasl_failure_handler = None;
    }

    pub(crate) fn xml_input(&self, elem: &xml::Element) {
        debug!("In: {}", elem);
    }

    pub(crate) fn raw_input(&self, data: &str) {
        trace!(target: "xmpp_tuenti::raw", "RECV: {}", data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct NullTransport;

    impl Transport for NullTransport {
        fn push_request(&mut self, _request: Request) {}
        fn throttled_request_handler(&mut self) {}
        fn send(&mut self, _data: String) {}
    }

    fn connection() -> Connection<NullTransport> {
        Connection::new(NullTransport, BoshConfig::default())
    }

    #[derive(Default)]
    struct CountingAdapter {
        seen: RefCell<Vec<Option<String>>>,
    }

    impl ConnectionAdapter for CountingAdapter {
        fn on_response<T: Transport>(&self, conn: &mut Connection<T>, response: Option<&str>) {
            self.seen.borrow_mut().push(response.map(|r| r.to_string()));
            conn.errors += 1;
        }
    }

    #[test]
    fn deliver_uses_given_adapter() {
        let mut conn = connection();
        let adapter = CountingAdapter::default();
        conn.deliver(&adapter, Continuation::InitialResponse, Some("<body/>"));
        conn.deliver(&adapter, Continuation::InitialResponse, None);

        assert_eq!(*adapter.seen.borrow(), vec![Some("<body/>".to_string()), None]);
        assert_eq!(conn.errors(), 2);
        assert!(!conn.is_connected());
        assert_eq!(conn.sid(), None);
    }

    #[test]
    fn set_once() {
        let mut v: SetOnce<&str> = SetOnce::new();
        assert_eq!(v.get(), None);
        assert!(v.set("first"));
        assert!(!v.set("second"));
        assert_eq!(v.get(), Some(&"first"));
        v.clear();
        assert!(v.set("third"));
    }

    #[test]
    fn rid_increments_per_body() {
        let mut conn = connection();
        let start = conn.next_rid();
        let a = conn.build_body();
        let b = conn.build_body();
        assert_eq!(a.rid(), start);
        assert_eq!(b.rid(), start + 1);
        assert_eq!(a.sid(), None);

        conn.sid.set("s1".into());
        assert_eq!(conn.build_body().sid(), Some("s1"));
    }

    #[test]
    fn handler_matching() {
        let success = response::parse("<success xmlns='urn:ietf:params:xml:ns:xmpp-sasl'/>").unwrap();
        let iq = response::parse("<iq xmlns='jabber:client' type='result' id='b1'/>").unwrap();

        let by_name = SysHandler::new(SysAction::SaslSuccess, None, Some("success"), None, None);
        assert!(by_name.matches(&success));
        assert!(!by_name.matches(&iq));

        let by_ns = SysHandler::new(SysAction::SaslSuccess,
                                    Some("urn:ietf:params:xml:ns:xmpp-sasl"), None, None, None);
        assert!(by_ns.matches(&success));

        let by_id = SysHandler::new(SysAction::SaslSuccess, None, Some("iq"),
                                    Some("result"), Some("b1"));
        assert!(by_id.matches(&iq));
        let other_id = SysHandler::new(SysAction::SaslSuccess, None, None, None, Some("b2"));
        assert!(!other_id.matches(&iq));
    }

    #[test]
    fn handlers_are_one_shot() {
        let mut conn = connection();
        let handle = conn.add_sys_handler(
            SysHandler::new(SysAction::SaslSuccess, None, Some("success"), None, None));
        let success = response::parse("<success xmlns='urn:ietf:params:xml:ns:xmpp-sasl'/>").unwrap();

        assert!(conn.dispatch_stanza(&success));
        assert!(!conn.has_sys_handler(handle));
        assert!(!conn.dispatch_stanza(&success));
    }

    #[test]
    fn sasl_failure_reports_condition() {
        let statuses = Rc::new(RefCell::new(Vec::new()));
        let mut conn = connection();
        let seen = statuses.clone();
        conn.connect_callback = Some(Box::new(move |status: Status, cond: Option<&str>| {
            seen.borrow_mut().push((status, cond.map(|c| c.to_string())));
        }));

        let success = conn.add_sys_handler(
            SysHandler::new(SysAction::SaslSuccess, None, Some("success"), None, None));
        let failure = conn.add_sys_handler(
            SysHandler::new(SysAction::SaslFailure, None, Some("failure"), None, None));
        conn.sasl_success_handler = Some(success);
        conn.sasl_failure_handler = Some(failure);

        let stanza = response::parse("<failure xmlns='urn:ietf:params:xml:ns:xmpp-sasl'>\
                                      <not-authorized/></failure>").unwrap();
        assert!(conn.dispatch_stanza(&stanza));
        assert!(!conn.has_sys_handler(success));
        assert!(!conn.is_authenticated());
        assert_eq!(*statuses.borrow(),
                   vec![(Status::AuthFail, Some("not-authorized".to_string()))]);
    }

    #[test]
    fn sasl_success_drops_failure_handler() {
        let mut conn = connection();
        let success = conn.add_sys_handler(
            SysHandler::new(SysAction::SaslSuccess, None, Some("success"), None, None));
        let failure = conn.add_sys_handler(
            SysHandler::new(SysAction::SaslFailure, None, Some("failure"), None, None));
        conn.sasl_success_handler = Some(success);
        conn.sasl_failure_handler = Some(failure);

        let stanza = response::parse("<success xmlns='urn:ietf:params:xml:ns:xmpp-sasl'/>").unwrap();
        assert!(conn.dispatch_stanza(&stanza));
        assert!(conn.is_authenticated());
        assert!(!conn.has_sys_handler(failure));
        assert_eq!(conn.sasl_failure_handler, None);
    }
}
