// rust-xmpp
// Copyright (c) 2014-2015 Florian Zeitz
//
// This project is MIT licensed.
// Please see the COPYING file for more information.


use crate::error::{Error, Result};

/// Parses one delivered `<body/>` into an element tree.
pub fn parse(raw: &str) -> Result<xml::Element> {
    let mut parser = xml::Parser::new();
    let mut builder = xml::ElementBuilder::new();
    parser.feed_str(raw);
    for event in &mut parser {
        match builder.handle_event(event) {
            Some(Ok(e)) => return Ok(e),
            Some(Err(e)) => return Err(Error::Xml(e.to_string())),
            None => (),
        }
    }
    Err(Error::Xml("document ended before the root element".to_string()))
}

/// All elements below `root` with the given local name, in document order,
/// whatever their namespace.
pub fn descendants<'a>(root: &'a xml::Element, name: &str) -> Vec<&'a xml::Element> {
    fn walk<'a>(elem: &'a xml::Element, name: &str, found: &mut Vec<&'a xml::Element>) {
        for child in &elem.children {
            if let xml::Xml::ElementNode(ref e) = *child {
                if e.name == name {
                    found.push(e);
                }
                walk(e, name, found);
            }
        }
    }

    let mut found = Vec::new();
    walk(root, name, &mut found);
    found
}
