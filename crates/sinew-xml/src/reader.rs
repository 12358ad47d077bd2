//! quick-xml event loop that builds an [`XmlNode`] tree.

use crate::{Result, XmlError, XmlNode};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parse `xml` into its root element.
pub fn parse_str(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                stack.push(start_node(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let node = start_node(&e)?;
                attach(node, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| XmlError::InvalidDocument("unbalanced end tag".to_string()))?;
                attach(node, &mut stack, &mut root)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| XmlError::InvalidDocument(e.to_string()))?;
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XmlError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::InvalidDocument(format!(
            "element `{}` is never closed",
            open.name
        )));
    }
    root.ok_or_else(|| XmlError::InvalidDocument("no root element".to_string()))
}

fn start_node(e: &BytesStart) -> Result<XmlNode> {
    let mut node = XmlNode::new(&String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr.map_err(|e| XmlError::InvalidDocument(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::InvalidDocument(e.to_string()))?;
        node.attributes.push((key, value.to_string()));
    }
    Ok(node)
}

fn attach(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(XmlError::InvalidDocument(format!(
                "second root element `{}`",
                node.name
            )));
        }
    }
    Ok(())
}
