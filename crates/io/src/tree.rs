//! In-memory XML tree for XML Spreadsheet payloads.
//!
//! Built from quick-xml events. Text is kept exactly as written (no
//! trimming); entity and character references are resolved, so `&#10;`
//! inside a cell becomes a newline. Names are stored qualified
//! (`ss:Index`), which is how the engine looks them up.

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use pastegrid_engine::document::{SpreadsheetDocument, SpreadsheetElement};

use crate::error::IoError;

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    fn from_start(e: &BytesStart<'_>) -> Result<Self, IoError> {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| IoError::Malformed(format!("<{name}>: {err}")))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = match attr.unescape_value() {
                Ok(v) => v.to_string(),
                Err(_) => String::from_utf8_lossy(&attr.value).to_string(),
            };
            attributes.push((key, value));
        }
        Ok(Self { name, attributes, children: Vec::new() })
    }

    /// Direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|n| match n {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(XmlNode::Text(existing)) => existing.push_str(text),
            _ => self.children.push(XmlNode::Text(text.to_string())),
        }
    }

    fn collect<'a>(&'a self, tag: &str, out: &mut Vec<&'a XmlElement>) {
        for child in self.child_elements() {
            if child.name == tag {
                out.push(child);
            }
            child.collect(tag, out);
        }
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }
}

impl SpreadsheetElement for XmlElement {
    fn tag(&self) -> &str {
        &self.name
    }

    fn elements_by_tag(&self, tag: &str) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect(tag, &mut out);
        out
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }
}

/// A parsed document; owns its root element.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn parse(xml: &str) -> Result<Self, IoError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| IoError::Xml {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;

            match event {
                Event::Start(ref e) => {
                    stack.push(XmlElement::from_start(e)?);
                }
                Event::Empty(ref e) => {
                    let element = XmlElement::from_start(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(ref e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let element = stack
                        .pop()
                        .ok_or_else(|| IoError::Malformed(format!("unexpected </{name}>")))?;
                    if element.name != name {
                        return Err(IoError::Malformed(format!(
                            "</{name}> closes <{}>",
                            element.name
                        )));
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(ref e) => {
                    if let Some(open) = stack.last_mut() {
                        match e.decode() {
                            Ok(text) => open.push_text(&text),
                            Err(_) => open.push_text(&String::from_utf8_lossy(&**e)),
                        }
                    }
                }
                Event::CData(e) => {
                    if let Some(open) = stack.last_mut() {
                        open.push_text(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::GeneralRef(ref e) => {
                    if let Some(open) = stack.last_mut() {
                        let raw = String::from_utf8_lossy(e).to_string();
                        let resolved = match e.resolve_char_ref() {
                            Ok(Some(ch)) => ch.to_string(),
                            _ => match quick_xml::escape::resolve_predefined_entity(&raw) {
                                Some(s) => s.to_string(),
                                None => {
                                    debug!("unknown entity &{raw}; kept verbatim");
                                    format!("&{raw};")
                                }
                            },
                        };
                        open.push_text(&resolved);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(IoError::Malformed(format!("<{}> is never closed", open.name)));
        }
        root.map(|root| Self { root }).ok_or(IoError::Empty)
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

/// Hand a finished element to its parent, or make it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), IoError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(IoError::Malformed(format!(
            "second root element <{}>",
            element.name
        ))),
    }
}

impl SpreadsheetDocument for XmlDocument {
    type Element = XmlElement;

    fn elements_by_tag(&self, tag: &str) -> Vec<&XmlElement> {
        let mut out = Vec::new();
        if self.root.name == tag {
            out.push(&self.root);
        }
        self.root.collect(tag, &mut out);
        out
    }
}
