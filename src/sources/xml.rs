//! Minimal element tree over `quick-xml` events.
//!
//! Fetch responses are read in two passes. [`split_elements`] walks the whole
//! document once, checking that it is well-formed and cutting out the raw text of
//! every element with a given name. Each piece is then turned into an
//! [`XmlElement`] on its own, so text that fails to decode only spoils the article
//! it belongs to.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{RecordError, SourceError};

/// Content of an element, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its children. Attributes are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Parse a single element from its serialized form.
    pub fn parse(xml: &str) -> Result<Self, RecordError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(XmlElement::new(element_name(&e)?)),
                Event::Empty(e) => {
                    let element = XmlElement::new(element_name(&e)?);
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => return Ok(element),
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| RecordError::Xml("unbalanced end tag".to_string()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => return Ok(element),
                    }
                }
                Event::Text(t) => {
                    if let Some(current) = stack.last_mut() {
                        let text = t.unescape()?;
                        current.children.push(XmlNode::Text(text.into_owned()));
                    }
                }
                Event::CData(c) => {
                    if let Some(current) = stack.last_mut() {
                        let text = std::str::from_utf8(&c)
                            .map_err(|e| RecordError::Xml(e.to_string()))?;
                        current.children.push(XmlNode::Text(text.to_string()));
                    }
                }
                Event::Eof => {
                    return Err(RecordError::Xml("unexpected end of input".to_string()))
                }
                _ => {}
            }
        }
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|e| e.name == name)
    }

    /// Follow a `/`-separated path of child names, taking the first match at
    /// each step.
    pub fn find(&self, path: &str) -> Option<&XmlElement> {
        path.split('/')
            .try_fold(self, |element, name| element.child(name))
    }

    /// All descendants named `name`, in document order.
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for element in self.elements() {
            if element.name == name {
                found.push(element);
            }
            element.collect_descendants(name, found);
        }
    }

    /// First descendant named `name`.
    pub fn descendant(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find_map(|element| {
            if element.name == name {
                Some(element)
            } else {
                element.descendant(name)
            }
        })
    }

    /// All text inside this element, inline markup included.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(e) => e.collect_text(out),
            }
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> Result<String, RecordError> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| RecordError::Xml(e.to_string()))
}

/// Cut the raw text of every `name` element out of `xml`, at any depth.
///
/// The document must be well-formed with exactly one root element, closed
/// before the end of input; otherwise the whole response is unusable and no
/// pieces are returned. Text content is not decoded here.
pub fn split_elements<'a>(xml: &'a str, name: &str) -> Result<Vec<&'a str>, SourceError> {
    let mut reader = Reader::from_str(xml);
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) => {
                if depth == 0 {
                    roots += 1;
                    check_single_root(roots)?;
                }
                if e.name().as_ref() == name.as_bytes() {
                    reader.read_to_end(e.name())?;
                    let end = reader.buffer_position() as usize;
                    pieces.push(&xml[start..end]);
                } else {
                    depth += 1;
                }
            }
            Event::Empty(e) => {
                if depth == 0 {
                    roots += 1;
                    check_single_root(roots)?;
                }
                if e.name().as_ref() == name.as_bytes() {
                    let end = reader.buffer_position() as usize;
                    pieces.push(&xml[start..end]);
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => break,
            _ => {}
        }
    }

    if roots == 0 {
        return Err(SourceError::Parse(
            "XML: document has no root element".to_string(),
        ));
    }
    if depth != 0 {
        return Err(SourceError::Parse(format!(
            "XML: document truncated with {} element(s) left open",
            depth
        )));
    }

    Ok(pieces)
}

fn check_single_root(roots: usize) -> Result<(), SourceError> {
    if roots > 1 {
        return Err(SourceError::Parse(
            "XML: more than one root element".to_string(),
        ));
    }
    Ok(())
}
