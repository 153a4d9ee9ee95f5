//! XML reading for query protocol responses
//!
//! Responses are small, so they are read into a tree of [`XmlNode`]s and
//! picked apart by name, the same way the service documentation describes
//! them.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::Error;

/// One element of a parsed XML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Local name, without any namespace prefix
    pub name: String,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First child element named `name`
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements named `name`
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Items of a `<member>` wrapped list
    pub fn members(&self) -> impl Iterator<Item = &XmlNode> {
        self.children("member")
    }

    /// Child element, failing if it is absent
    pub fn required_child(&self, name: &str) -> Result<&XmlNode, Error> {
        self.child(name)
            .ok_or_else(|| Error::parse(format!("missing <{}> in <{}>", name, self.name)))
    }

    /// Text of a child element; absent and empty both read as `None`
    pub fn opt_string(&self, name: &str) -> Option<String> {
        self.child(name)
            .filter(|c| !c.text.is_empty())
            .map(|c| c.text.clone())
    }

    pub fn required_string(&self, name: &str) -> Result<String, Error> {
        Ok(self.required_child(name)?.text.clone())
    }

    pub fn opt_bool(&self, name: &str) -> Result<Option<bool>, Error> {
        self.opt_string(name).map(|v| parse_bool(&v)).transpose()
    }

    pub fn opt_i64(&self, name: &str) -> Result<Option<i64>, Error> {
        self.opt_string(name).map(|v| parse_i64(&v)).transpose()
    }

    pub fn opt_timestamp(&self, name: &str) -> Result<Option<DateTime<Utc>>, Error> {
        self.opt_string(name).map(|v| parse_timestamp(&v)).transpose()
    }

    pub fn required_timestamp(&self, name: &str) -> Result<DateTime<Utc>, Error> {
        parse_timestamp(&self.required_string(name)?)
    }

    /// A `<member>` list of strings under `name`, or `None` when absent
    pub fn opt_string_list(&self, name: &str) -> Option<Vec<String>> {
        self.child(name).map(|list| {
            list.members()
                .filter(|m| !m.text.is_empty())
                .map(|m| m.text.clone())
                .collect()
        })
    }

    /// A `<member>` list of structures under `name`, or `None` when absent
    pub fn opt_list<T>(
        &self,
        name: &str,
        parse: impl Fn(&XmlNode) -> Result<T, Error>,
    ) -> Result<Option<Vec<T>>, Error> {
        self.child(name)
            .map(|list| list.members().map(&parse).collect())
            .transpose()
    }

    /// Like [`XmlNode::opt_list`] but an absent list reads as empty
    pub fn list<T>(
        &self,
        name: &str,
        parse: impl Fn(&XmlNode) -> Result<T, Error>,
    ) -> Result<Vec<T>, Error> {
        Ok(self.opt_list(name, parse)?.unwrap_or_default())
    }
}

/// Parse a complete document and return its root element
pub fn parse(input: &str) -> Result<XmlNode, Error> {
    let mut reader = Reader::from_str(input);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event().map_err(|e| Error::parse(e.to_string()))? {
            Event::Start(e) => stack.push(XmlNode::new(local_name(&e))),
            Event::Empty(e) => attach(&mut stack, &mut root, XmlNode::new(local_name(&e))),
            Event::End(_) => {
                let mut node = stack
                    .pop()
                    .ok_or_else(|| Error::parse("unbalanced closing tag"))?;
                // Indentation between child elements
                if !node.children.is_empty() && node.text.trim().is_empty() {
                    node.text.clear();
                }
                attach(&mut stack, &mut root, node);
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape().map_err(|e| Error::parse(e.to_string()))?;
                    current.text.push_str(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::parse("unexpected end of XML document"));
    }

    root.ok_or_else(|| Error::parse("empty XML document"))
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

pub fn parse_bool(value: &str) -> Result<bool, Error> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::parse(format!("invalid boolean {other:?}"))),
    }
}

pub fn parse_i64(value: &str) -> Result<i64, Error> {
    value
        .parse()
        .map_err(|_| Error::parse(format!("invalid integer {value:?}")))
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::parse(format!("invalid timestamp {value:?}: {e}")))
}

/// XML escape special characters
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
