//! # Tree - A Read-Only Node View
//!
//! Some callers want to look at markup rather than style it: find the
//! `title`, read an attribute, count the items of a list. [`parse`] runs the
//! same recovering [`drive`] as the styling pipeline and collects the events
//! into an owned [`Node`] tree rooted at the implied `html` element.
//!
//! ```
//! use styled_html_syntax::tree::{self, NodeKind};
//!
//! let html = tree::parse("<p class=\"intro\">Hello <b>there</b>").unwrap();
//! let body = html.children().first().unwrap();
//! let p = body.children().first().unwrap();
//!
//! assert_eq!(p.kind(), NodeKind::Element);
//! assert_eq!(p.attribute("class"), Some("intro"));
//! assert_eq!(p.content(), "Hello there");
//! assert_eq!(html.to_string(), "<html><body><p class=\"intro\">Hello <b>there</b></p></body></html>");
//! ```

use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

use crate::driver::drive;
use crate::elements::{RAW_TEXT, is_void};
use crate::sink::Sink;
use crate::tag::{Attribute, attribute};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Input contains no markup or text")]
    Empty,

    #[error("Tag starting at byte {offset} is cut off by the end of input")]
    UnterminatedTag { offset: usize },

    #[error("Fragment source does not hold escaped markup")]
    NotEscaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// Undecoded `script` or `style` content.
    CharacterData,
    /// Several top-level nodes with no element of their own.
    Fragment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    text: String,
}

impl Node {
    fn element(name: &str, attributes: &[Attribute]) -> Self {
        Self {
            kind: NodeKind::Element,
            name: name.to_string(),
            attributes: attributes.to_vec(),
            children: vec![],
            text: String::new(),
        }
    }

    fn leaf(kind: NodeKind, text: &str) -> Self {
        Self {
            kind,
            name: String::new(),
            attributes: vec![],
            children: vec![],
            text: text.to_string(),
        }
    }

    fn fragment(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Fragment,
            name: String::new(),
            attributes: vec![],
            children,
            text: String::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Lowercased tag name, empty for anything but elements.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Decoded value of the attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        attribute(&self.attributes, name)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The text of a text or character-data node; for anything else, the
    /// text of every descendant in document order.
    pub fn content(&self) -> String {
        let mut content = String::new();
        self.collect_content(&mut content);
        content
    }

    fn collect_content(&self, out: &mut String) {
        match self.kind {
            NodeKind::Text | NodeKind::CharacterData => out.push_str(&self.text),
            NodeKind::Element | NodeKind::Fragment => {
                for child in &self.children {
                    child.collect_content(out);
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// Serializes the node back to markup. Void elements get no end tag and
/// character data is written as is.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeKind::Text => write!(f, "{}", html_escape::encode_text(&self.text)),
            NodeKind::CharacterData => write!(f, "{}", self.text),
            NodeKind::Fragment => self.children.iter().try_for_each(|c| write!(f, "{c}")),
            NodeKind::Element => {
                write!(f, "<{}", self.name)?;
                for a in &self.attributes {
                    write!(
                        f,
                        " {}=\"{}\"",
                        a.name,
                        html_escape::encode_double_quoted_attribute(&a.value)
                    )?;
                }
                write!(f, ">")?;
                if is_void(&self.name) {
                    return Ok(());
                }
                self.children.iter().try_for_each(|c| write!(f, "{c}"))?;
                write!(f, "</{}>", self.name)
            }
        }
    }
}

/// A sink that assembles the event stream into nodes.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    open: Vec<Node>,
    root: Option<Node>,
}

impl TreeBuilder {
    /// The finished root element, once every start has been matched.
    pub fn finish(self) -> Option<Node> {
        self.root
    }

    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => log::debug!("dropping {:?} node outside the root", node.kind),
        }
    }
}

impl Sink for TreeBuilder {
    type Error = Infallible;

    fn start_element(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), Self::Error> {
        self.open.push(Node::element(name, attributes));
        Ok(())
    }

    fn end_element(&mut self, _name: &str) -> Result<(), Self::Error> {
        if let Some(node) = self.open.pop() {
            if self.open.is_empty() {
                self.root = Some(node);
            } else {
                self.append(node);
            }
        }
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), Self::Error> {
        // Text on both sides of a deferred end tag joins up again
        if let Some(last) = self.open.last_mut().and_then(|p| p.children.last_mut())
            && last.kind == NodeKind::Text
        {
            last.text.push_str(text);
            return Ok(());
        }
        self.append(Node::leaf(NodeKind::Text, text));
        Ok(())
    }

    fn raw_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.append(Node::leaf(NodeKind::CharacterData, text));
        Ok(())
    }
}

/// Parses `input` into a tree rooted at its `html` element.
///
/// Malformed markup is repaired the same way it is for styling. Input with
/// nothing but whitespace, or whose last tag is cut off by the end of input,
/// is an error.
pub fn parse(input: &str) -> Result<Node, ParseError> {
    if let Some(offset) = unterminated_tag(input) {
        return Err(ParseError::UnterminatedTag { offset });
    }

    let mut builder = TreeBuilder::default();
    let Ok(()) = drive(input, &mut builder);
    builder.finish().ok_or(ParseError::Empty)
}

/// Parses escaped markup, such as `&lt;p&gt;Hello&lt;/p&gt;`.
///
/// A single top-level node is returned as is; several are gathered under a
/// [`NodeKind::Fragment`].
pub fn parse_fragment(escaped: &str) -> Result<Node, ParseError> {
    let wrapper = parse(&format!("<html><body>{escaped}"))?;
    let source = match body(&wrapper).map(Node::children) {
        Some([only]) if only.kind == NodeKind::Text => only.text.clone(),
        None | Some([]) => return Err(ParseError::Empty),
        Some(_) => return Err(ParseError::NotEscaped),
    };

    let document = parse(&format!("<html><body>{source}"))?;
    let Some(content) = body(&document) else {
        return Err(ParseError::Empty);
    };
    match content.children.as_slice() {
        [] => Err(ParseError::Empty),
        [only] => Ok(only.clone()),
        many => Ok(Node::fragment(many.to_vec())),
    }
}

fn body(html: &Node) -> Option<&Node> {
    html.children.iter().find(|c| c.name == "body")
}

/// Start of a tag opened by the last `<` but never closed, outside raw text.
fn unterminated_tag(input: &str) -> Option<usize> {
    let offset = input.rfind('<')?;
    let rest = &input[offset + 1..];
    if rest.contains('>') {
        return None;
    }
    let starts_markup = rest
        .chars()
        .next()
        .is_none_or(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
    if !starts_markup || inside_raw_text(&input[..offset]) {
        return None;
    }
    Some(offset)
}

fn inside_raw_text(before: &str) -> bool {
    let lower = before.to_ascii_lowercase();
    RAW_TEXT.iter().any(|name| {
        let open = lower.rfind(&format!("<{name}"));
        let close = lower.rfind(&format!("</{name}"));
        match (open, close) {
            (Some(open), Some(close)) => open > close,
            (Some(_), None) => true,
            _ => false,
        }
    })
}
