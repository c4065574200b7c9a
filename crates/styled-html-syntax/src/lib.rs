//! # styled-html-syntax
//!
//! A small, forgiving HTML tokenizer that streams element and text events
//! into a [`Sink`], in the style of a SAX parser.
//!
//! It is not an HTML5 tree builder. It knows just enough about HTML to turn
//! the markup found in help articles, notifications and chat transcripts into
//! a balanced event stream: which elements are void, which starts end an open
//! paragraph or list item, and how far a misplaced end tag may reach.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Driver → Sink calls
//!               (Logos)          (open-element stack)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Splits the input into whole-tag tokens (start tags, end tags, comments,
//! declarations) and character data. Every byte lands in some token.
//!
//! ### 2. Tags ([`tag`] module)
//!
//! Parses names and attributes out of a tag token with a byte [`cursor`].
//!
//! ### 3. Driver ([`driver`] module)
//!
//! Keeps the stack of open elements, applies the recovery rules from
//! [`elements`] and reports to the sink.
//!
//! ### 4. Tree ([`tree`] module)
//!
//! A [`tree::TreeBuilder`] sink for callers that want to inspect the
//! recovered document as read-only nodes instead of streaming it.
//!
//! ## Quick Start
//!
//! ```
//! use styled_html_syntax::{Event, EventCollector, drive};
//!
//! let mut sink = EventCollector::default();
//! let Ok(()) = drive("Hello <b>world", &mut sink);
//!
//! assert_eq!(sink.events[3], Event::Text("Hello ".to_string()));
//! ```

pub mod cursor;
pub mod driver;
pub mod elements;
pub mod lexer;
pub mod sink;
pub mod tag;
pub mod tree;

pub use driver::drive;
pub use sink::{Event, EventCollector, Sink, format_events};
pub use tag::{Attribute, attribute};
pub use tree::{Node, NodeKind, ParseError};
