//! # styled-html-engine
//!
//! Turns a fragment of HTML into [`StyledText`]: runs of text, each with one
//! attribute set describing emphasis, links, highlighting, images and the
//! block structure (headings, paragraphs, nested lists) it belongs to.
//!
//! ## Architecture Overview
//!
//! ```text
//! HTML → styled-html-syntax → Builder → runs → resolve passes → StyledText
//!        (events)             (contexts,        (marks, images,
//!                              whitespace)       blocks)
//! ```
//!
//! - [`model`]: runs, attributes, block and inline intents, locators
//! - [`builder`]: the event consumer and its context stack
//! - [`whitespace`]: collapsing and right-trimming the way browsers do
//! - [`resolve`]: post passes, including flattening blocks into lines
//! - [`options`]: syntax selection, resolvers and presets
//!
//! ## Quick Start
//!
//! ```
//! use styled_html_engine::{InlineIntent, Options, parse};
//!
//! let text = parse("<p>Hello, <b>world</b>!</p>", &Options::default()).unwrap();
//! assert_eq!(text.to_string(), "Hello, world!");
//! assert_eq!(text.runs()[1].attributes.inline_intent, InlineIntent::STRONGLY_EMPHASIZED);
//! ```

pub mod builder;
pub mod error;
pub mod invariants;
pub mod model;
pub mod options;
pub mod resolve;
pub mod whitespace;

pub use builder::Builder;
pub use error::{BuildError, ResolverError};
pub use model::*;
pub use options::{
    BlockResolver, ImageResolver, InterpretedSyntax, MarkResolver, OBJECT_REPLACEMENT, Options,
    StyleResolver,
};
pub use resolve::linear::{EveryLevelListMarkers, ListMarkers, NestedListMarkers};

/// Builds styled text from `html`.
///
/// Malformed markup never fails; only a resolver in `options` can.
pub fn parse(html: &str, options: &Options) -> Result<StyledText, BuildError> {
    Builder::new(options).parse(html)
}

/// The characters of `html` without any markup.
pub fn plain_text(html: &str, preserving_whitespace: bool) -> String {
    let syntax = if preserving_whitespace {
        InterpretedSyntax::InlineOnlyPreservingWhitespace
    } else {
        InterpretedSyntax::InlineOnly
    };
    match parse(html, &Options::new(syntax)) {
        Ok(text) => text.to_string(),
        Err(e) => {
            log::warn!("Failed to build plain text: {e}");
            String::new()
        }
    }
}
