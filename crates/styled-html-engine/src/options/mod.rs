//! Per-build configuration.

mod presets;
mod resolvers;

use std::fmt;
use std::sync::Arc;

pub use presets::OBJECT_REPLACEMENT;
pub use resolvers::{BlockResolver, ImageResolver, MarkResolver, StyleResolver};

use crate::resolve::linear::{ListMarkers, NestedListMarkers};

/// How much of the markup's structure ends up in the result.
#[derive(Debug, Clone, Default)]
pub enum InterpretedSyntax {
    /// Keep block intents on the runs. With a resolver, each block stretch
    /// is replaced by what the resolver returns.
    Full(Option<BlockResolver>),
    /// Flatten blocks into plain lines, with list markers and newlines.
    #[default]
    InlineOnly,
    /// As `InlineOnly`, but character data is kept exactly as written.
    InlineOnlyPreservingWhitespace,
}

impl InterpretedSyntax {
    pub fn preserves_whitespace(&self) -> bool {
        matches!(self, InterpretedSyntax::InlineOnlyPreservingWhitespace)
    }
}

#[derive(Clone)]
pub struct Options {
    pub interpreted_syntax: InterpretedSyntax,
    pub style: Option<StyleResolver>,
    pub image: Option<ImageResolver>,
    pub mark: Option<MarkResolver>,
    /// Whether `<a href>` becomes a link.
    pub allows_links: bool,
    /// Markers for list items when blocks are flattened.
    pub list_markers: Arc<dyn ListMarkers>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interpreted_syntax: InterpretedSyntax::default(),
            style: None,
            image: None,
            mark: None,
            allows_links: true,
            list_markers: Arc::new(NestedListMarkers),
        }
    }
}

impl Options {
    pub fn new(interpreted_syntax: InterpretedSyntax) -> Self {
        Self {
            interpreted_syntax,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: StyleResolver) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_image(mut self, image: ImageResolver) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_mark(mut self, mark: MarkResolver) -> Self {
        self.mark = Some(mark);
        self
    }

    pub fn with_links(mut self, allows_links: bool) -> Self {
        self.allows_links = allows_links;
        self
    }

    pub fn with_list_markers(mut self, list_markers: impl ListMarkers + 'static) -> Self {
        self.list_markers = Arc::new(list_markers);
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("interpreted_syntax", &self.interpreted_syntax)
            .field("style", &self.style)
            .field("image", &self.image)
            .field("mark", &self.mark)
            .field("allows_links", &self.allows_links)
            .finish_non_exhaustive()
    }
}
