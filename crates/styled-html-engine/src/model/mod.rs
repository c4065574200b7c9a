//! The styled text data model: runs, attribute sets, intents and locators.

pub mod attributes;
pub mod intent;
pub mod locator;
pub mod styled_text;

pub use attributes::{AttributeValue, Attributes, UnderlineStyle, keys};
pub use intent::{BlockIntent, BlockKind, Components, InlineIntent};
pub use locator::Locator;
pub use styled_text::{Run, StyledSlice, StyledText, format_runs};
