use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::intent::{BlockIntent, InlineIntent};
use super::locator::Locator;

/// Keys used by the built-in resolvers for [`Attributes::custom`].
pub mod keys {
    pub const FOREGROUND_COLOR: &str = "foreground-color";
    pub const ATTACHMENT: &str = "attachment";
    pub const ACCESSIBILITY_LABEL: &str = "accessibility-label";
}

/// Underline style set on links. `Some(UnderlineStyle::None)` on a run is an
/// explicit "no underline", distinct from leaving the style unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnderlineStyle {
    None,
}

/// A value contributed by a resolver under an arbitrary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Everything known about how one run of text should be presented.
///
/// `mark` and `image_locator` are working state for the post passes and
/// never survive into a finished build unless the image pass leaves an
/// image unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    #[serde(skip_serializing_if = "InlineIntent::is_empty")]
    pub inline_intent: InlineIntent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_intent: Option<Arc<BlockIntent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Locator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<UnderlineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_locator: Option<Locator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<bool>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, AttributeValue>,
}

impl Attributes {
    /// Unions `intent` into the inline flags.
    pub fn with_inline_intent(mut self, intent: InlineIntent) -> Self {
        self.inline_intent |= intent;
        self
    }

    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    pub fn custom(&self, key: &str) -> Option<&AttributeValue> {
        self.custom.get(key)
    }

    pub fn is_marked(&self) -> bool {
        self.mark == Some(true)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        for (flag, name) in [
            (InlineIntent::STRONGLY_EMPHASIZED, "strong"),
            (InlineIntent::EMPHASIZED, "em"),
            (InlineIntent::LINE_BREAK, "br"),
        ] {
            if self.inline_intent.contains(flag) {
                parts.push(name.to_string());
            }
        }
        if let Some(link) = &self.link {
            parts.push(format!("link={link}"));
        }
        if let Some(underline) = self.underline {
            parts.push(format!("underline={underline:?}"));
        }
        if let Some(mark) = self.mark {
            parts.push(format!("mark={mark}"));
        }
        if let Some(image) = &self.image_locator {
            parts.push(format!("image={image}"));
        }
        if let Some(center) = self.center {
            parts.push(format!("center={center}"));
        }
        for (key, value) in &self.custom {
            parts.push(format!("{key}={value}"));
        }
        if let Some(intent) = &self.block_intent {
            parts.push(format!("[{intent}]"));
        }

        f.write_str(&parts.join(" "))
    }
}
