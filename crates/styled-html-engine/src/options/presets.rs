//! Ready-made resolvers that do not depend on any particular renderer.
//!
//! Colors and attachments are expressed as custom attributes (see
//! [`keys`]) for the renderer to map onto its own palette and image store.

use crate::model::{Attributes, BlockKind, InlineIntent, StyledText, keys};

use super::{ImageResolver, MarkResolver, StyleResolver};

/// Named colors a `color:` declaration may use.
const LABEL_COLORS: [&str; 4] = ["primary", "secondary", "tertiary", "quaternary"];

/// Stands in for an inline image in the text.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

impl MarkResolver {
    /// Marked text becomes strongly emphasized.
    pub fn strongly_emphasized() -> Self {
        Self::new(|attributes, is_marked| {
            Ok(if is_marked {
                attributes
                    .clone()
                    .with_inline_intent(InlineIntent::STRONGLY_EMPHASIZED)
            } else {
                attributes.clone()
            })
        })
    }

    /// Everything except the marked text is dimmed to the secondary color.
    pub fn dim_unmarked() -> Self {
        Self::new(|attributes, is_marked| {
            Ok(if is_marked {
                attributes.clone()
            } else {
                attributes
                    .clone()
                    .with_custom(keys::FOREGROUND_COLOR, "secondary")
            })
        })
    }
}

impl StyleResolver {
    /// `color: primary` through `color: quaternary` set the foreground color.
    /// Other properties and values are ignored.
    pub fn foreground_color() -> Self {
        Self::new(|attributes, property, value| {
            if property == "color" && LABEL_COLORS.contains(&value) {
                Ok(attributes.clone().with_custom(keys::FOREGROUND_COLOR, value))
            } else {
                Ok(attributes.clone())
            }
        })
    }
}

impl ImageResolver {
    /// Replaces images whose source is a bare relative name known to `lookup`
    /// with a symbol attachment.
    ///
    /// The image becomes a single [`OBJECT_REPLACEMENT`] carrying the symbol
    /// name under [`keys::ATTACHMENT`]. Alt text longer than one character is
    /// kept as [`keys::ACCESSIBILITY_LABEL`]. A symbol opening a paragraph is
    /// followed by a tab so that consecutive lines align, and the whitespace
    /// after it in the markup is dropped.
    pub fn symbols(lookup: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::new(move |run, locator| {
            let Some(name) = locator.relative_path() else {
                return Ok(None);
            };
            if !lookup(name) {
                return Ok(None);
            }
            let Some(first) = run.first_attributes() else {
                return Ok(None);
            };

            let mut attributes: Attributes = first.clone().with_custom(keys::ATTACHMENT, name);
            attributes.image_locator = None;
            let label = run.text();
            if label.chars().count() > 1 {
                attributes = attributes.with_custom(keys::ACCESSIBILITY_LABEL, label);
            }

            let mut symbol = String::from(OBJECT_REPLACEMENT);
            if let Some(intent) = &first.block_intent
                && intent.kind == BlockKind::Paragraph
                && run
                    .preceding_attributes()
                    .and_then(|a| a.block_intent.as_ref())
                    != Some(intent)
            {
                symbol.push('\t');
            }

            Ok(Some(StyledText::styled(&symbol, attributes)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeValue, Locator};
    use pretty_assertions::assert_eq;

    #[test]
    fn strongly_emphasized_unions() {
        let resolver = MarkResolver::strongly_emphasized();
        let emphasized = Attributes::default().with_inline_intent(InlineIntent::EMPHASIZED);
        let resolved = resolver.resolve(&emphasized, true).unwrap();
        assert_eq!(
            resolved.inline_intent,
            InlineIntent::EMPHASIZED | InlineIntent::STRONGLY_EMPHASIZED
        );
        assert_eq!(resolver.resolve(&emphasized, false).unwrap(), emphasized);
    }

    #[test]
    fn dim_unmarked_colors_the_rest() {
        let resolver = MarkResolver::dim_unmarked();
        let dimmed = resolver.resolve(&Attributes::default(), false).unwrap();
        assert_eq!(
            dimmed.custom(keys::FOREGROUND_COLOR),
            Some(&AttributeValue::from("secondary"))
        );
        assert_eq!(resolver.resolve(&Attributes::default(), true).unwrap(), Attributes::default());
    }

    #[test]
    fn foreground_color_accepts_label_colors_only() {
        let resolver = StyleResolver::foreground_color();
        let base = Attributes::default();
        let tertiary = resolver.resolve(&base, "color", "tertiary").unwrap();
        assert_eq!(
            tertiary.custom(keys::FOREGROUND_COLOR),
            Some(&AttributeValue::from("tertiary"))
        );
        assert_eq!(resolver.resolve(&base, "color", "red").unwrap(), base);
        assert_eq!(resolver.resolve(&base, "background", "primary").unwrap(), base);
    }

    #[test]
    fn symbols_skip_unknown_and_remote_images() {
        let resolver = ImageResolver::symbols(|name| name == "bus");
        let text = StyledText::styled(
            "\u{fffc}",
            Attributes {
                image_locator: Locator::parse("https://apple.com/bus"),
                ..Default::default()
            },
        );
        let run = text.as_slice(0..text.len());
        for source in ["https://apple.com/bus", "car", "/bus"] {
            let locator = Locator::parse(source).unwrap();
            assert_eq!(resolver.resolve(&run, &locator).unwrap(), None, "{source}");
        }
    }

    #[test]
    fn symbol_keeps_label_and_clears_locator() {
        let resolver = ImageResolver::symbols(|_| true);
        let locator = Locator::parse("bus").unwrap();
        let text = StyledText::styled(
            "Bus",
            Attributes {
                image_locator: Some(locator.clone()),
                ..Default::default()
            },
        );
        let symbol = resolver
            .resolve(&text.as_slice(0..3), &locator)
            .unwrap()
            .unwrap();

        assert_eq!(symbol.text(), "\u{fffc}");
        let attributes = &symbol.runs()[0].attributes;
        assert_eq!(attributes.image_locator, None);
        assert_eq!(attributes.custom(keys::ATTACHMENT), Some(&AttributeValue::from("bus")));
        assert_eq!(
            attributes.custom(keys::ACCESSIBILITY_LABEL),
            Some(&AttributeValue::from("Bus"))
        );
    }
}
