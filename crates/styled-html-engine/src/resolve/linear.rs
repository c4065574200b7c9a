//! Flattening block structure into lines.
//!
//! Used by the inline-only syntaxes: each stretch of text sharing one block
//! intent loses the intent, list items gain a marker, and blocks are
//! separated by newlines.

use crate::model::{Attributes, BlockIntent, BlockKind, InlineIntent, StyledSlice, StyledText};

/// Chooses the marker text for a list item.
///
/// `item` is one of `components`, the item's whole chain from the innermost
/// block outwards. The marker is followed by a space when inserted, so an
/// empty marker still indents.
pub trait ListMarkers: Send + Sync {
    fn marker(&self, item: &BlockIntent, components: &[&BlockIntent]) -> String;
}

impl<F> ListMarkers for F
where
    F: Fn(&BlockIntent, &[&BlockIntent]) -> String + Send + Sync,
{
    fn marker(&self, item: &BlockIntent, components: &[&BlockIntent]) -> String {
        self(item, components)
    }
}

/// Only the innermost list item gets a marker; outer levels indent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestedListMarkers;

impl ListMarkers for NestedListMarkers {
    fn marker(&self, item: &BlockIntent, components: &[&BlockIntent]) -> String {
        let Some(index) = components.iter().position(|c| c.identity == item.identity) else {
            return String::new();
        };
        if components[..index].iter().any(|c| c.kind.is_list()) {
            return String::new();
        }
        ordinal_or_bullet(item, components.get(index + 1))
    }
}

/// Every list level contributes its own marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct EveryLevelListMarkers;

impl ListMarkers for EveryLevelListMarkers {
    fn marker(&self, item: &BlockIntent, components: &[&BlockIntent]) -> String {
        let parent = components
            .iter()
            .position(|c| c.identity == item.identity)
            .and_then(|index| components.get(index + 1));
        ordinal_or_bullet(item, parent)
    }
}

/// Ordinals are plain ASCII digits with no locale grouping.
fn ordinal_or_bullet(item: &BlockIntent, parent: Option<&&BlockIntent>) -> String {
    match (item.kind, parent.map(|p| p.kind)) {
        (BlockKind::ListItem { ordinal }, Some(BlockKind::OrderedList)) => format!("{ordinal}."),
        _ => "•".to_string(),
    }
}

/// Replacement text for one block stretch of the document.
pub fn transform(
    span: &StyledSlice<'_>,
    intent: Option<&BlockIntent>,
    markers: &dyn ListMarkers,
) -> StyledText {
    let components: Vec<&BlockIntent> = intent.map(|i| i.components().collect()).unwrap_or_default();

    let mut result = span.to_styled_text();
    result.update_attributes(|a| a.block_intent = None);

    let mut prefix_newline = false;
    for component in &components {
        match component.kind {
            BlockKind::Header { .. } => prefix_newline = true,
            BlockKind::ListItem { .. } => {
                let marker = markers.marker(component, &components);
                result.insert_str(0, &format!("{marker} "), Attributes::default());
            }
            _ => {}
        }
    }

    // Bold text outside any block reads as a heading.
    if intent.is_none() && span.uniform(|a| a.inline_intent) == Some(InlineIntent::STRONGLY_EMPHASIZED) {
        prefix_newline = true;
    }

    if prefix_newline && !span.is_at_start() {
        result.insert_str(0, "\n", Attributes::default());
    }
    if !span.is_at_end() {
        result.push_str("\n", Attributes::default());
    }
    result
}
