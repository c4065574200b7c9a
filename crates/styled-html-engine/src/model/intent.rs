use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Inline emphasis carried by a run. Nested elements union their flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct InlineIntent: u8 {
        const EMPHASIZED = 1 << 0;
        const STRONGLY_EMPHASIZED = 1 << 1;
        const LINE_BREAK = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    Header { level: u8 },
    Paragraph,
    OrderedList,
    UnorderedList,
    ListItem { ordinal: i64 },
}

impl BlockKind {
    pub fn is_list(self) -> bool {
        matches!(self, BlockKind::OrderedList | BlockKind::UnorderedList)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Header { level } => write!(f, "header({level})"),
            BlockKind::Paragraph => f.write_str("paragraph"),
            BlockKind::OrderedList => f.write_str("orderedList"),
            BlockKind::UnorderedList => f.write_str("unorderedList"),
            BlockKind::ListItem { ordinal } => write!(f, "listItem({ordinal})"),
        }
    }
}

/// One block-level construct and the chain of blocks enclosing it.
///
/// Nodes are never mutated once built. Opening a nested block creates a new
/// node whose `parent` shares the enclosing one, so every run inside a list
/// item can point at the same chain without copying it.
///
/// Equality compares kind, identity and the whole parent chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BlockIntent {
    pub kind: BlockKind,
    /// Allocation order within one parse, starting at 1.
    pub identity: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Arc<BlockIntent>>,
}

impl BlockIntent {
    pub fn new(kind: BlockKind, identity: u64, parent: Option<Arc<BlockIntent>>) -> Self {
        Self {
            kind,
            identity,
            parent,
        }
    }

    /// Walks the chain from this node outwards.
    pub fn components(&self) -> Components<'_> {
        Components { next: Some(self) }
    }
}

impl fmt::Display for BlockIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components().enumerate() {
            if i > 0 {
                f.write_str(" < ")?;
            }
            write!(f, "{}#{}", component.kind, component.identity)?;
        }
        Ok(())
    }
}

/// Iterator over a [`BlockIntent`] chain, innermost first.
pub struct Components<'a> {
    next: Option<&'a BlockIntent>,
}

impl<'a> Iterator for Components<'a> {
    type Item = &'a BlockIntent;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent.as_deref();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nested() -> BlockIntent {
        let list = Arc::new(BlockIntent::new(BlockKind::OrderedList, 1, None));
        let item = Arc::new(BlockIntent::new(
            BlockKind::ListItem { ordinal: 1 },
            2,
            Some(list),
        ));
        BlockIntent::new(BlockKind::UnorderedList, 3, Some(item))
    }

    #[test]
    fn components_run_innermost_first() {
        let intent = nested();
        let kinds: Vec<_> = intent.components().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::UnorderedList,
                BlockKind::ListItem { ordinal: 1 },
                BlockKind::OrderedList,
            ]
        );
    }

    #[test]
    fn equality_includes_parent_chain() {
        let a = BlockIntent::new(BlockKind::Paragraph, 2, None);
        let b = BlockIntent::new(
            BlockKind::Paragraph,
            2,
            Some(Arc::new(BlockIntent::new(BlockKind::Paragraph, 1, None))),
        );
        assert_ne!(a, b);
        assert_eq!(a, BlockIntent::new(BlockKind::Paragraph, 2, None));
    }

    #[test]
    fn display_shows_chain() {
        assert_eq!(
            nested().to_string(),
            "unorderedList#3 < listItem(1)#2 < orderedList#1"
        );
    }

    #[test]
    fn inline_flags_union() {
        let both = InlineIntent::STRONGLY_EMPHASIZED | InlineIntent::EMPHASIZED;
        assert!(both.contains(InlineIntent::EMPHASIZED));
        assert!(!both.contains(InlineIntent::LINE_BREAK));
        assert_eq!(InlineIntent::default(), InlineIntent::empty());
    }
}
