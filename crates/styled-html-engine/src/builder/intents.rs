//! Opening block and inline intents on the current context.

use std::sync::Arc;

use crate::model::{BlockIntent, BlockKind, InlineIntent};

use super::Builder;

impl Builder<'_> {
    /// Nests a new block under the current one and ends the text before it.
    pub(super) fn open_block(&mut self, kind: BlockKind) {
        let parent = self.current.attributes.block_intent.take();
        let intent = Arc::new(BlockIntent::new(kind, self.identity, parent));
        log::trace!("opening block {intent}");

        self.current.attributes.block_intent = Some(intent);
        self.current.should_left_trim = true;
        self.identity += 1;
        self.right_trim();
    }

    pub(super) fn push_inline(&mut self, intent: InlineIntent) {
        self.current.attributes.inline_intent |= intent;
    }
}
