use crate::model::Attributes;

/// State saved when an element opens and restored when it closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Context {
    pub attributes: Attributes,
    /// Drop leading whitespace from the next character data.
    pub should_left_trim: bool,
    /// Next ordinal for list items, inside `ol` or `ul`.
    pub list_ordinal: Option<i64>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            attributes: Attributes::default(),
            should_left_trim: true,
            list_ordinal: None,
        }
    }
}

/// Contexts of the currently open elements, outermost first.
#[derive(Debug, Default)]
pub(crate) struct ContextStack {
    saved: Vec<Context>,
}

impl ContextStack {
    pub fn push(&mut self, context: Context) {
        self.saved.push(context);
    }

    /// The most recently saved context, or a fresh one for an end tag that
    /// was never opened.
    pub fn pop(&mut self) -> Context {
        self.saved.pop().unwrap_or_else(|| {
            log::debug!("unbalanced end tag, restoring a default context");
            Context::default()
        })
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }
}
