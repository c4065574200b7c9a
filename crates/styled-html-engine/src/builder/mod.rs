//! # Builder - Events To Runs
//!
//! [`Builder`] is the [`Sink`] the tokenizer drives. It keeps one context
//! per open element: the attributes in effect, whether the next
//! character data should lose its leading whitespace, and the next list
//! ordinal. Opening an element saves the current context; closing it
//! restores the saved one.
//!
//! Character data is appended as runs as it arrives. Block boundaries trim
//! the whitespace accumulated before them. Once the input is exhausted the
//! passes in [`crate::resolve`] finish the text.

mod context;
mod intents;
mod style;
mod tag;

use styled_html_syntax::{Attribute, Sink, attribute, drive};

use crate::error::BuildError;
use crate::model::{BlockKind, InlineIntent, Locator, StyledText, UnderlineStyle};
use crate::options::{OBJECT_REPLACEMENT, Options};
use crate::{resolve, whitespace};

use context::{Context, ContextStack};
use tag::Tag;

/// Builds one [`StyledText`] from one HTML fragment.
pub struct Builder<'o> {
    options: &'o Options,
    result: StyledText,
    identity: u64,
    stack: ContextStack,
    current: Context,
}

impl<'o> Builder<'o> {
    pub fn new(options: &'o Options) -> Self {
        Self {
            options,
            result: StyledText::new(),
            identity: 1,
            stack: ContextStack::default(),
            current: Context::default(),
        }
    }

    pub fn parse(mut self, input: &str) -> Result<StyledText, BuildError> {
        drive(input, &mut self)?;
        resolve::run(&mut self.result, self.options)?;
        Ok(self.result)
    }

    fn right_trim(&mut self) {
        if self.options.interpreted_syntax.preserves_whitespace() {
            return;
        }
        whitespace::right_trim(&mut self.result);
    }

    fn apply_style(&mut self, attributes: &[Attribute]) -> Result<(), BuildError> {
        let (Some(resolver), Some(inline_style)) = (&self.options.style, attribute(attributes, "style"))
        else {
            return Ok(());
        };
        for (property, value) in style::declarations(inline_style) {
            self.current.attributes = resolver
                .resolve(&self.current.attributes, property, value)
                .map_err(|source| BuildError::StyleResolver {
                    property: property.to_string(),
                    value: value.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    fn link(&mut self, attributes: &[Attribute]) {
        if !self.options.allows_links {
            return;
        }
        match attribute(attributes, "href").and_then(Locator::parse) {
            Some(href) => {
                self.current.attributes.link = Some(href);
                self.current.attributes.underline = Some(UnderlineStyle::None);
            }
            None => log::debug!("ignoring anchor without a valid href"),
        }
    }

    fn image(&mut self, attributes: &[Attribute]) {
        let alt = attribute(attributes, "alt").unwrap_or_default();
        let text = if alt.is_empty() {
            String::from(OBJECT_REPLACEMENT)
        } else {
            alt.to_string()
        };
        self.current.attributes.image_locator = attribute(attributes, "src").and_then(Locator::parse);
        self.result.push_str(&text, self.current.attributes.clone());
    }
}

fn start_ordinal(attributes: &[Attribute]) -> i64 {
    attribute(attributes, "start")
        .and_then(|start| start.trim().parse().ok())
        .unwrap_or(1)
}

impl Sink for Builder<'_> {
    type Error = BuildError;

    fn start_element(&mut self, name: &str, attributes: &[Attribute]) -> Result<(), BuildError> {
        log::trace!("<{name}> at depth {}", self.stack.len());
        self.stack.push(self.current.clone());
        self.apply_style(attributes)?;

        match Tag::from_name(name) {
            Tag::Heading(level) => self.open_block(BlockKind::Header { level }),
            Tag::Paragraph => self.open_block(BlockKind::Paragraph),
            Tag::Center => {
                self.open_block(BlockKind::Paragraph);
                self.current.attributes.center = Some(true);
            }
            Tag::OrderedList => {
                self.open_block(BlockKind::OrderedList);
                self.current.list_ordinal = Some(start_ordinal(attributes));
            }
            Tag::UnorderedList => {
                self.open_block(BlockKind::UnorderedList);
                self.current.list_ordinal = Some(1);
            }
            Tag::ListItem => match self.current.list_ordinal {
                Some(ordinal) => {
                    self.open_block(BlockKind::ListItem { ordinal });
                    self.current.list_ordinal = Some(ordinal.saturating_add(1));
                }
                None => self.open_block(BlockKind::Paragraph),
            },
            Tag::Anchor => self.link(attributes),
            Tag::Emphasis => self.push_inline(InlineIntent::EMPHASIZED),
            Tag::Strong => self.push_inline(InlineIntent::STRONGLY_EMPHASIZED),
            Tag::HighlightOpen => self.current.attributes.mark = Some(true),
            Tag::HighlightClose => {
                // Closes whatever context was saved last, matched or not.
                self.stack.pop();
                return self.end_element("mark");
            }
            Tag::LineBreak => {
                self.push_inline(InlineIntent::LINE_BREAK);
                self.result.push_str("\n", self.current.attributes.clone());
            }
            Tag::Image => self.image(attributes),
            Tag::Body | Tag::Other => {}
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), BuildError> {
        log::trace!("</{name}> at depth {}", self.stack.len());
        let mut context = self.stack.pop();

        match Tag::from_name(name) {
            Tag::ListItem => context.list_ordinal = self.current.list_ordinal,
            Tag::LineBreak => {
                context.should_left_trim = true;
                self.right_trim();
            }
            tag if tag.is_block() => {
                context.should_left_trim = true;
                self.right_trim();
            }
            _ => context.should_left_trim = false,
        }

        self.current = context;
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), BuildError> {
        if self.options.interpreted_syntax.preserves_whitespace() {
            self.result.push_str(text, self.current.attributes.clone());
            return Ok(());
        }

        let collapsed = whitespace::collapse(text);
        let mut text: &str = &collapsed;
        if self.current.should_left_trim {
            text = text.trim_start_matches(whitespace::is_removable);
            self.current.should_left_trim = false;
        }
        if text.is_empty() || (text == " " && self.result.is_empty()) {
            return Ok(());
        }

        self.result.push_str(text, self.current.attributes.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::format_runs;
    use crate::options::InterpretedSyntax;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn build(html: &str, syntax: InterpretedSyntax) -> StyledText {
        Builder::new(&Options::new(syntax)).parse(html).unwrap()
    }

    #[test]
    fn nested_inline_intents_share_one_run() {
        let text = build("<b><i>text</i></b>", InterpretedSyntax::Full(None));
        assert_eq!(text.runs().len(), 1);
        assert_eq!(
            text.runs()[0].attributes.inline_intent,
            InlineIntent::STRONGLY_EMPHASIZED | InlineIntent::EMPHASIZED
        );
    }

    #[test]
    fn identities_count_from_one_per_parse() {
        let options = Options::new(InterpretedSyntax::Full(None));
        for _ in 0..2 {
            let text = Builder::new(&options).parse("<p>a</p><p>b</p>").unwrap();
            let ids: Vec<_> = text
                .runs()
                .iter()
                .filter_map(|r| r.attributes.block_intent.as_ref().map(|b| b.identity))
                .collect();
            assert_eq!(ids, vec![1, 2]);
        }
    }

    #[test]
    fn invalid_start_falls_back_to_one() {
        let text = build("<ol start=\" x \"><li>a</li></ol>", InterpretedSyntax::Full(None));
        let intent = text.runs()[0].attributes.block_intent.as_ref().unwrap();
        assert_eq!(intent.kind, BlockKind::ListItem { ordinal: 1 });
    }

    #[test]
    fn list_item_outside_list_is_paragraph() {
        let text = build("<li>a</li>", InterpretedSyntax::Full(None));
        let intent = text.runs()[0].attributes.block_intent.as_ref().unwrap();
        assert_eq!(intent.kind, BlockKind::Paragraph);
    }

    #[test]
    fn unterminated_highlight_ends_cleanly() {
        let text = build("a <mark>b", InterpretedSyntax::InlineOnly);
        assert_eq!(text.text(), "a b");
        assert!(text.runs().iter().all(|r| r.attributes.mark.is_none()));
    }

    #[test]
    fn highlight_close_without_open_closes_last_context() {
        // `lb` pops the context saved by `b`, so "c" is no longer strong.
        let text = build("<b>a<lb>c", InterpretedSyntax::Full(None));
        assert_snapshot!(format_runs(&text), @r#"
        "a" strong
        "c"
        "#);
    }

    #[test]
    fn snapshot_full_syntax_runs() {
        let text = build(
            r#"<h2>Title</h2><p>Some <a href="https://example.com">linked <em>text</em></a>.</p>"#,
            InterpretedSyntax::Full(None),
        );
        assert_snapshot!(format_runs(&text), @r#"
        "Title" [header(2)#1]
        "Some " [paragraph#2]
        "linked " link=https://example.com underline=None [paragraph#2]
        "text" em link=https://example.com underline=None [paragraph#2]
        "." [paragraph#2]
        "#);
    }
}
