/// The elements the builder gives meaning to. Everything else is `Other`
/// and passes its content through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    Heading(u8),
    Paragraph,
    Center,
    OrderedList,
    UnorderedList,
    ListItem,
    Anchor,
    Emphasis,
    Strong,
    /// `mark` and `bl` open highlighted text.
    HighlightOpen,
    /// `lb` closes highlighted text.
    HighlightClose,
    LineBreak,
    Image,
    Body,
    Other,
}

impl Tag {
    /// Expects a lowercase element name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "p" => Tag::Paragraph,
            "center" => Tag::Center,
            "ol" => Tag::OrderedList,
            "ul" => Tag::UnorderedList,
            "li" => Tag::ListItem,
            "a" => Tag::Anchor,
            "em" | "i" => Tag::Emphasis,
            "strong" | "b" => Tag::Strong,
            "mark" | "bl" => Tag::HighlightOpen,
            "lb" => Tag::HighlightClose,
            "br" => Tag::LineBreak,
            "img" => Tag::Image,
            "body" => Tag::Body,
            _ => Tag::Other,
        }
    }

    /// Closing these ends a block: whitespace before and after is dropped.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Tag::Heading(_)
                | Tag::Paragraph
                | Tag::Center
                | Tag::OrderedList
                | Tag::UnorderedList
                | Tag::Body
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("h3", Tag::Heading(3))]
    #[case("b", Tag::Strong)]
    #[case("i", Tag::Emphasis)]
    #[case("bl", Tag::HighlightOpen)]
    #[case("lb", Tag::HighlightClose)]
    #[case("h7", Tag::Other)]
    #[case("font", Tag::Other)]
    fn from_name(#[case] name: &str, #[case] expected: Tag) {
        assert_eq!(Tag::from_name(name), expected);
    }

    #[test]
    fn list_items_are_not_blocks() {
        assert!(!Tag::ListItem.is_block());
        assert!(Tag::Body.is_block());
    }
}
