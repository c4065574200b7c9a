//! Passes run once the whole document has been read.
//!
//! Order matters: highlighting and images are resolved while block intents
//! are still present, then blocks are resolved or flattened last.

pub mod linear;

use crate::error::BuildError;
use crate::model::StyledText;
use crate::options::{InterpretedSyntax, Options};
use crate::whitespace::is_horizontal;

pub(crate) fn run(text: &mut StyledText, options: &Options) -> Result<(), BuildError> {
    resolve_marks(text, options)?;
    resolve_images(text, options)?;
    resolve_blocks(text, options)
}

fn resolve_marks(text: &mut StyledText, options: &Options) -> Result<(), BuildError> {
    if let Some(mark) = &options.mark
        && text.runs().iter().any(|run| run.attributes.is_marked())
    {
        log::debug!("resolving highlighted text");
        text.try_map_attributes(|a| mark.resolve(a, a.is_marked()))
            .map_err(|source| BuildError::MarkResolver { source })?;
    }
    text.update_attributes(|a| a.mark = None);
    Ok(())
}

fn resolve_images(text: &mut StyledText, options: &Options) -> Result<(), BuildError> {
    let Some(image) = &options.image else {
        return Ok(());
    };

    text.try_replace_groups(
        |a| a.image_locator.clone(),
        Some(is_horizontal as fn(char) -> bool),
        |locator, span| {
            let Some(locator) = locator else {
                return Ok(None);
            };
            let replacement = image
                .resolve(span, &locator)
                .map_err(|source| BuildError::ImageResolver {
                    locator: locator.clone(),
                    source,
                })?;
            if replacement.is_some() {
                log::debug!("replacing image {locator} at {:?}", span.range());
            }
            Ok(replacement)
        },
    )
}

fn resolve_blocks(text: &mut StyledText, options: &Options) -> Result<(), BuildError> {
    let resolver = match &options.interpreted_syntax {
        InterpretedSyntax::Full(None) => return Ok(()),
        InterpretedSyntax::Full(Some(resolver)) => Some(resolver),
        InterpretedSyntax::InlineOnly | InterpretedSyntax::InlineOnlyPreservingWhitespace => None,
    };

    text.try_replace_groups(
        |a| a.block_intent.clone(),
        None,
        |intent, span| {
            let replacement = match resolver {
                Some(resolver) => resolver
                    .resolve(span, intent.as_deref())
                    .map_err(|source| BuildError::BlockResolver {
                        range: span.range(),
                        source,
                    })?,
                None => linear::transform(span, intent.as_deref(), options.list_markers.as_ref()),
            };
            Ok(Some(replacement))
        },
    )
}
