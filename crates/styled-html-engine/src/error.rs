use std::ops::Range;

use crate::model::Locator;

/// Error type returned by caller-supplied resolvers.
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

/// A resolver failed while building styled text.
///
/// Malformed markup never produces an error; only resolvers can fail, and a
/// failure aborts the whole build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("style resolver failed on `{property}: {value}`")]
    StyleResolver {
        property: String,
        value: String,
        #[source]
        source: ResolverError,
    },
    #[error("mark resolver failed")]
    MarkResolver {
        #[source]
        source: ResolverError,
    },
    #[error("image resolver failed for {locator}")]
    ImageResolver {
        locator: Locator,
        #[source]
        source: ResolverError,
    },
    #[error("block resolver failed for bytes {range:?}")]
    BlockResolver {
        range: Range<usize>,
        #[source]
        source: ResolverError,
    },
}
