//! Caller-supplied callbacks that shape the build.
//!
//! Each resolver wraps a shared closure so that one [`Options`] value can be
//! cloned and reused across threads.
//!
//! [`Options`]: super::Options

use std::fmt;
use std::sync::Arc;

use crate::error::ResolverError;
use crate::model::{Attributes, BlockIntent, Locator, StyledSlice, StyledText};

type StyleFn = dyn Fn(&Attributes, &str, &str) -> Result<Attributes, ResolverError> + Send + Sync;
type ImageFn =
    dyn Fn(&StyledSlice<'_>, &Locator) -> Result<Option<StyledText>, ResolverError> + Send + Sync;
type MarkFn = dyn Fn(&Attributes, bool) -> Result<Attributes, ResolverError> + Send + Sync;
type BlockFn =
    dyn Fn(&StyledSlice<'_>, Option<&BlockIntent>) -> Result<StyledText, ResolverError> + Send + Sync;

/// Turns one `property: value` declaration from a `style` attribute into
/// attributes, given the attributes in effect so far.
#[derive(Clone)]
pub struct StyleResolver(Arc<StyleFn>);

impl StyleResolver {
    pub fn new(
        f: impl Fn(&Attributes, &str, &str) -> Result<Attributes, ResolverError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    pub fn resolve(&self, attributes: &Attributes, property: &str, value: &str) -> Result<Attributes, ResolverError> {
        (self.0)(attributes, property, value)
    }
}

/// Replaces an image run. Returning `Ok(None)` keeps the run as it is.
#[derive(Clone)]
pub struct ImageResolver(Arc<ImageFn>);

impl ImageResolver {
    pub fn new(
        f: impl Fn(&StyledSlice<'_>, &Locator) -> Result<Option<StyledText>, ResolverError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    pub fn resolve(
        &self,
        run: &StyledSlice<'_>,
        locator: &Locator,
    ) -> Result<Option<StyledText>, ResolverError> {
        (self.0)(run, locator)
    }
}

/// Rewrites every run's attributes once highlighting is known to be present.
#[derive(Clone)]
pub struct MarkResolver(Arc<MarkFn>);

impl MarkResolver {
    pub fn new(
        f: impl Fn(&Attributes, bool) -> Result<Attributes, ResolverError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    pub fn resolve(&self, attributes: &Attributes, is_marked: bool) -> Result<Attributes, ResolverError> {
        (self.0)(attributes, is_marked)
    }
}

/// Replaces each stretch of text sharing one block intent (or none).
#[derive(Clone)]
pub struct BlockResolver(Arc<BlockFn>);

impl BlockResolver {
    pub fn new(
        f: impl Fn(&StyledSlice<'_>, Option<&BlockIntent>) -> Result<StyledText, ResolverError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    pub fn resolve(
        &self,
        span: &StyledSlice<'_>,
        intent: Option<&BlockIntent>,
    ) -> Result<StyledText, ResolverError> {
        (self.0)(span, intent)
    }
}

macro_rules! opaque_debug {
    ($($name:ident),*) => {
        $(
            impl fmt::Debug for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(concat!(stringify!($name), "(..)"))
                }
            }
        )*
    };
}

opaque_debug!(StyleResolver, ImageResolver, MarkResolver, BlockResolver);
