//! Splitting inline `style` attributes into declarations.
//!
//! There is no cascade: declarations are handed to the style resolver in
//! source order.

/// `(property, value)` pairs from `prop: value; prop: value`.
///
/// A declaration without a colon, or whose property or value is empty, is
/// skipped. Both parts are trimmed.
pub(crate) fn declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style
        .split(';')
        .filter(|declaration| !declaration.is_empty())
        .filter_map(|declaration| {
            let Some((property, value)) = declaration.split_once(':') else {
                log::debug!("skipping style declaration without value: {declaration:?}");
                return None;
            };
            if property.is_empty() || value.is_empty() {
                log::debug!("skipping empty style declaration: {declaration:?}");
                return None;
            }
            Some((property.trim(), value.trim()))
        })
}
