//! Checks every finished [`StyledText`] must pass. Used by the tests;
//! panics with a description of the first violation.

use crate::model::StyledText;

pub fn check(text: &StyledText) {
    let runs = text.runs();

    for (i, run) in runs.iter().enumerate() {
        assert!(!run.text.is_empty(), "run {i} is empty");
        assert!(
            run.attributes.mark.is_none(),
            "run {i} ({:?}) still carries the highlight flag",
            run.text
        );
    }

    for (i, pair) in runs.windows(2).enumerate() {
        assert!(
            pair[0].attributes != pair[1].attributes,
            "runs {i} and {} have equal attributes: {:?} / {:?}",
            i + 1,
            pair[0].text,
            pair[1].text
        );
    }
}
