//! # Styled Text - Runs Of Attributed Characters
//!
//! [`StyledText`] is an ordered list of [`Run`]s. Concatenating the run texts
//! gives the document's characters; each run carries one [`Attributes`] set.
//!
//! Two invariants hold after every public mutation:
//!
//! - no run is empty
//! - no two adjacent runs have equal attributes
//!
//! Positions and ranges are byte offsets into the concatenated text and must
//! fall on `char` boundaries.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use super::attributes::Attributes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub text: String,
    pub attributes: Attributes,
}

impl Run {
    pub fn new(text: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyledText {
    runs: Vec<Run>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text with no attributes.
    pub fn plain(text: &str) -> Self {
        Self::styled(text, Attributes::default())
    }

    pub fn styled(text: &str, attributes: Attributes) -> Self {
        let mut result = Self::new();
        result.push_str(text, attributes);
        result
    }

    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        let mut result = Self::new();
        for run in runs {
            result.push_run(run);
        }
        result
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|r| r.text.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn ends_with(&self, c: char) -> bool {
        self.runs
            .last()
            .and_then(|r| r.text.chars().last())
            .is_some_and(|last| last == c)
    }

    pub fn push_run(&mut self, run: Run) {
        if run.text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.attributes == run.attributes => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }

    pub fn push_str(&mut self, text: &str, attributes: Attributes) {
        self.push_run(Run::new(text, attributes));
    }

    pub fn append(&mut self, other: StyledText) {
        for run in other.runs {
            self.push_run(run);
        }
    }

    /// A copy of the runs covering `range`, cut at its ends.
    ///
    /// # Panics
    ///
    /// If either end of `range` is not on a `char` boundary.
    pub fn slice(&self, range: Range<usize>) -> StyledText {
        self.as_slice(range).to_styled_text()
    }

    /// A borrowed view of `range`.
    ///
    /// # Panics
    ///
    /// Reading the view panics if either end of `range` is not on a `char`
    /// boundary.
    pub fn as_slice(&self, range: Range<usize>) -> StyledSlice<'_> {
        let (first_run, first_offset) = self.locate(range.start);
        let at_end = range.end >= self.len();
        StyledSlice {
            base: self,
            range,
            first_run,
            first_offset,
            at_end,
        }
    }

    /// Replaces the characters in `range` with `replacement`.
    ///
    /// Only the runs at the two ends of `range` are cut; runs that become
    /// adjacent with equal attributes are merged.
    ///
    /// # Panics
    ///
    /// If either end of `range` is not on a `char` boundary, or if
    /// `range.start > range.end`.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: StyledText) {
        assert!(
            range.start <= range.end,
            "range start {} is after its end {}",
            range.start,
            range.end
        );
        let start = self.split_at(range.start);
        let end = self.split_at(range.end);
        let inserted = replacement.runs.len();
        self.runs.splice(start..end, replacement.runs);
        self.merge_at(start + inserted);
        self.merge_at(start);
    }

    /// # Panics
    ///
    /// As [`StyledText::replace_range`].
    pub fn remove_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.replace_range(range, StyledText::new());
    }

    /// # Panics
    ///
    /// If `at` is not on a `char` boundary.
    pub fn insert(&mut self, at: usize, text: StyledText) {
        self.replace_range(at..at, text);
    }

    /// # Panics
    ///
    /// If `at` is not on a `char` boundary.
    pub fn insert_str(&mut self, at: usize, text: &str, attributes: Attributes) {
        self.insert(at, StyledText::styled(text, attributes));
    }

    /// Rewrites every run's attributes in place, merging runs that become equal.
    pub fn update_attributes(&mut self, mut f: impl FnMut(&mut Attributes)) {
        for run in &mut self.runs {
            f(&mut run.attributes);
        }
        self.coalesce();
    }

    /// Like [`StyledText::update_attributes`], but stops at the first error
    /// and leaves `self` untouched in that case.
    pub fn try_map_attributes<E>(
        &mut self,
        mut f: impl FnMut(&Attributes) -> Result<Attributes, E>,
    ) -> Result<(), E> {
        let mapped = self
            .runs
            .iter()
            .map(|run| Ok(Run::new(run.text.clone(), f(&run.attributes)?)))
            .collect::<Result<Vec<_>, E>>()?;
        *self = StyledText::from_runs(mapped);
        Ok(())
    }

    /// Groups adjacent runs by one projection of their attributes.
    ///
    /// Each maximal stretch with an equal key becomes one entry, so the
    /// ranges cover the whole text without gaps.
    pub fn runs_by<K: PartialEq>(&self, key: impl Fn(&Attributes) -> K) -> Vec<(K, Range<usize>)> {
        self.groups_by(key)
            .into_iter()
            .map(|group| (group.key, group.bytes))
            .collect()
    }

    /// Deletes the characters matching `pred` at the end of the text.
    ///
    /// Runs accepted by `keep` are never shortened. Trimming continues
    /// before such a run as long as it consists only of matching characters.
    pub fn trim_end_except(&mut self, pred: impl Fn(char) -> bool, keep: impl Fn(&Attributes) -> bool) {
        let mut kept = Vec::new();
        while let Some(mut run) = self.runs.pop() {
            let content = run.text.trim_end_matches(|c: char| pred(c)).len();
            if keep(&run.attributes) {
                kept.push(run);
                if content > 0 {
                    break;
                }
                continue;
            }
            run.text.truncate(content);
            if content > 0 {
                self.runs.push(run);
                break;
            }
        }
        for run in kept.into_iter().rev() {
            self.push_run(run);
        }
    }

    /// Offers every group of runs sharing a key to `replace`, last to first,
    /// then splices all replacements in one pass.
    ///
    /// The slice handed to `replace` reports [`StyledSlice::is_at_end`] as if
    /// the later groups had already been replaced. With `absorb_after_tab`,
    /// characters it matches are dropped after any replacement ending in a
    /// tab, up to the first character it does not match.
    pub(crate) fn try_replace_groups<K: PartialEq, E>(
        &mut self,
        key: impl Fn(&Attributes) -> K,
        absorb_after_tab: Option<fn(char) -> bool>,
        mut replace: impl FnMut(K, &StyledSlice<'_>) -> Result<Option<StyledText>, E>,
    ) -> Result<(), E> {
        let groups = self.groups_by(key);
        let mut plan = Vec::with_capacity(groups.len());
        let mut rest_is_empty = true;
        for group in groups.into_iter().rev() {
            let slice = StyledSlice {
                base: self,
                range: group.bytes.clone(),
                first_run: group.runs.start,
                first_offset: group.bytes.start,
                at_end: rest_is_empty,
            };
            let replacement = replace(group.key, &slice)?;
            rest_is_empty &= replacement.as_ref().is_some_and(StyledText::is_empty);
            plan.push((group.runs.len(), replacement));
        }

        let mut result = StyledText::new();
        let mut absorbing = None;
        let mut runs = std::mem::take(&mut self.runs).into_iter();
        for (count, replacement) in plan.into_iter().rev() {
            match replacement {
                Some(replacement) => {
                    runs.by_ref().take(count).for_each(drop);
                    let ends_with_tab = replacement.ends_with('\t');
                    for run in replacement.runs {
                        result.push_absorbing(run, &mut absorbing);
                    }
                    if ends_with_tab {
                        absorbing = absorb_after_tab;
                    }
                }
                None => {
                    for run in runs.by_ref().take(count) {
                        result.push_absorbing(run, &mut absorbing);
                    }
                }
            }
        }
        *self = result;
        Ok(())
    }

    fn groups_by<K: PartialEq>(&self, key: impl Fn(&Attributes) -> K) -> Vec<Group<K>> {
        let mut groups: Vec<Group<K>> = Vec::new();
        let mut offset = 0;
        for (index, run) in self.runs.iter().enumerate() {
            let end = offset + run.text.len();
            let k = key(&run.attributes);
            match groups.last_mut() {
                Some(last) if last.key == k => {
                    last.runs.end = index + 1;
                    last.bytes.end = end;
                }
                _ => groups.push(Group {
                    key: k,
                    runs: index..index + 1,
                    bytes: offset..end,
                }),
            }
            offset = end;
        }
        groups
    }

    /// Index of the run containing byte `at`, and that run's start offset.
    /// Past the end this is the run count and the length.
    fn locate(&self, at: usize) -> (usize, usize) {
        let mut offset = 0;
        for (index, run) in self.runs.iter().enumerate() {
            let end = offset + run.text.len();
            if at < end {
                return (index, offset);
            }
            offset = end;
        }
        (self.runs.len(), offset)
    }

    /// Cuts the run containing `at` so that a run starts there, returning
    /// that run's index.
    fn split_at(&mut self, at: usize) -> usize {
        let (index, offset) = self.locate(at);
        if index == self.runs.len() || offset == at {
            return index;
        }
        let run = &mut self.runs[index];
        let tail = run.text.split_off(at - offset);
        let attributes = run.attributes.clone();
        self.runs.insert(index + 1, Run::new(tail, attributes));
        index + 1
    }

    /// Merges the runs at `index - 1` and `index` if their attributes match.
    fn merge_at(&mut self, index: usize) {
        if index == 0 || index >= self.runs.len() {
            return;
        }
        if self.runs[index - 1].attributes == self.runs[index].attributes {
            let run = self.runs.remove(index);
            self.runs[index - 1].text.push_str(&run.text);
        }
    }

    fn push_absorbing(&mut self, mut run: Run, absorbing: &mut Option<fn(char) -> bool>) {
        if let Some(pred) = *absorbing {
            let absorbed = run.text.len() - run.text.trim_start_matches(pred).len();
            run.text.drain(..absorbed);
            if !run.text.is_empty() {
                *absorbing = None;
            }
        }
        self.push_run(run);
    }

    fn coalesce(&mut self) {
        let runs = std::mem::take(&mut self.runs);
        for run in runs {
            self.push_run(run);
        }
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            f.write_str(&run.text)?;
        }
        Ok(())
    }
}

struct Group<K> {
    key: K,
    runs: Range<usize>,
    bytes: Range<usize>,
}

/// A borrowed range of a [`StyledText`], handed to resolvers.
///
/// Keeps the surrounding text reachable so a resolver can tell whether it
/// sits at the start or end of the document, or what precedes it.
#[derive(Debug, Clone)]
pub struct StyledSlice<'a> {
    base: &'a StyledText,
    range: Range<usize>,
    first_run: usize,
    first_offset: usize,
    at_end: bool,
}

impl<'a> StyledSlice<'a> {
    pub fn base(&self) -> &'a StyledText {
        self.base
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn is_at_start(&self) -> bool {
        self.range.start == 0
    }

    /// Whether nothing follows the slice in the finished text.
    pub fn is_at_end(&self) -> bool {
        self.at_end
    }

    pub fn text(&self) -> String {
        self.pieces().map(|(piece, _)| piece).collect()
    }

    pub fn to_styled_text(&self) -> StyledText {
        let mut result = StyledText::new();
        for (piece, attributes) in self.pieces() {
            result.push_str(piece, attributes.clone());
        }
        result
    }

    /// The value of `key` if every run in the slice agrees on it.
    ///
    /// Empty slices have no uniform value.
    pub fn uniform<K: PartialEq>(&self, key: impl Fn(&Attributes) -> K) -> Option<K> {
        let mut values = self.pieces().map(|(_, a)| key(a));
        let first = values.next()?;
        values.all(|v| v == first).then_some(first)
    }

    pub fn first_attributes(&self) -> Option<&'a Attributes> {
        self.pieces().next().map(|(_, attributes)| attributes)
    }

    /// Attributes of the run just before the slice.
    pub fn preceding_attributes(&self) -> Option<&'a Attributes> {
        let index = if self.range.start > self.first_offset {
            self.first_run
        } else {
            self.first_run.checked_sub(1)?
        };
        self.base.runs.get(index).map(|run| &run.attributes)
    }

    /// The non-empty pieces of runs overlapping the slice, cut to it.
    fn pieces(&self) -> impl Iterator<Item = (&'a str, &'a Attributes)> + use<'a> {
        let range = self.range.clone();
        let mut offset = self.first_offset;
        let runs: &'a [Run] = self.base.runs.get(self.first_run..).unwrap_or_default();
        runs.iter()
            .map_while(move |run| {
                let start = offset;
                let end = start + run.text.len();
                offset = end;
                (start < range.end).then(|| {
                    let lo = range.start.max(start);
                    let hi = range.end.min(end);
                    (&run.text[lo - start..hi - start], &run.attributes)
                })
            })
            .filter(|(piece, _)| !piece.is_empty())
    }
}

/// One line per run, for debugging and snapshot tests.
pub fn format_runs(text: &StyledText) -> String {
    text.runs()
        .iter()
        .map(|run| {
            if run.attributes == Attributes::default() {
                format!("{:?}\n", run.text)
            } else {
                format!("{:?} {}\n", run.text, run.attributes)
            }
        })
        .collect()
}
