//! Character-level input filtering.
//!
//! Every candidate edit passes through an ordered pipeline before it is
//! committed: caller-supplied custom filters first, then the allow-list
//! stage, then the length cap. The allow-list runs before the cap because
//! dropping characters changes how many are needed to reach the cap.
//!
//! The allow-list sanitizes the proposed insertion span; the cap clamps the
//! resulting total value. Programmatic value replacement runs the whole
//! pipeline over the full candidate.

/// A caller-supplied transformation applied to a candidate value.
pub type FilterFn = Box<dyn Fn(&str) -> String + Send>;

/// A single derived stage of the pipeline.
enum FilterStage {
    /// Retains only characters present in the alphabet, in original order.
    /// Disallowed characters are dropped silently; this is a sanitize step,
    /// not a validation failure.
    AllowedCharacters(String),
    /// Truncates the total value to the cap.
    MaxLength(usize),
}

impl FilterStage {
    fn apply(&self, candidate: &str) -> String {
        match self {
            FilterStage::AllowedCharacters(alphabet) => candidate
                .chars()
                .filter(|c| alphabet.contains(*c))
                .collect(),
            FilterStage::MaxLength(cap) => candidate.chars().take(*cap).collect(),
        }
    }
}

/// Ordered, composable filter pipeline.
///
/// Derived stages are rebuilt from scratch whenever the allow-list alphabet
/// or the character cap changes; stale stages never linger.
#[derive(Default)]
pub(super) struct FilterPipeline {
    custom: Vec<FilterFn>,
    stages: Vec<FilterStage>,
}

impl FilterPipeline {
    /// Replaces the caller-supplied filters. Derived stages are unaffected.
    pub(super) fn set_custom(&mut self, filters: Vec<FilterFn>) {
        self.custom = filters;
    }

    /// Rebuilds the derived stages from the current constraints.
    pub(super) fn rebuild(&mut self, allowed: Option<&str>, max_characters: Option<usize>) {
        self.stages.clear();
        if let Some(alphabet) = allowed {
            self.stages
                .push(FilterStage::AllowedCharacters(alphabet.to_string()));
        }
        if let Some(cap) = max_characters {
            self.stages.push(FilterStage::MaxLength(cap));
        }
    }

    /// Runs a full candidate value through every stage.
    pub(super) fn apply(&self, candidate: &str) -> String {
        let mut value = candidate.to_string();
        for filter in &self.custom {
            value = filter(&value);
        }
        for stage in &self.stages {
            value = stage.apply(&value);
        }
        value
    }

    /// Sanitizes a proposed insertion span: custom filters and the
    /// allow-list, but not the length cap (which applies to the total).
    pub(super) fn filter_insertion(&self, span: &str) -> String {
        let mut value = span.to_string();
        for filter in &self.custom {
            value = filter(&value);
        }
        for stage in &self.stages {
            if let FilterStage::AllowedCharacters(_) = stage {
                value = stage.apply(&value);
            }
        }
        value
    }

    /// Clamps a resulting total value to the length cap, if one is set.
    pub(super) fn cap(&self, total: &str) -> String {
        let mut value = total.to_string();
        for stage in &self.stages {
            if let FilterStage::MaxLength(_) = stage {
                value = stage.apply(&value);
            }
        }
        value
    }
}
