use std::collections::BTreeMap;

use crate::rewrite::RewriteRule;

pub const DEFAULT_LABEL_KEY: &str = "nfs-home";
pub const DEFAULT_LABEL_VALUE: &str = "true";
pub const DEFAULT_REWRITE_FROM: &str = "/home";
pub const DEFAULT_REWRITE_TO: &str = "/blah/home";

/// The label a resource must carry to opt into mount path rewriting.
#[derive(Clone, Debug)]
pub struct TargetLabel {
    pub key: String,
    pub value: String,
}

impl TargetLabel {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        TargetLabel {
            key: key.into(),
            value: value.into(),
        }
    }

    /// True iff the label map carries the configured key with exactly the
    /// configured value. An absent map is an empty map, not an error.
    pub fn matches(&self, labels: Option<&BTreeMap<String, String>>) -> bool {
        labels
            .and_then(|labels| labels.get(&self.key))
            .is_some_and(|value| *value == self.value)
    }
}

/// Immutable per-process mutation configuration, loaded once at startup and
/// handed to the handler. The mutation pipeline never reads the environment.
#[derive(Clone, Debug)]
pub struct MutationSettings {
    pub target_label: TargetLabel,
    pub rewrite_rule: RewriteRule,
}

impl Default for MutationSettings {
    fn default() -> Self {
        MutationSettings {
            target_label: TargetLabel::new(DEFAULT_LABEL_KEY, DEFAULT_LABEL_VALUE),
            rewrite_rule: RewriteRule::new(DEFAULT_REWRITE_FROM, DEFAULT_REWRITE_TO),
        }
    }
}
