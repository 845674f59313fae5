//! Stable identifiers for metrics and directive matching.
//!
//! Metric handles are addressed by `(category, name)`.

// Categories
pub const CATEGORY_TIMINGS: &str = "timings";
pub const CATEGORY_RESULTS: &str = "results";
pub const CATEGORY_RULES: &str = "rules";

// Timers: timings
pub const TIMER_ADAPTATION: &str = "adaptation";
pub const TIMER_RUNNING_CHECKS: &str = "running checks";

// Counters: results
pub const COUNTER_IGNORED: &str = "ignored";
pub const COUNTER_EXCLUDED: &str = "excluded";

// Counters: rules
pub const COUNTER_SUPPRESSED_ERRORS: &str = "suppressed errors";

/// Directive target meaning "every rule".
pub const WILDCARD_RULE_ID: &str = "*";

/// Workspace name used when the caller does not select one.
pub const DEFAULT_WORKSPACE: &str = "default";
