use infraguard_rules::CheckFault;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A rule check faulted while errors were not being ignored.
    #[error("rule '{rule_id}' failed on block '{block}': {fault}")]
    CheckFailed {
        rule_id: String,
        block: String,
        #[source]
        fault: CheckFault,
    },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
