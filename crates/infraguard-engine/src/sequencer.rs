use infraguard_types::ScanResult;
use std::cmp::Reverse;

/// Sort results into their final order.
///
/// Rule id ascending, then the narrowest range's string form descending.
/// The remaining keys only break ties between results that would otherwise
/// compare equal, so the order is total and independent of worker count.
pub fn sequence(results: &mut [ScanResult]) {
    // Keys are built once per result rather than once per comparison.
    results.sort_by_cached_key(|r| {
        (
            r.rule_id.clone(),
            Reverse(r.narrowest_range().to_string()),
            r.range.clone(),
            r.status,
            r.message.clone(),
            r.severity,
        )
    });
}
