/// Group sizing: how many pools a roster of `n` competitors is split into.
use crate::constants::{FALLBACK_POOL_COUNT, FALLBACK_POOL_SIZE, PREFERRED_POOL_SIZE};

/// `n` can be split into pools of size `k` and `k + 1` exactly when the
/// remainder fits one extra competitor per pool: `n mod k <= floor(n / k)`.
fn fits_pools_of(n: usize, k: usize) -> bool {
    n % k <= n / k
}

/// Number of pools for a roster of `n` competitors.
///
/// Prefers pools of 6–7, then 7–8, and otherwise falls back to 3 pools. The
/// range of `n` is not validated: tiny rosters get near-empty pools and an
/// empty roster gets zero pools.
pub fn pool_count(n: usize) -> usize {
    if fits_pools_of(n, PREFERRED_POOL_SIZE) {
        n / PREFERRED_POOL_SIZE
    } else if fits_pools_of(n, FALLBACK_POOL_SIZE) {
        n / FALLBACK_POOL_SIZE
    } else {
        FALLBACK_POOL_COUNT
    }
}
