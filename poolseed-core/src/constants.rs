/// Upper bound on conflict-resolution rounds.
///
/// The resolver is greedy and can stall when no legal swap exists for the
/// club it picked, so it needs a hard stop. Reaching this bound is not an
/// error: the pools are returned as they stand.
pub const MAX_RESOLVE_ROUNDS: usize = 10_000;

/// Width of one grade band in the rank score. Sub-levels live in `0..RANK_BAND`.
pub const RANK_BAND: u16 = 100;

/// Preferred pool size. Pools of this size and one larger are tried first.
pub const PREFERRED_POOL_SIZE: usize = 6;

/// Second-choice pool size, again allowing pools one larger.
pub const FALLBACK_POOL_SIZE: usize = 7;

/// Pool count used when neither 6–7 nor 7–8 sized pools cover the roster.
pub const FALLBACK_POOL_COUNT: usize = 3;
