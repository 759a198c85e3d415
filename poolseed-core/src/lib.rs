/// poolseed-core: Pure-computation pool assignment for fencing tournaments.
///
/// Sorted roster → group sizing → snake seeding → club conflict resolution.
/// Does no IO: the caller brings the roster and renders the pools.
///
/// Competitors are identified by their position in the rank-sorted
/// [`Roster`]; the returned pools borrow straight from it.
///
/// # Quick start
///
/// ```rust
/// use poolseed_core::{assign_pools, Competitor, Roster};
///
/// let roster: Roster = [
///     ("Smith", "Ann", "SALLE", "A3"),
///     ("Jones", "Bo", "SALLE", "B"),
///     ("Brown", "Cy", "", "C12"),
///     ("Green", "Di", "BLADE", "U"),
/// ]
/// .into_iter()
/// .map(|(last, first, club, rank)| Competitor::from_fields(last, first, club, rank).unwrap())
/// .collect();
///
/// let result = assign_pools(&roster);
///
/// for (i, pool) in result.pools.iter().enumerate() {
///     for c in pool {
///         println!("Pool {}: {} {} ({}) {}", i + 1, c.first_name, c.last_name, c.club, c.rank);
///     }
/// }
/// assert!(result.report.converged);
/// ```

pub mod constants;
pub mod distribute;
pub mod engine;
pub mod ledger;
pub mod rank;
pub mod resolve;
pub mod sizing;
pub mod state;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::{assign_pools, assign_pools_with, PoolEngine};
pub use rank::{decode, encode, Grade, InvalidRankError, RankScore};
pub use sizing::pool_count;
pub use types::{AssignOptions, Competitor, PoolAssignment, ResolveReport, Roster};
