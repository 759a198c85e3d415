/// Club conflict resolution.
///
/// Each round picks the first club (in ledger order) whose per-pool count
/// leaves its `[floor, ceil]` band, then moves one of its members out of a
/// fullest pool into an emptiest pool by swapping with a competitor there.
/// Swaps between equal ranks are preferred so seeding is untouched; failing
/// that, the club's weakest member in the pool is swapped with the next
/// eligible competitor further down the roster.
///
/// The search is greedy and can stall, so rounds are capped. A stalled round
/// changes nothing but still counts against the cap.
use tracing::{debug, warn};

use crate::ledger::ClubId;
use crate::state::PoolState;
use crate::types::{ResolveReport, Roster};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapKind {
    SameRank,
    LowestRank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Swap {
    member: usize,
    candidate: usize,
    kind: SwapKind,
}

/// A club out of balance, with its fullest and emptiest pools.
struct Conflict {
    club: ClubId,
    /// Pools holding the club's maximum count, ascending.
    max_pools: Vec<usize>,
    /// `is_min_pool[pool]`: pool holds the club's minimum count.
    is_min_pool: Vec<bool>,
}

impl Conflict {
    fn classify(state: &PoolState, club: ClubId) -> Self {
        let counts = state.ledger().counts(club);
        let max = counts.iter().copied().max().unwrap_or(0);
        let min = counts.iter().copied().min().unwrap_or(0);
        Conflict {
            club,
            max_pools: (0..counts.len()).filter(|&p| counts[p] == max).collect(),
            is_min_pool: counts.iter().map(|&c| c == min).collect(),
        }
    }

    /// `k` can take the place of a club member leaving `from_pool`.
    fn accepts(&self, state: &PoolState, from_pool: usize, k: usize) -> bool {
        let pool = state.table().pool_of(k);
        pool != from_pool && state.ledger().club_of(k) != Some(self.club) && self.is_min_pool[pool]
    }

    fn members_in<'s>(&self, state: &'s PoolState, pool: usize) -> impl Iterator<Item = usize> + 's {
        let club = self.club;
        state
            .table()
            .members(pool)
            .iter()
            .copied()
            .filter(move |&m| state.ledger().club_of(m) == Some(club))
    }
}

/// First club, in ledger order, with a pool count outside its band.
pub fn find_conflict(state: &PoolState) -> Option<ClubId> {
    let ledger = state.ledger();
    (0..ledger.num_clubs()).find(|&club| !ledger.is_balanced(club))
}

/// Look for a competitor of identical rank sitting in one of the club's
/// emptiest pools.
fn find_same_rank_swap(roster: &Roster, state: &PoolState, conflict: &Conflict) -> Option<Swap> {
    for &pool in &conflict.max_pools {
        for member in conflict.members_in(state, pool) {
            let rank = roster[member].rank;

            let mut start = member;
            while start > 0 && roster[start - 1].rank == rank {
                start -= 1;
            }

            let candidate = (start..roster.len())
                .take_while(|&k| roster[k].rank == rank)
                .find(|&k| conflict.accepts(state, pool, k));

            if let Some(candidate) = candidate {
                return Some(Swap {
                    member,
                    candidate,
                    kind: SwapKind::SameRank,
                });
            }
        }
    }
    None
}

/// Swap the club's lowest-ranked member in a fullest pool with the first
/// eligible competitor at or below its roster position.
fn find_lowest_rank_swap(roster: &Roster, state: &PoolState, conflict: &Conflict) -> Option<Swap> {
    for &pool in &conflict.max_pools {
        // min_by_key keeps the first of equal minimums, i.e. earliest slot.
        let Some(member) = conflict.members_in(state, pool).min_by_key(|&m| roster[m].rank) else {
            continue;
        };

        let candidate = (member..roster.len()).find(|&k| conflict.accepts(state, pool, k));

        if let Some(candidate) = candidate {
            return Some(Swap {
                member,
                candidate,
                kind: SwapKind::LowestRank,
            });
        }
    }
    None
}

/// Run rounds until every club is balanced or `max_rounds` is reached.
///
/// Never fails: on cap exhaustion the pools are left as they stand and the
/// report says `converged: false`.
pub fn resolve_conflicts(roster: &Roster, state: &mut PoolState, max_rounds: usize) -> ResolveReport {
    let mut report = ResolveReport::default();

    while report.rounds < max_rounds {
        report.rounds += 1;

        let Some(club) = find_conflict(state) else {
            report.converged = true;
            return report;
        };

        let conflict = Conflict::classify(state, club);
        let swap = find_same_rank_swap(roster, state, &conflict)
            .or_else(|| find_lowest_rank_swap(roster, state, &conflict));

        let Some(swap) = swap else {
            report.stalled_rounds += 1;
            continue;
        };

        debug!(
            round = report.rounds,
            club = state.ledger().club_name(club),
            kind = ?swap.kind,
            "swapping {} {} (pool {}) with {} {} (pool {})",
            roster[swap.member].first_name,
            roster[swap.member].last_name,
            state.table().pool_of(swap.member) + 1,
            roster[swap.candidate].first_name,
            roster[swap.candidate].last_name,
            state.table().pool_of(swap.candidate) + 1
        );

        state.swap(swap.member, swap.candidate);
        match swap.kind {
            SwapKind::SameRank => report.same_rank_swaps += 1,
            SwapKind::LowestRank => report.fallback_swaps += 1,
        }
    }

    report.converged = find_conflict(state).is_none();
    if !report.converged {
        warn!(
            rounds = report.rounds,
            stalled = report.stalled_rounds,
            "club conflicts remain after round cap; keeping best-effort pools"
        );
    }
    report
}
