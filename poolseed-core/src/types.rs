use crate::constants::MAX_RESOLVE_ROUNDS;
use crate::rank::{InvalidRankError, RankScore};

/// A single entrant. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Competitor {
    pub first_name: String,
    pub last_name: String,
    /// Club affiliation. Empty means unattached; unattached competitors never
    /// take part in club balancing.
    pub club: String,
    pub rank: RankScore,
}

impl Competitor {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        club: impl Into<String>,
        rank: RankScore,
    ) -> Self {
        Competitor {
            first_name: first_name.into(),
            last_name: last_name.into(),
            club: club.into(),
            rank,
        }
    }

    /// Build a competitor from raw roster fields.
    ///
    /// All fields are trimmed. Last name and club are uppercased so clubs
    /// compare case-insensitively; the first name keeps its casing.
    pub fn from_fields(
        last_name: &str,
        first_name: &str,
        club: &str,
        rank: &str,
    ) -> Result<Self, InvalidRankError> {
        Ok(Competitor {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_uppercase(),
            club: club.trim().to_uppercase(),
            rank: rank.parse()?,
        })
    }

    pub fn has_club(&self) -> bool {
        !self.club.is_empty()
    }
}

/// Competitors sorted by rank, strongest first.
///
/// The sort is stable, so competitors of equal rank keep their input order.
/// Roster positions are the identity the rest of the crate works with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    competitors: Vec<Competitor>,
}

impl Roster {
    pub fn new(mut competitors: Vec<Competitor>) -> Self {
        competitors.sort_by(|a, b| b.rank.cmp(&a.rank));
        Roster { competitors }
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Competitor> {
        self.competitors.iter()
    }
}

impl std::ops::Index<usize> for Roster {
    type Output = Competitor;

    fn index(&self, index: usize) -> &Competitor {
        &self.competitors[index]
    }
}

impl FromIterator<Competitor> for Roster {
    fn from_iter<I: IntoIterator<Item = Competitor>>(iter: I) -> Self {
        Roster::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Competitor;
    type IntoIter = std::slice::Iter<'a, Competitor>;

    fn into_iter(self) -> Self::IntoIter {
        self.competitors.iter()
    }
}

/// Options for `assign_pools_with()`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignOptions {
    /// Fixed pool count. `None` lets the group sizer decide.
    pub num_pools: Option<usize>,
    /// Cap on conflict-resolution rounds.
    pub max_rounds: usize,
}

impl Default for AssignOptions {
    fn default() -> Self {
        AssignOptions {
            num_pools: None,
            max_rounds: MAX_RESOLVE_ROUNDS,
        }
    }
}

/// What the conflict resolver did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolveReport {
    /// Rounds run, including the final round that found no conflict.
    pub rounds: usize,
    /// Swaps between competitors of identical rank.
    pub same_rank_swaps: usize,
    /// Swaps with a lower-ranked competitor after no same-rank swap existed.
    pub fallback_swaps: usize,
    /// Rounds that found a conflict but no legal swap.
    pub stalled_rounds: usize,
    /// `false` when the round cap ran out with a conflict still present.
    pub converged: bool,
}

impl ResolveReport {
    pub fn swaps(&self) -> usize {
        self.same_rank_swaps + self.fallback_swaps
    }
}

/// Final pools, borrowing competitors from the roster.
#[derive(Debug, Clone)]
pub struct PoolAssignment<'a> {
    /// Pools in index order; members in slot order.
    pub pools: Vec<Vec<&'a Competitor>>,
    pub report: ResolveReport,
}

impl PoolAssignment<'_> {
    pub fn num_pools(&self) -> usize {
        self.pools.len()
    }
}
