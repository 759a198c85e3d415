/// Club ledger: how many members of each club sit in each pool.
///
/// Clubs are interned to dense ids in order of first appearance in the
/// roster. That order is also the order the resolver checks clubs in, so it
/// decides which conflict gets fixed first.
use std::collections::HashMap;

use crate::types::Roster;

/// Dense club index into the ledger.
pub type ClubId = usize;

#[derive(Debug, Clone)]
pub struct ClubLedger {
    names: Vec<String>,
    name_to_id: HashMap<String, ClubId>,
    /// Club per roster index. `None` for unattached competitors.
    member_club: Vec<Option<ClubId>>,
    /// `counts[club][pool]`.
    counts: Vec<Vec<usize>>,
    num_pools: usize,
}

impl ClubLedger {
    /// Intern the roster's clubs with every count at zero.
    pub fn from_roster(roster: &Roster, num_pools: usize) -> Self {
        let mut names = Vec::new();
        let mut name_to_id = HashMap::new();
        let mut member_club = Vec::with_capacity(roster.len());

        for competitor in roster {
            if !competitor.has_club() {
                member_club.push(None);
                continue;
            }
            let id = *name_to_id.entry(competitor.club.clone()).or_insert_with(|| {
                names.push(competitor.club.clone());
                names.len() - 1
            });
            member_club.push(Some(id));
        }

        let counts = vec![vec![0; num_pools]; names.len()];
        ClubLedger {
            names,
            name_to_id,
            member_club,
            counts,
            num_pools,
        }
    }

    pub fn num_clubs(&self) -> usize {
        self.names.len()
    }

    pub fn num_pools(&self) -> usize {
        self.num_pools
    }

    pub fn club_name(&self, club: ClubId) -> &str {
        &self.names[club]
    }

    pub fn club_id(&self, name: &str) -> Option<ClubId> {
        self.name_to_id.get(name).copied()
    }

    pub fn club_of(&self, roster_index: usize) -> Option<ClubId> {
        self.member_club[roster_index]
    }

    /// Per-pool counts for one club, in pool order.
    pub fn counts(&self, club: ClubId) -> &[usize] {
        &self.counts[club]
    }

    pub fn total(&self, club: ClubId) -> usize {
        self.counts[club].iter().sum()
    }

    /// Ideal `[floor, ceil]` band of members per pool for a club.
    pub fn band(&self, club: ClubId) -> (usize, usize) {
        let total = self.total(club);
        (total / self.num_pools, total.div_ceil(self.num_pools))
    }

    /// Whether every pool holds a count inside the club's band.
    pub fn is_balanced(&self, club: ClubId) -> bool {
        let (min_count, max_count) = self.band(club);
        self.counts[club].iter().all(|&c| (min_count..=max_count).contains(&c))
    }

    /// Record a competitor entering a pool. No-op for unattached competitors.
    pub(crate) fn add(&mut self, roster_index: usize, pool: usize) {
        if let Some(club) = self.member_club[roster_index] {
            self.counts[club][pool] += 1;
        }
    }

    /// Record a competitor moving between pools. No-op for unattached competitors.
    pub(crate) fn transfer(&mut self, roster_index: usize, from: usize, to: usize) {
        if let Some(club) = self.member_club[roster_index] {
            self.counts[club][from] -= 1;
            self.counts[club][to] += 1;
        }
    }
}
