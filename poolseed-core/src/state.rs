/// Mutable pool state shared by the distributor and the resolver.
///
/// Competitors are referred to by roster index throughout. `PoolTable` is the
/// bidirectional position index: `slots[roster_index]` gives the pool slot and
/// `pools[pool][slot]` gives the roster index back. `PoolState` bundles the
/// table with the club ledger so a swap updates all three views at once.
use crate::ledger::ClubLedger;
use crate::types::{Competitor, Roster};

/// Position of a competitor: pool id and index within that pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub pool: usize,
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct PoolTable {
    slots: Vec<Slot>,
    pools: Vec<Vec<usize>>,
}

impl PoolTable {
    pub fn new(num_pools: usize, num_competitors: usize) -> Self {
        let per_pool = if num_pools == 0 { 0 } else { num_competitors.div_ceil(num_pools) };
        PoolTable {
            slots: Vec::with_capacity(num_competitors),
            pools: (0..num_pools).map(|_| Vec::with_capacity(per_pool)).collect(),
        }
    }

    pub fn num_pools(&self) -> usize {
        self.pools.len()
    }

    pub fn slot_of(&self, roster_index: usize) -> Slot {
        self.slots[roster_index]
    }

    pub fn pool_of(&self, roster_index: usize) -> usize {
        self.slots[roster_index].pool
    }

    /// Roster index at a slot.
    pub fn at(&self, slot: Slot) -> usize {
        self.pools[slot.pool][slot.index]
    }

    /// Roster indices in a pool, in slot order.
    pub fn members(&self, pool: usize) -> &[usize] {
        &self.pools[pool]
    }

    pub fn pools(&self) -> &[Vec<usize>] {
        &self.pools
    }

    /// Append the next competitor to a pool. Competitors must be placed in
    /// roster order.
    fn push(&mut self, roster_index: usize, pool: usize) -> Slot {
        assert_eq!(roster_index, self.slots.len(), "Competitors must be placed in roster order");
        let slot = Slot {
            pool,
            index: self.pools[pool].len(),
        };
        self.pools[pool].push(roster_index);
        self.slots.push(slot);
        slot
    }

    /// Exchange the slots of two competitors, both directions together.
    fn swap(&mut self, a: usize, b: usize) {
        let slot_a = self.slots[a];
        let slot_b = self.slots[b];
        self.pools[slot_a.pool][slot_a.index] = b;
        self.pools[slot_b.pool][slot_b.index] = a;
        self.slots[a] = slot_b;
        self.slots[b] = slot_a;
    }
}

#[derive(Debug, Clone)]
pub struct PoolState {
    table: PoolTable,
    ledger: ClubLedger,
}

impl PoolState {
    /// Empty pools with a zeroed ledger for the roster's clubs.
    pub fn new(roster: &Roster, num_pools: usize) -> Self {
        PoolState {
            table: PoolTable::new(num_pools, roster.len()),
            ledger: ClubLedger::from_roster(roster, num_pools),
        }
    }

    pub fn table(&self) -> &PoolTable {
        &self.table
    }

    pub fn ledger(&self) -> &ClubLedger {
        &self.ledger
    }

    pub fn num_pools(&self) -> usize {
        self.table.num_pools()
    }

    /// Place the next competitor (in roster order) at the end of a pool.
    pub fn place(&mut self, roster_index: usize, pool: usize) -> Slot {
        let slot = self.table.push(roster_index, pool);
        self.ledger.add(roster_index, pool);
        slot
    }

    /// Swap two competitors' pool assignments, keeping the position index and
    /// ledger consistent.
    pub fn swap(&mut self, a: usize, b: usize) {
        let pool_a = self.table.pool_of(a);
        let pool_b = self.table.pool_of(b);
        self.ledger.transfer(a, pool_a, pool_b);
        self.ledger.transfer(b, pool_b, pool_a);
        self.table.swap(a, b);
    }

    /// Resolve roster indices to competitor references, pool by pool.
    pub fn pools<'a>(&self, roster: &'a Roster) -> Vec<Vec<&'a Competitor>> {
        self.table
            .pools()
            .iter()
            .map(|members| members.iter().map(|&i| &roster[i]).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(clubs: &[&str]) -> Roster {
        Roster::new(
            clubs
                .iter()
                .map(|club| Competitor::new("F", "L", *club, "C".parse().unwrap()))
                .collect(),
        )
    }

    #[test]
    fn test_place_records_both_directions() {
        let roster = roster(&["X", "Y", "X"]);
        let mut state = PoolState::new(&roster, 2);
        assert_eq!(state.place(0, 0), Slot { pool: 0, index: 0 });
        assert_eq!(state.place(1, 1), Slot { pool: 1, index: 0 });
        assert_eq!(state.place(2, 0), Slot { pool: 0, index: 1 });

        let table = state.table();
        for i in 0..3 {
            assert_eq!(table.at(table.slot_of(i)), i);
        }
        assert_eq!(table.members(0), &[0, 2]);
        assert_eq!(state.ledger().counts(0), &[2, 0]);
    }

    #[test]
    fn test_swap_keeps_index_and_ledger_consistent() {
        let roster = roster(&["X", "Y", "X", ""]);
        let mut state = PoolState::new(&roster, 2);
        state.place(0, 0);
        state.place(1, 1);
        state.place(2, 0);
        state.place(3, 1);

        state.swap(2, 3);
        let table = state.table();
        assert_eq!(table.slot_of(2), Slot { pool: 1, index: 1 });
        assert_eq!(table.slot_of(3), Slot { pool: 0, index: 1 });
        assert_eq!(table.members(0), &[0, 3]);
        assert_eq!(table.members(1), &[1, 2]);
        assert_eq!(state.ledger().counts(0), &[1, 1]);
        assert_eq!(state.ledger().counts(1), &[0, 1]);

        state.swap(0, 1);
        assert_eq!(state.ledger().counts(0), &[0, 2]);
        assert_eq!(state.ledger().counts(1), &[1, 0]);
        for i in 0..4 {
            assert_eq!(state.table().at(state.table().slot_of(i)), i);
        }
    }

    #[test]
    #[should_panic(expected = "roster order")]
    fn test_place_out_of_order_panics() {
        let roster = roster(&["X", "Y"]);
        let mut state = PoolState::new(&roster, 2);
        state.place(1, 0);
    }

    #[test]
    fn test_pools_resolves_references() {
        let roster = roster(&["X", "Y", "Z"]);
        let mut state = PoolState::new(&roster, 2);
        state.place(0, 1);
        state.place(1, 0);
        state.place(2, 1);
        let pools = state.pools(&roster);
        assert_eq!(pools[0].len(), 1);
        assert_eq!(pools[1][1].club, "Z");
        assert!(std::ptr::eq(pools[0][0], &roster[1]));
    }
}
