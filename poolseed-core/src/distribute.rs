/// Initial distribution: snake seeding of the sorted roster into pools.
use crate::state::PoolState;
use crate::types::Roster;

/// Pool for the `i`-th competitor in snake order.
///
/// Each pass over the pools reverses direction, so with 3 pools the order is
/// 0 1 2 2 1 0 0 1 2 ... and every pool gets one competitor per rank band.
pub fn snake_pool(i: usize, num_pools: usize) -> usize {
    let p = i % num_pools;
    if i % (2 * num_pools) <= p {
        p
    } else {
        num_pools - p - 1
    }
}

/// Seed every competitor into `num_pools` pools in roster order.
pub fn distribute(roster: &Roster, num_pools: usize) -> PoolState {
    let mut state = PoolState::new(roster, num_pools);
    for i in 0..roster.len() {
        state.place(i, snake_pool(i, num_pools));
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Competitor;

    fn ranked_roster(n: usize, club: impl Fn(usize) -> String) -> Roster {
        Roster::new(
            (0..n)
                .map(|i| {
                    // Strictly descending scores keep roster order == i.
                    let score = 599 - i as u16;
                    Competitor::new(format!("F{i}"), format!("L{i}"), club(i), score.try_into().unwrap())
                })
                .collect(),
        )
    }

    #[test]
    fn test_snake_order_three_pools() {
        let order: Vec<usize> = (0..9).map(|i| snake_pool(i, 3)).collect();
        assert_eq!(order, vec![0, 1, 2, 2, 1, 0, 0, 1, 2]);
    }

    #[test]
    fn test_snake_single_pool() {
        assert!((0..10).all(|i| snake_pool(i, 1) == 0));
    }

    #[test]
    fn test_distribute_nine_into_three() {
        let roster = ranked_roster(9, |_| String::new());
        let state = distribute(&roster, 3);
        let table = state.table();
        assert_eq!(table.members(0), &[0, 5, 6]);
        assert_eq!(table.members(1), &[1, 4, 7]);
        assert_eq!(table.members(2), &[2, 3, 8]);
    }

    #[test]
    fn test_slot_is_pass_number() {
        let roster = ranked_roster(14, |_| String::new());
        let state = distribute(&roster, 4);
        for i in 0..roster.len() {
            let slot = state.table().slot_of(i);
            assert_eq!(slot.pool, snake_pool(i, 4));
            assert_eq!(slot.index, i / 4);
        }
    }

    #[test]
    fn test_distribute_counts_clubs_and_skips_unattached() {
        let roster = ranked_roster(6, |i| if i % 2 == 0 { "EVEN".to_string() } else { String::new() });
        let state = distribute(&roster, 3);
        let ledger = state.ledger();
        assert_eq!(ledger.num_clubs(), 1);
        // EVEN members are 0, 2, 4 -> pools 0, 2, 1.
        assert_eq!(ledger.counts(0), &[1, 1, 1]);
    }
}
