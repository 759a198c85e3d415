/// Pool assignment orchestrator.
///
/// Pure computation. The caller loads the roster and renders the pools; the
/// engine sizes, seeds and balances them in between.
use tracing::debug;

use crate::distribute::distribute;
use crate::resolve::resolve_conflicts;
use crate::sizing::pool_count;
use crate::state::PoolState;
use crate::types::{AssignOptions, Competitor, PoolAssignment, ResolveReport, Roster};

/// Holds a roster and its pool state between the seeding and balancing steps.
pub struct PoolEngine<'a> {
    roster: &'a Roster,
    state: PoolState,
    options: AssignOptions,
}

impl<'a> PoolEngine<'a> {
    /// Size the pools and snake-seed the roster into them.
    pub fn new(roster: &'a Roster, options: AssignOptions) -> Self {
        let num_pools = options.num_pools.unwrap_or_else(|| pool_count(roster.len()));
        assert!(
            num_pools > 0 || roster.is_empty(),
            "PoolEngine requires at least one pool for a non-empty roster."
        );

        debug!(
            competitors = roster.len(),
            pools = num_pools,
            sized_by = if options.num_pools.is_some() { "override" } else { "group sizer" },
            "seeding pools"
        );

        PoolEngine {
            roster,
            state: distribute(roster, num_pools),
            options,
        }
    }

    pub fn num_pools(&self) -> usize {
        self.state.num_pools()
    }

    pub fn state(&self) -> &PoolState {
        &self.state
    }

    /// Run the conflict resolver against the current pools.
    pub fn resolve(&mut self) -> ResolveReport {
        resolve_conflicts(self.roster, &mut self.state, self.options.max_rounds)
    }

    /// Current pools as competitor references.
    pub fn pools(&self) -> Vec<Vec<&'a Competitor>> {
        self.state.pools(self.roster)
    }
}

/// Assign a roster to pools with the default group sizer and round cap.
pub fn assign_pools(roster: &Roster) -> PoolAssignment<'_> {
    assign_pools_with(roster, &AssignOptions::default())
}

/// Assign a roster to pools.
pub fn assign_pools_with<'a>(roster: &'a Roster, options: &AssignOptions) -> PoolAssignment<'a> {
    let mut engine = PoolEngine::new(roster, options.clone());
    let report = engine.resolve();
    debug!(
        rounds = report.rounds,
        swaps = report.swaps(),
        converged = report.converged,
        "pools balanced"
    );
    PoolAssignment {
        pools: engine.pools(),
        report,
    }
}
