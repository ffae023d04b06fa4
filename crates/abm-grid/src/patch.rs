//! One grid cell.

use rustc_hash::FxHashMap;

use abm_core::{AgentId, BreedId, Cell, Color, PatchId};

use crate::query::NeighborQuery;

/// A single patch: one cell of the fixed background grid.
///
/// Created exactly once per integer coordinate when the grid is populated
/// and never destroyed during a run.  Position is immutable; color, label,
/// and the resident-agent list change freely.
pub struct Patch {
    pub id: PatchId,
    /// Integer grid coordinate — fixed at creation.
    pub position: Cell,
    pub color: Color,
    pub breed: BreedId,
    pub hidden: bool,
    pub label: Option<String>,
    /// Agents currently standing on this patch, in arrival order.
    /// Maintained exclusively by the world's movement operations.
    pub agents: Vec<AgentId>,
    /// Memoized neighbor-query results.  Adjacency never changes, so
    /// entries live as long as the patch does.
    pub(crate) neighbor_cache: FxHashMap<NeighborQuery, Vec<PatchId>>,
}

impl Patch {
    pub(crate) fn new(id: PatchId, position: Cell) -> Self {
        Self {
            id,
            position,
            color: Color::BLACK,
            breed: BreedId(0),
            hidden: false,
            label: None,
            agents: Vec::new(),
            neighbor_cache: FxHashMap::default(),
        }
    }

    /// `true` if no agent is standing on this patch.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of memoized neighbor queries (diagnostics and tests).
    pub fn cached_queries(&self) -> usize {
        self.neighbor_cache.len()
    }
}

impl std::fmt::Display for Patch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.id, self.position)
    }
}
