//! The patch grid: population, O(1) point-to-patch lookup, neighbor
//! enumeration with caching, and scalar-field diffusion.

use rustc_hash::FxHashSet;

use abm_core::geometry;
use abm_core::{AgentId, Cell, Color, PatchId, Point, World};

use crate::patch::Patch;
use crate::query::{CachePolicy, NeighborQuery};

/// The fixed background grid: exactly `width * height` patches in row-major
/// order (y descending, x ascending).
///
/// `PatchId` doubles as the flat index, so cell-to-patch lookup is the
/// closed-form bijection documented on the crate root.
pub struct PatchGrid {
    world: World,
    patches: Vec<Patch>,
}

impl PatchGrid {
    /// Populate one patch per integer coordinate in `[min, max]²`.
    pub fn new(world: World) -> Self {
        let mut patches = Vec::with_capacity((world.width * world.height) as usize);
        for y in (world.min.y..=world.max.y).rev() {
            for x in world.min.x..=world.max.x {
                let id = PatchId(patches.len() as u32);
                patches.push(Patch::new(id, Cell::new(x, y)));
            }
        }
        Self { world, patches }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    #[inline]
    pub fn patch(&self, id: PatchId) -> &Patch {
        &self.patches[id.index()]
    }

    #[inline]
    pub fn patch_mut(&mut self, id: PatchId) -> &mut Patch {
        &mut self.patches[id.index()]
    }

    /// Iterator over all patches in index (draw) order.
    pub fn iter(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter()
    }

    /// Iterator over all `PatchId`s in index order.
    pub fn ids(&self) -> impl Iterator<Item = PatchId> + 'static {
        (0..self.patches.len() as u32).map(PatchId)
    }

    // ── Point-to-patch lookup ─────────────────────────────────────────────

    /// The flat index of an in-range cell: `(x - min.x) + width * (max.y - y)`.
    #[inline]
    pub fn index_of(&self, cell: Cell) -> usize {
        (cell.x - self.world.min.x) as usize
            + self.world.width as usize * (self.world.max.y - cell.y) as usize
    }

    /// The patch containing `point`.
    ///
    /// Total: the point is first resolved through the world's clamp/wrap
    /// policy, rounded half-away-from-zero, and the resulting cell bounded
    /// into `[min, max]` — there is no out-of-range lookup failure.
    pub fn patch_at(&self, point: Point) -> PatchId {
        let cell = self.bound_cell(self.world.coordinate(point).round_to_cell());
        PatchId(self.index_of(cell) as u32)
    }

    /// The patch at an exact integer cell (bounded like `patch_at`).
    pub fn patch_at_cell(&self, cell: Cell) -> PatchId {
        PatchId(self.index_of(self.bound_cell(cell)) as u32)
    }

    /// Resolve a cell into `[min, max]` per axis: modular on a torus,
    /// clamped otherwise.  Needed because rounding a boundary coordinate
    /// (e.g. `max + 0.5`) can land one cell outside the grid.
    fn bound_cell(&self, cell: Cell) -> Cell {
        let w = &self.world;
        if w.is_torus {
            Cell::new(
                w.min.x + (cell.x - w.min.x).rem_euclid(w.width as i32),
                w.min.y + (cell.y - w.min.y).rem_euclid(w.height as i32),
            )
        } else {
            Cell::new(
                cell.x.clamp(w.min.x, w.max.x),
                cell.y.clamp(w.min.y, w.max.y),
            )
        }
    }

    /// `true` if the patch touches any grid boundary.
    pub fn is_on_edge(&self, id: PatchId) -> bool {
        self.world.is_edge_cell(self.patch(id).position)
    }

    // ── Neighbor queries ──────────────────────────────────────────────────

    /// Enumerate the neighborhood of `id` described by `query`.
    ///
    /// Results come back in deterministic scan order (y ascending, x
    /// ascending), self excluded unless the query says `me_too`.  On a
    /// torus, a neighborhood wider than the grid is de-duplicated.
    ///
    /// `policy` controls memoization; see [`CachePolicy`].
    pub fn neighbors(
        &mut self,
        id:     PatchId,
        query:  NeighborQuery,
        policy: CachePolicy,
    ) -> Vec<PatchId> {
        if policy != CachePolicy::Never {
            if let Some(hit) = self.patches[id.index()].neighbor_cache.get(&query) {
                return hit.clone();
            }
        }

        let result = self.compute_neighbors(id, query);

        if policy.stores(&query) {
            self.patches[id.index()]
                .neighbor_cache
                .insert(query, result.clone());
        }
        result
    }

    fn compute_neighbors(&self, id: PatchId, query: NeighborQuery) -> Vec<PatchId> {
        let center = self.patch(id).position;
        match query {
            NeighborQuery::Square { range, me_too } => self.square_ring(id, center, range, me_too),

            NeighborQuery::Diamond { range, me_too } => {
                let mut out = Vec::new();
                self.scan_square(center, range, |dx, dy, cell_id| {
                    let manhattan = dx.unsigned_abs() + dy.unsigned_abs();
                    if manhattan <= range && (me_too || cell_id != id) {
                        out.push(cell_id);
                    }
                });
                self.dedup_if_wrapped(out, range)
            }

            NeighborQuery::Radius { radius, me_too } => {
                let r = radius.get();
                let square = self.square_ring(id, center, r.abs().ceil() as u32, true);
                let topo = self.world.topology();
                square
                    .into_iter()
                    .filter(|&p| me_too || p != id)
                    .filter(|&p| {
                        geometry::distance(center.into(), self.patch(p).position.into(), topo) <= r
                    })
                    .collect()
            }

            NeighborQuery::Cone { radius, heading, cone, me_too } => {
                let r = radius.get();
                let square = self.square_ring(id, center, r.abs().ceil() as u32, true);
                let topo = self.world.topology();
                square
                    .into_iter()
                    .filter(|&p| me_too || p != id)
                    .filter(|&p| {
                        geometry::in_cone(
                            heading.get(),
                            cone.get(),
                            r,
                            center.into(),
                            self.patch(p).position.into(),
                            topo,
                        )
                    })
                    .collect()
            }
        }
    }

    /// Chebyshev neighborhood, wrapped on a torus, clipped at edges
    /// otherwise.
    fn square_ring(&self, id: PatchId, center: Cell, range: u32, me_too: bool) -> Vec<PatchId> {
        let mut out = Vec::new();
        self.scan_square(center, range, |_, _, cell_id| {
            if me_too || cell_id != id {
                out.push(cell_id);
            }
        });
        self.dedup_if_wrapped(out, range)
    }

    /// Visit every in-world cell of the `(2·range + 1)²` box centered on
    /// `center`, in scan order, passing the offset and resolved patch.
    fn scan_square(&self, center: Cell, range: u32, mut visit: impl FnMut(i32, i32, PatchId)) {
        let range = range as i32;
        let w = &self.world;
        for dy in -range..=range {
            for dx in -range..=range {
                let cell = Cell::new(center.x + dx, center.y + dy);
                if w.is_torus {
                    visit(dx, dy, self.patch_at_cell(cell));
                } else if (w.min.x..=w.max.x).contains(&cell.x)
                    && (w.min.y..=w.max.y).contains(&cell.y)
                {
                    visit(dx, dy, PatchId(self.index_of(cell) as u32));
                }
            }
        }
    }

    /// On a torus, a query wider than the grid revisits patches; keep the
    /// first occurrence of each.
    fn dedup_if_wrapped(&self, ids: Vec<PatchId>, range: u32) -> Vec<PatchId> {
        let span = 2 * range + 1;
        if !self.world.is_torus || (span <= self.world.width && span <= self.world.height) {
            return ids;
        }
        let mut seen = FxHashSet::default();
        ids.into_iter().filter(|&p| seen.insert(p)).collect()
    }

    /// Union of the resident-agent lists of the patches matching `query`,
    /// in patch order, optionally excluding one agent (an agent's "self"
    /// in its own neighbor search).
    pub fn neighbor_agents(
        &mut self,
        id:      PatchId,
        query:   NeighborQuery,
        policy:  CachePolicy,
        exclude: Option<AgentId>,
    ) -> Vec<AgentId> {
        let mut agents = Vec::new();
        for patch in self.neighbors(id, query, policy) {
            for &agent in &self.patch(patch).agents {
                if Some(agent) != exclude {
                    agents.push(agent);
                }
            }
        }
        agents
    }

    // ── Scalar-field diffusion ────────────────────────────────────────────

    /// Diffuse a patch-parallel scalar field: each patch gives away
    /// `rate * value`, split into eight equal shares for its 8-neighbors.
    /// Shares with no receiving neighbor (grid edges) stay with the donor,
    /// so the field total is conserved.
    ///
    /// `values` must have one entry per patch in index order.
    pub fn diffuse(&mut self, values: &mut [f64], rate: f64) {
        debug_assert_eq!(values.len(), self.patches.len());
        let mut next = vec![0.0; values.len()];
        for id in self.ids() {
            let neighbors = self.neighbors(id, NeighborQuery::ADJACENT8, CachePolicy::Default);
            let dv = values[id.index()] * rate;
            let share = dv / 8.0;
            next[id.index()] +=
                values[id.index()] - dv + (8 - neighbors.len()) as f64 * share;
            for n in neighbors {
                next[n.index()] += share;
            }
        }
        values.copy_from_slice(&next);
    }

    /// Snapshot every patch color in index order — the payload for the
    /// drawing surface's pixel-grid call.
    pub fn patch_colors(&self) -> Vec<Color> {
        self.patches.iter().map(|p| p.color).collect()
    }
}
