//! Agent movement and the patch-membership invariant.
//!
//! Every placement goes through [`WorldState::move_to`]: resolve the target
//! through the world's coordinate policy, remove the agent from its old
//! patch's list *before* adding it to the new one, then update the site.
//! The invariant is that an agent appears in exactly one patch list when
//! on-grid and in none when off-grid.

use abm_core::{geometry, AbmResult, AgentId, Color, Point};
use abm_entity::Site;

use crate::state::WorldState;

/// One pen-trail segment, emitted by pen-down movement and drained by the
/// drawing pass.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenStroke {
    pub from:  Point,
    pub to:    Point,
    pub color: Color,
    pub size:  f64,
}

impl WorldState {
    /// Place `agent` at `point`, resolved through the world's clamp/wrap
    /// policy.  Total for any finite point; an off-grid agent comes back
    /// on-grid.  Emits a pen stroke when the agent moved with its pen down.
    pub fn move_to(&mut self, agent: AgentId, point: Point) -> AbmResult<()> {
        let resolved = self.world().coordinate(point);
        let target = self.grid.patch_at(resolved);

        let old_site = self.agent(agent)?.site;
        if let Some(site) = old_site {
            if site.patch != target {
                self.grid.patch_mut(site.patch).agents.retain(|&a| a != agent);
                self.grid.patch_mut(target).agents.push(agent);
            }
        } else {
            self.grid.patch_mut(target).agents.push(agent);
        }

        let entity = self.agent_mut(agent)?;
        entity.site = Some(Site { position: resolved, patch: target });
        let pen = entity.pen_down.then(|| (entity.color, entity.pen_size));

        if let (Some((color, size)), Some(site)) = (pen, old_site) {
            self.pen_strokes.push(PenStroke {
                from: site.position,
                to: resolved,
                color,
                size,
            });
        }
        Ok(())
    }

    /// Take `agent` off the grid: no position, no patch membership.
    /// Distinct from any in-bounds coordinate, and only reachable here.
    pub fn move_off(&mut self, agent: AgentId) -> AbmResult<()> {
        if let Some(site) = self.agent(agent)?.site {
            self.grid.patch_mut(site.patch).agents.retain(|&a| a != agent);
        }
        self.agent_mut(agent)?.site = None;
        Ok(())
    }

    /// Advance `agent` along its heading by `distance`.  With `snap`, the
    /// destination rounds to the nearest integer point first.  Off-grid
    /// agents do not move.
    pub fn forward(&mut self, agent: AgentId, distance: f64, snap: bool) -> AbmResult<()> {
        let entity = self.agent(agent)?;
        let Some(site) = entity.site else { return Ok(()) };
        let mut target = Point::new(
            site.position.x + distance * entity.heading.cos(),
            site.position.y + distance * entity.heading.sin(),
        );
        if snap {
            target = Point::from(target.round_to_cell());
        }
        self.move_to(agent, target)
    }

    /// Turn `agent` by `delta` radians (counter-clockwise positive).
    pub fn rotate(&mut self, agent: AgentId, delta: f64) -> AbmResult<()> {
        self.agent_mut(agent)?.rotate(delta);
        Ok(())
    }

    /// Point `agent` at `point`, torus-aware.  Off-grid agents keep their
    /// heading.
    pub fn face(&mut self, agent: AgentId, point: Point) -> AbmResult<()> {
        let topology = self.world().topology();
        let entity = self.agent_mut(agent)?;
        if let Some(site) = entity.site {
            let heading = geometry::angle(site.position, point, topology);
            entity.set_heading(heading);
        }
        Ok(())
    }

    /// Distance from `agent` to `point` under the world's topology.
    /// Off-grid agents are infinitely far from everything.
    pub fn distance(&self, agent: AgentId, point: Point) -> AbmResult<f64> {
        let topology = self.world().topology();
        Ok(match self.agent(agent)?.site {
            Some(site) => geometry::distance(site.position, point, topology),
            None => f64::INFINITY,
        })
    }

    /// Drain the pen-trail segments accumulated since the last call.
    pub fn take_pen_strokes(&mut self) -> Vec<PenStroke> {
        std::mem::take(&mut self.pen_strokes)
    }
}
