//! Agent-level spatial queries, link traversal, and set statistics.

use abm_core::{geometry, AbmError, AbmResult, AgentId, BreedId, LinkId, Point};
use abm_entity::{Agent, Link};
use abm_grid::{CachePolicy, NeighborQuery};

use crate::state::WorldState;

impl WorldState {
    // ── Spatial queries ───────────────────────────────────────────────────

    /// Agents on the patches matching `query` around `agent`, the agent's
    /// own patch included, the agent itself excluded.  Off-grid agents
    /// have no neighbors.
    pub fn agent_neighbors(
        &mut self,
        agent: AgentId,
        query: NeighborQuery,
        policy: CachePolicy,
    ) -> AbmResult<Vec<AgentId>> {
        let Some(patch) = self.agent(agent)?.patch() else {
            return Ok(Vec::new());
        };
        let query = query.with_me_too();
        Ok(self.grid.neighbor_agents(patch, query, policy, Some(agent)))
    }

    /// Members of `breed` within `radius` of `center` by exact position,
    /// torus-aware.  Off-grid members never match.
    pub fn agents_in_radius(&self, breed: BreedId, center: Point, radius: f64) -> Vec<AgentId> {
        let topology = self.world().topology();
        self.filter_members(breed, |agent| match agent.site {
            Some(site) => geometry::distance(center, site.position, topology) <= radius,
            None => false,
        })
    }

    /// Members of `breed` inside the cone at `center` opening `cone`
    /// radians around `heading`, out to `radius`.
    pub fn agents_in_cone(
        &self,
        breed: BreedId,
        center: Point,
        heading: f64,
        cone: f64,
        radius: f64,
    ) -> Vec<AgentId> {
        let topology = self.world().topology();
        self.filter_members(breed, |agent| match agent.site {
            Some(site) => geometry::in_cone(heading, cone, radius, center, site.position, topology),
            None => false,
        })
    }

    /// Members of `breed` whose own breed name is not in `names`.
    /// An unknown name simply matches nothing.
    pub fn exclude(&self, breed: BreedId, names: &[&str]) -> Vec<AgentId> {
        self.filter_members(breed, |agent| {
            let name = &self.agent_breeds.get(agent.breed).breed.name;
            !names.contains(&name.as_str())
        })
    }

    fn filter_members(&self, breed: BreedId, keep: impl Fn(&Agent) -> bool) -> Vec<AgentId> {
        self.agent_breeds
            .get(breed)
            .members()
            .iter()
            .filter_map(|&id| self.agents.get(&id))
            .filter(|agent| keep(agent))
            .map(|agent| agent.id)
            .collect()
    }

    // ── Link traversal ────────────────────────────────────────────────────

    /// Links leaving `agent` (`from == agent`), in attachment order.
    pub fn out_links(&self, agent: AgentId) -> AbmResult<Vec<LinkId>> {
        self.links_where(agent, |link| link.from == agent)
    }

    /// Links arriving at `agent` (`to == agent`), in attachment order.
    pub fn in_links(&self, agent: AgentId) -> AbmResult<Vec<LinkId>> {
        self.links_where(agent, |link| link.to == agent)
    }

    fn links_where(
        &self,
        agent: AgentId,
        keep: impl Fn(&Link) -> bool,
    ) -> AbmResult<Vec<LinkId>> {
        Ok(self
            .agent(agent)?
            .links
            .iter()
            .filter_map(|&id| self.links.get(&id))
            .filter(|link| keep(link))
            .map(|link| link.id)
            .collect())
    }

    /// Agents linked to `agent` in either direction, de-duplicated,
    /// in first-encounter order.
    pub fn link_neighbors(&self, agent: AgentId) -> AbmResult<Vec<AgentId>> {
        let ids = self.agent(agent)?.links.clone();
        Ok(self.opposite_ends(agent, &ids))
    }

    /// Agents with a link pointing at `agent`, de-duplicated.
    pub fn in_link_neighbors(&self, agent: AgentId) -> AbmResult<Vec<AgentId>> {
        let ids = self.in_links(agent)?;
        Ok(self.opposite_ends(agent, &ids))
    }

    /// Agents `agent` points a link at, de-duplicated.
    pub fn out_link_neighbors(&self, agent: AgentId) -> AbmResult<Vec<AgentId>> {
        let ids = self.out_links(agent)?;
        Ok(self.opposite_ends(agent, &ids))
    }

    fn opposite_ends(&self, agent: AgentId, links: &[LinkId]) -> Vec<AgentId> {
        let mut out = Vec::new();
        for id in links {
            let Some(link) = self.links.get(id) else { continue };
            let Some(other) = link.other_end(agent) else { continue };
            if !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    /// The endpoint of `link` opposite `agent`.
    pub fn other_end(&self, link: LinkId, agent: AgentId) -> AbmResult<AgentId> {
        self.link(link)?
            .other_end(agent)
            .ok_or(AbmError::AgentNotFound(agent))
    }

    /// Length of `link` under the world's topology.
    pub fn link_length(&self, link: LinkId) -> AbmResult<f64> {
        let link = self.link(link)?;
        let from = self.agent(link.from)?.position();
        let to = self.agent(link.to)?.position();
        match (from, to) {
            (Some(from), Some(to)) => {
                Ok(geometry::distance(from, to, self.world().topology()))
            }
            _ => Err(AbmError::Config(format!("{} has an off-grid endpoint", link.id))),
        }
    }

    // ── Set statistics ────────────────────────────────────────────────────

    /// Smallest `value` over the members of `breed`.  Empty breeds are a
    /// programmer error, reported as such.
    pub fn min_of(&self, breed: BreedId, value: impl Fn(&Agent) -> f64) -> AbmResult<f64> {
        self.fold_members(breed, value, "min_of", f64::min)
    }

    /// Largest `value` over the members of `breed`.
    pub fn max_of(&self, breed: BreedId, value: impl Fn(&Agent) -> f64) -> AbmResult<f64> {
        self.fold_members(breed, value, "max_of", f64::max)
    }

    /// Arithmetic mean of `value` over the members of `breed`.
    pub fn mean_of(&self, breed: BreedId, value: impl Fn(&Agent) -> f64) -> AbmResult<f64> {
        let members = self.agent_breeds.get(breed).members();
        if members.is_empty() {
            return Err(AbmError::EmptyCollection("mean_of"));
        }
        let mut sum = 0.0;
        let mut count = 0usize;
        for &id in members {
            if let Some(agent) = self.agents.get(&id) {
                sum += value(agent);
                count += 1;
            }
        }
        if count == 0 {
            return Err(AbmError::EmptyCollection("mean_of"));
        }
        Ok(sum / count as f64)
    }

    fn fold_members(
        &self,
        breed: BreedId,
        value: impl Fn(&Agent) -> f64,
        operation: &'static str,
        combine: impl Fn(f64, f64) -> f64,
    ) -> AbmResult<f64> {
        let mut result = None;
        for &id in self.agent_breeds.get(breed).members() {
            if let Some(agent) = self.agents.get(&id) {
                let v = value(agent);
                result = Some(match result {
                    None => v,
                    Some(acc) => combine(acc, v),
                });
            }
        }
        result.ok_or(AbmError::EmptyCollection(operation))
    }
}
