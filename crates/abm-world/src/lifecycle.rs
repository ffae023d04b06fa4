//! Entity creation and destruction.
//!
//! Destruction ordering matters and is fixed: an agent leaves its breed
//! first, then its links die (newest first), then its patch membership
//! clears.  No link ever references an agent that is already gone.

use abm_core::{AbmError, AbmResult, AgentId, BreedId, LinkId, PatchId, Point};
use abm_entity::{Agent, Link, Overrides};

use crate::state::WorldState;

impl WorldState {
    // ── Creation ──────────────────────────────────────────────────────────

    /// Create `count` agents of `breed` at the origin, then run `init` on
    /// each.  IDs come monotonically from the root agent collection.
    pub fn create_agents(
        &mut self,
        breed: BreedId,
        count: usize,
        mut init: impl FnMut(&mut WorldState, AgentId),
    ) -> AbmResult<Vec<AgentId>> {
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            created.push(self.spawn_agent(breed, Point::ORIGIN)?);
        }
        for &id in &created {
            init(self, id);
        }
        Ok(created)
    }

    /// Create `count` agents at `parent`'s position, copying the parent's
    /// heading, appearance overrides, pen state, and label — everything
    /// but identity and links.  `breed` defaults to the parent's.
    pub fn hatch(
        &mut self,
        parent: AgentId,
        count: usize,
        breed: Option<BreedId>,
        mut init: impl FnMut(&mut WorldState, AgentId),
    ) -> AbmResult<Vec<AgentId>> {
        let source = self.agent(parent)?.clone();
        let breed = breed.unwrap_or(source.breed);
        let position = source.position().unwrap_or(Point::ORIGIN);

        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.spawn_agent(breed, position)?;
            let child = self.agent_mut(id)?;
            child.heading = source.heading;
            child.label = source.label.clone();
            child.pen_down = source.pen_down;
            child.pen_size = source.pen_size;
            child.overrides = source.overrides;
            if source.overrides.contains(Overrides::COLOR) {
                child.color = source.color;
            }
            if source.overrides.contains(Overrides::SHAPE) {
                child.shape = source.shape;
            }
            if source.overrides.contains(Overrides::SIZE) {
                child.size = source.size;
            }
            if source.overrides.contains(Overrides::HIDDEN) {
                child.hidden = source.hidden;
            }
            created.push(id);
        }
        for &id in &created {
            init(self, id);
        }
        Ok(created)
    }

    /// Create `count` agents of `breed` at the center of `patch`.
    pub fn sprout(
        &mut self,
        patch: PatchId,
        count: usize,
        breed: BreedId,
        mut init: impl FnMut(&mut WorldState, AgentId),
    ) -> AbmResult<Vec<AgentId>> {
        let position = Point::from(self.grid.patch(patch).position);
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            created.push(self.spawn_agent(breed, position)?);
        }
        for &id in &created {
            init(self, id);
        }
        Ok(created)
    }

    fn spawn_agent(&mut self, breed: BreedId, position: Point) -> AbmResult<AgentId> {
        let id = AgentId(self.agent_breeds.issue_id(breed));
        let mut agent = Agent::new(id, breed);
        agent.apply_defaults(&self.agent_breeds.get(breed).breed.defaults);
        self.agents.insert(id, agent);
        self.agent_breeds.push(breed, id);
        self.move_to(id, position)?;
        Ok(id)
    }

    /// Create a link of `breed` between two live agents.  The link lands
    /// once in each endpoint's link list (once total for a self-link).
    pub fn create_link(
        &mut self,
        breed: BreedId,
        from: AgentId,
        to: AgentId,
    ) -> AbmResult<LinkId> {
        self.agent(from)?;
        self.agent(to)?;
        let id = LinkId(self.link_breeds.issue_id(breed));
        let mut link = Link::new(id, breed, from, to);
        let defaults = &self.link_breeds.get(breed).breed.defaults;
        if let Some(color) = defaults.color {
            link.color = color;
        }
        if let Some(hidden) = defaults.hidden {
            link.hidden = hidden;
        }
        self.links.insert(id, link);
        self.link_breeds.push(breed, id);
        self.agent_mut(from)?.links.push(id);
        if to != from {
            self.agent_mut(to)?.links.push(id);
        }
        Ok(id)
    }

    // ── Destruction ───────────────────────────────────────────────────────

    /// Remove `agent` from the simulation: breed membership first, then
    /// its incident links (newest first), then patch membership.
    pub fn kill_agent(&mut self, agent: AgentId) -> AbmResult<()> {
        let breed = self.agent(agent)?.breed;
        self.agent_breeds.remove(breed, agent);

        let links = self.agent(agent)?.links.clone();
        for link in links.into_iter().rev() {
            self.kill_link(link)?;
        }

        self.move_off(agent)?;
        self.agents.remove(&agent);
        Ok(())
    }

    /// Remove `link` from its breed and from both endpoints' link lists.
    pub fn kill_link(&mut self, link: LinkId) -> AbmResult<()> {
        let dead = self.links.remove(&link).ok_or(AbmError::LinkNotFound(link))?;
        self.link_breeds.remove(dead.breed, link);
        if let Some(from) = self.agents.get_mut(&dead.from) {
            from.links.retain(|&l| l != link);
        }
        if let Some(to) = self.agents.get_mut(&dead.to) {
            to.links.retain(|&l| l != link);
        }
        Ok(())
    }

    /// Kill every agent (root collection, oldest first).  Links go with
    /// their endpoints.
    pub fn clear_agents(&mut self) -> AbmResult<()> {
        let all = self.agent_breeds.get(self.agents_breed()).members().to_vec();
        for agent in all {
            self.kill_agent(agent)?;
        }
        Ok(())
    }

    /// Kill every link, leaving the agents in place.
    pub fn clear_links(&mut self) -> AbmResult<()> {
        let all = self.link_breeds.get(self.links_breed()).members().to_vec();
        for link in all {
            self.kill_link(link)?;
        }
        Ok(())
    }

    // ── Re-breeding ───────────────────────────────────────────────────────

    /// Move `agent` to a sibling breed subset.  Identity and root-set
    /// membership are untouched.  Attributes the new breed defines a
    /// default for reset to that default, clearing any per-agent override
    /// of them.
    pub fn rebreed(&mut self, agent: AgentId, new_breed: BreedId) -> AbmResult<()> {
        let old_breed = self.agent(agent)?.breed;
        if old_breed == new_breed {
            return Ok(());
        }
        self.agent_breeds.move_member(agent, old_breed, new_breed);

        let defaults = self.agent_breeds.get(new_breed).breed.defaults.clone();
        let entity = self.agent_mut(agent)?;
        entity.breed = new_breed;
        if defaults.color.is_some() {
            entity.overrides.clear(Overrides::COLOR);
        }
        if defaults.shape.is_some() {
            entity.overrides.clear(Overrides::SHAPE);
        }
        if defaults.size.is_some() {
            entity.overrides.clear(Overrides::SIZE);
        }
        if defaults.hidden.is_some() {
            entity.overrides.clear(Overrides::HIDDEN);
        }
        entity.apply_defaults(&defaults);
        Ok(())
    }
}
