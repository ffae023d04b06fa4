//! The composed world: grid, entity arenas, and breed families.

use rustc_hash::FxHashMap;

use abm_core::{AbmError, AbmResult, AgentId, BreedId, LinkId, PatchId, World};
use abm_entity::{Agent, Breeds, BreedDefaults, Link};
use abm_grid::PatchGrid;

use crate::motion::PenStroke;

/// Everything a running model can see and mutate.
///
/// One root breed per entity kind exists from construction ("agents",
/// "links", "patches"); model-defined breeds are registered as subsets of
/// those roots.  All patches are created up front and never destroyed;
/// agents and links come and go through the lifecycle operations.
pub struct WorldState {
    pub(crate) grid:   PatchGrid,
    pub(crate) agents: FxHashMap<AgentId, Agent>,
    pub(crate) links:  FxHashMap<LinkId, Link>,

    pub(crate) agent_breeds: Breeds<AgentId>,
    pub(crate) link_breeds:  Breeds<LinkId>,
    pub(crate) patch_breeds: Breeds<PatchId>,

    root_agents:  BreedId,
    root_links:   BreedId,
    root_patches: BreedId,

    /// Trail segments emitted by pen-down movement since the last drain.
    pub(crate) pen_strokes: Vec<PenStroke>,
}

impl WorldState {
    pub fn new(world: World) -> Self {
        let grid = PatchGrid::new(world);

        let mut agent_breeds = Breeds::new();
        let mut link_breeds = Breeds::new();
        let mut patch_breeds = Breeds::new();
        let root_agents = agent_breeds.add_root("agents", BreedDefaults::default());
        let root_links = link_breeds.add_root("links", BreedDefaults::default());
        let root_patches = patch_breeds.add_root("patches", BreedDefaults::default());
        for id in grid.ids() {
            patch_breeds.push(root_patches, id);
        }

        Self {
            grid,
            agents: FxHashMap::default(),
            links: FxHashMap::default(),
            agent_breeds,
            link_breeds,
            patch_breeds,
            root_agents,
            root_links,
            root_patches,
            pen_strokes: Vec::new(),
        }
    }

    // ── Geometry and grid access ──────────────────────────────────────────

    pub fn world(&self) -> &World {
        self.grid.world()
    }

    pub fn grid(&self) -> &PatchGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PatchGrid {
        &mut self.grid
    }

    // ── Entity access ─────────────────────────────────────────────────────

    pub fn agent(&self, id: AgentId) -> AbmResult<&Agent> {
        self.agents.get(&id).ok_or(AbmError::AgentNotFound(id))
    }

    pub fn agent_mut(&mut self, id: AgentId) -> AbmResult<&mut Agent> {
        self.agents.get_mut(&id).ok_or(AbmError::AgentNotFound(id))
    }

    pub fn link(&self, id: LinkId) -> AbmResult<&Link> {
        self.links.get(&id).ok_or(AbmError::LinkNotFound(id))
    }

    pub fn link_mut(&mut self, id: LinkId) -> AbmResult<&mut Link> {
        self.links.get_mut(&id).ok_or(AbmError::LinkNotFound(id))
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    // ── Breed registries ──────────────────────────────────────────────────

    /// The root collection every agent belongs to.
    pub fn agents_breed(&self) -> BreedId {
        self.root_agents
    }

    /// The root collection every link belongs to.
    pub fn links_breed(&self) -> BreedId {
        self.root_links
    }

    /// The root collection every patch belongs to.
    pub fn patches_breed(&self) -> BreedId {
        self.root_patches
    }

    pub fn add_agent_breed(&mut self, name: impl Into<String>, defaults: BreedDefaults) -> BreedId {
        self.agent_breeds.add_subset(name, self.root_agents, defaults)
    }

    pub fn add_link_breed(&mut self, name: impl Into<String>, defaults: BreedDefaults) -> BreedId {
        self.link_breeds.add_subset(name, self.root_links, defaults)
    }

    pub fn add_patch_breed(&mut self, name: impl Into<String>, defaults: BreedDefaults) -> BreedId {
        self.patch_breeds.add_subset(name, self.root_patches, defaults)
    }

    pub fn agent_breeds(&self) -> &Breeds<AgentId> {
        &self.agent_breeds
    }

    pub fn link_breeds(&self) -> &Breeds<LinkId> {
        &self.link_breeds
    }

    pub fn patch_breeds(&self) -> &Breeds<PatchId> {
        &self.patch_breeds
    }

    /// Members of an agent breed, in insertion order (copied so callers
    /// can mutate the world while iterating).
    pub fn members(&self, breed: BreedId) -> Vec<AgentId> {
        self.agent_breeds.get(breed).members().to_vec()
    }

    /// Assign a patch to a breed subset, applying the breed's color and
    /// hidden defaults.  The patch keeps its ID and its place in the root
    /// patch collection.
    pub fn set_patch_breed(&mut self, patch: PatchId, breed: BreedId) {
        let old = self.grid.patch(patch).breed;
        self.patch_breeds.move_member(patch, old, breed);
        let defaults = self.patch_breeds.get(breed).breed.defaults.clone();
        let target = self.grid.patch_mut(patch);
        target.breed = breed;
        if let Some(color) = defaults.color {
            target.color = color;
        }
        if let Some(hidden) = defaults.hidden {
            target.hidden = hidden;
        }
    }
}
