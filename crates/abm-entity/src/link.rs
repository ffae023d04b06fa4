//! Links — edges between pairs of agents.

use abm_core::{AgentId, BreedId, Color, LinkId};

/// An undirected-by-convention edge between two agents.
///
/// `from`/`to` record attachment order; traversal helpers at the world
/// layer treat the link as connecting both ways.  A link never outlives
/// either endpoint: killing an agent kills its links first.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub id:    LinkId,
    pub breed: BreedId,
    pub from:  AgentId,
    pub to:    AgentId,
    pub color:     Color,
    pub thickness: f64,
    pub hidden:    bool,
    pub label:     Option<String>,
}

impl Link {
    pub fn new(id: LinkId, breed: BreedId, from: AgentId, to: AgentId) -> Self {
        Self {
            id,
            breed,
            from,
            to,
            color: Color::BLACK,
            thickness: 1.0,
            hidden: false,
            label: None,
        }
    }

    /// The endpoint opposite `agent`, or `None` if `agent` is not an
    /// endpoint of this link.
    pub fn other_end(&self, agent: AgentId) -> Option<AgentId> {
        if agent == self.from {
            Some(self.to)
        } else if agent == self.to {
            Some(self.from)
        } else {
            None
        }
    }

    pub fn connects(&self, agent: AgentId) -> bool {
        agent == self.from || agent == self.to
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.id, self.from, self.to)
    }
}
