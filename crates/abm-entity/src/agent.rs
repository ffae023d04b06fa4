//! Mobile agents.
//!
//! An agent's grid placement is a single [`Site`]: its continuous position
//! plus the patch it resolves to.  `site == None` means the agent is off
//! the grid entirely (it belongs to no patch's agent list); movement and
//! spatial queries against an off-grid agent are no-ops at the world layer.

use abm_core::{AgentId, BreedId, Color, LinkId, PatchId, Point, Shape};
use abm_core::geometry;

use crate::breed::{BreedDefaults, Overrides};

/// Where an on-grid agent is: continuous position and the patch it rounds to.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    pub position: Point,
    pub patch:    PatchId,
}

/// A mobile agent.
///
/// Appearance fields carry their breed's defaults until explicitly set;
/// `overrides` records which of them the agent has set for itself, so a
/// later re-breed knows which values to reset and which to keep.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:    AgentId,
    pub breed: BreedId,
    pub site:  Option<Site>,
    /// Radians, counter-clockwise, 0 = east.  Kept in `[0, 2π)`.
    pub heading:  f64,
    pub size:     f64,
    pub color:    Color,
    pub shape:    Shape,
    pub hidden:   bool,
    pub label:    Option<String>,
    pub pen_down: bool,
    pub pen_size: f64,
    /// Links incident to this agent, in attachment order.
    pub links: Vec<LinkId>,
    pub overrides: Overrides,
}

impl Agent {
    /// A fresh agent with stock appearance, off-grid until placed.
    pub fn new(id: AgentId, breed: BreedId) -> Self {
        Self {
            id,
            breed,
            site: None,
            heading: 0.0,
            size: 1.0,
            color: Color::BLACK,
            shape: Shape::Default,
            hidden: false,
            label: None,
            pen_down: false,
            pen_size: 1.0,
            links: Vec::new(),
            overrides: Overrides::default(),
        }
    }

    /// Apply a breed's defaults to the fields this agent has not
    /// overridden for itself.
    pub fn apply_defaults(&mut self, defaults: &BreedDefaults) {
        if !self.overrides.contains(Overrides::COLOR) {
            if let Some(color) = defaults.color {
                self.color = color;
            }
        }
        if !self.overrides.contains(Overrides::SHAPE) {
            if let Some(shape) = defaults.shape {
                self.shape = shape;
            }
        }
        if !self.overrides.contains(Overrides::SIZE) {
            if let Some(size) = defaults.size {
                self.size = size;
            }
        }
        if !self.overrides.contains(Overrides::HIDDEN) {
            if let Some(hidden) = defaults.hidden {
                self.hidden = hidden;
            }
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.overrides.set(Overrides::COLOR);
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.overrides.set(Overrides::SHAPE);
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
        self.overrides.set(Overrides::SIZE);
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.overrides.set(Overrides::HIDDEN);
    }

    /// Current position, if on-grid.
    pub fn position(&self) -> Option<Point> {
        self.site.map(|s| s.position)
    }

    /// Patch under this agent, if on-grid.
    pub fn patch(&self) -> Option<PatchId> {
        self.site.map(|s| s.patch)
    }

    /// Set the heading, normalized into `[0, 2π)`.
    pub fn set_heading(&mut self, heading: f64) {
        self.heading = geometry::modulo(heading, std::f64::consts::TAU);
    }

    /// Turn by `radians` (positive is counter-clockwise).
    pub fn rotate(&mut self, radians: f64) {
        self.set_heading(self.heading + radians);
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.site {
            Some(site) => write!(f, "{} at {}", self.id, site.position),
            None => write!(f, "{} (off-grid)", self.id),
        }
    }
}
