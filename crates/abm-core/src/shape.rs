//! Agent silhouettes.
//!
//! The actual path data lives in the external drawing surface; the core only
//! names the shape and records whether it rotates with the agent's heading.

use std::fmt;

/// The drawable silhouette of an agent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// The classic wedge turtle.
    #[default]
    Default,
    Arrow,
    Bug,
    Circle,
    Person,
    Square,
    Triangle,
}

impl Shape {
    /// Whether the rendered silhouette turns with the agent's heading.
    /// Circles and squares are rotation-invariant; drawing them unrotated
    /// lets surfaces cache their rasterization.
    pub fn rotates(self) -> bool {
        !matches!(self, Shape::Circle | Shape::Square)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Default => "default",
            Shape::Arrow => "arrow",
            Shape::Bug => "bug",
            Shape::Circle => "circle",
            Shape::Person => "person",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
        };
        write!(f, "{name}")
    }
}
