//! Toolkit error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `AbmError` via `From` impls, or keep them separate and wrap `AbmError` as
//! one variant.  Both patterns are acceptable; prefer whichever keeps error
//! sites clean.
//!
//! Out-of-range coordinates are deliberately *not* an error anywhere in the
//! toolkit — they are resolved by the world's clamp/wrap policy so geometry
//! stays total.  The variants below cover genuine programmer errors
//! (empty-collection statistics, unknown names) and missing entities.

use thiserror::Error;

use crate::{AgentId, LinkId, PatchId};

/// The top-level error type for `abm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum AbmError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("patch {0} not found")]
    PatchNotFound(PatchId),

    #[error("link {0} not found")]
    LinkNotFound(LinkId),

    #[error("no breed named {0:?}")]
    BreedNotFound(String),

    #[error("{0} called on an empty collection")]
    EmptyCollection(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `abm-*` crates.
pub type AbmResult<T> = Result<T, AbmError>;
