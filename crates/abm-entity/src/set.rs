//! Ordered breed collections with subset ↔ superset dual-write.
//!
//! `Breeds<I>` owns every [`BreedSet`] of one entity kind (all agent breeds,
//! or all link breeds, or all patch breeds).  Rather than each subset
//! holding an ad hoc parent pointer it mutates behind the family's back,
//! the family performs every insert/remove against the subset *and* all of
//! its ancestors in one call — the root set is always exactly the union of
//! its subsets.
//!
//! The root of each family owns the monotonic ID counter for its kind.
//! IDs are issued in creation order and never reused while the simulation
//! lives.

use abm_core::{AbmResult, AbmError, BreedId};

use crate::breed::{Breed, BreedDefaults};

/// One ordered breed collection.
///
/// Members are entity IDs; the arena owning the entities lives elsewhere.
/// Duplicates are structurally possible (as in the system this descends
/// from) but unusual; removal handles them by deleting every match.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreedSet<I> {
    pub breed: Breed,
    members: Vec<I>,
    /// Next ID to issue.  Meaningful only on a root set.
    next_id: u32,
}

impl<I: Copy + PartialEq> BreedSet<I> {
    fn new(breed: Breed) -> Self {
        Self { breed, members: Vec::new(), next_id: 0 }
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[I] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, item: I) -> bool {
        self.members.contains(&item)
    }

    pub fn last(&self) -> Option<I> {
        self.members.last().copied()
    }
}

// ── Breeds (the family) ───────────────────────────────────────────────────────

/// All breed sets of one entity kind, with atomic dual-write membership.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breeds<I> {
    sets: Vec<BreedSet<I>>,
}

impl<I: Copy + PartialEq> Breeds<I> {
    pub fn new() -> Self {
        Self { sets: Vec::new() }
    }

    /// Register a new root ("main") collection — the top of a family,
    /// issuer of its IDs.
    pub fn add_root(&mut self, name: impl Into<String>, defaults: BreedDefaults) -> BreedId {
        self.add(name.into(), None, defaults)
    }

    /// Register a subset of `main`.  Subsets may nest; the chain's root
    /// issues the IDs.
    pub fn add_subset(
        &mut self,
        name:     impl Into<String>,
        main:     BreedId,
        defaults: BreedDefaults,
    ) -> BreedId {
        debug_assert!(main.index() < self.sets.len(), "unknown main set {main}");
        self.add(name.into(), Some(main), defaults)
    }

    fn add(&mut self, name: String, main: Option<BreedId>, defaults: BreedDefaults) -> BreedId {
        let id = BreedId(self.sets.len() as u16);
        self.sets.push(BreedSet::new(Breed { id, name, main, defaults }));
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn get(&self, breed: BreedId) -> &BreedSet<I> {
        &self.sets[breed.index()]
    }

    pub fn by_name(&self, name: &str) -> Option<BreedId> {
        self.sets.iter().find(|s| s.breed.name == name).map(|s| s.breed.id)
    }

    /// Like [`by_name`](Self::by_name) but an unknown name is a
    /// `BreedNotFound` error for call sites where a typo must surface.
    pub fn require(&self, name: &str) -> AbmResult<BreedId> {
        self.by_name(name).ok_or_else(|| AbmError::BreedNotFound(name.into()))
    }

    /// Walk the superset chain up to the family root.
    pub fn root_of(&self, breed: BreedId) -> BreedId {
        let mut current = breed;
        while let Some(main) = self.sets[current.index()].breed.main {
            current = main;
        }
        current
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreedSet<I>> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    // ── Membership (dual-write) ───────────────────────────────────────────

    /// Issue the next ID from `breed`'s family root.
    pub fn issue_id(&mut self, breed: BreedId) -> u32 {
        let root = self.root_of(breed);
        let set = &mut self.sets[root.index()];
        let id = set.next_id;
        set.next_id += 1;
        id
    }

    /// Append `item` to `breed` and to every superset up its chain.
    pub fn push(&mut self, breed: BreedId, item: I) {
        let mut current = Some(breed);
        while let Some(id) = current {
            let set = &mut self.sets[id.index()];
            set.members.push(item);
            current = set.breed.main;
        }
    }

    /// Remove every identity match of `item` from `breed` and from every
    /// superset up its chain.  Removing an absent item is a no-op.
    pub fn remove(&mut self, breed: BreedId, item: I) {
        let mut current = Some(breed);
        while let Some(id) = current {
            let set = &mut self.sets[id.index()];
            set.members.retain(|&m| m != item);
            current = set.breed.main;
        }
    }

    /// Remove the last member of `breed` (propagating to supersets).
    /// Empty sets yield `None`, never a panic.
    pub fn pop(&mut self, breed: BreedId) -> Option<I> {
        let last = self.sets[breed.index()].last()?;
        self.remove(breed, last);
        Some(last)
    }

    /// Move `item` from one sibling subset to another without disturbing
    /// its ID: remove from the old chain, append to the new.  The shared
    /// root keeps the item as a member throughout (its order there shifts
    /// to the end, as re-insertion implies).
    pub fn move_member(&mut self, item: I, from: BreedId, to: BreedId) {
        self.remove(from, item);
        self.push(to, item);
    }
}
