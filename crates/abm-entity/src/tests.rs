//! Unit tests for breeds, collection membership, and entity helpers.

#[cfg(test)]
mod sets {
    use abm_core::AgentId;

    use crate::breed::BreedDefaults;
    use crate::set::Breeds;

    fn family() -> (Breeds<AgentId>, abm_core::BreedId, abm_core::BreedId, abm_core::BreedId) {
        let mut breeds = Breeds::new();
        let root = breeds.add_root("agents", BreedDefaults::default());
        let sheep = breeds.add_subset("sheep", root, BreedDefaults::default());
        let wolves = breeds.add_subset("wolves", root, BreedDefaults::default());
        (breeds, root, sheep, wolves)
    }

    #[test]
    fn push_propagates_to_root() {
        let (mut breeds, root, sheep, wolves) = family();
        breeds.push(sheep, AgentId(0));
        breeds.push(wolves, AgentId(1));
        breeds.push(sheep, AgentId(2));

        assert_eq!(breeds.get(sheep).members(), &[AgentId(0), AgentId(2)]);
        assert_eq!(breeds.get(wolves).members(), &[AgentId(1)]);
        // Root is the union, in overall insertion order.
        assert_eq!(
            breeds.get(root).members(),
            &[AgentId(0), AgentId(1), AgentId(2)]
        );
    }

    #[test]
    fn remove_propagates_to_root() {
        let (mut breeds, root, sheep, _) = family();
        breeds.push(sheep, AgentId(0));
        breeds.push(sheep, AgentId(1));
        breeds.remove(sheep, AgentId(0));

        assert_eq!(breeds.get(sheep).members(), &[AgentId(1)]);
        assert_eq!(breeds.get(root).members(), &[AgentId(1)]);
    }

    #[test]
    fn remove_absent_is_noop() {
        let (mut breeds, root, sheep, _) = family();
        breeds.push(sheep, AgentId(0));
        breeds.remove(sheep, AgentId(7));
        assert_eq!(breeds.get(root).len(), 1);
    }

    #[test]
    fn remove_deletes_every_duplicate() {
        let (mut breeds, root, sheep, _) = family();
        breeds.push(sheep, AgentId(0));
        breeds.push(sheep, AgentId(0));
        breeds.remove(sheep, AgentId(0));
        assert!(breeds.get(sheep).is_empty());
        assert!(breeds.get(root).is_empty());
    }

    #[test]
    fn ids_issue_monotonically_from_the_root() {
        let (mut breeds, _, sheep, wolves) = family();
        // Both subsets draw from the same root counter.
        assert_eq!(breeds.issue_id(sheep), 0);
        assert_eq!(breeds.issue_id(wolves), 1);
        assert_eq!(breeds.issue_id(sheep), 2);
    }

    #[test]
    fn ids_survive_removal() {
        let (mut breeds, _, sheep, _) = family();
        let a = breeds.issue_id(sheep);
        breeds.push(sheep, AgentId(a));
        breeds.remove(sheep, AgentId(a));
        // Counter never rewinds.
        assert_eq!(breeds.issue_id(sheep), 1);
    }

    #[test]
    fn move_member_keeps_root_membership() {
        let (mut breeds, root, sheep, wolves) = family();
        breeds.push(sheep, AgentId(0));
        breeds.push(sheep, AgentId(1));

        breeds.move_member(AgentId(0), sheep, wolves);

        assert_eq!(breeds.get(sheep).members(), &[AgentId(1)]);
        assert_eq!(breeds.get(wolves).members(), &[AgentId(0)]);
        assert!(breeds.get(root).contains(AgentId(0)));
        assert!(breeds.get(root).contains(AgentId(1)));
        assert_eq!(breeds.get(root).len(), 2);
    }

    #[test]
    fn pop_on_empty_is_none() {
        let (mut breeds, root, sheep, _) = family();
        assert_eq!(breeds.pop(sheep), None);
        breeds.push(sheep, AgentId(3));
        assert_eq!(breeds.pop(sheep), Some(AgentId(3)));
        assert!(breeds.get(root).is_empty());
    }

    #[test]
    fn lookup_by_name() {
        let (breeds, _, sheep, _) = family();
        assert_eq!(breeds.by_name("sheep"), Some(sheep));
        assert_eq!(breeds.by_name("goats"), None);
        assert!(breeds.require("goats").is_err());
    }

    #[test]
    fn root_of_walks_the_chain() {
        let mut breeds: Breeds<AgentId> = Breeds::new();
        let root = breeds.add_root("agents", BreedDefaults::default());
        let mid = breeds.add_subset("mid", root, BreedDefaults::default());
        let leaf = breeds.add_subset("leaf", mid, BreedDefaults::default());
        assert_eq!(breeds.root_of(leaf), root);
        assert_eq!(breeds.root_of(root), root);

        // A push on the leaf lands in all three sets.
        breeds.push(leaf, AgentId(0));
        assert!(breeds.get(mid).contains(AgentId(0)));
        assert!(breeds.get(root).contains(AgentId(0)));
    }
}

#[cfg(test)]
mod agents {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use abm_core::{AgentId, BreedId, Color, Shape};

    use crate::agent::Agent;
    use crate::breed::{BreedDefaults, Overrides};

    #[test]
    fn new_agent_is_off_grid() {
        let agent = Agent::new(AgentId(0), BreedId(0));
        assert!(agent.site.is_none());
        assert_eq!(agent.position(), None);
        assert_eq!(agent.patch(), None);
    }

    #[test]
    fn heading_normalizes_into_zero_tau() {
        let mut agent = Agent::new(AgentId(0), BreedId(0));
        agent.set_heading(-FRAC_PI_2);
        assert!((agent.heading - 3.0 * FRAC_PI_2).abs() < 1e-12);
        agent.set_heading(TAU + PI);
        assert!((agent.heading - PI).abs() < 1e-12);
        agent.rotate(PI);
        assert!(agent.heading.abs() < 1e-12);
    }

    #[test]
    fn defaults_skip_overridden_fields() {
        let defaults = BreedDefaults {
            color: Some(Color::RED),
            shape: Some(Shape::Bug),
            size: Some(2.0),
            hidden: None,
        };
        let mut agent = Agent::new(AgentId(0), BreedId(0));
        agent.set_color(Color::BLUE);
        agent.apply_defaults(&defaults);

        // The explicit color survives; shape and size follow the breed.
        assert_eq!(agent.color, Color::BLUE);
        assert_eq!(agent.shape, Shape::Bug);
        assert_eq!(agent.size, 2.0);
        assert!(agent.overrides.contains(Overrides::COLOR));
        assert!(!agent.overrides.contains(Overrides::SHAPE));
    }

    #[test]
    fn cleared_override_follows_defaults_again() {
        let defaults = BreedDefaults { color: Some(Color::GREEN), ..Default::default() };
        let mut agent = Agent::new(AgentId(0), BreedId(0));
        agent.set_color(Color::BLUE);
        agent.overrides.clear(Overrides::COLOR);
        agent.apply_defaults(&defaults);
        assert_eq!(agent.color, Color::GREEN);
    }
}

#[cfg(test)]
mod links {
    use abm_core::{AgentId, BreedId, LinkId};

    use crate::link::Link;

    #[test]
    fn other_end_is_symmetric() {
        let link = Link::new(LinkId(0), BreedId(0), AgentId(1), AgentId(2));
        assert_eq!(link.other_end(AgentId(1)), Some(AgentId(2)));
        assert_eq!(link.other_end(AgentId(2)), Some(AgentId(1)));
        assert_eq!(link.other_end(AgentId(3)), None);
        assert!(link.connects(AgentId(1)));
        assert!(!link.connects(AgentId(3)));
    }
}
