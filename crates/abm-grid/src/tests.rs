//! Unit tests for the patch grid.

use abm_core::{Cell, World};

use crate::PatchGrid;

fn flat41() -> PatchGrid {
    PatchGrid::new(World::new(Cell::new(-20, -20), Cell::new(20, 20), 13.0, false).unwrap())
}

fn torus41() -> PatchGrid {
    PatchGrid::new(World::new(Cell::new(-20, -20), Cell::new(20, 20), 13.0, true).unwrap())
}

fn tiny_torus() -> PatchGrid {
    PatchGrid::new(World::new(Cell::new(0, 0), Cell::new(2, 2), 13.0, true).unwrap())
}

#[cfg(test)]
mod lookup {
    use abm_core::{Cell, Point};

    use super::*;

    #[test]
    fn population_count() {
        assert_eq!(flat41().len(), 41 * 41);
        assert_eq!(tiny_torus().len(), 9);
    }

    // The index formula is a bijection over the grid.
    #[test]
    fn index_bijection() {
        let grid = flat41();
        let mut seen = std::collections::HashSet::new();
        for y in -20..=20 {
            for x in -20..=20 {
                let id = grid.patch_at(Point::new(x as f64, y as f64));
                assert_eq!(grid.patch(id).position, Cell::new(x, y));
                assert!(seen.insert(id), "distinct cells must map to distinct patches");
            }
        }
    }

    #[test]
    fn row_major_order() {
        let grid = flat41();
        // First patch is the top-left corner (min.x, max.y); index 0.
        assert_eq!(grid.patch(grid.ids().next().unwrap()).position, Cell::new(-20, 20));
        assert_eq!(grid.index_of(Cell::new(-20, 20)), 0);
        assert_eq!(grid.index_of(Cell::new(-19, 20)), 1);
        assert_eq!(grid.index_of(Cell::new(-20, 19)), 41);
    }

    #[test]
    fn rounds_to_nearest_cell() {
        let grid = flat41();
        let id = grid.patch_at(Point::new(3.4, -6.6));
        assert_eq!(grid.patch(id).position, Cell::new(3, -7));
    }

    #[test]
    fn out_of_range_clamps() {
        let grid = flat41();
        let id = grid.patch_at(Point::new(1000.0, -1000.0));
        assert_eq!(grid.patch(id).position, Cell::new(20, -20));
    }

    #[test]
    fn boundary_half_unit_stays_in_grid() {
        let grid = flat41();
        // max_coordinate rounds to max + 1; the cell bound pulls it back in.
        let id = grid.patch_at(Point::new(20.5, 20.5));
        assert_eq!(grid.patch(id).position, Cell::new(20, 20));
    }

    #[test]
    fn torus_lookup_wraps() {
        let grid = torus41();
        let id = grid.patch_at(Point::new(21.0, 0.0));
        assert_eq!(grid.patch(id).position, Cell::new(-20, 0));
    }

    #[test]
    fn edge_detection() {
        let grid = flat41();
        let corner = grid.patch_at_cell(Cell::new(-20, -20));
        let inner = grid.patch_at_cell(Cell::new(0, 0));
        assert!(grid.is_on_edge(corner));
        assert!(!grid.is_on_edge(inner));
    }
}

#[cfg(test)]
mod neighbors {
    use abm_core::Cell;

    use crate::{CachePolicy, NeighborQuery};

    use super::*;

    // 8 neighbors inside, 3 at a corner, on a 41×41 non-torus grid.
    #[test]
    fn square_counts_interior_and_corner() {
        let mut grid = flat41();
        let inner = grid.patch_at_cell(Cell::new(10, 10));
        assert_eq!(
            grid.neighbors(inner, NeighborQuery::ADJACENT8, CachePolicy::Default).len(),
            8
        );
        let corner = grid.patch_at_cell(Cell::new(-20, -20));
        assert_eq!(
            grid.neighbors(corner, NeighborQuery::ADJACENT8, CachePolicy::Default).len(),
            3
        );
        let edge = grid.patch_at_cell(Cell::new(-20, 0));
        assert_eq!(
            grid.neighbors(edge, NeighborQuery::ADJACENT8, CachePolicy::Default).len(),
            5
        );
    }

    // On a torus the seam column is adjacent to the opposite side.
    #[test]
    fn torus_wraps_at_seam() {
        let mut grid = torus41();
        let seam = grid.patch_at_cell(Cell::new(20, 0));
        let neighbors = grid.neighbors(seam, NeighborQuery::ADJACENT8, CachePolicy::Default);
        assert_eq!(neighbors.len(), 8);
        assert!(
            neighbors
                .iter()
                .any(|&p| grid.patch(p).position == Cell::new(-20, 0))
        );
    }

    #[test]
    fn torus_corner_has_eight() {
        let mut grid = torus41();
        let corner = grid.patch_at_cell(Cell::new(-20, -20));
        assert_eq!(
            grid.neighbors(corner, NeighborQuery::ADJACENT8, CachePolicy::Default).len(),
            8
        );
    }

    #[test]
    fn me_too_includes_center() {
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        let with_self =
            grid.neighbors(p, NeighborQuery::ADJACENT8.with_me_too(), CachePolicy::Default);
        assert_eq!(with_self.len(), 9);
        assert!(with_self.contains(&p));
    }

    #[test]
    fn diamond_counts() {
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        // Manhattan range 1: the 4-neighborhood.
        assert_eq!(grid.neighbors(p, NeighborQuery::diamond(1), CachePolicy::Default).len(), 4);
        // Range 2 diamond holds 2r(r+1) cells excluding the center = 12.
        assert_eq!(grid.neighbors(p, NeighborQuery::diamond(2), CachePolicy::Default).len(), 12);
    }

    #[test]
    fn radius_filters_square_corners() {
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        // Radius 1: the diagonal cells of the square lie at √2 > 1.
        assert_eq!(grid.neighbors(p, NeighborQuery::radius(1.0), CachePolicy::Default).len(), 4);
        // Radius 2: 12 cells within Euclidean distance 2.
        assert_eq!(grid.neighbors(p, NeighborQuery::radius(2.0), CachePolicy::Default).len(), 12);
    }

    #[test]
    fn cone_filters_by_heading() {
        use std::f64::consts::PI;
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        // Facing east with a quarter-turn cone of radius 1: only (1, 0).
        let east = grid.neighbors(p, NeighborQuery::cone(1.0, 0.0, PI / 2.0), CachePolicy::Default);
        assert_eq!(east.len(), 1);
        assert_eq!(grid.patch(east[0]).position, Cell::new(1, 0));
        // A half-turn cone admits the diagonals at distance √2 ≤ 1.5.
        let wide =
            grid.neighbors(p, NeighborQuery::cone(1.5, 0.0, PI), CachePolicy::Default);
        assert_eq!(wide.len(), 5);
    }

    #[test]
    fn oversized_torus_query_dedups() {
        let mut grid = tiny_torus();
        let p = grid.patch_at_cell(Cell::new(1, 1));
        // Range 2 spans 5 cells on a 3-wide torus: every patch exactly once.
        let all = grid.neighbors(p, NeighborQuery::square(2), CachePolicy::Default);
        assert_eq!(all.len(), 8);
        let mut sorted = all.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
    }

    #[test]
    fn zero_range_is_empty_without_me_too() {
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        assert!(grid.neighbors(p, NeighborQuery::square(0), CachePolicy::Default).is_empty());
    }
}

#[cfg(test)]
mod cache {
    use abm_core::Cell;

    use crate::{CachePolicy, NeighborQuery};

    use super::*;

    #[test]
    fn default_policy_memoizes_square() {
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        assert_eq!(grid.patch(p).cached_queries(), 0);
        let first = grid.neighbors(p, NeighborQuery::ADJACENT8, CachePolicy::Default);
        assert_eq!(grid.patch(p).cached_queries(), 1);
        let second = grid.neighbors(p, NeighborQuery::ADJACENT8, CachePolicy::Default);
        assert_eq!(first, second);
        assert_eq!(grid.patch(p).cached_queries(), 1);
    }

    #[test]
    fn distinct_parameters_distinct_entries() {
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        grid.neighbors(p, NeighborQuery::square(1), CachePolicy::Default);
        grid.neighbors(p, NeighborQuery::square(2), CachePolicy::Default);
        grid.neighbors(p, NeighborQuery::square(1).with_me_too(), CachePolicy::Default);
        assert_eq!(grid.patch(p).cached_queries(), 3);
    }

    #[test]
    fn never_policy_bypasses_storage() {
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        grid.neighbors(p, NeighborQuery::square(3), CachePolicy::Never);
        assert_eq!(grid.patch(p).cached_queries(), 0);
    }

    #[test]
    fn cone_cached_only_on_request() {
        let mut grid = flat41();
        let p = grid.patch_at_cell(Cell::new(0, 0));
        let cone = NeighborQuery::cone(2.0, 0.0, 1.0);
        grid.neighbors(p, cone, CachePolicy::Default);
        assert_eq!(grid.patch(p).cached_queries(), 0);
        grid.neighbors(p, cone, CachePolicy::Always);
        assert_eq!(grid.patch(p).cached_queries(), 1);
    }
}

#[cfg(test)]
mod agents_and_fields {
    use abm_core::{AgentId, Cell};

    use crate::{CachePolicy, NeighborQuery};

    use super::*;

    #[test]
    fn neighbor_agents_unions_and_excludes() {
        let mut grid = flat41();
        let center = grid.patch_at_cell(Cell::new(0, 0));
        let east = grid.patch_at_cell(Cell::new(1, 0));
        grid.patch_mut(center).agents.push(AgentId(0));
        grid.patch_mut(east).agents.push(AgentId(1));
        grid.patch_mut(east).agents.push(AgentId(2));

        let all =
            grid.neighbor_agents(center, NeighborQuery::ADJACENT8, CachePolicy::Default, None);
        assert_eq!(all, vec![AgentId(1), AgentId(2)]);

        let me_too = NeighborQuery::ADJACENT8.with_me_too();
        let without_self =
            grid.neighbor_agents(center, me_too, CachePolicy::Default, Some(AgentId(0)));
        assert_eq!(without_self, vec![AgentId(1), AgentId(2)]);
    }

    #[test]
    fn diffuse_conserves_total() {
        let mut grid = flat41();
        let mut field = vec![0.0; grid.len()];
        let center = grid.patch_at_cell(Cell::new(0, 0));
        field[center.index()] = 100.0;

        for _ in 0..10 {
            grid.diffuse(&mut field, 0.5);
        }
        let total: f64 = field.iter().sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!(field[center.index()] < 100.0);
        let east = grid.patch_at_cell(Cell::new(1, 0));
        assert!(field[east.index()] > 0.0);
    }

    #[test]
    fn patch_colors_in_index_order() {
        use abm_core::Color;
        let mut grid = tiny_torus();
        let top_left = grid.patch_at_cell(Cell::new(0, 2));
        grid.patch_mut(top_left).color = Color::RED;
        let colors = grid.patch_colors();
        assert_eq!(colors.len(), 9);
        assert_eq!(colors[0], Color::RED);
        assert_eq!(colors[1], Color::BLACK);
    }
}
