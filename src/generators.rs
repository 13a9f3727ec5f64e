use bit_set::BitSet;
use error_chain::bail;
use log::{debug, trace};
use rand::Rng;
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
use crate::errors::*;
use crate::grid::Grid;

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// It works as a depth first search over the cells, starting at `start` (or the top left
/// cell). From the current cell it picks one of the unvisited neighbours uniformly at random,
/// carves a passage to it and moves on. When the current cell has no unvisited neighbour left
/// it is finished and we backtrack to the cell we came from, until we are back out of the
/// origin. Every cell gets visited exactly once, so the carved passages form a spanning tree:
/// a perfect maze with `size - 1` passages and a single route between any two cells.
///
/// The "recursion" is an explicit stack so large grids cannot overflow the call stack.
/// Random draws are only used to pick among the available directions, the same `rng` state
/// always carves the same maze.
///
/// Any passages already on the grid are walled up first.
pub fn recursive_backtracker<R>(grid: &mut Grid,
                                rng: &mut R,
                                start: Option<Cartesian2DCoordinate>)
                                -> Result<()>
    where R: Rng
{
    let origin = start.unwrap_or_else(|| Cartesian2DCoordinate::new(0, 0));
    if !grid.is_valid_coordinate(origin) {
        bail!(ErrorKind::InvalidCoordinate(origin.x, origin.y));
    }
    grid.clear();

    let cells_count = grid.size().0;
    let mut visited = BitSet::with_capacity(cells_count);
    let mut stack = Vec::with_capacity(cells_count);
    let mut max_depth = 1usize;

    visited.insert(grid.index(origin));
    stack.push(origin);

    while let Some(&current) = stack.last() {

        let available_dirs: SmallVec<[CompassPrimary; 4]> =
            CompassPrimary::all()
                .iter()
                .cloned()
                .filter(|dir| {
                    grid.neighbour_at_direction(current, *dir)
                        .map_or(false, |neighbour| !visited.contains(grid.index(neighbour)))
                })
                .collect();

        if available_dirs.is_empty() {
            // Finished with this cell, go back the way we came.
            stack.pop();
            continue;
        }

        let dir = available_dirs[rng.gen_range(0..available_dirs.len())];
        let next = grid.add_passage(current, dir)
                       .map_err(|e| format!("carving {:?} from {:?} failed: {:?}", dir, current, e))?;
        trace!("carved {:?} from {:?} to {:?}", dir, current, next);

        visited.insert(grid.index(next));
        stack.push(next);
        max_depth = max_depth.max(stack.len());
    }

    debug!("recursive backtracker carved {} passages over {} cells from {:?}, max stack depth {}",
           grid.passages_count().0,
           cells_count,
           origin,
           max_depth);

    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::{Height, PassagesCount, Width};

    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use petgraph::graph::UnGraph;
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn carved_grid(w: usize, h: usize, seed: u64) -> Grid {
        let mut g = Grid::new(Width(w), Height(h)).expect("valid grid dimensions");
        let mut rng = XorShiftRng::seed_from_u64(seed);
        recursive_backtracker(&mut g, &mut rng, None).expect("generation failed");
        g
    }

    fn passage_graph(g: &Grid) -> UnGraph<(), ()> {
        let edges = g.iter_links()
                     .map(|(a, b)| (g.index(a) as u32, g.index(b) as u32))
                     .collect::<Vec<_>>();
        let mut graph = UnGraph::<(), ()>::from_edges(edges);
        // from_edges only creates nodes up to the highest index used by an edge
        while graph.node_count() < g.size().0 {
            graph.add_node(());
        }
        graph
    }

    fn is_perfect_maze(g: &Grid) -> bool {
        let graph = passage_graph(g);
        g.passages_count() == PassagesCount(g.size().0 - 1) &&
        connected_components(&graph) == 1 && !is_cyclic_undirected(&graph)
    }

    fn is_symmetric(g: &Grid) -> bool {
        g.iter().all(|coord| {
            g.get_flags(coord).passages().iter().all(|dir| {
                g.neighbour_at_direction(coord, *dir)
                 .map_or(false,
                         |neighbour| g.get_flags(neighbour).has_passage(dir.opposite()))
            })
        })
    }

    #[test]
    fn single_cell_has_no_passages() {
        let g = carved_grid(1, 1, 42);
        assert_eq!(g.passages_count(), PassagesCount(0));
        assert!(g.get_flags(Cartesian2DCoordinate::new(0, 0)).is_walled());
    }

    #[test]
    fn two_cells_are_always_joined_east_west() {
        for seed in 0..20 {
            let g = carved_grid(2, 1, seed);
            assert_eq!(g.passages_count(), PassagesCount(1));
            assert!(g.is_neighbour_linked(Cartesian2DCoordinate::new(0, 0), CompassPrimary::East));
            assert!(g.is_neighbour_linked(Cartesian2DCoordinate::new(1, 0), CompassPrimary::West));
        }
    }

    #[test]
    fn single_row_and_column_are_corridors() {
        let row = carved_grid(7, 1, 3);
        let column = carved_grid(1, 7, 3);
        assert!(is_perfect_maze(&row));
        assert!(is_perfect_maze(&column));
        assert!(row.iter()
                   .all(|coord| !row.get_flags(coord).has_passage(CompassPrimary::North) &&
                                !row.get_flags(coord).has_passage(CompassPrimary::South)));
    }

    #[test]
    fn perfect_maze_on_non_square_grids() {
        for &(w, h) in &[(3, 9), (9, 3), (16, 5), (10, 10)] {
            let g = carved_grid(w, h, 1234);
            assert!(is_perfect_maze(&g), "{}x{} is not a perfect maze", w, h);
            assert!(is_symmetric(&g), "{}x{} has one sided passages", w, h);
        }
    }

    #[test]
    fn large_grid_does_not_overflow_the_stack() {
        // A long corridor makes the backtracking stack as deep as the cell count.
        let g = carved_grid(20_000, 1, 7);
        assert_eq!(g.passages_count(), PassagesCount(19_999));
        let g = carved_grid(300, 300, 7);
        assert_eq!(g.passages_count(), PassagesCount(300 * 300 - 1));
    }

    #[test]
    fn custom_start_point() {
        let mut g = Grid::new(Width(6), Height(4)).unwrap();
        let mut rng = XorShiftRng::seed_from_u64(99);
        recursive_backtracker(&mut g, &mut rng, Some(Cartesian2DCoordinate::new(5, 3))).unwrap();
        assert!(is_perfect_maze(&g));
    }

    #[test]
    fn start_point_outside_the_grid_is_rejected() {
        let mut g = Grid::new(Width(3), Height(3)).unwrap();
        let mut rng = XorShiftRng::seed_from_u64(0);
        let err = recursive_backtracker(&mut g, &mut rng, Some(Cartesian2DCoordinate::new(3, 0)))
            .unwrap_err();
        match *err.kind() {
            ErrorKind::InvalidCoordinate(3, 0) => {}
            ref other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(g.passages_count(), PassagesCount(0));
    }

    #[test]
    fn regenerating_a_grid_still_gives_a_perfect_maze() {
        let mut g = carved_grid(8, 5, 1);
        let mut rng = XorShiftRng::seed_from_u64(2);
        recursive_backtracker(&mut g, &mut rng, None).unwrap();
        assert!(is_perfect_maze(&g));
        assert_eq!(g, carved_grid(8, 5, 2));
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(carved_grid(12, 7, 5), carved_grid(12, 7, 5));
    }

    #[test]
    fn different_seeds_vary_the_maze() {
        let first = carved_grid(12, 12, 0);
        assert!((1..10).any(|seed| carved_grid(12, 12, seed) != first));
    }

    #[test]
    fn spanning_tree_property() {
        fn p(w: u8, h: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 24 + 1, h as usize % 24 + 1);
            let g = carved_grid(w, h, seed);
            TestResult::from_bool(is_perfect_maze(&g) && is_symmetric(&g))
        }
        quickcheck(p as fn(u8, u8, u64) -> TestResult)
    }

    #[test]
    fn determinism_property() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 16 + 1, h as usize % 16 + 1);
            carved_grid(w, h, seed) == carved_grid(w, h, seed)
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }
}
