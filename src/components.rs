use crate::direction::Direction;
use crate::node_grid::{Coord, NodeGrid};
use log::info;
use petgraph::unionfind::UnionFind;

/// Connected components of the free cells of a [NodeGrid], used to reject unreachable goals
/// without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct Components {
    size: usize,
    sets: UnionFind<usize>,
}

impl Components {
    /// Links every free cell to its free neighbours. Only the forward half of the neighbourhood
    /// is visited, since union is symmetric.
    pub fn generate<const N: usize>(grid: &NodeGrid<N>, allow_corner_cutting: bool) -> Components {
        info!("Generating connected components");
        let mut sets = UnionFind::new(N * N);
        for node in grid.nodes().filter(|node| !node.obstacle) {
            let ix = index::<N>(node.coord);
            for direction in [
                Direction::East,
                Direction::SouthWest,
                Direction::South,
                Direction::SouthEast,
            ] {
                if grid.can_move(node.coord, direction, allow_corner_cutting) {
                    if let Some(neighbour) = grid.step(node.coord, direction) {
                        sets.union(ix, index::<N>(neighbour));
                    }
                }
            }
        }
        Components { size: N, sets }
    }

    fn ix(&self, coord: Coord) -> Option<usize> {
        (coord.row < self.size && coord.col < self.size).then(|| coord.row * self.size + coord.col)
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn component(&self, coord: Coord) -> Option<usize> {
        self.ix(coord).map(|ix| self.sets.find(ix))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: Coord, goal: Coord) -> bool {
        match (self.ix(start), self.ix(goal)) {
            (Some(a), Some(b)) => self.sets.equiv(a, b),
            _ => false,
        }
    }
}

fn index<const N: usize>(coord: Coord) -> usize {
    coord.row * N + coord.col
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn wall_splits_components() {
        // |. # .|
        // |. # .|
        // |. # .|
        let occupancy = [[0u8, 1, 0]; 3];
        let grid = NodeGrid::<3>::build(&occupancy).unwrap();
        let components = Components::generate(&grid, true);
        assert!(components.reachable(Coord::new(0, 0), Coord::new(2, 0)));
        assert!(!components.reachable(Coord::new(0, 0), Coord::new(0, 2)));
        assert!(!components.reachable(Coord::new(0, 0), Coord::new(0, 3)));
        assert_eq!(
            components.component(Coord::new(0, 2)),
            components.component(Coord::new(2, 2))
        );
    }

    // Tests whether corner cutting has the expected effect on diagonal reachability in a minimal setting.
    #[test]
    fn diagonal_switch_reachable() {
        //  __
        // | #|
        // |# |
        //  __
        let occupancy = [[false, true], [true, false]];
        let grid = NodeGrid::<2>::build(&occupancy).unwrap();
        let start = Coord::new(0, 0);
        let goal = Coord::new(1, 1);
        assert!(Components::generate(&grid, true).reachable(start, goal));
        assert!(!Components::generate(&grid, false).reachable(start, goal));
    }

    /// The anti-diagonal needs the south-west link to be joined.
    #[test]
    fn south_west_links_join() {
        let occupancy = [[true, false], [false, true]];
        let grid = NodeGrid::<2>::build(&occupancy).unwrap();
        let components = Components::generate(&grid, true);
        assert!(components.reachable(Coord::new(0, 1), Coord::new(1, 0)));
    }
}
