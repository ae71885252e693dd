use crate::cost::Cost;
use crate::direction::Direction;
use crate::error::{PathError, Result};
use crate::node_grid::{Coord, NodeGrid};
use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;

/// Walks parent links from a cell back to the start, yielding each cell together with the
/// direction it was entered from. The order is goal to start; the start itself has no arrival
/// direction and isn't yielded.
pub struct ParentChain<'a, const N: usize> {
    grid: &'a NodeGrid<N>,
    current: Option<Coord>,
}

impl<'a, const N: usize> ParentChain<'a, N> {
    pub fn new(grid: &'a NodeGrid<N>, from: Coord) -> ParentChain<'a, N> {
        ParentChain {
            grid,
            current: Some(from),
        }
    }
}

impl<'a, const N: usize> Iterator for ParentChain<'a, N> {
    type Item = (Coord, Direction);

    fn next(&mut self) -> Option<(Coord, Direction)> {
        let coord = self.current?;
        let node = self.grid.node(coord);
        match (node.parent, node.direction) {
            (Some(parent), Some(direction)) => {
                self.current = Some(parent);
                Some((coord, direction))
            }
            _ => {
                self.current = None;
                None
            }
        }
    }
}

/// A start-to-goal sequence of moves stored in a fixed buffer of `L` directions.
#[derive(Clone, Copy, Debug)]
pub struct Route<const L: usize> {
    steps: [Direction; L],
    len: usize,
    cost: Cost,
}

impl<const L: usize> PartialEq for Route<L> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice() && self.cost == other.cost
    }
}

impl<const L: usize> Default for Route<L> {
    fn default() -> Route<L> {
        Route::new()
    }
}

impl<const L: usize> Route<L> {
    pub fn new() -> Route<L> {
        Route {
            steps: [Direction::North; L],
            len: 0,
            cost: Cost::Finite(0.0),
        }
    }

    /// Fills the route from the parent chain ending at `goal`, reversing it into start-to-goal
    /// order. On [PathError::RouteOverflow] the route is left empty.
    pub fn extract<const N: usize>(&mut self, grid: &NodeGrid<N>, goal: Coord) -> Result<()> {
        self.clear();
        let required = ParentChain::new(grid, goal).count();
        if required > self.capacity() {
            return Err(PathError::RouteOverflow {
                capacity: self.capacity(),
                required,
            });
        }
        for (i, (_, direction)) in ParentChain::new(grid, goal).enumerate() {
            self.steps[required - 1 - i] = direction;
        }
        self.len = required;
        self.cost = grid.node(goal).cost.unwrap_or(Cost::Infeasible);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.cost = Cost::Finite(0.0);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        L
    }

    /// Cost the search assigned to the goal: the travelled distance under
    /// [CostModel::AStar](crate::CostModel::AStar).
    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn as_slice(&self) -> &[Direction] {
        &self.steps[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.as_slice().iter().copied()
    }

    /// Direction codes `1..=8`.
    pub fn codes(&self) -> impl Iterator<Item = u8> + '_ {
        self.iter().map(Direction::code)
    }

    /// Replays the route from `start`; [None] if a step would leave the non-negative quadrant.
    pub fn walk(&self, start: Coord) -> Option<Coord> {
        self.iter().try_fold(start, |at, d| at.offset(d))
    }

    /// Every cell the route passes through, starting with `start`, as grid_util points.
    pub fn points(&self, start: Coord) -> Vec<Point> {
        std::iter::once(Some(start))
            .chain(self.iter().scan(Some(start), |at, d| {
                *at = at.and_then(|c| c.offset(d));
                Some(*at)
            }))
            .map_while(|c| c.map(Point::from))
            .collect()
    }
}

impl<const L: usize> fmt::Display for Route<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-links a chain (0,0) -> (1,1) -> (1,2) in the arena.
    fn linked_grid() -> NodeGrid<3> {
        let mut grid = NodeGrid::<3>::build(&[[false; 3]; 3]).unwrap();
        let start = Coord::new(0, 0);
        let mid = Coord::new(1, 1);
        let end = Coord::new(1, 2);
        grid.node_mut(start).cost = Some(Cost::Finite(0.0));
        let node = grid.node_mut(mid);
        node.parent = Some(start);
        node.direction = Some(Direction::SouthEast);
        let node = grid.node_mut(end);
        node.parent = Some(mid);
        node.direction = Some(Direction::East);
        node.cost = Some(Cost::Finite(2.414));
        grid
    }

    #[test]
    fn chain_runs_goal_to_start() {
        let grid = linked_grid();
        let chain = ParentChain::new(&grid, Coord::new(1, 2)).collect::<Vec<_>>();
        assert_eq!(
            chain,
            vec![
                (Coord::new(1, 2), Direction::East),
                (Coord::new(1, 1), Direction::SouthEast)
            ]
        );
    }

    #[test]
    fn extract_reverses_into_start_order() {
        let grid = linked_grid();
        let mut route: Route<4> = Route::new();
        route.extract(&grid, Coord::new(1, 2)).unwrap();
        assert_eq!(route.as_slice(), &[Direction::SouthEast, Direction::East]);
        assert_eq!(route.codes().collect::<Vec<_>>(), vec![8, 5]);
        assert_eq!(route.walk(Coord::new(0, 0)), Some(Coord::new(1, 2)));
        assert_eq!(route.cost(), Cost::Finite(2.414));
        assert_eq!(route.to_string(), "[SE E]");
        assert_eq!(
            route.points(Coord::new(0, 0)),
            vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 1)]
        );
    }

    #[test]
    fn extract_reports_overflow() {
        let grid = linked_grid();
        let mut route: Route<1> = Route::new();
        assert_eq!(
            route.extract(&grid, Coord::new(1, 2)),
            Err(PathError::RouteOverflow {
                capacity: 1,
                required: 2
            })
        );
        assert!(route.is_empty());
    }

    #[test]
    fn start_alone_is_empty() {
        let grid = linked_grid();
        let mut route: Route<4> = Route::new();
        route.extract(&grid, Coord::new(0, 0)).unwrap();
        assert!(route.is_empty());
        assert_eq!(route.walk(Coord::new(0, 0)), Some(Coord::new(0, 0)));
    }
}
