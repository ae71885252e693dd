//! # fixed_grid_pathfinding
//!
//! Grid pathfinding for embedded and resource-constrained navigation. Finds a route between two
//! cells of a fixed-size, 8-connected occupancy grid and returns it as a sequence of compass
//! [Direction]s. Grid size, frontier capacity and route capacity are const generics, and the
//! search itself doesn't allocate: the per-cell state lives in a dense [NodeGrid] arena, the
//! open set in a bounded sorted ring buffer ([Frontier]) and the output in a fixed [Route] buffer.
//!
//! The default [CostModel::AStar] orders the frontier by `g + h`, where `g` is the travelled
//! Euclidean distance and `h` the straight-line distance to the goal, so routes are shortest.
//! Optionally pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to reject unreachable goals without flood-filling the grid.
//!
//! ```
//! use fixed_grid_pathfinding::{find_path, Coord, Direction, MAP_SIZE};
//!
//! let grid = [[0u8; MAP_SIZE]; MAP_SIZE];
//! let route = find_path(&grid, Coord::new(0, 0), Coord::new(0, 2)).unwrap();
//! assert_eq!(route.as_slice(), &[Direction::East, Direction::East]);
//! ```
mod components;
mod cost;
mod direction;
mod error;
mod frontier;
mod node_grid;
mod route;
mod search;

pub use crate::components::Components;
pub use crate::cost::{euclidean, heuristic, Cost};
pub use crate::direction::Direction;
pub use crate::error::{PathError, Result};
pub use crate::frontier::{Frontier, FrontierEntry};
pub use crate::node_grid::{Coord, Node, NodeGrid, Occupancy, OccupancyRow};
pub use crate::route::{ParentChain, Route};
pub use crate::search::{CostModel, PathFinder, Search, SearchConfig, SearchState};

/// Side length of the default grid.
pub const MAP_SIZE: usize = 20;
/// Default route buffer length in steps.
pub const PATH_LENGTH: usize = 100;
/// Default frontier capacity. Every cell is queued at most once, so a frontier of this size
/// can't overflow on a default-sized grid.
pub const FRONTIER_CAPACITY: usize = MAP_SIZE * MAP_SIZE;

/// Computes a route on a [MAP_SIZE] grid with the default [SearchConfig], returning at most
/// [PATH_LENGTH] steps in start-to-goal order.
pub fn find_path<O: Occupancy + ?Sized>(
    occupancy: &O,
    start: Coord,
    goal: Coord,
) -> Result<Route<PATH_LENGTH>> {
    PathFinder::<MAP_SIZE, FRONTIER_CAPACITY>::default().find_path(occupancy, start, goal)
}
