use crate::cost::Cost;
use crate::direction::Direction;
use crate::error::{PathError, Result};
use core::fmt;
use grid_util::point::Point;
use smallvec::SmallVec;

/// A cell position. Rows grow southward and columns grow eastward, so [Direction::South]
/// increases `row` and [Direction::East] increases `col`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }

    /// The adjacent coordinate in `direction`, or [None] if it would leave the non-negative
    /// quadrant. The upper bound is checked by [NodeGrid::step].
    pub fn offset(self, direction: Direction) -> Option<Coord> {
        let (dr, dc) = direction.offset();
        Some(Coord {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Converts to grid_util's `x`/`y` convention: `x` is the column and `y` the row.
impl From<Coord> for Point {
    fn from(coord: Coord) -> Point {
        Point::new(coord.col as i32, coord.row as i32)
    }
}

/// One row of an occupancy input.
pub trait OccupancyRow {
    fn cells(&self) -> usize;
    fn is_blocked(&self, col: usize) -> bool;
}

impl<const M: usize> OccupancyRow for [bool; M] {
    fn cells(&self) -> usize {
        M
    }
    fn is_blocked(&self, col: usize) -> bool {
        self[col]
    }
}

impl<const M: usize> OccupancyRow for [u8; M] {
    fn cells(&self) -> usize {
        M
    }
    fn is_blocked(&self, col: usize) -> bool {
        self[col] != 0
    }
}

impl OccupancyRow for Vec<bool> {
    fn cells(&self) -> usize {
        self.len()
    }
    fn is_blocked(&self, col: usize) -> bool {
        self[col]
    }
}

impl OccupancyRow for Vec<u8> {
    fn cells(&self) -> usize {
        self.len()
    }
    fn is_blocked(&self, col: usize) -> bool {
        self[col] != 0
    }
}

impl OccupancyRow for &[bool] {
    fn cells(&self) -> usize {
        self.len()
    }
    fn is_blocked(&self, col: usize) -> bool {
        self[col]
    }
}

impl OccupancyRow for &[u8] {
    fn cells(&self) -> usize {
        self.len()
    }
    fn is_blocked(&self, col: usize) -> bool {
        self[col] != 0
    }
}

/// Caller-owned obstacle map, indexed `[row][col]`. Byte cells are obstacles when non-zero.
pub trait Occupancy {
    fn rows(&self) -> usize;
    fn row_len(&self, row: usize) -> usize;
    fn blocked(&self, row: usize, col: usize) -> bool;
}

impl<R: OccupancyRow> Occupancy for [R] {
    fn rows(&self) -> usize {
        self.len()
    }
    fn row_len(&self, row: usize) -> usize {
        self[row].cells()
    }
    fn blocked(&self, row: usize, col: usize) -> bool {
        self[row].is_blocked(col)
    }
}

impl<R: OccupancyRow, const K: usize> Occupancy for [R; K] {
    fn rows(&self) -> usize {
        K
    }
    fn row_len(&self, row: usize) -> usize {
        self[row].cells()
    }
    fn blocked(&self, row: usize, col: usize) -> bool {
        self[row].is_blocked(col)
    }
}

impl<R: OccupancyRow> Occupancy for Vec<R> {
    fn rows(&self) -> usize {
        self.len()
    }
    fn row_len(&self, row: usize) -> usize {
        self[row].cells()
    }
    fn blocked(&self, row: usize, col: usize) -> bool {
        self[row].is_blocked(col)
    }
}

/// Per-cell search state. Parents are stored as coordinates into the owning [NodeGrid].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub coord: Coord,
    pub obstacle: bool,
    pub visited: bool,
    pub queued: bool,
    pub cost: Option<Cost>,
    pub direction: Option<Direction>,
    pub parent: Option<Coord>,
}

impl Node {
    const UNSET: Node = Node {
        coord: Coord::new(0, 0),
        obstacle: false,
        visited: false,
        queued: false,
        cost: None,
        direction: None,
        parent: None,
    };
}

/// Dense `N x N` arena holding the search state of every cell.
#[derive(Clone, Debug)]
pub struct NodeGrid<const N: usize> {
    nodes: [[Node; N]; N],
}

impl<const N: usize> NodeGrid<N> {
    /// Builds a fresh grid from the occupancy input. Fails if the input isn't exactly `N x N`.
    pub fn build<O: Occupancy + ?Sized>(occupancy: &O) -> Result<NodeGrid<N>> {
        let rows = occupancy.rows();
        if rows != N {
            let cols = if rows > 0 { occupancy.row_len(0) } else { 0 };
            return Err(PathError::InvalidGrid {
                expected: N,
                rows,
                cols,
            });
        }
        if let Some(cols) = (0..rows)
            .map(|row| occupancy.row_len(row))
            .find(|&len| len != N)
        {
            return Err(PathError::InvalidGrid {
                expected: N,
                rows,
                cols,
            });
        }

        let mut nodes = [[Node::UNSET; N]; N];
        for (row, cells) in nodes.iter_mut().enumerate() {
            for (col, node) in cells.iter_mut().enumerate() {
                node.coord = Coord::new(row, col);
                node.obstacle = occupancy.blocked(row, col);
            }
        }
        Ok(NodeGrid { nodes })
    }

    /// Clears everything a previous search left behind, keeping only coordinates and obstacles.
    pub fn reset_search_state(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            *node = Node {
                coord: node.coord,
                obstacle: node.obstacle,
                ..Node::UNSET
            };
        }
    }

    pub fn size(&self) -> usize {
        N
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < N && coord.col < N
    }

    /// Panics if `coord` is out of bounds; callers check with [in_bounds](Self::in_bounds) first.
    pub fn node(&self, coord: Coord) -> &Node {
        &self.nodes[coord.row][coord.col]
    }

    pub fn node_mut(&mut self, coord: Coord) -> &mut Node {
        &mut self.nodes[coord.row][coord.col]
    }

    pub fn get(&self, coord: Coord) -> Option<&Node> {
        self.nodes.get(coord.row).and_then(|cells| cells.get(coord.col))
    }

    pub fn is_obstacle(&self, coord: Coord) -> bool {
        self.get(coord).map_or(true, |node| node.obstacle)
    }

    pub fn step(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        coord.offset(direction).filter(|c| self.in_bounds(*c))
    }

    /// Whether moving from `from` in `direction` stays on the grid without entering an obstacle.
    /// Without corner cutting a diagonal move also needs both cells it brushes past to be free.
    pub fn can_move(&self, from: Coord, direction: Direction, allow_corner_cutting: bool) -> bool {
        let Some(to) = self.step(from, direction) else {
            return false;
        };
        if self.node(to).obstacle {
            return false;
        }
        allow_corner_cutting || self.corner_clear(from, to, direction)
    }

    fn corner_clear(&self, from: Coord, to: Coord, direction: Direction) -> bool {
        !direction.diagonal()
            || (!self.is_obstacle(Coord::new(from.row, to.col))
                && !self.is_obstacle(Coord::new(to.row, from.col)))
    }

    /// In-bounds neighbours of `coord` with the direction leading to each, in direction-code
    /// order. Obstacles are included unless corner cutting rules exclude the move; the search
    /// filters them through their infeasible cost.
    pub fn neighbours(
        &self,
        coord: Coord,
        allow_corner_cutting: bool,
    ) -> SmallVec<[(Coord, Direction); 8]> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.step(coord, d).map(|n| (n, d)))
            .filter(|&(n, d)| allow_corner_cutting || self.corner_clear(coord, n, d))
            .collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }
}

impl<const N: usize> fmt::Display for NodeGrid<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for cells in &self.nodes {
            let values = cells
                .iter()
                .map(|node| node.obstacle as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
