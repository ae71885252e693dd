//! Error type returned by every fallible search operation.

use crate::Coord;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("coordinate {coord} lies outside the {size}x{size} grid")]
    OutOfBounds { coord: Coord, size: usize },

    #[error("no route from {start} to {goal}")]
    Unreachable { start: Coord, goal: Coord },

    #[error("frontier queue is full (capacity {capacity})")]
    QueueOverflow { capacity: usize },

    #[error("occupancy grid is {rows}x{cols}, expected {expected}x{expected}")]
    InvalidGrid {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("route needs {required} steps but the buffer holds {capacity}")]
    RouteOverflow { capacity: usize, required: usize },

    #[error("search gave up after {limit} expansions")]
    ExpansionLimit { limit: usize },
}

pub type Result<T> = std::result::Result<T, PathError>;
