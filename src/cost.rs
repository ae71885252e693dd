use crate::Coord;
use core::fmt;
use num_traits::Zero;
use std::cmp::Ordering;
use std::ops::Add;

/// Search cost of a cell. [Cost::Infeasible] marks cells that can never be part of a route and
/// orders above every finite cost, so it can't be overtaken by accumulating finite values.
#[derive(Clone, Copy, Debug)]
pub enum Cost {
    Finite(f32),
    Infeasible,
}

impl Cost {
    pub fn is_finite(&self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    pub fn value(&self) -> Option<f32> {
        match *self {
            Cost::Finite(v) => Some(v),
            Cost::Infeasible => None,
        }
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cost::Finite(a), Cost::Finite(b)) => a.total_cmp(b),
            (Cost::Finite(_), Cost::Infeasible) => Ordering::Less,
            (Cost::Infeasible, Cost::Finite(_)) => Ordering::Greater,
            (Cost::Infeasible, Cost::Infeasible) => Ordering::Equal,
        }
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        match (self, rhs) {
            (Cost::Finite(a), Cost::Finite(b)) => Cost::Finite(a + b),
            _ => Cost::Infeasible,
        }
    }
}

impl Zero for Cost {
    fn zero() -> Cost {
        Cost::Finite(0.0)
    }

    fn is_zero(&self) -> bool {
        matches!(self, Cost::Finite(v) if *v == 0.0)
    }
}

impl From<f32> for Cost {
    fn from(value: f32) -> Cost {
        Cost::Finite(value)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cost::Finite(v) => write!(f, "{v:.3}"),
            Cost::Infeasible => f.write_str("inf"),
        }
    }
}

/// Straight-line distance between two cells.
pub fn euclidean(a: Coord, b: Coord) -> f32 {
    let dr = a.row.abs_diff(b.row) as f32;
    let dc = a.col.abs_diff(b.col) as f32;
    (dr * dr + dc * dc).sqrt()
}

/// Estimated cost from a cell to the goal: [Cost::Infeasible] on obstacles, the Euclidean
/// distance otherwise.
pub fn heuristic(cell: Coord, obstacle: bool, goal: Coord) -> Cost {
    if obstacle {
        Cost::Infeasible
    } else {
        Cost::Finite(euclidean(cell, goal))
    }
}
