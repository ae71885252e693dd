use crate::components::Components;
use crate::cost::{heuristic, Cost};
use crate::error::{PathError, Result};
use crate::frontier::Frontier;
use crate::node_grid::{Coord, NodeGrid, Occupancy};
use crate::route::Route;
use crate::{FRONTIER_CAPACITY, MAP_SIZE};
use log::{debug, info, trace};
use num_traits::Zero;

/// How a neighbour's cost and frontier priority are derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CostModel {
    /// A* with `f = g + h`: `g` sums Euclidean step lengths (1 straight, √2 diagonal) and `h`
    /// is the Euclidean distance to the goal. Queued nodes are relaxed when a cheaper `g` turns
    /// up, so routes are shortest.
    #[default]
    AStar,
    /// Cost of a neighbour is its distance to the goal plus the cost of the cell it was reached
    /// from, and the first arrival wins. Tends to hug the straight line to the goal but doesn't
    /// guarantee shortest routes.
    HeuristicChain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub cost_model: CostModel,
    /// Allows diagonal moves that squeeze between two orthogonally adjacent obstacles.
    pub allow_corner_cutting: bool,
    /// Upper bound on expanded cells before giving up; [None] runs until the frontier empties.
    pub max_expansions: Option<usize>,
    /// Rejects start/goal pairs on different connected components before searching. This is
    /// the only step of a search that allocates.
    pub component_check: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            cost_model: CostModel::AStar,
            allow_corner_cutting: true,
            max_expansions: None,
            component_check: false,
        }
    }
}

impl SearchConfig {
    pub fn with_cost_model(mut self, cost_model: CostModel) -> SearchConfig {
        self.cost_model = cost_model;
        self
    }

    pub fn with_corner_cutting(mut self, allow: bool) -> SearchConfig {
        self.allow_corner_cutting = allow;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> SearchConfig {
        self.max_expansions = Some(limit);
        self
    }

    pub fn with_component_check(mut self, enabled: bool) -> SearchConfig {
        self.component_check = enabled;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// The start cell is queued and nothing has been expanded yet.
    Initialized,
    Expanding,
    GoalReached(Coord),
    /// The frontier ran empty before the goal was popped.
    Exhausted,
}

/// One search over an owned [NodeGrid] and [Frontier]. Driven one expansion at a time with
/// [step](Search::step) or to completion with [run](Search::run).
#[derive(Clone, Debug)]
pub struct Search<const N: usize, const Q: usize> {
    grid: NodeGrid<N>,
    frontier: Frontier<Q>,
    start: Coord,
    goal: Coord,
    config: SearchConfig,
    state: SearchState,
    expansions: usize,
}

impl<const N: usize, const Q: usize> Search<N, Q> {
    /// Clears any search state left in `grid` and seeds the frontier with `start`. A start on
    /// an obstacle is never expanded, so such a search ends [Exhausted](SearchState::Exhausted).
    pub fn new(
        mut grid: NodeGrid<N>,
        start: Coord,
        goal: Coord,
        config: SearchConfig,
    ) -> Result<Search<N, Q>> {
        for coord in [start, goal] {
            if !grid.in_bounds(coord) {
                return Err(PathError::OutOfBounds {
                    coord,
                    size: grid.size(),
                });
            }
        }
        grid.reset_search_state();
        let mut search = Search {
            grid,
            frontier: Frontier::new(),
            start,
            goal,
            config,
            state: SearchState::Initialized,
            expansions: 0,
        };
        if !search.grid.node(start).obstacle {
            let priority = match config.cost_model {
                CostModel::AStar => heuristic(start, false, goal),
                CostModel::HeuristicChain => Cost::zero(),
            };
            search.frontier.push(start, priority)?;
            let node = search.grid.node_mut(start);
            node.cost = Some(Cost::zero());
            node.queued = true;
        }
        Ok(search)
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn grid(&self) -> &NodeGrid<N> {
        &self.grid
    }

    pub fn frontier(&self) -> &Frontier<Q> {
        &self.frontier
    }

    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Pops the cheapest frontier cell, marks it visited and either finishes on the goal or
    /// queues its neighbours. Terminal states are returned unchanged.
    pub fn step(&mut self) -> Result<SearchState> {
        if matches!(
            self.state,
            SearchState::GoalReached(_) | SearchState::Exhausted
        ) {
            return Ok(self.state);
        }
        if let Some(limit) = self.config.max_expansions {
            if self.expansions >= limit {
                return Err(PathError::ExpansionLimit { limit });
            }
        }
        let Some(entry) = self.frontier.pop_front() else {
            self.state = SearchState::Exhausted;
            return Ok(self.state);
        };
        let current = entry.coord;
        let node = self.grid.node_mut(current);
        node.queued = false;
        node.visited = true;
        self.expansions += 1;
        trace!("Expanding {} at priority {}", current, entry.priority);

        if current == self.goal {
            self.state = SearchState::GoalReached(current);
        } else {
            self.expand(current)?;
            self.state = SearchState::Expanding;
        }
        Ok(self.state)
    }

    fn expand(&mut self, current: Coord) -> Result<()> {
        let current_cost = self.grid.node(current).cost.unwrap_or_else(Cost::zero);
        for (neighbour, direction) in self
            .grid
            .neighbours(current, self.config.allow_corner_cutting)
        {
            let node = *self.grid.node(neighbour);
            if node.visited {
                continue;
            }
            let h = heuristic(neighbour, node.obstacle, self.goal);
            if !h.is_finite() {
                continue;
            }
            let (cost, priority) = match self.config.cost_model {
                CostModel::AStar => {
                    let g = current_cost + Cost::Finite(direction.step_length());
                    (g, g + h)
                }
                CostModel::HeuristicChain => {
                    let c = h + current_cost;
                    (c, c)
                }
            };
            if node.queued {
                if self.config.cost_model == CostModel::HeuristicChain
                    || node.cost.is_some_and(|old| cost >= old)
                {
                    continue;
                }
                let moved = self.frontier.reprioritize(neighbour, priority);
                debug_assert!(moved, "{} is marked queued but not in the frontier", neighbour);
            } else {
                self.frontier.push(neighbour, priority)?;
            }
            let node = self.grid.node_mut(neighbour);
            node.cost = Some(cost);
            node.parent = Some(current);
            node.direction = Some(direction);
            node.queued = true;
        }
        Ok(())
    }

    /// Steps until the goal is reached. An exhausted frontier is [PathError::Unreachable].
    pub fn run(&mut self) -> Result<Coord> {
        loop {
            match self.step()? {
                SearchState::GoalReached(goal) => return Ok(goal),
                SearchState::Exhausted => {
                    return Err(PathError::Unreachable {
                        start: self.start,
                        goal: self.goal,
                    })
                }
                SearchState::Initialized | SearchState::Expanding => {}
            }
        }
    }
}

/// Finds routes on `N x N` grids using a frontier of at most `Q` cells. Holds only its
/// configuration; every call builds and drops its own search state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathFinder<const N: usize = MAP_SIZE, const Q: usize = FRONTIER_CAPACITY> {
    pub config: SearchConfig,
}

impl<const N: usize, const Q: usize> PathFinder<N, Q> {
    pub fn new(config: SearchConfig) -> PathFinder<N, Q> {
        PathFinder { config }
    }

    /// Computes a route from `start` to `goal` into a new buffer of `L` steps.
    pub fn find_path<O: Occupancy + ?Sized, const L: usize>(
        &self,
        occupancy: &O,
        start: Coord,
        goal: Coord,
    ) -> Result<Route<L>> {
        let mut route = Route::new();
        self.find_path_into(occupancy, start, goal, &mut route)?;
        Ok(route)
    }

    /// Computes a route into caller-provided storage. The route is left empty on failure.
    pub fn find_path_into<O: Occupancy + ?Sized, const L: usize>(
        &self,
        occupancy: &O,
        start: Coord,
        goal: Coord,
        route: &mut Route<L>,
    ) -> Result<()> {
        route.clear();
        let grid = NodeGrid::<N>::build(occupancy)?;
        self.search_grid(grid, start, goal, route)
    }

    /// Like [find_path_into](Self::find_path_into) on an already built grid. Search state left
    /// in `grid` by an earlier search is discarded.
    pub fn search_grid<const L: usize>(
        &self,
        grid: NodeGrid<N>,
        start: Coord,
        goal: Coord,
        route: &mut Route<L>,
    ) -> Result<()> {
        route.clear();
        if self.config.component_check && grid.in_bounds(start) && grid.in_bounds(goal) {
            let components = Components::generate(&grid, self.config.allow_corner_cutting);
            if !components.reachable(start, goal) {
                info!("{} is not reachable from {}", goal, start);
                return Err(PathError::Unreachable { start, goal });
            }
            info!("{} is reachable from {}, computing path", goal, start);
        }
        let mut search = Search::<N, Q>::new(grid, start, goal, self.config)?;
        let reached = search.run().inspect_err(|e| {
            debug!(
                "Search from {} to {} failed after {} expansions: {}",
                start,
                goal,
                search.expansions(),
                e
            )
        });
        route.extract(search.grid(), reached?)?;
        debug!(
            "Route {} from {} to {} with cost {} after {} expansions",
            route,
            start,
            goal,
            route.cost(),
            search.expansions()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    type Finder5 = PathFinder<5, 25>;

    #[test]
    fn equal_start_goal() {
        for cost_model in [CostModel::AStar, CostModel::HeuristicChain] {
            let finder = Finder5::new(SearchConfig::default().with_cost_model(cost_model));
            let start = Coord::new(2, 2);
            let route: Route<8> = finder.find_path(&[[0u8; 5]; 5], start, start).unwrap();
            assert!(route.is_empty());
        }
    }

    #[test]
    fn state_machine_transitions() {
        let grid = NodeGrid::<5>::build(&[[false; 5]; 5]).unwrap();
        let mut search =
            Search::<5, 25>::new(grid, Coord::new(0, 0), Coord::new(0, 1), SearchConfig::default())
                .unwrap();
        assert_eq!(search.state(), SearchState::Initialized);
        assert_eq!(search.step().unwrap(), SearchState::Expanding);
        assert_eq!(search.frontier().len(), 3);
        assert_eq!(
            search.step().unwrap(),
            SearchState::GoalReached(Coord::new(0, 1))
        );
        // Terminal states are sticky
        assert_eq!(
            search.step().unwrap(),
            SearchState::GoalReached(Coord::new(0, 1))
        );
        assert_eq!(search.expansions(), 2);
    }

    #[test]
    fn rejects_out_of_bounds() {
        let finder = Finder5::default();
        let err = finder
            .find_path::<_, 8>(&[[0u8; 5]; 5], Coord::new(0, 0), Coord::new(5, 1))
            .unwrap_err();
        assert_eq!(
            err,
            PathError::OutOfBounds {
                coord: Coord::new(5, 1),
                size: 5
            }
        );
    }

    /// The goal can only be entered from below, so the route has to swing around the wall.
    #[test]
    fn routes_around_enclosure() {
        //  .....
        //  .###.
        //  S#G#.
        //  .#.#.
        //  .....
        let occupancy = [
            [0u8, 0, 0, 0, 0],
            [0, 1, 1, 1, 0],
            [0, 1, 0, 1, 0],
            [0, 1, 0, 1, 0],
            [0, 0, 0, 0, 0],
        ];
        let finder = Finder5::default();
        let start = Coord::new(2, 0);
        let goal = Coord::new(2, 2);
        let route: Route<16> = finder.find_path(&occupancy, start, goal).unwrap();
        assert_eq!(route.walk(start), Some(goal));
        assert_eq!(
            route.as_slice(),
            &[
                Direction::South,
                Direction::SouthEast,
                Direction::NorthEast,
                Direction::North
            ]
        );
        let expected = 2.0 + 2.0 * std::f32::consts::SQRT_2;
        assert!((route.cost().value().unwrap() - expected).abs() < 1e-4);
    }

    #[test]
    fn reused_grid_is_reset() {
        let finder = Finder5::default();
        let grid = NodeGrid::<5>::build(&[[false; 5]; 5]).unwrap();
        let mut search =
            Search::<5, 25>::new(grid, Coord::new(0, 0), Coord::new(4, 4), finder.config).unwrap();
        search.run().unwrap();
        assert!(search.grid().node(Coord::new(2, 2)).visited);

        let mut route: Route<8> = Route::new();
        finder
            .search_grid(
                search.grid().clone(),
                Coord::new(4, 4),
                Coord::new(0, 0),
                &mut route,
            )
            .unwrap();
        assert_eq!(route.as_slice(), &[Direction::NorthWest; 4]);
        assert_eq!(route.walk(Coord::new(4, 4)), Some(Coord::new(0, 0)));
    }

    /// Every frontier entry is an unvisited, queued cell that appears only once, including
    /// after A* relaxes a queued neighbour.
    #[test]
    fn frontier_holds_unvisited_cells_once() {
        for cost_model in [CostModel::AStar, CostModel::HeuristicChain] {
            let grid = NodeGrid::<8>::build(&[[false; 8]; 8]).unwrap();
            let config = SearchConfig::default().with_cost_model(cost_model);
            let mut search =
                Search::<8, 64>::new(grid, Coord::new(0, 3), Coord::new(7, 5), config).unwrap();
            loop {
                let state = search.step().unwrap();
                let mut queued: Vec<Coord> = search.frontier().iter().map(|e| e.coord).collect();
                for coord in &queued {
                    let node = search.grid().node(*coord);
                    assert!(!node.visited, "{} is queued after being visited", coord);
                    assert!(node.queued);
                }
                queued.sort();
                queued.dedup();
                assert_eq!(queued.len(), search.frontier().len());
                if matches!(state, SearchState::GoalReached(_) | SearchState::Exhausted) {
                    assert_eq!(state, SearchState::GoalReached(Coord::new(7, 5)));
                    break;
                }
            }
        }
    }

    #[test]
    fn heuristic_chain_keeps_first_arrival() {
        let grid = NodeGrid::<5>::build(&[[false; 5]; 5]).unwrap();
        let config = SearchConfig::default().with_cost_model(CostModel::HeuristicChain);
        let mut search =
            Search::<5, 25>::new(grid, Coord::new(0, 0), Coord::new(0, 2), config).unwrap();
        search.step().unwrap();
        let first = *search.grid().node(Coord::new(1, 1));
        assert_eq!(first.parent, Some(Coord::new(0, 0)));
        assert_eq!(first.direction, Some(Direction::SouthEast));
        search.step().unwrap();
        // Expanding (0,1) reaches (1,1) again but doesn't re-link it
        assert_eq!(*search.grid().node(Coord::new(1, 1)), first);
        assert_eq!(search.run().unwrap(), Coord::new(0, 2));
    }

    #[test]
    fn expansion_limit_is_reported() {
        let finder = Finder5::new(SearchConfig::default().with_max_expansions(2));
        let err = finder
            .find_path::<_, 8>(&[[0u8; 5]; 5], Coord::new(0, 0), Coord::new(4, 4))
            .unwrap_err();
        assert_eq!(err, PathError::ExpansionLimit { limit: 2 });
    }

    #[test]
    fn small_frontier_overflows() {
        let finder = PathFinder::<5, 2>::default();
        let err = finder
            .find_path::<_, 8>(&[[0u8; 5]; 5], Coord::new(2, 2), Coord::new(4, 4))
            .unwrap_err();
        assert_eq!(err, PathError::QueueOverflow { capacity: 2 });
    }

    #[test]
    fn blocked_start_is_unreachable() {
        let mut occupancy = [[0u8; 5]; 5];
        occupancy[0][0] = 1;
        let err = Finder5::default()
            .find_path::<_, 8>(&occupancy, Coord::new(0, 0), Coord::new(3, 3))
            .unwrap_err();
        assert!(matches!(err, PathError::Unreachable { .. }));
    }

    #[test]
    fn component_check_short_circuits() {
        let mut occupancy = [[0u8; 5]; 5];
        occupancy[2] = [1; 5];
        let finder = Finder5::new(
            SearchConfig::default()
                .with_component_check(true)
                .with_max_expansions(1),
        );
        // The expansion budget would trip first if the search actually ran
        let err = finder
            .find_path::<_, 8>(&occupancy, Coord::new(0, 0), Coord::new(4, 4))
            .unwrap_err();
        assert_eq!(
            err,
            PathError::Unreachable {
                start: Coord::new(0, 0),
                goal: Coord::new(4, 4)
            }
        );
    }
}
