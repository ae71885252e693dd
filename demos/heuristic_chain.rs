use fixed_grid_pathfinding::{Coord, CostModel, PathFinder, Route, SearchConfig};

// Compares the default A* cost model with the heuristic chain, which sums goal distances along
// the route and keeps the first way it finds into a cell. The chain is drawn toward the straight
// line to the goal and can return longer routes around obstacles.

fn main() {
    const N: usize = 12;
    let mut occupancy = [[false; N]; N];
    for row in occupancy.iter_mut().take(9).skip(2) {
        row[6] = true;
    }
    for col in 3..7 {
        occupancy[8][col] = true;
    }
    let start = Coord::new(5, 1);
    let end = Coord::new(5, 10);
    for cost_model in [CostModel::AStar, CostModel::HeuristicChain] {
        let finder: PathFinder<N, { N * N }> =
            PathFinder::new(SearchConfig::default().with_cost_model(cost_model));
        let route: Route<64> = finder.find_path(&occupancy, start, end).unwrap();
        let length: f32 = route.iter().map(|d| d.step_length()).sum();
        println!("{:?}: {} steps, length {:.3}", cost_model, route.len(), length);
        println!("{}", route);
    }
}
