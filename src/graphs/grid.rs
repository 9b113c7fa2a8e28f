use crate::errors::PathFinderError;
use crate::geometry::manhattan_distance;
use crate::graph::{Graph, GraphNode};

use std::{fmt, str::FromStr};


/// Position on a grid, x is the column and y the row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A cell is named by its own coordinates
impl GraphNode for Cell {
    type Name = Cell;

    fn name(&self) -> &Cell {
        self
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}


/// 4-connected grid with terrain costs
///
/// Parsed from text, one line per row:
/// - `.` open cell, costs 1 to enter
/// - `1` to `9` open cell with that entering cost
/// - `#` wall
///
/// Moving into a cell costs that cell's terrain cost. Every cost is at least
/// 1, so the manhattan distance never overestimates and is used as heuristic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridGraph {
    width: usize,
    height: usize,
    costs: Vec<Option<u32>>, // row major, None is a wall
}

impl GridGraph {

    /// Build a grid from its rows, all rows must have the same length
    pub fn from_rows<I, S>(rows: I) -> Result<Self, PathFinderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut width = None;
        let mut height = 0;
        let mut costs = Vec::new();

        for (row, line) in rows.into_iter().enumerate() {
            let line = line.as_ref();
            let mut row_width = 0;
            for (column, found) in line.chars().enumerate() {
                let cost = match found {
                    '.' => Some(1),
                    '#' => None,
                    '1'..='9' => found.to_digit(10),
                    _ => return Err(PathFinderError::InvalidGrid { row, column, found }),
                };
                costs.push(cost);
                row_width += 1;
            }

            let expected = *width.get_or_insert(row_width);
            if row_width != expected {
                return Err(PathFinderError::RaggedGrid { row, expected, found: row_width });
            }
            height += 1;
        }

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            costs,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cost of entering `cell`, None for walls and cells off the grid
    pub fn terrain_cost(&self, cell: Cell) -> Option<u32> {
        let x = usize::try_from(cell.x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(cell.y).ok().filter(|&y| y < self.height)?;
        self.costs[y * self.width + x]
    }

    pub fn is_open(&self, cell: Cell) -> bool {
        self.terrain_cost(cell).is_some()
    }
}

impl FromStr for GridGraph {
    type Err = PathFinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(s.lines())
    }
}

impl Graph for GridGraph {
    type Node = Cell;
    type Cost = u32;

    fn neighbors(&self, node: &Cell) -> impl IntoIterator<Item = Cell> {
        let origin = *node;
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .filter_map(move |(dx, dy)| Some(Cell::new(origin.x.checked_add(dx)?, origin.y.checked_add(dy)?)))
            .filter(move |&cell| self.is_open(cell))
    }

    fn edge_cost(&self, from: &Cell, to: &Cell) -> Result<u32, PathFinderError> {
        let adjacent = manhattan_distance(
            i64::from(from.x), i64::from(from.y), i64::from(to.x), i64::from(to.y)
        ) == 1;
        match self.terrain_cost(*to) {
            Some(cost) if adjacent => Ok(cost),
            _ => Err(PathFinderError::NotAdjacent {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    fn estimate_cost(&self, node: &Cell, target: &Cell) -> u32 {
        // i64 holds any distance between two i32 cells, saturate to stay admissible
        let distance = manhattan_distance(
            i64::from(node.x), i64::from(node.y), i64::from(target.x), i64::from(target.y)
        );
        u32::try_from(distance).unwrap_or(u32::MAX)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid() {
        let grid: GridGraph = "..#\n.5.".parse().unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.terrain_cost(Cell::new(0, 0)), Some(1));
        assert_eq!(grid.terrain_cost(Cell::new(2, 0)), None);
        assert_eq!(grid.terrain_cost(Cell::new(1, 1)), Some(5));
        assert_eq!(grid.terrain_cost(Cell::new(3, 0)), None);
        assert_eq!(grid.terrain_cost(Cell::new(-1, 0)), None);
        assert!(!grid.is_open(Cell::new(0, 2)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "..\n.x".parse::<GridGraph>(),
            Err(PathFinderError::InvalidGrid { row: 1, column: 1, found: 'x' })
        );
        assert_eq!(
            "...\n..".parse::<GridGraph>(),
            Err(PathFinderError::RaggedGrid { row: 1, expected: 3, found: 2 })
        );

        let empty = GridGraph::from_rows(Vec::<String>::new()).unwrap();
        assert_eq!((empty.width(), empty.height()), (0, 0));
    }

    #[test]
    fn test_neighbors_skip_walls_and_edges() {
        let grid: GridGraph = [".#", ".."].join("\n").parse().unwrap();

        let neighbors: Vec<Cell> = grid.neighbors(&Cell::new(0, 0)).into_iter().collect();
        assert_eq!(neighbors, vec![Cell::new(0, 1)]);

        let neighbors: Vec<Cell> = grid.neighbors(&Cell::new(1, 1)).into_iter().collect();
        assert_eq!(neighbors, vec![Cell::new(0, 1)]);
    }

    #[test]
    fn test_edge_cost_is_entering_cost() {
        let grid: GridGraph = "17\n..".parse().unwrap();

        assert_eq!(grid.edge_cost(&Cell::new(0, 0), &Cell::new(1, 0)), Ok(7));
        assert_eq!(grid.edge_cost(&Cell::new(1, 0), &Cell::new(0, 0)), Ok(1));
        assert!(matches!(
            grid.edge_cost(&Cell::new(0, 0), &Cell::new(1, 1)),
            Err(PathFinderError::NotAdjacent { .. })
        ));
        assert_eq!(grid.estimate_cost(&Cell::new(0, 0), &Cell::new(1, 1)), 2);
    }

    #[test]
    fn test_cells_at_coordinate_limits() {
        let grid: GridGraph = "..\n..".parse().unwrap();
        let far = Cell::new(i32::MAX, i32::MIN);

        assert_eq!(grid.neighbors(&far).into_iter().count(), 0);
        assert!(grid.edge_cost(&far, &Cell::new(0, 0)).is_err());
        assert_eq!(grid.estimate_cost(&far, &Cell::new(i32::MIN, i32::MAX)), u32::MAX);
        assert_eq!(grid.estimate_cost(&Cell::new(i32::MAX, 0), &Cell::new(0, 0)), i32::MAX as u32);
    }
}
