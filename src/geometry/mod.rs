use num_traits::{Num, Signed};


/// Manhattan distance
/// Admissible estimate on 4-connected grids where every step costs at least 1
pub fn manhattan_distance<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}
