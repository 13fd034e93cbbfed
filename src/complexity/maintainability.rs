/// Upper bound of the index, reached by an empty file
pub const MAX_INDEX: f64 = 171.0;

/// `max(0, 171 - 5.2 * CC - 0.23 * LOC)`
pub fn maintainability_index(cyclomatic: u32, lines_of_code: usize) -> f64 {
    let raw = MAX_INDEX - 5.2 * f64::from(cyclomatic) - 0.23 * lines_of_code as f64;
    raw.max(0.0)
}
