//! Magic-square puzzle state and verification.
//!
//! An N×N grid where every row and column must sum to the magic constant
//! (diagonals are not enforced). Cells are either fixed givens or editable
//! player cells.

/// State of one cell in the magic-square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CellState {
    /// A pre-filled given that cannot be edited.
    Fixed(i64),
    /// A player cell, empty (`None`) or holding a value.
    Editable(Option<i64>),
}

impl CellState {
    /// Returns the cell's value, if it has one.
    #[must_use]
    pub fn value(self) -> Option<i64> {
        match self {
            Self::Fixed(value) => Some(value),
            Self::Editable(value) => value,
        }
    }
}

/// Progress status of one magic-square puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MagicSquareStatus {
    /// The puzzle is still in progress.
    Playing,
    /// All cells are filled and every row and column sums to the constant.
    Won,
}

/// The complete state of a magic-square puzzle.
///
/// Transitions only touch editable cells; fixed cells and out-of-bounds
/// coordinates are ignored rather than treated as errors.
///
/// # Example
///
/// ```
/// use digitforge_core::magic_square::{CellState, MagicSquareState};
///
/// let mut state = MagicSquareState::new(
///     vec![
///         vec![CellState::Fixed(2), CellState::Fixed(7), CellState::Editable(None)],
///         vec![CellState::Fixed(9), CellState::Fixed(5), CellState::Fixed(1)],
///         vec![CellState::Fixed(4), CellState::Fixed(3), CellState::Fixed(8)],
///     ],
///     15,
/// );
/// assert!(!state.check_solution());
/// state.set_cell_value(0, 2, 6);
/// assert!(state.check_solution());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicSquareState {
    grid: Vec<Vec<CellState>>,
    size: usize,
    magic_constant: i64,
    selected_cell: Option<(usize, usize)>,
    status: MagicSquareStatus,
}

impl MagicSquareState {
    /// Creates a puzzle from a grid and its magic constant.
    ///
    /// # Panics
    ///
    /// Panics if the grid is not square.
    #[must_use]
    pub fn new(grid: Vec<Vec<CellState>>, magic_constant: i64) -> Self {
        let size = grid.len();
        assert!(grid.iter().all(|row| row.len() == size), "grid must be square");
        Self {
            grid,
            size,
            magic_constant,
            selected_cell: None,
            status: MagicSquareStatus::Playing,
        }
    }

    /// Returns the grid dimension N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the sum every row and column must reach.
    #[must_use]
    pub fn magic_constant(&self) -> i64 {
        self.magic_constant
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        self.grid.get(row)?.get(col).copied()
    }

    /// Returns the puzzle status.
    #[must_use]
    pub fn status(&self) -> MagicSquareStatus {
        self.status
    }

    /// Returns the currently selected cell, if any.
    #[must_use]
    pub fn selected_cell(&self) -> Option<(usize, usize)> {
        self.selected_cell
    }

    /// Selects a cell for input; out-of-bounds coordinates clear the selection.
    pub fn select_cell(&mut self, row: usize, col: usize) {
        self.selected_cell = (row < self.size && col < self.size).then_some((row, col));
    }

    /// Writes `value` into an editable cell. Fixed cells and out-of-bounds
    /// coordinates are left unchanged.
    ///
    /// Flips the status to [`MagicSquareStatus::Won`] when the write completes
    /// the square.
    pub fn set_cell_value(&mut self, row: usize, col: usize, value: i64) {
        if let Some(cell @ CellState::Editable(_)) =
            self.grid.get_mut(row).and_then(|r| r.get_mut(col))
        {
            *cell = CellState::Editable(Some(value));
        }
        if self.check_solution() {
            self.status = MagicSquareStatus::Won;
        }
    }

    /// Empties an editable cell. No-op for fixed cells and out-of-bounds
    /// coordinates.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        if let Some(cell @ CellState::Editable(_)) =
            self.grid.get_mut(row).and_then(|r| r.get_mut(col))
        {
            *cell = CellState::Editable(None);
        }
    }

    /// Returns the sum of `row`, or `None` while any of its cells is empty
    /// or the row is out of bounds.
    #[must_use]
    pub fn row_sum(&self, row: usize) -> Option<i64> {
        self.grid
            .get(row)?
            .iter()
            .map(|cell| cell.value())
            .sum()
    }

    /// Returns the sum of `col`, or `None` while any of its cells is empty
    /// or the column is out of bounds.
    #[must_use]
    pub fn col_sum(&self, col: usize) -> Option<i64> {
        if col >= self.size {
            return None;
        }
        self.grid.iter().map(|row| row[col].value()).sum()
    }

    /// Returns `true` when every cell is filled and every row and column sums
    /// to the magic constant.
    #[must_use]
    pub fn check_solution(&self) -> bool {
        (0..self.size).all(|i| {
            self.row_sum(i) == Some(self.magic_constant)
                && self.col_sum(i) == Some(self.magic_constant)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lo_shu_with_hole() -> MagicSquareState {
        MagicSquareState::new(
            vec![
                vec![
                    CellState::Fixed(2),
                    CellState::Fixed(7),
                    CellState::Editable(None),
                ],
                vec![
                    CellState::Fixed(9),
                    CellState::Editable(Some(5)),
                    CellState::Fixed(1),
                ],
                vec![
                    CellState::Fixed(4),
                    CellState::Fixed(3),
                    CellState::Fixed(8),
                ],
            ],
            15,
        )
    }

    #[test]
    fn test_sums_are_none_while_incomplete() {
        let state = lo_shu_with_hole();
        assert_eq!(state.row_sum(0), None);
        assert_eq!(state.row_sum(1), Some(15));
        assert_eq!(state.col_sum(2), None);
        assert_eq!(state.col_sum(0), Some(15));
        assert!(!state.check_solution());
    }

    #[test]
    fn test_completing_the_square_wins() {
        let mut state = lo_shu_with_hole();
        state.set_cell_value(0, 2, 6);
        assert!(state.check_solution());
        assert_eq!(state.status(), MagicSquareStatus::Won);
    }

    #[test]
    fn test_wrong_value_does_not_win() {
        let mut state = lo_shu_with_hole();
        state.set_cell_value(0, 2, 7);
        assert!(!state.check_solution());
        assert_eq!(state.status(), MagicSquareStatus::Playing);
        assert_eq!(state.row_sum(0), Some(16));
    }

    #[test]
    fn test_fixed_cells_are_immutable() {
        let mut state = lo_shu_with_hole();
        state.set_cell_value(0, 0, 99);
        assert_eq!(state.cell(0, 0), Some(CellState::Fixed(2)));
        state.clear_cell(0, 0);
        assert_eq!(state.cell(0, 0), Some(CellState::Fixed(2)));
    }

    #[test]
    fn test_clear_editable_cell() {
        let mut state = lo_shu_with_hole();
        state.clear_cell(1, 1);
        assert_eq!(state.cell(1, 1), Some(CellState::Editable(None)));
        assert_eq!(state.row_sum(1), None);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut state = lo_shu_with_hole();
        let before = state.clone();
        state.set_cell_value(9, 0, 1);
        state.clear_cell(0, 9);
        assert_eq!(state, before);
        assert_eq!(state.cell(9, 9), None);
        assert_eq!(state.row_sum(9), None);
        assert_eq!(state.col_sum(9), None);
    }

    #[test]
    fn test_cell_selection() {
        let mut state = lo_shu_with_hole();
        state.select_cell(0, 2);
        assert_eq!(state.selected_cell(), Some((0, 2)));
        state.select_cell(5, 5);
        assert_eq!(state.selected_cell(), None);
    }
}
