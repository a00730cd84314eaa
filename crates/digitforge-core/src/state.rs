use crate::{Operation, SolutionStep};

/// Progress status of one digits puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    /// The puzzle is still in progress.
    Playing,
    /// A tile equal to the target has been produced.
    Won,
    /// The countdown expired before the target was reached.
    Timeout,
}

/// Snapshot taken before a move so that it can be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Tile multiset before the move.
    pub numbers: Vec<i64>,
    /// Selected tile indices before the move.
    pub selected_indices: Vec<usize>,
    /// Selected operator before the move.
    pub selected_operation: Option<Operation>,
}

/// Why a move was rejected.
///
/// Rejections are ordinary outcomes, not failures: the state is left untouched
/// and the caller branches on the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Both operand indices refer to the same tile.
    #[display("cannot combine a tile with itself")]
    SameIndex,
    /// An operand index is outside the current tile list.
    #[display("tile index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of tiles currently on the board.
        len: usize,
    },
    /// The operator is undefined for these operands (inexact or zero division).
    #[display("operation is undefined for these operands")]
    Undefined,
    /// The result would be zero or negative, which the game disallows.
    #[display("result {result} is not a positive number")]
    NonPositiveResult {
        /// The rejected result.
        result: i64,
    },
}

/// The complete state of one digits puzzle.
///
/// Players repeatedly combine two tiles with an operator until one tile equals
/// the target. Every successful move removes two tiles and adds one, so
/// `numbers.len()` always equals `initial_numbers.len() - move_count`.
///
/// All transitions are synchronous: they either mutate the state and succeed,
/// or leave it untouched and report why. There are no panics on bad input.
///
/// # Example
///
/// ```
/// use digitforge_core::{GameState, GameStatus, Operation};
///
/// let mut state = GameState::new(8, vec![5, 3, 2]);
/// state.toggle_select(0);
/// state.toggle_select(1);
/// state.select_operation(Operation::Add);
/// state.execute_move();
///
/// assert_eq!(state.status(), GameStatus::Won);
/// assert_eq!(state.message(), "5 + 3 = 8");
/// assert_eq!(state.numbers(), &[2, 8]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    target: i64,
    numbers: Vec<i64>,
    initial_numbers: Vec<i64>,
    selected_indices: Vec<usize>,
    selected_operation: Option<Operation>,
    history: Vec<HistoryEntry>,
    status: GameStatus,
    move_count: usize,
    message: String,
    solution: Option<Vec<SolutionStep>>,
}

impl GameState {
    /// Creates a fresh puzzle with the given target and starting tiles.
    #[must_use]
    pub fn new(target: i64, numbers: Vec<i64>) -> Self {
        Self {
            target,
            initial_numbers: numbers.clone(),
            numbers,
            selected_indices: Vec::new(),
            selected_operation: None,
            history: Vec::new(),
            status: GameStatus::Playing,
            move_count: 0,
            message: String::new(),
            solution: None,
        }
    }

    /// Creates a fresh puzzle carrying a known solution trace.
    #[must_use]
    pub fn with_solution(target: i64, numbers: Vec<i64>, solution: Vec<SolutionStep>) -> Self {
        let mut state = Self::new(target, numbers);
        state.solution = Some(solution);
        state
    }

    /// Returns the number the player must produce.
    #[must_use]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Returns the current tiles. Order matters only for display indexing.
    #[must_use]
    pub fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    /// Returns the starting tiles, retained for restart.
    #[must_use]
    pub fn initial_numbers(&self) -> &[i64] {
        &self.initial_numbers
    }

    /// Returns the currently selected tile indices (at most two).
    #[must_use]
    pub fn selected_indices(&self) -> &[usize] {
        &self.selected_indices
    }

    /// Returns the currently selected operator, if any.
    #[must_use]
    pub fn selected_operation(&self) -> Option<Operation> {
        self.selected_operation
    }

    /// Returns the move log, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the puzzle status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns how many successful moves have been made.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Returns the last user-facing status or result text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the cached solution trace, if one is known.
    #[must_use]
    pub fn solution(&self) -> Option<&[SolutionStep]> {
        self.solution.as_deref()
    }

    /// Caches a solution trace (e.g. one computed on demand by the search).
    pub fn set_solution(&mut self, solution: Option<Vec<SolutionStep>>) {
        self.solution = solution;
    }

    /// Returns `true` if a tile equal to the target exists and the puzzle has
    /// not timed out.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.numbers.contains(&self.target) && self.status != GameStatus::Timeout
    }

    /// Marks the puzzle as timed out.
    ///
    /// A timed-out puzzle can no longer transition to [`GameStatus::Won`].
    pub fn mark_timeout(&mut self) {
        self.status = GameStatus::Timeout;
    }

    /// Toggles tile selection.
    ///
    /// Clicking a selected tile deselects it. Clicking a third tile while two
    /// are selected keeps the first selection and swaps in the new one, so a
    /// miss-click can be corrected without starting over. Out-of-bounds
    /// indices are ignored.
    pub fn toggle_select(&mut self, index: usize) {
        if index >= self.numbers.len() {
            return;
        }
        if let Some(pos) = self.selected_indices.iter().position(|&i| i == index) {
            self.selected_indices.remove(pos);
        } else if self.selected_indices.len() == 2 {
            self.selected_indices[1] = index;
        } else {
            self.selected_indices.push(index);
        }
    }

    /// Selects the operator for the next move.
    pub fn select_operation(&mut self, operation: Operation) {
        self.selected_operation = Some(operation);
    }

    /// Returns a preview of the pending move, or an empty string when fewer
    /// than two tiles or no operator are selected.
    #[must_use]
    pub fn preview_message(&self) -> String {
        let Some(operation) = self.selected_operation else {
            return String::new();
        };
        let [i1, i2] = self.selected_indices[..] else {
            return String::new();
        };
        let a = self.numbers[i1];
        let b = self.numbers[i2];
        match operation.apply(a, b) {
            Some(result) => format!("{a} {} {b} = {result}", operation.symbol()),
            None => "Invalid operation".to_owned(),
        }
    }

    /// Combines the tiles at `index1` and `index2` with `operation`.
    ///
    /// On success the two operands are replaced by the result, a history
    /// entry is pushed, the selection is cleared, the move counter advances,
    /// and the status flips to [`GameStatus::Won`] if the target tile now
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] and leaves the state untouched when the indices
    /// coincide or are out of bounds, the operator is undefined for the
    /// operands, or the result would not be a positive number.
    pub fn apply_operation(
        &mut self,
        index1: usize,
        index2: usize,
        operation: Operation,
    ) -> Result<(), MoveError> {
        if index1 == index2 {
            return Err(MoveError::SameIndex);
        }
        let len = self.numbers.len();
        for index in [index1, index2] {
            if index >= len {
                return Err(MoveError::IndexOutOfBounds { index, len });
            }
        }

        let a = self.numbers[index1];
        let b = self.numbers[index2];
        let result = operation.apply(a, b).ok_or(MoveError::Undefined)?;
        if result <= 0 {
            return Err(MoveError::NonPositiveResult { result });
        }

        self.history.push(HistoryEntry {
            numbers: self.numbers.clone(),
            selected_indices: self.selected_indices.clone(),
            selected_operation: self.selected_operation,
        });

        // Remove the larger index first so the smaller one stays valid.
        self.numbers.remove(index1.max(index2));
        self.numbers.remove(index1.min(index2));
        self.numbers.push(result);

        self.selected_indices.clear();
        self.selected_operation = None;
        self.move_count += 1;
        self.message = format!("{a} {} {b} = {result}", operation.symbol());

        if self.is_won() {
            self.status = GameStatus::Won;
        }
        Ok(())
    }

    /// Executes the pending move from the current selection.
    ///
    /// Requires two selected tiles and an operator; otherwise only the message
    /// is updated. The selected order is tried first; for non-commutative
    /// operators the swapped order is tried as a fallback, so the player never
    /// has to pre-sort operands for subtraction or division.
    pub fn execute_move(&mut self) {
        let (Some(operation), &[i1, i2]) = (self.selected_operation, &self.selected_indices[..])
        else {
            self.message = "Select two numbers and an operation".to_owned();
            return;
        };

        if self.apply_operation(i1, i2, operation).is_ok() {
            return;
        }
        if !operation.is_commutative() && self.apply_operation(i2, i1, operation).is_ok() {
            return;
        }
        self.message = "Invalid operation".to_owned();
    }

    /// Undoes the last move, restoring the pre-move tiles.
    ///
    /// No-op when the history is empty. The selection and operator are
    /// cleared rather than restored.
    pub fn undo(&mut self) {
        let Some(entry) = self.history.pop() else {
            return;
        };
        self.numbers = entry.numbers;
        self.selected_indices.clear();
        self.selected_operation = None;
        self.move_count = self.move_count.saturating_sub(1);
        self.message = "Move undone".to_owned();
    }

    /// Resets the puzzle to its starting tiles.
    ///
    /// The target and any cached solution are kept.
    pub fn restart(&mut self) {
        self.numbers = self.initial_numbers.clone();
        self.selected_indices.clear();
        self.selected_operation = None;
        self.history.clear();
        self.status = GameStatus::Playing;
        self.move_count = 0;
        self.message = "Puzzle restarted".to_owned();
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_apply_operation_conserves_tiles() {
        let mut state = GameState::new(100, vec![4, 7, 9]);
        state.apply_operation(0, 2, Operation::Add).unwrap();

        assert_eq!(state.numbers(), &[7, 13]);
        assert_eq!(state.move_count(), 1);
        assert_eq!(state.message(), "4 + 9 = 13");
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_apply_operation_rejections_leave_state_untouched() {
        let state = GameState::new(100, vec![5, 3, 2]);

        let mut s = state.clone();
        assert_eq!(s.apply_operation(1, 1, Operation::Add), Err(MoveError::SameIndex));
        assert_eq!(s, state);

        let mut s = state.clone();
        assert_eq!(
            s.apply_operation(0, 3, Operation::Add),
            Err(MoveError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(s, state);

        // 5 / 3 is not exact.
        let mut s = state.clone();
        assert_eq!(s.apply_operation(0, 1, Operation::Div), Err(MoveError::Undefined));
        assert_eq!(s, state);

        // 3 - 5 would be negative, 3 - 3 would be zero.
        let mut s = state.clone();
        assert_eq!(
            s.apply_operation(1, 0, Operation::Sub),
            Err(MoveError::NonPositiveResult { result: -2 })
        );
        assert_eq!(s, state);
    }

    #[test]
    fn test_subtraction_to_zero_is_rejected() {
        let mut state = GameState::new(10, vec![4, 4]);
        assert_eq!(
            state.apply_operation(0, 1, Operation::Sub),
            Err(MoveError::NonPositiveResult { result: 0 })
        );
    }

    #[test]
    fn test_win_detection() {
        let mut state = GameState::new(8, vec![5, 3, 2]);
        state.apply_operation(0, 1, Operation::Add).unwrap();

        assert_eq!(state.status(), GameStatus::Won);
        assert!(state.numbers().contains(&8));
        assert!(state.is_won());
    }

    #[test]
    fn test_timeout_blocks_win() {
        let mut state = GameState::new(8, vec![5, 3, 2]);
        state.mark_timeout();
        state.apply_operation(0, 1, Operation::Add).unwrap();

        assert_eq!(state.status(), GameStatus::Timeout);
        assert!(!state.is_won());
    }

    #[test]
    fn test_execute_move_requires_full_selection() {
        let mut state = GameState::new(100, vec![5, 3, 2]);
        state.toggle_select(0);
        state.execute_move();

        assert_eq!(state.message(), "Select two numbers and an operation");
        assert_eq!(state.numbers(), &[5, 3, 2]);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_execute_move_retries_swapped_order() {
        // 3 - 5 fails, 5 - 3 succeeds; the player never pre-sorts operands.
        let mut state = GameState::new(100, vec![3, 5, 2]);
        state.toggle_select(0);
        state.toggle_select(1);
        state.select_operation(Operation::Sub);
        state.execute_move();

        assert_eq!(state.numbers(), &[2, 2]);
        assert_eq!(state.message(), "5 - 3 = 2");
    }

    #[test]
    fn test_execute_move_invalid_sets_message_only() {
        let mut state = GameState::new(100, vec![5, 3, 2]);
        state.toggle_select(0);
        state.toggle_select(1);
        state.select_operation(Operation::Div);
        state.execute_move();

        assert_eq!(state.message(), "Invalid operation");
        assert_eq!(state.numbers(), &[5, 3, 2]);
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_undo_restores_previous_tiles() {
        let mut state = GameState::new(100, vec![5, 3, 2]);
        state.apply_operation(0, 1, Operation::Add).unwrap();
        assert_eq!(state.numbers(), &[2, 8]);

        state.undo();
        assert_eq!(state.numbers(), &[5, 3, 2]);
        assert_eq!(state.move_count(), 0);
        assert_eq!(state.message(), "Move undone");
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut state = GameState::new(100, vec![5, 3, 2]);
        let before = state.clone();
        state.undo();
        assert_eq!(state, before);
    }

    #[test]
    fn test_restart_resets_everything_but_target_and_solution() {
        let mut state = GameState::new(100, vec![5, 3, 2]);
        state.apply_operation(0, 1, Operation::Add).unwrap();
        state.toggle_select(0);
        state.select_operation(Operation::Mul);
        state.restart();

        assert_eq!(state.numbers(), state.initial_numbers());
        assert_eq!(state.move_count(), 0);
        assert!(state.history().is_empty());
        assert!(state.selected_indices().is_empty());
        assert_eq!(state.selected_operation(), None);
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.target(), 100);
        assert_eq!(state.message(), "Puzzle restarted");
    }

    #[test]
    fn test_selection_toggling() {
        let mut state = GameState::new(100, vec![5, 3, 2, 7]);

        state.toggle_select(0);
        state.toggle_select(1);
        assert_eq!(state.selected_indices(), &[0, 1]);

        // Third click swaps the second selection.
        state.toggle_select(2);
        assert_eq!(state.selected_indices(), &[0, 2]);

        // Clicking a selected tile deselects it.
        state.toggle_select(0);
        assert_eq!(state.selected_indices(), &[2]);

        // Out of bounds is ignored.
        state.toggle_select(99);
        assert_eq!(state.selected_indices(), &[2]);
    }

    #[test]
    fn test_preview_message() {
        let mut state = GameState::new(100, vec![5, 3, 2]);
        assert_eq!(state.preview_message(), "");

        state.toggle_select(0);
        state.toggle_select(1);
        state.select_operation(Operation::Add);
        assert_eq!(state.preview_message(), "5 + 3 = 8");

        state.select_operation(Operation::Div);
        assert_eq!(state.preview_message(), "Invalid operation");
    }

    fn arb_board() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(1_i64..=25, 2..=6)
    }

    proptest! {
        #[test]
        fn prop_successful_moves_conserve_tiles(
            numbers in arb_board(),
            i1 in 0_usize..6,
            i2 in 0_usize..6,
            op_index in 0_usize..4,
        ) {
            let operation = Operation::ALL[op_index];
            let mut state = GameState::new(10_000, numbers.clone());
            let before = state.numbers().to_vec();

            if state.apply_operation(i1, i2, operation).is_ok() {
                prop_assert_eq!(state.numbers().len(), before.len() - 1);

                // The multiset after equals (before - {a, b}) + {result}.
                let result = operation.apply(before[i1], before[i2]).unwrap();
                let mut expected = before;
                expected.remove(i1.max(i2));
                expected.remove(i1.min(i2));
                expected.push(result);
                expected.sort_unstable();
                let mut actual = state.numbers().to_vec();
                actual.sort_unstable();
                prop_assert_eq!(actual, expected);
            }
        }

        #[test]
        fn prop_undo_inverts_any_successful_move(
            numbers in arb_board(),
            i1 in 0_usize..6,
            i2 in 0_usize..6,
            op_index in 0_usize..4,
        ) {
            let operation = Operation::ALL[op_index];
            let mut state = GameState::new(10_000, numbers);
            let before = state.clone();

            if state.apply_operation(i1, i2, operation).is_ok() {
                state.undo();
                prop_assert_eq!(state.numbers(), before.numbers());
                prop_assert_eq!(state.move_count(), before.move_count());
                prop_assert_eq!(state.selected_indices(), before.selected_indices());
                prop_assert_eq!(state.history(), before.history());
            }
        }

        #[test]
        fn prop_restart_is_idempotent(
            numbers in arb_board(),
            moves in prop::collection::vec((0_usize..6, 0_usize..6, 0_usize..4), 0..4),
        ) {
            let mut state = GameState::new(10_000, numbers);
            for (i1, i2, op_index) in moves {
                let _ = state.apply_operation(i1, i2, Operation::ALL[op_index]);
            }
            state.restart();

            prop_assert_eq!(state.numbers(), state.initial_numbers());
            prop_assert_eq!(state.move_count(), 0);
            prop_assert!(state.history().is_empty());
            prop_assert_eq!(state.status(), GameStatus::Playing);
        }
    }
}
