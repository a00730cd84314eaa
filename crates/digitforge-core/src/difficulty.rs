use core::ops::RangeInclusive;

use crate::Operation;

/// Per-level generation configuration for the digits game.
///
/// Higher difficulties deal more starting tiles from a wider range, aim for
/// larger targets, and unlock more operators (`{Add, Sub}` ⊂ `{Add, Sub, Mul}`
/// ⊂ `{Add, Sub, Mul, Div}`).
///
/// # Example
///
/// ```
/// use digitforge_core::{Difficulty, Operation};
///
/// assert_eq!(Difficulty::Easy.number_count(), 4);
/// assert!(Difficulty::Easy.target_range().contains(&20));
/// assert!(!Difficulty::Easy.allowed_operations().contains(&Operation::Div));
/// assert!(Difficulty::Hard.allowed_operations().contains(&Operation::Div));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Difficulty {
    /// 4 tiles from 1..=10, target 10..=50, add/subtract only.
    Easy,
    /// 5 tiles from 1..=20, target 50..=200, adds multiplication.
    Medium,
    /// 6 tiles from 1..=25, target 100..=500, all four operators.
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the human-readable level name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Returns how many starting tiles a puzzle deals.
    #[must_use]
    pub fn number_count(self) -> usize {
        match self {
            Self::Easy => 4,
            Self::Medium => 5,
            Self::Hard => 6,
        }
    }

    /// Returns the inclusive range starting tiles are drawn from.
    #[must_use]
    pub fn number_range(self) -> RangeInclusive<i64> {
        match self {
            Self::Easy => 1..=10,
            Self::Medium => 1..=20,
            Self::Hard => 1..=25,
        }
    }

    /// Returns the inclusive range a generated target must fall within.
    #[must_use]
    pub fn target_range(self) -> RangeInclusive<i64> {
        match self {
            Self::Easy => 10..=50,
            Self::Medium => 50..=200,
            Self::Hard => 100..=500,
        }
    }

    /// Returns the operators available at this level, in enumeration order.
    ///
    /// This order is what move execution and the shortest-solution search
    /// iterate in, so it also fixes tie-breaking among equal-length solutions.
    #[must_use]
    pub fn allowed_operations(self) -> &'static [Operation] {
        match self {
            Self::Easy => &[Operation::Add, Operation::Sub],
            Self::Medium => &[Operation::Add, Operation::Sub, Operation::Mul],
            Self::Hard => &[
                Operation::Add,
                Operation::Sub,
                Operation::Mul,
                Operation::Div,
            ],
        }
    }
}

impl core::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_sets_grow_with_difficulty() {
        let easy = Difficulty::Easy.allowed_operations();
        let medium = Difficulty::Medium.allowed_operations();
        let hard = Difficulty::Hard.allowed_operations();

        assert!(easy.iter().all(|op| medium.contains(op)));
        assert!(medium.iter().all(|op| hard.contains(op)));
        assert_eq!(hard.len(), Operation::ALL.len());
    }

    #[test]
    fn test_number_counts() {
        assert_eq!(Difficulty::Easy.number_count(), 4);
        assert_eq!(Difficulty::Medium.number_count(), 5);
        assert_eq!(Difficulty::Hard.number_count(), 6);
    }

    #[test]
    fn test_ranges_are_nonempty() {
        for difficulty in Difficulty::ALL {
            assert!(!difficulty.number_range().is_empty());
            assert!(!difficulty.target_range().is_empty());
        }
    }
}
