/// An arithmetic operator that combines two tiles.
///
/// Each operator is a partial binary function: [`apply`](Self::apply) returns
/// `None` when the combination is undefined (division by zero or inexact
/// division). Gameplay layers additionally reject results that are zero or
/// negative; `apply` itself returns the raw arithmetic result so that callers
/// can decide.
///
/// # Example
///
/// ```
/// use digitforge_core::Operation;
///
/// assert_eq!(Operation::Add.apply(5, 3), Some(8));
/// assert_eq!(Operation::Div.apply(6, 3), Some(2));
/// assert_eq!(Operation::Div.apply(5, 3), None); // not exact
/// assert_eq!(Operation::Sub.apply(3, 5), Some(-2)); // raw result; rejected by moves
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Operation {
    /// Addition (`+`), commutative.
    Add,
    /// Subtraction (`-`), not commutative.
    Sub,
    /// Multiplication (`×`), commutative.
    Mul,
    /// Exact division (`÷`), not commutative; defined only for a nonzero
    /// divisor that divides the dividend evenly.
    Div,
}

impl Operation {
    /// All operators in display order.
    pub const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// Returns the display symbol for this operator.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "×",
            Self::Div => "÷",
        }
    }

    /// Applies the operator to `a` and `b`, in that order.
    ///
    /// Returns `None` when the result is undefined. Subtraction may return
    /// zero or a negative number; move application and search reject those
    /// separately.
    #[must_use]
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Self::Add => Some(a + b),
            Self::Sub => Some(a - b),
            Self::Mul => Some(a * b),
            Self::Div => (b != 0 && a % b == 0).then(|| a / b),
        }
    }

    /// Returns `true` if operand order does not matter.
    ///
    /// Non-commutative operators get a second chance with swapped operands
    /// during move execution and successor generation.
    #[must_use]
    pub fn is_commutative(self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}
