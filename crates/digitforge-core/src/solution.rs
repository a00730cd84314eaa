use crate::Operation;

/// One recorded arithmetic move: two operands combined into a result.
///
/// Produced both by the generator's forward simulation and by the
/// shortest-solution search. The operands are stored in the order they were
/// actually applied, which matters for non-commutative operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionStep {
    /// The operator that was applied.
    pub operation: Operation,
    /// The first operand, in applied order.
    pub operand1: i64,
    /// The second operand, in applied order.
    pub operand2: i64,
    /// The resulting tile value.
    pub result: i64,
    /// Human-readable rendering, `"{a} {symbol} {b} = {result}"`.
    pub description: String,
}

impl SolutionStep {
    /// Builds a step and its description from the applied operands and result.
    #[must_use]
    pub fn new(operation: Operation, operand1: i64, operand2: i64, result: i64) -> Self {
        let description = format!("{operand1} {} {operand2} = {result}", operation.symbol());
        Self {
            operation,
            operand1,
            operand2,
            result,
            description,
        }
    }
}

impl core::fmt::Display for SolutionStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.description)
    }
}
