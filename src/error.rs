use thiserror::Error;

pub type Result<T, E = UsageError> = std::result::Result<T, E>;

/// Misuse of the tree-building API. Unlike diagnostics these never come from
/// bad input; they signal a caller that broke the start/leaf/done protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Tree is not finished yet; {0} node(s) still open")]
    Unfinished(usize),
    #[error("Accumulator stack underflow: `{0}` called with no open node")]
    StackUnderflow(&'static str),
}
