use thiserror::Error;

/// Unified result type for the glance crate.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors surfaced while compiling a layout document.
///
/// Unresolvable function names are deliberately *not* an error: the dispatch
/// registry reports them as a `false` return so stray tokens in a layout
/// never abort a render pass.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("content dispatched with no active column; declare `column` before content")]
    NoActiveColumn,
    #[error("`column` declared before any `row`")]
    NoActiveRow,
    #[error("preference data is invalid: {0}")]
    Prefs(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
