use thiserror::Error;

/// Error produced when a search fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Every candidate the search could reach was examined,
    /// and none of them satisfied the goal test.
    #[error("No goal state could be reached")]
    GoalNotFound,
}

/// Result when a search method might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
