use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no action identifier given")]
    Empty,
    #[error("{0:?} does not identify a known action")]
    Unresolved(String),
}
