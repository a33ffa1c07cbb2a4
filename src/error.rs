use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrieError {
    #[error("key not found")]
    NotFound,

    #[error("keys must not be empty")]
    EmptyKey,

    #[error("unable to allocate trie node storage")]
    AllocationFailure(#[from] TryReserveError),
}
