//! Error type shared by construction and evaluation.

use thiserror::Error;

/// Everything that can go wrong while building or evaluating predicates.
///
/// Construction errors (unknown kind, bad parameters, dangling library or
/// quest names) are configuration bugs and are meant to surface loudly at
/// the boundary that builds the tree. Evaluation errors are either leaf
/// failures (an undefined gamedata variable) or protocol misuse
/// (`ExpiryUndefined`, `EpochAlreadyOpen`).
#[derive(Debug, Error)]
pub enum PredicateError {
    /// Config object has no `predicate` (or `kind`) discriminator.
    #[error("predicate config has no kind: {config}")]
    MissingKind { config: String },

    /// Discriminator names no known kind.
    #[error("unknown predicate {kind}: {config}")]
    UnknownKind { kind: String, config: String },

    /// Kind-specific parameters failed to decode.
    #[error("invalid {kind} predicate: {message}")]
    InvalidConfig { kind: String, message: String },

    /// `LIBRARY` references a name missing from the predicate library.
    #[error("invalid library predicate \"{name}\"")]
    UnknownLibraryEntry { name: String },

    /// Quest predicate references a quest missing from gamedata.
    #[error("unknown quest \"{name}\"")]
    UnknownQuest { name: String },

    /// Comparison method not supported by the predicate kind.
    #[error("unknown method {method}")]
    UnknownMethod { method: String },

    /// `GAMEDATA_VAR` path does not resolve.
    #[error("lookup of undefined var \"{name}\"")]
    UnknownVar { name: String },

    /// `expire_time`/`time_range` called on a kind with no expiry semantics.
    #[error("time range not implemented for this predicate: {kind}")]
    ExpiryUndefined { kind: String },

    /// The string table has no description template for the kind.
    #[error("no ui_name string for predicate {kind}")]
    MissingUiString { kind: String },

    /// A cond-chain entry is not a `[predicate, value]` sequence.
    #[error("malformed cond chain entry at index {index}")]
    MalformedCondChain { index: usize },

    /// `open_epoch` called while an epoch is already open.
    #[error("predicate cache epoch is already open")]
    EpochAlreadyOpen,

    /// Construction recursed past the factory's depth limit.
    #[error("predicate nesting exceeds depth limit {limit}")]
    NestingTooDeep { limit: usize },

    /// Gamedata JSON failed to parse.
    #[error("gamedata parse error: {0}")]
    Gamedata(#[from] serde_json::Error),
}

/// Result alias for predicate operations.
pub type PredicateResult<T> = Result<T, PredicateError>;
