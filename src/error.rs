//! Error types for the Konieczny engine.

use thiserror::Error;

/// Everything that can go wrong when driving or querying a [`crate::Engine`].
///
/// Every failure is local to the call that raised it: the engine's own
/// invariants remain intact afterwards and computation can always resume.
/// There are no retries, because every error here is deterministic given its
/// inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KoniecznyError {
    /// A query that requires the decomposition to be complete (e.g.
    /// [`crate::Engine::size`]) was called before the engine reached the
    /// `Finished` state.
    #[error("operation requires the engine to be Finished, but it is not yet")]
    NotYetFinished,

    /// [`crate::RegularDClass::new`] was handed an element that is not an
    /// idempotent.
    #[error("element is not idempotent, cannot build a regular D-class from it")]
    NotIdempotent,

    /// A representative's λ or ρ value has not yet been discovered by the
    /// action orbits (only reachable by asking for the class of an element
    /// of higher rank than anything enumerated so far).
    #[error("λ/ρ invariant of the supplied element is not yet known to the engine")]
    UnknownInvariant,

    /// An element from a different arity (matrix dimension / transformation
    /// degree) was passed to `contains` or a class builder.
    #[error("element has degree {found}, but this engine was built for degree {expected}")]
    IncompatibleGenerator {
        /// The degree the engine's generators share.
        expected: usize,
        /// The degree of the offending element.
        found: usize,
    },

    /// [`crate::Engine::run_until`]'s predicate never became true before the
    /// engine ran out of work to do. Not fatal: the engine stays `Paused`
    /// and a later `run()`/`run_until()` call may still make progress, or
    /// may determine that the decomposition was in fact already complete.
    #[error("run_until predicate never became true")]
    Cancelled,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KoniecznyError>;
