//! Konieczny's algorithm: the complete structural D-class decomposition of
//! a finite semigroup, built incrementally from its generators.
//!
//! Rather than enumerating the whole semigroup and then classifying it
//! (the Froidure-Pin approach — used here only as a test oracle, see
//! `tests/support/froidure_pin.rs`), this crate discovers D-classes one at a
//! time by growing two action orbits (the Λ and Ρ invariants) alongside a
//! rank-ordered candidate queue, so the decomposition can be paused and
//! resumed, and partial structure is available even before the whole
//! semigroup is known.
//!
//! ```
//! use konieczny::{Engine, element::transformation::Transformation};
//!
//! let gens = vec![
//!     Transformation::new(&[1, 2, 0]),
//!     Transformation::new(&[1, 0, 2]),
//! ];
//! let mut engine = Engine::new(gens).unwrap();
//! engine.run().unwrap();
//! assert_eq!(engine.size().unwrap(), 6);
//! ```
//!
//! The engine is generic over any type implementing [`element::Element`];
//! [`element::bmat8::BMat8`] (boolean matrices) and
//! [`element::transformation::Transformation`] (finite transformations) are
//! the two built-in element kinds.

pub mod element;
pub mod engine;
pub mod error;
pub mod nonregular;
pub mod orbit;
pub mod regular;
pub mod report;
pub mod store;

pub use element::Element;
pub use engine::{Config, Engine, EngineState};
pub use error::{KoniecznyError, Result};
pub use nonregular::NonRegularDClass;
pub use orbit::Orbit;
pub use regular::RegularDClass;
pub use store::{DClass, DClassId, DClassStore};
