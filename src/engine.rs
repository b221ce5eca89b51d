//! The engine: the scheduler that drives Konieczny's algorithm to
//! completion one atomic step at a time (`spec.md` §4.6).
//!
//! Construction seeds a candidate queue with the generators themselves,
//! ordered rank-descending (ties broken by discovery order), and seeds both
//! action orbits from the generators' own Λ/Ρ values. Each [`Engine::step`]
//! either:
//! - pops the highest-priority candidate, classifies it into a D-class
//!   (building a new one if it isn't already covered by one), and enqueues
//!   every `element * generator` product the new class produces, or
//! - if the queue is empty, extends one of the two action orbits by one
//!   point.
//!
//! The engine is Finished exactly when both of those are simultaneously
//! exhausted: the candidate queue is empty and neither orbit can produce a
//! new point. At that point every generator-reachable element has been
//! classified into exactly one D-class (`spec.md` I1/I5).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::{Duration, Instant};

use crate::element::Element;
use crate::error::{KoniecznyError, Result};
use crate::nonregular::close_same_rank;
use crate::orbit::Orbit;
use crate::report::Report;
use crate::store::{DClass, DClassId, DClassStore};
use crate::{NonRegularDClass, RegularDClass};

/// The engine's run state (`spec.md` §4.6): `Fresh` before the first step,
/// `Running` mid-`run`, `Paused` after a bounded `run_for`/`run_until` call
/// that didn't exhaust the work, `Finished` once there is provably nothing
/// left to discover, and `Cancelled` only as an explicit hard stop via
/// [`Engine::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Fresh,
    Running,
    Paused,
    Finished,
    Cancelled,
}

/// Ambient configuration for an [`Engine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Emit a one-line progress report (to stderr) each time a new D-class
    /// is discovered.
    pub report: bool,
}

struct Candidate<E> {
    element: E,
    rank: usize,
    order: usize,
}

impl<E> PartialEq for Candidate<E> {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank && self.order == other.order
    }
}
impl<E> Eq for Candidate<E> {}
impl<E> PartialOrd for Candidate<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<E> Ord for Candidate<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: higher rank pops first; among equal
        // ranks, the earlier-discovered candidate (smaller `order`) pops
        // first, hence the reversed comparison on `order`.
        self.rank.cmp(&other.rank).then_with(|| other.order.cmp(&self.order))
    }
}

/// Drives Konieczny's algorithm over the semigroup generated by a fixed set
/// of generators, discovering D-classes incrementally.
pub struct Engine<E: Element> {
    generators: Vec<E>,
    degree: usize,
    state: EngineState,
    config: Config,
    lambda_orbit: Orbit<E::Lambda>,
    rho_orbit: Orbit<E::Rho>,
    store: DClassStore<E>,
    queue: BinaryHeap<Candidate<E>>,
    known: HashSet<E>,
    discovery_counter: usize,
    report: Report,
}

impl<E: Element> Engine<E> {
    pub fn new(generators: Vec<E>) -> Result<Self> {
        Self::new_with_config(generators, Config::default())
    }

    pub fn new_with_config(generators: Vec<E>, config: Config) -> Result<Self> {
        assert!(!generators.is_empty(), "an engine needs at least one generator");
        let degree = generators[0].degree();
        for g in &generators {
            if g.degree() != degree {
                return Err(KoniecznyError::IncompatibleGenerator { expected: degree, found: g.degree() });
            }
        }

        let mut lambda_orbit = Orbit::new();
        lambda_orbit.seed(generators.iter().map(|g| g.lambda()));
        let mut rho_orbit = Orbit::new();
        rho_orbit.seed(generators.iter().map(|g| g.rho()));

        let mut known = HashSet::new();
        let mut queue = BinaryHeap::new();
        let mut discovery_counter = 0;
        for g in &generators {
            if known.insert(*g) {
                queue.push(Candidate { element: *g, rank: g.rank(), order: discovery_counter });
                discovery_counter += 1;
            }
        }

        Ok(Engine {
            generators,
            degree,
            state: EngineState::Fresh,
            config,
            lambda_orbit,
            rho_orbit,
            store: DClassStore::new(),
            queue,
            known,
            discovery_counter,
            report: Report::new(config.report),
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn generators(&self) -> &[E] {
        &self.generators
    }

    /// Runs to completion.
    pub fn run(&mut self) -> Result<()> {
        self.state = EngineState::Running;
        while self.step()? {}
        self.state = EngineState::Finished;
        self.report.finished(self.store.len(), self.known.len());
        Ok(())
    }

    /// Runs for at most `budget` wall-clock time. Leaves the engine
    /// `Finished` if it exhausts all work within the budget, or `Paused`
    /// otherwise.
    pub fn run_for(&mut self, budget: Duration) -> Result<()> {
        self.state = EngineState::Running;
        let start = Instant::now();
        loop {
            if start.elapsed() >= budget {
                self.state = EngineState::Paused;
                return Ok(());
            }
            if !self.step()? {
                self.state = EngineState::Finished;
                self.report.finished(self.store.len(), self.known.len());
                return Ok(());
            }
        }
    }

    /// Runs until `predicate(self)` becomes true, checked between steps.
    /// If the engine exhausts all work before the predicate ever becomes
    /// true, returns [`KoniecznyError::Cancelled`] — not fatal, the engine
    /// simply stays `Paused` rather than advancing to `Finished`, since the
    /// caller's stopping condition was never met.
    pub fn run_until(&mut self, mut predicate: impl FnMut(&Self) -> bool) -> Result<()> {
        self.state = EngineState::Running;
        loop {
            if predicate(self) {
                self.state = EngineState::Paused;
                return Ok(());
            }
            if !self.step()? {
                self.state = EngineState::Paused;
                return Err(KoniecznyError::Cancelled);
            }
        }
    }

    /// An explicit, terminal hard stop. Distinct from the `Cancelled` error
    /// `run_until` can return: this is a state transition the caller asks
    /// for directly, not an outcome of an unmet predicate.
    pub fn cancel(&mut self) {
        self.state = EngineState::Cancelled;
    }

    /// Advances the computation by exactly one atomic step. Returns `false`
    /// once there is nothing left to do.
    pub fn step(&mut self) -> Result<bool> {
        if let Some(candidate) = self.queue.pop() {
            self.process_candidate(candidate.element);
            return Ok(true);
        }
        if self.lambda_orbit.extend_one(&self.generators, |l, g| E::lambda_act(l, g)) {
            return Ok(true);
        }
        if self.rho_orbit.extend_one(&self.generators, |r, g| E::rho_act(g, r)) {
            return Ok(true);
        }
        Ok(false)
    }

    fn process_candidate(&mut self, x: E) {
        let lam = x.lambda();
        let rho = x.rho();
        // make sure both orbits know about x's invariants before looking it
        // up; generator-driven growth always reaches them eventually (x is
        // itself some product of generators) but may not have yet.
        while self.lambda_orbit.position(&lam).is_none() {
            if !self.lambda_orbit.extend_one(&self.generators, |l, g| E::lambda_act(l, g)) {
                self.lambda_orbit.ensure(lam);
                break;
            }
        }
        while self.rho_orbit.position(&rho).is_none() {
            if !self.rho_orbit.extend_one(&self.generators, |r, g| E::rho_act(g, r)) {
                self.rho_orbit.ensure(rho);
                break;
            }
        }

        if self.store.find(&x, &self.lambda_orbit, &self.rho_orbit).is_some() {
            return;
        }

        // Probe for regularity (spec.md §4.6 step c) by closing {x} under
        // rank-preserving one-sided multiplication: this closure *is* x's
        // D-class (rank-preserving one-sided products never leave a
        // D-class), so it contains an idempotent iff the D-class is regular
        // at all (spec.md I3) — not merely iff x itself happens to lie in a
        // subgroup of that class. See `nonregular::close_same_rank`.
        let closure = close_same_rank(x, &self.generators);
        let witness = closure.iter().copied().find(|y| y.is_idempotent());
        let id = if let Some(e) = witness {
            let class = RegularDClass::new(e, &self.generators)
                .expect("witness was selected by is_idempotent() above");
            let size = class.size();
            let rank = class.rank();
            let id = self.store.insert_regular(class, &mut self.lambda_orbit, &mut self.rho_orbit);
            self.report.class_found(id.index(), self.store.len(), true, rank, size);
            id
        } else {
            let class = NonRegularDClass::from_elements(x, closure);
            let size = class.size();
            let rank = class.rank();
            let id = self.store.insert_nonregular(class, &mut self.lambda_orbit, &mut self.rho_orbit);
            self.report.class_found(id.index(), self.store.len(), false, rank, size);
            id
        };

        let elements = self.class_elements(id);
        for elt in elements {
            for g in &self.generators {
                let y = elt.mul(g);
                if self.known.insert(y) {
                    self.queue.push(Candidate { element: y, rank: y.rank(), order: self.discovery_counter });
                    self.discovery_counter += 1;
                }
            }
        }
    }

    fn class_elements(&self, id: DClassId) -> Vec<E> {
        match self.store.get(id) {
            DClass::Regular(r) => r.elements(),
            DClass::NonRegular(n) => n.elements().to_vec(),
        }
    }

    /// The total number of elements of the semigroup generated, i.e. the
    /// sum of every D-class's size. Requires the engine to be `Finished`,
    /// since mid-computation this sum is necessarily incomplete.
    pub fn size(&self) -> Result<usize> {
        self.require_finished()?;
        Ok(self.known.len())
    }

    /// Number of D-classes discovered so far. Available at any state (this
    /// is exactly what a `run_until` predicate inspects mid-computation);
    /// only final once the engine is `Finished`.
    pub fn nr_d_classes(&self) -> Result<usize> {
        Ok(self.store.len())
    }

    pub fn nr_regular_d_classes(&self) -> Result<usize> {
        Ok(self.store.iter().filter(|c| c.is_regular()).count())
    }

    pub fn d_classes(&self) -> Result<impl Iterator<Item = &DClass<E>>> {
        Ok(self.store.iter())
    }

    pub fn regular_d_classes(&self) -> Result<impl Iterator<Item = &DClass<E>>> {
        Ok(self.store.iter().filter(|c| c.is_regular()))
    }

    pub fn contains(&self, x: &E) -> Result<bool> {
        if x.degree() != self.degree {
            return Err(KoniecznyError::IncompatibleGenerator { expected: self.degree, found: x.degree() });
        }
        Ok(self.known.contains(x))
    }

    /// `true` iff `x`'s D-class is regular. Requires the class to already
    /// be known (either the engine is `Finished`, or `x`'s class happens to
    /// have been materialised already); otherwise fails with
    /// [`KoniecznyError::UnknownInvariant`].
    pub fn is_regular_element(&self, x: &E) -> Result<bool> {
        match self.store.find(x, &self.lambda_orbit, &self.rho_orbit) {
            Some(id) => Ok(self.store.get(id).is_regular()),
            None => Err(KoniecznyError::UnknownInvariant),
        }
    }

    fn require_finished(&self) -> Result<()> {
        if self.state == EngineState::Finished {
            Ok(())
        } else {
            Err(KoniecznyError::NotYetFinished)
        }
    }
}
