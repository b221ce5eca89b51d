//! Minimal progress reporting, toggled by [`crate::Config::report`].
//!
//! No logging crate: the teacher's own CLI reports progress with plain
//! `eprintln!` calls, and the ambient stack here follows suit rather than
//! pulling in a framework for what is, at this scale, a handful of lines to
//! stderr.

/// A no-dependency stderr reporter. Cheap to construct and cheap to check:
/// disabled by default, since most callers drive the engine as a library
/// and don't want console chatter.
#[derive(Debug, Clone, Copy)]
pub struct Report {
    enabled: bool,
}

impl Report {
    pub fn new(enabled: bool) -> Self {
        Report { enabled }
    }

    pub fn class_found(&self, id: usize, total_so_far: usize, regular: bool, rank: usize, size: usize) {
        if !self.enabled {
            return;
        }
        let kind = if regular { "regular" } else { "non-regular" };
        eprintln!("D-class #{id} ({total_so_far} found so far): {kind}, rank {rank}, size {size}");
    }

    pub fn finished(&self, nr_classes: usize, size: usize) {
        if !self.enabled {
            return;
        }
        eprintln!("done: {nr_classes} D-classes, {size} elements total");
    }
}
