use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/**
A `Signal` is a cloneable cooperative cancellation flag. The orchestrator
triggers it to request early termination; long-running task code polls
`triggered()` at bounded intervals and winds down when it flips. Polling
at a fixed tick keeps the worst-case extra latency to one tick.
*/
#[derive(Clone, Debug, Default)]
pub struct Signal(Arc<AtomicBool>);

impl Signal {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn trigger(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	pub fn triggered(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}
}

#[test]
fn test_trigger_is_visible_to_clones() {
	let signal = Signal::new();
	let clone = signal.clone();
	assert!(!clone.triggered());
	signal.trigger();
	assert!(clone.triggered());
}
