use std::path::{Path, PathBuf};

/// The externally managed filesystem location a participant stores its
/// artifacts under, with one subdirectory per run.
#[derive(Clone, Debug)]
pub struct Workspace {
	root: PathBuf,
}

impl Workspace {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn run_dir(&self, run_number: u64) -> PathBuf {
		self.root.join(format!("run_{}", run_number))
	}
}

#[test]
fn test_run_dir() {
	let workspace = Workspace::new("/tmp/ws");
	assert_eq!(workspace.run_dir(3), PathBuf::from("/tmp/ws/run_3"));
}
