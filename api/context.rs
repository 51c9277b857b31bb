use crate::workspace::Workspace;
use std::collections::BTreeMap;
use std::path::PathBuf;

/**
An `FlContext` carries the per-invocation facts the orchestrator
establishes before calling into a component: the participant's identity,
the current run number, the workspace, and a free-form property bag for
anything workflow-specific.
*/
#[derive(Clone, Debug)]
pub struct FlContext {
	identity: String,
	run_number: u64,
	workspace: Workspace,
	props: BTreeMap<String, String>,
}

impl FlContext {
	pub fn new(identity: impl Into<String>, run_number: u64, workspace: Workspace) -> Self {
		Self {
			identity: identity.into(),
			run_number,
			workspace,
			props: BTreeMap::new(),
		}
	}

	pub fn identity_name(&self) -> &str {
		&self.identity
	}

	pub fn run_number(&self) -> u64 {
		self.run_number
	}

	pub fn workspace(&self) -> &Workspace {
		&self.workspace
	}

	/// The run directory for the current run.
	pub fn run_dir(&self) -> PathBuf {
		self.workspace.run_dir(self.run_number)
	}

	pub fn get_prop(&self, name: &str) -> Option<&str> {
		self.props.get(name).map(|value| value.as_str())
	}

	pub fn set_prop(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.props.insert(name.into(), value.into());
	}
}

#[test]
fn test_props() {
	let mut ctx = FlContext::new("site-1", 1, Workspace::new("/tmp/ws"));
	assert_eq!(ctx.get_prop("phase"), None);
	ctx.set_prop("phase", "cross_val");
	assert_eq!(ctx.get_prop("phase"), Some("cross_val"));
	assert_eq!(ctx.run_dir(), std::path::PathBuf::from("/tmp/ws/run_1"));
}
