use crate::context::FlContext;
use crate::shareable::Shareable;
use crate::signal::Signal;

/// Lifecycle events the orchestrator delivers to components. `StartRun`
/// is where heavyweight resources should be created, since component
/// construction happens while the app config is being read and must stay
/// cheap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventType {
	StartRun,
	EndRun,
}

/// The reasons a task can fail inside an executor. At the boundary every
/// one of them is coarsened to `ReturnCode::ExecutionException`; the
/// distinction exists so the participant's own log can name the root
/// cause.
#[derive(thiserror::Error, Debug)]
pub enum TaskError {
	#[error("bad payload: {0}")]
	BadPayload(String),
	#[error("missing field {0:?} in payload")]
	MissingField(String),
	#[error("unsupported task {0:?}")]
	UnsupportedTask(String),
	#[error("task was cancelled")]
	Cancelled,
}

/**
An `Executor` handles tasks dispatched by the orchestrator, one at a
time. `execute` is infallible at this boundary: failures are reported
through the return code of the returned [`Shareable`](../shareable/struct.Shareable.html).
Long-running implementations must poll `abort_signal` regularly, or
aborting the participant will not work.
*/
pub trait Executor {
	fn handle_event(&self, _event: EventType, _ctx: &FlContext) {}

	fn execute(
		&self,
		task_name: &str,
		shareable: Shareable,
		ctx: &FlContext,
		abort_signal: &Signal,
	) -> Shareable;
}
