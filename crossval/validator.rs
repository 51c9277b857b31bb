use crate::constants::MODEL_KEY;
use fedflow_api::{
	DataKind, Dxo, Executor, FlContext, ReturnCode, Shareable, Signal, TaskError,
};
use fedflow_app::constants::{MODEL_OWNER, TASK_VALIDATION};
use ndarray::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

// Abort polling granularity during the startup wait.
const SLEEP_TICK: Duration = Duration::from_millis(500);

fn default_epsilon() -> f64 {
	1.0
}

fn default_validate_task_name() -> String {
	TASK_VALIDATION.to_owned()
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SumValidatorOptions {
	/// Scale of the random noise added to the metric.
	#[serde(default = "default_epsilon")]
	pub epsilon: f64,
	/// Seconds to wait before handling a task, in 0.5 s increments.
	#[serde(default)]
	pub sleep_time: f64,
	#[serde(default = "default_validate_task_name")]
	pub validate_task_name: String,
}

impl Default for SumValidatorOptions {
	fn default() -> Self {
		Self {
			epsilon: default_epsilon(),
			sleep_time: 0.0,
			validate_task_name: default_validate_task_name(),
		}
	}
}

/**
`SumValidator` is an executor that scores a received model with a
normalized-sum metric: `accuracy = sum(x / max(x)) + epsilon * U[0,1)`.

The optional startup wait sleeps in fixed half-second ticks and checks
the abort signal between ticks, so cancellation latency is bounded by
one tick. Every failure, including cancellation, surfaces as an
otherwise-empty shareable with `ReturnCode::ExecutionException`; the
root cause goes to the log.
*/
pub struct SumValidator {
	options: SumValidatorOptions,
}

impl SumValidator {
	pub fn new(options: SumValidatorOptions) -> Self {
		Self { options }
	}

	fn wait_before_task(&self, abort_signal: &Signal) -> Result<(), TaskError> {
		let mut slept = Duration::from_secs(0);
		let total = Duration::from_secs_f64(self.options.sleep_time.max(0.0));
		while slept < total {
			if abort_signal.triggered() {
				return Err(TaskError::Cancelled);
			}
			std::thread::sleep(SLEEP_TICK);
			slept += SLEEP_TICK;
		}
		Ok(())
	}

	fn validate(
		&self,
		task_name: &str,
		shareable: &Shareable,
		ctx: &FlContext,
		abort_signal: &Signal,
	) -> Result<Shareable, TaskError> {
		self.wait_before_task(abort_signal)?;
		if task_name != self.options.validate_task_name {
			return Err(TaskError::UnsupportedTask(task_name.to_owned()));
		}
		let dxo = Dxo::from_shareable(shareable)
			.map_err(|error| TaskError::BadPayload(error.to_string()))?;
		if dxo.data_kind != DataKind::Weights || dxo.data.is_empty() {
			return Err(TaskError::BadPayload(
				"payload has no data or is not of kind Weights".to_owned(),
			));
		}
		// The workflow names the model's owner in a shareable header.
		let model_owner = shareable.get_header(MODEL_OWNER).unwrap_or("?");
		log::info!(
			"[{}] validating model from {} for task {:?}",
			ctx.identity_name(),
			model_owner,
			task_name,
		);
		if abort_signal.triggered() {
			return Err(TaskError::Cancelled);
		}
		let array = dxo
			.data
			.get(MODEL_KEY)
			.ok_or_else(|| TaskError::MissingField(MODEL_KEY.to_owned()))?
			.as_array()
			.ok_or_else(|| TaskError::MissingField(MODEL_KEY.to_owned()))?;
		let accuracy = self.score(array)?;
		if abort_signal.triggered() {
			return Err(TaskError::Cancelled);
		}
		log::info!(
			"[{}] validation result for model from {}: accuracy = {}",
			ctx.identity_name(),
			model_owner,
			accuracy,
		);
		let mut results = BTreeMap::new();
		results.insert("accuracy".to_owned(), accuracy.into());
		Dxo::new(DataKind::Metrics, results)
			.into_shareable()
			.map_err(|error| TaskError::BadPayload(error.to_string()))
	}

	fn score(&self, array: &Array1<f32>) -> Result<f64, TaskError> {
		let max = array.iter().cloned().fold(f32::NAN, f32::max);
		if !max.is_finite() || max == 0.0 {
			return Err(TaskError::BadPayload(
				"model array is empty or has no finite maximum".to_owned(),
			));
		}
		let normalized_sum = array.mapv(|value| value / max).sum() as f64;
		let noise: f64 = rand::random();
		Ok(normalized_sum + self.options.epsilon * noise)
	}
}

impl Default for SumValidator {
	fn default() -> Self {
		Self::new(SumValidatorOptions::default())
	}
}

impl Executor for SumValidator {
	fn execute(
		&self,
		task_name: &str,
		shareable: Shareable,
		ctx: &FlContext,
		abort_signal: &Signal,
	) -> Shareable {
		match self.validate(task_name, &shareable, ctx, abort_signal) {
			Ok(result) => result,
			Err(error) => {
				log::error!("[{}] task {:?} failed: {}", ctx.identity_name(), task_name, error);
				Shareable::with_return_code(ReturnCode::ExecutionException)
			}
		}
	}
}

#[cfg(test)]
fn test_ctx() -> FlContext {
	FlContext::new("site-1", 1, fedflow_api::Workspace::new("/tmp/ws"))
}

#[cfg(test)]
fn weights_shareable(array: Array1<f32>) -> Shareable {
	use fedflow_api::DxoValue;
	let mut data = BTreeMap::new();
	data.insert(MODEL_KEY.to_owned(), DxoValue::Array(array));
	Dxo::new(DataKind::Weights, data).into_shareable().unwrap()
}

#[test]
fn test_metric_is_normalized_sum_plus_noise() {
	let validator = SumValidator::default();
	let mut shareable = weights_shareable(array![1.0, 2.0, 4.0]);
	shareable.set_header(MODEL_OWNER, "site-2");
	let result = validator.execute(TASK_VALIDATION, shareable, &test_ctx(), &Signal::new());
	assert_eq!(result.return_code(), ReturnCode::Ok);
	let dxo = Dxo::from_shareable(&result).unwrap();
	assert_eq!(dxo.data_kind, DataKind::Metrics);
	let accuracy = dxo.data.get("accuracy").unwrap().as_float().unwrap();
	// sum(x / max(x)) for [1, 2, 4] is 1.75, noise is in [0, 1).
	assert!((1.75..2.75).contains(&accuracy));
}

#[test]
fn test_zero_epsilon_makes_metric_deterministic() {
	let options = SumValidatorOptions {
		epsilon: 0.0,
		..SumValidatorOptions::default()
	};
	let validator = SumValidator::new(options);
	let shareable = weights_shareable(array![1.0, 2.0, 4.0]);
	let result = validator.execute(TASK_VALIDATION, shareable, &test_ctx(), &Signal::new());
	let dxo = Dxo::from_shareable(&result).unwrap();
	let accuracy = dxo.data.get("accuracy").unwrap().as_float().unwrap();
	assert!((accuracy - 1.75).abs() < 1e-6);
}

#[test]
fn test_missing_model_key_is_execution_exception() {
	use fedflow_api::DxoValue;
	let validator = SumValidator::default();
	let mut data = BTreeMap::new();
	data.insert("other".to_owned(), DxoValue::Array(array![1.0]));
	let shareable = Dxo::new(DataKind::Weights, data).into_shareable().unwrap();
	let result = validator.execute(TASK_VALIDATION, shareable, &test_ctx(), &Signal::new());
	assert_eq!(result.return_code(), ReturnCode::ExecutionException);
	assert!(result.payload().is_none());
}

#[test]
fn test_metrics_payload_is_rejected() {
	let mut data = BTreeMap::new();
	data.insert("accuracy".to_owned(), 0.9.into());
	let shareable = Dxo::new(DataKind::Metrics, data).into_shareable().unwrap();
	let validator = SumValidator::default();
	let result = validator.execute(TASK_VALIDATION, shareable, &test_ctx(), &Signal::new());
	assert_eq!(result.return_code(), ReturnCode::ExecutionException);
}

#[test]
fn test_unsupported_task_is_execution_exception() {
	use fedflow_app::constants::TASK_TRAIN;
	let validator = SumValidator::default();
	let shareable = weights_shareable(array![1.0, 2.0, 4.0]);
	let result = validator.execute(TASK_TRAIN, shareable, &test_ctx(), &Signal::new());
	assert_eq!(result.return_code(), ReturnCode::ExecutionException);
	assert!(result.payload().is_none());
}

#[test]
fn test_triggered_abort_cuts_the_wait_short() {
	let options = SumValidatorOptions {
		sleep_time: 30.0,
		..SumValidatorOptions::default()
	};
	let validator = SumValidator::new(options);
	let abort_signal = Signal::new();
	abort_signal.trigger();
	let shareable = weights_shareable(array![1.0, 2.0, 4.0]);
	let started = std::time::Instant::now();
	let result = validator.execute(TASK_VALIDATION, shareable, &test_ctx(), &abort_signal);
	assert_eq!(result.return_code(), ReturnCode::ExecutionException);
	assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_options_from_json() {
	let options: SumValidatorOptions = serde_json::from_str(r#"{"sleep_time": 1.5}"#).unwrap();
	assert!((options.sleep_time - 1.5).abs() < f64::EPSILON);
	assert!((options.epsilon - 1.0).abs() < f64::EPSILON);
	assert_eq!(options.validate_task_name, "validate");
}
