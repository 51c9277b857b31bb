use crate::artifact;
use crate::constants::{MODEL_KEY, SERVER_MODEL_NAME};
use fedflow_api::{DataKind, Dxo, DxoValue, FlContext, ModelLocator};
use std::collections::BTreeMap;

fn default_model_dir() -> String {
	"models".to_owned()
}

fn default_model_file_name() -> String {
	"server.model".to_owned()
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ServerModelLocatorOptions {
	#[serde(default = "default_model_dir")]
	pub model_dir: String,
	#[serde(default = "default_model_file_name")]
	pub model_file_name: String,
}

impl Default for ServerModelLocatorOptions {
	fn default() -> Self {
		Self {
			model_dir: default_model_dir(),
			model_file_name: default_model_file_name(),
		}
	}
}

/**
`ServerModelLocator` finds the models to include in cross-site evaluation
that live on the server. It locates the one model saved during training,
published under the name `"server"`, by reading
`<run_dir>/<model_dir>/<model_file_name>` from the current run's
workspace.

A missing or unreadable model file is not a hard error: the locator logs
the root cause and reports no model, and the workflow evaluates without
it.
*/
pub struct ServerModelLocator {
	options: ServerModelLocatorOptions,
}

impl ServerModelLocator {
	pub fn new(options: ServerModelLocatorOptions) -> Self {
		Self { options }
	}
}

impl Default for ServerModelLocator {
	fn default() -> Self {
		Self::new(ServerModelLocatorOptions::default())
	}
}

impl ModelLocator for ServerModelLocator {
	fn model_names(&self, _ctx: &FlContext) -> Vec<String> {
		vec![SERVER_MODEL_NAME.to_owned()]
	}

	fn locate_model(&self, model_name: &str, ctx: &FlContext) -> Option<Dxo> {
		if model_name != SERVER_MODEL_NAME {
			return None;
		}
		let model_path = ctx
			.run_dir()
			.join(&self.options.model_dir)
			.join(&self.options.model_file_name);
		let array = match artifact::read_array(&model_path) {
			Ok(array) => {
				log::info!(
					"[{}] loaded {} model from {}",
					ctx.identity_name(),
					model_name,
					model_path.display(),
				);
				array
			}
			Err(error) => {
				log::error!(
					"[{}] unable to load model from {}: {}",
					ctx.identity_name(),
					model_path.display(),
					error,
				);
				return None;
			}
		};
		let mut data = BTreeMap::new();
		data.insert(MODEL_KEY.to_owned(), DxoValue::Array(array));
		Some(Dxo::new(DataKind::Weights, data))
	}
}

#[cfg(test)]
fn test_ctx(root: &std::path::Path) -> FlContext {
	FlContext::new("server", 1, fedflow_api::Workspace::new(root))
}

#[test]
fn test_locate_server_model() {
	use ndarray::prelude::*;
	let workspace = tempfile::tempdir().unwrap();
	let ctx = test_ctx(workspace.path());
	let model_dir = ctx.run_dir().join("models");
	std::fs::create_dir_all(&model_dir).unwrap();
	artifact::write_array(&model_dir.join("server.model"), &array![1.0, 2.0, 4.0]).unwrap();
	let locator = ServerModelLocator::default();
	assert_eq!(locator.model_names(&ctx), vec!["server".to_owned()]);
	let dxo = locator.locate_model("server", &ctx).unwrap();
	assert_eq!(dxo.data_kind, DataKind::Weights);
	let array = dxo.data.get(MODEL_KEY).unwrap().as_array().unwrap();
	assert_eq!(array, &array![1.0f32, 2.0, 4.0]);
}

#[test]
fn test_unknown_model_name_yields_none() {
	let workspace = tempfile::tempdir().unwrap();
	let ctx = test_ctx(workspace.path());
	let locator = ServerModelLocator::default();
	assert!(locator.locate_model("site-1", &ctx).is_none());
}

#[test]
fn test_missing_model_file_yields_none() {
	let workspace = tempfile::tempdir().unwrap();
	let ctx = test_ctx(workspace.path());
	let locator = ServerModelLocator::default();
	assert!(locator.locate_model("server", &ctx).is_none());
}

#[test]
fn test_options_from_json() {
	let options: ServerModelLocatorOptions =
		serde_json::from_str(r#"{"model_dir": "artifacts"}"#).unwrap();
	assert_eq!(options.model_dir, "artifacts");
	assert_eq!(options.model_file_name, "server.model");
}
