use crate::shareable::{ReturnCode, Shareable};
use anyhow::{format_err, Result};
use ndarray::prelude::*;
use std::collections::BTreeMap;

/// The kind of data a [`Dxo`](struct.Dxo.html) carries, so receivers can
/// decide how to interpret the payload mapping.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataKind {
	Weights,
	WeightDiff,
	Metrics,
}

/// A single entry in a DXO payload. Weight payloads carry arrays, metric
/// payloads carry scalars.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub enum DxoValue {
	Float(f64),
	Array(Array1<f32>),
}

impl DxoValue {
	pub fn as_float(&self) -> Option<f64> {
		match self {
			DxoValue::Float(value) => Some(*value),
			DxoValue::Array(_) => None,
		}
	}

	pub fn as_array(&self) -> Option<&Array1<f32>> {
		match self {
			DxoValue::Float(_) => None,
			DxoValue::Array(array) => Some(array),
		}
	}
}

impl From<f64> for DxoValue {
	fn from(value: f64) -> Self {
		DxoValue::Float(value)
	}
}

impl From<Array1<f32>> for DxoValue {
	fn from(array: Array1<f32>) -> Self {
		DxoValue::Array(array)
	}
}

/**
A `Dxo` is the typed data envelope exchanged between tasks: a data-kind
discriminator, a flat payload mapping, and free-form metadata. It is
serialized into a [`Shareable`](../shareable/struct.Shareable.html) for
transport and decoded back on the receiving side.
*/
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct Dxo {
	pub data_kind: DataKind,
	pub data: BTreeMap<String, DxoValue>,
	pub meta: BTreeMap<String, String>,
}

impl Dxo {
	pub fn new(data_kind: DataKind, data: BTreeMap<String, DxoValue>) -> Self {
		Self {
			data_kind,
			data,
			meta: BTreeMap::new(),
		}
	}

	pub fn with_meta(mut self, meta: BTreeMap<String, String>) -> Self {
		self.meta = meta;
		self
	}

	/// Serialize this `Dxo` into a fresh `Shareable` with return code `Ok`.
	pub fn into_shareable(self) -> Result<Shareable> {
		let payload = rmp_serde::to_vec(&self)?;
		let mut shareable = Shareable::new();
		shareable.set_return_code(ReturnCode::Ok);
		shareable.set_payload(payload);
		Ok(shareable)
	}

	/// Decode the `Dxo` carried by `shareable`, if any.
	pub fn from_shareable(shareable: &Shareable) -> Result<Self> {
		let payload = shareable
			.payload()
			.ok_or_else(|| format_err!("shareable carries no payload"))?;
		let dxo = rmp_serde::from_slice(payload)?;
		Ok(dxo)
	}
}

#[test]
fn test_dxo_shareable_round_trip() {
	let mut data = BTreeMap::new();
	data.insert("weights".to_owned(), DxoValue::Array(array![1.0, 2.0, 3.0]));
	data.insert("bias".to_owned(), DxoValue::Float(0.5));
	let mut meta = BTreeMap::new();
	meta.insert("round".to_owned(), "3".to_owned());
	let dxo = Dxo::new(DataKind::Weights, data).with_meta(meta);
	let shareable = dxo.clone().into_shareable().unwrap();
	assert_eq!(shareable.return_code(), ReturnCode::Ok);
	let decoded = Dxo::from_shareable(&shareable).unwrap();
	assert_eq!(decoded, dxo);
}

#[test]
fn test_from_shareable_without_payload_fails() {
	let shareable = Shareable::new();
	assert!(Dxo::from_shareable(&shareable).is_err());
}
