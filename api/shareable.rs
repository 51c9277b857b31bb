use std::collections::BTreeMap;

/// The outcome a task reports back to the orchestrator. Task failures of
/// every kind surface as `ExecutionException`; finer-grained causes stay
/// in the participant's log.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReturnCode {
	Ok,
	EmptyResult,
	ExecutionException,
}

/**
A `Shareable` is the generic wire-level container exchanged between
participants: string headers, a return code, and an optional opaque
payload, which is usually an encoded [`Dxo`](../dxo/struct.Dxo.html).
*/
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug)]
pub struct Shareable {
	headers: BTreeMap<String, String>,
	return_code: ReturnCode,
	payload: Option<Vec<u8>>,
}

impl Shareable {
	pub fn new() -> Self {
		Self {
			headers: BTreeMap::new(),
			return_code: ReturnCode::Ok,
			payload: None,
		}
	}

	pub fn with_return_code(return_code: ReturnCode) -> Self {
		let mut shareable = Self::new();
		shareable.set_return_code(return_code);
		shareable
	}

	pub fn return_code(&self) -> ReturnCode {
		self.return_code
	}

	pub fn set_return_code(&mut self, return_code: ReturnCode) {
		self.return_code = return_code;
	}

	pub fn get_header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(|value| value.as_str())
	}

	pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.headers.insert(name.into(), value.into());
	}

	pub fn header_names(&self) -> impl Iterator<Item = &str> {
		self.headers.keys().map(|name| name.as_str())
	}

	pub fn payload(&self) -> Option<&[u8]> {
		self.payload.as_deref()
	}

	pub fn set_payload(&mut self, payload: Vec<u8>) {
		self.payload = Some(payload);
	}
}

impl Default for Shareable {
	fn default() -> Self {
		Self::new()
	}
}

#[test]
fn test_headers() {
	let mut shareable = Shareable::new();
	assert_eq!(shareable.get_header("owner"), None);
	shareable.set_header("owner", "site-1");
	assert_eq!(shareable.get_header("owner"), Some("site-1"));
}
