use anyhow::Result;
use fedflow_api::{Dxo, Filter, FlContext, Shareable};

/// Selects which variables [`ExcludeVars`](struct.ExcludeVars.html)
/// removes. The two modes match differently on purpose:
///
/// - `Names` entries are literal keys. An entry like `"conv/*"` names a
///   key that contains an asterisk, which in practice matches nothing.
/// - `Pattern` is a single pattern string. A trailing `*` turns it into
///   a prefix match, so `"conv/*"` removes every key starting with
///   `"conv/"`. Without a trailing `*` it is an exact match.
#[derive(Clone, Debug)]
pub enum VarSelector {
	Names(Vec<String>),
	Pattern(String),
}

impl VarSelector {
	fn matches(&self, key: &str) -> bool {
		match self {
			VarSelector::Names(names) => names.iter().any(|name| name == key),
			VarSelector::Pattern(pattern) => match pattern.strip_suffix('*') {
				Some(prefix) => key.starts_with(prefix),
				None => key == pattern,
			},
		}
	}
}

/**
`ExcludeVars` is a filter that drops selected variables from the payload
of a passing [`Dxo`](../fedflow_api/struct.Dxo.html). Headers, data kind,
and metadata are preserved; a shareable that carries no payload passes
through untouched.
*/
pub struct ExcludeVars {
	selector: VarSelector,
}

impl ExcludeVars {
	pub fn new(selector: VarSelector) -> Self {
		Self { selector }
	}

	/// Exclude exactly the given keys.
	pub fn names<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::new(VarSelector::Names(
			names.into_iter().map(|name| name.into()).collect(),
		))
	}

	/// Exclude keys matching a single pattern string.
	pub fn pattern(pattern: impl Into<String>) -> Self {
		Self::new(VarSelector::Pattern(pattern.into()))
	}
}

impl Filter for ExcludeVars {
	fn process(&self, shareable: Shareable, ctx: &FlContext) -> Result<Shareable> {
		if shareable.payload().is_none() {
			return Ok(shareable);
		}
		let mut dxo = Dxo::from_shareable(&shareable)?;
		let n_before = dxo.data.len();
		dxo.data.retain(|key, _| !self.selector.matches(key));
		let n_excluded = n_before - dxo.data.len();
		log::info!(
			"[{}] excluded {} of {} variables",
			ctx.identity_name(),
			n_excluded,
			n_before,
		);
		let mut filtered = dxo.into_shareable()?;
		for (name, value) in shareable_headers(&shareable) {
			filtered.set_header(name, value);
		}
		filtered.set_return_code(shareable.return_code());
		Ok(filtered)
	}
}

fn shareable_headers(shareable: &Shareable) -> Vec<(String, String)> {
	shareable
		.header_names()
		.map(|name| {
			let value = shareable.get_header(name).unwrap_or_default();
			(name.to_owned(), value.to_owned())
		})
		.collect()
}

#[cfg(test)]
fn test_ctx() -> FlContext {
	use fedflow_api::Workspace;
	FlContext::new("site-1", 1, Workspace::new("/tmp/ws"))
}

#[cfg(test)]
fn weights_dxo(entries: &[(&str, f64)]) -> Dxo {
	use fedflow_api::{DataKind, DxoValue};
	let data = entries
		.iter()
		.map(|(key, value)| ((*key).to_owned(), DxoValue::Float(*value)))
		.collect();
	Dxo::new(DataKind::Weights, data)
}

#[cfg(test)]
fn run_filter(input: &[(&str, f64)], selector: VarSelector) -> Vec<(String, f64)> {
	let shareable = weights_dxo(input).into_shareable().unwrap();
	let filter = ExcludeVars::new(selector);
	let filtered = filter.process(shareable, &test_ctx()).unwrap();
	let dxo = Dxo::from_shareable(&filtered).unwrap();
	dxo.data
		.into_iter()
		.map(|(key, value)| (key, value.as_float().unwrap()))
		.collect()
}

#[cfg(test)]
fn entries(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
	// Output entries come back in key order, so expectations sort too.
	let mut entries: Vec<(String, f64)> = entries
		.iter()
		.map(|(key, value)| ((*key).to_owned(), *value))
		.collect();
	entries.sort_by(|a, b| a.0.cmp(&b.0));
	entries
}

#[test]
fn test_exclude_single_name() {
	let output = run_filter(
		&[("a", 1.0), ("b", 2.0)],
		VarSelector::Names(vec!["a".to_owned()]),
	);
	assert_eq!(output, entries(&[("b", 2.0)]));
}

#[test]
fn test_exclude_name_list() {
	let output = run_filter(
		&[("a", 1.0), ("b", 2.0), ("c", 3.0)],
		VarSelector::Names(vec!["a".to_owned(), "b".to_owned()]),
	);
	assert_eq!(output, entries(&[("c", 3.0)]));
	let output = run_filter(
		&[("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)],
		VarSelector::Names(vec!["a".to_owned(), "d".to_owned()]),
	);
	assert_eq!(output, entries(&[("b", 2.0), ("c", 3.0)]));
}

#[test]
fn test_name_list_takes_asterisk_literally() {
	let input = [
		("conv/a", 1.0),
		("conv/b", 2.0),
		("drop/c", 3.0),
		("conv/d", 4.0),
	];
	let output = run_filter(&input, VarSelector::Names(vec!["conv/*".to_owned()]));
	assert_eq!(output, entries(&input));
}

#[test]
fn test_pattern_matches_prefix() {
	let output = run_filter(
		&[
			("conv/a", 1.0),
			("conv/b", 2.0),
			("drop/c", 3.0),
			("conv/d", 4.0),
		],
		VarSelector::Pattern("conv/*".to_owned()),
	);
	assert_eq!(output, entries(&[("drop/c", 3.0)]));
}

#[test]
fn test_pattern_without_asterisk_is_exact() {
	let output = run_filter(
		&[("a", 1.0), ("ab", 2.0)],
		VarSelector::Pattern("a".to_owned()),
	);
	assert_eq!(output, entries(&[("ab", 2.0)]));
}

#[test]
fn test_headers_and_return_code_survive() {
	let mut shareable = weights_dxo(&[("a", 1.0)]).into_shareable().unwrap();
	shareable.set_header("_model_owner_", "site-2");
	let filter = ExcludeVars::names(vec!["a"]);
	let filtered = filter.process(shareable, &test_ctx()).unwrap();
	assert_eq!(filtered.get_header("_model_owner_"), Some("site-2"));
	let dxo = Dxo::from_shareable(&filtered).unwrap();
	assert!(dxo.data.is_empty());
}

#[test]
fn test_payloadless_shareable_passes_through() {
	let shareable = Shareable::new();
	let filter = ExcludeVars::names(vec!["a"]);
	let filtered = filter.process(shareable, &test_ctx()).unwrap();
	assert!(filtered.payload().is_none());
}
