use crate::context::FlContext;
use crate::dxo::Dxo;

/**
A `ModelLocator` names the models a participant can contribute to
cross-site evaluation and retrieves them on demand. `locate_model`
returning `None` means "no such model here" and is not an error: the
workflow simply evaluates without it.
*/
pub trait ModelLocator {
	fn model_names(&self, ctx: &FlContext) -> Vec<String>;

	fn locate_model(&self, model_name: &str, ctx: &FlContext) -> Option<Dxo>;
}
