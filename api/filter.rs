use crate::context::FlContext;
use crate::shareable::Shareable;
use anyhow::Result;

/// A `Filter` transforms a [`Shareable`](../shareable/struct.Shareable.html)
/// on its way in or out of a participant, for example to scrub variables
/// that must not leave the site.
pub trait Filter {
	fn process(&self, shareable: Shareable, ctx: &FlContext) -> Result<Shareable>;
}
