/*!
This crate defines the boundary types federated participants exchange work through: the [`Dxo`](dxo/struct.Dxo.html) data envelope, the [`Shareable`](shareable/struct.Shareable.html) wire container it travels in, the per-invocation [`FlContext`](context/struct.FlContext.html), the cooperative [`Signal`](signal/struct.Signal.html) used to abort running tasks, and the [`Executor`](executor/trait.Executor.html), [`ModelLocator`](model_locator/trait.ModelLocator.html), and [`Filter`](filter/trait.Filter.html) traits components implement.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod context;
mod dxo;
mod executor;
mod filter;
mod model_locator;
mod shareable;
mod signal;
mod workspace;

pub use self::context::FlContext;
pub use self::dxo::{DataKind, Dxo, DxoValue};
pub use self::executor::{EventType, Executor, TaskError};
pub use self::filter::Filter;
pub use self::model_locator::ModelLocator;
pub use self::shareable::{ReturnCode, Shareable};
pub use self::signal::Signal;
pub use self::workspace::Workspace;
