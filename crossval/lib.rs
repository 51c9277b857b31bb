/*!
This crate contains the components a participant plugs into a cross-site evaluation workflow: a [`ServerModelLocator`](model_locator/struct.ServerModelLocator.html) that retrieves the model saved during training from the run directory, and a [`SumValidator`](validator/struct.SumValidator.html) executor that scores a received model against a normalized-sum metric.
*/

#![allow(clippy::tabs_in_doc_comments)]

pub mod artifact;
pub mod constants;
mod model_locator;
mod validator;

pub use self::model_locator::{ServerModelLocator, ServerModelLocatorOptions};
pub use self::validator::{SumValidator, SumValidatorOptions};
