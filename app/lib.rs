/*!
This crate contains app-level pieces shared by federated workflows: the task and header name [constants](constants/index.html) workflows agree on, and the [`ExcludeVars`](exclude_vars/struct.ExcludeVars.html) filter that scrubs variables from weight payloads before they leave a site.
*/

#![allow(clippy::tabs_in_doc_comments)]

pub mod constants;
mod exclude_vars;

pub use self::exclude_vars::{ExcludeVars, VarSelector};
