//! Task names and shareable header names shared between workflows and
//! the components they dispatch to.

pub const TASK_TRAIN: &str = "train";
pub const TASK_VALIDATION: &str = "validate";
pub const TASK_SUBMIT_MODEL: &str = "submit_model";

/// Header set by cross-site evaluation workflows to tell the validator
/// which participant the model under evaluation came from.
pub const MODEL_OWNER: &str = "_model_owner_";
