/// The fixed payload key the flat model array travels under.
pub const MODEL_KEY: &str = "model";

/// The model name the server contributes to cross-site evaluation.
pub const SERVER_MODEL_NAME: &str = "server";
