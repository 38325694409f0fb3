pub(crate) mod evaluator;
pub(crate) mod provider;
pub(crate) mod state;
pub(crate) mod transaction;
