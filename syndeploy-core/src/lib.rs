pub mod domain;
pub mod infra;

// TODO: Put under feature flag
pub mod testing;
