// Packed (w, mu, xi) parameter vectors
pub mod params;
// Immutable problem data
pub mod problem;
