// Routines for evaluating the DWD objective and its constraint set
pub mod evaluation;
// Routines for logging
pub mod logger;
// Numerical helpers
pub mod math;
// Routines for settings
pub mod settings;
