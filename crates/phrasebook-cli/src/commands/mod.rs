//! CLI command implementations.

mod check;
mod translate;

pub use check::{CheckArgs, run_check};
pub use translate::{TranslateArgs, run_translate};
