//! CLI command implementations

mod notarize;
mod sign;

pub use notarize::NotarizeCommand;
pub use sign::SignCommand;
