//! Git process execution and branch helpers.

pub mod branch;
pub mod executor;

pub use branch::{branch_prefix, message_prefix};
pub use executor::{GitExecutor, SystemGit};
