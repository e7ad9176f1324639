//! Command implementations for pdd CLI

pub mod completions;
pub mod helpers;
pub mod hook;
pub mod install;
pub mod reset;
pub mod restore;
pub mod status;
