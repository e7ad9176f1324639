//! Configuration file handling for pdd
//!
//! This module contains:
//! - `pdd.yaml` - the package spec ([`PackageSpec`])
//! - typed settings override values ([`SettingValue`])

pub mod package_spec;
pub mod serialization;
pub mod value;

// Re-export commonly used types
pub use package_spec::{CONFIG_FILE_NAME, PackageSpec};
pub use value::{Literal, SettingValue};
