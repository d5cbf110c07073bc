#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod anyvalue;
mod de;
pub mod patch;
mod ser;
pub mod validate;

pub use anyvalue::{AnyMap, AnyValue};
pub use patch::{Patch, UndefinedError};
pub use validate::{ValueReceiver, extract_values};

/// Returns the current version of the patchfield library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
