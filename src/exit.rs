// src/exit.rs
//! Standardized process exit codes for `jscheck`.
//!
//! Provides a stable contract for scripts and CI.

use std::process::Termination;

use crate::error::CheckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum JsCheckExit {
    /// Every scanned file parsed cleanly.
    Success = 0,
    /// Generic error (unreadable directory or file).
    Error = 1,
    /// Configuration or manifest could not be loaded.
    InvalidConfig = 2,
    /// A scanned file failed the syntax check.
    CheckFailed = 3,
}

impl JsCheckExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl Termination for JsCheckExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<&CheckError> for JsCheckExit {
    fn from(err: &CheckError) -> Self {
        match err {
            CheckError::Syntax { .. } => Self::CheckFailed,
            e if e.is_config() => Self::InvalidConfig,
            _ => Self::Error,
        }
    }
}

impl From<&anyhow::Error> for JsCheckExit {
    fn from(err: &anyhow::Error) -> Self {
        err.downcast_ref::<CheckError>()
            .map_or(Self::Error, Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_codes_distinct() {
        let codes = [
            JsCheckExit::Success.code(),
            JsCheckExit::Error.code(),
            JsCheckExit::InvalidConfig.code(),
            JsCheckExit::CheckFailed.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_manifest_error_maps_to_invalid_config() {
        let err = CheckError::ManifestShape {
            path: PathBuf::from("package.json"),
            reason: "missing `directories`".to_string(),
        };
        assert_eq!(JsCheckExit::from(&err), JsCheckExit::InvalidConfig);
    }

    #[test]
    fn test_io_error_maps_to_generic() {
        let err = CheckError::ReadFile {
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            path: PathBuf::from("a.js"),
        };
        let wrapped = anyhow::Error::new(err);
        assert_eq!(JsCheckExit::from(&wrapped), JsCheckExit::Error);
    }

    #[test]
    fn test_foreign_error_maps_to_generic() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(JsCheckExit::from(&err), JsCheckExit::Error);
    }
}
