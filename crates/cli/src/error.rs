//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: render error (window, context, GL, shader compile/link)
//! - 11: I/O error (shader source files)
//! - 12: input error (bad window mode)
//! - 13: serialization error

use glint_core::RenderError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A window/context/shader error from the core.
    Render(RenderError),
    /// An I/O error (unreadable shader file).
    Io(String),
    /// A user input error (unknown window mode).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Render(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::ShaderFile { .. } => CliError::Io(e.to_string()),
            RenderError::UnknownWindowMode(_) => CliError::Input(e.to_string()),
            other => CliError::Render(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn render_error_exit_code_is_10() {
        let err = CliError::Render(RenderError::GlNotLoaded);
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("read failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad mode".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn shader_file_errors_route_to_io() {
        let err = CliError::from(RenderError::ShaderFile {
            path: PathBuf::from("missing.vert"),
            message: "no such file".into(),
        });
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("missing.vert"));
    }

    #[test]
    fn unknown_mode_errors_route_to_input() {
        let err = CliError::from(RenderError::UnknownWindowMode("huge".into()));
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("huge"));
    }

    #[test]
    fn other_render_errors_route_to_render() {
        let err = CliError::from(RenderError::ShaderLink("varying mismatch".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("varying mismatch"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let err = CliError::from(bad_json.unwrap_err());
        assert_eq!(err.exit_code(), 13);
    }
}
