//! Error types for the glint bootstrap layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by window, context, and shader operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The windowing event loop could not be created.
    #[error("failed to initialize the event loop: {0}")]
    EventLoop(String),

    /// The OS window could not be created.
    #[error("failed to create window: {0}")]
    WindowCreation(String),

    /// Exclusive fullscreen was requested but no video mode matched the
    /// requested resolution on the primary monitor.
    #[error("no video mode matching {width}x{height} on the primary monitor")]
    NoVideoMode { width: u32, height: u32 },

    /// The GL context could not be created or made current.
    #[error("failed to establish GL context: {0}")]
    Context(String),

    /// The window surface could not be created or presented.
    #[error("surface error: {0}")]
    Surface(String),

    /// A GL-dependent operation was called before `load_gl`.
    #[error("GL functions are not loaded; call load_gl after create_window")]
    GlNotLoaded,

    /// A shader source file could not be read.
    #[error("cannot open shader file '{path}': {message}")]
    ShaderFile { path: PathBuf, message: String },

    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    ShaderCompile { stage: String, log: String },

    /// A shader program failed to link.
    #[error("shader link error:\n{0}")]
    ShaderLink(String),

    /// A GL object other than a buffer could not be allocated.
    #[error("GL error: {0}")]
    Gl(String),

    /// A GL buffer object could not be allocated.
    #[error("failed to create vertex buffer: {0}")]
    BufferCreation(String),

    /// A window-mode name was not recognized.
    #[error("unknown window mode: '{0}' (expected windowed, fullscreen, or windowed-fullscreen)")]
    UnknownWindowMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_file_error_includes_path_and_message() {
        let err = RenderError::ShaderFile {
            path: PathBuf::from("shaders/missing.vert"),
            message: "No such file or directory".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("missing.vert"), "missing path in: {msg}");
        assert!(msg.contains("No such file"), "missing cause in: {msg}");
    }

    #[test]
    fn shader_compile_error_includes_stage_and_log() {
        let err = RenderError::ShaderCompile {
            stage: "fragment".into(),
            log: "0:3: undeclared identifier".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(msg.contains("undeclared"), "missing log in: {msg}");
    }

    #[test]
    fn no_video_mode_includes_dimensions() {
        let err = RenderError::NoVideoMode {
            width: 1920,
            height: 1080,
        };
        let msg = format!("{err}");
        assert!(msg.contains("1920"), "missing width in: {msg}");
        assert!(msg.contains("1080"), "missing height in: {msg}");
    }

    #[test]
    fn unknown_window_mode_includes_name() {
        let err = RenderError::UnknownWindowMode("maximized".into());
        let msg = format!("{err}");
        assert!(msg.contains("maximized"), "missing mode name in: {msg}");
    }

    #[test]
    fn gl_not_loaded_mentions_load_order() {
        let msg = format!("{}", RenderError::GlNotLoaded);
        assert!(msg.contains("load_gl"), "expected remediation hint in: {msg}");
    }

    #[test]
    fn render_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<RenderError>();
    }

    #[test]
    fn render_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderError>();
    }
}
