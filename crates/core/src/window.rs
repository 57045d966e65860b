//! Window configuration: mode enumeration and creation settings.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the window is bound to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowMode {
    /// An ordinary window, not bound to any monitor.
    Windowed,
    /// Exclusive fullscreen using a video mode matching the requested
    /// resolution on the primary monitor.
    Fullscreen,
    /// A borderless fullscreen window on the primary monitor.
    WindowedFullscreen,
}

impl WindowMode {
    /// Parses a mode from its CLI-facing name.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnknownWindowMode` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, RenderError> {
        match name {
            "windowed" => Ok(Self::Windowed),
            "fullscreen" => Ok(Self::Fullscreen),
            "windowed-fullscreen" => Ok(Self::WindowedFullscreen),
            other => Err(RenderError::UnknownWindowMode(other.to_string())),
        }
    }

    /// Returns the CLI-facing name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Windowed => "windowed",
            Self::Fullscreen => "fullscreen",
            Self::WindowedFullscreen => "windowed-fullscreen",
        }
    }
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters consumed once by [`Renderer::create_window`].
///
/// [`Renderer::create_window`]: crate::render::Renderer::create_window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Requested client-area width in pixels.
    pub width: u32,
    /// Requested client-area height in pixels.
    pub height: u32,
    /// Window title.
    pub name: String,
    /// Requested multisample count for the GL config.
    pub samples: u8,
    /// Whether the window carries OS decorations.
    pub decorated: bool,
    /// Display binding mode.
    pub mode: WindowMode,
}

impl Default for WindowSettings {
    /// The default-settings factory: an 800x600 decorated window named
    /// "Empty" with 16 samples, in windowed mode.
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            name: "Empty".to_string(),
            samples: 16,
            decorated: true,
            mode: WindowMode::Windowed,
        }
    }
}
