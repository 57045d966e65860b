//! OpenGL bootstrap: window/context lifecycle, shader loading, and draw
//! submission.
//!
//! # Module overview
//!
//! - [`context`] -- `Renderer`: window, surface, current context, default
//!   render state, and the per-frame swap/event drain.
//! - [`shader`] -- stage compilation, program linking, and source-file
//!   reading with numbered-source diagnostics.

pub mod context;
pub mod shader;

pub use context::Renderer;
pub use shader::{compile_program, compile_shader, link_program, read_source, ShaderStage};
