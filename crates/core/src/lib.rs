#![deny(unsafe_code)]
//! Window/render-context bootstrap for the glint 2D engine.
//!
//! Provides `Vec2`, `WindowMode`/`WindowSettings`, and the `Renderer`
//! context object that creates an OS window, makes an OpenGL 4.6 core
//! context current, compiles/links shader programs, and issues basic draw
//! calls. One window, one context, one thread.
//!
//! Typical sequence:
//!
//! ```no_run
//! use glint_core::{Renderer, WindowSettings};
//!
//! # fn main() -> Result<(), glint_core::RenderError> {
//! let mut renderer = Renderer::create_window(WindowSettings::default())?;
//! renderer.load_gl()?;
//! let program = renderer.load_shaders("tri.vert".as_ref(), "tri.frag".as_ref())?;
//! let triangle = renderer.create_vertex_buffer(&[
//!     -1.0, -1.0, 0.0,
//!      1.0, -1.0, 0.0,
//!      0.0,  1.0, 0.0,
//! ])?;
//!
//! while !renderer.should_quit() {
//!     renderer.clear()?;
//!     renderer.use_program(Some(program))?;
//!     renderer.draw_quad(triangle)?;
//!     renderer.swap_buffers()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod render;
pub mod vec2;
pub mod window;

pub use error::RenderError;
pub use render::Renderer;
pub use vec2::Vec2;
pub use window::{WindowMode, WindowSettings};
