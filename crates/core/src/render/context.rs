//! Window and GL context lifecycle.
//!
//! `Renderer` owns one window, one surface, and one current GL context,
//! and walks the bootstrap sequence: `create_window` builds the window and
//! makes a 4.6 core context current, `load_gl` resolves function pointers
//! and sets the default render state, then the caller loops on draw
//! submission, `swap_buffers`, and `should_quit` until closed.
//!
//! The type is a plain value the host constructs and passes around; there
//! is no process-wide instance. It is `!Send` because the contained window
//! and context are thread-affine.

use crate::error::RenderError;
use crate::render::shader;
use crate::vec2::Vec2;
use crate::window::{WindowMode, WindowSettings};

use glow::HasContext;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopBuilder};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Fullscreen, Window, WindowBuilder};

/// Owns the window, the current GL context, and the default render state.
///
/// Lifecycle: `create_window` -> `load_gl` -> frame loop -> drop. GL
/// resources are released on drop, guarded by the same flag that guards
/// `load_gl`, so teardown is safe however far initialization got.
pub struct Renderer {
    gl: Option<glow::Context>,
    gl_loaded: bool,
    vertex_array: Option<glow::VertexArray>,
    pixel_scale: Vec2,
    close_requested: bool,
    surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    event_loop: EventLoop<()>,
}

impl Renderer {
    /// Creates the window and makes a 4.6 core-profile context current.
    ///
    /// The GL config honors `settings.samples`; decoration and sizing come
    /// from `settings`. Mode handling:
    ///
    /// - `Windowed`: an ordinary window, not bound to any monitor.
    /// - `WindowedFullscreen`: borderless fullscreen on the primary monitor.
    /// - `Fullscreen`: exclusive fullscreen using the primary monitor's
    ///   video mode at the requested resolution, preferring the deepest bit
    ///   depth and highest refresh rate.
    ///
    /// GL function pointers are not resolved here; call [`load_gl`] next.
    ///
    /// [`load_gl`]: Renderer::load_gl
    ///
    /// # Errors
    ///
    /// Returns `EventLoop`, `WindowCreation`, `NoVideoMode`, `Context`, or
    /// `Surface` depending on which step failed.
    #[allow(unsafe_code)]
    pub fn create_window(settings: WindowSettings) -> Result<Self, RenderError> {
        let event_loop = EventLoopBuilder::new()
            .build()
            .map_err(|e| RenderError::EventLoop(e.to_string()))?;

        let fullscreen = match settings.mode {
            WindowMode::Windowed => None,
            WindowMode::WindowedFullscreen => {
                Some(Fullscreen::Borderless(event_loop.primary_monitor()))
            }
            WindowMode::Fullscreen => {
                let monitor = event_loop.primary_monitor().ok_or_else(|| {
                    RenderError::WindowCreation("no primary monitor available".into())
                })?;
                let mode = monitor
                    .video_modes()
                    .filter(|m| {
                        m.size().width == settings.width && m.size().height == settings.height
                    })
                    .max_by_key(|m| (m.bit_depth(), m.refresh_rate_millihertz()))
                    .ok_or(RenderError::NoVideoMode {
                        width: settings.width,
                        height: settings.height,
                    })?;
                Some(Fullscreen::Exclusive(mode))
            }
        };

        let window_builder = WindowBuilder::new()
            .with_title(settings.name.as_str())
            .with_inner_size(PhysicalSize::new(settings.width, settings.height))
            .with_decorations(settings.decorated)
            .with_fullscreen(fullscreen);

        let template = ConfigTemplateBuilder::new().with_multisampling(settings.samples);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_builder(Some(window_builder))
            .build(&event_loop, template, |configs| {
                // Among configs matching the template, take the highest
                // sample count the driver offers.
                configs
                    .reduce(|best, next| {
                        if next.num_samples() > best.num_samples() {
                            next
                        } else {
                            best
                        }
                    })
                    .expect("glutin returned no matching GL configs")
            })
            .map_err(|e| RenderError::WindowCreation(e.to_string()))?;

        let window = window.ok_or_else(|| {
            RenderError::WindowCreation("display builder produced no window".into())
        })?;

        let display = gl_config.display();
        let raw_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 6))))
            .build(Some(raw_handle));

        // SAFETY: raw_handle belongs to `window`, which this struct owns
        // for at least as long as the context and surface.
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| RenderError::Context(e.to_string()))?;

        let surface_attributes = window.build_surface_attributes(Default::default());
        // SAFETY: the attributes are derived from the live window above.
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let gl_context = not_current
            .make_current(&surface)
            .map_err(|e| RenderError::Context(e.to_string()))?;

        let size = window.inner_size();
        log::debug!(
            "created {} window {}x{} ({} samples)",
            settings.mode,
            size.width,
            size.height,
            gl_config.num_samples()
        );

        Ok(Self {
            gl: None,
            gl_loaded: false,
            vertex_array: None,
            pixel_scale: Vec2::new(
                1.0 / size.width.max(1) as f32,
                1.0 / size.height.max(1) as f32,
            ),
            close_requested: false,
            surface,
            gl_context,
            window,
            event_loop,
        })
    }

    /// Resolves GL function pointers and sets the default render state:
    /// viewport at the window size, clear color (0.2, 0.0, 0.0, 0.0),
    /// depth testing with `LESS`, and one bound vertex array object.
    ///
    /// Idempotent: repeated calls after the first are no-ops, so the VAO
    /// is allocated exactly once.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Gl` if the vertex array cannot be created.
    #[allow(unsafe_code)]
    pub fn load_gl(&mut self) -> Result<(), RenderError> {
        if self.gl_loaded {
            return Ok(());
        }

        let display = self.gl_context.display();
        // SAFETY: the context made current in create_window is current on
        // this thread, so the display resolves live function pointers.
        let gl = unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

        let size = self.window.inner_size();

        // SAFETY: glow wraps raw GL calls as unsafe. Everything below runs
        // against the current context with fixed, valid arguments.
        let vertex_array = unsafe {
            gl.viewport(0, 0, size.width as i32, size.height as i32);
            gl.clear_color(0.2, 0.0, 0.0, 0.0);
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            let vao = gl.create_vertex_array().map_err(RenderError::Gl)?;
            gl.bind_vertex_array(Some(vao));
            vao
        };

        self.gl = Some(gl);
        self.vertex_array = Some(vertex_array);
        self.gl_loaded = true;
        log::debug!("GL functions loaded, default render state set");
        Ok(())
    }

    /// Whether `load_gl` has run. Transitions false -> true exactly once.
    pub fn gl_loaded(&self) -> bool {
        self.gl_loaded
    }

    /// Current inner window size as floats.
    ///
    /// The underlying query is integral; the conversion to `f32` is lossy
    /// for very large dimensions and exists for callers doing coordinate
    /// math.
    pub fn window_size(&self) -> Vec2 {
        let size = self.window.inner_size();
        Vec2::new(size.width as f32, size.height as f32)
    }

    /// Cached per-axis pixel scale, the reciprocal of the framebuffer
    /// dimensions. Written by the resize path inside `swap_buffers`.
    pub fn pixel_scale(&self) -> Vec2 {
        self.pixel_scale
    }

    pub fn set_pixel_scale(&mut self, scale: Vec2) {
        self.pixel_scale = scale;
    }

    /// Whether a window close was requested by the user, the OS, or
    /// [`request_quit`].
    ///
    /// [`request_quit`]: Renderer::request_quit
    pub fn should_quit(&self) -> bool {
        self.close_requested
    }

    /// Sets the close flag programmatically.
    pub fn request_quit(&mut self) {
        self.close_requested = true;
    }

    /// Presents the back buffer, then drains pending window events.
    ///
    /// Close requests set the quit flag; resizes update the pixel scale,
    /// resize the surface, and reset the viewport. Call once per frame
    /// after draw submission.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Surface` if the swap fails.
    pub fn swap_buffers(&mut self) -> Result<(), RenderError> {
        self.surface
            .swap_buffers(&self.gl_context)
            .map_err(|e| RenderError::Surface(e.to_string()))?;
        self.pump_events();
        Ok(())
    }

    fn pump_events(&mut self) {
        let window_id = self.window.id();
        let mut quit = false;
        let mut resized: Option<PhysicalSize<u32>> = None;

        let _ = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _| {
                if let Event::WindowEvent { window_id: id, event } = event {
                    if id != window_id {
                        return;
                    }
                    match event {
                        WindowEvent::CloseRequested => quit = true,
                        WindowEvent::Resized(size) => resized = Some(size),
                        _ => {}
                    }
                }
            });

        if let Some(size) = resized {
            self.handle_resize(size);
        }
        if quit {
            log::debug!("window close requested");
            self.close_requested = true;
        }
    }

    #[allow(unsafe_code)]
    fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimized; nothing to resize.
            return;
        };

        self.surface.resize(&self.gl_context, w, h);
        self.pixel_scale = Vec2::new(1.0 / size.width as f32, 1.0 / size.height as f32);

        if let Some(gl) = &self.gl {
            // SAFETY: viewport with the new framebuffer dimensions.
            unsafe { gl.viewport(0, 0, size.width as i32, size.height as i32) };
        }
        log::debug!("framebuffer resized to {}x{}", size.width, size.height);
    }

    /// Clears the color and depth buffers with the state set in `load_gl`.
    #[allow(unsafe_code)]
    pub fn clear(&self) -> Result<(), RenderError> {
        let gl = self.gl()?;
        // SAFETY: a plain state-clearing call against the current context.
        unsafe { gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) };
        Ok(())
    }

    /// Binds `program` (or unbinds with `None`) for subsequent draws.
    #[allow(unsafe_code)]
    pub fn use_program(&self, program: Option<glow::Program>) -> Result<(), RenderError> {
        let gl = self.gl()?;
        // SAFETY: the handle, if any, came from load_shaders on this context.
        unsafe { gl.use_program(program) };
        Ok(())
    }

    /// Uploads static vertex data and returns the buffer handle.
    ///
    /// # Errors
    ///
    /// Returns `GlNotLoaded` before `load_gl`, or `BufferCreation` if the
    /// buffer cannot be allocated.
    #[allow(unsafe_code)]
    pub fn create_vertex_buffer(&self, vertices: &[f32]) -> Result<glow::Buffer, RenderError> {
        let gl = self.gl()?;
        // SAFETY: glow wraps raw GL calls as unsafe. The buffer is freshly
        // created and the byte view of `vertices` is valid for the upload.
        unsafe {
            let buffer = gl.create_buffer().map_err(RenderError::BufferCreation)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            Ok(buffer)
        }
    }

    /// Submits a 3-vertex triangle draw from `vertex_buffer`.
    ///
    /// Binds the buffer as the array buffer, describes a 3-float attribute
    /// at slot 0 with no normalization and no stride/offset, draws, and
    /// disables the attribute. The buffer's size and contents are the
    /// caller's responsibility.
    #[allow(unsafe_code)]
    pub fn draw_quad(&self, vertex_buffer: glow::Buffer) -> Result<(), RenderError> {
        let gl = self.gl()?;
        // SAFETY: caller guarantees the buffer holds at least three
        // 3-float vertices; attribute slot 0 exists in every program this
        // crate links.
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, 0, 0);
            gl.draw_arrays(glow::TRIANGLES, 0, 3);
            gl.disable_vertex_attrib_array(0);
        }
        Ok(())
    }

    /// Reads, compiles, and links a vertex/fragment shader pair from disk.
    ///
    /// The vertex file is read first; a missing vertex file fails before
    /// the fragment file is touched. No caching: every call recompiles
    /// and relinks.
    ///
    /// # Errors
    ///
    /// Returns `GlNotLoaded` before `load_gl`, `ShaderFile` if either file
    /// cannot be read, or `ShaderCompile`/`ShaderLink` from the driver.
    pub fn load_shaders(
        &self,
        vertex_path: &Path,
        pixel_path: &Path,
    ) -> Result<glow::Program, RenderError> {
        let gl = self.gl()?;
        let vertex_src = shader::read_source(vertex_path)?;
        let pixel_src = shader::read_source(pixel_path)?;
        log::debug!(
            "compiling shaders: {} + {}",
            vertex_path.display(),
            pixel_path.display()
        );
        shader::compile_program(gl, &vertex_src, &pixel_src)
    }

    /// Releases the GL resources owned by this renderer.
    ///
    /// No-op when `load_gl` never ran; otherwise deletes the vertex array
    /// object and clears the loaded flag. Called from `Drop`, so manual
    /// calls are optional and repeat calls are safe.
    #[allow(unsafe_code)]
    pub fn release_gl(&mut self) {
        if !self.gl_loaded {
            return;
        }
        if let (Some(gl), Some(vao)) = (&self.gl, self.vertex_array.take()) {
            // SAFETY: vao was created in load_gl against this context.
            unsafe { gl.delete_vertex_array(vao) };
        }
        self.gl_loaded = false;
    }

    fn gl(&self) -> Result<&glow::Context, RenderError> {
        self.gl.as_ref().ok_or(RenderError::GlNotLoaded)
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.release_gl();
        // Surface, context, window, and event loop unwind in field order.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Renderer requires a live display; lifecycle tests run only where one
    // exists (`cargo test -- --ignored`).

    #[test]
    fn renderer_api_compiles_with_expected_signatures() {
        // Compile-time check that the public API exists.
        fn _assert_api(r: &mut Renderer) -> Result<(), RenderError> {
            let _: Vec2 = r.window_size();
            let _: Vec2 = r.pixel_scale();
            let _: bool = r.should_quit();
            let _: bool = r.gl_loaded();
            r.set_pixel_scale(Vec2::ZERO);
            r.request_quit();
            r.clear()?;
            r.swap_buffers()?;
            Ok(())
        }
    }

    #[test]
    #[ignore = "requires a display"]
    fn windowed_create_reports_requested_size() {
        let renderer = Renderer::create_window(WindowSettings::default()).unwrap();
        let size = renderer.window_size();
        // Platform DPI scaling may adjust this; default settings request 800x600.
        assert_eq!(size.to_array(), [800.0, 600.0]);
    }

    #[test]
    #[ignore = "requires a display"]
    fn load_gl_flag_transitions_once() {
        let mut renderer = Renderer::create_window(WindowSettings::default()).unwrap();
        assert!(!renderer.gl_loaded());
        renderer.load_gl().unwrap();
        assert!(renderer.gl_loaded());
        // Second call is a no-op and must not reallocate the VAO.
        renderer.load_gl().unwrap();
        assert!(renderer.gl_loaded());
    }

    #[test]
    #[ignore = "requires a display"]
    fn should_quit_false_until_requested() {
        let mut renderer = Renderer::create_window(WindowSettings::default()).unwrap();
        assert!(!renderer.should_quit());
        renderer.request_quit();
        assert!(renderer.should_quit());
    }

    #[test]
    #[ignore = "requires a display"]
    fn gl_operations_before_load_gl_are_rejected() {
        let renderer = Renderer::create_window(WindowSettings::default()).unwrap();
        let err = renderer.clear().unwrap_err();
        assert!(
            matches!(err, RenderError::GlNotLoaded),
            "expected GlNotLoaded, got: {err}"
        );
    }

    #[test]
    #[ignore = "requires a display"]
    fn release_gl_before_load_gl_is_a_no_op() {
        let mut renderer = Renderer::create_window(WindowSettings::default()).unwrap();
        renderer.release_gl();
        assert!(!renderer.gl_loaded());
    }
}
