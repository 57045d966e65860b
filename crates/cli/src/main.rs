#![deny(unsafe_code)]
//! CLI binary for the glint window/render bootstrap.
//!
//! Creates a window, loads GL, compiles the given shader pair, and draws
//! a triangle every frame until the window is closed (or a frame budget
//! runs out). `--json` prints the created window's parameters machine-
//! readably.

mod error;

use clap::Parser;
use error::CliError;
use glint_core::{Renderer, WindowMode, WindowSettings};
use std::path::PathBuf;
use std::process;

/// One triangle in clip space: three vertices, three floats each.
const TRIANGLE_VERTICES: [f32; 9] = [
    -1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0, //
    0.0, 1.0, 0.0,
];

#[derive(Parser)]
#[command(name = "glint", about = "Window/GL bootstrap demo: draws a triangle until closed")]
struct Cli {
    /// Window width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: u32,

    /// Window height in pixels.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: u32,

    /// Window title.
    #[arg(long, default_value = "Empty")]
    title: String,

    /// Multisample count requested for the GL config.
    #[arg(long, default_value_t = 16)]
    samples: u8,

    /// Window mode: windowed, fullscreen, or windowed-fullscreen.
    #[arg(short, long, default_value = "windowed")]
    mode: String,

    /// Create the window without OS decorations.
    #[arg(long)]
    undecorated: bool,

    /// Vertex shader path.
    #[arg(long, default_value = "crates/cli/shaders/triangle.vert")]
    vertex: PathBuf,

    /// Fragment shader path.
    #[arg(long, default_value = "crates/cli/shaders/triangle.frag")]
    fragment: PathBuf,

    /// Stop after this many frames (0 = run until the window is closed).
    #[arg(long, default_value_t = 0)]
    frames: u64,

    /// Print the created window parameters as JSON.
    #[arg(long)]
    json: bool,
}

fn settings_from_args(cli: &Cli) -> Result<WindowSettings, CliError> {
    let mode = WindowMode::from_name(&cli.mode)?;
    Ok(WindowSettings {
        width: cli.width,
        height: cli.height,
        name: cli.title.clone(),
        samples: cli.samples,
        decorated: !cli.undecorated,
        mode,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = settings_from_args(&cli)?;

    let mut renderer = Renderer::create_window(settings)?;
    renderer.load_gl()?;

    let program = renderer.load_shaders(&cli.vertex, &cli.fragment)?;
    let triangle = renderer.create_vertex_buffer(&TRIANGLE_VERTICES)?;

    let size = renderer.window_size();
    if cli.json {
        let info = serde_json::json!({
            "width": size.x,
            "height": size.y,
            "mode": cli.mode,
            "samples": cli.samples,
            "title": cli.title,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        log::info!("window up at {}x{}; close it to exit", size.x, size.y);
    }

    let mut frame: u64 = 0;
    while !renderer.should_quit() {
        renderer.clear()?;
        renderer.use_program(Some(program))?;
        renderer.draw_quad(triangle)?;
        renderer.swap_buffers()?;

        frame += 1;
        if cli.frames != 0 && frame >= cli.frames {
            renderer.request_quit();
        }
    }

    log::debug!("exiting after {frame} frames");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
