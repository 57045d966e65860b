//! Shader compilation and linking against a live GL context.
//!
//! Compilation and linking require a `glow::Context`; source reading and
//! log formatting are pure and unit-tested without a GPU. Driver info logs
//! are surfaced through the `log` crate even when a stage succeeds, since
//! drivers often emit useful warnings on success.

use crate::error::RenderError;
use glow::HasContext;
use std::fs;
use std::path::Path;

/// A shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Human-readable stage name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        }
    }

    fn gl_type(&self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

/// Reads a shader source file in full.
///
/// # Errors
///
/// Returns `RenderError::ShaderFile` carrying the path and the underlying
/// I/O message if the file cannot be opened or read.
pub fn read_source(path: &Path) -> Result<String, RenderError> {
    fs::read_to_string(path).map_err(|e| RenderError::ShaderFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Prefixes each line of `source` with its 1-based line number.
///
/// Driver logs reference source line numbers; numbering the source keeps
/// compile errors easy to chase.
pub fn number_source(source: &str) -> String {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| format!("{:4} | {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compiles a single shader stage.
///
/// On success with a non-empty info log, the log is emitted at warn level.
///
/// # Errors
///
/// Returns `RenderError::ShaderCompile` carrying the numbered source and
/// the driver log if compilation fails.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader, RenderError> {
    // SAFETY: glow wraps raw GL calls as unsafe. The stage maps to a valid
    // shader type constant and `source` is a complete GLSL string; the
    // handle is deleted on the failure path.
    let shader = unsafe {
        gl.create_shader(stage.gl_type())
            .map_err(|e| RenderError::ShaderCompile {
                stage: stage.name().to_string(),
                log: e,
            })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    let info_log = unsafe { gl.get_shader_info_log(shader) };
    let compiled = unsafe { gl.get_shader_compile_status(shader) };

    if compiled {
        if !info_log.is_empty() {
            log::warn!("{} shader info log:\n{info_log}", stage.name());
        }
        Ok(shader)
    } else {
        unsafe { gl.delete_shader(shader) };
        Err(RenderError::ShaderCompile {
            stage: stage.name().to_string(),
            log: format!("{}\n\n{info_log}", number_source(source)),
        })
    }
}

/// Links a vertex and a fragment shader into a program.
///
/// The stage objects are detached after the link; the program keeps its
/// own copies. On success with a non-empty info log, the log is emitted
/// at warn level.
///
/// # Errors
///
/// Returns `RenderError::ShaderLink` with the driver log if linking fails.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, RenderError> {
    // SAFETY: glow wraps raw GL calls as unsafe. Both handles come from
    // successful compile_shader calls; the program is deleted on failure.
    let program = unsafe { gl.create_program().map_err(RenderError::ShaderLink)? };

    unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
    }

    let info_log = unsafe { gl.get_program_info_log(program) };
    let linked = unsafe { gl.get_program_link_status(program) };

    if linked {
        if !info_log.is_empty() {
            log::warn!("program link info log:\n{info_log}");
        }
        Ok(program)
    } else {
        unsafe { gl.delete_program(program) };
        Err(RenderError::ShaderLink(info_log))
    }
}

/// Compiles both stages from source and links them into a program.
///
/// The intermediate shader objects are deleted whether or not the link
/// succeeds. No caching: every call recompiles and relinks.
///
/// # Errors
///
/// Propagates `ShaderCompile` from either stage or `ShaderLink` from the
/// link step.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, RenderError> {
    let vert = compile_shader(gl, ShaderStage::Vertex, vertex_src)?;
    let frag = match compile_shader(gl, ShaderStage::Fragment, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vert is a live shader handle from the call above.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    let result = link_program(gl, vert, frag);

    // SAFETY: the program holds its own copies of both stages.
    unsafe {
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn read_source_missing_file_yields_shader_file_error() {
        let path = PathBuf::from("no/such/dir/shader.vert");
        let err = read_source(&path).unwrap_err();
        match err {
            RenderError::ShaderFile { path: p, message } => {
                assert_eq!(p, path);
                assert!(!message.is_empty(), "expected an I/O message");
            }
            other => panic!("expected ShaderFile, got: {other}"),
        }
    }

    #[test]
    fn read_source_reads_existing_file() {
        // The crate manifest is always present next to the sources.
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let text = read_source(&manifest).unwrap();
        assert!(
            text.contains("glint-core"),
            "expected the manifest contents, got:\n{text}"
        );
    }

    #[test]
    fn number_source_numbers_every_line_in_order() {
        let numbered = number_source("void main() {\n}\n");
        let lines: Vec<&str> = numbered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("   1 | "), "got: {}", lines[0]);
        assert!(lines[1].starts_with("   2 | "), "got: {}", lines[1]);
        assert!(lines[0].contains("void main()"), "got: {}", lines[0]);
    }

    #[test]
    fn number_source_handles_empty_input() {
        assert_eq!(number_source(""), "");
    }

    #[test]
    fn stage_names_match_gl_vocabulary() {
        assert_eq!(ShaderStage::Vertex.name(), "vertex");
        assert_eq!(ShaderStage::Fragment.name(), "fragment");
    }

    #[test]
    fn stage_gl_types_are_distinct() {
        assert_ne!(
            ShaderStage::Vertex.gl_type(),
            ShaderStage::Fragment.gl_type()
        );
    }

    #[test]
    #[ignore = "requires a display"]
    fn compile_program_rejects_invalid_glsl() {
        // Would test: compile_program with a syntax error in the fragment
        // source returns ShaderCompile with stage "fragment" and a numbered
        // source listing in the log.
    }

    #[test]
    #[ignore = "requires a display"]
    fn compile_program_links_minimal_passthrough_sources() {
        // Would test: two minimal passthrough sources produce a live
        // program handle.
    }
}
