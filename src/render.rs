//! Renderer adapters: hand DOT text to disk or to Graphviz.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{ChartError, Result};

/// Something that turns DOT text into a file.
pub trait ChartRenderer {
    /// Render `dot` to `output` and return the path actually written.
    fn render(&self, dot: &str, output: &Path) -> Result<PathBuf>;
}

/// `output` with `extension`, replacing any other extension it carries.
pub fn with_extension(output: &Path, extension: &str) -> PathBuf {
    let matches = output
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false);
    if matches {
        output.to_path_buf()
    } else {
        output.with_extension(extension)
    }
}

/// Writes the DOT text itself, for `--norender`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotFileWriter;

impl ChartRenderer for DotFileWriter {
    fn render(&self, dot: &str, output: &Path) -> Result<PathBuf> {
        let path = with_extension(output, "gv");
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, dot)?;
        log::info!("Wrote graph description to {}", path.display());
        Ok(path)
    }
}

/// Pipes DOT text through the Graphviz `dot` executable.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: String,
    format: String,
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot", "png")
    }
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            format: format.into(),
        }
    }
}

impl ChartRenderer for GraphvizRenderer {
    fn render(&self, dot: &str, output: &Path) -> Result<PathBuf> {
        let path = with_extension(output, &self.format);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        log::debug!("Running {} -T{} -o {}", self.program, self.format, path.display());
        let mut child = Command::new(&self.program)
            .arg(format!("-T{}", self.format))
            .arg("-o")
            .arg(&path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ChartError::Render(format!("failed to start {}: {}", self.program, e)))?;

        // Stdin is fed from its own thread while stderr drains below.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = dot.as_bytes().to_vec();
            thread::spawn(move || stdin.write_all(&input))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| ChartError::Render(format!("failed to wait for {}: {}", self.program, e)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChartError::Render(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| ChartError::Render(format!("stdin writer for {} panicked", self.program)))?
                .map_err(|e| ChartError::Render(format!("failed to write to {}: {}", self.program, e)))?;
        }

        log::info!("Rendered chart to {}", path.display());
        Ok(path)
    }
}
