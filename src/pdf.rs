//! External PDF compilation
//!
//! Pipes a rendered document through an external typesetter (pdflatex by
//! default), once per tree. The document is written to a scoped temporary
//! `.tex` file that is removed on every exit path; the compiler's stdout
//! and stderr are captured to a per-tree log file, the produced PDF is
//! renamed to `<prefix><index>.pdf`, and scratch artifacts (`.aux`, the
//! compiler's own `.log`) are cleaned up from the working directory.
//!
//! Compilation runs under an explicit timeout; exceeding it kills the
//! child and is reported as a recoverable per-document failure rather
//! than hanging the whole batch.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::error::{ConversionError, ConversionResult};

/// Options for the external compilation step.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Executable invoked to typeset one document.
    pub latex_cmd: String,
    /// Filename stem for generated `.pdf` and `.log` files.
    pub out_prefix: String,
    /// Per-document wall-clock limit for the compiler.
    pub timeout: Duration,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            latex_cmd: "pdflatex".to_string(),
            out_prefix: "qt00".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// What a finished (or killed) child process left behind.
struct Captured {
    status: ExitStatus,
    timed_out: bool,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

fn drain(pipe: Option<impl Read + Send + 'static>) -> Option<std::thread::JoinHandle<Vec<u8>>> {
    pipe.map(|mut p| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = p.read_to_end(&mut buf);
            buf
        })
    })
}

/// Run `cmd` to completion, killing it if it outlives `timeout`.
///
/// Output pipes are drained on background threads so a chatty child can
/// never block on a full pipe buffer while we poll for exit.
fn run_with_timeout(mut cmd: Command, timeout: Duration) -> io::Result<Captured> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn()?;

    let stdout_handle = drain(child.stdout.take());
    let stderr_handle = drain(child.stderr.take());

    let start = Instant::now();
    let (status, timed_out) = loop {
        if let Some(status) = child.try_wait()? {
            break (status, false);
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            break (child.wait()?, true);
        }
        std::thread::sleep(Duration::from_millis(50));
    };

    let stdout = stdout_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    let stderr = stderr_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();

    Ok(Captured {
        status,
        timed_out,
        stdout,
        stderr,
    })
}

fn check_and_remove(path: impl AsRef<Path>) {
    let path = path.as_ref();
    if path.exists() {
        let _ = fs::remove_file(path);
    }
}

/// Compile one document to `<out_prefix><index>.pdf`.
///
/// Returns the path of the renamed PDF. The captured compiler output is
/// written to `<out_prefix><index>.log` whether compilation succeeded or
/// not, and scratch artifacts are removed on every path.
pub fn compile_document(
    document: &str,
    index: usize,
    options: &CompileOptions,
) -> ConversionResult<PathBuf> {
    let mut temp = tempfile::Builder::new()
        .prefix("qtex-")
        .suffix(".tex")
        .tempfile()?;
    temp.write_all(document.as_bytes())?;
    temp.flush()?;

    // pdflatex drops its outputs in the working directory, named after
    // the input file's stem (the jobname).
    let jobname = temp
        .path()
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| ConversionError::IoError {
            message: "temporary file has no usable name".to_string(),
        })?;

    let mut cmd = Command::new(&options.latex_cmd);
    cmd.arg("-interaction=nonstopmode").arg(temp.path());

    let captured = match run_with_timeout(cmd, options.timeout) {
        Ok(captured) => captured,
        Err(e) => {
            return Err(ConversionError::external_tool(
                &options.latex_cmd,
                format!("failed to start: {}", e),
            ));
        }
    };

    check_and_remove(format!("{}.aux", jobname));
    check_and_remove(format!("{}.log", jobname));

    let log_path = PathBuf::from(format!("{}{}.log", options.out_prefix, index));
    let mut log = fs::File::create(&log_path)?;
    log.write_all(&captured.stdout)?;
    log.write_all(&captured.stderr)?;

    let produced = PathBuf::from(format!("{}.pdf", jobname));
    if captured.timed_out {
        check_and_remove(&produced);
        return Err(ConversionError::external_tool(
            &options.latex_cmd,
            format!("timed out after {} seconds", options.timeout.as_secs()),
        ));
    }
    if !produced.exists() {
        return Err(ConversionError::external_tool(
            &options.latex_cmd,
            format!(
                "no PDF produced (exit status {}), see {}",
                captured
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
                log_path.display()
            ),
        ));
    }

    let target = PathBuf::from(format!("{}{}.pdf", options.out_prefix, index));
    match fs::rename(&produced, &target) {
        Ok(()) => Ok(target),
        Err(e) => Err(ConversionError::from(e)),
    }
}
