//! Spawning external tools.
//!
//! The builders only talk to [`ProcessRunner`], which keeps them testable
//! against a fake toolchain. [`SystemRunner`] is the real thing.

use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{ChildStdout, Command, Stdio};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::Error;

/// Exit status of a finished tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ToolExit {
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs one external tool to completion.
pub trait ProcessRunner {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// A non-zero exit is not an error; only a failure to start the process is.
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolExit, Error>;
}

/// Spawns real processes and streams their standard output to a sink.
pub struct SystemRunner {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl SystemRunner {
    /// Streams tool output to the process' own stdout.
    pub fn new() -> Self {
        Self::with_sink(Box::new(io::stdout()))
    }

    pub fn with_sink(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Copies the tool's stdout into the sink line by line until EOF.
    ///
    /// A sink that stops accepting writes does not stop the read: the rest of
    /// the output is discarded so the tool can run to completion.
    fn forward(&self, stdout: ChildStdout) -> io::Result<()> {
        let mut reader = BufReader::new(stdout);
        let mut line = Vec::new();
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut sink_open = true;
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if sink_open {
                if let Err(e) = sink.write_all(&line) {
                    warn!(error = %e, "tool output sink closed, discarding remaining output");
                    sink_open = false;
                }
            }
        }
        if sink_open {
            if let Err(e) = sink.flush() {
                warn!(error = %e, "failed to flush tool output");
            }
        }
        Ok(())
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<ToolExit, Error> {
        debug!(program = %program.display(), ?args, "spawning tool");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        // Drain stdout to EOF before waiting so a full pipe never blocks the child.
        let forwarded = match child.stdout.take() {
            Some(stdout) => self.forward(stdout),
            None => Ok(()),
        };
        if forwarded.is_err() {
            let _ = child.kill();
        }

        let status = child.wait()?;
        forwarded?;
        let exit = ToolExit {
            code: status.code(),
        };
        if !exit.is_success() {
            warn!(program = %program.display(), code = ?exit.code, "tool exited with failure");
        }
        Ok(exit)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_system_runner_streams_output() {
        let buffer = SharedBuffer::default();
        let runner = SystemRunner::with_sink(Box::new(buffer.clone()));
        let exit = runner
            .run(
                Path::new("/bin/sh"),
                &[OsString::from("-c"), OsString::from("echo one; echo two")],
            )
            .unwrap();

        assert!(exit.is_success());
        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output, "one\ntwo\n");
    }

    #[test]
    fn test_system_runner_reports_failure_without_error() {
        let runner = SystemRunner::with_sink(Box::new(io::sink()));
        let exit = runner
            .run(
                Path::new("/bin/sh"),
                &[OsString::from("-c"), OsString::from("exit 3")],
            )
            .unwrap();
        assert_eq!(exit.code, Some(3));
        assert!(!exit.is_success());
    }

    #[test]
    fn test_system_runner_drains_output_larger_than_pipe_buffer() {
        let buffer = SharedBuffer::default();
        let runner = SystemRunner::with_sink(Box::new(buffer.clone()));
        let exit = runner
            .run(
                Path::new("/bin/sh"),
                &[
                    OsString::from("-c"),
                    OsString::from("head -c 200000 /dev/zero; echo done"),
                ],
            )
            .unwrap();

        assert!(exit.is_success());
        let output = buffer.0.lock().unwrap();
        assert_eq!(output.len(), 200_005);
        assert!(output.ends_with(b"done\n"));
    }

    struct ClosedSink;

    impl Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_system_runner_waits_for_tool_when_sink_is_closed() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let marker = temp_dir.path().join("done");
        let script = format!("echo hello; sleep 1; touch '{}'", marker.display());
        let runner = SystemRunner::with_sink(Box::new(ClosedSink));

        let exit = runner
            .run(Path::new("/bin/sh"), &[OsString::from("-c"), OsString::from(script)])
            .unwrap();

        assert!(exit.is_success());
        assert!(marker.exists(), "tool must finish before run returns");
    }

    #[test]
    fn test_system_runner_missing_program_is_spawn_error() {
        let runner = SystemRunner::with_sink(Box::new(io::sink()));
        let result = runner.run(Path::new("/nonexistent/tool.exe"), &[]);
        assert!(matches!(result, Err(Error::Spawn { .. })));
    }
}
