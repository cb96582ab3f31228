//! Host capabilities available to I/O builtins
//!
//! The evaluator never touches the environment itself; builtins reach it
//! through their call context.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

/// Text output and line input provided by the host
pub trait Environment {
    /// Write one line of text
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Read one line of input, without its line terminator.
    /// Returns `None` at end of input.
    fn input(&mut self) -> io::Result<Option<String>>;
}

/// Environment backed by the process's stdin and stdout
#[derive(Debug, Default)]
pub struct StdEnvironment;

impl Environment for StdEnvironment {
    fn print(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }

    fn input(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Environment with scripted input and captured output.
///
/// Cloning shares the captured output, so a handle can be kept after the
/// environment has been moved into an interpreter.
#[derive(Debug, Clone, Default)]
pub struct BufferedEnvironment {
    input: Arc<Mutex<VecDeque<String>>>,
    output: Arc<Mutex<Vec<String>>>,
}

impl BufferedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment that will answer `input` with these lines, in order
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let env = Self::default();
        if let Ok(mut input) = env.input.lock() {
            input.extend(lines.into_iter().map(Into::into));
        }
        env
    }

    /// Lines printed so far
    pub fn output(&self) -> Vec<String> {
        self.output
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl Environment for BufferedEnvironment {
    fn print(&mut self, text: &str) -> io::Result<()> {
        self.output
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "output buffer poisoned"))?
            .push(text.to_string());
        Ok(())
    }

    fn input(&mut self) -> io::Result<Option<String>> {
        let mut input = self
            .input
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "input buffer poisoned"))?;
        Ok(input.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_roundtrip() {
        let mut env = BufferedEnvironment::with_input(["first", "second"]);
        let handle = env.clone();

        assert_eq!(env.input().unwrap().as_deref(), Some("first"));
        env.print("hello").unwrap();
        assert_eq!(env.input().unwrap().as_deref(), Some("second"));
        assert_eq!(env.input().unwrap(), None);
        assert_eq!(handle.output(), vec!["hello".to_string()]);
    }
}
