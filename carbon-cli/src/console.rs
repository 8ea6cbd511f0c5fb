//! Line-oriented terminal I/O behind a trait so screens can be driven by a
//! script in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Shows `prompt` and reads one line without its terminator.
    /// `None` means the input is exhausted.
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>>;

    fn write_line(
        &mut self,
        line: &str,
    ) -> io::Result<()>;
}

/// Process stdin / stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn write_line(
        &mut self,
        line: &str,
    ) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{line}")
    }
}

/// Replays canned input and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Every written line and every prompt with its answer, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn contains(
        &self,
        needle: &str,
    ) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    /// Lines of input not consumed yet.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>> {
        let answer = self.input.pop_front();
        self.transcript
            .push(format!("{prompt}{}", answer.as_deref().unwrap_or("<eof>")));
        Ok(answer)
    }

    fn write_line(
        &mut self,
        line: &str,
    ) -> io::Result<()> {
        self.transcript.push(line.to_string());
        Ok(())
    }
}
