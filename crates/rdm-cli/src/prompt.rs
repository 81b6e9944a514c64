//! User-facing collaborators: yes/no confirmation and notifications.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

pub trait Prompt {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> bool;

    fn info(&mut self, message: &str);

    fn error(&mut self, message: &str);
}

/// Line-oriented prompt over a reader and a writer.
pub struct Console<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl Console<StdinLock<'static>, Stderr> {
    /// Questions and notifications on stderr, answers from stdin, so
    /// command output on stdout stays clean.
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), assume_yes)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for Console<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            let _ = writeln!(self.output, "{question} [y/N] y");
            return true;
        }
        let _ = write!(self.output, "{question} [y/N] ");
        let _ = self.output.flush();

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => {
                let _ = writeln!(self.output);
                false
            }
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }

    fn info(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }

    fn error(&mut self, message: &str) {
        let _ = writeln!(self.output, "Error: {message}");
    }
}
