//! Interactive yes/no confirmation.
//!
//! Prompts are synchronous blocking reads from standard input with no
//! timeout. Invalid input re-prompts in a loop rather than recursing, so
//! pathological repeated garbage cannot grow the call stack.

use std::io::{self, BufRead, Write};

/// Answer assumed when the user submits an empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Empty input means yes.
    Yes,
    /// Empty input means no.
    No,
}

/// Blocking yes/no confirmation.
pub trait Confirm {
    /// Ask `question`, returning `default` on empty input.
    ///
    /// # Errors
    ///
    /// Returns an error if standard input or output fails.
    fn confirm(&self, question: &str, default: Answer) -> io::Result<bool>;
}

/// [`Confirm`] implementation reading from the process's standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn confirm(&self, question: &str, default: Answer) -> io::Result<bool> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout().lock();
        ask(&mut input, &mut output, question, default)
    }
}

/// Prompt on `output` and read answers from `input` until one is valid.
///
/// Accepts `y`/`yes`/`n`/`no` case-insensitively; empty input selects the
/// default; end-of-input also selects the default so a closed stdin cannot
/// spin forever.
fn ask(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
    default: Answer,
) -> io::Result<bool> {
    let hint = match default {
        Answer::Yes => "[Y/n]",
        Answer::No => "[y/N]",
    };
    loop {
        write!(output, "{question} {hint}: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(default == Answer::Yes);
        }
        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default == Answer::Yes),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => writeln!(output, "invalid choice '{other}', expected y/yes/n/no")?,
        }
    }
}
