//! Line-oriented prompting.

use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;

use thiserror::Error;

use crate::printer::{Printer, Style};

/// Errors raised while prompting for input.
#[derive(Debug, Error)]
pub enum InputError {
    /// Writing the prompt failed.
    #[error("failed to print prompt: {0}")]
    Prompt(#[source] io::Error),
    /// Reading from the input source failed.
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    /// The input source was exhausted before a line was read.
    #[error("input ended before a line was read")]
    EndOfInput,
}

/// Reads user input line by line, printing prompts through a [`Printer`].
pub struct Input {
    reader: RefCell<Box<dyn BufRead>>,
    printer: Rc<Printer>,
}

impl Input {
    /// Creates an input reader over `reader`, prompting through `printer`.
    pub fn new(reader: impl BufRead + 'static, printer: Rc<Printer>) -> Self {
        Self {
            reader: RefCell::new(Box::new(reader)),
            printer,
        }
    }

    /// Creates an input reader over the process stdin.
    pub fn stdin(printer: Rc<Printer>) -> Self {
        Self::new(io::stdin().lock(), printer)
    }

    /// Printer used for prompts.
    #[must_use]
    pub fn printer(&self) -> &Rc<Printer> {
        &self.printer
    }

    /// Prints `message` followed by a space and reads one line.
    ///
    /// # Errors
    ///
    /// Fails when the prompt cannot be written or no line can be read.
    pub fn ask(&self, message: &str) -> Result<String, InputError> {
        self.printer
            .print(&format!("{message} "), Style::plain())
            .map_err(InputError::Prompt)?;
        self.read_line()
    }

    /// Repeats [`Input::ask`] until `accept` approves the answer.
    ///
    /// # Errors
    ///
    /// Fails when a prompt cannot be written or the input runs out before an
    /// acceptable answer arrives.
    pub fn ask_until<F>(&self, message: &str, mut accept: F) -> Result<String, InputError>
    where
        F: FnMut(&str) -> bool,
    {
        loop {
            let answer = self.ask(message)?;
            if accept(&answer) {
                return Ok(answer);
            }
        }
    }

    /// Reads the next line, trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EndOfInput`] when the source is exhausted.
    pub fn read_line(&self) -> Result<String, InputError> {
        let mut line = String::new();
        let read = self
            .reader
            .borrow_mut()
            .read_line(&mut line)
            .map_err(InputError::Read)?;
        if read == 0 {
            return Err(InputError::EndOfInput);
        }
        Ok(line.trim().to_owned())
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("printer", &self.printer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::printer::SharedBuffer;

    const SCRIPT: &str = "do-something --foo --bar\nJohn\nb\nn\nsi\nsí";

    #[fixture]
    fn prompts() -> SharedBuffer {
        SharedBuffer::new()
    }

    fn input_over(text: &str, prompts: &SharedBuffer) -> Input {
        let printer = Rc::new(Printer::with_writer(prompts.clone()).with_ansi(false));
        Input::new(Cursor::new(text.to_owned().into_bytes()), printer)
    }

    #[rstest]
    fn reads_lines_and_prompts(prompts: SharedBuffer) {
        let input = input_over(SCRIPT, &prompts);
        let mut rejected = Vec::new();

        assert_eq!(input.read_line().expect("line"), "do-something --foo --bar");
        assert_eq!(input.ask("Insert your name:").expect("name"), "John");

        let answer = input
            .ask_until("Do it? [y/n]", |value| {
                let valid = matches!(value, "y" | "n");
                if !valid {
                    rejected.push(value.to_owned());
                }
                valid
            })
            .expect("yes or no");
        assert_eq!(answer, "n");
        assert_eq!(rejected, ["b"]);

        let answer = input
            .ask_until("¿proceder?", |value| matches!(value, "sí" | "no"))
            .expect("sí or no");
        assert_eq!(answer, "sí");

        assert_eq!(
            prompts.contents(),
            "Insert your name: Do it? [y/n] Do it? [y/n] ¿proceder? ¿proceder? "
        );
    }

    #[rstest]
    fn ansi_prompts_are_wrapped_in_reset_sequences(prompts: SharedBuffer) {
        let printer = Rc::new(Printer::with_writer(prompts.clone()));
        let input = Input::new(Cursor::new(b"John\n".to_vec()), printer);
        input.ask("Insert your name:").expect("name");
        assert_eq!(prompts.contents(), "\x1b[0mInsert your name: \x1b[0m");
    }

    #[rstest]
    fn exhausted_input_reports_end(prompts: SharedBuffer) {
        let input = input_over("maybe\n", &prompts);
        let result = input.ask_until("Proceed? [y/n]", |value| value == "y");
        assert!(matches!(result, Err(InputError::EndOfInput)));
    }

    #[rstest]
    fn trims_surrounding_whitespace(prompts: SharedBuffer) {
        let input = input_over("  padded value \r\n", &prompts);
        assert_eq!(input.read_line().expect("line"), "padded value");
    }
}
