use std::io::{self, BufRead, IsTerminal, Write};

use shared::domain::Credentials;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Input,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub name: &'static str,
    pub kind: QuestionKind,
    pub message: &'static str,
    pub invalid_message: &'static str,
}

impl Question {
    pub fn validate(&self, answer: &str) -> Result<(), &'static str> {
        if answer.is_empty() {
            Err(self.invalid_message)
        } else {
            Ok(())
        }
    }
}

pub const USERNAME: Question = Question {
    name: "username",
    kind: QuestionKind::Input,
    message: "Enter your GitHub username or e-mail address:",
    invalid_message: "Please enter your username or e-mail address.",
};

pub const PASSWORD: Question = Question {
    name: "password",
    kind: QuestionKind::Password,
    message: "Enter your password:",
    invalid_message: "Please enter your password",
};

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before `{0}` was answered")]
    Closed(&'static str),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads one answer without echoing it, e.g. `rpassword::read_password`.
pub type HiddenReader = Box<dyn FnMut() -> io::Result<String> + Send>;

pub struct Prompter<R, W> {
    input: R,
    output: W,
    hidden: Option<HiddenReader>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hidden: None,
        }
    }

    pub fn with_hidden_reader(mut self, reader: HiddenReader) -> Self {
        self.hidden = Some(reader);
        self
    }

    pub fn ask(&mut self, question: &Question) -> Result<String, PromptError> {
        loop {
            write!(self.output, "? {} ", question.message)?;
            self.output.flush()?;

            let answer = match (question.kind, self.hidden.as_mut()) {
                (QuestionKind::Password, Some(read_hidden)) => read_hidden()?,
                _ => self.read_line(question)?,
            };

            match question.validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(message) => writeln!(self.output, ">> {message}")?,
            }
        }
    }

    fn read_line(&mut self, question: &Question) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed(question.name));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn ask_credentials(&mut self) -> Result<Credentials, PromptError> {
        let username = self.ask(&USERNAME)?;
        let password = self.ask(&PASSWORD)?;
        Ok(Credentials { username, password })
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

pub fn ask_github_credentials() -> Result<Credentials, PromptError> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    if interactive {
        prompter = prompter.with_hidden_reader(Box::new(rpassword::read_password));
    }
    prompter.ask_credentials()
}
