use super::AskContext;
use crate::bank::Question;
use crate::error::{CareerError, CpResult};
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

/// Supplies one answer label per question.
pub trait AnswerSource {
    fn next_answer(&mut self, question: &Question, ctx: &AskContext<'_>) -> CpResult<String>;
}

/// Prompts on `output` and reads answers line by line from `input`.
/// End of input aborts the session.
pub struct InteractiveSource<R, W> {
    input: R,
    output: W,
}

impl InteractiveSource<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractiveSource<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn render(&mut self, question: &Question, ctx: &AskContext<'_>) -> io::Result<()> {
        if ctx.position == 1 {
            writeln!(self.output)?;
            write!(self.output, "== {}: {}", ctx.stage, ctx.stage.title())?;
            if !ctx.chain.is_empty() {
                write!(self.output, " ({})", ctx.chain.join(" > "))?;
            }
            writeln!(self.output, " ==")?;
        }
        writeln!(self.output)?;
        writeln!(
            self.output,
            "[{}/{}] {}",
            ctx.position, ctx.batch_size, question.section
        )?;
        writeln!(self.output, "  {}", question.text)?;
        for (key, label) in question.option_labels() {
            writeln!(self.output, "    {}) {}", key, label)?;
        }
        write!(self.output, "  > ")?;
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> AnswerSource for InteractiveSource<R, W> {
    fn next_answer(&mut self, question: &Question, ctx: &AskContext<'_>) -> CpResult<String> {
        self.render(question, ctx)?;
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(CareerError::Aborted);
            }
            let answer = line.trim();
            if question.accepts(answer) {
                return Ok(answer.to_ascii_uppercase());
            }
            write!(
                self.output,
                "  Please answer with one of {}: ",
                question.valid_keys().join(", ")
            )?;
            self.output.flush()?;
        }
    }
}

/// Picks uniformly among the offered keys. Seeded runs are reproducible.
pub struct RandomSource {
    rng: fastrand::Rng,
}

impl RandomSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self { rng }
    }
}

impl AnswerSource for RandomSource {
    fn next_answer(&mut self, question: &Question, _ctx: &AskContext<'_>) -> CpResult<String> {
        let keys = question.valid_keys();
        if keys.is_empty() {
            return Ok(String::new());
        }
        Ok(keys[self.rng.usize(..keys.len())].to_string())
    }
}
