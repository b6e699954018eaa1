use std::collections::VecDeque;

/// Seam between the evaluator and the outside world. DISPLAY writes through
/// `display` in a single call; SCAN reads one line through `request_line`.
pub trait ProgramIO {
    fn display(&mut self, text: &str) -> std::io::Result<()>;

    fn request_line(&mut self) -> std::io::Result<String>;
}

/// In-memory IO with pre-seeded input lines, for tests and embedding.
#[derive(Debug, Default)]
pub struct ScriptedIO {
    input: VecDeque<String>,
    pub output: String,
}

impl ScriptedIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|line| line.to_string()).collect(),
            output: String::new(),
        }
    }
}

impl ProgramIO for ScriptedIO {
    fn display(&mut self, text: &str) -> std::io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn request_line(&mut self) -> std::io::Result<String> {
        self.input.pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no more input")
        })
    }
}
