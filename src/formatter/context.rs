use std::fmt::Write;

/// Accumulates formatter output.
#[derive(Debug, Clone, Default)]
pub struct FormatterContext {
    output: String,
}

impl FormatterContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: &str) -> Result<(), std::fmt::Error> {
        self.output.write_str(text)
    }

    pub fn into_output(self) -> String {
        self.output
    }
}
