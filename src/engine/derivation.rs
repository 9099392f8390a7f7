use serde::Serialize;

/// Ordered, human-readable trail of every rule considered during one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Derivation {
    steps: Vec<String>,
}

impl Derivation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(line: impl Into<String>) -> Self {
        Self::new().with(line)
    }

    pub fn with(mut self, line: impl Into<String>) -> Self {
        self.steps.push(line.into());
        self
    }

    pub fn with_all<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }
}
