use std::time::Duration;

/// Captured output of one invocation.
///
/// `stdout` and `stderr` are kept apart so scenarios can read a value from
/// stdout alone (for example a commit ID); [`combined`](Self::combined) is
/// the text compared between instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CapturedResult {
    /// Build a result from plain values. Used by callers that derive a
    /// result from another one, and by tests.
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            duration: Duration::ZERO,
        }
    }

    /// Returns true if the tool exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len());
        text.push_str(&self.stdout);
        text.push_str(&self.stderr);
        text
    }

    /// Derive a new result whose stdout is `f(stdout)`. Exit code, stderr
    /// and duration carry over.
    pub fn map_stdout(self, f: impl FnOnce(&str) -> String) -> Self {
        Self {
            stdout: f(&self.stdout),
            ..self
        }
    }

    /// Derive a new result with stdout lines sorted.
    pub fn sorted_lines(self) -> Self {
        self.map_stdout(|out| {
            let mut lines: Vec<&str> = out.lines().collect();
            lines.sort_unstable();
            let mut sorted = lines.join("\n");
            if !sorted.is_empty() {
                sorted.push('\n');
            }
            sorted
        })
    }

    /// Number of non-empty stdout lines.
    pub fn line_count(&self) -> usize {
        self.stdout.lines().filter(|l| !l.trim().is_empty()).count()
    }
}
