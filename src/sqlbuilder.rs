//! Append-only text accumulator for assembling DDL statements.

/// A thin wrapper over `String` with fluent write helpers.
///
/// DDL assembly writes clauses with trailing separators and trims the last
/// one before closing a group; `truncate_last` exists for exactly that.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    buf: String,
}

impl SqlBuilder {
    /// Start a builder with initial content.
    pub fn new(init: &str) -> Self {
        Self {
            buf: init.to_string(),
        }
    }

    /// Append a string.
    pub fn write(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Append a single character.
    pub fn write_char(&mut self, c: char) -> &mut Self {
        self.buf.push(c);
        self
    }

    /// Drop the last `n` bytes (removes a trailing separator).
    pub fn truncate_last(&mut self, n: usize) -> &mut Self {
        self.buf.truncate(self.buf.len().saturating_sub(n));
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the builder and return the accumulated statement.
    pub fn finish(self) -> String {
        self.buf
    }
}

impl std::fmt::Display for SqlBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.buf)
    }
}
