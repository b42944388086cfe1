//! Indentation-aware source buffer.

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub(crate) struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Writes one line at the current depth. Empty input writes a blank line.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `header`, the body one level deeper, then `footer`.
    pub(crate) fn block_with<R>(
        &mut self,
        header: impl AsRef<str>,
        footer: &str,
        body: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.line(header);
        let out = self.indented(body);
        self.line(footer);
        out
    }

    /// Runs `body` one level deeper without writing delimiters.
    pub(crate) fn indented<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let out = body(self);
        self.depth -= 1;
        out
    }

    /// Writes a `{ ... }` block.
    pub(crate) fn block<R>(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self) -> R) -> R {
        self.block_with(header, "}", body)
    }

    /// Writes `///` lines for `text`, if any.
    pub(crate) fn doc(&mut self, text: Option<&str>) {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return;
        };
        for line in text.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {line}"));
            }
        }
    }

    /// Writes a `#[deprecated]` attribute when `deprecated` is set.
    pub(crate) fn deprecated(&mut self, deprecated: bool, reason: Option<&str>) {
        if !deprecated {
            return;
        }
        match reason.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reason) => self.line(format!("#[deprecated(note = {reason:?})]")),
            None => self.line("#[deprecated]"),
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}
