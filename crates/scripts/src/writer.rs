use std::fmt::{Display, Write};

use crate::error::Result;

const INDENT: &str = "    ";

/// Line-oriented builder for Solidity source.
///
/// Tracks the current indentation so templates compose blocks instead of
/// hand-aligning strings.
#[derive(Debug, Default)]
pub struct ScriptWriter {
	buf: String,
	depth: usize,
}

impl ScriptWriter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Writes one line at the current indentation.
	pub fn line(&mut self, text: impl Display) -> Result<()> {
		for _ in 0..self.depth {
			self.buf.push_str(INDENT);
		}
		writeln!(self.buf, "{text}")?;
		Ok(())
	}

	/// Writes every line of `text` at the current indentation. Blank lines stay blank.
	pub fn lines(&mut self, text: &str) -> Result<()> {
		for line in text.lines() {
			if line.trim().is_empty() {
				self.blank();
			} else {
				self.line(line)?;
			}
		}
		Ok(())
	}

	pub fn blank(&mut self) {
		self.buf.push('\n');
	}

	/// Writes `header {`, the body one level deeper, then `}`.
	pub fn block<F>(&mut self, header: impl Display, body: F) -> Result<()>
	where
		F: FnOnce(&mut Self) -> Result<()>,
	{
		self.line(format_args!("{header} {{"))?;
		self.depth += 1;
		body(self)?;
		self.depth -= 1;
		self.line("}")
	}

	pub fn finish(self) -> String {
		self.buf
	}
}
