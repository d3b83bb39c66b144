use std::path::PathBuf;

use palc::Parser;

/// Exit status for a bad command line.
pub const EX_USAGE: u8 = 64;
/// Exit status when the script has syntax errors.
pub const EX_DATAERR: u8 = 65;
/// Exit status when the script fails at runtime.
pub const EX_SOFTWARE: u8 = 70;
/// Exit status when the script can't be read.
pub const EX_IOERR: u8 = 74;

pub const USAGE: &str = "Usage: loxer [script]";

#[derive(Parser)]
#[command(name = "loxer", after_long_help = "Runs a Lox script, or starts a REPL when no script is given.")]
pub struct Cli {
	/// Script file to run, at most one
	pub scripts: Vec<PathBuf>,
}

/// What the command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
	/// Run a script file
	File(PathBuf),
	/// Read and run lines from stdin
	Repl,
	/// More than one script was given
	Usage,
}

impl Cli {
	pub fn mode(self) -> Mode {
		let mut scripts = self.scripts;
		match scripts.len() {
			0 => Mode::Repl,
			1 => Mode::File(scripts.remove(0)),
			_ => Mode::Usage,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mode(scripts: &[&str]) -> Mode { Cli { scripts: scripts.iter().map(PathBuf::from).collect() }.mode() }

	#[test]
	fn select_mode() {
		assert_eq!(mode(&[]), Mode::Repl);
		assert_eq!(mode(&["a.lox"]), Mode::File(PathBuf::from("a.lox")));
		assert_eq!(mode(&["a.lox", "b.lox"]), Mode::Usage);
	}
}
