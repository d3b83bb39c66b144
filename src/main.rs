use std::process::ExitCode;

use loxer::{
	LoxError, Loxer,
	cli::{Cli, EX_IOERR, EX_SOFTWARE, EX_USAGE, Mode, USAGE},
};
use palc::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_env("LOXER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();

	let mut loxer = Loxer::new();

	let result = match Cli::parse().mode() {
		Mode::File(path) => loxer.run_file(&path).map(|outcome| {
			outcome.report();
			outcome.exit_code()
		}),
		// Errors in the typed lines are reported, never fatal.
		Mode::Repl => loxer.run_prompt(std::io::stdin().lock()).map(|()| 0),
		Mode::Usage => {
			println!("{USAGE}");
			Ok(EX_USAGE)
		}
	};

	match result {
		Ok(code) => ExitCode::from(code),
		Err(e) => {
			eprintln!("{e}");
			ExitCode::from(match e {
				LoxError::ReadScript { .. } => EX_IOERR,
				LoxError::InternalError(_) => EX_SOFTWARE,
			})
		}
	}
}
