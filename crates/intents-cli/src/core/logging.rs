//! Tracing initialization for the CLI.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Defaults to info for this crate and warn elsewhere; `--debug` raises the
/// crate level to debug, and `RUST_LOG` overrides everything.
pub fn init_logging(debug: bool) {
	let default_filter = if debug {
		"intents_cli=debug,warn"
	} else {
		"intents_cli=info,warn"
	};
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}
