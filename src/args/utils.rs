//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level`; `RUST_LOG` is honoured separately by the subscriber.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    #[test]
    fn verbose_overrides_log_level() {
        let args = crate::args::Args::try_parse_from(["satchel", "--log-level", "warn", "init"])
            .expect("parse");
        assert_eq!(super::determine_log_level(&args), "warn");
        let args = crate::args::Args::try_parse_from(["satchel", "-v", "init"]).expect("parse");
        assert_eq!(super::determine_log_level(&args), "debug");
    }
}
