//! Tracing initialization for the binary

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flags
pub const LOG_ENV: &str = "QCF_LOG";

/// Initialize tracing based on CLI verbosity.
///
/// Mapping:
/// - `--quiet`  -> error
/// - 0 (none)   -> warn
/// - 1 (-v)     -> info
/// - 2 (-vv)    -> debug
/// - 3+ (-vvv)  -> trace
///
/// `QCF_LOG` overrides the flags if set. Logs go to stderr so command output
/// stays pipeable.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("qcf={}", level(verbosity, quiet))));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn level(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level(0, false), "warn");
        assert_eq!(level(2, false), "debug");
        assert_eq!(level(7, false), "trace");
        assert_eq!(level(3, true), "error");
    }
}
