use flexi_logger::{colored_opt_format, Logger};

use crate::Error;

/// Sets up local logging for the host application, `RUST_LOG` takes precedence over `log_spec`.
///
/// The crate itself only reports through the `log` facade, so without this (or another logger)
/// failed deliveries stay silent.
pub fn initialize(log_spec: &str) -> Result<(), Error> {
    Logger::with_env_or_str(log_spec)
        .format(colored_opt_format)
        .start()
        .map_err(|e| Error::LoggingSetup(e.to_string()))?;

    Ok(())
}

#[macro_use]
pub mod macros {
    /// `discord_info!(logger, "user {} joined", name)`
    #[macro_export]
    macro_rules! discord_info {
        ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => (
            $logger.info($msg, &[$(&$arg as &dyn std::fmt::Display),*])
        )
    }

    /// `discord_warn!(logger, "{} retries left", retries)`
    #[macro_export]
    macro_rules! discord_warn {
        ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => (
            $logger.warn($msg, &[$(&$arg as &dyn std::fmt::Display),*])
        )
    }

    /// `discord_error!(logger, "failed to save {}", id)` or, to attach the error,
    /// `discord_error!(logger, cause: &e, "failed to save {}", id)`
    #[macro_export]
    macro_rules! discord_error {
        ($logger:expr, cause: $cause:expr, $msg:expr $(, $arg:expr)* $(,)?) => (
            $logger.error_with($msg, $cause, &[$(&$arg as &dyn std::fmt::Display),*])
        );
        ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => (
            $logger.error($msg, &[$(&$arg as &dyn std::fmt::Display),*])
        )
    }
}
