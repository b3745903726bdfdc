use chrono::SecondsFormat;
use error_stack::{Report, ResultExt};
use log::LevelFilter;

use crate::error::AdapterError;

/// Install a stderr logger for hosts that do not bring their own `log`
/// backend. Should be called once at startup.
///
/// # Errors
///
/// Returns a configuration error if a global logger is already installed.
pub fn init_logger(level: LevelFilter) -> Result<(), Report<AdapterError>> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}  {} {} {}",
                chrono::Local::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                record.level(),
                record.target(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .change_context(AdapterError::Configuration {
            message: "Failed to initialize logger".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::install_capturing_logger;

    #[test]
    fn test_init_logger_fails_when_logger_installed() {
        install_capturing_logger();

        let err = init_logger(LevelFilter::Info).expect_err("logger is already installed");
        assert!(matches!(
            err.current_context(),
            AdapterError::Configuration { .. }
        ));
    }
}
