pub mod config;
pub mod error;
pub mod metadata;
pub mod patch;
pub mod prompt;
pub mod stamper;
pub mod version;

use env_logger::Env;

/// Installs the timestamped logger used by the binary. `RUST_LOG` overrides
/// the default `info` level.
pub fn init_logger() -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init()
}

// Re-export commonly used types
pub use config::{BuildNumberConfig, Config, StampPaths};
pub use error::StampError;
pub use stamper::{StampReport, Stamper};
pub use version::{BuildNumberScheme, BuildNumberStrategy, VersionComponents, VersionSpec};
