//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `georemind_core` linkage and the configured reminder database.
//! - Keep output deterministic for quick local sanity checks.

use georemind_core::db::open_db;
use georemind_core::{init_logging_from_config, CoreConfig, ReminderDao, SqliteReminderDao};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("georemind_core ping={}", georemind_core::ping());
    println!("georemind_core version={}", georemind_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("db open failed path={} error={err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };
    match SqliteReminderDao::new(&conn).count_reminders() {
        Ok(count) => {
            println!("georemind_core db={} reminders={count}", config.db_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("reminder count failed: {err}");
            ExitCode::FAILURE
        }
    }
}
