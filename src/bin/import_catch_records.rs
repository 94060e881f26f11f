//! Loads observer CSV exports into the bycatch database.
//!
//! Usage: `import-catch-records <file.csv>...`

use std::env;
use std::fs::File;
use std::process::ExitCode;

use dotenvy::dotenv;

use bycatch_viewer::db::establish_connection_pool;
use bycatch_viewer::models::config::ServerConfig;
use bycatch_viewer::repository::DieselRepository;
use bycatch_viewer::services::import::import_catch_records;

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: import-catch-records <file.csv>...");
        return ExitCode::from(2);
    }

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url, 1) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            return ExitCode::FAILURE;
        }
    };
    let repo = DieselRepository::new(pool);

    let mut failed = false;
    for path in &paths {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                log::error!("Cannot open {path}: {e}");
                failed = true;
                continue;
            }
        };

        match import_catch_records(file, &repo) {
            Ok(report) => {
                for row in &report.errors {
                    log::warn!("{path}: row {}: {}", row.row_number, row.message);
                }
                log::info!(
                    "{path}: imported {} of {} rows",
                    report.imported,
                    report.total_rows
                );
            }
            Err(e) => {
                log::error!("{path}: import failed: {e}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
