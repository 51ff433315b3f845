// Entrypoint for the seeding tool.
// - Keeps `main` small: read configuration, build an API client and hand it
//   to the pipeline.
// - The pipeline returns typed errors; only this file turns them into a
//   process exit code.

use devhabit_seed::{api::ApiClient, config::SeedConfig, output, seed::Seeder};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("devhabit_seed=info")))
        .with_writer(std::io::stderr)
        .init();

    // Base address comes from `DEVHABIT_API_URL` or defaults to
    // http://localhost:8080. See `config::SeedConfig::from_env`.
    let config = match SeedConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::error(&e);
            std::process::exit(e.exit_code());
        }
    };
    tracing::info!(base_url = %config.base_url, max_retries = config.max_retries, "configuration loaded");

    let api = ApiClient::new(config)?;

    match Seeder::new(&api).run() {
        Ok(report) => {
            output::info(format!(
                "Seeded {} tags, {} habits and {} habit-tag links",
                report.tags.len(),
                report.habits.len(),
                report.associations.len()
            ));
            Ok(())
        }
        Err(e) => {
            output::error(&e);
            std::process::exit(e.exit_code());
        }
    }
}
