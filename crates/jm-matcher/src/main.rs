use clap::Parser;
use dotenvy::dotenv;
use jm_common::db::{connect_pool_checked, run_migrations};
use jm_common::matching::runner::{refresh_matching, run_matching};
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "jm-matcher",
    about = "Run the candidate/job matching pass over the whole catalog"
)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Recompute existing match records instead of skipping them
    #[arg(long, default_value_t = false)]
    refresh: bool,
}

fn run_summary_line(created: u64) -> String {
    format!("Matching completed. {created} matches created.")
}

fn refresh_summary_line(created: u64, refreshed: u64) -> String {
    format!("Refresh completed. {created} matches created, {refreshed} refreshed.")
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect_pool_checked(&cli.database_url).await?;
    run_migrations(&pool).await?;

    if cli.refresh {
        let summary = refresh_matching(&pool).await?;
        println!("{}", refresh_summary_line(summary.created, summary.refreshed));
    } else {
        let summary = run_matching(&pool).await?;
        println!("{}", run_summary_line(summary.created));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    jm_common::logging::init(env!("CARGO_PKG_NAME"));

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        error!(error = %err, "jm-matcher failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lines_report_counts() {
        assert_eq!(run_summary_line(4), "Matching completed. 4 matches created.");
        assert_eq!(
            refresh_summary_line(1, 9),
            "Refresh completed. 1 matches created, 9 refreshed."
        );
    }
}
