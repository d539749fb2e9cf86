use crate::demo::{run_demo, run_rank, run_report, DemoArgs, RankArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use zephyrus_or::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Zephyrus OR",
    about = "Score and rank emergency-department bottlenecks from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Render one dashboard view for a hospital snapshot
    Report(ReportArgs),
    /// Rank bottleneck candidates from a CSV export
    Rank(RankArgs),
    /// Walk through every dashboard view using seeded mock data
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_top_is_rejected_like_the_environment_setting() {
        let rank = ["zephyrus-or-api", "rank", "--csv", "x.csv", "--top", "0"];
        assert!(Cli::try_parse_from(rank).is_err());
        assert!(Cli::try_parse_from(["zephyrus-or-api", "report", "--top", "0"]).is_err());

        let cli = Cli::try_parse_from(["zephyrus-or-api", "report", "--top", "3"])
            .expect("positive top parses");
        assert!(matches!(
            cli.command,
            Some(Command::Report(ReportArgs { top: Some(3), .. }))
        ));
    }
}
