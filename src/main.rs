use clap::Parser;
use waymark::cli::{run_cli, Cli};
use waymark::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging_with_config(&LogConfig::from_env())?;
    let stdout = std::io::stdout();
    run_cli(cli, &mut stdout.lock())
}
