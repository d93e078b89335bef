use anyhow::Result;
use clap::Parser;

use readmeter_lib::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    readmeter_lib::init_logging();

    run(cli, &mut std::io::stdout().lock()).await
}
