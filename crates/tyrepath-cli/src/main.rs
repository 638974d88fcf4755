use clap::Parser;
use tyrepath_cli::{CliArgs, TyrePathCli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    TyrePathCli::init_logging(args.verbose, args.quiet);

    let cli = TyrePathCli::from_args(&args)?;
    cli.run(args).await?;
    Ok(())
}
