use anyhow::Result;
use brand_scout::{cli, launch, logging, outlet};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let config = args.into_config()?;
    logging::init(config.verbose);

    let request = args.to_request();
    println!("🔍 正在调研与 {} 相似的品牌...", request.seed_brand);

    let report = launch(&config, &request).await?;
    outlet::print_summary(&report);

    Ok(())
}
