use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use pantry::ApiClient;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON array of ingredients to add to the catalog
    file: PathBuf,

    #[arg(long, env = "PANTRY_URL", default_value = "http://localhost:1111")]
    url: String,

    #[arg(long, env = "PANTRY_TOKEN")]
    token: Option<String>,

    /// Only report what would be created
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut client = ApiClient::new(&args.url)?;
    match args.token {
        Some(token) => client = client.with_token(token),
        None if !args.dry_run => bail!("--token or PANTRY_TOKEN is required unless --dry-run"),
        None => {}
    }

    process::import_file(&client, &args.file, args.dry_run).await?;

    Ok(())
}
