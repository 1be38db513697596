use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = kelpie_api::Args::parse();

	kelpie_api::run(args).await
}
