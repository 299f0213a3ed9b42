use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = nzbidx_api::Args::parse();

	nzbidx_api::run(args).await
}
