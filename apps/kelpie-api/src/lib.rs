pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use color_eyre::eyre;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = kelpie_cli::VERSION,
	rename_all = "kebab",
	styles = kelpie_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = kelpie_config::load(&args.config)?;

	init_tracing(&config.service.log_level);

	let public_addr = parse_bind("service.http_bind", &config.service.http_bind)?;
	let admin_addr = parse_bind("service.admin_bind", &config.service.admin_bind)?;

	if config.security.bind_localhost_only && !public_addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"service.http_bind must stay on loopback while security.bind_localhost_only is set."
		));
	}
	// The admin surface has no auth of its own; it is never exposed off-host.
	if !admin_addr.ip().is_loopback() {
		return Err(eyre::eyre!("service.admin_bind must be a loopback address."));
	}

	let state = AppState::new(config).await?;
	let public = routes::router(state.clone());
	let admin = routes::admin_router(state);
	let public_listener = TcpListener::bind(public_addr).await?;
	let admin_listener = TcpListener::bind(admin_addr).await?;

	tracing::info!(%public_addr, %admin_addr, "Kelpie API listening.");

	tokio::try_join!(
		axum::serve(public_listener, public),
		axum::serve(admin_listener, admin),
	)?;

	Ok(())
}

fn parse_bind(key: &str, value: &str) -> color_eyre::Result<SocketAddr> {
	value
		.parse::<SocketAddr>()
		.map_err(|_| eyre::eyre!("{key} is not a valid socket address: {value:?}."))
}

fn init_tracing(directives: &str) {
	let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
