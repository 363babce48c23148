use anyhow::Result;
use clap::Parser;
use precis::{load_generator, TextGenerator};
use server::build_app;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // The blocking HTTP client behind the generator must be built and dropped
    // outside the async runtime, so it outlives `runtime` here.
    let generator = load_generator();
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(serve(args, generator.clone()))?;
    drop(runtime);
    Ok(())
}

async fn serve(args: Args, generator: Arc<dyn TextGenerator>) -> Result<()> {
    let app = build_app(generator);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
