use clap::Parser;
use std::net::SocketAddr;
use zxac::conf::PlatformArgs;

#[derive(Debug, Parser)]
struct Cli {
    #[clap(flatten)]
    platform: PlatformArgs,
    #[clap(long, value_name = "ZXADMIN_LISTEN", env = "ZXADMIN_LISTEN", default_value = "127.0.0.1:9380")]
    listen: SocketAddr,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("zxac")
        .module("zxrbac")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let platform = args.platform.build().await?;
    let app = zxac::axum::router(platform);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    log::info!("listening on http://{}", &args.listen);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}
