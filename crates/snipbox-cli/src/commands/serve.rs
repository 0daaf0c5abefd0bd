//! Serve command

use clap::Args;

use crate::AppContext;

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on, e.g. 0.0.0.0:8087
    #[arg(short, long, env = "SNIPBOX_ADDR")]
    pub addr: Option<String>,
}

pub async fn run(args: &ServeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let addr = args.addr.as_deref().unwrap_or(&ctx.config.addr);
    tracing::info!("Starting HTTP server on {}", addr);
    snipbox_server::run_http_server(ctx.service.clone(), addr).await
}
