//! Search command

use clap::Args;
use snipbox_search::SearchQuery;

use crate::output::format_hits;
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct SearchArgs {
    /// Words to look for in snippet titles
    pub query: String,

    /// Limit results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn run(args: &SearchArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let query = SearchQuery::parse(&args.query)?;
    tracing::debug!("Searching for {:?}", query.words());

    let mut hits = ctx.service.search_snippets(&query).await?;
    if let Some(limit) = args.limit {
        hits.truncate(limit);
    }
    tracing::info!("Found {} matching snippets", hits.len());

    let snippets = ctx.service.snippets().await?;
    ctx.print(&format_hits(&hits, &snippets, ctx.format)?, cli);
    Ok(())
}
