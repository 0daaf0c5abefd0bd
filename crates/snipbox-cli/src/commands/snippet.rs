//! Snippet commands

use snipbox_core::NewSnippet;
use snipbox_storage::SnippetStore;

use crate::output::{format_snippet, format_snippets, OutputFormat};
use crate::{AppContext, Cli};

pub async fn add(title: &str, content: &str, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let snippet = ctx
        .service
        .create_snippet(NewSnippet::new(title, content))
        .await?;

    match ctx.format {
        OutputFormat::Json => ctx.print(&format_snippet(&snippet, ctx.format)?, cli),
        OutputFormat::Table => ctx.print(&format!("Created snippet {}", snippet.id), cli),
    }
    Ok(())
}

pub async fn get(id: &str, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let snippet = ctx.service.get_snippet(id).await?;
    ctx.print(&format_snippet(&snippet, ctx.format)?, cli);
    Ok(())
}

pub async fn delete(id: &str, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    ctx.service.delete_snippet(id).await?;
    ctx.print(&format!("Deleted snippet {}", id), cli);
    Ok(())
}

pub async fn list(cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let snippets = ctx.service.snippets().await?;
    tracing::info!("Found {} snippets", snippets.len());
    ctx.print(&format_snippets(&snippets, ctx.format)?, cli);
    Ok(())
}

pub async fn reset(force: bool, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.service.store();
    let count = store.count().await?;

    if !force {
        anyhow::bail!(
            "Refusing to delete {} snippets in namespace '{}' without --force",
            count,
            store.namespace()
        );
    }

    store.reset().await?;
    ctx.print(
        &format!("Deleted {} snippets from namespace '{}'", count, store.namespace()),
        cli,
    );
    Ok(())
}
