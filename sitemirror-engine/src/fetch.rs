//! The per-task fetch, classify, save and expand cycle.

use crate::context::RunContext;
use crate::dom::Document;
use crate::error::{MirrorError, Result};
use crate::frontier::CrawlTask;
use crate::links::classify;
use crate::result::{ContentKind, FetchRecord};
use crate::rewrite::rewrite;
use reqwest::Response;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Run one claimed task to completion. Errors end up on the record.
pub(crate) async fn fetch_task(ctx: &RunContext, task: &CrawlTask) -> FetchRecord {
    let mut record = FetchRecord::new(task.url.to_string(), task.depth);
    let start = Instant::now();

    match process(ctx, task, &mut record).await {
        Ok(()) => {
            if let Some(ref path) = record.local_path {
                info!("{} saved to '{}'", task.url, path.display());
            }
        }
        Err(e) => {
            warn!("Mirror error for {}: {}", task.url, e);
            record.error = Some(e.to_string());
        }
    }

    record.elapsed = start.elapsed();
    record
}

async fn process(ctx: &RunContext, task: &CrawlTask, record: &mut FetchRecord) -> Result<()> {
    let slot = ctx.gate.acquire().await;
    debug!("Fetching {} (depth {})", task.url, task.depth);

    let response = ctx.client.get(task.url.clone()).send().await?;

    let status = response.status();
    record.status_code = status.as_u16();
    record.content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    if !status.is_success() {
        return Err(MirrorError::HttpStatus {
            url: task.url.to_string(),
            status: status.as_u16(),
        });
    }

    let local_path = ctx.target.local_path(&task.url);
    record.local_path = Some(local_path.clone());

    let is_html = record
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("text/html"));

    if !is_html {
        record.kind = Some(ContentKind::Asset);
        create_parent_dirs(&local_path).await?;
        record.bytes_written = stream_to_file(response, &local_path).await?;
        slot.release();
        return Ok(());
    }

    record.kind = Some(ContentKind::Html);
    let body = response.bytes().await?;
    slot.release();

    let rendered = expand_document(ctx, task, &body, &local_path, record)?;

    create_parent_dirs(&local_path).await?;
    tokio::fs::write(&local_path, &rendered)
        .await
        .map_err(|e| MirrorError::fs(&local_path, e))?;
    record.bytes_written = rendered.len() as u64;

    Ok(())
}

/// Parse, queue children, rewrite and serialize. Runs without awaiting since
/// the document tree is not `Send`.
fn expand_document(
    ctx: &RunContext,
    task: &CrawlTask,
    body: &[u8],
    local_path: &Path,
    record: &mut FetchRecord,
) -> Result<Vec<u8>> {
    let document = Document::parse(body)?;
    let links = classify(&document, &task.url, &ctx.target);
    record.resources_found = links.resources.len();
    record.pages_found = links.pages.len();

    for url in links.resources {
        ctx.spawn(CrawlTask::new(url, task.depth));
    }

    let next_depth = task.depth + 1;
    if next_depth <= ctx.max_depth {
        for url in links.pages {
            ctx.spawn(CrawlTask::new(url, next_depth));
        }
    } else if !links.pages.is_empty() {
        debug!(
            "Not following {} page links from {}: max depth {} reached",
            links.pages.len(),
            task.url,
            ctx.max_depth
        );
    }

    record.links_rewritten = rewrite(&document, &task.url, local_path, &ctx.target);
    document.render()
}

async fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| MirrorError::fs(parent, e))?;
    }
    Ok(())
}

async fn stream_to_file(mut response: Response, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| MirrorError::fs(path, e))?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .map_err(|e| MirrorError::fs(path, e))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(|e| MirrorError::fs(path, e))?;

    Ok(written)
}
