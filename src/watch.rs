use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing::{info, warn};

/// Block forever, calling `rerun` after each batch of changes under `dir`.
pub fn watch_and_rerun(dir: &Path, mut rerun: impl FnMut() -> Result<()>) -> Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("failed to create file watcher")?;
    watcher
        .watch(dir, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;

    info!("Watching {} for changes (Ctrl-C to stop)", dir.display());

    while let Ok(res) = rx.recv() {
        match res {
            Ok(event) if is_relevant(&event) => {
                // Editors emit several events per save; take them all at once.
                while rx.try_recv().is_ok() {}
                info!(paths = ?event.paths, "change detected, re-running");
                rerun()?;
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "watch error"),
        }
    }
    Ok(())
}

/// Content changes to non-hidden, non-backup files.
pub fn is_relevant(event: &Event) -> bool {
    let kind_matches = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    kind_matches
        && event.paths.iter().any(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| !name.starts_with('.') && !name.ends_with('~'))
        })
}
