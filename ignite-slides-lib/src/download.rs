use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use crate::catalogue::{CatalogueClient, SessionRecord};
use crate::error::DownloadError;
use crate::run::RunEvent;
use crate::sanitize::sanitize_filename;

/// Terminal classification of one session's processing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The session exposes no slide deck URL; nothing to do.
    NoDeck,
    /// A non-empty file already exists at the destination path.
    Existing,
    /// The deck was fetched and written to disk.
    Downloaded,
    /// The download attempt failed; any partial file was removed.
    Failed,
}

/// Destination path for a session's deck:
/// `{dest}/{sanitized code}_{sanitized title}.pptx`.
///
/// A session with an empty or unusable title falls back to "untitled".
pub fn deck_path(dest_dir: &Path, session: &SessionRecord) -> PathBuf {
    let code = sanitize_filename(&session.session_code);
    let mut title = sanitize_filename(&session.title);
    if title.is_empty() {
        title.push_str("untitled");
    }
    dest_dir.join(format!("{code}_{title}.pptx"))
}

/// Process one session: decide no-op / skip / download, and return the
/// outcome.
///
/// A zero-byte file at the destination is treated as the leftover of an
/// interrupted run and is downloaded again rather than skipped. On failure
/// the partial file is removed before returning, so a later run never
/// mistakes it for a finished deck.
pub async fn download_session(
    client: &CatalogueClient,
    session: &SessionRecord,
    dest_dir: &Path,
    events: &mpsc::UnboundedSender<RunEvent>,
) -> Outcome {
    let url = match session.slide_deck.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => return Outcome::NoDeck,
    };

    let dest = deck_path(dest_dir, session);
    if dest.metadata().map(|m| m.len() > 0).unwrap_or(false) {
        return Outcome::Existing;
    }

    let _ = events.send(RunEvent::DownloadStarted {
        code: session.session_code.clone(),
        title: session.title.clone(),
    });

    match fetch_to_file(client, url, &dest).await {
        Ok(()) => Outcome::Downloaded,
        Err(e) => {
            let _ = events.send(RunEvent::DownloadFailed {
                code: session.session_code.clone(),
                reason: e.to_string(),
            });
            remove_partial(&dest);
            Outcome::Failed
        }
    }
}

/// Stream a deck URL to `dest`, creating parent directories as needed.
async fn fetch_to_file(
    client: &CatalogueClient,
    url: &str,
    dest: &Path,
) -> Result<(), DownloadError> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut resp = client.get_deck(url).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DownloadError::Status(status.as_u16()));
    }

    let mut file = std::fs::File::create(dest)?;
    while let Some(chunk) = resp.chunk().await? {
        file.write_all(&chunk)?;
    }
    file.flush()?;
    Ok(())
}

/// Best-effort removal of a partial download. A failed delete is logged
/// but never escalated.
fn remove_partial(dest: &Path) {
    if dest.exists() {
        if let Err(e) = std::fs::remove_file(dest) {
            log::warn!("Could not remove partial file {}: {}", dest.display(), e);
        }
    }
}
