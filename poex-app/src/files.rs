//! File picking and digest computation.

use std::path::PathBuf;

use poex_protocol::{file_digest, Digest};

/// A file that was read and digested successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub file_name: String,
    pub digest: Digest,
}

/// Open a native file picker dialog.
///
/// Returns the selected file path, or None if cancelled.
pub async fn pick_file() -> Option<PathBuf> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Choose a file")
        .pick_file()
        .await?;
    Some(handle.path().to_path_buf())
}

/// Read a file fully into memory and compute its claim digest.
///
/// Any readable file is accepted; there is no size or type check.
/// A failed read is logged and yields `None` — the caller's digest
/// simply never updates.
pub async fn load_and_digest(path: PathBuf) -> Option<LoadedFile> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    match tokio::fs::read(&path).await {
        Ok(content) => {
            let digest = file_digest(&content);
            tracing::info!(
                file_name = %file_name,
                size = content.len(),
                digest = %digest,
                "file digested"
            );
            Some(LoadedFile { file_name, digest })
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read chosen file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn digest_depends_only_on_content() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("report.pdf");
        let b = dir.path().join("copy of report.pdf");
        tokio::fs::write(&a, b"same bytes").await.unwrap();
        tokio::fs::write(&b, b"same bytes").await.unwrap();

        let loaded_a = load_and_digest(a).await.unwrap();
        let loaded_b = load_and_digest(b).await.unwrap();

        assert_eq!(loaded_a.digest, loaded_b.digest);
        assert_ne!(loaded_a.file_name, loaded_b.file_name);
    }

    #[tokio::test]
    async fn different_content_different_digest() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        tokio::fs::write(&a, b"one").await.unwrap();
        tokio::fs::write(&b, b"two").await.unwrap();

        let loaded_a = load_and_digest(a).await.unwrap();
        let loaded_b = load_and_digest(b).await.unwrap();
        assert_ne!(loaded_a.digest, loaded_b.digest);
    }

    #[tokio::test]
    async fn unreadable_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.bin");
        assert_eq!(load_and_digest(missing).await, None);
    }
}
