//! ZIP extraction from an in-memory buffer.
//!
//! Entries are read strictly one at a time, but each file's bytes are written
//! by its own spawned task, so an unbounded number of writes can be in flight
//! while the next entry is being read. Extraction completes only once the
//! archive has reported end-of-entries and every write task has finished;
//! the first failing write aborts the whole job. There is no cancellation or
//! timeout path: a stuck write stalls the job (documented limitation).

use std::io::{Cursor, Read};
use std::path::Path;

use tokio::task::JoinSet;
use zip::ZipArchive;

use crate::{AssetError, Result};

pub struct ZipExtractor;

impl ZipExtractor {
    /// Extract a buffered ZIP archive into `destination`.
    ///
    /// Directories are created synchronously as their entries are seen; file
    /// entries are decompressed and handed to concurrent write tasks. On
    /// failure, previously completed files are not rolled back.
    pub async fn extract(buffer: Vec<u8>, destination: &Path) -> Result<()> {
        let mut archive = ZipArchive::new(Cursor::new(buffer))
            .map_err(|e| AssetError::Archive(format!("failed to open zip: {}", e)))?;

        let mut writes: JoinSet<Result<()>> = JoinSet::new();
        let entry_count = archive.len();

        for index in 0..entry_count {
            // A write that already failed makes reading further entries
            // pointless; surface the first error.
            while let Some(done) = writes.try_join_next() {
                Self::check_write(done, &mut writes)?;
            }

            let mut entry = archive
                .by_index(index)
                .map_err(|e| AssetError::Archive(format!("failed to read zip entry: {}", e)))?;

            let Some(relative) = entry.enclosed_name() else {
                writes.abort_all();
                return Err(AssetError::Archive(format!(
                    "entry \"{}\" escapes the destination directory",
                    entry.name()
                )));
            };
            let output_path = destination.join(relative);

            if entry.is_dir() {
                // Directories never count as pending writes.
                std::fs::create_dir_all(&output_path)?;
                continue;
            }

            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // The entry reader borrows the archive, so the bytes are
            // decompressed before the write task takes over. Only one entry
            // is ever held in memory alongside the in-flight writes.
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            if let Err(e) = entry.read_to_end(&mut bytes) {
                writes.abort_all();
                return Err(AssetError::Archive(format!(
                    "failed to read zip entry \"{}\": {}",
                    entry.name(),
                    e
                )));
            }
            let unix_mode = entry.unix_mode();

            writes.spawn(async move {
                tokio::fs::write(&output_path, &bytes)
                    .await
                    .map_err(|e| AssetError::EntryWrite {
                        path: output_path.display().to_string(),
                        reason: e.to_string(),
                    })?;

                #[cfg(unix)]
                if let Some(mode) = unix_mode {
                    use std::fs::Permissions;
                    use std::os::unix::fs::PermissionsExt;
                    tokio::fs::set_permissions(&output_path, Permissions::from_mode(mode))
                        .await
                        .map_err(|e| AssetError::EntryWrite {
                            path: output_path.display().to_string(),
                            reason: e.to_string(),
                        })?;
                }

                #[cfg(not(unix))]
                let _ = unix_mode;

                Ok(())
            });
        }

        // End of entries reached; completion requires every in-flight write
        // to finish as well.
        while let Some(done) = writes.join_next().await {
            Self::check_write(done, &mut writes)?;
        }

        log::debug!("extracted {} zip entries", entry_count);
        Ok(())
    }

    /// First error wins: abort the remaining writes and propagate it.
    fn check_write(
        done: std::result::Result<Result<()>, tokio::task::JoinError>,
        writes: &mut JoinSet<Result<()>>,
    ) -> Result<()> {
        let outcome = match done {
            Ok(outcome) => outcome,
            Err(join_err) => Err(AssetError::Archive(format!(
                "entry write task failed: {}",
                join_err
            ))),
        };

        if let Err(e) = outcome {
            writes.abort_all();
            return Err(e);
        }

        Ok(())
    }
}
