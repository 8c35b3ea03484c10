//! Перенос обработанных выгрузок в папку с датой

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Переместить файлы в `folder`, вернуть новые пути
pub fn archive_inputs(files: &[&Path], folder: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(folder)?;

    let mut moved = Vec::with_capacity(files.len());
    for file in files {
        let Some(name) = file.file_name() else {
            tracing::warn!("пропущен путь без имени файла: {}", file.display());
            continue;
        };
        let target = folder.join(name);
        std::fs::rename(file, &target)?;
        tracing::debug!("{} → {}", file.display(), target.display());
        moved.push(target);
    }

    Ok(moved)
}
