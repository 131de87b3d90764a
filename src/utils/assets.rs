//! Model asset staging.
//!
//! Bundled model files may live somewhere the runtime cannot open directly
//! (a packaged asset, a read-only install image). This module copies the
//! model into a writable directory before the session is created.

use crate::core::errors::ClassifyError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Copies a bundled model file into a writable directory and returns the
/// staged path.
///
/// The destination directory is created if absent. When a staged file of the
/// same size already exists the copy is skipped.
///
/// # Arguments
///
/// * `src_path` - The bundled model file.
/// * `dest_dir` - The writable directory to stage into.
///
/// # Errors
///
/// Returns [`ClassifyError::ConfigError`] for a source path without a file
/// name, or [`ClassifyError::Io`] for any filesystem failure.
pub fn stage_model_asset(
    src_path: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
) -> Result<PathBuf, ClassifyError> {
    let src_path = src_path.as_ref();
    let dest_dir = dest_dir.as_ref();

    let file_name = src_path.file_name().ok_or_else(|| {
        ClassifyError::config_error(format!(
            "model asset path has no file name: {}",
            src_path.display()
        ))
    })?;

    std::fs::create_dir_all(dest_dir)?;
    let dest_path = dest_dir.join(file_name);

    let src_len = std::fs::metadata(src_path)?.len();
    if let Ok(dest_meta) = std::fs::metadata(&dest_path) {
        if dest_meta.len() == src_len {
            debug!("model asset already staged at {:?}", dest_path);
            return Ok(dest_path);
        }
    }

    std::fs::copy(src_path, &dest_path)?;
    info!("staged model asset {:?} -> {:?}", src_path, dest_path);
    Ok(dest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_stage_copies_file() {
        let src_dir = tempfile::tempdir().unwrap();
        let dest_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("model.onnx");
        std::fs::File::create(&src)
            .unwrap()
            .write_all(b"weights")
            .unwrap();

        let staged = stage_model_asset(&src, dest_dir.path().join("assets")).unwrap();
        assert_eq!(staged.file_name().unwrap(), "model.onnx");
        assert_eq!(std::fs::read(&staged).unwrap(), b"weights");
    }

    #[test]
    fn test_stage_skips_identical_copy() {
        let src_dir = tempfile::tempdir().unwrap();
        let dest_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("model.onnx");
        std::fs::write(&src, b"weights").unwrap();

        let first = stage_model_asset(&src, dest_dir.path()).unwrap();
        let first_mtime = std::fs::metadata(&first).unwrap().modified().unwrap();

        let second = stage_model_asset(&src, dest_dir.path()).unwrap();
        let second_mtime = std::fs::metadata(&second).unwrap().modified().unwrap();
        assert_eq!(first, second);
        assert_eq!(first_mtime, second_mtime);
    }

    #[test]
    fn test_stage_replaces_stale_copy() {
        let src_dir = tempfile::tempdir().unwrap();
        let dest_dir = tempfile::tempdir().unwrap();
        let src = src_dir.path().join("model.onnx");
        std::fs::write(&src, b"new weights").unwrap();
        std::fs::write(dest_dir.path().join("model.onnx"), b"old").unwrap();

        let staged = stage_model_asset(&src, dest_dir.path()).unwrap();
        assert_eq!(std::fs::read(&staged).unwrap(), b"new weights");
    }

    #[test]
    fn test_stage_missing_source_fails() {
        let dest_dir = tempfile::tempdir().unwrap();
        let result = stage_model_asset("no_such_model.onnx", dest_dir.path());
        assert!(matches!(result, Err(ClassifyError::Io(_))));
    }
}
