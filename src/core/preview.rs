//! Loading files for preview.
//!
//! [load_preview] reads a file the way the preview pane wants it: size-capped,
//! binary files refused, and at most a fixed number of lines. Refusals come back as
//! a [PreviewError] whose display text is the notice shown in place of content.

use crate::config::PreviewLimits;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, ErrorKind, Read, Seek};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Bytes peeked from the file start for magic numbers and NUL bytes.
const BINARY_PEEK_BYTES: usize = 1024;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("[Error: Access Denied]")]
    AccessDenied,
    #[error("[Not a regular file]")]
    NotRegularFile,
    #[error("[File too large for preview]")]
    TooLarge { size: u64, limit: u64 },
    #[error("[Binary file - preview hidden]")]
    Binary,
    #[error("[Error reading file: {0}]")]
    Io(#[from] io::Error),
}

impl PreviewError {
    /// Short notice shown in the pane instead of file content.
    pub fn notice(&self) -> String {
        match self {
            PreviewError::Io(e) if e.kind() == ErrorKind::PermissionDenied => {
                "[Error: Permission Denied]".to_string()
            }
            PreviewError::Io(e) if e.kind() == ErrorKind::NotFound => {
                "[Error: File Not Found]".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// A file loaded for preview.
#[derive(Debug, Clone)]
pub struct PreviewFile {
    pub path: PathBuf,
    /// Size on disk in bytes.
    pub size: u64,
    pub lines: Vec<String>,
    /// More lines exist than were loaded.
    pub truncated: bool,
}

impl PreviewFile {
    /// The file extension, if it has a UTF-8 one.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Loads up to `limits.max_lines()` lines of a regular text file.
///
/// Invalid UTF-8 is replaced rather than rejected; CRLF line endings are accepted.
pub fn load_preview(path: &Path, limits: &PreviewLimits) -> Result<PreviewFile, PreviewError> {
    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PreviewError::Io(e),
        _ => PreviewError::AccessDenied,
    })?;

    if meta.len() > limits.max_size() {
        return Err(PreviewError::TooLarge {
            size: meta.len(),
            limit: limits.max_size(),
        });
    }

    if !meta.is_file() {
        return Err(PreviewError::NotRegularFile);
    }

    let mut file = File::open(path)?;

    let mut head = Vec::with_capacity(BINARY_PEEK_BYTES);
    file.by_ref()
        .take(BINARY_PEEK_BYTES as u64)
        .read_to_end(&mut head)?;
    if head.starts_with(b"%PDF-") || head.contains(&0) {
        return Err(PreviewError::Binary);
    }
    file.rewind()?;

    let max_lines = limits.max_lines();
    let mut lines = Vec::new();
    let mut truncated = false;
    for chunk in BufReader::new(file).split(b'\n') {
        let mut bytes = chunk?;
        if lines.len() == max_lines {
            truncated = true;
            break;
        }
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        lines.push(String::from_utf8_lossy(&bytes).into_owned());
    }

    log::debug!(
        "loaded {} lines from {}{}",
        lines.len(),
        path.display(),
        if truncated { " (truncated)" } else { "" }
    );

    Ok(PreviewFile {
        path: path.to_path_buf(),
        size: meta.len(),
        lines,
        truncated,
    })
}
