//! Upload rules for movie posters.

use std::path::Path;

use crate::error::{AppError, AppResult};

pub const DEFAULT_MAX_BYTES: u64 = 1_048_576;
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

const MIB: u64 = 1_048_576;

/// An uploaded poster file, fully read into memory.
#[derive(Clone, Debug)]
pub struct PosterUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Allowed extensions and size ceiling applied to every poster upload.
///
/// Extensions are stored lowercased with a leading dot (`.jpg`).
#[derive(Clone, Debug, PartialEq)]
pub struct PosterPolicy {
    pub allowed_extensions: Vec<String>,
    pub max_bytes: u64,
}

impl Default for PosterPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl PosterPolicy {
    pub fn new<I, S>(extensions: I, max_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed_extensions = extensions
            .into_iter()
            .filter_map(|e| normalize_extension(e.as_ref()))
            .collect();
        Self { allowed_extensions, max_bytes }
    }

    /// Rejects posters with a disallowed extension or more than `max_bytes` bytes.
    pub fn check(&self, poster: &PosterUpload) -> AppResult<()> {
        if !self.allows_file_name(&poster.file_name) {
            return Err(AppError::validation(format!(
                "Only {} images are allowed",
                self.allowed_extensions.join(" and ")
            )));
        }

        if poster.bytes.len() as u64 > self.max_bytes {
            return Err(AppError::validation(format!(
                "Max allowed size for poster is {}",
                human_size(self.max_bytes)
            )));
        }

        Ok(())
    }

    pub fn allows_file_name(&self, file_name: &str) -> bool {
        let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = format!(".{}", ext.to_lowercase());
        self.allowed_extensions.iter().any(|allowed| *allowed == ext)
    }
}

fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() { None } else { Some(format!(".{ext}")) }
}

fn human_size(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{bytes} bytes")
    }
}
