use std::path::{Path, PathBuf};

use geosentinel_proto::{ImageFormat, MAX_FILE_SIZE};

use crate::{Error, Result};

use super::SubmitError;

#[derive(Debug, Clone)]
pub struct SubmitFile {
    pub index: usize, // becomes the `image_<index>` field name
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub format: ImageFormat,
}

#[derive(Debug, Clone)]
pub struct SubmitFiles {
    pub files: Vec<SubmitFile>,
    max_file_size: u64,
}

impl Default for SubmitFiles {
    fn default() -> Self {
        Self::with_limit(MAX_FILE_SIZE)
    }
}

impl SubmitFiles {
    pub fn with_limit(max_file_size: u64) -> Self {
        Self {
            files: Vec::new(),
            max_file_size,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>, file_name: Option<String>) -> Result<()> {
        fn get_file_name(path: &Path) -> Option<String> {
            Some(path.file_name()?.to_str()?.to_string())
        }

        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        let file_name = file_name
            .or_else(|| get_file_name(path))
            .unwrap_or_else(|| format!("image_{}", self.files.len()));

        let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(SubmitError::UnsupportedFormat(file_name))?;
        }
        if size > self.max_file_size {
            return Err(SubmitError::FileTooLarge {
                file_name,
                size,
                limit: self.max_file_size,
            })?;
        }

        self.files.push(SubmitFile {
            index: self.files.len(),
            file_name,
            path: path.to_path_buf(),
            size,
            format: ImageFormat::from(mime),
        });
        Ok(())
    }

    /// Queues every image under `path`, named relative to the directory's
    /// parent. Files that fail preflight are skipped with a warning.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let base = path.as_ref().parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "directory has no parent")
        })?;

        for entry in walkdir::WalkDir::new(&path).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let entry_path = entry.path();
            if !entry_path.is_file() {
                continue;
            }

            let diff_path = pathdiff::diff_paths(entry_path, base).ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "unresolvable entry path")
            })?;
            let file_name = match diff_path.to_str() {
                Some(name) => name.replace('\\', "/"),
                None => {
                    log::error!("ignore file: {:?}", entry_path);
                    continue;
                }
            };

            log::debug!("add file {}", file_name);
            match self.add_file(entry_path, Some(file_name)) {
                Ok(()) => {}
                Err(Error::Submit(e)) => log::warn!("skipping {:?}: {}", entry_path, e),
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}
