use std::path::{Path, PathBuf};

use logsift_core::errors::CorpusError;
use logsift_core::traits::KeywordSource;

use crate::lists::read_list;

/// Keywords from a newline-delimited file.
#[derive(Debug, Clone)]
pub struct FileKeywordSource {
    path: PathBuf,
    name: String,
}

impl FileKeywordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeywordSource for FileKeywordSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<String>, CorpusError> {
        read_list(&self.path).map_err(|e| CorpusError::SourceUnavailable {
            source_name: self.name.clone(),
            reason: e.to_string(),
        })
    }
}
