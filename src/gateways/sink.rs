/*!
 * Page sinks.
 */

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::PageSink;
use crate::errors::SinkError;
use crate::layout::document::Document;

/// Where an emitted document ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    /// Directory (or label, for in-memory sinks) holding the pages
    pub location: PathBuf,
    /// One path per emitted page, title page first
    pub pages: Vec<PathBuf>,
}

impl DocumentHandle {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Writes each page as `<stem>_<nnn>.png` into a directory
#[derive(Debug, Clone)]
pub struct PngDirectorySink {
    dir: PathBuf,
    stem: String,
}

impl PngDirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P, stem: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            stem: stem.to_string(),
        }
    }

    /// Path of page `number` (1-based)
    pub fn page_path(&self, number: usize) -> PathBuf {
        self.dir.join(format!("{}_{:03}.png", self.stem, number))
    }

    /// Whether `file_name` is a page written for this stem
    fn is_page_name(&self, file_name: &str) -> bool {
        file_name
            .strip_prefix(self.stem.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|rest| rest.strip_suffix(".png"))
            .is_some_and(|number| !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Delete pages left by an earlier emit of the same stem
    fn remove_stale_pages(&self) -> Result<usize, SinkError> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if entry.file_type()?.is_file() && self.is_page_name(&name.to_string_lossy()) {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

impl PageSink for PngDirectorySink {
    fn emit(&mut self, document: &Document) -> Result<DocumentHandle, SinkError> {
        fs::create_dir_all(&self.dir)?;
        let removed = self.remove_stale_pages()?;
        if removed > 0 {
            debug!("Removed {} old pages from {}", removed, self.dir.display());
        }

        let mut pages = Vec::with_capacity(document.page_count());
        for (i, page) in document.pages.iter().enumerate() {
            let path = self.page_path(i + 1);
            page.canvas()
                .image()
                .save_with_format(&path, image::ImageFormat::Png)
                .map_err(|e| match e {
                    image::ImageError::IoError(io) => SinkError::Io(io),
                    other => SinkError::Encode(other.to_string()),
                })?;
            debug!("Wrote {}", path.display());
            pages.push(path);
        }

        info!(
            "Wrote {} pages of '{}' to {}",
            pages.len(),
            document.title,
            self.dir.display()
        );
        Ok(DocumentHandle {
            location: self.dir.clone(),
            pages,
        })
    }
}

/// Keeps emitted documents in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Vec<Document>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

impl PageSink for MemorySink {
    fn emit(&mut self, document: &Document) -> Result<DocumentHandle, SinkError> {
        let location = PathBuf::from(format!("memory:{}", self.documents.len()));
        let pages = (1..=document.page_count())
            .map(|n| location.join(n.to_string()))
            .collect();
        self.documents.push(document.clone());
        Ok(DocumentHandle { location, pages })
    }
}
