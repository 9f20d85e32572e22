//! Filesystem page store: one directory of generated `.html` files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::StockPagesError;
use crate::ports::page_port::PagePort;

pub struct DirectoryPageStore {
    dir: PathBuf,
}

impl DirectoryPageStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PagePort for DirectoryPageStore {
    fn write_page(&self, file_name: &str, html: &str) -> Result<PathBuf, StockPagesError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, html)?;
        Ok(path)
    }

    /// Only regular files directly in the directory; subdirectories are not
    /// managed. A missing directory lists as empty.
    fn list_pages(&self) -> Result<Vec<String>, StockPagesError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(".html") {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn remove_page(&self, file_name: &str) -> Result<(), StockPagesError> {
        fs::remove_file(self.dir.join(file_name))?;
        Ok(())
    }
}
