use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "jpg";

#[derive(Debug, Clone)]
pub struct ImageFileFilter {
    extensions: Vec<String>,
}

impl Default for ImageFileFilter {
    fn default() -> Self {
        Self::new([DEFAULT_EXTENSION])
    }
}

impl ImageFileFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn accept(&self, dir: &Path, name: &OsStr) -> bool {
        let path = dir.join(name);
        path.is_file() && self.has_image_extension(&path)
    }

    // Non-recursive; sorted by path.
    pub fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if self.accept(dir, &entry.file_name()) {
                out.push(entry.path());
            }
        }
        out.sort();
        Ok(out)
    }

    fn has_image_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                self.extensions
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
            })
            .unwrap_or(false)
    }
}
