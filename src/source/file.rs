//! Local file document source.

use crate::error::{Error, InputError, IoError, Result};
use crate::io::{HtmlStripper, read_file};
use crate::source::DocumentSource;
use std::path::Path;
use tracing::debug;

/// Reads documents from the local filesystem; the identifier is a path.
///
/// HTML files (by extension, or by content sniffing) are stripped to prose.
///
/// # Examples
///
/// ```no_run
/// use opinion_contexts::source::{DocumentSource, FileSource};
///
/// let source = FileSource::new().unwrap();
/// let text = source.fetch("article.html").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    stripper: HtmlStripper,
}

impl FileSource {
    /// Creates a file source.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTML patterns fail to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            stripper: HtmlStripper::new()?,
        })
    }

    fn is_html_path(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "html" | "htm" | "xhtml"))
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self, id: &str) -> Result<String> {
        let path = Path::new(id);
        let content = read_file(path).map_err(|e| match e {
            Error::Io(IoError::FileNotFound { .. }) => {
                InputError::ContentNotFound { id: id.to_string() }.into()
            }
            other => other,
        })?;

        if Self::is_html_path(path) || HtmlStripper::looks_like_html(&content) {
            debug!(path = id, bytes = content.len(), "stripping HTML");
            return Ok(self.stripper.strip(&content));
        }
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_text_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "The cat sat. The cat ran.").unwrap();

        let source = FileSource::new().unwrap();
        let text = source.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(text, "The cat sat. The cat ran.");
    }

    #[test]
    fn test_fetch_html_file_is_stripped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<p>The cat <em>sat</em>.</p>").unwrap();

        let source = FileSource::new().unwrap();
        assert_eq!(source.fetch(path.to_str().unwrap()).unwrap(), "The cat sat.");
    }

    #[test]
    fn test_fetch_missing_file_is_not_found() {
        let source = FileSource::new().unwrap();
        let err = source.fetch("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::Input(InputError::ContentNotFound { .. })));
    }

    #[test]
    fn test_is_html_path() {
        assert!(FileSource::is_html_path(Path::new("a/b.HTML")));
        assert!(FileSource::is_html_path(Path::new("x.htm")));
        assert!(!FileSource::is_html_path(Path::new("x.txt")));
        assert!(!FileSource::is_html_path(Path::new("noext")));
    }

    #[test]
    fn test_name() {
        assert_eq!(FileSource::new().unwrap().name(), "file");
    }
}
