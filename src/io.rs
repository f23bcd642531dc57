use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::{CsvReverseError, CsvReverseResult};

/// Open the input file, reporting a missing file distinctly from other io errors
pub fn open_input(path: &Path) -> CsvReverseResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CsvReverseError::FileNotFound(path.display().to_string()),
        _ => e.into(),
    })
}

/// Output file that only appears at its final path once `persist` is called. Until then the
/// content lives in a temp file next to the target, which is removed on drop. An existing target
/// is resolved first, so writing to a symlink replaces the file it points to.
pub struct OutputFile {
    path: PathBuf,
    inner_file: NamedTempFile,
}

impl OutputFile {
    pub fn create(path: &Path) -> CsvReverseResult<OutputFile> {
        let path = match fs::canonicalize(path) {
            Ok(resolved) => resolved,
            Err(_) => path.to_owned(),
        };
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let inner_file = tempfile::Builder::new()
            .prefix(".csvreverse")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| Self::output_error(&path, e))?;
        Ok(OutputFile { path, inner_file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&mut self) -> BufWriter<&mut File> {
        BufWriter::new(self.inner_file.as_file_mut())
    }

    /// Move the written content to the target path, replacing any existing file
    pub fn persist(self) -> CsvReverseResult<()> {
        let OutputFile { path, inner_file } = self;
        if let Some(permissions) = Self::target_permissions(&path) {
            inner_file
                .as_file()
                .set_permissions(permissions)
                .map_err(|e| Self::output_error(&path, e))?;
        }
        inner_file
            .persist(&path)
            .map_err(|e| Self::output_error(&path, e.error))?;
        Ok(())
    }

    // Temp files are created owner-only. Match the file being replaced, else 0644.
    fn target_permissions(path: &Path) -> Option<fs::Permissions> {
        match fs::metadata(path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(_) => Self::default_permissions(),
        }
    }

    #[cfg(unix)]
    fn default_permissions() -> Option<fs::Permissions> {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }

    #[cfg(not(unix))]
    fn default_permissions() -> Option<fs::Permissions> {
        None
    }

    fn output_error(path: &Path, source: std::io::Error) -> CsvReverseError {
        CsvReverseError::Output {
            path: path.display().to_string(),
            source,
        }
    }
}
