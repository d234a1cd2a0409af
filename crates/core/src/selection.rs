//! Validation of the path chosen in the picker.
//!
//! A chosen path is either a single Java source file or a directory. Files with
//! any other extension are rejected; directories are always accepted.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suffix a single selected file must carry
pub const SOURCE_SUFFIX: &str = ".java";
/// Directory the external tool writes its results to, next to the selection
pub const OUTPUT_DIR_NAME: &str = "output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSelection {
    File(PathBuf),
    Directory(PathBuf),
}

impl PathSelection {
    /// Classifies a chosen path.
    ///
    /// # Errors
    ///
    /// Returns `Access` if the path cannot be stat'ed and `InvalidSelection`
    /// if it is a file without the `.java` suffix.
    pub fn from_chosen(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path)
            .map_err(|e| Error::access(path.display().to_string(), e))?;

        if !metadata.is_file() {
            return Ok(Self::Directory(path.to_path_buf()));
        }

        if path.to_string_lossy().ends_with(SOURCE_SUFFIX) {
            Ok(Self::File(path.to_path_buf()))
        } else {
            Err(Error::invalid_selection(path.display().to_string()))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) | Self::Directory(path) => path,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Folder the external tool fills with its results: `output` inside the
    /// parent directory of the selection.
    pub fn output_destination(&self) -> PathBuf {
        let path = self.path();
        path.parent()
            .unwrap_or(path)
            .join(OUTPUT_DIR_NAME)
    }
}

impl Display for PathSelection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.path().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_java_file_is_accepted() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Foo.java");
        File::create(&file).unwrap();

        let selection = PathSelection::from_chosen(&file).unwrap();
        assert_eq!(selection, PathSelection::File(file));
        assert!(selection.is_file());
    }

    #[test]
    fn test_other_files_are_rejected() {
        let dir = tempdir().unwrap();
        for name in ["notes.txt", "Foo.class", "Foo.JAVA", "java"] {
            let file = dir.path().join(name);
            File::create(&file).unwrap();

            let result = PathSelection::from_chosen(&file);
            assert!(
                matches!(result, Err(Error::InvalidSelection { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_directories_are_accepted_regardless_of_contents() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty");
        let mixed = dir.path().join("mixed.java");
        fs::create_dir(&empty).unwrap();
        fs::create_dir(&mixed).unwrap();
        File::create(mixed.join("readme.md")).unwrap();

        assert_eq!(
            PathSelection::from_chosen(&empty).unwrap(),
            PathSelection::Directory(empty)
        );
        assert_eq!(
            PathSelection::from_chosen(&mixed).unwrap(),
            PathSelection::Directory(mixed)
        );
    }

    #[test]
    fn test_missing_path_is_access_error() {
        let result = PathSelection::from_chosen(Path::new("/this/path/does/not/exist"));
        assert!(matches!(result, Err(Error::Access { .. })));
    }

    #[test]
    fn test_output_destination_is_next_to_selection() {
        let file = PathSelection::File(PathBuf::from("/a/b/Foo.java"));
        assert_eq!(file.output_destination(), PathBuf::from("/a/b/output"));

        let dir = PathSelection::Directory(PathBuf::from("/a/b"));
        assert_eq!(dir.output_destination(), PathBuf::from("/a/output"));
    }
}
