use std::fmt;
use std::path::PathBuf;

/// Where the network weights come from.
pub enum ModelSource {
    File(PathBuf),
    Memory { name: String, bytes: Vec<u8> },
}

impl ModelSource {
    /// Model identifier: the file stem, or the caller-given name.
    pub fn name(&self) -> String {
        match self {
            ModelSource::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            ModelSource::Memory { name, .. } => name.clone(),
        }
    }
}

impl fmt::Debug for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::File(path) => f.debug_tuple("File").field(path).finish(),
            ModelSource::Memory { name, bytes } => f
                .debug_struct("Memory")
                .field("name", name)
                .field("bytes", &bytes.len())
                .finish(),
        }
    }
}

impl From<PathBuf> for ModelSource {
    fn from(path: PathBuf) -> Self {
        ModelSource::File(path)
    }
}
