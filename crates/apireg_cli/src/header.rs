use std::fs;
use std::path::PathBuf;

use apireg_gen::{BoilerplateError, BoilerplateLoader};

/// Reads the license header from a file such as `hack/boilerplate.go.txt`.
#[derive(Debug, Clone, Default)]
pub struct FileBoilerplate {
    path: Option<PathBuf>,
}

impl FileBoilerplate {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl BoilerplateLoader for FileBoilerplate {
    fn load(&self) -> Result<Vec<u8>, BoilerplateError> {
        let path = self.path.as_ref().ok_or(BoilerplateError::NotConfigured)?;
        let mut header = fs::read(path).map_err(|source| BoilerplateError::Read {
            path: path.clone(),
            source,
        })?;
        if !header.is_empty() && !header.ends_with(b"\n\n") {
            if !header.ends_with(b"\n") {
                header.push(b'\n');
            }
            header.push(b'\n');
        }
        Ok(header)
    }
}
