//! Compiler configuration (`screenspec.json`).

use std::path::{Path, PathBuf};

use screenspec_codegen::BackendConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, Result};

/// Backend settings plus where to find screens and where to write output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    #[serde(flatten)]
    pub backend: BackendConfig,
    /// Directory searched recursively for screen specs.
    pub specs_dir: PathBuf,
    /// File-name glob for screen specs.
    pub spec_pattern: String,
    /// JSON array of component definitions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_path: Option<PathBuf>,
    /// Root for relative output paths.
    pub out_dir: PathBuf,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            specs_dir: PathBuf::from("specs"),
            spec_pattern: "*.screen.json".to_string(),
            registry_path: None,
            out_dir: PathBuf::from("."),
        }
    }
}

impl CompilerConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Read a config file. Relative paths in it are taken against the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;
        let config = Self::from_json(&text).map_err(|source| CompileError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Rebase every relative path onto `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        self.specs_dir = rebase(base, &self.specs_dir);
        self.out_dir = rebase(base, &self.out_dir);
        self.registry_path = self.registry_path.map(|p| rebase(base, &p));
        self.backend.schema_path = self
            .backend
            .schema_path
            .map(|p| rebase(base, Path::new(&p)).to_string_lossy().into_owned());
        self.backend.tokens = self
            .backend
            .tokens
            .map(|p| rebase(base, Path::new(&p)).to_string_lossy().into_owned());
        self
    }

    pub fn tokens_path(&self) -> Option<&Path> {
        self.backend.tokens.as_deref().map(Path::new)
    }

    pub fn schema_path(&self) -> Option<&Path> {
        self.backend.schema_path.as_deref().map(Path::new)
    }
}

fn rebase(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
