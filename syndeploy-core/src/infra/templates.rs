use std::path::{Path, PathBuf};

use crate::domain::DeployError;

use super::DeployLayout;

/// Materializes and parameterizes the `.tmpl` payload files.
///
/// Substitution is plain in-place literal replacement - values are inserted
/// verbatim with no escaping, and applying it twice to the same file is not
/// safe. Templates are therefore always copied out of the read-only
/// templates directory into the per-run artifacts directory first, and the
/// completion sentinel prevents the whole procedure from running twice.
pub struct TemplateEngine {
    layout: DeployLayout,
}

impl TemplateEngine {
    pub fn new(layout: &DeployLayout) -> Self {
        Self {
            layout: layout.clone(),
        }
    }

    /// Copies `<name>.tmpl` from the templates directory into the artifacts
    /// directory under its working name and returns the working path.
    pub fn materialize(&self, name: &str) -> Result<PathBuf, DeployError> {
        let src = self.layout.templates_dir.join(format!("{}.tmpl", name));
        let dst = self.layout.artifacts_dir.join(name);
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(&src, &dst)?;
        Ok(dst)
    }

    /// Replaces every occurrence of a literal placeholder token with a
    /// runtime value. The token must be present - a missing token means the
    /// template and the code disagree and the run must not proceed with a
    /// half-parameterized payload.
    pub fn substitute(&self, file: &Path, token: &str, value: &str) -> Result<(), DeployError> {
        let content = std::fs::read_to_string(file)?;
        if !content.contains(token) {
            return Err(DeployError::TokenNotFound {
                token: token.to_owned(),
                file: file.to_owned(),
            });
        }
        std::fs::write(file, content.replace(token, value))?;
        Ok(())
    }

    /// Convenience for materialize + a batch of substitutions
    pub fn render(&self, name: &str, substitutions: &[(&str, &str)]) -> Result<PathBuf, DeployError> {
        let path = self.materialize(name)?;
        for (token, value) in substitutions {
            self.substitute(&path, token, value)?;
        }
        Ok(path)
    }
}

///////////////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////////////
