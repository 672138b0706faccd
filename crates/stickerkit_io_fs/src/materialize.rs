//! Template materialization: one verbatim template copy per model.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::spec::{MaterializeError, SpecMaterialized};
use crate::util::{derive_output_path, sanitize_model_token};

/// Fail with [`MaterializeError::TemplateNotFound`] when the template is absent.
///
/// Checked once at run start; individual copies may still fail later.
pub fn validate_template(path_file_template: &Path) -> Result<(), MaterializeError> {
    if !path_file_template.is_file() {
        return Err(MaterializeError::TemplateNotFound(
            path_file_template.to_path_buf(),
        ));
    }
    Ok(())
}

/// Create the output directory (and parents) when absent.
pub fn ensure_output_dir(path_dir_out: &Path) -> Result<(), MaterializeError> {
    fs::create_dir_all(path_dir_out).map_err(|e| MaterializeError::OutputDirInitFailed {
        path: path_dir_out.to_path_buf(),
        message: e.to_string(),
    })
}

/// Copy the template to `<path_dir_out>/<token>.xlsx` for one model.
///
/// An existing file at the output path is overwritten. Nothing is cleaned up
/// on failure.
pub fn materialize_template(
    path_file_template: &Path,
    path_dir_out: &Path,
    model_name: &str,
) -> Result<SpecMaterialized, MaterializeError> {
    let token = sanitize_model_token(model_name);
    let path_file_out = derive_output_path(path_dir_out, &token);

    let n_bytes = fs::copy(path_file_template, &path_file_out).map_err(|e| {
        MaterializeError::CopyFailed {
            path: path_file_out.clone(),
            message: e.to_string(),
        }
    })?;
    debug!(
        model = model_name,
        path = %path_file_out.display(),
        n_bytes,
        "template copied"
    );

    Ok(SpecMaterialized {
        token,
        path_file_out,
    })
}
