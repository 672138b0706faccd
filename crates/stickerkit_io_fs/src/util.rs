use std::path::{Path, PathBuf};

/// Output workbook extension.
pub const C_EXT_OUTPUT: &str = "xlsx";

/// Keep alphanumerics, spaces, underscores and hyphens, then trim.
///
/// The result is used both as the output file stem and as the text written
/// into the filled cells. Distinct names may map to the same token.
pub fn sanitize_model_token(model_name: &str) -> String {
    model_name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Derive `<path_dir_out>/<token>.xlsx`.
pub fn derive_output_path(path_dir_out: &Path, token: &str) -> PathBuf {
    path_dir_out.join(format!("{token}.{C_EXT_OUTPUT}"))
}
