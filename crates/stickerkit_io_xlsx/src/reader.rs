//! Master-list loader: model names from column A, rows 2..last.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;
use umya_spreadsheet::reader::xlsx::lazy_read;

use crate::conf::{N_COL_MASTER_MODEL, N_ROW_MASTER_FIRST};
use crate::spec::XlsxReadError;

/// Read model names from the active worksheet of the master workbook.
///
/// Only column A from row 2 on is scanned. Values are converted to text and
/// trimmed; blank and falsy cells are skipped. Source order and duplicates
/// are kept. The workbook handle is dropped before returning on every path.
pub fn read_model_names(path_file_master: &Path) -> Result<Vec<String>, XlsxReadError> {
    if !path_file_master.is_file() {
        return Err(XlsxReadError::MasterNotFound(
            path_file_master.to_path_buf(),
        ));
    }
    let derive_open_error = |message: String| XlsxReadError::OpenFailed {
        path: path_file_master.to_path_buf(),
        message,
    };

    let mut workbook =
        open_workbook_auto(path_file_master).map_err(|e| derive_open_error(e.to_string()))?;
    let n_idx_sheet = derive_active_sheet_idx(path_file_master);
    let range = workbook
        .worksheet_range_at(n_idx_sheet)
        .or_else(|| workbook.worksheet_range_at(0))
        .ok_or_else(|| XlsxReadError::NoWorksheet(path_file_master.to_path_buf()))?
        .map_err(|e| derive_open_error(e.to_string()))?;

    let (Some((row_start, _)), Some((row_end, _))) = (range.start(), range.end()) else {
        return Ok(Vec::new());
    };
    let row_first = row_start.max(N_ROW_MASTER_FIRST - 1);
    let col_idx = N_COL_MASTER_MODEL - 1;

    let mut l_models = Vec::new();
    for row_idx in row_first..=row_end {
        if let Some(value) = range.get_value((row_idx, col_idx))
            && let Some(model_name) = convert_master_value(value)
        {
            l_models.push(model_name);
        }
    }

    debug!(
        path = %path_file_master.display(),
        n_idx_sheet,
        n_models = l_models.len(),
        "master list loaded"
    );
    Ok(l_models)
}

/// Index of the saved active tab (`workbook.xml` `activeTab`).
///
/// Falls back to the first sheet when the file is not OOXML or carries no
/// workbook view.
fn derive_active_sheet_idx(path_file_master: &Path) -> usize {
    match lazy_read(path_file_master) {
        Ok(book) => usize::try_from(book.get_workbook_view().get_active_tab().to_owned())
            .unwrap_or(0),
        Err(_) => 0,
    }
}

/// Convert one master cell into a trimmed model name.
///
/// Falsy cells (empty, blank text, `false`, numeric zero) yield `None`.
/// Integral floats render without a fraction (`12.0` -> `"12"`), date cells
/// as `YYYY-MM-DD HH:MM:SS` and error cells as their code (`#N/A`).
pub fn convert_master_value(value: &Data) -> Option<String> {
    let raw_text = match value {
        Data::Empty => return None,
        Data::Bool(false) => return None,
        Data::Bool(true) => "True".to_string(),
        Data::Int(0) => return None,
        Data::Int(n) => n.to_string(),
        Data::Float(x) if *x == 0.0 => return None,
        Data::Float(x) => derive_float_text(*x),
        Data::String(s) => s.clone(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        other => other.to_string(),
    };

    let text = raw_text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

fn derive_float_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        return format!("{}", x as i64);
    }
    x.to_string()
}
