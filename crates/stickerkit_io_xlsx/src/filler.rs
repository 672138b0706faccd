//! Merge-aware cell filler for a materialized workbook.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};
use umya_spreadsheet::{Worksheet, reader, writer};

use crate::spec::{
    EnumSheetSelection, ReportFill, SpecFillLayout, SpecMergeRegion, XlsxFillError,
};
use crate::util::{derive_merge_map, parse_range_ref, render_fill_pattern, resolve_merge_anchor};

/// Pick the worksheet to fill.
///
/// Precedence: exact name match, else the second sheet when more than one
/// exists, else the active sheet.
pub fn select_target_sheet(sheet_names: &[String], sheet_name_target: &str) -> EnumSheetSelection {
    if let Some(n_idx) = sheet_names.iter().position(|n| n == sheet_name_target) {
        return EnumSheetSelection::Named(n_idx);
    }
    if sheet_names.len() > 1 {
        return EnumSheetSelection::Second;
    }
    EnumSheetSelection::Active
}

/// Fill `layout` rows into the workbook at `path_file` and save it in place.
///
/// Writes landing inside a merged region go to the region's top-left cell.
/// When one region spans several filled rows, the anchor receives one write
/// per row and the last row's text is what remains.
pub fn fill_model_workbook(
    path_file: &Path,
    token: &str,
    layout: &SpecFillLayout,
) -> Result<ReportFill, XlsxFillError> {
    layout.validate()?;

    let mut book = reader::xlsx::read(path_file).map_err(|e| XlsxFillError::OpenFailed {
        path: path_file.to_path_buf(),
        message: e.to_string(),
    })?;

    let l_sheet_names = book
        .get_sheet_collection()
        .iter()
        .map(|ws| ws.get_name().to_string())
        .collect::<Vec<_>>();
    let rule_selection = select_target_sheet(&l_sheet_names, &layout.sheet_name_target);
    let worksheet = match rule_selection {
        EnumSheetSelection::Named(n_idx) => book.get_sheet_mut(&n_idx),
        EnumSheetSelection::Second => book.get_sheet_mut(&1),
        EnumSheetSelection::Active => Some(book.get_active_sheet_mut()),
    }
    .ok_or_else(|| XlsxFillError::SheetUnavailable {
        path: path_file.to_path_buf(),
        rule_selection,
    })?;
    let sheet_name = worksheet.get_name().to_string();
    debug!(sheet = %sheet_name, ?rule_selection, "target worksheet selected");

    let l_regions = collect_merge_regions(worksheet);
    let dict_merge_anchor = derive_merge_map(&l_regions);
    let (cnt_cells_written, cnt_writes_redirected) =
        write_fill_rows(worksheet, token, layout, &dict_merge_anchor);
    debug!(
        sheet = %sheet_name,
        n_regions = l_regions.len(),
        cnt_cells_written,
        cnt_writes_redirected,
        "cells filled"
    );

    writer::xlsx::write(&book, path_file).map_err(|e| XlsxFillError::SaveFailed {
        path: path_file.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(ReportFill {
        sheet_name,
        rule_selection,
        cnt_merge_regions: l_regions.len(),
        cnt_cells_written,
        cnt_writes_redirected,
    })
}

fn collect_merge_regions(worksheet: &Worksheet) -> Vec<SpecMergeRegion> {
    let mut l_regions = Vec::new();
    for range in worksheet.get_merge_cells() {
        let range_ref = range.get_range();
        match parse_range_ref(&range_ref) {
            Some(region) => l_regions.push(region),
            None => warn!(range = %range_ref, "unparseable merged range ignored"),
        }
    }
    l_regions
}

fn write_fill_rows(
    worksheet: &mut Worksheet,
    token: &str,
    layout: &SpecFillLayout,
    dict_merge_anchor: &HashMap<(u32, u32), (u32, u32)>,
) -> (u64, u64) {
    let mut cnt_cells_written = 0_u64;
    let mut cnt_writes_redirected = 0_u64;

    for row_idx in layout.row_first..=layout.row_last {
        let n_seq = row_idx - layout.row_first + 1;
        for spec_col in &layout.columns {
            let text = render_fill_pattern(&spec_col.pattern, token, n_seq);
            let (row_dst, col_dst) =
                resolve_merge_anchor(dict_merge_anchor, row_idx, spec_col.col_idx);
            if (row_dst, col_dst) != (row_idx, spec_col.col_idx) {
                cnt_writes_redirected += 1;
            }
            worksheet.get_cell_mut((col_dst, row_dst)).set_value_string(text);
            cnt_cells_written += 1;
        }
    }

    (cnt_cells_written, cnt_writes_redirected)
}
