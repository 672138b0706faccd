//! Stateless helpers: A1 references, merge-anchor lookup and text patterns.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::conf::{C_PLACEHOLDER_SEQ, C_PLACEHOLDER_TOKEN, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX};
use crate::spec::SpecMergeRegion;

static RE_CELL_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]{1,7})$").expect("valid cell reference regex")
});

////////////////////////////////////////////////////////////////////////////////
// #region CellReferences

/// Convert column letters (`"AJ"`) to a 1-based index (`36`).
///
/// Returns `None` for empty input, non-letters, or indices past Excel's limit.
pub fn convert_col_letters_to_idx(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut n_idx: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let n_digit = u32::from(c.to_ascii_uppercase() as u8 - b'A') + 1;
        n_idx = n_idx.checked_mul(26)?.checked_add(n_digit)?;
    }
    (n_idx <= N_NCOLS_EXCEL_MAX).then_some(n_idx)
}

/// Parse an A1 reference (`"D5"`, `"$AJ$12"`) into 1-based `(row, col)`.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let caps = RE_CELL_REF.captures(cell_ref.trim())?;
    let col_idx = convert_col_letters_to_idx(&caps[1])?;
    let row_idx = caps[2].parse::<u32>().ok()?;
    if row_idx == 0 || row_idx > N_NROWS_EXCEL_MAX {
        return None;
    }
    Some((row_idx, col_idx))
}

/// Parse a range reference (`"D5:D7"`, or single cell `"D5"`) into a region.
///
/// Corners may be given in any order; the region is normalized.
pub fn parse_range_ref(range_ref: &str) -> Option<SpecMergeRegion> {
    let (ref_start, ref_end) = match range_ref.split_once(':') {
        Some((a, b)) => (a, b),
        None => (range_ref, range_ref),
    };
    let (row_a, col_a) = parse_cell_ref(ref_start)?;
    let (row_b, col_b) = parse_cell_ref(ref_end)?;
    Some(SpecMergeRegion {
        row_first: row_a.min(row_b),
        col_first: col_a.min(col_b),
        row_last: row_a.max(row_b),
        col_last: col_a.max(col_b),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergeLookup

/// Map every cell inside any merged region to that region's top-left anchor.
///
/// Overlapping regions (invalid in Excel) resolve to the later region.
pub fn derive_merge_map(regions: &[SpecMergeRegion]) -> HashMap<(u32, u32), (u32, u32)> {
    let n_cells = regions.iter().map(SpecMergeRegion::area).sum::<u64>();
    let mut dict_merge_anchor = HashMap::with_capacity(usize::try_from(n_cells).unwrap_or(0));

    for region in regions {
        let anchor = region.anchor();
        for row_idx in region.row_first..=region.row_last {
            for col_idx in region.col_first..=region.col_last {
                dict_merge_anchor.insert((row_idx, col_idx), anchor);
            }
        }
    }

    dict_merge_anchor
}

/// Resolve the write target for `(row, col)`: its merge anchor, or itself.
pub fn resolve_merge_anchor(
    dict_merge_anchor: &HashMap<(u32, u32), (u32, u32)>,
    row_idx: u32,
    col_idx: u32,
) -> (u32, u32) {
    dict_merge_anchor
        .get(&(row_idx, col_idx))
        .copied()
        .unwrap_or((row_idx, col_idx))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TextPatterns

/// Render a fill pattern for one row.
///
/// `{seq}` is substituted before `{token}` so token text is never re-expanded.
pub fn render_fill_pattern(pattern: &str, token: &str, n_seq: u32) -> String {
    pattern
        .replace(C_PLACEHOLDER_SEQ, &n_seq.to_string())
        .replace(C_PLACEHOLDER_TOKEN, token)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
