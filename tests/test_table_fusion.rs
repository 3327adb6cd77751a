//! Integration tests for table cell-content fusion.
//!
//! Covers matching, serialization, style stripping and grid extraction on
//! mock structure-model output.

use ocr_layout::layout::TextFragment;
use ocr_layout::table::{
    count_placeholders, match_cells, strip_style, CellMatcher, StructureToken, TableCell,
    TableGrid, TableSerializer,
};
use ocr_layout::Error;
use proptest::prelude::*;

// =============================================================================
// HELPERS
// =============================================================================

fn tokens(raw: &[&str]) -> Vec<StructureToken> {
    StructureToken::parse_all(raw).unwrap()
}

fn strings(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// A 2×2 grid of 100×30 cells, row-major.
fn grid_cells() -> Vec<TableCell> {
    vec![
        TableCell::from_rect(0.0, 0.0, 100.0, 30.0),
        TableCell::from_rect(100.0, 0.0, 200.0, 30.0),
        TableCell::from_rect(0.0, 30.0, 100.0, 60.0),
        TableCell::from_rect(100.0, 30.0, 200.0, 60.0),
    ]
}

fn grid_tokens() -> Vec<StructureToken> {
    tokens(&[
        "<table>", "<tr>", "<td></td>", "<td></td>", "</tr>", "<tr>", "<td></td>", "<td></td>",
        "</tr>", "</table>",
    ])
}

// =============================================================================
// MATCHING
// =============================================================================

mod matching_tests {
    use super::*;

    #[test]
    fn test_hi_there_scenario() {
        let cells = vec![
            TableCell::from_rect(0.0, 0.0, 50.0, 20.0),
            TableCell::from_rect(50.0, 0.0, 100.0, 20.0),
        ];
        let fragments = vec![
            TextFragment::from_rect(0.0, 0.0, 48.0, 20.0, "Hi"),
            TextFragment::from_rect(52.0, 0.0, 100.0, 20.0, "There"),
        ];

        let matches = match_cells(&cells, &fragments);
        assert_eq!(matches.get(0), Some(&[0][..]));
        assert_eq!(matches.get(1), Some(&[1][..]));

        let contents = matches.cell_contents(cells.len(), &fragments, " ").unwrap();
        let html = TableSerializer::new()
            .serialize(&tokens(&["<tr>", "<td></td>", "<td></td>", "</tr>"]), &contents)
            .unwrap();
        assert!(html.contains("<td>Hi</td><td>There</td>"));
    }

    #[test]
    fn test_shared_cell_keeps_detection_order() {
        let cells = vec![TableCell::from_rect(0.0, 0.0, 300.0, 40.0)];
        let fragments = vec![
            TextFragment::from_rect(160.0, 5.0, 290.0, 35.0, "York"),
            TextFragment::from_rect(10.0, 5.0, 150.0, 35.0, "New"),
        ];

        let (matches, contents) = CellMatcher::default().fuse(&cells, &fragments).unwrap();
        assert_eq!(matches.get(0), Some(&[0, 1][..]));
        assert_eq!(contents, vec!["York New"]);
    }

    #[test]
    fn test_fragment_spanning_two_cells_goes_to_larger_overlap() {
        let cells = grid_cells();
        // Mostly in cell 1, leaking into cell 0
        let fragments = vec![TextFragment::from_rect(80.0, 5.0, 190.0, 25.0, "spill")];
        let matches = match_cells(&cells, &fragments);
        assert_eq!(matches.cell_for(0), Some(1));
    }

    #[test]
    fn test_fragment_outside_table_goes_to_nearest_cell() {
        let cells = grid_cells();
        let fragments = vec![TextFragment::from_rect(110.0, 70.0, 190.0, 90.0, "below")];
        let matches = match_cells(&cells, &fragments);
        assert_eq!(matches.cell_for(0), Some(3));
    }

    #[test]
    fn test_empty_cells_leave_fragments_unmatched() {
        let fragments = vec![TextFragment::from_rect(0.0, 0.0, 10.0, 10.0, "x")];
        let matches = match_cells(&[], &fragments);
        assert!(matches.is_empty());
        assert_eq!(matches.fragment_count(), 0);
    }

    #[test]
    fn test_empty_fragments_leave_cells_empty() {
        let (matches, contents) = CellMatcher::default().fuse(&grid_cells(), &[]).unwrap();
        assert!(matches.is_empty());
        assert_eq!(contents, vec![""; 4]);
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

mod serialization_tests {
    use super::*;

    #[test]
    fn test_three_placeholders_two_contents() {
        let t = tokens(&["<tr>", "<td></td>", "<td></td>", "<td></td>", "</tr>"]);
        let result = TableSerializer::new().serialize(&t, &strings(&["a", "b"]));
        assert!(matches!(
            result,
            Err(Error::StructureMismatch {
                placeholders: 3,
                contents: 2
            })
        ));
    }

    #[test]
    fn test_one_cell_tag_per_placeholder() {
        let t = grid_tokens();
        let html = TableSerializer::new()
            .serialize(&t, &strings(&["a", "", "c", "d"]))
            .unwrap();
        assert_eq!(html.matches("<td>").count(), count_placeholders(&t));
        assert!(html.contains("<tr><td>a</td><td></td></tr><tr><td>c</td><td>d</td></tr>"));
    }

    #[test]
    fn test_rowspan_tokens_preserved() {
        let t = tokens(&[
            "<table>", "<tr>", "<td", " rowspan=\"2\"", ">", "</td>", "<td></td>", "</tr>", "<tr>",
            "<td></td>", "</tr>", "</table>",
        ]);
        let html = TableSerializer::new()
            .serialize(&t, &strings(&["top", "bottom"]))
            .unwrap();
        let cleaned = strip_style(&html);
        assert_eq!(
            cleaned,
            "<table><tr><td rowspan=\"2\"></td><td>top</td></tr><tr><td>bottom</td></tr></table>"
        );
    }

    #[test]
    fn test_strip_style_is_noop_on_bare_table() {
        let bare = "<table><tr><td>x</td></tr></table>";
        assert_eq!(strip_style(bare), bare);
    }
}

// =============================================================================
// GRID EXTRACTION
// =============================================================================

mod grid_tests {
    use super::*;

    #[test]
    fn test_fused_table_to_grid() {
        let cells = grid_cells();
        let fragments = vec![
            TextFragment::from_rect(5.0, 5.0, 90.0, 25.0, "Item"),
            TextFragment::from_rect(105.0, 5.0, 190.0, 25.0, "Qty"),
            TextFragment::from_rect(5.0, 35.0, 90.0, 55.0, "Apples"),
            TextFragment::from_rect(105.0, 35.0, 190.0, 55.0, "3"),
        ];
        let (_, contents) = CellMatcher::default().fuse(&cells, &fragments).unwrap();
        let html = TableSerializer::new().serialize(&grid_tokens(), &contents).unwrap();

        let grid = TableGrid::from_html(&strip_style(&html)).unwrap();
        assert_eq!(
            grid.to_rows(),
            vec![vec!["Item", "Qty"], vec!["Apples", "3"]]
        );
    }

    #[test]
    fn test_colspan_expansion() {
        let html = concat!(
            "<table><tr><td colspan=\"3\">Header</td></tr>",
            "<tr><td>a</td><td>b</td><td>c</td></tr></table>",
        );
        let grid = TableGrid::from_html(html).unwrap();
        assert_eq!(grid.num_cols(), 3);
        assert_eq!(grid.to_rows()[0], vec!["Header", "", ""]);
    }
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn boxes(max: usize) -> impl Strategy<Value = Vec<(f32, f32, f32, f32)>> {
    prop::collection::vec(
        (0.0f32..400.0, 0.0f32..400.0, 1.0f32..150.0, 1.0f32..60.0),
        0..max,
    )
}

proptest! {
    #[test]
    fn every_fragment_matched_exactly_once(cells in boxes(12), frags in boxes(20)) {
        prop_assume!(!cells.is_empty());
        let cells: Vec<TableCell> = cells
            .into_iter()
            .map(|(x, y, w, h)| TableCell::from_rect(x, y, x + w, y + h))
            .collect();
        let frags: Vec<TextFragment> = frags
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, w, h))| TextFragment::from_rect(x, y, x + w, y + h, format!("f{}", i)))
            .collect();

        let matches = match_cells(&cells, &frags);
        prop_assert_eq!(matches.fragment_count(), frags.len());
        for i in 0..frags.len() {
            let owners = matches.iter().filter(|(_, f)| f.contains(&i)).count();
            prop_assert_eq!(owners, 1);
        }
        for (cell, indices) in matches.iter() {
            prop_assert!(cell < cells.len());
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }

        // Deterministic
        prop_assert_eq!(match_cells(&cells, &frags), matches);
    }
}
