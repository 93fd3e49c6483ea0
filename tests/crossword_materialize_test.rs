use puzzle_gen::core::clues::{annotate_layout, ClueSheet};
use puzzle_gen::{CrosswordGridMaterializer, CrosswordLayout, CrosswordOrientation, WordEntry};

fn layout_from_json(json: &str) -> CrosswordLayout {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_cat_across_on_three_by_three() {
    let layout = layout_from_json(
        r#"{"rows": 3, "cols": 3, "result": [
            {"answer": "CAT", "startx": 1, "starty": 1, "orientation": "across"}
        ]}"#,
    );
    let grid = CrosswordGridMaterializer::new().materialize(&layout);

    assert_eq!(grid.row(0), Some(&[Some('C'), Some('A'), Some('T')][..]));
    assert_eq!(grid.row_string(1, '.'), "...");
    assert_eq!(grid.row_string(2, '.'), "...");
}

#[test]
fn test_span_past_cols_is_skipped_without_panicking() {
    let layout = layout_from_json(
        r#"{"rows": 3, "cols": 3, "result": [
            {"answer": "HORSE", "startx": 1, "starty": 2, "orientation": "across"},
            {"answer": "OX", "startx": 3, "starty": 1, "orientation": "down"}
        ]}"#,
    );
    let result = CrosswordGridMaterializer::new().materialize_with_report(&layout);

    assert_eq!(result.grid.row_string(1, '.'), "..X");
    assert_eq!(result.grid.get(0, 2), Some('O'));
    assert_eq!(result.grid.get(1, 2), Some('X'));
    assert_eq!(result.rejected.len(), 1);
    assert_eq!(result.rejected[0].answer, "HORSE");
}

#[test]
fn test_extreme_start_coordinates_are_rejected() {
    let layout = layout_from_json(
        r#"{"rows": 3, "cols": 3, "result": [
            {"answer": "CAT", "startx": -9223372036854775808, "starty": 1, "orientation": "across"},
            {"answer": "DOG", "startx": 1, "starty": -9223372036854775808, "orientation": "down"},
            {"answer": "EMU", "startx": 9223372036854775807, "starty": 1, "orientation": "across"},
            {"answer": "OX", "startx": 2, "starty": 2, "orientation": "across"}
        ]}"#,
    );
    let result = CrosswordGridMaterializer::new().materialize_with_report(&layout);

    assert_eq!(result.rejected.len(), 3);
    assert_eq!(result.grid.row_string(1, '.'), ".OX");
    assert_eq!(result.grid.blank_count(), 7);
}

#[test]
fn test_oversized_layout_fails_without_allocating() {
    let materializer = CrosswordGridMaterializer::new();
    let huge = layout_from_json(&format!(
        r#"{{"rows": {}, "cols": 3, "result": [
            {{"answer": "CAT", "startx": 1, "starty": 1, "orientation": "across"}}
        ]}}"#,
        usize::MAX
    ));

    assert!(materializer.check_layout(&huge).is_err());
    let result = materializer.materialize_with_report(&huge);
    assert_eq!((result.grid.rows(), result.grid.cols()), (0, 0));
    assert_eq!(result.rejected.len(), 1);
}

#[test]
fn test_materialization_is_repeatable() {
    let layout = layout_from_json(
        r#"{"rows": 5, "cols": 5, "result": [
            {"answer": "APPLE", "startx": 1, "starty": 1, "orientation": "across", "position": 1},
            {"answer": "PEAR", "startx": 2, "starty": 1, "orientation": "down", "position": 2},
            {"answer": "KIWI", "startx": 1, "starty": 1, "orientation": "none", "position": 3}
        ]}"#,
    );
    let materializer = CrosswordGridMaterializer::new();
    let grids: Vec<_> = (0..5).map(|_| materializer.materialize(&layout)).collect();

    assert!(grids.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(grids[0].row_string(0, '.'), "APPLE");
    assert_eq!(grids[0].row_string(3, '.'), ".R...");
}

#[test]
fn test_clue_sheet_from_solver_output() {
    let layout = layout_from_json(
        r#"{"rows": 5, "cols": 5, "result": [
            {"answer": "PEAR", "startx": 2, "starty": 1, "orientation": "down", "position": 2, "clue": "Pear clue"},
            {"answer": "APPLE", "startx": 1, "starty": 1, "orientation": "across", "position": 1},
            {"answer": "KIWI", "startx": 1, "starty": 1, "orientation": "none", "position": 3}
        ]}"#,
    );
    let words = vec![
        WordEntry::new("Apple", "Red fruit"),
        WordEntry::new("Kiwi", "Fuzzy fruit"),
    ];

    let annotated = annotate_layout(&layout, &words);
    assert_eq!(annotated[0].clue, "Pear clue");
    assert_eq!(annotated[1].word, "Apple");
    assert_eq!(annotated[2].orientation, CrosswordOrientation::None);

    let sheet = ClueSheet::for_crossword(&annotated);
    assert_eq!(sheet.across.len(), 1);
    assert_eq!(sheet.across[0].clue, "Red fruit");
    assert_eq!(sheet.down[0].number, 2);
}
