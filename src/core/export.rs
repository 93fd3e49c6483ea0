use crate::domain::document::{PuzzleDocument, RenderedPuzzle};
use crate::domain::model::Grid;
use crate::utils::error::{PuzzleError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SUPPORTED_FORMATS: [&str; 3] = ["json", "csv", "tsv"];

/// 每一列輸出成一筆記錄，空白格輸出為空字串
pub fn grid_to_delimited(grid: &Grid, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());

    for row in 0..grid.rows() {
        let record: Vec<String> = grid
            .row(row)
            .unwrap_or_default()
            .iter()
            .map(|cell| cell.map(String::from).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PuzzleError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| PuzzleError::ValidationError {
        message: format!("grid export is not valid UTF-8: {}", e),
    })
}

pub fn render(document: PuzzleDocument, pretty: bool) -> Result<RenderedPuzzle> {
    let json_output = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    let csv_output = grid_to_delimited(document.grid(), b',')?;
    let tsv_output = grid_to_delimited(document.grid(), b'\t')?;

    Ok(RenderedPuzzle {
        document,
        json_output,
        csv_output,
        tsv_output,
    })
}

/// (file name, contents) for every requested format
pub fn files_for<'a>(
    rendered: &'a RenderedPuzzle,
    stem: &str,
    formats: &[String],
) -> Vec<(String, &'a str)> {
    formats
        .iter()
        .filter_map(|format| {
            let contents = match format.as_str() {
                "json" => rendered.json_output.as_str(),
                "csv" => rendered.csv_output.as_str(),
                "tsv" => rendered.tsv_output.as_str(),
                other => {
                    tracing::warn!("Ignoring unsupported output format '{}'", other);
                    return None;
                }
            };
            Some((format!("{}.{}", stem, format), contents))
        })
        .collect()
}

pub fn zip_bundle(files: &[(String, &str)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, contents) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(contents.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
