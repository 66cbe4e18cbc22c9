//! OCR through the tesseract command-line tool.

use std::io::{Cursor, ErrorKind};
use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use screenshots::image::{self, ImageOutputFormat};
use tracing::debug;
use voxnav_config::{ConfigLoader, PerceptionConfig};
use voxnav_protocols::{OcrEngine, OcrError, OcrFragment, Screenshot};

/// TSV `level` of word rows.
const WORD_LEVEL: &str = "5";
const TSV_COLUMNS: usize = 12;

static NEXT_INPUT_ID: AtomicU64 = AtomicU64::new(0);

/// [`OcrEngine`] that shells out to `tesseract <png> stdout ... tsv`.
pub struct TesseractOcr {
    command: String,
    language: String,
    grayscale: bool,
}

impl TesseractOcr {
    pub fn new(config: &PerceptionConfig) -> Self {
        Self {
            command: ConfigLoader::expand_path(&config.tesseract_cmd),
            language: config.ocr_language.clone(),
            grayscale: config.grayscale,
        }
    }

    fn input_path() -> PathBuf {
        let id = NEXT_INPUT_ID.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("voxnav_ocr_{}_{}.png", std::process::id(), id))
    }

    fn run(&self, png: &[u8]) -> Result<String, OcrError> {
        let input = Self::input_path();
        std::fs::write(&input, png).map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let output = Command::new(&self.command)
            .arg(&input)
            .arg("stdout")
            .args(["-l", &self.language, "--psm", "3", "tsv"])
            .output();

        let _ = std::fs::remove_file(&input);

        let output = output.map_err(|e| match e.kind() {
            ErrorKind::NotFound => OcrError::EngineNotAvailable(format!(
                "'{}' was not found. Install tesseract-ocr or set perception.tesseract_cmd",
                self.command
            )),
            _ => OcrError::RecognitionFailed(e.to_string()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::RecognitionFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrEngine for TesseractOcr {
    fn id(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, screenshot: &Screenshot) -> Result<Vec<OcrFragment>, OcrError> {
        let grayscale;
        let png = if self.grayscale {
            grayscale = to_grayscale_png(&screenshot.png)?;
            &grayscale
        } else {
            &screenshot.png
        };

        let tsv = self.run(png)?;
        let fragments = parse_tsv(&tsv)?;
        debug!(words = fragments.len(), "Tesseract finished");
        Ok(fragments)
    }
}

pub(crate) fn to_grayscale_png(png: &[u8]) -> Result<Vec<u8>, OcrError> {
    let decoded =
        image::load_from_memory(png).map_err(|e| OcrError::InvalidImage(e.to_string()))?;

    let mut buffer = Cursor::new(Vec::new());
    decoded
        .grayscale()
        .write_to(&mut buffer, ImageOutputFormat::Png)
        .map_err(|e| OcrError::InvalidImage(e.to_string()))?;
    Ok(buffer.into_inner())
}

/// Parse tesseract TSV output into word fragments in scan order.
///
/// Rows that are not words, or whose geometry does not parse, are skipped.
pub(crate) fn parse_tsv(tsv: &str) -> Result<Vec<OcrFragment>, OcrError> {
    let mut lines = tsv.lines();
    let header = lines
        .next()
        .ok_or_else(|| OcrError::MalformedOutput("empty output".to_string()))?;
    if !header.starts_with("level") {
        return Err(OcrError::MalformedOutput(format!(
            "unexpected header: {}",
            header
        )));
    }

    let fragments = lines
        .filter_map(|line| {
            let cols: Vec<&str> = line.splitn(TSV_COLUMNS, '\t').collect();
            if cols.len() < TSV_COLUMNS - 1 || cols[0] != WORD_LEVEL {
                return None;
            }
            let num = |i: usize| cols[i].trim().parse::<u32>().ok();
            Some(OcrFragment::new(
                cols.get(11).copied().unwrap_or_default(),
                num(6)?,
                num(7)?,
                num(8)?,
                num(9)?,
            ))
        })
        .collect();

    Ok(fragments)
}

#[cfg(test)]
#[path = "ocr_tests.rs"]
mod tests;
