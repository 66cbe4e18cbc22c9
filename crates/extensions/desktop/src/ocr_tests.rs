use super::*;
use screenshots::image::{Rgba, RgbaImage};

const HEADER: &str =
    "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

fn tsv(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out
}

#[test]
fn test_parse_tsv_words_in_order() {
    let output = tsv(&[
        "1\t1\t0\t0\t0\t0\t0\t0\t1920\t1080\t-1\t",
        "4\t1\t1\t1\t1\t0\t470\t385\t120\t24\t-1\t",
        "5\t1\t1\t1\t1\t1\t480\t390\t40\t20\t95.5\tLogin",
        "5\t1\t1\t1\t1\t2\t530\t390\t60\t20\t91.0\tSign up",
    ]);

    let fragments = parse_tsv(&output).unwrap();
    assert_eq!(
        fragments,
        vec![
            OcrFragment::new("Login", 480, 390, 40, 20),
            OcrFragment::new("Sign up", 530, 390, 60, 20),
        ]
    );
}

#[test]
fn test_parse_tsv_keeps_blank_word_rows() {
    let output = tsv(&["5\t1\t1\t1\t1\t1\t10\t20\t5\t5\t-1\t "]);
    let fragments = parse_tsv(&output).unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text, " ");
}

#[test]
fn test_parse_tsv_missing_text_column() {
    let output = tsv(&["5\t1\t1\t1\t1\t1\t10\t20\t5\t5\t-1"]);
    let fragments = parse_tsv(&output).unwrap();
    assert_eq!(fragments, vec![OcrFragment::new("", 10, 20, 5, 5)]);
}

#[test]
fn test_parse_tsv_skips_bad_geometry() {
    let output = tsv(&[
        "5\t1\t1\t1\t1\t1\t-3\t20\t5\t5\t80\tedge",
        "5\t1\t1\t1\t1\t2\t10\t20\t5\t5\t80\tok",
        "garbage",
    ]);
    let fragments = parse_tsv(&output).unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text, "ok");
}

#[test]
fn test_parse_tsv_header_only() {
    assert!(parse_tsv(HEADER).unwrap().is_empty());
}

#[test]
fn test_parse_tsv_rejects_unexpected_output() {
    assert!(matches!(parse_tsv(""), Err(OcrError::MalformedOutput(_))));
    assert!(matches!(
        parse_tsv("Error opening data file"),
        Err(OcrError::MalformedOutput(_))
    ));
}

#[test]
fn test_grayscale_conversion() {
    let mut frame = RgbaImage::new(2, 2);
    frame.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    let png = crate::screenshot::encode_png(&frame).unwrap().png;

    let gray = to_grayscale_png(&png).unwrap();
    let decoded = image::load_from_memory(&gray).unwrap();
    assert!(!decoded.color().has_color());
}

#[test]
fn test_grayscale_rejects_invalid_png() {
    assert!(matches!(
        to_grayscale_png(b"not a png"),
        Err(OcrError::InvalidImage(_))
    ));
}

#[test]
fn test_missing_binary_is_engine_not_available() {
    let ocr = TesseractOcr::new(&PerceptionConfig {
        tesseract_cmd: "/nonexistent/voxnav-tesseract".to_string(),
        grayscale: false,
        ..Default::default()
    });
    let screenshot = Screenshot::new(vec![0u8; 4], 1, 1);

    let result = ocr.recognize(&screenshot);
    assert!(matches!(result, Err(OcrError::EngineNotAvailable(_))));
}

#[test]
fn test_input_paths_are_unique() {
    assert_ne!(TesseractOcr::input_path(), TesseractOcr::input_path());
}
