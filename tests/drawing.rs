use std::collections::BTreeMap;

use assembly_bom::ToolError;
use assembly_bom::drawing::{
    A4_LANDSCAPE_HEIGHT, A4_LANDSCAPE_WIDTH, DocumentInfo, PageScale, estimate_scale,
    fill_title_block, iso_view_position,
};

#[test]
fn small_models_are_enlarged() {
    // Page diagonal of A4 landscape is about 363.6 mm.
    let scale = estimate_scale(9.0, A4_LANDSCAPE_WIDTH, A4_LANDSCAPE_HEIGHT).expect("scale");
    assert_eq!(scale, PageScale::Enlarge(3));
    assert_eq!(scale.to_string(), "3");
}

#[test]
fn large_models_are_reduced() {
    let scale = estimate_scale(727.0, A4_LANDSCAPE_WIDTH, A4_LANDSCAPE_HEIGHT).expect("scale");
    assert_eq!(scale, PageScale::Reduce(10));
    assert_eq!(scale.to_string(), "1/10");
}

#[test]
fn scale_rejects_degenerate_lengths() {
    for diagonal in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            estimate_scale(diagonal, A4_LANDSCAPE_WIDTH, A4_LANDSCAPE_HEIGHT),
            Err(ToolError::InvalidDrawing(_))
        ));
    }
}

#[test]
fn iso_view_sits_near_the_top_left_corner() {
    assert_eq!(iso_view_position(40.0, 210.0), (30.0, 170.0));
}

#[test]
fn title_block_fills_known_fields_and_keeps_defaults() {
    let editable: BTreeMap<String, String> = [
        ("Designed_by_Name", "Designed by Name"),
        ("FC-Date", "Date"),
        ("FC-SC", "Scale"),
        ("FC-SH", "Sheet"),
        ("FC-Title", "Title"),
        ("Subtitle", "Subtitle"),
        ("Weight", "Weight"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();
    let document = DocumentInfo {
        title: "Gearbox".to_string(),
        file_name: "/work/gearbox.FCStd".to_string(),
        author: "R. Engineer".to_string(),
    };

    let filled = fill_title_block(&editable, &document, PageScale::Reduce(2), "2024-05-01");

    assert_eq!(filled.len(), editable.len());
    assert_eq!(filled["Designed_by_Name"], "R. Engineer");
    assert_eq!(filled["FC-SC"], "1/2");
    assert_eq!(filled["FC-SH"], "1 of 1");
    assert_eq!(filled["FC-Title"], "Gearbox");
    assert_eq!(filled["Subtitle"], "/work/gearbox.FCStd");
    assert_eq!(filled["Weight"], "Weight");
    assert_eq!(filled["FC-Date"], "Date");
}
