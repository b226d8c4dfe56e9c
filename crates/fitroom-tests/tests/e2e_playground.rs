//! End-to-end playground tests.
//!
//! These tests load several assets that share shape-key names and drive the
//! whole flow: grouping, panels, slider writes, export and import.

use fitroom_core::{
    config_fingerprint, Category, ErrorCode, GroupedShapeKey, Playground, PlaygroundConfig,
};
use fitroom_tests::{
    all_influences, body_asset, influences, jacket_asset, sample_playground, skirt_asset,
    SceneFixture,
};
use pretty_assertions::assert_eq;

/// Replaces the timestamp so two exports can be compared.
fn fixed_time(mut config: PlaygroundConfig) -> PlaygroundConfig {
    config.timestamp = Some("2025-01-01T00:00:00.000Z".to_string());
    config
}

fn labels(playground: &Playground) -> Vec<String> {
    playground
        .grouped_shape_keys()
        .iter()
        .map(|g| g.label().to_string())
        .collect()
}

// ============================================================================
// Grouping and panels
// ============================================================================

#[test]
fn sliders_span_every_asset() {
    let playground = sample_playground();

    assert_eq!(
        labels(&playground),
        vec!["bicep", "height", "hemShape", "neck", "shoulderSpace", "waist"]
    );

    let bicep = playground.find_group("bicepDown").unwrap();
    assert!(bicep.is_combined());
    assert_eq!(bicep.entry_count(), 3);
    assert_eq!(bicep.range(), (-1.0, 1.0));

    let height = playground.find_group("height").unwrap();
    assert!(matches!(height, GroupedShapeKey::Single { entries, .. } if entries.len() == 2));
    assert_eq!(height.range(), (0.0, 1.0));
}

#[test]
fn panels_follow_keywords() {
    let panels = sample_playground().categorized_shape_keys();
    let names = |category: Category| -> Vec<String> {
        panels
            .get(category)
            .iter()
            .map(|g| g.label().to_string())
            .collect()
    };

    assert_eq!(names(Category::General), vec!["height"]);
    assert_eq!(names(Category::Detailed), vec!["bicep", "neck", "waist"]);
    assert_eq!(names(Category::Advanced), vec!["hemShape", "shoulderSpace"]);
    assert_eq!(panels.len(), 6);
}

#[test]
fn load_order_does_not_change_sliders() {
    let mut reversed = Playground::new();
    for asset in [jacket_asset(), skirt_asset(), body_asset()] {
        reversed.load_asset(asset).unwrap();
    }
    assert_eq!(labels(&reversed), labels(&sample_playground()));
}

#[test]
fn sliders_refresh_as_assets_arrive() {
    let mut playground = Playground::new();
    playground.load_asset(jacket_asset()).unwrap();
    // Only the up half of the bicep pair exists so far.
    assert_eq!(labels(&playground), vec!["bicepUp", "shoulderSpace"]);

    playground.load_asset(body_asset()).unwrap();
    assert!(playground.find_group("bicepUp").unwrap().is_combined());
}

// ============================================================================
// Value application
// ============================================================================

#[test]
fn combined_slider_drives_every_mesh() {
    let mut playground = sample_playground();

    playground.apply_slider("bicep", 0.5);
    assert_eq!(influences(&playground, "torso")[3..].to_vec(), vec![0.5, 0.0]);
    assert_eq!(influences(&playground, "sleeve")[0], 0.5);

    playground.apply_slider("bicep", -0.5);
    assert_eq!(influences(&playground, "torso")[3..].to_vec(), vec![0.0, 0.5]);
    assert_eq!(influences(&playground, "sleeve")[0], 0.0);

    playground.apply_slider("bicep", 0.0);
    assert_eq!(influences(&playground, "torso")[3..].to_vec(), vec![0.0, 0.0]);
}

#[test]
fn single_slider_writes_all_entries() {
    let mut playground = sample_playground();
    playground.apply_single("height", 0.8);
    assert_eq!(influences(&playground, "head")[1], 0.8);
    assert_eq!(influences(&playground, "torso")[0], 0.8);
}

#[test]
fn reset_clears_everything() {
    let mut playground = sample_playground();
    playground.apply_single("hemShape", 1.0);
    playground.apply_slider("waist", -1.0);
    playground.reset_all();
    assert!(all_influences(&playground)
        .iter()
        .flatten()
        .all(|v| *v == 0.0));
    assert_eq!(labels(&playground).len(), 6);
}

// ============================================================================
// Export and import
// ============================================================================

#[test]
fn export_import_round_trip() {
    let mut source = sample_playground();
    source.apply_slider("waist", 0.3);
    source.apply_slider("bicep", -0.6);
    source.apply_single("shoulderSpace", 0.9);
    source.set_visible("jacket", true);
    source.set_visible("skirt", false);

    let json = source.export_config().to_json_pretty().unwrap();

    let mut target = sample_playground();
    let summary = target.import_str(&json).unwrap();
    assert!(summary.ignored.is_empty());
    assert_eq!(summary.models, 3);
    assert_eq!(all_influences(&target), all_influences(&source));
    assert!(target.is_visible("jacket", false));
    assert!(!target.is_visible("skirt", true));

    assert_eq!(
        fixed_time(target.export_config()),
        fixed_time(source.export_config())
    );
}

#[test]
fn fingerprint_tracks_avatar_state_only() {
    let mut playground = sample_playground();
    playground.apply_slider("waist", 0.3);

    let first = config_fingerprint(&playground.export_config()).unwrap();
    let again = config_fingerprint(&fixed_time(playground.export_config())).unwrap();
    assert_eq!(first, again);

    playground.apply_slider("waist", 0.31);
    let moved = config_fingerprint(&playground.export_config()).unwrap();
    assert_ne!(first, moved);
}

#[test]
fn import_from_other_scene_ignores_unknown_names() {
    let mut full = sample_playground();
    full.apply_single("hemShape", 0.7);
    full.apply_single("neck", 0.2);
    let json = full.export_config().to_json().unwrap();

    let mut body_only = Playground::new();
    body_only.load_asset(body_asset()).unwrap();
    let summary = body_only.import_str(&json).unwrap();

    assert_eq!(
        summary.ignored,
        vec!["hemShape".to_string(), "shoulderSpace".to_string()]
    );
    assert_eq!(body_only.current_value("neck"), Some(0.2));
}

#[test]
fn rejected_imports_are_atomic() {
    let mut playground = sample_playground();
    playground.apply_slider("waist", 0.4);
    playground.set_visible("jacket", true);
    let before = all_influences(&playground);
    let visibility = playground.visibility().clone();

    let cases = [
        ("[1, 2]", ErrorCode::ExpectedObject),
        ("{", ErrorCode::MalformedJson),
        (r#"{ "modelInfo": [] }"#, ErrorCode::MissingField),
        (
            r#"{ "shapeKeys": { "waistUp": 0.0 }, "timestamp": "yesterday" }"#,
            ErrorCode::InvalidDatetime,
        ),
        (
            r#"{ "shapeKeys": { "waistUp": 0.0 }, "modelInfo": [{ "name": "jacket" }] }"#,
            ErrorCode::MissingField,
        ),
        (
            r#"{ "shapeKeys": { "waistUp": true } }"#,
            ErrorCode::InvalidType,
        ),
    ];

    for (doc, code) in cases {
        let issues = playground.import_str(doc).unwrap_err();
        assert!(
            issues.iter().any(|i| i.code == code),
            "expected {} for {}, got {:?}",
            code,
            doc,
            issues
        );
    }

    assert_eq!(all_influences(&playground), before);
    assert_eq!(playground.visibility(), &visibility);
}

#[tokio::test]
async fn import_file_applies_saved_config() {
    let fixture = SceneFixture::new();
    let mut source = sample_playground();
    source.apply_slider("bicep", 0.25);
    let path = fixture.write("saved.json", &source.export_config().to_json().unwrap());

    let mut target = sample_playground();
    target.import_file(&path).await.unwrap();
    assert_eq!(all_influences(&target), all_influences(&source));
}
