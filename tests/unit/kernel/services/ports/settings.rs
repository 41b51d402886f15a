use super::*;

#[test]
fn defaults_are_sane() {
    let settings = Settings::default();
    assert!(settings.layout.sidebar_min_width <= settings.layout.sidebar_width);
    assert!(settings.layout.sidebar_width <= settings.layout.sidebar_max_width);
    assert!(settings.backend.seed_demo_project);
    assert_eq!(settings.notifications.ttl_ms, 4000);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let settings: Settings =
        serde_json::from_str(r#"{ "layout": { "sidebar_width": 320 }, "backend": { "latency_ms": 0 } }"#)
            .unwrap();
    assert_eq!(settings.layout.sidebar_width, 320);
    assert_eq!(settings.layout.sidebar_max_width, 600);
    assert_eq!(settings.backend.latency_ms, 0);
    assert!(settings.backend.seed_demo_project);
    assert_eq!(settings.notifications, NotificationSettings::default());
}

#[test]
fn empty_object_is_default() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn normalized_swaps_inverted_bounds() {
    let layout = LayoutSettings {
        bottom_panel_min_height: 500,
        bottom_panel_max_height: 100,
        ..LayoutSettings::default()
    }
    .normalized();
    assert_eq!(layout.bottom_panel_min_height, 100);
    assert_eq!(layout.bottom_panel_max_height, 500);
}
