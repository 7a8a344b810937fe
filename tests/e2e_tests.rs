// End-to-End Pipeline tests
// Full pipeline from a folder on disk to ViewModel, chart and export

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use diskpie::chart::PieChart;
use diskpie::config::Settings;
use diskpie::export::ExportDocument;
use diskpie::filter::{apply_threshold, FilterOptions, OTHER_LABEL};
use diskpie::input::Intent;
use diskpie::scanner::{NoopProgress, ScanOptions, Scanner};
use diskpie::viewmodel::{AppViewModel, Selectable, TreeViewModel, ViewMode};
use time::OffsetDateTime;

#[test]
fn test_full_scan_to_viewmodel() {
    let (_dir, root) = common::create_sample_tree();
    let report = Scanner::new(ScanOptions::default())
        .scan(&root, &NoopProgress)
        .unwrap();

    let options = FilterOptions {
        min_size: 1000,
        apply_to_subfolders: true,
    };
    let mut vm = TreeViewModel::new(Arc::new(report.root), options, 12);

    assert!(vm.is_at_root());
    let names: Vec<String> = vm.visible_children().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["media", "src", OTHER_LABEL]);

    // src holds main.rs (1200) and util (800, below the threshold)
    vm.move_down();
    vm.enter_selected();
    assert_eq!(vm.current_path(), "/src");
    let names: Vec<String> = vm.visible_children().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["main.rs", OTHER_LABEL]);

    let pie = vm.pie();
    assert_eq!(pie.total, 2000);
    assert_eq!(pie.slices.len(), 2);
}

#[test]
fn test_chart_from_scanned_level() {
    let (_dir, root) = common::create_sample_tree();
    let report = Scanner::new(ScanOptions::default())
        .scan(&root, &NoopProgress)
        .unwrap();
    let result = apply_threshold(&report.root, &FilterOptions::default());

    // "empty" has zero size and never becomes a slice
    let chart = PieChart::from_pairs(&result.pairs(), 2);
    let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["media", OTHER_LABEL]);
    assert_eq!(chart.total, 7000);
}

#[test]
fn test_export_of_scan() {
    let (_dir, root) = common::create_scenario_tree();
    let report = Scanner::new(ScanOptions::default())
        .scan(&root, &NoopProgress)
        .unwrap();
    let options = FilterOptions {
        min_size: 7 * common::MB,
        apply_to_subfolders: false,
    };
    let result = apply_threshold(&report.root, &options);
    let at = OffsetDateTime::from_unix_timestamp(0).unwrap();

    let doc = ExportDocument::new(&report.root.path, at, &options, &result, &report.skipped);
    let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();

    assert_eq!(value["total"], 16 * common::MB);
    assert_eq!(value["other"], 6 * common::MB);
    assert_eq!(value["items"][0]["label"], "A");
    assert_eq!(value["min_size"], 7 * common::MB);
}

#[test]
fn test_app_drives_scan_and_drill_down() {
    let (_dir, root) = common::create_sample_tree();
    let settings = Settings {
        scan_path: Some(root.clone()),
        start_dir: root.clone(),
        ..Settings::default()
    };
    let mut app = AppViewModel::new(settings);
    assert_eq!(app.view_mode(), ViewMode::Scanning);

    let deadline = Instant::now() + Duration::from_secs(10);
    while app.is_scanning() && Instant::now() < deadline {
        app.poll();
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(app.view_mode(), ViewMode::Chart);

    app.handle_intent(Intent::Enter);
    assert_eq!(app.tree_vm.as_ref().unwrap().current_path(), "/media");
    assert!(!app.is_at_root());

    app.handle_intent(Intent::Back);
    assert!(app.is_at_root());

    app.handle_intent(Intent::OpenPicker);
    assert_eq!(app.view_mode(), ViewMode::Picker);
    app.handle_intent(Intent::ShowChart);
    assert_eq!(app.view_mode(), ViewMode::Chart);
}
