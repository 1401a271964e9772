//! Log lines emitted by the controller, captured per test thread.

use std::rc::Rc;

use tracing::Level;
use veil_core::registry;
use veil_core::{BatchDriver, ViewRule, Visibility, apply_single, revoke_single};
use veil_harness::{CaptureConfig, HierarchyMatcher, TestScreen, TestView, with_captured_logs};

const SCREEN: &str = "com.example.MainActivity";

fn rule(view_class: &str) -> ViewRule {
    ViewRule::new(SCREEN, view_class, Visibility::Gone).with_depth(1)
}

fn screen(classes: &[&str]) -> (TestScreen, Vec<Rc<TestView>>) {
    let root = TestView::builder("android.widget.FrameLayout").build();
    let views: Vec<Rc<TestView>> = classes
        .iter()
        .map(|class| TestView::builder(*class).layout(100, 40).build())
        .collect();
    for view in &views {
        root.push_child(Rc::clone(view));
    }
    (TestScreen::new(SCREEN, root), views)
}

#[test]
fn batch_logs_success_and_failure_per_rule() {
    registry::clear();
    let (screen, _views) = screen(&["AdView", "BannerView"]);
    let driver = BatchDriver::new(HierarchyMatcher::new());
    let rules = [rule("AdView"), rule("PromoView"), rule("BannerView")];

    let (report, logs) = with_captured_logs(CaptureConfig::default(), || {
        driver.apply_batch(&screen, &rules)
    });

    assert_eq!(report.applied(), 2);
    assert_eq!(logs.messages(Level::INFO).iter().filter(|m| m.starts_with("[Success]")).count(), 2);
    assert!(logs.contains(Level::WARN, "[Failed] com.example.MainActivity#PromoView block failed"));
    assert_eq!(logs.count("[Apply rule]"), 3);
    assert_eq!(logs.count("[ApplyRuleBatch info start"), 1);
    assert_eq!(logs.count("[ApplyRuleBatch info end"), 1);
}

#[test]
fn reapply_logs_skip() {
    registry::clear();
    let (screen, _views) = screen(&["AdView"]);
    let driver = BatchDriver::new(HierarchyMatcher::new());
    let rules = [rule("AdView")];
    driver.apply_batch(&screen, &rules);

    let (_, logs) = with_captured_logs(CaptureConfig::default(), || {
        driver.apply_batch(&screen, &rules)
    });
    assert!(logs.contains(Level::INFO, "[Skipped]"));
    assert_eq!(logs.count("[Success]"), 0);
}

#[test]
fn cache_miss_on_revoke_warns() {
    registry::clear();
    let (_screen, views) = screen(&["AdView"]);
    let view = views[0].as_view();
    let r = rule("AdView");
    assert!(apply_single(&view, &r));
    registry::clear();

    let (_, logs) = with_captured_logs(CaptureConfig::default().max_level(Level::WARN), || {
        revoke_single(&view, &r)
    });
    assert!(logs.contains(Level::WARN, "view cache missing"));
    assert_eq!(logs.events().len(), 1);
}

#[test]
fn apply_records_fingerprint_field() {
    registry::clear();
    let (_screen, views) = screen(&["AdView"]);
    let view = views[0].as_view();
    let r = rule("AdView");

    let (_, logs) = with_captured_logs(CaptureConfig::default(), || apply_single(&view, &r));
    let event = logs
        .events()
        .into_iter()
        .find(|e| e.message == "apply rule add view cache")
        .expect("apply logs its cache write");
    assert_eq!(event.field("rule"), Some(r.fingerprint().to_string().as_str()));
    assert_eq!(event.level, Level::DEBUG);
}

#[test]
fn revoke_without_cache_logs_matcher_fallback() {
    registry::clear();
    let (screen, _views) = screen(&["AdView"]);
    let driver = BatchDriver::new(HierarchyMatcher::new());

    let (_, logs) = with_captured_logs(CaptureConfig::default(), || {
        driver.revoke_batch(&screen, &[rule("AdView")])
    });
    assert!(logs.contains(Level::WARN, "view cache not found"));
    assert!(logs.contains(Level::INFO, "###revoke rule success"));
}
