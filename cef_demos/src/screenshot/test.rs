use rust_cef::{
    enums::log_severity::LogSeverity,
    structs::{browser_settings::BrowserSettings, main_args::MainArgs, window_info::WindowInfo},
    testing::{LOAD_DURATION, PageScript, SimRecord, SimRuntime},
};
use tempfile::TempDir;

use super::*;
use crate::{cef_app::get_settings, config::read_config_from, driver::AppDriver};

const URL: &str = "https://example.test/";

fn run(screenshot: &Screenshot) -> SimRecord {
    let sim = SimRuntime::install();
    run_in(&sim, screenshot);
    sim.record()
}

fn run_in(sim: &SimRuntime, screenshot: &Screenshot) {
    let config = read_config_from(|_| None).unwrap();
    let mut driver = AppDriver::new();
    driver
        .initialize(
            &MainArgs::new(["screenshot"]),
            &get_settings(&config, LogSeverity::Warning, true),
            None,
        )
        .unwrap();
    driver
        .run_browser(
            &WindowInfo::windowless("screenshot"),
            screenshot.client(),
            URL,
            &BrowserSettings::default(),
        )
        .unwrap();
    assert!(sim.open_browsers().is_empty());
}

fn delays(record: &SimRecord) -> Vec<u128> {
    record
        .posted
        .iter()
        .map(|posted| posted.delay.as_millis())
        .collect()
}

#[test]
fn saves_the_painted_view() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screenshot.png");
    let screenshot = Screenshot::new(&path);

    let record = run(&screenshot);

    assert_eq!(screenshot.take_outcome().unwrap().unwrap(), path);
    assert_eq!(screenshot.retry_state(), RetryState::Succeeded);

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (800, 600));
    assert_eq!(image.get_pixel(0, 0).0, [3, 2, 1, 255]);
    assert_eq!(image.get_pixel(799, 599).0, [3, 2, 1, 255]);

    assert_eq!(delays(&record), [200, 0]);
    assert_eq!(record.settings.as_ref().unwrap().log_severity, LogSeverity::Warning as u32);
    assert!(record.settings.as_ref().unwrap().windowless_rendering_enabled);
    assert_eq!(record.closes.len(), 1);
    assert_eq!(record.reentrant_closes().count(), 0);
    assert_eq!(record.quit_calls, 1);
    assert_eq!(record.shutdown_calls, 1);
}

#[test]
fn gives_up_after_the_last_retry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screenshot.png");
    let screenshot = Screenshot::new(&path);

    let sim = SimRuntime::install();
    sim.set_default_page(PageScript::Load { paint_after: None });
    run_in(&sim, &screenshot);
    let record = sim.record();

    assert!(matches!(
        screenshot.take_outcome(),
        Some(Err(ScreenshotError::Timeout))
    ));
    assert_eq!(screenshot.retry_state(), RetryState::Failed);
    assert!(!path.exists());

    assert_eq!(delays(&record), [200, 500, 500, 500, 500, 0]);
    let last_attempt = LOAD_DURATION + FIRST_ATTEMPT_DELAY + RETRY_DELAY * MAX_RETRY;
    assert_eq!(record.closes[0].at, last_attempt);
    assert_eq!(record.reentrant_closes().count(), 0);
}

#[test]
fn a_late_paint_is_picked_up_by_a_retry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screenshot.png");
    let screenshot = Screenshot::new(&path);

    let sim = SimRuntime::install();
    sim.set_default_page(PageScript::Load {
        paint_after: Some(Duration::from_millis(1000)),
    });
    run_in(&sim, &screenshot);
    let record = sim.record();

    assert_eq!(screenshot.take_outcome().unwrap().unwrap(), path);
    assert!(path.is_file());
    assert_eq!(delays(&record), [200, 500, 500, 0]);
}

#[test]
fn main_frame_load_errors_exit_without_an_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screenshot.png");
    let screenshot = Screenshot::new(&path);

    let sim = SimRuntime::install();
    sim.script_page(
        URL,
        PageScript::Fail {
            error_code: -105,
            error_text: "ERR_NAME_NOT_RESOLVED".to_string(),
        },
    );
    run_in(&sim, &screenshot);
    let record = sim.record();

    match screenshot.take_outcome() {
        Some(Err(ScreenshotError::LoadFailed(failure))) => {
            assert_eq!(failure.url, URL);
            assert_eq!(failure.error_code, -105);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(!path.exists());
    assert_eq!(delays(&record), [0]);
    assert_eq!(record.reentrant_closes().count(), 0);
}

#[test]
fn sub_frame_load_errors_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("screenshot.png");
    let screenshot = Screenshot::new(&path);

    let sim = SimRuntime::install();
    sim.script_page(
        URL,
        PageScript::SubFrameFail {
            error_code: -3,
            error_text: "ERR_ABORTED".to_string(),
            paint_after: Some(Duration::from_millis(50)),
        },
    );
    run_in(&sim, &screenshot);
    let record = sim.record();

    assert_eq!(screenshot.take_outcome().unwrap().unwrap(), path);
    assert!(path.is_file());
    // only the screenshot and the exit after it, no early exit_app.
    assert_eq!(delays(&record), [200, 0]);
    assert_eq!(record.closes.len(), 1);
    assert_eq!(record.closes[0].at, LOAD_DURATION + FIRST_ATTEMPT_DELAY);
}

#[test]
fn exit_without_a_saved_browser_is_reported() {
    let sim = SimRuntime::install();
    let screenshot = Screenshot::new("unused.png");

    screenshot.exit_app();

    assert!(matches!(
        screenshot.take_outcome(),
        Some(Err(ScreenshotError::Browser(BrowserError::NotSaved)))
    ));
    assert_eq!(sim.record().quit_calls, 1);
}
