use rust_cef::{
    enums::log_severity::LogSeverity,
    structs::{browser_settings::BrowserSettings, main_args::MainArgs, window_info::WindowInfo},
    testing::{LOAD_DURATION, NativeOutcome, PageScript, SimRuntime, SimValue},
};

use super::*;
use crate::{cef_app::get_settings, config::read_config_from, driver::AppDriver};

const URL: &str = "http://127.0.0.1:8000/index.html";

fn run(sim: &SimRuntime, bridge: &JavascriptBridge) {
    let config = read_config_from(|_| None).unwrap();
    let mut driver = AppDriver::new();
    driver
        .initialize(
            &MainArgs::new(["javascript"]),
            &get_settings(&config, LogSeverity::Debug, true),
            Some(app()),
        )
        .unwrap();
    driver
        .run_browser(
            &WindowInfo::windowless("javascript"),
            bridge.client(),
            URL,
            &BrowserSettings::default(),
        )
        .unwrap();
    assert!(sim.open_browsers().is_empty());
}

fn exception(message: &str) -> NativeOutcome {
    NativeOutcome::Exception(message.to_string())
}

#[test]
fn bar_runs_after_load_and_the_browser_closes_later() {
    let sim = SimRuntime::install();
    let bridge = JavascriptBridge::new();

    run(&sim, &bridge);
    let record = sim.record();

    assert!(record.has_switch("single-process"));
    assert_eq!(record.extensions, [EXTENSION_NAME]);
    assert_eq!(sim.extension_code(EXTENSION_NAME).as_deref(), Some(EXTENSION_CODE));

    let bar_at = LOAD_DURATION + SCRIPT_DELAY;
    assert_eq!(record.scripts.len(), 1);
    assert_eq!(record.scripts[0].code, BAR_CALL);
    assert_eq!(record.scripts[0].at, bar_at);

    assert_eq!(record.closes.len(), 1);
    assert_eq!(record.closes[0].at, bar_at + SCRIPT_DELAY);
    assert_eq!(record.reentrant_closes().count(), 0);
    assert!(bridge.bar_called());
    assert!(bridge.take_errors().is_empty());
}

#[test]
fn foo_accepts_one_string_starting_with_x() {
    let sim = SimRuntime::install();
    run(&sim, &JavascriptBridge::new());

    assert_eq!(
        sim.invoke_native("Foo", vec!["x from script.js".into()]),
        NativeOutcome::Returned(SimValue::String("foo".to_string()))
    );
    assert_eq!(
        sim.invoke_native("Foo", vec![1.into()]),
        exception("Foo() arg should be string.")
    );
    assert_eq!(
        sim.invoke_native("Foo", vec!["y".into()]),
        exception(r#"Foo() arg should start with "x"."#)
    );
    assert_eq!(
        sim.invoke_native("Foo", vec![]),
        exception("Foo() arg should be one.")
    );
    assert_eq!(
        sim.invoke_native("Foo", vec!["x".into(), "x".into()]),
        exception("Foo() arg should be one.")
    );
}

#[test]
fn a_null_argument_is_not_a_string() {
    let sim = SimRuntime::install();
    run(&sim, &JavascriptBridge::new());

    assert_eq!(
        sim.invoke_native_nullable("Foo", vec![None]),
        exception("Foo() arg should be string.")
    );
    assert!(matches!(
        FooHandler.execute("Foo", None, &[None]),
        V8Return::Exception(message) if message == "Foo() arg should be string."
    ));
}

#[test]
fn unknown_functions_throw() {
    let outcome = FooHandler.execute("Bar", None, &[]);
    assert!(matches!(outcome, V8Return::Exception(message) if message == "Unknown function called."));
}

#[test]
fn load_errors_close_without_calling_bar() {
    let sim = SimRuntime::install();
    sim.script_page(
        URL,
        PageScript::Fail {
            error_code: -102,
            error_text: "ERR_CONNECTION_REFUSED".to_string(),
        },
    );
    let bridge = JavascriptBridge::new();

    run(&sim, &bridge);
    let record = sim.record();

    assert!(record.scripts.is_empty());
    assert!(!bridge.bar_called());
    assert_eq!(record.closes.len(), 1);
    assert_eq!(record.reentrant_closes().count(), 0);
    let errors = bridge.take_errors();
    assert!(matches!(
        errors.as_slice(),
        [BridgeError::LoadFailed(LoadFailure { error_code: -102, .. })]
    ));
}

#[test]
fn sub_frame_load_errors_leave_the_flow_alone() {
    let sim = SimRuntime::install();
    sim.script_page(
        URL,
        PageScript::SubFrameFail {
            error_code: -3,
            error_text: "ERR_ABORTED".to_string(),
            paint_after: None,
        },
    );
    let bridge = JavascriptBridge::new();

    run(&sim, &bridge);
    let record = sim.record();

    assert!(bridge.take_errors().is_empty());
    assert!(bridge.bar_called());
    let bar_at = LOAD_DURATION + SCRIPT_DELAY;
    assert_eq!(record.scripts.len(), 1);
    assert_eq!(record.scripts[0].at, bar_at);
    assert_eq!(record.closes.len(), 1);
    assert_eq!(record.closes[0].at, bar_at + SCRIPT_DELAY);
}

#[test]
fn calling_bar_without_a_browser_is_reported() {
    let sim = SimRuntime::install();
    let bridge = JavascriptBridge::new();

    bridge.execute_bar();
    sim.run_until_idle();

    let errors = bridge.take_errors();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|err| matches!(err, BridgeError::Browser(BrowserError::NotSaved))));
    assert_eq!(sim.record().quit_calls, 1);
}
