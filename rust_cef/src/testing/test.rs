use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;

use super::*;
use crate::{
    CefError,
    c_to_rust::{
        command_line::{CommandLine, ProcessType},
        frame::Frame,
    },
    enums::{paint_element_type::PaintElementType, thread_id::ThreadId},
    functions::{
        create_browser::browser_host_create_browser,
        execute_process::execute_process,
        initialize::initialize,
        message_loop::{quit_message_loop, run_message_loop, shutdown},
        post_task::{RuntimeTaskPoster, TaskPoster, currently_on, post_delayed_task, post_task},
        register_extension::register_extension,
        try_start_subprocess::try_start_subprocess,
        version::version_info,
    },
    rust_to_c::{
        app::{App, AppConfig},
        client::{Client, ClientConfig},
        life_span_handler::{LifeSpanHandler, LifeSpanHandlerConfig},
        load_handler::{LoadHandler, LoadHandlerConfig},
        render_handler::{RenderHandler, RenderHandlerConfig},
        render_process_handler::{RenderProcessHandler, RenderProcessHandlerConfig},
        task::Task,
        v8handler::{V8Handler, V8HandlerConfig, V8Return},
    },
    structs::{
        browser_settings::BrowserSettings, geometry::Rect, main_args::MainArgs,
        settings::Settings, window_info::WindowInfo,
    },
    util::cef_arc::CefArcFromRust,
};

type Log = Arc<Mutex<Vec<String>>>;

struct Events {
    log: Log,
    close_on_load_end: bool,
}

impl LoadHandlerConfig for Events {
    fn on_loading_state_change(
        &self,
        _browser: CefArc<Browser>,
        is_loading: bool,
        _can_go_back: bool,
        _can_go_forward: bool,
    ) {
        self.log.lock().push(format!("loading {is_loading}"));
    }

    fn on_load_start(&self, _browser: CefArc<Browser>, frame: CefArc<Frame>, _transition_type: u32) {
        self.log.lock().push(format!("start main={}", frame.is_main()));
    }

    fn on_load_end(&self, browser: CefArc<Browser>, _frame: CefArc<Frame>, http_status_code: i32) {
        self.log.lock().push(format!("end {http_status_code}"));
        if self.close_on_load_end {
            if let Some(host) = browser.get_host() {
                host.close_browser(false);
            }
        }
    }

    fn on_load_error(
        &self,
        _browser: CefArc<Browser>,
        frame: CefArc<Frame>,
        error_code: i32,
        error_text: &str,
        failed_url: &str,
    ) {
        self.log.lock().push(format!(
            "error main={} {error_code} {error_text} {failed_url}",
            frame.is_main()
        ));
    }
}

impl LifeSpanHandlerConfig for Events {
    fn on_after_created(&self, browser: CefArc<Browser>) {
        self.log.lock().push(format!("created {}", browser.identifier()));
    }

    fn on_before_close(&self, browser: CefArc<Browser>) {
        self.log.lock().push(format!("closed {}", browser.identifier()));
        quit_message_loop().expect("runtime is installed");
    }
}

struct View {
    size: Rect,
    paints: Arc<Mutex<Vec<(PaintElementType, usize, usize, usize, [u8; 4])>>>,
}

impl RenderHandlerConfig for View {
    fn get_view_rect(&self, _browser: CefArc<Browser>) -> Rect {
        self.size
    }

    fn on_paint(
        &self,
        _browser: CefArc<Browser>,
        paint_element_type: PaintElementType,
        _dirty_rects: &[Rect],
        buffer: &[u8],
        width: usize,
        height: usize,
    ) {
        let mut first = [0; 4];
        first.copy_from_slice(&buffer[..4]);
        self.paints
            .lock()
            .push((paint_element_type, buffer.len(), width, height, first));
    }
}

struct TestClient {
    load: CefArc<LoadHandler>,
    life_span: CefArc<LifeSpanHandler>,
    render: Option<CefArc<RenderHandler>>,
}

impl ClientConfig for TestClient {
    fn get_life_span_handler(&self) -> Option<CefArc<LifeSpanHandler>> {
        Some(self.life_span.clone())
    }

    fn get_load_handler(&self) -> Option<CefArc<LoadHandler>> {
        Some(self.load.clone())
    }

    fn get_render_handler(&self) -> Option<CefArc<RenderHandler>> {
        self.render.clone()
    }
}

fn client(log: &Log, close_on_load_end: bool, render: Option<CefArc<RenderHandler>>) -> CefArc<Client> {
    let events = || Events {
        log: log.clone(),
        close_on_load_end,
    };
    Client::new(TestClient {
        load: LoadHandler::new(events()),
        life_span: LifeSpanHandler::new(events()),
        render,
    })
}

fn close_later(browser: CefArc<Browser>) {
    post_task(
        ThreadId::Ui,
        Task::once(move || {
            if let Some(host) = browser.get_host() {
                host.close_browser(false);
            }
        }),
    )
    .expect("ui thread accepts tasks");
}

#[test]
fn tables_report_their_allocation_size() {
    struct Noop;
    impl AppConfig for Noop {}
    impl ClientConfig for Noop {}

    let app = App::new(Noop);
    let client = Client::new(Noop);

    assert_eq!(app.0.base.size, std::mem::size_of::<CefArcFromRust<App, Noop>>());
    assert_eq!(client.0.base.size, std::mem::size_of::<CefArcFromRust<Client, Noop>>());
    assert!(app.0.on_before_command_line_processing.is_some());
    assert!(app.0.get_render_process_handler.is_some());
    assert!(app.0.get_browser_process_handler.is_none());
    assert!(client.0.get_load_handler.is_some());
    assert!(client.0.get_display_handler.is_none());
}

#[test]
fn load_events_arrive_in_order_and_a_posted_close_ends_the_loop() {
    let sim = SimRuntime::install();
    let log = Log::default();

    initialize(&MainArgs::new(["test"]), &Settings::default(), None).expect("initialize");
    browser_host_create_browser(
        &WindowInfo::windowless("test"),
        client(&log, false, None),
        "https://example.test/",
        &BrowserSettings::default(),
    )
    .expect("create browser");

    sim.advance(LOAD_DURATION);
    let browser = sim.browser(1).expect("browser 1 exists");
    close_later(browser);
    run_message_loop().expect("run loop");
    shutdown().expect("shutdown");

    assert_eq!(
        *log.lock(),
        [
            "created 1",
            "loading true",
            "start main=true",
            "end 200",
            "loading false",
            "closed 1",
        ]
    );
    let record = sim.record();
    assert_eq!(record.closes.len(), 1);
    assert_eq!(record.reentrant_closes().count(), 0);
    assert_eq!(record.quit_calls, 1);
    assert_eq!(record.shutdown_calls, 1);
    assert!(sim.open_browsers().is_empty());
}

#[test]
fn closing_inside_a_load_callback_is_flagged() {
    let sim = SimRuntime::install();
    let log = Log::default();

    browser_host_create_browser(
        &WindowInfo::windowless("test"),
        client(&log, true, None),
        "https://example.test/",
        &BrowserSettings::default(),
    )
    .expect("create browser");
    run_message_loop().expect("run loop");

    let record = sim.record();
    assert_eq!(record.reentrant_closes().count(), 1);
}

#[test]
fn paint_delivers_a_full_bgra_view() {
    let sim = SimRuntime::install();
    let log = Log::default();
    let paints = Arc::default();
    let render = RenderHandler::new(View {
        size: Rect::new(0, 0, 800, 600),
        paints: Arc::clone(&paints),
    });

    browser_host_create_browser(
        &WindowInfo::windowless("test"),
        client(&log, false, Some(render)),
        "https://example.test/",
        &BrowserSettings::default(),
    )
    .expect("create browser");
    sim.advance(Duration::from_secs(1));

    assert_eq!(
        *paints.lock(),
        [(PaintElementType::View, 800 * 600 * 4, 800, 600, PAINT_PIXEL)]
    );
}

#[test]
fn scripted_failures_reach_on_load_error() {
    let sim = SimRuntime::install();
    let log = Log::default();
    sim.script_page(
        "https://unreachable.test/",
        PageScript::Fail {
            error_code: -105,
            error_text: "ERR_NAME_NOT_RESOLVED".to_owned(),
        },
    );

    browser_host_create_browser(
        &WindowInfo::windowless("test"),
        client(&log, false, None),
        "https://unreachable.test/",
        &BrowserSettings::default(),
    )
    .expect("create browser");
    sim.advance(LOAD_DURATION);

    let log = log.lock();
    assert!(log.contains(
        &"error main=true -105 ERR_NAME_NOT_RESOLVED https://unreachable.test/".to_owned()
    ));
    assert_eq!(log.last().map(String::as_str), Some("loading false"));
}

#[test]
fn sub_frame_failures_do_not_end_the_load() {
    let sim = SimRuntime::install();
    let log = Log::default();
    sim.script_page(
        "https://frames.test/",
        PageScript::SubFrameFail {
            error_code: -3,
            error_text: "ERR_ABORTED".to_owned(),
            paint_after: None,
        },
    );

    browser_host_create_browser(
        &WindowInfo::windowless("test"),
        client(&log, false, None),
        "https://frames.test/",
        &BrowserSettings::default(),
    )
    .expect("create browser");
    sim.advance(LOAD_DURATION);

    assert_eq!(
        *log.lock(),
        [
            "created 1",
            "loading true",
            "start main=true",
            "error main=false -3 ERR_ABORTED https://frames.test/",
            "end 200",
            "loading false",
        ]
    );
}

#[test]
fn delayed_tasks_run_on_the_virtual_clock() {
    let sim = SimRuntime::install();
    let order = Log::default();

    for (name, delay) in [("late", 500), ("early", 200), ("now", 0)] {
        let order = order.clone();
        post_delayed_task(
            ThreadId::Ui,
            Task::once(move || order.lock().push(name.to_owned())),
            Duration::from_millis(delay),
        )
        .expect("post");
    }

    sim.advance(Duration::from_millis(300));
    assert_eq!(*order.lock(), ["now", "early"]);
    assert_eq!(sim.pending(), 1);

    sim.run_until_idle();
    assert_eq!(*order.lock(), ["now", "early", "late"]);
    assert_eq!(sim.now(), Duration::from_millis(500));
    assert_eq!(sim.record().posted[0].delay, Duration::from_millis(500));
}

#[test]
fn posting_to_an_unsupported_thread_fails() {
    let sim = SimRuntime::install();
    let ran = Arc::new(Mutex::new(false));

    let result = RuntimeTaskPoster.post(ThreadId::Io, Task::once({
        let ran = ran.clone();
        move || *ran.lock() = true
    }));

    assert!(matches!(result, Err(CefError::PostTask { thread: ThreadId::Io })));
    assert_eq!(sim.record().rejected_posts, [ThreadId::Io]);
    assert!(currently_on(ThreadId::Ui).expect("installed"));
    assert!(!currently_on(ThreadId::Io).expect("installed"));
    sim.run_until_idle();
    assert!(!*ran.lock());
}

struct Echo;

impl V8HandlerConfig for Echo {
    fn execute(
        &self,
        name: &str,
        _object: Option<CefArc<V8Value>>,
        arguments: &[Option<CefArc<V8Value>>],
    ) -> V8Return {
        match (name, arguments) {
            ("Echo", [None]) => V8Return::Exception("null argument".to_owned()),
            ("Echo", [Some(argument)]) => match argument.string_value() {
                Some(value) => match V8Value::create_string(&value) {
                    Ok(value) => V8Return::Value(value),
                    Err(err) => V8Return::Exception(err.to_string()),
                },
                None => V8Return::Exception("not a string".to_owned()),
            },
            ("Echo", _) => V8Return::Exception("one argument".to_owned()),
            _ => V8Return::NotHandled,
        }
    }
}

struct Extensions;

impl RenderProcessHandlerConfig for Extensions {
    fn on_web_kit_initialized(&self) {
        register_extension(
            "v8/echo",
            "native function Echo(x);",
            Some(V8Handler::new(Echo)),
        )
        .expect("register");
    }
}

struct ExtensionApp;

impl AppConfig for ExtensionApp {
    fn on_before_command_line_processing(&self, process_type: ProcessType, command_line: &CommandLine) {
        if process_type == ProcessType::Browser {
            command_line.append_switch("single-process");
        }
    }

    fn get_render_process_handler(&self) -> Option<CefArc<RenderProcessHandler>> {
        Some(RenderProcessHandler::new(Extensions))
    }
}

#[test]
fn native_functions_run_through_the_registered_handler() {
    let sim = SimRuntime::install();
    let log = Log::default();

    initialize(&MainArgs::new(["test"]), &Settings::default(), Some(App::new(ExtensionApp)))
        .expect("initialize");
    assert!(sim.record().has_switch("single-process"));
    assert_eq!(sim.invoke_native("Echo", vec!["x".into()]), NativeOutcome::Missing);

    browser_host_create_browser(
        &WindowInfo::windowless("test"),
        client(&log, false, None),
        "https://example.test/",
        &BrowserSettings::default(),
    )
    .expect("create browser");
    sim.advance(Duration::ZERO);

    assert_eq!(sim.record().extensions, ["v8/echo"]);
    assert_eq!(
        sim.invoke_native("Echo", vec!["hello".into()]),
        NativeOutcome::Returned(SimValue::String("hello".to_owned()))
    );
    assert_eq!(
        sim.invoke_native("Echo", vec![7.into()]),
        NativeOutcome::Exception("not a string".to_owned())
    );
    assert_eq!(
        sim.invoke_native("Echo", vec![]),
        NativeOutcome::Exception("one argument".to_owned())
    );
}

#[test]
fn null_arguments_keep_their_slot() {
    let sim = SimRuntime::install();
    let log = Log::default();

    initialize(&MainArgs::new(["test"]), &Settings::default(), Some(App::new(ExtensionApp)))
        .expect("initialize");
    browser_host_create_browser(
        &WindowInfo::windowless("test"),
        client(&log, false, None),
        "https://example.test/",
        &BrowserSettings::default(),
    )
    .expect("create browser");
    sim.advance(Duration::ZERO);

    assert_eq!(
        sim.invoke_native_nullable("Echo", vec![None]),
        NativeOutcome::Exception("null argument".to_owned())
    );
    assert_eq!(
        sim.invoke_native_nullable("Echo", vec![None, Some("x".into())]),
        NativeOutcome::Exception("one argument".to_owned())
    );
}

#[test]
fn version_and_process_queries() {
    let _sim = SimRuntime::install();

    let version = version_info().expect("installed");
    assert_eq!(version.to_string(), "121.3.2+chromium-121.0.6167.75");
    assert_eq!(execute_process(&MainArgs::new(["test"]), None).expect("installed"), None);
    // the browser process returns instead of exiting.
    try_start_subprocess(&MainArgs::new(["test", "--enable-logging"]), None).expect("installed");
}
