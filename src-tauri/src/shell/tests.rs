use super::*;
use crate::domain::clock::ClockReading;
use crate::domain::power::PowerReading;
use crate::domain::system_state::SYSTEM_STATE_EVENT;
use crate::domain::timers::TimerListSnapshot;
use crate::shared::mutex_ext::MutexExt;
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

const ALL_IDS: [&str; 9] = [
    ids::GREET_INPUT,
    ids::GREET_MSG,
    ids::CLOCK,
    ids::POWER,
    ids::TIMER_INPUT,
    ids::TIMER_LIST,
    ids::TIMER_FORM,
    ids::GREET_FORM,
    ids::STATUS,
];

fn reading(hours: u64, minutes: u32, seconds: u32, milliseconds: u32) -> ClockReading {
    ClockReading {
        hours,
        minutes,
        seconds,
        milliseconds,
        id: 0,
    }
}

fn timer(id: u64, seconds: u32) -> ClockReading {
    reading(0, 0, seconds, 0).with_id(id)
}

struct FakeHost {
    calls: Mutex<Vec<&'static str>>,
    clock: Mutex<Result<ClockReading, HostError>>,
    power: Mutex<Result<Option<PowerReading>, HostError>>,
    timers: Mutex<Vec<ClockReading>>,
    push_sender: Mutex<Option<mpsc::UnboundedSender<serde_json::Value>>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            clock: Mutex::new(Ok(reading(1, 2, 3, 4))),
            power: Mutex::new(Ok(Some(PowerReading { power: 87 }))),
            timers: Mutex::new(Vec::new()),
            push_sender: Mutex::new(None),
        }
    }
}

impl FakeHost {
    fn with_timers(timers: Vec<ClockReading>) -> Self {
        Self {
            timers: Mutex::new(timers),
            ..Self::default()
        }
    }

    fn record(&self, call: &'static str) {
        self.calls.lock_or_recover().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock_or_recover().clone()
    }

    fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    fn push(&self, payload: serde_json::Value) {
        let sender = self.push_sender.lock_or_recover().clone();
        sender
            .expect("listen was called")
            .send(payload)
            .expect("subscription alive");
    }
}

#[async_trait]
impl HostBridge for FakeHost {
    async fn setup(&self) -> Result<(), HostError> {
        self.record("setup");
        Ok(())
    }

    async fn greet(&self, name: &str) -> Result<String, HostError> {
        self.record("greet");
        Ok(format!("Hello, {name}!"))
    }

    async fn get_clock(&self) -> Result<ClockReading, HostError> {
        self.record("get_clock");
        self.clock.lock_or_recover().clone()
    }

    async fn get_power(&self) -> Result<Option<PowerReading>, HostError> {
        self.record("get_power");
        self.power.lock_or_recover().clone()
    }

    async fn get_timer_list(&self) -> Result<TimerListSnapshot, HostError> {
        self.record("get_timer_list");
        Ok(TimerListSnapshot {
            timers: self.timers.lock_or_recover().clone(),
        })
    }

    async fn push_timer(&self, seconds: Option<i64>) -> Result<ClockReading, HostError> {
        self.record("push_timer");
        let seconds = seconds
            .and_then(|s| u32::try_from(s).ok())
            .ok_or_else(|| HostError::InvalidArgument {
                command: "push_timer",
                message: format!("seconds={seconds:?}"),
            })?;
        let mut timers = self.timers.lock_or_recover();
        let created = timer(timers.len() as u64 + 1, seconds);
        timers.push(created);
        Ok(created)
    }

    async fn listen(&self, topic: &str) -> Result<EventStream, HostError> {
        self.record("listen");
        assert_eq!(topic, SYSTEM_STATE_EVENT);
        let (tx, rx) = mpsc::unbounded_channel();
        *self.push_sender.lock_or_recover() = Some(tx);
        Ok(rx)
    }
}

fn session_with(doc: &Arc<DocumentMirror>, host: &Arc<FakeHost>) -> Arc<ShellSession> {
    Arc::new(ShellSession::new(doc.clone(), host.clone()))
}

fn full_document() -> Arc<DocumentMirror> {
    Arc::new(DocumentMirror::with_elements(ALL_IDS))
}

async fn wait_for(mut done: impl FnMut() -> bool) {
    for _ in 0..400 {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn startup_renders_empty_list_then_subscribes_then_calls_setup() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);

    assert!(session.bindings().missing().is_empty());
    session.start().await;

    assert_eq!(host.calls(), vec!["get_timer_list", "listen", "setup"]);
    assert_eq!(doc.writes(ids::TIMER_LIST), 1);
    assert_eq!(doc.inner_html(ids::TIMER_LIST).as_deref(), Some(""));
    assert!(session.is_subscribed());
    assert_eq!(session.status(), ShellStatus::Ready);

    session.teardown();
}

#[tokio::test]
async fn one_push_event_updates_power_and_clock_exactly_once() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);
    session.start().await;

    host.push(json!({ "version": 1, "power": 87 }));
    wait_for(|| doc.writes(ids::CLOCK) == 1).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(doc.writes(ids::POWER), 1);
    assert_eq!(doc.writes(ids::CLOCK), 1);
    assert_eq!(doc.text_content(ids::POWER).as_deref(), Some("87"));
    assert_eq!(doc.text_content(ids::CLOCK).as_deref(), Some("01:02:03:004"));
    assert_eq!(
        session.last_system_state(),
        Some(SystemStateEvent::from_value(json!({ "version": 1, "power": 87 })))
    );

    let calls = host.calls();
    let power_at = calls.iter().position(|c| *c == "get_power").expect("power");
    let clock_at = calls.iter().position(|c| *c == "get_clock").expect("clock");
    assert!(power_at < clock_at);

    session.teardown();
}

#[tokio::test]
async fn unrecognized_push_payload_still_rerenders() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);
    session.start().await;

    host.push(json!({ "version": 9, "battery": "ok" }));
    wait_for(|| doc.writes(ids::CLOCK) == 1).await;

    assert_eq!(
        session.last_system_state(),
        Some(SystemStateEvent::Unrecognized(
            json!({ "version": 9, "battery": "ok" })
        ))
    );
    session.teardown();
}

#[tokio::test]
async fn teardown_releases_subscription_once() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);

    assert!(!session.teardown());
    session.start().await;
    assert!(session.teardown());
    assert!(!session.teardown());
    assert!(!session.is_subscribed());
}

#[tokio::test]
async fn rendering_same_snapshot_twice_gives_identical_markup() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);
    let snapshot = TimerListSnapshot {
        timers: vec![timer(1, 5), timer(2, 9)],
    };

    session.render_timer_list(&snapshot);
    let first = doc.inner_html(ids::TIMER_LIST);
    let patches = session.render_timer_list(&snapshot);

    assert!(patches.is_empty());
    assert_eq!(doc.inner_html(ids::TIMER_LIST), first);
    assert_eq!(
        first.as_deref(),
        Some(
            r#"<li class="timer-list-item" id="timer_1">00:00:05:000</li><li class="timer-list-item" id="timer_2">00:00:09:000</li>"#
        )
    );
}

#[tokio::test]
async fn appending_keeps_existing_fragments_byte_identical() {
    let doc = full_document();
    let existing = vec![timer(1, 5), timer(2, 9), timer(3, 12)];
    let host = Arc::new(FakeHost::with_timers(existing.clone()));
    let session = session_with(&doc, &host);
    session.refresh_timer_list().await.expect("refresh");
    let before = doc.inner_html(ids::TIMER_LIST).expect("list");

    doc.set_input_value(ids::TIMER_INPUT, "30");
    let submitted = session.submit_timer().await.expect("submit");

    assert_eq!(submitted, TimerSubmission::Created(timer(4, 30)));
    let after = doc.inner_html(ids::TIMER_LIST).expect("list");
    assert!(after.starts_with(&before));
    assert_eq!(&after[before.len()..], timer_fragment(&timer(4, 30)));
    assert_eq!(after.matches("<li ").count(), existing.len() + 1);
}

#[tokio::test]
async fn concurrent_submissions_do_not_overwrite_each_other() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);
    session.start().await;
    doc.set_input_value(ids::TIMER_INPUT, "10");

    let (a, b) = tokio::join!(session.submit_timer(), session.submit_timer());
    assert!(matches!(a, Ok(TimerSubmission::Created(_))));
    assert!(matches!(b, Ok(TimerSubmission::Created(_))));

    let markup = doc.inner_html(ids::TIMER_LIST).expect("list");
    assert!(markup.contains(r#"id="timer_1""#));
    assert!(markup.contains(r#"id="timer_2""#));
    session.teardown();
}

#[tokio::test]
async fn empty_timer_input_sends_nothing() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);
    session.start().await;
    let writes = doc.writes(ids::TIMER_LIST);

    doc.set_input_value(ids::TIMER_INPUT, "");
    let submitted = session.submit_timer().await.expect("submit");

    assert_eq!(submitted, TimerSubmission::Skipped);
    assert_eq!(host.count("push_timer"), 0);
    assert_eq!(doc.writes(ids::TIMER_LIST), writes);
    session.teardown();
}

#[tokio::test]
async fn non_numeric_timer_input_is_forwarded_and_failure_is_shown() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);
    session.start().await;
    let markup = doc.inner_html(ids::TIMER_LIST);

    doc.set_input_value(ids::TIMER_INPUT, "abc");
    let err = session.submit_timer().await.unwrap_err();

    assert_eq!(host.count("push_timer"), 1);
    assert!(matches!(err, HostError::InvalidArgument { .. }));
    assert_eq!(doc.inner_html(ids::TIMER_LIST), markup);
    assert_eq!(
        doc.text_content(ids::STATUS).as_deref(),
        Some("push_timer failed: push_timer invalid argument: seconds=None")
    );

    doc.set_input_value(ids::TIMER_INPUT, "5");
    session.submit_timer().await.expect("submit");
    assert_eq!(session.status(), ShellStatus::Ready);
    assert_eq!(doc.text_content(ids::STATUS).as_deref(), Some(""));
    session.teardown();
}

#[tokio::test]
async fn greeting_submit_writes_host_reply() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);

    doc.set_input_value(ids::GREET_INPUT, "Ada");
    session.submit_greeting().await.expect("greet");

    assert_eq!(doc.text_content(ids::GREET_MSG).as_deref(), Some("Hello, Ada!"));
}

#[tokio::test]
async fn greeting_without_message_element_is_a_no_op() {
    let doc = Arc::new(DocumentMirror::with_elements([ids::GREET_INPUT]));
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);

    doc.set_input_value(ids::GREET_INPUT, "Ada");
    session.submit_greeting().await.expect("greet");

    assert_eq!(host.count("greet"), 0);
}

#[tokio::test]
async fn missing_elements_are_skipped_without_touching_others() {
    let doc = Arc::new(DocumentMirror::with_elements([ids::POWER]));
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);

    session.render_clock().await.expect("clock");
    session.render_timer_list(&TimerListSnapshot {
        timers: vec![timer(1, 1)],
    });
    assert_eq!(session.append_timer(&timer(2, 2)), None);
    doc.set_input_value(ids::TIMER_INPUT, "5");
    assert_eq!(
        session.submit_timer().await.expect("submit"),
        TimerSubmission::Skipped
    );

    assert_eq!(doc.writes(ids::POWER), 0);
    session.render_power().await.expect("power");
    assert_eq!(doc.text_content(ids::POWER).as_deref(), Some("87"));
}

#[tokio::test]
async fn absent_power_reading_skips_the_write() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    *host.power.lock_or_recover() = Ok(None);
    let session = session_with(&doc, &host);

    session.render_power().await.expect("power");
    assert_eq!(doc.writes(ids::POWER), 0);
}

#[tokio::test]
async fn failed_clock_call_keeps_stale_text_and_reports_status() {
    let doc = full_document();
    let host = Arc::new(FakeHost::default());
    let session = session_with(&doc, &host);

    session.render_clock().await.expect("clock");
    *host.clock.lock_or_recover() = Err(HostError::Unavailable("window closed".to_string()));
    let err = session.render_clock().await.unwrap_err();

    assert_eq!(err, HostError::Unavailable("window closed".to_string()));
    assert_eq!(doc.text_content(ids::CLOCK).as_deref(), Some("01:02:03:004"));
    assert_eq!(
        session.status(),
        ShellStatus::Failed {
            operation: "get_clock",
            message: "host unavailable: window closed".to_string()
        }
    );
    assert_eq!(
        doc.text_content(ids::STATUS).as_deref(),
        Some("get_clock failed: host unavailable: window closed")
    );

    // A different operation succeeding does not clear the clock failure.
    session.render_power().await.expect("power");
    assert!(matches!(session.status(), ShellStatus::Failed { .. }));

    *host.clock.lock_or_recover() = Ok(reading(0, 0, 0, 1));
    session.render_clock().await.expect("clock");
    assert_eq!(session.status(), ShellStatus::Ready);
    assert_eq!(doc.text_content(ids::CLOCK).as_deref(), Some("00:00:00:001"));
}

#[tokio::test]
async fn registry_replaces_and_drains_sessions() {
    let registry: ShellRegistry<DocumentMirror> = ShellRegistry::default();
    let host = Arc::new(FakeHost::default());
    let entry = |doc: Arc<DocumentMirror>| ShellEntry {
        session: session_with(&doc, &host),
        document: doc,
    };

    assert!(registry.insert("main", entry(full_document())).is_none());
    assert!(registry.insert("main", entry(full_document())).is_some());
    assert!(registry.insert("second", entry(full_document())).is_none());
    assert!(registry.get("main").is_some());

    assert!(registry.remove("main").is_some());
    assert!(registry.get("main").is_none());

    let drained = registry.drain();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].0, "second");
    assert!(registry.get("second").is_none());
}
