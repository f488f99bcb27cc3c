mod common;

use common::WordParser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;
use std::time::Duration;
use wacccode_core::{CodeBuffer, Position, TextBuffer};
use wacccode_highlight::{HighlightConfig, HighlightSession, ManualClock};

fn session() -> (
    HighlightSession<WordParser>,
    ManualClock,
    Rc<std::cell::Cell<usize>>,
) {
    let clock = ManualClock::new();
    let (parser, calls) = WordParser::new();
    let session = HighlightSession::with_clock(
        CodeBuffer::new("begin\nend"),
        parser,
        &HighlightConfig::default(),
        Rc::new(clock.clone()),
    );
    (session, clock, calls)
}

fn type_char(session: &mut HighlightSession<WordParser>, at: usize) {
    session
        .buffer_mut()
        .insert(Position::new(1, at), "x")
        .unwrap();
}

#[test]
fn test_burst_of_five_edits_runs_one_pass() {
    let (mut session, clock, calls) = session();
    let step = Duration::from_millis(100);
    let mut passes_at = Vec::new();

    // Edits at 0, 200, 400, 600 and 800ms; poll every 100ms up to 3s.
    for tick in 0..=30u64 {
        let elapsed = tick * 100;
        if elapsed <= 800 && elapsed % 200 == 0 {
            type_char(&mut session, 0);
        }
        if session.tick().is_some() {
            passes_at.push(elapsed);
        }
        clock.advance(step);
    }

    assert_eq!(passes_at, vec![1800]);
    assert_eq!(calls.get(), 1);
    assert_eq!(session.buffer().text(), "xxxxxbegin\nend");
}

#[test]
fn test_separate_bursts_run_separate_passes() {
    let (mut session, clock, calls) = session();

    type_char(&mut session, 0);
    clock.advance(Duration::from_millis(1000));
    assert!(session.tick().is_some());

    type_char(&mut session, 0);
    clock.advance(Duration::from_millis(500));
    assert!(session.tick().is_none());
    clock.advance(Duration::from_millis(500));
    assert!(session.tick().is_some());

    assert_eq!(calls.get(), 2);
    assert_eq!(session.scheduler().pending(), 0);
}

#[test]
fn test_explicit_pass_absorbs_pending_edits() {
    let (mut session, clock, calls) = session();

    session.buffer_mut().set_text("skip");
    clock.advance(Duration::from_millis(300));
    session.highlight_now();
    assert_eq!(session.scheduler().pending(), 0);
    assert!(!session.is_stale());

    clock.advance(Duration::from_millis(1000));
    assert!(session.tick().is_none());
    assert_eq!(calls.get(), 1);

    // Edits after the explicit pass are still debounced.
    type_char(&mut session, 0);
    clock.advance(Duration::from_millis(1000));
    assert!(session.tick().is_some());
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_no_pass_without_edits() {
    let (mut session, clock, calls) = session();
    clock.advance(Duration::from_secs(10));
    assert!(session.tick().is_none());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_random_bursts_fire_once_after_last_edit() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..20 {
        let (mut session, clock, calls) = session();
        let edits = rng.gen_range(1..12);
        let mut last_edit = 0u64;
        let mut now = 0u64;

        for _ in 0..edits {
            type_char(&mut session, 0);
            last_edit = now;
            let gap = rng.gen_range(0..1000u64);
            for _ in 0..gap / 10 {
                clock.advance(Duration::from_millis(10));
                now += 10;
                assert!(session.tick().is_none(), "pass inside a burst at {now}ms");
            }
        }

        let mut fired_at = None;
        while fired_at.is_none() && now < last_edit + 2000 {
            clock.advance(Duration::from_millis(10));
            now += 10;
            if session.tick().is_some() {
                fired_at = Some(now);
            }
        }

        let fired_at = fired_at.unwrap();
        assert!(fired_at >= last_edit + 1000);
        assert!(fired_at < last_edit + 1010);
        assert_eq!(calls.get(), 1);
    }
}
