use projfilter_core::{FilterConfig, FilterEngine, FilterPhase, InMemoryCatalog, Project};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn untagged_catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_projects([Project::new("Project A", 1), Project::new("Project B", 2)])
        .unwrap()
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn query_applies_only_after_quiet_period() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());

    engine.set_query("Project B", start);
    assert!(!engine.poll(start + ms(499)));
    assert_eq!(engine.visibility().visible_count(), 2);
    assert_eq!(engine.phase(), FilterPhase::QueryPending);

    assert!(engine.poll(start + ms(800)));
    assert_eq!(engine.visibility().visible_names(), vec!["Project B"]);
    assert_eq!(engine.state().query, "Project B");
}

#[test]
fn search_session_follows_typing_sequence() {
    let mut now = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());

    engine.set_query("Project B", now);
    now += ms(800);
    engine.poll(now);
    assert_eq!(engine.visibility().visible_names(), vec!["Project B"]);

    engine.set_query("Project BZ", now);
    now += ms(800);
    engine.poll(now);
    assert!(engine.is_empty_result());
    assert!(!engine.visibility().any_visible());

    engine.set_query("Project", now);
    now += ms(800);
    engine.poll(now);
    assert_eq!(engine.visibility().visible_count(), 2);
    assert!(!engine.is_empty_result());

    engine.set_query("Project A", now);
    now += ms(800);
    engine.poll(now);
    assert_eq!(engine.visibility().visible_names(), vec!["Project A"]);
}

#[test]
fn single_letter_without_match_shows_no_results() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());
    engine.set_query("Z", start);
    engine.poll(start + ms(500));
    assert!(engine.is_empty_result());
}

#[test]
fn leading_space_query_selects_only_matching_name() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());
    engine.set_query(" A", start);
    engine.poll(start + ms(500));
    assert_eq!(engine.visibility().visible_names(), vec!["Project A"]);
}

#[test]
fn clearing_query_restores_all_after_debounce() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());
    engine.set_query("Z", start);
    engine.poll(start + ms(500));
    assert!(engine.is_empty_result());

    engine.set_query("", start + ms(600));
    // Empty-state stays until the cleared query settles.
    assert!(engine.is_empty_result());
    assert!(engine.poll(start + ms(1_100)));
    assert_eq!(engine.visibility().visible_count(), 2);
}

#[test]
fn rapid_edits_collapse_into_one_recomputation() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());
    let fired = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&fired);
    engine.on_visibility_changed(move |result| {
        sink.borrow_mut()
            .push(result.visible_names().iter().map(|name| name.to_string()).collect::<Vec<_>>())
    });

    engine.set_query("Z", start);
    engine.set_query(" A", start + ms(200));
    assert!(!engine.poll(start + ms(600)));
    assert!(engine.poll(start + ms(700)));
    assert!(!engine.poll(start + ms(5_000)));

    assert_eq!(*fired.borrow(), vec![vec!["Project A".to_string()]]);
    assert_eq!(engine.recompute_count(), 2);
}

#[test]
fn search_and_tags_combine_with_and() {
    let start = Instant::now();
    let catalog = InMemoryCatalog::from_projects([
        Project::new("Project A", 1).with_tags(["TestTagOne"]),
        Project::new("Project B", 2).with_tags(["TestTagTwo"]),
        Project::new("Archive A", 3).with_tags(["TestTagTwo"]),
    ])
    .unwrap();
    let mut engine = FilterEngine::new(catalog, FilterConfig::default());

    engine.toggle_tag("TestTagTwo");
    engine.set_query(" a", start);
    assert_eq!(engine.phase(), FilterPhase::TagsWithQueryPending);
    engine.poll(start + ms(500));

    assert_eq!(engine.phase(), FilterPhase::Combined);
    assert_eq!(engine.visibility().visible_names(), vec!["Archive A"]);
}

#[test]
fn custom_debounce_period_is_honored() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::with_debounce_ms(50));
    engine.set_query("Z", start);
    assert_eq!(engine.time_until_due(start), Some(ms(50)));
    assert!(engine.poll(start + ms(50)));
}

#[test]
fn cancelled_query_never_applies() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());
    let handle = engine.set_query("Z", start).expect("query should be scheduled");

    assert!(engine.cancel_query_timer(handle));
    assert!(!engine.poll(start + ms(1_000)));
    assert_eq!(engine.visibility().visible_count(), 2);
    assert_eq!(engine.phase(), FilterPhase::Idle);
}

#[test]
fn flush_applies_pending_query_without_waiting() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());
    engine.set_query("Project B", start);
    assert!(engine.flush());
    assert_eq!(engine.visibility().visible_names(), vec!["Project B"]);
    assert!(engine.next_deadline().is_none());
}

#[test]
fn reverting_to_applied_query_while_pending_still_reschedules() {
    let start = Instant::now();
    let mut engine = FilterEngine::new(untagged_catalog(), FilterConfig::default());
    let fired = Rc::new(RefCell::new(0_u32));
    let sink = Rc::clone(&fired);
    engine.on_visibility_changed(move |_| *sink.borrow_mut() += 1);

    assert!(engine.set_query("Z", start).is_some());
    assert!(engine.set_query("", start + ms(200)).is_some());
    assert_eq!(engine.pending_query(), Some(""));

    assert!(!engine.poll(start + ms(500)));
    assert!(engine.poll(start + ms(700)));

    assert_eq!(engine.visibility().visible_count(), 2);
    assert!(!engine.is_empty_result());
    assert_eq!(*fired.borrow(), 1);
}
