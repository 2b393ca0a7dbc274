use crate::*;

use std::sync::{Arc, Mutex};
use std::vec::Vec;

use waterfall::{Item, LayoutOptions, Relayout, ScrollDirection};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Event {
    Scroll(u64),
    EndReached,
    Show(usize),
    Hide(usize),
    HeaderShow,
    HeaderHide,
    FooterShow,
    FooterHide,
}

type Log = Arc<Mutex<Vec<Event>>>;

fn recording(opts: DriverOptions) -> (DriverOptions, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let push = |log: &Log, e: Event| log.lock().unwrap().push(e);
    let opts = opts
        .with_on_scroll(Some({
            let log = Arc::clone(&log);
            move |off| push(&log, Event::Scroll(off))
        }))
        .with_on_end_reached(Some({
            let log = Arc::clone(&log);
            move || push(&log, Event::EndReached)
        }))
        .with_on_cell_show(Some({
            let log = Arc::clone(&log);
            move |i| push(&log, Event::Show(i))
        }))
        .with_on_cell_hide(Some({
            let log = Arc::clone(&log);
            move |i| push(&log, Event::Hide(i))
        }))
        .with_on_header_show(Some({
            let log = Arc::clone(&log);
            move || push(&log, Event::HeaderShow)
        }))
        .with_on_header_hide(Some({
            let log = Arc::clone(&log);
            move || push(&log, Event::HeaderHide)
        }))
        .with_on_footer_show(Some({
            let log = Arc::clone(&log);
            move || push(&log, Event::FooterShow)
        }))
        .with_on_footer_hide(Some({
            let log = Arc::clone(&log);
            move || push(&log, Event::FooterHide)
        }));
    (opts, log)
}

fn take(log: &Log) -> Vec<Event> {
    core::mem::take(&mut *log.lock().unwrap())
}

fn items(count: usize) -> Vec<Item<(), u8>> {
    (0..count).map(|_| Item::new(100, 0, ())).collect()
}

fn base() -> DriverOptions {
    DriverOptions::new(LayoutOptions::new(1, 300), 500)
}

fn driver(opts: DriverOptions, count: usize) -> ViewportDriver<u8> {
    let mut d = ViewportDriver::new(opts).unwrap();
    d.set_items(&items(count)).unwrap();
    d
}

fn end_reached_count(events: &[Event]) -> usize {
    events.iter().filter(|e| **e == Event::EndReached).count()
}

fn rendered_pairs(d: &ViewportDriver<u8>) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    d.collect_rendered(&mut cells);
    cells.iter().map(|c| (c.index, c.slot)).collect()
}

#[test]
fn mount_shows_cells_in_the_viewport() {
    let (opts, log) = recording(base());
    let mut d = driver(opts, 50);
    let update = d.mount();
    assert!(update.changed);
    assert_eq!(d.shown_range(), Some(0..5));
    assert_eq!(take(&log), (0..5).map(Event::Show).collect::<Vec<_>>());
}

#[test]
fn scrolling_shows_and_hides_cells() {
    let (opts, log) = recording(base());
    let mut d = driver(opts, 50);
    d.mount();
    take(&log);

    d.on_scroll(250);
    assert_eq!(d.shown_range(), Some(2..8));
    assert_eq!(
        take(&log),
        vec![
            Event::Scroll(250),
            Event::Show(5),
            Event::Show(6),
            Event::Show(7),
            Event::Hide(0),
            Event::Hide(1),
        ]
    );
}

#[test]
fn long_jump_shows_the_cells_it_lands_on() {
    let (opts, log) = recording(base());
    let mut d = driver(opts, 50);
    d.mount();
    take(&log);

    assert!(d.on_scroll(3000).is_some());
    assert_eq!(d.shown_range(), Some(30..35));

    let mut expected = vec![Event::Scroll(3000)];
    expected.extend((0..5).map(Event::Hide));
    expected.extend((30..35).map(Event::Show));
    assert_eq!(take(&log), expected);
}

#[test]
fn throttled_scroll_does_not_change_the_window() {
    let (opts, log) = recording(base());
    let mut d = driver(opts, 50);
    d.mount();
    d.on_scroll(1000);
    take(&log);

    let window = d.tracker().window_range();
    assert!(d.on_scroll(1050).is_none());
    assert_eq!(d.tracker().window_range(), window);
    assert_eq!(d.shown_range(), Some(10..16));
    assert_eq!(take(&log), vec![Event::Scroll(1050), Event::Show(15)]);
}

#[test]
fn small_scrolls_are_throttled() {
    let mut d = driver(base(), 50);
    d.mount();

    assert!(d.on_scroll(50).is_none());
    assert_eq!(d.tracker().last_scroll_top(), Some(0));
    assert_eq!(d.scroll_top(), 50);

    let update = d.on_scroll(150).unwrap();
    assert_eq!(update.direction, ScrollDirection::Forward);
    assert_eq!(d.tracker().last_scroll_top(), Some(150));

    assert!(d.on_scroll(60).is_none());
    let update = d.on_scroll(40).unwrap();
    assert_eq!(update.direction, ScrollDirection::Backward);
}

#[test]
fn end_reached_fires_once_per_crossing() {
    let (opts, log) = recording(base());
    let mut d = driver(opts, 50);
    d.mount();

    for off in [3900u64, 4100, 4200, 3000, 4500] {
        d.on_scroll(off);
    }
    let fired = take(&log)
        .into_iter()
        .filter(|e| *e == Event::EndReached)
        .count();
    assert_eq!(fired, 2);
}

#[test]
fn header_transitions_wait_for_tick_and_coalesce() {
    let (opts, log) = recording(base());
    let mut d = driver(opts, 50);
    d.on_header_height(200);
    d.mount();

    let edge = |events: Vec<Event>| -> Vec<Event> {
        events
            .into_iter()
            .filter(|e| matches!(e, Event::HeaderShow | Event::HeaderHide))
            .collect()
    };

    assert!(edge(take(&log)).is_empty());
    d.tick();
    assert_eq!(edge(take(&log)), vec![Event::HeaderShow]);
    assert!(d.header_visible());

    d.on_scroll(300);
    d.on_scroll(100);
    d.tick();
    assert!(edge(take(&log)).is_empty());

    d.on_scroll(300);
    d.tick();
    assert_eq!(edge(take(&log)), vec![Event::HeaderHide]);
    assert!(!d.header_visible());
}

#[test]
fn footer_shows_when_scrolled_past_content() {
    let (opts, log) = recording(base());
    let mut d = driver(opts, 50);
    d.on_footer_height(100);
    d.mount();
    assert_eq!(d.total_height(), 5100);

    let edge = |events: Vec<Event>| -> Vec<Event> {
        events
            .into_iter()
            .filter(|e| matches!(e, Event::FooterShow | Event::FooterHide))
            .collect()
    };

    d.on_scroll(4600);
    d.tick();
    assert_eq!(edge(take(&log)), vec![Event::FooterShow]);

    d.on_scroll(1000);
    d.tick();
    assert_eq!(edge(take(&log)), vec![Event::FooterHide]);
}

#[test]
fn reset_list_matches_a_fresh_mount() {
    let mut d = driver(base(), 50);
    d.mount();
    for off in [1200u64, 2600, 1800] {
        d.on_scroll(off);
    }
    d.reset_list();

    let mut fresh = driver(base().with_initial_scroll_top(1800), 50);
    fresh.mount();

    assert_eq!(rendered_pairs(&d), rendered_pairs(&fresh));
    assert_eq!(d.shown_range(), fresh.shown_range());
}

#[test]
fn scroll_to_clamps_and_updates_the_window() {
    let mut d = driver(base(), 50);
    d.mount();
    assert_eq!(d.scroll_to(10_000), 4500);
    assert_eq!(d.scroll_top(), 4500);
    assert_eq!(d.tracker().last_scroll_top(), Some(4500));
    assert_eq!(d.shown_range(), Some(45..50));
}

#[test]
fn header_height_shifts_rendered_cells() {
    let mut d = driver(base(), 50);
    d.on_header_height(200);
    d.mount();

    let mut cells = Vec::new();
    d.collect_rendered(&mut cells);
    let first = &cells[0];
    assert_eq!((first.index, first.slot), (0, 0));
    assert_eq!(first.top, 200);
    assert_eq!(first.entry.top, 0);
    assert_eq!(d.total_height(), 5200);
}

#[test]
fn appended_items_join_the_window() {
    let mut d = driver(base(), 10);
    d.mount();
    assert_eq!(d.tracker().window_range(), Some(0..10));

    let kind = d.set_items(&items(20)).unwrap();
    assert_eq!(kind, Relayout::Appended { from: 10 });
    assert_eq!(d.tracker().window_range(), Some(0..15));
    assert_eq!(rendered_pairs(&d).len(), 15);
}

#[test]
fn appended_items_join_after_a_throttled_scroll_up() {
    let mut d = driver(base(), 10);
    d.mount();
    assert!(d.on_scroll(400).is_some());
    assert!(d.on_scroll(350).is_none());

    let kind = d.set_items(&items(20)).unwrap();
    assert_eq!(kind, Relayout::Appended { from: 10 });
    assert_eq!(d.tracker().window_range(), Some(0..19));
    assert_eq!(d.shown_range(), Some(3..9));
    assert_eq!(rendered_pairs(&d).len(), 19);
}

#[test]
fn short_lists_report_end_reached_on_mount() {
    let (opts, log) = recording(base());
    let mut d = driver(opts, 3);
    d.mount();
    assert_eq!(end_reached_count(&take(&log)), 1);

    d.set_items(&items(4)).unwrap();
    assert_eq!(end_reached_count(&take(&log)), 0);

    // Growing past the threshold re-arms; scrolling near the new end fires again.
    d.set_items(&items(20)).unwrap();
    assert_eq!(end_reached_count(&take(&log)), 0);
    d.on_scroll(1200);
    assert_eq!(end_reached_count(&take(&log)), 1);
}

#[test]
fn geometry_change_relayouts_and_resets() {
    let mut d = driver(base(), 50);
    d.mount();
    d.on_scroll(800);

    let next = base().with_layout(LayoutOptions::new(2, 300));
    let kind = d.set_options(next, &items(50)).unwrap();
    assert_eq!(kind, Relayout::Full);
    assert_eq!(d.layout().column_heights(), &[2500, 2500]);

    let pairs = rendered_pairs(&d);
    for (i, &(_, slot)) in pairs.iter().enumerate() {
        assert_eq!(slot, i);
    }
    assert_eq!(d.tracker().top_pool().len() + d.tracker().bottom_pool().len(), 0);
}

#[test]
fn invalid_options_are_rejected() {
    let bad_columns = DriverOptions::new(LayoutOptions::new(0, 300), 500);
    assert!(ViewportDriver::<u8>::new(bad_columns).is_err());

    let bad_lookahead = base().with_lookahead(0.0);
    assert!(ViewportDriver::<u8>::new(bad_lookahead).is_err());

    let mut d = driver(base(), 5);
    let too_narrow = base().with_layout(LayoutOptions::new(4, 300).with_gaps(100, 100, 40));
    assert!(d.set_options(too_narrow, &items(5)).is_err());
    assert_eq!(d.options().layout.columns, 1);
}
