//! Full list pipeline scenarios against the real event model: raw query
//! parameters in, one deterministic page out, canonical parameters echoed
//! back.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use content_service::listing::{run_query, ListControls};
use content_service::models::localized::LocalizedText;
use content_service::models::{event, Event, EventCategory, EventCategoryFilter, EventSort};

fn event_at(title: &str, category: EventCategory, day: u32) -> Event {
    let mut ev = Event::new(
        LocalizedText::new(title),
        LocalizedText::new(""),
        None,
        category,
        Utc.with_ymd_and_hms(2026, 3, day, 18, 0, 0).unwrap(),
    );
    ev.created_at = ev.starts_at;
    ev
}

fn fixture() -> Vec<Event> {
    (1..=23)
        .map(|day| {
            let category = if day % 2 == 0 {
                EventCategory::Workshop
            } else {
                EventCategory::Social
            };
            event_at(&format!("Event {day:02}"), category, day)
        })
        .collect()
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn out_of_range_page_clamps_to_the_last_page() {
    // 23 records, page size 10, requested page 99.
    let controls: ListControls<EventCategoryFilter, EventSort> =
        ListControls::parse(&params(&[("page", "99")]));
    let page = run_query(fixture(), &controls, &event::list_spec(), 10);

    assert_eq!(page.total_items, 23);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.safe_page, 3);
    assert_eq!(page.items.len(), 3);
}

#[test]
fn malformed_parameters_render_the_default_first_page() {
    // Unknown category and a negative page both fall back to defaults.
    let controls: ListControls<EventCategoryFilter, EventSort> =
        ListControls::parse(&params(&[("category", "bogus"), ("page", "-4")]));

    assert_eq!(controls, ListControls::default());

    let page = run_query(fixture(), &controls, &event::list_spec(), 10);
    assert_eq!(page.safe_page, 1);
    assert_eq!(page.total_items, 23);
    // Default sort is newest first.
    assert_eq!(page.items[0].title.en, "Event 23");
}

#[test]
fn filter_sort_and_paginate_compose_in_that_order() {
    let controls: ListControls<EventCategoryFilter, EventSort> = ListControls::parse(&params(&[
        ("category", "workshop"),
        ("sort", "oldest"),
        ("page", "2"),
    ]));
    let page = run_query(fixture(), &controls, &event::list_spec(), 5);

    // 11 workshops (even days 2..=22), oldest first, second page of five.
    assert_eq!(page.total_items, 11);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.safe_page, 2);
    let titles: Vec<&str> = page.items.iter().map(|e| e.title.en.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Event 12", "Event 14", "Event 16", "Event 18", "Event 20"]
    );
}

#[test]
fn search_and_category_narrow_together() {
    let controls: ListControls<EventCategoryFilter, EventSort> =
        ListControls::parse(&params(&[("q", "event 1"), ("category", "social")]));
    let page = run_query(fixture(), &controls, &event::list_spec(), 10);

    // Days 10..=19 match "event 1"; the odd ones are social.
    assert_eq!(page.total_items, 5);
    assert!(page
        .items
        .iter()
        .all(|e| e.category == EventCategory::Social));
}

#[test]
fn echoed_parameters_reproduce_the_same_page() {
    let controls: ListControls<EventCategoryFilter, EventSort> = ListControls::parse(&params(&[
        ("q", "event"),
        ("category", "workshop"),
        ("page", "2"),
    ]));
    let page = run_query(fixture(), &controls, &event::list_spec(), 5);

    // The canonical serialization a list response echoes back.
    let echoed: HashMap<String, String> = controls.serialize().into_iter().collect();
    let reparsed: ListControls<EventCategoryFilter, EventSort> = ListControls::parse(&echoed);
    let replayed = run_query(fixture(), &reparsed, &event::list_spec(), 5);

    assert_eq!(reparsed, controls);
    assert_eq!(replayed.safe_page, page.safe_page);
    let first = |p: &content_service::listing::Page<Event>| p.items[0].id.clone();
    assert_eq!(first(&replayed), first(&page));
}
