use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maxbreak::api::{CalendarTab, MatchRecord};
use maxbreak::fixtures::{create_mock_calendar, create_mock_match, MOCK_ACTIVE_EVENT_ID};
use maxbreak::match_list::{categorize_matches, MatchCategory, MatchFilter};
use maxbreak::tui::action::{Action, PanelAction};
use maxbreak::tui::reducer::reduce;
use maxbreak::tui::state::{AppState, PanelState};
use maxbreak::tui::types::Panel;
use std::collections::HashMap;
use std::sync::Arc;

const PLAYER_IDS: [i64; 10] = [5, 17, 12, 30, 39, 97, 224, 1, 202, 2];

/// A 128-draw tournament: seven rounds with a mix of statuses
fn create_sample_matches() -> Vec<MatchRecord> {
    let mut matches = Vec::new();
    let mut id = 1;
    let mut round_size = 64;
    let mut round = 7;
    while round_size >= 1 {
        for number in 1..=round_size {
            let p1 = PLAYER_IDS[(id as usize) % PLAYER_IDS.len()];
            let p2 = PLAYER_IDS[(id as usize + 3) % PLAYER_IDS.len()];
            let status = (id % 4) as i32;
            let scores = (status > 0).then_some((3, 2));
            matches.push(create_mock_match(id, Some(round), number, (p1, p2), status, scores));
            id += 1;
        }
        round_size /= 2;
        round += 1;
    }
    matches
}

fn state_with_tournament() -> AppState {
    let mut state = AppState::default();
    let mut event_matches = HashMap::new();
    event_matches.insert(MOCK_ACTIVE_EVENT_ID, create_sample_matches());
    state.data.event_matches = Arc::new(event_matches);
    state
        .navigation
        .panel_stack
        .push(PanelState::new(Panel::Tournament { event_id: MOCK_ACTIVE_EVENT_ID }));
    state.navigation.content_focused = true;
    state
}

/// Benchmark grouping a draw into status and round sections
fn bench_match_list(c: &mut Criterion) {
    let matches = create_sample_matches();
    let entries = categorize_matches(&matches);

    let mut group = c.benchmark_group("match_list");

    group.bench_function("categorize_128_draw", |b| {
        b.iter(|| categorize_matches(black_box(&matches)))
    });

    group.bench_function("filter_live", |b| {
        b.iter(|| MatchFilter::Only(MatchCategory::Live).apply(black_box(&entries)))
    });

    group.finish();
}

/// Benchmark reducer action dispatch
fn bench_reducer_dispatch(c: &mut Criterion) {
    let state = state_with_tournament();
    let calendar = create_mock_calendar(CalendarTab::Main, None);

    let mut group = c.benchmark_group("reducer");

    group.bench_function("navigate_tab_right", |b| {
        b.iter(|| {
            let (new_state, _effect) = reduce(
                black_box(state.clone()),
                black_box(Action::NavigateTabRight),
            );
            new_state
        })
    });

    group.bench_function("panel_select_next", |b| {
        b.iter(|| {
            let (new_state, _effect) = reduce(
                black_box(state.clone()),
                black_box(Action::PanelAction(PanelAction::SelectNext)),
            );
            new_state
        })
    });

    group.bench_function("calendar_loaded", |b| {
        b.iter(|| {
            let (new_state, _effect) = reduce(
                black_box(state.clone()),
                black_box(Action::CalendarLoaded(CalendarTab::Main, Ok(calendar.clone()))),
            );
            new_state
        })
    });

    group.finish();
}

/// Benchmark state cloning (to measure overhead)
fn bench_state_operations(c: &mut Criterion) {
    let state = state_with_tournament();

    let mut group = c.benchmark_group("state_operations");

    group.bench_function("clone_full_state", |b| {
        b.iter(|| black_box(state.clone()))
    });

    group.bench_function("match_entries", |b| {
        b.iter(|| {
            state
                .data
                .match_entries(black_box(MOCK_ACTIVE_EVENT_ID), black_box(MatchFilter::All))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_match_list,
    bench_reducer_dispatch,
    bench_state_operations
);
criterion_main!(benches);
