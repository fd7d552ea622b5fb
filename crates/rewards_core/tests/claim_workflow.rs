use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use rewards_core::{update, Amount, AppState, Effect, Msg, Notice, VideoId, WATCH_DURATION};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(rewards_logging::initialize_for_tests);
}

fn tap(state: AppState, id: u64) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::VideoTapped {
            video_id: VideoId::new(id),
        },
    )
}

fn elapse(state: AppState, id: u64) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::WatchElapsed {
            video_id: VideoId::new(id),
        },
    )
}

#[test]
fn claim_credits_balance_and_today_after_watch() {
    init_logging();
    let state = AppState::new();
    assert_eq!(state.stats().balance, Amount::from_minor(14_550));
    let today_before = state.stats().today_earnings;

    let (state, effects) = tap(state, 1);
    assert_eq!(
        effects,
        vec![Effect::StartWatchTimer {
            video_id: VideoId::new(1),
            delay: WATCH_DURATION,
        }]
    );
    assert_eq!(state.claim_lock(), Some(VideoId::new(1)));
    // Nothing is credited until the watch time has passed.
    assert_eq!(state.stats().balance, Amount::from_minor(14_550));

    let (state, effects) = elapse(state, 1);
    assert_eq!(state.stats().balance, Amount::from_minor(15_550));
    assert_eq!(
        state.stats().today_earnings,
        today_before.saturating_add(Amount::from_major(10))
    );
    assert_eq!(state.claim_lock(), None);
    assert_eq!(
        effects,
        vec![Effect::Notify(Notice::RewardCredited {
            amount: Amount::from_major(10),
        })]
    );
    assert_eq!(state.view().balance.to_string(), "155.50");
}

#[test]
fn second_tap_while_in_flight_is_ignored() {
    init_logging();
    let (state, _) = tap(AppState::new(), 1);
    let before = state.clone();

    let (state, effects) = tap(state, 2);
    assert!(effects.is_empty());
    assert_eq!(state, before);

    // Same video again is also rejected and does not restart the timer.
    let (state, effects) = tap(state, 1);
    assert!(effects.is_empty());
    assert_eq!(state.claim_lock(), Some(VideoId::new(1)));

    let (state, _) = elapse(state, 1);
    // Only entry 1's reward was credited.
    assert_eq!(state.stats().balance, Amount::from_minor(15_550));

    // A late event for entry 2 finds no lock and credits nothing.
    let (state, effects) = elapse(state, 2);
    assert!(effects.is_empty());
    assert_eq!(state.stats().balance, Amount::from_minor(15_550));
}

#[test]
fn duplicate_elapsed_event_credits_once() {
    init_logging();
    let (state, _) = tap(AppState::new(), 2);
    let (state, first) = elapse(state, 2);
    let (state, second) = elapse(state, 2);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(state.stats().balance, Amount::from_minor(15_050));
}

#[test]
fn sequential_claims_credit_in_order() {
    init_logging();
    let state = AppState::new();
    let (state, _) = tap(state, 3);
    let (state, _) = elapse(state, 3);
    let (state, effects) = tap(state, 2);
    assert_eq!(effects.len(), 1);
    let (state, _) = elapse(state, 2);

    assert_eq!(state.stats().balance, Amount::from_minor(14_550 + 300 + 500));
    assert_eq!(state.stats().today_earnings, Amount::from_major(12 + 3 + 5));
}

#[test]
fn balance_and_today_move_by_the_same_amount() {
    init_logging();
    let mut state = AppState::new();
    for id in [1, 2, 3, 1, 1, 3] {
        let balance = state.stats().balance;
        let today = state.stats().today_earnings;
        let reward = state
            .catalog()
            .iter()
            .find(|item| item.id == VideoId::new(id))
            .map(|item| item.reward)
            .unwrap();

        let (next, _) = tap(state, id);
        let (next, _) = elapse(next, id);
        state = next;

        assert_eq!(state.stats().balance.minor() - balance.minor(), reward.minor());
        assert_eq!(state.stats().today_earnings.minor() - today.minor(), reward.minor());
    }
}

#[test]
fn unknown_video_is_not_locked() {
    init_logging();
    let (state, effects) = tap(AppState::new(), 99);
    assert!(effects.is_empty());
    assert_eq!(state.claim_lock(), None);
}

#[test]
fn configured_delay_is_carried_in_timer_effect() {
    init_logging();
    let state = AppState::new().with_watch_delay(Duration::from_millis(5));
    let (_, effects) = tap(state, 1);
    assert_eq!(
        effects,
        vec![Effect::StartWatchTimer {
            video_id: VideoId::new(1),
            delay: Duration::from_millis(5),
        }]
    );
}

#[test]
fn watching_flag_follows_the_lock() {
    init_logging();
    let (mut state, _) = tap(AppState::new(), 2);
    assert!(state.consume_dirty());

    let view = state.view();
    let watching: Vec<_> = view
        .videos
        .iter()
        .filter(|row| row.watching)
        .map(|row| row.id)
        .collect();
    assert_eq!(watching, vec![VideoId::new(2)]);

    let (state, _) = elapse(state, 2);
    assert!(state.view().videos.iter().all(|row| !row.watching));
}

#[test]
fn aborted_watch_releases_lock_without_credit() {
    init_logging();
    let (state, _) = tap(AppState::new(), 1);
    let (mut state, effects) = update(
        state,
        Msg::WatchAborted {
            video_id: VideoId::new(1),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.claim_lock(), None);
    assert_eq!(state.stats().balance, Amount::from_minor(14_550));
    assert!(state.consume_dirty());

    // The video can be claimed again, and a late elapsed event credits nothing.
    let (state, effects) = elapse(state, 1);
    assert!(effects.is_empty());
    let (state, effects) = tap(state, 1);
    assert_eq!(effects.len(), 1);
    assert_eq!(state.claim_lock(), Some(VideoId::new(1)));
}

#[test]
fn abort_for_other_video_keeps_lock() {
    init_logging();
    let (state, _) = tap(AppState::new(), 1);
    let (state, _) = update(
        state,
        Msg::WatchAborted {
            video_id: VideoId::new(2),
        },
    );
    assert_eq!(state.claim_lock(), Some(VideoId::new(1)));
}
