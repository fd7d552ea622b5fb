use crate::{
    Amount, AppState, ClassifiedLink, Effect, Msg, Notice, ReviewFailure, WITHDRAW_MINIMUM,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// This is the only place the claim lock and the submitting flag are checked,
/// so every guard and the state change it protects happen in one step.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TabSelected(tab) => {
            state.select_tab(tab);
            Vec::new()
        }
        Msg::VideoTapped { video_id } => {
            // A claim already in flight wins; later taps are dropped silently.
            if state.try_begin_claim(video_id) {
                vec![Effect::StartWatchTimer {
                    video_id,
                    delay: state.watch_delay(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::WatchElapsed { video_id } => match state.complete_claim(video_id) {
            Some(amount) => vec![Effect::Notify(Notice::RewardCredited { amount })],
            None => Vec::new(),
        },
        Msg::WatchAborted { video_id } => {
            state.abort_claim(video_id);
            Vec::new()
        }
        Msg::UploadInputChanged(text) => {
            state.set_upload_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => match state.begin_submission() {
            Some(url) => vec![Effect::ClassifyLink { url }],
            None => Vec::new(),
        },
        Msg::ClassificationDone(result) => {
            let Some(url) = state.finish_submission() else {
                return (state, Vec::new());
            };
            let notice = match result.and_then(validate_classification) {
                Ok((title, reward)) => {
                    let video_id = state.add_submitted_video(title.clone(), url, reward);
                    Notice::SubmissionAccepted { video_id, title }
                }
                Err(failure) => Notice::SubmissionFailed { failure },
            };
            vec![Effect::Notify(notice)]
        }
        Msg::WithdrawClicked => {
            if state.can_withdraw() {
                vec![Effect::Notify(Notice::WithdrawalUnavailable {
                    minimum: WITHDRAW_MINIMUM,
                })]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

fn validate_classification(link: ClassifiedLink) -> Result<(String, Amount), ReviewFailure> {
    match Amount::from_decimal(link.reward) {
        Some(reward) if !reward.is_zero() => Ok((link.title, reward)),
        _ => Err(ReviewFailure::Unavailable),
    }
}
