use chrono::Local;
use rewards_core::{AppViewModel, Notice, ReviewFailure, Tab};

/// Text lines for the header and the active tab.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("कुल बैलेंस (Total Balance): ₹{}", view.balance)];

    match view.tab {
        Tab::Home => render_home(view, &mut lines),
        Tab::Earn => render_earn(view, &mut lines),
        Tab::Refer => render_refer(view, &mut lines),
        Tab::Wallet => render_wallet(view, &mut lines),
    }
    lines
}

fn render_home(view: &AppViewModel, lines: &mut Vec<String>) {
    lines.push(format!(
        "आज की कमाई: ₹{} | कुल कोइन्स: {}",
        view.today_earnings, view.coins
    ));
    lines.push("देखें और कमाएं (Watch & Earn)".to_string());
    for row in &view.videos {
        let marker = if row.watching { "…" } else { " " };
        lines.push(format!(
            "{marker} [{}] {} (कमाने का मौका: ₹{})",
            row.id, row.title, row.reward
        ));
    }
    lines.push(format!(
        "अगला विड्रॉल ₹{} पर उपलब्ध होगा। आपके पास ₹{} हैं।",
        view.withdraw_minimum, view.balance
    ));
}

fn render_earn(view: &AppViewModel, lines: &mut Vec<String>) {
    lines.push("अपना वीडियो डालें".to_string());
    lines.push(format!("YouTube Link: {}", view.upload_input));
    let button = if view.submitting {
        "समीक्षा जारी है…"
    } else if view.submit_enabled {
        "सबमिट करें (Submit)"
    } else {
        "लिंक डालें"
    };
    lines.push(format!("[{button}]"));
}

fn render_refer(view: &AppViewModel, lines: &mut Vec<String>) {
    lines.push(format!(
        "रेफरल प्रोग्राम ({} Levels)",
        view.referral_levels.len()
    ));
    for level in &view.referral_levels {
        lines.push(format!(
            "Level {}: {} यूज़र्स (₹{}/refer)",
            level.level, level.users, level.rate
        ));
    }
}

fn render_wallet(view: &AppViewModel, lines: &mut Vec<String>) {
    lines.push(format!("उपलब्ध बैलेंस: ₹{}", view.balance));
    let button = if view.withdraw_enabled {
        "अभी विड्रॉल करें".to_string()
    } else {
        format!("₹{} होने पर विड्रॉल करें", view.withdraw_minimum)
    };
    lines.push(format!("[{button}]"));
}

pub fn notice_text(notice: &Notice) -> String {
    match notice {
        Notice::RewardCredited { amount } => format!("बधाई हो! आपने ₹{amount} कमाए।"),
        Notice::SubmissionAccepted { title, .. } => {
            format!("वीडियो सफलतापूर्वक अपलोड हो गया! ({title})")
        }
        Notice::SubmissionFailed {
            failure: ReviewFailure::Timeout,
        } => "त्रुटि: समीक्षा में बहुत समय लगा, कृपया फिर से प्रयास करें।".to_string(),
        Notice::SubmissionFailed {
            failure: ReviewFailure::Unavailable,
        } => "त्रुटि: लिंक की समीक्षा नहीं की जा सकी।".to_string(),
        Notice::WithdrawalUnavailable { minimum } => {
            format!("विड्रॉल के लिए कम से कम ₹{minimum} होने चाहिए।")
        }
    }
}

/// Notice line stamped with local wall-clock time.
pub fn render_notice(notice: &Notice) -> String {
    format!("[{}] {}", Local::now().format("%H:%M:%S"), notice_text(notice))
}
