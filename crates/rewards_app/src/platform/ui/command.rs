use rewards_core::{Msg, Tab, VideoId};

pub const HELP: &str = concat!(
    "commands: tab <home|earn|refer|wallet>, watch <id>, link <url>, ",
    "submit, withdraw, show, help, quit"
);

/// One line of terminal input, or an engine event, as seen by the dispatch loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellInput {
    Dispatch(Msg),
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> ShellInput {
    let line = line.trim_end_matches(['\r', '\n']);
    let (verb, rest) = match line.trim_start().split_once(' ') {
        Some((verb, rest)) => (verb, rest),
        None => (line.trim(), ""),
    };

    match verb {
        "" | "show" => ShellInput::Show,
        "help" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        "submit" => ShellInput::Dispatch(Msg::SubmitClicked),
        "withdraw" => ShellInput::Dispatch(Msg::WithdrawClicked),
        // The link is kept verbatim; blank links are the core's to reject.
        "link" => ShellInput::Dispatch(Msg::UploadInputChanged(rest.to_string())),
        "tab" => match parse_tab(rest.trim()) {
            Some(tab) => ShellInput::Dispatch(Msg::TabSelected(tab)),
            None => ShellInput::Unknown(line.to_string()),
        },
        "watch" => match rest.trim().parse::<u64>() {
            Ok(raw) => ShellInput::Dispatch(Msg::VideoTapped {
                video_id: VideoId::new(raw),
            }),
            Err(_) => ShellInput::Unknown(line.to_string()),
        },
        _ => ShellInput::Unknown(line.to_string()),
    }
}

fn parse_tab(name: &str) -> Option<Tab> {
    match name.to_ascii_lowercase().as_str() {
        "home" => Some(Tab::Home),
        "earn" => Some(Tab::Earn),
        "refer" => Some(Tab::Refer),
        "wallet" => Some(Tab::Wallet),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_workflow_commands() {
        assert_eq!(
            parse_command("watch 2\n"),
            ShellInput::Dispatch(Msg::VideoTapped {
                video_id: VideoId::new(2)
            })
        );
        assert_eq!(
            parse_command("link https://youtube.com/watch?v=x"),
            ShellInput::Dispatch(Msg::UploadInputChanged(
                "https://youtube.com/watch?v=x".to_string()
            ))
        );
        assert_eq!(parse_command("submit"), ShellInput::Dispatch(Msg::SubmitClicked));
        assert_eq!(parse_command("withdraw"), ShellInput::Dispatch(Msg::WithdrawClicked));
        assert_eq!(
            parse_command("tab Wallet"),
            ShellInput::Dispatch(Msg::TabSelected(Tab::Wallet))
        );
    }

    #[test]
    fn blank_link_reaches_the_core() {
        assert_eq!(
            parse_command("link"),
            ShellInput::Dispatch(Msg::UploadInputChanged(String::new()))
        );
        assert_eq!(
            parse_command("link    "),
            ShellInput::Dispatch(Msg::UploadInputChanged("   ".to_string()))
        );
    }

    #[test]
    fn control_commands_and_garbage() {
        assert_eq!(parse_command(""), ShellInput::Show);
        assert_eq!(parse_command("help"), ShellInput::Help);
        assert_eq!(parse_command("exit"), ShellInput::Quit);
        assert_eq!(
            parse_command("watch two"),
            ShellInput::Unknown("watch two".to_string())
        );
        assert_eq!(
            parse_command("tab admin"),
            ShellInput::Unknown("tab admin".to_string())
        );
        assert_eq!(parse_command("dance"), ShellInput::Unknown("dance".to_string()));
    }
}
