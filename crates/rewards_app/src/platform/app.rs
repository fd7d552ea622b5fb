use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use rewards_core::{update, AppState, Msg};
use rewards_logging::{rewards_info, rewards_warn};

use super::config::{api_key_from_env, load_config};
use super::effects::EffectRunner;
use super::logging;
use super::ui::command::{parse_command, ShellInput, HELP};
use super::ui::render::{render, render_notice};

pub fn run_app() -> anyhow::Result<()> {
    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let (config, origin) = load_config(&working_dir).context("loading configuration")?;
    logging::initialize(&config.logging);
    rewards_info!("Configuration loaded from {}", origin);

    let api_key = api_key_from_env();
    if api_key.is_none() {
        rewards_warn!("No API key in environment; link reviews will fail");
    }

    let (inbox_tx, inbox_rx) = mpsc::channel::<ShellInput>();
    let runner = EffectRunner::new(config.classifier_settings(api_key), inbox_tx.clone());
    spawn_stdin_reader(inbox_tx);

    let mut shell = Shell::new(AppState::new().with_watch_delay(config.watch_delay()), runner);
    rewards_info!("Session started watch_delay_ms={}", config.watch_delay_ms);
    println!("{HELP}");
    print_lines(shell.view_lines());

    while let Ok(input) = inbox_rx.recv() {
        match input {
            ShellInput::Dispatch(msg) => print_lines(shell.dispatch(msg)),
            ShellInput::Show => print_lines(shell.view_lines()),
            ShellInput::Help => println!("{HELP}"),
            ShellInput::Unknown(line) => println!("unknown command {line:?}\n{HELP}"),
            ShellInput::Quit => break,
        }
    }

    shell.runner.stop();
    rewards_info!("Session ended");
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

fn spawn_stdin_reader(inbox: mpsc::Sender<ShellInput>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let input = match line {
                Ok(line) => parse_command(&line),
                Err(err) => {
                    rewards_warn!("stdin read failed: {}", err);
                    ShellInput::Quit
                }
            };
            let quit = input == ShellInput::Quit;
            if inbox.send(input).is_err() || quit {
                return;
            }
        }
        let _ = inbox.send(ShellInput::Quit);
    });
}

/// Owns the session state; all messages are applied here, one at a time.
struct Shell {
    state: AppState,
    runner: EffectRunner,
}

impl Shell {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    /// Applies `msg` and any follow-ups it triggers; returns the lines to show.
    fn dispatch(&mut self, msg: Msg) -> Vec<String> {
        let mut lines = Vec::new();
        let mut was_dirty = false;
        let mut queue = VecDeque::from([msg]);

        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (mut state, effects) = update(state, msg);
            was_dirty |= state.consume_dirty();
            self.state = state;

            let output = self.runner.run(effects);
            lines.extend(output.notices.iter().map(render_notice));
            queue.extend(output.follow_ups);
        }

        if was_dirty {
            lines.extend(self.view_lines());
        }
        lines
    }

    fn view_lines(&self) -> Vec<String> {
        render(&self.state.view())
    }
}
