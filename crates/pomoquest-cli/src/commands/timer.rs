use std::io::Write;

use clap::Subcommand;
use pomoquest_core::timer::{format_clock, DEFAULT_TICK_INTERVAL};
use pomoquest_core::{
    Command, Completion, Config, Database, Event, Notifier, Phase, Profile, ProgressEngine,
    PushRelayClient, Session, TickSignal, Ticker, TimerEngine,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::terminal::{achievement_line, TerminalNotifier};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run an interactive countdown (type `help` once running)
    Run {
        /// Profile to start with (junior, middle, senior); defaults to config
        #[arg(long)]
        profile: Option<Profile>,
        /// Start in the break phase instead of work
        #[arg(long = "break")]
        start_with_break: bool,
    },
    /// Print work/break durations for every profile
    Profiles,
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Command(Command),
    Status,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Input::Command(Command::Toggle));
    };
    let input = match head.to_ascii_lowercase().as_str() {
        "t" | "toggle" => Input::Command(Command::Toggle),
        "s" | "start" => Input::Command(Command::Start),
        "r" | "reset" => Input::Command(Command::Reset),
        "w" | "work" => Input::Command(Command::SetPhase(Phase::Work)),
        "b" | "break" => Input::Command(Command::SetPhase(Phase::Break)),
        "p" | "profile" => {
            let name = words.next().ok_or("usage: profile <junior|middle|senior>")?;
            Input::Command(Command::SetProfile(name.parse().map_err(|e| format!("{e}"))?))
        }
        "status" => Input::Status,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        other => match other.parse::<Profile>() {
            Ok(profile) => Input::Command(Command::SetProfile(profile)),
            Err(_) => return Err(format!("unknown command '{other}', type 'help'")),
        },
    };
    Ok(input)
}

fn print_help() {
    println!("commands:");
    println!("  <enter> | toggle      start, or reset if running");
    println!("  start | reset         explicit start / reset");
    println!("  work | break          switch phase (stops the timer)");
    println!("  profile <name>        junior | middle | senior");
    println!("  status | help | quit");
}

fn render_clock(timer: &TimerEngine) {
    let state = if timer.is_running() { "running" } else { "idle" };
    let mut out = std::io::stdout().lock();
    let _ = write!(
        out,
        "\r[{} | {} | {}] {}   ",
        timer.phase(),
        timer.profile(),
        state,
        format_clock(timer.remaining_secs())
    );
    let _ = out.flush();
}

fn describe(event: &Event) -> Option<String> {
    match event {
        Event::TimerStarted { phase, .. } => Some(format!("{phase} started")),
        Event::TimerReset { .. } => Some("timer reset".into()),
        Event::ProfileChanged { profile, .. } => Some(format!("profile: {profile}")),
        Event::PhaseChanged { phase, .. } => Some(format!("phase: {phase}")),
        _ => None,
    }
}

fn report_completion(completion: &Completion) {
    println!(
        "{} session complete ({})",
        completion.phase, completion.profile
    );
    for a in &completion.unlocked {
        println!("achievement unlocked: {}", achievement_line(a));
    }
}

async fn run_interactive(
    profile: Option<Profile>,
    start_with_break: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;

    let mut notifier = Notifier::new(
        TerminalNotifier {
            bell: config.notifications.bell,
        },
        config.notifications.permission,
    );
    if config.push.enabled {
        let relay = PushRelayClient::new(config.push.relay_url.as_str())?;
        notifier = notifier.with_push(relay, db.push_subscription()?);
    }

    let timer = TimerEngine::new(profile.unwrap_or(config.timer.default_profile));
    let mut session = Session::new(timer, ProgressEngine::load(db), notifier);
    if start_with_break {
        session.execute(Command::SetPhase(Phase::Break));
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ticker = Ticker::with_intervals(tx, DEFAULT_TICK_INTERVAL, config.rotation_interval());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    render_clock(session.timer());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Ok(Input::Quit) => break,
                    Ok(Input::Help) => print_help(),
                    Ok(Input::Status) => {
                        println!("{}", serde_json::to_string_pretty(&session.timer().snapshot())?);
                    }
                    Ok(Input::Command(command)) => {
                        if let Some(text) = session.execute(command).as_ref().and_then(describe) {
                            println!("{text}");
                        }
                        ticker.sync(session.timer());
                    }
                    Err(msg) => eprintln!("{msg}"),
                }
                render_clock(session.timer());
            }
            Some(signal) = rx.recv() => {
                if !ticker.is_current(&signal) {
                    continue;
                }
                match signal {
                    TickSignal::Countdown { .. } => {
                        if let Some(completion) = session.tick() {
                            println!();
                            report_completion(&completion);
                        }
                        ticker.sync(session.timer());
                    }
                    TickSignal::Message { text, .. } => println!("\n{text}"),
                }
                render_clock(session.timer());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    ticker.cancel();
    println!();
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            profile,
            start_with_break,
        } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_interactive(profile, start_with_break))
        }
        TimerAction::Profiles => {
            for profile in Profile::ALL {
                println!(
                    "{:<7} work {}  break {}",
                    profile.as_str(),
                    format_clock(profile.work_secs()),
                    format_clock(profile.break_secs())
                );
            }
            Ok(())
        }
    }
}
