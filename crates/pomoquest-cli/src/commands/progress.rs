use clap::Subcommand;
use pomoquest_core::{Database, Phase, Profile, ProgressEngine};

use super::terminal::achievement_line;

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Print the stored progress record as JSON
    Show,
    /// Record a completed session without running the timer
    Complete {
        /// Record a break instead of a work session
        #[arg(long = "break")]
        is_break: bool,
        /// Profile the session ran under
        #[arg(long, default_value = "middle")]
        profile: Profile,
    },
}

pub fn run(action: ProgressAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = ProgressEngine::load(Database::open()?);

    match action {
        ProgressAction::Show => {}
        ProgressAction::Complete { is_break, profile } => {
            let unlocked = engine.complete_session(Phase::from_is_break(is_break), profile);
            for a in &unlocked {
                eprintln!("achievement unlocked: {}", achievement_line(a));
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(engine.progress())?);
    Ok(())
}
