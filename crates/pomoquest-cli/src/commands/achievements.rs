use clap::Subcommand;
use pomoquest_core::{Database, ProgressEngine};

use super::terminal::achievement_line;

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// List every achievement with its unlock state
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    let engine = ProgressEngine::load(Database::open()?);
    let states = engine.achievement_states();

    match action {
        AchievementsAction::List { json: true } => {
            println!("{}", serde_json::to_string_pretty(&states)?);
        }
        AchievementsAction::List { json: false } => {
            let p = engine.progress();
            println!(
                "today: {} | streak: {} | work: {} | breaks: {}",
                p.daily_work, p.streak, p.total_work, p.total_break
            );
            for a in &states {
                println!("{}", achievement_line(a));
            }
        }
    }
    Ok(())
}
