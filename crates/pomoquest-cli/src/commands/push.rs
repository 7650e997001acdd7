use clap::Subcommand;
use pomoquest_core::notify::PushRequest;
use pomoquest_core::{Config, Database, NotificationContent, Phase, PushRelayClient};

#[derive(Subcommand)]
pub enum PushAction {
    /// Store a push subscription (JSON as produced by the browser's PushManager)
    Subscribe {
        /// Subscription object as a JSON string
        subscription: String,
    },
    /// Print the stored subscription
    Show,
    /// Forget the stored subscription
    Clear,
    /// Send a completion notification through the relay right now
    Test {
        /// Use the break-finished message
        #[arg(long = "break")]
        is_break: bool,
    },
}

pub fn run(action: PushAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        PushAction::Subscribe { subscription } => {
            let value: serde_json::Value = serde_json::from_str(&subscription)?;
            if !value.is_object() {
                return Err("subscription must be a JSON object".into());
            }
            db.set_push_subscription(&value)?;
            println!("subscription saved");
        }
        PushAction::Show => match db.push_subscription()? {
            Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            None => println!("no subscription"),
        },
        PushAction::Clear => {
            db.clear_push_subscription()?;
            println!("subscription cleared");
        }
        PushAction::Test { is_break } => {
            let subscription = db
                .push_subscription()?
                .ok_or("no subscription stored; run `pomoquest push subscribe` first")?;
            let config = Config::load()?;
            let relay = PushRelayClient::new(config.push.relay_url.as_str())?;
            let request = PushRequest::new(
                subscription,
                &NotificationContent::push(Phase::from_is_break(is_break)),
            )?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(relay.send(&request))?;
            println!("push sent via {}", relay.relay_url());
        }
    }
    Ok(())
}
