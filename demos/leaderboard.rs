//! Print the leaderboard of the university signed in under `./.skillonx`.
//!
//! Sign in first with `SKILLONX_EMAIL` and `SKILLONX_PASSWORD` set, or reuse
//! a session saved by an earlier run.

use skillonx_client::{
    podium, sign_in, AccountType, ApiClient, DeviceInfo, FileSessionStore, LeaderboardState,
    LeaderboardView, LoginForm, Session,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = ApiClient::from_env().unwrap();
    let mut session = Session::hydrate(FileSessionStore::new(".skillonx")).unwrap();

    if let (Ok(email), Ok(password)) = (
        std::env::var("SKILLONX_EMAIL"),
        std::env::var("SKILLONX_PASSWORD"),
    ) {
        let form = LoginForm::new(email, password, AccountType::University);
        match sign_in(&client, &mut session, &form, &DeviceInfo::detect()).await {
            Ok(intent) => println!("Signed in, continue at {intent}"),
            Err(err) => {
                eprintln!("{err}");
                return;
            }
        }
    }

    let mut view = LeaderboardView::mount(&client, &session);
    match view.settled().await {
        LeaderboardState::Loaded(entries) => {
            for (medal, entry) in podium(&entries) {
                println!("{medal:>6}  {} ({:.2}%)", entry.name, entry.score);
            }
            println!();
            for (rank, entry) in entries.iter().enumerate() {
                println!(
                    "#{:<3} {:<30} {:<30} {:>6.2}%  {} assessments from {} workshops",
                    rank + 1,
                    entry.name,
                    entry.email,
                    entry.score,
                    entry.assessment_count,
                    entry.workshop_count
                );
            }
        }
        LeaderboardState::Failed(message) => eprintln!("{message}"),
        LeaderboardState::Loading => unreachable!("settled state is never loading"),
    }
}
