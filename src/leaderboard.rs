//! Leaderboard screen state: fetch rankings for the signed-in university and
//! rank them.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::client::ApiClient;
use crate::model::LeaderboardEntry;
use crate::navigation::NavigationIntent;
use crate::ranking::rank_students;
use crate::session::{Identity, Session, SessionStore};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load rankings";
pub const NOT_SIGNED_IN_MESSAGE: &str = "You are not signed in";

/// What the leaderboard shows. Exactly one of these at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderboardState {
    Loading,
    Failed(String),
    Loaded(Vec<LeaderboardEntry>),
}

impl LeaderboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LeaderboardState::Loading)
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        match self {
            LeaderboardState::Loaded(entries) => entries,
            _ => &[],
        }
    }
}

/// A mounted leaderboard.
///
/// Mounting starts a single rankings fetch on the current tokio runtime.
/// The fetch belongs to the view: unmounting or dropping it aborts the
/// request, and a response that arrives afterwards is never applied.
#[derive(Debug)]
pub struct LeaderboardView {
    state: watch::Receiver<LeaderboardState>,
    task: Option<JoinHandle<()>>,
}

impl LeaderboardView {
    /// Mount the view for the session's signed-in user.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount<S: SessionStore>(client: &ApiClient, session: &Session<S>) -> Self {
        match session.identity() {
            Some(identity) => Self::mount_for(client.clone(), identity),
            None => {
                warn!("leaderboard mounted without a signed-in user");
                let (_, state) =
                    watch::channel(LeaderboardState::Failed(NOT_SIGNED_IN_MESSAGE.to_string()));
                Self { state, task: None }
            }
        }
    }

    fn mount_for(client: ApiClient, identity: Identity) -> Self {
        let (tx, state) = watch::channel(LeaderboardState::Loading);
        let task = tokio::spawn(async move {
            let outcome = load(&client, &identity).await;
            // Nobody is listening once the view is gone.
            let _ = tx.send(outcome);
        });
        Self {
            state,
            task: Some(task),
        }
    }

    /// The current state.
    pub fn state(&self) -> LeaderboardState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<LeaderboardState> {
        self.state.clone()
    }

    /// Wait until the fetch has finished one way or the other.
    pub async fn settled(&mut self) -> LeaderboardState {
        match self.state.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // The fetch task is gone without publishing a result.
            Err(_) => LeaderboardState::Failed(LOAD_FAILED_MESSAGE.to_string()),
        }
    }

    /// The navigation intent for clicking the row at `index`.
    pub fn select(&self, index: usize) -> Option<NavigationIntent> {
        let state = self.state.borrow();
        state
            .entries()
            .get(index)
            .and_then(|entry| entry.id.clone())
            .map(NavigationIntent::StudentDetail)
    }

    /// Tear the view down, aborting a fetch that is still in flight.
    pub fn unmount(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!("aborting in-flight rankings fetch");
            }
            task.abort();
        }
    }
}

impl Drop for LeaderboardView {
    fn drop(&mut self) {
        self.abort();
    }
}

#[instrument(skip(client, identity), fields(university_id = %identity.user_id))]
async fn load(client: &ApiClient, identity: &Identity) -> LeaderboardState {
    match client
        .get_student_rankings(&identity.user_id, &identity.token)
        .await
    {
        Ok(students) => {
            let entries = rank_students(&students);
            debug!(
                students = students.len(),
                ranked = entries.len(),
                "leaderboard ready"
            );
            LeaderboardState::Loaded(entries)
        }
        Err(err) => {
            warn!(error = %err, "failed to load rankings");
            LeaderboardState::Failed(err.user_message().unwrap_or(LOAD_FAILED_MESSAGE).to_string())
        }
    }
}
