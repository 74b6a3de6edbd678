use std::fmt;

use crate::model::AccountType;

/// Where the UI should go next. Routing itself is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Home screen after signing in with the given account type.
    Dashboard(AccountType),
    /// Detail page of a student picked from the leaderboard.
    StudentDetail(String),
}

impl NavigationIntent {
    pub fn path(&self) -> String {
        match self {
            NavigationIntent::Dashboard(account_type) => format!("/{account_type}-dashboard"),
            NavigationIntent::StudentDetail(id) => {
                format!("/university-dashboard/student-detail/{id}")
            }
        }
    }
}

impl fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
