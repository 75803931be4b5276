use super::AppState;
use crate::error::{CoordinatorError, CoordinatorResult, RosterFileError};
use crate::protocol::ServerMessage;
use crate::types::*;
use serde::Deserialize;
use std::path::Path;

/// Ordered set of teams. Names are unique and compared case-sensitively.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teams: Vec<Team>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// All teams in insertion order, reserved names included
    pub fn list(&self) -> Vec<Team> {
        self.teams.clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t.name == name)
    }

    pub fn add(&mut self, name: &str) -> CoordinatorResult<Team> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoordinatorError::InvalidName);
        }
        if self.contains(name) {
            return Err(CoordinatorError::DuplicateName(name.to_string()));
        }
        let team = Team::new(name.to_string());
        self.teams.push(team.clone());
        Ok(team)
    }

    /// Names are matched after trimming, like `add` stores them
    pub fn remove(&mut self, name: &str) -> CoordinatorResult<Team> {
        let name = name.trim();
        let index = self
            .teams
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| CoordinatorError::NotFound(name.to_string()))?;
        Ok(self.teams.remove(index))
    }

    /// Names eligible for the wheel (reserved names dropped), insertion order
    pub fn eligible(&self) -> Vec<TeamName> {
        self.teams
            .iter()
            .filter(|t| !t.excluded)
            .map(|t| t.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Entry of a `teams.json` file
#[derive(Debug, Deserialize)]
struct TeamFileEntry {
    team_name: String,
}

/// Read team names from a `[{"team_name": "..."}]` file.
///
/// A missing file is not an error and yields no teams.
pub async fn load_teams_file(path: &Path) -> Result<Vec<TeamName>, RosterFileError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Teams file {} not found, starting with an empty roster", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(RosterFileError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let entries: Vec<TeamFileEntry> =
        serde_json::from_str(&content).map_err(|source| RosterFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(entries.into_iter().map(|e| e.team_name).collect())
}

impl AppState {
    /// Seed the roster at startup. Duplicates and blank names are skipped.
    /// Returns the number of teams added. Does not broadcast.
    pub async fn seed_teams(&self, names: impl IntoIterator<Item = TeamName>) -> usize {
        let mut board = self.board.write().await;
        let mut added = 0;
        for name in names {
            match board.roster.add(&name) {
                Ok(_) => added += 1,
                Err(e) => tracing::warn!("Skipping team {:?} while seeding: {}", name, e),
            }
        }
        added
    }

    /// Full roster in insertion order
    pub async fn list_teams(&self) -> Vec<Team> {
        self.board.read().await.roster.list()
    }

    /// Roster minus reserved names
    pub async fn eligible_teams(&self) -> Vec<TeamName> {
        self.board.read().await.roster.eligible()
    }

    /// Remove a team. Allowed for any role.
    ///
    /// Broadcasts `roster_changed` on success; failures go to the caller only.
    pub async fn request_remove_team(
        &self,
        session: &Session,
        name: &str,
    ) -> CoordinatorResult<Vec<Team>> {
        let mut board = self.board.write().await;

        if board.round.in_progress() {
            return Err(CoordinatorError::Conflict(format!(
                "Cannot remove {} while a spin is in progress",
                name
            )));
        }

        let removed = board.roster.remove(name)?;
        let teams = board.roster.list();
        tracing::info!(
            connection_id = %session.connection_id,
            role = ?session.role,
            "Removed team {:?} ({} left)",
            removed.name,
            teams.len()
        );

        self.broadcast_to_all(ServerMessage::RosterChanged {
            teams: teams.clone(),
        });
        Ok(teams)
    }

    /// Add a team (admin only). Broadcasts `roster_changed` on success.
    pub async fn request_add_team(&self, session: &Session, name: &str) -> CoordinatorResult<Team> {
        if !session.role.is_admin() {
            return Err(CoordinatorError::Forbidden("add teams"));
        }

        let mut board = self.board.write().await;
        let team = board.roster.add(name)?;
        tracing::info!(
            connection_id = %session.connection_id,
            "Added team {:?} (excluded: {})",
            team.name,
            team.excluded
        );

        self.broadcast_to_all(ServerMessage::RosterChanged {
            teams: board.roster.list(),
        });
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn roster_of(names: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for name in names {
            roster.add(name).unwrap();
        }
        roster
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let roster = roster_of(&["Red", "Blue", "Green"]);
        let names: Vec<_> = roster.list().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Red", "Blue", "Green"]);
    }

    #[test]
    fn test_add_rejects_duplicates_case_sensitively() {
        let mut roster = roster_of(&["Red"]);
        assert_eq!(
            roster.add("Red"),
            Err(CoordinatorError::DuplicateName("Red".to_string()))
        );
        assert!(roster.add("red").is_ok());
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_add_rejects_blank_names() {
        let mut roster = Roster::new();
        assert_eq!(roster.add("   "), Err(CoordinatorError::InvalidName));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_remove_missing_team_leaves_roster_untouched() {
        let mut roster = roster_of(&["Red", "Blue"]);
        assert_eq!(
            roster.remove("Green"),
            Err(CoordinatorError::NotFound("Green".to_string()))
        );
        assert_eq!(roster.len(), 2);

        let removed = roster.remove("Red").unwrap();
        assert_eq!(removed.name, "Red");
        assert_eq!(roster.eligible(), vec!["Blue"]);
    }

    #[test]
    fn test_remove_matches_trimmed_name() {
        let mut roster = roster_of(&["Red", "Blue"]);
        let removed = roster.remove("  Red ").unwrap();
        assert_eq!(removed.name, "Red");
        assert_eq!(
            roster.remove(" Green "),
            Err(CoordinatorError::NotFound("Green".to_string()))
        );
        assert_eq!(roster.eligible(), vec!["Blue"]);
    }

    #[test]
    fn test_eligible_excludes_feedback_teams() {
        let roster = roster_of(&["A", "FeedbackForm", "B"]);
        assert_eq!(roster.eligible(), vec!["A", "B"]);
        // Still listed
        assert_eq!(roster.list().len(), 3);
        assert!(roster.list()[1].excluded);
    }

    #[tokio::test]
    async fn test_load_teams_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"team_name": "Red"}}, {{"team_name": "Feedback"}}, {{"team_name": "Blue"}}]"#
        )
        .unwrap();

        let names = load_teams_file(file.path()).await.unwrap();
        assert_eq!(names, vec!["Red", "Feedback", "Blue"]);
    }

    #[tokio::test]
    async fn test_load_missing_teams_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let names = load_teams_file(&dir.path().join("teams.json")).await.unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_teams_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = load_teams_file(file.path()).await;
        assert!(matches!(result, Err(RosterFileError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_seed_teams_skips_duplicates() {
        let state = AppState::new();
        let added = state
            .seed_teams(vec!["Red".to_string(), "Red".to_string(), "Blue".to_string()])
            .await;
        assert_eq!(added, 2);
        assert_eq!(state.eligible_teams().await, vec!["Red", "Blue"]);
    }

    #[tokio::test]
    async fn test_add_team_requires_admin() {
        let state = AppState::new();
        let participant = Session::new(Role::Participant);
        let admin = Session::new(Role::Admin);

        assert_eq!(
            state.request_add_team(&participant, "Red").await,
            Err(CoordinatorError::Forbidden("add teams"))
        );
        assert!(state.list_teams().await.is_empty());

        let mut rx = state.subscribe();
        let team = state.request_add_team(&admin, "Red").await.unwrap();
        assert_eq!(team.name, "Red");
        match rx.try_recv() {
            Ok(ServerMessage::RosterChanged { teams }) => assert_eq!(teams, vec![team]),
            other => panic!("Expected RosterChanged, got {:?}", other),
        }
    }
}
