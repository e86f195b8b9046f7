use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub leader: Option<String>,
    pub members: Vec<String>,
    pub progress: u8,
    pub commits: u32,
    pub additions: u32,
    pub deletions: u32,
    pub last_active: String,
    pub repo_url: String,
    pub tech: Vec<String>,
    pub activity_score: u8,
    pub sprint_velocity: u32,
    pub coverage: u8,
    pub open_prs: u32,
}

/// The fixed roster every run starts from. Ids are stable so analytics
/// caching and CLI lookups can key on them.
pub fn seeded_teams() -> Vec<Team> {
    vec![
        Team {
            id: "1".to_string(),
            name: "Team Quantum".to_string(),
            leader: Some("Alice Chen".to_string()),
            members: vec![
                "Alice Chen".to_string(),
                "Bob Smith".to_string(),
                "Charlie Brown".to_string(),
            ],
            progress: 85,
            commits: 65,
            additions: 1240,
            deletions: 320,
            last_active: "2h ago".to_string(),
            repo_url: "https://github.com/team/quantum".to_string(),
            tech: vec![
                "React".to_string(),
                "Node.js".to_string(),
                "MongoDB".to_string(),
            ],
            activity_score: 98,
            sprint_velocity: 42,
            coverage: 78,
            open_prs: 3,
        },
        Team {
            id: "2".to_string(),
            name: "Team Nebula".to_string(),
            leader: Some("Diana Prince".to_string()),
            members: vec![
                "Diana Prince".to_string(),
                "Eve Torres".to_string(),
                "Frank Castle".to_string(),
            ],
            progress: 72,
            commits: 42,
            additions: 890,
            deletions: 210,
            last_active: "5h ago".to_string(),
            repo_url: "https://github.com/team/nebula".to_string(),
            tech: vec![
                "Python".to_string(),
                "FastAPI".to_string(),
                "PostgreSQL".to_string(),
            ],
            activity_score: 76,
            sprint_velocity: 34,
            coverage: 82,
            open_prs: 5,
        },
        Team {
            id: "3".to_string(),
            name: "Team Phoenix".to_string(),
            leader: Some("Grace Hopper".to_string()),
            members: vec![
                "Grace Hopper".to_string(),
                "Henry Ford".to_string(),
                "Ivy Chen".to_string(),
            ],
            progress: 45,
            commits: 25,
            additions: 450,
            deletions: 120,
            last_active: "1d ago".to_string(),
            repo_url: "https://github.com/team/phoenix".to_string(),
            tech: vec![
                "Vue.js".to_string(),
                "Flask".to_string(),
                "SQLite".to_string(),
            ],
            activity_score: 52,
            sprint_velocity: 18,
            coverage: 45,
            open_prs: 7,
        },
    ]
}

/// Splits a comma-separated member list and makes sure the leader is on it.
/// A leader who is already listed stays where they are; otherwise they are
/// put first.
pub fn parse_members(input: &str, leader: &str) -> Vec<String> {
    let mut members: Vec<String> = input
        .split(',')
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();
    let leader = leader.trim();
    if !leader.is_empty() && !members.iter().any(|m| m == leader) {
        members.insert(0, leader.to_string());
    }
    members
}

/// Form state for the create-team dialog.
#[derive(Debug, Clone, Default)]
pub struct TeamDraft {
    pub name: String,
    pub repo_url: String,
    pub leader: String,
    pub members_input: String,
}

impl TeamDraft {
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Builds a fresh team with zeroed metrics. `next_index` is the
    /// one-based position the team will take in the roster.
    pub fn build(&self, next_index: usize) -> Team {
        let leader = self.leader.trim();
        Team {
            id: format!("team_{next_index}"),
            name: self.name.trim().to_string(),
            leader: if leader.is_empty() {
                None
            } else {
                Some(leader.to_string())
            },
            members: parse_members(&self.members_input, leader),
            progress: 0,
            commits: 0,
            additions: 0,
            deletions: 0,
            last_active: "Just now".to_string(),
            repo_url: self.repo_url.trim().to_string(),
            tech: vec!["JavaScript".to_string(), "React".to_string()],
            activity_score: 0,
            sprint_velocity: 0,
            coverage: 0,
            open_prs: 0,
        }
    }
}

/// Case-insensitive roster search over team names and member names.
pub fn filter_teams<'a>(teams: &'a [Team], query: &str) -> Vec<&'a Team> {
    let q = query.trim().to_lowercase();
    teams
        .iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&q)
                || t.members.iter().any(|m| m.to_lowercase().contains(&q))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterStats {
    pub groups: usize,
    pub commits: u32,
    pub avg_progress: u32,
    pub students: usize,
}

/// Headline numbers for the roster. Students are counted once even when
/// the same name appears on several teams.
pub fn roster_stats(teams: &[Team]) -> RosterStats {
    let groups = teams.len();
    let commits = teams.iter().map(|t| t.commits).sum();
    let avg_progress = if teams.is_empty() {
        0
    } else {
        let sum: f32 = teams.iter().map(|t| f32::from(t.progress)).sum();
        (sum / teams.len() as f32).round() as u32
    };
    let students = teams
        .iter()
        .flat_map(|t| t.members.iter())
        .collect::<HashSet<_>>()
        .len();
    RosterStats {
        groups,
        commits,
        avg_progress,
        students,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_leader_not_in_list_when_members_are_parsed_then_leader_is_first() {
        assert_eq!(
            parse_members("Bob, Carl", "Ana"),
            vec!["Ana", "Bob", "Carl"]
        );
    }

    #[test]
    fn given_leader_already_listed_when_members_are_parsed_then_list_is_unchanged() {
        assert_eq!(parse_members("Bob, Carl", "Bob"), vec!["Bob", "Carl"]);
    }

    #[test]
    fn given_messy_member_input_then_blanks_are_dropped_and_names_trimmed() {
        assert_eq!(
            parse_members("  Bob ,, Carl ,", ""),
            vec!["Bob", "Carl"]
        );
        assert_eq!(parse_members("", "Ana"), vec!["Ana"]);
        assert!(parse_members("", "").is_empty());
    }

    #[test]
    fn given_blank_name_then_draft_is_invalid() {
        let mut draft = TeamDraft::default();
        assert!(!draft.is_valid());
        draft.name = "   ".to_string();
        assert!(!draft.is_valid());
        draft.name = "Team Apollo".to_string();
        assert!(draft.is_valid());
    }

    #[test]
    fn given_valid_draft_when_built_then_metrics_start_at_zero() {
        let draft = TeamDraft {
            name: " Team Apollo ".to_string(),
            repo_url: "https://github.com/team/apollo".to_string(),
            leader: "Ana".to_string(),
            members_input: "Bob, Carl".to_string(),
        };
        let team = draft.build(4);
        assert_eq!(team.id, "team_4");
        assert_eq!(team.name, "Team Apollo");
        assert_eq!(team.leader.as_deref(), Some("Ana"));
        assert_eq!(team.members, vec!["Ana", "Bob", "Carl"]);
        assert_eq!(team.progress, 0);
        assert_eq!(team.commits, 0);
        assert_eq!(team.last_active, "Just now");
        assert_eq!(team.tech, vec!["JavaScript", "React"]);
    }

    #[test]
    fn given_query_matching_a_member_then_that_team_is_found() {
        let teams = seeded_teams();
        let hits = filter_teams(&teams, "eve");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Team Nebula");
    }

    #[test]
    fn given_query_matching_team_names_then_search_is_case_insensitive() {
        let teams = seeded_teams();
        assert_eq!(filter_teams(&teams, "QUANTUM").len(), 1);
        assert_eq!(filter_teams(&teams, "team").len(), 3);
        assert!(filter_teams(&teams, "zz").is_empty());
    }

    #[test]
    fn given_empty_query_then_every_team_matches() {
        let teams = seeded_teams();
        assert_eq!(filter_teams(&teams, "").len(), teams.len());
        assert_eq!(filter_teams(&teams, "   ").len(), teams.len());
    }

    #[test]
    fn roster_stats_sum_and_average_over_all_teams() {
        let stats = roster_stats(&seeded_teams());
        assert_eq!(stats.groups, 3);
        assert_eq!(stats.commits, 65 + 42 + 25);
        // (85 + 72 + 45) / 3 = 67.33 rounds down.
        assert_eq!(stats.avg_progress, 67);
        assert_eq!(stats.students, 9);
    }

    #[test]
    fn roster_stats_count_shared_members_once() {
        let mut teams = seeded_teams();
        let mut clone = teams[0].clone();
        clone.id = "4".to_string();
        clone.name = "Team Echo".to_string();
        teams.push(clone);

        let stats = roster_stats(&teams);
        assert_eq!(stats.groups, 4);
        assert_eq!(stats.students, 9);
    }

    #[test]
    fn roster_stats_on_empty_roster_are_zero() {
        let stats = roster_stats(&[]);
        assert_eq!(stats.groups, 0);
        assert_eq!(stats.commits, 0);
        assert_eq!(stats.avg_progress, 0);
        assert_eq!(stats.students, 0);
    }
}
