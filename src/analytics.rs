use crate::teams::Team;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;

pub const GUIDE_TIMELINE_DAYS: u32 = 30;
pub const GUIDE_DAILY_COMMITS: RangeInclusive<u32> = 5..=19;
pub const STUDENT_WEEK_COMMITS: RangeInclusive<u32> = 3..=15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub commits: u32,
}

/// Derives one rng seed per team from the process seed. The refresh nonce
/// is folded in so that a manual refresh reshuffles the numbers while
/// everything else in the session stays put.
pub fn team_seed(base: u64, team_id: &str, nonce: u64) -> u64 {
    let mut seed = base ^ nonce.wrapping_mul(0x9e37_79b9_7f4a_7c15);
    for byte in team_id.bytes() {
        seed = seed.wrapping_mul(31).wrapping_add(u64::from(byte));
    }
    seed
}

/// Daily commit counts for the `days` days ending at `today`, oldest first.
/// Same seed, same series.
pub fn commit_timeline(
    seed: u64,
    today: NaiveDate,
    days: u32,
    counts: RangeInclusive<u32>,
) -> Vec<TimelinePoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..days)
        .map(|i| TimelinePoint {
            date: today - Duration::days(i64::from(days - 1 - i)),
            commits: rng.random_range(counts.clone()),
        })
        .collect()
}

pub fn weekly_timeline(seed: u64, today: NaiveDate) -> Vec<TimelinePoint> {
    commit_timeline(seed, today, 7, STUDENT_WEEK_COMMITS)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorRow {
    pub name: String,
    pub progress: u8,
    pub commits: u32,
    pub additions: u32,
    pub deletions: u32,
    pub activity_score: u8,
}

// progress, commits, additions, deletions, activity score. Members past the
// third share the last row.
const CONTRIBUTOR_BASELINES: [(u8, u32, u32, u32, u8); 3] = [
    (85, 65, 1240, 320, 98),
    (72, 42, 890, 210, 76),
    (45, 25, 450, 120, 52),
];

/// Fixed per-member breakdown, assigned by roster position.
pub fn contributor_rows(members: &[String]) -> Vec<ContributorRow> {
    members
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let (progress, commits, additions, deletions, activity_score) =
                CONTRIBUTOR_BASELINES[i.min(CONTRIBUTOR_BASELINES.len() - 1)];
            ContributorRow {
                name: name.clone(),
                progress,
                commits,
                additions,
                deletions,
                activity_score,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total_commits: u32,
    pub total_contributors: usize,
    pub total_additions: u32,
    pub total_deletions: u32,
    pub active_days: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamAnalytics {
    pub summary: AnalyticsSummary,
    pub contributors: Vec<ContributorRow>,
    pub timeline: Vec<TimelinePoint>,
}

impl TeamAnalytics {
    /// Dashboard variant: summary numbers mirror the team record, member
    /// rows come from the fixed baselines, and only the 30-day timeline
    /// draws from the seeded rng.
    pub fn generate(team: &Team, seed: u64, today: NaiveDate) -> Self {
        Self {
            summary: AnalyticsSummary {
                total_commits: team.commits,
                total_contributors: team.members.len(),
                total_additions: team.additions,
                total_deletions: team.deletions,
                active_days: 22,
            },
            contributors: contributor_rows(&team.members),
            timeline: commit_timeline(seed, today, GUIDE_TIMELINE_DAYS, GUIDE_DAILY_COMMITS),
        }
    }
}

/// Score a contributor's footprint on a 0 to 100 scale.
pub fn activity_score(commits: u32, additions: u32) -> u8 {
    (commits * 2 + additions / 100).min(100) as u8
}

/// Console variant: everything is drawn from the seeded rng, so repeated
/// runs with the same seed print the same report.
pub fn random_analytics(team: &Team, seed: u64, today: NaiveDate) -> TeamAnalytics {
    let mut rng = StdRng::seed_from_u64(seed);
    let summary = AnalyticsSummary {
        total_commits: rng.random_range(50..=200),
        total_contributors: team.members.len(),
        total_additions: rng.random_range(500..=3000),
        total_deletions: rng.random_range(100..=1000),
        active_days: rng.random_range(15..=30),
    };
    let contributors = team
        .members
        .iter()
        .map(|name| {
            let commits = rng.random_range(10..=80);
            let additions = rng.random_range(200..=1500);
            let deletions = rng.random_range(50..=500);
            let score = activity_score(commits, additions);
            ContributorRow {
                name: name.clone(),
                progress: score,
                commits,
                additions,
                deletions,
                activity_score: score,
            }
        })
        .collect();
    let timeline = commit_timeline(
        rng.random(),
        today,
        GUIDE_TIMELINE_DAYS,
        GUIDE_DAILY_COMMITS,
    );
    TeamAnalytics {
        summary,
        contributors,
        timeline,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Warning,
    Success,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
    pub time: &'static str,
}

/// The canned coaching notes shown next to a team's analytics.
pub fn team_insights(team: &Team) -> Vec<Insight> {
    let mut insights = Vec::new();
    if team.members.len() >= 2 {
        let top = &team.members[0];
        let partner = team.members.get(2).unwrap_or(&team.members[1]);
        insights.push(Insight {
            kind: InsightKind::Warning,
            message: format!(
                "{top} has 40% more commits than team average. \
                 Consider pairing with {partner} for knowledge sharing."
            ),
            time: "Just now",
        });
    }
    insights.push(Insight {
        kind: InsightKind::Success,
        message: "Team velocity increased by 15% this sprint. Great progress!".to_string(),
        time: "10m ago",
    });
    insights.push(Insight {
        kind: InsightKind::Tip,
        message: format!(
            "Code coverage is at {}%. Focus on adding tests.",
            team.coverage
        ),
        time: "1h ago",
    });
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::seeded_teams;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn given_same_seed_then_timeline_is_identical() {
        let today = day(2026, 8, 26);
        let a = commit_timeline(7, today, 30, GUIDE_DAILY_COMMITS);
        let b = commit_timeline(7, today, 30, GUIDE_DAILY_COMMITS);
        assert_eq!(a, b);
    }

    #[test]
    fn given_different_seeds_then_timelines_differ() {
        let today = day(2026, 8, 26);
        let a = commit_timeline(1, today, 30, GUIDE_DAILY_COMMITS);
        let b = commit_timeline(2, today, 30, GUIDE_DAILY_COMMITS);
        assert_ne!(a, b);
    }

    #[test]
    fn timeline_runs_oldest_to_newest_and_ends_today() {
        let today = day(2026, 8, 26);
        let series = commit_timeline(42, today, 30, GUIDE_DAILY_COMMITS);
        assert_eq!(series.len(), 30);
        assert_eq!(series[0].date, today - Duration::days(29));
        assert_eq!(series[29].date, today);
        for pair in series.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }

    #[test]
    fn contributor_rows_follow_roster_position() {
        let members: Vec<String> = ["Ana", "Bob", "Carl", "Dana"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = contributor_rows(&members);
        assert_eq!(rows.len(), 4);
        assert_eq!((rows[0].progress, rows[0].commits), (85, 65));
        assert_eq!((rows[1].progress, rows[1].commits), (72, 42));
        assert_eq!((rows[2].progress, rows[2].commits), (45, 25));
        // Fourth member shares the last baseline.
        assert_eq!((rows[3].progress, rows[3].commits), (45, 25));
        assert_eq!(rows[0].activity_score, 98);
    }

    #[test]
    fn dashboard_summary_mirrors_the_team_record() {
        let teams = seeded_teams();
        let data = TeamAnalytics::generate(&teams[0], 9, day(2026, 8, 26));
        assert_eq!(data.summary.total_commits, 65);
        assert_eq!(data.summary.total_contributors, 3);
        assert_eq!(data.summary.total_additions, 1240);
        assert_eq!(data.summary.total_deletions, 320);
        assert_eq!(data.summary.active_days, 22);
        assert_eq!(data.timeline.len(), 30);
    }

    #[test]
    fn refresh_nonce_changes_the_derived_seed() {
        assert_ne!(team_seed(99, "1", 0), team_seed(99, "1", 1));
        assert_ne!(team_seed(99, "1", 0), team_seed(99, "2", 0));
        assert_eq!(team_seed(99, "1", 0), team_seed(99, "1", 0));
    }

    #[test]
    fn activity_score_is_capped_at_one_hundred() {
        assert_eq!(activity_score(10, 200), 22);
        assert_eq!(activity_score(80, 1500), 100);
        assert_eq!(activity_score(0, 0), 0);
    }

    #[test]
    fn insights_name_the_first_and_third_member() {
        let teams = seeded_teams();
        let insights = team_insights(&teams[0]);
        assert_eq!(insights.len(), 3);
        assert!(insights[0].message.contains("Alice Chen"));
        assert!(insights[0].message.contains("Charlie Brown"));
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert!(insights[2].message.contains("78%"));
    }

    #[test]
    fn insights_survive_small_teams() {
        let mut team = seeded_teams().remove(0);
        team.members.truncate(1);
        // No pairing note when there is nobody to pair with.
        assert_eq!(team_insights(&team).len(), 2);
        team.members.push("Bea".to_string());
        let insights = team_insights(&team);
        assert_eq!(insights.len(), 3);
        assert!(insights[0].message.contains("Bea"));
    }

    proptest! {
        #[test]
        fn timeline_counts_stay_in_range(seed in any::<u64>()) {
            let today = day(2026, 8, 26);
            for point in commit_timeline(seed, today, 30, GUIDE_DAILY_COMMITS) {
                prop_assert!((5..=19).contains(&point.commits));
            }
            for point in weekly_timeline(seed, today) {
                prop_assert!((3..=15).contains(&point.commits));
            }
        }

        #[test]
        fn random_analytics_is_deterministic_per_seed(seed in any::<u64>()) {
            let teams = seeded_teams();
            let today = day(2026, 8, 26);
            let a = random_analytics(&teams[1], seed, today);
            let b = random_analytics(&teams[1], seed, today);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn random_summary_stays_in_range(seed in any::<u64>()) {
            let teams = seeded_teams();
            let data = random_analytics(&teams[2], seed, day(2026, 8, 26));
            prop_assert!((50..=200).contains(&data.summary.total_commits));
            prop_assert!((500..=3000).contains(&data.summary.total_additions));
            prop_assert!((100..=1000).contains(&data.summary.total_deletions));
            prop_assert!((15..=30).contains(&data.summary.active_days));
            for row in &data.contributors {
                prop_assert!((10..=80).contains(&row.commits));
                prop_assert!((200..=1500).contains(&row.additions));
                prop_assert!((50..=500).contains(&row.deletions));
                prop_assert_eq!(
                    row.activity_score,
                    activity_score(row.commits, row.additions)
                );
            }
        }
    }
}
