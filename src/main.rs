use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod accounts;
mod analytics;
mod board;
mod calendar;
mod gui;
mod logging;
mod routes;
mod session;
mod settings;
mod teams;
mod theme;

use accounts::AccountDirectory;
use analytics::{random_analytics, team_seed, TeamAnalytics, TimelinePoint};
use session::{Role, SessionStore};
use settings::{default_base_path, ensure_base_folders, load_or_init_settings, save_settings};
use teams::{seeded_teams, Team};

#[derive(Parser, Debug)]
#[command(
    name = "devai-dashboard",
    version,
    about = "DevAI project dashboard mockup (local-first, synthetic data)"
)]
struct CliArgs {
    /// Choose GUI (default) or CLI mode
    #[arg(long, value_enum, default_value = "gui")]
    mode: RunMode,
    /// Override data base path (defaults to ./data next to the exe)
    #[arg(long)]
    base_path: Option<PathBuf>,
    /// Fix the rng seed so generated analytics repeat across runs
    #[arg(long)]
    seed: Option<u64>,
    /// Log at debug level
    #[arg(long)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RunMode {
    Gui,
    Cli,
}

fn main() {
    let args = CliArgs::parse();
    let base_path = args.base_path.clone().unwrap_or_else(default_base_path);

    if let Err(e) = ensure_base_folders(&base_path) {
        eprintln!(
            "Failed to create base folders at {}: {}",
            base_path.display(),
            e
        );
        return;
    }

    if let Err(e) = logging::init(&base_path, args.verbose) {
        eprintln!("Failed to set up logging: {}", e);
        return;
    }

    let mut settings = match load_or_init_settings(&base_path) {
        Ok(s) => s,
        Err(e) => {
            log::error!("failed to load settings: {e}");
            return;
        }
    };

    log::info!("using data path {}", base_path.display());

    settings.base_path = base_path.to_string_lossy().to_string();
    settings.mode = match args.mode {
        RunMode::Gui => "gui".to_string(),
        RunMode::Cli => "cli".to_string(),
    };

    // One seed per process. All generated numbers in this run derive from
    // it, so passing --seed makes a session reproducible.
    let seed = args
        .seed
        .unwrap_or_else(|| chrono::Utc::now().timestamp() as u64);
    log::debug!("session seed {seed}");

    match args.mode {
        RunMode::Gui => {
            // Persist the launch mode now; while it runs the app saves its
            // own settings edits, and a save here afterwards would clobber
            // them.
            if let Err(e) = save_settings(&settings, &base_path) {
                log::warn!("could not save settings: {e}");
            }
            if let Err(e) = gui::launch_gui(base_path, settings, seed) {
                log::error!("failed to start the GUI: {e}");
            }
        }
        RunMode::Cli => {
            run_cli(&base_path, seed);
            if let Err(e) = save_settings(&settings, &base_path) {
                log::warn!("could not save settings: {e}");
            }
        }
    }
}

fn run_cli(base_path: &Path, seed: u64) {
    let mut session = SessionStore::new(base_path);
    session.restore();
    let mut directory = AccountDirectory::with_seed_accounts();
    let teams = seeded_teams();
    let today = chrono::Local::now().date_naive();

    println!("DevAI dashboard CLI");
    println!("Data path: {}", base_path.display());
    println!("Type 'help' for commands, 'exit' to quit.\n");

    loop {
        let who = session
            .current()
            .map(|u| u.display_name.clone())
            .unwrap_or_else(|| "guest".to_string());
        print!("devai ({})> ", who);
        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Error reading input. Exiting.");
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") {
            println!("Goodbye");
            break;
        }

        if input.eq_ignore_ascii_case("help") {
            print_cli_help();
            continue;
        }

        if input.eq_ignore_ascii_case("teams") {
            print_team_table(&teams);
            continue;
        }

        if let Some(rest) = input.strip_prefix("analytics ") {
            let team_id = rest.trim();
            match teams.iter().find(|t| t.id == team_id) {
                Some(team) => {
                    let report = random_analytics(team, team_seed(seed, &team.id, 0), today);
                    print_analytics(team, &report);
                }
                None => println!("No team with id '{}'. Try 'teams' first.", team_id),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("login ") {
            let email = rest.trim();
            if email.is_empty() {
                println!("Usage: login <email>");
                continue;
            }
            let identity = directory.login(email).to_identity();
            println!("Signed in as {} ({})", identity.display_name, identity.role);
            if let Err(e) = session.set_identity(identity) {
                println!("Session will not survive a restart: {}", e);
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("register ") {
            let mut parts = rest.trim().split_whitespace();
            let email = parts.next().unwrap_or("").to_string();
            let role = match parts.next() {
                Some("guide") => Role::Guide,
                Some("student") => Role::Student,
                _ => {
                    println!("Usage: register <email> <guide|student>");
                    continue;
                }
            };
            if email.is_empty() {
                println!("Usage: register <email> <guide|student>");
                continue;
            }
            let identity = directory.register(&email, role).to_identity();
            println!("Registered {} as {}", identity.email, identity.role);
            if let Err(e) = session.set_identity(identity) {
                println!("Session will not survive a restart: {}", e);
            }
            continue;
        }

        if input.eq_ignore_ascii_case("whoami") {
            match session.current() {
                Some(user) => println!("{} ({}) <{}>", user.display_name, user.role, user.email),
                None => println!("Not signed in."),
            }
            continue;
        }

        if input.eq_ignore_ascii_case("logout") {
            match session.clear() {
                Ok(()) => println!("Signed out."),
                Err(e) => println!("Signed out, but: {}", e),
            }
            continue;
        }

        println!("Unknown command. Type 'help' for the list.");
    }
}

fn print_cli_help() {
    println!("Commands:");
    println!("  teams                    list the seeded teams");
    println!("  analytics <team_id>      print a synthetic activity report");
    println!("  login <email>            sign in (unknown emails get provisioned)");
    println!("  register <email> <role>  create an account as guide or student");
    println!("  whoami                   show the current session");
    println!("  logout                   clear the stored session");
    println!("  exit                     quit");
}

fn print_team_table(teams: &[Team]) {
    println!();
    println!(
        "{:<6} | {:<14} | {:<14} | {:>8} | {:>7} | {:>7} | {:>5} | {}",
        "ID", "Team", "Leader", "Progress", "Commits", "Members", "Score", "Last push"
    );
    println!("{}", "-".repeat(91));
    for team in teams {
        println!(
            "{:<6} | {:<14} | {:<14} | {:>7}% | {:>7} | {:>7} | {:>4}% | {}",
            truncate_for_table(&team.id, 6),
            truncate_for_table(&team.name, 14),
            truncate_for_table(team.leader.as_deref().unwrap_or("-"), 14),
            team.progress,
            team.commits,
            team.members.len(),
            team.activity_score,
            team.last_active,
        );
    }
    println!();
}

fn print_analytics(team: &Team, report: &TeamAnalytics) {
    let s = &report.summary;
    println!();
    println!("{} activity report", team.name);
    println!(
        "  {} commits from {} contributors, +{} -{}, {} active days",
        s.total_commits, s.total_contributors, s.total_additions, s.total_deletions, s.active_days
    );
    println!();
    for row in &report.contributors {
        println!(
            "  {:<14} {:>3}% | {:>4} commits | +{:<5} -{:<5} | activity {}",
            truncate_for_table(&row.name, 14),
            row.progress,
            row.commits,
            row.additions,
            row.deletions,
            row.activity_score,
        );
    }
    println!();
    println!("  last 30 days: {}", sparkline(&report.timeline));
    println!();
}

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn sparkline(points: &[TimelinePoint]) -> String {
    let max = points.iter().map(|p| p.commits).max().unwrap_or(0).max(1);
    points
        .iter()
        .map(|p| SPARK_LEVELS[(p.commits as usize * (SPARK_LEVELS.len() - 1)) / max as usize])
        .collect()
}

fn truncate_for_table(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i >= max_len - 1 {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
