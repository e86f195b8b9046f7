use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "#ffde22",
            TaskStatus::InProgress => "#ff8928",
            TaskStatus::Review => "#ff414e",
            TaskStatus::Done => "#10b981",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TaskPriority::Low => "#ffde22",
            TaskPriority::Medium => "#ff8928",
            TaskPriority::High => "#ff414e",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub comments: u32,
}

/// Form state for the add-task dialog. Resets to a medium-priority blank
/// after a successful submit.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
}

/// The sprint board. Tasks only move between columns through explicit
/// status edits; ids are handed out from a counter so they stay unique
/// within a session.
pub struct TaskBoard {
    tasks: Vec<Task>,
    next_id: usize,
}

impl TaskBoard {
    pub fn with_seed_tasks() -> Self {
        let tasks = vec![
            Task {
                id: "1".to_string(),
                title: "Design authentication flow".to_string(),
                description: "Create login and signup pages with validation".to_string(),
                status: TaskStatus::Todo,
                priority: TaskPriority::High,
                assignee: Some("Alice".to_string()),
                due_date: NaiveDate::from_ymd_opt(2024, 3, 20),
                comments: 3,
            },
            Task {
                id: "2".to_string(),
                title: "Implement API endpoints".to_string(),
                description: "Create REST endpoints for user management".to_string(),
                status: TaskStatus::InProgress,
                priority: TaskPriority::High,
                assignee: Some("Bob".to_string()),
                due_date: NaiveDate::from_ymd_opt(2024, 3, 22),
                comments: 5,
            },
            Task {
                id: "3".to_string(),
                title: "Code review for PR #42".to_string(),
                description: "Review authentication middleware".to_string(),
                status: TaskStatus::Review,
                priority: TaskPriority::Medium,
                assignee: Some("Charlie".to_string()),
                due_date: NaiveDate::from_ymd_opt(2024, 3, 18),
                comments: 2,
            },
            Task {
                id: "4".to_string(),
                title: "Update documentation".to_string(),
                description: "Add setup instructions to README".to_string(),
                status: TaskStatus::Done,
                priority: TaskPriority::Low,
                assignee: Some("Alice".to_string()),
                due_date: NaiveDate::from_ymd_opt(2024, 3, 15),
                comments: 1,
            },
        ];
        let next_id = tasks.len() + 1;
        Self { tasks, next_id }
    }

    pub fn tasks_in(&self, status: TaskStatus) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    pub fn count_in(&self, status: TaskStatus) -> usize {
        self.tasks_in(status).count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Adds a task from the draft. Drafts with a blank title are rejected
    /// and leave the board untouched. New tasks always start in To Do,
    /// unassigned and with no comments.
    pub fn add_task(&mut self, draft: &TaskDraft) -> bool {
        if draft.title.trim().is_empty() {
            return false;
        }
        self.tasks.push(Task {
            id: self.next_id.to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            status: TaskStatus::Todo,
            priority: draft.priority,
            assignee: None,
            due_date: None,
            comments: 0,
        });
        self.next_id += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_board_has_one_task_per_column() {
        let board = TaskBoard::with_seed_tasks();
        assert_eq!(board.len(), 4);
        for status in TaskStatus::ALL {
            assert_eq!(board.count_in(status), 1);
        }
    }

    #[test]
    fn given_blank_title_when_adding_then_board_is_unchanged() {
        let mut board = TaskBoard::with_seed_tasks();
        let draft = TaskDraft {
            title: "   ".to_string(),
            description: "does not matter".to_string(),
            priority: TaskPriority::High,
        };
        assert!(!board.add_task(&draft));
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn given_valid_draft_when_adding_then_task_lands_in_todo() {
        let mut board = TaskBoard::with_seed_tasks();
        let draft = TaskDraft {
            title: "  Wire up CI  ".to_string(),
            description: "run tests on every push".to_string(),
            priority: TaskPriority::Low,
        };
        assert!(board.add_task(&draft));
        assert_eq!(board.count_in(TaskStatus::Todo), 2);

        let added = board
            .tasks_in(TaskStatus::Todo)
            .find(|t| t.title == "Wire up CI")
            .unwrap();
        assert_eq!(added.id, "5");
        assert_eq!(added.comments, 0);
        assert_eq!(added.assignee, None);
        assert_eq!(added.due_date, None);
        assert_eq!(added.priority, TaskPriority::Low);
    }

    #[test]
    fn added_tasks_get_increasing_ids() {
        let mut board = TaskBoard::with_seed_tasks();
        let draft = TaskDraft {
            title: "one".to_string(),
            ..TaskDraft::default()
        };
        board.add_task(&draft);
        let draft = TaskDraft {
            title: "two".to_string(),
            ..TaskDraft::default()
        };
        board.add_task(&draft);

        let ids: Vec<&str> = board
            .tasks_in(TaskStatus::Todo)
            .map(|t| t.id.as_str())
            .collect();
        assert!(ids.contains(&"5"));
        assert!(ids.contains(&"6"));
    }

    #[test]
    fn default_draft_priority_is_medium() {
        assert_eq!(TaskDraft::default().priority, TaskPriority::Medium);
    }
}
