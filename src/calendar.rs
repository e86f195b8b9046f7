use chrono::{Datelike, Months, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Meeting,
    Review,
    Deadline,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Meeting => "meeting",
            EventKind::Review => "review",
            EventKind::Deadline => "deadline",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            EventKind::Meeting => "#ffde22",
            EventKind::Review => "#ff8928",
            EventKind::Deadline => "#ff414e",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub kind: EventKind,
    pub participants: Vec<String>,
}

fn event(
    id: &str,
    title: &str,
    date: Option<NaiveDate>,
    time: &str,
    kind: EventKind,
    participants: &[&str],
) -> Option<CalendarEvent> {
    Some(CalendarEvent {
        id: id.to_string(),
        title: title.to_string(),
        date: date?,
        time: time.to_string(),
        kind,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    })
}

/// The fixed sprint schedule shown on the calendar tab.
pub fn seeded_events() -> Vec<CalendarEvent> {
    [
        event(
            "1",
            "Sprint Planning",
            NaiveDate::from_ymd_opt(2024, 3, 18),
            "10:00 AM",
            EventKind::Meeting,
            &["Alice", "Bob", "Charlie"],
        ),
        event(
            "2",
            "Code Review",
            NaiveDate::from_ymd_opt(2024, 3, 19),
            "2:00 PM",
            EventKind::Review,
            &["Alice", "Bob"],
        ),
        event(
            "3",
            "Project Deadline",
            NaiveDate::from_ymd_opt(2024, 3, 25),
            "11:59 PM",
            EventKind::Deadline,
            &[],
        ),
        event(
            "4",
            "Sprint Retrospective",
            NaiveDate::from_ymd_opt(2024, 3, 22),
            "3:00 PM",
            EventKind::Meeting,
            &["Alice", "Bob", "Charlie"],
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.date == date).collect()
}

/// One displayed month. Internally pinned to the first day so month
/// arithmetic can never land mid-month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn prev_month(&mut self) {
        if let Some(first) = self.first.checked_sub_months(Months::new(1)) {
            self.first = first;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(first) = self.first.checked_add_months(Months::new(1)) {
            self.first = first;
        }
    }

    /// Number of empty cells before day 1 in a Sunday-first week grid.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => next.signed_duration_since(self.first).num_days() as u32,
            None => 30,
        }
    }

    /// Grid cells row by row: `None` for the leading blanks, then one
    /// `Some(date)` per day of the month.
    pub fn grid(&self) -> Vec<Option<NaiveDate>> {
        let mut cells: Vec<Option<NaiveDate>> =
            (0..self.leading_blanks()).map(|_| None).collect();
        for day in 1..=self.days_in_month() {
            cells.push(self.first.with_day(day));
        }
        cells
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.first.year() && date.month() == self.first.month()
    }
}
