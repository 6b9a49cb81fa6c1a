//! The interactive session: menus, prompts and dispatch into the core.
//!
//! The session owns the record store for the lifetime of the process. Input
//! validation and re-prompting happen here; the store only ever sees
//! well-formed calls. End of input at any prompt ends the session cleanly.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use classlink_core::clock::Clock;
use classlink_core::dashboard::{DashboardLayout, DashboardRenderer};
use classlink_core::model::{AttendanceEntry, AttendanceStatus};
use classlink_core::report::{ClassReport, ReportKind};
use classlink_core::store::{MAX_SCORE, MIN_SCORE};
use classlink_core::RecordStore;
use classlink_report::svg::write_svg;
use classlink_report::TextRenderer;

/// Main menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    RegisterPupil,
    TakeAttendance,
    CreateAssignment,
    EnterScores,
    ViewReports,
    OpenDashboard,
    Quit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 7] = [
        MenuCommand::RegisterPupil,
        MenuCommand::TakeAttendance,
        MenuCommand::CreateAssignment,
        MenuCommand::EnterScores,
        MenuCommand::ViewReports,
        MenuCommand::OpenDashboard,
        MenuCommand::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::RegisterPupil => "Register New Pupil",
            MenuCommand::TakeAttendance => "Take Attendance",
            MenuCommand::CreateAssignment => "Create Assignment",
            MenuCommand::EnterScores => "Enter Scores",
            MenuCommand::ViewReports => "View Reports",
            MenuCommand::OpenDashboard => "Open Dashboard",
            MenuCommand::Quit => "Quit",
        }
    }

    /// Parse a 1-based menu choice.
    pub fn from_choice(choice: &str) -> Option<Self> {
        menu_index(choice, Self::ALL.len()).map(|i| Self::ALL[i])
    }
}

/// Report menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCommand {
    Show(ReportKind),
    Back,
}

impl ReportCommand {
    pub const ALL: [ReportCommand; 4] = [
        ReportCommand::Show(ReportKind::Attendance),
        ReportCommand::Show(ReportKind::GradeSummary),
        ReportCommand::Show(ReportKind::AtRisk),
        ReportCommand::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportCommand::Show(ReportKind::Attendance) => "Attendance Report",
            ReportCommand::Show(ReportKind::GradeSummary) => "Grade Summary",
            ReportCommand::Show(ReportKind::AtRisk) => "Pupils Needing Help",
            ReportCommand::Back => "Return to Main Menu",
        }
    }

    pub fn from_choice(choice: &str) -> Option<Self> {
        menu_index(choice, Self::ALL.len()).map(|i| Self::ALL[i])
    }
}

fn menu_index(choice: &str, len: usize) -> Option<usize> {
    match choice.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Session settings taken from the configuration.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Dashboard heading.
    pub class_name: String,
    /// If set, "Open Dashboard" also writes `dashboard.svg` here.
    pub dashboard_dir: Option<PathBuf>,
}

/// One interactive session over a record store.
pub struct Session<R, W, C> {
    store: RecordStore,
    input: R,
    output: W,
    clock: C,
    options: SessionOptions,
}

/// Whether the session should keep going after a command.
enum Flow {
    Continue,
    Stop,
}

const BORDER_CHAR: &str = "»";
const BORDER_LEN: usize = 35;

impl<R: BufRead, W: Write, C: Clock> Session<R, W, C> {
    pub fn new(store: RecordStore, input: R, output: W, clock: C, options: SessionOptions) -> Self {
        Self {
            store,
            input,
            output,
            clock,
            options,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }

    /// Run the main menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        tracing::debug!(pupils = self.store.pupil_count(), "session started");
        writeln!(self.output, "«« ClassLink Pupil Management System »»")?;

        loop {
            let labels: Vec<&str> = MenuCommand::ALL.iter().map(|c| c.label()).collect();
            self.show_options(&labels)?;
            let Some(choice) = self.prompt("Choose option (1-7): ")? else {
                break;
            };

            let flow = match MenuCommand::from_choice(&choice) {
                Some(command) => self.dispatch(command)?,
                None => {
                    writeln!(self.output, "Invalid selection!")?;
                    Flow::Continue
                }
            };
            if let Flow::Stop = flow {
                break;
            }
        }

        tracing::debug!("session ended");
        Ok(())
    }

    fn dispatch(&mut self, command: MenuCommand) -> Result<Flow> {
        match command {
            MenuCommand::RegisterPupil => self.register_pupil(),
            MenuCommand::TakeAttendance => self.take_attendance(),
            MenuCommand::CreateAssignment => self.create_assignment(),
            MenuCommand::EnterScores => self.enter_scores(),
            MenuCommand::ViewReports => self.report_menu(),
            MenuCommand::OpenDashboard => self.open_dashboard(),
            MenuCommand::Quit => {
                writeln!(self.output, "Closing ClassLink...")?;
                Ok(Flow::Stop)
            }
        }
    }

    fn show_options(&mut self, items: &[&str]) -> Result<()> {
        let border = BORDER_CHAR.repeat(BORDER_LEN);
        writeln!(self.output, "\n{border}")?;
        for (idx, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, item)?;
        }
        writeln!(self.output, "{border}")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn register_pupil(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n«« Add New Pupil »»")?;
        let Some(id) = self.prompt("Create pupil ID: ")? else {
            return Ok(Flow::Stop);
        };
        if id.is_empty() {
            writeln!(self.output, "Pupil ID cannot be empty!")?;
            return Ok(Flow::Continue);
        }
        if self.store.pupil(&id).is_some() {
            writeln!(self.output, "ID already registered!")?;
            return Ok(Flow::Continue);
        }
        let Some(name) = self.prompt("Enter full name: ")? else {
            return Ok(Flow::Stop);
        };

        match self.store.add_pupil(id, name.as_str()) {
            Ok(()) => writeln!(self.output, "Added {name} successfully!")?,
            Err(e) => writeln!(self.output, "Could not add pupil: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn take_attendance(&mut self) -> Result<Flow> {
        let today = self.clock.today();
        if self.store.attendance_day(today).is_some() {
            writeln!(self.output, "Already marked attendance today!")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\n«« Attendance for {today} »»")?;
        let pupils = self.store.pupils().to_vec();
        let mut entries = Vec::with_capacity(pupils.len());
        for pupil in &pupils {
            let mut question = format!("{} present? (y/n): ", pupil.name);
            let status = loop {
                let Some(answer) = self.prompt(&question)? else {
                    writeln!(self.output, "Attendance not recorded.")?;
                    return Ok(Flow::Stop);
                };
                match answer.to_lowercase().as_str() {
                    "y" => break AttendanceStatus::Present,
                    "n" => break AttendanceStatus::Absent,
                    _ => question = "Please enter y or n: ".to_string(),
                }
            };
            entries.push(AttendanceEntry::new(pupil.id.clone(), status));
        }

        match self.store.record_attendance(today, entries) {
            Ok(()) => writeln!(self.output, "Attendance recorded!")?,
            Err(e) => writeln!(self.output, "Could not record attendance: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn create_assignment(&mut self) -> Result<Flow> {
        let Some(name) = self.prompt("\nNew assignment name: ")? else {
            return Ok(Flow::Stop);
        };
        if name.is_empty() {
            writeln!(self.output, "Assignment name cannot be empty!")?;
            return Ok(Flow::Continue);
        }
        if self.store.has_assignment(&name) {
            writeln!(self.output, "Assignment exists!")?;
            return Ok(Flow::Continue);
        }
        match self.store.add_assignment(name.as_str()) {
            Ok(()) => writeln!(self.output, "Added '{name}' to class work!")?,
            Err(e) => writeln!(self.output, "Could not add assignment: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn enter_scores(&mut self) -> Result<Flow> {
        if self.store.assignment_count() == 0 {
            writeln!(self.output, "No assignments available!")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "\nAvailable assignments:")?;
        let names: Vec<String> = self
            .store
            .assignments()
            .iter()
            .map(|a| a.name.clone())
            .collect();
        for (num, name) in names.iter().enumerate() {
            writeln!(self.output, "{}. {}", num + 1, name)?;
        }

        let Some(choice) = self.prompt("Choose assignment: ")? else {
            return Ok(Flow::Stop);
        };
        let Some(chosen) = menu_index(&choice, names.len()).map(|i| &names[i]) else {
            writeln!(self.output, "Invalid selection!")?;
            return Ok(Flow::Continue);
        };

        let pupils = self.store.pupils().to_vec();
        for pupil in &pupils {
            loop {
                let Some(raw) = self.prompt(&format!("Score for {} (0-100): ", pupil.name))? else {
                    return Ok(Flow::Stop);
                };
                let Ok(points) = raw.parse::<i32>() else {
                    writeln!(self.output, "Numbers only please!")?;
                    continue;
                };
                if !(MIN_SCORE..=MAX_SCORE).contains(&points) {
                    writeln!(self.output, "Score must be 0-100!")?;
                    continue;
                }
                match self.store.record_score(&pupil.id, chosen, points) {
                    Ok(()) => break,
                    Err(e) => {
                        writeln!(self.output, "Could not record score: {e}")?;
                        return Ok(Flow::Continue);
                    }
                }
            }
        }
        writeln!(self.output, "Scores recorded!")?;
        Ok(Flow::Continue)
    }

    fn report_menu(&mut self) -> Result<Flow> {
        loop {
            let labels: Vec<&str> = ReportCommand::ALL.iter().map(|c| c.label()).collect();
            self.show_options(&labels)?;
            let Some(choice) = self.prompt("Choose report (1-4): ")? else {
                return Ok(Flow::Stop);
            };

            match ReportCommand::from_choice(&choice) {
                Some(ReportCommand::Back) => return Ok(Flow::Continue),
                Some(ReportCommand::Show(kind)) => {
                    let report = ClassReport::build(kind, &self.store);
                    writeln!(self.output, "\n«« {} »»", kind.title())?;
                    write!(self.output, "{report}")?;
                    if self.prompt("\nPress Enter to continue...")?.is_none() {
                        return Ok(Flow::Stop);
                    }
                }
                None => writeln!(self.output, "Invalid choice!")?,
            }
        }
    }

    fn open_dashboard(&mut self) -> Result<Flow> {
        let layout = DashboardLayout::build(&self.store, &self.options.class_name);
        writeln!(self.output)?;
        write!(self.output, "{}", TextRenderer.render(&layout))?;

        if let Some(dir) = &self.options.dashboard_dir {
            let path = dir.join("dashboard.svg");
            match write_svg(&layout, &path) {
                Ok(()) => writeln!(self.output, "Dashboard saved to: {}", path.display())?,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "dashboard not saved: {e:#}");
                    writeln!(self.output, "Could not save dashboard: {e:#}")?;
                }
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use classlink_core::clock::FixedClock;
    use classlink_core::dashboard::DEFAULT_TITLE;
    use classlink_core::metrics::average;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn run_script(store: RecordStore, script: &str) -> (RecordStore, String) {
        let mut output = Vec::new();
        let options = SessionOptions {
            class_name: DEFAULT_TITLE.to_string(),
            dashboard_dir: None,
        };
        let mut session = Session::new(
            store,
            Cursor::new(script.as_bytes().to_vec()),
            &mut output,
            FixedClock(today()),
            options,
        );
        session.run().unwrap();
        let store = session.into_store();
        (store, String::from_utf8(output).unwrap())
    }

    #[test]
    fn menu_choices_parse() {
        assert_eq!(MenuCommand::from_choice("1"), Some(MenuCommand::RegisterPupil));
        assert_eq!(MenuCommand::from_choice(" 7 "), Some(MenuCommand::Quit));
        assert_eq!(MenuCommand::from_choice("0"), None);
        assert_eq!(MenuCommand::from_choice("8"), None);
        assert_eq!(MenuCommand::from_choice("quit"), None);
        assert_eq!(
            ReportCommand::from_choice("3"),
            Some(ReportCommand::Show(ReportKind::AtRisk))
        );
        assert_eq!(ReportCommand::from_choice("4"), Some(ReportCommand::Back));
    }

    #[test]
    fn register_pupil_and_reject_duplicate() {
        let (store, out) = run_script(RecordStore::new(), "1\nP1\nAda Lovelace\n1\nP1\n7\n");
        assert_eq!(store.pupil_count(), 1);
        assert_eq!(store.pupil("P1").unwrap().name, "Ada Lovelace");
        assert!(out.contains("Added Ada Lovelace successfully!"));
        assert!(out.contains("ID already registered!"));
        assert!(out.contains("Closing ClassLink..."));
    }

    #[test]
    fn attendance_reprompts_until_y_or_n() {
        let mut store = RecordStore::new();
        store.add_pupil("P1", "Ada").unwrap();
        store.add_pupil("P2", "Grace").unwrap();

        let (store, out) = run_script(store, "2\ny\nmaybe\nn\n2\n7\n");
        assert!(out.contains("Please enter y or n: "));
        assert!(out.contains("Attendance recorded!"));
        assert!(out.contains("Already marked attendance today!"));

        let day = store.attendance_day(today()).unwrap();
        assert_eq!(day.status_of("P1"), Some(AttendanceStatus::Present));
        assert_eq!(day.status_of("P2"), Some(AttendanceStatus::Absent));
    }

    #[test]
    fn interrupted_attendance_stores_nothing() {
        let mut store = RecordStore::new();
        store.add_pupil("P1", "Ada").unwrap();
        store.add_pupil("P2", "Grace").unwrap();

        let (store, out) = run_script(store, "2\ny\n");
        assert!(out.contains("Attendance not recorded."));
        assert_eq!(store.attendance_day_count(), 0);
    }

    #[test]
    fn scores_reprompt_on_bad_input() {
        let mut store = RecordStore::new();
        store.add_pupil("P1", "Ada").unwrap();
        store.add_pupil("P2", "Grace").unwrap();

        let script = "3\nEssay\n4\n1\nabc\n88\n150\n-5\n92\n7\n";
        let (store, out) = run_script(store, script);
        assert_eq!(out.matches("Score must be 0-100!").count(), 2);
        assert!(out.contains("Added 'Essay' to class work!"));
        assert!(out.contains("Numbers only please!"));
        assert!(out.contains("Score must be 0-100!"));
        assert!(out.contains("Scores recorded!"));
        assert_eq!(store.score("P1", "Essay"), Some(88));
        assert_eq!(store.score("P2", "Essay"), Some(92));
    }

    #[test]
    fn enter_scores_without_assignments() {
        let (_, out) = run_script(RecordStore::new(), "4\n7\n");
        assert!(out.contains("No assignments available!"));
    }

    #[test]
    fn duplicate_assignment_reported() {
        let mut store = RecordStore::new();
        store.add_assignment("Essay").unwrap();
        let (store, out) = run_script(store, "3\nEssay\n7\n");
        assert!(out.contains("Assignment exists!"));
        assert_eq!(store.assignment_count(), 1);
    }

    #[test]
    fn reports_menu_prints_reports() {
        let store = classlink_core::demo::demo_store(today()).unwrap();
        let (store, out) = run_script(store, "5\n1\n\n2\n\n3\n\n9\n4\n7\n");
        assert!(out.contains("«« Attendance Overview »»"));
        assert!(out.contains("2026-10-16: 2 present, 1 absent"));
        assert!(out.contains("Alex Brown (ID: P1001): 90.0 average"));
        assert!(out.contains("Taylor Green (ID: P1003) - Current average: 60.0"));
        assert!(out.contains("Invalid choice!"));
        assert_eq!(average(&store, "P1003"), 60.0);
    }

    #[test]
    fn dashboard_prints_tiles() {
        let store = classlink_core::demo::demo_store(today()).unwrap();
        let (_, out) = run_script(store, "6\n7\n");
        assert!(out.contains("Class Management Dashboard"));
        assert!(out.contains("Needing Help"));
        assert!(out.contains("Present 2026-10-16"));
    }

    #[test]
    fn dashboard_writes_svg_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        let options = SessionOptions {
            class_name: "Room 12".into(),
            dashboard_dir: Some(dir.path().to_path_buf()),
        };
        let mut session = Session::new(
            RecordStore::new(),
            Cursor::new(b"6\n7\n".to_vec()),
            &mut output,
            FixedClock(today()),
            options,
        );
        session.run().unwrap();

        let svg = std::fs::read_to_string(dir.path().join("dashboard.svg")).unwrap();
        assert!(svg.contains("Room 12"));
        assert!(String::from_utf8(output).unwrap().contains("Dashboard saved to:"));
    }

    #[test]
    fn failed_dashboard_save_keeps_session_running() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let mut output = Vec::new();
        let options = SessionOptions {
            class_name: DEFAULT_TITLE.to_string(),
            dashboard_dir: Some(blocker.join("out")),
        };
        let mut session = Session::new(
            RecordStore::new(),
            Cursor::new(b"1\nP1\nAda\n6\n1\nP2\nGrace\n7\n".to_vec()),
            &mut output,
            FixedClock(today()),
            options,
        );
        session.run().unwrap();
        let store = session.into_store();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Could not save dashboard:"));
        assert!(!out.contains("Dashboard saved to:"));
        assert!(out.contains("Closing ClassLink..."));
        assert_eq!(store.pupil_count(), 2);
    }

    #[test]
    fn invalid_selection_and_end_of_input() {
        let (_, out) = run_script(RecordStore::new(), "banana\n");
        assert!(out.contains("Invalid selection!"));
        assert!(!out.contains("Closing ClassLink..."));
    }
}
