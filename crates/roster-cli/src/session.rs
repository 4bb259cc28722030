//! Interactive session: admin setup, role choice, and the two menu loops.

use std::io::{BufRead, Write};

use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::debug;

use roster_core::validate::{is_confirmed, optional_field, parse_marks, parse_optional_marks};
use roster_core::{
    CredentialStore, DeleteOutcome, JsonStore, RecordError, RosterConfig, Student, StudentPatch,
    StudentRepository,
};

use crate::console::Console;
use crate::menu::{AdminCommand, Role, UserCommand};

const CHOICE_PROMPT: &str = "Enter your choice: ";
const INVALID_MARKS: &str = "Invalid marks! Please enter a number.";

/// One run of the program against a pair of store files.
pub struct Session<R, W> {
    console: Console<R, W>,
    credentials: CredentialStore,
    students: JsonStore<Vec<Student>>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, config: &RosterConfig) -> Self {
        Self {
            console,
            credentials: CredentialStore::at(&config.admin_file),
            students: JsonStore::new(&config.student_file),
        }
    }

    /// Set up the admin if needed, load students, then serve one role.
    pub fn run(&mut self) -> Result<()> {
        self.ensure_admin()?;
        let mut repo = StudentRepository::open(self.students.clone());
        debug!(count = repo.len(), "students loaded");

        self.console.say(Role::MENU)?;
        let choice = self.console.prompt(CHOICE_PROMPT)?;
        match Role::from_choice(&choice) {
            Some(Role::Admin) if self.verify_admin()? => self.admin_menu(&mut repo),
            Some(Role::User) => self.user_menu(&repo),
            _ => {
                self.console.say("Invalid selection! Exiting...")?;
                Ok(())
            }
        }
    }

    /// Prompt for a first password when no admin exists.
    fn ensure_admin(&mut self) -> Result<()> {
        if self.credentials.is_configured() {
            return Ok(());
        }

        self.console.say("No admin found. Setting up admin account.")?;
        let password = self.console.prompt("Set Admin Password: ")?;
        self.credentials.setup(&password);
        self.console.say("Admin account created successfully!")?;
        Ok(())
    }

    fn verify_admin(&mut self) -> Result<bool> {
        self.ensure_admin()?;

        let password = self.console.prompt("Enter Admin Password: ")?;
        if self.credentials.verify(&password) {
            self.console.say("Admin login successful!\n")?;
            Ok(true)
        } else {
            self.console.say("Incorrect password! Access denied.")?;
            Ok(false)
        }
    }

    fn admin_menu(&mut self, repo: &mut StudentRepository) -> Result<()> {
        loop {
            self.console.say(AdminCommand::MENU)?;
            let choice = self.console.prompt(CHOICE_PROMPT)?;
            let Some(command) = AdminCommand::from_choice(&choice) else {
                self.console.say("Invalid choice, please try again.")?;
                continue;
            };

            match command {
                AdminCommand::Add => self.add_student(repo)?,
                AdminCommand::List => self.display_students(repo)?,
                AdminCommand::Search => self.search_students(repo)?,
                AdminCommand::Delete => self.delete_student(repo)?,
                AdminCommand::Update => self.update_student(repo)?,
                AdminCommand::Logout => {
                    self.console.say("Logging out...")?;
                    return Ok(());
                }
            }
        }
    }

    fn user_menu(&mut self, repo: &StudentRepository) -> Result<()> {
        loop {
            self.console.say(UserCommand::MENU)?;
            let choice = self.console.prompt(CHOICE_PROMPT)?;
            match UserCommand::from_choice(&choice) {
                Some(UserCommand::List) => self.display_students(repo)?,
                Some(UserCommand::Search) => self.search_students(repo)?,
                Some(UserCommand::Exit) => {
                    self.console.say("Exiting...")?;
                    return Ok(());
                }
                None => self.console.say("Invalid choice, please try again.")?,
            }
        }
    }

    fn add_student(&mut self, repo: &mut StudentRepository) -> Result<()> {
        let id = self.console.prompt("Enter student ID: ")?;
        if repo.contains(&id) {
            self.console.say("Error: Student ID already exists!")?;
            return Ok(());
        }

        let name = self.console.prompt("Enter student name: ")?;
        let course = self.console.prompt("Enter student course: ")?;
        let marks = loop {
            let input = self.console.prompt("Enter student marks (numeric): ")?;
            match parse_marks(&input) {
                Ok(marks) => break marks,
                Err(_) => self.console.say(INVALID_MARKS)?,
            }
        };

        match repo.add(Student::new(id, name, course, marks)) {
            Ok(_) => {
                self.console.say("Student added successfully!\n")?;
                self.warn_if_unsaved(repo)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn display_students(&mut self, repo: &StudentRepository) -> Result<()> {
        if repo.is_empty() {
            self.console.say("No students found.")?;
            return Ok(());
        }

        self.console.say("\nStudent Records:")?;
        let rows: Vec<&Student> = repo.list().iter().collect();
        self.console.say(student_table(&rows))?;
        Ok(())
    }

    fn search_students(&mut self, repo: &StudentRepository) -> Result<()> {
        let query = self.console.prompt("Enter student ID or Name to search: ")?;
        let found = repo.search(&query);
        if found.is_empty() {
            self.console.say("Student not found!")?;
        } else {
            self.console.say("\nSearch Results:")?;
            self.console.say(student_table(&found))?;
        }
        Ok(())
    }

    fn delete_student(&mut self, repo: &mut StudentRepository) -> Result<()> {
        let id = self.console.prompt("Enter student ID to delete: ")?;
        let Some(student) = repo.find(&id) else {
            return self.report(&RecordError::NotFound(id));
        };

        let question = format!(
            "Are you sure you want to delete {} (ID: {})? (yes/no): ",
            student.name, student.id
        );
        let answer = self.console.prompt(&question)?;

        match repo.delete(&id, |_| is_confirmed(&answer)) {
            Ok(DeleteOutcome::Deleted(_)) => {
                self.console.say("Student deleted successfully!\n")?;
                self.warn_if_unsaved(repo)?;
            }
            Ok(DeleteOutcome::Cancelled) => self.console.say("Deletion cancelled.")?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn update_student(&mut self, repo: &mut StudentRepository) -> Result<()> {
        let id = self.console.prompt("Enter student ID to update: ")?;
        let Some(current) = repo.find(&id).cloned() else {
            return self.report(&RecordError::NotFound(id));
        };

        self.console.say("\nLeave blank to keep the existing value.")?;
        let name = self
            .console
            .prompt(&format!("Enter new name ({}): ", current.name))?;
        let course = self
            .console
            .prompt(&format!("Enter new course ({}): ", current.course))?;
        let marks = loop {
            let input = self
                .console
                .prompt(&format!("Enter new marks ({}): ", current.marks))?;
            match parse_optional_marks(&input) {
                Ok(marks) => break marks,
                Err(_) => self.console.say(INVALID_MARKS)?,
            }
        };

        let patch = StudentPatch {
            name: optional_field(&name),
            course: optional_field(&course),
            marks,
        };
        match repo.update(&id, patch) {
            Ok(_) => {
                self.console.say("Student updated successfully!\n")?;
                self.warn_if_unsaved(repo)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn report(&mut self, error: &RecordError) -> Result<()> {
        let message = match error {
            RecordError::DuplicateId(_) => "Error: Student ID already exists!",
            RecordError::NotFound(_) => "Error: Student not found!",
        };
        self.console.say(message)?;
        Ok(())
    }

    fn warn_if_unsaved(&mut self, repo: &StudentRepository) -> Result<()> {
        if !repo.last_save_ok() {
            self.console
                .say("Warning: changes could not be saved to disk.")?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.console.into_output()
    }
}

/// Render students as a table in the given order.
fn student_table(students: &[&Student]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Course", "Marks"]);
    for s in students {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(&s.name),
            Cell::new(&s.course),
            Cell::new(s.marks),
        ]);
    }
    table
}
