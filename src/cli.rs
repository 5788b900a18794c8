//! Roster CLI - command-line front end for the collection view
//!
//! Each command drives the same session operations a graphical front end
//! would: load, search, create, edit, delete, export.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use student_roster::session::Confirm;
use student_roster::{
    AutoConfirm, DraftField, EntryForm, RosterApi, RosterSession, Student, StudentId,
};

/// Roster CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List students, newest first
    List {
        /// Only show students whose name contains this text (case-sensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a student
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        grade: String,
        /// Avatar image URL
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Edit a student; only the given fields change
    Edit {
        /// Student ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Delete a student permanently
    Delete {
        /// Student ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Export a student to PDF
    Export {
        /// Student ID
        id: String,
        /// Output directory (overrides config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

/// Prompts on stdin; anything but `y`/`yes` declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Execute a roster CLI command
pub async fn execute_command<A: RosterApi>(
    session: &mut RosterSession<A>,
    command: Commands,
    export_dir: PathBuf,
) -> anyhow::Result<String> {
    match command {
        Commands::List { search } => {
            session.load().await.context("failed to load students")?;
            if let Some(query) = search {
                session.search(query);
            }
            Ok(format_students(&session.visible()))
        }

        Commands::Add { name, age, address, grade, avatar } => {
            let mut form = EntryForm::new();
            form.name = name;
            form.age = age;
            form.address = address;
            form.grade = grade;
            form.avatar = avatar.unwrap_or_default();
            let student = session.create(&mut form).await?;
            Ok(format!("Student added: {}\n\n{}", student.id, format_student(&student)))
        }

        Commands::Edit { id, name, age, address, grade, avatar } => {
            let id = StudentId::from(id);
            session.load().await.context("failed to load students")?;
            session.begin_edit(&id)?;

            let changes = [
                (DraftField::Name, name),
                (DraftField::Age, age),
                (DraftField::Address, address),
                (DraftField::Grade, grade),
                (DraftField::Avatar, avatar),
            ];
            for (field, value) in changes {
                if let Some(value) = value {
                    session.edit_field(field, value);
                }
            }

            let student = session.save_edit().await?;
            Ok(format!("Student updated\n\n{}", format_student(&student)))
        }

        Commands::Delete { id, yes } => {
            let id = StudentId::from(id);
            let deleted = if yes {
                session.delete(&id, &AutoConfirm(true)).await?
            } else {
                session.delete(&id, &StdinConfirm).await?
            };

            if deleted {
                Ok(format!("Student {} deleted", id))
            } else {
                Ok("Delete cancelled".to_string())
            }
        }

        Commands::Export { id, out_dir } => {
            let id = StudentId::from(id);
            session.load().await.context("failed to load students")?;
            let path = session.export(&id, &out_dir.unwrap_or(export_dir))?;
            Ok(format!("Exported to {}", path.display()))
        }
    }
}

/// Format the visible students for display
fn format_students(students: &[&Student]) -> String {
    if students.is_empty() {
        return "No students found.".to_string();
    }

    let mut output = String::new();
    output.push_str("Student List\n");
    output.push_str("============\n\n");

    for student in students {
        output.push_str(&format!("[{}]\n", student.id));
        output.push_str(&format_student(student));
        output.push('\n');
    }

    output
}

fn format_student(student: &Student) -> String {
    let mut output = String::new();
    output.push_str(&format!("  Name:       {}\n", student.name));
    output.push_str(&format!("  Age:        {}\n", student.age));
    output.push_str(&format!("  Address:    {}\n", student.address));
    output.push_str(&format!("  Grade:      {}\n", student.grade));
    output.push_str(&format!("  Avatar:     {}\n", student.avatar_url()));
    output.push_str(&format!("  Created At: {}\n", student.created_at_display()));
    output
}
