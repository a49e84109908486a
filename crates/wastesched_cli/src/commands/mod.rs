//! Subcommand handlers. Each returns `CommandResult`; `main` maps errors to
//! exit codes.

pub mod driver;
pub mod init;
pub mod resident;
pub mod schedule;
pub mod stop;
pub mod street;

use clap::ValueEnum;
use serde::Serialize;
use std::error::Error;
use wastesched_core::{CascadePlan, EntityKind, EntityRef, RepoError};

pub type CommandResult = Result<(), Box<dyn Error>>;

/// Listing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per row
    #[default]
    String,
    /// JSON array
    Json,
}

/// Prints `rows` as JSON or one `line(row)` per row.
pub fn print_rows<T: Serialize>(
    rows: &[T],
    format: OutputFormat,
    line: impl Fn(&T) -> String,
) -> CommandResult {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::String => {
            for row in rows {
                println!("{}", line(row));
            }
        }
    }
    Ok(())
}

pub fn not_found(kind: EntityKind, id: i64) -> RepoError {
    RepoError::NotFound(EntityRef::new(kind, id))
}

/// `Street 1 deleted (also removed: resident=1 schedule=1)`.
pub fn describe_delete(plan: &CascadePlan) -> String {
    let mut message = format!("{} {} deleted", plan.root.kind.label(), plan.root.id);

    let mut removed = plan.counts();
    if let Some(count) = removed.get_mut(&plan.root.kind) {
        *count -= 1;
    }
    removed.retain(|_, count| *count > 0);
    if !removed.is_empty() {
        let parts = removed
            .iter()
            .map(|(kind, count)| format!("{kind}={count}"))
            .collect::<Vec<_>>();
        message.push_str(&format!(" (also removed: {})", parts.join(" ")));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::describe_delete;
    use wastesched_core::{CascadePlan, EntityKind, EntityRef};

    #[test]
    fn describe_delete_lists_dependents_by_kind() {
        let root = EntityRef::new(EntityKind::Street, 1);
        let plan = CascadePlan {
            root,
            steps: vec![
                EntityRef::new(EntityKind::StopRequest, 1),
                EntityRef::new(EntityKind::Resident, 1),
                EntityRef::new(EntityKind::Resident, 2),
                root,
            ],
        };
        assert_eq!(
            describe_delete(&plan),
            "Street 1 deleted (also removed: resident=2 stop_request=1)"
        );
    }

    #[test]
    fn describe_delete_without_dependents_is_short() {
        let root = EntityRef::new(EntityKind::Driver, 3);
        let plan = CascadePlan {
            root,
            steps: vec![root],
        };
        assert_eq!(describe_delete(&plan), "Driver 3 deleted");
    }
}
