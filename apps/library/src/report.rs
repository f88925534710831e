use std::io::Write;

use storage::SnapshotStore;

use crate::commands::LibraryCommand;
use crate::controller::{CommandOutcome, Controller};

/// Run one command and print its outcome, followed by the table when the
/// catalog may have changed or was asked for.
pub fn write_report<P, W>(
    output: &mut W,
    controller: &mut Controller<P>,
    command: &LibraryCommand,
) -> std::io::Result<CommandOutcome>
where
    P: SnapshotStore,
    W: Write,
{
    let outcome = controller.dispatch(command.clone());
    if let Some(message) = outcome.message() {
        writeln!(output, "{message}")?;
    }
    let changed = command.mutates()
        && !outcome.is_rejection()
        && !matches!(outcome, CommandOutcome::NoSuchRow { .. });
    if changed || matches!(command, LibraryCommand::List) {
        write!(output, "{}", controller.view().table())?;
    }
    Ok(outcome)
}
