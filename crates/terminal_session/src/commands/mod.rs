//! Builtin command registrations.

use std::{ops::RangeInclusive, rc::Rc};

use shell_engine::{ArgValidator, CommandRegistration};

use crate::context::SessionContext;

mod content;
mod messaging;
mod navigation;
mod profile;
mod system;

pub use messaging::MESSAGE_COOLDOWN_MS;

/// Payload action marker the `clear` command emits for the session layer.
pub const CLEAR_ACTION: &str = "clear";

/// Every builtin command, in registration order.
pub fn builtin_registrations() -> Vec<CommandRegistration<SessionContext>> {
    let mut registrations = vec![
        system::help_registration(),
        system::clear_registration(),
        system::history_registration(),
        system::echo_registration(),
        system::sudo_registration(),
    ];
    registrations.extend(profile::registrations());
    registrations.extend(content::registrations());
    registrations.extend(navigation::registrations());
    registrations.push(messaging::send_registration());
    registrations
}

/// Validator accepting argument counts within `range`.
pub(crate) fn arity(range: RangeInclusive<usize>) -> ArgValidator {
    Rc::new(move |args: &[String]| range.contains(&args.len()))
}

/// Renders a compact ASCII table for the transcript.
pub(crate) fn render_table(columns: &[&str], rows: Vec<Vec<String>>) -> String {
    use tabled::{builder::Builder, settings::Style};

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|column| column.to_string()));
    for row in rows {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}
