//! Message sending with a local cooldown guard.

use std::rc::Rc;

use platform_storage::unix_time_ms_now;
use shell_contract::{CommandDescriptor, DispatchOutcome, ShellError};
use shell_engine::CommandRegistration;

use crate::context::SessionContext;

/// Minimum gap between delivered messages. In-memory only; a reload resets
/// the window.
pub const MESSAGE_COOLDOWN_MS: u64 = 30_000;

pub(super) fn send_registration() -> CommandRegistration<SessionContext> {
    CommandRegistration::new(
        CommandDescriptor::new(
            "send",
            &["msg"],
            "Send me a short message.",
            "send <message...>",
        ),
        Rc::new(|args: Vec<String>, context: Rc<SessionContext>| {
            Box::pin(async move {
                let now = unix_time_ms_now();
                if let Some(last) = context.last_message_sent_ms.get() {
                    if now.saturating_sub(last) < MESSAGE_COOLDOWN_MS {
                        return Ok(DispatchOutcome::warning(
                            "easy there — give it a moment before sending another message",
                        ));
                    }
                }

                let Some(mailer) = context.mailer() else {
                    return Ok(DispatchOutcome::error(format!(
                        "message delivery is not available here; email {} instead",
                        context.portfolio.contact.email
                    )));
                };

                let body = args.join(" ");
                mailer(&body).map_err(|transport| {
                    ShellError::internal(format!("message delivery failed: {transport}"))
                })?;

                context.last_message_sent_ms.set(Some(now));
                Ok(DispatchOutcome::success("message sent — thank you!"))
            })
        }),
    )
    .with_validator(super::arity(1..=usize::MAX))
}
