//! Usage: Form submit handlers (greeting demo, timer creation).

use super::bridge::HostError;
use super::session::ShellSession;
use crate::domain::clock::ClockReading;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerSubmission {
    /// Input element missing or its text exactly empty; nothing was sent.
    Skipped,
    Created(ClockReading),
}

/// Parses a leading base-10 integer the way a lenient `parseInt` does: leading whitespace
/// (including a byte order mark), optional sign, then digits up to the first non-digit.
/// `None` means "not a number" (no digits, or too large for `i64`).
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let digits = &rest[..end];
    let value = if negative {
        format!("-{digits}").parse::<i64>()
    } else {
        digits.parse::<i64>()
    };
    value.ok()
}

impl ShellSession {
    pub async fn submit_greeting(&self) -> Result<(), HostError> {
        let (Some(input), Some(message)) = (self.bindings.greet_input, self.bindings.greet_msg)
        else {
            return Ok(());
        };

        let name = self.document.input_value(input.id()).unwrap_or_default();
        let greeting = self
            .host
            .greet(&name)
            .await
            .inspect_err(|err| self.record_failure("greet", err))?;
        self.record_success("greet");

        self.document.set_text_content(message.id(), &greeting);
        Ok(())
    }

    /// The input is forwarded without range checks; the host decides what it accepts.
    pub async fn submit_timer(&self) -> Result<TimerSubmission, HostError> {
        let Some(input) = self.bindings.timer_input else {
            return Ok(TimerSubmission::Skipped);
        };
        let text = self.document.input_value(input.id()).unwrap_or_default();
        if text.is_empty() {
            return Ok(TimerSubmission::Skipped);
        }

        let seconds = parse_int_prefix(&text);
        let timer = self
            .host
            .push_timer(seconds)
            .await
            .inspect_err(|err| self.record_failure("push_timer", err))?;
        self.record_success("push_timer");

        self.append_timer(&timer);
        Ok(TimerSubmission::Created(timer))
    }
}
