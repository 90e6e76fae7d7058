use crate::core::models::IncomingMessage;

/// Returns true when the message mentions the bot by name.
///
/// The match is a plain, case-sensitive substring test so the name can sit
/// anywhere in the message ("hey bot, read this").
#[must_use]
pub fn is_triggered(text: &str, trigger_name: &str) -> bool {
    !trigger_name.is_empty() && text.contains(trigger_name)
}

/// Keeps only messages that mention the bot.
#[must_use]
pub fn filter_triggered_messages(
    messages: Vec<IncomingMessage>,
    trigger_name: &str,
) -> Vec<IncomingMessage> {
    messages
        .into_iter()
        .filter(|msg| is_triggered(&msg.text, trigger_name))
        .collect()
}
