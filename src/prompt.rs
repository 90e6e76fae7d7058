use crate::core::models::RetrievedContent;

/// Maximum number of content characters embedded in a prompt.
/// Video transcripts tend to be long, hence the generous cap.
pub const MAX_PROMPT_CONTENT_CHARS: usize = 15_000;

/// Returns at most `max_chars` characters from the start of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Builds the single summarization prompt sent to the model.
///
/// The template forbids invented facts, asks for jargon in plain words and
/// fixes the reply shape: a title line, exactly three bullet lines and one
/// closing comment line.
#[must_use]
pub fn build_summary_prompt(content: &RetrievedContent) -> String {
    let label = content.source_type.label();
    let body = truncate_chars(&content.text, MAX_PROMPT_CONTENT_CHARS);

    format!(
        "Summarize the following {label} so it can be shared in a family group chat.\n\
         \n\
         [Rules]\n\
         - Never make up facts that are not in the text.\n\
         - Explain technical terms in plain language.\n\
         - Reply using exactly this format:\n\
         \n\
         Title: [a title inferred from the content]\n\
         \n\
         Key points (3 lines):\n\
         ・[point 1]\n\
         ・[point 2]\n\
         ・[point 3]\n\
         \n\
         Comment: [one sentence for the family, or your impression of the {label}]\n\
         \n\
         [Text]\n\
         {body}\n"
    )
}
