use std::borrow::Cow;
use validator::ValidationError;

pub const MAX_TITLE_CHARS: usize = 200;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Rejects empty and whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "must not be blank"));
    }
    Ok(())
}

/// Post titles: not blank, at most [`MAX_TITLE_CHARS`] once trimmed.
pub fn valid_title(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if value.trim().chars().count() > MAX_TITLE_CHARS {
        return Err(invalid("too_long", "must be at most 200 characters"));
    }
    Ok(())
}

/// Splits a comma separated tag field. Segments are trimmed and empty ones
/// dropped, so `"a, ,b,"` gives `["a", "b"]`.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
