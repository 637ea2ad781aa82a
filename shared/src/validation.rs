use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("title cannot be empty")]
    Empty,
    #[error("title cannot exceed 100 characters")]
    TooLong,
}

/// Checks a task title and returns it trimmed.
///
/// Length is counted in characters, not bytes.
pub fn validate_title(title: &str) -> Result<&str, TitleError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Empty);
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(TitleError::TooLong);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_titles_are_empty() {
        for title in ["", " ", "\t\n  "] {
            assert_eq!(validate_title(title), Err(TitleError::Empty));
        }
    }

    #[test]
    fn accepts_one_to_hundred_characters() {
        assert_eq!(validate_title("a"), Ok("a"));
        let hundred = "x".repeat(MAX_TITLE_CHARS);
        assert_eq!(validate_title(&hundred), Ok(hundred.as_str()));
    }

    #[test]
    fn rejects_more_than_hundred_characters() {
        let long = "x".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(validate_title(&long), Err(TitleError::TooLong));
    }

    #[test]
    fn surrounding_whitespace_does_not_count() {
        let padded = format!("   {}   ", "y".repeat(MAX_TITLE_CHARS));
        assert_eq!(validate_title(&padded).map(str::len), Ok(MAX_TITLE_CHARS));
    }

    #[test]
    fn multibyte_titles_are_counted_by_character() {
        let title = "任".repeat(MAX_TITLE_CHARS);
        assert!(validate_title(&title).is_ok());
    }

    #[test]
    fn messages_match_the_inline_error_text() {
        assert_eq!(TitleError::Empty.to_string(), "title cannot be empty");
        assert_eq!(
            TitleError::TooLong.to_string(),
            "title cannot exceed 100 characters"
        );
    }
}
