use thiserror::Error;

/// Rejected value of the "select N rows" form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowCountError {
    #[error("Enter the number of rows to select")]
    Empty,

    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("The number of rows cannot be negative")]
    Negative,

    #[error("At most {max} rows can be selected at once")]
    TooLarge { max: usize },
}

/// Parse the bulk selection input. `0` is accepted and selects nothing.
pub fn parse_row_count(raw: &str, max_rows: usize) -> Result<usize, RowCountError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(RowCountError::Empty);
    }
    if let Some(rest) = text.strip_prefix('-') {
        return if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            Err(RowCountError::Negative)
        } else {
            Err(RowCountError::NotANumber(text.to_string()))
        };
    }
    let digits = text.strip_prefix('+').unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(RowCountError::NotANumber(text.to_string()));
    }
    match digits.parse::<usize>() {
        Ok(n) if n > max_rows => Err(RowCountError::TooLarge { max: max_rows }),
        Ok(n) => Ok(n),
        // only overflow is left at this point
        Err(_) => Err(RowCountError::TooLarge { max: max_rows }),
    }
}
