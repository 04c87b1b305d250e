use super::ApiError;
use crate::domain::SearchCriteria;

pub const MAX_RANDOM_COUNT: usize = 100;
pub const MAX_RECOMMENDATIONS: usize = 50;

/// Trims and requires a value; `field` names it in the error message.
pub fn require_field(value: Option<&str>, field: &str) -> Result<String, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| ApiError::validation(format!("{field} is required")))
}

pub fn validate_search_query(query: &str) -> Result<&str, ApiError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Search query cannot be empty"));
    }
    Ok(trimmed)
}

/// Maps `?by=` and `?q=` onto search criteria. `by` defaults to `name`.
pub fn parse_search_criteria(by: Option<&str>, query: &str) -> Result<SearchCriteria, ApiError> {
    let query = validate_search_query(query)?;

    match by.map(str::trim).unwrap_or("name") {
        "name" => Ok(SearchCriteria::ByName(query.to_string())),
        "letter" => {
            let mut chars = query.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) if letter.is_alphabetic() => {
                    Ok(SearchCriteria::ByFirstLetter(letter))
                }
                _ => Err(ApiError::validation(
                    "Letter search expects a single letter",
                )),
            }
        }
        "category" => Ok(SearchCriteria::ByCategory(query.to_string())),
        "area" => Ok(SearchCriteria::ByArea(query.to_string())),
        "ingredient" => Ok(SearchCriteria::ByIngredient(query.to_string())),
        other => Err(ApiError::validation(format!(
            "Unknown search kind '{other}'. Use name, letter, category, area or ingredient"
        ))),
    }
}

pub fn validate_count(count: usize, max: usize) -> Result<usize, ApiError> {
    if !(1..=max).contains(&count) {
        return Err(ApiError::validation(format!(
            "Invalid count: {count}. Must be between 1 and {max}"
        )));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert_eq!(require_field(Some(" u1 "), "userId").unwrap(), "u1");
        assert!(require_field(Some("  "), "userId").is_err());
        assert!(require_field(None, "userId").is_err());
    }

    #[test]
    fn test_parse_search_criteria() {
        assert_eq!(
            parse_search_criteria(None, "curry").unwrap(),
            SearchCriteria::ByName("curry".to_string())
        );
        assert_eq!(
            parse_search_criteria(Some("letter"), "b").unwrap(),
            SearchCriteria::ByFirstLetter('b')
        );
        assert_eq!(
            parse_search_criteria(Some("area"), "Italian").unwrap(),
            SearchCriteria::ByArea("Italian".to_string())
        );
        assert!(parse_search_criteria(Some("letter"), "ab").is_err());
        assert!(parse_search_criteria(Some("colour"), "red").is_err());
        assert!(parse_search_criteria(None, "   ").is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(validate_count(1, MAX_RANDOM_COUNT).is_ok());
        assert!(validate_count(0, MAX_RANDOM_COUNT).is_err());
        assert!(validate_count(MAX_RANDOM_COUNT + 1, MAX_RANDOM_COUNT).is_err());
    }
}
