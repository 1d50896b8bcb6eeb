use crate::errors::AppError;
use crate::models::Person;

/// Checks if the nationality of the ingeschrevenpersoon is Dutch.
///
/// Returns `"true"` when at least one entry has omschrijving `Nederlandse`
/// or code `0001`, `"false"` otherwise. A record without a `nationaliteiten`
/// field is an input error; callers wanting graceful degradation treat that
/// as `"false"` themselves.
pub fn check_dutch_nationality(person: &Person) -> Result<String, AppError> {
    let entries = person.nationaliteiten.as_ref().ok_or_else(|| {
        AppError::InvalidInput("ingeschrevenpersoon has no nationaliteiten field".to_string())
    })?;

    let mut dutch_nationality = "false";
    for entry in entries {
        if entry.nationaliteit.omschrijving.as_deref() == Some("Nederlandse")
            || entry.nationaliteit.code.as_deref() == Some("0001")
        {
            dutch_nationality = "true";
        }
    }

    Ok(dutch_nationality.to_string())
}
