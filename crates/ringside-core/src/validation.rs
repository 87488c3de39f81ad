use crate::division::Division;
use crate::error::ValidationError;
use crate::fight::Fight;
use crate::fighter::Fighter;

/// Validator for mutation command inputs.
///
/// All checks run against current in-memory state before any mutation is
/// applied, so a rejection leaves no partial state change behind.
pub struct Validator;

impl Validator {
    /// A new fighter must not collide with an existing (name, division)
    /// pair. The same name on a different division is allowed.
    pub fn validate_new_fighter(
        fighters: &[Fighter],
        name: &str,
        division: Division,
    ) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if fighters
            .iter()
            .any(|f| f.name == name && f.division == division)
        {
            return Err(ValidationError::DuplicateFighter {
                name: name.to_string(),
                division,
            });
        }
        Ok(())
    }

    /// A fight needs both participants and a date, and a fighter cannot
    /// fight themselves. The fight's division is deliberately not checked
    /// against the participants' recorded divisions.
    pub fn validate_fight(fight: &Fight) -> Result<(), ValidationError> {
        if fight.fighter1.is_empty() {
            return Err(ValidationError::MissingField("fighter1"));
        }
        if fight.fighter2.is_empty() {
            return Err(ValidationError::MissingField("fighter2"));
        }
        if fight.date.is_empty() {
            return Err(ValidationError::MissingField("date"));
        }
        if fight.fighter1 == fight.fighter2 {
            return Err(ValidationError::SelfOpponent(fight.fighter1.clone()));
        }
        Ok(())
    }

    /// A rename target must be non-empty and not already in use by any
    /// fighter, in any division.
    pub fn validate_rename(fighters: &[Fighter], new_name: &str) -> Result<(), ValidationError> {
        if new_name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if fighters.iter().any(|f| f.name == new_name) {
            return Err(ValidationError::NameTaken(new_name.to_string()));
        }
        Ok(())
    }
}
