use crate::error::ServiceError;
use core_types::NewGuestBookMessage;

/// An inclusive length range for one draft field, counted in characters.
#[derive(Debug, Clone, Copy)]
pub struct LengthRule {
    pub field: &'static str,
    pub min: usize,
    pub max: usize,
}

impl LengthRule {
    fn check(&self, value: &str) -> Result<(), ServiceError> {
        let len = value.chars().count();
        if len < self.min || len > self.max {
            return Err(ServiceError::ValidationFailed(format!(
                "{} must be between {} and {} characters",
                self.field, self.min, self.max
            )));
        }
        Ok(())
    }
}

pub const NAME_RULE: LengthRule = LengthRule { field: "name", min: 2, max: 100 };
pub const EMAIL_RULE: LengthRule = LengthRule { field: "email", min: 1, max: 255 };
pub const MESSAGE_RULE: LengthRule = LengthRule { field: "message", min: 10, max: 1000 };

/// Checks name, then email, then message; the first violation wins.
pub fn validate_draft(draft: &NewGuestBookMessage) -> Result<(), ServiceError> {
    NAME_RULE.check(&draft.name)?;
    EMAIL_RULE.check(&draft.email)?;
    MESSAGE_RULE.check(&draft.message)?;
    Ok(())
}
