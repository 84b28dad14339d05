pub mod goals;
pub mod info;
pub mod users;

pub use goals::{GoalRegisteredResponse, RegisterGoalRequest};
pub use info::ApiInfo;
pub use users::{RegisterUserRequest, UserRegisteredResponse};

use crate::models::fields::TextOrNumber;
use validator::ValidationError;

/// Request values that can be present yet carry nothing.
pub(crate) trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for TextOrNumber {
    fn is_blank(&self) -> bool {
        TextOrNumber::is_blank(self)
    }
}

/// Required fields reject empty and whitespace-only text.
pub(crate) fn not_blank<T: Blank>(value: &T) -> Result<(), ValidationError> {
    if value.is_blank() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
