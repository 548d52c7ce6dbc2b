use crate::db::UserId;
use crate::error::VaultError;

/// Pass only when the acting user created the resource.
pub fn assert_ownership(
    resource_owner_id: UserId,
    current_user_id: UserId,
) -> Result<(), VaultError> {
    if resource_owner_id == current_user_id {
        Ok(())
    } else {
        Err(VaultError::Forbidden)
    }
}
