use crate::domain::UserId;

// ============== Authorization ==============

/// Only the configured admin may run commands. No admin configured means
/// nobody is authorized.
pub fn is_authorized(user_id: Option<UserId>, admin_id: Option<UserId>) -> bool {
    let (Some(user_id), Some(admin_id)) = (user_id, admin_id) else {
        return false;
    };
    user_id == admin_id
}
