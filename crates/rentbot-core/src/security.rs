use crate::domain::UserId;

// ============== Authorization ==============

/// Single-operator check: the sender's decimal id must equal the configured admin id.
pub fn is_admin(user_id: Option<UserId>, admin_id: &str) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    if admin_id.is_empty() {
        return false;
    }
    user_id.0.to_string() == admin_id
}
