//! Well-known role name constants and role helpers.
//!
//! These must match the CHECK constraint on `users.role` in the schema.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_MEMBER: &str = "member";

/// All assignable roles, in privilege order.
pub const ALL_ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_MANAGER, ROLE_MEMBER];

/// Whether `role` is one of the three assignable roles.
pub fn is_valid_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

/// Whether `role` carries staff privileges (admin or manager).
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}

/// Whether an actor with `actor_role` may change the activation state of a
/// user holding `target_role`.
///
/// Admins may (de)activate anyone; managers only plain members.
pub fn can_change_activation(actor_role: &str, target_role: &str) -> bool {
    match actor_role {
        ROLE_ADMIN => true,
        ROLE_MANAGER => target_role == ROLE_MEMBER,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_validity() {
        assert!(is_valid_role("admin"));
        assert!(is_valid_role("manager"));
        assert!(is_valid_role("member"));
        assert!(!is_valid_role("visitor"));
        assert!(!is_valid_role(""));
        assert!(!is_valid_role("Admin"));
    }

    #[test]
    fn test_staff_roles() {
        assert!(is_staff(ROLE_ADMIN));
        assert!(is_staff(ROLE_MANAGER));
        assert!(!is_staff(ROLE_MEMBER));
    }

    #[test]
    fn test_activation_rules() {
        // Admins may touch anyone.
        assert!(can_change_activation(ROLE_ADMIN, ROLE_ADMIN));
        assert!(can_change_activation(ROLE_ADMIN, ROLE_MANAGER));
        assert!(can_change_activation(ROLE_ADMIN, ROLE_MEMBER));

        // Managers may only touch members.
        assert!(can_change_activation(ROLE_MANAGER, ROLE_MEMBER));
        assert!(!can_change_activation(ROLE_MANAGER, ROLE_MANAGER));
        assert!(!can_change_activation(ROLE_MANAGER, ROLE_ADMIN));

        // Members may touch nobody.
        assert!(!can_change_activation(ROLE_MEMBER, ROLE_MEMBER));
    }
}
