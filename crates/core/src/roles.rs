//! Well-known role name constants and the authorization gate predicates.
//!
//! Roles are opaque string tags issued by the backend alongside the
//! bearer token. Membership is what matters; order and duplicates are
//! irrelevant.

/// Grants access to the `/admin` subtree and administrative actions.
pub const ROLE_ADMIN: &str = "ADMIN";

/// Default role for regular dashboard users.
pub const ROLE_USER: &str = "USER";

/// True iff `role` is a member of `roles`.
pub fn has_role(roles: &[String], role: &str) -> bool {
    roles.iter().any(|r| r == role)
}

/// True iff the role set contains [`ROLE_ADMIN`], regardless of other
/// members or their order.
pub fn has_admin(roles: &[String]) -> bool {
    has_role(roles, ROLE_ADMIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn has_admin_true_when_admin_present() {
        assert!(has_admin(&roles(&["ADMIN"])));
        assert!(has_admin(&roles(&["USER", "ADMIN"])));
        assert!(has_admin(&roles(&["ADMIN", "USER"])));
    }

    #[test]
    fn has_admin_false_without_admin() {
        assert!(!has_admin(&roles(&[])));
        assert!(!has_admin(&roles(&["USER"])));
        // Role names are case-sensitive tags, not keywords.
        assert!(!has_admin(&roles(&["admin"])));
    }

    #[test]
    fn has_role_matches_exact_member() {
        let rs = roles(&["USER"]);
        assert!(has_role(&rs, ROLE_USER));
        assert!(!has_role(&rs, ROLE_ADMIN));
    }
}
