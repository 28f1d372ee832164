//! Route authorization gate.
//!
//! One pure decision function evaluated on every navigation attempt, before
//! any page mounts. No IO, no caching, no side effects — redirects are
//! decisions here and navigation elsewhere.

use crate::claims::Identity;
use crate::roles::Role;

/// What a route demands of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable only while logged out (login, forgot-password).
    PublicOnly,

    /// Requires authentication; an empty role set admits any authenticated
    /// user, a non-empty set admits members only.
    Protected { allowed_roles: Vec<Role> },
}

impl RouteAccess {
    /// Any authenticated user.
    pub fn protected() -> Self {
        RouteAccess::Protected {
            allowed_roles: Vec::new(),
        }
    }

    /// Members of `roles` only.
    pub fn restricted(roles: impl IntoIterator<Item = Role>) -> Self {
        RouteAccess::Protected {
            allowed_roles: roles.into_iter().collect(),
        }
    }
}

/// Read-only snapshot of the session for authorization decisions.
///
/// `authenticated` means "a token is present" — expiry is only re-checked
/// at restore time and reactively on 401/403, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub authenticated: bool,
    pub identity: Option<Identity>,
}

impl SessionView {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            identity: None,
        }
    }

    pub fn authenticated(identity: Identity) -> Self {
        Self {
            authenticated: true,
            identity: Some(identity),
        }
    }
}

/// Gate verdict for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectLogin,
    RedirectUnauthorized,
    RedirectChangePassword,
    RedirectAdminHome,
    RedirectUserHome,
}

impl Decision {
    /// Route-table path for redirect decisions, `None` for `Allow`.
    pub fn target_path(&self) -> Option<&'static str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectLogin => Some("/login"),
            Decision::RedirectUnauthorized => Some("/unauthorized"),
            Decision::RedirectChangePassword => Some("/changePassword"),
            Decision::RedirectAdminHome => Some("/dashboard"),
            Decision::RedirectUserHome => Some("/dashboard/user"),
        }
    }
}

/// Decide whether the session may enter the route.
pub fn decide(route: &RouteAccess, session: &SessionView) -> Decision {
    match route {
        RouteAccess::PublicOnly => {
            if !session.authenticated {
                return Decision::Allow;
            }
            // Already logged in: bounce to the place the session belongs.
            let Some(identity) = &session.identity else {
                return Decision::RedirectUnauthorized;
            };
            if identity.temporary_password {
                return Decision::RedirectChangePassword;
            }
            match identity.role {
                Role::Admin => Decision::RedirectAdminHome,
                Role::User => Decision::RedirectUserHome,
                Role::Unknown(_) => Decision::RedirectUnauthorized,
            }
        }
        RouteAccess::Protected { allowed_roles } => {
            if !session.authenticated {
                return Decision::RedirectLogin;
            }
            if !allowed_roles.is_empty() {
                let member = session
                    .identity
                    .as_ref()
                    .is_some_and(|identity| allowed_roles.contains(&identity.role));
                if !member {
                    return Decision::RedirectUnauthorized;
                }
            }
            Decision::Allow
        }
    }
}

#[cfg(test)]
mod tests {
    use stockdesk_core::UserId;

    use super::*;

    fn identity(role: Role, temporary_password: bool) -> Identity {
        Identity {
            id: UserId::new(1),
            username: "mvega".to_string(),
            email: "mvega@example.com".to_string(),
            role,
            temporary_password,
        }
    }

    #[test]
    fn anonymous_user_may_enter_public_only_routes() {
        let decision = decide(&RouteAccess::PublicOnly, &SessionView::anonymous());
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn anonymous_user_is_sent_to_login_from_protected_routes() {
        let decision = decide(&RouteAccess::protected(), &SessionView::anonymous());
        assert_eq!(decision, Decision::RedirectLogin);
    }

    #[test]
    fn role_outside_required_set_is_unauthorized() {
        let session = SessionView::authenticated(identity(Role::User, false));
        let route = RouteAccess::restricted([Role::Admin]);

        assert_eq!(decide(&route, &session), Decision::RedirectUnauthorized);
    }

    #[test]
    fn role_inside_required_set_is_allowed() {
        let session = SessionView::authenticated(identity(Role::User, false));
        let route = RouteAccess::restricted([Role::Admin, Role::User]);

        assert_eq!(decide(&route, &session), Decision::Allow);
    }

    #[test]
    fn empty_role_set_admits_any_authenticated_user() {
        let session = SessionView::authenticated(identity(Role::Unknown("AUDITOR".into()), false));
        assert_eq!(decide(&RouteAccess::protected(), &session), Decision::Allow);
    }

    #[test]
    fn logged_in_visitor_on_public_route_goes_home_by_role() {
        let admin = SessionView::authenticated(identity(Role::Admin, false));
        let user = SessionView::authenticated(identity(Role::User, false));

        assert_eq!(decide(&RouteAccess::PublicOnly, &admin), Decision::RedirectAdminHome);
        assert_eq!(decide(&RouteAccess::PublicOnly, &user), Decision::RedirectUserHome);
    }

    #[test]
    fn temporary_password_overrides_home_redirect() {
        let session = SessionView::authenticated(identity(Role::Admin, true));
        assert_eq!(
            decide(&RouteAccess::PublicOnly, &session),
            Decision::RedirectChangePassword
        );
    }

    #[test]
    fn unknown_role_on_public_route_is_unauthorized() {
        let session = SessionView::authenticated(identity(Role::Unknown("AUDITOR".into()), false));
        assert_eq!(
            decide(&RouteAccess::PublicOnly, &session),
            Decision::RedirectUnauthorized
        );
    }

    #[test]
    fn redirect_targets_match_route_table() {
        assert_eq!(Decision::Allow.target_path(), None);
        assert_eq!(Decision::RedirectLogin.target_path(), Some("/login"));
        assert_eq!(Decision::RedirectChangePassword.target_path(), Some("/changePassword"));
        assert_eq!(Decision::RedirectUserHome.target_path(), Some("/dashboard/user"));
    }
}
