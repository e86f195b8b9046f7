use crate::session::{Identity, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Login,
    GuideDashboard,
    StudentDashboard,
}

/// Outcome of checking a navigation target against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Authorized,
    ToLogin,
    ToHome(Role),
}

pub fn home_screen(role: Role) -> Screen {
    match role {
        Role::Guide => Screen::GuideDashboard,
        Role::Student => Screen::StudentDashboard,
    }
}

/// Decides whether `screen` may be shown to whoever is signed in. The rules:
/// the guide dashboard needs a signed-in guide, the student dashboard needs
/// any signed-in user, and the landing and login screens bounce users who
/// are already signed in to their own dashboard. A redirect target always
/// authorizes on the next check, so following one decision terminates.
pub fn decide(screen: Screen, identity: Option<&Identity>) -> RouteDecision {
    match screen {
        Screen::GuideDashboard => match identity {
            None => RouteDecision::ToLogin,
            Some(user) if user.role != Role::Guide => RouteDecision::ToHome(user.role),
            Some(_) => RouteDecision::Authorized,
        },
        Screen::StudentDashboard => match identity {
            None => RouteDecision::ToLogin,
            Some(_) => RouteDecision::Authorized,
        },
        Screen::Landing | Screen::Login => match identity {
            Some(user) => RouteDecision::ToHome(user.role),
            None => RouteDecision::Authorized,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        let email = match role {
            Role::Guide => "guide@university.edu",
            Role::Student => "student@university.edu",
        };
        Identity {
            id: email.to_string(),
            display_name: email.to_string(),
            role,
            email: email.to_string(),
        }
    }

    #[test]
    fn given_no_session_when_opening_guide_dashboard_then_redirects_to_login() {
        assert_eq!(
            decide(Screen::GuideDashboard, None),
            RouteDecision::ToLogin
        );
    }

    #[test]
    fn given_student_session_when_opening_guide_dashboard_then_redirects_home() {
        let user = identity(Role::Student);
        assert_eq!(
            decide(Screen::GuideDashboard, Some(&user)),
            RouteDecision::ToHome(Role::Student)
        );
    }

    #[test]
    fn given_guide_session_when_opening_guide_dashboard_then_authorized() {
        let user = identity(Role::Guide);
        assert_eq!(
            decide(Screen::GuideDashboard, Some(&user)),
            RouteDecision::Authorized
        );
    }

    #[test]
    fn given_no_session_when_opening_student_dashboard_then_redirects_to_login() {
        assert_eq!(
            decide(Screen::StudentDashboard, None),
            RouteDecision::ToLogin
        );
    }

    #[test]
    fn given_any_session_when_opening_student_dashboard_then_authorized() {
        for role in [Role::Guide, Role::Student] {
            let user = identity(role);
            assert_eq!(
                decide(Screen::StudentDashboard, Some(&user)),
                RouteDecision::Authorized
            );
        }
    }

    #[test]
    fn given_signed_in_user_when_opening_landing_or_login_then_sent_home() {
        let guide = identity(Role::Guide);
        let student = identity(Role::Student);
        for screen in [Screen::Landing, Screen::Login] {
            assert_eq!(
                decide(screen, Some(&guide)),
                RouteDecision::ToHome(Role::Guide)
            );
            assert_eq!(
                decide(screen, Some(&student)),
                RouteDecision::ToHome(Role::Student)
            );
        }
    }

    #[test]
    fn given_no_session_when_opening_landing_or_login_then_authorized() {
        for screen in [Screen::Landing, Screen::Login] {
            assert_eq!(decide(screen, None), RouteDecision::Authorized);
        }
    }

    #[test]
    fn redirect_targets_always_authorize_on_the_next_check() {
        let student = identity(Role::Student);
        // Student bounced off the guide dashboard lands somewhere stable.
        if let RouteDecision::ToHome(role) = decide(Screen::GuideDashboard, Some(&student)) {
            assert_eq!(
                decide(home_screen(role), Some(&student)),
                RouteDecision::Authorized
            );
        } else {
            panic!("expected a home redirect");
        }
        // Anonymous users bounced to login may stay there.
        assert_eq!(decide(Screen::Login, None), RouteDecision::Authorized);
    }
}
