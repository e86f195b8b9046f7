use crate::session::{Identity, Role};

/// Classifies an identifier the first time an account is provisioned.
/// The result is stored on the account and never re-derived afterwards,
/// so renaming conventions cannot flip an existing user's role.
pub fn resolve_role(identifier: &str) -> Role {
    let lower = identifier.to_lowercase();
    if lower.starts_with("guide") || lower.contains("professor") || lower.contains("teacher") {
        Role::Guide
    } else {
        Role::Student
    }
}

/// Builds the display name shown in headers and greetings from the part of
/// the identifier before the '@'. Guides get their "guide" marker stripped;
/// everything non-alphabetic is dropped from both variants.
pub fn display_name_for(identifier: &str, role: Role) -> String {
    let local = identifier.split('@').next().unwrap_or(identifier);
    match role {
        Role::Guide => {
            let rest = match local.get(..5) {
                Some(prefix) if prefix.eq_ignore_ascii_case("guide") => &local[5..],
                _ => local,
            };
            let letters: String = rest.chars().filter(|c| c.is_ascii_alphabetic()).collect();
            if letters.is_empty() {
                "Guide Smith".to_string()
            } else {
                format!("Guide {letters}")
            }
        }
        Role::Student => {
            let letters: String = local.chars().filter(|c| c.is_ascii_alphabetic()).collect();
            if letters.is_empty() {
                "Student User".to_string()
            } else {
                format!("Student {letters}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl Account {
    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
            email: self.email.clone(),
        }
    }
}

/// In-memory stand-in for an account backend. Holds the accounts known to
/// this process; sign-in provisions unknown identifiers on first contact.
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    pub fn with_seed_accounts() -> Self {
        Self {
            accounts: vec![
                Account {
                    email: "guide@university.edu".to_string(),
                    display_name: "Guide Smith".to_string(),
                    role: Role::Guide,
                },
                Account {
                    email: "student@university.edu".to_string(),
                    display_name: "Student User".to_string(),
                    role: Role::Student,
                },
            ],
        }
    }

    fn find(&self, email: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
    }

    /// Signs in an identifier. Known accounts come back with their stored
    /// role; unknown ones are provisioned through [`resolve_role`] exactly
    /// once and remembered for the rest of the process.
    pub fn login(&mut self, email: &str) -> Account {
        if let Some(found) = self.find(email) {
            return found.clone();
        }
        let role = resolve_role(email);
        let account = Account {
            email: email.to_string(),
            display_name: display_name_for(email, role),
            role,
        };
        self.accounts.push(account.clone());
        account
    }

    /// Creates (or re-creates) an account with an explicitly chosen role.
    /// The chosen role always wins over what the identifier looks like.
    pub fn register(&mut self, email: &str, role: Role) -> Account {
        let account = Account {
            email: email.to_string(),
            display_name: display_name_for(email, role),
            role,
        };
        if let Some(existing) = self
            .accounts
            .iter_mut()
            .find(|a| a.email.eq_ignore_ascii_case(email))
        {
            *existing = account.clone();
        } else {
            self.accounts.push(account.clone());
        }
        account
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn given_guide_prefixed_identifier_when_resolved_then_role_is_guide() {
        assert_eq!(resolve_role("guide@university.edu"), Role::Guide);
        assert_eq!(resolve_role("GUIDE.ana@school.org"), Role::Guide);
        assert_eq!(resolve_role("Guide42"), Role::Guide);
    }

    #[test]
    fn given_teaching_keywords_anywhere_when_resolved_then_role_is_guide() {
        assert_eq!(resolve_role("maria.professor@uni.edu"), Role::Guide);
        assert_eq!(resolve_role("head-TEACHER@school.org"), Role::Guide);
    }

    #[test]
    fn given_plain_identifier_when_resolved_then_role_is_student() {
        assert_eq!(resolve_role("alice@university.edu"), Role::Student);
        assert_eq!(resolve_role("misguided@uni.edu"), Role::Student);
        assert_eq!(resolve_role(""), Role::Student);
    }

    #[test]
    fn given_registration_with_chosen_role_then_heuristic_does_not_apply() {
        let mut directory = AccountDirectory::with_seed_accounts();
        let account = directory.register("guide.looking@uni.edu", Role::Student);
        assert_eq!(account.role, Role::Student);

        let account = directory.register("plain.name@uni.edu", Role::Guide);
        assert_eq!(account.role, Role::Guide);
    }

    #[test]
    fn given_registered_account_when_signing_in_later_then_stored_role_wins() {
        let mut directory = AccountDirectory::with_seed_accounts();
        directory.register("guide.looking@uni.edu", Role::Student);

        // A later sign-in must not re-run the name heuristic.
        let account = directory.login("guide.looking@uni.edu");
        assert_eq!(account.role, Role::Student);
    }

    #[test]
    fn given_unknown_identifier_when_signing_in_then_it_is_provisioned_once() {
        let mut directory = AccountDirectory::with_seed_accounts();
        let first = directory.login("new.person@uni.edu");
        assert_eq!(first.role, Role::Student);

        let again = directory.login("NEW.PERSON@uni.edu");
        assert_eq!(again, first);
    }

    #[test]
    fn seed_accounts_cover_both_roles() {
        let mut directory = AccountDirectory::with_seed_accounts();
        assert_eq!(directory.login("guide@university.edu").role, Role::Guide);
        assert_eq!(directory.login("student@university.edu").role, Role::Student);
        assert_eq!(
            directory.login("guide@university.edu").display_name,
            "Guide Smith"
        );
    }

    #[test]
    fn display_names_strip_markers_and_punctuation() {
        assert_eq!(
            display_name_for("guide.mark@uni.edu", Role::Guide),
            "Guide mark"
        );
        assert_eq!(display_name_for("guide@uni.edu", Role::Guide), "Guide Smith");
        assert_eq!(
            display_name_for("alice.w@uni.edu", Role::Student),
            "Student alicew"
        );
        assert_eq!(display_name_for("12345@uni.edu", Role::Student), "Student User");
    }

    proptest! {
        #[test]
        fn identifiers_without_markers_resolve_to_student(local in "[a-z0-9._-]{1,24}") {
            prop_assume!(!local.starts_with("guide"));
            prop_assume!(!local.contains("professor"));
            prop_assume!(!local.contains("teacher"));
            prop_assert_eq!(resolve_role(&format!("{local}@uni.edu")), Role::Student);
        }

        #[test]
        fn guide_prefix_resolves_to_guide_regardless_of_suffix(rest in "[a-z0-9._-]{0,24}") {
            prop_assert_eq!(resolve_role(&format!("guide{rest}@uni.edu")), Role::Guide);
        }

        #[test]
        fn resolution_ignores_case(local in "[a-zA-Z0-9._-]{1,24}") {
            prop_assert_eq!(
                resolve_role(&local.to_lowercase()),
                resolve_role(&local.to_uppercase())
            );
        }
    }
}
