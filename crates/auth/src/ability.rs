//! The role → grant matrix and the request-scoped [`Ability`] it produces.

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// A kind of operation being authorized.
///
/// [`Action::Manage`] is the superset action: a grant of `Manage` on a
/// subject implies every concrete action on that subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Manage,
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Manage,
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Manage => "manage",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category of protected records.
///
/// [`Subject::All`] is a literal wildcard token: a grant on `All` covers
/// every kind, and a query for `All` matches only grants that carry `All`
/// themselves (never an enumeration over the concrete kinds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Series,
    Users,
    All,
}

impl Subject {
    /// The concrete record kinds, excluding the wildcard.
    pub const KINDS: [Subject; 2] = [Subject::Series, Subject::Users];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Series => "series",
            Subject::Users => "users",
            Subject::All => "all",
        }
    }
}

impl core::fmt::Display for Subject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permitted (action, subject) pair conferred to a role by the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    action: Action,
    subject: Subject,
}

impl Grant {
    pub const fn new(action: Action, subject: Subject) -> Self {
        Self { action, subject }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Whether this grant permits `action` on `subject`.
    ///
    /// The action hierarchy (`Manage` subsumes every action) and the subject
    /// wildcard (`All` subsumes every kind) compose in this one rule. A query
    /// for the `All` literal matches only grants that carry `All`.
    pub fn allows(&self, action: Action, subject: Subject) -> bool {
        (self.action == Action::Manage || self.action == action)
            && (self.subject == Subject::All || self.subject == subject)
    }
}

/// The materialized, queryable grant set for one principal.
///
/// Built fresh per authorization check and discarded with the request; never
/// persisted, never shared across principals.
#[derive(Debug, Clone, Default)]
pub struct Ability {
    grants: Vec<Grant>,
}

impl Ability {
    /// True iff any grant permits `action` on `subject`.
    ///
    /// No matching grant means false (default-deny).
    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.grants.iter().any(|g| g.allows(action, subject))
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }
}

/// Accumulates grants for an [`Ability`].
///
/// An empty builder yields an ability that denies everything.
#[derive(Debug, Default)]
pub struct AbilityBuilder {
    grants: Vec<Grant>,
}

impl AbilityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can(&mut self, action: Action, subject: Subject) -> &mut Self {
        self.grants.push(Grant::new(action, subject));
        self
    }

    pub fn build(self) -> Ability {
        Ability {
            grants: self.grants,
        }
    }
}

/// The fixed role → grant matrix.
///
/// Kept as one table so the whole permission surface is auditable in a single
/// place. Manager deliberately has no Delete and no Manage grant; Author and
/// Viewer are distinct roles with identical grants so they can diverge later
/// without touching the evaluator.
const ROLE_GRANTS: &[(Role, &[Grant])] = &[
    (
        Role::Administrator,
        &[Grant::new(Action::Manage, Subject::All)],
    ),
    (
        Role::Manager,
        &[
            Grant::new(Action::Create, Subject::All),
            Grant::new(Action::Update, Subject::All),
            Grant::new(Action::Read, Subject::All),
        ],
    ),
    (Role::Author, &[Grant::new(Action::Read, Subject::All)]),
    (Role::Viewer, &[Grant::new(Action::Read, Subject::All)]),
];

/// Build the ability for `role` by pure lookup in the grant matrix.
///
/// Total over [`Role`]: a role without a row in the table yields a zero-grant
/// ability, never an error.
pub fn ability_for(role: Role) -> Ability {
    let grants = ROLE_GRANTS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, grants)| *grants)
        .unwrap_or(&[]);

    Ability {
        grants: grants.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn administrator_is_granted_every_pair() {
        let ability = ability_for(Role::Administrator);
        for action in Action::ALL {
            for subject in [Subject::Series, Subject::Users, Subject::All] {
                assert!(ability.can(action, subject), "{action} on {subject}");
            }
        }
    }

    #[test]
    fn manager_cannot_delete_or_manage() {
        let ability = ability_for(Role::Manager);
        for kind in Subject::KINDS {
            assert!(ability.can(Action::Create, kind));
            assert!(ability.can(Action::Update, kind));
            assert!(ability.can(Action::Read, kind));
            assert!(!ability.can(Action::Delete, kind), "delete on {kind}");
            assert!(!ability.can(Action::Manage, kind), "manage on {kind}");
        }
    }

    #[test]
    fn author_is_read_only() {
        let ability = ability_for(Role::Author);
        for kind in Subject::KINDS {
            assert!(ability.can(Action::Read, kind));
            assert!(!ability.can(Action::Create, kind));
            assert!(!ability.can(Action::Update, kind));
            assert!(!ability.can(Action::Delete, kind));
        }
    }

    #[test]
    fn viewer_matches_author_on_every_pair() {
        let author = ability_for(Role::Author);
        let viewer = ability_for(Role::Viewer);
        for action in Action::ALL {
            for subject in [Subject::Series, Subject::Users, Subject::All] {
                assert_eq!(
                    author.can(action, subject),
                    viewer.can(action, subject),
                    "{action} on {subject}"
                );
            }
        }
    }

    #[test]
    fn no_grants_means_deny_everything() {
        let ability = AbilityBuilder::new().build();
        for action in Action::ALL {
            for subject in [Subject::Series, Subject::Users, Subject::All] {
                assert!(!ability.can(action, subject));
            }
        }
    }

    #[test]
    fn wildcard_query_requires_a_wildcard_grant() {
        // Read granted on every concrete kind individually, but never on the
        // literal wildcard.
        let mut builder = AbilityBuilder::new();
        builder.can(Action::Read, Subject::Series);
        builder.can(Action::Read, Subject::Users);
        let ability = builder.build();

        assert!(ability.can(Action::Read, Subject::Series));
        assert!(ability.can(Action::Read, Subject::Users));
        assert!(!ability.can(Action::Read, Subject::All));
    }

    #[test]
    fn manage_on_one_kind_does_not_leak_to_others() {
        let mut builder = AbilityBuilder::new();
        builder.can(Action::Manage, Subject::Series);
        let ability = builder.build();

        assert!(ability.can(Action::Delete, Subject::Series));
        assert!(ability.can(Action::Create, Subject::Series));
        assert!(!ability.can(Action::Delete, Subject::Users));
        assert!(!ability.can(Action::Manage, Subject::All));
    }

    #[test]
    fn rebuilding_yields_identical_answers() {
        for role in Role::ALL {
            let first = ability_for(role);
            let second = ability_for(role);
            for action in Action::ALL {
                for subject in [Subject::Series, Subject::Users, Subject::All] {
                    assert_eq!(first.can(action, subject), second.can(action, subject));
                    // Querying twice has no hidden state either.
                    assert_eq!(first.can(action, subject), first.can(action, subject));
                }
            }
        }
    }
}
