use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use crate::error::AuthError;
use crate::types::{Role, Subject, UNKNOWN_ROLE_LABEL};

/// Fine-grained permission token gating one action in the league app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    // Users
    ViewUsers,
    CreateUser,
    EditUser,
    DeleteUser,
    // Roles
    ManageRoles,
    // Championships
    ViewChampionships,
    CreateChampionship,
    EditChampionship,
    DeleteChampionship,
    // Teams
    ViewTeams,
    CreateTeam,
    EditTeam,
    DeleteTeam,
    EditOwnTeam,
    // Matches
    ViewMatches,
    CreateMatch,
    EditMatch,
    DeleteMatch,
    // Fixtures
    ViewFixtures,
    CreateFixture,
    EditFixture,
    DeleteFixture,
    // Results
    ViewResults,
    CreateResult,
    EditResult,
    // Incidents
    ViewIncidents,
    CreateIncident,
    EditIncident,
    DeleteIncident,
    // Resources
    ViewResources,
    ManageResources,
}

pub const CAPABILITIES: &[(Capability, &str)] = &[
    (Capability::ViewUsers, "View user list"),
    (Capability::CreateUser, "Create users"),
    (Capability::EditUser, "Edit users"),
    (Capability::DeleteUser, "Delete users"),
    (Capability::ManageRoles, "Manage roles and their permissions"),
    (Capability::ViewChampionships, "View championships"),
    (Capability::CreateChampionship, "Create championships"),
    (Capability::EditChampionship, "Edit championships"),
    (Capability::DeleteChampionship, "Delete championships"),
    (Capability::ViewTeams, "View teams"),
    (Capability::CreateTeam, "Register teams"),
    (Capability::EditTeam, "Edit any team"),
    (Capability::DeleteTeam, "Delete teams"),
    (Capability::EditOwnTeam, "Edit the team the delegate represents"),
    (Capability::ViewMatches, "View matches"),
    (Capability::CreateMatch, "Schedule matches"),
    (Capability::EditMatch, "Edit matches"),
    (Capability::DeleteMatch, "Delete matches"),
    (Capability::ViewFixtures, "View fixtures"),
    (Capability::CreateFixture, "Create fixtures"),
    (Capability::EditFixture, "Edit fixtures"),
    (Capability::DeleteFixture, "Delete fixtures"),
    (Capability::ViewResults, "View match results"),
    (Capability::CreateResult, "Record match results"),
    (Capability::EditResult, "Correct match results"),
    (Capability::ViewIncidents, "View match incidents"),
    (Capability::CreateIncident, "Report incidents"),
    (Capability::EditIncident, "Edit incidents"),
    (Capability::DeleteIncident, "Delete incidents"),
    (Capability::ViewResources, "View venues and equipment"),
    (Capability::ManageResources, "Manage venues and equipment"),
];

impl Capability {
    pub fn all() -> impl Iterator<Item = Capability> {
        CAPABILITIES.iter().map(|(c, _)| *c)
    }

    /// Wire name shared with the frontend and the backend permission table.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ViewUsers => "view_users",
            Capability::CreateUser => "create_user",
            Capability::EditUser => "edit_user",
            Capability::DeleteUser => "delete_user",
            Capability::ManageRoles => "manage_roles",
            Capability::ViewChampionships => "view_championships",
            Capability::CreateChampionship => "create_championship",
            Capability::EditChampionship => "edit_championship",
            Capability::DeleteChampionship => "delete_championship",
            Capability::ViewTeams => "view_teams",
            Capability::CreateTeam => "create_team",
            Capability::EditTeam => "edit_team",
            Capability::DeleteTeam => "delete_team",
            Capability::EditOwnTeam => "edit_own_team",
            Capability::ViewMatches => "view_matches",
            Capability::CreateMatch => "create_match",
            Capability::EditMatch => "edit_match",
            Capability::DeleteMatch => "delete_match",
            Capability::ViewFixtures => "view_fixtures",
            Capability::CreateFixture => "create_fixture",
            Capability::EditFixture => "edit_fixture",
            Capability::DeleteFixture => "delete_fixture",
            Capability::ViewResults => "view_results",
            Capability::CreateResult => "create_result",
            Capability::EditResult => "edit_result",
            Capability::ViewIncidents => "view_incidents",
            Capability::CreateIncident => "create_incident",
            Capability::EditIncident => "edit_incident",
            Capability::DeleteIncident => "delete_incident",
            Capability::ViewResources => "view_resources",
            Capability::ManageResources => "manage_resources",
        }
    }

    pub fn description(self) -> &'static str {
        CAPABILITIES
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, d)| *d)
            .unwrap_or("")
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Capability {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Capability::all()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| AuthError::InvalidInput(format!("unknown capability: {s}")))
    }
}

const ORGANIZER_CAPABILITIES: &[Capability] = &[
    Capability::ViewChampionships,
    Capability::CreateChampionship,
    Capability::EditChampionship,
    Capability::DeleteChampionship,
    Capability::ViewTeams,
    Capability::ViewMatches,
    Capability::CreateMatch,
    Capability::EditMatch,
    Capability::DeleteMatch,
    Capability::ViewFixtures,
    Capability::CreateFixture,
    Capability::EditFixture,
    Capability::DeleteFixture,
    Capability::ViewResults,
    Capability::CreateResult,
    Capability::EditResult,
    Capability::ViewIncidents,
    Capability::CreateIncident,
    Capability::EditIncident,
    Capability::DeleteIncident,
    Capability::ViewResources,
];

const DELEGATE_CAPABILITIES: &[Capability] = &[
    Capability::ViewChampionships,
    Capability::ViewTeams,
    Capability::EditOwnTeam,
    Capability::ViewMatches,
    Capability::ViewFixtures,
    Capability::ViewResults,
    Capability::ViewIncidents,
    Capability::ViewResources,
];

const PLAYER_CAPABILITIES: &[Capability] = &[
    Capability::ViewChampionships,
    Capability::ViewTeams,
    Capability::ViewMatches,
    Capability::ViewFixtures,
    Capability::ViewResults,
    Capability::ViewIncidents,
];

/// Role to capability-set mapping. Every role has an entry and the
/// administrator entry is always the full catalog. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantTable {
    grants: HashMap<Role, HashSet<Capability>>,
}

static STANDARD: LazyLock<GrantTable> = LazyLock::new(GrantTable::standard);

impl GrantTable {
    /// The league's default policy.
    pub fn standard() -> Self {
        let grants = Role::ALL
            .into_iter()
            .map(|role| (role, standard_grants(role)))
            .collect();
        Self { grants }
    }

    /// Process-wide instance of [`GrantTable::standard`], built on first use.
    pub fn standard_ref() -> &'static GrantTable {
        &STANDARD
    }

    /// Build a table from per-role lists of capability names. Roles that are
    /// not listed keep their standard grants.
    pub fn from_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self, AuthError> {
        let mut grants: HashMap<Role, HashSet<Capability>> = HashMap::new();
        for (key, names) in overrides {
            let role: Role = key
                .parse()
                .map_err(|_| AuthError::InvalidPolicy(format!("unknown role: {key}")))?;
            let caps = names
                .iter()
                .map(|n| {
                    n.parse::<Capability>().map_err(|_| {
                        AuthError::InvalidPolicy(format!("unknown capability {n:?} for {role}"))
                    })
                })
                .collect::<Result<HashSet<_>, _>>()?;
            if grants.insert(role, caps).is_some() {
                return Err(AuthError::InvalidPolicy(format!(
                    "role {role} listed more than once"
                )));
            }
        }

        if let Some(admin) = grants.get(&Role::Administrator) {
            if admin.len() != CAPABILITIES.len() {
                return Err(AuthError::InvalidPolicy(
                    "administrator must be granted every capability".into(),
                ));
            }
        }

        for role in Role::ALL {
            grants.entry(role).or_insert_with(|| standard_grants(role));
        }
        tracing::info!(overridden = overrides.len(), "built grant table with overrides");
        Ok(Self { grants })
    }

    pub fn capabilities(&self, role: Role) -> &HashSet<Capability> {
        // Constructors insert every role.
        &self.grants[&role]
    }

    /// Granted capabilities of `role` in catalog order.
    pub fn sorted_capabilities(&self, role: Role) -> Vec<Capability> {
        let granted = self.capabilities(role);
        Capability::all().filter(|c| granted.contains(c)).collect()
    }

    pub fn has_permission(&self, subject: impl Into<Subject>, capability: Capability) -> bool {
        let subject = subject.into();
        let Subject::Authenticated(role) = subject else {
            tracing::debug!(%capability, "denied: anonymous subject");
            return false;
        };
        let allowed = self.capabilities(role).contains(&capability);
        if !allowed {
            tracing::debug!(%role, %capability, "denied");
        }
        allowed
    }

    /// `false` for an empty list.
    pub fn has_any_permission(
        &self,
        subject: impl Into<Subject>,
        capabilities: &[Capability],
    ) -> bool {
        let subject = subject.into();
        capabilities.iter().any(|c| self.has_permission(subject, *c))
    }

    /// `true` for an empty list.
    pub fn has_all_permissions(
        &self,
        subject: impl Into<Subject>,
        capabilities: &[Capability],
    ) -> bool {
        let subject = subject.into();
        capabilities.iter().all(|c| self.has_permission(subject, *c))
    }

    /// Check a capability given by name, e.g. from a request or the shell.
    /// Unknown names are denied.
    pub fn allows_named(&self, subject: impl Into<Subject>, name: &str) -> bool {
        match name.parse::<Capability>() {
            Ok(capability) => self.has_permission(subject, capability),
            Err(_) => {
                tracing::debug!(capability = name, "denied: unknown capability");
                false
            }
        }
    }
}

impl Default for GrantTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_grants(role: Role) -> HashSet<Capability> {
    match role {
        Role::Administrator => Capability::all().collect(),
        Role::Organizer => ORGANIZER_CAPABILITIES.iter().copied().collect(),
        Role::Delegate => DELEGATE_CAPABILITIES.iter().copied().collect(),
        Role::Player => PLAYER_CAPABILITIES.iter().copied().collect(),
    }
}

pub fn has_permission(subject: impl Into<Subject>, capability: Capability) -> bool {
    GrantTable::standard_ref().has_permission(subject, capability)
}

pub fn has_any_permission(subject: impl Into<Subject>, capabilities: &[Capability]) -> bool {
    GrantTable::standard_ref().has_any_permission(subject, capabilities)
}

pub fn has_all_permissions(subject: impl Into<Subject>, capabilities: &[Capability]) -> bool {
    GrantTable::standard_ref().has_all_permissions(subject, capabilities)
}

/// Display label of the subject's role, or `"Desconocido"`.
pub fn role_name(subject: impl Into<Subject>) -> &'static str {
    match subject.into() {
        Subject::Authenticated(role) => role.label(),
        Subject::Anonymous => UNKNOWN_ROLE_LABEL,
    }
}
