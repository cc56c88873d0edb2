//! Command origins and semantic constraints.

use cmdgram_spec_tables::{ConstraintName, Permission};
use serde::Serialize;

/// One semantic constraint on an enum value.
///
/// The discriminants are the wire codes carried in the descriptor's
/// constrained-value entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum SemanticConstraint {
    /// Usable only while cheats are enabled.
    RequiresCheatsEnabled = 1,
    /// Requires an elevated permission level.
    RequiresElevatedPermissions = 2,
    /// Requires host permissions.
    RequiresHostPermissions = 4,
    /// Usable only where aliases are allowed.
    RequiresAllowAliases = 8,
}

impl From<ConstraintName> for SemanticConstraint {
    fn from(name: ConstraintName) -> Self {
        match name {
            ConstraintName::RequiresCheatsEnabled => SemanticConstraint::RequiresCheatsEnabled,
            ConstraintName::RequiresElevatedPermissions => {
                SemanticConstraint::RequiresElevatedPermissions
            }
            ConstraintName::RequiresHostPermissions => SemanticConstraint::RequiresHostPermissions,
            ConstraintName::RequiresAllowAliases => SemanticConstraint::RequiresAllowAliases,
        }
    }
}

/// A set of semantic constraints, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SemanticConstraints(u8);

impl std::ops::BitOr for SemanticConstraints {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl SemanticConstraints {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Build a set from individual constraints.
    pub fn from_iter(iter: impl IntoIterator<Item = SemanticConstraint>) -> Self {
        Self(iter.into_iter().fold(0, |acc, c| acc | c as u8))
    }

    /// Whether the set contains `c`.
    pub fn contains(self, c: SemanticConstraint) -> bool {
        self.0 & c as u8 != 0
    }

    /// Whether the set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raw bitmask.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// The individual constraint codes, ascending.
    pub fn codes(self) -> Vec<u8> {
        [
            SemanticConstraint::RequiresCheatsEnabled,
            SemanticConstraint::RequiresElevatedPermissions,
            SemanticConstraint::RequiresHostPermissions,
            SemanticConstraint::RequiresAllowAliases,
        ]
        .into_iter()
        .filter(|&c| self.contains(c))
        .map(|c| c as u8)
        .collect()
    }
}

/// The issuer identity and context of one command line.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOrigin {
    /// Display name of the issuer.
    pub name: String,
    /// Permission level of the issuer.
    pub permission: Permission,
    /// Whether cheats are enabled in the issuing world.
    pub cheats_enabled: bool,
    /// Whether alias expansion is allowed for this origin.
    pub allow_aliases: bool,
}

impl Default for CommandOrigin {
    fn default() -> Self {
        Self {
            name: "Server".into(),
            permission: Permission::Internal,
            cheats_enabled: true,
            allow_aliases: true,
        }
    }
}

impl CommandOrigin {
    /// Whether this origin satisfies every constraint in the set.
    pub fn satisfies(&self, constraints: SemanticConstraints) -> bool {
        if constraints.contains(SemanticConstraint::RequiresCheatsEnabled) && !self.cheats_enabled {
            return false;
        }
        if constraints.contains(SemanticConstraint::RequiresElevatedPermissions)
            && self.permission < Permission::GameDirectors
        {
            return false;
        }
        if constraints.contains(SemanticConstraint::RequiresHostPermissions)
            && self.permission < Permission::Host
        {
            return false;
        }
        if constraints.contains(SemanticConstraint::RequiresAllowAliases) && !self.allow_aliases {
            return false;
        }
        true
    }
}
