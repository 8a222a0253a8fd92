//! Role catalog and roster configuration.
//!
//! The catalog is an immutable configuration value: a fixed, ordered
//! sequence of roles, their display categories, the rotation-pool name
//! list, and the capability-code lookup used during ingestion. It is
//! constructed once and passed by reference to every component that
//! needs it — there is no shared global.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named service role in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Role name (unique within the catalog, e.g. "Keyboard", "Usher 2").
    pub name: String,
    /// Display category name (grouping/coloring only — never a constraint).
    pub category: String,
    /// Scheduling classification.
    pub kind: RoleKind,
    /// Whether this role may seed the coordinator auto-fill.
    pub band: bool,
    /// Capability tag a member must carry to be eligible.
    ///
    /// `None` for rotation roles, whose candidates come from the fixed
    /// rotation pool instead of the member index. The numbered usher roles
    /// all point at the same shared capability.
    pub capability: Option<String>,
}

/// Scheduling classification of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleKind {
    /// Ordinary role filled from the availability index.
    Standard,
    /// The coordinator role: resolved last, allowed to overlap with a band
    /// role held by the same member.
    Coordinator,
    /// Rotation role: candidates are the fixed rotation-pool names,
    /// independent of member availability.
    Rotation,
}

/// A display category with its color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Display color (hex).
    pub color: String,
}

/// Names of the roles that drive the instrument lock and the derived
/// instrumentation-mode label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrumentation {
    /// The role whose occupancy enables the bass role.
    pub keyboard: String,
    /// Drums/percussion role name.
    pub drums: String,
    /// The role locked while the keyboard role is empty.
    pub bass: String,
}

/// Immutable roster configuration: role catalog, categories, rotation pool,
/// and the ingestion capability-code map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Roles in fixed catalog order.
    pub roles: Vec<Role>,
    /// Display categories in legend order.
    pub categories: Vec<Category>,
    /// Fixed candidate names for rotation roles.
    pub rotation_pool: Vec<String>,
    /// Instrument-lock role names. `None` disables the lock and the
    /// instrumentation-mode label.
    pub instrumentation: Option<Instrumentation>,
    /// Lookup from ingested capability codes (uppercase) to capability tags.
    pub capability_codes: HashMap<String, String>,
}

impl Role {
    /// Creates a standard role whose capability tag equals its name.
    pub fn standard(name: impl Into<String>, category: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            capability: Some(name.clone()),
            name,
            category: category.into(),
            kind: RoleKind::Standard,
            band: false,
        }
    }

    /// Creates the coordinator role.
    pub fn coordinator(name: impl Into<String>, category: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            capability: Some(name.clone()),
            name,
            category: category.into(),
            kind: RoleKind::Coordinator,
            band: false,
        }
    }

    /// Creates a rotation role (pool-based, no capability).
    pub fn rotation(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            kind: RoleKind::Rotation,
            band: false,
            capability: None,
        }
    }

    /// Marks this role as a band role (coordinator-seed eligible).
    pub fn with_band(mut self) -> Self {
        self.band = true;
        self
    }

    /// Overrides the capability tag (e.g. the shared usher pool).
    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capability = Some(capability.into());
        self
    }
}

impl RosterConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a role to the catalog.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Appends a display category.
    pub fn with_category(mut self, name: impl Into<String>, color: impl Into<String>) -> Self {
        self.categories.push(Category {
            name: name.into(),
            color: color.into(),
        });
        self
    }

    /// Sets the rotation-pool names.
    pub fn with_rotation_pool(mut self, pool: Vec<String>) -> Self {
        self.rotation_pool = pool;
        self
    }

    /// Sets the instrument-lock role names.
    pub fn with_instrumentation(mut self, instrumentation: Instrumentation) -> Self {
        self.instrumentation = Some(instrumentation);
        self
    }

    /// Adds a capability-code mapping.
    pub fn with_capability_code(
        mut self,
        code: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        self.capability_codes
            .insert(code.into().to_uppercase(), tag.into());
        self
    }

    /// The built-in catalog: coordinator, band and vocal roles, production,
    /// hosting, ushering, and two cleanup rotation slots.
    pub fn default_catalog() -> Self {
        let mut config = Self::new()
            .with_category("Band", "#c00000")
            .with_category("Production", "#0070c0")
            .with_category("Hosting", "#7030a0")
            .with_category("Ushering", "#ffc000")
            .with_category("Cleanup", "#00b050")
            .with_role(Role::coordinator("Coordinator", "Band"))
            .with_role(Role::standard("Lead Vocal", "Band"))
            .with_role(Role::standard("Backing Vocal", "Band"))
            .with_role(Role::standard("Keyboard", "Band").with_band())
            .with_role(Role::standard("Drums", "Band"))
            .with_role(Role::standard("Bass", "Band").with_band())
            .with_role(Role::standard("Guitar", "Band").with_band())
            .with_role(Role::standard("Presentation", "Production"))
            .with_role(Role::standard("Sound", "Production"))
            .with_role(Role::standard("Lighting", "Production"))
            .with_role(Role::standard("Host", "Hosting"))
            .with_role(Role::standard("Usher 1", "Ushering").with_capability("Usher"))
            .with_role(Role::standard("Usher 2", "Ushering").with_capability("Usher"))
            .with_role(Role::standard("Usher 3", "Ushering").with_capability("Usher"))
            .with_role(Role::rotation("Cleanup 1", "Cleanup"))
            .with_role(Role::rotation("Cleanup 2", "Cleanup"))
            .with_rotation_pool(
                ["Group A", "Group B", "Group C", "Group D", "Group E", "Group F"]
                    .map(String::from)
                    .to_vec(),
            )
            .with_instrumentation(Instrumentation {
                keyboard: "Keyboard".into(),
                drums: "Drums".into(),
                bass: "Bass".into(),
            });

        for (code, tag) in [
            ("LV", "Lead Vocal"),
            ("V", "Backing Vocal"),
            ("BV", "Backing Vocal"),
            ("K", "Keyboard"),
            ("P", "Keyboard"),
            ("D", "Drums"),
            ("B", "Bass"),
            ("G", "Guitar"),
            ("PPT", "Presentation"),
            ("S", "Sound"),
            ("SOUND", "Sound"),
            ("L", "Lighting"),
            ("LIGHT", "Lighting"),
            ("H", "Host"),
            ("MC", "Host"),
            ("U", "Usher"),
            ("USHER", "Usher"),
            ("C", "Coordinator"),
            ("COORD", "Coordinator"),
        ] {
            config = config.with_capability_code(code, tag);
        }
        config
    }

    /// Looks up a role by name.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// The coordinator role, if the catalog has one.
    pub fn coordinator(&self) -> Option<&Role> {
        self.roles.iter().find(|r| r.kind == RoleKind::Coordinator)
    }

    /// The capability tag that makes a member coordinator-eligible.
    pub fn coordinator_capability(&self) -> Option<&str> {
        self.coordinator().and_then(|r| r.capability.as_deref())
    }

    /// Band roles in catalog order.
    pub fn band_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter().filter(|r| r.band)
    }

    /// Whether the named role is a rotation role.
    pub fn is_rotation(&self, name: &str) -> bool {
        self.role(name)
            .map(|r| r.kind == RoleKind::Rotation)
            .unwrap_or(false)
    }

    /// Whether the named role is the coordinator role.
    pub fn is_coordinator(&self, name: &str) -> bool {
        self.role(name)
            .map(|r| r.kind == RoleKind::Coordinator)
            .unwrap_or(false)
    }

    /// Roles in catalog order excluding the coordinator role.
    pub fn assignable_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles
            .iter()
            .filter(|r| r.kind != RoleKind::Coordinator)
    }

    /// The display color for a role's category, if configured.
    pub fn category_color(&self, role_name: &str) -> Option<&str> {
        let role = self.role(role_name)?;
        self.categories
            .iter()
            .find(|c| c.name == role.category)
            .map(|c| c.color.as_str())
    }
}
