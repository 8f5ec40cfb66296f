//! The five permission gates and how the config decides whether each is enforced.

use crate::config::ConfigStore;
use crate::host::{Actor, Feedback};

/// Gated actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Open the admin config screen.
    OpenAdminMenu,
    /// Open container main views.
    OpenContainers,
    /// Dye containers.
    Recolor,
    /// Rename containers.
    Rename,
    /// Expand container capacity.
    Expand,
}

impl Permission {
    /// Every gate, in admin-screen order.
    pub const ALL: [Self; 5] = [
        Self::OpenAdminMenu,
        Self::OpenContainers,
        Self::Recolor,
        Self::Rename,
        Self::Expand,
    ];

    /// Segment under `permissions.` in the config document.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OpenAdminMenu => "open_admin_menu",
            Self::OpenContainers => "open_containers",
            Self::Recolor => "recolor",
            Self::Rename => "rename",
            Self::Expand => "expand",
        }
    }

    /// Full config key path of the "required" toggle.
    #[must_use]
    pub fn config_key(self) -> String {
        format!("permissions.{}", self.key())
    }

    /// Host permission node checked when the gate is required.
    #[must_use]
    pub const fn node(self) -> &'static str {
        match self {
            Self::OpenAdminMenu => "satchel.admin",
            Self::OpenContainers => "satchel.open",
            Self::Recolor => "satchel.recolor",
            Self::Rename => "satchel.rename",
            Self::Expand => "satchel.expand",
        }
    }

    /// Label for the admin screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAdminMenu => "Open admin menu",
            Self::OpenContainers => "Open backpacks",
            Self::Recolor => "Recolor",
            Self::Rename => "Rename",
            Self::Expand => "Expand",
        }
    }
}

/// What: Decide whether `actor` may perform the gated action.
///
/// Output:
/// - `true` when the gate is not required by config, or the actor holds the node
#[must_use]
pub fn is_allowed(actor: &dyn Actor, config: &ConfigStore, permission: Permission) -> bool {
    !config.permission_required(permission) || actor.has_permission(permission.node())
}

/// What: [`is_allowed`], telling the actor when access is denied.
pub fn check(actor: &mut dyn Actor, config: &ConfigStore, permission: Permission) -> bool {
    if is_allowed(actor, config, permission) {
        return true;
    }
    tracing::debug!(actor = actor.name(), node = permission.node(), "[Permissions] Denied");
    actor.notify(Feedback::failure("You don't have permission to do that."));
    false
}
