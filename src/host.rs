//! Host collaborators: the actor whose inventory carries containers, and the renderer
//! that draws grid views.
//!
//! The host platform owns event delivery, rendering and permission storage. `satchel`
//! only talks to it through these traits.

use std::collections::BTreeSet;

use crate::item::Inventory;
use crate::ui::{Frame, ViewId};

/// Tone of a feedback message, mapped by the host to a sound or particle effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Positive confirmation.
    Success,
    /// Validation failure or denial.
    Failure,
}

/// Short message plus cue shown to the actor after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    /// Text shown to the actor.
    pub message: String,
    /// Audio/visual cue.
    pub cue: Cue,
}

impl Feedback {
    /// Positive feedback.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cue: Cue::Success,
        }
    }

    /// Negative feedback.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cue: Cue::Failure,
        }
    }
}

/// The player (or other agent) that owns containers and interacts with grid views.
pub trait Actor {
    /// Stable identity, used to scope events to views.
    fn name(&self) -> &str;
    /// False once the actor disconnected; most operations then fail with `InvalidState`.
    fn is_online(&self) -> bool;
    /// The actor's private storage.
    fn inventory(&self) -> &Inventory;
    /// Mutable access to the actor's private storage.
    fn inventory_mut(&mut self) -> &mut Inventory;
    /// Whether the host grants `node` to this actor.
    fn has_permission(&self, node: &str) -> bool;
    /// Deliver a feedback message.
    fn notify(&mut self, feedback: Feedback);
}

/// Host side of grid rendering.
pub trait GridRenderer {
    /// Show `frame` to `actor`, replacing whatever grid they had open.
    fn render(&mut self, actor: &dyn Actor, frame: &Frame);
    /// Close the grid identified by `view` for `actor`.
    fn close(&mut self, actor: &dyn Actor, view: ViewId);
}

/// In-memory actor for embedding hosts, tools and tests.
#[derive(Clone, Debug)]
pub struct SimpleActor {
    name: String,
    online: bool,
    inventory: Inventory,
    granted: BTreeSet<String>,
    inbox: Vec<Feedback>,
}

impl SimpleActor {
    /// Storage slots of a standard player inventory.
    pub const INVENTORY_SIZE: usize = 36;

    /// What: Create an online actor with an empty standard inventory and no permissions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            online: true,
            inventory: Inventory::new(Self::INVENTORY_SIZE),
            granted: BTreeSet::new(),
            inbox: Vec::new(),
        }
    }

    /// Grant a permission node.
    pub fn grant(&mut self, node: impl Into<String>) {
        self.granted.insert(node.into());
    }

    /// Revoke a permission node.
    pub fn revoke(&mut self, node: &str) {
        self.granted.remove(node);
    }

    /// Mark the actor as connected or disconnected.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    /// Feedback received so far, oldest first.
    #[must_use]
    pub fn inbox(&self) -> &[Feedback] {
        &self.inbox
    }

    /// Most recent feedback, if any.
    #[must_use]
    pub fn last_feedback(&self) -> Option<&Feedback> {
        self.inbox.last()
    }
}

impl Actor for SimpleActor {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_online(&self) -> bool {
        self.online
    }

    fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    fn has_permission(&self, node: &str) -> bool {
        self.granted.contains(node)
    }

    fn notify(&mut self, feedback: Feedback) {
        tracing::debug!(actor = %self.name, message = %feedback.message, cue = ?feedback.cue, "[Host] Feedback");
        self.inbox.push(feedback);
    }
}
