//! Concrete screens: the container main view, its customizer and the admin settings.

mod admin;
mod customizer;
mod main_view;

pub use admin::{AdminAction, AdminView, hotbar_prefix, inventory_contents, open_admin_menu};
pub use customizer::{CustomizeAction, CustomizerView, MAX_NAME_WIDTH, NAME_TAG_KIND};
pub use main_view::{MainAction, MainView};
