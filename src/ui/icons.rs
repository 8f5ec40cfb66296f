//! Presentation stacks for buttons and fillers.

use crate::item::{ItemMeta, ItemStack};

/// Kind used for inert filler panes.
pub const FILLER_KIND: &str = "gray_stained_glass_pane";

/// What: Named single-unit stack with optional description lines.
#[must_use]
pub fn button(kind: &str, name: &str, lore: &[String]) -> ItemStack {
    ItemStack::new(kind, 1).with_meta(ItemMeta {
        display_name: Some(name.to_string()),
        lore: lore.to_vec(),
        ..ItemMeta::default()
    })
}

/// Blank pane for unused control slots.
#[must_use]
pub fn filler() -> ItemStack {
    button(FILLER_KIND, " ", &[])
}

/// What: On/off indicator for a boolean setting.
#[must_use]
pub fn toggle(label: &str, enabled: bool) -> ItemStack {
    let (kind, state) = if enabled {
        ("lime_dye", "Required")
    } else {
        ("gray_dye", "Not required")
    };
    button(
        kind,
        label,
        &[state.to_string(), "Click to toggle".to_string()],
    )
}

/// Describe an item list as lore lines (`3x leather`).
#[must_use]
pub fn item_lines(items: &[ItemStack]) -> Vec<String> {
    if items.is_empty() {
        return vec!["Nothing".to_string()];
    }
    items
        .iter()
        .map(|stack| format!("{}x {}", stack.amount, stack.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_reflects_state() {
        assert_eq!(toggle("Rename", true).kind, "lime_dye");
        let off = toggle("Rename", false);
        assert_eq!(off.kind, "gray_dye");
        let meta = off.meta.expect("meta");
        assert_eq!(meta.display_name.as_deref(), Some("Rename"));
        assert_eq!(meta.lore[0], "Not required");
    }

    #[test]
    fn item_lines_lists_amounts() {
        assert_eq!(item_lines(&[]), vec!["Nothing".to_string()]);
        assert_eq!(
            item_lines(&[ItemStack::new("leather", 8), ItemStack::new("diamond", 4)]),
            vec!["8x leather".to_string(), "4x diamond".to_string()]
        );
    }
}
