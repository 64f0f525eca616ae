//! Context-menu model.
//!
//! The pager describes its right-click menu as plain data; the host panel
//! owns the actual widget and reports picks back as
//! [`Event::MenuActivated`](crate::event::Event::MenuActivated).

/// What a menu entry does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Activate the cell at this grid coordinate.
    Activate { col: usize, row: usize },
    /// Open the host's preferences dialog.
    Preferences,
}

/// One entry of the pager's context menu, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub action: MenuAction,
}

/// Build the menu for a `cols × rows` grid.
///
/// One entry per cell, walking each column top to bottom before moving to
/// the next column (the same order the scroll wheel traverses), followed by
/// a `Preferences` entry.  In `pattern`, `%x` and `%y` expand to the
/// 1-based column and row, and `%n` to the 1-based workspace number counted
/// row by row.
pub fn entries(pattern: &str, cols: usize, rows: usize) -> Vec<MenuEntry> {
    let mut entries = Vec::with_capacity(cols * rows + 1);
    for col in 0..cols {
        for row in 0..rows {
            let label = pattern
                .replace("%x", &(col + 1).to_string())
                .replace("%y", &(row + 1).to_string())
                .replace("%n", &(col + row * cols + 1).to_string());
            entries.push(MenuEntry {
                label,
                action: MenuAction::Activate { col, row },
            });
        }
    }
    entries.push(MenuEntry {
        label: "Preferences".to_owned(),
        action: MenuAction::Preferences,
    });
    entries
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_entry_per_cell_plus_preferences() {
        let entries = entries("%n", 2, 3);
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[6].label, "Preferences");
        assert_eq!(entries[6].action, MenuAction::Preferences);
    }

    #[test]
    fn entries_walk_columns_but_number_rows() {
        // The menu lists column by column while %n counts row by row, so the
        // labels come out interleaved.
        let entries = entries("%n", 2, 2);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["1", "3", "2", "4", "Preferences"]);
        assert_eq!(entries[1].action, MenuAction::Activate { col: 0, row: 1 });
        assert_eq!(entries[2].action, MenuAction::Activate { col: 1, row: 0 });
    }

    #[test]
    fn default_pattern_expands_all_placeholders() {
        let entries = entries("Workspace %n [%x,%y]", 2, 2);
        assert_eq!(entries[0].label, "Workspace 1 [1,1]");
        assert_eq!(entries[3].label, "Workspace 4 [2,2]");
    }

    #[test]
    fn pattern_without_placeholders_is_used_verbatim() {
        let entries = entries("desk", 1, 2);
        assert_eq!(entries[0].label, "desk");
        assert_eq!(entries[1].label, "desk");
    }

    #[test]
    fn single_cell_grid_still_gets_preferences() {
        let entries = entries("%n", 1, 1);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, MenuAction::Activate { col: 0, row: 0 });
        assert_eq!(entries[1].action, MenuAction::Preferences);
    }
}
