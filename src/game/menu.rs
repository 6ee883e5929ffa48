//! Main Menu Visibility
//!
//! The menu is a set of host UI elements. The controller hides them when a
//! session starts and shows them again when the game ends.

/// A UI element the controller can switch on and off.
pub trait MenuToggle {
    /// Set the element active (visible) or inactive.
    fn set_active(&mut self, active: bool);
}

/// Minimal menu element tracking its own visibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntity {
    /// Element name, for logs.
    pub name: String,
    /// Is the element shown?
    pub active: bool,
}

impl MenuEntity {
    /// Create an element that starts visible.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
        }
    }
}

impl MenuToggle for MenuEntity {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Menu handles gathered once at session start.
#[derive(Clone, Debug, Default)]
pub struct MainMenu<M> {
    entries: Vec<M>,
}

impl<M: MenuToggle> MainMenu<M> {
    /// Collect the menu handles.
    pub fn new(entries: Vec<M>) -> Self {
        Self { entries }
    }

    /// Set every entry inactive.
    pub fn hide(&mut self) {
        self.set_all(false);
    }

    /// Set every entry active.
    pub fn show(&mut self) {
        self.set_all(true);
    }

    fn set_all(&mut self, active: bool) {
        for entry in &mut self.entries {
            entry.set_active(active);
        }
    }

    /// Menu handles.
    pub fn entries(&self) -> &[M] {
        &self.entries
    }

    /// Number of handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Are there no handles?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hide_and_show() {
        let mut menu = MainMenu::new(vec![MenuEntity::new("title"), MenuEntity::new("play")]);

        menu.hide();
        assert!(menu.entries().iter().all(|e| !e.active));

        menu.show();
        assert!(menu.entries().iter().all(|e| e.active));
    }

    #[test]
    fn test_empty_menu() {
        let mut menu: MainMenu<MenuEntity> = MainMenu::new(Vec::new());
        menu.hide();
        assert!(menu.is_empty());
    }
}
