use std::fmt;

use bevy::prelude::*;
use enum_map::Enum;

use super::provider::EntryDescriptor;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanelSize {
    pub width: f32,
    pub height: f32,
}

impl PanelSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Opacity,
    MarginRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animate {
    Immediate,
    Animated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateClass {
    /// A row whose submenu is showing.
    Open,
    Disabled,
    /// The provider's current item inside a submenu.
    Selected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemTarget {
    Back,
    Item(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogFrame {
    pub trigger: Entity,
    pub dialog: Entity,
    pub content: Entity,
    pub main_panel: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowParts {
    pub row: Entity,
    pub title: Entity,
    pub value: Entity,
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct SettingsTrigger;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct SettingsDialog;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct MainPanel;

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct SubmenuPanel {
    pub entry: EntryId,
}

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct EntryRowButton {
    pub entry: EntryId,
}

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct BackRow {
    pub entry: EntryId,
}

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct SubmenuItemButton {
    pub entry: EntryId,
    pub index: usize,
}

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateClasses {
    pub open: bool,
    pub disabled: bool,
    pub selected: bool,
    pub inert: bool,
}

impl StateClasses {
    pub fn set(&mut self, class: StateClass, enabled: bool) {
        match class {
            StateClass::Open => self.open = enabled,
            StateClass::Disabled => self.disabled = enabled,
            StateClass::Selected => self.selected = enabled,
        }
    }

    pub fn has(&self, class: StateClass) -> bool {
        match class {
            StateClass::Open => self.open,
            StateClass::Disabled => self.disabled,
            StateClass::Selected => self.selected,
        }
    }
}

pub(super) mod palette {
    use bevy::prelude::Color;

    pub const DIALOG: Color = Color::srgba(0.09, 0.09, 0.11, 0.92);
    pub const TRIGGER: Color = Color::srgba(0.16, 0.16, 0.19, 0.9);
    pub const ROW: Color = Color::NONE;
    pub const ROW_OPEN: Color = Color::srgba(0.35, 0.38, 0.45, 0.6);
    pub const ROW_SELECTED: Color = Color::srgba(0.25, 0.45, 0.7, 0.5);
    pub const ROW_DISABLED: Color = Color::srgba(0.2, 0.2, 0.2, 0.4);
    pub const TEXT: Color = Color::srgb(0.93, 0.93, 0.95);
    pub const TEXT_MUTED: Color = Color::srgb(0.65, 0.67, 0.72);
}

// Host and pointer input.

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct SettingsTriggerActivated;

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct OutsideClick;

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct UserInactive;

#[derive(Message, Clone, Debug)]
pub struct AddSettingsEntry(pub EntryDescriptor);

/// `None` removes every entry.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct RemoveSettingsEntry(pub Option<EntryId>);

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct EntryRowActivated(pub EntryId);

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct SubmenuItemActivated {
    pub entry: EntryId,
    pub target: ItemTarget,
}

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct EntryItemsChanged(pub EntryId);

// Outputs.

#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct EntryRejected {
    pub entry: EntryId,
    pub reason: String,
}
