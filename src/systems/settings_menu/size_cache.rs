use std::collections::{BTreeSet, HashMap};

use bevy::prelude::*;

use super::{defs::PanelSize, surface::SettingsSurface};

#[derive(Debug, Default)]
pub struct SizeCache {
    sizes: HashMap<Entity, PanelSize>,
    pending: BTreeSet<Entity>,
}

impl SizeCache {
    pub fn cached(&self, panel: Entity) -> Option<PanelSize> {
        self.sizes.get(&panel).copied()
    }

    /// Cached size, or a fresh measurement taken with the dialog and panel
    /// briefly revealed. Unready layouts are queued for [`Self::retry_pending`].
    pub fn measure(
        &mut self,
        panel: Entity,
        dialog: Entity,
        surface: &mut dyn SettingsSurface,
    ) -> Option<PanelSize> {
        if let Some(size) = self.cached(panel) {
            return Some(size);
        }

        let measured = Self::read_revealed(panel, dialog, surface);
        match measured {
            Some(size) => {
                self.sizes.insert(panel, size);
            }
            None => {
                self.pending.insert(panel);
            }
        }
        measured
    }

    fn read_revealed(
        panel: Entity,
        dialog: Entity,
        surface: &mut dyn SettingsSurface,
    ) -> Option<PanelSize> {
        let dialog_hidden = surface.is_hidden(dialog);
        let panel_hidden = surface.is_hidden(panel);

        if dialog_hidden {
            surface.set_interactive(dialog, false);
            surface.set_hidden(dialog, false);
        }
        if panel_hidden {
            surface.set_hidden(panel, false);
        }

        let measured = surface.measure(panel).filter(PanelSize::is_measurable);

        if panel_hidden {
            surface.set_hidden(panel, true);
        }
        if dialog_hidden {
            surface.set_hidden(dialog, true);
            surface.set_interactive(dialog, true);
        }

        measured
    }

    pub fn invalidate(&mut self, panel: Entity) {
        self.sizes.remove(&panel);
        self.pending.insert(panel);
    }

    pub fn forget(&mut self, panel: Entity) {
        self.sizes.remove(&panel);
        self.pending.remove(&panel);
    }

    pub fn is_pending(&self, panel: Entity) -> bool {
        self.pending.contains(&panel)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn retry_pending(
        &mut self,
        dialog: Entity,
        surface: &mut dyn SettingsSurface,
    ) -> Vec<(Entity, PanelSize)> {
        let mut resolved = Vec::new();
        let pending: Vec<Entity> = self.pending.iter().copied().collect();
        for panel in pending {
            if !surface.exists(panel) {
                self.forget(panel);
                continue;
            }
            if let Some(size) = Self::read_revealed(panel, dialog, surface) {
                self.sizes.insert(panel, size);
                self.pending.remove(&panel);
                resolved.push((panel, size));
            }
        }
        resolved
    }
}
