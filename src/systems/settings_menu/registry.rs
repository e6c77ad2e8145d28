use bevy::prelude::*;

use super::{defs::EntryId, entry_row::EntryRow, error::ConfigurationError};

#[derive(Default)]
pub struct EntryRegistry {
    rows: Vec<EntryRow>,
}

impl EntryRegistry {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.rows.iter().any(|row| row.id() == id)
    }

    pub fn get(&self, id: &EntryId) -> Option<&EntryRow> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn get_mut(&mut self, id: &EntryId) -> Option<&mut EntryRow> {
        self.rows.iter_mut().find(|row| row.id() == id)
    }

    pub fn by_panel(&self, panel: Entity) -> Option<&EntryRow> {
        self.rows.iter().find(|row| row.panel() == panel)
    }

    pub fn by_panel_mut(&mut self, panel: Entity) -> Option<&mut EntryRow> {
        self.rows.iter_mut().find(|row| row.panel() == panel)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryRow> {
        self.rows.iter()
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.rows.iter().map(|row| row.id().clone()).collect()
    }

    pub fn push(&mut self, row: EntryRow) -> Result<(), ConfigurationError> {
        if self.contains(row.id()) {
            return Err(ConfigurationError::DuplicateEntry(row.id().clone()));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn take(&mut self, id: &EntryId) -> Option<EntryRow> {
        let index = self.rows.iter().position(|row| row.id() == id)?;
        Some(self.rows.remove(index))
    }

    pub fn drain(&mut self) -> Vec<EntryRow> {
        std::mem::take(&mut self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::settings_menu::{
        defs::DialogFrame,
        provider::{EntryDescriptor, ProviderCatalog},
        test_surface::RecordingSurface,
    };

    fn spawn_rows(surface: &mut RecordingSurface, kinds: &[&str]) -> Vec<EntryRow> {
        let frame = DialogFrame {
            trigger: surface.entity(),
            dialog: surface.entity(),
            content: surface.entity(),
            main_panel: surface.entity(),
        };
        let catalog = ProviderCatalog::player_defaults();
        kinds
            .iter()
            .map(|kind| {
                let descriptor = EntryDescriptor::from_kind(*kind);
                EntryRow::spawn(descriptor, &catalog, frame, &mut *surface).expect("known kind")
            })
            .collect()
    }

    #[test]
    fn rows_keep_insertion_order_and_reject_duplicates() {
        let mut surface = RecordingSurface::new();
        let mut registry = EntryRegistry::default();
        let mut rows = spawn_rows(&mut surface, &["quality", "speed", "quality"]).into_iter();
        registry.push(rows.next().expect("first")).expect("unique");
        registry.push(rows.next().expect("second")).expect("unique");

        let duplicate = registry.push(rows.next().expect("third"));
        assert_eq!(
            duplicate,
            Err(ConfigurationError::DuplicateEntry(EntryId::new("quality")))
        );
        assert_eq!(
            registry.ids(),
            vec![EntryId::new("quality"), EntryId::new("speed")]
        );
    }

    #[test]
    fn take_and_lookup_by_panel() {
        let mut surface = RecordingSurface::new();
        let mut registry = EntryRegistry::default();
        for row in spawn_rows(&mut surface, &["speed", "captions"]) {
            registry.push(row).expect("unique ids");
        }

        let captions_panel = registry
            .get(&EntryId::new("captions"))
            .expect("captions")
            .panel();
        assert_eq!(
            registry.by_panel(captions_panel).map(EntryRow::id),
            Some(&EntryId::new("captions"))
        );

        let taken = registry.take(&EntryId::new("speed")).expect("speed");
        assert_eq!(taken.id(), &EntryId::new("speed"));
        assert!(registry.take(&EntryId::new("speed")).is_none());
        assert_eq!(registry.drain().len(), 1);
        assert!(registry.is_empty());
    }
}
