use std::time::Duration;

use bevy::prelude::*;

use super::{
    defs::{DialogFrame, EntryId, ItemTarget, StyleProperty},
    dialog::DialogController,
    entry_row::EntryRow,
    error::{ConfigurationError, NavigationError},
    navigation::{NavigationCoordinator, NavigationState, PresentationContext},
    provider::{EntryDescriptor, OptionProvider, ProviderCatalog},
    registry::EntryRegistry,
    scheduler::{DeferredQueue, DeferredStep},
    size_cache::SizeCache,
    surface::SettingsSurface,
};

#[derive(Resource)]
pub struct SettingsMenu {
    dialog: DialogController,
    navigation: NavigationCoordinator,
    registry: EntryRegistry,
    sizes: SizeCache,
    deferred: DeferredQueue,
}

struct MenuParts<'a> {
    cx: PresentationContext<'a>,
    dialog: &'a mut DialogController,
    navigation: &'a mut NavigationCoordinator,
    registry: &'a mut EntryRegistry,
}

impl SettingsMenu {
    pub fn new(frame: DialogFrame) -> Self {
        Self {
            dialog: DialogController::new(frame),
            navigation: NavigationCoordinator::default(),
            registry: EntryRegistry::default(),
            sizes: SizeCache::default(),
            deferred: DeferredQueue::default(),
        }
    }

    fn parts<'a>(&'a mut self, surface: &'a mut dyn SettingsSurface) -> MenuParts<'a> {
        let frame = self.dialog.frame();
        let session = self.dialog.session();
        MenuParts {
            cx: PresentationContext {
                surface,
                sizes: &mut self.sizes,
                deferred: &mut self.deferred,
                frame,
                session,
            },
            dialog: &mut self.dialog,
            navigation: &mut self.navigation,
            registry: &mut self.registry,
        }
    }

    pub fn frame(&self) -> DialogFrame {
        self.dialog.frame()
    }

    pub fn dialog(&self) -> &DialogController {
        &self.dialog
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub fn registry(&self) -> &EntryRegistry {
        &self.registry
    }

    pub fn sizes(&self) -> &SizeCache {
        &self.sizes
    }

    pub fn show(&mut self, surface: &mut dyn SettingsSurface) {
        let mut parts = self.parts(surface);
        parts.dialog.show(parts.navigation, parts.registry, &mut parts.cx);
    }

    pub fn hide(&mut self, surface: &mut dyn SettingsSurface) {
        let mut parts = self.parts(surface);
        parts.dialog.hide(parts.navigation, parts.registry, &mut parts.cx);
    }

    pub fn toggle(&mut self, surface: &mut dyn SettingsSurface) {
        if !self.dialog.trigger_enabled() {
            debug!("settings trigger pressed while disabled; ignoring");
            return;
        }
        let mut parts = self.parts(surface);
        parts.dialog.toggle(parts.navigation, parts.registry, &mut parts.cx);
    }

    pub fn dismiss(&mut self, surface: &mut dyn SettingsSurface) {
        if self.dialog.is_visible() {
            self.hide(surface);
        }
    }

    pub fn add_entry(
        &mut self,
        descriptor: EntryDescriptor,
        catalog: &ProviderCatalog,
        surface: &mut dyn SettingsSurface,
    ) -> Result<EntryId, ConfigurationError> {
        if self.registry.contains(&descriptor.id) {
            return Err(ConfigurationError::DuplicateEntry(descriptor.id));
        }

        let mut parts = self.parts(surface);
        let mut row = EntryRow::spawn(descriptor, catalog, parts.cx.frame, parts.cx.surface)?;
        row.build(&mut parts.cx);
        let id = row.id().clone();
        parts.registry.push(row)?;

        parts.dialog.set_trigger_enabled(true, parts.cx.surface);
        parts.cx.sizes.invalidate(parts.cx.frame.main_panel);
        trace!("settings entry `{id}` added");
        Ok(id)
    }

    /// Removes one entry, or every entry for `None`, then closes the dialog.
    pub fn remove_entry(
        &mut self,
        id: Option<&EntryId>,
        surface: &mut dyn SettingsSurface,
    ) -> usize {
        let mut parts = self.parts(surface);
        let removed = match id {
            Some(id) => parts.registry.take(id).into_iter().collect(),
            None => parts.registry.drain(),
        };
        if let (Some(id), true) = (id, removed.is_empty()) {
            debug!("cannot remove settings entry `{id}`: not registered");
        }

        let count = removed.len();
        for row in removed {
            trace!("settings entry `{}` removed", row.id());
            row.dispose(parts.navigation, &mut parts.cx);
        }
        if count > 0 {
            parts.cx.sizes.invalidate(parts.cx.frame.main_panel);
        }
        if parts.registry.is_empty() {
            parts.dialog.set_trigger_enabled(false, parts.cx.surface);
        }

        parts.dialog.hide(parts.navigation, parts.registry, &mut parts.cx);
        count
    }

    pub fn activate_entry(
        &mut self,
        id: &EntryId,
        surface: &mut dyn SettingsSurface,
    ) -> Result<(), NavigationError> {
        let mut parts = self.parts(surface);
        let row = parts
            .registry
            .get(id)
            .ok_or_else(|| NavigationError::UnknownEntry(id.clone()))?;
        parts.navigation.activate(row, &mut parts.cx)
    }

    pub fn activate_submenu_item(
        &mut self,
        entry: &EntryId,
        target: ItemTarget,
        settle: Duration,
        close_on_select: bool,
        surface: &mut dyn SettingsSurface,
    ) -> Result<(), NavigationError> {
        let mut parts = self.parts(surface);
        let row = parts
            .registry
            .get_mut(entry)
            .ok_or_else(|| NavigationError::UnknownEntry(entry.clone()))?;

        if let ItemTarget::Item(index) = target {
            if index < row.items().len() {
                row.provider().activate(index);
            }
        }
        row.on_submenu_item_activated(
            target,
            parts.navigation,
            &mut parts.cx,
            settle,
            close_on_select,
        )
    }

    pub fn items_changed(
        &mut self,
        entry: &EntryId,
        surface: &mut dyn SettingsSurface,
    ) -> Result<(), NavigationError> {
        let mut parts = self.parts(surface);
        let row = parts
            .registry
            .get_mut(entry)
            .ok_or_else(|| NavigationError::UnknownEntry(entry.clone()))?;
        row.items_changed(&mut parts.cx);
        Ok(())
    }

    pub fn run_deferred(&mut self, delta: Duration, surface: &mut dyn SettingsSurface) {
        let mut parts = self.parts(surface);
        for scheduled in parts.cx.deferred.advance(delta) {
            let current_session = parts.dialog.session();
            match scheduled.step {
                DeferredStep::CompleteOpen(id) | DeferredStep::CompleteBack(id)
                    if scheduled.session != current_session =>
                {
                    debug!(
                        "dropping transition step for `{id}` from closed session {}",
                        scheduled.session
                    );
                }
                DeferredStep::CompleteOpen(id) => {
                    let Some(row) = parts.registry.get(&id) else {
                        debug!("dropping open step for removed entry `{id}`");
                        continue;
                    };
                    if !parts.navigation.complete_open(row, &mut parts.cx) {
                        debug!("open step for `{id}` no longer matches navigation state");
                    }
                }
                DeferredStep::CompleteBack(id) => {
                    let Some(row) = parts.registry.get(&id) else {
                        debug!("dropping back step for removed entry `{id}`");
                        continue;
                    };
                    if !parts.navigation.complete_back(row, &mut parts.cx) {
                        debug!("back step for `{id}` no longer matches navigation state");
                    }
                }
                DeferredStep::RefreshValue {
                    entry,
                    close_dialog,
                } => {
                    let Some(row) = parts.registry.get_mut(&entry) else {
                        debug!("dropping value refresh for removed entry `{entry}`");
                        continue;
                    };
                    row.refresh_value(parts.cx.surface);

                    if close_dialog
                        && scheduled.session == current_session
                        && parts.dialog.is_visible()
                    {
                        parts.dialog.hide(parts.navigation, parts.registry, &mut parts.cx);
                    }
                }
            }
        }
    }

    pub fn transition_finished(
        &mut self,
        panel: Entity,
        property: StyleProperty,
        surface: &mut dyn SettingsSurface,
    ) -> bool {
        let mut parts = self.parts(surface);
        let Some(row) = parts.registry.by_panel(panel) else {
            return false;
        };
        if parts.navigation.active_entry() != Some(row.id()) {
            return false;
        }
        parts.navigation.transition_finished(row, property, &mut parts.cx)
    }

    pub fn retry_measurements(&mut self, surface: &mut dyn SettingsSurface) {
        if !self.sizes.has_pending() {
            return;
        }

        let mut parts = self.parts(surface);
        let dialog = parts.cx.frame.dialog;
        let resolved = parts.cx.sizes.retry_pending(dialog, parts.cx.surface);
        if resolved.is_empty() {
            return;
        }

        let current_panel = parts
            .navigation
            .current_panel(&parts.cx.frame, |id| parts.registry.get(id));
        for (panel, size) in resolved {
            if let Some(row) = parts.registry.by_panel_mut(panel) {
                row.note_measured();
                if parts.navigation.active_entry() != Some(row.id()) {
                    row.park_offscreen(&mut parts.cx);
                }
            }
            if panel == current_panel && parts.dialog.is_visible() {
                parts.cx.surface.set_size(dialog, size);
            }
        }
    }
}
