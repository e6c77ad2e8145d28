use std::time::Duration;

use bevy::prelude::*;

use super::{
    defs::{Animate, DialogFrame, EntryId, ItemTarget, StateClass},
    error::{ConfigurationError, NavigationError},
    navigation::{NavigationCoordinator, PresentationContext},
    provider::{EntryDescriptor, OptionProvider, ProviderCatalog, ProviderKind, SharedProvider},
    scheduler::DeferredStep,
    surface::SettingsSurface,
};

pub struct EntryRow {
    id: EntryId,
    title: String,
    kind: ProviderKind,
    provider: SharedProvider,
    row: Entity,
    title_label: Entity,
    value_label: Entity,
    panel: Entity,
    back_row: Option<Entity>,
    items: Vec<Entity>,
    value: Option<String>,
    first_measured: bool,
}

impl EntryRow {
    /// Resolves the provider before anything is spawned, so a rejected
    /// descriptor leaves no entities behind.
    pub fn spawn(
        descriptor: EntryDescriptor,
        catalog: &ProviderCatalog,
        frame: DialogFrame,
        surface: &mut dyn SettingsSurface,
    ) -> Result<Self, ConfigurationError> {
        if descriptor.id.is_empty() {
            return Err(ConfigurationError::EmptyEntryId);
        }
        let provider = descriptor.source.resolve(catalog)?;
        let title = descriptor.title.unwrap_or_else(|| provider.title());
        let kind = provider.kind();

        let parts = surface.spawn_entry_row(frame.main_panel, &descriptor.id);
        let panel = surface.spawn_submenu_panel(frame.content, &descriptor.id);

        Ok(Self {
            id: descriptor.id,
            title,
            kind,
            provider,
            row: parts.row,
            title_label: parts.title,
            value_label: parts.value,
            panel,
            back_row: None,
            items: Vec::new(),
            value: None,
            first_measured: false,
        })
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn provider(&self) -> &SharedProvider {
        &self.provider
    }

    pub fn row(&self) -> Entity {
        self.row
    }

    pub fn panel(&self) -> Entity {
        self.panel
    }

    pub fn title_label(&self) -> Entity {
        self.title_label
    }

    pub fn value_label(&self) -> Entity {
        self.value_label
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn first_measured(&self) -> bool {
        self.first_measured
    }

    pub(super) fn note_measured(&mut self) {
        self.first_measured = true;
    }

    pub fn build(&mut self, cx: &mut PresentationContext) {
        let has_back_row = self
            .back_row
            .is_some_and(|back_row| cx.surface.exists(back_row));
        if !has_back_row {
            self.back_row = Some(cx.surface.spawn_back_row(self.panel, &self.id, &self.title));
        }

        self.render_items(cx.surface);
        cx.surface.set_text(self.title_label, &format!("{}:", self.title));

        let measured = cx.sizes.measure(self.panel, cx.frame.dialog, cx.surface);
        self.first_measured = measured.is_some();

        self.reset(cx);
        self.refresh_value(cx.surface);
    }

    fn render_items(&mut self, surface: &mut dyn SettingsSurface) {
        for item in self.items.drain(..) {
            surface.despawn(item);
        }
        let items = self.provider.items();
        self.items = surface.spawn_items(self.panel, &self.id, &items);
    }

    pub fn items_changed(&mut self, cx: &mut PresentationContext) {
        self.render_items(cx.surface);
        cx.sizes.invalidate(self.panel);
        self.refresh_value(cx.surface);
    }

    pub fn current_value_label(&self) -> Option<String> {
        match self.kind {
            ProviderKind::Generic => self
                .provider
                .items()
                .into_iter()
                .find(|item| item.selected)
                .map(|item| item.label),
            ProviderKind::DirectLabel => self.provider.direct_label(),
        }
    }

    pub fn refresh_value(&mut self, surface: &mut dyn SettingsSurface) -> bool {
        if self.kind == ProviderKind::Generic {
            for (item, option) in self.items.iter().zip(self.provider.items()) {
                surface.set_class(*item, StateClass::Selected, option.selected);
            }
        }

        let value = self.current_value_label();
        if value == self.value {
            return false;
        }
        surface.set_text(self.value_label, value.as_deref().unwrap_or_default());
        self.value = value;
        true
    }

    pub fn on_submenu_item_activated(
        &mut self,
        target: ItemTarget,
        navigation: &mut NavigationCoordinator,
        cx: &mut PresentationContext,
        settle: Duration,
        close_dialog: bool,
    ) -> Result<(), NavigationError> {
        match target {
            ItemTarget::Back => navigation.back(self, cx),
            ItemTarget::Item(index) => {
                if index >= self.items.len() {
                    debug!("settings entry `{}`: item {index} out of range", self.id);
                    return Ok(());
                }
                cx.deferred.after(
                    cx.session,
                    DeferredStep::RefreshValue {
                        entry: self.id.clone(),
                        close_dialog,
                    },
                    settle,
                );
                Ok(())
            }
        }
    }

    pub fn reset(&self, cx: &mut PresentationContext) {
        cx.surface.set_hidden(self.panel, true);
        cx.surface.set_opacity(self.panel, 0.0, Animate::Immediate);
        self.park_offscreen(cx);
        cx.surface.set_class(self.row, StateClass::Open, false);
    }

    pub fn park_offscreen(&self, cx: &mut PresentationContext) {
        if let Some(size) = cx.sizes.cached(self.panel) {
            cx.surface.set_margin_right(self.panel, -size.width, Animate::Immediate);
        }
    }

    pub fn dispose(self, navigation: &mut NavigationCoordinator, cx: &mut PresentationContext) {
        navigation.entry_removed(&self.id, cx);
        cx.surface.despawn(self.row);
        cx.surface.despawn(self.panel);
        cx.sizes.forget(self.panel);
    }
}
