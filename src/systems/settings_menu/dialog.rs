use bevy::prelude::*;

use super::{
    defs::{DialogFrame, StateClass},
    navigation::{NavigationCoordinator, PresentationContext},
    registry::EntryRegistry,
    surface::SettingsSurface,
};

#[derive(Debug)]
pub struct DialogController {
    frame: DialogFrame,
    visible: bool,
    session: u64,
    trigger_enabled: bool,
}

impl DialogController {
    pub fn new(frame: DialogFrame) -> Self {
        Self {
            frame,
            visible: false,
            session: 0,
            trigger_enabled: false,
        }
    }

    pub fn frame(&self) -> DialogFrame {
        self.frame
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn show(
        &mut self,
        navigation: &NavigationCoordinator,
        registry: &EntryRegistry,
        cx: &mut PresentationContext,
    ) {
        cx.surface.set_hidden(self.frame.dialog, false);
        self.visible = true;
        if navigation.state().is_main() {
            cx.show_main_panel();
        }
        let panel = navigation.current_panel(&self.frame, |id| registry.get(id));
        cx.fit_dialog_to(panel);
        trace!("settings dialog shown (session {})", self.session);
    }

    /// Closes the dialog from any navigation state. Work scheduled before
    /// this call is dropped when it comes due.
    pub fn hide(
        &mut self,
        navigation: &mut NavigationCoordinator,
        registry: &EntryRegistry,
        cx: &mut PresentationContext,
    ) {
        cx.surface.set_hidden(self.frame.dialog, true);
        self.visible = false;
        navigation.reset();
        cx.show_main_panel();
        cx.fit_dialog_to(self.frame.main_panel);
        for row in registry.iter() {
            row.reset(cx);
        }
        self.session += 1;
        cx.session = self.session;
        trace!("settings dialog hidden (session now {})", self.session);
    }

    pub fn toggle(
        &mut self,
        navigation: &mut NavigationCoordinator,
        registry: &EntryRegistry,
        cx: &mut PresentationContext,
    ) {
        if self.visible {
            self.hide(navigation, registry, cx);
        } else {
            self.show(navigation, registry, cx);
        }
    }

    pub fn set_trigger_enabled(&mut self, enabled: bool, surface: &mut dyn SettingsSurface) {
        if self.trigger_enabled == enabled {
            return;
        }
        self.trigger_enabled = enabled;
        surface.set_class(self.frame.trigger, StateClass::Disabled, !enabled);
        surface.set_hidden(self.frame.trigger, !enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::settings_menu::{
        defs::PanelSize, scheduler::DeferredQueue, size_cache::SizeCache,
        test_surface::RecordingSurface,
    };

    fn frame(surface: &mut RecordingSurface) -> DialogFrame {
        DialogFrame {
            trigger: surface.entity(),
            dialog: surface.entity(),
            content: surface.entity(),
            main_panel: surface.entity(),
        }
    }

    #[test]
    fn toggle_shows_then_hides_and_bumps_session() {
        let mut surface =
            RecordingSurface::new().with_default_layout(PanelSize::new(200.0, 80.0));
        let frame = frame(&mut surface);
        let mut dialog = DialogController::new(frame);
        let mut navigation = NavigationCoordinator::default();
        let registry = EntryRegistry::default();
        let mut sizes = SizeCache::default();
        let mut deferred = DeferredQueue::default();
        let mut cx = PresentationContext {
            surface: &mut surface,
            sizes: &mut sizes,
            deferred: &mut deferred,
            frame,
            session: dialog.session(),
        };

        dialog.toggle(&mut navigation, &registry, &mut cx);
        assert!(dialog.is_visible());
        assert_eq!(dialog.session(), 0);

        dialog.toggle(&mut navigation, &registry, &mut cx);
        assert!(!dialog.is_visible());
        assert_eq!(dialog.session(), 1);
        assert_eq!(cx.session, 1);

        assert!(surface.is_hidden(frame.dialog));
        assert_eq!(surface.size(frame.dialog), Some(PanelSize::new(200.0, 80.0)));
        assert_eq!(surface.opacity(frame.main_panel), Some(1.0));
    }

    #[test]
    fn trigger_state_is_only_written_on_change() {
        let mut surface = RecordingSurface::new();
        let frame = frame(&mut surface);
        let mut dialog = DialogController::new(frame);

        dialog.set_trigger_enabled(false, &mut surface);
        assert!(surface.calls().is_empty());

        dialog.set_trigger_enabled(true, &mut surface);
        assert!(dialog.trigger_enabled());
        assert!(!surface.has_class(frame.trigger, StateClass::Disabled));
        assert!(!surface.is_hidden(frame.trigger));

        dialog.set_trigger_enabled(false, &mut surface);
        assert!(surface.has_class(frame.trigger, StateClass::Disabled));
        assert!(surface.is_hidden(frame.trigger));
    }
}
