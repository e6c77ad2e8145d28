use bevy::prelude::*;

use super::{
    defs::{Animate, DialogFrame, EntryId, StateClass, StyleProperty},
    entry_row::EntryRow,
    error::NavigationError,
    scheduler::{DeferredQueue, DeferredStep},
    size_cache::SizeCache,
    surface::SettingsSurface,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NavigationState {
    #[default]
    Main,
    TransitioningToSub(EntryId),
    Sub(EntryId),
    TransitioningToMain(EntryId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationMode {
    Main,
    TransitioningToSub,
    Sub,
    TransitioningToMain,
}

impl NavigationState {
    pub fn mode(&self) -> NavigationMode {
        match self {
            Self::Main => NavigationMode::Main,
            Self::TransitioningToSub(_) => NavigationMode::TransitioningToSub,
            Self::Sub(_) => NavigationMode::Sub,
            Self::TransitioningToMain(_) => NavigationMode::TransitioningToMain,
        }
    }

    pub fn active_entry(&self) -> Option<&EntryId> {
        match self {
            Self::Main => None,
            Self::TransitioningToSub(id) | Self::Sub(id) | Self::TransitioningToMain(id) => {
                Some(id)
            }
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self, Self::Main)
    }
}

pub struct PresentationContext<'a> {
    pub surface: &'a mut dyn SettingsSurface,
    pub sizes: &'a mut SizeCache,
    pub deferred: &'a mut DeferredQueue,
    pub frame: DialogFrame,
    pub session: u64,
}

impl PresentationContext<'_> {
    pub fn fit_dialog_to(&mut self, panel: Entity) {
        if let Some(size) = self.sizes.measure(panel, self.frame.dialog, self.surface) {
            self.surface.set_size(self.frame.dialog, size);
        }
    }

    pub fn show_main_panel(&mut self) {
        let main_panel = self.frame.main_panel;
        self.surface.set_hidden(main_panel, false);
        self.surface.set_opacity(main_panel, 1.0, Animate::Immediate);
    }
}

#[derive(Debug, Default)]
pub struct NavigationCoordinator {
    state: NavigationState,
    slide_out_started: bool,
}

impl NavigationCoordinator {
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn active_entry(&self) -> Option<&EntryId> {
        self.state.active_entry()
    }

    pub fn current_panel<'r>(
        &self,
        frame: &DialogFrame,
        find_row: impl Fn(&EntryId) -> Option<&'r EntryRow>,
    ) -> Entity {
        match &self.state {
            NavigationState::Sub(id) | NavigationState::TransitioningToSub(id) => {
                find_row(id).map_or(frame.main_panel, EntryRow::panel)
            }
            NavigationState::Main | NavigationState::TransitioningToMain(_) => frame.main_panel,
        }
    }

    pub fn activate(
        &mut self,
        row: &EntryRow,
        cx: &mut PresentationContext,
    ) -> Result<(), NavigationError> {
        match &self.state {
            NavigationState::Main => {}
            NavigationState::Sub(active) if active == row.id() => {
                self.fold(row, cx);
                return Ok(());
            }
            other => return Err(NavigationError::TransitionInFlight(other.mode())),
        }

        cx.surface.set_opacity(cx.frame.main_panel, 0.0, Animate::Animated);
        cx.surface.set_hidden(row.panel(), false);
        cx.surface.set_class(row.row(), StateClass::Open, true);
        cx.deferred.next_frame(cx.session, DeferredStep::CompleteOpen(row.id().clone()));

        trace!("settings menu: Main -> TransitioningToSub({})", row.id());
        self.state = NavigationState::TransitioningToSub(row.id().clone());
        Ok(())
    }

    pub fn complete_open(&mut self, row: &EntryRow, cx: &mut PresentationContext) -> bool {
        if self.state != NavigationState::TransitioningToSub(row.id().clone())
            || !cx.surface.exists(row.panel())
        {
            return false;
        }

        cx.surface.set_opacity(row.panel(), 1.0, Animate::Animated);
        cx.surface.set_margin_right(row.panel(), 0.0, Animate::Animated);
        cx.surface.set_hidden(cx.frame.main_panel, true);
        cx.fit_dialog_to(row.panel());

        trace!("settings menu: TransitioningToSub({0}) -> Sub({0})", row.id());
        self.state = NavigationState::Sub(row.id().clone());
        true
    }

    pub fn back(
        &mut self,
        row: &EntryRow,
        cx: &mut PresentationContext,
    ) -> Result<(), NavigationError> {
        match &self.state {
            NavigationState::Sub(active) if active == row.id() => {}
            other => return Err(NavigationError::TransitionInFlight(other.mode())),
        }

        let main_panel = cx.frame.main_panel;
        cx.surface.set_hidden(main_panel, false);
        cx.surface.set_opacity(main_panel, 0.0, Animate::Immediate);
        cx.fit_dialog_to(main_panel);
        cx.surface.set_class(row.row(), StateClass::Open, false);
        cx.deferred.next_frame(cx.session, DeferredStep::CompleteBack(row.id().clone()));

        trace!("settings menu: Sub({0}) -> TransitioningToMain({0})", row.id());
        self.state = NavigationState::TransitioningToMain(row.id().clone());
        self.slide_out_started = false;
        Ok(())
    }

    pub fn complete_back(&mut self, row: &EntryRow, cx: &mut PresentationContext) -> bool {
        if self.state != NavigationState::TransitioningToMain(row.id().clone())
            || self.slide_out_started
        {
            return false;
        }

        let width = cx.sizes.cached(row.panel()).map_or(0.0, |size| size.width);
        cx.surface.set_opacity(cx.frame.main_panel, 1.0, Animate::Animated);
        cx.surface.set_margin_right(row.panel(), -width, Animate::Animated);
        self.slide_out_started = true;
        true
    }

    /// Only the right-margin slide of the panel being left ends a back transition.
    pub fn transition_finished(
        &mut self,
        row: &EntryRow,
        property: StyleProperty,
        cx: &mut PresentationContext,
    ) -> bool {
        if property != StyleProperty::MarginRight
            || !self.slide_out_started
            || self.state != NavigationState::TransitioningToMain(row.id().clone())
        {
            return false;
        }

        cx.surface.set_hidden(row.panel(), true);
        cx.surface.set_opacity(row.panel(), 0.0, Animate::Immediate);

        trace!("settings menu: TransitioningToMain({}) -> Main", row.id());
        self.state = NavigationState::Main;
        self.slide_out_started = false;
        true
    }

    fn fold(&mut self, row: &EntryRow, cx: &mut PresentationContext) {
        row.reset(cx);
        cx.show_main_panel();
        cx.fit_dialog_to(cx.frame.main_panel);

        trace!("settings menu: Sub({}) folded -> Main", row.id());
        self.state = NavigationState::Main;
        self.slide_out_started = false;
    }

    pub fn reset(&mut self) {
        if !self.state.is_main() {
            trace!("settings menu: {:?} -> Main (dialog closed)", self.state.mode());
        }
        self.state = NavigationState::Main;
        self.slide_out_started = false;
    }

    pub fn entry_removed(&mut self, id: &EntryId, cx: &mut PresentationContext) -> bool {
        if self.active_entry() != Some(id) {
            return false;
        }
        cx.show_main_panel();
        debug!("settings menu: active entry `{id}` removed; forcing Main");
        self.reset();
        true
    }
}
