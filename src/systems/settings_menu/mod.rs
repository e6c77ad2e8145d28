//! Settings overlay for a media player.
use bevy::prelude::*;

pub mod config;
mod controller;
pub mod defs;
mod dialog;
mod entry_row;
pub mod error;
mod navigation;
mod pointer;
pub mod provider;
mod registry;
mod root_spawn;
mod scheduler;
mod size_cache;
pub mod surface;
pub mod tween;

#[cfg(test)]
mod test_surface;

pub use config::{ConfigLoadError, SettingsMenuConfig};
pub use controller::SettingsMenu;
pub use defs::{
    AddSettingsEntry, EntryId, EntryItemsChanged, EntryRejected, EntryRowActivated, ItemTarget,
    OutsideClick, RemoveSettingsEntry, SettingsTriggerActivated, SubmenuItemActivated,
    UserInactive,
};
pub use dialog::DialogController;
pub use entry_row::EntryRow;
pub use error::{ConfigurationError, NavigationError};
pub use navigation::{NavigationCoordinator, NavigationMode, NavigationState};
pub use pointer::{SettingsPointerPlugin, UserActivity};
pub use provider::{
    ChoiceList, EntryDescriptor, EntrySource, OptionItem, OptionProvider, PlaybackRate,
    ProviderCatalog, ProviderKind, SharedProvider,
};
pub use registry::EntryRegistry;
pub use scheduler::{DeferredQueue, DeferredStep};
pub use size_cache::SizeCache;

use defs::{palette, SettingsDialog, SettingsTrigger, StateClasses, StyleProperty};
use surface::UiSurface;
use tween::{PanelStyle, TransitionFinished};

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum SettingsMenuSystems {
    Input,
    Core,
    Visual,
}

pub struct SettingsMenuPlugin {
    pub config: SettingsMenuConfig,
    pub catalog: ProviderCatalog,
}

impl Default for SettingsMenuPlugin {
    fn default() -> Self {
        Self {
            config: SettingsMenuConfig::embedded(),
            catalog: ProviderCatalog::player_defaults(),
        }
    }
}

impl SettingsMenuPlugin {
    pub fn with_config(mut self, config: SettingsMenuConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog(mut self, catalog: ProviderCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}

impl Plugin for SettingsMenuPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .insert_resource(self.catalog.clone())
            .add_message::<SettingsTriggerActivated>()
            .add_message::<OutsideClick>()
            .add_message::<UserInactive>()
            .add_message::<AddSettingsEntry>()
            .add_message::<RemoveSettingsEntry>()
            .add_message::<EntryRowActivated>()
            .add_message::<SubmenuItemActivated>()
            .add_message::<EntryItemsChanged>()
            .add_message::<EntryRejected>()
            .add_message::<TransitionFinished>();
        app.configure_sets(
            Update,
            (
                SettingsMenuSystems::Input,
                SettingsMenuSystems::Core.after(SettingsMenuSystems::Input),
                SettingsMenuSystems::Visual.after(SettingsMenuSystems::Core),
            ),
        );
        app.add_systems(Startup, spawn_settings_menu);
        app.add_systems(
            Update,
            (
                retry_pending_measurements,
                apply_transition_finished,
                run_deferred_steps,
                apply_entry_lifecycle,
                apply_dialog_requests,
                apply_navigation_requests,
            )
                .chain()
                .in_set(SettingsMenuSystems::Core)
                .run_if(resource_exists::<SettingsMenu>),
        );
        app.add_systems(
            Update,
            (
                tween::advance_panel_tweens,
                sync_panel_styles,
                sync_state_classes,
            )
                .chain()
                .in_set(SettingsMenuSystems::Visual),
        );
    }
}

fn spawn_settings_menu(
    mut commands: Commands,
    config: Res<SettingsMenuConfig>,
    mut add_entries: MessageWriter<AddSettingsEntry>,
) {
    let frame = root_spawn::spawn_settings_frame(&mut commands);
    commands.insert_resource(SettingsMenu::new(frame));
    for kind in &config.entries {
        add_entries.write(AddSettingsEntry(EntryDescriptor::from_kind(kind.clone())));
    }
}

fn retry_pending_measurements(mut menu: ResMut<SettingsMenu>, mut surface: UiSurface) {
    menu.retry_measurements(&mut surface);
}

fn run_deferred_steps(time: Res<Time>, mut menu: ResMut<SettingsMenu>, mut surface: UiSurface) {
    menu.run_deferred(time.delta(), &mut surface);
}

fn apply_transition_finished(
    mut finished: MessageReader<TransitionFinished>,
    mut menu: ResMut<SettingsMenu>,
    mut surface: UiSurface,
) {
    for transition in finished.read() {
        menu.transition_finished(transition.panel, transition.property, &mut surface);
    }
}

fn apply_entry_lifecycle(
    mut adds: MessageReader<AddSettingsEntry>,
    mut removes: MessageReader<RemoveSettingsEntry>,
    mut changes: MessageReader<EntryItemsChanged>,
    catalog: Res<ProviderCatalog>,
    mut rejected: MessageWriter<EntryRejected>,
    mut menu: ResMut<SettingsMenu>,
    mut surface: UiSurface,
) {
    for AddSettingsEntry(descriptor) in adds.read() {
        let entry = descriptor.id.clone();
        if let Err(error) = menu.add_entry(descriptor.clone(), &catalog, &mut surface) {
            warn!("rejected settings entry `{entry}`: {error}");
            rejected.write(EntryRejected {
                entry,
                reason: error.to_string(),
            });
        }
    }

    for RemoveSettingsEntry(entry) in removes.read() {
        menu.remove_entry(entry.as_ref(), &mut surface);
    }

    for EntryItemsChanged(entry) in changes.read() {
        if let Err(error) = menu.items_changed(entry, &mut surface) {
            debug!("ignoring item change: {error}");
        }
    }
}

fn apply_dialog_requests(
    mut triggers: MessageReader<SettingsTriggerActivated>,
    mut outside_clicks: MessageReader<OutsideClick>,
    mut inactivity: MessageReader<UserInactive>,
    mut menu: ResMut<SettingsMenu>,
    mut surface: UiSurface,
) {
    for _ in triggers.read() {
        menu.toggle(&mut surface);
    }
    let clicked_outside = outside_clicks.read().count() > 0;
    let went_idle = inactivity.read().count() > 0;
    if clicked_outside || went_idle {
        menu.dismiss(&mut surface);
    }
}

fn apply_navigation_requests(
    mut rows: MessageReader<EntryRowActivated>,
    mut items: MessageReader<SubmenuItemActivated>,
    config: Res<SettingsMenuConfig>,
    mut menu: ResMut<SettingsMenu>,
    mut surface: UiSurface,
) {
    for EntryRowActivated(entry) in rows.read() {
        if let Err(error) = menu.activate_entry(entry, &mut surface) {
            debug!("ignoring settings row activation: {error}");
        }
    }

    for SubmenuItemActivated { entry, target } in items.read() {
        if let Err(error) = menu.activate_submenu_item(
            entry,
            *target,
            config.settle_delay(),
            config.close_on_select,
            &mut surface,
        ) {
            debug!("ignoring settings item activation: {error}");
        }
    }
}

/// Mirrors tweened values onto layout and colors. Panel opacity scales the
/// panel background and every descendant label.
fn sync_panel_styles(
    mut panels: Query<
        (Entity, &PanelStyle, &mut Node, Option<&mut BackgroundColor>),
        Changed<PanelStyle>,
    >,
    children: Query<&Children>,
    mut labels: Query<&mut TextColor, Without<PanelStyle>>,
) {
    for (panel, style, mut node, background) in &mut panels {
        node.margin.right = Val::Px(style.value(StyleProperty::MarginRight));

        let opacity = style.value(StyleProperty::Opacity).clamp(0.0, 1.0);
        if let Some(mut background) = background {
            background.0 = palette::DIALOG.with_alpha(palette::DIALOG.alpha() * opacity);
        }
        for descendant in children.iter_descendants(panel) {
            if let Ok(mut color) = labels.get_mut(descendant) {
                color.0.set_alpha(opacity);
            }
        }
    }
}

fn sync_state_classes(
    mut classes: Query<
        (&StateClasses, &mut BackgroundColor, Has<SettingsTrigger>),
        (Changed<StateClasses>, Without<SettingsDialog>),
    >,
) {
    for (state, mut background, is_trigger) in &mut classes {
        background.0 = if state.disabled {
            palette::ROW_DISABLED
        } else if is_trigger {
            palette::TRIGGER
        } else if state.open {
            palette::ROW_OPEN
        } else if state.selected {
            palette::ROW_SELECTED
        } else {
            palette::ROW
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_app(config: SettingsMenuConfig) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(SettingsMenuPlugin::default().with_config(config));
        app.update();
        app
    }

    fn menu(app: &App) -> &SettingsMenu {
        app.world().resource::<SettingsMenu>()
    }

    #[test]
    fn startup_spawns_frame_and_configured_entries() {
        let config = SettingsMenuConfig {
            entries: vec!["speed".to_string(), "captions".to_string()],
            ..SettingsMenuConfig::instant()
        };
        let app = settings_app(config);

        let menu = menu(&app);
        assert_eq!(
            menu.registry().ids(),
            vec![EntryId::new("speed"), EntryId::new("captions")]
        );
        assert!(menu.dialog().trigger_enabled());
        assert!(!menu.dialog().is_visible());

        let frame = menu.frame();
        let world = app.world();
        let trigger_name = world.get::<Name>(frame.trigger).expect("trigger has a name");
        assert_eq!(trigger_name.as_str(), "settings_trigger");
        assert_eq!(
            world.get::<Visibility>(frame.dialog),
            Some(&Visibility::Hidden)
        );
    }

    #[test]
    fn unknown_configured_kind_is_rejected_with_message() {
        let config = SettingsMenuConfig {
            entries: vec!["speed".to_string(), "chapters".to_string()],
            ..SettingsMenuConfig::instant()
        };
        let mut app = settings_app(config);

        assert_eq!(menu(&app).registry().ids(), vec![EntryId::new("speed")]);

        let messages = app.world_mut().resource_mut::<Messages<EntryRejected>>();
        let mut cursor = messages.get_cursor();
        let rejected: Vec<_> = cursor.read(&messages).cloned().collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].entry, EntryId::new("chapters"));
        assert!(rejected[0].reason.contains("does not exist"));
    }

    #[test]
    fn trigger_message_toggles_dialog_visibility() {
        let mut app = settings_app(SettingsMenuConfig {
            entries: vec!["captions".to_string()],
            ..SettingsMenuConfig::instant()
        });
        let dialog = menu(&app).frame().dialog;

        app.world_mut().write_message(SettingsTriggerActivated);
        app.update();
        assert!(menu(&app).dialog().is_visible());
        assert_eq!(
            app.world().get::<Visibility>(dialog),
            Some(&Visibility::Inherited)
        );

        app.world_mut().write_message(OutsideClick);
        app.update();
        assert!(!menu(&app).dialog().is_visible());
        assert_eq!(
            app.world().get::<Visibility>(dialog),
            Some(&Visibility::Hidden)
        );
    }

    #[test]
    fn user_inactivity_closes_dialog_from_submenu() {
        let mut app = settings_app(SettingsMenuConfig {
            entries: vec!["captions".to_string()],
            ..SettingsMenuConfig::instant()
        });
        let captions = EntryId::new("captions");
        app.world_mut().write_message(SettingsTriggerActivated);
        app.update();
        app.world_mut()
            .write_message(EntryRowActivated(captions.clone()));
        app.update();
        app.update();
        assert_eq!(menu(&app).navigation(), &NavigationState::Sub(captions.clone()));

        app.world_mut().write_message(UserInactive);
        app.update();

        let menu = menu(&app);
        assert!(!menu.dialog().is_visible());
        assert_eq!(menu.navigation(), &NavigationState::Main);
        let panel = menu.registry().get(&captions).expect("captions row").panel();
        let world = app.world();
        assert_eq!(world.get::<Visibility>(panel), Some(&Visibility::Hidden));
        assert_eq!(
            world.get::<Visibility>(menu.frame().dialog),
            Some(&Visibility::Hidden)
        );
    }

    #[test]
    fn open_row_is_colored_open() {
        let mut app = settings_app(SettingsMenuConfig {
            entries: vec!["captions".to_string()],
            ..SettingsMenuConfig::instant()
        });
        app.world_mut().write_message(SettingsTriggerActivated);
        app.update();

        app.world_mut()
            .write_message(EntryRowActivated(EntryId::new("captions")));
        app.update();

        let row = menu(&app)
            .registry()
            .get(&EntryId::new("captions"))
            .expect("captions row")
            .row();
        let classes = app.world().get::<StateClasses>(row).expect("row classes");
        assert!(classes.open);
        assert_eq!(
            app.world().get::<BackgroundColor>(row).map(|color| color.0),
            Some(palette::ROW_OPEN)
        );
    }
}
