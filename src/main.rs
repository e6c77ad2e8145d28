use bevy::prelude::*;

use player_settings_menu::{
    AddSettingsEntry, EntryDescriptor, EntryId, RemoveSettingsEntry, SettingsMenu,
    SettingsMenuConfig, SettingsMenuPlugin, SettingsPointerPlugin,
};

const DEMO_KINDS: [&str; 3] = ["speed", "captions", "quality"];

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => SettingsMenuConfig::load_or_embedded(path),
        None => SettingsMenuConfig::embedded(),
    };

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(SettingsMenuPlugin::default().with_config(config))
        .add_plugins(SettingsPointerPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (edit_entries, close_on_esc))
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// `A` adds the next missing entry kind, `R` removes the newest entry and
/// `Shift+R` clears the menu.
fn edit_entries(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    menu: Option<Res<SettingsMenu>>,
    mut adds: MessageWriter<AddSettingsEntry>,
    mut removes: MessageWriter<RemoveSettingsEntry>,
) {
    let Some(menu) = menu else {
        return;
    };

    if keyboard_input.just_pressed(KeyCode::KeyA) {
        let missing = DEMO_KINDS
            .iter()
            .find(|kind| !menu.registry().contains(&EntryId::new(**kind)));
        match missing {
            Some(kind) => {
                adds.write(AddSettingsEntry(EntryDescriptor::from_kind(*kind)));
            }
            None => info!("every demo entry is already in the menu"),
        }
    }

    if keyboard_input.just_pressed(KeyCode::KeyR) {
        let shift = keyboard_input.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
        if shift {
            removes.write(RemoveSettingsEntry(None));
        } else if let Some(last) = menu.registry().ids().pop() {
            removes.write(RemoveSettingsEntry(Some(last)));
        }
    }
}

fn close_on_esc(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard_input.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
