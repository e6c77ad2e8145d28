use std::time::Duration;

use bevy::{
    input::mouse::MouseWheel, prelude::*, ui::RelativeCursorPosition, window::CursorMoved,
};

use super::{
    config::SettingsMenuConfig,
    controller::SettingsMenu,
    defs::{
        BackRow, EntryRowActivated, EntryRowButton, ItemTarget, OutsideClick, SettingsDialog,
        SettingsTrigger, SettingsTriggerActivated, StateClasses, SubmenuItemActivated,
        SubmenuItemButton, UserInactive,
    },
    SettingsMenuSystems,
};

pub struct SettingsPointerPlugin;

impl Plugin for SettingsPointerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UserActivity>().add_systems(
            Update,
            (collect_button_presses, detect_outside_click, track_user_activity)
                .chain()
                .in_set(SettingsMenuSystems::Input)
                .run_if(resource_exists::<SettingsMenu>),
        );
    }
}

#[derive(Resource, Debug, Default)]
pub struct UserActivity {
    idle: Duration,
    reported: bool,
}

impl UserActivity {
    pub fn record_input(&mut self) {
        self.idle = Duration::ZERO;
        self.reported = false;
    }

    pub fn advance(&mut self, delta: Duration, timeout: Duration) -> bool {
        if self.reported {
            return false;
        }
        self.idle += delta;
        if self.idle >= timeout {
            self.reported = true;
            return true;
        }
        false
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }
}

type PressTargets = (
    &'static Interaction,
    &'static StateClasses,
    Has<SettingsTrigger>,
    Option<&'static EntryRowButton>,
    Option<&'static BackRow>,
    Option<&'static SubmenuItemButton>,
);

fn collect_button_presses(
    presses: Query<PressTargets, (Changed<Interaction>, With<Button>)>,
    dialogs: Query<&StateClasses, With<SettingsDialog>>,
    mut trigger_presses: MessageWriter<SettingsTriggerActivated>,
    mut row_presses: MessageWriter<EntryRowActivated>,
    mut item_presses: MessageWriter<SubmenuItemActivated>,
) {
    let dialog_inert = dialogs.iter().any(|classes| classes.inert);

    for (interaction, classes, is_trigger, row, back, item) in &presses {
        if *interaction != Interaction::Pressed || classes.disabled {
            continue;
        }
        if is_trigger {
            trigger_presses.write(SettingsTriggerActivated);
            continue;
        }
        if dialog_inert {
            continue;
        }

        if let Some(row) = row {
            row_presses.write(EntryRowActivated(row.entry.clone()));
        } else if let Some(back) = back {
            item_presses.write(SubmenuItemActivated {
                entry: back.entry.clone(),
                target: ItemTarget::Back,
            });
        } else if let Some(item) = item {
            item_presses.write(SubmenuItemActivated {
                entry: item.entry.clone(),
                target: ItemTarget::Item(item.index),
            });
        }
    }
}

fn detect_outside_click(
    mouse: Res<ButtonInput<MouseButton>>,
    menu: Res<SettingsMenu>,
    hit_areas: Query<&RelativeCursorPosition, Or<(With<SettingsDialog>, With<SettingsTrigger>)>>,
    mut outside_clicks: MessageWriter<OutsideClick>,
) {
    if !menu.dialog().is_visible() || !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    if hit_areas.iter().any(RelativeCursorPosition::cursor_over) {
        return;
    }
    outside_clicks.write(OutsideClick);
}

fn track_user_activity(
    time: Res<Time>,
    config: Res<SettingsMenuConfig>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut cursor_moves: MessageReader<CursorMoved>,
    mut wheel: MessageReader<MouseWheel>,
    mut activity: ResMut<UserActivity>,
    mut inactivity: MessageWriter<UserInactive>,
) {
    let moved = cursor_moves.read().count() > 0;
    let scrolled = wheel.read().count() > 0;
    let pressed = keys.get_pressed().next().is_some() || mouse.get_pressed().next().is_some();

    if moved || scrolled || pressed {
        activity.record_input();
        return;
    }
    if activity.advance(time.delta(), config.inactivity_timeout()) {
        inactivity.write(UserInactive);
    }
}
