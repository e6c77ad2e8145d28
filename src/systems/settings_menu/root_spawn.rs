use bevy::{prelude::*, ui::RelativeCursorPosition};

use super::{
    defs::{
        palette, BackRow, DialogFrame, EntryId, EntryRowButton, MainPanel, RowParts,
        SettingsDialog, SettingsTrigger, StateClasses, SubmenuItemButton, SubmenuPanel,
    },
    provider::OptionItem,
    tween::PanelStyle,
};

const LABEL_FONT_SIZE: f32 = 14.0;
const PANEL_PADDING: f32 = 6.0;

fn label(text: impl Into<String>, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: LABEL_FONT_SIZE,
            ..default()
        },
        TextColor(color),
    )
}

fn row_node() -> Node {
    Node {
        flex_direction: FlexDirection::Row,
        justify_content: JustifyContent::SpaceBetween,
        column_gap: Val::Px(16.0),
        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
        ..default()
    }
}

pub(super) fn spawn_settings_frame(commands: &mut Commands) -> DialogFrame {
    let trigger = commands
        .spawn((
            Name::new("settings_trigger"),
            SettingsTrigger,
            Button,
            StateClasses {
                disabled: true,
                ..default()
            },
            RelativeCursorPosition::default(),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                bottom: Val::Px(12.0),
                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(palette::TRIGGER),
            Visibility::Hidden,
        ))
        .id();
    commands.spawn((label("Settings", palette::TEXT), ChildOf(trigger)));

    let dialog = commands
        .spawn((
            Name::new("settings_dialog"),
            SettingsDialog,
            StateClasses::default(),
            RelativeCursorPosition::default(),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(12.0),
                bottom: Val::Px(48.0),
                overflow: Overflow::clip(),
                ..default()
            },
            BackgroundColor(palette::DIALOG),
            Visibility::Hidden,
        ))
        .id();

    let content = commands
        .spawn((
            Name::new("settings_panel"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::FlexStart,
                ..default()
            },
            ChildOf(dialog),
        ))
        .id();

    let main_panel = commands
        .spawn((
            Name::new("settings_main_menu"),
            MainPanel,
            PanelStyle::resting(1.0, 0.0),
            Node {
                flex_direction: FlexDirection::Column,
                padding: UiRect::vertical(Val::Px(PANEL_PADDING)),
                ..default()
            },
            Visibility::Inherited,
            ChildOf(content),
        ))
        .id();

    DialogFrame {
        trigger,
        dialog,
        content,
        main_panel,
    }
}

pub(super) fn spawn_entry_row(
    commands: &mut Commands,
    main_panel: Entity,
    entry: &EntryId,
) -> RowParts {
    let row = commands
        .spawn((
            Name::new(format!("settings_entry_{entry}")),
            EntryRowButton {
                entry: entry.clone(),
            },
            Button,
            StateClasses::default(),
            row_node(),
            BackgroundColor(palette::ROW),
            ChildOf(main_panel),
        ))
        .id();
    let title = commands
        .spawn((
            Name::new(format!("settings_entry_{entry}_title")),
            label("", palette::TEXT),
            ChildOf(row),
        ))
        .id();
    let value = commands
        .spawn((
            Name::new(format!("settings_entry_{entry}_value")),
            label("", palette::TEXT_MUTED),
            ChildOf(row),
        ))
        .id();

    RowParts { row, title, value }
}

/// Anchored to the right edge so a negative right margin pushes it out of
/// the clipped dialog.
pub(super) fn spawn_submenu_panel(
    commands: &mut Commands,
    content: Entity,
    entry: &EntryId,
) -> Entity {
    commands
        .spawn((
            Name::new(format!("settings_submenu_{entry}")),
            SubmenuPanel {
                entry: entry.clone(),
            },
            PanelStyle::resting(0.0, 0.0),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                right: Val::Px(0.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::vertical(Val::Px(PANEL_PADDING)),
                ..default()
            },
            BackgroundColor(palette::DIALOG),
            Visibility::Hidden,
            ChildOf(content),
        ))
        .id()
}

pub(super) fn spawn_back_row(
    commands: &mut Commands,
    panel: Entity,
    entry: &EntryId,
    title: &str,
) -> Entity {
    let back = commands
        .spawn((
            Name::new(format!("settings_back_{entry}")),
            BackRow {
                entry: entry.clone(),
            },
            Button,
            StateClasses::default(),
            row_node(),
            BackgroundColor(palette::ROW),
        ))
        .id();
    commands.spawn((label(format!("< {title}"), palette::TEXT), ChildOf(back)));
    commands.entity(panel).insert_children(0, &[back]);
    back
}

pub(super) fn spawn_submenu_items(
    commands: &mut Commands,
    panel: Entity,
    entry: &EntryId,
    items: &[OptionItem],
) -> Vec<Entity> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let button = commands
                .spawn((
                    Name::new(format!("settings_item_{entry}_{index}")),
                    SubmenuItemButton {
                        entry: entry.clone(),
                        index,
                    },
                    Button,
                    StateClasses {
                        selected: item.selected,
                        ..default()
                    },
                    row_node(),
                    BackgroundColor(palette::ROW),
                    ChildOf(panel),
                ))
                .id();
            commands.spawn((label(item.label.clone(), palette::TEXT), ChildOf(button)));
            button
        })
        .collect()
}
