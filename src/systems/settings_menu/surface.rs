use bevy::{
    ecs::{entity::Entities, system::SystemParam},
    prelude::*,
    ui::ComputedNode,
};

use super::{
    config::SettingsMenuConfig,
    defs::{Animate, EntryId, PanelSize, RowParts, StateClass, StateClasses, StyleProperty},
    provider::OptionItem,
    root_spawn,
    tween::PanelStyle,
};

pub trait SettingsSurface {
    fn exists(&self, target: Entity) -> bool;
    fn is_hidden(&self, target: Entity) -> bool;
    fn set_hidden(&mut self, target: Entity, hidden: bool);
    fn set_interactive(&mut self, target: Entity, interactive: bool);
    fn set_opacity(&mut self, target: Entity, opacity: f32, animate: Animate);
    fn set_margin_right(&mut self, target: Entity, margin: f32, animate: Animate);
    fn set_size(&mut self, target: Entity, size: PanelSize);
    fn set_class(&mut self, target: Entity, class: StateClass, enabled: bool);
    fn set_text(&mut self, target: Entity, text: &str);
    fn measure(&self, target: Entity) -> Option<PanelSize>;

    fn spawn_entry_row(&mut self, main_panel: Entity, entry: &EntryId) -> RowParts;
    fn spawn_submenu_panel(&mut self, content: Entity, entry: &EntryId) -> Entity;
    fn spawn_back_row(&mut self, panel: Entity, entry: &EntryId, title: &str) -> Entity;
    fn spawn_items(&mut self, panel: Entity, entry: &EntryId, items: &[OptionItem])
        -> Vec<Entity>;
    fn despawn(&mut self, target: Entity);
}

#[derive(SystemParam)]
pub struct UiSurface<'w, 's> {
    commands: Commands<'w, 's>,
    entities: &'w Entities,
    config: Res<'w, SettingsMenuConfig>,
    visibility: Query<'w, 's, &'static mut Visibility>,
    nodes: Query<'w, 's, &'static mut Node>,
    computed: Query<'w, 's, &'static ComputedNode>,
    styles: Query<'w, 's, &'static mut PanelStyle>,
    classes: Query<'w, 's, &'static mut StateClasses>,
    texts: Query<'w, 's, &'static mut Text>,
}

impl UiSurface<'_, '_> {
    fn write_style(
        &mut self,
        target: Entity,
        property: StyleProperty,
        value: f32,
        animate: Animate,
    ) {
        let duration = match property {
            StyleProperty::Opacity => self.config.fade_duration(),
            StyleProperty::MarginRight => self.config.slide_duration(),
        };

        if let Ok(mut style) = self.styles.get_mut(target) {
            style.write(property, value, animate, duration);
        } else if let Ok(mut entity) = self.commands.get_entity(target) {
            entity
                .entry::<PanelStyle>()
                .or_default()
                .and_modify(move |mut style| style.write(property, value, animate, duration));
        }
    }

    fn write_classes(
        &mut self,
        target: Entity,
        apply: impl Fn(&mut StateClasses) + Send + Sync + 'static,
    ) {
        if let Ok(mut classes) = self.classes.get_mut(target) {
            apply(&mut classes);
        } else if let Ok(mut entity) = self.commands.get_entity(target) {
            entity
                .entry::<StateClasses>()
                .or_default()
                .and_modify(move |mut classes| apply(&mut classes));
        }
    }
}

impl SettingsSurface for UiSurface<'_, '_> {
    fn exists(&self, target: Entity) -> bool {
        self.entities.contains(target)
    }

    /// Entities that are not queryable yet were spawned hidden.
    fn is_hidden(&self, target: Entity) -> bool {
        self.visibility
            .get(target)
            .map_or(true, |visibility| *visibility == Visibility::Hidden)
    }

    fn set_hidden(&mut self, target: Entity, hidden: bool) {
        let value = if hidden {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        if let Ok(mut visibility) = self.visibility.get_mut(target) {
            visibility.set_if_neq(value);
        } else if let Ok(mut entity) = self.commands.get_entity(target) {
            entity.try_insert(value);
        }
    }

    fn set_interactive(&mut self, target: Entity, interactive: bool) {
        self.write_classes(target, move |classes| classes.inert = !interactive);
    }

    fn set_opacity(&mut self, target: Entity, opacity: f32, animate: Animate) {
        self.write_style(target, StyleProperty::Opacity, opacity, animate);
    }

    fn set_margin_right(&mut self, target: Entity, margin: f32, animate: Animate) {
        self.write_style(target, StyleProperty::MarginRight, margin, animate);
    }

    fn set_size(&mut self, target: Entity, size: PanelSize) {
        let width = Val::Px(size.width);
        let height = Val::Px(size.height);
        if let Ok(mut node) = self.nodes.get_mut(target) {
            node.width = width;
            node.height = height;
        } else if let Ok(mut entity) = self.commands.get_entity(target) {
            entity.entry::<Node>().and_modify(move |mut node| {
                node.width = width;
                node.height = height;
            });
        }
    }

    fn set_class(&mut self, target: Entity, class: StateClass, enabled: bool) {
        self.write_classes(target, move |classes| classes.set(class, enabled));
    }

    fn set_text(&mut self, target: Entity, text: &str) {
        if let Ok(mut current) = self.texts.get_mut(target) {
            if current.0 != text {
                current.0 = text.to_string();
            }
        } else if let Ok(mut entity) = self.commands.get_entity(target) {
            entity.try_insert(Text::new(text));
        }
    }

    fn measure(&self, target: Entity) -> Option<PanelSize> {
        let computed = self.computed.get(target).ok()?;
        let size = computed.size() * computed.inverse_scale_factor();
        Some(PanelSize::new(size.x, size.y))
    }

    fn spawn_entry_row(&mut self, main_panel: Entity, entry: &EntryId) -> RowParts {
        root_spawn::spawn_entry_row(&mut self.commands, main_panel, entry)
    }

    fn spawn_submenu_panel(&mut self, content: Entity, entry: &EntryId) -> Entity {
        root_spawn::spawn_submenu_panel(&mut self.commands, content, entry)
    }

    fn spawn_back_row(&mut self, panel: Entity, entry: &EntryId, title: &str) -> Entity {
        root_spawn::spawn_back_row(&mut self.commands, panel, entry, title)
    }

    fn spawn_items(
        &mut self,
        panel: Entity,
        entry: &EntryId,
        items: &[OptionItem],
    ) -> Vec<Entity> {
        root_spawn::spawn_submenu_items(&mut self.commands, panel, entry, items)
    }

    fn despawn(&mut self, target: Entity) {
        if let Ok(mut entity) = self.commands.get_entity(target) {
            entity.try_despawn();
        }
    }
}
