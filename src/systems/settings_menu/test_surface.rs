use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use super::{
    defs::{Animate, EntryId, PanelSize, RowParts, StateClass},
    provider::OptionItem,
    surface::SettingsSurface,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SurfaceCall {
    Hidden(Entity, bool),
    Interactive(Entity, bool),
    Opacity(Entity, f32, Animate),
    MarginRight(Entity, f32, Animate),
    Size(Entity, PanelSize),
    Class(Entity, StateClass, bool),
    Text(Entity, String),
    Despawn(Entity),
}

/// In-memory render target that records every write. Entities come from a
/// scratch `World` so handles are real.
pub(crate) struct RecordingSurface {
    world: World,
    live: HashSet<Entity>,
    children: HashMap<Entity, Vec<Entity>>,
    hidden: HashMap<Entity, bool>,
    inert: HashSet<Entity>,
    opacity: HashMap<Entity, f32>,
    margin: HashMap<Entity, f32>,
    sizes: HashMap<Entity, PanelSize>,
    classes: HashSet<(Entity, StateClass)>,
    texts: HashMap<Entity, String>,
    layout: HashMap<Entity, PanelSize>,
    default_layout: Option<PanelSize>,
    back_rows: HashMap<Entity, Vec<Entity>>,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            live: HashSet::new(),
            children: HashMap::new(),
            hidden: HashMap::new(),
            inert: HashSet::new(),
            opacity: HashMap::new(),
            margin: HashMap::new(),
            sizes: HashMap::new(),
            classes: HashSet::new(),
            texts: HashMap::new(),
            layout: HashMap::new(),
            default_layout: None,
            back_rows: HashMap::new(),
            calls: Vec::new(),
        }
    }

    pub fn with_default_layout(mut self, size: PanelSize) -> Self {
        self.default_layout = Some(size);
        self
    }

    pub fn entity(&mut self) -> Entity {
        let entity = self.world.spawn_empty().id();
        self.live.insert(entity);
        entity
    }

    fn child_of(&mut self, parent: Entity) -> Entity {
        let entity = self.entity();
        self.children.entry(parent).or_default().push(entity);
        entity
    }

    pub fn set_layout(&mut self, target: Entity, size: PanelSize) {
        self.layout.insert(target, size);
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn is_interactive(&self, target: Entity) -> bool {
        !self.inert.contains(&target)
    }

    pub fn opacity(&self, target: Entity) -> Option<f32> {
        self.opacity.get(&target).copied()
    }

    pub fn margin_right(&self, target: Entity) -> Option<f32> {
        self.margin.get(&target).copied()
    }

    pub fn size(&self, target: Entity) -> Option<PanelSize> {
        self.sizes.get(&target).copied()
    }

    pub fn has_class(&self, target: Entity, class: StateClass) -> bool {
        self.classes.contains(&(target, class))
    }

    pub fn text(&self, target: Entity) -> Option<&str> {
        self.texts.get(&target).map(String::as_str)
    }

    pub fn back_rows(&self, panel: Entity) -> usize {
        self.back_rows.get(&panel).map_or(0, |rows| {
            rows.iter().filter(|row| self.live.contains(row)).count()
        })
    }

    pub fn live_children(&self, parent: Entity) -> usize {
        self.children
            .get(&parent)
            .map_or(0, |children| {
                children
                    .iter()
                    .filter(|child| self.live.contains(child))
                    .count()
            })
    }
}

impl SettingsSurface for RecordingSurface {
    fn exists(&self, target: Entity) -> bool {
        self.live.contains(&target)
    }

    fn is_hidden(&self, target: Entity) -> bool {
        self.hidden.get(&target).copied().unwrap_or(false)
    }

    fn set_hidden(&mut self, target: Entity, hidden: bool) {
        self.hidden.insert(target, hidden);
        self.calls.push(SurfaceCall::Hidden(target, hidden));
    }

    fn set_interactive(&mut self, target: Entity, interactive: bool) {
        if interactive {
            self.inert.remove(&target);
        } else {
            self.inert.insert(target);
        }
        self.calls.push(SurfaceCall::Interactive(target, interactive));
    }

    fn set_opacity(&mut self, target: Entity, opacity: f32, animate: Animate) {
        self.opacity.insert(target, opacity);
        self.calls.push(SurfaceCall::Opacity(target, opacity, animate));
    }

    fn set_margin_right(&mut self, target: Entity, margin: f32, animate: Animate) {
        self.margin.insert(target, margin);
        self.calls.push(SurfaceCall::MarginRight(target, margin, animate));
    }

    fn set_size(&mut self, target: Entity, size: PanelSize) {
        self.sizes.insert(target, size);
        self.calls.push(SurfaceCall::Size(target, size));
    }

    fn set_class(&mut self, target: Entity, class: StateClass, enabled: bool) {
        if enabled {
            self.classes.insert((target, class));
        } else {
            self.classes.remove(&(target, class));
        }
        self.calls.push(SurfaceCall::Class(target, class, enabled));
    }

    fn set_text(&mut self, target: Entity, text: &str) {
        self.texts.insert(target, text.to_string());
        self.calls.push(SurfaceCall::Text(target, text.to_string()));
    }

    fn measure(&self, target: Entity) -> Option<PanelSize> {
        self.layout.get(&target).copied().or(self.default_layout)
    }

    fn spawn_entry_row(&mut self, main_panel: Entity, _entry: &EntryId) -> RowParts {
        let row = self.child_of(main_panel);
        let title = self.child_of(row);
        let value = self.child_of(row);
        RowParts { row, title, value }
    }

    fn spawn_submenu_panel(&mut self, content: Entity, _entry: &EntryId) -> Entity {
        let panel = self.child_of(content);
        self.hidden.insert(panel, true);
        panel
    }

    fn spawn_back_row(&mut self, panel: Entity, _entry: &EntryId, _title: &str) -> Entity {
        let back = self.child_of(panel);
        self.back_rows.entry(panel).or_default().push(back);
        back
    }

    fn spawn_items(
        &mut self,
        panel: Entity,
        _entry: &EntryId,
        items: &[OptionItem],
    ) -> Vec<Entity> {
        items.iter().map(|_| self.child_of(panel)).collect()
    }

    fn despawn(&mut self, target: Entity) {
        let mut stack = vec![target];
        while let Some(entity) = stack.pop() {
            if !self.live.remove(&entity) {
                continue;
            }
            if let Some(children) = self.children.get(&entity) {
                stack.extend(children.iter().copied());
            }
        }
        self.calls.push(SurfaceCall::Despawn(target));
    }
}
