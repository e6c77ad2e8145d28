use std::time::Duration;

use bevy::prelude::*;
use enum_map::EnumMap;
use smallvec::SmallVec;

use super::defs::{Animate, StyleProperty};

#[derive(Clone, Debug, Default)]
pub struct Tween {
    value: f32,
    from: f32,
    target: f32,
    timer: Option<Timer>,
}

impl Tween {
    pub const fn at(value: f32) -> Self {
        Self {
            value,
            from: value,
            target: value,
            timer: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Jumps to `value`, cancelling a running animation without completing it.
    pub fn snap(&mut self, value: f32) {
        *self = Self::at(value);
    }

    /// Starts from the current value. Replacing a running animation cancels it.
    pub fn animate_to(&mut self, target: f32, duration: Duration) {
        self.from = self.value;
        self.target = target;
        self.timer = Some(Timer::new(duration, TimerMode::Once));
    }

    pub fn advance(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };

        timer.tick(delta);
        if timer.is_finished() {
            self.value = self.target;
            self.from = self.target;
            self.timer = None;
            return true;
        }

        let t = timer.fraction();
        let eased = t * t * (3.0 - 2.0 * t);
        self.value = self.from + (self.target - self.from) * eased;
        false
    }
}

#[derive(Component, Clone, Debug, Default)]
pub struct PanelStyle {
    properties: EnumMap<StyleProperty, Tween>,
}

impl PanelStyle {
    pub fn resting(opacity: f32, margin_right: f32) -> Self {
        let mut style = Self::default();
        style.properties[StyleProperty::Opacity] = Tween::at(opacity);
        style.properties[StyleProperty::MarginRight] = Tween::at(margin_right);
        style
    }

    pub fn value(&self, property: StyleProperty) -> f32 {
        self.properties[property].value()
    }

    pub fn is_animating(&self) -> bool {
        self.properties.values().any(Tween::is_running)
    }

    pub fn write(
        &mut self,
        property: StyleProperty,
        value: f32,
        animate: Animate,
        duration: Duration,
    ) {
        match animate {
            Animate::Immediate => self.properties[property].snap(value),
            Animate::Animated => self.properties[property].animate_to(value, duration),
        }
    }

    pub fn advance(&mut self, delta: Duration) -> impl Iterator<Item = StyleProperty> + '_ {
        self.properties
            .iter_mut()
            .filter_map(move |(property, tween)| tween.advance(delta).then_some(property))
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionFinished {
    pub panel: Entity,
    pub property: StyleProperty,
}

pub fn advance_panel_tweens(
    time: Res<Time>,
    mut styles: Query<(Entity, &mut PanelStyle)>,
    mut finished: MessageWriter<TransitionFinished>,
) {
    let delta = time.delta();
    for (panel, mut style) in &mut styles {
        if !style.is_animating() {
            continue;
        }
        let completed: SmallVec<[StyleProperty; 2]> = style.advance(delta).collect();
        for property in completed {
            finished.write(TransitionFinished { panel, property });
        }
    }
}
