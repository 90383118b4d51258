//! Strike (life) displays
//!
//! Both displays watch the shared strikes counter and rebuild their visuals
//! whenever it differs from what they last showed.

use glam::Vec2;

use super::counter::Counter;
use super::entity::{Body, Entity, Label, Scenery, Sprite, TextColor};
use super::registry::{Commands, EntityId, Layer};
use crate::consts::*;

/// Row of heart symbols along the bottom-left corner
#[derive(Debug, Clone)]
pub struct StrikesGraphic {
    strikes: Counter,
    shown: i32,
    hearts: Vec<EntityId>,
    origin: Vec2,
    heart_size: Vec2,
    sprite: Sprite,
}

impl StrikesGraphic {
    /// Lay out one heart per strike, sized from the window
    pub fn new(strikes: Counter, window: Vec2, sprite: Sprite, commands: &mut Commands) -> Self {
        let heart_size = (window / 6.0 / STRIKES as f32).floor();
        let mut graphic = Self {
            shown: strikes.value(),
            strikes,
            hearts: Vec::new(),
            origin: Vec2::new(20.0, window.y - 50.0),
            heart_size,
            sprite,
        };
        graphic.spawn_hearts(commands);
        graphic
    }

    /// Strikes currently drawn
    pub fn shown(&self) -> i32 {
        self.shown
    }

    pub fn hearts(&self) -> &[EntityId] {
        &self.hearts
    }

    pub fn update(&mut self, commands: &mut Commands) {
        let value = self.strikes.value();
        if value == self.shown {
            return;
        }
        for id in self.hearts.drain(..) {
            commands.remove(id);
        }
        self.shown = value;
        self.spawn_hearts(commands);
    }

    fn spawn_hearts(&mut self, commands: &mut Commands) {
        for i in 0..self.shown.max(0) {
            let top_left = self.origin + Vec2::new(i as f32 * self.heart_size.x, 0.0);
            let heart = Scenery::new(Body::new(top_left, self.heart_size), self.sprite);
            self.hearts.push(commands.add(Entity::Scenery(heart), Layer::Ui));
        }
    }
}

/// "Strikes left: N" label, tinted by how many are left
#[derive(Debug, Clone)]
pub struct StrikesNumeric {
    strikes: Counter,
    shown: i32,
    label: EntityId,
    body: Body,
}

impl StrikesNumeric {
    pub fn new(strikes: Counter, top_left: Vec2, size: Vec2, commands: &mut Commands) -> Self {
        let shown = strikes.value();
        let body = Body::new(top_left, size);
        let label = commands.add(Entity::Label(Self::label_for(shown, body)), Layer::Ui);
        Self {
            strikes,
            shown,
            label,
            body,
        }
    }

    pub fn shown(&self) -> i32 {
        self.shown
    }

    /// ID of the label entity currently on screen
    pub fn label(&self) -> EntityId {
        self.label
    }

    pub fn update(&mut self, commands: &mut Commands) {
        let value = self.strikes.value();
        if value == self.shown {
            return;
        }
        commands.remove(self.label);
        self.shown = value;
        self.label = commands.add(Entity::Label(Self::label_for(value, self.body)), Layer::Ui);
    }

    fn label_for(strikes: i32, body: Body) -> Label {
        Label {
            body,
            text: format!("Strikes left: {}", strikes),
            color: strikes_color(strikes),
        }
    }
}

/// Green at full health, yellow at two, red below
pub fn strikes_color(strikes: i32) -> TextColor {
    match strikes {
        s if s >= 3 => TextColor::Green,
        2 => TextColor::Yellow,
        _ => TextColor::Red,
    }
}
