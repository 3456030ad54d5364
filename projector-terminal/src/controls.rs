/// Keyboard controls: three angle sliders and the layer toggles
use crossterm::event::KeyCode;
use projector_core::{RenderConfig, RotationAngles};

/// Whole-degree angle input limited to `[0, 360]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleSlider {
    degrees: u16,
}

impl AngleSlider {
    pub const MAX: u16 = 360;

    pub fn new(degrees: u16) -> Self {
        Self {
            degrees: degrees.min(Self::MAX),
        }
    }

    pub fn degrees(&self) -> u16 {
        self.degrees
    }

    pub fn set(&mut self, degrees: u16) {
        self.degrees = degrees.min(Self::MAX);
    }

    /// Move by `delta` degrees, stopping at either end.
    pub fn nudge(&mut self, delta: i32) {
        let next = (self.degrees as i32 + delta).clamp(0, Self::MAX as i32);
        self.degrees = next as u16;
    }

    pub fn radians(&self) -> f64 {
        (self.degrees as f64).to_radians()
    }
}

/// What the app should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Redraw,
    Quit,
    Ignore,
}

/// The angle sliders plus the step a key press moves them by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub pitch: AngleSlider,
    pub yaw: AngleSlider,
    pub roll: AngleSlider,
    pub step: u16,
}

impl Controls {
    pub fn new(pitch: u16, yaw: u16, roll: u16, step: u16) -> Self {
        Self {
            pitch: AngleSlider::new(pitch),
            yaw: AngleSlider::new(yaw),
            roll: AngleSlider::new(roll),
            step,
        }
    }

    /// Snapshot of all three sliders, in radians.
    pub fn angles(&self) -> RotationAngles {
        RotationAngles::new(self.pitch.radians(), self.yaw.radians(), self.roll.radians())
    }

    pub fn handle_key(&mut self, code: KeyCode, config: &mut RenderConfig) -> Action {
        let step = self.step as i32;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('w') | KeyCode::Up => self.pitch.nudge(step),
            KeyCode::Char('s') | KeyCode::Down => self.pitch.nudge(-step),
            KeyCode::Char('d') | KeyCode::Right => self.yaw.nudge(step),
            KeyCode::Char('a') | KeyCode::Left => self.yaw.nudge(-step),
            KeyCode::Char('e') => self.roll.nudge(step),
            KeyCode::Char('r') => self.roll.nudge(-step),
            KeyCode::Char('1') => config.draw_faces = !config.draw_faces,
            KeyCode::Char('2') => config.draw_edges = !config.draw_edges,
            KeyCode::Char('3') => config.draw_points = !config.draw_points,
            _ => return Action::Ignore,
        }
        Action::Redraw
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(0, 0, 0, 5)
    }
}
