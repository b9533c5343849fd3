//! Game host
//!
//! Owns the scene machine and applies the per-frame rules the window loop
//! relies on: Escape goes to the stop scene, and the loop ends once the
//! stop scene is current.

use crate::chess::{build_main_scene, build_stop_scene};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::Canvas;
use crate::scene::{SceneMachine, START_SCENE_ID, STOP_SCENE_ID};
use crate::texture::SpriteFiles;
use crate::ui::FrameInput;

pub struct Game {
    machine: SceneMachine,
}

impl Game {
    /// Register the start and stop scenes and enter the start scene.
    /// Sprites missing from `files` are read from disk.
    pub fn new(config: GameConfig, files: SpriteFiles) -> Result<Self, GameError> {
        let mut machine = SceneMachine::new();
        machine.add_scene(START_SCENE_ID, move || build_main_scene(&config, &files));
        machine.add_scene(STOP_SCENE_ID, build_stop_scene);
        Self::with_machine(machine)
    }

    /// Host an already-populated machine, entering its start scene
    pub fn with_machine(mut machine: SceneMachine) -> Result<Self, GameError> {
        machine.run_scene(START_SCENE_ID)?;
        Ok(Self { machine })
    }

    pub fn machine(&self) -> &SceneMachine {
        &self.machine
    }

    /// Whether the loop should exit before doing anything this frame
    pub fn should_stop(&self) -> bool {
        self.machine.is_stopped()
    }

    pub fn update(&mut self, input: &FrameInput) -> Result<(), GameError> {
        if input.quit_pressed {
            log::info!("quit requested");
            return self.machine.run_scene(STOP_SCENE_ID);
        }
        self.machine.update(input)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) -> Result<(), GameError> {
        self.machine.draw(canvas)
    }

    /// Logical canvas size for a window of the given size
    pub fn layout(&self, outside_width: f32, outside_height: f32) -> (f32, f32) {
        crate::ui::layout(outside_width, outside_height)
    }
}
