//! Scenes and the scene machine
//!
//! A scene is an ordered actor list plus the systems that react to what
//! the actors publish. Each frame updates every actor in insertion order,
//! then runs every system over the frame's events, then clears the queues.
//!
//! The machine holds one scene at a time. Scenes are built on demand from
//! registered generators, so entering a scene always starts it fresh.

#![allow(dead_code)]

use std::collections::HashMap;

use crate::error::GameError;
use crate::game::{Actor, ActorId, Canvas, Events, IdAllocator, RenderLayer, UpdateContext};
use crate::ui::FrameInput;

pub const START_SCENE_ID: &str = "scene-start";
pub const STOP_SCENE_ID: &str = "scene-stop";

/// Actors of one scene, in insertion order
#[derive(Debug)]
pub struct ActorList {
    scene_id: String,
    actors: Vec<Actor>,
}

impl ActorList {
    pub fn new(scene_id: impl Into<String>) -> Self {
        Self {
            scene_id: scene_id.into(),
            actors: Vec::new(),
        }
    }

    pub fn push(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    /// Linear search by id
    pub fn get(&self, id: &ActorId) -> Result<&Actor, GameError> {
        self.actors
            .iter()
            .find(|a| a.id() == id)
            .ok_or_else(|| self.not_found(id))
    }

    pub fn get_mut(&mut self, id: &ActorId) -> Result<&mut Actor, GameError> {
        let err = self.not_found(id);
        self.actors.iter_mut().find(|a| a.id() == id).ok_or(err)
    }

    fn not_found(&self, id: &ActorId) -> GameError {
        GameError::ActorNotFound {
            actor: id.to_string(),
            scene: self.scene_id.clone(),
        }
    }

    pub fn of_type<'a>(&'a self, actor_type: &'a str) -> impl Iterator<Item = &'a Actor> + 'a {
        self.actors.iter().filter(move |a| a.actor_type() == actor_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

/// Scene-level behaviour that consumes events after the actor pass
pub trait SceneSystem {
    fn run(&mut self, actors: &mut ActorList, events: &mut Events) -> Result<(), GameError>;

    /// Overlay drawn after the actors of `layer`
    fn draw(
        &self,
        _actors: &ActorList,
        _canvas: &mut dyn Canvas,
        _layer: RenderLayer,
    ) -> Result<(), GameError> {
        Ok(())
    }
}

/// A named set of actors and systems
pub struct Scene {
    id: String,
    ids: IdAllocator,
    actors: ActorList,
    events: Events,
    systems: Vec<Box<dyn SceneSystem>>,
}

impl Scene {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            actors: ActorList::new(id.clone()),
            id,
            ids: IdAllocator::new(),
            events: Events::new(),
            systems: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Allocate a fresh actor id from this scene's counter
    pub fn next_id(&mut self, basename: &str) -> ActorId {
        self.ids.allocate(basename)
    }

    /// The id counter, for builders that need it alongside other borrows
    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub fn add_actor(&mut self, actor: Actor) {
        log::debug!("{}: adding {} ({})", self.id, actor.id(), actor.actor_type());
        self.actors.push(actor);
    }

    pub fn add_system(&mut self, system: impl SceneSystem + 'static) {
        self.systems.push(Box::new(system));
    }

    pub fn actors(&self) -> &ActorList {
        &self.actors
    }

    pub fn actor(&self, id: &ActorId) -> Result<&Actor, GameError> {
        self.actors.get(id)
    }

    pub fn actor_mut(&mut self, id: &ActorId) -> Result<&mut Actor, GameError> {
        self.actors.get_mut(id)
    }

    pub fn actors_of_type<'a>(&'a self, actor_type: &'a str) -> impl Iterator<Item = &'a Actor> + 'a {
        self.actors.of_type(actor_type)
    }

    /// One frame: actors, then systems, then clear the event queues
    pub fn update(&mut self, input: &FrameInput) -> Result<(), GameError> {
        let result = self.step(input);
        self.events.clear_all();
        result
    }

    fn step(&mut self, input: &FrameInput) -> Result<(), GameError> {
        let mut ctx = UpdateContext {
            input,
            events: &mut self.events,
        };
        for actor in self.actors.iter_mut() {
            actor.update(&mut ctx)?;
        }
        for system in self.systems.iter_mut() {
            system.run(&mut self.actors, &mut self.events)?;
        }
        Ok(())
    }

    /// Draw every actor on `layer`, then the systems' overlays
    pub fn draw(&self, canvas: &mut dyn Canvas, layer: RenderLayer) -> Result<(), GameError> {
        for actor in self.actors.iter() {
            actor.draw(canvas, layer)?;
        }
        for system in &self.systems {
            system.draw(&self.actors, canvas, layer)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("actors", &self.actors.len())
            .field("systems", &self.systems.len())
            .finish()
    }
}

/// Builds a scene from scratch
pub type SceneGenerator = Box<dyn Fn() -> Result<Scene, GameError>>;

/// Holds the current scene and the generators for every known scene id
#[derive(Default)]
pub struct SceneMachine {
    generators: HashMap<String, SceneGenerator>,
    current: Option<Scene>,
}

impl SceneMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the generator for `id`
    pub fn add_scene(
        &mut self,
        id: impl Into<String>,
        generator: impl Fn() -> Result<Scene, GameError> + 'static,
    ) {
        let id = id.into();
        if self.generators.insert(id.clone(), Box::new(generator)).is_some() {
            log::warn!("replacing generator for {}", id);
        }
    }

    /// Build the scene registered under `id` and make it current.
    ///
    /// If the generator fails the current scene is kept.
    pub fn run_scene(&mut self, id: &str) -> Result<(), GameError> {
        let generator = self
            .generators
            .get(id)
            .ok_or_else(|| GameError::SceneNotRegistered(id.to_string()))?;
        let mut scene = generator()?;
        if scene.id() != id {
            log::warn!("generator for {} built a scene named {}", id, scene.id());
            scene.id = id.to_string();
            scene.actors.scene_id = id.to_string();
        }
        log::info!(
            "entering {} ({} actors) from {}",
            id,
            scene.actors.len(),
            self.current_scene_id().unwrap_or("nothing")
        );
        self.current = Some(scene);
        Ok(())
    }

    pub fn update(&mut self, input: &FrameInput) -> Result<(), GameError> {
        self.current
            .as_mut()
            .ok_or(GameError::NoActiveScene)?
            .update(input)
    }

    /// Draw the current scene, all layers back to front
    pub fn draw(&self, canvas: &mut dyn Canvas) -> Result<(), GameError> {
        let scene = self.current.as_ref().ok_or(GameError::NoActiveScene)?;
        for layer in RenderLayer::ORDER {
            scene.draw(canvas, layer)?;
        }
        Ok(())
    }

    pub fn current_scene(&self) -> Option<&Scene> {
        self.current.as_ref()
    }

    pub fn current_scene_id(&self) -> Option<&str> {
        self.current.as_ref().map(Scene::id)
    }

    pub fn is_stopped(&self) -> bool {
        self.current_scene_id() == Some(STOP_SCENE_ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::renderer::testing::RecordingCanvas;
    use crate::game::{Drawable, Worldly};
    use crate::texture::Sprite;
    use image::RgbaImage;
    use std::cell::Cell;
    use std::rc::Rc;

    fn sprite_actor(scene: &mut Scene, key: &str, layer: RenderLayer) -> Actor {
        let id = scene.next_id(key);
        Actor::new("actor-test", id)
            .with(Drawable::new(Sprite::from_image(key, RgbaImage::new(1, 1)), layer))
            .with(Worldly::new(0.0, 0.0, 1.0, 1.0, 0.0))
    }

    /// Counts how often it runs
    struct Probe {
        runs: Rc<Cell<u32>>,
    }

    impl SceneSystem for Probe {
        fn run(&mut self, _actors: &mut ActorList, _events: &mut Events) -> Result<(), GameError> {
            self.runs.set(self.runs.get() + 1);
            Ok(())
        }
    }

    struct Failing;

    impl SceneSystem for Failing {
        fn run(&mut self, _actors: &mut ActorList, _events: &mut Events) -> Result<(), GameError> {
            Err(GameError::NoActiveScene)
        }
    }

    #[test]
    fn test_actor_lookup_by_id() {
        let mut scene = Scene::new("scene-test");
        let actor = sprite_actor(&mut scene, "thing", RenderLayer::Background);
        let id = actor.id().clone();
        scene.add_actor(actor);

        assert_eq!(scene.actor(&id).unwrap().id(), &id);
        let err = scene.actor(&ActorId::from("ghost")).unwrap_err();
        assert_eq!(err.to_string(), "actor ghost not found in scene scene-test");
        assert!(scene.actor_mut(&ActorId::from("ghost")).is_err());
    }

    #[test]
    fn test_actor_ids_unique_per_scene() {
        let mut scene = Scene::new("scene-test");
        let a = scene.next_id("piece");
        let b = scene.next_id("piece");
        assert_ne!(a, b);
        // A new scene starts its own counter
        let mut other = Scene::new("scene-other");
        assert_eq!(other.next_id("piece").as_str(), "piece0");
    }

    #[test]
    fn test_actors_of_type() {
        let mut scene = Scene::new("scene-test");
        let a = sprite_actor(&mut scene, "a", RenderLayer::Background);
        scene.add_actor(a);
        let id = scene.next_id("other");
        scene.add_actor(Actor::new("actor-other", id));
        assert_eq!(scene.actors_of_type("actor-test").count(), 1);
        assert_eq!(scene.actors_of_type("actor-other").count(), 1);
        assert_eq!(scene.actors_of_type("actor-none").count(), 0);
    }

    #[test]
    fn test_update_runs_systems_and_clears_events() {
        let runs = Rc::new(Cell::new(0));
        let mut scene = Scene::new("scene-test");
        scene.add_system(Probe { runs: Rc::clone(&runs) });
        scene.events.square_clicked.send(crate::game::SquareClicked {
            square: crate::chess::BoardSquare::new(0, 0),
        });

        scene.update(&FrameInput::default()).unwrap();
        assert_eq!(runs.get(), 1);
        assert!(scene.events.square_clicked.is_empty());
    }

    #[test]
    fn test_failing_system_still_clears_events() {
        let mut scene = Scene::new("scene-test");
        scene.add_system(Failing);
        scene.events.square_clicked.send(crate::game::SquareClicked {
            square: crate::chess::BoardSquare::new(0, 0),
        });
        assert!(scene.update(&FrameInput::default()).is_err());
        assert!(scene.events.square_clicked.is_empty());
    }

    #[test]
    fn test_machine_draws_layers_in_order() {
        let mut machine = SceneMachine::new();
        machine.add_scene("scene-layers", || {
            let mut scene = Scene::new("scene-layers");
            // Inserted front to back on purpose
            for (key, layer) in [
                ("ui", RenderLayer::Ui),
                ("piece", RenderLayer::ForegroundObject),
                ("board", RenderLayer::Foreground),
                ("bg", RenderLayer::Background),
            ] {
                let actor = sprite_actor(&mut scene, key, layer);
                scene.add_actor(actor);
            }
            Ok(scene)
        });
        machine.run_scene("scene-layers").unwrap();

        let mut canvas = RecordingCanvas::default();
        machine.draw(&mut canvas).unwrap();
        assert_eq!(canvas.sprite_keys(), vec!["bg", "board", "piece", "ui"]);
    }

    #[test]
    fn test_unregistered_scene_is_an_error() {
        let mut machine = SceneMachine::new();
        let err = machine.run_scene("scene-nowhere").unwrap_err();
        assert!(matches!(err, GameError::SceneNotRegistered(_)));
        assert!(machine.current_scene().is_none());
        assert!(matches!(
            machine.update(&FrameInput::default()),
            Err(GameError::NoActiveScene)
        ));
    }

    #[test]
    fn test_failed_generator_keeps_previous_scene() {
        let mut machine = SceneMachine::new();
        machine.add_scene(START_SCENE_ID, || Ok(Scene::new(START_SCENE_ID)));
        machine.add_scene("scene-broken", || Err(GameError::NoActiveScene));
        machine.run_scene(START_SCENE_ID).unwrap();

        assert!(machine.run_scene("scene-broken").is_err());
        assert_eq!(machine.current_scene_id(), Some(START_SCENE_ID));
    }

    #[test]
    fn test_scene_takes_registered_id() {
        let mut machine = SceneMachine::new();
        machine.add_scene("scene-renamed", || Ok(Scene::new("something-else")));
        machine.run_scene("scene-renamed").unwrap();
        assert_eq!(machine.current_scene_id(), Some("scene-renamed"));
    }

    #[test]
    fn test_stop_scene_is_observed() {
        let mut machine = SceneMachine::new();
        machine.add_scene(START_SCENE_ID, || Ok(Scene::new(START_SCENE_ID)));
        machine.add_scene(STOP_SCENE_ID, || Ok(Scene::new(STOP_SCENE_ID)));
        machine.run_scene(START_SCENE_ID).unwrap();
        assert!(!machine.is_stopped());
        machine.run_scene(STOP_SCENE_ID).unwrap();
        assert!(machine.is_stopped());
    }

    #[test]
    fn test_rerun_builds_fresh_scene() {
        let built = Rc::new(Cell::new(0));
        let counter = Rc::clone(&built);
        let mut machine = SceneMachine::new();
        machine.add_scene(START_SCENE_ID, move || {
            counter.set(counter.get() + 1);
            Ok(Scene::new(START_SCENE_ID))
        });
        machine.run_scene(START_SCENE_ID).unwrap();
        machine.run_scene(START_SCENE_ID).unwrap();
        assert_eq!(built.get(), 2);
    }
}
