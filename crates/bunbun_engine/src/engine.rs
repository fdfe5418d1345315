use std::time::Duration;

use anyhow::Context;
use bunbun_assets::{AssetLoader, AssetPath};
use log::info;

use crate::config::EngineConfig;
use crate::debug::Debug;
use crate::debug_log;
use crate::input::KeyboardState;
use crate::level::{GameLevel, LevelRules};
use crate::registry::EntityRegistry;
use crate::services::{AudioService, Renderer};

/// The collaborators the engine drives but does not implement.
pub struct Services {
    pub assets: Box<dyn AssetLoader>,
    pub audio: Box<dyn AudioService>,
    pub renderer: Box<dyn Renderer>,
}

#[derive(Debug, Default)]
struct Fps {
    frame_count: u32,
    time_accum: f32,
}

/// Runs the current level at a fixed timestep and swaps levels when one
/// asks for a transition.
pub struct Engine {
    config: EngineConfig,
    registry: EntityRegistry,
    services: Services,
    rules: Box<dyn LevelRules>,
    input: KeyboardState,
    level: Option<GameLevel>,
    physics_accumulator: f32,
    steps: u64,
    fps: Fps,
    debugger: Debug,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        registry: EntityRegistry,
        services: Services,
        rules: Box<dyn LevelRules>,
    ) -> Self {
        let debugger = Debug::new(config.debug_enabled);
        Self {
            config,
            registry,
            services,
            rules,
            input: KeyboardState::new(),
            level: None,
            physics_accumulator: 0.0,
            steps: 0,
            fps: Fps::default(),
            debugger,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn level(&self) -> Option<&GameLevel> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut GameLevel> {
        self.level.as_mut()
    }

    pub fn input(&self) -> &KeyboardState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut KeyboardState {
        &mut self.input
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Total fixed updates run so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn target_frame_time(&self) -> Option<Duration> {
        self.config.target_frame_time()
    }

    /// Loads the first level.
    pub fn start(&mut self, level: &str) -> anyhow::Result<()> {
        self.swap_level(AssetPath::new(level))
    }

    /// Advances by `elapsed` wall time: as many fixed updates as fit (up to
    /// the per-frame cap), a pending level transition, then one draw.
    pub fn frame(&mut self, elapsed: Duration) -> anyhow::Result<()> {
        let Some(level) = self.level.as_mut() else {
            return Ok(());
        };

        let timestep = self.config.physics.timestep;
        self.physics_accumulator += elapsed.as_secs_f32();

        let mut steps_this_frame = 0;
        while self.physics_accumulator >= timestep
            && steps_this_frame < self.config.max_steps_per_frame
        {
            self.physics_accumulator -= timestep;
            level.update(
                &self.input,
                &mut *self.services.audio,
                &mut *self.rules,
                timestep,
            );
            steps_this_frame += 1;
            if level.pending_transition().is_some() {
                break;
            }
        }
        self.steps += u64::from(steps_this_frame);

        if steps_this_frame > 0 {
            self.input.end_frame();
        }
        if self.physics_accumulator >= timestep {
            debug_log!(
                self.debugger,
                "dropping {:.3}s of simulation backlog",
                self.physics_accumulator
            );
            self.physics_accumulator = 0.0;
        }

        if let Some(next) = level.take_transition() {
            self.swap_level(next)?;
        }

        if let Some(level) = &self.level {
            level.draw(&mut *self.services.renderer);
        }
        self.count_frame(elapsed);
        Ok(())
    }

    /// Unloads the current level, then preloads, loads and initializes
    /// `path` in its place.
    fn swap_level(&mut self, path: AssetPath) -> anyhow::Result<()> {
        if let Some(mut old) = self.level.take() {
            old.unload(&mut *self.services.assets);
        }

        info!("switching to level {path}");
        let mut level = GameLevel::new(path.clone(), self.config.physics)
            .with_clear_color(self.config.clear_color);
        level
            .preload(&mut *self.services.assets)
            .and_then(|_| level.load(&mut *self.services.assets))
            .and_then(|_| {
                level.initialize(
                    &self.registry,
                    &mut *self.services.audio,
                    &mut *self.rules,
                )
            })
            .with_context(|| format!("failed to start level {path}"))?;

        self.level = Some(level);
        self.physics_accumulator = 0.0;
        Ok(())
    }

    fn count_frame(&mut self, elapsed: Duration) {
        self.fps.frame_count += 1;
        self.fps.time_accum += elapsed.as_secs_f32();
        if self.fps.time_accum > 1.0 {
            debug_log!(self.debugger, "FPS: {}", self.fps.frame_count);
            self.fps.time_accum = 0.0;
            self.fps.frame_count = 0;
        }
    }

    pub fn shutdown(&mut self) {
        if let Some(mut level) = self.level.take() {
            level.unload(&mut *self.services.assets);
        }
        debug_log!(self.debugger, "engine shut down after {} steps", self.steps);
    }
}
