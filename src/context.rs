use crate::animation::{AnimationLoop, TickOutcome};
use crate::config::PuppetConfig;
use crate::core::{DisplayContext, InputEvent, SceneTracer, TraceOptions};
use crate::interaction::InteractionHandler;
use crate::scene::{MaterialRegistry, SceneGraph};
use crate::scenes::{build_tiger_scene, TigerRig};
use crate::viewport::ViewportManager;

/// Everything the puppet needs between frames. The event loop owns exactly
/// one and lends its parts to each component in turn.
#[derive(Debug)]
pub struct PuppetContext {
    scene: SceneGraph,
    materials: MaterialRegistry,
    rig: TigerRig,
    viewport: ViewportManager,
    interaction: InteractionHandler,
    animation: AnimationLoop,
    tracer: SceneTracer,
    render_scale: u32,
}

impl PuppetContext {
    pub fn new(config: &PuppetConfig, window_width: u32, render_scale: u32, options: TraceOptions) -> Self {
        let materials = MaterialRegistry::new();
        let mut scene = SceneGraph::new();
        let rig = build_tiger_scene(&mut scene, &materials);

        Self {
            viewport: ViewportManager::with_height(window_width, config.surface_height),
            interaction: InteractionHandler::with_sensitivity(rig.root, config.drag_sensitivity),
            animation: AnimationLoop::new(&rig, config.animation_tuning()),
            tracer: SceneTracer::new(options),
            render_scale: render_scale.max(1),
            scene,
            materials,
            rig,
        }
    }

    /// Route one input event. Returns false when nothing consumed it.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Resize { width: 0, .. } | InputEvent::Resize { height: 0, .. } => {
                log::warn!("ignoring zero-size resize");
                false
            }
            InputEvent::Resize { width, .. } => {
                self.viewport.resize(width);
                true
            }
            _ => self.interaction.handle(event, &mut self.scene),
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.animation.tick(&mut self.scene)
    }

    /// One frame of the loop: animate, then trace the pose that tick left
    /// behind
    pub fn advance_frame(&mut self) -> (TickOutcome, Vec<[u8; 4]>) {
        let outcome = self.tick();
        let frame = self.render();
        (outcome, frame)
    }

    /// Resolution the tracer works at, the surface divided by the render scale
    pub fn render_context(&self) -> DisplayContext {
        self.viewport.display_context().scaled_down(self.render_scale)
    }

    pub fn render(&self) -> Vec<[u8; 4]> {
        self.tracer.render(&self.scene, self.viewport.camera(), self.render_context())
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn rig(&self) -> &TigerRig {
        &self.rig
    }

    pub fn viewport(&self) -> &ViewportManager {
        &self.viewport
    }

    pub fn interaction(&self) -> &InteractionHandler {
        &self.interaction
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }
}
