pub mod clock;
pub mod display_context;
pub mod gpu_context;
pub mod input_adapter;
pub mod input_event;
pub mod primitive;
pub mod surface_renderer;
pub mod tracer;

pub use clock::{Clock, FpsMeter};
pub use display_context::DisplayContext;
pub use gpu_context::GpuContext;
pub use input_adapter::PointerAdapter;
pub use input_event::InputEvent;
pub use surface_renderer::SurfaceRenderer;
pub use tracer::{Hit, PreparedScene, SceneTracer, TraceOptions};
