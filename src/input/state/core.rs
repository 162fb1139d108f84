//! Stroke lifecycle state and engine construction.

use crate::config::Config;
use crate::draw::{
    ArgbEncoder, BLACK, Color, ColorEncoder, Path, PathId, PathStore, PathStyle, RenderBackend,
    StrokeRecord,
};
use crate::erase::EraserSettings;
use crate::input::events::DeviceFilter;
use crate::input::observer::{DragTarget, NoopObserver, ObserverError, StrokeObserver};
use crate::surface::{self, SurfaceState};
use log::{debug, warn};

/// Per-path capture state.
///
/// The open path lives only here; nothing else holds a mutable reference to it.
#[derive(Debug, Default)]
pub enum DrawingState {
    /// No stroke in progress
    #[default]
    Idle,
    /// A stroke is being captured
    Capturing {
        /// The open path receiving samples
        path: Path,
    },
}

/// Engine parameters, usually derived from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Color of newly drawn strokes
    pub stroke_color: Color,
    /// Width of newly drawn strokes, in logical units
    pub stroke_width: f64,
    /// Owner tag attached to strokes drawn through this engine
    pub owner: Option<String>,
    /// Whether gestures may draw at all
    pub touch_enabled: bool,
    /// Which devices may draw
    pub device_filter: DeviceFilter,
    /// Eraser hit-test tuning
    pub eraser: EraserSettings,
    /// Logical-to-pixel multiplier for this surface
    pub device_scale: f64,
    /// Maximum committed paths (0 = unlimited)
    pub max_paths: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            stroke_color: BLACK,
            stroke_width: 3.0,
            owner: None,
            touch_enabled: true,
            device_filter: DeviceFilter::Any,
            eraser: EraserSettings::default(),
            device_scale: 1.0,
            max_paths: 0,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            stroke_color: config.drawing.default_color.to_color(),
            stroke_width: config.drawing.default_width,
            owner: config.input.owner.clone(),
            touch_enabled: config.input.touch_enabled,
            device_filter: if config.input.stylus_only {
                DeviceFilter::QualifyingOnly
            } else {
                DeviceFilter::Any
            },
            eraser: EraserSettings {
                threshold: config.eraser.threshold,
                sampling_interval: config.eraser.sampling_interval,
            },
            device_scale: surface::resolve_device_scale(
                config.surface.pre_scaled_input,
                config.surface.pixel_density,
            ),
            max_paths: config.drawing.max_paths,
        }
    }
}

/// Hands out path ids that never collide with a live path.
#[derive(Debug, Default)]
pub(crate) struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    pub(crate) fn next(&mut self, store: &PathStore) -> PathId {
        loop {
            self.last = self.last.checked_add(1).unwrap_or(1);
            let id = PathId(self.last);
            if !store.contains(id) {
                debug!("Allocated path id {id}");
                return id;
            }
        }
    }
}

/// Stroke capture and eraser engine for one drawing surface.
///
/// Consumes gesture samples, maintains the committed and pending paths,
/// and mirrors every change to the render backend. All operations are
/// synchronous and never fail past the public boundary.
pub struct StrokeEngine {
    /// Committed and pending strokes
    pub(crate) store: PathStore,
    /// Host surface size and scale
    pub(crate) surface: SurfaceState,
    /// Current capture state
    pub(crate) state: DrawingState,
    /// Style applied to the next stroke
    pub(crate) style: PathStyle,
    /// Owner tag for strokes drawn here
    pub(crate) owner: Option<String>,
    pub(crate) touch_enabled: bool,
    /// Eraser mode suppresses normal capture
    pub(crate) eraser_active: bool,
    pub(crate) device_filter: DeviceFilter,
    pub(crate) eraser: EraserSettings,
    pub(crate) ids: IdAllocator,
    /// Pan translation seen at the previous forwarded update
    pub(crate) last_translation_y: f64,
    pub(crate) backend: Box<dyn RenderBackend>,
    pub(crate) encoder: Box<dyn ColorEncoder>,
    pub(crate) observer: Box<dyn StrokeObserver>,
    pub(crate) drag_target: Option<Box<dyn DragTarget>>,
}

impl StrokeEngine {
    /// Creates an engine drawing into `backend`.
    ///
    /// The surface is not ready until the host reports a layout via
    /// [`StrokeEngine::on_layout`]. An invalid stroke style in `settings`
    /// falls back to black, 3 units wide.
    pub fn new(settings: EngineSettings, backend: Box<dyn RenderBackend>) -> Self {
        let style = PathStyle::new(settings.stroke_color, settings.stroke_width).unwrap_or_else(|err| {
            warn!("{err}; using default stroke style");
            PathStyle::default()
        });

        Self {
            store: PathStore::with_limit(settings.max_paths),
            surface: SurfaceState::new(settings.device_scale),
            state: DrawingState::Idle,
            style,
            owner: settings.owner,
            touch_enabled: settings.touch_enabled,
            eraser_active: false,
            device_filter: settings.device_filter,
            eraser: settings.eraser,
            ids: IdAllocator::default(),
            last_translation_y: 0.0,
            backend,
            encoder: Box::new(ArgbEncoder),
            observer: Box::new(NoopObserver),
            drag_target: None,
        }
    }

    /// Installs the lifecycle observer.
    pub fn with_observer(mut self, observer: Box<dyn StrokeObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Installs a drag target that receives pans while no stroke is open.
    pub fn with_drag_target(mut self, target: Box<dyn DragTarget>) -> Self {
        self.drag_target = Some(target);
        self
    }

    /// Replaces the backend color encoding.
    pub fn with_color_encoder(mut self, encoder: Box<dyn ColorEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Sets the style of subsequent strokes. Invalid styles are ignored with a warning.
    pub fn set_stroke_style(&mut self, color: Color, width: f64) {
        match PathStyle::new(color, width) {
            Ok(style) => self.style = style,
            Err(err) => warn!("Ignoring stroke style change: {err}"),
        }
    }

    pub fn stroke_style(&self) -> PathStyle {
        self.style
    }

    pub fn set_owner(&mut self, owner: Option<String>) {
        self.owner = owner;
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn set_device_filter(&mut self, filter: DeviceFilter) {
        self.device_filter = filter;
    }

    pub fn touch_enabled(&self) -> bool {
        self.touch_enabled
    }

    pub fn eraser_active(&self) -> bool {
        self.eraser_active
    }

    pub fn surface(&self) -> &SurfaceState {
        &self.surface
    }

    /// The path currently being captured, if any.
    pub fn open_path(&self) -> Option<&Path> {
        match &self.state {
            DrawingState::Capturing { path } => Some(path),
            DrawingState::Idle => None,
        }
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, DrawingState::Capturing { .. })
    }

    /// Committed strokes in insertion order.
    pub fn strokes(&self) -> &[StrokeRecord] {
        self.store.all()
    }

    /// Strokes waiting for the surface to become ready.
    pub fn pending_strokes(&self) -> &[StrokeRecord] {
        self.store.pending()
    }

    pub(crate) fn encode(&self, color: Color) -> u32 {
        self.encoder.encode(color)
    }

    /// Delivers a notification, logging (and otherwise ignoring) observer failures.
    pub(crate) fn notify<F>(&mut self, what: &str, deliver: F)
    where
        F: FnOnce(&mut dyn StrokeObserver) -> Result<(), ObserverError>,
    {
        if let Err(err) = deliver(self.observer.as_mut()) {
            warn!("Observer failed to handle {what}: {err}");
        }
    }

    pub(crate) fn notify_paths_changed(&mut self) {
        let count = self.store.len();
        self.notify("paths changed", |o| o.paths_changed(count));
    }
}
