use std::{
    ops::{Deref, DerefMut},
    sync::{mpsc::Receiver, Arc},
    thread,
    time::Instant,
};

use common::misc::human_duration;
use scene::{
    attributes::AttributeTable, bounding_box::BoundingBox, plane::ClipPlane, scene::Scene,
    SceneError,
};
use tracing::{debug, info};

use crate::{
    config::Config,
    frame::Frame,
    properties::{Controls, PropertyChange},
    subscribers::{self, SharedSubscribers, SubscriptionId, Subscribers},
    SyncError,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipState {
    /// The payload shows the collections as loaded.
    Unsliced,
    /// The payload shows the collections clipped by the last pose.
    Sliced { plane: ClipPlane, matrix: [f32; 16] },
}

/// A collection as loaded, next to the version currently displayed.
struct TrackedScene {
    original: Scene,
    working: Scene,
    attributes: AttributeTable,
}

/// Keeps a [`Frame`] consistent with the loaded mesh collections and the clip
/// pose. All mutation happens through `&mut self` on one thread; every change
/// ends in a recomputation and a single publication to subscribers.
pub struct Synchronizer {
    scenes: Vec<TrackedScene>,
    clip: ClipState,

    range_padding: f32,
    min_axis_extent: f32,

    staged: Frame,
    published: Arc<Frame>,
    changed: bool,
    hold_depth: u32,

    subscribers: SharedSubscribers,
}

impl Synchronizer {
    pub fn new(config: &Config) -> Self {
        Self::with_subscribers(config, Subscribers::shared())
    }

    pub(crate) fn with_subscribers(config: &Config, subscribers: SharedSubscribers) -> Self {
        let frame = Frame::new(Controls::from(config));
        Self {
            scenes: Vec::new(),
            clip: ClipState::Unsliced,

            range_padding: config.range_padding,
            min_axis_extent: config.min_axis_extent,

            published: Arc::new(frame.clone()),
            staged: frame,
            changed: false,
            hold_depth: 0,

            subscribers,
        }
    }

    /// Replaces everything tracked with a single collection and returns to the
    /// unsliced state.
    pub fn load(&mut self, scene: impl Into<Scene>, attributes: AttributeTable) {
        let scene = scene.into();
        info!(
            "Loading {:?} with {} attribute entries",
            scene.kind(),
            attributes.len()
        );

        self.scenes = vec![TrackedScene {
            working: scene.clone(),
            original: scene,
            attributes,
        }];
        self.clip = ClipState::Unsliced;
        self.staged.matrix = None;
        self.recompute();
    }

    /// Adds another collection. If a clip pose is active the collection is
    /// sliced with it right away.
    pub fn append(&mut self, scene: impl Into<Scene>, attributes: AttributeTable) {
        let scene = scene.into();
        info!(
            "Appending {:?} with {} attribute entries",
            scene.kind(),
            attributes.len()
        );

        let working = match &self.clip {
            ClipState::Unsliced => scene.clone(),
            ClipState::Sliced { plane, .. } => scene.slice(plane),
        };
        self.scenes.push(TrackedScene {
            original: scene,
            working,
            attributes,
        });
        self.recompute();
    }

    /// Drops all collections and returns to the unsliced state.
    pub fn clear(&mut self) {
        self.scenes.clear();
        self.clip = ClipState::Unsliced;
        self.staged.matrix = None;
        self.recompute();
    }

    /// Slices every collection with the plane described by a column-major 4x4
    /// pose. Slicing always starts from the collections as loaded, so poses
    /// never compound. On error nothing changes.
    pub fn set_clip_pose(&mut self, matrix: &[f32]) -> Result<(), SyncError> {
        let matrix = <[f32; 16]>::try_from(matrix)
            .map_err(|_| SceneError::InvalidMatrix { len: matrix.len() })?;
        let plane = ClipPlane::from_matrix(&matrix)?;

        info!(
            "Slicing at {:?} along {:?}",
            plane.origin().as_slice(),
            plane.normal().as_slice()
        );
        for scene in self.scenes.iter_mut() {
            scene.working = scene.original.slice(&plane);
        }

        self.clip = ClipState::Sliced { plane, matrix };
        self.staged.matrix = Some(matrix);
        self.recompute();
        Ok(())
    }

    /// Rebuilds the payload of every collection along with the bounds. If no
    /// sub-mesh made it into the payload the previous bounds are kept.
    pub fn recompute(&mut self) {
        let start = Instant::now();

        let payloads = (self.scenes.iter())
            .map(|scene| scene.working.to_payload(&scene.attributes))
            .collect::<Vec<_>>();
        let bounds = (payloads.iter())
            .filter_map(|payload| payload.bounds)
            .reduce(|a, b| a.union(&b));

        self.staged.data_dict = payloads;
        match bounds {
            Some(bounds) => self.set_bounds(bounds),
            None => debug!("Nothing to display, keeping previous bounds"),
        }

        debug!(
            "Recomputed {} sub-meshes in {}",
            self.staged.sub_mesh_count(),
            human_duration(start.elapsed())
        );
        self.commit();
    }

    fn set_bounds(&mut self, bounds: BoundingBox) {
        self.staged.axes_data_box = Some(bounds);
        self.staged.axes_range = Some(bounds.padded(self.range_padding, self.min_axis_extent));
        self.staged.controls.slice_tool_scale = bounds.longest_extent();
    }

    /// Applies one inbound property change. A new matrix re-slices, the other
    /// properties only republish the controls.
    pub fn apply(&mut self, change: &PropertyChange) -> Result<(), SyncError> {
        if let PropertyChange::Matrix(matrix) = change {
            return self.set_clip_pose(matrix);
        }

        if self.staged.controls.apply(change) {
            debug!("Applied {change:?}");
            self.commit();
        }
        Ok(())
    }

    /// Shows the color bar with the given hex stops and value range.
    pub fn display_color_bar(&mut self, colors: Vec<String>, bounds: (f32, f32)) {
        let controls = &mut self.staged.controls;
        controls.display_color_map = true;
        controls.color_map_colors = colors;
        controls.color_bar_bounds = bounds;
        self.commit();
    }

    /// Runs `f` with publication held back. Whatever `f` changes is published
    /// as one frame when the outermost hold ends. If `f` panics the hold is
    /// released without publishing; the pending changes go out with the next
    /// publication.
    pub fn hold<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.hold_depth += 1;
        let mut guard = HoldGuard(self);
        f(&mut *guard)
    }

    fn commit(&mut self) {
        self.changed = true;
        if self.hold_depth == 0 {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if !self.changed {
            return;
        }
        self.changed = false;

        self.staged.revision = self.published.revision + 1;
        let frame = Arc::new(self.staged.clone());
        self.published = frame.clone();
        subscribers::notify(&self.subscribers, &frame);
    }

    /// Registers a callback invoked with every published frame.
    pub fn subscribe(
        &self,
        callback: impl FnMut(&Arc<Frame>) + Send + 'static,
    ) -> Result<SubscriptionId, SyncError> {
        self.subscribers.lock().subscribe(Box::new(callback))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.lock().unsubscribe(id)
    }

    /// A channel receiving every published frame, for consumers on other
    /// threads.
    pub fn watch(&self) -> Result<Receiver<Arc<Frame>>, SyncError> {
        self.subscribers.lock().channel()
    }

    /// The last published frame.
    pub fn frame(&self) -> Arc<Frame> {
        self.published.clone()
    }

    pub fn state(&self) -> &ClipState {
        &self.clip
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }
}

/// Ends one level of [`Synchronizer::hold`], also when unwinding.
struct HoldGuard<'a>(&'a mut Synchronizer);

impl Deref for HoldGuard<'_> {
    type Target = Synchronizer;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl DerefMut for HoldGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}

impl Drop for HoldGuard<'_> {
    fn drop(&mut self) {
        self.0.hold_depth -= 1;
        if self.0.hold_depth == 0 && !thread::panicking() {
            self.0.flush();
        }
    }
}
