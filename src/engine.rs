//! Gesture state machine driving the labeling canvas.
//!
//! The engine interprets pointer and touch events into draw, translate and
//! resize gestures over the label store. It is synchronous and
//! single-writer: every transition happens inside an event handler, and
//! the only mutation path into the store is a gesture commit. Persistence
//! is fired optimistically as a [`EngineEvent::SaveRequested`] side effect;
//! the engine never waits for it and never rolls back.
//!
//! Each state variant carries exactly the data it needs. A drag holds the
//! selection as a detached snapshot: the labels are removed from the live
//! store on pointer-down, previewed from the frozen snapshot during the
//! drag, and merged back on commit.

use std::mem;

use crate::config::EngineConfig;
use crate::constants::MAX_TOUCH_POINTS;
use crate::coords::{self, CanvasSize, Point, round_ratio};
use crate::error::EngineError;
use crate::event::{CursorIcon, DrawPreview, EngineEvent, EngineWarning, VisualState};
use crate::hit_test;
use crate::model::{CategoryId, Direction, Label, LabelId, Tool};
use crate::store::LabelStore;
use crate::transform;

/// Opaque identifier of the image being annotated.
pub type ImageId = String;

/// The gesture the engine is currently tracking.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No drag in progress; pointer moves are hover.
    #[default]
    Idle,
    /// Rubber-banding a new label from `anchor`.
    DrawingLabel {
        /// Pixel point where the drag started.
        anchor: Point,
        /// Latest drag position, if the pointer has moved.
        current: Option<Point>,
    },
    /// Dragging a detached selection by its body.
    TranslatingSelection {
        /// Pixel point where the drag started.
        anchor: Point,
        /// Latest drag position.
        last: Point,
        /// Frozen selection, removed from the store for the duration.
        snapshot: Vec<Label>,
    },
    /// Dragging a corner handle of a detached selection.
    ResizingSelection {
        /// Pixel point where the drag started.
        anchor: Point,
        /// Latest drag position.
        last: Point,
        /// Frozen selection, removed from the store for the duration.
        snapshot: Vec<Label>,
        /// The corner handle being dragged.
        direction: Direction,
    },
    /// Two-finger draw; each finger is one corner of the new label.
    MultiTouchDrawing {
        /// First touch point.
        point_a: Point,
        /// Second touch point.
        point_b: Point,
    },
}

/// Context menu overlay state. Not a drag state: the gesture machine stays
/// idle while a menu is open.
#[derive(Debug, Clone, PartialEq)]
struct MenuState {
    /// Screen-space point the menu is anchored at.
    screen: Point,
    /// Canvas-space point of the originating right-click / long-press.
    origin: Point,
    /// IDs of the labels under the menu, still present in the store.
    ids: Vec<LabelId>,
}

/// The interactive bounding-box labeling engine.
///
/// Collaborators are injected rather than looked up: labels arrive through
/// [`set_image`](Self::set_image), the current category through
/// [`set_current_category`](Self::set_current_category), and everything the
/// engine wants from the host comes back as [`EngineEvent`]s.
#[derive(Debug, Clone)]
pub struct LabelingEngine {
    config: EngineConfig,
    canvas: CanvasSize,
    store: LabelStore,
    state: GestureState,
    menu: Option<MenuState>,
    tool: Tool,
    image: Option<ImageId>,
    current_category: Option<CategoryId>,
    hovered: Vec<LabelId>,
    cursor: CursorIcon,
    cursor_point: Option<Point>,
    pointer_inside: bool,
    touch_warned: bool,
}

impl LabelingEngine {
    /// Create an engine for the given canvas.
    pub fn new(config: EngineConfig, canvas: CanvasSize) -> Result<Self, EngineError> {
        Self::validate_canvas(canvas, config.canvas_offset)?;
        Ok(Self {
            config,
            canvas,
            store: LabelStore::new(),
            state: GestureState::Idle,
            menu: None,
            tool: Tool::default(),
            image: None,
            current_category: None,
            hovered: Vec::new(),
            cursor: CursorIcon::default(),
            cursor_point: None,
            pointer_inside: false,
            touch_warned: false,
        })
    }

    fn validate_canvas(canvas: CanvasSize, offset: f64) -> Result<(), EngineError> {
        if canvas.inner_width(offset) <= 0.0 || canvas.inner_height(offset) <= 0.0 {
            return Err(EngineError::invalid_canvas(
                canvas.width,
                canvas.height,
                offset,
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Collaborator inputs
    // ========================================================================

    /// Switch to a new image, replacing the label set wholesale and
    /// resetting all transient gesture state.
    pub fn set_image(&mut self, image: impl Into<ImageId>, labels: Vec<Label>) {
        let image = image.into();
        log::debug!("image changed to '{image}', {} labels", labels.len());
        self.image = Some(image);
        self.store.replace_all(labels);
        self.state = GestureState::Idle;
        self.menu = None;
        self.hovered.clear();
        self.cursor = CursorIcon::default();
        self.cursor_point = None;
        self.touch_warned = false;
    }

    /// Resize the canvas (e.g. window resize). Fails if the new size leaves
    /// no drawing area inside the offset margin.
    pub fn set_canvas_size(&mut self, canvas: CanvasSize) -> Result<(), EngineError> {
        Self::validate_canvas(canvas, self.config.canvas_offset)?;
        self.canvas = canvas;
        Ok(())
    }

    /// Set the active tool. Called by the host, possibly in response to a
    /// [`EngineEvent::ToolChangeRequested`].
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::debug!("tool changed to {}", tool.name());
            self.tool = tool;
        }
    }

    /// Set the category assigned to newly drawn labels.
    pub fn set_current_category(&mut self, category: Option<CategoryId>) {
        self.current_category = category;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Committed labels for the current image, insertion-ordered.
    pub fn labels(&self) -> &[Label] {
        self.store.labels()
    }

    /// The label store.
    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    /// The current gesture state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// The active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The current image, if one is open.
    pub fn image(&self) -> Option<&ImageId> {
        self.image.as_ref()
    }

    /// IDs selected by the open context menu, if any.
    pub fn menu_selection(&self) -> Option<&[LabelId]> {
        self.menu.as_ref().map(|m| m.ids.as_slice())
    }

    // ========================================================================
    // Pointer events (mouse, primary button)
    // ========================================================================

    /// Primary-button press. `shift` selects every label under the point
    /// instead of the smallest one.
    pub fn pointer_down(&mut self, point: Point, shift: bool) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        if self.menu.take().is_some() {
            // The press only dismisses the menu; it must not also grab a
            // label underneath it.
            events.push(EngineEvent::MenuClosed);
            return events;
        }
        if !matches!(self.state, GestureState::Idle) {
            return events;
        }

        let offset = self.config.canvas_offset;
        match self.tool {
            Tool::Label => {
                if coords::point_is_outside(self.canvas, point, offset) {
                    return events;
                }
                log::debug!("draw started at ({:.1}, {:.1})", point.x, point.y);
                self.state = GestureState::DrawingLabel {
                    anchor: point,
                    current: None,
                };
            }
            Tool::Move => {
                let (handle, smallest, hovered) = {
                    let labels = self.store.labels();
                    let hit = hit_test::cursor_at(
                        labels,
                        point,
                        self.canvas,
                        offset,
                        self.config.resize_handle_size,
                    );
                    let handle = match (hit.label, hit.direction) {
                        (Some(label), Some(direction)) => Some((label.id, direction)),
                        _ => None,
                    };
                    let smallest =
                        hit_test::smallest_label_under_point(labels, point, self.canvas, offset)
                            .map(|l| l.id);
                    let hovered = hit_test::hovered_ids(labels, point, self.canvas, offset);
                    (handle, smallest, hovered)
                };

                if let Some((id, direction)) = handle {
                    let snapshot = self.store.take_by_ids(&[id]);
                    log::debug!("resize started on {id} ({direction:?})");
                    self.state = GestureState::ResizingSelection {
                        anchor: point,
                        last: point,
                        snapshot,
                        direction,
                    };
                } else {
                    let ids: Vec<LabelId> = if shift {
                        hovered
                    } else {
                        smallest.into_iter().collect()
                    };
                    if ids.is_empty() {
                        return events;
                    }
                    let snapshot = self.store.take_by_ids(&ids);
                    log::debug!("translate started, {} label(s)", snapshot.len());
                    self.state = GestureState::TranslatingSelection {
                        anchor: point,
                        last: point,
                        snapshot,
                    };
                }
            }
        }
        events
    }

    /// Pointer motion. Hover while idle, drag update otherwise.
    pub fn pointer_move(&mut self, point: Point) -> Vec<EngineEvent> {
        self.pointer_inside = true;
        if matches!(self.state, GestureState::Idle) {
            return self.idle_hover(point);
        }
        match &mut self.state {
            GestureState::DrawingLabel { current, .. } => *current = Some(point),
            GestureState::TranslatingSelection { last, .. } => *last = point,
            GestureState::ResizingSelection { last, .. } => *last = point,
            GestureState::Idle | GestureState::MultiTouchDrawing { .. } => {}
        }
        Vec::new()
    }

    /// Primary-button release: commits the gesture in progress.
    pub fn pointer_up(&mut self, point: Point) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let state = mem::take(&mut self.state);
        match state {
            // Release without a prior press: expected noise, no-op.
            GestureState::Idle => {}
            GestureState::DrawingLabel { anchor, .. } => {
                self.commit_draw(anchor, point, &mut events);
            }
            GestureState::TranslatingSelection {
                anchor, snapshot, ..
            } => {
                self.commit_translate(anchor, point, snapshot, &mut events);
            }
            GestureState::ResizingSelection {
                anchor,
                snapshot,
                direction,
                ..
            } => {
                self.commit_resize(anchor, point, snapshot, direction, &mut events);
            }
            // Touch gestures end through touch_end, not pointer_up.
            GestureState::MultiTouchDrawing { point_a, point_b } => {
                self.state = GestureState::MultiTouchDrawing { point_a, point_b };
            }
        }
        events
    }

    /// Pointer left the canvas. Clears the hover visuals; an in-progress
    /// drag keeps its state and resumes on the next move.
    pub fn pointer_leave(&mut self) -> Vec<EngineEvent> {
        self.pointer_inside = false;
        self.hovered.clear();
        self.cursor_point = None;
        if let GestureState::DrawingLabel { current, .. } = &mut self.state {
            *current = None;
        }
        let mut events = Vec::new();
        if self.cursor != CursorIcon::Default {
            self.cursor = CursorIcon::Default;
            events.push(EngineEvent::CursorChanged(self.cursor));
        }
        events
    }

    /// Right-click: open a context menu over the labels under `point`.
    /// The hit labels are snapshotted by ID but stay in the store.
    pub fn context_menu(&mut self, point: Point, screen: Point) -> Vec<EngineEvent> {
        if !matches!(self.state, GestureState::Idle) {
            return Vec::new();
        }
        let offset = self.config.canvas_offset;
        let ids = hit_test::hovered_ids(self.store.labels(), point, self.canvas, offset);
        log::debug!("context menu over {} label(s)", ids.len());
        self.menu = Some(MenuState {
            screen,
            origin: point,
            ids,
        });
        vec![EngineEvent::MenuOpened { at: screen }]
    }

    // ========================================================================
    // Context menu actions
    // ========================================================================

    /// Assign `category` to every label under the open menu, then close it.
    pub fn menu_assign_category(&mut self, category: CategoryId) -> Vec<EngineEvent> {
        let Some(menu) = self.menu.take() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        let mut changed = false;
        for id in &menu.ids {
            if let Some(label) = self.store.get_mut(*id) {
                label.category_id = Some(category);
                changed = true;
            }
        }
        if changed {
            log::debug!("category {category} assigned to {} label(s)", menu.ids.len());
            events.push(EngineEvent::SaveRequested(self.store.to_vec()));
        }
        events.push(EngineEvent::MenuClosed);
        events
    }

    /// Delete every label under the open menu, then close it.
    pub fn menu_delete(&mut self) -> Vec<EngineEvent> {
        let Some(menu) = self.menu.take() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        let removed = self.store.remove_by_ids(&menu.ids);
        if removed > 0 {
            log::debug!("{removed} label(s) deleted");
            events.push(EngineEvent::SaveRequested(self.store.to_vec()));
        }
        events.push(EngineEvent::MenuClosed);
        events
    }

    /// Close the menu without acting, clearing its selection.
    pub fn menu_close(&mut self) -> Vec<EngineEvent> {
        match self.menu.take() {
            Some(_) => vec![EngineEvent::MenuClosed],
            None => Vec::new(),
        }
    }

    // ========================================================================
    // Touch events
    // ========================================================================

    /// Touch points went down. One finger drags a menu-parked selection,
    /// two fingers draw a new label regardless of the active tool, more
    /// are rejected with a warning.
    pub fn touch_start(&mut self, points: &[Point]) -> Vec<EngineEvent> {
        self.handle_touch(points)
    }

    /// Touch points moved. Same interpretation as [`touch_start`](Self::touch_start).
    pub fn touch_move(&mut self, points: &[Point]) -> Vec<EngineEvent> {
        self.handle_touch(points)
    }

    fn handle_touch(&mut self, points: &[Point]) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.pointer_inside = true;
        match points.len() {
            0 => {}
            1 => {
                let point = points[0];
                if let GestureState::TranslatingSelection { anchor, last, .. } = &mut self.state {
                    *last = point;
                    let anchor = *anchor;
                    if self.menu.is_some()
                        && point.distance_to(anchor) > self.config.touch_menu_dismiss_distance
                    {
                        // Moved far enough to be a drag, not a tap: the
                        // long-press menu goes away.
                        self.menu = None;
                        events.push(EngineEvent::MenuClosed);
                    }
                } else if matches!(self.state, GestureState::Idle) {
                    // A selection parked in the context menu becomes a
                    // single-finger drag.
                    if let Some(menu) = &self.menu {
                        if !menu.ids.is_empty() {
                            let origin = menu.origin;
                            let ids = menu.ids.clone();
                            let snapshot = self.store.take_by_ids(&ids);
                            if !snapshot.is_empty() {
                                log::debug!(
                                    "touch translate started, {} label(s)",
                                    snapshot.len()
                                );
                                self.state = GestureState::TranslatingSelection {
                                    anchor: origin,
                                    last: point,
                                    snapshot,
                                };
                            }
                        }
                    }
                }
            }
            MAX_TOUCH_POINTS => match &mut self.state {
                GestureState::MultiTouchDrawing { point_a, point_b } => {
                    *point_a = points[0];
                    *point_b = points[1];
                }
                GestureState::Idle => {
                    log::debug!("two-finger draw started");
                    self.state = GestureState::MultiTouchDrawing {
                        point_a: points[0],
                        point_b: points[1],
                    };
                }
                _ => {}
            },
            count => {
                if !self.touch_warned {
                    self.touch_warned = true;
                    log::warn!("ignoring gesture with {count} touch points");
                    events.push(EngineEvent::Warning(EngineWarning::TooManyTouchPoints {
                        count,
                    }));
                }
            }
        }
        events
    }

    /// All touch points lifted: commits the touch gesture in progress.
    pub fn touch_end(&mut self) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        self.touch_warned = false;
        let state = mem::take(&mut self.state);
        match state {
            GestureState::TranslatingSelection {
                anchor,
                last,
                snapshot,
            } => {
                if last.distance_to(anchor) > self.config.touch_menu_dismiss_distance
                    && self.menu.take().is_some()
                {
                    events.push(EngineEvent::MenuClosed);
                }
                self.commit_translate(anchor, last, snapshot, &mut events);
            }
            GestureState::MultiTouchDrawing { point_a, point_b } => {
                // The second finger is the anchor so the stored span sign
                // matches the first finger's direction.
                self.commit_draw(point_b, point_a, &mut events);
            }
            other => self.state = other,
        }
        events
    }

    // ========================================================================
    // Visual state
    // ========================================================================

    /// Snapshot of the transient layer for a rendering adapter.
    pub fn visual_state(&self) -> VisualState {
        let mut visual = VisualState {
            cursor: self.cursor,
            menu: self.menu.as_ref().map(|m| m.screen),
            ..VisualState::default()
        };
        if !self.pointer_inside {
            return visual;
        }
        let offset = self.config.canvas_offset;
        match &self.state {
            GestureState::Idle => {
                visual.hovered = self.hovered.clone();
                if self.tool == Tool::Label {
                    visual.cursor_guides = self
                        .cursor_point
                        .filter(|p| !coords::point_is_outside(self.canvas, *p, offset));
                }
            }
            GestureState::DrawingLabel {
                anchor,
                current: Some(current),
            } => {
                visual.draw_preview = Some(DrawPreview {
                    anchor: *anchor,
                    current: *current,
                    meets_minimum: !coords::span_below_minimum(
                        *anchor,
                        *current,
                        self.config.min_label_width,
                        self.config.min_label_height,
                    ),
                });
            }
            GestureState::DrawingLabel { current: None, .. } => {}
            GestureState::TranslatingSelection {
                anchor,
                last,
                snapshot,
            } => {
                let delta = coords::normalized_delta(self.canvas, *last, *anchor, offset);
                visual.floating = transform::translate(snapshot, delta);
            }
            GestureState::ResizingSelection {
                anchor,
                last,
                snapshot,
                direction,
            } => {
                let delta = coords::normalized_delta(self.canvas, *last, *anchor, offset);
                visual.floating = transform::resize(
                    snapshot,
                    delta,
                    *direction,
                    self.canvas,
                    offset,
                    self.config.min_label_width,
                    self.config.min_label_height,
                    false,
                );
            }
            GestureState::MultiTouchDrawing { point_a, point_b } => {
                visual.draw_preview = Some(DrawPreview {
                    anchor: *point_b,
                    current: *point_a,
                    meets_minimum: !coords::span_below_minimum(
                        *point_a,
                        *point_b,
                        self.config.min_label_width,
                        self.config.min_label_height,
                    ),
                });
            }
        }
        visual
    }

    // ========================================================================
    // Commit paths
    // ========================================================================

    fn commit_draw(&mut self, anchor: Point, current: Point, events: &mut Vec<EngineEvent>) {
        let offset = self.config.canvas_offset;
        if coords::point_is_outside(self.canvas, anchor, offset)
            || coords::point_is_outside(self.canvas, current, offset)
        {
            log::debug!("draw discarded: corner outside canvas");
            return;
        }
        if coords::span_below_minimum(
            anchor,
            current,
            self.config.min_label_width,
            self.config.min_label_height,
        ) {
            log::debug!("draw discarded: span below minimum size");
            return;
        }
        let rect = coords::to_normalized(anchor, current, self.canvas, offset);
        let label = Label::new(rect.x, rect.y, rect.w, rect.h, self.current_category);
        log::debug!(
            "label {} created at ({:.4}, {:.4}) size ({:.4}, {:.4})",
            label.id,
            label.x,
            label.y,
            label.w,
            label.h
        );
        self.store.upsert_many(vec![label]);
        events.push(EngineEvent::SaveRequested(self.store.to_vec()));
    }

    fn commit_translate(
        &mut self,
        anchor: Point,
        point: Point,
        snapshot: Vec<Label>,
        events: &mut Vec<EngineEvent>,
    ) {
        if snapshot.is_empty() {
            return;
        }
        let offset = self.config.canvas_offset;
        let delta = coords::normalized_delta(self.canvas, point, anchor, offset);
        let moved = round_labels(transform::translate(&snapshot, delta));
        log::debug!("translate committed, {} label(s)", moved.len());
        self.store.upsert_many(moved);
        events.push(EngineEvent::SaveRequested(self.store.to_vec()));
    }

    fn commit_resize(
        &mut self,
        anchor: Point,
        point: Point,
        snapshot: Vec<Label>,
        direction: Direction,
        events: &mut Vec<EngineEvent>,
    ) {
        if snapshot.is_empty() {
            return;
        }
        let offset = self.config.canvas_offset;
        let delta = coords::normalized_delta(self.canvas, point, anchor, offset);
        let resized = round_labels(transform::resize(
            &snapshot,
            delta,
            direction,
            self.canvas,
            offset,
            self.config.min_label_width,
            self.config.min_label_height,
            true,
        ));
        log::debug!("resize committed ({direction:?}), {} label(s)", resized.len());
        self.store.upsert_many(resized);
        events.push(EngineEvent::SaveRequested(self.store.to_vec()));
    }

    // ========================================================================
    // Hover
    // ========================================================================

    fn idle_hover(&mut self, point: Point) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        let offset = self.config.canvas_offset;
        self.cursor_point = Some(point);
        self.hovered = hit_test::hovered_ids(self.store.labels(), point, self.canvas, offset);

        if self.config.auto_switch {
            match self.tool {
                Tool::Label if !self.hovered.is_empty() => {
                    events.push(EngineEvent::ToolChangeRequested(Tool::Move));
                }
                Tool::Move if self.hovered.is_empty() => {
                    events.push(EngineEvent::ToolChangeRequested(Tool::Label));
                }
                _ => {}
            }
        }

        let cursor = self.cursor_for(point);
        if cursor != self.cursor {
            self.cursor = cursor;
            events.push(EngineEvent::CursorChanged(cursor));
        }
        events
    }

    fn cursor_for(&self, point: Point) -> CursorIcon {
        let offset = self.config.canvas_offset;
        match self.tool {
            Tool::Label => {
                if coords::point_is_outside(self.canvas, point, offset) {
                    CursorIcon::Default
                } else {
                    CursorIcon::Crosshair
                }
            }
            Tool::Move => {
                let hit = hit_test::cursor_at(
                    self.store.labels(),
                    point,
                    self.canvas,
                    offset,
                    self.config.resize_handle_size,
                );
                match hit.direction {
                    Some(direction) if direction.is_nwse() => CursorIcon::ResizeNwse,
                    Some(_) => CursorIcon::ResizeNesw,
                    None if hit.label.is_some() => CursorIcon::Move,
                    None => CursorIcon::Default,
                }
            }
        }
    }
}

/// Round committed coordinates so stored geometry stays diff-friendly.
fn round_labels(labels: Vec<Label>) -> Vec<Label> {
    labels
        .into_iter()
        .map(|mut label| {
            label.x = round_ratio(label.x);
            label.y = round_ratio(label.y);
            label.w = round_ratio(label.w);
            label.h = round_ratio(label.h);
            label
        })
        .collect()
}
