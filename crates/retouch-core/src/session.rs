//! Edit session: the crop/draw tool state machine.
//!
//! A session owns one [`EditState`] and at most one draft. The crop tool
//! edits a draft orientation, rectangle and aspect constraint; the draw tool
//! edits a draft stroke list with snapshot history. Drafts only reach the
//! committed state through [`EditSession::commit_crop`] or
//! [`EditSession::end_draw`] with `committed = true`.
//!
//! Public operations never fail loudly. They return `true` when they did
//! something and `false` for a no-op or an invalid transition; invalid
//! transitions are logged at debug level.

use std::fmt;

use crate::config::SessionConfig;
use crate::error::EditError;
use crate::history::UndoRedoStack;
use crate::state::EditState;
use crate::stroke::{ActiveStroke, PencilStyle, Point, Stroke, ToolMode};
use crate::transform::{
    self, fit_to_aspect, AspectConstraint, FlipAxis, Orientation, Rectangle,
};

/// Which tool, if any, is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    Viewing,
    Cropping,
    Drawing,
}

impl SessionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionMode::Viewing => "viewing",
            SessionMode::Cropping => "cropping",
            SessionMode::Drawing => "drawing",
        }
    }
}

/// Where the pencil style lives between sessions.
///
/// Read once when the draw tool opens, written back when a drawing is
/// committed. The storage format is the implementor's concern.
pub trait PencilStore {
    fn load(&self) -> Option<PencilStyle>;
    fn store(&mut self, style: PencilStyle);
}

/// In-memory [`PencilStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryPencilStore {
    style: Option<PencilStyle>,
}

impl MemoryPencilStore {
    pub fn new(style: Option<PencilStyle>) -> Self {
        Self { style }
    }
}

impl PencilStore for MemoryPencilStore {
    fn load(&self) -> Option<PencilStyle> {
        self.style
    }

    fn store(&mut self, style: PencilStyle) {
        self.style = Some(style);
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CropDraft {
    orientation: Orientation,
    rectangle: Rectangle,
    aspect: AspectConstraint,
}

impl CropDraft {
    fn from_state(state: &EditState) -> Self {
        Self {
            orientation: state.orientation,
            rectangle: state.rectangle,
            aspect: state.aspect,
        }
    }
}

#[derive(Debug, Clone)]
struct DrawDraft {
    /// Never empty while drawing: the base snapshot is pushed on entry.
    history: UndoRedoStack<Vec<Stroke>>,
    active: Option<ActiveStroke>,
    pencil: PencilStyle,
    mode: ToolMode,
}

impl DrawDraft {
    fn strokes(&self) -> &[Stroke] {
        self.history.current().map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone)]
enum Tool {
    Idle,
    Crop(CropDraft),
    Draw(DrawDraft),
}

/// Owns an [`EditState`] and routes tool gestures to it.
pub struct EditSession {
    state: EditState,
    tool: Tool,
    config: SessionConfig,
    pencil_store: Box<dyn PencilStore>,
    cropped: bool,
    drawn: bool,
    export_pending: bool,
    preview_revision: u64,
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("state", &self.state)
            .field("tool", &self.tool)
            .field("config", &self.config)
            .field("cropped", &self.cropped)
            .field("drawn", &self.drawn)
            .field("export_pending", &self.export_pending)
            .field("preview_revision", &self.preview_revision)
            .finish_non_exhaustive()
    }
}

/// Turn an internal result into the boolean the host sees.
fn report(result: Result<bool, EditError>) -> bool {
    match result {
        Ok(done) => done,
        Err(err) => {
            log::debug!("{}", err);
            false
        }
    }
}

impl EditSession {
    /// Start a session over an existing state.
    pub fn new(state: EditState, config: SessionConfig) -> Self {
        let cropped = state.is_cropped(config.modified_tolerance);
        let drawn = state.has_drawing();
        Self {
            state,
            tool: Tool::Idle,
            config,
            pencil_store: Box::new(MemoryPencilStore::default()),
            cropped,
            drawn,
            export_pending: false,
            preview_revision: 0,
        }
    }

    /// Use `store` for the persisted pencil style.
    pub fn with_pencil_store(mut self, store: Box<dyn PencilStore>) -> Self {
        self.pencil_store = store;
        self
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// The committed state. Drafts are not visible here.
    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn into_state(self) -> EditState {
        self.state
    }

    pub fn mode(&self) -> SessionMode {
        match self.tool {
            Tool::Idle => SessionMode::Viewing,
            Tool::Crop(_) => SessionMode::Cropping,
            Tool::Draw(_) => SessionMode::Drawing,
        }
    }

    /// "Cropped" indicator: the committed geometry differs from the untouched image.
    pub fn is_cropped(&self) -> bool {
        self.cropped
    }

    /// "Drawn" indicator: the committed state carries strokes.
    pub fn has_drawing(&self) -> bool {
        self.drawn
    }

    pub fn is_export_pending(&self) -> bool {
        self.export_pending
    }

    /// Bumped whenever the crop draft's transform changes, so cached previews
    /// can be dropped.
    pub fn preview_revision(&self) -> u64 {
        self.preview_revision
    }

    /// Geometry to display: the draft while cropping, otherwise the committed state.
    pub fn geometry(&self) -> (Orientation, Rectangle, AspectConstraint) {
        match &self.tool {
            Tool::Crop(draft) => (draft.orientation, draft.rectangle, draft.aspect),
            _ => (
                self.state.orientation,
                self.state.rectangle,
                self.state.aspect,
            ),
        }
    }

    /// Strokes to display: the draft while drawing, otherwise the committed state.
    pub fn strokes(&self) -> &[Stroke] {
        match &self.tool {
            Tool::Draw(draft) => draft.strokes(),
            _ => &self.state.strokes,
        }
    }

    /// The stroke under the pointer, if a gesture is in progress.
    pub fn active_stroke(&self) -> Option<&ActiveStroke> {
        match &self.tool {
            Tool::Draw(draft) => draft.active.as_ref(),
            _ => None,
        }
    }

    /// Current pencil while drawing.
    pub fn pencil(&self) -> Option<PencilStyle> {
        match &self.tool {
            Tool::Draw(draft) => Some(draft.pencil),
            _ => None,
        }
    }

    /// Current tool mode while drawing.
    pub fn tool_mode(&self) -> Option<ToolMode> {
        match &self.tool {
            Tool::Draw(draft) => Some(draft.mode),
            _ => None,
        }
    }

    fn mode_label(&self) -> &'static str {
        if self.export_pending {
            "exporting"
        } else {
            self.mode().as_str()
        }
    }

    fn invalid(&self, operation: &'static str) -> EditError {
        EditError::InvalidTransition {
            operation,
            mode: self.mode_label(),
        }
    }

    // ------------------------------------------------------------------
    // Crop tool
    // ------------------------------------------------------------------

    /// Enter the crop tool with a draft copy of the committed geometry.
    ///
    /// An open drawing draft is discarded.
    pub fn begin_crop(&mut self) -> bool {
        report(self.try_begin_crop())
    }

    fn try_begin_crop(&mut self) -> Result<bool, EditError> {
        if self.export_pending || matches!(self.tool, Tool::Crop(_)) {
            return Err(self.invalid("begin_crop"));
        }
        if matches!(self.tool, Tool::Draw(_)) {
            log::debug!("Discarding drawing draft to open the crop tool");
        }
        self.tool = Tool::Crop(CropDraft::from_state(&self.state));
        Ok(true)
    }

    /// Write the crop draft into the committed state.
    pub fn commit_crop(&mut self) -> bool {
        report(self.try_commit_crop())
    }

    fn try_commit_crop(&mut self) -> Result<bool, EditError> {
        match std::mem::replace(&mut self.tool, Tool::Idle) {
            Tool::Crop(draft) => {
                self.state.orientation = draft.orientation;
                self.state.rectangle = draft.rectangle;
                self.state.aspect = draft.aspect;
                self.cropped = self.state.is_cropped(self.config.modified_tolerance);
                log::debug!(
                    "Crop committed: {:?}, {:?}, {}",
                    self.state.orientation,
                    self.state.rectangle,
                    self.state.aspect
                );
                Ok(true)
            }
            other => {
                self.tool = other;
                Err(self.invalid("commit_crop"))
            }
        }
    }

    /// Leave the crop tool, discarding the draft.
    pub fn cancel_crop(&mut self) -> bool {
        report(self.try_cancel_crop())
    }

    fn try_cancel_crop(&mut self) -> Result<bool, EditError> {
        match std::mem::replace(&mut self.tool, Tool::Idle) {
            Tool::Crop(_) => {
                self.cropped = self.state.is_cropped(self.config.modified_tolerance);
                Ok(true)
            }
            other => {
                self.tool = other;
                Err(self.invalid("cancel_crop"))
            }
        }
    }

    fn crop_draft_mut(&mut self, operation: &'static str) -> Result<&mut CropDraft, EditError> {
        let err = self.invalid(operation);
        match &mut self.tool {
            Tool::Crop(draft) => Ok(draft),
            _ => Err(err),
        }
    }

    /// Rotate the crop draft a quarter turn clockwise.
    pub fn rotate_clockwise(&mut self) -> bool {
        report(self.try_rotate_clockwise())
    }

    fn try_rotate_clockwise(&mut self) -> Result<bool, EditError> {
        let draft = self.crop_draft_mut("rotate_clockwise")?;
        let (orientation, rectangle, aspect) =
            transform::rotate_clockwise(draft.orientation, draft.rectangle, draft.aspect);
        draft.orientation = orientation;
        draft.rectangle = rectangle;
        draft.aspect = aspect;
        self.invalidate_preview();
        Ok(true)
    }

    /// Mirror the crop draft along a visual axis.
    pub fn flip(&mut self, axis: FlipAxis) -> bool {
        report(self.try_flip(axis))
    }

    fn try_flip(&mut self, axis: FlipAxis) -> Result<bool, EditError> {
        let draft = self.crop_draft_mut("flip")?;
        let (orientation, rectangle) = transform::flip(draft.orientation, axis, draft.rectangle);
        draft.orientation = orientation;
        draft.rectangle = rectangle;
        self.invalidate_preview();
        Ok(true)
    }

    /// Choose an aspect constraint for the crop draft.
    ///
    /// `Custom` always clears the constraint. Picking a ratio while another
    /// ratio is active is a no-op; the host clears it first. When the media
    /// size is known the draft rectangle is fitted to the new ratio.
    pub fn set_aspect(&mut self, aspect: AspectConstraint) -> bool {
        report(self.try_set_aspect(aspect))
    }

    fn try_set_aspect(&mut self, aspect: AspectConstraint) -> Result<bool, EditError> {
        let media_size = self.state.media.size;
        let draft = self.crop_draft_mut("set_aspect")?;

        if aspect.is_custom() {
            draft.aspect = AspectConstraint::Custom;
            return Ok(true);
        }
        if !draft.aspect.is_custom() {
            return Ok(false);
        }

        let size = media_size.map(|s| draft.orientation.oriented_size(s));
        draft.aspect = aspect;
        draft.rectangle = fit_to_aspect(draft.rectangle, aspect, size);
        self.invalidate_preview();
        Ok(true)
    }

    /// Replace the crop draft's rectangle, e.g. after the user drags a handle.
    pub fn set_crop_rectangle(&mut self, rectangle: Rectangle) -> bool {
        report(self.try_set_crop_rectangle(rectangle))
    }

    fn try_set_crop_rectangle(&mut self, rectangle: Rectangle) -> Result<bool, EditError> {
        let draft = self.crop_draft_mut("set_crop_rectangle")?;
        if draft.rectangle == rectangle {
            return Ok(false);
        }
        draft.rectangle = rectangle;
        self.invalidate_preview();
        Ok(true)
    }

    fn invalidate_preview(&mut self) {
        self.preview_revision = self.preview_revision.wrapping_add(1);
    }

    // ------------------------------------------------------------------
    // Draw tool
    // ------------------------------------------------------------------

    /// Enter the draw tool.
    ///
    /// The draft starts from the committed strokes with a one-snapshot
    /// history, and the pencil is read from the store. An open crop draft is
    /// discarded.
    pub fn begin_draw(&mut self) -> bool {
        report(self.try_begin_draw())
    }

    fn try_begin_draw(&mut self) -> Result<bool, EditError> {
        if self.export_pending || matches!(self.tool, Tool::Draw(_)) {
            return Err(self.invalid("begin_draw"));
        }
        if matches!(self.tool, Tool::Crop(_)) {
            log::debug!("Discarding crop draft to open the draw tool");
        }

        let pencil = self
            .pencil_store
            .load()
            .unwrap_or(self.config.default_pencil);

        let mut history = match self.config.history_limit {
            Some(limit) => UndoRedoStack::with_limit(limit),
            None => UndoRedoStack::new(),
        };
        history.push(self.state.strokes.clone());

        self.tool = Tool::Draw(DrawDraft {
            history,
            active: None,
            pencil,
            mode: ToolMode::Draw,
        });
        Ok(true)
    }

    /// Leave the draw tool, committing or discarding the draft.
    ///
    /// On commit the draft's current snapshot becomes the committed stroke
    /// list and the pencil is written back to the store. A stroke still under
    /// the pointer is dropped either way.
    pub fn end_draw(&mut self, committed: bool) -> bool {
        report(self.try_end_draw(committed))
    }

    fn try_end_draw(&mut self, committed: bool) -> Result<bool, EditError> {
        let draft = match std::mem::replace(&mut self.tool, Tool::Idle) {
            Tool::Draw(draft) => draft,
            other => {
                self.tool = other;
                return Err(self.invalid("end_draw"));
            }
        };

        if draft.active.is_some() {
            log::debug!("Dropping unfinished stroke");
        }

        if committed {
            self.state.strokes = draft.strokes().to_vec();
            self.pencil_store.store(draft.pencil);
            log::debug!("Drawing committed: {} strokes", self.state.strokes.len());
        }
        self.drawn = self.state.has_drawing();
        Ok(true)
    }

    fn draw_draft_mut(&mut self, operation: &'static str) -> Result<&mut DrawDraft, EditError> {
        let err = self.invalid(operation);
        match &mut self.tool {
            Tool::Draw(draft) => Ok(draft),
            _ => Err(err),
        }
    }

    /// Start a stroke gesture at `point`.
    pub fn begin_stroke(&mut self, point: Point) -> bool {
        report(self.try_begin_stroke(point))
    }

    fn try_begin_stroke(&mut self, point: Point) -> Result<bool, EditError> {
        let draft = self.draw_draft_mut("begin_stroke")?;
        if draft.active.is_some() {
            return Ok(false);
        }
        draft.active = Some(ActiveStroke::begin(point, draft.pencil, draft.mode));
        Ok(true)
    }

    /// Feed the next pointer sample of the current gesture.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        report(self.try_extend_stroke(point))
    }

    fn try_extend_stroke(&mut self, point: Point) -> Result<bool, EditError> {
        let draft = self.draw_draft_mut("extend_stroke")?;
        match draft.active.as_mut() {
            Some(active) => {
                active.extend(point);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Finish the current gesture at `point` and record one history snapshot.
    pub fn end_stroke(&mut self, point: Point) -> bool {
        report(self.try_end_stroke(point))
    }

    fn try_end_stroke(&mut self, point: Point) -> Result<bool, EditError> {
        let draft = self.draw_draft_mut("end_stroke")?;
        let Some(active) = draft.active.take() else {
            return Ok(false);
        };

        let mut strokes = draft.strokes().to_vec();
        strokes.push(active.finish(point));
        draft.history.push(strokes);
        Ok(true)
    }

    /// Abandon the current gesture without recording it.
    pub fn cancel_stroke(&mut self) -> bool {
        report(self.try_cancel_stroke())
    }

    fn try_cancel_stroke(&mut self) -> Result<bool, EditError> {
        let draft = self.draw_draft_mut("cancel_stroke")?;
        Ok(draft.active.take().is_some())
    }

    /// Step the drawing back one gesture.
    pub fn undo(&mut self) -> bool {
        report(self.try_undo())
    }

    fn try_undo(&mut self) -> Result<bool, EditError> {
        let draft = self.draw_draft_mut("undo")?;
        if draft.active.is_some() {
            return Ok(false);
        }
        Ok(draft.history.undo().is_some())
    }

    /// Step the drawing forward one gesture.
    pub fn redo(&mut self) -> bool {
        report(self.try_redo())
    }

    fn try_redo(&mut self) -> Result<bool, EditError> {
        let draft = self.draw_draft_mut("redo")?;
        if draft.active.is_some() {
            return Ok(false);
        }
        Ok(draft.history.redo().is_some())
    }

    pub fn can_undo(&self) -> bool {
        match &self.tool {
            Tool::Draw(draft) => draft.active.is_none() && draft.history.can_undo(),
            _ => false,
        }
    }

    pub fn can_redo(&self) -> bool {
        match &self.tool {
            Tool::Draw(draft) => draft.active.is_none() && draft.history.can_redo(),
            _ => false,
        }
    }

    /// Switch between painting and erasing for the next gesture.
    pub fn set_tool_mode(&mut self, mode: ToolMode) -> bool {
        report(self.try_set_tool_mode(mode))
    }

    fn try_set_tool_mode(&mut self, mode: ToolMode) -> Result<bool, EditError> {
        let draft = self.draw_draft_mut("set_tool_mode")?;
        if draft.mode == mode {
            return Ok(false);
        }
        draft.mode = mode;
        Ok(true)
    }

    /// Change pencil color/thickness. Switches back to painting.
    pub fn set_pencil(&mut self, style: PencilStyle) -> bool {
        report(self.try_set_pencil(style))
    }

    fn try_set_pencil(&mut self, style: PencilStyle) -> Result<bool, EditError> {
        let draft = self.draw_draft_mut("set_pencil")?;
        draft.pencil = style;
        draft.mode = ToolMode::Draw;
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Export and media options
    // ------------------------------------------------------------------

    /// Mark an export as outstanding. Only valid with no tool open.
    pub fn begin_export(&mut self) -> bool {
        report(self.try_begin_export())
    }

    fn try_begin_export(&mut self) -> Result<bool, EditError> {
        if self.export_pending || !matches!(self.tool, Tool::Idle) {
            return Err(self.invalid("begin_export"));
        }
        self.export_pending = true;
        Ok(true)
    }

    /// Clear the outstanding export.
    pub fn finish_export(&mut self) -> bool {
        report(self.try_finish_export())
    }

    fn try_finish_export(&mut self) -> Result<bool, EditError> {
        if !self.export_pending {
            return Err(self.invalid("finish_export"));
        }
        self.export_pending = false;
        Ok(true)
    }

    /// Set or clear the self-destruct timer.
    pub fn set_ttl(&mut self, ttl: Option<u32>) -> bool {
        let ttl = ttl.filter(|&seconds| seconds > 0);
        if self.state.ttl == ttl {
            return false;
        }
        self.state.ttl = ttl;
        true
    }

    /// Send a video without sound. No-op for photos.
    pub fn set_muted(&mut self, muted: bool) -> bool {
        if !self.state.media.is_video() || self.state.muted == muted {
            return false;
        }
        self.state.muted = muted;
        true
    }

    /// Flip the mute flag of a video. No-op for photos.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.state.muted;
        self.set_muted(muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MediaRef;
    use crate::stroke::StrokeColor;
    use crate::transform::{Flip, Rotation};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn session() -> EditSession {
        EditSession::new(EditState::new(MediaRef::photo("photo")), SessionConfig::default())
    }

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    fn draw_line(session: &mut EditSession, from: f32) {
        assert!(session.begin_stroke(p(from, 0.0)));
        assert!(session.extend_stroke(p(from + 0.1, 0.1)));
        assert!(session.extend_stroke(p(from + 0.2, 0.2)));
        assert!(session.end_stroke(p(from + 0.3, 0.3)));
    }

    /// Pencil store shared with the test so writes can be observed.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<Option<PencilStyle>>>);

    impl PencilStore for SharedStore {
        fn load(&self) -> Option<PencilStyle> {
            *self.0.borrow()
        }

        fn store(&mut self, style: PencilStyle) {
            *self.0.borrow_mut() = Some(style);
        }
    }

    #[test]
    fn test_starts_viewing() {
        let s = session();
        assert_eq!(s.mode(), SessionMode::Viewing);
        assert!(!s.is_cropped());
        assert!(!s.has_drawing());
        assert!(!s.can_undo());
    }

    #[test]
    fn test_indicators_from_incoming_state() {
        let mut state = EditState::new(MediaRef::photo("p"));
        state.aspect = AspectConstraint::Square;
        let s = EditSession::new(state, SessionConfig::default());
        assert!(s.is_cropped());
    }

    #[test]
    fn test_begin_then_cancel_crop_is_identity() {
        let mut state = EditState::new(MediaRef::photo("p").with_size(400, 300));
        state.orientation = Orientation::new(Rotation::Clockwise90, Flip::Vertical);
        state.rectangle = Rectangle::new(0.1, 0.2, 0.5, 0.3);
        state.aspect = AspectConstraint::ThreeTwo;
        let before = state.clone();

        let mut s = EditSession::new(state, SessionConfig::default());
        assert!(s.begin_crop());
        assert!(s.rotate_clockwise());
        assert!(s.flip(FlipAxis::Horizontal));
        assert!(s.set_aspect(AspectConstraint::Custom));
        assert!(s.cancel_crop());

        assert_eq!(s.mode(), SessionMode::Viewing);
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn test_commit_crop_applies_draft() {
        let mut s = session();
        assert!(s.begin_crop());
        assert!(s.rotate_clockwise());
        // Committed state is untouched until commit
        assert_eq!(s.state().orientation, Orientation::IDENTITY);
        assert_eq!(s.geometry().0.rotation, Rotation::Clockwise90);

        assert!(s.commit_crop());
        assert_eq!(s.state().orientation.rotation, Rotation::Clockwise90);
        assert!(s.is_cropped());
        assert_eq!(s.mode(), SessionMode::Viewing);
    }

    #[test]
    fn test_crop_ops_outside_crop_mode_are_noops() {
        let mut s = session();
        assert!(!s.commit_crop());
        assert!(!s.cancel_crop());
        assert!(!s.rotate_clockwise());
        assert!(!s.flip(FlipAxis::Vertical));
        assert!(!s.set_aspect(AspectConstraint::Square));
        assert_eq!(s.state(), &EditState::new(MediaRef::photo("photo")));
    }

    #[test]
    fn test_begin_crop_twice_is_noop() {
        let mut s = session();
        assert!(s.begin_crop());
        assert!(!s.begin_crop());
        assert_eq!(s.mode(), SessionMode::Cropping);
    }

    #[test]
    fn test_commit_crop_while_drawing_fails() {
        let mut s = session();
        assert!(s.begin_draw());
        assert!(!s.commit_crop());
        assert_eq!(s.mode(), SessionMode::Drawing);
    }

    #[test]
    fn test_rotate_and_flip_bump_preview_revision() {
        let mut s = session();
        s.begin_crop();
        let start = s.preview_revision();
        s.rotate_clockwise();
        s.flip(FlipAxis::Horizontal);
        assert_eq!(s.preview_revision(), start + 2);
    }

    #[test]
    fn test_set_aspect_single_active() {
        let mut s = session();
        s.begin_crop();
        assert!(s.set_aspect(AspectConstraint::Square));
        assert!(!s.set_aspect(AspectConstraint::SixteenNine));
        assert_eq!(s.geometry().2, AspectConstraint::Square);

        assert!(s.set_aspect(AspectConstraint::Custom));
        assert!(s.set_aspect(AspectConstraint::SixteenNine));
        assert_eq!(s.geometry().2, AspectConstraint::SixteenNine);
    }

    #[test]
    fn test_set_aspect_fits_rectangle() {
        let state = EditState::new(MediaRef::photo("p").with_size(200, 100));
        let mut s = EditSession::new(state, SessionConfig::default());
        s.begin_crop();
        assert!(s.set_aspect(AspectConstraint::Square));

        let (_, rect, _) = s.geometry();
        assert!((rect.width() - 0.5).abs() < 1e-9);
        assert!((rect.height() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_aspect_uses_rotated_size() {
        let state = EditState::new(MediaRef::photo("p").with_size(200, 100));
        let mut s = EditSession::new(state, SessionConfig::default());
        s.begin_crop();
        s.rotate_clockwise();
        assert!(s.set_aspect(AspectConstraint::Square));

        // Rotated frame is 100x200: a square spans the full width, half the height
        let (_, rect, _) = s.geometry();
        assert!((rect.width() - 1.0).abs() < 1e-9);
        assert!((rect.height() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_transposes_draft_aspect() {
        let mut s = session();
        s.begin_crop();
        s.set_aspect(AspectConstraint::ThreeTwo);
        s.rotate_clockwise();
        assert_eq!(s.geometry().2, AspectConstraint::TwoThree);
    }

    #[test]
    fn test_set_crop_rectangle() {
        let mut s = session();
        assert!(!s.set_crop_rectangle(Rectangle::FULL));
        s.begin_crop();
        let rect = Rectangle::new(0.2, 0.2, 0.4, 0.4);
        assert!(s.set_crop_rectangle(rect));
        assert!(!s.set_crop_rectangle(rect));
        s.commit_crop();
        assert_eq!(s.state().rectangle, rect);
        assert!(s.is_cropped());
    }

    #[test]
    fn test_draw_commit_records_strokes() {
        let mut s = session();
        assert!(s.begin_draw());
        draw_line(&mut s, 0.0);
        draw_line(&mut s, 0.5);
        assert_eq!(s.strokes().len(), 2);
        assert!(s.state().strokes.is_empty());

        assert!(s.end_draw(true));
        assert_eq!(s.state().strokes.len(), 2);
        assert!(s.has_drawing());
        assert_eq!(s.mode(), SessionMode::Viewing);
    }

    #[test]
    fn test_draw_cancel_discards_strokes() {
        let mut s = session();
        s.begin_draw();
        draw_line(&mut s, 0.0);
        assert!(s.end_draw(false));
        assert!(s.state().strokes.is_empty());
        assert!(!s.has_drawing());
    }

    #[test]
    fn test_live_preview_waits_for_fourth_sample() {
        let mut s = session();
        assert!(s.begin_draw());

        // The begin point is not buffered: three samples only fill the window.
        assert!(s.begin_stroke(p(0.2, 0.2)));
        for point in [p(0.8, 0.2), p(0.8, 0.8), p(0.2, 0.8)] {
            assert!(s.extend_stroke(point));
        }
        let live = s.active_stroke().unwrap().smoother();
        assert_eq!(live.segment_count(), 0);
        assert_eq!(live.pending().len(), 3);
        assert_eq!(live.last_anchor(), p(0.2, 0.2));

        assert!(s.extend_stroke(p(0.2, 0.4)));
        let live = s.active_stroke().unwrap().smoother();
        assert_eq!(live.segment_count(), 1);
        assert_eq!(live.segments()[0].control1, p(0.8, 0.8));
        assert_eq!(live.segments()[0].control2, p(0.2, 0.8));
        assert_eq!(live.last_anchor(), p(0.2, 0.8).midpoint(p(0.2, 0.4)));

        assert!(s.end_stroke(p(0.2, 0.2)));
        assert!(s.active_stroke().is_none());
        let committed = s.strokes()[0].smoothed();
        assert!(committed.segment_count() > 1);
        assert_eq!(committed.last_anchor(), p(0.2, 0.2));
    }

    #[test]
    fn test_undo_redo_per_gesture() {
        let mut s = session();
        s.begin_draw();
        assert!(!s.can_undo());
        assert!(!s.undo());

        draw_line(&mut s, 0.0);
        draw_line(&mut s, 0.5);
        assert!(s.can_undo());
        assert!(!s.can_redo());

        assert!(s.undo());
        assert_eq!(s.strokes().len(), 1);
        assert!(s.can_redo());

        assert!(s.undo());
        assert!(s.strokes().is_empty());
        assert!(!s.can_undo());
        assert!(!s.undo());

        assert!(s.redo());
        assert_eq!(s.strokes().len(), 1);

        // A new gesture drops the redo tail
        draw_line(&mut s, 0.2);
        assert!(!s.can_redo());
        assert_eq!(s.strokes().len(), 2);

        s.end_draw(true);
        assert_eq!(s.state().strokes.len(), 2);
    }

    #[test]
    fn test_commit_after_undo_keeps_undone_state() {
        let mut s = session();
        s.begin_draw();
        draw_line(&mut s, 0.0);
        draw_line(&mut s, 0.5);
        s.undo();
        s.end_draw(true);
        assert_eq!(s.state().strokes.len(), 1);
    }

    #[test]
    fn test_history_limit() {
        let config = SessionConfig {
            history_limit: Some(2),
            ..SessionConfig::default()
        };
        let mut s = EditSession::new(EditState::new(MediaRef::photo("p")), config);
        s.begin_draw();
        draw_line(&mut s, 0.0);
        draw_line(&mut s, 0.3);
        draw_line(&mut s, 0.6);

        assert!(s.undo());
        assert!(!s.undo());
        assert_eq!(s.strokes().len(), 2);
    }

    #[test]
    fn test_stroke_gesture_requires_begin() {
        let mut s = session();
        assert!(!s.begin_stroke(p(0.0, 0.0)));
        s.begin_draw();
        assert!(!s.extend_stroke(p(0.1, 0.1)));
        assert!(!s.end_stroke(p(0.1, 0.1)));
        assert!(s.begin_stroke(p(0.0, 0.0)));
        assert!(!s.begin_stroke(p(0.5, 0.5)));
        assert!(s.active_stroke().is_some());
        assert!(!s.can_undo());
        assert!(s.cancel_stroke());
        assert!(s.active_stroke().is_none());
        assert!(s.strokes().is_empty());
    }

    #[test]
    fn test_unfinished_stroke_dropped_on_commit() {
        let mut s = session();
        s.begin_draw();
        s.begin_stroke(p(0.0, 0.0));
        s.extend_stroke(p(0.2, 0.2));
        s.end_draw(true);
        assert!(s.state().strokes.is_empty());
    }

    #[test]
    fn test_erase_mode_and_pencil() {
        let mut s = session();
        s.begin_draw();
        assert_eq!(s.tool_mode(), Some(ToolMode::Draw));
        assert!(s.set_tool_mode(ToolMode::Erase));
        assert!(!s.set_tool_mode(ToolMode::Erase));
        draw_line(&mut s, 0.0);
        assert_eq!(s.strokes()[0].mode(), ToolMode::Erase);

        let style = PencilStyle {
            color: StrokeColor::rgb(10, 20, 30),
            thickness: 0.03,
        };
        assert!(s.set_pencil(style));
        assert_eq!(s.tool_mode(), Some(ToolMode::Draw));
        draw_line(&mut s, 0.4);
        assert_eq!(s.strokes()[1].color(), StrokeColor::rgb(10, 20, 30));
        assert_eq!(s.strokes()[1].thickness(), 0.03);
    }

    #[test]
    fn test_pencil_read_on_begin_written_on_commit() {
        let stored = PencilStyle {
            color: StrokeColor::rgb(1, 2, 3),
            thickness: 0.02,
        };
        let store = SharedStore(Rc::new(RefCell::new(Some(stored))));
        let mut s = session().with_pencil_store(Box::new(store.clone()));

        s.begin_draw();
        assert_eq!(s.pencil(), Some(stored));

        let changed = PencilStyle {
            thickness: 0.05,
            ..stored
        };
        s.set_pencil(changed);
        s.end_draw(false);
        assert_eq!(*store.0.borrow(), Some(stored));

        s.begin_draw();
        s.set_pencil(changed);
        s.end_draw(true);
        assert_eq!(*store.0.borrow(), Some(changed));
    }

    #[test]
    fn test_default_pencil_when_store_empty() {
        let mut s = session();
        s.begin_draw();
        assert_eq!(s.pencil(), Some(SessionConfig::default().default_pencil));
    }

    #[test]
    fn test_entering_one_tool_discards_other() {
        let mut s = session();
        s.begin_crop();
        s.rotate_clockwise();
        assert!(s.begin_draw());
        assert_eq!(s.mode(), SessionMode::Drawing);
        assert_eq!(s.geometry().0, Orientation::IDENTITY);

        draw_line(&mut s, 0.0);
        assert!(s.begin_crop());
        assert_eq!(s.mode(), SessionMode::Cropping);
        assert!(s.strokes().is_empty());
        assert!(!s.end_draw(true));
    }

    #[test]
    fn test_export_blocks_new_gestures() {
        let mut s = session();
        assert!(!s.finish_export());
        assert!(s.begin_export());
        assert!(!s.begin_export());
        assert!(!s.begin_crop());
        assert!(!s.begin_draw());
        assert!(s.finish_export());
        assert!(s.begin_crop());
        assert!(!s.begin_export());
    }

    #[test]
    fn test_ttl_and_mute() {
        let mut s = session();
        assert!(s.set_ttl(Some(15)));
        assert!(!s.set_ttl(Some(15)));
        assert_eq!(s.state().ttl, Some(15));
        assert!(s.set_ttl(Some(0)));
        assert_eq!(s.state().ttl, None);

        assert!(!s.set_muted(true));

        let mut video = EditSession::new(
            EditState::new(MediaRef::video("clip")),
            SessionConfig::default(),
        );
        assert!(video.set_muted(true));
        assert!(video.state().muted);
        assert!(!video.set_muted(true));
        assert!(video.toggle_mute());
        assert!(!video.state().muted);
        assert!(!s.toggle_mute());
    }

    #[test]
    fn test_into_state() {
        let mut s = session();
        s.begin_crop();
        s.flip(FlipAxis::Horizontal);
        s.commit_crop();
        let state = s.into_state();
        assert_eq!(state.orientation.flip, Flip::Horizontal);
    }
}
