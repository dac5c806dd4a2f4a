//! Non-destructive preview/apply/cancel editing.
//!
//! Selecting a transform snapshots the committed image as a baseline. Every
//! parameter change recomputes the preview from a fresh copy of that
//! baseline, so previews never compound. The committed image changes only
//! in [`EditSession::apply`] (or when a new image is loaded); cancelling just
//! drops the preview.

use std::path::Path;

use crate::error::{BmpEditError, StateError};
use crate::file::{load_image_with_limits, save_image};
use crate::image::Image;
use crate::limits::Limits;
use crate::transform::TransformKind;

#[derive(Debug, Default)]
pub struct EditSession {
    committed: Option<Image>,
    state: SessionState,
    limits: Limits,
}

#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Idle,
    Previewing(Preview),
}

#[derive(Debug)]
struct Preview {
    kind: TransformKind,
    param: i32,
    /// Copy of the committed image taken when this preview started.
    baseline: Image,
    result: Image,
}

impl Preview {
    fn start(kind: TransformKind, baseline: Image) -> Result<Self, BmpEditError> {
        let param = kind.default_param();
        let result = baseline.clone().transformed(&kind, param)?;
        Ok(Self {
            kind,
            param,
            baseline,
            result,
        })
    }
}

impl EditSession {
    /// An empty session with no limits on loaded images.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `limits` to every image loaded through [`open`](Self::open).
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// A session whose committed image is `image`.
    pub fn from_image(image: Image) -> Self {
        Self {
            committed: Some(image),
            ..Self::default()
        }
    }

    /// Load `path` and make it the committed image, discarding any preview.
    ///
    /// On failure the session is left exactly as it was.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<&Image, BmpEditError> {
        let image = load_image_with_limits(path, &self.limits)?;
        Ok(self.replace_image(image))
    }

    /// Make `image` the committed image, discarding any preview.
    pub fn replace_image(&mut self, image: Image) -> &Image {
        self.discard_preview();
        self.committed.insert(image)
    }

    /// Drop the committed image and any preview.
    pub fn close(&mut self) {
        self.discard_preview();
        self.committed = None;
    }

    /// Write the committed image to `path`. An uncommitted preview is not saved.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BmpEditError> {
        let image = self.committed.as_ref().ok_or(StateError::NoImageLoaded)?;
        save_image(path, image)
    }

    /// Start previewing `kind` at its default parameter.
    ///
    /// A preview already in progress, of this or another kind, is discarded
    /// first; its changes are never stacked.
    pub fn select_transform(&mut self, kind: TransformKind) -> Result<&Image, BmpEditError> {
        let committed = self.committed.as_ref().ok_or(StateError::NoImageLoaded)?;
        let preview = Preview::start(kind, committed.clone())?;
        self.discard_preview();
        log::debug!("previewing {kind:?} at {}", preview.param);
        self.state = SessionState::Previewing(preview);
        self.preview()
            .ok_or_else(|| StateError::NoActiveTransform.into())
    }

    /// Recompute the preview with a new parameter, starting from the baseline.
    ///
    /// Out-of-range values are rejected and the current preview is kept.
    pub fn reparameterize(&mut self, value: i32) -> Result<&Image, BmpEditError> {
        let SessionState::Previewing(preview) = &mut self.state else {
            return Err(StateError::NoActiveTransform.into());
        };
        let param = preview.kind.validate(value)?;
        preview.result = preview.baseline.clone().transformed(&preview.kind, param)?;
        preview.param = param;
        log::debug!("previewing {:?} at {param}", preview.kind);
        Ok(&preview.result)
    }

    /// Commit the current preview and return to idle.
    pub fn apply(&mut self) -> Result<&Image, BmpEditError> {
        match std::mem::take(&mut self.state) {
            SessionState::Previewing(preview) => {
                log::debug!("applied {:?} at {}", preview.kind, preview.param);
                Ok(&*self.committed.insert(preview.result))
            }
            SessionState::Idle => Err(StateError::NoActiveTransform.into()),
        }
    }

    /// Discard the current preview. The committed image is untouched.
    pub fn cancel(&mut self) -> Result<(), BmpEditError> {
        if !self.is_previewing() {
            return Err(StateError::NoActiveTransform.into());
        }
        self.discard_preview();
        Ok(())
    }

    /// What a viewer should display: the preview if one is active, otherwise
    /// the committed image.
    pub fn current_preview_or_committed(&self) -> Option<&Image> {
        self.preview().or(self.committed.as_ref())
    }

    pub fn committed(&self) -> Option<&Image> {
        self.committed.as_ref()
    }

    pub fn preview(&self) -> Option<&Image> {
        match &self.state {
            SessionState::Previewing(preview) => Some(&preview.result),
            SessionState::Idle => None,
        }
    }

    /// The transform being previewed and its current parameter.
    pub fn active_transform(&self) -> Option<(TransformKind, i32)> {
        match &self.state {
            SessionState::Previewing(preview) => Some((preview.kind, preview.param)),
            SessionState::Idle => None,
        }
    }

    pub fn is_previewing(&self) -> bool {
        matches!(self.state, SessionState::Previewing(_))
    }

    fn discard_preview(&mut self) {
        if let SessionState::Previewing(preview) = std::mem::take(&mut self.state) {
            log::debug!("discarded {:?} preview", preview.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgumentError;
    use crate::pixel::{Pixel, PixelBuffer};

    fn session_with(pixels: PixelBuffer) -> EditSession {
        EditSession::from_image(Image::new(pixels).unwrap())
    }

    fn ramp() -> PixelBuffer {
        let pixels = (0..16u8).map(|i| Pixel::new(i * 16, 255 - i * 16, i * 7)).collect();
        PixelBuffer::from_vec(pixels, 4, 4)
    }

    #[test]
    fn select_without_image_fails_and_stays_idle() {
        let mut s = EditSession::new();
        assert!(matches!(
            s.select_transform(TransformKind::Negative),
            Err(BmpEditError::State(StateError::NoImageLoaded))
        ));
        assert!(!s.is_previewing());
        assert!(s.current_preview_or_committed().is_none());
    }

    #[test]
    fn apply_and_cancel_need_an_active_transform() {
        let mut s = session_with(ramp());
        assert!(matches!(
            s.apply(),
            Err(BmpEditError::State(StateError::NoActiveTransform))
        ));
        assert!(matches!(
            s.cancel(),
            Err(BmpEditError::State(StateError::NoActiveTransform))
        ));
        assert!(matches!(
            s.reparameterize(3),
            Err(BmpEditError::State(StateError::NoActiveTransform))
        ));
    }

    #[test]
    fn preview_does_not_touch_committed() {
        let mut s = session_with(ramp());
        let before = s.committed().cloned();
        s.select_transform(TransformKind::Threshold).unwrap();
        s.reparameterize(10).unwrap();
        assert_eq!(s.committed().cloned(), before);
        assert_ne!(s.preview().cloned(), before);
        assert_eq!(s.current_preview_or_committed(), s.preview());
    }

    #[test]
    fn reparameterizing_does_not_compound() {
        let mut s = session_with(ramp());
        let initial = s.select_transform(TransformKind::Value).unwrap().clone();
        s.reparameterize(40).unwrap();
        s.reparameterize(-30).unwrap();
        let back = s.reparameterize(TransformKind::Value.default_param()).unwrap();
        assert_eq!(*back, initial);
    }

    #[test]
    fn out_of_range_parameter_keeps_preview() {
        let mut s = session_with(ramp());
        s.select_transform(TransformKind::Posterize).unwrap();
        let kept = s.reparameterize(3).unwrap().clone();
        assert!(matches!(
            s.reparameterize(21),
            Err(BmpEditError::Argument(ArgumentError::ParameterOutOfRange { .. }))
        ));
        assert_eq!(s.preview(), Some(&kept));
        assert_eq!(s.active_transform(), Some((TransformKind::Posterize, 3)));
    }

    #[test]
    fn switching_transform_discards_the_first() {
        let mut s = session_with(ramp());
        s.select_transform(TransformKind::Negative).unwrap();
        s.select_transform(TransformKind::Greyscale).unwrap();
        s.apply().unwrap();

        let expected = session_with(ramp())
            .select_transform(TransformKind::Greyscale)
            .unwrap()
            .clone();
        assert_eq!(s.committed(), Some(&expected));
    }

    #[test]
    fn apply_commits_the_last_preview_once() {
        let mut s = session_with(ramp());
        s.select_transform(TransformKind::Hue).unwrap();
        let last = s.reparameterize(90).unwrap().clone();
        let committed = s.apply().unwrap().clone();
        assert_eq!(committed, last);
        assert_eq!(s.active_transform(), None);
        assert!(s.cancel().is_err());
        assert_eq!(s.committed(), Some(&last));
    }

    #[test]
    fn cancel_restores_nothing_because_nothing_changed() {
        let mut s = session_with(ramp());
        let before = s.committed().cloned();
        s.select_transform(TransformKind::Sharpen).unwrap();
        s.reparameterize(5).unwrap();
        s.cancel().unwrap();
        assert_eq!(s.committed().cloned(), before);
        assert_eq!(s.current_preview_or_committed().cloned(), before);
    }

    #[test]
    fn replacing_the_image_drops_the_preview() {
        let mut s = session_with(ramp());
        s.select_transform(TransformKind::Negative).unwrap();
        let fresh = Image::new(PixelBuffer::new(2, 2)).unwrap();
        s.replace_image(fresh.clone());
        assert!(!s.is_previewing());
        assert_eq!(s.committed(), Some(&fresh));

        s.close();
        assert!(s.committed().is_none());
    }
}
