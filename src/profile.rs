//! Profile context
//!
//! A profile owns one or more layout elements, each pairing a capture target
//! with its clipping region. Target selection always goes through here so the
//! clipping region is renormalized on every switch.

use serde::{Deserialize, Serialize};

use crate::config::layout::MAX_LAYOUT_ELEMENTS;
use crate::error::{ProfileError, TargetError};
use crate::layout::{renormalize, ClipRect, ClippingRegion};
use crate::platform::{to_screen_space, DesktopPoint, WindowHandle, WindowSystem};
use crate::target::CaptureTarget;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutElement {
    pub target: CaptureTarget,
    pub clipping: ClippingRegion,
}

impl LayoutElement {
    /// Full-desktop element with a fit clipping region.
    pub fn full_desktop<W: WindowSystem + ?Sized>(ws: &W) -> Self {
        let target = CaptureTarget::full_desktop(ws);
        let clipping = ClippingRegion::fitted(&target);
        Self { target, clipping }
    }

    fn retarget(&mut self, new_target: CaptureTarget) {
        self.clipping = renormalize(&self.target, &new_target, &self.clipping);
        self.target = new_target;
    }
}

/// A profile always holds between one and [`MAX_LAYOUT_ELEMENTS`] elements
/// and a cursor pointing at one of them. Deserialized profiles are repaired
/// to hold that too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredProfile")]
pub struct Profile {
    pub name: String,
    elements: Vec<LayoutElement>,
    current: usize,
}

/// On-disk shape of a profile, before repair.
#[derive(Deserialize)]
struct StoredProfile {
    name: String,
    #[serde(default)]
    elements: Vec<LayoutElement>,
    #[serde(default)]
    current: usize,
}

impl From<StoredProfile> for Profile {
    fn from(stored: StoredProfile) -> Self {
        let mut profile = Self {
            name: stored.name,
            elements: stored.elements,
            current: stored.current,
        };
        profile.sanitize();
        profile
    }
}

impl Profile {
    pub fn new<W: WindowSystem + ?Sized>(name: impl Into<String>, ws: &W) -> Self {
        Self {
            name: name.into(),
            elements: vec![LayoutElement::full_desktop(ws)],
            current: 0,
        }
    }

    pub fn elements(&self) -> &[LayoutElement] {
        &self.elements
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_element(&self) -> &LayoutElement {
        &self.elements[self.current]
    }

    pub fn current_target(&self) -> &CaptureTarget {
        &self.current_element().target
    }

    pub fn current_clipping(&self) -> &ClippingRegion {
        &self.current_element().clipping
    }

    /// Rectangle captured from the current target.
    pub fn current_bounds(&self) -> ClipRect {
        let element = self.current_element();
        element.clipping.bounds(&element.target)
    }

    fn current_mut(&mut self) -> &mut LayoutElement {
        &mut self.elements[self.current]
    }

    /// Target a specific window. A dead handle leaves the element untouched.
    pub fn select_window<W: WindowSystem + ?Sized>(
        &mut self,
        ws: &W,
        handle: WindowHandle,
    ) -> Result<(), TargetError> {
        let mut target = self.current_target().clone();
        target.set_to_window(ws, handle)?;
        self.current_mut().retarget(target);
        Ok(())
    }

    pub fn select_desktop_list_view<W: WindowSystem + ?Sized>(&mut self, ws: &W) {
        let mut target = self.current_target().clone();
        target.set_to_desktop_list_view(ws);
        self.current_mut().retarget(target);
    }

    pub fn select_full_desktop<W: WindowSystem + ?Sized>(&mut self, ws: &W) {
        let mut target = self.current_target().clone();
        target.set_to_full_desktop(ws);
        self.current_mut().retarget(target);
    }

    /// Target whatever window lies under a virtual-desktop point, as a
    /// window picker does on release.
    pub fn select_window_at<W: WindowSystem + ?Sized>(
        &mut self,
        ws: &W,
        point: DesktopPoint,
    ) -> Result<WindowHandle, TargetError> {
        let screen = to_screen_space(ws, point);
        let handle = ws
            .window_from_point(screen)
            .ok_or(TargetError::NoWindowAtPoint {
                x: screen.x,
                y: screen.y,
            })?;
        self.select_window(ws, handle)?;
        Ok(handle)
    }

    /// Re-read the current target's geometry and renormalize if it changed.
    ///
    /// This is the retry path for targets that had no geometry when selected.
    pub fn refresh_current<W: WindowSystem + ?Sized>(&mut self, ws: &W) -> bool {
        let mut target = self.current_target().clone();
        if !target.refresh_geometry(ws) {
            return false;
        }
        self.current_mut().retarget(target);
        true
    }

    pub fn set_fit(&mut self, enabled: bool) {
        let element = self.current_mut();
        element.clipping.set_fit(enabled, &element.target);
    }

    pub fn set_manual_clipping(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let element = self.current_mut();
        element
            .clipping
            .set_manual(x, y, width, height, &element.target);
    }

    /// Append a full-desktop element and make it current.
    pub fn add_element<W: WindowSystem + ?Sized>(&mut self, ws: &W) -> Result<usize, ProfileError> {
        if self.elements.len() >= MAX_LAYOUT_ELEMENTS {
            return Err(ProfileError::TooManyElements(MAX_LAYOUT_ELEMENTS));
        }
        self.elements.push(LayoutElement::full_desktop(ws));
        self.current = self.elements.len() - 1;
        Ok(self.current)
    }

    pub fn remove_current_element(&mut self) -> Result<LayoutElement, ProfileError> {
        if self.elements.len() <= 1 {
            return Err(ProfileError::LastElement);
        }
        let removed = self.elements.remove(self.current);
        self.current = self.current.min(self.elements.len() - 1);
        Ok(removed)
    }

    pub fn select_element(&mut self, index: usize) -> Result<(), ProfileError> {
        if index >= self.elements.len() {
            return Err(ProfileError::ElementOutOfRange {
                index,
                count: self.elements.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Replace every element with a single full-desktop element.
    pub fn reset<W: WindowSystem + ?Sized>(&mut self, ws: &W) {
        self.elements = vec![LayoutElement::full_desktop(ws)];
        self.current = 0;
    }

    // Hand-edited files can hold any of these: no elements, too many, a
    // cursor past the end, manual regions outside their target.
    fn sanitize(&mut self) {
        if self.elements.is_empty() {
            self.elements.push(LayoutElement::default());
        }
        self.elements.truncate(MAX_LAYOUT_ELEMENTS);
        if self.current >= self.elements.len() {
            self.current = 0;
        }
        for element in self.elements.iter_mut().filter(|e| !e.clipping.fit()) {
            element.clipping.clamp_to(&element.target);
        }
    }
}
