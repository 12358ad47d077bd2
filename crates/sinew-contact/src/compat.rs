//! Legacy accessor names kept for callers written against the body-based API.
//!
//! Every method forwards to its current counterpart on [`ContactGeometry`].
//! `set_location` and `set_orientation` share their current names, so the
//! inherent methods win under method-call syntax.

use crate::{ContactGeometry, Result};
use sinew_frame::PhysicalFrame;
use sinew_math::{Transform, Vec3};
use std::rc::Rc;

pub trait LegacyContactGeometryApi {
    #[deprecated(note = "use `location`")]
    fn get_location(&self) -> Vec3;

    #[deprecated(note = "use `set_location`")]
    fn set_location(&mut self, location: Vec3);

    #[deprecated(note = "use `orientation`")]
    fn get_orientation(&self) -> Vec3;

    #[deprecated(note = "use `set_orientation`")]
    fn set_orientation(&mut self, orientation: Vec3);

    #[deprecated(note = "use `frame`")]
    fn get_body(&self) -> Result<Rc<PhysicalFrame>>;

    #[deprecated(note = "use `set_frame`")]
    fn set_body(&mut self, frame: &Rc<PhysicalFrame>);

    #[deprecated(note = "use `frame_name`")]
    fn get_body_name(&self) -> &str;

    #[deprecated(note = "use `set_frame_name`")]
    fn set_body_name(&mut self, name: &str);

    #[deprecated(note = "use `find_transform_in_base_frame`")]
    fn get_transform(&self) -> Result<Transform>;
}

impl LegacyContactGeometryApi for ContactGeometry {
    #[inline]
    fn get_location(&self) -> Vec3 {
        self.location()
    }

    #[inline]
    fn set_location(&mut self, location: Vec3) {
        self.set_location(location)
    }

    #[inline]
    fn get_orientation(&self) -> Vec3 {
        self.orientation()
    }

    #[inline]
    fn set_orientation(&mut self, orientation: Vec3) {
        self.set_orientation(orientation)
    }

    #[inline]
    fn get_body(&self) -> Result<Rc<PhysicalFrame>> {
        self.frame()
    }

    #[inline]
    fn set_body(&mut self, frame: &Rc<PhysicalFrame>) {
        self.set_frame(frame)
    }

    #[inline]
    fn get_body_name(&self) -> &str {
        self.frame_name()
    }

    #[inline]
    fn set_body_name(&mut self, name: &str) {
        self.set_frame_name(name)
    }

    #[inline]
    fn get_transform(&self) -> Result<Transform> {
        self.find_transform_in_base_frame()
    }
}
