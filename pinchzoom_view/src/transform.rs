// Copyright 2025 the Pinchzoom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Size, Vec2};
use smallvec::SmallVec;

/// The pan/zoom transform applied to the image.
///
/// `offset` is expressed in unscaled image units relative to the centred
/// position, so the on-screen displacement is `offset * scale`. `scale` is a
/// uniform zoom factor applied about the viewport centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    /// Translation in unscaled image units.
    pub offset: Vec2,
    /// Uniform zoom factor.
    pub scale: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    /// No translation, unit scale.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform from an offset and a scale.
    #[must_use]
    pub const fn new(offset: Vec2, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Reads one field.
    #[must_use]
    pub fn get(&self, field: TransformField) -> f64 {
        match field {
            TransformField::OffsetX => self.offset.x,
            TransformField::OffsetY => self.offset.y,
            TransformField::Scale => self.scale,
        }
    }

    /// Writes one field.
    pub fn set(&mut self, field: TransformField, value: f64) {
        match field {
            TransformField::OffsetX => self.offset.x = value,
            TransformField::OffsetY => self.offset.y = value,
            TransformField::Scale => self.scale = value,
        }
    }

    /// Maps image coordinates into viewport coordinates.
    ///
    /// The image is laid out centred in the viewport, then scaled about the
    /// viewport centre, with `offset` applied in scaled space.
    #[must_use]
    pub fn to_affine(&self, viewport: Size, content: Size) -> Affine {
        let viewport_center = viewport.to_vec2() / 2.0;
        let content_center = content.to_vec2() / 2.0;
        Affine::translate(viewport_center)
            * Affine::scale(self.scale)
            * Affine::translate(self.offset - content_center)
    }
}

/// One independently animatable component of a [`ZoomTransform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformField {
    /// Horizontal offset.
    OffsetX,
    /// Vertical offset.
    OffsetY,
    /// Zoom factor.
    Scale,
}

impl TransformField {
    /// All fields, in write order.
    pub const ALL: [Self; 3] = [Self::Scale, Self::OffsetX, Self::OffsetY];
}

/// A write from the canonical transform toward the rendering side.
///
/// Live gesture updates use [`FieldUpdate::Set`]; every correction outside of
/// a live gesture is a [`FieldUpdate::Animate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldUpdate {
    /// Overwrite the rendered value immediately.
    Set {
        /// Field to write.
        field: TransformField,
        /// New value.
        value: f64,
    },
    /// Tween the rendered value to `to` over `duration_ms`.
    Animate {
        /// Field to animate.
        field: TransformField,
        /// Target value.
        to: f64,
        /// Tween duration in milliseconds.
        duration_ms: u32,
    },
}

impl FieldUpdate {
    /// The field this update targets.
    #[must_use]
    pub fn field(&self) -> TransformField {
        match *self {
            Self::Set { field, .. } | Self::Animate { field, .. } => field,
        }
    }

    /// The value the field ends up at.
    #[must_use]
    pub fn target(&self) -> f64 {
        match *self {
            Self::Set { value, .. } => value,
            Self::Animate { to, .. } => to,
        }
    }
}

/// Field writes produced by a single operation.
pub type Updates = SmallVec<[FieldUpdate; 4]>;

pub(crate) fn animate_all(transform: &ZoomTransform, duration_ms: u32) -> Updates {
    TransformField::ALL
        .into_iter()
        .map(|field| FieldUpdate::Animate {
            field,
            to: transform.get(field),
            duration_ms,
        })
        .collect()
}

pub(crate) fn set_all(transform: &ZoomTransform) -> Updates {
    TransformField::ALL
        .into_iter()
        .map(|field| FieldUpdate::Set {
            field,
            value: transform.get(field),
        })
        .collect()
}
