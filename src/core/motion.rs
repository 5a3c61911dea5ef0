use super::constants::*;
use super::layout::Avatar;
use glam::Vec2;

/// Move `position` toward `target` by the easing fraction for `dt_frames`
/// sixtieths of a second, snapping once both axes are within a pixel.
#[inline]
pub fn ease_toward(position: Vec2, target: Vec2, dt_frames: f32) -> Vec2 {
    let d = target - position;
    if d.x.abs() < EASE_SNAP_PX && d.y.abs() < EASE_SNAP_PX {
        return target;
    }
    position + d * ease_fraction(dt_frames)
}

#[inline]
pub fn ease_fraction(dt_frames: f32) -> f32 {
    let dt = dt_frames.clamp(0.0, EASE_MAX_FRAMES_PER_STEP);
    1.0 - (1.0 - EASE_FRACTION).powf(dt)
}

/// One easing frame over every avatar with a target.
/// Returns true while anything moved; false means the loop can stop.
pub fn step(avatars: &mut [Avatar], dt_frames: f32) -> bool {
    let mut moving = false;
    for a in avatars.iter_mut() {
        let Some(target) = a.target else { continue };
        if a.position == target {
            continue;
        }
        a.position = ease_toward(a.position, target, dt_frames);
        moving = true;
    }
    moving
}

/// Raw scroll input feeding the depth inertia.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollInput {
    /// `WheelEvent.deltaY`
    Wheel { delta_y: f32 },
    /// Previous touch y minus current touch y
    Touch { delta_y: f32 },
}

/// Decaying-velocity scroll through the cyclic depth field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DepthScroll {
    pub velocity: f32,
    pub offset: f32,
}

impl DepthScroll {
    pub fn impulse(&mut self, input: ScrollInput) {
        match input {
            ScrollInput::Wheel { delta_y } => self.velocity += delta_y * WHEEL_VELOCITY_SCALE,
            ScrollInput::Touch { delta_y } => self.velocity -= delta_y * TOUCH_VELOCITY_SCALE,
        }
    }

    /// Advance one frame. Returns false (and zeroes velocity) once it has settled.
    pub fn step(&mut self) -> bool {
        let v = self.velocity;
        if v.abs() < DEPTH_VELOCITY_EPSILON {
            self.velocity = 0.0;
            return false;
        }
        self.velocity *= DEPTH_VELOCITY_DECAY;
        self.offset += v;
        true
    }

    pub fn reset(&mut self) {
        self.velocity = 0.0;
        self.offset = 0.0;
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.velocity == 0.0
    }
}

/// Smoothed pointer/tilt parallax, both axes in [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Parallax {
    pub target: Vec2,
    pub current: Vec2,
}

impl Parallax {
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// Returns false once current has caught up with target.
    pub fn step(&mut self, dt_frames: f32) -> bool {
        let d = self.target - self.current;
        if d.x.abs() < PARALLAX_SETTLE && d.y.abs() < PARALLAX_SETTLE {
            self.current = self.target;
            return false;
        }
        let dt = dt_frames.clamp(0.0, EASE_MAX_FRAMES_PER_STEP);
        let alpha = 1.0 - (1.0 - PARALLAX_LERP).powf(dt);
        self.current += d * alpha;
        true
    }
}

/// Pointer position in CSS pixels → parallax target in [-1, 1] on both axes.
#[inline]
pub fn pointer_to_parallax(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new((x / width - 0.5) * 2.0, (y / height - 0.5) * 2.0)
}

/// Device tilt (gamma: left/right, beta: front/back, degrees) → parallax target.
/// The phone held at 45° toward the viewer is neutral.
#[inline]
pub fn tilt_to_parallax(gamma: f32, beta: f32) -> Vec2 {
    Vec2::new(
        (gamma / TILT_RANGE_DEG).clamp(-1.0, 1.0),
        ((beta - TILT_RANGE_DEG) / TILT_RANGE_DEG).clamp(-1.0, 1.0),
    )
}
