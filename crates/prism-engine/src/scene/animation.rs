/// Angle accumulator advanced once per drawn frame.
///
/// The angle is never wrapped; `sin`/`cos` take care of periodicity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Animation {
    angle: f32,
    step: f32,
}

impl Animation {
    pub const fn new(step: f32) -> Self {
        Self { angle: 0.0, step }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Adds one step and returns the new angle.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.angle += self.step;
        self.angle
    }
}
