//! Zoom solvers
//!
//! The free-roam rig zooms in discrete steps, the follow rig continuously.
//! Both keep their target distance inside `[min, max]`.

/// Sign of a scroll value: -1, 0 or 1
fn scroll_direction(scroll: f32) -> f32 {
    if scroll > 0.0 {
        1.0
    } else if scroll < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// One fixed step per scroll event
#[derive(Debug, Clone, PartialEq)]
pub struct StepZoom {
    target: f32,
    step: f32,
    min: f32,
    max: f32,
}

impl StepZoom {
    pub fn new(initial: f32, step: f32, min: f32, max: f32) -> Self {
        Self {
            target: initial.clamp(min, max),
            step,
            min,
            max,
        }
    }

    /// Target distance
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Where the target sits inside the zoom range, 0 at `min` and 1 at `max`
    pub fn normalized(&self) -> f32 {
        vantage_core::inverse_lerp(self.min, self.max, self.target)
    }

    /// Step once in the direction of `scroll`; returns whether the target moved
    pub fn apply_scroll(&mut self, scroll: f32) -> bool {
        let direction = scroll_direction(scroll);
        if direction == 0.0 {
            return false;
        }

        let previous = self.target;
        self.target = (self.target + direction * self.step).clamp(self.min, self.max);
        self.target != previous
    }
}

/// Zoom at a constant speed while scroll input is present
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousZoom {
    desired: f32,
    speed: f32,
    min: f32,
    max: f32,
}

impl ContinuousZoom {
    pub fn new(initial: f32, speed: f32, min: f32, max: f32) -> Self {
        Self {
            desired: initial.clamp(min, max),
            speed,
            min,
            max,
        }
    }

    /// Distance the camera would sit at without obstructions
    pub fn desired(&self) -> f32 {
        self.desired
    }

    /// Clamp a distance into the zoom range
    pub fn clamp(&self, distance: f32) -> f32 {
        distance.clamp(self.min, self.max)
    }

    /// Advance the desired distance; returns the change actually applied
    pub fn apply_scroll(&mut self, scroll: f32, dt: f32) -> f32 {
        let direction = scroll_direction(scroll);
        if direction == 0.0 {
            return 0.0;
        }

        let previous = self.desired;
        self.desired = self.clamp(self.desired + direction * self.speed * dt);
        self.desired - previous
    }
}
