use crate::foundation::error::{BeamlineError, BeamlineResult};

/// An RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red component.
    pub r: f64,
    /// Green component.
    pub g: f64,
    /// Blue component.
    pub b: f64,
}

impl Color {
    /// Black (beam off).
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Build a color from RGB components.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build a color from HSV components (`h` normalized to `[0, 1)`).
    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        let c = v * s;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = if h < 1.0 / 6.0 {
            (c, x, 0.0)
        } else if h < 2.0 / 6.0 {
            (x, c, 0.0)
        } else if h < 3.0 / 6.0 {
            (0.0, c, x)
        } else if h < 4.0 / 6.0 {
            (0.0, x, c)
        } else if h < 5.0 / 6.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Self {
            r: r + m,
            g: g + m,
            b: b + m,
        }
    }

    /// HSV components of this color (`h` normalized to `[0, 1)`).
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let c_max = self.r.max(self.g).max(self.b);
        let c_min = self.r.min(self.g).min(self.b);
        let delta = c_max - c_min;

        let mut h = if delta == 0.0 {
            0.0
        } else if c_max == self.r {
            60.0 * (((self.g - self.b) / delta).rem_euclid(6.0))
        } else if c_max == self.g {
            60.0 * ((self.b - self.r) / delta + 2.0)
        } else {
            60.0 * ((self.r - self.g) / delta + 4.0)
        };
        h /= 360.0;

        let s = if c_max == 0.0 { 0.0 } else { delta / c_max };
        (h, s, c_max)
    }

    /// Component-wise linear interpolation in RGB space.
    pub fn interpolate_rgb(self, other: Color, ratio: f64) -> Color {
        Color {
            r: self.r + (other.r - self.r) * ratio,
            g: self.g + (other.g - self.g) * ratio,
            b: self.b + (other.b - self.b) * ratio,
        }
    }

    /// Component-wise linear interpolation in HSV space.
    pub fn interpolate_hsv(self, other: Color, ratio: f64) -> Color {
        let (h0, s0, v0) = self.to_hsv();
        let (h1, s1, v1) = other.to_hsv();
        Color::hsv(
            h0 + (h1 - h0) * ratio,
            s0 + (s1 - s0) * ratio,
            v0 + (v1 - v0) * ratio,
        )
    }
}

/// Color space used when interpolating between gradient waypoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InterpMode {
    /// Interpolate each RGB channel linearly.
    Rgb,
    /// Interpolate hue, saturation and value linearly.
    #[default]
    Hsv,
}

/// Ordered color waypoints over the normalized arc parameter `[0, 1]`.
///
/// A gradient always carries a waypoint at 0 and one at 1; constructing it
/// from a single color duplicates that color at both ends. `get_color`
/// interpolates between the bracketing waypoints in the mode chosen at
/// construction and clamps outside the waypoint range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorGradient {
    waypoints: Vec<(f64, Color)>,
    mode: InterpMode,
}

impl ColorGradient {
    /// A single-color gradient (the color holds over the whole path).
    pub fn solid(color: Color) -> Self {
        Self {
            waypoints: vec![(0.0, color), (1.0, color)],
            mode: InterpMode::default(),
        }
    }

    /// A two-color gradient from arc parameter 0 to 1.
    pub fn linear(start: Color, end: Color, mode: InterpMode) -> Self {
        Self {
            waypoints: vec![(0.0, start), (1.0, end)],
            mode,
        }
    }

    /// Replace the interpolation mode, returning the gradient for chaining.
    pub fn with_mode(mut self, mode: InterpMode) -> Self {
        self.mode = mode;
        self
    }

    /// Insert a waypoint, keeping positions sorted.
    ///
    /// Positions outside `[0, 1]` are a configuration error.
    pub fn add_color(&mut self, position: f64, color: Color) -> BeamlineResult<()> {
        if !(0.0..=1.0).contains(&position) {
            return Err(BeamlineError::validation(format!(
                "gradient waypoint position {position} outside [0, 1]"
            )));
        }
        let idx = self
            .waypoints
            .iter()
            .position(|(p, _)| *p > position)
            .unwrap_or(self.waypoints.len());
        self.waypoints.insert(idx, (position, color));
        Ok(())
    }

    /// Resolve the color at arc parameter `s`.
    pub fn get_color(&self, s: f64) -> Color {
        let (first_pos, first) = self.waypoints[0];
        if s <= first_pos {
            return first;
        }
        for pair in self.waypoints.windows(2) {
            let (p0, c0) = pair[0];
            let (p1, c1) = pair[1];
            if s <= p1 {
                if p1 == p0 {
                    return c1;
                }
                let ratio = (s - p0) / (p1 - p0);
                return match self.mode {
                    InterpMode::Rgb => c0.interpolate_rgb(c1, ratio),
                    InterpMode::Hsv => c0.interpolate_hsv(c1, ratio),
                };
            }
        }
        self.waypoints[self.waypoints.len() - 1].1
    }

    pub(crate) fn waypoints(&self) -> &[(f64, Color)] {
        &self.waypoints
    }

    pub(crate) fn mode(&self) -> InterpMode {
        self.mode
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/gradient.rs"]
mod tests;
