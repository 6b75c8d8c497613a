/// Size of a rectangular area on the screen, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    /// Creates a new size. Negative values are clamped to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Width of the area.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Half of the width of the area.
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    /// Height of the area.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Half of the height of the area.
    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    /// Returns true if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}
