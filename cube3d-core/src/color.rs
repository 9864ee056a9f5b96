/// Flat colors used to paint puzzle faces

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#ff8800`.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const WHITE: Rgb = Rgb::new(0xf5, 0xf5, 0xf5);
pub const YELLOW: Rgb = Rgb::new(0xff, 0xd5, 0x00);
pub const ORANGE: Rgb = Rgb::new(0xff, 0x58, 0x00);
pub const RED: Rgb = Rgb::new(0xc4, 0x1e, 0x3a);
pub const BLUE: Rgb = Rgb::new(0x00, 0x51, 0xba);
pub const GREEN: Rgb = Rgb::new(0x00, 0x9e, 0x60);
/// Plastic visible between stickers and on interior faces.
pub const BODY: Rgb = Rgb::new(0x1a, 0x1a, 0x1a);

/// Sticker colors in face order: top, bottom, left, right, back, front.
pub const STICKERS: [Rgb; 6] = [WHITE, YELLOW, ORANGE, RED, BLUE, GREEN];

/// The colors of one face: `outer` is what gets painted, `inner` the body behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceColors {
    pub outer: Rgb,
    pub inner: Rgb,
}

impl FaceColors {
    pub const fn new(outer: Rgb, inner: Rgb) -> Self {
        Self { outer, inner }
    }

    /// A face with no sticker.
    pub const fn body() -> Self {
        Self::new(BODY, BODY)
    }
}

impl Default for FaceColors {
    fn default() -> Self {
        Self::body()
    }
}
