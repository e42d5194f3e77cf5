use image::Rgba;

const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Fixed color table. Escape values are spread over entries `0..=81`, and
/// each lookup blends an entry with its successor.
pub const PALETTE: [Rgba<u8>; 83] = [
    rgb(255, 0, 0),
    rgb(0, 255, 0),
    rgb(0, 0, 255),
    rgb(128, 0, 0),
    rgb(128, 0, 32),
    rgb(128, 0, 64),
    rgb(128, 0, 96),
    rgb(128, 0, 128),
    rgb(128, 0, 160),
    rgb(128, 0, 192),
    rgb(128, 0, 224),
    rgb(128, 0, 255),
    rgb(128, 32, 0),
    rgb(128, 32, 32),
    rgb(128, 32, 64),
    rgb(128, 32, 96),
    rgb(128, 32, 128),
    rgb(128, 32, 160),
    rgb(128, 32, 192),
    rgb(128, 32, 224),
    rgb(128, 32, 255),
    rgb(128, 64, 0),
    rgb(128, 64, 32),
    rgb(128, 64, 64),
    rgb(128, 64, 96),
    rgb(128, 64, 128),
    rgb(128, 64, 160),
    rgb(128, 64, 192),
    rgb(128, 64, 224),
    rgb(128, 64, 255),
    rgb(128, 96, 0),
    rgb(128, 96, 32),
    rgb(128, 96, 64),
    rgb(128, 96, 96),
    rgb(128, 96, 128),
    rgb(128, 96, 160),
    rgb(128, 96, 192),
    rgb(128, 96, 224),
    rgb(128, 96, 255),
    rgb(128, 128, 0),
    rgb(128, 128, 32),
    rgb(128, 128, 64),
    rgb(128, 128, 96),
    rgb(128, 128, 128),
    rgb(128, 128, 160),
    rgb(128, 128, 192),
    rgb(128, 128, 224),
    rgb(128, 128, 255),
    rgb(128, 160, 0),
    rgb(128, 160, 32),
    rgb(128, 160, 64),
    rgb(128, 160, 96),
    rgb(128, 160, 128),
    rgb(128, 160, 160),
    rgb(128, 160, 192),
    rgb(128, 160, 224),
    rgb(128, 160, 255),
    rgb(128, 192, 0),
    rgb(128, 192, 32),
    rgb(128, 192, 64),
    rgb(128, 192, 96),
    rgb(128, 192, 128),
    rgb(128, 192, 160),
    rgb(128, 192, 192),
    rgb(128, 192, 224),
    rgb(128, 192, 255),
    rgb(128, 224, 0),
    rgb(128, 224, 32),
    rgb(128, 224, 64),
    rgb(128, 224, 96),
    rgb(128, 224, 128),
    rgb(128, 224, 160),
    rgb(128, 224, 192),
    rgb(128, 224, 224),
    rgb(128, 224, 255),
    rgb(128, 255, 0),
    rgb(128, 255, 32),
    rgb(128, 255, 64),
    rgb(128, 255, 96),
    rgb(128, 255, 128),
    rgb(128, 255, 160),
    rgb(128, 255, 192),
    rgb(128, 255, 224),
];

/// Blends `a` towards `b` channel by channel. The channel difference uses
/// wrapping `u8` subtraction and the result is truncated, then wrapped, back
/// into a `u8`, so a `255 -> 0` step crawls up from 255 instead of fading
/// down. Alpha is always opaque.
pub fn lerp(a: Rgba<u8>, b: Rgba<u8>, ratio: f64) -> Rgba<u8> {
    let channel = |i: usize| {
        let delta = b[i].wrapping_sub(a[i]) as f64;
        (delta.floor() * ratio + a[i] as f64) as i64 as u8
    };
    Rgba([channel(0), channel(1), channel(2), 255])
}

#[derive(Copy, Clone, Debug)]
pub struct Palette {
    colors: &'static [Rgba<u8>],
}

impl Palette {
    pub fn new(colors: &'static [Rgba<u8>]) -> Self {
        assert!(colors.len() >= 2, "palette needs at least two colors");
        Self { colors }
    }

    /// Highest index `color_at` accepts.
    pub fn max_index(&self) -> f64 {
        (self.colors.len() - 2) as f64
    }

    /// Maps an escape value in `[0, iteration_max]` onto `[0, max_index]`.
    pub fn scale(&self, escape_value: f64, iteration_max: u32) -> f64 {
        escape_value / iteration_max as f64 * self.max_index()
    }

    pub fn color_at(&self, index: f64) -> Rgba<u8> {
        assert!(
            (0.0..=self.max_index()).contains(&index),
            "palette index {} out of range",
            index
        );
        let low = index.floor();
        let ratio = index - low;
        let low = low as usize;
        lerp(self.colors[low], self.colors[low + 1], ratio)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(&PALETTE)
    }
}
