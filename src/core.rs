use crate::error::{GlitchError, GlitchResult};

/// Sample layout of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Channels {
    Gray,
    Rgb,
}

impl Channels {
    pub const fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

/// One 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl std::str::FromStr for Rgb8 {
    type Err = GlitchError;

    /// Parse `#RRGGBB` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GlitchError::validation(format!(
                "color '{s}' is not of the form #RRGGBB"
            )));
        }
        let sample = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| GlitchError::validation(format!("color '{s}' is not hex")))
        };
        Ok(Self {
            r: sample(0)?,
            g: sample(2)?,
            b: sample(4)?,
        })
    }
}

/// Dense row-major 8-bit image buffer.
///
/// Constructors validate that both dimensions are nonzero and that
/// `width * height * channels` fits in memory; every method after that may
/// rely on `data.len()` matching exactly. Coordinate arguments must be in
/// range: out-of-range access is a caller bug, not a recoverable error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate an all-black (all-zero) buffer.
    pub fn black(width: u32, height: u32, channels: Channels) -> GlitchResult<Self> {
        let len = buffer_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0u8; len],
        })
    }

    /// Wrap raw samples; `data.len()` must equal `width * height * channels`.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> GlitchResult<Self> {
        let len = buffer_len(width, height, channels)?;
        if data.len() != len {
            return Err(GlitchError::buffer(format!(
                "raw buffer is {} bytes, expected {} for {}x{} with {} channel(s)",
                data.len(),
                len,
                width,
                height,
                channels.count()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * self.channels.count()
    }

    /// Borrow the samples of one pixel.
    pub fn px(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels.count();
        let i = self.offset(x, y);
        &self.data[i..i + c]
    }

    pub fn px_mut(&mut self, x: u32, y: u32) -> &mut [u8] {
        let c = self.channels.count();
        let i = self.offset(x, y);
        &mut self.data[i..i + c]
    }

    /// Overwrite one pixel; `px.len()` must equal the channel count.
    pub fn set_px(&mut self, x: u32, y: u32, px: &[u8]) {
        self.px_mut(x, y).copy_from_slice(px);
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize * self.channels.count();
        let i = self.offset(0, y);
        &self.data[i..i + w]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.width as usize * self.channels.count();
        let i = self.offset(0, y);
        &mut self.data[i..i + w]
    }

    /// Overwrite every pixel with one value; `px.len()` must equal the
    /// channel count.
    pub fn fill(&mut self, px: &[u8]) {
        debug_assert_eq!(px.len(), self.channels.count());
        for chunk in self.data.chunks_exact_mut(self.channels.count()) {
            chunk.copy_from_slice(px);
        }
    }

    /// Fill the half-open rect `[x0, x1) x [y0, y1)` with one pixel value.
    /// The rect must already be clipped to the buffer.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, px: &[u8]) {
        debug_assert!(x0 <= x1 && x1 <= self.width);
        debug_assert!(y0 <= y1 && y1 <= self.height);
        debug_assert_eq!(px.len(), self.channels.count());
        let c = self.channels.count();
        for y in y0..y1 {
            let start = (y as usize * self.width as usize + x0 as usize) * c;
            let end = start + (x1 - x0) as usize * c;
            for chunk in self.data[start..end].chunks_exact_mut(c) {
                chunk.copy_from_slice(px);
            }
        }
    }

    /// Nearest-neighbor resample into a fresh `width` x `height` buffer.
    pub fn resize_to(&self, width: u32, height: u32) -> GlitchResult<Self> {
        let mut out = Self::black(width, height, self.channels)?;
        if width == self.width && height == self.height {
            out.data.copy_from_slice(&self.data);
            return Ok(out);
        }
        let c = self.channels.count();
        for y in 0..height {
            let sy = (u64::from(y) * u64::from(self.height) / u64::from(height)) as u32;
            for x in 0..width {
                let sx = (u64::from(x) * u64::from(self.width) / u64::from(width)) as u32;
                let src = self.offset(sx, sy);
                let dst = out.offset(x, y);
                out.data[dst..dst + c].copy_from_slice(&self.data[src..src + c]);
            }
        }
        Ok(out)
    }
}

fn buffer_len(width: u32, height: u32, channels: Channels) -> GlitchResult<usize> {
    if width == 0 || height == 0 {
        return Err(GlitchError::validation(
            "pixel buffer width/height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels.count()))
        .ok_or_else(|| GlitchError::buffer("pixel buffer size overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_rejects_zero_dimensions() {
        assert!(PixelBuffer::black(0, 4, Channels::Rgb).is_err());
        assert!(PixelBuffer::black(4, 0, Channels::Gray).is_err());
    }

    #[test]
    fn black_is_all_zero_with_exact_len() {
        let buf = PixelBuffer::black(3, 2, Channels::Rgb).unwrap();
        assert_eq!(buf.data().len(), 3 * 2 * 3);
        assert!(buf.data().iter().all(|&s| s == 0));
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(PixelBuffer::from_raw(2, 2, Channels::Rgb, vec![0u8; 11]).is_err());
        assert!(PixelBuffer::from_raw(2, 2, Channels::Rgb, vec![0u8; 12]).is_ok());
    }

    #[test]
    fn set_px_then_px_roundtrips() {
        let mut buf = PixelBuffer::black(4, 3, Channels::Rgb).unwrap();
        buf.set_px(2, 1, &[9, 8, 7]);
        assert_eq!(buf.px(2, 1), &[9, 8, 7]);
        assert_eq!(buf.px(1, 1), &[0, 0, 0]);
    }

    #[test]
    fn fill_overwrites_every_pixel() {
        let mut buf = PixelBuffer::black(3, 2, Channels::Rgb).unwrap();
        buf.fill(&[1, 2, 3]);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf.px(x, y), &[1, 2, 3]);
            }
        }
    }

    #[test]
    fn fill_rect_touches_only_the_rect() {
        let mut buf = PixelBuffer::black(4, 4, Channels::Gray).unwrap();
        buf.fill_rect(1, 1, 3, 3, &[255]);
        for y in 0..4 {
            for x in 0..4 {
                let inside = (1..3).contains(&x) && (1..3).contains(&y);
                assert_eq!(buf.px(x, y)[0], if inside { 255 } else { 0 }, "({x},{y})");
            }
        }
    }

    #[test]
    fn fill_rect_accepts_empty_rect() {
        let mut buf = PixelBuffer::black(4, 4, Channels::Rgb).unwrap();
        buf.fill_rect(2, 2, 2, 2, &[1, 2, 3]);
        assert!(buf.data().iter().all(|&s| s == 0));
    }

    #[test]
    fn resize_doubles_each_pixel() {
        let mut buf = PixelBuffer::black(2, 2, Channels::Gray).unwrap();
        buf.set_px(0, 0, &[10]);
        buf.set_px(1, 0, &[20]);
        buf.set_px(0, 1, &[30]);
        buf.set_px(1, 1, &[40]);

        let big = buf.resize_to(4, 4).unwrap();
        assert_eq!(big.px(0, 0)[0], 10);
        assert_eq!(big.px(1, 1)[0], 10);
        assert_eq!(big.px(2, 0)[0], 20);
        assert_eq!(big.px(3, 3)[0], 40);
        assert_eq!(big.px(0, 3)[0], 30);
    }

    #[test]
    fn resize_to_same_size_is_copy() {
        let mut buf = PixelBuffer::black(3, 2, Channels::Rgb).unwrap();
        buf.set_px(2, 1, &[5, 6, 7]);
        let same = buf.resize_to(3, 2).unwrap();
        assert_eq!(same, buf);
    }

    #[test]
    fn hex_parses_with_and_without_hash() {
        let a: Rgb8 = "#FFC470".parse().unwrap();
        assert_eq!(a, Rgb8::new(255, 196, 112));
        let b: Rgb8 = "dd5746".parse().unwrap();
        assert_eq!(b, Rgb8::new(221, 87, 70));
    }

    #[test]
    fn hex_rejects_junk() {
        assert!("".parse::<Rgb8>().is_err());
        assert!("#FFF".parse::<Rgb8>().is_err());
        assert!("#GGGGGG".parse::<Rgb8>().is_err());
        assert!("ÿÿÿ".parse::<Rgb8>().is_err());
    }

    #[test]
    fn is_black_only_for_all_zero() {
        assert!(Rgb8::new(0, 0, 0).is_black());
        assert!(!Rgb8::new(0, 0, 1).is_black());
    }
}
