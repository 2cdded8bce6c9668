use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{anyhow, Context, Error};

/// Linear radiance, with channels nominally in `[0, 255]`. Values outside that range are kept
/// until the color is written out.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// A buffer of color data, with the top-left being `(0,0)`.
pub struct Canvas {
    width: u32,
    height: u32,
    buffer: Vec<Color>,
}

/// An iterator for the rows of the image, starting at the top and working down.
pub struct Rows<'a> {
    canvas: &'a Canvas,
    row: usize,
}

impl Color {
    pub const MAX_CHANNEL: f32 = 255.;

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// A color with all three channels set to `value`.
    pub fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    pub fn black() -> Self {
        Self::splat(0.)
    }

    pub fn is_black(&self) -> bool {
        self.r == 0. && self.g == 0. && self.b == 0.
    }

    /// Clamp each channel to at most `max`.
    pub fn clamp_max(self, max: f32) -> Self {
        Self::new(self.r.min(max), self.g.min(max), self.b.min(max))
    }

    /// Round and clamp each channel to an 8-bit value. NaN channels become 0.
    pub fn to_u8(&self) -> [u8; 3] {
        let convert = |x: f32| x.round().clamp(0., Self::MAX_CHANNEL) as u8;
        [convert(self.r), convert(self.g), convert(self.b)]
    }
}

impl std::ops::Add for Color {
    type Output = Color;
    fn add(mut self, rhs: Color) -> Self::Output {
        self += rhs;
        self
    }
}

impl std::ops::AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

/// Componentwise product, used to filter light through a surface color.
impl std::ops::Mul for Color {
    type Output = Color;
    fn mul(self, rhs: Color) -> Self::Output {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl std::ops::MulAssign for Color {
    fn mul_assign(&mut self, rhs: Color) {
        *self = *self * rhs;
    }
}

impl std::ops::Mul<f32> for Color {
    type Output = Color;
    fn mul(self, rhs: f32) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl std::ops::Mul<Color> for f32 {
    type Output = Color;
    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

impl std::ops::MulAssign<f32> for Color {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl std::ops::Div<f32> for Color {
    type Output = Color;
    fn div(self, rhs: f32) -> Self::Output {
        Color::new(self.r / rhs, self.g / rhs, self.b / rhs)
    }
}

impl Canvas {
    /// Construct a new [`Canvas`].
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let mut buffer = Vec::with_capacity(size);
        buffer.resize_with(size, Default::default);
        Self {
            width,
            height,
            buffer,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        (self.width as usize) * y + x
    }

    /// Mutate a color in the [`Canvas`].
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut Color {
        let ix = self.index(x, y);
        &mut self.buffer[ix]
    }

    /// Fetch a color in the [`Canvas`].
    pub fn get(&self, x: usize, y: usize) -> &Color {
        let ix = self.index(x, y);
        &self.buffer[ix]
    }

    /// Return an iterator to the rows of the image.
    pub fn rows(&self) -> Rows {
        Rows {
            canvas: self,
            row: 0,
        }
    }

    /// Return raw image RGB8 data for the image.
    pub fn data(&self) -> Vec<u8> {
        let size = (self.width * self.height) as usize;
        let mut data = Vec::with_capacity(size * 3);

        for row in self.rows() {
            for color in row {
                data.extend_from_slice(&color.to_u8())
            }
        }

        data
    }

    /// Write the image as a plain-text PPM (`P3`), one pixel per line.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;

        for row in self.rows() {
            for color in row {
                let [r, g, b] = color.to_u8();
                writeln!(out, "{} {} {}", r, g, b)?;
            }
        }

        Ok(())
    }

    /// Save the image to `path`. A `.ppm` extension produces plain-text PPM; anything else is
    /// handed to the `image` crate, which picks the encoder from the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();

        let is_ppm = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)
                .with_context(|| format!("failed to create `{}`", path.display()))?;
            let mut out = BufWriter::new(file);
            self.write_ppm(&mut out)
                .and_then(|_| out.flush())
                .with_context(|| format!("failed to write `{}`", path.display()))?;
        } else {
            let image = image::RgbImage::from_raw(self.width, self.height, self.data())
                .ok_or_else(|| anyhow!("canvas data does not match its dimensions"))?;
            image
                .save(path)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
        }

        Ok(())
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a [Color];

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.canvas.height as usize {
            return None;
        }

        let len = self.canvas.width as usize;
        let start = self.row * len;

        self.row += 1;

        Some(&self.canvas.buffer[start..start + len])
    }
}
