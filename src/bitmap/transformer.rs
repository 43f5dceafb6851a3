use std::fmt::Display;

use super::{Bitmap, Pixel};

#[rustfmt::skip]
const GAUSSIAN_KERNEL: [[u16; 3]; 3] = [
    [1, 2, 1],
    [2, 4, 2],
    [1, 2, 1],
];
const GAUSSIAN_KERNEL_WEIGHT: u16 = 16;

/// The transformations the command line driver derives from one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transformation {
    RotateClockwise,
    RotateCounterclockwise,
    GaussianBlur,
}

impl Transformation {
    pub fn apply(&self, bitmap: &mut Bitmap) {
        match self {
            Self::RotateClockwise => rotate_clockwise(bitmap),
            Self::RotateCounterclockwise => rotate_counterclockwise(bitmap),
            Self::GaussianBlur => apply_gaussian_blur(bitmap),
        }
    }
}

impl Display for Transformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RotateClockwise => write!(f, "clockwise rotation"),
            Self::RotateCounterclockwise => write!(f, "counterclockwise rotation"),
            Self::GaussianBlur => write!(f, "gaussian blur"),
        }
    }
}

/// Rotate by 90 degrees clockwise.
///
/// The pixel at (x, y) moves to (new_width - 1 - y, x).
pub fn rotate_clockwise(bitmap: &mut Bitmap) {
    rotate_quarter(bitmap, |x, y, new_width, _| (new_width - 1 - y, x));
}

/// Rotate by 90 degrees counterclockwise.
///
/// The pixel at (x, y) moves to (y, new_height - 1 - x).
pub fn rotate_counterclockwise(bitmap: &mut Bitmap) {
    rotate_quarter(bitmap, |x, y, _, new_height| (y, new_height - 1 - x));
}

/// `destination` maps a source (x, y) and the swapped dimensions
/// to the destination (x, y).
fn rotate_quarter<F>(bitmap: &mut Bitmap, destination: F)
where
    F: Fn(usize, usize, usize, usize) -> (usize, usize),
{
    if bitmap.is_empty() {
        return;
    }
    let width = bitmap.width as usize;
    let new_width = bitmap.height as usize;
    let new_height = width;
    let mut rotated = vec![Pixel::default(); bitmap.pixels.len()];
    for (y, row) in bitmap.pixels.chunks_exact(width).enumerate() {
        for (x, &pixel) in row.iter().enumerate() {
            let (new_x, new_y) = destination(x, y, new_width, new_height);
            rotated[new_y * new_width + new_x] = pixel;
        }
    }
    log::debug!(
        "Rotated {}x{} bitmap to {}x{}",
        bitmap.width,
        bitmap.height,
        new_width,
        new_height
    );
    let (new_width, new_height) = (bitmap.height, bitmap.width);
    bitmap.replace_pixels(new_width, new_height, rotated);
}

/// Smooth every interior pixel with a normalized 3x3 binomial kernel.
///
/// The outermost rows and columns are left untouched.
pub fn apply_gaussian_blur(bitmap: &mut Bitmap) {
    if bitmap.is_empty() {
        return;
    }
    let width = bitmap.width as usize;
    let height = bitmap.height as usize;
    if width < 3 || height < 3 {
        log::debug!("Bitmap of {}x{} has no interior to blur", width, height);
        return;
    }
    let original = bitmap.pixels.clone();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut red = 0;
            let mut green = 0;
            let mut blue = 0;
            for (kernel_y, kernel_row) in GAUSSIAN_KERNEL.iter().enumerate() {
                for (kernel_x, &weight) in kernel_row.iter().enumerate() {
                    let neighbour = original[(y + kernel_y - 1) * width + (x + kernel_x - 1)];
                    red += weight * u16::from(neighbour.red);
                    green += weight * u16::from(neighbour.green);
                    blue += weight * u16::from(neighbour.blue);
                }
            }
            bitmap.pixels[y * width + x] = Pixel {
                blue: normalize(blue),
                green: normalize(green),
                red: normalize(red),
            };
        }
    }
    log::debug!("Blurred interior of {}x{} bitmap", width, height);
}

/// Divide a weighted channel sum by the kernel weight, rounding half up.
fn normalize(weighted_sum: u16) -> u8 {
    ((weighted_sum + GAUSSIAN_KERNEL_WEIGHT / 2) / GAUSSIAN_KERNEL_WEIGHT) as u8
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use super::{apply_gaussian_blur, rotate_clockwise, rotate_counterclockwise, Transformation};
    use crate::bitmap::reader::test::bitmap_file_bytes;
    use crate::bitmap::reader::BitmapReader;
    use crate::bitmap::test::coordinate_bitmap;
    use crate::bitmap::writer::BitmapWriter;
    use crate::bitmap::{Bitmap, Pixel};

    /// deterministic pseudo random channel values
    fn noise_bitmap(width: u32, height: u32, seed: u32) -> Bitmap {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        };
        let pixels = (0..width * height)
            .map(|_| Pixel::from_rgb(next(), next(), next()))
            .collect();
        Bitmap::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn rotate_clockwise_moves_pixels() {
        let original = coordinate_bitmap(3, 2);
        let mut rotated = original.clone();
        rotate_clockwise(&mut rotated);
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 3);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(
                    rotated.pixel(rotated.width() - 1 - y, x),
                    original.pixel(x, y),
                    "pixel ({}, {}) moved to the wrong place",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn rotate_counterclockwise_moves_pixels() {
        let original = coordinate_bitmap(3, 2);
        let mut rotated = original.clone();
        rotate_counterclockwise(&mut rotated);
        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 3);
        // the top right corner ends up in the top left
        assert_eq!(rotated.pixel(0, 0), original.pixel(2, 0));
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(
                    rotated.pixel(y, rotated.height() - 1 - x),
                    original.pixel(x, y)
                );
            }
        }
    }

    #[test]
    fn rotate_updates_stride_and_header() {
        let mut bitmap = coordinate_bitmap(4, 3);
        assert_eq!(bitmap.padding(), 0);
        rotate_clockwise(&mut bitmap);
        assert_eq!(bitmap.row_stride(), 12);
        assert_eq!(bitmap.padding(), 3);
        assert_eq!(bitmap.info_header().width, 3);
        assert_eq!(bitmap.info_header().height, 4);
    }

    #[test]
    fn rotate_keeps_negative_height_sign() {
        let row = [[0u8, 0, 255]; 4].concat();
        let source = bitmap_file_bytes(4, -2, 24, 0, &[&row, &row]);
        let mut bitmap = BitmapReader::new(Cursor::new(source))
            .read_bitmap()
            .expect("valid bitmap");
        rotate_clockwise(&mut bitmap);
        assert_eq!(bitmap.info_header().width, 2);
        assert_eq!(bitmap.info_header().height, -4);
        let mut encoded: Vec<u8> = vec![];
        BitmapWriter::new(&mut encoded, &bitmap)
            .write_bitmap()
            .expect("ERR");
        assert_eq!(&encoded[22..26], &(-4i32).to_le_bytes());

        rotate_counterclockwise(&mut bitmap);
        assert_eq!(bitmap.info_header().width, 4);
        assert_eq!(bitmap.info_header().height, -2);
        let mut encoded: Vec<u8> = vec![];
        BitmapWriter::new(&mut encoded, &bitmap)
            .write_bitmap()
            .expect("ERR");
        assert_eq!(&encoded[22..26], &(-2i32).to_le_bytes());
    }

    #[test]
    fn rotate_back_and_forth() {
        let original = noise_bitmap(5, 3, 17);
        let mut bitmap = original.clone();
        rotate_clockwise(&mut bitmap);
        rotate_counterclockwise(&mut bitmap);
        assert_eq!(bitmap, original);
    }

    #[test]
    fn four_clockwise_rotations() {
        let original = noise_bitmap(7, 2, 3);
        let mut bitmap = original.clone();
        for _ in 0..4 {
            rotate_clockwise(&mut bitmap);
        }
        assert_eq!(bitmap, original);
    }

    #[test]
    fn transformations_ignore_empty_bitmap() {
        for transformation in [
            Transformation::RotateClockwise,
            Transformation::RotateCounterclockwise,
            Transformation::GaussianBlur,
        ] {
            let mut bitmap = Bitmap::new();
            transformation.apply(&mut bitmap);
            assert_eq!(bitmap, Bitmap::new(), "{} changed empty bitmap", transformation);
        }
    }

    #[test]
    fn blur_single_bright_dot() {
        let mut pixels = vec![Pixel::default(); 9];
        pixels[4] = Pixel::from_rgb(160, 16, 8);
        let mut bitmap = Bitmap::from_pixels(3, 3, pixels).unwrap();
        apply_gaussian_blur(&mut bitmap);
        // 160 * 4/16 = 40, 16 * 4/16 = 4, 8 * 4/16 = 2
        assert_eq!(bitmap.pixel(1, 1), Some(Pixel::from_rgb(40, 4, 2)));
        assert_eq!(bitmap.pixel(0, 0), Some(Pixel::default()));
    }

    #[test]
    fn blur_rounds_half_up() {
        let mut pixels = vec![Pixel::default(); 9];
        // corner weight 1: 8/16 = 0.5 rounds to 1, 7/16 rounds to 0
        pixels[0] = Pixel::from_rgb(8, 7, 24);
        let mut bitmap = Bitmap::from_pixels(3, 3, pixels).unwrap();
        apply_gaussian_blur(&mut bitmap);
        assert_eq!(bitmap.pixel(1, 1), Some(Pixel::from_rgb(1, 0, 2)));
    }

    #[test]
    fn blur_keeps_border() {
        let original = noise_bitmap(6, 5, 99);
        let mut blurred = original.clone();
        apply_gaussian_blur(&mut blurred);
        let (width, height) = (original.width(), original.height());
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    assert_eq!(blurred.pixel(x, y), original.pixel(x, y));
                }
            }
        }
    }

    #[test]
    fn blur_stays_within_neighbourhood_bounds() {
        let original = noise_bitmap(8, 6, 2024);
        let mut blurred = original.clone();
        apply_gaussian_blur(&mut blurred);
        for y in 1..original.height() - 1 {
            for x in 1..original.width() - 1 {
                let neighbourhood: Vec<Pixel> = (y - 1..=y + 1)
                    .flat_map(|ny| (x - 1..=x + 1).map(move |nx| (nx, ny)))
                    .filter_map(|(nx, ny)| original.pixel(nx, ny))
                    .collect();
                let pixel = blurred.pixel(x, y).unwrap();
                let channels: [(u8, fn(&Pixel) -> u8); 3] = [
                    (pixel.red, |p| p.red),
                    (pixel.green, |p| p.green),
                    (pixel.blue, |p| p.blue),
                ];
                for (value, channel) in channels {
                    let min = neighbourhood.iter().map(channel).min().unwrap();
                    let max = neighbourhood.iter().map(channel).max().unwrap();
                    assert!(
                        (min..=max).contains(&value),
                        "{} outside of [{}, {}] at ({}, {})",
                        value,
                        min,
                        max,
                        x,
                        y
                    );
                }
            }
        }
    }

    #[test]
    fn blur_ignores_thin_bitmap() {
        let original = noise_bitmap(2, 9, 5);
        let mut blurred = original.clone();
        apply_gaussian_blur(&mut blurred);
        assert_eq!(blurred, original);
    }

    #[test]
    fn blur_reads_unmodified_pixels() {
        let original = noise_bitmap(5, 5, 41);
        let mut blurred = original.clone();
        apply_gaussian_blur(&mut blurred);
        // recompute (2, 2) from the original neighbourhood only
        let mut sum = 0u32;
        for (dy, row) in [[1u32, 2, 1], [2, 4, 2], [1, 2, 1]].iter().enumerate() {
            for (dx, weight) in row.iter().enumerate() {
                let neighbour = original.pixel(1 + dx as u32, 1 + dy as u32).unwrap();
                sum += weight * u32::from(neighbour.red);
            }
        }
        assert_eq!(u32::from(blurred.pixel(2, 2).unwrap().red), (sum + 8) / 16);
    }
}
