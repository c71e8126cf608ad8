//! Sampling pixel buffers at normalized coordinates.

use crate::error::{AtlasError, Result};
use crate::types::{PixelBuffer, Texel};
use glam::{Vec2, Vec4};

/// Bilinearly sample `buffer` at `position`, both axes in `[0, 1]`.
///
/// `(0, 0)` maps exactly onto the top-left texel and `(1, 1)` onto the
/// bottom-right one. The result holds normalized RGBA channels.
pub fn evaluate(buffer: &PixelBuffer, position: Vec2) -> Result<Vec4> {
    check_sample(buffer, position)?;

    let max_x = buffer.width() - 1;
    let max_y = buffer.height() - 1;
    let fx = position.x * max_x as f32;
    let fy = position.y * max_y as f32;
    let x0 = (fx.floor() as u32).min(max_x);
    let y0 = (fy.floor() as u32).min(max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    let width = buffer.width() as usize;
    let texel = |x: u32, y: u32| buffer.texels()[y as usize * width + x as usize].to_vec4();
    let top_left = texel(x0, y0);
    let top_right = texel(x1, y0);
    let bottom_left = texel(x0, y1);
    let bottom_right = texel(x1, y1);

    let x_factor = fx - x0 as f32;
    let y_factor = fy - y0 as f32;
    let top = top_left.lerp(top_right, x_factor);
    let bottom = bottom_left.lerp(bottom_right, x_factor);
    Ok(top.lerp(bottom, y_factor))
}

/// Sample the texel nearest to `position`, both axes in `[0, 1]`.
pub fn sample_nearest(buffer: &PixelBuffer, position: Vec2) -> Result<Texel> {
    check_sample(buffer, position)?;

    let x = (position.x * (buffer.width() - 1) as f32).round() as u32;
    let y = (position.y * (buffer.height() - 1) as f32).round() as u32;
    buffer.get(x.min(buffer.width() - 1), y.min(buffer.height() - 1))
}

fn check_sample(buffer: &PixelBuffer, position: Vec2) -> Result<()> {
    if buffer.width() == 0 || buffer.height() == 0 {
        return Err(AtlasError::SizeMismatch(format!(
            "cannot sample an empty {} buffer",
            buffer
        )));
    }

    // Written so NaN fails too.
    let in_range = |v: f32| (0.0..=1.0).contains(&v);
    if !in_range(position.x) || !in_range(position.y) {
        return Err(AtlasError::OutOfRange(format!(
            "sample position ({}, {}) must be normalized within 0-1",
            position.x, position.y
        )));
    }

    Ok(())
}

impl PixelBuffer {
    /// Bilinear sample at a normalized position. See [`evaluate`].
    pub fn evaluate(&self, position: Vec2) -> Result<Vec4> {
        evaluate(self, position)
    }

    pub fn evaluate_xy(&self, x: f32, y: f32) -> Result<Vec4> {
        evaluate(self, Vec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> PixelBuffer {
        PixelBuffer::from_texels(
            2,
            2,
            vec![
                Texel::new(255, 0, 0, 255),
                Texel::new(0, 255, 0, 255),
                Texel::new(0, 0, 255, 255),
                Texel::new(255, 255, 255, 0),
            ],
        )
        .unwrap()
    }

    fn assert_close(a: Vec4, b: Vec4) {
        assert!((a - b).abs().max_element() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_exact_corners() {
        let buffer = two_by_two();
        let corners = [
            ((0.0, 0.0), Texel::new(255, 0, 0, 255)),
            ((1.0, 1.0), Texel::new(255, 255, 255, 0)),
            ((1.0, 0.0), Texel::new(0, 255, 0, 255)),
            ((0.0, 1.0), Texel::new(0, 0, 255, 255)),
        ];
        for ((x, y), expected) in corners {
            assert_eq!(buffer.evaluate_xy(x, y).unwrap(), expected.to_vec4());
        }
    }

    #[test]
    fn test_center_is_average() {
        let buffer = two_by_two();
        let expected = buffer
            .texels()
            .iter()
            .map(|t| t.to_vec4())
            .fold(Vec4::ZERO, |acc, v| acc + v)
            / 4.0;
        assert_close(buffer.evaluate_xy(0.5, 0.5).unwrap(), expected);
    }

    #[test]
    fn test_interpolates_along_x() {
        let buffer = PixelBuffer::from_texels(
            3,
            1,
            vec![
                Texel::new(0, 0, 0, 255),
                Texel::new(100, 0, 0, 255),
                Texel::new(200, 0, 0, 255),
            ],
        )
        .unwrap();

        let v = buffer.evaluate_xy(0.25, 0.0).unwrap();
        assert!((v.x - 50.0 / 255.0).abs() < 1e-5);
        let v = buffer.evaluate_xy(0.75, 0.5).unwrap();
        assert!((v.x - 150.0 / 255.0).abs() < 1e-5);
    }

    #[test]
    fn test_single_texel() {
        let buffer = PixelBuffer::filled(1, 1, Texel::new(10, 20, 30, 40));
        let expected = Texel::new(10, 20, 30, 40).to_vec4();
        for &(x, y) in &[(0.0, 0.0), (0.3, 0.9), (1.0, 1.0)] {
            assert_eq!(buffer.evaluate_xy(x, y).unwrap(), expected);
        }
    }

    #[test]
    fn test_out_of_range() {
        let buffer = two_by_two();
        assert!(matches!(buffer.evaluate_xy(1.5, 0.0), Err(AtlasError::OutOfRange(_))));
        assert!(matches!(buffer.evaluate_xy(0.0, -0.1), Err(AtlasError::OutOfRange(_))));
        assert!(matches!(buffer.evaluate_xy(f32::NAN, 0.0), Err(AtlasError::OutOfRange(_))));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = PixelBuffer::new(0, 4);
        assert!(matches!(buffer.evaluate_xy(0.0, 0.0), Err(AtlasError::SizeMismatch(_))));
        assert!(matches!(
            sample_nearest(&buffer, Vec2::ZERO),
            Err(AtlasError::SizeMismatch(_))
        ));
    }

    #[test]
    fn test_nearest() {
        let buffer = two_by_two();
        let near_top_left = sample_nearest(&buffer, Vec2::new(0.2, 0.1)).unwrap();
        assert_eq!(near_top_left, Texel::new(255, 0, 0, 255));
        let near_bottom_right = sample_nearest(&buffer, Vec2::new(0.9, 0.6)).unwrap();
        assert_eq!(near_bottom_right, Texel::new(255, 255, 255, 0));
        assert!(matches!(
            sample_nearest(&buffer, Vec2::new(2.0, 0.0)),
            Err(AtlasError::OutOfRange(_))
        ));
    }
}
