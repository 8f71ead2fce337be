//! Approximate gaussian blur for glyph coverage bitmaps.
//!
//! Runs a first-order recursive filter forward and backward along every row,
//! then every column, and repeats both passes once. Fixed-point throughout:
//! `APREC` bits for the filter coefficient and `ZPREC` bits for the
//! accumulator.

const APREC: i32 = 16;
const ZPREC: i32 = 7;

/// Blur `pixels` (a `width` x `height` coverage bitmap) in place.
///
/// A radius below 1 leaves the bitmap untouched. The outermost pixels of
/// each row and column end up zero, so callers pad the bitmap first.
pub fn blur(pixels: &mut [u8], width: usize, height: usize, radius: u32) {
    if radius < 1 || width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(pixels.len(), width * height);

    // 90% of the kernel's weight falls inside the radius
    let sigma = radius as f32 * 0.577_35;
    let alpha = ((1 << APREC) as f32 * (1.0 - (-2.3 / (sigma + 1.0)).exp())) as i32;

    for _ in 0..2 {
        blur_rows(pixels, width, height, alpha);
        blur_cols(pixels, width, height, alpha);
    }
}

#[inline]
fn step(z: &mut i32, px: &mut u8, alpha: i32) {
    *z += (alpha * (((*px as i32) << ZPREC) - *z)) >> APREC;
    *px = (*z >> ZPREC) as u8;
}

fn blur_rows(pixels: &mut [u8], width: usize, height: usize, alpha: i32) {
    for row in pixels.chunks_exact_mut(width).take(height) {
        let mut z = 0;
        for px in row.iter_mut().skip(1) {
            step(&mut z, px, alpha);
        }
        row[width - 1] = 0;

        z = 0;
        for px in row.iter_mut().rev().skip(1) {
            step(&mut z, px, alpha);
        }
        row[0] = 0;
    }
}

fn blur_cols(pixels: &mut [u8], width: usize, height: usize, alpha: i32) {
    for x in 0..width {
        let mut z = 0;
        for y in 1..height {
            step(&mut z, &mut pixels[y * width + x], alpha);
        }
        pixels[(height - 1) * width + x] = 0;

        z = 0;
        for y in (0..height.saturating_sub(1)).rev() {
            step(&mut z, &mut pixels[y * width + x], alpha);
        }
        pixels[x] = 0;
    }
}
