/// Generates a grayscale step edge with a one-pixel linear ramp.
///
/// The edge line passes through `(px, py)` perpendicular to the direction
/// `(cos(angle_deg), sin(angle_deg))`; pixels on the negative side read
/// `bright`, the positive side `dark`, with a linear blend across one pixel.
pub fn oriented_step_u8(
    width: usize,
    height: usize,
    px: f64,
    py: f64,
    angle_deg: f64,
    bright: u8,
    dark: u8,
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let alpha = angle_deg.to_radians();
    let (ux, uy) = (alpha.cos(), alpha.sin());
    let (lo, hi) = (bright as f64, dark as f64);

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let s = (x as f64 - px) * ux + (y as f64 - py) * uy;
            let v = if s <= -0.5 {
                lo
            } else if s >= 0.5 {
                hi
            } else {
                lo + (hi - lo) * (s + 0.5)
            };
            img[y * width + x] = v.round() as u8;
        }
    }
    img
}
