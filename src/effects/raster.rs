//! CPU preview of the starfield as an RGBA image.

use image::{Rgba, RgbaImage};

use crate::{
    animation::{ease::Ease, keys::Keyframes},
    effects::starfield::{Star, Starfield},
    foundation::core::{Millis, Rgba8, clamp01},
};

/// Night sky behind everything.
pub const BACKGROUND: Rgba8 = Rgba8::rgb(10, 10, 30);

const STAR: Rgba8 = Rgba8::rgb(255, 255, 255);

/// Halo reach beyond the star disc, in pixels.
const GLOW_PX: f64 = 10.0;
const GLOW_STRENGTH: f64 = 0.5;

fn nebula() -> Keyframes<Rgba8> {
    // Radial stops: centre, half radius, rim.
    Keyframes::evenly_spaced(
        &[
            Rgba8::rgba(59, 130, 246, 13),
            Rgba8::rgba(139, 92, 246, 8),
            Rgba8::rgba(10, 10, 30, 0),
        ],
        Ease::Linear,
    )
}

/// Draw the field as it looks at `now`.
#[tracing::instrument(level = "debug", skip(field), fields(stars = field.stars().len()))]
pub fn render_starfield(field: &Starfield, now: Millis) -> RgbaImage {
    let w = field.width().round() as u32;
    let h = field.height().round() as u32;
    let mut img = RgbaImage::from_pixel(w, h, Rgba(BACKGROUND.to_array()));
    paint_nebula(&mut img);
    for star in field.stars() {
        paint_star(&mut img, star, field.star_brightness(star, now));
    }
    img
}

fn paint_nebula(img: &mut RgbaImage) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let stops = nebula();
    let cx = f64::from(w) / 2.0;
    let cy = f64::from(h) / 2.0;
    let radius = cx.max(1.0);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - cx;
        let dy = f64::from(y) + 0.5 - cy;
        let t = (dx * dx + dy * dy).sqrt() / radius;
        if t >= 1.0 {
            continue;
        }
        if let Some(c) = stops.sample(t) {
            blend(px, c, 1.0);
        }
    }
}

fn paint_star(img: &mut RgbaImage, star: &Star, brightness: f64) {
    let (w, h) = img.dimensions();
    let reach = star.radius + if star.has_glow() { GLOW_PX } else { 1.0 };
    let x0 = (star.x - reach).floor().max(0.0) as u32;
    let y0 = (star.y - reach).floor().max(0.0) as u32;
    let x1 = ((star.x + reach).ceil().max(0.0) as u32).min(w);
    let y1 = ((star.y + reach).ceil().max(0.0) as u32).min(h);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = f64::from(x) + 0.5 - star.x;
            let dy = f64::from(y) + 0.5 - star.y;
            let d = (dx * dx + dy * dy).sqrt();
            let px = img.get_pixel_mut(x, y);

            if star.has_glow() {
                let falloff = clamp01(1.0 - (d - star.radius).max(0.0) / GLOW_PX);
                blend(px, STAR, GLOW_STRENGTH * brightness * falloff * falloff);
            }
            // Anti-aliased disc edge.
            let coverage = clamp01(star.radius + 0.5 - d);
            blend(px, STAR, brightness * coverage);
        }
    }
}

// Source-over onto an opaque destination; `src.a` and `opacity` both scale coverage.
fn blend(dst: &mut Rgba<u8>, src: Rgba8, opacity: f64) {
    let a = clamp01(opacity) * f64::from(src.a) / 255.0;
    if a <= 0.0 {
        return;
    }
    let mix = |d: u8, s: u8| -> u8 {
        (f64::from(d) + (f64::from(s) - f64::from(d)) * a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    dst.0 = [mix(dst.0[0], src.r), mix(dst.0[1], src.g), mix(dst.0[2], src.b), 255];
}

#[cfg(test)]
#[path = "../../tests/unit/effects/raster.rs"]
mod tests;
