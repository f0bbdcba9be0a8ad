//! Terminal rasterizer for draw commands.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::Vec3;
use platonic_core::{Geometry, Rgb, palette};
use platonic_fonts::{build_banner, letter_spaced};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::camera::Camera;
use crate::chars::{
    FOLIAGE_FILL, FOLIAGE_LEFT, FOLIAGE_RIGHT, SHADE_CHARS, SNOW_CHARS, TRUNK_CHAR,
};
use crate::color::{blend, fog, shade, vignette};
use crate::draw::{Anchor, DrawCommand, TextStyle};
use crate::shapes::{Material, SHAPE_RADIUS, Transform};
use crate::stars::star_at;

/// Halo around glowing shapes, as a multiple of the shape radius.
const HALO_EXTENT: f32 = 1.4;

#[derive(Debug, Clone, Copy)]
struct Glyph {
    ch: char,
    fg: Rgb,
    modifier: Modifier,
}

#[derive(Debug, Clone, Copy)]
struct Pixel {
    bg: Rgb,
    glyph: Option<Glyph>,
    depth: f32,
}

impl Default for Pixel {
    fn default() -> Self {
        Self {
            bg: palette::BLACK,
            glyph: None,
            depth: f32::INFINITY,
        }
    }
}

/// Depth-tested cell framebuffer.
struct Canvas {
    width: u16,
    height: u16,
    pixels: Vec<Pixel>,
}

impl Canvas {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width as usize * height as usize],
        }
    }

    fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    /// Put a glyph if it is nearer than what the cell holds.
    fn plot(&mut self, col: i32, row: i32, depth: f32, ch: char, fg: Rgb) {
        let Some(i) = self.index(col, row) else {
            return;
        };
        let pixel = &mut self.pixels[i];
        if depth < pixel.depth {
            pixel.depth = depth;
            pixel.glyph = Some(Glyph {
                ch,
                fg,
                modifier: Modifier::empty(),
            });
        }
    }

    fn tint(&mut self, col: i32, row: i32, color: Rgb, opacity: f32) {
        if let Some(i) = self.index(col, row) {
            let pixel = &mut self.pixels[i];
            pixel.bg = blend(pixel.bg, color, opacity);
        }
    }

    /// Normalized distance from the center, 1 at the corners.
    fn radius_at(&self, col: u16, row: u16) -> f32 {
        let cx = self.width as f32 / 2.0;
        let cy = self.height as f32 / 2.0;
        let dx = (col as f32 + 0.5 - cx) / cx.max(1.0);
        let dy = (row as f32 + 0.5 - cy) / cy.max(1.0);
        (dx * dx + dy * dy).sqrt() / std::f32::consts::SQRT_2
    }

    fn draw(&mut self, command: &DrawCommand<'_>, camera: &Camera) {
        match command {
            DrawCommand::Clear { color } => {
                for pixel in &mut self.pixels {
                    *pixel = Pixel {
                        bg: *color,
                        ..Pixel::default()
                    };
                }
            }
            DrawCommand::Tint {
                color,
                opacity,
                scale,
            } => self.draw_tint(*color, *opacity, *scale),
            DrawCommand::Stars {
                elapsed_ms,
                period_ms,
            } => self.draw_stars(*elapsed_ms, *period_ms),
            DrawCommand::Particles {
                positions,
                color,
                size,
                opacity,
            } => self.draw_particles(camera, positions, *color, *size, *opacity),
            DrawCommand::Cone {
                center,
                radius,
                height,
                color,
                leafy,
            } => self.draw_cone(camera, *center, *radius, *height, *color, *leafy),
            DrawCommand::Orb {
                center,
                radius,
                color,
                glyph,
            } => self.draw_orb(camera, *center, *radius, *color, *glyph),
            DrawCommand::Shape {
                geometry,
                transform,
                material,
                ..
            } => self.draw_shape(camera, *geometry, transform, material),
            DrawCommand::Vignette => self.draw_vignette(),
            DrawCommand::Text {
                content,
                anchor,
                offset,
                style,
                color,
                opacity,
            } => self.draw_text(content, *anchor, *offset, *style, *color, *opacity),
        }
    }

    fn draw_tint(&mut self, color: Rgb, opacity: f32, scale: f32) {
        if opacity < 0.005 {
            return;
        }
        for row in 0..self.height {
            for col in 0..self.width {
                let r = self.radius_at(col, row) / scale.max(0.01);
                let strength = opacity * (1.0 - 0.5 * r.min(1.0));
                self.tint(col as i32, row as i32, color, strength);
            }
        }
    }

    fn draw_stars(&mut self, elapsed_ms: u64, period_ms: u64) {
        for row in 0..self.height {
            for col in 0..self.width {
                if let Some((ch, color)) = star_at(col, row, elapsed_ms, period_ms) {
                    self.plot(col as i32, row as i32, f32::MAX, ch, color);
                }
            }
        }
    }

    fn draw_particles(
        &mut self,
        camera: &Camera,
        positions: &[Vec3],
        color: Rgb,
        size: f32,
        opacity: f32,
    ) {
        let area = self.area();
        for &position in positions {
            let Some(p) = camera.project(position, area) else {
                continue;
            };
            let (col, row) = (p.col.floor() as i32, p.row.floor() as i32);
            let Some(i) = self.index(col, row) else {
                continue;
            };

            let on_screen = size * p.rows_per_unit;
            let ch = match on_screen {
                s if s < 0.15 => SNOW_CHARS[0],
                s if s < 0.3 => SNOW_CHARS[1],
                s if s < 0.6 => SNOW_CHARS[2],
                _ => SNOW_CHARS[3],
            };
            let fg = blend(self.pixels[i].bg, fog(color, p.depth), opacity);
            self.plot(col, row, p.depth, ch, fg);
        }
    }

    fn draw_cone(
        &mut self,
        camera: &Camera,
        center: Vec3,
        radius: f32,
        height: f32,
        color: Rgb,
        leafy: bool,
    ) {
        let area = self.area();
        let half = Vec3::new(0.0, height / 2.0, 0.0);
        let (Some(apex), Some(base)) = (
            camera.project(center + half, area),
            camera.project(center - half, area),
        ) else {
            return;
        };
        let span = base.row - apex.row;
        if span <= 0.0 {
            return;
        }
        let base_half_cols = radius * base.rows_per_unit * camera.cell_aspect;

        let first = apex.row.floor().max(0.0) as i32;
        let last = base.row.floor().min(self.height as f32) as i32;
        for row in first..=last {
            let t = ((row as f32 + 0.5 - apex.row) / span).clamp(0.0, 1.0);
            let half_cols = t * base_half_cols;
            let left = (base.col - half_cols).round() as i32;
            let right = (base.col + half_cols).round() as i32;
            for col in left..=right {
                let centrality = 1.0 - ((col as f32 - base.col).abs() / half_cols.max(0.5)).min(1.0);
                let fg = color.scale(1.0 + 0.8 * centrality);
                let ch = if !leafy {
                    TRUNK_CHAR
                } else if col == left && left != right {
                    FOLIAGE_LEFT
                } else if col == right && left != right {
                    FOLIAGE_RIGHT
                } else {
                    FOLIAGE_FILL
                };
                self.plot(col, row, base.depth, ch, fg);
            }
        }
    }

    fn draw_orb(&mut self, camera: &Camera, center: Vec3, radius: f32, color: Rgb, glyph: char) {
        let Some(p) = camera.project(center, self.area()) else {
            return;
        };
        let depth = p.depth - radius;
        let r_rows = radius * p.rows_per_unit;
        if r_rows < 0.75 {
            self.plot(p.col.floor() as i32, p.row.floor() as i32, depth, glyph, color);
            return;
        }

        let r_cols = r_rows * camera.cell_aspect;
        let rows = (p.row - r_rows).floor() as i32..=(p.row + r_rows).ceil() as i32;
        for row in rows {
            for col in (p.col - r_cols).floor() as i32..=(p.col + r_cols).ceil() as i32 {
                let dx = (col as f32 + 0.5 - p.col) / r_cols;
                let dy = (row as f32 + 0.5 - p.row) / r_rows;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= 1.0 {
                    self.plot(col, row, depth, glyph, color.scale(1.2 - 0.5 * d));
                }
            }
        }
    }

    fn draw_shape(
        &mut self,
        camera: &Camera,
        geometry: Geometry,
        transform: &Transform,
        material: &Material,
    ) {
        let scale = transform.scale.x;
        if material.opacity < 0.01 || scale < 0.01 {
            return;
        }
        let Some(p) = camera.project(transform.position, self.area()) else {
            return;
        };
        let depth = p.depth - SHAPE_RADIUS * scale;
        let r_rows = SHAPE_RADIUS * scale * p.rows_per_unit;
        if r_rows < 0.5 {
            let fg = shade(material.color, material.emissive_intensity, 1.0);
            self.plot(p.col.floor() as i32, p.row.floor() as i32, depth, SHADE_CHARS[3], fg);
            return;
        }

        let (sides, offset) = outline(geometry);
        let glows = material.emissive_intensity > 1.0;
        let extent = if glows { HALO_EXTENT } else { 1.0 };
        let r_cols = r_rows * camera.cell_aspect;
        let (sin_z, cos_z) = (-transform.rotation.z).sin_cos();

        let rows = (p.row - r_rows * extent).floor() as i32..=(p.row + r_rows * extent).ceil() as i32;
        for row in rows {
            let cols =
                (p.col - r_cols * extent).floor() as i32..=(p.col + r_cols * extent).ceil() as i32;
            for col in cols {
                let x = (col as f32 + 0.5 - p.col) / r_cols;
                let y = -(row as f32 + 0.5 - p.row) / r_rows;
                let u = x * cos_z - y * sin_z;
                let v = x * sin_z + y * cos_z;

                match facet(u, v, sides, offset) {
                    Some(normal) => {
                        let core = (u * u + v * v).sqrt() < 0.4;
                        let mut light = 0.55 + 0.45 * (normal + transform.rotation.y).cos();
                        if core {
                            light = light.max(0.85);
                        }
                        let ch = SHADE_CHARS[((light * SHADE_CHARS.len() as f32) as usize)
                            .min(SHADE_CHARS.len() - 1)];
                        let lit = shade(material.color, material.emissive_intensity, light);
                        let Some(i) = self.index(col, row) else {
                            continue;
                        };
                        let alpha = material.opacity * (1.0 - 0.15 * material.transmission);
                        let fg = blend(self.pixels[i].bg, lit, alpha);
                        self.plot(col, row, depth, ch, fg);
                    }
                    None if glows => {
                        let d = (u * u + v * v).sqrt();
                        if d <= HALO_EXTENT {
                            let falloff = 1.0 - (d - 1.0).max(0.0) / (HALO_EXTENT - 1.0);
                            self.tint(col, row, material.emissive, 0.25 * falloff);
                        }
                    }
                    None => {}
                }
            }
        }
    }

    fn draw_vignette(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                let keep = 1.0 - vignette(self.radius_at(col, row));
                let i = row as usize * self.width as usize + col as usize;
                let pixel = &mut self.pixels[i];
                pixel.bg = pixel.bg.scale(keep);
                if let Some(glyph) = &mut pixel.glyph {
                    glyph.fg = glyph.fg.scale(keep);
                }
            }
        }
    }

    fn draw_text(
        &mut self,
        content: &str,
        anchor: Anchor,
        offset: f32,
        style: TextStyle,
        color: Rgb,
        opacity: f32,
    ) {
        if opacity < 0.03 {
            return;
        }
        let width = self.width as usize;
        let fit = |text: String| {
            if text.chars().count() <= width {
                text
            } else {
                content.to_string()
            }
        };
        let (lines, modifier) = match style {
            TextStyle::Banner => match build_banner(content, width) {
                Some(lines) => (lines, Modifier::BOLD),
                None => (vec![fit(letter_spaced(content, 2))], Modifier::BOLD),
            },
            TextStyle::Spaced(gap) => (vec![fit(letter_spaced(content, gap))], Modifier::empty()),
            TextStyle::Italic(gap) => (vec![fit(letter_spaced(content, gap))], Modifier::ITALIC),
        };

        let count = lines.len() as f32;
        let top = match anchor {
            Anchor::Fraction(f) => f * self.height as f32 - count / 2.0,
            Anchor::Bottom(rows) => self.height as f32 - rows as f32 - count,
        } + offset;
        let top = top.round() as i32;

        for (n, line) in lines.iter().enumerate() {
            let row = top + n as i32;
            let len = line.chars().count() as i32;
            let left = (self.width as i32 - len) / 2;
            for (k, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let col = left + k as i32;
                let Some(i) = self.index(col, row) else {
                    continue;
                };
                let pixel = &mut self.pixels[i];
                pixel.depth = f32::NEG_INFINITY;
                pixel.glyph = Some(Glyph {
                    ch,
                    fg: blend(pixel.bg, color, opacity),
                    modifier,
                });
            }
        }
    }

    fn flush(&self, area: Rect, buf: &mut Buffer) {
        for row in 0..self.height {
            for col in 0..self.width {
                let pixel = &self.pixels[row as usize * self.width as usize + col as usize];
                let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) else {
                    continue;
                };
                cell.set_bg(pixel.bg.to_color());
                match pixel.glyph {
                    Some(glyph) => {
                        cell.set_char(glyph.ch)
                            .set_fg(glyph.fg.to_color())
                            .set_style(Style::new().add_modifier(glyph.modifier));
                    }
                    None => {
                        cell.set_char(' ');
                    }
                }
            }
        }
    }
}

/// Polygon used for a geometry's silhouette: side count and the angle of
/// its first vertex.
fn outline(geometry: Geometry) -> (u32, f32) {
    match geometry {
        Geometry::Icosahedron => (6, 0.0),
        Geometry::Cube => (4, FRAC_PI_4),
        Geometry::Tetrahedron => (3, FRAC_PI_2),
        Geometry::Octahedron => (4, 0.0),
        Geometry::Dodecahedron => (5, FRAC_PI_2),
    }
}

/// Angle of the facet normal under `(u, v)` if the point lies inside the
/// regular polygon of circumradius 1.
fn facet(u: f32, v: f32, sides: u32, offset: f32) -> Option<f32> {
    let r = (u * u + v * v).sqrt();
    let sector = TAU / sides as f32;
    if r == 0.0 {
        return Some(offset + sector / 2.0);
    }
    let angle = (v.atan2(u) - offset).rem_euclid(TAU);
    let index = (angle / sector).floor();
    let normal = (index + 0.5) * sector;
    let apothem = (PI / sides as f32).cos();
    if r * (angle - normal).cos() <= apothem {
        Some(normal + offset)
    } else {
        None
    }
}

/// Widget drawing a frame's commands through a camera.
pub struct SceneView<'a> {
    commands: &'a [DrawCommand<'a>],
    camera: &'a Camera,
}

impl<'a> SceneView<'a> {
    pub fn new(commands: &'a [DrawCommand<'a>], camera: &'a Camera) -> Self {
        Self { commands, camera }
    }
}

impl Widget for SceneView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = Canvas::new(area.width, area.height);
        for command in self.commands {
            canvas.draw(command, self.camera);
        }
        canvas.flush(area, buf);
    }
}
