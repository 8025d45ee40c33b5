//! [`RenderSurface`] on an `egui::Painter`
//!
//! Geometry is computed in plot-local pixels; the surface shifts everything by
//! the top-left corner of the rect the plot was allocated in.

use super::RenderSurface;
use crate::config::SymbolShape;
use crate::types::{PixelPoint, Rgba};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

/// Font size of axis labels
const LABEL_FONT_SIZE: f32 = 11.0;

pub struct EguiSurface<'a> {
    painter: &'a Painter,
    offset: Vec2,
}

impl<'a> EguiSurface<'a> {
    /// Paint into `painter`, with plot pixel (0, 0) at `origin`
    pub fn new(painter: &'a Painter, origin: Pos2) -> Self {
        Self {
            painter,
            offset: origin.to_vec2(),
        }
    }

    fn pos(&self, p: PixelPoint) -> Pos2 {
        Pos2::new(p.x as f32, p.y as f32) + self.offset
    }
}

fn color(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

impl RenderSurface for EguiSurface<'_> {
    fn polyline(&mut self, points: &[PixelPoint], rgba: Rgba, width: f32) {
        let points: Vec<Pos2> = points.iter().map(|p| self.pos(*p)).collect();
        self.painter
            .add(Shape::line(points, Stroke::new(width, color(rgba))));
    }

    fn segment(&mut self, from: PixelPoint, to: PixelPoint, rgba: Rgba, width: f32) {
        self.painter
            .line_segment([self.pos(from), self.pos(to)], Stroke::new(width, color(rgba)));
    }

    fn marker(&mut self, at: PixelPoint, shape: SymbolShape, size: f32, rgba: Rgba) {
        let center = self.pos(at);
        let half = size / 2.0;
        let fill = color(rgba);
        match shape {
            SymbolShape::Circle => {
                self.painter.circle_filled(center, half, fill);
            }
            SymbolShape::Square => {
                let rect = Rect::from_center_size(center, Vec2::splat(size));
                self.painter.rect_filled(rect, 0.0, fill);
            }
            SymbolShape::Cross => {
                let stroke = Stroke::new(1.0, fill);
                self.painter.line_segment(
                    [center + Vec2::new(-half, -half), center + Vec2::new(half, half)],
                    stroke,
                );
                self.painter.line_segment(
                    [center + Vec2::new(-half, half), center + Vec2::new(half, -half)],
                    stroke,
                );
            }
            SymbolShape::Triangle => {
                let points = vec![
                    center + Vec2::new(0.0, -half),
                    center + Vec2::new(half, half),
                    center + Vec2::new(-half, half),
                ];
                self.painter
                    .add(Shape::convex_polygon(points, fill, Stroke::NONE));
            }
        }
    }

    fn filled_rect(&mut self, min: PixelPoint, max: PixelPoint, rgba: Rgba) {
        let rect = Rect::from_two_pos(self.pos(min), self.pos(max));
        self.painter.rect_filled(rect, 0.0, color(rgba));
    }

    fn text(&mut self, at: PixelPoint, text: &str, rgba: Rgba) {
        self.painter.text(
            self.pos(at),
            Align2::CENTER_TOP,
            text,
            FontId::monospace(LABEL_FONT_SIZE),
            color(rgba),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Context, LayerId, RawInput};

    #[test]
    fn test_shapes_are_offset_and_emitted() {
        let ctx = Context::default();
        let output = ctx.run(RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(LayerId::background());
            let mut surface = EguiSurface::new(&painter, Pos2::new(10.0, 20.0));
            assert_eq!(surface.pos(PixelPoint::new(1.0, 2.0)), Pos2::new(11.0, 22.0));

            surface.polyline(
                &[PixelPoint::new(0.0, 0.0), PixelPoint::new(5.0, 5.0)],
                [255, 0, 0, 255],
                1.0,
            );
            for shape in [
                SymbolShape::Circle,
                SymbolShape::Square,
                SymbolShape::Cross,
                SymbolShape::Triangle,
            ] {
                surface.marker(PixelPoint::new(3.0, 3.0), shape, 4.0, [0, 0, 0, 255]);
            }
            surface.text(PixelPoint::new(0.0, 0.0), "1.00", [0, 0, 0, 255]);
        });
        assert!(!output.shapes.is_empty());
    }
}
