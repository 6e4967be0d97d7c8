//! Geometry for the render collaborator.

use super::TextManager;
use crate::geometry::{GeometryBuilder, Mesh, RenderSink};
use crate::layout::Rect;
use crate::marker::{Position, ordered};
use std::ops::Range;

impl TextManager {
    /// Selection highlight quads for the range between `start` and `end` (either order).
    ///
    /// One quad per visible line touched by the range. A line whose line break is part of the
    /// selection gets `newline_selection_width` extra pixels so selected empty lines show up.
    pub fn build_selection_background_meshes(&self, start: Position, end: Position) -> Mesh {
        let (start, end) = ordered(
            self.lines.clamp_position(start),
            self.lines.clamp_position(end),
        );
        if start == end {
            return Mesh::default();
        }

        let visible = self.visible_lines();
        let lines = start.line.max(visible.start)..(end.line + 1).min(visible.end);
        let measure = self.measure();
        let mut builder = GeometryBuilder::with_capacity(lines.len());

        for index in lines {
            let line = self.lines.line(index);
            let from = if index == start.line { start.column } else { 0 };
            let to = if index == end.line {
                end.column
            } else {
                line.char_count()
            };

            let span = line.measure(from, to, &measure);
            let mut width = span.width;
            if index < end.line {
                width += self.config.newline_selection_width;
            }
            if width <= 0.0 {
                continue;
            }

            let rect = self.line_rect(index);
            builder.push_rect(
                Rect::new(rect.x + span.start_px, rect.y, width, rect.height),
                self.config.selection_colour,
            );
        }

        builder.finish()
    }

    /// Highlight quads for the current selection.
    pub fn selection_mesh(&self) -> Mesh {
        self.build_selection_background_meshes(
            self.selection_start.position(),
            self.selection_end.position(),
        )
    }

    /// One textured quad per visible glyph with ink.
    pub fn build_glyph_meshes(&self) -> Mesh {
        let measure = self.measure();
        let provider = measure.provider();
        let ascent = provider.ascent(self.font);
        let mut builder = GeometryBuilder::new();

        for index in self.visible_lines() {
            let line = self.lines.line(index);
            let rect = self.line_rect(index);
            let baseline = rect.y + ascent;
            let mut pen = 0.0;

            for ch in line.text().chars() {
                if ch == '\t' {
                    pen = measure.next_tab_stop(pen);
                    continue;
                }

                let glyph = provider.glyph_metrics(self.font, ch);
                if glyph.width > 0.0 && glyph.height > 0.0 {
                    builder.push_quad(
                        Rect::new(
                            rect.x + pen + glyph.bearing_x,
                            baseline - glyph.bearing_y,
                            glyph.width,
                            glyph.height,
                        ),
                        glyph.uv,
                        self.config.text_colour,
                    );
                }
                pen += glyph.advance;
            }
        }

        builder.finish()
    }

    /// Caret rectangle in container space.
    pub fn cursor_rect(&self) -> Rect {
        Rect::new(
            self.cursor.x,
            self.cursor.y,
            self.config.caret_width,
            self.metrics.line_height(self.font),
        )
    }

    /// Hand the selection (if any) and glyph geometry to `sink`.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        if self.has_selection() {
            let selection = self.selection_mesh();
            if !selection.is_empty() {
                sink.submit_selection(&selection);
            }
        }
        sink.submit_glyphs(&self.build_glyph_meshes());
    }

    /// Lines intersecting the container.
    pub fn visible_lines(&self) -> Range<usize> {
        self.container.visible_lines(
            self.container.block_origin_y(self.content_size.height),
            self.metrics.line_height(self.font),
            self.lines.len(),
        )
    }
}
