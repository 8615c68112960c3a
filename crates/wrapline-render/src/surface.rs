// crates/wrapline-render/src/surface.rs
use glam::Vec2;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use wrapline_core::TextAlign;

use crate::{align_text_position, justify_gap, PaintSurface, RenderCommand, RenderError, RenderResult};

/// Surface that records draw calls as [`RenderCommand`]s
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl PaintSurface for CommandRecorder {
    fn draw_string(
        &mut self,
        text: &str,
        position: Vec2,
        max_width: f32,
        alignment: TextAlign,
    ) -> RenderResult<()> {
        self.commands.push(RenderCommand::DrawString {
            position,
            text: text.to_string(),
            max_width,
            alignment,
        });
        Ok(())
    }

    fn draw_string_lines(
        &mut self,
        lines: &[String],
        position: Vec2,
        size: Vec2,
        line_advance: f32,
        alignment: TextAlign,
    ) -> RenderResult<()> {
        self.commands.push(RenderCommand::DrawStringLines {
            position,
            size,
            lines: lines.to_vec(),
            line_advance,
            alignment,
        });
        Ok(())
    }
}

// Right half of a double-width character
const CONTINUATION: char = '\0';

/// Character-grid surface, one `cell` per display column and row.
///
/// Anything drawn outside the grid is clipped.
#[derive(Debug, Clone)]
pub struct GridSurface {
    columns: usize,
    cells: Vec<Vec<char>>,
    cell: Vec2,
}

impl GridSurface {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            cells: vec![vec![' '; columns]; rows],
            cell: Vec2::ONE,
        }
    }

    /// Size of one grid cell in layout units.
    pub fn with_cell_size(mut self, cell: Vec2) -> Self {
        self.cell = cell;
        self
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Grid contents, one string per row with trailing blanks removed.
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                let line: String = row.iter().filter(|&&c| c != CONTINUATION).collect();
                line.trim_end().to_string()
            })
            .collect()
    }

    fn cell_origin(&self, position: Vec2) -> RenderResult<(isize, isize)> {
        if self.cell.x <= 0.0 || self.cell.y <= 0.0 {
            return Err(RenderError::UnsupportedOperation(format!(
                "grid cell size must be positive, got {:?}",
                self.cell
            )));
        }
        let column = (position.x / self.cell.x).round() as isize;
        let row = (position.y / self.cell.y).round() as isize;
        Ok((column, row))
    }

    fn put_str(&mut self, text: &str, column: isize, row: isize) -> isize {
        let mut column = column;
        let Some(cells) = usize::try_from(row).ok().and_then(|r| self.cells.get_mut(r)) else {
            return column + text.width() as isize;
        };

        for c in text.chars() {
            let width = c.width().unwrap_or(0) as isize;
            if width == 0 {
                continue;
            }
            for offset in 0..width {
                let Ok(index) = usize::try_from(column + offset) else {
                    continue;
                };
                if let Some(slot) = cells.get_mut(index) {
                    *slot = if offset == 0 { c } else { CONTINUATION };
                }
            }
            column += width;
        }
        column
    }

    fn draw_justified(&mut self, line: &str, position: Vec2, max_width: f32) -> RenderResult<()> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let text_width = words.iter().map(|w| w.width()).sum::<usize>() as f32 * self.cell.x;
        let natural_gap = self.cell.x;
        let gaps = words.len().saturating_sub(1);
        let extra = justify_gap(text_width + gaps as f32 * natural_gap, max_width, gaps);

        let mut x = position.x;
        for word in words {
            let (column, row) = self.cell_origin(Vec2::new(x, position.y))?;
            self.put_str(word, column, row);
            x += word.width() as f32 * self.cell.x + natural_gap + extra;
        }
        Ok(())
    }
}

impl PaintSurface for GridSurface {
    fn draw_string(
        &mut self,
        text: &str,
        position: Vec2,
        max_width: f32,
        alignment: TextAlign,
    ) -> RenderResult<()> {
        let text_width = text.width() as f32 * self.cell.x;
        let x = position.x + align_text_position(text_width, max_width, alignment);
        let (column, row) = self.cell_origin(Vec2::new(x, position.y))?;
        self.put_str(text, column, row);
        Ok(())
    }

    /// Justified lines are spread to the full width, except the last one.
    fn draw_string_lines(
        &mut self,
        lines: &[String],
        position: Vec2,
        size: Vec2,
        line_advance: f32,
        alignment: TextAlign,
    ) -> RenderResult<()> {
        for (i, line) in lines.iter().enumerate() {
            let origin = position + Vec2::new(0.0, i as f32 * line_advance);
            if alignment == TextAlign::Justify && i + 1 < lines.len() {
                self.draw_justified(line, origin, size.x)?;
            } else {
                self.draw_string(line, origin, size.x, alignment)?;
            }
        }
        Ok(())
    }
}
