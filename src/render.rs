use std::fmt::Write as _;
use std::path::PathBuf;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use rayon::prelude::*;

use crate::cell::CellState;
use crate::config::PlotParams;
use crate::engine::Renderer;
use crate::grid::Grid;

// Reversed grayscale: live cells dark on a light field
const ALIVE: [u8; 4] = [0, 0, 0, 255];
const DEAD: [u8; 4] = [255, 255, 255, 255];

/// Rasterise the board, each cell a `scale` x `scale` square.
/// Returns RGBA8 of size `(w * scale) x (h * scale)`.
pub fn render_board(board: &Grid<CellState>, scale: u32) -> Vec<u8> {
    let scale = scale.max(1) as usize;
    let pw = board.w * scale;
    let ph = board.h * scale;
    let mut rgba = vec![0u8; pw * ph * 4];
    if pw == 0 || ph == 0 {
        return rgba;
    }

    rgba.par_chunks_mut(pw * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let r = y / scale;
            for x in 0..pw {
                let color = if board.get(r, x / scale).is_alive() { ALIVE } else { DEAD };
                row[x * 4..x * 4 + 4].copy_from_slice(&color);
            }
        });

    rgba
}

/// Pixel dimensions of [`render_board`] output.
pub fn pixel_size(board: &Grid<CellState>, scale: u32) -> (u32, u32) {
    let scale = scale.max(1);
    (board.w as u32 * scale, board.h as u32 * scale)
}

pub fn encode_png(rgba: &[u8], w: u32, h: u32) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(rgba, w, h, image::ExtendedColorType::Rgba8)?;
    Ok(buf)
}

/// Titled text rendering, `#` alive and `.` dead.
pub fn render_text(board: &Grid<CellState>, step: usize) -> String {
    let mut out = String::with_capacity((board.w + 1) * board.h + 16);
    let _ = writeln!(out, "Step {step}");
    for row in board.rows() {
        out.extend(row.iter().map(|c| if c.is_alive() { '#' } else { '.' }));
        out.push('\n');
    }
    out
}

/// Default renderer: prints and/or saves every generation it is handed.
///
/// Save failures are logged and counted; they never stop the simulation.
pub struct Plotter {
    params: PlotParams,
    saved: Vec<PathBuf>,
    failures: usize,
}

impl Plotter {
    pub fn new(params: PlotParams) -> Self {
        Self {
            params,
            saved: Vec::new(),
            failures: 0,
        }
    }

    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn path_for(&self, step: usize) -> PathBuf {
        self.params
            .out_dir
            .join(format!("{}_{}.png", self.params.file_prefix, step))
    }

    fn save(&self, board: &Grid<CellState>, step: usize) -> Result<PathBuf, image::ImageError> {
        let path = self.path_for(step);
        std::fs::create_dir_all(&self.params.out_dir)?;
        let rgba = render_board(board, self.params.scale);
        let (w, h) = pixel_size(board, self.params.scale);
        image::save_buffer(&path, &rgba, w, h, image::ColorType::Rgba8)?;
        Ok(path)
    }
}

impl Renderer for Plotter {
    fn on_generation(&mut self, board: &Grid<CellState>, step: usize) {
        if self.params.save_plots {
            match self.save(board, step) {
                Ok(path) => {
                    log::info!("saved {}", path.display());
                    self.saved.push(path);
                }
                Err(e) => {
                    log::error!("failed to save step {step}: {e}");
                    self.failures += 1;
                }
            }
        }
        if self.params.show_plots {
            print!("{}", render_text(board, step));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glider_corner() -> Grid<CellState> {
        let mut g = Grid::<CellState>::new(3, 2);
        g.set(0, 1, CellState::Alive);
        g.set(1, 2, CellState::Alive);
        g
    }

    #[test]
    fn board_pixels_follow_cells() {
        let board = glider_corner();
        let rgba = render_board(&board, 2);
        assert_eq!(rgba.len(), 6 * 4 * 4);
        let px = |x: usize, y: usize| &rgba[(y * 6 + x) * 4..(y * 6 + x) * 4 + 4];
        assert_eq!(px(0, 0), &DEAD);
        assert_eq!(px(2, 0), &ALIVE);
        assert_eq!(px(3, 1), &ALIVE);
        assert_eq!(px(5, 3), &ALIVE);
        assert_eq!(px(0, 3), &DEAD);
    }

    #[test]
    fn png_decodes_back() {
        let board = glider_corner();
        let (w, h) = pixel_size(&board, 4);
        let png = encode_png(&render_board(&board, 4), w, h).unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (12, 8));
        assert_eq!(img.get_pixel(5, 1).0, ALIVE);
        assert_eq!(img.get_pixel(0, 0).0, DEAD);
    }

    #[test]
    fn text_has_title() {
        assert_eq!(render_text(&glider_corner(), 3), "Step 3\n.#.\n..#\n");
    }

    #[test]
    fn plotter_saves_numbered_files() {
        let out_dir = std::env::temp_dir().join(format!("lifegrid-plot-{}", std::process::id()));
        let mut plotter = Plotter::new(PlotParams {
            out_dir: out_dir.clone(),
            file_prefix: "test".into(),
            scale: 1,
            ..PlotParams::default()
        });

        plotter.on_generation(&glider_corner(), 0);
        plotter.on_generation(&glider_corner(), 1);

        assert_eq!(plotter.failures(), 0);
        assert_eq!(
            plotter.saved(),
            &[out_dir.join("test_0.png"), out_dir.join("test_1.png")]
        );
        let img = image::open(out_dir.join("test_1.png")).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        std::fs::remove_dir_all(&out_dir).unwrap();
    }

    #[test]
    fn plotter_survives_unwritable_dir() {
        let blocker = std::env::temp_dir().join(format!("lifegrid-blocker-{}", std::process::id()));
        std::fs::write(&blocker, b"not a directory").unwrap();
        let mut plotter = Plotter::new(PlotParams {
            out_dir: blocker.join("plots"),
            ..PlotParams::default()
        });

        plotter.on_generation(&glider_corner(), 0);

        assert_eq!(plotter.failures(), 1);
        assert!(plotter.saved().is_empty());
        std::fs::remove_file(&blocker).unwrap();
    }
}
