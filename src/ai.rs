// Probability-based guessing logic for the opponent board.
// Works on the public `TargetView` only and stays no_std.

use alloc::vec;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::TargetView;
use crate::common::{Coord, FireOutcome};
use crate::ship::Orientation;
use crate::strategy::Strategy;

/// Placements covering more unresolved hits get exponentially more weight,
/// so cells next to a confirmed hit stand out.
const HIT_BIAS: f64 = 10.0;

/// Row-major probability matrix over a `rows×cols` board.
#[derive(Debug, Clone, PartialEq)]
pub struct Pdf {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<f64>,
}

impl Pdf {
    pub fn get(&self, (r, c): Coord) -> f64 {
        self.cells[r * self.cols + c]
    }
}

/// Compute a probability density over all unfired cells given the public
/// view of the opponent's board. Each entry sums the relative likelihood of
/// a remaining ship segment occupying that coordinate.
pub fn calc_pdf(view: &TargetView) -> Pdf {
    let (rows, cols) = (view.rows(), view.cols());
    let mut cells = vec![0.0f64; rows * cols];

    for &len in view.remaining_ship_lengths() {
        if len == 0 {
            continue;
        }
        for orient in Orientation::ALL {
            for r in 0..rows {
                for c in 0..cols {
                    // Misses and sunk wrecks block a placement; open hits
                    // make it more likely.
                    let mut valid = true;
                    let mut n_hits = 0i32;
                    for k in 0..len {
                        let Some(coord) = orient.offset((r, c), k) else {
                            valid = false;
                            break;
                        };
                        if !view.in_bounds(coord) || view.is_sunk_cell(coord) {
                            valid = false;
                            break;
                        }
                        if view.is_fired(coord) && !view.is_hit(coord) {
                            valid = false;
                            break;
                        }
                        if view.is_hit(coord) {
                            n_hits += 1;
                        }
                    }
                    if !valid {
                        continue;
                    }

                    let weight = libm::pow(HIT_BIAS, n_hits as f64);
                    for k in 0..len {
                        if let Some(coord) = orient.offset((r, c), k) {
                            if !view.is_fired(coord) {
                                cells[coord.0 * cols + coord.1] += weight;
                            }
                        }
                    }
                }
            }
        }
    }

    normalize(view, Pdf { rows, cols, cells })
}

fn normalize(view: &TargetView, mut pdf: Pdf) -> Pdf {
    let total: f64 = pdf.cells.iter().sum();
    if total == 0.0 {
        // Nothing fits any more; spread evenly over the cells still open.
        let open: Vec<Coord> = view.unfired_cells().collect();
        if !open.is_empty() {
            let uniform = 1.0 / open.len() as f64;
            for (r, c) in open {
                pdf.cells[r * pdf.cols + c] = uniform;
            }
        }
        return pdf;
    }
    for v in pdf.cells.iter_mut() {
        *v /= total;
    }
    pdf
}

/// Sample a coordinate from a probability matrix using a temperature
/// parameter. Returns `None` if every cell has zero probability.
pub fn sample_pdf<R: Rng + ?Sized>(pdf: &Pdf, temperature: f64, rng: &mut R) -> Option<Coord> {
    let adjusted: Vec<f64> = pdf
        .cells
        .iter()
        .map(|&v| if v > 0.0 { libm::pow(v, 1.0 / temperature) } else { 0.0 })
        .collect();
    let total: f64 = adjusted.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_open = None;
    for (idx, &v) in adjusted.iter().enumerate() {
        if v <= 0.0 {
            continue;
        }
        cumulative += v;
        last_open = Some((idx / pdf.cols, idx % pdf.cols));
        if threshold < cumulative {
            return last_open;
        }
    }
    last_open
}

/// Targets the cells most likely to hold a ship, given the remaining fleet.
#[derive(Debug, Clone)]
pub struct DensityStrategy {
    temperature: f64,
}

impl DensityStrategy {
    /// Lower temperature biases sampling towards higher probability cells.
    pub fn new(temperature: f64) -> Self {
        Self { temperature }
    }
}

impl Default for DensityStrategy {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Strategy for DensityStrategy {
    fn name(&self) -> &'static str {
        "density"
    }

    fn choose_shot(&mut self, rng: &mut SmallRng, target: &TargetView) -> Option<Coord> {
        let pdf = calc_pdf(target);
        sample_pdf(&pdf, self.temperature, rng)
    }

    fn handle_shot_result(&mut self, _coord: Coord, _outcome: &FireOutcome) {}
}
