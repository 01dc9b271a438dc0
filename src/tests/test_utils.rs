use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "allow_filesystem")]
use crate::datastore::{DataStore, TextDataStore};
use crate::parameters::path_correction::{Parameters, PathLayout};
use crate::path::Path;

#[cfg(feature = "allow_filesystem")]
pub(crate) const TWO_GATES_FILE: &str = "src/tests/data/two_gates.dat";

/// Path of 3 samples, one gate at the origin, tooltip moving along x by 1 per 0.5.
pub(crate) fn three_sample_path() -> Path {
    let rows = vec![
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0],
    ];
    Path::from_rows(&rows, PathLayout::with_gates(1)).expect("valid path")
}

/// Path over half a second, samples a quarter second apart, one gate at the
/// origin and the tooltip moving along x.
pub(crate) fn quarter_second_path() -> Path {
    let rows = vec![
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.25, 0.0, 0.0, 0.0, 0.5, 0.0, 0.0],
        vec![0.5, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    ];
    Path::from_rows(&rows, PathLayout::with_gates(1)).expect("valid path")
}

/// Parameters for a path of one second with gates oscillating along y.
pub(crate) fn one_second(amplitude: f64, max_acceleration: f64, gates: usize) -> Parameters {
    Parameters {
        total_duration: 1.0,
        gate_frequency: 4.0,
        gate_amplitude: amplitude,
        oscillation_axis: 1,
        max_acceleration,
        layout: PathLayout::with_gates(gates),
    }
}

#[cfg(feature = "allow_filesystem")]
pub(crate) fn load_two_gates() -> Path {
    let data = TextDataStore::default()
        .retrieve(std::path::Path::new(TWO_GATES_FILE))
        .expect("Failed to read sample path");
    Path::new(data, PathLayout::with_gates(2)).expect("Sample path matches layout")
}

/// Random path with normalized, strictly increasing time. Gates are fixed in space
/// and the tooltip wanders between them with random steps.
pub(crate) fn random_path(rng: &mut StdRng, samples: usize, gates: usize) -> Path {
    let layout = PathLayout::with_gates(gates);
    let gate_positions: Vec<[f64; 3]> = (0..gates)
        .map(|_| {
            [
                rng.gen_range(-0.3..0.3),
                rng.gen_range(-0.3..0.3),
                rng.gen_range(0.0..0.2),
            ]
        })
        .collect();

    let mut time = 0.0;
    let mut tooltip = [0.0, 0.0, 0.1];
    let mut rows = Vec::with_capacity(samples);
    for _ in 0..samples {
        let mut row = vec![time];
        for gate in &gate_positions {
            row.extend_from_slice(gate);
        }
        row.extend_from_slice(&tooltip);
        rows.push(row);

        time += rng.gen_range(0.5..1.5);
        for x in tooltip.iter_mut() {
            *x += rng.gen_range(-0.01..0.01);
        }
    }
    let mut path = Path::from_rows(&rows, layout).expect("valid path");
    path.normalize_time().expect("increasing time");
    path
}

pub(crate) fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
