//! The fixed call sequence run by `nativecall run`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DemoConfig;
use crate::exports::MyLib;
use crate::ffi::{c_string, FfiResult};

/// Inputs and results of one demo run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoReport {
    /// `(x, twice_int(x))` pairs
    pub twice_int: Vec<(i32, i32)>,
    /// `(x, twice_float(x))`
    pub twice_float: (f32, f32),
    /// Strings passed to `print_str`
    pub printed: Vec<String>,
    /// Buffer before `test_array`
    pub array_before: Vec<f32>,
    /// Buffer after `test_array`
    pub array_after: Vec<f32>,
}

/// `len` uniform floats in `[0, 1)`.
pub fn sample_array(len: usize, seed: Option<u64>) -> Vec<f32> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    (0..len).map(|_| rng.gen::<f32>()).collect()
}

/// Run every export once, in order, printing results to stdout.
pub fn run(lib: &MyLib<'_>, config: &DemoConfig) -> FfiResult<DemoReport> {
    lib.say_hello();

    let mut twice_int = Vec::with_capacity(config.ints.len());
    for &x in &config.ints {
        let doubled = lib.twice_int(x);
        println!("{}", doubled);
        twice_int.push((x, doubled));
    }

    let doubled = lib.twice_float(config.float);
    println!("{}", doubled);
    let twice_float = (config.float, doubled);

    for text in &config.strings {
        let s = c_string(text.as_bytes())?;
        debug!(bytes = s.as_bytes().len(), "print_str");
        lib.print_str(&s);
    }

    let mut data = sample_array(config.array_len, config.seed);
    let array_before = data.clone();
    lib.test_array(&mut data);

    info!(
        ints = twice_int.len(),
        strings = config.strings.len(),
        array_len = data.len(),
        "demo sequence finished"
    );

    Ok(DemoReport {
        twice_int,
        twice_float,
        printed: config.strings.clone(),
        array_before,
        array_after: data,
    })
}
