use phasesym::{
    FilterConfig, GridDescriptor, PhaseSymmetryEngine, PhaseSymmetryParams, Polarity, ScalarImage,
    SinusoidSource,
};

fn grid_64() -> GridDescriptor {
    GridDescriptor::isotropic(&[64, 64]).unwrap()
}

fn quiet_params(dimension: usize) -> PhaseSymmetryParams {
    PhaseSymmetryParams {
        noise_threshold: 0.0,
        ..PhaseSymmetryParams::defaults(dimension)
    }
}

fn bright_square(grid: GridDescriptor) -> ScalarImage {
    ScalarImage::from_fn(grid, |index| {
        if (31..33).contains(&index[0]) && (31..33).contains(&index[1]) {
            1.0
        } else {
            0.0
        }
    })
}

#[test]
fn bright_square_is_a_local_maximum_at_its_center() {
    let mut engine = PhaseSymmetryEngine::new(grid_64(), quiet_params(2));
    engine.initialize().unwrap();

    let output = engine.compute(&bright_square(grid_64())).unwrap();
    let output = &output;
    let center = (31..33)
        .flat_map(|row| (31..33).map(move |col| output.get(&[row, col])))
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(center > 0.0);

    // Every sample on the ring four pixels out from the square reads below
    // the center response.
    for i in 27..=36usize {
        for &(row, col) in &[(27usize, i), (36, i), (i, 27), (i, 36)] {
            let value = output.get(&[row, col]);
            assert!(value < center, "ring sample ({row}, {col}) = {value}");
        }
    }
}

#[test]
fn zero_input_maps_to_zero_output() {
    // Stock parameters, including the default noise threshold.
    let mut engine = PhaseSymmetryEngine::new(grid_64(), PhaseSymmetryParams::defaults(2));
    engine.initialize().unwrap();

    let output = engine.compute(&ScalarImage::zeros(grid_64())).unwrap();
    assert!(output.data().iter().all(|&v| v == 0.0));
}

#[test]
fn bright_polarity_favors_bright_structures() {
    let image = bright_square(grid_64());

    let mut bright_engine = PhaseSymmetryEngine::new(
        grid_64(),
        PhaseSymmetryParams {
            polarity: Polarity::Bright,
            ..quiet_params(2)
        },
    );
    bright_engine.initialize().unwrap();
    let bright = bright_engine.compute(&image).unwrap();

    let mut dark_engine = PhaseSymmetryEngine::new(
        grid_64(),
        PhaseSymmetryParams {
            polarity: Polarity::Dark,
            ..quiet_params(2)
        },
    );
    dark_engine.initialize().unwrap();
    let dark = dark_engine.compute(&image).unwrap();

    assert!(bright.get(&[31, 31]) > dark.get(&[31, 31]));
}

#[test]
fn dark_polarity_favors_dark_structures() {
    // Inverted pattern: a dark square on a bright background.
    let image = ScalarImage::from_fn(grid_64(), |index| {
        if (31..33).contains(&index[0]) && (31..33).contains(&index[1]) {
            0.0
        } else {
            1.0
        }
    });

    let mut dark_engine = PhaseSymmetryEngine::new(
        grid_64(),
        PhaseSymmetryParams {
            polarity: Polarity::Dark,
            ..quiet_params(2)
        },
    );
    dark_engine.initialize().unwrap();
    let dark = dark_engine.compute(&image).unwrap();

    let mut bright_engine = PhaseSymmetryEngine::new(
        grid_64(),
        PhaseSymmetryParams {
            polarity: Polarity::Bright,
            ..quiet_params(2)
        },
    );
    bright_engine.initialize().unwrap();
    let bright = bright_engine.compute(&image).unwrap();

    assert!(dark.get(&[31, 31]) > bright.get(&[31, 31]));
}

#[test]
fn independent_engines_agree_bit_for_bit() {
    let image = bright_square(grid_64());

    let mut first = PhaseSymmetryEngine::new(grid_64(), quiet_params(2));
    first.initialize().unwrap();
    let mut second = PhaseSymmetryEngine::new(grid_64(), quiet_params(2));
    second.initialize().unwrap();

    let a = first.compute(&image).unwrap();
    let b = second.compute(&image).unwrap();
    assert_eq!(a.data(), b.data());
}

#[test]
fn sinusoid_input_yields_bounded_symmetry() {
    // Wavelength 10 along axis 0, matching the first bank scale.
    let source = SinusoidSource::new(vec![0.1, 0.0], 0.0);
    let image = source.generate(&grid_64()).unwrap();

    let mut engine = PhaseSymmetryEngine::new(grid_64(), quiet_params(2));
    engine.initialize().unwrap();
    let output = engine.compute(&image).unwrap();

    let stats = output.statistics();
    assert!(stats.max > 0.0);
    assert!(output
        .data()
        .iter()
        .all(|&v| v.is_finite() && (0.0..=1.0 + 1e-9).contains(&v)));
}

#[test]
fn toml_configuration_drives_the_engine() {
    let toml = r#"
[filter]
dimension = 2
wavelengths = [10.0, 10.0, 20.0, 20.0]
orientations = [1.0, 0.0, 0.0, 1.0]
sigma = 0.55
cutoff = 0.4
order = 10.0
noise_threshold = 0.0
polarity = 0
"#;
    let config = FilterConfig::from_str(toml).unwrap();
    let params = config.params().unwrap();

    let mut engine = PhaseSymmetryEngine::new(grid_64(), params);
    engine.initialize().unwrap();
    let output = engine.compute(&bright_square(grid_64())).unwrap();
    assert!(output.statistics().max > 0.0);
}

#[test]
fn three_dimensional_inputs_are_supported() {
    let grid = GridDescriptor::isotropic(&[16, 16, 16]).unwrap();
    let mut engine = PhaseSymmetryEngine::new(grid.clone(), quiet_params(3));
    engine.initialize().unwrap();

    let image = ScalarImage::from_fn(grid, |index| {
        if index.iter().all(|&i| (7..9).contains(&i)) {
            1.0
        } else {
            0.0
        }
    });
    let output = engine.compute(&image).unwrap();
    assert!(output.data().iter().all(|&v| v.is_finite() && v >= 0.0));
    assert!(output.statistics().max > 0.0);
}
