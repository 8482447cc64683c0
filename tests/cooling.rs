use fuzzy_cooling::coverage;
use fuzzy_cooling::{Cooling, CoolingController, CoolingInputs, Recommendation, SystemConfig};

fn inputs(temperature: f64, humidity: f64, occupancy: f64) -> CoolingInputs {
    CoolingInputs {
        temperature,
        humidity,
        occupancy,
    }
}

fn cooling_samples(controller: &CoolingController, term: Cooling) -> Vec<f64> {
    controller
        .engine()
        .variables()
        .variable(controller.cooling().key())
        .and_then(|var| var.term_samples(&term.into()))
        .unwrap()
        .to_vec()
}

#[test]
fn warm_humid_room_needs_high_cooling() {
    let controller = CoolingController::new().unwrap();
    let report = controller.compute(inputs(28., 65., 5.)).unwrap();
    let outputs = controller
        .engine()
        .eval(
            &fuzzy_cooling::Inputs::new()
                .with(controller.temperature(), 28.)
                .with(controller.humidity(), 65.)
                .with(controller.occupancy(), 5.),
        )
        .unwrap();

    // only "hot or humid" fires, at max(0.3, 0.25)
    assert_eq!(outputs.firing_strengths(), &[0., 0., 0., 0.3, 0.]);
    assert!(report.level > 60., "level = {}", report.level);
    assert_eq!(report.recommendation, Recommendation::High);

    let clipped: Vec<f64> = cooling_samples(&controller, Cooling::High)
        .into_iter()
        .map(|m| m.min(0.3))
        .collect();

    assert_eq!(report.cooling_curve, clipped);
}

#[test]
fn cold_dry_empty_room_yields_low_set_centroid() {
    let controller = CoolingController::new().unwrap();
    let report = controller.compute(inputs(15., 30., 0.)).unwrap();

    // centroid of (0, 0, 30) sampled on the unit grid
    assert!((report.level - 29. / 3.).abs() < 1e-9, "level = {}", report.level);
    assert!((report.level - 10.).abs() < 0.5);
    assert_eq!(report.recommendation, Recommendation::Low);
    assert_eq!(report.cooling_curve, cooling_samples(&controller, Cooling::Low));
}

#[test]
fn crowded_room_forces_high_cooling() {
    let controller = CoolingController::new().unwrap();
    let full = controller.compute(inputs(25., 60., 20.)).unwrap();
    let high = cooling_samples(&controller, Cooling::High);

    assert!((full.level - 251. / 3.).abs() < 1e-9, "level = {}", full.level);
    assert_eq!(full.recommendation, Recommendation::High);
    assert_eq!(full.cooling_curve, high);

    let partial = controller.compute(inputs(22., 55., 20.)).unwrap();

    assert!(partial.temperature[&fuzzy_cooling::Temperature::Moderate] > 0.);
    assert!(partial.humidity[&fuzzy_cooling::Humidity::Medium] > 0.);
    assert!((partial.level - full.level).abs() < 1e-9);
    assert!(partial.cooling_curve.iter().zip(&high).all(|(agg, h)| agg >= h));
}

#[test]
fn crowded_room_outweighs_a_competing_low_rule() {
    let controller = CoolingController::new().unwrap();
    let strengths = controller
        .engine()
        .firing_strengths(
            &fuzzy_cooling::Inputs::new()
                .with(controller.temperature(), 19.)
                .with(controller.humidity(), 45.)
                .with(controller.occupancy(), 20.),
        )
        .unwrap();
    let report = controller.compute(inputs(19., 45., 20.)).unwrap();
    let expected: Vec<f64> = cooling_samples(&controller, Cooling::Low)
        .into_iter()
        .zip(cooling_samples(&controller, Cooling::High))
        .map(|(low, high)| f64::max(low.min(0.25), high))
        .collect();

    // "cold or dry" fires at max(0.2, 0.25) next to the occupancy rule
    assert_eq!(strengths, vec![0.25, 0., 0., 0., 1.]);
    assert_eq!(report.cooling_curve, expected);
    assert!(report.level > 60. && report.level < 251. / 3., "level = {}", report.level);
    assert_eq!(report.recommendation, Recommendation::High);
}

#[test]
fn out_of_range_readings_are_clamped() {
    let controller = CoolingController::new().unwrap();
    let clamped = controller.compute(inputs(60., 100., -4.)).unwrap();
    let edge = controller.compute(inputs(35., 80., 0.)).unwrap();

    assert_eq!(clamped.inputs, inputs(35., 80., 0.));
    assert_eq!(clamped.level, edge.level);
}

#[test]
fn non_finite_reading_is_rejected() {
    let controller = CoolingController::new().unwrap();

    assert!(matches!(
        controller.compute(inputs(f64::NAN, 50., 5.)),
        Err(fuzzy_cooling::FuzzyError::NonFiniteInput(name)) if name == "temperature"
    ));
}

#[test]
fn rule_base_covers_every_grid_point() {
    let controller = CoolingController::new().unwrap();
    let report = coverage::check(controller.engine()).unwrap();

    assert_eq!(report.points_checked(), 21 * 51 * 21);
    assert!(report.is_complete(), "uncovered inputs: {:?}", report.gaps());
}

#[test]
fn toml_description_matches_builtin_controller() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/cooling.toml");
    let engine = SystemConfig::load_from_file(path).unwrap().build().unwrap();
    let controller = CoolingController::new().unwrap();

    assert!(coverage::check(&engine).unwrap().is_complete());

    for (t, h, o) in [(28., 65., 5.), (15., 30., 0.), (25., 60., 20.), (21.5, 47., 9.), (33., 52., 11.)] {
        let named = engine
            .evaluate_named([("temperature", t), ("humidity", h), ("occupancy", o)])
            .unwrap();
        let typed = controller.compute(inputs(t, h, o)).unwrap();

        assert!((named["cooling"] - typed.level).abs() < 1e-9, "{t}/{h}/{o}");
    }
}

#[test]
fn shared_engine_evaluates_in_parallel() {
    let controller = CoolingController::new().unwrap();
    let engine = controller.engine();
    let batch: Vec<_> = (0..=20)
        .map(|o| {
            fuzzy_cooling::Inputs::new()
                .with(controller.temperature(), 24.)
                .with(controller.humidity(), 58.)
                .with(controller.occupancy(), o as f64)
        })
        .collect();

    for (inputs, result) in batch.iter().zip(engine.evaluate_batch(&batch)) {
        let parallel = result.unwrap().get_crisp(controller.cooling()).unwrap();
        let sequential = engine.eval(inputs).unwrap().get_crisp(controller.cooling()).unwrap();

        assert_eq!(parallel, sequential);
    }
}
