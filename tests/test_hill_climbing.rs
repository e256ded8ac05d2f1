use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use trajex::{
    error::SearchError,
    neighborhood::{DistanceTwoOpt, RandomStep, TwoOpt},
    problem::{Instance, Problem},
    problems::{DistanceMatrix, Sphere, SphereCost, Tour, TourLength},
    rng::RandomNumberGenerator,
    solution::Solution,
    trajectory::{ClimbMode, HillClimbing, HillClimbingConfig, IterationEvent, TrajectoryHeuristic},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A one-dimensional problem with a negative optimum, for the magnitude-based acceptance rule.
#[derive(Debug)]
struct Shifted;

impl Problem for Shifted {
    type Value = f64;

    fn dimension(&self) -> usize {
        1
    }

    fn value_range(&self, idx: usize) -> trajex::Result<(f64, f64)> {
        if idx > 0 {
            return Err(SearchError::OutOfBounds(format!("index {}", idx)));
        }
        Ok((-10.0, 10.0))
    }

    fn new_random_solution(&self, rng: &mut RandomNumberGenerator) -> Solution<f64> {
        Solution::new(vec![rng.uniform_in(-10.0, 10.0)])
    }

    fn range_solution_values(&self, values: &mut [f64]) {
        for value in values.iter_mut() {
            *value = value.clamp(-10.0, 10.0);
        }
    }
}

fn sphere(seed: u64) -> Instance<Sphere> {
    Instance::new(Sphere::new(10, 50.0).unwrap())
        .unwrap()
        .with_cost_evaluator(SphereCost)
        .with_seed(seed)
}

fn circle_tour(cities: usize, seed: u64) -> (Instance<Tour>, Arc<DistanceMatrix>) {
    let points: Vec<(f64, f64)> = (0..cities)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / cities as f64;
            (10.0 * angle.cos(), 10.0 * angle.sin())
        })
        .collect();
    let distances = Arc::new(DistanceMatrix::from_points(&points));
    let instance = Instance::new(Tour::new(cities).unwrap())
        .unwrap()
        .with_cost_evaluator(TourLength::new(distances.clone(), cities).unwrap())
        .with_seed(seed);
    (instance, distances)
}

#[test]
fn test_sphere_default_improves() {
    init_tracing();
    let config = HillClimbingConfig::builder().max_iterations(5000).build();
    let mut climber = HillClimbing::new(sphere(1), RandomStep::new(2.0).unwrap(), config).unwrap();

    let start = climber.instance_mut().initial_solution().unwrap().clone();
    let start_cost = climber.instance().evaluate(&start).unwrap();
    let result = climber.execute().unwrap();

    assert!(result.cost < start_cost);
    assert_eq!(result.cost, climber.instance().evaluate(&result.solution).unwrap());
    assert_eq!(result.iterations, 5000);
    assert_eq!(result.restarts, 1);
    assert!(result.improving_moves > 0);
}

#[test]
fn test_same_seed_same_result() {
    for mode in [
        ClimbMode::Default,
        ClimbMode::IteratedDefault,
        ClimbMode::Stochastic,
        ClimbMode::IteratedStochastic,
    ] {
        let run = || {
            let config = HillClimbingConfig::new(mode, 300, 3, 25.0);
            let mut climber =
                HillClimbing::new(sphere(77), RandomStep::new(4.0).unwrap(), config).unwrap();
            climber.execute().unwrap()
        };
        assert_eq!(run(), run(), "mode {}", mode);
    }
}

#[test]
fn test_supplied_initial_solution_is_used() {
    let mut instance = sphere(5);
    instance
        .set_initial_solution(Solution::new(vec![1.0; 10]))
        .unwrap();

    let first_costs = Arc::new(AtomicUsize::new(0));
    let counter = first_costs.clone();
    let config = HillClimbingConfig::builder().max_iterations(1).build();
    let mut climber = HillClimbing::new(instance, RandomStep::new(0.5).unwrap(), config)
        .unwrap()
        .with_hook(move |event: &IterationEvent<'_, f64>| {
            // A single step from all-ones changes one coordinate.
            let changed = event.candidate.iter().filter(|v| **v != 1.0).count();
            assert!(changed <= 1);
            counter.fetch_add(1, Ordering::Relaxed);
        });

    let result = climber.execute().unwrap();
    assert_eq!(first_costs.load(Ordering::Relaxed), 1);
    assert!(result.cost <= 10.0);
}

#[test]
fn test_iterated_restarts_from_the_same_start() {
    let config = HillClimbingConfig::builder()
        .mode(ClimbMode::IteratedDefault)
        .max_iterations(200)
        .restarts(5)
        .build();
    let mut climber = HillClimbing::new(sphere(9), RandomStep::new(3.0).unwrap(), config).unwrap();
    let start = climber.instance_mut().initial_solution().unwrap().clone();

    let result = climber.execute().unwrap();
    assert_eq!(result.restarts, 5);
    assert_eq!(result.iterations, 1000);
    // The cached start is never replaced.
    assert_eq!(climber.instance_mut().initial_solution().unwrap(), &start);
}

#[test]
fn test_tour_two_opt_never_increases_length() {
    init_tracing();
    let (instance, distances) = circle_tour(16, 4);
    let mut lengths = Vec::new();
    let config = HillClimbingConfig::builder().max_iterations(4000).build();
    let two_opt = DistanceTwoOpt::new(distances.clone(), 16).unwrap();
    let mut climber = HillClimbing::new(instance, two_opt, config)
        .unwrap()
        .with_hook(|event: &IterationEvent<'_, usize>| lengths.push(event.incumbent_cost));

    let result = climber.execute().unwrap();
    drop(climber);

    for pair in lengths.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9);
    }
    assert!((distances.tour_length(&result.solution) - result.cost).abs() < 1e-9);

    let mut order = result.solution.into_vec();
    order.sort_unstable();
    assert_eq!(order, (0..16).collect::<Vec<_>>());
}

#[test]
fn test_reported_delta_matches_cost_change() {
    let (instance, distances) = circle_tour(9, 12);
    let mut checked = 0;
    let config = HillClimbingConfig::new(ClimbMode::Stochastic, 300, 1, 1e9);
    let two_opt = DistanceTwoOpt::new(distances, 9).unwrap();
    let mut climber = HillClimbing::new(instance, two_opt, config)
        .unwrap()
        .with_hook(|event: &IterationEvent<'_, usize>| {
            assert!(event.cost_delta.is_some());
            checked += 1;
        });
    climber.execute().unwrap();
    drop(climber);
    assert_eq!(checked, 300);
}

#[test]
fn test_undersized_distance_matrix_is_rejected() {
    let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    let distances = Arc::new(DistanceMatrix::from_points(&square));
    let tour = Tour::new(6).unwrap();

    assert!(matches!(
        TourLength::new(distances.clone(), tour.cities()),
        Err(SearchError::Configuration(_))
    ));
    assert!(matches!(
        DistanceTwoOpt::new(distances.clone(), tour.cities()),
        Err(SearchError::Configuration(_))
    ));

    // An evaluator built for the matrix still cannot index past it.
    let instance = Instance::new(tour)
        .unwrap()
        .with_cost_evaluator(TourLength::new(distances, 4).unwrap());
    assert!(matches!(
        instance.evaluate(&[0, 1, 2, 3, 4, 5]),
        Err(SearchError::NonFiniteCost(_))
    ));
}

#[test]
fn test_generic_two_opt_on_tour() {
    let (instance, _) = circle_tour(10, 30);
    let config = HillClimbingConfig::builder()
        .mode(ClimbMode::IteratedStochastic)
        .max_iterations(500)
        .restarts(3)
        .temperature(0.5)
        .build();
    let mut climber = HillClimbing::new(instance, TwoOpt::new(), config).unwrap();
    let result = climber.execute().unwrap();

    let start = climber.instance_mut().initial_solution().unwrap().clone();
    assert!(result.cost <= climber.instance().evaluate(&start).unwrap());
}

#[test]
fn test_stochastic_prefers_larger_magnitudes_when_cold() {
    // With costs equal to the value itself the minimum is -10, but the
    // magnitude rule at a low temperature drifts towards |cost| = 10 on either side.
    let instance = Instance::new(Shifted)
        .unwrap()
        .with_cost_evaluator(|values: &[f64]| values[0])
        .with_seed(3);
    let config = HillClimbingConfig::new(ClimbMode::Stochastic, 3000, 1, 1e-6);
    let mut climber = HillClimbing::new(instance, RandomStep::new(1.0).unwrap(), config).unwrap();

    let result = climber.execute().unwrap();
    assert!(result.cost.abs() > 9.0);
}

#[test]
fn test_cancellation_stops_the_run() {
    let flag = Arc::new(AtomicBool::new(false));
    let trigger = flag.clone();
    let config = HillClimbingConfig::builder().max_iterations(10_000).build();
    let mut climber = HillClimbing::new(sphere(2), RandomStep::new(1.0).unwrap(), config)
        .unwrap()
        .with_hook(move |event: &IterationEvent<'_, f64>| {
            if event.iteration == 99 {
                trigger.store(true, Ordering::Relaxed);
            }
        });

    let result = climber.execute_with_cancel(Some(flag)).unwrap();
    assert!(result.cancelled);
    assert_eq!(result.iterations, 100);
    assert_eq!(result.restarts, 0);
}

#[test]
fn test_parallel_restarts() {
    let build = |seed| {
        let config = HillClimbingConfig::builder()
            .mode(ClimbMode::IteratedStochastic)
            .max_iterations(300)
            .restarts(6)
            .temperature(5.0)
            .build();
        HillClimbing::new(sphere(seed), RandomStep::new(2.0).unwrap(), config).unwrap()
    };

    let mut climber = build(11);
    let start = climber.instance_mut().initial_solution().unwrap().clone();
    let start_cost = climber.instance().evaluate(&start).unwrap();

    let result = climber.execute_parallel().unwrap();
    assert!(result.cost <= start_cost);
    assert_eq!(result, build(11).execute_parallel().unwrap());
}

#[test]
fn test_configuration_errors() {
    let bare = Instance::new(Sphere::default()).unwrap();
    let err = HillClimbing::new(bare, RandomStep::new(1.0).unwrap(), HillClimbingConfig::default())
        .unwrap_err();
    assert!(matches!(err, SearchError::Configuration(_)));

    let cold = HillClimbingConfig::new(ClimbMode::IteratedStochastic, 10, 2, -1.0);
    assert!(HillClimbing::new(sphere(0), RandomStep::new(1.0).unwrap(), cold).is_err());

    assert!("simulated_annealing".parse::<ClimbMode>().is_err());
    assert!(ClimbMode::try_from(9).is_err());
}

#[test]
fn test_non_finite_cost_is_an_error() {
    let instance = Instance::new(Sphere::new(2, 1.0).unwrap())
        .unwrap()
        .with_cost_evaluator(|_: &[f64]| f64::NAN)
        .with_seed(1);
    let mut climber = HillClimbing::new(
        instance,
        RandomStep::new(0.1).unwrap(),
        HillClimbingConfig::default(),
    )
    .unwrap();
    assert!(matches!(climber.execute(), Err(SearchError::NonFiniteCost(_))));
}
