use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::sync::{Arc, Mutex};
use tsea_core::{
    Algorithm, AlgorithmDescriptor, AnalysisError, AnalysisOutput, ChangePoints, Dataset,
    DispatchRequest, Dispatcher, ErrorClass, HistoryShaper, ParameterSpec, Params, Result, Scope,
    Task, TaskRegistry,
};

/// Records the parameters it was called with and reports no change points
struct Recorder {
    descriptor: AlgorithmDescriptor,
    seen: Arc<Mutex<Vec<Params>>>,
}

impl Algorithm for Recorder {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    fn compute(&self, dataset: &Dataset, column: &str, params: &Params) -> Result<AnalysisOutput> {
        self.seen.lock().unwrap().push(params.clone());
        dataset.column(column)?;
        Ok(AnalysisOutput::ChangePoints(ChangePoints {
            indices: vec![],
            timestamps: vec![],
        }))
    }
}

struct Panicking(AlgorithmDescriptor);

impl Algorithm for Panicking {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.0
    }

    fn compute(&self, _: &Dataset, _: &str, _: &Params) -> Result<AnalysisOutput> {
        let empty: Vec<f64> = Vec::new();
        Err(AnalysisError::execution(empty[3]))
    }
}

struct Failing(AlgorithmDescriptor);

impl Algorithm for Failing {
    fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.0
    }

    fn compute(&self, _: &Dataset, _: &str, params: &Params) -> Result<AnalysisOutput> {
        params.get_usize("window")?;
        Err(AnalysisError::execution("window is too large"))
    }
}

struct Fixture {
    dispatcher: Dispatcher,
    dataset: Dataset,
    seen: Arc<Mutex<Vec<Params>>>,
}

#[fixture]
fn setup() -> Fixture {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mass = AlgorithmDescriptor::builder("mass")
        .parameter(ParameterSpec::number("nb_similar_patterns", 1.0, 25.0, 1.0, 5.0).unwrap())
        .parameter(ParameterSpec::boolean("normalize", true).unwrap())
        .required_extra_param("start")
        .required_extra_param("end")
        .build()
        .unwrap();

    let mut patterns = Task::new("pattern-recognition", "Patterns", "Similar pattern search")
        .unwrap()
        .with_shaper(HistoryShaper);
    patterns
        .register(Recorder {
            descriptor: mass,
            seen: Arc::clone(&seen),
        })
        .unwrap();

    let window = || ParameterSpec::number("window", 1.0, 100.0, 1.0, 5.0).unwrap();
    let mut smoothing = Task::new("smoothing", "Smoothing", "Noise reduction").unwrap();
    smoothing
        .register(Panicking(
            AlgorithmDescriptor::builder("broken").build().unwrap(),
        ))
        .unwrap();
    smoothing
        .register(Failing(
            AlgorithmDescriptor::builder("failing")
                .parameter(window())
                .build()
                .unwrap(),
        ))
        .unwrap();

    let mut tasks = TaskRegistry::new();
    tasks.register(patterns).unwrap();
    tasks.register(smoothing).unwrap();

    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let index = (0..10).map(|i| t0 + Duration::hours(i)).collect();
    let dataset = Dataset::new(index)
        .unwrap()
        .with_column("co", (0..10).map(f64::from).collect())
        .unwrap();

    Fixture {
        dispatcher: Dispatcher::new(Arc::new(tasks)),
        dataset,
        seen,
    }
}

fn mass_request() -> DispatchRequest {
    DispatchRequest::new("pattern-recognition", "mass", "co")
        .param("nb_similar_patterns", "3")
        .param("normalize", "true")
        .param("start", "2024-01-01 02:00:00")
        .param("end", "2024-01-01 04:00:00")
}

#[rstest]
fn test_valid_request_runs(setup: Fixture) {
    let output = setup.dispatcher.dispatch(&setup.dataset, &mass_request()).unwrap();
    assert!(matches!(output, AnalysisOutput::ChangePoints(_)));
    assert_eq!(setup.seen.lock().unwrap().len(), 1);
}

#[rstest]
fn test_unknown_task(setup: Fixture) {
    let request = DispatchRequest::new("outliers", "mass", "co");
    let err = setup.dispatcher.dispatch(&setup.dataset, &request).unwrap_err();

    assert_eq!(
        err,
        AnalysisError::NotFound {
            scope: Scope::Task,
            name: "outliers".to_string()
        }
    );
    assert_eq!(err.class(), ErrorClass::NotFound);
}

#[rstest]
fn test_unknown_algorithm(setup: Fixture) {
    let request = DispatchRequest::new("smoothing", "mass", "co");
    let err = setup.dispatcher.dispatch(&setup.dataset, &request).unwrap_err();

    assert_eq!(
        err,
        AnalysisError::NotFound {
            scope: Scope::Algorithm,
            name: "mass".to_string()
        }
    );
}

#[rstest]
fn test_all_missing_parameters_reported_together(setup: Fixture) {
    let request = DispatchRequest::new("pattern-recognition", "mass", "co").param("normalize", "true");
    let err = setup.dispatcher.dispatch(&setup.dataset, &request).unwrap_err();

    assert_eq!(
        err,
        AnalysisError::MissingParameters {
            names: vec![
                "nb_similar_patterns".to_string(),
                "start".to_string(),
                "end".to_string()
            ]
        }
    );
    assert_eq!(err.class(), ErrorClass::BadRequest);
    assert!(setup.seen.lock().unwrap().is_empty());
}

#[rstest]
fn test_missing_parameters_checked_before_column(setup: Fixture) {
    let request = DispatchRequest::new("pattern-recognition", "mass", "o3");
    let err = setup.dispatcher.dispatch(&setup.dataset, &request).unwrap_err();
    assert!(matches!(err, AnalysisError::MissingParameters { .. }));
}

#[rstest]
fn test_unknown_column(setup: Fixture) {
    let mut request = mass_request();
    request.column = "o3".to_string();
    let err = setup.dispatcher.dispatch(&setup.dataset, &request).unwrap_err();

    assert_eq!(err, AnalysisError::UnknownColumn("o3".to_string()));
    assert!(setup.seen.lock().unwrap().is_empty());
}

#[rstest]
fn test_transport_keys_are_stripped(setup: Fixture) {
    let request = mass_request().param("feature", "co").param("colour", "red");
    setup.dispatcher.dispatch(&setup.dataset, &request).unwrap();

    let seen = setup.seen.lock().unwrap();
    assert!(!seen[0].contains("feature"));
    assert_eq!(seen[0].get_raw("colour"), Some("red"));
    assert_eq!(seen[0].len(), 5);
}

#[rstest]
fn test_panics_become_execution_failures(setup: Fixture) {
    let request = DispatchRequest::new("smoothing", "broken", "co");
    let err = setup.dispatcher.dispatch(&setup.dataset, &request).unwrap_err();
    assert!(matches!(err, AnalysisError::AlgorithmExecutionFailed(_)));
}

#[rstest]
#[case("5", "window is too large")]
#[case("five", "\"window\"")]
fn test_algorithm_errors_surface(setup: Fixture, #[case] window: &str, #[case] fragment: &str) {
    let request = DispatchRequest::new("smoothing", "failing", "co").param("window", window);
    let err = setup.dispatcher.dispatch(&setup.dataset, &request).unwrap_err();

    assert!(matches!(err, AnalysisError::AlgorithmExecutionFailed(_)));
    assert!(err.to_string().contains(fragment), "{}", err);
}

#[rstest]
fn test_expected_parameters_echo(setup: Fixture) {
    assert_eq!(
        setup
            .dispatcher
            .expected_parameters("pattern-recognition", "mass")
            .unwrap(),
        vec!["nb_similar_patterns", "normalize", "start", "end"]
    );
    assert!(setup.dispatcher.expected_parameters("smoothing", "mass").is_err());
}

#[rstest]
fn test_catalogue_listing(setup: Fixture) {
    let catalogue = setup.dispatcher.catalogue();
    let tasks: Vec<&str> = catalogue.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tasks, vec!["pattern-recognition", "smoothing"]);

    let json = serde_json::to_value(&catalogue).unwrap();
    assert_eq!(json[0]["algorithms"][0]["name"], "mass");
    assert_eq!(json[0]["algorithms"][0]["expected_parameters"][3], "end");
    assert_eq!(json[1]["algorithms"][1]["parameters"][0]["type"], "number");
}

#[rstest]
fn test_dispatch_shaped_uses_task_shaper(setup: Fixture) {
    let shaped = setup
        .dispatcher
        .dispatch_shaped(&setup.dataset, &mass_request())
        .unwrap();

    assert_eq!(shaped["task"], "pattern-recognition");
    assert_eq!(shaped["history"]["values"][9], 9.0);
    assert_eq!(shaped["result"]["kind"], "change_points");
}

#[test]
fn test_dispatcher_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dispatcher>();
}
