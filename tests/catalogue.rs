use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::io::Write;
use tempfile::NamedTempFile;
use tsea::{build_catalogue, dispatcher, load_csv, Config, TseaError};
use tsea_core::{
    Algorithm, AnalysisError, AnalysisOutput, CatalogueError, DispatchRequest, Dispatcher,
    Params, Scope,
};

#[fixture]
fn sequential() -> Config {
    let mut config = Config::default();
    config.comparison.parallel = false;
    config
}

fn write_csv(rows: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,sales,empty").unwrap();
    for i in 0..rows {
        let level = if i < rows / 2 { 10.0 } else { 20.0 };
        writeln!(
            file,
            "{},{},",
            (chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + chrono::Duration::days(i as i64))
                .format("%Y-%m-%d"),
            level + (i % 7) as f64 * 0.01
        )
        .unwrap();
    }
    file
}

/// Parameters with every declared default filled in
fn defaults(dispatcher: &Dispatcher, task: &str, algorithm: &str) -> Params {
    let (_, algorithm) = dispatcher.resolve(task, algorithm).unwrap();
    algorithm
        .descriptor()
        .parameters()
        .iter()
        .filter_map(|p| p.default_value().map(|v| (p.name().to_string(), v)))
        .collect()
}

#[rstest]
fn test_catalogue_layout(sequential: Config) {
    let tasks = build_catalogue(&sequential).unwrap();

    let layout: Vec<(&str, Vec<&str>)> = tasks
        .iter()
        .map(|t| (t.name(), t.algorithms().names()))
        .collect();
    assert_eq!(
        layout,
        vec![
            (
                "forecasting",
                vec![
                    "naive",
                    "seasonal-naive",
                    "historic-average",
                    "drift",
                    "ses",
                    "forecast-comparison"
                ]
            ),
            ("smoothing", vec!["moving-average"]),
            ("change-in-mean", vec!["pelt-l2", "sliding-window-l2"]),
            ("decomposition", vec!["classical-decomposition"]),
            ("pattern-recognition", vec!["mass"]),
        ]
    );
}

#[rstest]
fn test_duplicate_task_is_rejected(sequential: Config) {
    let mut tasks = build_catalogue(&sequential).unwrap();
    let again = analysis_tasks::smoothing::task().unwrap();

    assert_eq!(
        tasks.register(again),
        Err(CatalogueError::DuplicateName {
            scope: Scope::Task,
            name: "smoothing".to_string(),
        })
    );
}

#[rstest]
fn test_every_algorithm_requires_its_parameters(sequential: Config) {
    let dispatcher = dispatcher(&sequential).unwrap();
    let csv = write_csv(40);
    let dataset = load_csv(csv.path()).unwrap();

    for task in dispatcher.tasks() {
        for algorithm in task.algorithms() {
            let request = DispatchRequest::new(task.name(), algorithm.descriptor().name(), "sales");
            match dispatcher.dispatch(&dataset, &request) {
                Err(AnalysisError::MissingParameters { names }) => {
                    assert_eq!(names, algorithm.descriptor().expected_parameters());
                }
                other => panic!("{}: unexpected {:?}", algorithm.descriptor().name(), other),
            }
        }
    }
}

#[rstest]
#[case("clustering", "kmeans", Scope::Task)]
#[case("forecasting", "prophet", Scope::Algorithm)]
fn test_unknown_names(sequential: Config, #[case] task: &str, #[case] algorithm: &str, #[case] scope: Scope) {
    let dispatcher = dispatcher(&sequential).unwrap();
    let dataset = load_csv(write_csv(10).path()).unwrap();
    let request = DispatchRequest::new(task, algorithm, "sales");

    match dispatcher.dispatch(&dataset, &request) {
        Err(AnalysisError::NotFound { scope: found, .. }) => assert_eq!(found, scope),
        other => panic!("unexpected {:?}", other),
    }
}

#[rstest]
fn test_csv_to_change_points(sequential: Config) {
    let dispatcher = dispatcher(&sequential).unwrap();
    let dataset = load_csv(write_csv(60).path()).unwrap();
    assert!(dataset.column("empty").unwrap().iter().all(|v| v.is_nan()));

    let params = defaults(&dispatcher, "change-in-mean", "pelt-l2");
    let request = DispatchRequest::new("change-in-mean", "pelt-l2", "sales").with_params(params);

    match dispatcher.dispatch(&dataset, &request).unwrap() {
        AnalysisOutput::ChangePoints(points) => assert_eq!(points.indices, vec![30]),
        other => panic!("unexpected {:?}", other),
    }
}

#[rstest]
fn test_comparison_through_catalogue(sequential: Config) {
    let dispatcher = dispatcher(&sequential).unwrap();
    let dataset = load_csv(write_csv(80).path()).unwrap();

    let params = defaults(&dispatcher, "forecasting", "forecast-comparison")
        .with("horizon", "7")
        .with("season_length", "7")
        .with("use_historic_average", "false")
        .with("use_drift", "false");
    let request = DispatchRequest::new("forecasting", "forecast-comparison", "sales")
        .with_params(params);

    let shaped = dispatcher.dispatch_shaped(&dataset, &request).unwrap();
    let metrics = shaped["result"]["metrics"].as_array().unwrap();
    let names: Vec<&str> = metrics.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Naive", "SeasonalNaive", "SES"]);
    assert_eq!(shaped["history"]["values"].as_array().unwrap().len(), 80);
}

#[rstest]
#[case("forecasting", "naive", "horizon", "100000000000")]
#[case("smoothing", "moving-average", "window", "1000000000000")]
fn test_oversized_request_parameters_are_rejected(
    sequential: Config,
    #[case] task: &str,
    #[case] algorithm: &str,
    #[case] key: &str,
    #[case] value: &str,
) {
    let dispatcher = dispatcher(&sequential).unwrap();
    let dataset = load_csv(write_csv(30).path()).unwrap();

    let params = defaults(&dispatcher, task, algorithm).with(key, value);
    let request = DispatchRequest::new(task, algorithm, "sales").with_params(params);

    match dispatcher.dispatch(&dataset, &request) {
        Err(AnalysisError::AlgorithmExecutionFailed(message)) => {
            assert!(message.contains(key), "{}", message)
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_config_file_keeps_unset_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"comparison": {{"threads": 2}}}}"#).unwrap();

    let config = Config::from_json_file(file.path()).unwrap();
    assert_eq!(config.log_level, "info");
    assert!(config.comparison.parallel);
    assert_eq!(config.comparison.threads, Some(2));
    assert!(build_catalogue(&config).is_ok());
}

#[test]
fn test_missing_config_file() {
    assert!(matches!(
        Config::from_json_file("/nonexistent/tsea.json"),
        Err(TseaError::IoError(_))
    ));
}
