use population_import::adapters::archive::{ARCHIVE_NAME, VALUES_FILE};
use population_import::adapters::NoopProgress;
use population_import::{
    CsvPopulationParser, ImportError, ImportOptions, ImportOrchestrator, IndividualTemplate,
    MergeOrder, PopulationArchive,
};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const TEMPLATE: &str = r#"{
    "name": "Adult",
    "parameters": [
        { "path": "Organism|Age", "value": 30.0 },
        { "path": "Organism|Weight", "value": 73.0 },
        { "path": "Organism|BMI", "changed_by_create_individual": true }
    ]
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn csv_orchestrator() -> ImportOrchestrator<CsvPopulationParser> {
    ImportOrchestrator::new(
        Arc::new(CsvPopulationParser::new()),
        Arc::new(NoopProgress),
        ImportOptions {
            merge_order: MergeOrder::Submission,
        },
    )
}

#[tokio::test]
async fn test_end_to_end_csv_import_and_archive() {
    let dir = TempDir::new().unwrap();
    let template_path = write(&dir, "adult.json", TEMPLATE);
    let cohort_a = write(
        &dir,
        "cohort_a.csv",
        "# exported cohort\nIndividualId,Organism|Age,Organism|Weight,Organism|Height\n0,25,70,1.8\n1,35,82,1.7\n",
    );
    let cohort_b = write(
        &dir,
        "cohort_b.csv",
        "IndividualId,Organism|Age,Organism|BMI\n0,61,24.5\n",
    );

    let individual = IndividualTemplate::from_file(&template_path).unwrap();
    let population = csv_orchestrator()
        .create_for(&[cohort_a.clone(), cohort_b.clone()], &individual, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(population.number_of_individuals(), 3);
    assert_eq!(
        population.properties().values_for(&"Organism|Age".into()),
        Some(&[25.0, 35.0, 61.0][..])
    );
    assert_eq!(
        population.properties().values_for(&"Organism|Weight".into()),
        Some(&[70.0, 82.0][..])
    );
    assert!(!population.properties().contains(&"Organism|Height".into()));

    assert_eq!(population.files()[0].file_path, cohort_a);
    assert_eq!(
        population.files()[0].warnings,
        vec!["Parameter with path 'Organism|Height' not found in base individual".to_string()]
    );

    let derived: Vec<_> = population
        .advanced_parameters()
        .iter()
        .map(|p| p.parameter_path.as_str())
        .collect();
    assert_eq!(derived, vec!["Organism|Age", "Organism|Weight"]);

    let target = PopulationArchive::new(dir.path().join("out"))
        .write(&population)
        .await
        .unwrap();
    assert!(target.ends_with(ARCHIVE_NAME));

    let bytes = std::fs::read(&target).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let mut values = String::new();
    archive
        .by_name(VALUES_FILE)
        .unwrap()
        .read_to_string(&mut values)
        .unwrap();
    assert!(values.starts_with("parameter_path,value_index,value"));
    assert!(values.contains("Organism|Age,2,61"));
}

#[tokio::test]
async fn test_malformed_csv_aborts_import() {
    let dir = TempDir::new().unwrap();
    let individual = IndividualTemplate::from_json_str(TEMPLATE).unwrap();
    let good = write(&dir, "good.csv", "Organism|Age\n30\n");
    let bad = write(&dir, "bad.csv", "Organism|Age\nthirty\n");

    let result = csv_orchestrator()
        .create_for(&[good, bad.clone()], &individual, &CancellationToken::new())
        .await;

    match result {
        Err(ImportError::FileParse { file, source }) => {
            assert_eq!(file, bad);
            assert!(matches!(*source, ImportError::InvalidValue { .. }));
        }
        other => panic!("expected a parse failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_file_is_a_parse_failure() {
    let dir = TempDir::new().unwrap();
    let individual = IndividualTemplate::from_json_str(TEMPLATE).unwrap();

    let result = csv_orchestrator()
        .create_for(
            &[dir.path().join("missing.csv")],
            &individual,
            &CancellationToken::new(),
        )
        .await;

    assert!(matches!(result, Err(ImportError::FileParse { .. })));
}
