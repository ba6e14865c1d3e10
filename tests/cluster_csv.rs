use std::io::Write;

use keycollide::config::subsystems::{FingerprintConfig, ProcessorConfig};
use keycollide::{
    Cluster, ColumnSource, CsvColumnSource, Error, KeyCollideConfig, KeyCollision,
    NGramKeyBuilder, StandardNormalizer,
};
use tempfile::NamedTempFile;

fn people_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let mut content = String::from("name,city\n");
    for _ in 0..5 {
        content.push_str("Ann,New York\n");
    }
    for _ in 0..3 {
        content.push_str("Bob,new york\n");
    }
    for _ in 0..2 {
        content.push_str("Cid,\"YORK, NEW\"\n");
    }
    content.push_str("Dee,Zürich\n");
    content.push_str("Eve,zurich\n");
    content.push_str("Fay,Boston\n");
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn fingerprint_clusters_csv_column() {
    let file = people_csv();
    let source = CsvColumnSource::new(file.path());
    let collision = KeyCollision::sequential(StandardNormalizer::new_with_defaults());

    let results = collision
        .fingerprint_columns(&source, &["city"], FingerprintConfig::default())
        .unwrap();
    let clusters = &results[0].1;

    assert_eq!(clusters[0], Cluster {
        value: "New York".to_string(),
        count: 10,
        key: "newyork".to_string(),
    });
    assert_eq!(clusters[1], Cluster {
        value: "Zürich".to_string(),
        count: 2,
        key: "zurich".to_string(),
    });
    assert_eq!(clusters[2].key, "boston");
    assert_eq!(clusters.len(), 3);
}

#[test]
fn total_count_matches_row_count() {
    let file = people_csv();
    let source = CsvColumnSource::new(file.path());
    let collision = KeyCollision::sequential(StandardNormalizer::new_with_defaults());
    let builder = NGramKeyBuilder::new(2).unwrap();

    let clusters = collision.cluster_column(&source, "city", &builder).unwrap();
    let rows: u64 = source.value_counts("city").unwrap().iter().map(|vc| vc.count).sum();
    assert_eq!(rows, 13);
    assert_eq!(clusters.iter().map(|c| c.count).sum::<u64>(), rows);
}

#[test]
fn parallel_run_from_config_matches_sequential() {
    let file = people_csv();
    let ini = format!(
        "[input]\npath = \"{}\"\ncolumns = city, name\n\n[processor]\nuse_parallel = true\nthread_count = 2\nparallel_threshold = 0\n",
        file.path().display()
    );
    let config = KeyCollideConfig::from_ini_str(&ini).unwrap();
    let source = CsvColumnSource::from_config(&config.input).unwrap();

    let parallel = KeyCollision::new(
        StandardNormalizer::new(config.normalizer.clone()),
        config.processor.clone(),
    ).unwrap();
    let sequential = KeyCollision::new(
        StandardNormalizer::new_with_defaults(),
        ProcessorConfig { use_parallel: false, ..ProcessorConfig::default() },
    ).unwrap();

    let columns = &config.input.columns;
    assert_eq!(
        parallel.fingerprint_columns(&source, columns, config.fingerprint).unwrap(),
        sequential.fingerprint_columns(&source, columns, config.fingerprint).unwrap()
    );
}

#[test]
fn unknown_column_and_bad_ngram_size_fail() {
    let file = people_csv();
    let source = CsvColumnSource::new(file.path());
    let collision = KeyCollision::sequential(StandardNormalizer::new_with_defaults());

    let err = collision
        .fingerprint_columns(&source, &["zip"], FingerprintConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let values = source.value_counts("city").unwrap();
    assert!(matches!(collision.ngram_fingerprint(&values, 0), Err(Error::InvalidArgument(_))));
}
