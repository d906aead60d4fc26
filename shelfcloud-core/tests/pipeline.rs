use std::fs;

use shelfcloud_core::analyzer::{StopWords, TextNormalizer};
use shelfcloud_core::config;
use shelfcloud_core::dataset::{ColumnNames, Dataset, DatasetSource, Table};
use shelfcloud_core::render::TileCloudRenderer;
use shelfcloud_core::view::{
    ColumnCloud, SubjectCloud, NO_DATA, NO_DATA_FOR_CODE, NO_SUBJECTS_FOR_CODE,
};
use shelfcloud_types::{ColumnSelector, NormalizerVersion};
use tempfile::TempDir;

const CATALOG: &str = "\
Title,LC Classification Code,Subjects,Loans (In House + Not In House)
Symphonies,M,\"Music -- History; Symphonies\",12
Banking Today,HG,Economics; Finance; Banking,3
Opera Guide,M,\"Opera; Music -- History\",12
Untitled,PQ,,4
Piano Works,M,Piano music.,20
";

fn write_catalog(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("physical_usage.csv");
    fs::write(&path, contents).expect("write catalog");
    path
}

#[test]
fn catalog_file_to_rendered_cloud() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_catalog(&dir, CATALOG);

    let stop = StopWords::default();
    let normalizer = TextNormalizer::new(NormalizerVersion::V1, &stop);
    let dataset = Dataset::load(&path, &ColumnNames::default(), &normalizer);

    assert_eq!(dataset.source(), &DatasetSource::File(path.clone()));
    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.codes(), vec!["HG", "M", "PQ"]);

    let view = SubjectCloud::new(&dataset, TileCloudRenderer::default());
    assert_eq!(view.default_selection(), Some("HG"));

    let panel = view.update(Some("M"));
    let image = panel.image().expect("rendered image");
    assert!(image.data_uri().starts_with("data:image/png;base64,"));

    let lines: Vec<String> = panel.top_subjects().iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "piano_music (20 loans)",
            "music___history symphonies (12 loans)",
            "opera music___history (12 loans)",
        ]
    );

    assert_eq!(view.update(None).as_message(), Some(NO_DATA));
    assert_eq!(view.update(Some("QA")).as_message(), Some(NO_DATA_FOR_CODE));
    assert_eq!(view.update(Some("PQ")).as_message(), Some(NO_SUBJECTS_FOR_CODE));
}

#[test]
fn missing_file_uses_full_sample() {
    let dir = TempDir::new().expect("temp dir");
    let stop = StopWords::default();
    let normalizer = TextNormalizer::new(NormalizerVersion::V1, &stop);

    let dataset = Dataset::load(
        &dir.path().join("absent.csv"),
        &ColumnNames::default(),
        &normalizer,
    );

    assert_eq!(dataset.source(), &DatasetSource::Sample);
    assert_eq!(dataset.len(), 100);
    assert_eq!(dataset.subject_text("BJ").split_whitespace().count(), 60);
}

#[test]
fn unreadable_file_uses_compact_sample() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_catalog(&dir, "Code,Subjects\nM,music\n");

    let stop = StopWords::default();
    let normalizer = TextNormalizer::new(NormalizerVersion::V1, &stop);
    let dataset = Dataset::load(&path, &ColumnNames::default(), &normalizer);

    assert_eq!(dataset.source(), &DatasetSource::CompactSample);
    assert_eq!(dataset.len(), 5);

    let top = dataset.top_by_weight("PQ", 10);
    assert_eq!(top[0].subject, "literature french poetry novels drama");
    assert_eq!(top[0].weight, 8);
}

#[test]
fn non_numeric_weight_uses_compact_sample() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_catalog(
        &dir,
        "LC Classification Code,Subjects,Loans (In House + Not In House)\nM,Music,several\n",
    );

    let stop = StopWords::default();
    let normalizer = TextNormalizer::new(NormalizerVersion::V1, &stop);
    let dataset = Dataset::load(&path, &ColumnNames::default(), &normalizer);
    assert_eq!(dataset.source(), &DatasetSource::CompactSample);
}

#[test]
fn config_file_drives_column_names() {
    let dir = TempDir::new().expect("temp dir");
    let data = dir.path().join("loans.csv");
    fs::write(&data, "Class,Topics,Loans\nM,Music; Jazz,2\nM,Jazz,1\n").expect("write data");

    let cfg_path = dir.path().join("shelfcloud.toml");
    fs::write(
        &cfg_path,
        format!(
            "[data]\npath = {:?}\n\n[data.columns]\ncode = \"Class\"\nsubject = \"Topics\"\nweight = \"Loans\"\n",
            data.display().to_string()
        ),
    )
    .expect("write config");

    let cfg = config::load_from(Some(cfg_path.as_path())).expect("load config");
    let stop = StopWords::default();
    let normalizer = TextNormalizer::new(cfg.data.normalizer, &stop);
    let dataset = Dataset::try_load(&cfg.data.path, &cfg.data.columns, &normalizer)
        .expect("load dataset");

    assert_eq!(dataset.subject_text("M"), "music jazz jazz");
    assert_eq!(dataset.code_options()[0].label, "M (2 items)");
}

#[test]
fn uploaded_table_column_cloud() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("titles.csv");
    fs::write(
        &path,
        "Title,Year\nModern (Art) History,1999\nA  Brief History,2004\n,2010\n",
    )
    .expect("write table");

    let table = Table::from_path(&path).expect("read table");
    let stop = StopWords::empty();
    let normalizer = TextNormalizer::new(NormalizerVersion::V2, &stop);
    assert_eq!(
        table.clean_column(&ColumnSelector::from("Title"), &normalizer).expect("clean"),
        vec!["modern_art_history", "a_brief_history", ""]
    );

    let mut view = ColumnCloud::new(normalizer, TileCloudRenderer::default());
    view.upload(fs::File::open(&path).expect("open table")).expect("upload");

    assert_eq!(view.columns(), ["Title", "Year"]);
    assert_eq!(view.preview(1).len(), 1);
    assert!(view.generate(&ColumnSelector::from(0usize)).image().is_some());
    assert!(view.generate(&ColumnSelector::from("Year")).image().is_some());
}
