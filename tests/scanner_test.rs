//! Folder scanning and full-run tests

use resume_match::pipeline::{self, RunOptions};
use resume_match::recommender::Recommender;
use resume_match::scanner::{self, ScanOptions};
use resume_match::summary::MatchSummary;
use resume_match_common::{Tier, TierFilter};
use std::fs;
use tempfile::tempdir;

fn resume_folder() -> tempfile::TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("ada.txt"),
        "Ada Lovelace <ada@example.org>\nDjango, OAuth and Selenium test suites",
    )
    .unwrap();
    fs::write(dir.path().join("bo.txt"), "Bo <Bo@Example.org>\nAudio drivers in C").unwrap();
    fs::write(dir.path().join("cy.txt"), "Cy\nSales and marketing").unwrap();
    fs::write(dir.path().join("ada.pdf"), "%PDF-1.4").unwrap();
    fs::create_dir(dir.path().join("late")).unwrap();
    fs::write(dir.path().join("late").join("di.txt"), "Di\nBlock storage in C").unwrap();
    dir
}

#[test]
fn test_read_documents_identifiers() {
    let dir = resume_folder();

    let flat: Vec<String> = scanner::read_documents(dir.path(), &ScanOptions::default())
        .unwrap()
        .into_iter()
        .map(|d| d.unwrap().identifier)
        .collect();
    assert_eq!(flat, vec!["ada.txt", "bo.txt", "cy.txt"]);

    let options = ScanOptions {
        recursive: true,
        ..Default::default()
    };
    let deep: Vec<String> = scanner::read_documents(dir.path(), &options)
        .unwrap()
        .into_iter()
        .map(|d| d.unwrap().identifier)
        .collect();
    assert_eq!(deep.len(), 4);
    assert!(deep.contains(&"late/di.txt".to_string()));
}

#[test]
fn test_lookup_by_contact() {
    let dir = resume_folder();
    let documents: Vec<_> = scanner::read_documents(dir.path(), &ScanOptions::default())
        .unwrap()
        .into_iter()
        .map(|d| d.unwrap())
        .collect();

    let found = scanner::find_by_contact(&documents, "BO@example.org");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].identifier, "bo.txt");
    assert_eq!(found[0].companion_pdf(), "bo.pdf");

    assert!(scanner::find_by_contact(&documents, "nobody@example.org").is_empty());
}

#[test]
fn test_full_run_with_projects_preset() {
    let dir = resume_folder();
    let mut options = RunOptions::default();
    options.preset = "outreachy-2017-projects".to_string();
    options.scan.recursive = true;

    let run = pipeline::run(dir.path(), &options).unwrap();
    let sets = &run.outcome.match_sets;

    assert_eq!(run.documents.len(), 4);
    assert_eq!(sets.tier_of("ada.txt"), Some(Tier::Gold));
    assert_eq!(sets.tier_of("bo.txt"), Some(Tier::Gold));
    assert_eq!(sets.tier_of("cy.txt"), Some(Tier::Unmatched));
    assert_eq!(run.hits.population, 3);
    assert_eq!(run.hits.get("django"), 1);

    let recommendation = Recommender::from_catalog(&run.catalog).recommend(sets, &run.hits);
    let qemu = &recommendation.shortlists["QEMU"].documents;
    assert!(qemu.contains("bo.txt"));
    assert!(qemu.contains("late/di.txt"));
    assert!(recommendation.shortlists["Cadasta"].documents.contains("ada.txt"));
    assert!(!recommendation.combined.contains("cy.txt"));

    let summary = MatchSummary::from_match_sets(&run.catalog, sets);
    assert_eq!(summary.documents, 4);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(summary.gold + summary.silver, 3);
}

#[test]
fn test_full_run_with_catalog_file() {
    let dir = resume_folder();
    let catalog = dir.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"{
            "entries": [
                {"name": "Cadasta", "description": "login options", "required": ["oauth"], "optional": ["django"]},
                {"name": "Sales", "required": ["sales"]}
            ],
            "predicates": [
                {"organization": "Cadasta", "keywords": [{"keyword": "django", "scope": "optional"}]}
            ]
        }"#,
    )
    .unwrap();

    let mut options = RunOptions::default();
    options.catalog = Some(catalog);
    options.tier_filter = TierFilter::GoldOnly;

    let run = pipeline::run(dir.path(), &options).unwrap();
    assert_eq!(run.catalog.len(), 2);
    assert_eq!(run.outcome.match_sets.tier_of("cy.txt"), Some(Tier::Gold));
    assert_eq!(run.outcome.match_sets.tier_of("bo.txt"), Some(Tier::Unmatched));
    assert_eq!(run.hits.population, 2);

    let recommendation = Recommender::from_catalog(&run.catalog)
        .with_tier_filter(TierFilter::GoldOnly)
        .recommend(&run.outcome.match_sets, &run.hits);
    assert_eq!(recommendation.combined.iter().collect::<Vec<_>>(), vec!["ada.txt"]);
}
