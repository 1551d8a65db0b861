//! Recommender integration tests

use resume_match::aggregator::aggregate;
use resume_match::matcher::Matcher;
use resume_match::recommender::Recommender;
use resume_match::scanner::Document;
use resume_match_common::{Catalog, CatalogEntry, Predicate, PredicateKeyword, TierFilter};

fn qemu_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogEntry::new("QEMU", "rework the audio backend", ["audio"], Vec::<&str>::new()),
        CatalogEntry::new("QEMU", "disk backup tool", ["storage"], Vec::<&str>::new()),
        CatalogEntry::new("GNOME", "maps", ["gtk"], Vec::<&str>::new()),
    ])
    .with_predicates(vec![
        Predicate::union(
            "QEMU",
            vec![PredicateKeyword::required("audio"), PredicateKeyword::required("storage")],
        ),
        Predicate::union("GNOME", vec![PredicateKeyword::required("gtk")]),
        Predicate::union("Mozilla", vec![PredicateKeyword::any("firefox")]),
    ])
}

/// A storage-only resume reaches the QEMU shortlist through the second entry
#[test]
fn test_union_across_shared_name() {
    let catalog = qemu_catalog();
    let docs = vec![
        Document::new("store.txt", "Distributed storage engineer"),
        Document::new("sound.txt", "Audio plugins"),
        Document::new("ui.txt", "GTK widgets and storage"),
    ];
    let outcome = Matcher::new(&catalog).match_documents(&docs);
    let hits = aggregate(&outcome.match_sets, TierFilter::GoldAndSilver);
    let recommender = Recommender::from_catalog(&catalog);

    let qemu = recommender.filter("QEMU", &outcome.match_sets, &hits);
    assert!(qemu.contains("store.txt"));
    assert!(qemu.contains("sound.txt"));
    assert!(qemu.contains("ui.txt"));

    let gnome = recommender.filter("GNOME", &outcome.match_sets, &hits);
    assert_eq!(gnome.len(), 1);
}

#[test]
fn test_combined_is_deduplicated() {
    let catalog = qemu_catalog();
    let docs = vec![
        Document::new("ui.txt", "GTK widgets and storage"),
        Document::new("none.txt", "Marketing"),
    ];
    let outcome = Matcher::new(&catalog).match_documents(&docs);
    let hits = aggregate(&outcome.match_sets, TierFilter::GoldAndSilver);
    let recommendation = Recommender::from_catalog(&catalog).recommend(&outcome.match_sets, &hits);

    assert_eq!(recommendation.shortlists.len(), 3);
    assert_eq!(recommendation.combined.len(), 1);
    assert_eq!(recommendation.total_matched, 1);
    // Predicate for an organization missing from the catalog yields nothing
    assert!(recommendation.shortlists["Mozilla"].documents.is_empty());
}

#[test]
fn test_recommend_for_selected_organizations() {
    let catalog = qemu_catalog();
    let docs = vec![Document::new("ui.txt", "GTK widgets and storage")];
    let outcome = Matcher::new(&catalog).match_documents(&docs);
    let hits = aggregate(&outcome.match_sets, TierFilter::GoldAndSilver);

    let recommendation = Recommender::from_catalog(&catalog).recommend_for(
        &["gnome".to_string()],
        &outcome.match_sets,
        &hits,
    );
    assert_eq!(recommendation.shortlists.keys().collect::<Vec<_>>(), vec!["GNOME"]);

    // The catalog lookups used for CLI warnings follow the same rule
    assert!(catalog.contains_name("gnome"));
    assert!(catalog.predicate_for("gnome").is_some());
}

#[test]
fn test_preset_intersection_predicate() {
    let catalog = Catalog::from_preset("outreachy-2017-orgs").unwrap();
    let docs = vec![
        Document::new("both.txt", "Linux and operating systems research"),
        Document::new("one.txt", "Linux desktop user"),
    ];
    let outcome = Matcher::new(&catalog).match_documents(&docs);
    let hits = aggregate(&outcome.match_sets, TierFilter::GoldAndSilver);

    let shortlist = Recommender::from_catalog(&catalog).filter("Linux kernel", &outcome.match_sets, &hits);
    assert_eq!(shortlist.into_iter().collect::<Vec<_>>(), vec!["both.txt"]);
}
