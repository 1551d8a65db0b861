//! Shortlist recommender
//!
//! Applies the per-organization predicate table to the matched population.
//! Every organization is evaluated over all entries that share its name, so
//! an organization offering several projects is judged as one.

use resume_match_common::{
    Catalog, Combinator, DocumentMatchSet, KeywordHitCount, MatchSets, Predicate, PredicateKeyword, TierFilter,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Shortlist for one organization, with the counts behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationShortlist {
    pub organization: String,
    pub combinator: Combinator,
    /// (document, entry) pairs that matched this organization at all
    pub candidate_pairs: usize,
    /// Documents hitting each predicate keyword
    pub keyword_counts: BTreeMap<String, usize>,
    pub documents: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub shortlists: BTreeMap<String, OrganizationShortlist>,
    /// Union of every shortlist; a document appears once
    pub combined: BTreeSet<String>,
    /// Documents in the population the predicates were applied to
    pub total_matched: usize,
}

pub struct Recommender {
    predicates: Vec<Predicate>,
    tier_filter: TierFilter,
}

impl Recommender {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self {
            predicates,
            tier_filter: TierFilter::GoldAndSilver,
        }
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.predicates.clone())
    }

    pub fn with_tier_filter(mut self, tier_filter: TierFilter) -> Self {
        self.tier_filter = tier_filter;
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Documents the organization's predicate admits.
    ///
    /// An organization with no predicate, or with no matching entries in
    /// the catalog, gets an empty set.
    pub fn filter(&self, organization: &str, match_sets: &MatchSets, hitcount: &KeywordHitCount) -> BTreeSet<String> {
        self.predicates
            .iter()
            .find(|p| p.organization == organization)
            .map(|p| self.shortlist(p, match_sets, hitcount).documents)
            .unwrap_or_default()
    }

    /// Evaluates one predicate over the population.
    pub fn shortlist(
        &self,
        predicate: &Predicate,
        match_sets: &MatchSets,
        hitcount: &KeywordHitCount,
    ) -> OrganizationShortlist {
        let organization = predicate.organization.as_str();
        let population: Vec<&DocumentMatchSet> = match_sets.in_tier(self.tier_filter).collect();

        let candidate_pairs: usize = population
            .iter()
            .map(|set| set.records_for(organization).count())
            .sum();

        let mut keyword_counts = BTreeMap::new();
        let mut per_keyword: Vec<BTreeSet<String>> = Vec::with_capacity(predicate.keywords.len());
        for keyword in &predicate.keywords {
            let documents = documents_hitting(&population, organization, keyword);
            debug!(
                organization,
                keyword = %keyword.keyword,
                documents = documents.len(),
                overall = hitcount.get(&keyword.keyword),
                "predicate keyword"
            );
            keyword_counts.insert(keyword.keyword.clone(), documents.len());
            per_keyword.push(documents);
        }

        let documents = match predicate.combinator {
            Combinator::Union => per_keyword.into_iter().flatten().collect(),
            Combinator::Intersection => {
                let mut sets = per_keyword.into_iter();
                let first = sets.next().unwrap_or_default();
                sets.fold(first, |narrowed, next| narrowed.intersection(&next).cloned().collect())
            }
        };

        debug!(organization, candidate_pairs, shortlisted = documents.len(), "shortlist built");

        OrganizationShortlist {
            organization: organization.to_string(),
            combinator: predicate.combinator,
            candidate_pairs,
            keyword_counts,
            documents,
        }
    }

    /// Shortlists for every organization in the predicate table.
    pub fn recommend(&self, match_sets: &MatchSets, hitcount: &KeywordHitCount) -> Recommendation {
        self.recommend_selected(self.predicates.iter(), match_sets, hitcount)
    }

    /// Shortlists for the named organizations only.
    pub fn recommend_for(
        &self,
        organizations: &[String],
        match_sets: &MatchSets,
        hitcount: &KeywordHitCount,
    ) -> Recommendation {
        let selected = self
            .predicates
            .iter()
            .filter(|p| organizations.iter().any(|o| o.eq_ignore_ascii_case(&p.organization)));
        self.recommend_selected(selected, match_sets, hitcount)
    }

    fn recommend_selected<'a>(
        &self,
        predicates: impl Iterator<Item = &'a Predicate>,
        match_sets: &MatchSets,
        hitcount: &KeywordHitCount,
    ) -> Recommendation {
        let mut recommendation = Recommendation {
            total_matched: match_sets.in_tier(self.tier_filter).count(),
            ..Default::default()
        };

        for predicate in predicates {
            let shortlist = self.shortlist(predicate, match_sets, hitcount);
            recommendation.combined.extend(shortlist.documents.iter().cloned());
            recommendation
                .shortlists
                .insert(predicate.organization.clone(), shortlist);
        }

        recommendation
    }
}

/// Documents with at least one record of `organization` carrying `keyword`.
fn documents_hitting(
    population: &[&DocumentMatchSet],
    organization: &str,
    keyword: &PredicateKeyword,
) -> BTreeSet<String> {
    population
        .iter()
        .filter(|set| set.records_for(organization).any(|r| keyword.hit_by(r)))
        .map(|set| set.document.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_match_common::{ClassificationMode, MatchRecord};

    fn record(index: usize, name: &str, required: &[&str], optional: &[&str]) -> MatchRecord {
        MatchRecord {
            entry_index: index,
            name: name.to_string(),
            description: String::new(),
            matched_required: required.iter().map(|s| s.to_string()).collect(),
            matched_optional: optional.iter().map(|s| s.to_string()).collect(),
            required_total: 2,
        }
    }

    fn sample() -> MatchSets {
        let mut sets = MatchSets::new(ClassificationMode::BestRecord);
        sets.insert(DocumentMatchSet::new("a.txt", vec![record(0, "Linux kernel", &["linux", "operating systems"], &[])]));
        sets.insert(DocumentMatchSet::new("b.txt", vec![record(0, "Linux kernel", &["linux"], &["memory"])]));
        sets.insert(DocumentMatchSet::new("c.txt", vec![record(1, "Lagome", &[], &["scala"])]));
        sets
    }

    #[test]
    fn test_intersection_narrows() {
        let recommender = Recommender::new(vec![Predicate::intersection(
            "Linux kernel",
            vec![PredicateKeyword::required("linux"), PredicateKeyword::required("operating systems")],
        )]);
        let sets = sample();
        let docs = recommender.filter("Linux kernel", &sets, &KeywordHitCount::default());
        assert_eq!(docs.into_iter().collect::<Vec<_>>(), vec!["a.txt"]);
    }

    #[test]
    fn test_union_with_scope() {
        let recommender = Recommender::new(vec![Predicate::union(
            "Lagome",
            vec![PredicateKeyword::optional("scala"), PredicateKeyword::optional("reactive")],
        )]);
        let shortlist = recommender.shortlist(&recommender.predicates()[0].clone(), &sample(), &KeywordHitCount::default());
        assert_eq!(shortlist.documents.len(), 1);
        assert_eq!(shortlist.keyword_counts["scala"], 1);
        assert_eq!(shortlist.keyword_counts["reactive"], 0);
        assert_eq!(shortlist.candidate_pairs, 1);
    }

    #[test]
    fn test_unknown_organization_is_empty() {
        let recommender = Recommender::new(vec![Predicate::union("Mozilla", vec![PredicateKeyword::any("firefox")])]);
        assert!(recommender.filter("Mozilla", &sample(), &KeywordHitCount::default()).is_empty());
        assert!(recommender.filter("Nobody", &sample(), &KeywordHitCount::default()).is_empty());
    }

    #[test]
    fn test_gold_only_population() {
        let recommender = Recommender::new(vec![Predicate::union("Lagome", vec![PredicateKeyword::any("scala")])])
            .with_tier_filter(TierFilter::GoldOnly);
        let recommendation = recommender.recommend(&sample(), &KeywordHitCount::default());
        assert_eq!(recommendation.total_matched, 2);
        assert!(recommendation.combined.is_empty());
    }
}
