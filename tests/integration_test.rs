//! Integration tests for opinion-contexts.

#![allow(clippy::expect_used)]

use chrono::NaiveDate;
use opinion_contexts::core::Sentence;
use opinion_contexts::error::{Error, ExtractionError, InputError};
use opinion_contexts::pipeline::{Collaborators, analyze, analyze_document, explore};
use opinion_contexts::search::{RelatedSearch, SearchHit};
use opinion_contexts::segment::{HeuristicSegmenter, Segmenter, UnicodeSegmenter};
use opinion_contexts::select::FixedSelection;
use opinion_contexts::similarity::{GraphConfig, SimilarityGraph, TokenSet, compute_similarity};
use opinion_contexts::source::FileSource;
use opinion_contexts::{Opinion, OpinionExtractor, Result, merge_contexts, merge_sentences};
use std::cell::Cell;
use tempfile::TempDir;

/// Token sets from whitespace-separated words.
fn token_sets(sentences: &[&str]) -> Vec<TokenSet> {
    sentences
        .iter()
        .map(|s| TokenSet::from_tokens(s.split_whitespace()))
        .collect()
}

/// Runs the core on plain sentence strings.
fn contexts_for(sentences: &[&str], threshold: f64) -> Vec<String> {
    let graph = compute_similarity(&token_sets(sentences), threshold).expect("graph");
    merge_contexts(&graph, sentences).expect("merge")
}

mod scenarios {
    use super::*;
    use test_case::test_case;

    #[test]
    fn scenario_a_similar_pair_merges() {
        let sentences = ["the cat sat", "the cat ran", "birds fly south"];
        let graph = compute_similarity(&token_sets(&sentences), 0.3).expect("graph");
        assert_eq!(graph.neighbors(0), &[1]);
        assert!(graph.neighbors(1).is_empty());
        assert!(graph.neighbors(2).is_empty());
        assert_eq!(
            contexts_for(&sentences, 0.3),
            vec!["the cat sat the cat ran", "birds fly south"]
        );
    }

    #[test_case(&["the cat sat", "the cat ran", "birds fly south"] ; "three sentences")]
    #[test_case(&["same words", "same words"] ; "identical sentences")]
    #[test_case(&["a b c", "c d e", "e f g", "g h i"] ; "chain")]
    fn scenario_b_unreachable_threshold(sentences: &[&str]) {
        let graph = compute_similarity(&token_sets(sentences), 1.1).expect("graph");
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(contexts_for(sentences, 1.1), sentences.to_vec());
    }

    #[test_case("The only sentence here." ; "with period")]
    #[test_case("no punctuation at all" ; "without period")]
    fn scenario_c_single_sentence(text: &str) {
        let analysis =
            analyze(text, &UnicodeSegmenter::new(), &GraphConfig::new()).expect("analyze");
        assert_eq!(analysis.graph.edge_count(), 0);
        assert_eq!(analysis.context_texts(), vec![text.to_string()]);
    }

    struct CannedExtractor(&'static str);

    impl OpinionExtractor for CannedExtractor {
        fn extract(&self, _context: &str) -> Result<Opinion> {
            Opinion::from_json(self.0)
        }
    }

    /// Counts calls; search must never run after a bad extraction.
    #[derive(Default)]
    struct CountingSearch {
        calls: Cell<usize>,
    }

    impl RelatedSearch for CountingSearch {
        fn search(&self, query: &str, _since: NaiveDate) -> Result<Vec<SearchHit>> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![SearchHit::new(query, "https://example.com")])
        }
    }

    #[test]
    fn scenario_d_missing_opposite_opinion_stops_search() {
        let analysis = analyze(
            "Remote work is great. Offices are loud.",
            &UnicodeSegmenter::new(),
            &GraphConfig::new(),
        )
        .expect("analyze");
        let search = CountingSearch::default();
        let mut selector = FixedSelection(0);

        let err = explore(
            &analysis,
            Collaborators {
                selector: &mut selector,
                extractor: &CannedExtractor(
                    r#"{"subject": "work", "sentiment": "positive", "opinion": "Remote work is great."}"#,
                ),
                search: &search,
            },
            NaiveDate::from_ymd_opt(2023, 6, 1).expect("date"),
        )
        .expect_err("extraction should fail");

        assert!(matches!(
            err,
            Error::Extraction(ExtractionError::MissingField {
                field: "opposite_opinion"
            })
        ));
        assert_eq!(search.calls.get(), 0);
    }

    #[test]
    fn complete_extraction_searches_twice() {
        let analysis =
            analyze("Cats nap all day.", &UnicodeSegmenter::new(), &GraphConfig::new())
                .expect("analyze");
        let search = CountingSearch::default();
        let mut selector = FixedSelection(0);

        let exploration = explore(
            &analysis,
            Collaborators {
                selector: &mut selector,
                extractor: &CannedExtractor(
                    r#"{"subject": "cats", "sentiment": "neutral",
                        "opinion": "Cats are lazy.", "opposite_opinion": "Cats are busy."}"#,
                ),
                search: &search,
            },
            NaiveDate::from_ymd_opt(2023, 6, 1).expect("date"),
        )
        .expect("explore");

        assert_eq!(search.calls.get(), 2);
        assert_eq!(exploration.related.similar[0].title, "Cats are lazy.");
        assert_eq!(exploration.related.opposing[0].title, "Cats are busy.");
    }
}

mod pipeline_tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&UnicodeSegmenter::new() ; "unicode")]
    #[test_case(&HeuristicSegmenter::new().expect("heuristic") ; "heuristic")]
    fn test_analyze_document_from_file(segmenter: &dyn Segmenter) {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("article.txt");
        std::fs::write(
            &path,
            "The cat sat. The cat ran. Birds fly south. Birds fly north.",
        )
        .expect("write");

        let source = FileSource::new().expect("source");
        let analysis = analyze_document(
            &source,
            path.to_str(),
            segmenter,
            &GraphConfig::new().with_threshold(0.3),
        )
        .expect("analyze");

        assert_eq!(
            analysis.context_texts(),
            vec![
                "The cat sat. The cat ran.",
                "Birds fly south. Birds fly north."
            ]
        );
        assert!(analysis.outcome.used.is_complete());
    }

    #[test]
    fn test_analyze_html_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("page.html");
        std::fs::write(
            &path,
            "<html><body><p>Dogs bark loudly.</p><script>x()</script><p>Dogs bark often.</p></body></html>",
        )
        .expect("write");

        let source = FileSource::new().expect("source");
        let analysis = analyze_document(
            &source,
            path.to_str(),
            &UnicodeSegmenter::new(),
            &GraphConfig::new(),
        )
        .expect("analyze");

        assert_eq!(
            analysis.context_texts(),
            vec!["Dogs bark loudly. Dogs bark often."]
        );
    }

    #[test]
    fn test_missing_file_is_content_not_found() {
        let source = FileSource::new().expect("source");
        let err = analyze_document(
            &source,
            Some("/no/such/article.txt"),
            &UnicodeSegmenter::new(),
            &GraphConfig::new(),
        )
        .expect_err("should fail");
        assert!(matches!(err, Error::Input(InputError::ContentNotFound { .. })));
    }

    #[test]
    fn test_spans_point_into_document() {
        let text = "  First words here.   Second words here.  ";
        let analysis =
            analyze(text, &UnicodeSegmenter::new(), &GraphConfig::new()).expect("analyze");
        for sentence in &analysis.sentences {
            assert_eq!(&text[sentence.span.clone()], sentence.text);
        }
        for context in analysis.contexts() {
            for (&i, span) in context.indices.iter().zip(&context.spans) {
                assert_eq!(span, &analysis.sentences[i].span);
            }
        }
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let text: String = (0..60)
            .map(|i| format!("Word{} word{} shared{}. ", i % 7, i % 5, i % 3))
            .collect();
        let segmenter = UnicodeSegmenter::new();
        let sequential = analyze(&text, &segmenter, &GraphConfig::new().with_threshold(0.2))
            .expect("sequential");
        let parallel = analyze(
            &text,
            &segmenter,
            &GraphConfig::new().with_threshold(0.2).with_min_parallel(1),
        )
        .expect("parallel");
        assert_eq!(sequential.graph, parallel.graph);
        assert_eq!(sequential.context_texts(), parallel.context_texts());
    }
}

mod property_tests {
    use super::*;
    use opinion_contexts::jaccard;
    use proptest::prelude::*;

    fn words() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-e]{1,2}", 0..6)
    }

    fn sentences_from(token_lists: &[Vec<String>]) -> Vec<Sentence> {
        token_lists
            .iter()
            .enumerate()
            .map(|(i, tokens)| Sentence::new(i, tokens.join(" "), tokens.clone(), i..i))
            .collect()
    }

    proptest! {
        #[test]
        fn jaccard_is_symmetric(a in words(), b in words()) {
            let (a, b) = (TokenSet::from_tokens(a), TokenSet::from_tokens(b));
            prop_assert!((jaccard(&a, &b) - jaccard(&b, &a)).abs() < f64::EPSILON);
        }

        #[test]
        fn jaccard_is_bounded(a in words(), b in words()) {
            let score = jaccard(&TokenSet::from_tokens(a), &TokenSet::from_tokens(b));
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn jaccard_self_is_one(a in prop::collection::vec("[a-z]{1,4}", 1..8)) {
            let set = TokenSet::from_tokens(a);
            prop_assert!((jaccard(&set, &set) - 1.0).abs() < f64::EPSILON);
        }

        #[test]
        fn relation_is_forward_only(
            lists in prop::collection::vec(words(), 0..12),
            threshold in 0.0f64..1.0,
        ) {
            let sentences = sentences_from(&lists);
            let config = GraphConfig::new().with_threshold(threshold);
            let graph = SimilarityGraph::from_sentences(&sentences, &config).expect("graph");
            for (i, list) in graph.iter() {
                prop_assert!(list.iter().all(|&j| j > i && j < sentences.len()));
            }
        }

        #[test]
        fn merge_partitions_sentences(
            lists in prop::collection::vec(words(), 0..12),
            threshold in 0.0f64..1.0,
        ) {
            let sentences = sentences_from(&lists);
            let config = GraphConfig::new().with_threshold(threshold);
            let graph = SimilarityGraph::from_sentences(&sentences, &config).expect("graph");
            let outcome = merge_sentences(&graph, &sentences).expect("merge");

            let mut seen = vec![0usize; sentences.len()];
            for context in &outcome.contexts {
                for &i in &context.indices {
                    seen[i] += 1;
                    prop_assert!(outcome.used.contains(i));
                }
            }
            prop_assert!(seen.iter().all(|&n| n == 1));
            prop_assert!(outcome.used.is_complete());

            let seeds: Vec<usize> = outcome.contexts.iter().map(|c| c.seed()).collect();
            prop_assert!(seeds.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn merge_is_idempotent(
            lists in prop::collection::vec(words(), 0..10),
            threshold in 0.0f64..1.0,
        ) {
            let sentences = sentences_from(&lists);
            let config = GraphConfig::new().with_threshold(threshold);
            let graph = SimilarityGraph::from_sentences(&sentences, &config).expect("graph");
            let first = merge_sentences(&graph, &sentences).expect("merge");
            let second = merge_sentences(&graph, &sentences).expect("merge");
            prop_assert_eq!(first, second);
        }
    }
}

/// Binary-level tests.
mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn bin() -> Command {
        let mut cmd = Command::cargo_bin("opinion-contexts").expect("binary");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn test_contexts_local() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("doc.txt");
        std::fs::write(&path, "The cat sat. The cat ran. Birds fly south.").expect("write");

        bin()
            .args(["contexts", "--local", "--threshold", "0.3"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("The cat sat. The cat ran."))
            .stdout(predicate::str::contains("Birds fly south."));
    }

    #[test]
    fn test_contexts_json() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("doc.txt");
        std::fs::write(&path, "One fish. Two fish.").expect("write");

        let output = bin()
            .args(["--format", "json", "contexts", "--local"])
            .arg(&path)
            .output()
            .expect("run");
        assert!(output.status.success());
        let value: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("valid json");
        assert_eq!(value[0]["text"], "One fish. Two fish.");
    }

    #[test]
    fn test_missing_document_fails() {
        bin()
            .args(["contexts", "--local"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("no document given"));
    }

    #[test]
    fn test_missing_document_json_error() {
        bin()
            .args(["--format", "json", "graph", "--local"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("\"kind\": \"input\""));
    }

    #[test]
    fn test_invalid_policy_fails() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("doc.txt");
        std::fs::write(&path, "Hello there.").expect("write");

        bin()
            .args(["contexts", "--local", "--policy", "ignore"])
            .arg(&path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown degenerate-sentence policy"));
    }
}
