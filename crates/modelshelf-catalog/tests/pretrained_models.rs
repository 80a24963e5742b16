//! End-to-end tests against the real published archives
//!
//! These download multi-hundred-megabyte archives and run real inference;
//! they require the `pretrained-tests` feature:
//!
//! ```text
//! cargo test -p modelshelf-catalog --features pretrained-tests
//! ```
//!
//! Expected values are recorded outputs of the published models on fixed
//! inputs, not linguistic ground truth.

#![cfg(feature = "pretrained-tests")]

use modelshelf_catalog as catalog;
use serde_json::json;

const MATRIX_PASSAGE: &str = "The Matrix is a 1999 science fiction action film written and \
     directed by The Wachowskis, starring Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss, \
     Hugo Weaving, and Joe Pantoliano.";

#[test]
fn ner_tags_michael_jordan_sentence() {
    let predictor = catalog::named_entity_recognition_with_elmo_peters_2018().unwrap();
    let result = predictor
        .predict(&json!({"sentence": "Michael Jordan is a professor at Berkeley."}))
        .unwrap();

    assert_eq!(
        result["tags"],
        json!(["B-PER", "L-PER", "O", "O", "O", "O", "U-LOC", "O"])
    );
}

#[test]
fn ner_padding_fixup_is_applied_and_stable() {
    let mut predictor = catalog::named_entity_recognition_with_elmo_peters_2018().unwrap();
    assert_eq!(predictor.min_padding_length("token_characters"), Some(3));

    // Re-applying the documented fix-up must not change the effective value.
    predictor.set_min_padding_length("token_characters", 3);
    assert_eq!(predictor.min_padding_length("token_characters"), Some(3));
}

#[test]
fn entailment_prefers_the_entailed_hypothesis() {
    let predictor = catalog::decomposable_attention_with_elmo_parikh_2017().unwrap();
    let result = predictor
        .predict(&json!({
            "premise": "An interplanetary spacecraft is in orbit around a gas giant's icy moon.",
            "hypothesis": "The spacecraft has the ability to travel between planets.",
        }))
        .unwrap();

    let entailment = result["label_probs"][0].as_f64().unwrap();
    assert!(entailment > 0.7, "entailment probability was {}", entailment);
}

#[test]
fn bidaf_finds_the_matrix_cast() {
    let predictor = catalog::bidirectional_attention_flow_seo_2017().unwrap();
    let result = predictor
        .predict(&json!({
            "passage": MATRIX_PASSAGE,
            "question": "Who stars in The Matrix?",
        }))
        .unwrap();

    assert_eq!(
        result["best_span_str"],
        "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss, Hugo Weaving, and Joe Pantoliano"
    );
}

#[test]
fn dependency_parser_produces_a_single_rooted_tree() {
    let predictor = catalog::biaffine_parser_stanford_dependencies_todzat_2017().unwrap();
    let result = predictor
        .predict(&json!({"sentence": "He ate spaghetti with chopsticks."}))
        .unwrap();

    let heads: Vec<i64> = result["predicted_heads"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h.as_i64().unwrap())
        .collect();

    // Exactly one root, and every token reaches it without a cycle. The
    // attachment choices themselves are the model's business.
    assert_eq!(heads.iter().filter(|&&h| h == 0).count(), 1);
    for start in 1..=heads.len() {
        let mut node = start;
        for _ in 0..=heads.len() {
            let head = heads[node - 1];
            if head == 0 {
                break;
            }
            node = head as usize;
        }
        assert_eq!(heads[node - 1], 0, "token {} never reaches the root", start);
    }
}

#[test]
fn atis_parser_translates_a_flight_query() {
    let predictor = catalog::atis_parser_lin_2019().unwrap();
    let result = predictor
        .predict(&json!({
            "utterance": "give me flights on american airlines from milwaukee to phoenix"
        }))
        .unwrap();

    let expected = "( SELECT DISTINCT flight . flight_id FROM flight WHERE ( flight . airline_code = 'AA' \
         AND ( flight . from_airport IN ( SELECT airport_service . airport_code FROM airport_service \
         WHERE airport_service . city_code IN ( SELECT city . city_code FROM city \
         WHERE city . city_name = 'MILWAUKEE' ) ) \
         AND flight . to_airport IN ( SELECT airport_service . airport_code FROM airport_service \
         WHERE airport_service . city_code IN ( SELECT city . city_code FROM city \
         WHERE city . city_name = 'PHOENIX' ) ) ) ) ) ;";
    assert_eq!(result["predicted_sql_query"], expected);
}

#[test]
fn srl_labels_every_predicate() {
    let predictor = catalog::srl_with_elmo_luheng_2018().unwrap();
    let result = predictor
        .predict(&json!({"sentence": "John wrote a letter to his sister."}))
        .unwrap();

    let verbs = result["verbs"].as_array().unwrap();
    assert_eq!(verbs.len(), 1);
    assert_eq!(verbs[0]["verb"], "wrote");

    let words = result["words"].as_array().unwrap();
    let tags = verbs[0]["tags"].as_array().unwrap();
    assert_eq!(tags.len(), words.len());
}

#[test]
fn coref_links_her_back_to_the_woman() {
    let predictor = catalog::neural_coreference_resolution_lee_2017().unwrap();
    let result = predictor
        .predict(&json!({
            "document": "The woman reading a newspaper sat on the bench with her dog."
        }))
        .unwrap();

    // "her" is token 10; some cluster must contain it as a mention.
    let clusters = result["clusters"].as_array().unwrap();
    assert!(!clusters.is_empty());
    let mentions_her = clusters.iter().any(|cluster| {
        cluster
            .as_array()
            .unwrap()
            .iter()
            .any(|mention| mention == &json!([10, 10]))
    });
    assert!(mentions_her, "clusters were {}", result["clusters"]);
}

#[test]
fn constituency_parser_brackets_a_simple_sentence() {
    let predictor = catalog::span_based_constituency_parsing_with_elmo_joshi_2018().unwrap();
    let result = predictor
        .predict(&json!({"sentence": "Pierre Vinken died aged 81."}))
        .unwrap();

    let tree = result["trees"].as_str().unwrap();
    assert!(
        tree.starts_with("(S (NP (NNP Pierre) (NNP Vinken))"),
        "tree was {}",
        tree
    );
}

#[test]
fn openie_extracts_the_decided_predicate() {
    let predictor = catalog::open_information_extraction_stanovsky_2018().unwrap();
    let result = predictor
        .predict(&json!({"sentence": "John decided to run for office next month."}))
        .unwrap();

    let descriptions: Vec<&str> = result["verbs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["description"].as_str().unwrap())
        .collect();
    assert!(
        descriptions.iter().any(|d| d.contains("[V: decided]")),
        "descriptions were {:?}",
        descriptions
    );
}

#[test]
fn nlvr_parser_produces_a_logical_form() {
    let predictor = catalog::nlvr_parser_dasigi_2019().unwrap();
    let result = predictor
        .predict(&json!({
            "sentence": "There is exactly one square touching the wall.",
            "structured_rep": [[{"y_loc": 80, "type": "square", "color": "Black", "x_loc": 80, "size": 20}]],
        }))
        .unwrap();

    let logical_form = result["logical_form"].as_str().unwrap();
    assert!(logical_form.starts_with('('), "got {}", logical_form);
}

#[test]
fn quarel_parser_answers_a_friction_question() {
    let predictor = catalog::quarel_parser_tafjord_2019().unwrap();
    let result = predictor
        .predict(&json!({
            "question": "Mike was snowboarding on the snow and hit a piece of ice. \
                 He went much faster on the ice because _____ is smoother. \
                 (A) snow (B) ice"
        }))
        .unwrap();

    let answer = result["answer"].as_str().unwrap();
    assert!(answer == "A" || answer == "B", "got {}", answer);
}

#[test]
fn wikitables_parser_loads() {
    // The parser itself must construct; its recorded outputs are checked
    // (and currently quarantined) below.
    catalog::wikitables_parser_dasigi_2019().unwrap();
}

#[test]
#[ignore = "recorded wikitables outputs have not been re-verified against the published model"]
fn wikitables_parser_recorded_outputs() {
    let predictor = catalog::wikitables_parser_dasigi_2019().unwrap();
    let result = predictor
        .predict(&json!({
            "question": "How many gold medals did Norway win?",
            "table": "Rank\tNation\tGold\tSilver\tBronze\n1\tNorway\t14\t14\t11",
        }))
        .unwrap();

    assert_eq!(
        result["logical_form"],
        "((reverse number_column:gold) (filter_in string_column:nation string:norway))"
    );
    assert_eq!(result["answer"], "14");
}

#[test]
fn repeated_loads_predict_identically() {
    let input = json!({"sentence": "Michael Jordan is a professor at Berkeley."});

    let first = catalog::named_entity_recognition_with_elmo_peters_2018()
        .unwrap()
        .predict(&input)
        .unwrap();
    let second = catalog::named_entity_recognition_with_elmo_peters_2018()
        .unwrap()
        .predict(&input)
        .unwrap();

    assert_eq!(first, second);
}
