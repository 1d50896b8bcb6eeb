/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use brp_stuf_api::models::Person;
use brp_stuf_api::nationality::check_dutch_nationality;
use brp_stuf_api::relatives::{extract_links, same_residence, RelationKind, RelativeLinks};
use brp_stuf_api::resources::Source;
use brp_stuf_api::xml::encode_envelope;
use proptest::prelude::*;
use serde_json::json;

fn person(value: serde_json::Value) -> Person {
    serde_json::from_value(value).expect("test person should deserialize")
}

// Property: a candidate at the exact same address is always retained, and
// flipping any single present field always removes it
proptest! {
    #[test]
    fn identical_addresses_always_match(
        postcode in "[1-9][0-9]{3}[A-Z]{2}",
        huisnummer in 1u32..=9999,
    ) {
        let subject = person(json!({
            "verblijfplaats": {"postcode": postcode, "huisnummer": huisnummer}
        }));
        let candidate = person(json!({
            "verblijfplaats": {"postcode": postcode, "huisnummer": huisnummer}
        }));

        prop_assert!(same_residence(&subject, &candidate));
    }

    #[test]
    fn flipped_house_number_never_matches(
        postcode in "[1-9][0-9]{3}[A-Z]{2}",
        huisnummer in 1u32..=9998,
    ) {
        let subject = person(json!({
            "verblijfplaats": {"postcode": postcode, "huisnummer": huisnummer}
        }));
        let candidate = person(json!({
            "verblijfplaats": {"postcode": postcode, "huisnummer": huisnummer + 1}
        }));

        prop_assert!(!same_residence(&subject, &candidate));
    }

    #[test]
    fn one_sided_house_letter_never_matches(
        postcode in "[1-9][0-9]{3}[A-Z]{2}",
        huisletter in "[A-Z]",
    ) {
        let subject = person(json!({
            "verblijfplaats": {"postcode": postcode, "huisletter": huisletter}
        }));
        let candidate = person(json!({
            "verblijfplaats": {"postcode": postcode}
        }));

        prop_assert!(!same_residence(&subject, &candidate));
    }
}

// Property: the classifier is true iff at least one entry matches the rule
proptest! {
    #[test]
    fn classifier_matches_rule_exactly(
        entries in proptest::collection::vec(
            ("(Nederlandse|Duitse|Belgische)", "(0001|0002|0027)"),
            0..6,
        )
    ) {
        let expected = entries
            .iter()
            .any(|(omschrijving, code)| omschrijving.as_str() == "Nederlandse" || code.as_str() == "0001");

        let nationaliteiten: Vec<_> = entries
            .iter()
            .map(|(omschrijving, code)| {
                json!({"nationaliteit": {"omschrijving": omschrijving, "code": code}})
            })
            .collect();
        let subject = person(json!({"nationaliteiten": nationaliteiten}));

        let flag = check_dutch_nationality(&subject).unwrap();
        prop_assert_eq!(flag == "true", expected);
    }
}

// Property: BSN extraction recovers the exact path remainder of the self-link
proptest! {
    #[test]
    fn embedded_self_link_round_trips_bsn(bsn in "[0-9]{9}") {
        let source = Source {
            location: "https://brp.example.nl/haal-centraal-brp-bevragen/api/v1.3/ingeschrevenpersonen".to_string(),
            api_key: None,
        };
        let subject = person(json!({
            "_embedded": {
                "partners": [
                    {"_links": {"ingeschrevenPersoon": {"href": format!(
                        "https://brp.example.nl/haal-centraal-brp-bevragen/api/v1.3/ingeschrevenpersonen/{}",
                        bsn
                    )}}}
                ]
            }
        }));

        let links = extract_links(&source, &subject, RelationKind::Partner);
        prop_assert_eq!(links, RelativeLinks::Embedded(vec![bsn]));
    }
}

// Property: the envelope encoder emits every populated field, skips every
// empty one, and never panics
proptest! {
    #[test]
    fn encoder_emits_populated_and_skips_empty(
        fields in proptest::collection::btree_map(
            "[a-z][a-z0-9]{0,8}",
            "[a-zA-Z0-9]{0,12}",
            1..8,
        )
    ) {
        let record = serde_json::to_value(&fields).unwrap();
        let xml = encode_envelope(&record).unwrap();

        for (key, value) in &fields {
            if value.is_empty() {
                let open_tag = format!("<{}>", key);
                prop_assert!(!xml.contains(&open_tag));
            } else {
                let element = format!("<{}>{}</{}>", key, value, key);
                prop_assert!(xml.contains(&element));
            }
        }
    }
}
