use super::{decode_fragment, encode_component, fragment_for, History};

#[test]
fn test_encoding_matches_uri_component_rules() {
    assert_eq!(encode_component("Verbs"), "Verbs");
    assert_eq!(encode_component("て-form (past)"), "%E3%81%A6-form%20(past)");
    assert_eq!(encode_component("a/b?c#d&e"), "a%2Fb%3Fc%23d%26e");
    assert_eq!(encode_component("keep-_.!~*'()"), "keep-_.!~*'()");
}

#[test]
fn test_fragment_round_trip() {
    let title = "〜ている / ~te iru";
    let fragment = fragment_for(title);

    assert!(fragment.starts_with('#'));
    assert_eq!(decode_fragment(&fragment), title);
    assert_eq!(decode_fragment("%E5%8B%95%E8%A9%9E"), "動詞");
}

#[test]
fn test_history_back_and_forward() {
    let mut history = History::new();
    assert_eq!(history.back(), None);

    history.push("A");
    history.push("B");
    history.push("C");

    assert_eq!(history.back(), Some("B"));
    assert_eq!(history.back(), Some("A"));
    assert_eq!(history.back(), None);
    assert_eq!(history.forward(), Some("B"));

    history.push("D");
    assert_eq!(history.forward(), None, "pushing drops forward entries");
    assert_eq!(history.len(), 3);
    assert_eq!(history.current(), Some("D"));
}

#[test]
fn test_history_ignores_repeat_of_current() {
    let mut history = History::new();
    history.push("A");
    history.push("A");

    assert_eq!(history.len(), 1);
}
