use crate::{LinePattern, NodeRef, ParameterClassifier, ParameterRule, PatternMatch, RuleFilter, chain};

fn greeting() -> NodeRef {
    let table = ParameterClassifier::standard();
    chain!(table; "Type" => "Foo", "Section" => "Greeting", "Culture" => "fi").unwrap()
}

#[test]
fn or_within_group_and_across_groups() {
    let table = ParameterClassifier::standard();
    let no_type = chain!(table; "Culture" => "fi").unwrap();
    let with_type = chain!(table; "Type" => "X", "Culture" => "fi").unwrap();

    let mut filter = RuleFilter::new();
    filter
        .add_rule("Culture", 0, ParameterRule::one_of(["fi", "sv"]))
        .unwrap()
        .add_rule("Type", 0, ParameterRule::Empty)
        .unwrap()
        .seal();

    assert!(filter.filter(&no_type));
    assert!(!filter.filter(&with_type));
}

#[test]
fn several_rules_in_one_group_are_alternatives() {
    let table = ParameterClassifier::standard();
    let mut filter = RuleFilter::new();
    filter.add_rule("Culture", 0, ParameterRule::Exact("fi".into())).unwrap();
    filter.add_rule("Culture", 0, ParameterRule::Empty).unwrap();

    assert!(filter.filter(&chain!(table; "Culture" => "fi").unwrap()));
    assert!(filter.filter(&chain!(table; "Key" => "k").unwrap()));
    assert!(!filter.filter(&chain!(table; "Culture" => "sv").unwrap()));
}

#[test]
fn end_to_end_culture_selection() {
    let line = greeting();

    let mut fi = RuleFilter::new();
    fi.add_rule("Culture", 0, ParameterRule::Exact("fi".into())).unwrap();
    assert!(fi.filter(&line));

    let mut sv = RuleFilter::new();
    sv.add_rule("Culture", 0, ParameterRule::Exact("sv".into())).unwrap();
    assert!(!sv.filter(&line));
}

#[test]
fn occurrence_index_addresses_repeated_canonical_parameters() {
    let table = ParameterClassifier::standard();
    let line = chain!(table; "Section" => "App", "Section" => "Menu").unwrap();

    let mut outer = RuleFilter::new();
    outer.add_rule("Section", 1, ParameterRule::Exact("App".into())).unwrap();
    assert!(outer.filter(&line));

    let mut missing = RuleFilter::new();
    missing.add_rule("Section", 2, ParameterRule::pattern(".").unwrap()).unwrap();
    assert!(!missing.filter(&line));

    let mut absent_ok = RuleFilter::new();
    absent_ok.add_rule("Section", 2, ParameterRule::Empty).unwrap();
    assert!(absent_ok.filter(&line));
}

#[test]
fn key_rule_uses_a_template_line() {
    let table = ParameterClassifier::standard();
    let template = chain!(table; "Type" => "Foo", "Culture" => "").unwrap();

    let mut filter = RuleFilter::new();
    filter.add_key_rule(&template).unwrap();

    assert!(filter.filter(&chain!(table; "Type" => "Foo", "Key" => "k").unwrap()));
    assert!(!filter.filter(&greeting()));
    assert!(!filter.filter(&chain!(table; "Type" => "Bar").unwrap()));
}

#[test]
fn filter_lines_is_lazy_and_keeps_order() {
    let table = ParameterClassifier::standard();
    let lines: Vec<NodeRef> = ["fi", "sv", "en", "fi-FI"]
        .iter()
        .map(|c| chain!(table; "Key" => "k", "Culture" => *c).unwrap())
        .collect();

    let mut filter = RuleFilter::new();
    filter.add_rule("Culture", 0, ParameterRule::pattern("^fi").unwrap()).unwrap().seal();

    let mut kept = filter.filter_lines(lines.clone());
    assert_eq!(kept.next().map(|l| l.to_string()), Some("Key:k:Culture:fi".to_string()));
    let rest: Vec<String> = kept.map(|l| l.to_string()).collect();
    assert_eq!(rest, vec!["Key:k:Culture:fi-FI".to_string()]);
}

#[test]
fn pattern_matches_feed_the_filter() {
    let pattern = LinePattern::new("{Culture}/{Type}.{Key}").unwrap();

    let mut filter = RuleFilter::new();
    filter.add_rule("Culture", 0, ParameterRule::one_of(["fi", "sv"])).unwrap();
    filter.add_rule("Section", 0, ParameterRule::Empty).unwrap();
    filter.add_predicate(|_| false).unwrap();

    assert!(filter.filter_match(&pattern.matches("fi/Foo.Hello")));
    assert!(!filter.filter_match(&pattern.matches("en/Foo.Hello")));
    assert!(!filter.filter_match(&pattern.matches("not a match")));
    assert!(!filter.filter_match(&PatternMatch::failed()));
    assert!(filter.filter_match(&PatternMatch::from_parts([("Culture", 0, "sv")])));
}

#[test]
fn sealed_filter_is_shared_across_threads() {
    let table = ParameterClassifier::standard();
    let lines: Vec<NodeRef> =
        (0..32).map(|i| chain!(table; "Key" => format!("k{i}").as_str(), "Culture" => "fi").unwrap()).collect();

    let mut filter = RuleFilter::new();
    filter.add_rule("Key", 0, ParameterRule::pattern("[02468]$").unwrap()).unwrap().seal();

    let total: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = lines
            .chunks(8)
            .map(|chunk| {
                let filter = &filter;
                scope.spawn(move || chunk.iter().filter(|line| filter.filter(line)).count())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });
    assert_eq!(total, 16);
}
