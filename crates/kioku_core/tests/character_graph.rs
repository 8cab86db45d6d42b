mod common;

use common::FakeDictionary;
use kioku_core::{CategoryTag, Lexicon, LexiconError};

fn graph_fixture() -> Lexicon {
    Lexicon::new()
}

#[test]
fn resolve_is_memoized_per_symbol() {
    let mut lexicon = graph_fixture();
    let mut dict = common::japanese_dictionary();

    let first = lexicon_resolve(&mut lexicon, '人', &mut dict);
    let second = lexicon_resolve(&mut lexicon, '人', &mut dict);
    assert_eq!(first, second);
    assert_eq!(dict.character_lookups('人'), 1);
}

#[test]
fn invalid_symbol_is_cached_and_keeps_failing() {
    let mut lexicon = graph_fixture();
    let mut dict = FakeDictionary::new();

    let err = lexicon.resolve_character('艾', &mut dict).unwrap_err();
    assert_eq!(err, LexiconError::InvalidSymbol('艾'));
    let err = lexicon.resolve_character('艾', &mut dict).unwrap_err();
    assert_eq!(err, LexiconError::InvalidSymbol('艾'));
    assert_eq!(dict.character_lookups('艾'), 1);
}

#[test]
fn invalid_candidate_is_skipped_and_cached() {
    let mut lexicon = graph_fixture();
    // 明 decomposes into 日 and a symbol the source does not know.
    let mut dict = common::japanese_dictionary().character(
        '明',
        &["bright"],
        &[CategoryTag::Grade2],
        &['日', '艾'],
        "日 (ひ)",
    );

    let id = lexicon_resolve(&mut lexicon, '明', &mut dict);
    let node = lexicon.graph().get(id).unwrap();
    assert_eq!(node.parts.len(), 1);
    let part = lexicon.graph().get(node.parts[0]).unwrap();
    assert_eq!(part.symbol, '日');
    assert_eq!(dict.character_lookups('艾'), 1);

    // The verdict is cached; adding another user of 艾 does not re-query.
    let _ = lexicon.resolve_character('艾', &mut dict).unwrap_err();
    assert_eq!(dict.character_lookups('艾'), 1);
}

#[test]
fn transitive_parts_are_trimmed_bottom_up() {
    let mut lexicon = graph_fixture();
    // A(想) lists both B(相) and C(木); C is already a part of B, so the
    // direct C edge is redundant and must be trimmed, while B survives.
    let mut dict = common::japanese_dictionary()
        .character('相', &["mutual"], &[CategoryTag::Grade3], &['木', '目'], "目 (め)")
        .character('目', &["eye"], &[CategoryTag::Grade1], &[], "目 (め)")
        .character(
            '想',
            &["concept"],
            &[CategoryTag::Grade3],
            &['相', '木', '心'],
            "心 (こころ)",
        )
        .character('心', &["heart"], &[CategoryTag::Grade2], &[], "心 (こころ)");

    let id = lexicon_resolve(&mut lexicon, '想', &mut dict);
    let node = lexicon.graph().get(id).unwrap();
    let part_symbols: Vec<char> = node
        .parts
        .iter()
        .map(|&p| lexicon.graph().get(p).unwrap().symbol)
        .collect();
    assert!(part_symbols.contains(&'相'));
    assert!(part_symbols.contains(&'心'));
    assert!(!part_symbols.contains(&'木'), "transitive part must be trimmed");
}

#[test]
fn endless_radical_pair_terminates() {
    let mut lexicon = graph_fixture();
    let mut dict = FakeDictionary::new()
        .character('口', &["mouth"], &[CategoryTag::Grade1], &['囗'], "口 (くち)")
        .character('囗', &["enclosure"], &[CategoryTag::Other], &['口'], "囗 (くにがまえ)");

    let mouth = lexicon_resolve(&mut lexicon, '口', &mut dict);
    let enclosure = lexicon_resolve(&mut lexicon, '囗', &mut dict);
    assert_ne!(mouth, enclosure);

    // The reverse edges are suppressed, so neither lists the other.
    let mouth_node = lexicon.graph().get(mouth).unwrap();
    let enclosure_node = lexicon.graph().get(enclosure).unwrap();
    assert!(mouth_node.parts.is_empty());
    assert!(enclosure_node.parts.is_empty());
    assert!(mouth_node.is_self_radical(mouth));
}

#[test]
fn self_referential_decomposition_terminates() {
    let mut lexicon = graph_fixture();
    let mut dict =
        FakeDictionary::new().character('山', &["mountain"], &[CategoryTag::Grade1], &['山'], "山 (やま)");

    let id = lexicon_resolve(&mut lexicon, '山', &mut dict);
    let node = lexicon.graph().get(id).unwrap();
    assert!(node.parts.is_empty());
    assert!(node.is_self_radical(id));
}

#[test]
fn radical_is_selected_among_parts_by_name() {
    let mut lexicon = graph_fixture();
    // 休: parts 人 and 木, radical field names 人 with kana annotation the
    // ideograph filter must drop.
    let mut dict = common::japanese_dictionary().character(
        '休',
        &["rest"],
        &[CategoryTag::Grade1],
        &['人', '木'],
        "人 (にんべん)",
    );

    let id = lexicon_resolve(&mut lexicon, '休', &mut dict);
    let node = lexicon.graph().get(id).unwrap();
    assert_eq!(node.parts.len(), 2);
    let radical = lexicon.graph().get(node.radical).unwrap();
    assert_eq!(radical.symbol, '人');
    assert!(!node.is_self_radical(id));
}

#[test]
fn named_radical_outside_parts_is_resolved_separately() {
    let mut lexicon = graph_fixture();
    // No decomposition candidates, but the radical field names 木.
    let mut dict = common::japanese_dictionary().character(
        '林',
        &["grove"],
        &[CategoryTag::Grade1],
        &[],
        "木 (き)",
    );

    let id = lexicon_resolve(&mut lexicon, '林', &mut dict);
    let node = lexicon.graph().get(id).unwrap();
    assert!(node.parts.is_empty());
    let radical = lexicon.graph().get(node.radical).unwrap();
    assert_eq!(radical.symbol, '木');
}

#[test]
fn empty_categories_fall_back_to_other() {
    let mut lexicon = graph_fixture();
    let mut dict = FakeDictionary::new().character('鰯', &["sardine"], &[], &[], "魚 (さかな)");
    // The named radical is unknown to the source, so the node also falls
    // back to being its own radical.
    let id = lexicon_resolve(&mut lexicon, '鰯', &mut dict);
    let node = lexicon.graph().get(id).unwrap();
    assert!(node.categories.contains(&CategoryTag::Other));
    assert!(node.is_self_radical(id));
}

fn lexicon_resolve(
    lexicon: &mut Lexicon,
    symbol: char,
    dict: &mut FakeDictionary,
) -> kioku_core::CharacterId {
    lexicon.resolve_character(symbol, dict).unwrap()
}
