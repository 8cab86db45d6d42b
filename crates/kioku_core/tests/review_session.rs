mod common;

use common::word_record;
use kioku_core::{CategoryTag, Lexicon, LexiconError, Selector, WordId, SLOT_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// A lexicon with the given single-character words, all in slot 0.
fn lexicon_with(words: &[(&str, &str, &str)]) -> (Lexicon, Vec<WordId>) {
    let mut lexicon = Lexicon::new();
    let mut dict = common::japanese_dictionary();
    let ids = words
        .iter()
        .map(|&(spelling, reading, meaning)| {
            lexicon
                .add_word(&word_record(spelling, &[reading], &[meaning]), &mut dict)
                .unwrap()
        })
        .collect();
    (lexicon, ids)
}

/// Draws and answers every remaining card with the same verdict.
fn answer_all(lexicon: &mut Lexicon, rng: &mut StdRng, correct: bool) {
    loop {
        match lexicon.draw_card(rng) {
            Ok(_) => lexicon.answer(correct).unwrap(),
            Err(LexiconError::SessionExhausted) => break,
            Err(err) => panic!("unexpected draw error: {err}"),
        }
    }
}

#[test]
fn all_correct_session_advances_every_slot() {
    let (mut lexicon, ids) = lexicon_with(&[
        ("日", "ひ", "day"),
        ("人", "ひと", "person"),
        ("木", "き", "tree"),
    ]);
    let mut rng = rng();

    let size = lexicon.start_review(&[Selector::All], 10, &mut rng).unwrap();
    assert_eq!(size, 3);
    answer_all(&mut lexicon, &mut rng, true);
    lexicon.finish_review().unwrap();

    for id in ids {
        assert_eq!(lexicon.word(id).unwrap().slot, 1);
        assert!(lexicon.slot_words(1).unwrap().contains(&id));
    }
    assert!(lexicon.slot_words(0).unwrap().is_empty());
    assert!(!lexicon.session_active());
}

#[test]
fn promotion_caps_at_the_last_slot() {
    let (mut lexicon, ids) = lexicon_with(&[("日", "ひ", "day")]);
    let mut rng = rng();

    for _ in 0..SLOT_COUNT + 1 {
        lexicon.start_review(&[Selector::All], 1, &mut rng).unwrap();
        answer_all(&mut lexicon, &mut rng, true);
        lexicon.finish_review().unwrap();
    }
    assert_eq!(lexicon.word(ids[0]).unwrap().slot, SLOT_COUNT - 1);
}

#[test]
fn one_miss_leaves_the_slot_unchanged() {
    let (mut lexicon, ids) = lexicon_with(&[("日", "ひ", "day")]);
    let mut rng = rng();

    // Promote to slot 1 first so "unchanged" differs from "reset".
    lexicon.start_review(&[Selector::All], 1, &mut rng).unwrap();
    answer_all(&mut lexicon, &mut rng, true);
    lexicon.finish_review().unwrap();

    lexicon.start_review(&[Selector::All], 1, &mut rng).unwrap();
    lexicon.draw_card(&mut rng).unwrap();
    lexicon.answer(false).unwrap();
    lexicon.draw_card(&mut rng).unwrap();
    lexicon.answer(true).unwrap();
    lexicon.finish_review().unwrap();

    assert_eq!(lexicon.word(ids[0]).unwrap().slot, 1);
}

#[test]
fn repeated_misses_reset_to_the_first_slot() {
    let (mut lexicon, ids) = lexicon_with(&[("日", "ひ", "day")]);
    let mut rng = rng();

    for _ in 0..2 {
        lexicon.start_review(&[Selector::All], 1, &mut rng).unwrap();
        answer_all(&mut lexicon, &mut rng, true);
        lexicon.finish_review().unwrap();
    }
    assert_eq!(lexicon.word(ids[0]).unwrap().slot, 2);

    lexicon.start_review(&[Selector::All], 1, &mut rng).unwrap();
    for _ in 0..2 {
        lexicon.draw_card(&mut rng).unwrap();
        lexicon.answer(false).unwrap();
    }
    lexicon.draw_card(&mut rng).unwrap();
    lexicon.answer(true).unwrap();
    lexicon.finish_review().unwrap();

    assert_eq!(lexicon.word(ids[0]).unwrap().slot, 0);
}

#[test]
fn abort_applies_no_slot_updates() {
    let (mut lexicon, ids) = lexicon_with(&[("日", "ひ", "day")]);
    let mut rng = rng();

    lexicon.start_review(&[Selector::All], 1, &mut rng).unwrap();
    answer_all(&mut lexicon, &mut rng, true);
    lexicon.start_review(&[Selector::All], 1, &mut rng).unwrap_err();
    lexicon.abort_review().unwrap();

    assert_eq!(lexicon.word(ids[0]).unwrap().slot, 0);
    assert!(!lexicon.session_active());
    assert_eq!(lexicon.abort_review(), Err(LexiconError::NoSession));
}

#[test]
fn deleted_word_is_skipped_at_draw_time() {
    let (mut lexicon, ids) = lexicon_with(&[("日", "ひ", "day"), ("人", "ひと", "person")]);
    let mut rng = rng();

    lexicon.start_review(&[Selector::All], 2, &mut rng).unwrap();
    let first = lexicon.draw_card(&mut rng).unwrap();
    lexicon.answer(true).unwrap();

    let other = if first == ids[0] { ids[1] } else { ids[0] };
    lexicon.remove_word(other).unwrap();

    // The queued card for the deleted word never surfaces.
    assert_eq!(
        lexicon.draw_card(&mut rng),
        Err(LexiconError::SessionExhausted)
    );
    lexicon.finish_review().unwrap();
    assert_eq!(lexicon.word(first).unwrap().slot, 1);
}

#[test]
fn repeat_review_puts_answered_cards_back_in_rotation() {
    let (mut lexicon, _) = lexicon_with(&[("日", "ひ", "day"), ("人", "ひと", "person")]);
    let mut rng = rng();

    lexicon.start_review(&[Selector::All], 2, &mut rng).unwrap();
    answer_all(&mut lexicon, &mut rng, true);
    lexicon.repeat_review().unwrap();

    let mut second_pass = 0;
    while lexicon.draw_card(&mut rng).is_ok() {
        lexicon.answer(true).unwrap();
        second_pass += 1;
    }
    assert_eq!(second_pass, 2);

    // A pending card blocks the rotation swap.
    lexicon.repeat_review().unwrap();
    lexicon.draw_card(&mut rng).unwrap();
    assert_eq!(lexicon.repeat_review(), Err(LexiconError::NoCardDrawn));
}

#[test]
fn drawing_twice_returns_the_same_card() {
    let (mut lexicon, _) = lexicon_with(&[("日", "ひ", "day"), ("人", "ひと", "person")]);
    let mut rng = rng();

    lexicon.start_review(&[Selector::All], 2, &mut rng).unwrap();
    let first = lexicon.draw_card(&mut rng).unwrap();
    assert_eq!(lexicon.draw_card(&mut rng).unwrap(), first);
}

#[test]
fn extend_review_samples_only_undrawn_words() {
    let (mut lexicon, _) = lexicon_with(&[
        ("日", "ひ", "day"),
        ("人", "ひと", "person"),
        ("木", "き", "tree"),
    ]);
    let mut rng = rng();

    let size = lexicon.start_review(&[Selector::All], 2, &mut rng).unwrap();
    assert_eq!(size, 2);
    let added = lexicon.extend_review(&[Selector::All], 5, &mut rng).unwrap();
    assert_eq!(added, 1);

    let mut total = 0;
    while lexicon.draw_card(&mut rng).is_ok() {
        lexicon.answer(true).unwrap();
        total += 1;
    }
    assert_eq!(total, 3);
}

#[test]
fn selectors_union_named_lists_and_categories() {
    let mut lexicon = Lexicon::new();
    let mut dict = common::japanese_dictionary();
    let mut rng = rng();

    let leveled = kioku_core::WordRecord {
        level: Some(5),
        ..word_record("日", &["ひ"], &["day"])
    };
    lexicon.add_word(&leveled, &mut dict).unwrap();
    lexicon
        .add_word(&word_record("人", &["ひと"], &["person"]), &mut dict)
        .unwrap();

    let size = lexicon
        .start_review(&[Selector::Named("jlpt n5".into())], 10, &mut rng)
        .unwrap();
    assert_eq!(size, 1);
    lexicon.abort_review().unwrap();

    // Both words carry Grade1 single-character examples, so the category
    // selector unions to the full pair.
    let size = lexicon
        .start_review(&[Selector::Category(CategoryTag::Grade1)], 10, &mut rng)
        .unwrap();
    assert_eq!(size, 2);
}

#[test]
fn session_survives_a_snapshot_round_trip() {
    let (mut lexicon, _) = lexicon_with(&[("日", "ひ", "day"), ("人", "ひと", "person")]);
    let mut rng = rng();

    lexicon.start_review(&[Selector::All], 2, &mut rng).unwrap();
    lexicon.draw_card(&mut rng).unwrap();
    lexicon.answer(true).unwrap();

    let blob = lexicon.to_snapshot().unwrap();
    let mut restored = Lexicon::from_snapshot(&blob).unwrap();
    assert_eq!(restored, lexicon);
    assert!(restored.session_active());

    restored.draw_card(&mut rng).unwrap();
    restored.answer(true).unwrap();
    restored.finish_review().unwrap();
    assert_eq!(restored.slot_counts()[1], 2);
}

#[test]
fn session_errors_cover_the_edge_cases() {
    let (mut lexicon, _) = lexicon_with(&[("日", "ひ", "day")]);
    let mut rng = rng();

    assert_eq!(lexicon.draw_card(&mut rng), Err(LexiconError::NoSession));
    assert_eq!(lexicon.answer(true), Err(LexiconError::NoSession));
    assert_eq!(lexicon.finish_review(), Err(LexiconError::NoSession));

    assert!(matches!(
        lexicon.start_review(&[Selector::Slot(SLOT_COUNT)], 1, &mut rng),
        Err(LexiconError::InvalidRecord(_))
    ));
    assert!(matches!(
        lexicon.start_review(&[Selector::Named("missing".into())], 1, &mut rng),
        Err(LexiconError::NotFound(_))
    ));
    assert!(matches!(
        lexicon.start_review(&[Selector::All], 0, &mut rng),
        Err(LexiconError::InvalidRecord(_))
    ));
    assert!(matches!(
        lexicon.start_review(&[Selector::Slot(3)], 1, &mut rng),
        Err(LexiconError::InvalidRecord(_))
    ));

    lexicon.start_review(&[Selector::All], 1, &mut rng).unwrap();
    assert_eq!(lexicon.answer(true), Err(LexiconError::NoCardDrawn));
    assert_eq!(
        lexicon.start_review(&[Selector::All], 1, &mut rng),
        Err(LexiconError::SessionActive)
    );
}
