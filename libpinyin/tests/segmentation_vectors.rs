// Segmentation test vectors for the pinyin parser.
//
// Each case seeds the parser with the syllables it needs, except where the
// standard inventory (full syllables plus bare initials) is under test.

use libpinyin::{Parser, Syllable, SyllableKind};

fn texts_from_seg(seg: Vec<Syllable>) -> Vec<String> {
    seg.into_iter().map(|s| s.text).collect()
}

#[test]
fn simple_nihao() {
    let parser = Parser::with_syllables(&["ni", "hao"]);
    assert_eq!(texts_from_seg(parser.segment_best("nihao")), vec!["ni", "hao"]);
}

#[test]
fn xiexie() {
    let parser = Parser::with_syllables(&["xie"]);
    assert_eq!(texts_from_seg(parser.segment_best("xiexie")), vec!["xie", "xie"]);
}

#[test]
fn apostrophe_split_zhe_yang() {
    let parser = Parser::with_syllables(&["zhe", "yang"]);
    assert_eq!(texts_from_seg(parser.segment_best("zhe'yang")), vec!["zhe", "yang"]);
}

#[test]
fn multi_syllable_variety() {
    let parser = Parser::standard();
    let cases = vec![
        ("nihao", vec!["ni", "hao"]),
        ("zhongguo", vec!["zhong", "guo"]),
        ("woai", vec!["wo", "ai"]),
        ("xiexie", vec!["xie", "xie"]),
        ("shengri", vec!["sheng", "ri"]),
        ("shanghai", vec!["shang", "hai"]),
        ("changcheng", vec!["chang", "cheng"]),
        ("zhengfu", vec!["zheng", "fu"]),
    ];

    for (input, expect) in cases {
        let seg = parser.segment_with_hint(input, expect.len());
        assert_eq!(texts_from_seg(seg), expect, "input: {}", input);
    }
}

#[test]
fn abbreviations_read_back_per_initial() {
    let parser = Parser::standard();
    let cases = vec![
        ("zhg", vec!["zh", "g"]),
        ("nh", vec!["n", "h"]),
        ("shjie", vec!["sh", "jie"]),
        ("zgr", vec!["z", "g", "r"]),
    ];
    for (input, expect) in cases {
        let seg = parser.segment_with_hint(input, expect.len());
        assert_eq!(texts_from_seg(seg), expect, "input: {}", input);
    }
}

#[test]
fn abbreviation_swallowed_by_next_token() {
    // "t" + "a" + "m" from tian an men reads back as "ta" + "m".
    let parser = Parser::standard();
    let seg = parser.segment_with_hint("tam", 3);
    assert_eq!(seg.len(), 2);
    assert_eq!(seg[0], Syllable::new("ta", SyllableKind::Full));
    assert_eq!(seg[1], Syllable::new("m", SyllableKind::Incomplete));
}

#[test]
fn punctuation_is_an_unknown_token() {
    let parser = Parser::standard();
    let seg = parser.segment_best("ni，hao");
    let kinds: Vec<SyllableKind> = seg.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SyllableKind::Full, SyllableKind::Unknown, SyllableKind::Full]
    );
}

#[test]
fn segmentation_is_deterministic() {
    let parser = Parser::standard();
    for input in ["zhonghuarenmingongheguo", "xian", "fangan", "zhgrmgh"] {
        assert_eq!(parser.segment_with_hint(input, 3), parser.segment_with_hint(input, 3));
    }
}
