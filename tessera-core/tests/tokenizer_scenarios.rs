//! Tokenization scenarios for German web text and English

use std::sync::OnceLock;

use tessera_core::{Language, RulePipeline, TokenClass};

fn german() -> &'static RulePipeline {
    static GERMAN: OnceLock<RulePipeline> = OnceLock::new();
    GERMAN.get_or_init(|| RulePipeline::new(Language::GermanWeb, true, &[]).unwrap())
}

fn english() -> &'static RulePipeline {
    static ENGLISH: OnceLock<RulePipeline> = OnceLock::new();
    ENGLISH.get_or_init(|| RulePipeline::new(Language::EnglishFormal, true, &[]).unwrap())
}

fn assert_tokens(pipeline: &RulePipeline, raw: &str, expected: &str) {
    let tokens: Vec<String> = pipeline
        .tokenize_paragraph(raw)
        .unwrap()
        .into_iter()
        .map(|t| t.text)
        .collect();
    let expected: Vec<&str> = expected.split_whitespace().collect();
    assert_eq!(tokens, expected, "input: {raw:?}");
}

#[test]
fn test_punctuation() {
    let pipeline = german();
    assert_tokens(
        &pipeline,
        "Als ich ihn sah, war es bereits zu spät.",
        "Als ich ihn sah , war es bereits zu spät .",
    );
    assert_tokens(&pipeline, "Das ist ein Test?!", "Das ist ein Test ?!");
    assert_tokens(&pipeline, "Test!!!", "Test !!!");
    assert_tokens(&pipeline, "Test????????", "Test ????????");
    assert_tokens(&pipeline, "Anna,kannst du mal", "Anna , kannst du mal");
}

#[test]
fn test_hyphens_and_parentheses() {
    let pipeline = german();
    assert_tokens(&pipeline, "Laub- und Nadelbäume", "Laub- und Nadelbäume");
    assert_tokens(&pipeline, "Hals-Nasen-Ohren-Arzt", "Hals-Nasen-Ohren-Arzt");
    assert_tokens(&pipeline, "(Neu-)Veröffentlichung", "( Neu- ) Veröffentlichung");
    assert_tokens(&pipeline, "Student(inn)en", "Student(inn)en");
    assert_tokens(&pipeline, "f->d", "f -> d");
    assert_tokens(&pipeline, "f - > d", "f -> d");
}

#[test]
fn test_numbers_and_symbols() {
    let pipeline = german();
    assert_tokens(&pipeline, "10%", "10 %");
    assert_tokens(&pipeline, "200€", "200 €");
    assert_tokens(&pipeline, "11+21=33", "11 + 21 = 33");
    assert_tokens(&pipeline, "6.200", "6.200");
    assert_tokens(&pipeline, "-1,5", "-1,5");
    assert_tokens(&pipeline, "14–18 Uhr", "14 – 18 Uhr");
}

#[test]
fn test_units_and_degrees() {
    let pipeline = german();
    assert_tokens(&pipeline, "ca. 20°C", "ca. 20 ° C");
    assert_tokens(&pipeline, "ca. 20 °C", "ca. 20 ° C");
    assert_tokens(&pipeline, "90°", "90 °");
    assert_tokens(&pipeline, "66cent", "66 cent");
    assert_tokens(&pipeline, "12kg", "12 kg");
    assert_tokens(&pipeline, "5h", "5 h");
    assert_tokens(&pipeline, "100 Mbit/s", "100 Mbit/s");

    let pipeline = english();
    assert_tokens(&pipeline, "bla 3°C foo", "bla 3 °C foo");
    assert_tokens(&pipeline, "bla 3 °C foo", "bla 3 °C foo");
}

#[test]
fn test_dates() {
    let pipeline = german();
    assert_tokens(&pipeline, "16.07.2013", "16. 07. 2013");
    assert_tokens(&pipeline, "(am 20.06.2008)", "( am 20. 06. 2008 )");
    assert_tokens(&pipeline, "2016-01-27", "2016 -01 -27");
    assert_tokens(&pipeline, "16. Juli 2013", "16. Juli 2013");
}

#[test]
fn test_abbreviations() {
    let pipeline = german();
    assert_tokens(&pipeline, "etc.", "etc.");
    assert_tokens(&pipeline, "d.h.", "d. h.");
    assert_tokens(&pipeline, "d. h.", "d. h.");
    assert_tokens(
        &pipeline,
        "Wir kauften Socken, Hemden, Schuhe etc. Danach hatten wir alles.",
        "Wir kauften Socken , Hemden , Schuhe etc. Danach hatten wir alles .",
    );
    assert_tokens(&pipeline, "Hey Mr. Schlauberger", "Hey Mr. Schlauberger");
}

#[test]
fn test_artikel_only_before_numbers() {
    let pipeline = german();
    assert_tokens(&pipeline, "Nach Art. 1 Grundgesetz", "Nach Art. 1 Grundgesetz");
    assert_tokens(&pipeline, "Meine Art. Genau", "Meine Art . Genau");
}

#[test]
fn test_custom_abbreviations() {
    let custom = vec!["Brem.".to_string(), "GBl.".to_string()];
    let pipeline = RulePipeline::new(Language::GermanWeb, true, &custom).unwrap();
    assert_tokens(&pipeline, "Brem.GBl.", "Brem. GBl.");
}

#[test]
fn test_urls_and_emails() {
    let pipeline = german();
    assert_tokens(
        &pipeline,
        "michael.beisswenger@tu-dortmund.de",
        "michael.beisswenger@tu-dortmund.de",
    );
    assert_tokens(
        &pipeline,
        "https://en.wikipedia.org/wiki/Main_Page",
        "https://en.wikipedia.org/wiki/Main_Page",
    );
    assert_tokens(
        &pipeline,
        "Auf http://www.shortnews.de, der besten Seite.",
        "Auf http://www.shortnews.de , der besten Seite .",
    );
    assert_tokens(
        &pipeline,
        "Auf www.shortnews.de, der besten Seite.",
        "Auf www.shortnews.de , der besten Seite .",
    );
}

#[test]
fn test_emoticons() {
    let pipeline = german();
    for emoticon in [":-)", ":-)))))", ";-)", ":)", ";)", ":-(", ":D", "^^"] {
        assert_tokens(&pipeline, emoticon, emoticon);
    }
    assert_tokens(&pipeline, "tag quaki : )", "tag quaki :)");
    assert_tokens(&pipeline, "hallo peter ; )", "hallo peter ;)");
}

#[test]
fn test_action_words() {
    let pipeline = german();
    assert_tokens(&pipeline, "*grübel*", "* grübel *");
    assert_tokens(
        &pipeline,
        "*dichmalganzdolleknuddelt*",
        "* dichmalganzdolleknuddelt *",
    );
}

#[test]
fn test_mentions_and_hashtags() {
    let pipeline = german();
    assert_tokens(&pipeline, "@bine23", "@bine23");
    assert_tokens(&pipeline, "@bine23: hallöchen! :-)", "@bine23 : hallöchen ! :-)");
    assert_tokens(&pipeline, "#urlaub", "#urlaub");
    assert_tokens(&pipeline, "#SPD", "#SPD");

    let tokens = pipeline.tokenize_paragraph("@bine23 #urlaub").unwrap();
    assert_eq!(tokens[0].token_class, TokenClass::Mention);
    assert_eq!(tokens[1].token_class, TokenClass::Hashtag);
}

#[test]
fn test_whitespace_and_junk() {
    let pipeline = german();
    assert_tokens(&pipeline, "foo\nbar", "foo bar");
    assert_tokens(&pipeline, "foo\u{2028}bar", "foo bar");
    assert_tokens(&pipeline, "foo\u{200B}bar", "foobar");
    assert_tokens(&pipeline, "foo\u{00AD}bar", "foobar");
    assert_tokens(&pipeline, "foo\u{FEFF}bar", "foobar");
    assert_tokens(&pipeline, "foo\u{200C}bar\u{200D}baz", "foobarbaz");
    assert_tokens(
        &pipeline,
        "foo\u{202B}bar\u{202A}baz\u{202C}qux\u{202E}alpha\u{202D}beta",
        "foobarbazquxalphabeta",
    );
}

#[test]
fn test_camel_case() {
    let pipeline = german();
    assert_tokens(&pipeline, "derText", "der Text");
    assert_tokens(&pipeline, "WhatsApp", "WhatsApp");
    assert_tokens(&pipeline, "neues iPhone", "neues iPhone");
    assert_tokens(
        &pipeline,
        "Zu welchemHandlungsbereich gehört unsereKomm hier? Bildung?Freizeit?Mischung?",
        "Zu welchem Handlungsbereich gehört unsere Komm hier ? Bildung ? Freizeit ? Mischung ?",
    );
}

#[test]
fn test_english_clitics() {
    let pipeline = english();
    assert_tokens(&pipeline, "I don't know.", "I do n't know .");
    assert_tokens(&pipeline, "This is Peter's book.", "This is Peter 's book .");
    assert_tokens(&pipeline, "What's up?", "What 's up ?");
    assert_tokens(&pipeline, "I'll see you", "I 'll see you");
    assert_tokens(&pipeline, "You cannot come!", "You can not come !");
}

#[test]
fn test_english_numbers_and_hyphens() {
    let pipeline = english();
    assert_tokens(&pipeline, "1970s", "1970s");
    assert_tokens(&pipeline, "bla 21st century", "bla 21st century");
    assert_tokens(
        &pipeline,
        "foo bar--my favourite---gave me",
        "foo bar -- my favourite --- gave me",
    );
}

#[test]
fn test_space_after_and_original_spelling() {
    let tokens = german().tokenize_paragraph("Hallo Susi. Na : )").unwrap();
    let susi = &tokens[1];
    assert_eq!(susi.text, "Susi");
    assert!(!susi.space_after);
    assert!(tokens[2].space_after);

    let emoticon = tokens.last().unwrap();
    assert_eq!(emoticon.text, ":)");
    assert_eq!(emoticon.original_spelling.as_deref(), Some(": )"));
}
