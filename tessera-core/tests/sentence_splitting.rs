//! Sentence splitting on plain text and XML, with and without sentence tags

use std::sync::OnceLock;

use tessera_core::{Config, ParagraphSeparator, Token, Tokenizer, XmlOptions};

fn build(xml_sentences: Option<&str>) -> Tokenizer {
    let mut builder = Config::builder()
        .language("de_CMC")
        .unwrap()
        .split_camel_case(true);
    if let Some(tag) = xml_sentences {
        builder = builder.xml_sentences(tag);
    }
    Tokenizer::with_config(builder.build().unwrap()).unwrap()
}

/// Shared German tokenizers, plain or with `<s>` sentence tags
fn tokenizer(tagged: bool) -> &'static Tokenizer {
    static PLAIN: OnceLock<Tokenizer> = OnceLock::new();
    static TAGGED: OnceLock<Tokenizer> = OnceLock::new();
    if tagged {
        TAGGED.get_or_init(|| build(Some("s")))
    } else {
        PLAIN.get_or_init(|| build(None))
    }
}

fn render(sentences: &[Vec<Token>]) -> Vec<String> {
    sentences
        .iter()
        .map(|s| {
            s.iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn assert_text(raw: &str, expected: &[&str]) {
    let sentences = tokenizer(false).tokenize_text(&[raw]).unwrap();
    assert_eq!(render(&sentences), expected, "input: {raw:?}");
}

fn assert_xml(raw: &str, expected: &[&str]) {
    let sentences = tokenizer(false)
        .tokenize_xml(raw, &XmlOptions::default())
        .unwrap();
    assert_eq!(render(&sentences), expected, "input: {raw:?}");
}

fn assert_xml_tagged(raw: &str, expected: &str) {
    let sentences = tokenizer(true)
        .tokenize_xml(raw, &XmlOptions::default())
        .unwrap();
    assert_eq!(render(&sentences).join(" "), expected, "input: {raw:?}");
}

#[test]
fn test_quotations() {
    assert_text(
        "„Ich habe heute keine Zeit“, sagte die Frau und flüsterte leise: „Und auch keine Lust.“ Wir haben 1.000.000 Euro.",
        &[
            "„ Ich habe heute keine Zeit “ , sagte die Frau und flüsterte leise : „ Und auch keine Lust . “",
            "Wir haben 1.000.000 Euro .",
        ],
    );
    assert_text(
        "Er sagte: \"Das ist schlimm.\" Und damit hatte er recht.",
        &["Er sagte : \" Das ist schlimm . \"", "Und damit hatte er recht ."],
    );
    assert_text(
        "Er sagte: „Das ist schlimm.“ Und damit hatte er recht.",
        &["Er sagte : „ Das ist schlimm . “", "Und damit hatte er recht ."],
    );
    assert_text("Foo \"Bar.\" Baz.", &["Foo \" Bar . \"", "Baz ."]);
    assert_text("Foo „Bar.“ Baz.", &["Foo „ Bar . “", "Baz ."]);
    assert_text("Foo “Bar.” Baz.", &["Foo “ Bar . ”", "Baz ."]);
    assert_text("„Hi!“ „Hi!“", &["„ Hi ! “", "„ Hi ! “"]);
    assert_text("Foo »Bar.« Baz.", &["Foo » Bar . «", "Baz ."]);
    assert_text("Foo «Bar.» Baz.", &["Foo « Bar . »", "Baz ."]);
    assert_text("Foo ‹Bar.› Baz.", &["Foo ‹ Bar . ›", "Baz ."]);
}

#[test]
fn test_abbreviations_and_ordinals() {
    assert_text(
        "Es gibt jedoch einige Vorsichtsmaßnahmen, die Du ergreifen kannst, z. B. ist es sehr empfehlenswert, dass Du Dein Zuhause von allem Junkfood befreist.",
        &["Es gibt jedoch einige Vorsichtsmaßnahmen , die Du ergreifen kannst , z. B. ist es sehr empfehlenswert , dass Du Dein Zuhause von allem Junkfood befreist ."],
    );
    assert_text(
        "Was sind die Konsequenzen der Abstimmung vom 12. Juni?",
        &["Was sind die Konsequenzen der Abstimmung vom 12. Juni ?"],
    );
    assert_text(
        "Wir könnten wandern, schwimmen, Fahrrad fahren, usw. Worauf hättest du denn Lust?",
        &[
            "Wir könnten wandern , schwimmen , Fahrrad fahren , usw.",
            "Worauf hättest du denn Lust ?",
        ],
    );
}

#[test]
fn test_sentence_ending_abbreviation_in_brackets() {
    assert_text("Foo (bar, baz, usw.) quux", &["Foo ( bar , baz , usw. ) quux"]);
    assert_text("(Bar, baz, usw.) Quux", &["( Bar , baz , usw. )", "Quux"]);
    assert_text("Foo, bar, baz, usw. quux", &["Foo , bar , baz , usw. quux"]);
    assert_text("Foo, bar, baz, usw. Quux", &["Foo , bar , baz , usw.", "Quux"]);
}

#[test]
fn test_numbers_emoticons_and_social_media() {
    assert_text(
        "blafasel bla. 700 Jahre später…",
        &["blafasel bla .", "700 Jahre später …"],
    );
    assert_text(
        "Großartig! 👍 Weiter so!",
        &["Großartig ! 👍", "Weiter so !"],
    );
    assert_text(
        "\"In welchen Modi werden wir in einigen Jahren kommunizieren?\" @berlinothar #ibk #cmc #dtaclarin14",
        &[
            "\" In welchen Modi werden wir in einigen Jahren kommunizieren ? \"",
            "@berlinothar #ibk #cmc #dtaclarin14",
        ],
    );
    assert_text(
        "Oder gibt es Unterschiede? #semibk",
        &["Oder gibt es Unterschiede ?", "#semibk"],
    );
}

#[test]
fn test_english_quotations() {
    let tokenizer = Tokenizer::for_language("en_PTB").unwrap();
    let sentences = tokenizer.tokenize_text(&["Foo \"Bar.\" Baz."]).unwrap();
    assert_eq!(render(&sentences), vec!["Foo \" Bar . \"", "Baz ."]);
}

#[test]
fn test_xml_chunks_delimit_sentences() {
    assert_xml("<foo><p>hallo</p>du</foo>", &["<foo> <p> hallo </p>", "du </foo>"]);
    assert_xml(
        "<foo><p></p><p>hallo</p>du</foo>",
        &["<foo> <p> </p> <p> hallo </p>", "du </foo>"],
    );
    assert_xml(
        "<bar><foo>Foo bar.</foo><foo></foo></bar>",
        &["<bar> <foo> Foo bar . </foo> <foo> </foo> </bar>"],
    );
    assert_xml("<foo>Foo<br></br>bar</foo>", &["<foo> Foo", "<br> </br> bar </foo>"]);
    assert_xml("<foo>Foo<br/>bar</foo>", &["<foo> Foo", "<br> </br> bar </foo>"]);
    assert_xml(
        "<foo><p>foo bar</p>\n\n<p>foo bar</p></foo>",
        &["<foo> <p> foo bar </p>", "<p> foo bar </p> </foo>"],
    );
    assert_xml(
        "<foo>Hallo Susi. <br/>Hallo Peter.</foo>",
        &["<foo> Hallo Susi .", "<br> </br> Hallo Peter . </foo>"],
    );
    assert_xml(
        "<foo>Hallo Susi. Hallo Peter.<br/></foo>",
        &["<foo> Hallo Susi .", "Hallo Peter . <br> </br> </foo>"],
    );
}

#[test]
fn test_xml_strip_tags() {
    let sentences = tokenizer(false)
        .tokenize_xml("<foo><p>hallo</p>du</foo>", &XmlOptions::default().strip_tags(true))
        .unwrap();
    assert_eq!(render(&sentences), vec!["hallo", "du"]);

    let sentences = tokenizer(true)
        .tokenize_xml("<foo><p>hallo</p>du</foo>", &XmlOptions::default().strip_tags(true))
        .unwrap();
    assert_eq!(render(&sentences), vec!["<s> hallo </s>", "<s> du </s>"]);
}

#[test]
fn test_sentence_tags_in_text() {
    let tokenizer = tokenizer(true);
    let expected = "<s> Hallo Susi . </s> <s> Hallo Peter &amp; Thomas . </s>";

    let sentences = tokenizer
        .tokenize_text(&["Hallo Susi. Hallo Peter & Thomas."])
        .unwrap();
    assert_eq!(render(&sentences).join(" "), expected);

    let sentences = tokenizer
        .tokenize_text_reader(
            "Hallo Susi. Hallo Peter & Thomas.".as_bytes(),
            ParagraphSeparator::SingleNewlines,
        )
        .unwrap();
    assert_eq!(render(&sentences).join(" "), expected);
}

#[test]
fn test_sentence_tags_flat() {
    assert_xml_tagged(
        "<foo>Hallo Susi. Hallo Peter.</foo>",
        "<foo> <s> Hallo Susi . </s> <s> Hallo Peter . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo><i></i>Hallo Susi. Hallo Peter.</foo>",
        "<foo> <i> </i> <s> Hallo Susi . </s> <s> Hallo Peter . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo><i>Hallo Susi</i>. Hallo Peter.</foo>",
        "<foo> <s> <i> Hallo Susi </i> . </s> <s> Hallo Peter . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo>Hallo <i>Susi</i>. Hallo Peter.</foo>",
        "<foo> <s> Hallo <i> Susi </i> . </s> <s> Hallo Peter . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo>Hallo Susi.<i> Hallo</i> Peter.</foo>",
        "<foo> <s> Hallo Susi . </s> <s> <i> Hallo </i> Peter . </s> </foo>",
    );
}

#[test]
fn test_sentence_tags_inside_elements() {
    assert_xml_tagged(
        "<foo><i>Hallo Susi.</i> Hallo Peter.</foo>",
        "<foo> <i> <s> Hallo Susi . </s> </i> <s> Hallo Peter . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo><i>Hallo Susi. Hallo Peter.</i></foo>",
        "<foo> <i> <s> Hallo Susi . </s> <s> Hallo Peter . </s> </i> </foo>",
    );
    assert_xml_tagged(
        "<foo>Hallo <i>Susi.</i> Hallo Peter.</foo>",
        "<foo> <s> Hallo <i> Susi . </i> </s> <s> Hallo Peter . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo><p>Hallo Susi.</p> <p></p> <p>Hallo Peter.</p></foo>",
        "<foo> <p> <s> Hallo Susi . </s> </p> <p> </p> <p> <s> Hallo Peter . </s> </p> </foo>",
    );
}

#[test]
fn test_sentence_tags_crossing_elements() {
    assert_xml_tagged(
        "<foo><i>Hallo Susi. Hallo</i> Peter.</foo>",
        "<foo> <i> <s> Hallo Susi . </s> </i> <s> <i> Hallo </i> Peter . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo><i>Hallo Susi. Hallo Peter. Hallo</i> Thomas.</foo>",
        "<foo> <i> <s> Hallo Susi . </s> <s> Hallo Peter . </s> </i> <s> <i> Hallo </i> Thomas . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo>Hallo <i>Susi. Hallo Peter. Hallo</i> Thomas.</foo>",
        "<foo> <s> Hallo <i> Susi . </i> </s> <i> <s> Hallo Peter . </s> </i> <s> <i> Hallo </i> Thomas . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo>Hallo <i>Susi. Hallo Peter. Hallo Thomas.</i></foo>",
        "<foo> <s> Hallo <i> Susi . </i> </s> <i> <s> Hallo Peter . </s> <s> Hallo Thomas . </s> </i> </foo>",
    );
    assert_xml_tagged(
        "<foo><i>Hallo</i> Susi<i>. Hallo</i> Peter<i>.</i></foo>",
        "<foo> <s> <i> Hallo </i> Susi <i> . </i> </s> <s> <i> Hallo </i> Peter <i> . </i> </s> </foo>",
    );
}

#[test]
fn test_sentence_tags_nested_elements() {
    assert_xml_tagged(
        "<foo><a><b>Hallo <c>Susi. <d>Hallo Peter. Hallo</d></c></b> Thomas.</a></foo>",
        "<foo> <a> <b> <s> Hallo <c> Susi . </c> </s> <c> <d> <s> Hallo Peter . </s> </d> </c> </b> <s> <b> <c> <d> Hallo </d> </c> </b> Thomas . </s> </a> </foo>",
    );
    assert_xml_tagged(
        "<foo>Hallo <i><b>Susi. Hallo Peter. Hallo</b></i> Thomas.</foo>",
        "<foo> <s> Hallo <i> <b> Susi . </b> </i> </s> <i> <b> <s> Hallo Peter . </s> </b> </i> <s> <i> <b> Hallo </b> </i> Thomas . </s> </foo>",
    );
    assert_xml_tagged(
        "<a>Hallo <b><d>Susi.</d> Hallo</b> Peter.</a>",
        "<a> <s> Hallo <b> <d> Susi . </d> </b> </s> <s> <b> Hallo </b> Peter . </s> </a>",
    );
    assert_xml_tagged(
        "<a>Hallo <b><c><d>Susi.</d> Hallo</c></b> Peter.</a>",
        "<a> <s> Hallo <b> <c> <d> Susi . </d> </c> </b> </s> <s> <b> <c> Hallo </c> </b> Peter . </s> </a>",
    );
}

#[test]
fn test_sentence_tags_with_empty_elements() {
    assert_xml_tagged(
        "<a>Hallo Susi.<x/> Hallo Peter.<x/></a>",
        "<a> <s> Hallo Susi . </s> <x> </x> <s> Hallo Peter . </s> <x> </x> </a>",
    );
    assert_xml_tagged(
        "<foo><i>Hallo Susi.<x/></i> <i>Hallo Peter.</i></foo>",
        "<foo> <i> <s> Hallo Susi . </s> <x> </x> </i> <i> <s> Hallo Peter . </s> </i> </foo>",
    );
    assert_xml_tagged(
        "<foo>Hallo <i>Susi.<x/> Hallo</i> Peter.</foo>",
        "<foo> <s> Hallo <i> Susi . </i> </s> <s> <i> <x> </x> Hallo </i> Peter . </s> </foo>",
    );
    assert_xml_tagged(
        "<foo><p><b>Hallo</b> <i>Susi.<x/></i></p> Hallo Peter.</foo>",
        "<foo> <p> <s> <b> Hallo </b> <i> Susi . <x> </x> </i> </s> </p> <s> Hallo Peter . </s> </foo>",
    );
}

#[test]
fn test_sentence_flags_on_output() {
    let sentences = tokenizer(false)
        .tokenize_text(&["Hallo Susi. Hallo Peter."])
        .unwrap();
    for sentence in &sentences {
        assert!(sentence.first().unwrap().first_in_sentence);
        assert!(sentence.last().unwrap().last_in_sentence);
    }
}
