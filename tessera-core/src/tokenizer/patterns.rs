//! Compiled tokenization rules
//!
//! Every pattern is compiled once per pipeline and shared read-only
//! between workers. Lookbehinds are fixed-length; where a rule needs a
//! variable-length lookbehind it is written as a conjunction
//! (`(?<!a)(?<!ab)`) or disjunction (`(?:(?<=a)|(?<=ab))`) of fixed-length
//! ones.

use super::split::{Boundary, SplitMode};
use crate::error::{Error, Result};
use crate::language::resources::word_list;
use crate::language::{LanguageConfig, OrdinalStyle, PunctuationStyle, SlashStyle};
use crate::token::TokenClass;
use fancy_regex::{Captures, Regex};
use std::collections::HashSet;

type Replacement = fn(&Captures<'_>) -> String;

/// Named group that only serves as a backreference target; never split out
const SEPARATOR_GROUP: &str = "sep";

/// A pattern together with the way its matches become tokens
pub(crate) struct Rule {
    regex: Regex,
    mode: SplitMode,
    /// Indices of named groups; each participating group becomes a token
    groups: Vec<usize>,
    replacement: Option<Replacement>,
}

impl Rule {
    pub fn new(pattern: &str, class: TokenClass) -> Result<Self> {
        let regex = Regex::new(pattern)?;
        let groups = regex
            .capture_names()
            .enumerate()
            .filter_map(|(index, name)| match name {
                Some(name) if name != SEPARATOR_GROUP => Some(index),
                _ => None,
            })
            .collect();
        Ok(Self {
            regex,
            mode: SplitMode::locked(class),
            groups,
            replacement: None,
        })
    }

    /// Treat the whole match as one token even if the pattern has named groups
    pub fn whole_match(mut self) -> Self {
        self.groups.clear();
        self
    }

    pub fn delete_whitespace(mut self) -> Self {
        self.mode.delete_whitespace = true;
        self
    }

    pub fn replace_with(mut self, replacement: Replacement) -> Self {
        self.replacement = Some(replacement);
        self
    }

    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn boundaries(&self, text: &str) -> Result<Vec<Boundary>> {
        let mut boundaries = Vec::new();
        for captures in self.regex.captures_iter(text) {
            let captures = captures?;
            if self.groups.is_empty() {
                let Some(whole) = captures.get(0) else { continue };
                if whole.start() == whole.end() {
                    continue;
                }
                boundaries.push(Boundary {
                    start: whole.start(),
                    end: whole.end(),
                    replacement: self.replacement.map(|replace| replace(&captures)),
                });
            } else {
                let mut spans: Vec<Boundary> = self
                    .groups
                    .iter()
                    .filter_map(|&group| captures.get(group))
                    .filter(|m| m.start() < m.end())
                    .map(|m| Boundary::new(m.start(), m.end()))
                    .collect();
                spans.sort_by_key(|boundary| boundary.start);
                boundaries.extend(spans);
            }
        }
        Ok(boundaries)
    }
}

/// Matches of `candidates` that are kept whole when they are in `items`
pub(crate) struct SetRule {
    pub candidates: Regex,
    pub items: HashSet<String>,
    pub lowercase: bool,
}

impl SetRule {
    pub fn boundaries(&self, text: &str) -> Result<Vec<Boundary>> {
        let mut boundaries = Vec::new();
        for m in self.candidates.find_iter(text) {
            let m = m?;
            let found = if self.lowercase {
                self.items.contains(&m.as_str().to_lowercase())
            } else {
                self.items.contains(m.as_str())
            };
            if found {
                boundaries.push(Boundary::new(m.start(), m.end()));
            }
        }
        Ok(boundaries)
    }
}

/// Rules that only apply to English
pub(crate) struct EnglishPatterns {
    pub decades: Rule,
    pub clitics: Vec<Rule>,
    pub trailing_apostrophe: Regex,
    pub contractions: Vec<Rule>,
    pub number_abbreviation: Rule,
    pub degree: Rule,
    pub non_breaking: Vec<Rule>,
    pub time: Rule,
    pub numbers: Vec<Rule>,
    pub slash_words: Rule,
    pub hyphen: Rule,
    pub quotation_marks: Rule,
}

/// Every compiled rule of the pipeline
pub(crate) struct Patterns {
    pub spaces: regex::Regex,
    pub controls: regex::Regex,
    pub junk: regex::Regex,

    pub xml_declaration: Rule,
    pub tag: Rule,
    pub textfaces_space: Rule,
    pub unicode_flags: Rule,
    pub textfaces_emoji: Rule,
    pub emoji_in_cluster: regex::Regex,
    pub emoji_char: regex::Regex,

    pub space_emoticon: Rule,
    pub email: Rule,
    pub urls: Vec<Rule>,
    pub entity: Rule,
    pub emoticons: Vec<Rule>,

    pub mention: Rule,
    pub hashtag_sequence: Regex,
    pub single_hashtag: Rule,
    pub action_word: Rule,
    pub underline: Rule,
    pub emoji_placeholder: Rule,

    pub plus_ampersand: Rule,
    pub simple_plus_ampersand: SetRule,

    pub camel_case_token: Rule,
    pub simple_camel_case: SetRule,
    pub in_and_innen: Rule,
    pub camel_case: Regex,

    pub gender_marker: Rule,
    pub english: Option<EnglishPatterns>,

    pub measurement: Rule,
    pub abbreviations: Vec<Rule>,
    pub abbreviation: Regex,
    pub multipart_abbreviation: regex::Regex,
    pub split_multipart_abbreviations: bool,
    pub artikel: Rule,

    pub isbn: Rule,
    pub dates: Vec<Rule>,
    pub time: Rule,
    pub ordinals: Vec<Rule>,
    pub numbers: Vec<Rule>,

    pub question_exclamation: Rule,
    pub arrow: Rule,
    pub parens: Rule,
    pub german_slash: Option<Rule>,
    pub letter_apostrophe_word: Rule,
    pub quotes: Vec<Rule>,
    pub letter_sharp: Rule,
    pub punctuation: Rule,
    pub ellipsis: Rule,
    pub dots: Vec<Rule>,
}

const URL_START: &str = r"(?:(?:https?|ftp|svn)://|(?:https?://)?www\.)";

const FRACTION: &str =
    r"(?:\d{1,2}/(?:(?:[1-9]|10)|(?:\d{1,2}|100)/100|(?:\d{1,3}|1000)/1000))";
const SCIENTIFIC_NUMBER: &str = r"(?:[−+\-]?(?:\d*[.,])?\d+(?:[eE][−+\-]?\d+)?)";
const GROUPED_NUMBER: &str =
    r"(?:\d{1,3}(?:[.]\d{3})+(?:,\d+)?|\d{1,3}(?:,\d{3})+(?:[.]\d+)?)";

/// Neither a word character nor a digit followed by a decimal separator
const NUMBER_START: &str = r"(?<!\w)(?<!\d[.,])";
const NUMBER_END: &str = r"(?![.,]?\d)";

const ENGLISH_CONTRACTIONS: &[&str] = &[
    r"\b(?P<p1>a)(?P<p2>lot)\b",
    r"\b(?P<p1>gon)(?P<p2>na)\b",
    r"\b(?P<p1>got)(?P<p2>ta)\b",
    r"\b(?P<p1>lem)(?P<p2>me)\b",
    r"\b(?P<p1>out)(?P<p2>ta)\b",
    r"\b(?P<p1>wan)(?P<p2>na)\b",
    r"\b(?P<p1>c'm)(?P<p2>on)\b",
    r"\b(?P<p1>more)(?P<p2>['’]n)\b",
    r"\b(?P<p1>d['’])(?P<p2>ye)\b",
    r"(?<!\w)(?P<p1>['’]t)(?P<p2>is)\b",
    r"(?<!\w)(?P<p1>['’]t)(?P<p2>was)\b",
    r"\b(?P<p1>there)(?P<p2>s)\b",
    r"\b(?P<p1>i)(?P<p2>m)\b",
    r"\b(?P<p1>you)(?P<p2>re)\b",
    r"\b(?P<p1>he)(?P<p2>s)\b",
    r"\b(?P<p1>she)(?P<p2>s)\b",
    r"\b(?P<p1>ai)(?P<p2>nt)\b",
    r"\b(?P<p1>are)(?P<p2>nt)\b",
    r"\b(?P<p1>is)(?P<p2>nt)\b",
    r"\b(?P<p1>do)(?P<p2>nt)\b",
    r"\b(?P<p1>does)(?P<p2>nt)\b",
    r"\b(?P<p1>did)(?P<p2>nt)\b",
    r"\b(?P<p1>i)(?P<p2>ve)\b",
    r"\b(?P<p1>you)(?P<p2>ve)\b",
    r"\b(?P<p1>they)(?P<p2>ve)\b",
    r"\b(?P<p1>have)(?P<p2>nt)\b",
    r"\b(?P<p1>has)(?P<p2>nt)\b",
    r"\b(?P<p1>can)(?P<p2>not)\b",
    r"\b(?P<p1>ca)(?P<p2>nt)\b",
    r"\b(?P<p1>could)(?P<p2>nt)\b",
    r"\b(?P<p1>wo)(?P<p2>nt)\b",
    r"\b(?P<p1>would)(?P<p2>nt)\b",
    r"\b(?P<p1>you)(?P<p2>ll)\b",
    r"\b(?P<p1>let)(?P<p2>s)\b",
    r"\b(?P<p1>du)(?P<p2>n)(?P<p3>no)\b",
    r"\b(?P<p1>wha)(?P<p2>dd)(?P<p3>ya)\b",
    r"\b(?P<p1>wha)(?P<p2>t)(?P<p3>cha)\b",
    r"\b(?P<p1>i)(?P<p2>'m)(?P<p3>a)\b",
];

/// Escaped alternation of literal entries
fn alternation(entries: &[String]) -> String {
    if entries.is_empty() {
        return r"[^\s\S]".to_string();
    }
    entries
        .iter()
        .map(|entry| fancy_regex::escape(entry).into_owned())
        .collect::<Vec<_>>()
        .join("|")
}

/// Alternations try entries in order, so a longer entry must precede any
/// entry that is a prefix of it
fn sorted_longest_first(mut entries: Vec<String>) -> Vec<String> {
    entries.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    entries.dedup();
    entries
}

/// Split a word list into entries matching `simple` and the rest
fn partition(entries: Vec<String>, simple: &regex::Regex) -> (Vec<String>, Vec<String>) {
    entries.into_iter().partition(|entry| simple.is_match(entry))
}

fn optional_list(name: &Option<String>) -> Result<Vec<String>> {
    match name {
        Some(name) => word_list(name),
        None => Ok(Vec::new()),
    }
}

fn plain(pattern: &str) -> Result<regex::Regex> {
    regex::Regex::new(pattern).map_err(|e| Error::Configuration(format!("invalid pattern: {e}")))
}

fn join_eyes_and_mouth(captures: &Captures<'_>) -> String {
    let eyes = captures.get(1).map_or("", |m| m.as_str());
    let mouth = captures.get(2).map_or("", |m| m.as_str());
    format!("{eyes}{mouth}")
}

impl Patterns {
    pub fn new(config: &LanguageConfig, custom_abbreviations: &[String]) -> Result<Self> {
        use TokenClass::*;

        let resources = &config.resources;
        let rules = &config.rules;
        let number = format!("(?P<number>{FRACTION}|{SCIENTIFIC_NUMBER}|{GROUPED_NUMBER})");
        let number_range = format!(
            "(?:(?P<frfrom>{FRACTION})(?P<frdash>[-–])(?P<frto>{FRACTION})\
             |(?P<snfrom>{SCIENTIFIC_NUMBER})(?P<sndash>[-–])(?P<snto>{SCIENTIFIC_NUMBER})\
             |(?P<gnfrom>{GROUPED_NUMBER})(?P<gndash>[-–])(?P<gnto>{GROUPED_NUMBER}))"
        );

        // emoticons and text faces
        let emoticon_list = alternation(&word_list("emoticons.txt")?);
        let emoticon = format!(
            r"(?:(?:[:;]|(?<!\d)8)[-'oO]?(?:\)+|\(+|[*]|([DPp])\1*(?!\w)))|(?:\b[Xx]D+\b)|(?:\b(?:D'?:|oO)\b)|(?:(?<!\b\d)(?<!\b\d\d):\w+:(?!\d{{2}}\b))|{emoticon_list}"
        );
        let heart = r"(?:^|(?<![\s\S]{2})(?<=\D)|(?<=\D )|(?<=.[^\d ])|(?<=[<^]3)|(?<=[<^]3 ))[<^]3(?!\d)";

        // tokens with + or &
        let simple_plus_amp = plain(r"^\w+[&+]\w+$")?;
        let (simple, other) =
            partition(word_list(&resources.tokens_with_plus_or_ampersand)?, &simple_plus_amp);
        let simple_plus_ampersand = SetRule {
            candidates: Regex::new(r"\b\w+[&+]\w+\b")?,
            items: simple.iter().map(|s| s.to_lowercase()).collect(),
            lowercase: true,
        };
        let plus_ampersand = Rule::new(
            &format!(r"(?i)(?<!\w)(?:{})(?!\w)", alternation(&other)),
            Regular,
        )?;

        // camelCase
        let (simple, other) = partition(word_list(&resources.camel_case_tokens)?, &plain(r"^\w+$")?);
        let simple_camel_case = SetRule {
            candidates: Regex::new(r"\b\w*\p{Ll}\p{Lu}\w*\b")?,
            items: simple.into_iter().collect(),
            lowercase: false,
        };
        let camel_case_token = Rule::new(
            &format!(r"\b(?:{}|Mac\p{{Lu}}\p{{Ll}}*)\b", alternation(&other)),
            Regular,
        )?;

        // abbreviations
        let single_token_abbreviations = word_list(&resources.single_token_abbreviations)?;
        let mut abbreviation_list: Vec<String> = word_list(&resources.abbreviations)?
            .into_iter()
            .map(|a| a.to_lowercase())
            .collect();
        abbreviation_list.extend(custom_abbreviations.iter().cloned());
        let abbreviation_list = sorted_longest_first(abbreviation_list);
        let abbreviations = vec![
            Rule::new(
                r"(?<![\w.])(?P<a_letter>\p{L})(?P<b_ellipsis>\.{3})(?!\.)",
                Abbreviation,
            )?,
            Rule::new(r"(?<![\w.&])&c\.(?!\p{L}{1,3}\.)", Abbreviation)?,
            Rule::new(r"(?i)(?<![\w.])([\p{L}-]+str\.)(?!\p{L})", Abbreviation)?,
            Rule::new(r"(?i)(?<![\w.])(\w+\.-?Nr\.)(?!\p{L}{1,3}\.)", Abbreviation)?,
            Rule::new(
                &format!(
                    r"(?i)(?<![\w.])(?:{})(?!\p{{L}})",
                    alternation(&single_token_abbreviations)
                ),
                Abbreviation,
            )?,
            Rule::new(r"(?<![\w.])\p{L}\.(?!\p{L}{1,3}\.)", Abbreviation)?,
            Rule::new(r"(?i)(?<!\d )\bps\.", Abbreviation)?,
        ];
        let abbreviation = Regex::new(&format!(
            r"(?i)(?<![\p{{L}}.])(?:(?:\p{{L}}\.){{2,}}|{})+(?!\p{{L}}{{1,3}}\.)",
            alternation(&abbreviation_list)
        ))?;

        // measurements
        let units = alternation(&word_list(&resources.units)?);
        let measurement = Rule::new(
            &format!(r"(?i){NUMBER_START}(?:{number}|{number_range}) ?(?P<unit>{units})(?!\w)"),
            Measurement,
        )?;

        // dates
        let dates = [
            r"(?<![\d.])(?P<a_year>\d{4})(?P<b_month_or_day>(?P<sep>[/-])\d{1,2})(?P<c_day_or_month>\k<sep>\d{1,2})(?!\d)",
            r"(?<![\d.])(?P<a_day>(?:0?[1-9]|1[0-9]|2[0-9]|3[01])(?P<sep>[./-]))(?P<b_month>(?:0?[1-9]|1[0-2])\k<sep>)(?P<c_year>(?:\d\d){1,2})(?!\d)",
            r"(?<![\d.])(?P<a_month>(?:0?[1-9]|1[0-2])(?P<sep>[./-]))(?P<b_day>(?:0?[1-9]|1[0-9]|2[0-9]|3[01])\k<sep>)(?P<c_year>(?:\d\d){1,2})(?!\d)",
            r"(?<![\d.])(?P<a_day_or_month>\d{1,2}(?P<sep>[./-]))(?P<b_day_or_month>\d{1,2}\k<sep>)(?!\d)",
        ]
        .into_iter()
        .map(|pattern| {
            let rule = Rule::new(pattern, Date)?;
            Ok(if rules.split_dates { rule } else { rule.whole_match() })
        })
        .collect::<Result<Vec<_>>>()?;

        let mut ordinals = Vec::with_capacity(2);
        ordinals.push(match rules.ordinal_style {
            OrdinalStyle::German => Rule::new(
                r"(?<![\w.])(?:\d{1,3}|\d{5,}|[3-9]\d{3})\.(?!\d)",
                Ordinal,
            )?,
            OrdinalStyle::English => {
                Rule::new(r"\b(?:\d+(?:,\d+)*)?(?:1st|2nd|3rd|\dth)\b", Ordinal)?
            }
        });
        ordinals.push(Rule::new(
            r"\b(?=[MDCLXVI])M{0,4}(?:C[MD]|D?C{0,3})(?:X[CL]|L?X{0,3})(?:I[XV]|V?I{0,3})\.",
            Ordinal,
        )?);

        let numbers = vec![
            Rule::new(&format!("{NUMBER_START}{number_range}{NUMBER_END}"), Number)?,
            Rule::new(r"(?<!\w)\d+/\d+(?![\d/])", Number)?,
            Rule::new(
                r"(?P<arg1>\d+(?:[,.]\d+)?)(?P<op>[+*x×÷−])(?P<arg2>\d+(?:[,.]\d+)?)",
                Number,
            )?,
            Rule::new(r"(?<!\w)(?:\d+[\d,.]*[,.]-)(?!\w)", Amount)?,
            Rule::new(
                r"(?i)(?<!\w)(?P<a_semester>[WS]S|SoSe|WiSe)(?P<b_jahr>\d\d(?:/\d\d)?)(?!\w)",
                Semester,
            )?,
            Rule::new(r"(?<!\w)(?<!\w-)(?:\d+-?[\p{L}@][\p{L}@-]*)(?!\w)", Regular)?,
            Rule::new(&format!(r"(?<!\w-){NUMBER_START}{number}{NUMBER_END}"), Number)?,
            Rule::new(
                &format!(r"{NUMBER_START}(?:\d{{1,3}}[.]){{3}}\d{{1,3}}{NUMBER_END}"),
                Number,
            )?,
            Rule::new(
                &format!(r"{NUMBER_START}(?:\d+[.])+\d+[.]?{NUMBER_END}"),
                Number,
            )?,
        ];

        let english = if rules.english_contractions {
            Some(EnglishPatterns::new(config)?)
        } else {
            None
        };

        let german_slash = match rules.slash_style {
            SlashStyle::German => Some(Rule::new(r"(/+)(?!in(?:nen)?|en)", Symbol)?),
            SlashStyle::English => None,
        };

        let punctuation = match rules.punctuation_style {
            PunctuationStyle::German => Rule::new(
                r#"([#<>%‰€$£₤¥°@~*„“”‚‘"»«›‹,;:+×÷±≤≥=&–—])"#,
                Symbol,
            )?,
            PunctuationStyle::English => {
                Rule::new(r"([#<>%‰€$£₤¥°@~*,;:+×÷±≤≥=&/–—\-]+)", Symbol)?
            }
        };

        Ok(Self {
            spaces: plain(r"\s+")?,
            controls: plain(r"[\x{0000}-\x{001F}\x{007F}-\x{009F}]")?,
            junk: plain(
                r"[\x{00AD}\x{061C}\x{200B}-\x{200F}\x{202A}-\x{202E}\x{2060}\x{2066}-\x{2069}\x{FEFF}]",
            )?,

            xml_declaration: Rule::new(
                r#"(?i)<\?xml(?:\s+[_:A-Z][-.:\w]*\s*=\s*(?:"[^"]*"|'[^']*'))*\s*\?>"#,
                XmlTag,
            )?,
            tag: Rule::new(
                r#"(?i)<(?:[_:A-Z][-.:\w]*(?:\s+[_:A-Z][-.:\w]*\s*=\s*(?:"[^"]*"|'[^']*'))*\s*/?|/[_:A-Z][-.:\w]*\s*)>"#,
                XmlTag,
            )?,
            textfaces_space: Rule::new(&alternation(&word_list("textfaces_space.txt")?), Emoticon)?,
            unicode_flags: Rule::new(r"[\x{1F1E6}-\x{1F1FF}]{2}\x{FE0F}?", Emoticon)?,
            textfaces_emoji: Rule::new(&alternation(&word_list("textfaces_emoji.txt")?), Emoticon)?,
            emoji_in_cluster: plain(r"[\p{Extended_Pictographic}\p{Emoji_Presentation}\x{FE0F}]")?,
            emoji_char: plain(r"[\p{Extended_Pictographic}\p{Emoji_Presentation}]")?,

            space_emoticon: Rule::new(r"([:;]) ([()])(?! ?(?:00|[+])\d)", Emoticon)?
                .replace_with(join_eyes_and_mouth),
            email: Rule::new(
                r"\b[\w.%+-]+(?:@| \[at\] )[\w.-]+(?:\.| \[?dot\]? )\p{L}{2,}\b",
                EmailAddress,
            )?
            .delete_whitespace(),
            urls: vec![
                Rule::new(
                    &format!(
                        r"(?i)(?P<lsb>\[)[^\]]+(?P<rsb>\])(?P<lrb>\()(?:{URL_START}[^)]+)(?P<rrb>\))"
                    ),
                    Symbol,
                )?,
                Rule::new(
                    &format!(
                        r#"(?i)\b{URL_START}[^\]\[<> ]+?\(\S*?\)[^\]\[<> ]*(?=$|['. "!?,;])"#
                    ),
                    Url,
                )?,
                Rule::new(
                    &format!(r#"(?i)\b{URL_START}[^\]\[<> ]+[^\]\[<>'. "!?,;:()]"#),
                    Url,
                )?,
                Rule::new(r"(?i)\bdoi:10\.\d+/\S+", Url)?,
                Rule::new(r"(?i)(?<=\bdoi: )10\.\d+/\S+", Url)?,
                Rule::new(
                    r"(?i)\b[\w./-]+\.(?:de|com|tv|me|net|us|org|at|cc|ly|be|ch|info|live|eu|edu|gov|jpg|png|gif|log|txt|xlsx?|docx?|pptx?|pdf)(?:-\w+)?\b",
                    Url,
                )?,
                Rule::new(r"(?i)(?<!\w)/?[rlu](?:/\w+)+/?(?!\w)", Url)?,
            ],
            entity: Rule::new(r"(?i)&(?:quot|amp|apos|lt|gt|#\d+|#x[0-9a-f]+);", XmlEntity)?,
            emoticons: vec![
                Rule::new(heart, Emoticon)?,
                Rule::new(&emoticon, Emoticon)?,
                Rule::new(r"[\x{2600}-\x{27BF}]", Emoticon)?,
            ],

            mention: Rule::new(r"[@]\w+(?!\w)", Mention)?,
            hashtag_sequence: Regex::new(r"(?<!\w)(?:[#]\w(?:[\w-]*\w)?)+(?!\w)")?,
            single_hashtag: Rule::new(r"[#]\w(?:[\w-]*\w)?(?!\w)", Hashtag)?,
            action_word: Rule::new(
                r"(?<!\w)(?P<a_open>[*+])(?P<b_middle>[^\s*]+)(?P<c_close>[*])(?!\w)",
                ActionWord,
            )?,
            underline: Rule::new(r"(?<!\w)(?P<left>_)(?:\w[^_]+\w)(?P<right>_)(?!\w)", Regular)?,
            emoji_placeholder: Rule::new(r"\bemojiQ\p{L}{3,}\b", Emoticon)?,

            plus_ampersand,
            simple_plus_ampersand,

            camel_case_token,
            simple_camel_case,
            in_and_innen: Rule::new(r"\b\p{L}+\p{Ll}In(?:nen)?\p{Ll}*\b", Regular)?,
            camel_case: Regex::new(r"(?<=\p{Ll}{2})(\p{Lu})(?!\p{Lu}|\b)")?,

            gender_marker: Rule::new(r"(?i)\b\p{L}+[*:/]in(?:nen)?\p{Ll}*\b", Regular)?,
            english,

            measurement,
            abbreviations,
            abbreviation,
            multipart_abbreviation: plain(r"^(?:\p{L}+\.){2,}$")?,
            split_multipart_abbreviations: rules.split_multipart_abbreviations,
            artikel: Rule::new(r"(?i)\bArt.(?=\s?\d)", Abbreviation)?,

            isbn: Rule::new(
                r"(?i)\b(?:(?<=ISBN)|(?<=ISBN )|(?<=ISBN:)|(?<=ISBN: )|(?<=ISBN-1[03])|(?<=ISBN-1[03] )|(?<=ISBN-1[03]:)|(?<=ISBN-1[03]: )|(?<![0-9][ -]))(?:(?:[0-9]{9}[0-9X])|(?:(?=[0-9X -]{13}\b)[0-9]{1,5}([ -])[0-9]{1,7}\1[0-9]{1,7}\1[0-9X])|(?:97[89][0-9]{10})|(?:(?=[0-9X -]{17}\b)97[89]([ -])[0-9]{1,5}\2[0-9]{1,7}\2[0-9]{1,7}\2[0-9]))(?!\w|[ -][0-9])",
                Number,
            )?
            .delete_whitespace(),
            dates,
            time: Rule::new(r"(?<!\w)\d{1,2}(?:(?::\d{2}){1,2}){1,2}(?![\d:])", Time)?,
            ordinals,
            numbers,

            question_exclamation: Rule::new(r"([!?]+)", Symbol)?,
            arrow: Rule::new(r"(-+ ?>|< ?-+|[\x{2190}-\x{21FF}])", Symbol)?.delete_whitespace(),
            parens: Rule::new(
                r"(?i)((?:(?<=\w)[(](?!inn?[)]))|(?:(?<!\w)[(])|(?:(?<!.[(]in)(?<![(]inn)[)])|[\]\[{}])",
                Symbol,
            )?,
            german_slash,
            letter_apostrophe_word: Rule::new(r"(?i)\b([dlo]['’]\p{L}+)\b", Regular)?,
            quotes: vec![
                Rule::new(r"(?:(?<!`)``(?!`))|(?:(?<!')''(?!'))", Symbol)?,
                Rule::new(r"(?<!`)(?P<left>`)(?:[^`']+)(?P<right>')(?!')", Symbol)?,
                Rule::new(r"(?<!\p{L})(?P<left>['])(?:[^']+)(?P<right>['])(?!\p{L})", Symbol)?,
            ],
            letter_sharp: Rule::new(r"(?i)\b[acdfg]#(?:-\p{L}+)?(?!\w)", Regular)?,
            punctuation,
            ellipsis: Rule::new(r"\.{2,}|…+(?:\.{2,})?", Symbol)?,
            dots: vec![
                Rule::new(r"(?<=\p{Ll}{2})(\.)(?=\p{Lu}\p{Ll}{2})", Symbol)?,
                Rule::new(r"(\.)", Symbol)?,
            ],
        })
    }
}

impl EnglishPatterns {
    fn new(config: &LanguageConfig) -> Result<Self> {
        use TokenClass::*;

        let resources = &config.resources;
        let prefixes = alternation(&optional_list(&resources.non_breaking_prefixes)?);
        let suffixes = alternation(&optional_list(&resources.non_breaking_suffixes)?);
        let words = alternation(&optional_list(&resources.non_breaking_hyphenated_words)?);

        let contractions = ENGLISH_CONTRACTIONS
            .iter()
            .map(|pattern| Rule::new(&format!("(?i){pattern}"), Regular))
            .collect::<Result<Vec<_>>>()?;

        let mut numbers = Vec::with_capacity(3);
        if config.rules.us_numbers {
            numbers.push(Rule::new(
                r"(?<![\d-])(?:[2-9]\d{2}[/-])?\d{3}-\d{4}(?![\d-])",
                Number,
            )?);
            numbers.push(Rule::new(r"(?<![\d-])\d{5}-\d{4}(?![\d-])", Number)?);
            numbers.push(Rule::new(
                r"(?<![\d-])\d+-(?:\d+-)+\d+(?![\d-])|(?<![\d/])\d+/(?:\d+/)+\d+(?![\d/])",
                Number,
            )?);
        }

        Ok(Self {
            decades: Rule::new(r"\b(?:[12]\d)?\d0['’]?s\b", Regular)?,
            clitics: vec![
                Rule::new(r"(?i)(?<=\w)(['’][dms])\b", Regular)?,
                Rule::new(r"(?i)(?<=\w)(['’](?:ll|re|ve))\b", Regular)?,
                Rule::new(r"(?i)(?<=\w)(n['’]t)\b", Regular)?,
            ],
            trailing_apostrophe: Regex::new(r"(?<=[sx])(['’])(?![\w'])")?,
            contractions,
            number_abbreviation: Rule::new(r"(?i)\b(no\.)\s*(?=\d)", Regular)?,
            degree: Rule::new(r"(?i)(?:(?<=\d)|(?<=\d ))°(?:F|C|Oe)\b", Regular)?,
            non_breaking: vec![
                Rule::new(&format!(r"(?i)\b(?:{words})\b"), Regular)?,
                Rule::new(&format!(r"(?i)(?<![\w-])(?:{prefixes})-[\w-]+"), Regular)?,
                Rule::new(&format!(r"(?i)\b[\w-]+-(?:{suffixes})(?![\w-])"), Regular)?,
            ],
            time: Rule::new(
                r"(?i)(?<!\w)(?P<a_time>\d{1,2}(?:[.:]\d{2}){0,2}) ?(?P<b_am_pm>(?:[ap]m\b|[ap]\.m\.(?!\w)))",
                Time,
            )?,
            numbers,
            slash_words: Rule::new(
                r"(?i)\b(?:w/o|w/out|b/t|l/c|b/c|d/c|u/s)\b|\bw/(?!\w)",
                Regular,
            )?,
            hyphen: Rule::new(r"(?<=\w)-+(?=\w)", Symbol)?,
            quotation_marks: Rule::new(r#"([„“”‚‘’"»«›‹])"#, Symbol)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;

    fn patterns(language: Language) -> Patterns {
        Patterns::new(language.config().unwrap(), &[]).unwrap()
    }

    fn spans(rule: &Rule, text: &str) -> Vec<String> {
        rule.boundaries(text)
            .unwrap()
            .into_iter()
            .map(|b| text[b.start..b.end].to_string())
            .collect()
    }

    #[test]
    fn test_all_patterns_compile() {
        let german = patterns(Language::GermanWeb);
        assert!(german.english.is_none());
        assert!(german.german_slash.is_some());

        let english = patterns(Language::EnglishFormal);
        assert!(english.english.is_some());
        assert!(english.german_slash.is_none());
    }

    #[test]
    fn test_named_groups_split_dates() {
        let german = patterns(Language::GermanWeb);
        assert_eq!(spans(&german.dates[1], "am 24.12.2023 war"), vec!["24.", "12.", "2023"]);

        let english = patterns(Language::EnglishFormal);
        assert_eq!(spans(&english.dates[1], "on 24.12.2023 we"), vec!["24.12.2023"]);
    }

    #[test]
    fn test_date_separator_must_repeat() {
        let german = patterns(Language::GermanWeb);
        assert_eq!(spans(&german.dates[0], "2023-12-24"), vec!["2023", "-12", "-24"]);
        assert!(spans(&german.dates[0], "2023-12/24").is_empty());
        assert_eq!(spans(&german.dates[3], "am 24.12. frei"), vec!["24.", "12."]);
        assert!(spans(&german.dates[1], "24.12/2023").is_empty());
    }

    #[test]
    fn test_space_emoticon_replacement() {
        let german = patterns(Language::GermanWeb);
        let boundaries = german.space_emoticon.boundaries("Na : ) gut").unwrap();
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].replacement.as_deref(), Some(":)"));
        assert!(german
            .space_emoticon
            .boundaries("Tel: (+49) 123")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_number_range_groups() {
        let german = patterns(Language::GermanWeb);
        assert_eq!(spans(&german.numbers[0], "1990-2000"), vec!["1990", "-", "2000"]);
    }

    #[test]
    fn test_heart_emoticon_not_after_number() {
        let german = patterns(Language::GermanWeb);
        assert_eq!(spans(&german.emoticons[0], "ich <3 dich"), vec!["<3"]);
        assert!(spans(&german.emoticons[0], "5 <3").is_empty());
    }

    #[test]
    fn test_simple_set_rule_lowercases() {
        let german = patterns(Language::GermanWeb);
        let boundaries = german.simple_plus_ampersand.boundaries("bei h&m und").unwrap();
        assert_eq!(boundaries, vec![Boundary::new(4, 7)]);
    }

    #[test]
    fn test_custom_abbreviations_extend_list() {
        let config = Language::GermanWeb.config().unwrap();
        let patterns = Patterns::new(config, &["xyzabk.".to_string()]).unwrap();
        assert!(patterns.abbreviation.is_match("das xyzabk. hier").unwrap());
    }
}
