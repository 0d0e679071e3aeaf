//! End-to-end matching of whole inputs
//!
//! Each test builds a small grammar and checks the top-level verdict, the
//! final cursor position and the diagnostics.

use confgram::grammar::{alt, lit, rule, seq, Grammar, GrammarBuilder};
use confgram::parse_str;
use confgram::testing::assert_report;
use rstest::{fixture, rstest};

/// start ::= 'a' 'b'* 'c'?
#[fixture]
fn abc() -> Grammar {
    let mut b = GrammarBuilder::new();
    let a = b.text("a");
    let bee = b.text("b");
    let c = b.text("c");
    b.rule("start", seq([lit(a), lit(bee).star(), lit(c).maybe()]))
        .unwrap();
    b.build().unwrap()
}

/// r ::= '(' r? ')'
#[fixture]
fn parens() -> Grammar {
    let mut b = GrammarBuilder::new();
    let open = b.text("(");
    let close = b.text(")");
    b.rule("r", seq([lit(open), rule("r").maybe(), lit(close)]))
        .unwrap();
    b.build().unwrap()
}

#[rstest]
fn test_full_match(abc: Grammar) {
    let report = parse_str(&abc, "abbbc").unwrap();
    assert_report(&report)
        .accepted()
        .applied()
        .offset(5)
        .no_diagnostics();
}

#[rstest]
fn test_optional_parts_omitted(abc: Grammar) {
    let report = parse_str(&abc, "ac").unwrap();
    assert_report(&report).accepted().offset(2);
}

#[rstest]
fn test_leftover_input_is_rejected(abc: Grammar) {
    let report = parse_str(&abc, "abbbcx").unwrap();
    assert_report(&report)
        .rejected()
        .applied()
        .offset(5)
        .diagnostic_count(1)
        .has_diagnostic(confgram::diagnostics::Severity::Error, "Parse failed");
}

#[rstest]
fn test_immediate_rejection(abc: Grammar) {
    let report = parse_str(&abc, "xyz").unwrap();
    assert_report(&report).rejected().not_applied().offset(0);
}

#[rstest]
#[case("a", true, 1)]
#[case("ab", true, 2)]
#[case("abc", true, 3)]
#[case("acc", false, 2)]
#[case("", false, 0)]
fn test_abc_cases(
    abc: Grammar,
    #[case] input: &str,
    #[case] accepted: bool,
    #[case] offset: usize,
) {
    let report = parse_str(&abc, input).unwrap();
    assert_eq!(report.accepted, accepted, "input {:?}", input);
    assert_eq!(report.offset, offset, "input {:?}", input);
}

#[rstest]
fn test_recursive_rule(parens: Grammar) {
    let report = parse_str(&parens, "(())").unwrap();
    assert_report(&report).accepted().offset(4);
}

#[rstest]
#[case("()", true, 2)]
#[case("((()))", true, 6)]
#[case("(()", false, 3)]
#[case("())", false, 2)]
fn test_recursive_rule_cases(
    parens: Grammar,
    #[case] input: &str,
    #[case] accepted: bool,
    #[case] offset: usize,
) {
    let report = parse_str(&parens, input).unwrap();
    assert_eq!(report.accepted, accepted, "input {:?}", input);
    assert_eq!(report.offset, offset, "input {:?}", input);
}

#[rstest]
fn test_unbalanced_parens_do_not_apply(parens: Grammar) {
    let report = parse_str(&parens, "(()").unwrap();
    assert_report(&report).rejected().not_applied();
}

/// value ::= '[' list? ']' | word
/// list  ::= value (',' value)*
#[test]
fn test_mutually_recursive_rules() {
    let mut b = GrammarBuilder::new();
    let open = b.text("[");
    let close = b.text("]");
    let comma = b.text(",");
    let word = b.regex("[a-z]+").unwrap();
    b.rule(
        "value",
        alt([seq([lit(open), rule("list").maybe(), lit(close)]), lit(word)]),
    )
    .unwrap();
    b.rule(
        "list",
        seq([rule("value"), seq([lit(comma), rule("value")]).star()]),
    )
    .unwrap();
    let grammar = b.build().unwrap();

    for input in ["x", "[]", "[a,[b,c],d]", "[[[]]]"] {
        let report = parse_str(&grammar, input).unwrap();
        assert_report(&report).accepted().offset(input.len());
    }

    let report = parse_str(&grammar, "[a]x").unwrap();
    assert_report(&report).rejected().applied().offset(3);
}

/// A tiny key/value dialect spread over several lines
#[test]
fn test_multiline_config() {
    let mut b = GrammarBuilder::new();
    let key = b.regex("[A-Za-z][A-Za-z0-9_]*").unwrap();
    let eq = b.regex("[ \t]*=[ \t]*").unwrap();
    let value = b.regex("[^\n#]+").unwrap();
    let comment = b.regex("#[^\n]*").unwrap();
    let eol = b.text("\n");
    b.rule("file", alt([rule("entry"), rule("comment"), lit(eol)]).star())
        .unwrap();
    b.rule("entry", seq([lit(key), lit(eq), lit(value), lit(eol)]))
        .unwrap();
    b.rule("comment", seq([lit(comment), lit(eol)])).unwrap();
    let grammar = b.build().unwrap();

    let text = "# network settings\nhost = example.org\n\nport=8080\n";
    let report = parse_str(&grammar, text).unwrap();
    assert_report(&report)
        .accepted()
        .offset(text.len())
        .line(5)
        .no_diagnostics();

    // the stray line stops the repetition on line 3
    let text = "host = a\nport = 1\n= broken\n";
    let report = parse_str(&grammar, text).unwrap();
    assert_report(&report).rejected().applied().offset(18).line(3);
}
