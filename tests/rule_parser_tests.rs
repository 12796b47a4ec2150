// Integration tests for the production-rule parser

use lsys_engine::error::Unit;
use lsys_engine::{parse_rules, ContextValue, ErrorKind};

// Rule shapes

#[test]
fn test_parse_context_free_rule() {
    let rules = parse_rules("F ==> F+F").unwrap();
    assert_eq!(rules.len(), 1);
    let rule = &rules.rules_for('F')[0];
    assert_eq!(rule.left, ContextValue::Wildcard);
    assert_eq!(rule.right, ContextValue::Wildcard);
    assert_eq!(rule.replacements, vec!["F+F"]);
    assert_eq!(rule.specificity, 0);
}

#[test]
fn test_parse_both_contexts() {
    let rules = parse_rules("B < A > C ==> X").unwrap();
    let rule = &rules.rules_for('A')[0];
    assert_eq!(rule.left, ContextValue::Symbol('B'));
    assert_eq!(rule.right, ContextValue::Symbol('C'));
    assert_eq!(rule.specificity, 2);
}

#[test]
fn test_parse_contexts_without_spaces() {
    let rules = parse_rules("B<A>C ==> X").unwrap();
    let rule = &rules.rules_for('A')[0];
    assert_eq!(rule.left, ContextValue::Symbol('B'));
    assert_eq!(rule.right, ContextValue::Symbol('C'));
}

#[test]
fn test_parse_boundary_contexts() {
    let rules = parse_rules("^ < A ==> X\nA > $ ==> Y").unwrap();
    let rules_for_a = rules.rules_for('A');
    assert_eq!(rules_for_a.len(), 2);
    assert_eq!(rules_for_a[0].left, ContextValue::Initial);
    assert_eq!(rules_for_a[1].right, ContextValue::Final);
}

#[test]
fn test_parse_alternatives_and_empty() {
    let rules = parse_rules("A ==> AB | \\empty | B").unwrap();
    assert_eq!(rules.rules_for('A')[0].replacements, vec!["AB", "", "B"]);
}

#[test]
fn test_parse_multiple_rules_keep_order() {
    let src = "
        A ==> X
        A ==> Y
        B ==> Z
    ";
    let rules = parse_rules(src).unwrap();
    assert_eq!(rules.len(), 3);
    let a = rules.rules_for('A');
    assert_eq!(a[0].replacements, vec!["X"]);
    assert_eq!(a[1].replacements, vec!["Y"]);
}

#[test]
fn test_parse_empty_source() {
    assert!(parse_rules("").unwrap().is_empty());
    assert!(parse_rules("  \n\t ").unwrap().is_empty());
}

// Errors

#[test]
fn test_missing_arrow_reports_rule_index() {
    let err = parse_rules("F ==> FF\nX X ==> F").unwrap_err();
    match err.kind {
        ErrorKind::UnexpectedToken {
            unit,
            index,
            expected,
            found,
        } => {
            assert_eq!(unit, Unit::Rule);
            assert_eq!(index, 2);
            assert_eq!(expected, "'==>'");
            assert_eq!(found, "string 'X'");
        }
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
    let span = err.span.unwrap();
    assert_eq!((span.line, span.col), (2, 3));
}

#[test]
fn test_multi_character_lhs_rejected() {
    let err = parse_rules("FF ==> F").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidSymbol {
            unit: Unit::Rule,
            index: 1,
            ..
        }
    ));
    assert!(err.to_string().contains("single character lefthand side"));
}

#[test]
fn test_dangling_pipe() {
    let err = parse_rules("F ==> F |").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnexpectedEnd { index: 1, .. }));
    assert!(err.span.is_none());
}

#[test]
fn test_rule_cut_short_after_arrow() {
    let err = parse_rules("A ==> B\nC ==>").unwrap_err();
    assert_eq!(err.kind.index(), Some(2));
}

#[test]
fn test_lex_error_carries_source_line() {
    let err = parse_rules("F ==> F\n<< B").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidToken { .. }));
    let span = err.span.unwrap();
    assert_eq!((span.line, span.col), (2, 1));
    assert_eq!(err.source_line.as_deref(), Some("<< B"));
}
