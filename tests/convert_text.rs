use kvtree::{
    convert_str_with_options, ConvertOptions, ErrorKind, LineSeparator, MalformedIndex, Node,
};
use rstest::rstest;
use serde_json::{json, Value};

fn lf() -> ConvertOptions {
    ConvertOptions::new().with_line_separator(LineSeparator::Lf)
}

fn crlf() -> ConvertOptions {
    ConvertOptions::new().with_line_separator(LineSeparator::CrLf)
}

fn convert(input: &str, options: &ConvertOptions) -> Value {
    convert_str_with_options(input, options)
        .unwrap_or_else(|err| panic!("convert {input:?}: {err}"))
        .to_value()
}

#[rstest]
#[case("a=v", json!({"a": "v"}))]
#[case("a.b=v", json!({"a": {"b": "v"}}))]
#[case("a.b.c=v", json!({"a": {"b": {"c": "v"}}}))]
#[case("a.b.c.d.e=v", json!({"a": {"b": {"c": {"d": {"e": "v"}}}}}))]
fn nested_names_build_maps(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(convert(input, &lf()), expected);
}

#[rstest]
fn dotted_path_yields_maps_at_every_level() {
    let tree = convert_str_with_options("a.b.c=v", &lf()).expect("valid");
    assert!(tree.get("a").is_some_and(Node::is_map));
    assert!(tree.pointer("/a/b").is_some_and(Node::is_map));
    assert_eq!(tree.pointer("/a/b/c").and_then(Node::as_str), Some("v"));
}

#[rstest]
fn sibling_keys_share_parents() {
    let input = "testkey.subkey.keyA=valA\r\ntestkey.subkey.keyB=valB\r\ntestkey.anotherKey=valC";
    assert_eq!(
        convert(input, &crlf()),
        json!({
            "testkey": {
                "subkey": {"keyA": "valA", "keyB": "valB"},
                "anotherKey": "valC"
            }
        })
    );
}

#[rstest]
fn indexed_keys_build_lists() {
    assert_eq!(convert("x[0]=p\nx[1]=q", &lf()), json!({"x": ["p", "q"]}));
}

#[rstest]
fn list_order_follows_index_not_line_order() {
    assert_eq!(
        convert("x[2]=c\nx[0]=a\nx[1]=b", &lf()),
        json!({"x": ["a", "b", "c"]})
    );
}

#[rstest]
fn sparse_indices_leave_holes() {
    let tree = convert_str_with_options("x[1]=b\nx[4]=e", &lf()).expect("valid");
    let list = tree.get("x").and_then(Node::as_list).expect("list");
    assert_eq!(list.len(), 5);
    assert!(list[0].is_none());
    assert!(list[2].is_none());
    assert_eq!(tree.to_value(), json!({"x": [null, "b", null, null, "e"]}));
}

#[rstest]
fn indexed_then_named_segments_build_list_of_maps() {
    let input = "testkey.subkey[0].keyA=valA\r\n\
                 testkey.subkey[0].keyB=valB\r\n\
                 testkey.subkey[1].keyA=valC\r\n\
                 testkey.subkey[1].keyB=valD";
    assert_eq!(
        convert(input, &crlf()),
        json!({
            "testkey": {
                "subkey": [
                    {"keyA": "valA", "keyB": "valB"},
                    {"keyA": "valC", "keyB": "valD"}
                ]
            }
        })
    );
}

#[rstest]
fn indexed_segment_in_the_middle_of_a_path() {
    assert_eq!(
        convert("a.b[1].c.d[0]=v", &lf()),
        json!({"a": {"b": [null, {"c": {"d": ["v"]}}]}})
    );
}

#[rstest]
#[case("k=first\nk=second", json!({"k": "second"}))]
#[case("a.b=first\na.b=second", json!({"a": {"b": "second"}}))]
#[case("x[0]=first\nx[0]=second", json!({"x": ["second"]}))]
fn later_line_wins(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(convert(input, &lf()), expected);
}

#[rstest]
#[case("a=leaf\na.b=v", json!({"a": {"b": "v"}}))]
#[case("a.b=v\na=leaf", json!({"a": "leaf"}))]
#[case("a.b=v\na[0]=w", json!({"a": ["w"]}))]
#[case("a[0]=w\na.b=v", json!({"a": {"b": "v"}}))]
#[case("a[0]=w\na[0].b=v", json!({"a": [{"b": "v"}]}))]
fn conflicting_shapes_are_overwritten(#[case] input: &str, #[case] expected: Value) {
    assert_eq!(convert(input, &lf()), expected);
}

#[rstest]
fn values_are_kept_as_text() {
    assert_eq!(
        convert("n=42\nb=true\nf=1.5\ne=", &lf()),
        json!({"n": "42", "b": "true", "f": "1.5", "e": ""})
    );
}

#[rstest]
fn lines_are_trimmed_but_inner_spacing_is_kept() {
    assert_eq!(
        convert("   a.b = spaced value   ", &lf()),
        json!({"a": {"b ": " spaced value"}})
    );
}

#[rstest]
fn malformed_index_followed_by_well_formed_line() {
    let input = "testkey.subkey[0=somevalue\r\ntestkey.subkey[0]=someOtherValue";
    for policy in [MalformedIndex::Literal, MalformedIndex::Skip] {
        let tree = convert_str_with_options(input, &crlf().with_malformed_index(policy))
            .expect("valid");
        assert_eq!(
            tree.pointer("/testkey/subkey/0").and_then(Node::as_str),
            Some("someOtherValue")
        );
    }
}

#[rstest]
fn malformed_index_is_a_literal_key_by_default() {
    assert_eq!(
        convert("testkey.subkey[0=somevalue\ntestkey.subkey[0]=someOtherValue", &lf()),
        json!({
            "testkey": {
                "subkey[0": "somevalue",
                "subkey": ["someOtherValue"]
            }
        })
    );
}

#[rstest]
fn malformed_index_skip_drops_the_entry() {
    let options = lf().with_malformed_index(MalformedIndex::Skip);
    assert_eq!(
        convert("a[x]=1\nb=2", &options),
        json!({"b": "2"})
    );
}

#[rstest]
fn malformed_index_reject_fails_with_line() {
    let options = lf().with_malformed_index(MalformedIndex::Reject);
    let err = convert_str_with_options("ok=1\na[-1]=2", &options).expect_err("reject");
    assert_eq!(err.kind, ErrorKind::InvalidFormat);
    assert_eq!(err.location.map(|loc| loc.line), Some(2));
    assert!(err.to_string().contains("a[-1]"));
}

#[rstest]
#[case(":")]
#[case("/")]
#[case("__")]
fn custom_delimiter_matches_dotted_shape(#[case] delimiter: &str) {
    let key = ["a", "b", "c"].join(delimiter);
    let options = lf().with_delimiter(delimiter);
    assert_eq!(
        convert(&format!("{key}=v"), &options),
        convert("a.b.c=v", &lf())
    );
}

#[rstest]
fn custom_delimiter_leaves_dots_in_names() {
    let options = lf().with_delimiter(":");
    assert_eq!(
        convert("host.name:port=8080", &options),
        json!({"host.name": {"port": "8080"}})
    );
}

#[rstest]
#[case("invalidprop")]
#[case("a=1\nb")]
#[case("a=1=2")]
#[case("x[0]")]
fn lines_without_exactly_one_equals_fail(#[case] input: &str) {
    let err = convert_str_with_options(input, &lf()).expect_err("invalid");
    assert_eq!(err.kind, ErrorKind::InvalidFormat);
    assert!(err.is_invalid_format());
}

#[rstest]
fn validation_failure_reports_first_bad_line() {
    let err = convert_str_with_options("a=1\nb=2\nbroken\nalso broken", &lf()).expect_err("bad");
    assert_eq!(err.location.map(|loc| loc.line), Some(3));
}

#[rstest]
fn strict_mode_rejects_trailing_separator() {
    let err = convert_str_with_options("a=1\n", &lf()).expect_err("blank line");
    assert_eq!(err.kind, ErrorKind::InvalidFormat);
}

#[rstest]
fn non_strict_mode_ignores_blank_lines() {
    let options = lf().with_strict(false);
    assert_eq!(convert("\na=1\n\n  \nb=2\n", &options), json!({"a": "1", "b": "2"}));
    assert_eq!(convert("", &options), json!({}));
}

#[rstest]
fn lf_text_split_with_crlf_is_one_line() {
    let err = convert_str_with_options("a=1\nb=2", &crlf()).expect_err("one long line");
    assert_eq!(err.kind, ErrorKind::InvalidFormat);
}

#[rstest]
fn crlf_text_split_with_lf_is_trimmed() {
    assert_eq!(convert("a=1\r\nb=2", &lf()), json!({"a": "1", "b": "2"}));
}

#[rstest]
fn empty_delimiter_is_rejected() {
    let err = convert_str_with_options("a=1", &lf().with_delimiter("")).expect_err("empty");
    assert_eq!(err.kind, ErrorKind::InvalidDelimiter);
}

#[rstest]
fn index_above_limit_is_rejected() {
    let options = lf().with_max_index(100);
    assert!(convert_str_with_options("a[100]=ok", &options).is_ok());
    let err = convert_str_with_options("a[101]=no", &options).expect_err("too large");
    assert_eq!(err.kind, ErrorKind::IndexTooLarge);
    assert_eq!(err.location.map(|loc| loc.line), Some(1));
}

#[rstest]
#[case("a[18446744073709551615]=x")]
#[case("a[1152921504606846976]=x")]
fn huge_index_with_unbounded_limit_is_an_error(#[case] input: &str) {
    let options = lf().with_max_index(usize::MAX);
    let err = convert_str_with_options(input, &options).expect_err("cannot grow list");
    assert_eq!(err.kind, ErrorKind::IndexTooLarge);
}

#[rstest]
fn output_keeps_insertion_order() {
    let tree = convert_str_with_options("zeta=1\nalpha=2\nmid.b=3\nmid.a=4", &lf()).expect("valid");
    assert_eq!(
        serde_json::to_string(&tree).expect("serialize"),
        r#"{"zeta":"1","alpha":"2","mid":{"b":"3","a":"4"}}"#
    );
}
