use json_dyn_token::{
    CommentHandling, JsonReader, ReaderError, ReaderOptions, TokenCursor, TokenKind,
};
use time::macros::{date, datetime};
use time::Duration;

fn tokens(
    input: &str,
    options: ReaderOptions,
) -> Result<Vec<(TokenKind, Option<String>)>, ReaderError> {
    let mut reader = JsonReader::with_options(input.as_bytes(), options);
    let mut out = Vec::new();
    while reader.advance()? {
        let text = reader
            .get_str()
            .map(str::to_string)
            .or_else(|| reader.number_text().map(str::to_string));
        out.push((reader.token_kind(), text));
    }
    Ok(out)
}

#[test]
fn token_sequence_matrix() {
    let out = tokens(
        r#"{"name": "x", "list": [1, -2.5, true, false, null], "empty": {}}"#,
        ReaderOptions::default(),
    )
    .expect("valid json");
    let kinds: Vec<TokenKind> = out.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::StartObject,
            TokenKind::PropertyName,
            TokenKind::String,
            TokenKind::PropertyName,
            TokenKind::StartArray,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::EndArray,
            TokenKind::PropertyName,
            TokenKind::StartObject,
            TokenKind::EndObject,
            TokenKind::EndObject,
        ]
    );
    assert_eq!(out[1].1.as_deref(), Some("name"));
    assert_eq!(out[6].1.as_deref(), Some("-2.5"));
}

#[test]
fn string_escapes_are_decoded() {
    let out = tokens(r#"["a\nb", "é😀", "tab\t"]"#, ReaderOptions::default()).unwrap();
    assert_eq!(out[1].1.as_deref(), Some("a\nb"));
    assert_eq!(out[2].1.as_deref(), Some("é😀"));
    assert_eq!(out[3].1.as_deref(), Some("tab\t"));

    let err = tokens(r#"["\x"]"#, ReaderOptions::default()).unwrap_err();
    assert_eq!(err, ReaderError::InvalidEscape { offset: 1 });
}

#[test]
fn comment_handling_matrix() {
    let input = "// lead\n[1, /* mid */ 2] // tail";

    let err = tokens(input, ReaderOptions::default()).unwrap_err();
    assert!(matches!(err, ReaderError::Syntax { offset: 0, .. }));

    let skipped = tokens(input, ReaderOptions::new().comments(CommentHandling::Skip)).unwrap();
    assert_eq!(skipped.len(), 4);

    let allowed = tokens(input, ReaderOptions::new().comments(CommentHandling::Allow)).unwrap();
    let comments: Vec<&str> = allowed
        .iter()
        .filter(|(k, _)| *k == TokenKind::Comment)
        .filter_map(|(_, t)| t.as_deref())
        .collect();
    assert_eq!(comments, vec![" lead", " mid ", " tail"]);

    let err = tokens(
        "[1 /* open",
        ReaderOptions::new().comments(CommentHandling::Skip),
    )
    .unwrap_err();
    assert_eq!(err, ReaderError::UnterminatedComment { offset: 3 });
}

#[test]
fn numeric_probes() {
    let cases: [(&str, Option<i32>, Option<i64>, Option<f64>); 6] = [
        ("1234", Some(1234), Some(1234), Some(1234.0)),
        ("2147483648", None, Some(2_147_483_648), Some(2_147_483_648.0)),
        ("-9223372036854775809", None, None, Some(-9_223_372_036_854_775_809.0)),
        ("123.4", None, None, Some(123.4)),
        ("1e3", None, None, Some(1000.0)),
        ("1e400", None, None, None),
    ];
    for (input, i32v, i64v, f64v) in cases {
        let mut reader = JsonReader::new(input.as_bytes());
        assert!(reader.advance().unwrap());
        assert_eq!(reader.try_get_i32(), i32v, "{input}");
        assert_eq!(reader.try_get_i64(), i64v, "{input}");
        assert_eq!(reader.try_get_f64(), f64v, "{input}");
        assert_eq!(reader.get_bool(), None);
        assert_eq!(reader.try_get_date(), None);
    }
}

#[test]
fn temporal_probes_only_apply_to_string_values() {
    let mut reader = JsonReader::new(
        br#"{"2023-04-09": "2023-04-09", "t": "2023-04-09T01:23:45", "o": "2023-04-09T01:23:45Z", "d": "00:01:00"}"#,
    );
    reader.advance().unwrap();
    reader.advance().unwrap();
    assert_eq!(reader.token_kind(), TokenKind::PropertyName);
    assert_eq!(reader.try_get_date(), None);
    reader.advance().unwrap();
    assert_eq!(reader.try_get_date(), Some(date!(2023 - 04 - 09)));
    assert_eq!(reader.try_get_datetime(), None);

    reader.advance().unwrap();
    reader.advance().unwrap();
    assert_eq!(reader.try_get_datetime(), Some(datetime!(2023-04-09 01:23:45)));

    reader.advance().unwrap();
    reader.advance().unwrap();
    assert_eq!(
        reader.try_get_datetime_offset(),
        Some(datetime!(2023-04-09 01:23:45 UTC))
    );

    reader.advance().unwrap();
    reader.advance().unwrap();
    assert_eq!(reader.try_get_duration(), Some(Duration::minutes(1)));
}

#[test]
fn skip_moves_to_value_end() {
    let mut reader = JsonReader::new(br#"{"a": [1, {"b": [2]}], "c": 3}"#);
    reader.advance().unwrap();
    reader.advance().unwrap();
    assert_eq!(reader.token_kind(), TokenKind::PropertyName);
    assert!(reader.skip().unwrap());
    assert_eq!(reader.token_kind(), TokenKind::EndArray);
    assert_eq!(reader.depth(), 1);
    reader.advance().unwrap();
    assert_eq!(reader.get_str(), Some("c"));
    reader.advance().unwrap();
    assert!(reader.skip().unwrap());
    assert_eq!(reader.try_get_i32(), Some(3));
}

#[test]
fn skip_reports_truncation() {
    let mut reader = JsonReader::new(b"[[1, 2]");
    reader.advance().unwrap();
    assert!(!reader.skip().unwrap());
    assert_eq!(reader.token_kind(), TokenKind::None);
}

#[test]
fn trailing_data_is_rejected() {
    let err = tokens("{} {}", ReaderOptions::default()).unwrap_err();
    assert!(matches!(err, ReaderError::Syntax { offset: 3, .. }));
}
