use bencode_core::{encode, BencodeError, Dictionary, Value, ValueKind, Writer};

/// Helper: run a closure against a fresh writer and return the finished bytes.
fn written(build: impl FnOnce(&mut Writer) -> bencode_core::Result<()>) -> Vec<u8> {
    let mut w = Writer::new();
    build(&mut w).expect("writer call failed");
    w.finish().expect("writer left unbalanced")
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn append_integer_table() {
    let cases: &[(i64, &[u8])] = &[
        (32, b"i32e"),
        (0, b"i0e"),
        (1234567890, b"i1234567890e"),
        (-1234567890, b"i-1234567890e"),
        (i64::MIN, b"i-9223372036854775808e"),
        (i64::MAX, b"i9223372036854775807e"),
    ];
    for (value, expected) in cases {
        let out = written(|w| w.append_integer(*value));
        assert_eq!(out.as_slice(), *expected, "integer {value}");
    }
}

#[test]
fn append_string_table() {
    let cases: &[(&str, &[u8])] = &[
        ("123", b"3:123"),
        ("abcdefg", b"7:abcdefg"),
        ("1", b"1:1"),
        ("-23", b"3:-23"),
        ("", b"0:"),
    ];
    for (value, expected) in cases {
        let out = written(|w| {
            w.append_string(value);
            Ok(())
        });
        assert_eq!(out.as_slice(), *expected, "string {value:?}");
    }
}

#[test]
fn append_string_counts_bytes_not_chars() {
    let out = written(|w| {
        w.append_string("caf\u{00e9}");
        Ok(())
    });
    assert_eq!(out, "5:caf\u{00e9}".as_bytes());
}

#[test]
fn append_binary_string() {
    let out = written(|w| {
        w.append_string([0u8, 255, 1]);
        Ok(())
    });
    assert_eq!(out, vec![b'3', b':', 0, 255, 1]);
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn write_dictionary() {
    let out = written(|w| {
        w.start_dictionary()?;
        w.append_string("123");
        w.append_integer(32)?;
        w.end_dictionary()
    });
    assert_eq!(out, b"d3:123i32ee");
}

#[test]
fn write_list() {
    let out = written(|w| {
        w.start_list()?;
        w.append_string("abc");
        w.append_integer(32)?;
        w.append_string("cdf");
        w.end_list()
    });
    assert_eq!(out, b"l3:abci32e3:cdfe");
}

#[test]
fn write_empty_containers() {
    let out = written(|w| {
        w.start_list()?;
        w.start_dictionary()?;
        w.end_dictionary()?;
        w.end_list()
    });
    assert_eq!(out, b"ldee");
}

#[test]
fn dictionary_keys_keep_caller_order() {
    let out = written(|w| {
        w.start_dictionary()?;
        w.append_string("zeta");
        w.append_integer(1)?;
        w.append_string("alpha");
        w.append_integer(2)?;
        w.end_dictionary()
    });
    assert_eq!(out, b"d4:zetai1e5:alphai2ee");
}

#[test]
fn dictionary_values_may_be_containers() {
    let out = written(|w| {
        w.start_dictionary()?;
        w.append_string("list");
        w.start_list()?;
        w.append_integer(1)?;
        w.end_list()?;
        w.append_string("dict");
        w.start_dictionary()?;
        w.end_dictionary()?;
        w.end_dictionary()
    });
    assert_eq!(out, b"d4:listli1ee4:dictdee");
}

#[test]
fn bytes_snapshot_mid_construction() {
    let mut w = Writer::new();
    w.start_list().unwrap();
    w.append_integer(5).unwrap();
    assert_eq!(w.bytes(), b"li5e");
    assert_eq!(w.depth(), 1);
    w.end_list().unwrap();
    assert_eq!(w.bytes(), b"li5ee");
    assert_eq!(w.depth(), 0);
}

// ============================================================================
// Balance checking
// ============================================================================

#[test]
fn end_list_without_start() {
    let mut w = Writer::new();
    assert_eq!(
        w.end_list().unwrap_err(),
        BencodeError::UnbalancedEnd {
            expected: ValueKind::List,
            found: None
        }
    );
    assert!(w.bytes().is_empty());
}

#[test]
fn end_dictionary_closing_a_list() {
    let mut w = Writer::new();
    w.start_list().unwrap();
    assert_eq!(
        w.end_dictionary().unwrap_err(),
        BencodeError::UnbalancedEnd {
            expected: ValueKind::Dictionary,
            found: Some(ValueKind::List)
        }
    );
    assert_eq!(w.bytes(), b"l");
}

#[test]
fn end_list_closing_a_dictionary() {
    let mut w = Writer::new();
    w.start_dictionary().unwrap();
    assert!(matches!(
        w.end_list(),
        Err(BencodeError::UnbalancedEnd {
            found: Some(ValueKind::Dictionary),
            ..
        })
    ));
}

#[test]
fn integer_in_key_position_is_rejected() {
    let mut w = Writer::new();
    w.start_dictionary().unwrap();
    assert_eq!(w.append_integer(1).unwrap_err(), BencodeError::NonStringKey);
    assert_eq!(w.bytes(), b"d");
}

#[test]
fn container_in_key_position_is_rejected() {
    let mut w = Writer::new();
    w.start_dictionary().unwrap();
    assert_eq!(w.start_list().unwrap_err(), BencodeError::NonStringKey);
    assert_eq!(w.start_dictionary().unwrap_err(), BencodeError::NonStringKey);
}

#[test]
fn dangling_key_is_rejected() {
    let mut w = Writer::new();
    w.start_dictionary().unwrap();
    w.append_string("orphan");
    assert_eq!(w.end_dictionary().unwrap_err(), BencodeError::DanglingKey);
    w.append_integer(0).unwrap();
    w.end_dictionary().unwrap();
    assert_eq!(w.finish().unwrap(), b"d6:orphani0ee");
}

#[test]
fn finish_with_open_containers() {
    let mut w = Writer::new();
    w.start_list().unwrap();
    w.start_list().unwrap();
    w.end_list().unwrap();
    assert_eq!(
        w.finish().unwrap_err(),
        BencodeError::UnclosedContainers { open: 1 }
    );
}

// ============================================================================
// Whole-tree encoding
// ============================================================================

#[test]
fn encode_scalar_values() {
    assert_eq!(encode(&Value::Integer(-7)).unwrap(), b"i-7e");
    assert_eq!(encode(&Value::string("spam")).unwrap(), b"4:spam");
}

#[test]
fn encode_nested_tree_in_insertion_order() {
    let mut info = Dictionary::new();
    info.insert("name", Value::string("example.txt"));
    info.insert("length", Value::Integer(1024));

    let mut torrent = Dictionary::new();
    torrent.insert("info", Value::Dictionary(info));
    torrent.insert(
        "announce-list",
        Value::List(vec![Value::List(vec![Value::string("udp://t")])]),
    );

    assert_eq!(
        encode(&Value::Dictionary(torrent)).unwrap(),
        b"d4:infod4:name11:example.txt6:lengthi1024ee13:announce-listll7:udp://teee".to_vec()
    );
}

#[test]
fn append_value_inside_manual_container() {
    let out = written(|w| {
        w.start_list()?;
        w.append_value(&Value::List(vec![Value::Integer(1)]))?;
        w.append_value(&Value::string("x"))?;
        w.end_list()
    });
    assert_eq!(out, b"lli1ee1:xe");
}
