use keyvalues::{
    from_reader, from_str, load, save, to_string, to_string_with_options, Error, KeyValues,
    StringifyOptions, Value,
};
use std::io::Cursor;

const MODEL: &str = r#"// Exported model description
"model"
{
	"name"		"Test Model"
	"filename"	"test.mdl"
	"bodygroup"
	{
		"studio"	"box.smd"
		"studio"	"box_lod1.smd"
	}
	"path"		"models\\props\\box"
	"note"		"a \"quoted\" word"
}
"#;

fn assert_roundtrip(kv: &KeyValues) {
    let text = to_string(kv);
    let back = from_str(&text).unwrap();
    assert_eq!(&back, kv, "round-trip changed the tree:\n{}", text);
}

#[test]
fn test_parse_model_file() {
    let kv = from_str(MODEL).unwrap();
    println!("Parsed: {:?}", kv);

    assert_eq!(kv.name(), "model");
    assert_eq!(kv.keys(), vec!["name", "filename", "bodygroup", "path", "note"]);
    assert_eq!(kv.get_str("name").as_deref(), Some("Test Model"));
    assert_eq!(kv.get_str("path").as_deref(), Some(r"models\props\box"));
    assert_eq!(kv.get_str("note").as_deref(), Some(r#"a "quoted" word"#));

    let bodygroup = kv.get_node("bodygroup").unwrap();
    assert_eq!(bodygroup.name(), "bodygroup");
    assert_eq!(bodygroup.len(), 1);
    assert_eq!(bodygroup.get_str("studio").as_deref(), Some("box_lod1.smd"));
    assert!(bodygroup.parent().unwrap().ptr_eq(&kv));
}

#[test]
fn test_parse_then_stringify_then_parse() {
    let kv = from_str(MODEL).unwrap();
    assert_roundtrip(&kv);

    let inline = to_string_with_options(&kv, &StringifyOptions::inline());
    assert!(!inline.contains('\n'));
    assert_eq!(from_str(&inline).unwrap(), kv);
}

#[test]
fn test_built_tree_roundtrip() {
    let kv_a = KeyValues::new("kv_a");
    kv_a.insert("name", "kv_a").unwrap();

    let kv_b = KeyValues::new("kv_b");
    kv_b.insert("name", "kv_b").unwrap();
    kv_a.insert("entry", &kv_b).unwrap();

    let kv_c = KeyValues::new("kv_c");
    kv_c.insert("name", "kv_c").unwrap();
    kv_b.insert("another", &kv_c).unwrap();

    let text = to_string(&kv_a);
    println!("Built tree:\n{}", text);
    assert_eq!(
        text,
        "\"kv_a\"\n{\n\t\"name\" \"kv_a\"\n\t\"entry\"\n\t{\n\t\t\"name\" \"kv_b\"\n\t\t\"another\"\n\t\t{\n\t\t\t\"name\" \"kv_c\"\n\t\t}\n\t}\n}"
    );

    // Nested nodes are renamed after their key when read back.
    kv_b.set_name("entry");
    kv_c.set_name("another");
    assert_roundtrip(&kv_a);
}

#[test]
fn test_mapping_interface() {
    let kv = KeyValues::new("kv");

    kv.insert("name", "Test Model").unwrap();
    kv.insert("filename", "test.mdl").unwrap();
    assert_eq!(kv.len(), 2);
    assert!(kv.contains_key("name"));
    assert!(!kv.contains_key("uncontained_key"));

    assert_eq!(kv.remove("name"), Some(Value::from("Test Model")));
    assert!(!kv.contains_key("name"));

    let items: Vec<(String, Value)> = kv.entries();
    assert_eq!(items, vec![("filename".to_string(), Value::from("test.mdl"))]);
}

#[test]
fn test_reparenting_moves_subtree() {
    let tree_a = from_str("a { shared { k v } keep x }").unwrap();
    let tree_b = KeyValues::new("b");
    let shared = tree_a.get_node("shared").unwrap();

    tree_b.insert("shared", &shared).unwrap();

    assert!(shared.parent().unwrap().ptr_eq(&tree_b));
    assert_eq!(tree_a.keys(), vec!["keep"]);
    assert_eq!(to_string_with_options(&tree_b, &StringifyOptions::inline()), "\"b\" { \"shared\" { \"k\" \"v\" } }");
}

#[test]
fn test_error_scenarios() {
    assert!(matches!(
        from_str("\"root\"\n{\n\"key\"\n}"),
        Err(Error::InvalidFormat { .. })
    ));
    assert!(matches!(
        from_str("\"root\"{}\"extra\""),
        Err(Error::TrailingData { .. })
    ));
    assert!(matches!(
        from_str("\"root\"\n{\n\"key\" \"value\"\n"),
        Err(Error::UnexpectedEof { .. })
    ));
}

#[test]
fn test_error_message_has_location() {
    let err = from_str("root\n{\n  key\n}").unwrap_err();
    let message = err.to_string();
    println!("Error: {}", message);
    assert!(message.contains("line 4, column 1"));
    assert!(message.contains("expected a value or '{'"));
}

#[test]
fn test_macros_are_not_special() {
    let err = from_str("#base \"other.res\"\nroot { }").unwrap_err();
    assert!(matches!(err, Error::InvalidFormat { .. }));
}

#[test]
fn test_from_reader() {
    let kv = from_reader(Cursor::new(MODEL.as_bytes())).unwrap();
    assert_eq!(kv.name(), "model");
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.txt");

    let kv = from_str(MODEL).unwrap();
    save(&path, &kv).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(loaded, kv);

    kv.save(&path).unwrap();
    assert_eq!(KeyValues::load(&path).unwrap(), kv);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("missing.vdf")).unwrap_err();
    match err {
        Error::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::NotFound),
        other => panic!("Expected Io, got {other:?}"),
    }
}

#[test]
fn test_serde_json_export() {
    let kv = from_str("root { a 1 nested { b 2 } }").unwrap();
    let json = serde_json::to_string(&kv).unwrap();
    assert_eq!(json, r#"{"a":"1","nested":{"b":"2"}}"#);
}

#[test]
fn test_serde_json_import() {
    let kv: KeyValues =
        serde_json::from_str(r#"{"a": "1", "count": 3, "enabled": true, "nested": {"b": "c"}}"#)
            .unwrap();

    assert_eq!(kv.name(), "");
    assert_eq!(kv.keys(), vec!["a", "count", "enabled", "nested"]);
    assert_eq!(kv.get_str("count").as_deref(), Some("3"));
    assert_eq!(kv.get_str("enabled").as_deref(), Some("true"));

    let nested = kv.get_node("nested").unwrap();
    assert_eq!(nested.name(), "nested");
    assert!(nested.parent().unwrap().ptr_eq(&kv));
    assert_eq!(nested.get_str("b").as_deref(), Some("c"));
}

#[test]
fn test_serde_json_rejects_arrays() {
    let result: Result<KeyValues, _> = serde_json::from_str(r#"{"a": [1, 2]}"#);
    assert!(result.is_err());
}

#[test]
fn test_inline_parse_scales_like_multiline() {
    let kv = KeyValues::new("root");
    for i in 0..40_000 {
        kv.insert(format!("key_{}", i), format!("value_{}", i)).unwrap();
    }
    let multiline = to_string(&kv);
    let inline = to_string_with_options(&kv, &StringifyOptions::inline());

    let start = std::time::Instant::now();
    let from_multiline = from_str(&multiline).unwrap();
    let multiline_time = start.elapsed();

    let start = std::time::Instant::now();
    let from_inline = from_str(&inline).unwrap();
    let inline_time = start.elapsed();

    println!("multiline: {:?}, inline: {:?}", multiline_time, inline_time);
    assert_eq!(from_inline, from_multiline);
    assert!(
        inline_time < multiline_time * 5 + std::time::Duration::from_millis(250),
        "single-line parse took {:?} against {:?} for the same tree on many lines",
        inline_time,
        multiline_time
    );
}

#[test]
fn test_missing_root_tokens_are_format_errors() {
    for input in ["", "  // only a comment", "root"] {
        let err = from_str(input).unwrap_err();
        assert!(
            matches!(err, Error::InvalidFormat { .. }),
            "input {input:?} gave {err:?}"
        );
    }
}

#[test]
fn test_deeply_nested_blocks_roundtrip() {
    let depth = 500;
    let mut text = String::from("root ");
    for i in 0..depth {
        text.push_str(&format!("level_{} {{ ", i));
    }
    text.push_str("leaf value ");
    for _ in 0..depth {
        text.push_str("} ");
    }
    text.push('}');

    let kv = from_str(&text).unwrap();
    let mut node = kv.clone();
    for i in 0..depth {
        node = node.get_node(&format!("level_{}", i)).unwrap();
    }
    assert_eq!(node.get_str("leaf").as_deref(), Some("value"));
    assert_roundtrip(&kv);
}
