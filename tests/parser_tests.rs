use crashtree::parser::text::{parse_rich_line, LineDelimiter, LineStrategy, RichLineStrategy, TraceStrategy};
use crashtree::parser::{extract_frames, CallFrame, Frame, FrameParser, MethodDescriptor, ParameterDescriptor};
use pretty_assertions::assert_eq;

#[test]
fn test_rich_line_full() {
    let frame = parse_rich_line("at Foo.Bar (System.String) [0x00001] in /src/Foo.cs:42").unwrap();

    assert_eq!(
        frame,
        Frame {
            class_name: Some("Foo".to_string()),
            method_name: Some("Bar(String )".to_string()),
            file_name: Some("/src/Foo.cs".to_string()),
            line_number: 42,
        }
    );
}

#[test]
fn test_rich_line_namespaced_class_and_named_params() {
    let frame = parse_rich_line(
        "  at App.Data.Repository.Save (System.String path, System.Int32 retries) [0x0002a] in /src/Repository.cs:118",
    )
    .unwrap();

    assert_eq!(frame.class_name.as_deref(), Some("App.Data.Repository"));
    assert_eq!(frame.method_name.as_deref(), Some("Save(String path, Int32 retries)"));
    assert_eq!(frame.file_name.as_deref(), Some("/src/Repository.cs"));
    assert_eq!(frame.line_number, 118);
}

#[test]
fn test_line_without_number_is_whole_file_name() {
    let line = "at Foo.Bar (System.String) [0x00001] in <filename unknown>";
    let frame = parse_rich_line(line).unwrap();

    assert_eq!(frame.line_number, 0);
    assert_eq!(frame.file_name.as_deref(), Some(line));
    assert_eq!(frame.class_name, None);
    assert_eq!(frame.method_name, None);
}

#[test]
fn test_non_numeric_suffix_is_whole_file_name() {
    let line = "at Foo.Bar () [0x0] in C:\\src\\Foo.cs:abc";
    let frame = parse_rich_line(line).unwrap();

    assert_eq!(frame.line_number, 0);
    assert_eq!(frame.file_name.as_deref(), Some(line));
}

#[test]
fn test_no_file_marker_keeps_line_number() {
    let frame = parse_rich_line("somewhere/odd.cs:7").unwrap();

    assert_eq!(frame.file_name.as_deref(), Some("somewhere/odd.cs"));
    assert_eq!(frame.line_number, 7);
    assert_eq!(frame.class_name, None);
}

#[test]
fn test_no_call_marker_leaves_class_unset() {
    let frame = parse_rich_line("Foo.Bar () [0x00001] in /src/Foo.cs:3").unwrap();

    assert_eq!(frame.class_name, None);
    assert_eq!(frame.method_name, None);
    assert_eq!(frame.file_name.as_deref(), Some("Foo.Bar () [0x00001] in /src/Foo.cs"));
    assert_eq!(frame.line_number, 3);
}

#[test]
fn test_at_inside_parameter_type_is_not_a_call_marker() {
    let line = "Foo.Bar (DateFormat x) [0x00001] in /src/Foo.cs:42";
    let frame = parse_rich_line(line).unwrap();

    assert_eq!(frame.class_name, None);
    assert_eq!(frame.method_name, None);
    assert_eq!(frame.file_name.as_deref(), Some("Foo.Bar (DateFormat x) [0x00001] in /src/Foo.cs"));
    assert_eq!(frame.line_number, 42);

    let frames = RichLineStrategy.parse(line).unwrap();
    assert_eq!(frames, vec![frame]);
}

#[test]
fn test_at_inside_parameter_type_with_call_marker() {
    let frame = parse_rich_line("at Foo.Bar (App.DateFormat x) [0x00001] in /src/Foo.cs:42").unwrap();

    assert_eq!(frame.class_name.as_deref(), Some("Foo"));
    assert_eq!(frame.method_name.as_deref(), Some("Bar(DateFormat x)"));
    assert_eq!(frame.line_number, 42);
}

#[test]
fn test_rich_strategy_multi_line_order() {
    let text = "at A.First () [0x00001] in /a.cs:1\r\n\
                at B.Second () [0x00002] in /b.cs:2\n\
                \n";
    let frames = RichLineStrategy.parse(text).unwrap();

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].class_name.as_deref(), Some("A"));
    assert_eq!(frames[1].method_name.as_deref(), Some("Second()"));
    assert_eq!(frames[1].file_name.as_deref(), Some("/b.cs"));
}

#[test]
fn test_rich_strategy_abstains_on_malformed_method() {
    let text = "at A.Good () [0x00001] in /a.cs:1\nat B.Bad (System.String [0x00002] in /b.cs:2";
    assert!(RichLineStrategy.parse(text).is_none());
}

#[test]
fn test_malformed_rich_text_falls_back_to_introspection() {
    let text = "at B.Bad (System.String [0x00002] in /b.cs:2";
    let call_frames = vec![CallFrame::new(MethodDescriptor::new("Run").with_declaring_type("App.Main"))];

    let frames = FrameParser::new().parse(Some(text), Some(call_frames.as_slice()));
    assert_eq!(frames[0].class_name.as_deref(), Some("App.Main"));
    assert_eq!(frames[0].method_name.as_deref(), Some("Run()"));
}

#[test]
fn test_malformed_rich_text_without_introspection_is_sentinel() {
    let frames = FrameParser::new().parse::<CallFrame>(Some("at B.Bad (X [0x0] in /b.cs:2"), None);
    assert_eq!(frames, vec![Frame::sentinel()]);
}

#[test]
fn test_blank_text_is_sentinel() {
    let frames = FrameParser::new().parse::<CallFrame>(Some("  \n\r\n"), None);
    assert_eq!(frames, vec![Frame::sentinel()]);
}

#[test]
fn test_line_strategy_any_newline() {
    let frames = LineStrategy::new(LineDelimiter::AnyNewline)
        .parse("first\r\nsecond\rthird\n")
        .unwrap();

    let classes: Vec<_> = frames.iter().map(|f| f.class_name.as_deref().unwrap()).collect();
    assert_eq!(classes, vec!["first", "second", "third"]);
    assert!(frames.iter().all(|f| f.file_name.is_none() && f.line_number == 0));
}

#[test]
fn test_line_oriented_parser() {
    let parser = FrameParser::line_oriented(LineDelimiter::CrLf);
    let frames = parser.parse::<CallFrame>(Some("Frame.One\r\nFrame.Two"), None);

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].class_name.as_deref(), Some("Frame.One"));
}

#[test]
fn test_reflection_skips_unresolved_frames() {
    let call_frames = vec![
        CallFrame::unresolved(),
        CallFrame::new(
            MethodDescriptor::new("Transform")
                .with_declaring_type("App.Pipeline")
                .with_generic_argument("T")
                .with_parameter(ParameterDescriptor::new("T", "item"))
                .with_parameter(ParameterDescriptor::untyped("options")),
        )
        .with_location("/src/Pipeline.cs", 55),
        CallFrame::new(MethodDescriptor::new("Main")).with_instruction_offset(12),
    ];

    let frames = extract_frames(&call_frames);

    assert_eq!(frames.len(), 2);
    assert_eq!(
        frames[0],
        Frame {
            class_name: Some("App.Pipeline".to_string()),
            method_name: Some("Transform[T](T item, <UnknownType> options)".to_string()),
            file_name: Some("/src/Pipeline.cs".to_string()),
            line_number: 55,
        }
    );
    assert_eq!(frames[1].class_name.as_deref(), Some("(unknown)"));
    assert_eq!(frames[1].line_number, 12);
}

#[test]
fn test_reflection_all_unresolved_is_sentinel() {
    let frames = extract_frames(&[CallFrame::unresolved(), CallFrame::unresolved()]);
    assert_eq!(frames, vec![Frame::sentinel()]);
}

#[test]
fn test_live_capture_yields_frames() {
    let captured = CallFrame::capture();
    let frames = FrameParser::new().parse(None, Some(captured.as_slice()));

    assert!(!frames.is_empty());
}
