// Integration tests for generating and running programs

use std::io::Cursor;

use bfglyph::{
    interpreter::{ExecuteError, Interpreter, RuntimeError, MAX_SLOTS},
    parser::{parser::Parser, ParseError},
    roundtrip, Generator, GeneratorError,
};

fn interpreter() -> Interpreter {
    Interpreter::new(MAX_SLOTS, Box::new(Cursor::new(String::new())))
}

fn assert_round_trips(text: &str) {
    let program = Generator::new()
        .text_to_program(text)
        .expect("Generation failed");
    let output = interpreter().execute(&program).expect("Execution failed");
    assert_eq!(output, text, "program was: {}", program);
}

#[test]
fn test_single_character() {
    assert_round_trips("A");
}

#[test]
fn test_sentences() {
    assert_round_trips("Hello World!");
    assert_round_trips("The quick brown fox jumps over the lazy dog.\n");
    assert_round_trips("aaaaaaaaaabbbbbbbbbb");
    assert_round_trips("zyxwvutsrqponmlkjihgfedcba");
}

#[test]
fn test_low_code_points() {
    // bin size bottoms out at 1 here
    assert_round_trips("\u{1}\u{2}\u{3}\u{1}");
    assert_round_trips("\t\n\r ");
}

#[test]
fn test_non_ascii_text() {
    assert_round_trips("naïve café");
    assert_round_trips("Ελληνικά");
    assert_round_trips("日本語");
}

#[test]
fn test_every_printable_ascii_character() {
    let text: String = (' '..='~').collect();
    assert_round_trips(&text);
}

#[test]
fn test_roundtrip_driver_reports_success() {
    let mut interpreter = interpreter();
    let result = roundtrip::run("round trip", &mut interpreter).expect("Round trip failed");
    assert!(result.succeeded());
    assert_eq!(result.output, "round trip");
    assert_eq!(result.command_count(), result.source.len());
}

#[test]
fn test_roundtrip_driver_rejects_empty_text() {
    let err = roundtrip::run("", &mut interpreter()).unwrap_err();
    assert!(matches!(
        err,
        roundtrip::RoundTripError::Generate(GeneratorError::EmptyInput)
    ));
}

#[test]
fn test_interpreter_reused_across_programs() {
    let mut interpreter = interpreter();
    for text in ["first", "second run", "3"] {
        let program = Generator::new().text_to_program(text).unwrap();
        assert_eq!(interpreter.execute(&program).unwrap(), text);
    }
}

#[test]
fn test_balanced_sources_parse() {
    let parser = Parser::new();
    for source in ["", "[]", "[[]]", "[][]", "+[>[-]<[+]]-", "a[b[c]d]e"] {
        assert!(parser.parse_source(source).is_ok(), "{source} should parse");
    }
}

#[test]
fn test_unbalanced_sources_fail() {
    let parser = Parser::new();
    for source in ["]", "[]]", "][", "+]+["] {
        assert!(
            matches!(
                parser.parse_source(source),
                Err(ParseError::UnmatchedClose { .. })
            ),
            "{source} should have an unmatched close"
        );
    }
    for source in ["[", "[[]", "+[-"] {
        assert!(
            matches!(
                parser.parse_source(source),
                Err(ParseError::UnterminatedLoop { .. })
            ),
            "{source} should have an unterminated loop"
        );
    }
}

#[test]
fn test_parse_error_stops_execution() {
    let err = interpreter().execute("+.[").unwrap_err();
    assert!(matches!(err, ExecuteError::Parse(ParseError::UnterminatedLoop { .. })));
}

#[test]
fn test_left_move_at_start_fails() {
    let err = interpreter().execute("<").unwrap_err();
    assert!(matches!(
        err,
        ExecuteError::Runtime(RuntimeError::PointerUnderflow)
    ));
}

#[test]
fn test_right_moves_fail_on_last_slot() {
    let mut interpreter = interpreter();
    let almost = ">".repeat(MAX_SLOTS - 1);
    assert!(interpreter.execute(&almost).is_ok());
    assert_eq!(interpreter.runtime().data_pointer(), MAX_SLOTS - 1);

    let too_far = ">".repeat(MAX_SLOTS);
    let err = interpreter.execute(&too_far).unwrap_err();
    assert!(matches!(
        err,
        ExecuteError::Runtime(RuntimeError::PointerOverflow { size: MAX_SLOTS })
    ));
}

#[test]
fn test_unwritten_cells_read_zero() {
    let mut interpreter = interpreter();
    // walking to a far cell and looping there never runs the body
    let source = format!("{}[<]", ">".repeat(5_000));
    interpreter.execute(&source).unwrap();
    assert_eq!(interpreter.runtime().cell(5_000), 0);
    assert_eq!(interpreter.runtime().cell(12_345), 0);
}

#[test]
fn test_loop_scenario() {
    let mut interpreter = interpreter();
    let output = interpreter.execute("+++[>+<-]>.").unwrap();
    assert_eq!(output, "\u{3}");
    assert_eq!(interpreter.runtime().cell(1), 3);
}

#[test]
fn test_negative_output_is_rejected() {
    let err = interpreter().execute("-.").unwrap_err();
    assert!(matches!(
        err,
        ExecuteError::Runtime(RuntimeError::InvalidCodepoint { value: -1, .. })
    ));
}

#[test]
fn test_input_reads_from_stream() {
    let mut interpreter = Interpreter::new(MAX_SLOTS, Box::new(Cursor::new("hi\n".to_string())));
    // read a char then print it one higher
    assert_eq!(interpreter.execute(",+.,+.").unwrap(), "ij");
    let err = interpreter.execute(",,").unwrap_err();
    assert!(matches!(err, ExecuteError::Runtime(RuntimeError::EndOfInput)));
}
