//! # Trace Line Parsing Tests
//!
//! Covers the Valgrind record layout, instruction-fetch filtering, and each
//! way a record can be malformed.

use csim_core::common::TraceError;
use csim_core::trace::{AccessEvent, Operation, parse_line};
use rstest::rstest;

#[rstest]
#[case(" L 10,1", Operation::Load, 0x10, 1)]
#[case(" S 18,4\n", Operation::Store, 0x18, 4)]
#[case(" M 7ff000388,8\r\n", Operation::Modify, 0x7_ff00_0388, 8)]
#[case("L 0x20,2", Operation::Load, 0x20, 2)]
#[case("  S   DEADBEEF , 8", Operation::Store, 0xdead_beef, 8)]
#[case(" X 40,1", Operation::Other('X'), 0x40, 1)]
fn parses_data_records(
    #[case] line: &str,
    #[case] op: Operation,
    #[case] address: u64,
    #[case] size: u32,
) {
    assert_eq!(
        parse_line(line, 1).unwrap(),
        Some(AccessEvent { op, address, size })
    );
}

#[rstest]
#[case("I 0400d7d4,8")]
#[case("I  04ead900,3\n")]
#[case("")]
#[case("   \n")]
fn skips_fetches_and_blank_lines(#[case] line: &str) {
    assert_eq!(parse_line(line, 1).unwrap(), None);
}

#[test]
fn indented_instruction_marker_is_not_a_fetch() {
    let event = parse_line(" I 10,1", 1).unwrap().unwrap();
    assert_eq!(event.op, Operation::Other('I'));
}

#[rstest]
#[case("==12345== Memcheck, a memory error detector")]
#[case("==12345== Command: ./a.out")]
#[case("--12345-- run: /usr/bin/dsymutil")]
fn skips_valgrind_banner_lines(#[case] line: &str) {
    assert_eq!(parse_line(line, 1).unwrap(), None);
}

#[rstest]
#[case(" L", "missing address")]
#[case(" L 10", "missing `,<size>`")]
#[case(" L zz,1", "address is not hexadecimal")]
#[case(" L ,1", "address is not hexadecimal")]
#[case(" L 10,", "size is not a decimal integer")]
#[case(" L 10,-1", "size is not a decimal integer")]
#[case(" L 10,0x4", "size is not a decimal integer")]
#[case(" S ==12345==", "missing `,<size>`")]
#[case(" M 10", "missing `,<size>`")]
fn rejects_malformed_records(#[case] line: &str, #[case] expected: &str) {
    match parse_line(line, 42) {
        Err(TraceError::Malformed {
            line: line_no,
            text,
            reason,
        }) => {
            assert_eq!(line_no, 42);
            assert_eq!(text, line);
            assert_eq!(reason, expected);
        }
        other => panic!("expected malformed error, got {other:?}"),
    }
}

#[test]
fn event_display_matches_trace_layout() {
    let event = AccessEvent::new(Operation::Modify, 0x7ff0_0038, 8);
    assert_eq!(event.to_string(), "M 7ff00038,8");
}

#[test]
fn operation_codes_round_trip() {
    for code in ['L', 'S', 'M', 'Z'] {
        assert_eq!(Operation::from_code(code).code(), code);
    }
}
