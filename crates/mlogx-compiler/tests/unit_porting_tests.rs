//! Unit tests for the porting engine

use mlogx_compiler::PortingEngine;
use mlogx_core::{Line, PortingMode};

fn port(text: &str, mode: PortingMode) -> Vec<String> {
    PortingEngine::new().port_line(&Line::new(text, 1, "legacy.mlog"), mode)
}

// =============================================================================
// removeZeroes Tests
// =============================================================================

#[test]
fn test_draw_clear_padding_removed() {
    assert_eq!(port("draw clear 0 0 0 0 0 0", PortingMode::RemoveZeroes), vec!["draw clear 0 0 0"]);
}

#[test]
fn test_default_optional_args_removed() {
    assert_eq!(
        port("draw color 10 20 30 255 0 0", PortingMode::RemoveZeroes),
        vec!["draw color 10 20 30"]
    );
    assert_eq!(
        port("draw color 10 20 30 128 0 0", PortingMode::RemoveZeroes),
        vec!["draw color 10 20 30 128"]
    );
}

#[test]
fn test_control_padding_removed() {
    assert_eq!(port("ucontrol move 5 6 0 0 0", PortingMode::RemoveZeroes), vec!["ucontrol move 5 6"]);
    assert_eq!(port("ucontrol unbind 0 0 0 0 0", PortingMode::RemoveZeroes), vec!["ucontrol unbind"]);
}

#[test]
fn test_jump_always_operands_removed() {
    assert_eq!(port("jump 0 always x false", PortingMode::RemoveZeroes), vec!["jump 0 always"]);
    assert_eq!(port("jump 0 equal x false", PortingMode::RemoveZeroes), vec!["jump 0 equal x false"]);
}

#[test]
fn test_non_zero_padding_kept() {
    assert_eq!(port("ucontrol move 5 6 0 1 0", PortingMode::RemoveZeroes), vec!["ucontrol move 5 6 0 1 0"]);
}

// =============================================================================
// shortenSyntax Tests
// =============================================================================

#[test]
fn test_radar_filters_collapsed() {
    assert_eq!(
        port("radar enemy any any distance ripple1 1 target", PortingMode::ShortenSyntax),
        vec!["radar enemy distance ripple1 1 target"]
    );
    assert_eq!(
        port("radar enemy ground any distance ripple1 1 target", PortingMode::ShortenSyntax),
        vec!["radar enemy ground any distance ripple1 1 target"]
    );
}

#[test]
fn test_sensor_collapsed_to_path() {
    assert_eq!(
        port("sensor core.copper core @copper", PortingMode::ShortenSyntax),
        vec!["sensor core.copper"]
    );
    assert_eq!(
        port("sensor amount core @copper", PortingMode::ShortenSyntax),
        vec!["sensor amount core @copper"]
    );
}

#[test]
fn test_in_place_op_shortened() {
    assert_eq!(port("op add i i 1", PortingMode::ShortenSyntax), vec!["op add i 1"]);
    assert_eq!(port("op add i j 1", PortingMode::ShortenSyntax), vec!["op add i j 1"]);
}

// =============================================================================
// modernSyntax Tests
// =============================================================================

#[test]
fn test_op_becomes_set() {
    assert_eq!(port("op add y 2 2", PortingMode::ModernSyntax), vec!["set y 2 + 2"]);
}

#[test]
fn test_jump_condition_becomes_symbol() {
    assert_eq!(port("jump loop lessThan i 10", PortingMode::ModernSyntax), vec!["jump loop i < 10"]);
    assert_eq!(port("jump loop always 0 0", PortingMode::ModernSyntax), vec!["jump loop always 0 0"]);
}

#[test]
fn test_legacy_setrule_reordered() {
    assert_eq!(
        port("setrule buildSpeed @sharded 2", PortingMode::ModernSyntax),
        vec!["setrule buildSpeed 2 @sharded"]
    );
}

#[test]
fn test_modes_are_not_composed() {
    assert_eq!(port("op add y 2 2", PortingMode::RemoveZeroes), vec!["op add y 2 2"]);
    assert_eq!(port("draw clear 0 0 0 0 0 0", PortingMode::ModernSyntax), vec!["draw clear 0 0 0 0 0 0"]);
}

// =============================================================================
// Whole Program Tests
// =============================================================================

#[test]
fn test_port_source_keeps_layout() {
    let source = "# exported\nstart:\n  draw clear 0 0 0 0 0 0\n\nfoo bar 0\njump start always 0 0\n";
    let ported = PortingEngine::new().port_source(source, "legacy.mlog", PortingMode::RemoveZeroes);
    assert_eq!(
        ported,
        "# exported\nstart:\n  draw clear 0 0 0\n\nfoo bar 0\njump start always\n"
    );
}

#[test]
fn test_port_program_statements_keep_source_lines() {
    let lines = Line::from_source("print 1\nop add y 2 2", "legacy.mlog");
    let program = PortingEngine::new().port(&lines, PortingMode::ModernSyntax);
    assert_eq!(program.lines(), vec!["print 1", "set y 2 + 2"]);
    assert_eq!(program.statements()[1].source.line_number, 2);
    assert_eq!(program.statements()[1].original_text(), "op add y 2 2");
}
