//! Unit tests for the compiler pipeline
//!
//! Covers pass-through of plain mlog, shorthands, compile-time blocks,
//! namespacing, jump label passes, error policy and type checking.

use anyhow::Result;
use mlogx_compiler::*;
use mlogx_core::types::CompilerConstants;
use mlogx_core::Line;

fn compile(source: &str) -> Result<Vec<String>> {
    Ok(Compiler::new().compile_source(source, "main.mlogx")?.lines())
}

fn strict() -> Compiler {
    Compiler::with_options(CompilerOptions::new().with_compile_with_errors(false))
}

// =============================================================================
// Pass-through Tests
// =============================================================================

#[test]
fn test_print_passes_through() -> Result<()> {
    assert_eq!(compile("print \"e\"")?, vec!["print \"e\""]);
    Ok(())
}

#[test]
fn test_plain_mlog_is_unchanged() -> Result<()> {
    let lines = [
        "read result cell1 0",
        "write result cell1 1",
        "draw color 255 0 0 255",
        "drawflush display1",
        "sensor hp @unit @health",
        "op mul z x 2",
        "ubind @poly",
        "ucontrol move 10 20",
        "radar enemy any any distance ripple1 1 target",
        "lookup item kind 3",
        "end",
    ];
    for line in lines {
        assert_eq!(compile(line)?, vec![line.to_string()], "{}", line);
    }
    Ok(())
}

#[test]
fn test_world_commands_are_unchanged() -> Result<()> {
    let lines = [
        "getblock building b 1 2",
        "getblock floor f 1 2",
        "setblock block @router 1 2 @sharded 0",
        "setblock ore @ore-copper 3 4",
        "spawn @flare 10 10 0 @sharded u",
        "status false wet @unit 10",
        "status true burning u",
        "spawnwave 10 10 false",
        "explosion @crux 10 10 5 50 true true false",
        "setrate 100",
        "fetch unit u @sharded 0",
        "fetch buildCount n @sharded @router",
        "getflag done \"ready\"",
        "setflag f true",
        "message announce 3",
        "cutscene pan 10 20 0.1",
        "cutscene stop",
    ];
    for line in lines {
        let output = strict().compile_source(line, "main.mlogx")?;
        assert_eq!(output.lines(), vec![line.to_string()], "{}", line);
        assert!(!output.has_errors(), "{}", line);
    }
    Ok(())
}

#[test]
fn test_comments_and_blank_lines_vanish() -> Result<()> {
    assert_eq!(
        compile("# header\n\n  print 1 // trailing\n/* block */")?,
        vec!["print 1"]
    );
    Ok(())
}

// =============================================================================
// Shorthand Tests
// =============================================================================

#[test]
fn test_printf_expands() -> Result<()> {
    assert_eq!(compile("printf \"amogus {x}\"")?, vec!["print \"amogus \"", "print x"]);
    Ok(())
}

#[test]
fn test_set_operation_and_jump_comparison() -> Result<()> {
    assert_eq!(compile("set y 2 + 2")?, vec!["op add y 2 2"]);
    assert_eq!(
        compile("top:\njump top i < 10")?,
        vec!["top:", "jump top lessThan i 10"]
    );
    Ok(())
}

#[test]
fn test_typed_set_declares_variable() -> Result<()> {
    let output = Compiler::new().compile_source("set hp:number 5", "main.mlogx")?;
    assert_eq!(output.lines(), vec!["set hp 5"]);
    let statement = &output.program.statements()[0];
    assert_eq!(statement.defined.len(), 1);
    assert!(statement.defined[0].declared);
    Ok(())
}

#[test]
fn test_in_place_op_and_sensor_path() -> Result<()> {
    assert_eq!(compile("op add x 1")?, vec!["op add x x 1"]);
    assert_eq!(compile("sensor core.copper")?, vec!["sensor core.copper core @copper"]);
    Ok(())
}

// =============================================================================
// Compile-time Block Tests
// =============================================================================

#[test]
fn test_for_range_unrolls() -> Result<()> {
    let source = "print \"amogus\"\n&for x in 1 3 {\n  print \"sus $(x)\"\n}";
    assert_eq!(
        compile(source)?,
        vec!["print \"amogus\"", "print \"sus 1\"", "print \"sus 2\"", "print \"sus 3\""]
    );
    Ok(())
}

#[test]
fn test_for_list_and_empty_range() -> Result<()> {
    let source = "&for unit of @flare @poly {\n  ubind $unit\n}\n&for i in 3 1 {\n  print $i\n}";
    assert_eq!(compile(source)?, vec!["ubind @flare", "ubind @poly"]);
    Ok(())
}

#[test]
fn test_nested_for_is_cross_product() -> Result<()> {
    let source = "&for i in 1 2 {\n&for j in 1 2 {\nprint \"$i$j\"\n}\n}";
    assert_eq!(
        compile(source)?,
        vec!["print \"11\"", "print \"12\"", "print \"21\"", "print \"22\""]
    );
    Ok(())
}

#[test]
fn test_loop_variable_in_nested_header() -> Result<()> {
    let source = "&for n in 1 3 {\n&for k in 1 $n {\nprint $k\n}\n}";
    assert_eq!(compile(source)?, vec!["print 1", "print 1", "print 2", "print 1", "print 2", "print 3"]);
    Ok(())
}

#[test]
fn test_if_blocks() -> Result<()> {
    let source = "&if false {\nprint 1\n}\n&if 2 > 1 {\nprint 2\n}\n&if !0 {\nprint 3\n}";
    assert_eq!(compile(source)?, vec!["print 2", "print 3"]);
    Ok(())
}

#[test]
fn test_if_uses_constants() -> Result<()> {
    let constants = CompilerConstants::from_yaml_str("debug: true\nlevel: 2\n")?;
    let compiler = Compiler::new().with_constants(constants);
    let source = "&if $debug {\nprint \"debug\"\n}\n&if $level >= 3 {\nprint \"verbose\"\n}";
    assert_eq!(compiler.compile_source(source, "main.mlogx")?.lines(), vec!["print \"debug\""]);
    Ok(())
}

#[test]
fn test_if_inside_for() -> Result<()> {
    let source = "&for i in 1 4 {\n&if $i != 2 {\nprint $i\n}\n}";
    assert_eq!(compile(source)?, vec!["print 1", "print 3", "print 4"]);
    Ok(())
}

#[test]
fn test_for_inside_disabled_if_is_dropped() -> Result<()> {
    let source = "&if false {\n&for i in 1 2 {\nprint $i\n}\n}\nprint 9";
    assert_eq!(compile(source)?, vec!["print 9"]);
    Ok(())
}

#[test]
fn test_for_inside_enabled_if_in_namespace() -> Result<()> {
    let source = "namespace ns {\n&if true {\n&for i in 1 2 {\nset v $i\n}\n}\n}";
    assert_eq!(compile(source)?, vec!["set _ns_v 1", "set _ns_v 2"]);
    Ok(())
}

#[test]
fn test_oversized_range_is_fatal() {
    let error = Compiler::new()
        .compile_source("&for i in 0 1000000000 {\nprint $i\n}", "main.mlogx")
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidBlock);
    assert_eq!(error.line().line_number, 1);
}

#[test]
fn test_unmatched_brace_is_fatal() {
    let error = Compiler::new().compile_source("print 1\n}", "main.mlogx").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnmatchedBrace);
    assert_eq!(error.line().line_number, 2);
}

#[test]
fn test_unterminated_block_is_fatal() {
    let error = Compiler::new().compile_source("namespace a {\nprint 1", "main.mlogx").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnterminatedBlock);
    assert_eq!(error.line().line_number, 1);

    let error = Compiler::new().compile_source("&for i in 1 2 {\nprint $i", "main.mlogx").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnterminatedBlock);
}

#[test]
fn test_invalid_block_header_is_fatal() {
    let error = Compiler::new().compile_source("&for i in a b {\n}", "main.mlogx").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidBlock);
    assert!(error.is_fatal());
}

// =============================================================================
// Namespace Tests
// =============================================================================

#[test]
fn test_namespaces_prefix_variables_and_labels() -> Result<()> {
    let source = "namespace util {\nset x 5\nloop:\nop add x x 1\njump loop lessThan x 10\nprint \"x\"\n}";
    assert_eq!(
        compile(source)?,
        vec![
            "set _util_x 5",
            "_util_loop:",
            "op add _util_x _util_x 1",
            "jump _util_loop lessThan _util_x 10",
            "print \"x\"",
        ]
    );
    Ok(())
}

#[test]
fn test_nested_namespaces_and_builtins() -> Result<()> {
    let source = "namespace a {\nnamespace b {\nsensor hp @unit @health\n}\nset y @counter\n}";
    assert_eq!(compile(source)?, vec!["sensor _a_b_hp @unit @health", "set _a_y @counter"]);
    Ok(())
}

#[test]
fn test_file_private_variables() -> Result<()> {
    let output = Compiler::new().compile_source("namespace n {\nset __tmp 1\n}", "src/util.mlogx")?;
    assert_eq!(output.lines(), vec!["set __util__tmp 1"]);
    Ok(())
}

// =============================================================================
// Jump Label Tests
// =============================================================================

#[test]
fn test_numeric_jump_gets_label() -> Result<()> {
    assert_eq!(
        compile("set ok false\njump 1 always")?,
        vec!["set ok false", "jump_0_:", "jump jump_0_ always"]
    );
    Ok(())
}

#[test]
fn test_unused_labels_removed_only_when_enabled() -> Result<()> {
    let source = "start:\nunused:\nprint 1\njump start always";
    assert_eq!(compile(source)?.len(), 4);

    let compiler = Compiler::with_options(CompilerOptions::new().with_remove_unused_jump_labels(true));
    assert_eq!(
        compiler.compile_source(source, "main.mlogx")?.lines(),
        vec!["start:", "print 1", "jump start always"]
    );
    Ok(())
}

// =============================================================================
// Error Policy Tests
// =============================================================================

#[test]
fn test_errors_recorded_when_compiling_with_errors() -> Result<()> {
    let output = Compiler::new().compile_source("print 1\namogus 2\nread x", "main.mlogx")?;
    assert_eq!(output.lines(), vec!["print 1", "amogus 2", "read x"]);
    assert_eq!(output.errors.len(), 2);
    assert_eq!(output.errors[0].kind(), ErrorKind::NoCommand);
    assert_eq!(output.errors[1].kind(), ErrorKind::ArgumentCount);
    assert_eq!(output.errors[1].line().line_number, 3);
    Ok(())
}

#[test]
fn test_first_error_aborts_in_strict_mode() {
    let error = strict().compile_source("print 1\nread x cell1 \"one\"", "main.mlogx").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::BadStructure);
    assert!(error.to_string().starts_with("main.mlogx:2: "));
}

#[test]
fn test_shorthand_errors_are_low_priority() {
    // `set` has canonical and shorthand overloads; the canonical complaint wins
    let error = strict().compile_source("set x", "main.mlogx").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ArgumentCount);
    assert!(error.to_string().contains("\"set\""));
}

// =============================================================================
// Type Checking Tests
// =============================================================================

#[test]
fn test_type_errors_with_check_types() -> Result<()> {
    let compiler = Compiler::with_options(CompilerOptions::new().with_check_types(true));
    let output = compiler.compile_source("set x 5\nprintflush x", "main.mlogx")?;
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind(), ErrorKind::Type);

    let output = compiler.compile_source("set b:building message1\nprintflush b", "main.mlogx")?;
    assert!(!output.has_errors());
    Ok(())
}

#[test]
fn test_type_errors_ignored_by_default() -> Result<()> {
    let output = Compiler::new().compile_source("set x 5\nprintflush x", "main.mlogx")?;
    assert!(!output.has_errors());
    Ok(())
}

// =============================================================================
// Machine Tests
// =============================================================================

#[test]
fn test_machine_stack_tracks_blocks() -> Result<()> {
    let commands = mlogx_core::CommandRegistry::standard();
    let directives = mlogx_core::CommandRegistry::compiler_commands();
    let types = mlogx_core::ArgTypeRegistry::standard();
    let constants = CompilerConstants::new();
    let options = CompilerOptions::default();
    let mut machine = MacroStackMachine::new(
        CommandResolver::new(commands, types),
        CommandResolver::new(directives, types),
        &constants,
        &options,
    );

    let line = |text: &str, number: usize| Line::new(text, number, "main.mlogx");
    assert!(machine.process_line(&line("namespace a {", 1))?.is_empty());
    assert_eq!(machine.stack().namespaces(), vec!["a"]);
    assert!(machine.process_line(&line("&for i in 1 2 {", 2))?.is_empty());
    assert_eq!(machine.stack().routing(), Routing::Capture);
    assert!(machine.process_line(&line("set v $i", 3))?.is_empty());

    let unrolled = machine.process_line(&line("}", 4))?;
    assert_eq!(
        unrolled.iter().map(|s| s.text.as_str()).collect::<Vec<_>>(),
        vec!["set _a_v 1", "set _a_v 2"]
    );
    assert_eq!(unrolled[0].source.line_number, 3);
    assert!(machine.finish().is_err());
    assert!(machine.process_line(&line("}", 5))?.is_empty());
    machine.finish()?;
    Ok(())
}
