use std::{
    cell::{Cell, RefCell},
    fs,
    path::Path,
    rc::Rc,
};

use cll::{
    Interpreter, Kind, Value,
    interpreter::{
        console::{BufferConsole, SharedConsole},
        lexer::tokenize,
    },
};
use walkdir::WalkDir;

/// An interpreter wired to an in-memory console, with an `assert` native
/// that counts the checks that failed.
struct Harness {
    cll:     Interpreter,
    console: Rc<RefCell<BufferConsole>>,
    failed:  Rc<Cell<usize>>,
}

impl Harness {
    fn new() -> Self {
        Self::with_input(&[])
    }

    fn with_input(input: &[&str]) -> Self {
        let console = Rc::new(RefCell::new(BufferConsole::with_input(input.iter().copied())));
        let shared: SharedConsole = console.clone();

        let failed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&failed);

        let mut cll = Interpreter::new().with_console(shared);
        cll.enable_io();
        cll.add_function("assert", move |args: &[Value]| {
               if !args.first().is_some_and(Value::as_bool) {
                   counter.set(counter.get() + 1);
               }
               Value::empty()
           });

        Self { cll,
               console,
               failed }
    }

    fn run(&mut self, src: &str) -> bool {
        let lines: Vec<&str> = src.lines().collect();
        self.cll.read_vector(&lines)
    }

    fn written(&self) -> String {
        self.console.borrow().written().to_owned()
    }

    fn int(&mut self, name: &str) -> i64 {
        self.cll
            .get_var(name)
            .unwrap_or_else(|| panic!("'{name}' is not defined"))
            .as_int()
    }
}

fn assert_success(src: &str) -> Harness {
    let mut harness = Harness::new();
    if !harness.run(src) {
        panic!("Script failed: {}\n{src}", harness.cll.error_message());
    }
    assert_eq!(harness.failed.get(), 0, "an assert failed in:\n{src}");
    harness
}

fn assert_failure(src: &str, message: &str) {
    let mut harness = Harness::new();
    if harness.run(src) {
        panic!("Script succeeded but was expected to fail:\n{src}")
    }
    assert_eq!(harness.cll.error_message(), message, "{src}");
}

fn quoted(path: &Path) -> String {
    format!("{:?}", path.to_string_lossy().replace('\\', "/"))
}

#[test]
fn script_fixtures_run() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "cll"))
    {
        count += 1;
        let path = entry.path().to_string_lossy().into_owned();

        let mut harness = Harness::new();
        if !harness.cll.read_file(&path) {
            panic!("Script {path} failed on line {}:\n{}",
                   harness.cll.line(),
                   harness.cll.error_message());
        }
        assert_eq!(harness.failed.get(), 0, "an assert failed in {path}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn literals_infer_their_kind() {
    assert_eq!(Value::new("3.0f").kind(), Kind::Float);
    assert_eq!(Value::new("3.0").kind(), Kind::Double);
    assert_eq!(Value::new("007").kind(), Kind::Int);
    assert_eq!(Value::new("007").as_int(), 7);
    assert_eq!(Value::new("0x1A").as_int(), 26);
    assert_eq!(Value::new("[1,2,3]").kind(), Kind::Array);
    assert_eq!(Value::new("[1,2,3]").size(), 3);
    assert_eq!(Value::new("a[0]").kind(), Kind::Undefined);

    for text in ["3.0f", "'c'", "\"s\"", "[1,[2]]", "inf", "if"] {
        let (a, b) = (Value::new(text), Value::new(text));
        assert_eq!((a.kind(), a.text()), (b.kind(), b.text()), "{text}");
    }
}

#[test]
fn arithmetic_promotes_operands() {
    let sum = &Value::new("3") + &Value::new("4.5f");
    assert_eq!((sum.kind(), sum.text()), (Kind::Float, "7.5f"));

    let sum = &Value::new("3") + &Value::new("4.5");
    assert_eq!((sum.kind(), sum.text()), (Kind::Double, "7.5"));

    let joined = &Value::new("\"ab\"") + &Value::new("\"cd\"");
    assert_eq!(joined.text(), "\"abcd\"");

    assert_eq!((&Value::new("1") / &Value::new("0")).text(), "inf");

    assert_success("assert(typeof(1 + 2.5f) == \"FLOAT\")\n\
                    assert(typeof(1 + 2.5) == \"DOUBLE\")\n\
                    assert(typeof(10 / 4) == \"FLOAT\")\n\
                    assert(7 / 0 == inf)\n\
                    assert(7 % 0 == inf)");
}

#[test]
fn tokenizer_keeps_literals_whole() {
    let texts = |line: &str| tokenize(line).iter().map(|t| t.text().to_owned()).collect::<Vec<_>>();

    assert_eq!(texts("x=10"), ["x", "=", "10"]);
    assert_eq!(texts("\"a[b]\""), ["\"a[b]\""]);
    assert_eq!(tokenize("\"a[b]\"")[0].kind(), Kind::String);
    assert_eq!(texts("a+b//comment"), ["a", "+", "b"]);
    assert_eq!(texts("x >>= 1"), ["x", ">>=", "1"]);
    assert_eq!(texts("f(a, b)\tg"), ["f(a, b)", "g"]);
}

#[test]
fn precedence_tiers() {
    let mut cll = Interpreter::new();
    let mut value = |line: &str| cll.evaluate(tokenize(line), true)[0].text().to_owned();

    assert_eq!(value("2 + 3 * 4"), "14");
    assert_eq!(value("2 * 3 ** 2"), "18");
    assert_eq!(value("true ? 1 : 2"), "1");
    assert_eq!(value("0 ? 1 : 1 ? 2 : 3"), "2");
    assert_eq!(value("10 - 2 - 3"), "5");
    assert_eq!(value("1 + 2 == 3 && 4 > 3"), "1");
    assert_eq!(value("-2 * -3"), "6");
}

#[test]
fn assignment_chains_and_compound_operators() {
    let mut harness = assert_success("x = y = 1 + 2\n\
                                      assert(x == 3 && y == 3)\n\
                                      x += 4\n\
                                      x -= 1\n\
                                      x *= 2\n\
                                      x <<= 1\n\
                                      x %= 7");
    assert_eq!(harness.int("x"), 24 % 7);
}

#[test]
fn compound_assignment_to_an_undeclared_name_is_skipped() {
    let mut cll = Interpreter::new();
    let values = cll.evaluate(tokenize("z += 1"), true);

    assert_eq!(values.len(), 3);
    assert!(cll.get_var("z").is_none());

    assert_failure("z += 1", "Name 'z' not recognized!");
}

#[test]
fn blocks_keep_their_declarations() {
    let mut harness = assert_success("x = 1\nif (1) { x = 2; y = 3 }");

    assert_eq!(harness.int("x"), 2);
    assert!(harness.cll.get_var("y").is_none());

    let mut harness = assert_success("n = 1\n{\n    n += 1\n    scratch = 5\n}");
    assert_eq!(harness.int("n"), 2);
    assert!(harness.cll.get_var("scratch").is_none());
}

#[test]
fn for_loops_drop_their_variable() {
    let mut harness = assert_success("sum = 0\nfor (i = 0, i < 3, i += 1) { sum += i }");

    assert_eq!(harness.int("sum"), 3);
    assert!(harness.cll.get_var("i").is_none());

    let mut harness = assert_success("i = 10\nfor(i = 0, i < 4, i += 1) {\n}");
    assert_eq!(harness.int("i"), 4);
}

#[test]
fn while_loops_break_and_continue() {
    let mut harness = assert_success("n = 0\n\
                                      hits = 0\n\
                                      while (n < 10) {\n\
                                          n += 1\n\
                                          if (n % 2 == 0) {\n\
                                              continue\n\
                                          }\n\
                                          if (n > 7) {\n\
                                              break\n\
                                          }\n\
                                          hits += 1\n\
                                      }");

    assert_eq!(harness.int("n"), 9);
    assert_eq!(harness.int("hits"), 4);
}

#[test]
fn do_while_runs_at_least_once() {
    let mut harness = assert_success("k = 0\ndo {\n    k += 1\n} while (k < 3)");
    assert_eq!(harness.int("k"), 3);

    let mut harness = assert_success("m = 5\ndo {\n    m += 1\n}\nwhile (m < 3)");
    assert_eq!(harness.int("m"), 6);

    assert_failure("do {\n}\ny = 2", "Expected 'while' after 'do' scope!");
}

#[test]
fn else_if_chains_take_one_branch() {
    let src = |grade: i64| {
        format!("grade = {grade}\n\
                 letter = \"\"\n\
                 if (grade >= 90) {{\n\
                     letter = \"A\"\n\
                 }} else if (grade >= 70) {{\n\
                     letter = \"B\"\n\
                 }} else {{\n\
                     letter = \"C\"\n\
                 }}")
    };

    for (grade, letter) in [(95, "A"), (75, "B"), (10, "C")] {
        let mut harness = assert_success(&src(grade));
        assert_eq!(harness.cll.get_var("letter").unwrap().as_string(), letter, "{grade}");
    }

    assert_failure("else {\n}", "Unexpected 'else' without a preceding 'if'!");
    assert_failure("if (1) {\n}\nelse {\n}\nelse {\n}",
                   "Unexpected 'else' without a preceding 'if'!");
}

#[test]
fn functions_see_only_their_arguments() {
    assert_success("function add {\n\
                        return argv[0] + argv[1]\n\
                    }\n\
                    assert(add(2, 3) == 5)\n\
                    assert(add(\"a\", \"b\") == \"ab\")");

    assert_failure("x = 5\nfunction peek {\n    return x\n}\ny = peek()",
                   "Name 'x' not recognized!");
}

#[test]
fn function_results_do_not_carry_the_callee_names() {
    let mut harness = assert_success("x = 5\n\
                                      function h {\n\
                                          x = 1\n\
                                          return x\n\
                                      }\n\
                                      y = h()\n\
                                      z = 0\n\
                                      z += h()\n\
                                      h() = 7\n\
                                      function second {\n\
                                          return argv[1]\n\
                                      }\n\
                                      function outer {\n\
                                          r = second(1, 2)\n\
                                          return r\n\
                                      }\n\
                                      b = outer(10, 20)");

    assert_eq!(harness.int("y"), 1);
    assert_eq!(harness.int("z"), 1);
    assert_eq!(harness.int("x"), 5);
    assert_eq!(harness.int("b"), 2);
}

#[test]
fn empty_results_are_not_assigned() {
    assert_failure("function nothing {\n    return\n}\ny = nothing()",
                   "Name 'y' not recognized!");
    assert_failure("function silent {\n    n = 1\n}\ny = silent()",
                   "Name 'y' not recognized!");
}

#[test]
fn functions_return_from_nested_blocks() {
    let mut harness = assert_success("function sign {\n\
                                          if (argv[0] < 0) {\n\
                                              return -1\n\
                                          }\n\
                                          return 1\n\
                                      }\n\
                                      a = sign(-5)\n\
                                      b = sign(5)");

    assert_eq!(harness.int("a"), -1);
    assert_eq!(harness.int("b"), 1);
}

#[test]
fn subscripts_read_and_write_elements() {
    let mut harness = assert_success("a = [1, 2, 3]\n\
                                      a[1] = 9\n\
                                      assert(a == [1,9,3])\n\
                                      s = \"abc\"\n\
                                      s[0] = 'z'\n\
                                      assert(s == \"zbc\")\n\
                                      m = [[1, 2], [3, 4]]\n\
                                      m[0][1] = 7\n\
                                      assert(m[1][0] == 3)");

    assert_eq!(harness.cll.get_var("a").unwrap().text(), "[1,9,3]");
    assert_eq!(harness.cll.get_var("s").unwrap().as_string(), "zbc");
    assert_eq!(harness.cll.get_var("m").unwrap().text(), "[[1,7],[3,4]]");
    assert_eq!(harness.int("m[0][1]"), 7);
}

#[test]
fn delete_cascades_from_exhausted_values() {
    let mut harness = assert_success("a = [1, 2, 3]\n\
                                      c = 'q'\n\
                                      n = 4\n\
                                      delete a[1], c[0]\n\
                                      delete n");

    assert_eq!(harness.cll.get_var("a").unwrap().text(), "[1,3]");
    assert!(harness.cll.get_var("c").is_none());
    assert!(harness.cll.get_var("n").is_none());

    assert_failure("delete ghost", "Undefined name 'ghost' after 'delete' statement!");
}

#[test]
fn word_operators_read_as_symbols() {
    assert_success("assert((1 and 0) == 0)\n\
                    assert(1 or 0)\n\
                    assert(3 is 3)\n\
                    assert(not 0)\n\
                    assert((6 xor 3) == 5)");
}

#[test]
fn cout_and_cin_use_the_console() {
    let mut harness = Harness::with_input(&["42", "hello world"]);

    assert!(harness.run("cin a, b\ncout \"a=\", a, ' ', b, endl"));
    assert_eq!(harness.written(), "a=42 hello world\n");
    assert_eq!(harness.cll.get_var("a").unwrap().kind(), Kind::Int);
    assert_eq!(harness.cll.get_var("b").unwrap().kind(), Kind::String);

    harness.cll.disable_io();
    assert!(harness.run("cout \"silent\""));
    assert_eq!(harness.written(), "a=42 hello world\n");
}

#[test]
fn output_capture_skips_assignments() {
    let mut cll = Interpreter::new();
    cll.enable_output();

    assert!(cll.read_line("x = 4"));
    assert!(cll.output().is_empty());

    assert!(cll.read_line("x + 1, \"a\""));
    let texts: Vec<&str> = cll.output().iter().map(Value::text).collect();
    assert_eq!(texts, ["5", "\"a\""]);

    cll.clear_output();
    assert!(cll.output().is_empty());
}

#[test]
fn debug_traces_tokens() {
    let mut harness = Harness::new();
    harness.cll.enable_debug();

    assert!(harness.cll.read_line("x = 1"));
    let written = harness.written();
    assert!(written.contains("DEBUG: x UNDEFINED | = SYMBOL | 1 INT\n"), "{written}");
    assert!(written.contains("DMATH: 1 INT\n"), "{written}");
}

#[test]
fn logging_prints_errors_to_the_console() {
    let mut harness = Harness::new();
    harness.cll.enable_logging();

    assert!(!harness.cll.read_line("y = nope"));
    assert_eq!(harness.written(), "\nERROR: Name 'nope' not recognized!\n");

    harness.cll.clear_error();
    assert!(harness.cll.error().is_none());
    assert!(harness.cll.read_line("y = 1"));
}

#[test]
fn structural_errors() {
    assert_failure("if (1) {", "Expected '}' before the end of input!");
    assert_failure("}", "Unexpected symbol '}' - nothing to close!");
    assert_failure("if (1)\nx = 1", "Expected '{' after 'if' statement!");
    assert_failure("for (i = 0, i < 3) {\n}", "Command 'for' expects 'init, condition, increment'!");
    assert_failure("x = 1 + if", "Unexpected keyword 'if'!");
    assert_failure("endl", "Unexpected keyword 'endl'!");
}

#[test]
fn missing_elements_are_reported_by_their_subscript() {
    assert_failure("a = [1,2,3]\ny = a[5]", "Name 'a[5]' not recognized!");
    assert_failure("a = [1,2,3]\ny = a[-1]", "Name 'a[-1]' not recognized!");
    assert_failure("a = [1,2,3]\ny = z", "Name 'z' not recognized!");
}

#[test]
fn errors_leave_the_interpreter_usable() {
    let mut cll = Interpreter::new();

    assert!(!cll.read_line("while (1) { nope }"));
    assert_eq!(cll.scope_depth(), 0);
    assert!(cll.read_line("x = 1"));
    assert_eq!(cll.get_var("x").unwrap().as_int(), 1);
}

#[test]
fn return_stops_a_run() {
    let mut cll = Interpreter::new();

    assert!(!cll.read_line("return 3"));
    assert!(cll.error().is_none());
    assert_eq!(cll.returned().map(Value::as_int), Some(3));
}

#[test]
fn missing_scripts_report_their_path() {
    let mut cll = Interpreter::new();

    assert!(!cll.read_line("cll \"missing_file.txt\""));
    assert!(cll.error_message().contains("missing_file.txt"));
    assert!(cll.read_line("x = 1"));
}

#[test]
fn nested_scripts_receive_argv() {
    let dir = tempfile::tempdir().unwrap();
    let child = dir.path().join("child.cll");
    fs::write(&child, "total = argv[1] + argv[2]\ncout total, endl\nleak = 1\n").unwrap();

    let mut harness = assert_success(&format!("cll {}, 2, 3", quoted(&child)));

    assert_eq!(harness.written(), "5\n");
    assert!(harness.cll.get_var("leak").is_none());
}

#[test]
fn nested_script_errors_name_their_file() {
    let dir = tempfile::tempdir().unwrap();
    let child = dir.path().join("broken.cll");
    fs::write(&child, "a = 1\nb = nope\n").unwrap();

    let mut harness = Harness::new();
    assert!(!harness.run(&format!("cll {}", quoted(&child))));

    let message = harness.cll.error_message();
    assert!(message.starts_with("Error in file '"), "{message}");
    assert!(message.ends_with("' on line 2:\nName 'nope' not recognized!"), "{message}");
}

#[test]
fn include_runs_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib.cll");
    fs::write(&lib,
              "shared = 41\nfunction twice {\n    return argv[0] * 2\n}\n").unwrap();

    let mut harness = assert_success(&format!("include {}\nshared += 1\nd = twice(shared)",
                                              quoted(&lib)));

    assert_eq!(harness.int("shared"), 42);
    assert_eq!(harness.int("d"), 84);
    assert!(harness.cll.filename().is_none());
}

#[test]
fn read_file_reports_the_failing_line() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("script.cll");
    fs::write(&script, "x = 1\nif (x) {\n    y = nope\n}\n").unwrap();
    let path = script.to_string_lossy().into_owned();

    let mut harness = Harness::new();
    harness.cll.enable_logging();

    assert!(!harness.cll.read_file(&path));
    assert_eq!(harness.cll.error_message(), "Name 'nope' not recognized!");
    assert_eq!(harness.cll.filename(), Some(path.as_str()));
    assert_eq!(harness.cll.line(), 3);
    assert_eq!(harness.written(),
               format!("\nERROR: Error in file '{path}' on line 3:\nName 'nope' not recognized!\n"));

    assert!(!harness.cll.read_file(&dir.path().join("absent.cll").to_string_lossy()));
    assert!(harness.cll.error_message().contains("absent.cll"));
}

#[test]
fn file_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let file = quoted(&dir.path().join("notes.txt"));

    assert_success(&format!("p = {file}\n\
                             assert(!fexist(p))\n\
                             assert(fwrite(p, \"one\"))\n\
                             assert(fappend(p, \"two\"))\n\
                             assert(fexist(p))\n\
                             lines = fopen(p)\n\
                             assert(length(lines) == 1)\n\
                             assert(lines[0] == \"onetwo\")\n\
                             assert(length(fopen(\"no/such/file\")) == 0)"));
}

#[test]
fn host_functions_and_variables() {
    let mut cll = Interpreter::with_vars([Value::named("base", "10")]);
    cll.add_function("triple", |args: &[Value]| {
           args.first().map_or_else(Value::empty, |v| v * &Value::int(3))
       });

    assert!(cll.read_line("r = triple(base)"));
    assert_eq!(cll.get_var("r").unwrap().as_int(), 30);
    assert!(cll.var_names().contains(&"base"));

    assert!(cll.delete_function("triple"));
    assert!(!cll.read_line("r = triple(1)"));
    assert_eq!(cll.error_message(), "Function 'triple' not recognized!");

    assert!(!cll.set_var("sqrt", Value::int(1)));
    assert_eq!(cll.version(), env!("CARGO_PKG_VERSION"));
}
