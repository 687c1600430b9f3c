use treelox::error::Diagnostics;
use treelox::interpreter::Interpreter;

fn check(source: &str) -> (String, Diagnostics) {
    let mut output: Vec<u8> = Vec::new();
    let mut interpreter = Interpreter::new(&mut output);
    let mut diagnostics = Diagnostics::new();

    treelox::run(source, &mut interpreter, &mut diagnostics);

    drop(interpreter);

    let output = String::from_utf8(output).expect("interpreter output is UTF-8");
    (output, diagnostics)
}

fn first_message(diagnostics: &Diagnostics) -> String {
    diagnostics
        .errors()
        .first()
        .expect("at least one recorded error")
        .to_string()
}

#[test]
fn reading_a_local_in_its_own_initializer_is_an_error() {
    let (output, diagnostics) = check("{ var a = a; }");

    assert!(diagnostics.had_error());
    assert!(first_message(&diagnostics)
        .contains("Can't read local variable in its own initializer."));

    // Static errors skip interpretation entirely.
    assert!(output.is_empty());
}

#[test]
fn a_global_may_reference_its_previous_binding() {
    // Globals are not declared into a scope, so this is legal.
    let (output, diagnostics) = check("var a = 1; var a = a + 1; print a;");

    assert!(!diagnostics.had_error());
    assert_eq!(output, "2\n");
}

#[test]
fn top_level_return_is_an_error() {
    let (_, diagnostics) = check("return;");

    assert!(diagnostics.had_error());
    assert!(first_message(&diagnostics).contains("Can't return from top-level code."));
}

#[test]
fn return_inside_a_function_is_fine() {
    let (output, diagnostics) = check("fun f() { return 1; } print f();");

    assert!(!diagnostics.had_error());
    assert_eq!(output, "1\n");
}

#[test]
fn duplicate_declaration_in_a_local_scope_is_an_error() {
    let (_, diagnostics) = check("{ var a = 1; var a = 2; }");

    assert!(diagnostics.had_error());
    assert!(first_message(&diagnostics)
        .contains("Already a variable with this name in this scope."));
}

#[test]
fn this_outside_a_class_is_an_error() {
    let (_, diagnostics) = check("print this;");

    assert!(diagnostics.had_error());
    assert!(first_message(&diagnostics).contains("Can't use 'this' outside of a class."));
}

#[test]
fn this_in_a_function_outside_a_class_is_an_error() {
    let (_, diagnostics) = check("fun f() { print this; }");

    assert!(diagnostics.had_error());
    assert!(first_message(&diagnostics).contains("Can't use 'this' outside of a class."));
}

#[test]
fn returning_a_value_from_an_initializer_is_an_error() {
    let (_, diagnostics) = check("class Thing { init() { return 42; } }");

    assert!(diagnostics.had_error());
    assert!(first_message(&diagnostics).contains("Can't return a value from an initializer."));
}

#[test]
fn bare_return_in_an_initializer_is_allowed() {
    let (_, diagnostics) = check("class Thing { init() { return; } }");

    assert!(!diagnostics.had_error());
}

#[test]
fn several_static_errors_surface_in_one_pass() {
    let (_, diagnostics) = check("{ var a = a; var a = 2; }\nreturn;");

    assert!(diagnostics.had_error());
    assert!(diagnostics.errors().len() >= 3);
}

#[test]
fn resolution_is_deterministic() {
    let program = r#"
        var a = "global";
        {
            var a = "outer";
            fun show() {
                print a;
            }
            show();
            {
                var a = "inner";
                print a;
            }
        }
        print a;
    "#;

    let (first, _) = check(program);
    let (second, _) = check(program);

    assert_eq!(first, "outer\ninner\nglobal\n");
    assert_eq!(first, second);
}

#[test]
fn parameters_live_in_the_function_scope() {
    // A parameter and a body-level variable of the same name collide.
    let (_, diagnostics) = check("fun f(x) { var x = 1; }");

    assert!(diagnostics.had_error());
    assert!(first_message(&diagnostics)
        .contains("Already a variable with this name in this scope."));
}
