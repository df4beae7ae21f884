/// Reference-graph walk tests: declaration tracking, scope attribution,
/// and edge dedup over plain JavaScript/TypeScript sources.

use callvine::domain::language::Language;
use callvine::domain::walker::GraphBuilder;
use callvine::infrastructure::SyntaxFrontend;

fn build(source: &str) -> Vec<[String; 2]> {
    build_with(Language::JavaScript, source)
}

fn build_with(language: Language, source: &str) -> Vec<[String; 2]> {
    let tree = SyntaxFrontend::parse(language, source).expect("source should parse");
    GraphBuilder::new().build_graph(&tree, source)
}

#[test]
fn call_to_earlier_declaration_resolves() {
    let source = "function B() {}\nfunction A() {\n  B();\n}\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "3:2: A");
    assert_eq!(pairs[0][1], "B");
}

#[test]
fn forward_reference_is_not_resolved() {
    // B is declared after the call site; the single pass has not seen it
    // yet, so the call falls through.
    let source = "function A() {\n  B();\n}\nfunction B() {}\n";
    assert!(build(source).is_empty());
}

#[test]
fn imported_name_resolves_as_callee() {
    let source = "import C from './c';\nfunction A() {\n  C();\n}\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "3:2: A");
    assert_eq!(pairs[0][1], "C");
}

#[test]
fn aliased_import_resolves_to_original_name() {
    let source = "import { original as alias } from './m';\nfunction A() {\n  alias();\n}\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][1], "original");
}

#[test]
fn repeated_calls_record_one_edge_at_first_location() {
    let source = "function B() {}\nfunction A() {\n  B();\n  B();\n}\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "3:2: A");
}

#[test]
fn top_level_call_attributes_to_global() {
    let source = "function B() {}\nB();\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "2:0: global");
    assert_eq!(pairs[0][1], "B");
}

#[test]
fn call_inside_callback_attributes_to_enclosing_function() {
    let source = "function helper() {}\n\
                  function outer() {\n\
                  \x20\x20[1].forEach(function (x) {\n\
                  \x20\x20\x20\x20helper();\n\
                  \x20\x20});\n\
                  }\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "4:4: outer");
    assert_eq!(pairs[0][1], "helper");
}

#[test]
fn method_calls_attribute_to_dotted_method_scope() {
    let source = "function helper() {}\n\
                  class Service {\n\
                  \x20\x20run() {\n\
                  \x20\x20\x20\x20helper();\n\
                  \x20\x20}\n\
                  }\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "4:4: Service.run");
}

#[test]
fn chained_call_resolves_against_dotted_method_name() {
    let source = "class Api {\n\
                  \x20\x20fetch() {}\n\
                  }\n\
                  function main() {\n\
                  \x20\x20Api.fetch();\n\
                  }\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "5:2: main");
    assert_eq!(pairs[0][1], "Api.fetch");
}

#[test]
fn namespace_member_calls_do_not_resolve_partially() {
    // The candidate is the whole dotted chain; a bound alias for just
    // the base is not enough.
    let source = "import * as utils from './u';\nfunction A() {\n  utils.helper();\n}\n";
    assert!(build(source).is_empty());
}

#[test]
fn arrow_bindings_declare_scopes() {
    let source = "const fetchData = () => {};\nconst App = () => {\n  fetchData();\n};\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "3:2: App");
    assert_eq!(pairs[0][1], "fetchData");
}

#[test]
fn recursive_call_records_self_edge() {
    let source = "function A() {\n  A();\n}\n";
    let pairs = build(source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "2:2: A");
    assert_eq!(pairs[0][1], "A");
}

#[test]
fn computed_and_dynamic_callees_are_skipped() {
    let source = "function B() {}\n\
                  function A() {\n\
                  \x20\x20this.run();\n\
                  \x20\x20handlers[0]();\n\
                  \x20\x20pick()();\n\
                  }\n";
    assert!(build(source).is_empty());
}

#[test]
fn typescript_sources_walk_the_same() {
    let source = "function log(msg: string): void {}\n\
                  function run(): void {\n\
                  \x20\x20log('hi');\n\
                  }\n";
    let pairs = build_with(Language::TypeScript, source);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0][0], "3:2: run");
    assert_eq!(pairs[0][1], "log");
}

#[test]
fn output_is_deterministic_across_builds() {
    let source = "function B() {}\n\
                  function C() {}\n\
                  function A() {\n\
                  \x20\x20B();\n\
                  \x20\x20C();\n\
                  }\n\
                  A();\n";
    let first = build(source);
    let second = build(source);

    assert_eq!(first, second);
    let callees: Vec<&str> = first.iter().map(|p| p[1].as_str()).collect();
    assert_eq!(callees, vec!["B", "C", "A"]);
}

#[test]
fn walks_share_no_state_across_files() {
    let declares = "function shared() {}\n";
    let calls = "function main() {\n  shared();\n}\n";

    assert_eq!(build(declares).len(), 0);
    // `shared` was declared in a different walk; this one never saw it.
    assert!(build(calls).is_empty());
}
