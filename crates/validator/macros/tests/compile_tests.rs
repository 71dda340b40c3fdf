#[test]
fn derive_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/validate_pass.rs");
}
