use pgexpr::literal::BooleanStyle;
use pgexpr::{ExprError, Extension, Node, RendererConfig, global, install_global};

// One test: the global config is process-wide and can only be installed once.
#[test]
fn install_global_then_freeze() {
    let cfg = RendererConfig::builder()
        .boolean_style(BooleanStyle::Numeric)
        .with_extension(Extension::Array)
        .build()
        .unwrap();
    let installed = install_global(cfg).unwrap();
    assert!(std::ptr::eq(installed, global()));

    let node = Node::column("articles", "featured").eq(true);
    assert_eq!(node.to_sql().unwrap(), r#""articles"."featured" = 1"#);

    let json = Node::binary("->", Node::column("articles", "meta"), Node::literal("k"));
    assert!(json.to_sql().unwrap_err().is_unknown_operator());

    let err = install_global(RendererConfig::postgres()).unwrap_err();
    assert!(matches!(err, ExprError::Config(_)));
    assert_eq!(global().quoter().boolean_style(), BooleanStyle::Numeric);
}
