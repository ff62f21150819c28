use pgexpr::ext::{array, json};
use pgexpr::render::{Operands, Renderer};
use pgexpr::{
    ExprError, Extension, JsonPredications, Node, OperatorDef, RenderForm, RendererConfig, nodes,
    render,
};

fn col() -> Node {
    Node::column("articles", "meta")
}

#[test]
fn register_then_render() {
    let cfg = RendererConfig::builder()
        .register_operator("->", OperatorDef::infix("->"))
        .build()
        .unwrap();
    let node = Node::binary("->", col(), Node::literal("foo"));
    assert_eq!(render(&node, &cfg).unwrap(), r#""articles"."meta" -> 'foo'"#);

    let unregistered = Node::binary("?|", col(), Node::literal("foo"));
    let err = render(&unregistered, &cfg).unwrap_err();
    assert_eq!(err, ExprError::UnknownOperator("?|".to_string()));
}

fn render_contains(r: &mut Renderer<'_>, ops: Operands<'_>) -> Result<(), ExprError> {
    let Operands::Binary(left, right) = ops else {
        return Err(ExprError::malformed("@> is binary"));
    };
    r.render_node(left)?;
    r.write(" @> ");
    r.render_node(right)?;
    r.write("::jsonb");
    Ok(())
}

#[test]
fn custom_form_with_coercion() {
    let cfg = RendererConfig::builder()
        .with_extension(Extension::Json)
        .register_operator(
            "@>",
            OperatorDef::new(RenderForm::custom(render_contains))
                .with_right_coercion(|operand| Ok(operand.into_node())),
        )
        .build()
        .unwrap();
    let node = cfg
        .binary("@>", col(), Node::literal(serde_json::json!({"tag": "rust"})))
        .unwrap();
    assert_eq!(
        render(&node, &cfg).unwrap(),
        r#""articles"."meta" @> '{"tag":"rust"}'::jsonb"#
    );
}

#[test]
fn json_and_text_array_together() {
    let cfg = RendererConfig::postgres();
    let tags = array::text_array(&cfg, nodes!["foo", "bar", 2, Node::column("articles", "id")])
        .unwrap();
    assert_eq!(
        render(&tags, &cfg).unwrap(),
        r#"ARRAY['foo','bar',2,"articles"."id"]::text[]"#
    );

    let node = col()
        .json_get_by_path_as_text(&cfg, ["author", "name"])
        .unwrap()
        .eq("alice");
    assert_eq!(
        render(&node, &cfg).unwrap(),
        r#""articles"."meta" #>> ARRAY['author','name']::text[] = 'alice'"#
    );
}

#[test]
fn operator_kinds_are_exported() {
    assert_eq!(json::GET, "->");
    assert_eq!(json::GET_AS_TEXT, "->>");
    assert_eq!(json::GET_BY_PATH, "#>");
    assert_eq!(json::GET_BY_PATH_AS_TEXT, "#>>");
    assert_eq!(array::TEXT_ARRAY, "text_array");
}

#[test]
fn config_from_toml_drives_dispatch() {
    let cfg = RendererConfig::from_toml_str(
        r#"
        [renderer]
        boolean_style = "numeric"
        extensions = ["array"]
        "#,
    )
    .unwrap();
    let ids = array::array(&cfg, [1, 2]).unwrap();
    assert_eq!(render(&ids, &cfg).unwrap(), "ARRAY[1,2]");
    assert!(col().json_get(&cfg, "k").unwrap_err().is_unknown_operator());
    assert_eq!(
        render(&col().eq(false), &cfg).unwrap(),
        r#""articles"."meta" = 0"#
    );
}
