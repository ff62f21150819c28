use super::*;
use crate::ast::Node;
use crate::nodes;
use crate::render::{RendererConfig, render};

fn postgres() -> RendererConfig {
    RendererConfig::postgres()
}

fn col() -> Node {
    Node::column("articles", "id")
}

#[test]
fn test_text_array_mixed_elements() {
    let cfg = postgres();
    let node = array::text_array(&cfg, nodes!["foo", "bar", 2, col()]).unwrap();
    assert_eq!(
        render(&node, &cfg).unwrap(),
        r#"ARRAY['foo','bar',2,"articles"."id"]::text[]"#
    );
}

#[test]
fn test_text_array_flattens_nested_lists() {
    let cfg = postgres();
    let nested = Node::list(nodes!["b", "c"]);
    let node = array::text_array(&cfg, nodes!["a", nested]).unwrap();
    assert_eq!(render(&node, &cfg).unwrap(), "ARRAY['a','b','c']::text[]");
}

#[test]
fn test_plain_array() {
    let cfg = postgres();
    let node = array::array(&cfg, [1, 5, 10]).unwrap();
    assert_eq!(render(&node, &cfg).unwrap(), "ARRAY[1,5,10]");
}

#[test]
fn test_empty_array() {
    let cfg = postgres();
    let node = array::array(&cfg, Vec::<i64>::new()).unwrap();
    assert_eq!(render(&node, &cfg).unwrap(), "ARRAY[]");
}

#[test]
fn test_json_get() {
    let cfg = postgres();
    let node = col().json_get(&cfg, "foo").unwrap();
    assert_eq!(render(&node, &cfg).unwrap(), r#""articles"."id" -> 'foo'"#);

    let node = col().json_get_as_text(&cfg, "foo").unwrap();
    assert_eq!(render(&node, &cfg).unwrap(), r#""articles"."id" ->> 'foo'"#);
}

#[test]
fn test_json_get_by_index() {
    let cfg = postgres();
    let node = col().json_get(&cfg, 0).unwrap();
    assert_eq!(render(&node, &cfg).unwrap(), r#""articles"."id" -> 0"#);
}

#[test]
fn test_json_get_by_path() {
    let cfg = postgres();
    let node = col()
        .json_get_by_path(&cfg, ["foo", "bar", "baz"])
        .unwrap();
    assert_eq!(
        render(&node, &cfg).unwrap(),
        r#""articles"."id" #> ARRAY['foo','bar','baz']::text[]"#
    );

    let node = col()
        .json_get_by_path_as_text(&cfg, ["foo", "bar", "baz"])
        .unwrap();
    assert_eq!(
        render(&node, &cfg).unwrap(),
        r#""articles"."id" #>> ARRAY['foo','bar','baz']::text[]"#
    );
}

#[test]
fn test_json_chain() {
    let cfg = postgres();
    let node = col()
        .json_get(&cfg, "author")
        .and_then(|n| n.json_get_as_text(&cfg, "name"))
        .unwrap();
    assert_eq!(
        render(&node, &cfg).unwrap(),
        r#""articles"."id" -> 'author' ->> 'name'"#
    );
}

#[test]
fn test_path_coercion_wraps_single_segment() {
    let cfg = postgres();
    let node = cfg
        .binary(json::GET_BY_PATH, col(), Node::literal("foo"))
        .unwrap();
    assert_eq!(
        render(&node, &cfg).unwrap(),
        r#""articles"."id" #> ARRAY['foo']::text[]"#
    );
}

#[test]
fn test_json_requires_extension() {
    let cfg = RendererConfig::builder().build().unwrap();
    let err = col().json_get(&cfg, "foo").unwrap_err();
    assert!(err.is_unknown_operator());
}

#[test]
fn test_json_installs_array() {
    let cfg = RendererConfig::builder()
        .with_extension(Extension::Json)
        .build()
        .unwrap();
    assert!(cfg.operators().contains(array::TEXT_ARRAY));
    assert!(cfg.operators().contains(json::GET_BY_PATH_AS_TEXT));
}

#[test]
fn test_array_only() {
    let cfg = RendererConfig::builder()
        .with_extension(Extension::Array)
        .build()
        .unwrap();
    assert_eq!(cfg.operators().kinds(), vec![array::ARRAY, array::TEXT_ARRAY]);
}

#[test]
fn test_array_rendered_with_other_config_fails() {
    let built_with = postgres();
    let node = array::array(&built_with, [1, 2]).unwrap();
    let bare = RendererConfig::builder().build().unwrap();
    let err = render(&node, &bare).unwrap_err();
    assert!(err.is_unknown_operator());
}
