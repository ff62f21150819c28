use super::*;
use crate::literal::Value;

#[test]
fn test_into_node_quoting_boundary() {
    assert_eq!(1.into_node(), Node::Literal(Literal::new(1)));
    assert_eq!("x".into_node(), Node::Literal(Literal::new("x")));
    assert_eq!(None::<i32>.into_node(), Node::null());

    let ident = Node::column("t", "c");
    assert_eq!(ident.clone().into_node(), ident);
    assert_eq!((&ident).into_node(), ident);
}

#[test]
fn test_literal_is_null() {
    assert!(Literal::new(Value::Null).is_null());
    assert!(!Literal::typed(Value::Null, "int").unwrap().is_null());
    assert!(!Literal::new(0).is_null());
}

#[test]
fn test_typed_literal_rejects_bad_type() {
    assert!(Literal::typed("x", "text").is_ok());
    assert!(Literal::typed("x", "numeric(10,2)").is_ok());
    assert!(Literal::typed("x", "text[]").is_ok());
    assert!(Literal::typed("x", "text; DROP").unwrap_err().is_malformed());
    assert!(Literal::typed("x", "int) FROM t").unwrap_err().is_malformed());
    assert!(Literal::typed("x", "").unwrap_err().is_malformed());
}

#[test]
fn test_typed_literal_type_names() {
    for ok in [
        "public.mood",
        "character varying(255)",
        "Double  Precision",
        "timestamp(3) with time zone",
        "numeric(10, 2)[]",
        "int[][]",
    ] {
        assert!(Literal::typed("x", ok).is_ok(), "{ok}");
    }
    for bad in [
        "text UNION SELECT password FROM users",
        "text -- comment",
        "int[] x",
        "numeric(a)",
        "varchar(255",
        "text[](1)",
        "\"Quoted\"",
    ] {
        assert!(Literal::typed("x", bad).unwrap_err().is_malformed(), "{bad}");
    }
}

#[test]
fn test_function_name_validation() {
    assert!(FunctionCall::new("COUNT", vec![]).is_ok());
    assert!(FunctionCall::new("pg_catalog.now", vec![]).is_ok());
    assert!(FunctionCall::new("", vec![]).unwrap_err().is_malformed());
    assert!(FunctionCall::new("1abc", vec![]).unwrap_err().is_malformed());
    assert!(FunctionCall::new("f(x)", vec![]).unwrap_err().is_malformed());
}

#[test]
fn test_case_requires_branch_or_else() {
    assert!(Node::case(vec![], None).unwrap_err().is_malformed());
    assert!(Node::case(vec![], Some(Node::literal(0))).is_ok());
    assert!(CaseBuilder::new().build().unwrap_err().is_malformed());
}

#[test]
fn test_case_builder_shape() {
    let node = CaseBuilder::new()
        .when(Node::column("t", "a"), 1)
        .when(Node::column("t", "b"), 2)
        .otherwise(0)
        .build()
        .unwrap();
    let Node::Case(case) = &node else {
        panic!("expected a case node");
    };
    assert_eq!(case.branches.len(), 2);
    assert_eq!(case.else_result.as_deref(), Some(&Node::literal(0)));
}

#[test]
fn test_eq_builds_binary() {
    let node = Node::column("t", "c").eq(1);
    assert_eq!(
        node,
        Node::Binary {
            op: Operator::EQ,
            left: Box::new(Node::column("t", "c")),
            right: Box::new(Node::literal(1)),
        }
    );
}

#[test]
fn test_or_is_grouped() {
    let node = Node::column("t", "a").eq(1).or(Node::column("t", "b").eq(2));
    assert!(matches!(node, Node::Grouping(_)));
}

#[test]
fn test_between_right_side_is_conjunction() {
    let node = Node::column("t", "c").between(1, 2);
    let Node::Binary { op, right, .. } = &node else {
        panic!("expected a binary node");
    };
    assert_eq!(*op, Operator::BETWEEN);
    assert_eq!(**right, Node::literal(1).and(2));
}

#[test]
fn test_empty_in_lists() {
    let col = Node::column("t", "c");
    assert_eq!(col.clone().in_list(Vec::<i32>::new()), Node::raw("1=0"));
    assert_eq!(col.not_in_list(Vec::<i32>::new()), Node::raw("1=1"));
}

#[test]
fn test_operator_core_classification() {
    assert!(Operator::EQ.is_core_binary());
    assert!(Operator::NOT_IN.is_core_binary());
    assert!(Operator::CROSS_JOIN.is_core_unary());
    assert!(!Operator::new("->").is_core_binary());
    assert!(!Operator::new("->").is_core_unary());
    assert_eq!(CoreBinary::from_kind("<>"), Some(CoreBinary::NotEq));
}

#[test]
fn test_kind_names() {
    assert_eq!(Node::raw("1").kind_name(), "Raw");
    assert_eq!(Node::column("t", "c").kind_name(), "Identifier");
    assert_eq!(Node::grouping(Node::raw("1")).kind_name(), "Grouping");
}
