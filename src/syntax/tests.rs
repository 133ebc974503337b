//! 语法树单元测试

use crate::syntax::{NodeKind, Role, SyntaxTree, TreeError, TreeNode};

mod tree_tests {
    use super::*;

    #[test]
    fn test_append_sets_parent_and_role() {
        let mut tree = SyntaxTree::script();
        let root = tree.root();
        let c = tree.ident("c");
        let then_part = tree.empty_stmt();
        let stmt = tree.if_stmt(c, then_part, None);
        tree.push_stmt(root, stmt);

        assert_eq!(tree.parent(stmt), Some(root));
        assert_eq!(tree.parent(c), Some(stmt));
        assert_eq!(tree.rel(c), Some(Role::Condition));
        assert_eq!(tree.child_by_role(stmt, Role::ThenPart), Some(then_part));
        assert_eq!(tree.child_by_role(stmt, Role::ElsePart), None);
    }

    #[test]
    fn test_append_moves_node_between_parents() {
        let mut tree = SyntaxTree::script();
        let x = tree.ident("x");
        let first = tree.expr_stmt(x);
        let second = tree.empty_stmt();
        tree.append(second, x, Some(Role::Expression));

        assert!(tree.children(first).is_empty());
        assert_eq!(tree.children(second), &[x]);
        assert_eq!(tree.parent(x), Some(second));
    }

    #[test]
    fn test_replace_keeps_slot_and_role() {
        let mut tree = SyntaxTree::script();
        let c = tree.ident("c");
        let a = tree.ident("a");
        let then_part = tree.expr_stmt(a);
        let stmt = tree.if_stmt(c, then_part, None);

        let d = tree.ident("d");
        tree.replace(c, d).unwrap();

        assert_eq!(tree.child(stmt, 0), Some(d));
        assert_eq!(tree.rel(d), Some(Role::Condition));
        assert_eq!(tree.parent(c), None);
        assert_eq!(tree.rel(c), None);
    }

    #[test]
    fn test_replace_with_own_descendant() {
        let mut tree = SyntaxTree::script();
        let root = tree.root();
        let x = tree.ident("x");
        let stmt = tree.expr_stmt(x);
        let block = tree.block(&[stmt]);
        tree.push_stmt(root, block);

        tree.replace(block, stmt).unwrap();

        assert_eq!(tree.children(root), &[stmt]);
        assert_eq!(tree.parent(stmt), Some(root));
        assert!(tree.children(block).is_empty());
    }

    #[test]
    fn test_replace_root() {
        let mut tree = SyntaxTree::new(NodeKind::Block);
        let old_root = tree.root();
        let stmt = tree.empty_stmt();
        tree.push_stmt(old_root, stmt);

        tree.replace(old_root, stmt).unwrap();
        assert_eq!(tree.root(), stmt);
        assert_eq!(tree.parent(stmt), None);
    }

    #[test]
    fn test_replace_detached_is_error() {
        let mut tree = SyntaxTree::script();
        let a = tree.ident("a");
        let b = tree.ident("b");
        assert_eq!(tree.replace(a, b), Err(TreeError::Detached(a)));
    }

    #[test]
    fn test_remove_requires_parent() {
        let mut tree = SyntaxTree::script();
        let root = tree.root();
        let stmt = tree.empty_stmt();
        assert!(matches!(
            tree.remove(root, stmt),
            Err(TreeError::NotAChild { .. })
        ));

        tree.push_stmt(root, stmt);
        tree.remove(root, stmt).unwrap();
        assert_eq!(tree.len(root), 0);
        assert_eq!(tree.parent(stmt), None);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut tree = SyntaxTree::script();
        let root = tree.root();
        let first = tree.empty_stmt();
        let second = tree.empty_stmt();
        tree.push_stmt(root, first);
        tree.insert(root, 99, second);
        assert_eq!(tree.children(root), &[first, second]);

        let head = tree.empty_stmt();
        tree.insert(root, 0, head);
        assert_eq!(tree.index_of(root, head), Some(0));
    }

    #[test]
    fn test_structurally_equal_ignores_parens() {
        let mut tree = SyntaxTree::script();
        let a1 = tree.ident("a");
        let b1 = tree.ident("b");
        let left = tree.binary(NodeKind::Plus, a1, b1);
        let a2 = tree.ident("a");
        let b2 = tree.ident("b");
        let right = tree.binary(NodeKind::Plus, a2, b2);
        tree.paren(right);

        assert!(tree.structurally_equal(left, right));

        let c = tree.ident("c");
        tree.replace(b2, c).unwrap();
        assert!(!tree.structurally_equal(left, right));
    }

    #[test]
    fn test_contains_kind_searches_descendants() {
        let mut tree = SyntaxTree::script();
        let c = tree.ident("c");
        let x = tree.ident("x");
        let body = tree.expr_stmt(x);
        let inner = tree.if_stmt(c, body, None);
        let block = tree.block(&[inner]);

        assert!(tree.contains_kind(block, NodeKind::If));
        assert!(!tree.contains_kind(body, NodeKind::If));
    }
}

mod kind_tests {
    use super::*;
    use crate::syntax::prec;

    #[test]
    fn test_precedence_order() {
        assert!(NodeKind::Comma.precedence() < NodeKind::Assign.precedence());
        assert!(NodeKind::Assign.precedence() < NodeKind::Hook.precedence());
        assert!(NodeKind::Or.precedence() < NodeKind::And.precedence());
        assert!(NodeKind::Plus.precedence() < NodeKind::Mul.precedence());
        assert_eq!(NodeKind::Call.precedence(), Some(prec::MEMBER));
        assert_eq!(NodeKind::Identifier.precedence(), Some(prec::PRIMARY));
    }

    #[test]
    fn test_statements_have_no_precedence() {
        for kind in [
            NodeKind::Script,
            NodeKind::Block,
            NodeKind::If,
            NodeKind::Return,
            NodeKind::List,
        ] {
            assert!(!kind.is_expression(), "{kind} should not be an expression");
        }
    }

    #[test]
    fn test_kind_display_uses_snake_case() {
        assert_eq!(NodeKind::NewWithArgs.to_string(), "new_with_args");
        assert_eq!(NodeKind::If.to_string(), "if");
        assert_eq!(Role::ThenPart.to_string(), "thenPart");
    }
}

mod printer_tests {
    use super::*;

    #[test]
    fn test_print_if_else_return() {
        let tree = SyntaxTree::with_statements(|t| {
            let c = t.ident("c");
            let a = t.ident("a");
            let b = t.ident("b");
            let ra = t.return_stmt(Some(a));
            let rb = t.return_stmt(Some(b));
            vec![t.if_stmt(c, ra, Some(rb))]
        });
        assert_eq!(tree.to_source(), "if(c)return a;else return b;");
    }

    #[test]
    fn test_print_honors_paren_flag() {
        let tree = SyntaxTree::with_statements(|t| {
            let a = t.ident("a");
            let b = t.ident("b");
            let sum = t.binary(NodeKind::Plus, a, b);
            t.paren(sum);
            let c = t.ident("c");
            let product = t.binary(NodeKind::Mul, sum, c);
            vec![t.expr_stmt(product)]
        });
        assert_eq!(tree.to_source(), "(a+b)*c;");
    }

    #[test]
    fn test_print_word_operators_are_spaced() {
        let tree = SyntaxTree::with_statements(|t| {
            let x = t.ident("x");
            let ty = t.unary(NodeKind::Typeof, x);
            let s = t.string("undefined");
            let cmp = t.binary(NodeKind::StrictEq, ty, s);
            let k = t.ident("k");
            let o = t.ident("o");
            let has = t.binary(NodeKind::In, k, o);
            let both = t.binary(NodeKind::And, cmp, has);
            vec![t.expr_stmt(both)]
        });
        assert_eq!(tree.to_source(), "typeof x===\"undefined\"&&k in o;");
    }

    #[test]
    fn test_print_try_catch_finally() {
        let tree = SyntaxTree::with_statements(|t| {
            let f = t.ident("f");
            let call = t.call(f, &[]);
            let stmt = t.expr_stmt(call);
            let try_block = t.block(&[stmt]);
            let catch_body = t.block(&[]);
            let finally_block = t.block(&[]);
            vec![t.try_stmt(try_block, Some(("e", catch_body)), Some(finally_block))]
        });
        assert_eq!(tree.to_source(), "try{f();}catch(e){}finally{}");
    }

    #[test]
    fn test_print_compound_assign_and_var() {
        let tree = SyntaxTree::with_statements(|t| {
            let one = t.number(1);
            let decl = t.var_stmt("a", Some(one));
            let a = t.ident("a");
            let two = t.number(2);
            let add = t.assign_with(crate::syntax::AssignOp::Plus, a, two);
            vec![decl, t.expr_stmt(add)]
        });
        assert_eq!(tree.to_source(), "var a=1;a+=2;");
    }
}

mod interchange_tests {
    use super::*;

    #[test]
    fn test_json_round_trip_preserves_roles_and_flags() {
        let tree = SyntaxTree::with_statements(|t| {
            let a = t.ident("a");
            let b = t.ident("b");
            let cond = t.binary(NodeKind::Or, a, b);
            t.paren(cond);
            let x = t.ident("x");
            let body = t.expr_stmt(x);
            vec![t.if_stmt(cond, body, None)]
        });

        let json = tree.to_json().unwrap();
        assert!(json.contains("\"thenPart\""));
        assert!(json.contains("\"parenthesized\": true"));

        let loaded = SyntaxTree::from_json(&json).unwrap();
        assert_eq!(loaded.to_source(), tree.to_source());
        assert!(loaded.structurally_equal(loaded.root(), loaded.root()));
    }

    #[test]
    fn test_from_json_defaults_optional_fields() {
        let json = r#"{
            "type": "script",
            "children": [
                { "type": "semicolon", "children": [
                    { "type": "identifier", "rel": "expression", "value": "go" }
                ]}
            ]
        }"#;
        let tree = SyntaxTree::from_json(json).unwrap();
        assert_eq!(tree.to_source(), "go;");

        let document: TreeNode = serde_json::from_str(json).unwrap();
        assert_eq!(document.kind, NodeKind::Script);
        assert!(!document.parenthesized);
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        assert!(SyntaxTree::from_json(r#"{"type": "goto"}"#).is_err());
    }
}
