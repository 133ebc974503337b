//! # Kiln 性能基准测试
//!
//! 使用 Criterion.rs 进行性能基准测试。
//!
//! ## 基准测试分组
//! - `optimizer`: 窥孔优化器吞吐量
//! - `permutation`: 排列枚举与哈希
//!
//! ## 使用方法
//! ```bash
//! cargo bench             # 运行所有
//! cargo bench optimizer   # 只运行优化器基准
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;

use kiln::optimizer::optimize;
use kiln::permutation::{FieldDecl, FieldValue, Scope, Session};
use kiln::syntax::{NodeId, SyntaxTree};

// ============================================================================
// Optimizer
// ============================================================================

fn call_stmt(
    t: &mut SyntaxTree,
    name: &str,
) -> NodeId {
    let callee = t.ident(name);
    let call = t.call(callee, &[]);
    t.expr_stmt(call)
}

/// `function fN(c){if(c){a();return x;}else{b();return y;}}` repeated.
fn branchy_script(functions: usize) -> SyntaxTree {
    SyntaxTree::with_statements(|t| {
        (0..functions)
            .map(|i| {
                let a = call_stmt(t, "a");
                let x = t.ident("x");
                let ret_x = t.return_stmt(Some(x));
                let then_part = t.block(&[a, ret_x]);
                let b = call_stmt(t, "b");
                let y = t.ident("y");
                let ret_y = t.return_stmt(Some(y));
                let else_part = t.block(&[b, ret_y]);
                let c = t.ident("c");
                let branch = t.if_stmt(c, then_part, Some(else_part));
                t.function(Some(&format!("f{}", i)), &["c"], &[branch])
            })
            .collect()
    })
}

fn bench_optimize(c: &mut Criterion) {
    let tree = branchy_script(200);
    c.bench_function("optimize_200_functions", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                optimize(&mut tree).ok();
                black_box(tree)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_to_source(c: &mut Criterion) {
    let tree = branchy_script(200);
    c.bench_function("to_source_200_functions", |b| b.iter(|| black_box(tree.to_source())));
}

// ============================================================================
// Permutation
// ============================================================================

fn wide_session() -> Session {
    let mut scope = Scope::new("bench");
    for i in 0..6 {
        let values: Vec<FieldValue> = (0..4).map(FieldValue::Int).collect();
        scope.declare(format!("field{}", i), FieldDecl::new().one_of(values));
    }
    let mut session = Session::new();
    session.add_scope(&scope).ok();
    for i in 0..6 {
        session.permutate_field(&format!("field{}", i), None, None, None).ok();
    }
    session
}

fn bench_permutations(c: &mut Criterion) {
    let session = wide_session();
    c.bench_function("enumerate_4096", |b| b.iter(|| black_box(session.permutations())));
}

fn bench_hash(c: &mut Criterion) {
    let session = wide_session();
    c.bench_function("hash_4096", |b| {
        b.iter_batched(
            || session.permutations(),
            |permutations| {
                for permutation in &permutations {
                    black_box(permutation.hash());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = optimizer;
    config = Criterion::default().sample_size(30);
    targets = bench_optimize, bench_to_source
);

criterion_group!(
    name = permutation;
    config = Criterion::default().sample_size(20);
    targets = bench_permutations, bench_hash
);

criterion_main!(optimizer, permutation);
