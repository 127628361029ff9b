// Copyright 2026 the Flexlay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON dumps of a laid-out item tree.
//!
//! [`snapshot`] describes every item reachable from the root as a nested
//! object:
//!
//! ```text
//! { "id": 0, "rect": [0, 0, 30, 40], "size": [30, 40],
//!   "margins": [0, 0, 0, 0], "flags": 2, "children": [ ... ] }
//! ```
//!
//! Coordinates are emitted as numbers converted with
//! [`Scalar::to_f64`](flexlay_core::Scalar::to_f64).

use std::io::{self, Write};

use serde_json::{Value, json};

use flexlay_core::{Context, ItemId, Scalar};

/// Builds a JSON tree of every item reachable from the root.
///
/// Returns [`Value::Null`] for an empty context. The tree is assembled
/// without recursion, so any depth the context can lay out can be dumped.
pub fn snapshot<S: Scalar>(ctx: &Context<S>) -> Value {
    if ctx.count() == 0 {
        return Value::Null;
    }

    // Pre-order; reversed, every child comes before its parent.
    let mut order = Vec::new();
    let mut stack = vec![ItemId::ROOT];
    while let Some(id) = stack.pop() {
        order.push(id);
        let first = stack.len();
        stack.extend(ctx.children(id));
        stack[first..].reverse();
    }

    let mut nodes: Vec<Option<Value>> = vec![None; ctx.count() as usize];
    for &id in order.iter().rev() {
        let children: Vec<Value> = ctx
            .children(id)
            .filter_map(|child| nodes[child.index() as usize].take())
            .collect();
        nodes[id.index() as usize] = Some(node(ctx, id, children));
    }
    nodes[0].take().unwrap_or(Value::Null)
}

/// Writes [`snapshot`] to `writer` as pretty-printed JSON.
pub fn write_snapshot<S: Scalar>(ctx: &Context<S>, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &snapshot(ctx))?;
    writer.write_all(b"\n")
}

fn node<S: Scalar>(ctx: &Context<S>, id: ItemId, children: Vec<Value>) -> Value {
    let rect = ctx.rect(id);
    let size = ctx.size(id);
    let margins = ctx.margins(id);
    json!({
        "id": id.index(),
        "rect": rect.0.map(S::to_f64),
        "size": size.0.map(S::to_f64),
        "margins": margins.0.map(S::to_f64),
        "flags": ctx.flags(id),
        "children": children,
    })
}
