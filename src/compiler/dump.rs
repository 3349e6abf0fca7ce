//! Bytecode disassembler for `--dump-bytecode`.

use crate::vm::{Function, GcRef, Heap, Object, Op};

/// Disassemble a compiled script and every function reachable from its
/// constant pools.
pub fn disassemble(heap: &Heap, script: GcRef) -> String {
    let mut out = String::new();
    let mut pending = vec![script];
    let mut seen = vec![script];

    while let Some(r) = pending.pop() {
        let function = heap.function(r);
        disassemble_function(heap, function, &mut out);
        for constant in &function.chunk.constants {
            if let Some(child) = constant.as_obj() {
                if matches!(heap.get(child), Object::Function(_)) && !seen.contains(&child) {
                    seen.push(child);
                    pending.push(child);
                }
            }
        }
    }

    out
}

fn disassemble_function(heap: &Heap, function: &Function, out: &mut String) {
    let title = if function.name.is_empty() {
        "<script>".to_string()
    } else {
        format!("<fn {}>", function.name)
    };
    out.push_str(&format!("== {} ==\n", title));

    let mut last_line = 0;
    for (offset, op) in function.chunk.code.iter().enumerate() {
        let line = function.chunk.line_for(offset);
        if line == last_line {
            out.push_str(&format!("{:04}    | ", offset));
        } else {
            out.push_str(&format!("{:04} {:>4} ", offset, line));
            last_line = line;
        }
        out.push_str(&render_op(heap, function, *op));
        out.push('\n');
    }
    out.push('\n');
}

fn render_op(heap: &Heap, function: &Function, op: Op) -> String {
    let constant = |index: usize| {
        let value = function.chunk.constants[index];
        format!("{:<14} {} ({})", op.name(), index, heap.format_value(value))
    };
    match op {
        Op::Constant(i)
        | Op::GetGlobal(i)
        | Op::DefineGlobal(i)
        | Op::SetGlobal(i)
        | Op::GetProperty(i)
        | Op::SetProperty(i)
        | Op::Class(i)
        | Op::Method(i)
        | Op::Closure(i) => constant(i),
        Op::Invoke(i, argc) => format!("{} ({} args)", constant(i), argc),
        Op::GetLocal(slot) | Op::SetLocal(slot) => format!("{:<14} {}", op.name(), slot),
        Op::GetUpvalue(i) | Op::SetUpvalue(i) => format!("{:<14} {}", op.name(), i),
        Op::Jump(t) | Op::JumpIfFalse(t) | Op::Loop(t) => {
            format!("{:<14} -> {:04}", op.name(), t)
        }
        Op::Call(argc) => format!("{:<14} ({} args)", op.name(), argc),
        _ => op.name().to_string(),
    }
}
