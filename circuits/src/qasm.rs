//! OpenQASM 3.0 dialect - serialization, parsing and text substitution
//!
//! The emitted text has three sections: `input float theta<k>;` parameter
//! declarations (omitted for the default workflow, where parameters are
//! outer-loop variables), register declarations, and the gate sequence
//! ending in per-qubit measurement. The version header and standard gate
//! library include are prepended by the adapters.

use crate::error::{CircuitError, Result};
use crate::{Circuit, Op, Param};
use regex::Regex;
use std::sync::OnceLock;

/// Dialect header declaring version 3.0 and the standard gate library
pub const HEADER: &str = "OPENQASM 3.0;\ninclude \"stdgates.inc\";\n";

/// Whether to emit the `input float theta<k>;` declaration section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDecls {
    Include,
    Omit,
}

fn theta_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Word boundary keeps gate names with a shared prefix intact and makes
    // theta1 distinct from theta12.
    RE.get_or_init(|| Regex::new(r"\btheta(\d+)").expect("valid regex"))
}

/// Serialize a circuit to dialect text (no header)
pub fn serialize(circuit: &Circuit, decls: ParamDecls) -> String {
    let mut out = String::new();

    if decls == ParamDecls::Include {
        for k in 0..circuit.num_params() {
            out.push_str(&format!("input float theta{};\n", k));
        }
    }

    out.push_str(&format!("qreg q[{}];\n", circuit.num_qubits));
    out.push_str(&format!("creg c[{}];\n", circuit.num_clbits));

    for op in circuit.ops() {
        let line = match *op {
            Op::H(q) => format!("h q[{}];", q),
            Op::X(q) => format!("x q[{}];", q),
            Op::Sdg(q) => format!("sdg q[{}];", q),
            Op::Rx(p, q) => format!("rx({}) q[{}];", p, q),
            Op::Ry(p, q) => format!("ry({}) q[{}];", p, q),
            Op::Rz(p, q) => format!("rz({}) q[{}];", p, q),
            Op::Cx(c, t) => format!("cx q[{}], q[{}];", c, t),
            Op::Swap(a, b) => format!("swap q[{}], q[{}];", a, b),
            Op::Measure { qubit, clbit } => format!("measure q[{}] -> c[{}];", qubit, clbit),
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Prepend the dialect header unless the program already carries one
pub fn with_header(program: &str) -> String {
    if program.trim_start().starts_with("OPENQASM") {
        program.to_string()
    } else {
        format!("{}{}", HEADER, program)
    }
}

/// Replace every `theta<k>` placeholder with the decimal value of
/// `params[k]`
///
/// Matching is word-boundary based so gate names sharing a prefix are never
/// touched. A placeholder index beyond the vector is an arity mismatch.
pub fn replace_params(program: &str, params: &[f64]) -> Result<String> {
    let mut error = None;
    let replaced = theta_regex().replace_all(program, |caps: &regex::Captures<'_>| {
        let index: usize = caps[1].parse().expect("digits");
        match params.get(index) {
            Some(v) => v.to_string(),
            None => {
                error.get_or_insert(CircuitError::ParameterArityMismatch {
                    expected: index + 1,
                    actual: params.len(),
                });
                caps[0].to_string()
            }
        }
    });
    match error {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

/// Fail if the program still contains a placeholder
pub fn ensure_bound(program: &str) -> Result<()> {
    if let Some(m) = theta_regex().find(program) {
        return Err(CircuitError::UnboundParameter(m.as_str().to_string()));
    }
    Ok(())
}

/// Parse dialect text back into a circuit
///
/// Accepts the header, parameter declarations, register declarations and
/// the gate set of §dialect; `cnot` is accepted as an alias for `cx`.
pub fn parse(program: &str) -> Result<Circuit> {
    let mut num_qubits = None;
    let mut num_clbits = None;
    let mut ops: Vec<(Op, usize)> = Vec::new();
    let mut declared_params = 0usize;

    for (line_no, raw) in program.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty()
            || line.starts_with("OPENQASM")
            || line.starts_with("include")
            || line.starts_with("//")
        {
            continue;
        }
        let stmt = line.strip_suffix(';').ok_or_else(|| {
            CircuitError::ParseError(format!("line {}: missing ';': {}", line_no + 1, line))
        })?;

        if let Some(rest) = stmt.strip_prefix("input float ") {
            let index = rest
                .trim()
                .strip_prefix("theta")
                .and_then(|s| s.parse::<usize>().ok())
                .ok_or_else(|| {
                    CircuitError::ParseError(format!("bad parameter declaration: {}", stmt))
                })?;
            declared_params = declared_params.max(index + 1);
            continue;
        }
        if let Some(n) = parse_register(stmt, "qreg q") {
            num_qubits = Some(n?);
            continue;
        }
        if let Some(n) = parse_register(stmt, "creg c") {
            num_clbits = Some(n?);
            continue;
        }

        ops.push((parse_gate(stmt)?, line_no + 1));
    }

    let num_qubits =
        num_qubits.ok_or_else(|| CircuitError::ParseError("missing qreg declaration".into()))?;
    let mut circuit = Circuit::new(num_qubits);
    circuit.num_clbits = num_clbits.unwrap_or(num_qubits);

    for (op, line_no) in ops {
        circuit.push(op).map_err(|e| {
            CircuitError::ParseError(format!("line {}: {}", line_no, e))
        })?;
    }
    // Declared but unreferenced parameters still count toward the arity
    circuit.declare_params(declared_params);
    Ok(circuit)
}

fn parse_register(stmt: &str, prefix: &str) -> Option<Result<usize>> {
    let rest = stmt.strip_prefix(prefix)?;
    Some(
        rest.strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| CircuitError::ParseError(format!("bad register: {}", stmt))),
    )
}

fn parse_qubit(token: &str) -> Result<usize> {
    token
        .trim()
        .strip_prefix("q[")
        .and_then(|s| s.strip_suffix(']'))
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| CircuitError::ParseError(format!("bad qubit reference: {}", token)))
}

fn parse_clbit(token: &str) -> Result<usize> {
    token
        .trim()
        .strip_prefix("c[")
        .and_then(|s| s.strip_suffix(']'))
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(|| CircuitError::ParseError(format!("bad classical bit reference: {}", token)))
}

fn parse_param(text: &str) -> Result<Param> {
    let text = text.trim();
    if let Ok(v) = text.parse::<f64>() {
        return Ok(Param::Value(v));
    }
    if let Some(index) = text.strip_prefix("theta").and_then(|s| s.parse::<usize>().ok()) {
        return Ok(Param::theta(index));
    }
    // Scaled form: "<factor> * theta<k>" (also accepted reversed)
    if let Some((lhs, rhs)) = text.split_once('*') {
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        let (factor, theta) = if lhs.starts_with("theta") { (rhs, lhs) } else { (lhs, rhs) };
        let scale = factor
            .parse::<f64>()
            .map_err(|_| CircuitError::ParseError(format!("bad angle: {}", text)))?;
        let index = theta
            .strip_prefix("theta")
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| CircuitError::ParseError(format!("bad angle: {}", text)))?;
        return Ok(Param::scaled(scale, index));
    }
    Err(CircuitError::ParseError(format!("bad angle: {}", text)))
}

fn parse_gate(stmt: &str) -> Result<Op> {
    if let Some(rest) = stmt.strip_prefix("measure ") {
        let (q, c) = rest
            .split_once("->")
            .ok_or_else(|| CircuitError::ParseError(format!("bad measure: {}", stmt)))?;
        return Ok(Op::Measure {
            qubit: parse_qubit(q)?,
            clbit: parse_clbit(c)?,
        });
    }

    // The angle expression may contain spaces ("2 * theta1"), so split on
    // the parenthesis first and only then on whitespace.
    let (name, param, targets) = match stmt.split_once('(') {
        Some((name, rest)) => {
            let (inner, targets) = rest
                .split_once(')')
                .ok_or_else(|| CircuitError::ParseError(format!("bad statement: {}", stmt)))?;
            (name.trim(), Some(parse_param(inner)?), targets)
        }
        None => {
            let (name, targets) = stmt
                .split_once(' ')
                .ok_or_else(|| CircuitError::ParseError(format!("bad statement: {}", stmt)))?;
            (name, None, targets)
        }
    };

    let qubits: Vec<usize> = targets
        .split(',')
        .map(parse_qubit)
        .collect::<Result<_>>()?;
    let single = |qs: &[usize]| -> Result<usize> {
        match qs {
            [q] => Ok(*q),
            _ => Err(CircuitError::ParseError(format!("bad operands: {}", stmt))),
        }
    };
    let pair = |qs: &[usize]| -> Result<(usize, usize)> {
        match qs {
            [a, b] => Ok((*a, *b)),
            _ => Err(CircuitError::ParseError(format!("bad operands: {}", stmt))),
        }
    };
    let angle = param.ok_or_else(|| CircuitError::ParseError(format!("missing angle: {}", stmt)));

    match name {
        "h" => Ok(Op::H(single(&qubits)?)),
        "x" => Ok(Op::X(single(&qubits)?)),
        "sdg" => Ok(Op::Sdg(single(&qubits)?)),
        "rx" => Ok(Op::Rx(angle?, single(&qubits)?)),
        "ry" => Ok(Op::Ry(angle?, single(&qubits)?)),
        "rz" => Ok(Op::Rz(angle?, single(&qubits)?)),
        "cx" | "cnot" => {
            let (c, t) = pair(&qubits)?;
            Ok(Op::Cx(c, t))
        }
        "swap" => {
            let (a, b) = pair(&qubits)?;
            Ok(Op::Swap(a, b))
        }
        other => Err(CircuitError::ParseError(format!("unknown gate '{}'", other))),
    }
}
