//! Wire-level operation DAG consumed and produced by the scheduling passes.
//!
//! Operations are appended at the back only, so insertion order is always a
//! valid topological order. Edges are represented implicitly: the ordered
//! per-wire node lists encode both same-wire ordering and classical-condition
//! ordering, which is the entire edge relation this core needs.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use thiserror::Error;

use crate::models::{Condition, Instruction, OpNode, Register, TimeUnit, Wire};

/// Handle to a node inside a [`CircuitDag`].
pub type NodeId = usize;

/// Errors raised while building or editing a circuit graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DagError {
    #[error("wire {0:?} is not part of this circuit")]
    WireOutOfRange(Wire),
    #[error("wire {0:?} appears more than once in the operand lists")]
    DuplicateWire(Wire),
    #[error("expected a {expected} wire, got {got:?}")]
    WrongWireKind { expected: &'static str, got: Wire },
    #[error("node {0} does not exist or was removed")]
    UnknownNode(NodeId),
}

/// DAG over circuit operations with per-wire ordering and schedule metadata.
///
/// `duration` is None until a scheduling pass has timed the whole circuit.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CircuitDag {
    qregs: Vec<Register>,
    cregs: Vec<Register>,
    nodes: Vec<Option<OpNode>>,
    order: Vec<NodeId>,
    qubit_ops: Vec<Vec<NodeId>>,
    clbit_ops: Vec<Vec<NodeId>>,
    /// Total schedule duration, None while unscheduled.
    #[pyo3(get)]
    pub duration: Option<f64>,
    /// Unit `duration` and all op durations are expressed in.
    #[pyo3(get)]
    pub unit: TimeUnit,
}

impl CircuitDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quantum register, growing the qubit wire space.
    pub fn add_qreg(&mut self, reg: Register) {
        self.qubit_ops
            .extend((0..reg.size).map(|_| Vec::new()));
        self.qregs.push(reg);
    }

    /// Add a classical register, growing the clbit wire space.
    pub fn add_creg(&mut self, reg: Register) {
        self.clbit_ops
            .extend((0..reg.size).map(|_| Vec::new()));
        self.cregs.push(reg);
    }

    /// A new dag with the same registers and no operations.
    ///
    /// Schedule metadata is cleared: the copy is unscheduled.
    pub fn copy_empty(&self) -> Self {
        Self {
            qregs: self.qregs.clone(),
            cregs: self.cregs.clone(),
            nodes: Vec::new(),
            order: Vec::new(),
            qubit_ops: vec![Vec::new(); self.qubit_ops.len()],
            clbit_ops: vec![Vec::new(); self.clbit_ops.len()],
            duration: None,
            unit: self.unit,
        }
    }

    pub fn num_qubits(&self) -> u32 {
        self.qubit_ops.len() as u32
    }

    pub fn num_clbits(&self) -> u32 {
        self.clbit_ops.len() as u32
    }

    /// Number of live operations.
    pub fn num_ops(&self) -> usize {
        self.order.len()
    }

    /// Whether the circuit is mapped to physical qubits: exactly one quantum
    /// register, named "q".
    pub fn is_physical(&self) -> bool {
        self.qregs.len() == 1 && self.qregs[0].name == "q"
    }

    pub fn qubits(&self) -> impl Iterator<Item = Wire> {
        (0..self.num_qubits()).map(Wire::Qubit)
    }

    pub fn clbits(&self) -> impl Iterator<Item = Wire> {
        (0..self.num_clbits()).map(Wire::Clbit)
    }

    /// All wires, qubits first, index order. Deterministic.
    pub fn wires(&self) -> impl Iterator<Item = Wire> {
        self.qubits().chain(self.clbits())
    }

    fn validate_wire(&self, wire: Wire) -> Result<(), DagError> {
        let in_range = match wire {
            Wire::Qubit(i) => (i as usize) < self.qubit_ops.len(),
            Wire::Clbit(i) => (i as usize) < self.clbit_ops.len(),
        };
        if in_range {
            Ok(())
        } else {
            Err(DagError::WireOutOfRange(wire))
        }
    }

    fn wire_list(&self, wire: Wire) -> Option<&Vec<NodeId>> {
        match wire {
            Wire::Qubit(i) => self.qubit_ops.get(i as usize),
            Wire::Clbit(i) => self.clbit_ops.get(i as usize),
        }
    }

    fn wire_list_mut(&mut self, wire: Wire) -> Option<&mut Vec<NodeId>> {
        match wire {
            Wire::Qubit(i) => self.qubit_ops.get_mut(i as usize),
            Wire::Clbit(i) => self.clbit_ops.get_mut(i as usize),
        }
    }

    /// Append an operation at the end of its wires.
    ///
    /// Operand wires must exist, match their list's kind, and be distinct.
    pub fn apply_operation_back(
        &mut self,
        op: Instruction,
        qargs: Vec<Wire>,
        cargs: Vec<Wire>,
        condition: Option<Condition>,
    ) -> Result<NodeId, DagError> {
        for &w in &qargs {
            if !w.is_qubit() {
                return Err(DagError::WrongWireKind {
                    expected: "quantum",
                    got: w,
                });
            }
            self.validate_wire(w)?;
        }
        for &w in &cargs {
            if w.is_qubit() {
                return Err(DagError::WrongWireKind {
                    expected: "classical",
                    got: w,
                });
            }
            self.validate_wire(w)?;
        }
        if let Some(cond) = &condition {
            if cond.clbit.is_qubit() {
                return Err(DagError::WrongWireKind {
                    expected: "classical",
                    got: cond.clbit,
                });
            }
            self.validate_wire(cond.clbit)?;
        }

        let mut seen: Vec<Wire> = Vec::with_capacity(qargs.len() + cargs.len());
        for &w in qargs.iter().chain(cargs.iter()) {
            if seen.contains(&w) {
                return Err(DagError::DuplicateWire(w));
            }
            seen.push(w);
        }

        let node = OpNode {
            op,
            qargs,
            cargs,
            condition,
        };
        let id = self.nodes.len();
        for w in node.wires() {
            // validated above, lists exist
            if let Some(list) = self.wire_list_mut(w) {
                list.push(id);
            }
        }
        self.order.push(id);
        self.nodes.push(Some(node));
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&OpNode> {
        self.nodes.get(id).and_then(|slot| slot.as_ref())
    }

    /// Live operations in dependency order (insertion order).
    pub fn topological_op_nodes(&self) -> impl Iterator<Item = &OpNode> {
        self.order
            .iter()
            .filter_map(move |&id| self.nodes[id].as_ref())
    }

    /// Ordered node ids on one wire. Empty for unknown wires.
    pub fn nodes_on_wire(&self, wire: Wire) -> &[NodeId] {
        self.wire_list(wire).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ordered live operations on one wire.
    pub fn ops_on_wire(&self, wire: Wire) -> impl Iterator<Item = &OpNode> {
        self.nodes_on_wire(wire)
            .iter()
            .filter_map(move |&id| self.node(id))
    }

    /// Remove a node and its incident edges (its per-wire list entries).
    pub fn remove_op_node(&mut self, id: NodeId) -> Result<(), DagError> {
        let node = self
            .nodes
            .get_mut(id)
            .and_then(Option::take)
            .ok_or(DagError::UnknownNode(id))?;
        for w in node.wires() {
            if let Some(list) = self.wire_list_mut(w) {
                list.retain(|&n| n != id);
            }
        }
        self.order.retain(|&n| n != id);
        Ok(())
    }
}

#[pymethods]
impl CircuitDag {
    #[new]
    fn py_new() -> Self {
        Self::new()
    }

    #[pyo3(name = "add_qreg")]
    fn py_add_qreg(&mut self, reg: Register) {
        self.add_qreg(reg);
    }

    #[pyo3(name = "add_creg")]
    fn py_add_creg(&mut self, reg: Register) {
        self.add_creg(reg);
    }

    #[pyo3(name = "copy_empty")]
    fn py_copy_empty(&self) -> Self {
        self.copy_empty()
    }

    #[pyo3(name = "num_qubits")]
    fn py_num_qubits(&self) -> u32 {
        self.num_qubits()
    }

    #[pyo3(name = "num_clbits")]
    fn py_num_clbits(&self) -> u32 {
        self.num_clbits()
    }

    #[pyo3(name = "is_physical")]
    fn py_is_physical(&self) -> bool {
        self.is_physical()
    }

    #[pyo3(name = "apply_operation_back", signature = (op, qargs, cargs, condition=None))]
    fn py_apply_operation_back(
        &mut self,
        op: Instruction,
        qargs: Vec<Wire>,
        cargs: Vec<Wire>,
        condition: Option<Condition>,
    ) -> PyResult<usize> {
        self.apply_operation_back(op, qargs, cargs, condition)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[pyo3(name = "op_nodes")]
    fn py_op_nodes(&self) -> Vec<OpNode> {
        self.topological_op_nodes().cloned().collect()
    }

    #[pyo3(name = "nodes_on_wire")]
    fn py_nodes_on_wire(&self, wire: Wire) -> Vec<OpNode> {
        self.ops_on_wire(wire).cloned().collect()
    }

    #[pyo3(name = "remove_op_node")]
    fn py_remove_op_node(&mut self, id: usize) -> PyResult<()> {
        self.remove_op_node(id)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __len__(&self) -> usize {
        self.num_ops()
    }

    fn __repr__(&self) -> String {
        format!(
            "CircuitDag(qubits={}, clbits={}, ops={}, duration={:?})",
            self.num_qubits(),
            self.num_clbits(),
            self.num_ops(),
            self.duration
        )
    }
}
