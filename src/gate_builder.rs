// SPDX-License-Identifier: Apache-2.0

//! Gate construction on top of `CoverNetwork::get_or_create_node`.
//!
//! Primitive gates (NOT, AND, ..., XOR3) have a fixed cover. Each kind's cover
//! is inserted into the cover table once per network, on first use, and all
//! later gates of that kind point at the same slot; that is what lets
//! structural hashing recognize a repeated `create_and(a, b)`.
//!
//! Covers passed to `create_cover_node` are inserted as given, every time, so
//! they only ever hash equal to nodes built from the same cover reference.

use crate::cube::{Cover, Cube};
use crate::network::CoverNetwork;
use crate::storage::{CoverRef, NodeRef, Signal};
use crate::truth_table::TruthTable;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum PrimitiveGate {
    Not,
    And,
    Nand,
    Or,
    Nor,
    Lt,
    Le,
    Gt,
    Ge,
    Xor,
    Xnor,
    Maj3,
    Ite,
    Xor3,
}

impl PrimitiveGate {
    pub fn arity(&self) -> usize {
        match self {
            PrimitiveGate::Not => 1,
            PrimitiveGate::Maj3 | PrimitiveGate::Ite | PrimitiveGate::Xor3 => 3,
            _ => 2,
        }
    }

    /// The fixed cover of this gate; the first input is the most significant
    /// cube position.
    pub fn cover(&self) -> Cover {
        let minterms = |width: usize, patterns: &[u32]| -> Vec<Cube> {
            patterns.iter().map(|&p| Cube::minterm(p, width)).collect()
        };
        match self {
            PrimitiveGate::Not => Cover::on_set(minterms(1, &[0b0])),
            PrimitiveGate::And => Cover::on_set(minterms(2, &[0b11])),
            PrimitiveGate::Nand => Cover::off_set(minterms(2, &[0b11])),
            PrimitiveGate::Or => Cover::off_set(minterms(2, &[0b00])),
            PrimitiveGate::Nor => Cover::on_set(minterms(2, &[0b00])),
            PrimitiveGate::Lt => Cover::on_set(minterms(2, &[0b01])),
            PrimitiveGate::Le => Cover::off_set(minterms(2, &[0b10])),
            PrimitiveGate::Gt => Cover::on_set(minterms(2, &[0b10])),
            PrimitiveGate::Ge => Cover::off_set(minterms(2, &[0b01])),
            PrimitiveGate::Xor => Cover::on_set(minterms(2, &[0b01, 0b10])),
            PrimitiveGate::Xnor => Cover::on_set(minterms(2, &[0b00, 0b11])),
            PrimitiveGate::Maj3 => Cover::on_set(minterms(3, &[0b011, 0b101, 0b110, 0b111])),
            // "11-", "0-1"
            PrimitiveGate::Ite => Cover::on_set(vec![
                Cube::new(0b110, 0b110),
                Cube::new(0b001, 0b101),
            ]),
            PrimitiveGate::Xor3 => Cover::on_set(minterms(3, &[0b001, 0b010, 0b100, 0b111])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionKind {
    Linear,
    Tree,
}

impl CoverNetwork {
    fn primitive_cover_ref(&mut self, gate: PrimitiveGate) -> CoverRef {
        if let Some(cover_ref) = self.primitive_covers.get(&gate) {
            return *cover_ref;
        }
        let cover_ref = self.insert_cover(gate.cover());
        log::debug!(
            "primitive_cover_ref; registered {:?} as cover {}",
            gate,
            cover_ref.id
        );
        self.primitive_covers.insert(gate, cover_ref);
        cover_ref
    }

    pub fn create_primitive(&mut self, gate: PrimitiveGate, children: &[Signal]) -> Signal {
        assert_eq!(
            children.len(),
            gate.arity(),
            "{:?} takes {} operands, got {}",
            gate,
            gate.arity(),
            children.len()
        );
        let cover_ref = self.primitive_cover_ref(gate);
        self.get_or_create_node(children, cover_ref)
    }

    // -- Unary

    /// Buffers are free: the operand is returned as-is.
    pub fn create_buf(&mut self, a: Signal) -> Signal {
        a
    }

    pub fn create_not(&mut self, a: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Not, &[a])
    }

    // -- Binary

    pub fn create_and(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::And, &[a, b])
    }

    pub fn create_nand(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Nand, &[a, b])
    }

    pub fn create_or(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Or, &[a, b])
    }

    pub fn create_nor(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Nor, &[a, b])
    }

    /// `a < b`, i.e. `!a & b`.
    pub fn create_lt(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Lt, &[a, b])
    }

    pub fn create_le(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Le, &[a, b])
    }

    pub fn create_gt(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Gt, &[a, b])
    }

    pub fn create_ge(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Ge, &[a, b])
    }

    pub fn create_xor(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Xor, &[a, b])
    }

    pub fn create_xnor(&mut self, a: Signal, b: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Xnor, &[a, b])
    }

    // -- Ternary

    /// Returns the 3-input majority function:
    ///
    /// \(maj(a, b, c) = (a \& b) | (a \& c) | (b \& c)\).
    pub fn create_maj(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Maj3, &[a, b, c])
    }

    /// If-then-else: `a ? b : c`.
    pub fn create_ite(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Ite, &[a, b, c])
    }

    pub fn create_xor3(&mut self, a: Signal, b: Signal, c: Signal) -> Signal {
        self.create_primitive(PrimitiveGate::Xor3, &[a, b, c])
    }

    // -- N-ary

    pub fn linear_reduce<F>(&mut self, args: &[Signal], f: &F) -> Signal
    where
        F: Fn(&mut Self, Signal, Signal) -> Signal,
    {
        assert!(
            !args.is_empty(),
            "attempted to reduce an empty list of operands"
        );
        let mut accum = args[0];
        for arg in &args[1..] {
            accum = f(self, accum, *arg);
        }
        accum
    }

    pub fn tree_reduce<F>(&mut self, args: &[Signal], f: &F) -> Signal
    where
        F: Fn(&mut Self, Signal, Signal) -> Signal,
    {
        assert!(
            !args.is_empty(),
            "attempted to reduce an empty list of operands"
        );
        if args.len() == 1 {
            return args[0];
        }
        let (lhs, rhs) = args.split_at(args.len() / 2);
        log::trace!(
            "tree_reduce; orig: {} lhs: {} rhs: {}",
            args.len(),
            lhs.len(),
            rhs.len()
        );
        let lhs = self.tree_reduce(lhs, f);
        let rhs = self.tree_reduce(rhs, f);
        f(self, lhs, rhs)
    }

    /// Folds `args` with `f`; an empty list yields `identity` and a single
    /// operand is returned unchanged.
    pub fn reduce<F>(
        &mut self,
        args: &[Signal],
        identity: Signal,
        f: &F,
        reduction_kind: ReductionKind,
    ) -> Signal
    where
        F: Fn(&mut Self, Signal, Signal) -> Signal,
    {
        if args.is_empty() {
            return identity;
        }
        match reduction_kind {
            ReductionKind::Linear => self.linear_reduce(args, f),
            ReductionKind::Tree => self.tree_reduce(args, f),
        }
    }

    pub fn create_nary_and(&mut self, fs: &[Signal]) -> Signal {
        let identity = self.get_constant(true);
        self.reduce(fs, identity, &CoverNetwork::create_and, ReductionKind::Tree)
    }

    pub fn create_nary_or(&mut self, fs: &[Signal]) -> Signal {
        let identity = self.get_constant(false);
        self.reduce(fs, identity, &CoverNetwork::create_or, ReductionKind::Tree)
    }

    pub fn create_nary_xor(&mut self, fs: &[Signal]) -> Signal {
        let identity = self.get_constant(false);
        self.reduce(fs, identity, &CoverNetwork::create_xor, ReductionKind::Tree)
    }

    // -- Arbitrary functions

    /// Creates a node computing `cover` over `children`. The cover is always
    /// inserted as a fresh cover-table entry. With no children the result is
    /// the constant matching the cover's polarity.
    pub fn create_cover_node(&mut self, children: &[Signal], cover: Cover) -> Signal {
        if children.is_empty() {
            return self.get_constant(cover.polarity);
        }
        let cover_ref = self.insert_cover(cover);
        self.get_or_create_node(children, cover_ref)
    }

    /// Creates a node computing `function` over `children`, where variable 0
    /// of the table is `children[0]`.
    ///
    /// The cover lists whichever of the ON/OFF-set is smaller (ties go to the
    /// ON-set), one fully specified cube per minterm.
    pub fn create_cover_node_from_truth_table(
        &mut self,
        children: &[Signal],
        function: &TruthTable,
    ) -> Signal {
        if children.is_empty() {
            return self.get_constant(!function.is_const0());
        }
        assert_eq!(
            children.len(),
            function.num_vars(),
            "truth table over {} variables used with {} children",
            function.num_vars(),
            children.len()
        );
        self.create_cover_node(children, function.to_cover())
    }

    /// Copies the function of `source` in `other` onto `children` in this
    /// network.
    pub fn clone_node(&mut self, other: &CoverNetwork, source: NodeRef, children: &[Signal]) -> Signal {
        assert!(
            !children.is_empty(),
            "clone_node: {:?} cannot be cloned without children",
            source
        );
        let cover = other.node_cover(source).clone();
        self.create_cover_node(children, cover)
    }
}
