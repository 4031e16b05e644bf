// SPDX-License-Identifier: Apache-2.0

//! Human-readable dump of a network, for tests and logs.
//!
//! ```text
//! network(pi %2, pi %3, ro %4) {
//!   %5 = on[11](%2, %3)
//!   %6 = off[00](%5, %4)
//!   po0 = %5
//!   ri0 = %6 reset=Zero
//! }
//! ```
//!
//! Gates are listed in arena order, dead ones included.

use std::fmt;

use crate::network::CoverNetwork;

impl fmt::Display for CoverNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs = self
            .pis()
            .map(|n| format!("pi {}", n))
            .chain(self.ros().map(|n| format!("ro {}", n)))
            .collect::<Vec<String>>()
            .join(", ");
        writeln!(f, "network({}) {{", inputs)?;
        for n in self.gates() {
            let cover = self.node_cover(n).to_string_with_width(self.fanin_size(n));
            let args = self
                .fanins(n)
                .map(|child| child.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            writeln!(f, "  {} = {}({})", n, cover, args)?;
        }
        for (i, po) in self.pos().enumerate() {
            writeln!(f, "  po{} = {}", i, po)?;
        }
        for (i, ri) in self.ris().enumerate() {
            writeln!(f, "  ri{} = {} reset={:?}", i, ri, self.latch_reset(i))?;
        }
        write!(f, "}}")
    }
}
