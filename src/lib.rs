//! NAR — a Non-Axiomatic Reasoning kernel: term algebra, truth values,
//! budgets, stamps, concepts/tasks, a priority bag, an attention/
//! scheduling loop, a derivation admission gate, and structural
//! single-premise inference. The syllogistic rule set (deduction,
//! induction, abduction, comparison, analogy, revision) that actually
//! drives belief change is deliberately left to an external `Deriver`
//! implementation — this crate schedules for it, it does not provide it.

pub mod admission;
pub mod attention;
pub mod bag;
pub mod budget;
pub mod concept;
pub mod config;
pub mod error;
pub mod memory;
pub mod nal;
pub mod operator;
pub mod output;
pub mod parser;
pub mod recorder;
pub mod rng;
pub mod stamp;
pub mod structural;
pub mod table;
pub mod task;
pub mod term;
pub mod truth;

pub use attention::{Deriver, NullDeriver};
pub use concept::Concept;
pub use config::{KernelConfig, KernelConfigBuilder};
pub use memory::Memory;
pub use nal::Nar;
pub use structural::StructuralDeriver;
pub use task::Task;
pub use term::Term;
pub use truth::TruthValue;
