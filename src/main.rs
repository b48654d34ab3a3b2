//! Minimal demo driver: input a few judgments, run some cycles, print what
//! the kernel surfaces on its output channel. Not the primary interface —
//! an embedding application is expected to hold its own `Nar` and drive it.

use std::sync::Arc;

use parking_lot::Mutex;

use nar::config::KernelConfig;
use nar::output::OutputSink;
use nar::recorder::LogRecorder;
use nar::task::Task;
use nar::Nar;

struct PrintSink;

impl OutputSink for PrintSink {
    fn emit(&self, task: &Task) {
        println!("  out: {}", task);
    }
}

fn main() {
    let mut nar = Nar::new(KernelConfig::default());
    nar.set_recorder(Arc::new(Mutex::new(Box::new(LogRecorder))));
    nar.set_output(Arc::new(Mutex::new(Box::new(PrintSink))));

    println!("inputting initial knowledge...");
    for sentence in ["(cat --> animal). %0.9;0.9%", "(dog --> animal). %0.9;0.9%", "(cat --> furry). %1.0;0.9%"] {
        if let Err(err) = nar.input_sentence(sentence) {
            eprintln!("rejected {:?}: {:?}", sentence, err);
        }
    }

    println!("time {} concepts {}", nar.get_time(), nar.memory().concept_count());

    println!("running 10 cycles...");
    for _ in 0..10 {
        nar.cycle();
    }

    println!("time {} concepts {}", nar.get_time(), nar.memory().concept_count());
}
