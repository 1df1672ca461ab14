//! Randomized harness used by the stack tests
//!
//! `Tester` and `test_throughput` measure how many randomly chosen
//! operations a stack completes in a fixed amount of time. `replay` drives
//! a stack with a pre-generated script and records what every operation
//! observed, so that different implementations (and a `Vec` model) can be
//! compared step by step.

use std::time::{Duration, Instant};
use rand::Rng;
use rand::rngs::ThreadRng;
use crate::stack::Stack;

/// An operation that a `Tester` may pick at random.
pub trait TestOp : Copy + Clone {}

/// Picks one of `ops` with the attached probability. The probabilities are
/// expected to sum to 1; any shortfall goes to the last op.
pub fn choose_op<O: TestOp, R: Rng>(rng: &mut R, ops: &[(O, f64)]) -> O {
  let f: f64 = rng.gen();
  let mut acc = 0.0;

  for &(op, p) in ops {
    acc += p;
    if f < acc {
      return op;
    }
  }

  ops[ops.len() - 1].0
}

pub fn duration_to_ns(d: Duration) -> f64 {
  (d.as_secs() as f64) * 1_000_000_000.0 +
    (d.subsec_nanos() as f64)
}

pub fn secs_to_duration(t: f64) -> Duration {
  Duration::new(
    t as u64,
    ((t - ((t as u64) as f64)) * 1_000_000_000.0) as u32)
}

/// Something that can perform one random operation at a time.
pub trait Tester {
  fn execute_op(&mut self, rng: &mut ThreadRng);
}

/// Runs random operations for `t_secs` seconds and prints the throughput.
pub fn test_throughput<T: Tester>(mut tester: T, t_secs: f64) {
  let mut rng = rand::thread_rng();
  let mut n_ops = 0u64;
  let duration = secs_to_duration(t_secs);
  let start_time = Instant::now();

  let elapsed = loop {
    tester.execute_op(&mut rng);
    n_ops += 1;

    let d = start_time.elapsed();
    if d >= duration {
      break d
    }
  };

  let ns_elapsed = duration_to_ns(elapsed);
  let ns_per_op = ns_elapsed/(n_ops as f64);

  println!();
  println!("Time elapsed (s): {}", ns_elapsed / 1_000_000_000.0);
  println!("Ops completed:    {}", n_ops);
  println!("Time per op (ns): {}", ns_per_op);
}


//////////////////////////////////////////////////////////////////////////////
//// Scripted replay
//////////////////////////////////////////////////////////////////////////////

/// An operation together with what it observed.
#[derive(Debug)]
#[derive(Copy)]
#[derive(Clone)]
#[derive(PartialEq)]
pub enum StackOp<T> {
  Push(T),
  Pop(Option<T>),
}

/// A step of a script: `Some(v)` pushes `v`, `None` pops.
pub type Step = Option<i32>;

/// Generates `n` steps, each a pop with probability `p_pop`.
pub fn gen_script<R: Rng>(rng: &mut R, n: usize, p_pop: f64) -> Vec<Step> {
  (0..n).map(|_| {
    if rng.gen::<f64>() < p_pop {
      None
    } else {
      Some(rng.gen())
    }
  }).collect()
}

/// Runs `script` against `stack`, recording each operation, the top after
/// it and the size after it.
pub fn replay<S>(stack: &mut S, script: &[Step]) -> Vec<(StackOp<i32>, Option<i32>, usize)>
where S: Stack<i32> {
  script.iter().map(|step| {
    let op = match *step {
      Some(v) => {
        stack.push(v);
        StackOp::Push(v)
      }
      None => StackOp::Pop(stack.pop()),
    };
    (op, stack.top().ok().cloned(), stack.size())
  }).collect()
}

/// `replay` for a `Vec` used as a reference stack.
pub fn replay_model(model: &mut Vec<i32>, script: &[Step]) -> Vec<(StackOp<i32>, Option<i32>, usize)> {
  script.iter().map(|step| {
    let op = match *step {
      Some(v) => {
        model.push(v);
        StackOp::Push(v)
      }
      None => StackOp::Pop(model.pop()),
    };
    (op, model.last().cloned(), model.len())
  }).collect()
}
