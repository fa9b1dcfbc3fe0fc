// tests/concurrency_tests.rs
mod common;
use common::*;
use escapehatch::{
  active_hatches, escape_hatch, escape_hatch_into, from_pair, Fault, Hatch, Propagate, ResultSlot, Target, Targets,
};
use std::thread;

fn divide_into(x: i32, y: i32, slot: &ResultSlot<i32>) {
  escape_hatch_into(slot, || {
    let (value, failure) = divide(x, y);
    let value = from_pair(value, failure).eh();
    Ok(value)
  });
}

#[test]
fn test_independent_threads_each_own_their_hatch() {
  setup_tracing();
  let res1 = ResultSlot::new();
  let res2 = ResultSlot::new();
  let res3 = ResultSlot::new();

  thread::scope(|scope| {
    scope.spawn(|| divide_into(4, 2, &res1));
    scope.spawn(|| divide_into(4, 0, &res2));
    scope.spawn(|| divide_into(5, 0, &res3));
  });

  assert_eq!(res1.ok_value(), Some(2));
  assert!(res2.is_err());
  assert!(res3.is_err());
  assert_eq!(
    res2.map_result(|res| res.as_ref().expect("slot filled")).as_ref().unwrap_err().to_string(),
    "divide by zero"
  );
}

#[test]
fn test_slots_shared_by_clone_across_spawned_threads() {
  setup_tracing();
  let slots: Vec<ResultSlot<i32>> = (0..4).map(|_| ResultSlot::new()).collect();
  let handles: Vec<_> = slots
    .iter()
    .cloned()
    .enumerate()
    .map(|(idx, slot)| {
      thread::spawn(move || {
        Hatch::new()
          .fallback(-1, [TestError::DivideByZero])
          .run_into(&slot, || Ok(checked_divide(12, idx as i32).eh()))
      })
    })
    .collect();

  for handle in handles {
    assert!(handle.join().expect("worker thread panicked"));
  }

  let values: Vec<_> = slots.iter().map(|slot| slot.ok_value()).collect();
  assert_eq!(values, vec![Some(-1), Some(12), Some(6), Some(4)]);
}

#[test]
fn test_interruption_never_crosses_threads() {
  setup_tracing();
  let outer = escape_hatch(|| {
    assert_eq!(active_hatches(), 1);
    let worker = thread::spawn(|| {
      // The parent's hatch is not visible here.
      let depth = active_hatches();
      let _value: i32 = fails_with(FAIL_SECOND_TIME).eh();
      depth
    });
    let payload = worker.join().expect_err("propagating without a local hatch must fault the worker");
    Ok(matches!(
      payload.downcast_ref::<Fault>(),
      Some(Fault::NoActiveHatch { failure, .. }) if FAIL_SECOND_TIME.matches(failure)
    ))
  });
  assert!(outer.unwrap());
}

#[test]
fn test_slot_take_and_store() {
  setup_tracing();
  let slot: ResultSlot<&str> = ResultSlot::default();
  assert!(!slot.is_filled());
  assert!(!slot.is_ok());
  assert!(!slot.is_err());

  assert!(slot.store(Ok("first")).is_none());
  assert!(slot.is_ok());
  let previous = slot.store(Err(anyhow::anyhow!("second")));
  assert_eq!(previous.unwrap().unwrap(), "first");

  let taken = slot.take().expect("slot filled");
  assert_eq!(taken.unwrap_err().to_string(), "second");
  assert!(!slot.is_filled());

  let fallback = Hatch::new().fallback("fallback", Targets::any());
  assert!(fallback.run_into(&slot, || Err(anyhow::anyhow!("third"))));
  assert_eq!(slot.ok_value(), Some("fallback"));
}

#[test]
fn test_slot_write_guard_edits_stored_result() {
  setup_tracing();
  let slot = ResultSlot::new();
  let reader = slot.clone();
  thread::scope(|scope| {
    scope.spawn(|| divide_into(9, 3, &slot));
  });

  if let Some(Ok(value)) = slot.write().as_mut() {
    *value *= 10;
  }
  assert_eq!(reader.ok_value(), Some(30));

  *slot.write() = Some(Err(anyhow::Error::from(FAIL_THIRD_TIME)));
  assert!(reader.is_err());
  let stored = reader.read();
  let failure = stored.as_ref().and_then(|res| res.as_ref().err()).expect("failure stored");
  assert!(FAIL_THIRD_TIME.matches(failure));
}
