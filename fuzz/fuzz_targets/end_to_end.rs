#![no_main]

use libfuzzer_sys::fuzz_target;
use pluma::ops::{Delete, Retain};
use pluma::{Compose, Delta, Op, Transform};

/// Clamps the retains and deletes of `delta` so that it consumes exactly
/// `base` elements, which makes it composable onto a document of that
/// length.
fn fit(delta: Delta, base: usize) -> Delta {
    let mut remaining = base;
    let mut fitted = Delta::new();

    for op in delta {
        match op {
            Op::InsertText(_) | Op::InsertCode(_) => fitted.push(op),
            Op::Retain(retain) => {
                let len = retain.retain.min(remaining);
                remaining -= len;
                fitted.push(Op::Retain(Retain {
                    retain: len,
                    attributes: retain.attributes,
                }));
            }
            Op::Delete(delete) => {
                let len = delete.delete.min(remaining);
                remaining -= len;
                fitted.push(Op::Delete(Delete { delete: len }));
            }
        }
    }

    if remaining > 0 {
        fitted.push(Op::Retain(Retain {
            retain: remaining,
            attributes: None,
        }));
    }

    fitted
}

fuzz_target!(|data: (String, Delta, Delta)| {
    let before = Delta::new().insert(data.0, None);
    let alice = fit(data.1, before.target_len());
    let bob = fit(data.2, before.target_len());

    let alice_bob = before
        .clone()
        .compose(alice.clone())
        .unwrap()
        .compose(alice.clone().transform(bob.clone(), true))
        .unwrap();

    let bob_alice = before
        .clone()
        .compose(bob.clone())
        .unwrap()
        .compose(bob.transform(alice, false))
        .unwrap();

    assert_eq!(alice_bob, bob_alice);
});
