//! Expansion of operation sequences into flat execution plans.

use config::Operation;
use macrodeck_protocol::DeviceEffect;

/// Expand an operation sequence into the flat, finite effect list the
/// device sink consumes.
///
/// Traversal is depth-first, left-to-right, preserving source order.
/// `Repeat { times }` contributes exactly `times` copies of its
/// (recursively expanded) body; `times: 0` contributes nothing. Pure.
pub fn expand(operations: &[Operation]) -> Vec<DeviceEffect> {
    let mut out = Vec::new();
    push_expanded(operations, &mut out);
    out
}

fn push_expanded(operations: &[Operation], out: &mut Vec<DeviceEffect>) {
    for op in operations {
        match op {
            Operation::KeyPress { key } => out.push(DeviceEffect::KeyPress { key: key.clone() }),
            Operation::KeyTap { key } => out.push(DeviceEffect::KeyTap { key: key.clone() }),
            Operation::KeyRelease { key } => {
                out.push(DeviceEffect::KeyRelease { key: key.clone() })
            }
            Operation::Delay { ms } => out.push(DeviceEffect::Delay { ms: *ms }),
            Operation::Repeat { times, operations } => {
                for _ in 0..*times {
                    push_expanded(operations, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(key: &str) -> Operation {
        Operation::KeyTap {
            key: key.to_string(),
        }
    }

    fn tap_effect(key: &str) -> DeviceEffect {
        DeviceEffect::KeyTap {
            key: key.to_string(),
        }
    }

    #[test]
    fn repeat_three_times() {
        let ops = vec![Operation::Repeat {
            times: 3,
            operations: vec![tap("a")],
        }];
        assert_eq!(
            expand(&ops),
            vec![tap_effect("a"), tap_effect("a"), tap_effect("a")]
        );
    }

    #[test]
    fn repeat_zero_times_contributes_nothing() {
        let ops = vec![Operation::Repeat {
            times: 0,
            operations: vec![tap("a")],
        }];
        assert_eq!(expand(&ops), Vec::<DeviceEffect>::new());
    }

    #[test]
    fn nested_repeats_expand_recursively() {
        let ops = vec![Operation::Repeat {
            times: 2,
            operations: vec![
                tap("a"),
                Operation::Repeat {
                    times: 2,
                    operations: vec![tap("b")],
                },
            ],
        }];
        assert_eq!(
            expand(&ops),
            vec![
                tap_effect("a"),
                tap_effect("b"),
                tap_effect("b"),
                tap_effect("a"),
                tap_effect("b"),
                tap_effect("b"),
            ]
        );
    }

    #[test]
    fn order_and_variants_preserved() {
        let ops = vec![
            Operation::KeyPress { key: "ctrl".into() },
            tap("z"),
            Operation::Delay { ms: 25 },
            Operation::KeyRelease { key: "ctrl".into() },
        ];
        assert_eq!(
            expand(&ops),
            vec![
                DeviceEffect::KeyPress { key: "ctrl".into() },
                tap_effect("z"),
                DeviceEffect::Delay { ms: 25 },
                DeviceEffect::KeyRelease { key: "ctrl".into() },
            ]
        );
    }

    #[test]
    fn empty_sequence_is_empty_plan() {
        assert!(expand(&[]).is_empty());
    }
}
