// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use crate::head::HeadCollection;

/// How enabled outputs are chained together.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arrangement {
    Horizontal,
    Vertical,
}

/// Where an activated output is placed relative to its predecessor in the
/// enable order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Placement {
    RightOf(String),
    Below(String),
}

/// One unit of the layout change handed to the external tool.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Directive {
    /// Activate with automatic mode selection. The first output of a plan
    /// has no placement; it anchors the layout.
    Enable {
        output: String,
        placement: Option<Placement>,
    },
    Disable {
        output: String,
    },
}

/// Plans the directive sequence that enables exactly `enable` (in order)
/// and disables every other output in the collection.
///
/// Each activated output after the first is placed relative to the
/// immediately preceding one, forming a chain anchored at the first entry.
/// Activation directives come first: disabling before enabling can
/// transiently leave zero outputs active on some servers. Disconnected
/// outputs are disabled too, since a disconnected output can still hold a
/// CRTC and occupy screen space.
///
/// `enable` entries must be resolved raw output names, duplicate-free and
/// non-empty; callers validate before planning.
#[must_use]
pub fn plan(collection: &HeadCollection, enable: &[String], arrangement: Arrangement) -> Vec<Directive> {
    assert!(!enable.is_empty(), "layout plan requires at least one output to enable");

    let mut directives = Vec::new();
    let mut previous: Option<&String> = None;

    for output in enable {
        let placement = previous.map(|anchor| match arrangement {
            Arrangement::Horizontal => Placement::RightOf(anchor.clone()),
            Arrangement::Vertical => Placement::Below(anchor.clone()),
        });

        directives.push(Directive::Enable {
            output: output.clone(),
            placement,
        });

        previous = Some(output);
    }

    for output in collection.output_names() {
        let keep = enable
            .iter()
            .any(|name| name.eq_ignore_ascii_case(output));

        if !keep {
            directives.push(Directive::Disable {
                output: output.to_owned(),
            });
        }
    }

    directives
}

/// Renders a directive sequence as xrandr arguments.
#[must_use]
pub fn xrandr_args(directives: &[Directive]) -> Vec<String> {
    let mut args = Vec::with_capacity(directives.len() * 5);

    for directive in directives {
        match directive {
            Directive::Enable { output, placement } => {
                args.extend(["--output".to_owned(), output.clone(), "--auto".to_owned()]);

                match placement {
                    Some(Placement::RightOf(anchor)) => {
                        args.extend(["--right-of".to_owned(), anchor.clone()]);
                    }
                    Some(Placement::Below(anchor)) => {
                        args.extend(["--below".to_owned(), anchor.clone()]);
                    }
                    None => (),
                }
            }

            Directive::Disable { output } => {
                args.extend(["--output".to_owned(), output.clone(), "--off".to_owned()]);
            }
        }
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randr::{Geometry, RawOutput, Snapshot};

    fn universe(enabled: &[&str], disabled: &[&str], disconnected: &[&str]) -> HeadCollection {
        let mut outputs = Vec::new();
        let mut handle = 1;

        for (i, name) in enabled.iter().enumerate() {
            outputs.push(RawOutput {
                handle,
                name: (*name).to_owned(),
                connected: true,
                geometry: Some(Geometry {
                    x: i as i32 * 1920,
                    y: 0,
                    width: 1920,
                    height: 1080,
                }),
            });
            handle += 1;
        }

        for name in disabled {
            outputs.push(RawOutput {
                handle,
                name: (*name).to_owned(),
                connected: true,
                geometry: None,
            });
            handle += 1;
        }

        for name in disconnected {
            outputs.push(RawOutput {
                handle,
                name: (*name).to_owned(),
                connected: false,
                geometry: None,
            });
            handle += 1;
        }

        HeadCollection::discover(Snapshot {
            outputs,
            primary: None,
        })
    }

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn horizontal_plan_chains_right_of_and_disables_the_rest() {
        let collection = universe(&["A", "B", "C"], &["D"], &["E"]);
        let directives = plan(&collection, &owned(&["A", "B", "C"]), Arrangement::Horizontal);

        assert_eq!(
            directives,
            vec![
                Directive::Enable {
                    output: "A".into(),
                    placement: None,
                },
                Directive::Enable {
                    output: "B".into(),
                    placement: Some(Placement::RightOf("A".into())),
                },
                Directive::Enable {
                    output: "C".into(),
                    placement: Some(Placement::RightOf("B".into())),
                },
                Directive::Disable { output: "D".into() },
                Directive::Disable { output: "E".into() },
            ]
        );
    }

    #[test]
    fn activation_strictly_precedes_deactivation() {
        let collection = universe(&["A", "B"], &["C"], &["D"]);
        let directives = plan(&collection, &owned(&["B"]), Arrangement::Horizontal);

        let first_disable = directives
            .iter()
            .position(|directive| matches!(directive, Directive::Disable { .. }))
            .unwrap();
        let last_enable = directives
            .iter()
            .rposition(|directive| matches!(directive, Directive::Enable { .. }))
            .unwrap();
        assert!(last_enable < first_disable);
    }

    #[test]
    fn arrangement_has_no_effect_on_a_single_output() {
        let collection = universe(&["X"], &["Y"], &[]);

        let vertical = plan(&collection, &owned(&["X"]), Arrangement::Vertical);
        let horizontal = plan(&collection, &owned(&["X"]), Arrangement::Horizontal);

        assert_eq!(vertical, horizontal);
        assert_eq!(
            vertical,
            vec![
                Directive::Enable {
                    output: "X".into(),
                    placement: None,
                },
                Directive::Disable { output: "Y".into() },
            ]
        );
    }

    #[test]
    fn vertical_plan_uses_below() {
        let collection = universe(&["A", "B"], &[], &[]);
        let directives = plan(&collection, &owned(&["A", "B"]), Arrangement::Vertical);

        assert_eq!(
            directives[1],
            Directive::Enable {
                output: "B".into(),
                placement: Some(Placement::Below("A".into())),
            }
        );
    }

    #[test]
    fn args_for_a_horizontal_plan() {
        let collection = universe(&["A", "B"], &["C"], &[]);
        let directives = plan(&collection, &owned(&["A", "B"]), Arrangement::Horizontal);

        assert_eq!(
            xrandr_args(&directives),
            [
                "--output", "A", "--auto",
                "--output", "B", "--auto", "--right-of", "A",
                "--output", "C", "--off",
            ]
        );
    }

    #[test]
    #[should_panic(expected = "at least one output")]
    fn empty_enable_order_is_a_contract_violation() {
        let collection = universe(&["A"], &[], &[]);
        let _directives = plan(&collection, &[], Arrangement::Horizontal);
    }
}
