#[cfg(test)]
mod tests {
    use macrodeck_protocol::Action;

    use crate::*;

    /// A config with a two-level nested radial menu and a flat macro.
    const NESTED: &str = r#"{
        "profiles": {
            "Blender": {
                "bindings": [
                    {
                        "action": { "buttonPress": { "button": 0 } },
                        "command": {
                            "displayName": "Sculpt",
                            "radialMenuItems": [
                                {
                                    "label": "Brushes",
                                    "command": {
                                        "displayName": "Brushes",
                                        "radialMenuItems": [
                                            {
                                                "label": "Grab",
                                                "command": {
                                                    "displayName": "Grab",
                                                    "operations": [
                                                        { "keyTap": { "key": "g" } }
                                                    ]
                                                }
                                            }
                                        ]
                                    }
                                },
                                {
                                    "label": "Undo",
                                    "command": {
                                        "displayName": "Undo",
                                        "operations": [
                                            { "keyPress": { "key": "ctrl" } },
                                            { "keyTap": { "key": "z" } },
                                            { "keyRelease": { "key": "ctrl" } }
                                        ]
                                    }
                                }
                            ]
                        }
                    },
                    {
                        "action": { "encoderIncrement": { "id": 0 } },
                        "command": {
                            "displayName": "Zoom in",
                            "operations": [
                                { "repeat": { "times": 2, "operations": [
                                    { "keyTap": { "key": "+" } },
                                    { "delay": { "ms": 10 } }
                                ] } }
                            ]
                        }
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn nested_config_round_trips() {
        let cfg = load_from_str(NESTED, None).unwrap();
        let doc = to_json_string(&cfg).unwrap();
        let back = load_from_str(&doc, None).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn nested_menu_parses_to_expected_shape() {
        let cfg = load_from_str(NESTED, None).unwrap();
        let profile = cfg.profile_for("Blender").unwrap();
        let root = profile
            .resolve(&Action::ButtonPress { button: 0 })
            .unwrap();
        let leaf = navigate(root, &[0, 0]).unwrap();
        assert_eq!(leaf.display_name, "Grab");
        assert!(matches!(leaf.kind(), CommandKind::Terminal(ops) if ops.len() == 1));
    }

    #[test]
    fn both_shapes_rejected_with_field_path() {
        let source = r#"{
            "profiles": {
                "App": {
                    "bindings": [
                        {
                            "action": { "buttonPress": { "button": 1 } },
                            "command": {
                                "displayName": "Bad",
                                "operations": [],
                                "radialMenuItems": []
                            }
                        }
                    ]
                }
            }
        }"#;
        match load_from_str(source, None) {
            Err(Error::Validation { field, .. }) => {
                assert_eq!(field, "profiles.App.bindings[0].command.radialMenuItems");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn nested_both_shapes_rejected() {
        let source = r#"{
            "profiles": {
                "App": {
                    "bindings": [
                        {
                            "action": { "buttonPress": { "button": 1 } },
                            "command": {
                                "displayName": "Menu",
                                "radialMenuItems": [
                                    {
                                        "label": "bad",
                                        "command": {
                                            "displayName": "Bad",
                                            "operations": [],
                                            "radialMenuItems": []
                                        }
                                    }
                                ]
                            }
                        }
                    ]
                }
            }
        }"#;
        match load_from_str(source, None) {
            Err(Error::Validation { field, .. }) => {
                assert_eq!(
                    field,
                    "profiles.App.bindings[0].command.radialMenuItems[0].command.radialMenuItems"
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn button_out_of_range_rejected() {
        let source = r#"{
            "profiles": {
                "App": {
                    "bindings": [
                        {
                            "action": { "buttonPress": { "button": 12 } },
                            "command": { "displayName": "x", "operations": [] }
                        }
                    ]
                }
            }
        }"#;
        match load_from_str(source, None) {
            Err(Error::Validation { field, .. }) => {
                assert_eq!(field, "profiles.App.bindings[0].action.buttonPress.button");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn empty_key_rejected_inside_repeat() {
        let source = r#"{
            "profiles": {
                "App": {
                    "bindings": [
                        {
                            "action": { "encoderDecrement": { "id": 0 } },
                            "command": {
                                "displayName": "x",
                                "operations": [
                                    { "repeat": { "times": 1, "operations": [
                                        { "keyTap": { "key": "" } }
                                    ] } }
                                ]
                            }
                        }
                    ]
                }
            }
        }"#;
        match load_from_str(source, None) {
            Err(Error::Validation { field, .. }) => {
                assert_eq!(
                    field,
                    "profiles.App.bindings[0].command.operations[0].repeat.operations[0].key"
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_binding_is_lint_not_error() {
        let source = r#"{
            "profiles": {
                "App": {
                    "bindings": [
                        {
                            "action": { "buttonPress": { "button": 3 } },
                            "command": { "displayName": "first", "operations": [] }
                        },
                        {
                            "action": { "buttonPress": { "button": 3 } },
                            "command": { "displayName": "second", "operations": [] }
                        }
                    ]
                }
            }
        }"#;
        let cfg: Config = serde_json::from_str(source).unwrap();
        let lints = validate(&cfg).unwrap();
        assert_eq!(lints.len(), 1);
        assert_eq!(lints[0].field, "profiles.App.bindings[1]");

        // And the load still succeeds.
        assert!(load_from_str(source, None).is_ok());
    }

    #[test]
    fn parse_error_carries_location_and_excerpt() {
        let source = "{\n  \"profiles\": {\n";
        match load_from_str(source, None) {
            Err(Error::Parse { line, excerpt, .. }) => {
                assert!(line >= 2);
                assert!(excerpt.contains('^'));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn unknown_field_rejected() {
        let source = r#"{ "profiles": {}, "stray": 1 }"#;
        assert!(load_from_str(source, None).is_err());
    }
}
