//! Tests for loading program trees and running them end to end

use super::helpers::{approx, build_vm, check_and_run};
use crate::interpreter::program::{ProgramFile, ROOT_MODE_ID};
use crate::interpreter::types::Callback;
use crate::interpreter::{Action, Expr, Mode, Program, Stmt, Value, Variable};
use serde_json::json;

const MISSION: &str = r#"{
    "modes": [
        {
            "id": "Takeoff",
            "entry": true,
            "next": "Survey",
            "body": [
                { "type": "Action", "kind": "ascend_descend", "data": { "type": "Number", "v": 10.0 } }
            ]
        },
        {
            "id": "Survey",
            "body": [
                {
                    "type": "Action",
                    "kind": "move",
                    "data": {
                        "type": "PointConstruct",
                        "x": { "type": "Number", "v": 3.0 },
                        "y": { "type": "Number", "v": 4.0 }
                    },
                    "speed": { "type": "Number", "v": 1.0 }
                }
            ]
        },
        {
            "id": "Home",
            "reactions": { "low battery": "Survey" },
            "body": [
                { "type": "Action", "kind": "move", "data": { "type": "VariableRef", "var": "initial_position" } }
            ]
        }
    ]
}"#;

#[test]
fn test_load_program_from_json() {
    let program = Program::from_json(MISSION).unwrap();

    assert_eq!(program.mode_count(), 3);
    assert_eq!(program.first_mode(), Some("Takeoff"));
    assert_eq!(program.root().id, ROOT_MODE_ID);

    let home = &program.root().submodes["Home"];
    assert!(!home.is_entry);
    assert_eq!(home.reactions["low battery"], "Survey");
    let Stmt::Action(dock) = &home.body[0] else {
        panic!("Expected an action");
    };
    assert_eq!(*dock, Action::dock());
}

#[test]
fn test_run_loaded_program() {
    let program = Program::from_json(MISSION).unwrap();
    let mut vm = build_vm(10000.0);

    let executed = check_and_run(&mut vm, &program).unwrap();

    assert_eq!(executed, vec!["Takeoff", "Survey"]);
    assert_eq!(vm.current_altitude(), 10.0);
    assert_eq!(vm.current_position(), (3.0, 4.0));
    assert!(approx(vm.distance_travelled(), 5.0));
    // Ascend 6.0, then 1.0 for speed and 3.5 for the distance
    assert!(approx(vm.current_battery(), 9989.5));
}

#[test]
fn test_malformed_program_is_rejected() {
    let missing_kind = r#"{ "modes": [ { "id": "A", "body": [ { "type": "Action", "data": { "type": "Number", "v": 1 } } ] } ] }"#;
    assert!(Program::from_json(missing_kind).is_err());

    let unknown_variable = r#"{ "modes": [ { "id": "A", "body": [
        { "type": "Action", "kind": "move", "data": { "type": "VariableRef", "var": "heading" } }
    ] } ] }"#;
    assert!(Program::from_json(unknown_variable).is_err());
}

#[test]
fn test_program_file_serializes_back() {
    let file = ProgramFile {
        modes: vec![
            Mode::new("Start")
                .entry()
                .action(Action::turn_left(Expr::number(45.0)))
                .then("End"),
            Mode::new("End").action(Action::descend_to_ground()),
        ],
    };

    let json = serde_json::to_string(&file).unwrap();
    let program = Program::from_json(&json).unwrap();

    assert_eq!(program.mode_count(), 2);
    assert_eq!(program.root().submodes["Start"].next.as_deref(), Some("End"));
}

#[test]
fn test_callbacks_are_not_serializable() {
    let stmt = Stmt::Callback(Callback::exit());
    assert!(serde_json::to_string(&stmt).is_err());
}

#[test]
fn test_value_json_shape() {
    assert_eq!(
        serde_json::to_value(Value::Point(1.0, 2.0)).unwrap(),
        json!({ "t": "Point", "v": [1.0, 2.0] })
    );
    assert_eq!(
        serde_json::to_value(Expr::var(Variable::BatteryLevel)).unwrap(),
        json!({ "type": "VariableRef", "var": "battery_level" })
    );
}

#[test]
fn test_duplicate_mode_id_keeps_last_declaration() {
    let program = Program::from_modes(vec![
        Mode::new("Hop").entry().action(Action::move_by(Expr::number(1.0))),
        Mode::new("Land").entry().action(Action::descend_to_ground()),
        Mode::new("Hop").entry().action(Action::move_by(Expr::number(5.0))),
    ]);

    assert_eq!(program.mode_count(), 2);
    assert_eq!(program.root().body.len(), 2);
    assert_eq!(program.first_mode(), Some("Land"));

    let mut vm = build_vm(1000.0);
    let executed = check_and_run(&mut vm, &program).unwrap();

    assert_eq!(executed, vec!["Land", "Hop"]);
    assert_eq!(vm.current_position(), (5.0, 0.0));
}

#[test]
fn test_duplicate_non_entry_removes_earlier_entry() {
    let program = Program::from_modes(vec![
        Mode::new("Hop").entry(),
        Mode::new("Hop").action(Action::move_by(Expr::number(5.0))),
    ]);

    assert_eq!(program.mode_count(), 1);
    assert!(program.root().body.is_empty());
    assert_eq!(program.first_mode(), None);
}
