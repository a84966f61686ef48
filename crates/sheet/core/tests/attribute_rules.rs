use std::cell::RefCell;
use std::rc::Rc;

use sheet_core::{
    AttributeDef, AttributeDefs, AttributeKind, ChangeEvent, ChangeListener, Character, EditField,
    PoolThreshold, SheetConfig, SheetSettings, ThresholdOps,
};

fn standard_character() -> Character {
    Character::new(SheetSettings::standard(), &SheetConfig::default())
}

struct EventLog(Rc<RefCell<Vec<ChangeEvent>>>);

impl ChangeListener for EventLog {
    fn changed(&self, event: &ChangeEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

#[test]
fn set_int_value_round_trips_for_every_standard_attribute() {
    let mut character = standard_character();
    let ids: Vec<String> = character
        .attributes()
        .iter()
        .map(|attribute| attribute.attr_id.clone())
        .collect();

    for id in &ids {
        for target in [0, 7, 13, 22] {
            character.set_int_value(id, target).unwrap();
            let value = character.attribute(id).unwrap().int_value(&character);
            assert_eq!(value, target, "{id} -> {target}");
        }
    }
}

#[test]
fn set_int_value_round_trips_under_fractional_bonuses() {
    let mut character = standard_character();
    for (id, bonus) in [("basic_speed", 0.03), ("dx", 0.1), ("hp", 0.7), ("will", -0.3)] {
        character.set_bonus(id, bonus).unwrap();
        for target in 1..20 {
            character.set_int_value(id, target).unwrap();
            let value = character.attribute(id).unwrap().int_value(&character);
            assert_eq!(value, target, "{id} +{bonus} -> {target}");
        }
    }
}

#[test]
fn derived_values_follow_their_sources() {
    let mut character = standard_character();
    character.set_int_value("dx", 12).unwrap();
    character.set_int_value("ht", 11).unwrap();

    let speed = character.attribute("basic_speed").unwrap();
    assert_eq!(speed.double_value(&character), 5.75);
    let moves = character.attribute("basic_move").unwrap();
    assert_eq!(moves.int_value(&character), 5);

    // Raising HT moves speed; the adjustment on basic_move stays put.
    character.set_int_value("basic_move", 6).unwrap();
    character.set_int_value("ht", 13).unwrap();
    let moves = character.attribute("basic_move").unwrap();
    assert_eq!(moves.adjustment(), 1.0);
    assert_eq!(moves.int_value(&character), 7);
}

#[test]
fn cost_reduction_remainder_rounding() {
    let def = AttributeDef::new("x", AttributeKind::Integer, "X", "10", 2);
    let settings = SheetSettings::default();

    // 22 × 55% = 12.10: remainder 10 truncates.
    assert_eq!(def.compute_cost(11.0, 0, 45, &settings), 12);
    // 10 × 55% = 5.50: remainder 50 rounds up.
    assert_eq!(def.compute_cost(5.0, 0, 45, &settings), 6);
    // -22 × 55% = -12.10: remainder -10 truncates.
    assert_eq!(def.compute_cost(-11.0, 0, 45, &settings), -12);
    // -10 × 45% = -4.50: remainder -50 truncates, -51 would round down.
    assert_eq!(def.compute_cost(-5.0, 0, 55, &settings), -4);
    // Discounts cap at 80%.
    assert_eq!(def.compute_cost(10.0, 0, 95, &settings), 4);
}

#[test]
fn pool_state_never_improves_as_damage_grows() {
    let mut character = standard_character();
    let states: Vec<String> = character
        .settings()
        .attributes
        .get("hp")
        .and_then(|def| def.thresholds())
        .unwrap()
        .iter()
        .map(|threshold| threshold.state.clone())
        .collect();

    let mut worst = states.len();
    for damage in 0..=80 {
        character.set_damage("hp", damage).unwrap();
        let hp = character.attribute("hp").unwrap();
        let state = &hp.current_threshold(&character).unwrap().state;
        let rank = states.iter().position(|s| s == state).unwrap();
        assert!(rank <= worst, "damage {damage} improved to {state}");
        worst = rank;
    }
    assert_eq!(states[worst], "Dead");
}

#[test]
fn threshold_ops_follow_damage() {
    let mut character = standard_character();
    assert!(!character.is_threshold_op_met(ThresholdOps::HALVE_MOVE));

    character.set_damage("fp", 8).unwrap();
    assert!(character.is_threshold_op_met(ThresholdOps::HALVE_MOVE));
    assert!(character.is_threshold_op_met(ThresholdOps::HALVE_ST));

    character.set_damage("hp", 7).unwrap();
    assert_eq!(character.count_threshold_op_met(ThresholdOps::HALVE_DODGE), 2);

    character.set_current("fp", 10).unwrap();
    assert_eq!(character.count_threshold_op_met(ThresholdOps::HALVE_DODGE), 1);
}

#[test]
fn edits_undo_redo_and_notify() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut character = standard_character();
    character.subscribe(Box::new(EventLog(Rc::clone(&log))));

    character.set_int_value("st", 12).unwrap();
    character.set_int_value("st", 12).unwrap();
    character.set_damage("hp", 3).unwrap();
    assert_eq!(character.history().undo_len(), 2);
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(
        log.borrow()[0],
        ChangeEvent::AttributeChanged {
            attr_id: "st".to_string(),
            field: EditField::Adjustment,
        }
    );

    assert!(character.undo());
    assert!(character.undo());
    assert!(!character.undo());
    assert_eq!(character.attribute("st").unwrap().int_value(&character), 10);
    assert_eq!(character.attribute("hp").unwrap().damage(), 0);

    assert!(character.redo());
    assert_eq!(character.attribute("st").unwrap().int_value(&character), 12);
    assert_eq!(
        log.borrow().last(),
        Some(&ChangeEvent::HistoryReplayed {
            attr_id: "st".to_string()
        })
    );
}

#[test]
fn broken_formula_keeps_the_character_usable() {
    let defs = AttributeDefs::from(vec![
        AttributeDef::new("iq", AttributeKind::Integer, "IQ", "10", 20),
        AttributeDef::new("per", AttributeKind::Integer, "Per", "$iq +", 5),
        AttributeDef::new("will", AttributeKind::Integer, "Will", "$missing", 5),
    ]);
    let mut character = Character::new(SheetSettings::new(defs), &SheetConfig::default());

    assert_eq!(character.attribute("per").unwrap().int_value(&character), 0);
    assert_eq!(character.attribute("will").unwrap().int_value(&character), 0);

    character.set_int_value("per", 3).unwrap();
    assert_eq!(character.attribute("per").unwrap().int_value(&character), 3);
    assert_eq!(character.attribute_points(), 15);
}

#[test]
fn replacing_settings_keeps_shared_state() {
    let mut character = standard_character();
    character.set_int_value("st", 11).unwrap();
    character.set_damage("hp", 4).unwrap();

    let mut attributes = AttributeDefs::standard();
    attributes.remove("will");
    attributes.insert(AttributeDef::new(
        "sanity",
        AttributeKind::pool(vec![
            PoolThreshold::new("Broken", 0, 1, 0),
            PoolThreshold::new("Sane", 1, 1, 0),
        ]),
        "SAN",
        "$iq",
        2,
    ));
    character.apply_settings(SheetSettings::new(attributes));

    assert!(character.attribute("will").is_none());
    assert_eq!(character.attribute("st").unwrap().int_value(&character), 11);
    assert_eq!(character.attribute("hp").unwrap().damage(), 4);
    let sanity = character.attribute("sanity").unwrap();
    assert_eq!(sanity.current(&character), 10);
    assert_eq!(sanity.current_threshold(&character).unwrap().state, "Sane");
    assert!(!character.history().can_undo());
}

fn hit_point_state(damage: i32) -> String {
    let mut character = standard_character();
    character.set_damage("hp", damage).unwrap();
    let hp = character.attribute("hp").unwrap();
    hp.current_threshold(&character).unwrap().state.clone()
}

#[test]
fn fifteen_damage_at_ten_hit_points_is_collapse() {
    assert_eq!(hit_point_state(15), "Collapse");
    assert_eq!(hit_point_state(60), "Dead");
}

#[test]
fn ten_damage_at_ten_hit_points_is_collapse() {
    assert_eq!(hit_point_state(10), "Collapse");
}

#[test]
fn seven_damage_at_ten_hit_points_is_reeling() {
    assert_eq!(hit_point_state(7), "Reeling");
    assert_eq!(hit_point_state(6), "Wounded");
}
